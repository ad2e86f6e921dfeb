mod common;

use common::{valid_consultation, TestApp, ALLOWED_ORIGIN};
use serde_json::{json, Value};

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn create_returns_201_with_generated_id() {
    let app = TestApp::spawn().await;

    let response = app.post_consultation(&valid_consultation()).await;
    assert_eq!(response.status().as_u16(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "상담 요청이 성공적으로 접수되었습니다.");
    assert_eq!(body["data"]["name"], "Kim");
    assert_eq!(body["data"]["company"], "Acme");
    assert_eq!(body["data"]["businessType"], "기타");
    assert_eq!(body["data"]["investmentAmount"], "1억 미만");

    let id = body["data"]["id"].as_str().expect("id should be a string");
    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);
}

#[tokio::test]
async fn create_trims_name_and_company() {
    let app = TestApp::spawn().await;

    let mut payload = valid_consultation();
    payload["name"] = json!("  Kim  ");
    payload["company"] = json!(" Acme ");

    let body: Value = app.post_consultation(&payload).await.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Kim");
    assert_eq!(body["data"]["company"], "Acme");
}

#[tokio::test]
async fn create_rejects_each_missing_field_without_persisting() {
    let app = TestApp::spawn().await;

    for field in ["name", "company", "phone", "businessType", "investmentAmount"] {
        let mut payload = valid_consultation();
        payload.as_object_mut().unwrap().remove(field);

        let response = app.post_consultation(&payload).await;
        assert_eq!(response.status().as_u16(), 400, "missing {field}");

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "모든 필수 항목을 입력해주세요.");
        assert_eq!(body["errors"], json!([format!("{field} is required")]));
    }

    let list: Value = app
        .client
        .get(app.url("/api/consultations"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn create_rejects_wrong_phone_grouping() {
    let app = TestApp::spawn().await;

    let mut payload = valid_consultation();
    payload["phone"] = json!("010-123-4567");

    let response = app.post_consultation(&payload).await;
    assert_eq!(response.status().as_u16(), 400);

    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "전화번호 형식이 올바르지 않습니다. (010-1234-5678)"
    );
}

#[tokio::test]
async fn create_rejects_padded_phone_and_enumeration_values() {
    let app = TestApp::spawn().await;

    let mut payload = valid_consultation();
    payload["phone"] = json!(" 010-1234-5678 ");
    assert_eq!(app.post_consultation(&payload).await.status().as_u16(), 400);

    let mut payload = valid_consultation();
    payload["businessType"] = json!("  기타\t");
    assert_eq!(app.post_consultation(&payload).await.status().as_u16(), 400);

    let list: Value = app
        .client
        .get(app.url("/api/consultations"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn create_rejects_unknown_enumeration_values() {
    let app = TestApp::spawn().await;

    let mut payload = valid_consultation();
    payload["businessType"] = json!("real-estate");
    assert_eq!(app.post_consultation(&payload).await.status().as_u16(), 400);

    let mut payload = valid_consultation();
    payload["investmentAmount"] = json!("100M");
    assert_eq!(app.post_consultation(&payload).await.status().as_u16(), 400);
}

#[tokio::test]
async fn create_rejects_malformed_json_with_envelope() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/api/consultations"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn list_on_empty_store_returns_zero_count() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/api/consultations"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "success": true, "data": [], "count": 0 }));
}

#[tokio::test]
async fn list_returns_newest_first() {
    let app = TestApp::spawn().await;

    let mut first = valid_consultation();
    first["name"] = json!("A");
    app.post_consultation(&first).await;

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let mut second = valid_consultation();
    second["name"] = json!("B");
    app.post_consultation(&second).await;

    let body: Value = app
        .client
        .get(app.url("/api/consultations"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["name"], "B");
    assert_eq!(body["data"][1]["name"], "A");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn delete_succeeds_once_then_returns_404() {
    let app = TestApp::spawn().await;

    let created: Value = app
        .post_consultation(&valid_consultation())
        .await
        .json()
        .await
        .unwrap();
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let url = app.url(&format!("/api/consultations/{}", id));

    let response = app.client.delete(&url).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!({ "id": id }));

    let response = app.client.delete(&url).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "상담 데이터를 찾을 수 없습니다.");
}

#[tokio::test]
async fn delete_with_malformed_id_returns_400() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .delete(app.url("/api/consultations/not-a-valid-id-format"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn delete_unknown_well_formed_id_returns_404() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .delete(app.url("/api/consultations/65a1b2c3d4e5f6a7b8c9d0e1"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
}

// =============================================================================
// Routing, health, CORS
// =============================================================================

#[tokio::test]
async fn health_reports_store_connectivity() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/api/health")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["service"], "consultation-service");
    assert_eq!(body["data"]["database"], "connected");
}

#[tokio::test]
async fn unmatched_route_names_method_and_path() {
    let app = TestApp::spawn().await;

    let response = app.client.get(app.url("/api/nowhere")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("GET /api/nowhere"), "{message}");
}

#[tokio::test]
async fn wrong_method_on_known_path_gets_not_found_envelope() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .patch(app.url("/api/consultations"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("PATCH /api/consultations"), "{message}");

    let response = app.client.post(app.url("/metrics")).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("POST /metrics"));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/api/health"))
        .header("x-request-id", "test-request-1")
        .send()
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "test-request-1");
}

#[tokio::test]
async fn cors_allows_configured_origin_with_credentials() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .request(reqwest::Method::OPTIONS, app.url("/api/consultations"))
        .header("origin", ALLOWED_ORIGIN)
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response.headers()["access-control-allow-origin"],
        ALLOWED_ORIGIN
    );
    assert_eq!(response.headers()["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn cors_ignores_unlisted_origin() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .get(app.url("/api/health"))
        .header("origin", "https://evil.example.com")
        .send()
        .await
        .unwrap();

    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
