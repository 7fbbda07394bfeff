//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tally_core::db::Database;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    create_router(db, None, ServerConfig::default())
}

fn setup_seeded_app() -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    db.seed_demo_data().unwrap();
    (create_router(db.clone(), None, ServerConfig::default()), db)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
}

// ========== Transaction API Tests ==========

#[tokio::test]
async fn test_create_transaction() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "amount": "2500",
        "date": "2025-01-15",
        "description": "Grocery shopping",
        "category": "Food"
    });

    let response = app
        .oneshot(json_request("POST", "/api/transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["amount"], 2500.0);
    assert_eq!(json["data"]["category"], "Food");
    assert!(json["data"]["id"].as_i64().unwrap() > 0);
    assert!(json["data"]["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_transaction_missing_field() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "amount": 100,
        "date": "2025-01-15",
        "category": "Food"
    });

    let response = app
        .oneshot(json_request("POST", "/api/transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Missing required fields");
}

#[tokio::test]
async fn test_create_transaction_empty_description_is_missing() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "amount": 100,
        "date": "2025-01-15",
        "description": "",
        "category": "Food"
    });

    let response = app
        .oneshot(json_request("POST", "/api/transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_transaction_invalid_fields() {
    for (amount, date, category) in [
        (serde_json::json!("abc"), "2025-01-15", "Food"),
        (serde_json::json!(-5), "2025-01-15", "Food"),
        (serde_json::json!(10), "2025-02-30", "Food"),
        (serde_json::json!(10), "2025-01-15", "Groceries"),
    ] {
        let app = setup_test_app();
        let body = serde_json::json!({
            "amount": amount,
            "date": date,
            "description": "Test",
            "category": category
        });

        let response = app
            .oneshot(json_request("POST", "/api/transactions", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = get_body_json(response).await;
        assert_eq!(json["success"], false);
        assert!(json["error"].is_string());
    }
}

#[tokio::test]
async fn test_list_transactions_default_limit() {
    let (app, _db) = setup_seeded_app();

    let response = app.oneshot(get("/api/transactions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_list_transactions_filters_and_clamps() {
    let (app, _db) = setup_seeded_app();

    let response = app
        .clone()
        .oneshot(get("/api/transactions?category=Food&month=2025-01"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["description"], "Grocery shopping at Big Bazaar");

    let response = app
        .clone()
        .oneshot(get("/api/transactions?limit=0"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = app
        .oneshot(get("/api/transactions?category=Groceries"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_update_delete_transaction() {
    let (app, db) = setup_seeded_app();
    let target = db
        .list_transactions_by_category(tally_core::models::Category::Travel)
        .unwrap()
        .remove(0);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/transactions/{}", target.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["data"]["description"], "Flight booking to Mumbai");

    let body = serde_json::json!({
        "amount": 2800,
        "date": "2025-01-05",
        "description": "Flight booking (rebooked)",
        "category": "Travel"
    });
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/transactions/{}", target.id),
            body,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["data"]["amount"], 2800.0);

    // Travel is back under budget after the edit
    let travel = db
        .get_budget(tally_core::models::Category::Travel, "2025-01")
        .unwrap()
        .unwrap();
    assert_eq!(travel.current_spent, 2800.0);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/transactions/{}", target.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get(&format!("/api/transactions/{}", target.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_delete_unknown_transaction() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/transactions/999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Malformed Requests ==========

async fn assert_error_envelope(response: axum::response::Response, status: StatusCode) {
    assert_eq!(response.status(), status);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_wrong_json_type_uses_error_envelope() {
    let app = setup_test_app();
    let body = serde_json::json!({
        "amount": true,
        "date": "2025-01-15",
        "description": "Test",
        "category": "Food"
    });

    let response = app
        .oneshot(json_request("POST", "/api/transactions", body))
        .await
        .unwrap();
    assert_error_envelope(response, StatusCode::UNPROCESSABLE_ENTITY).await;
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/budgets")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_error_envelope(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_missing_content_type_uses_error_envelope() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transactions")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_error_envelope(response, StatusCode::UNSUPPORTED_MEDIA_TYPE).await;
}

#[tokio::test]
async fn test_bad_query_param_uses_error_envelope() {
    let app = setup_test_app();

    let response = app
        .oneshot(get("/api/transactions?limit=abc"))
        .await
        .unwrap();
    assert_error_envelope(response, StatusCode::BAD_REQUEST).await;
}

#[tokio::test]
async fn test_non_numeric_id_uses_error_envelope() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/transactions/abc")).await.unwrap();
    assert_error_envelope(response, StatusCode::BAD_REQUEST).await;
}

// ========== Budget API Tests ==========

#[tokio::test]
async fn test_list_budgets_sorted_by_category() {
    let (app, _db) = setup_seeded_app();

    let response = app.oneshot(get("/api/budgets?month=2025-01")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let budgets = json["data"].as_array().unwrap();
    assert_eq!(budgets.len(), 8);
    assert_eq!(budgets[0]["category"], "Bills");
    assert_eq!(budgets[0]["monthlyBudget"], 1500.0);
    assert_eq!(budgets[0]["currentSpent"], 850.0);
    assert_eq!(budgets[7]["category"], "Travel");
}

#[tokio::test]
async fn test_list_budgets_rejects_bad_month() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/budgets?month=2025-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upsert_budget() {
    let (app, _db) = setup_seeded_app();

    let body = serde_json::json!({
        "category": "Food",
        "monthlyBudget": "6000",
        "month": "2025-01"
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/budgets", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["data"]["monthlyBudget"], 6000.0);
    assert_eq!(json["data"]["currentSpent"], 2500.0);

    // Still one Food budget for January
    let response = app.oneshot(get("/api/budgets?month=2025-01")).await.unwrap();
    let json = get_body_json(response).await;
    let food_count = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|b| b["category"] == "Food")
        .count();
    assert_eq!(food_count, 1);
}

#[tokio::test]
async fn test_upsert_budget_missing_field() {
    let app = setup_test_app();

    let body = serde_json::json!({ "category": "Food", "month": "2025-01" });
    let response = app
        .oneshot(json_request("POST", "/api/budgets", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Missing required fields");
}

#[tokio::test]
async fn test_budget_insights() {
    let (app, _db) = setup_seeded_app();

    let response = app
        .oneshot(get("/api/budgets/insights?month=2025-01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let insights = json["data"].as_array().unwrap();
    let travel = insights.iter().find(|i| i["category"] == "Travel").unwrap();
    assert_eq!(travel["isOverBudget"], true);
    assert_eq!(travel["remaining"], -500.0);
    assert_eq!(travel["percentageUsed"], 117);
}

// ========== Analytics API Tests ==========

#[tokio::test]
async fn test_analytics_all_months() {
    let (app, _db) = setup_seeded_app();

    let response = app.oneshot(get("/api/analytics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let monthly = json["data"]["monthlyExpenses"].as_array().unwrap();
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0]["month"], "2024-12");
    assert_eq!(monthly[0]["amount"], 5200.0);
    assert_eq!(monthly[1]["amount"], 29050.0);

    let categories = json["data"]["categoryExpenses"].as_array().unwrap();
    assert_eq!(categories[0]["category"], "Rent");
    assert_eq!(categories[0]["percentage"], 44);
}

#[tokio::test]
async fn test_analytics_month_filter_only_narrows_categories() {
    let (app, _db) = setup_seeded_app();

    let response = app
        .oneshot(get("/api/analytics?month=2024-12"))
        .await
        .unwrap();
    let json = get_body_json(response).await;

    assert_eq!(json["data"]["monthlyExpenses"].as_array().unwrap().len(), 2);
    let categories = json["data"]["categoryExpenses"].as_array().unwrap();
    assert_eq!(categories.len(), 3);
    assert_eq!(categories[0]["category"], "Food");
    assert_eq!(categories[0]["percentage"], 54);
}

#[tokio::test]
async fn test_analytics_empty_database() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/analytics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json["data"]["monthlyExpenses"].as_array().unwrap().is_empty());
    assert!(json["data"]["categoryExpenses"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_dashboard() {
    let (app, _db) = setup_seeded_app();

    let response = app
        .oneshot(get("/api/dashboard?month=2025-01"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["month"], "2025-01");
    assert_eq!(data["stats"]["totalExpenses"], 34250.0);
    assert_eq!(data["stats"]["overBudgetCount"], 2);
    assert_eq!(data["recentTransactions"].as_array().unwrap().len(), 5);
    assert_eq!(data["budgetInsights"].as_array().unwrap().len(), 8);
}

// ========== Config ==========

#[test]
fn test_parse_origins() {
    assert_eq!(
        parse_origins("http://localhost:3000, https://tally.example ,"),
        vec!["http://localhost:3000", "https://tally.example"]
    );
    assert!(parse_origins("").is_empty());
}

#[test]
fn test_core_errors_map_to_status() {
    let missing = AppError::from(tally_core::Error::MissingField("amount".into()));
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let not_found = AppError::from(tally_core::Error::NotFound("Transaction 1".into()));
    assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

    let io = AppError::from(tally_core::Error::Io(std::io::Error::other("disk")));
    assert_eq!(io.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
