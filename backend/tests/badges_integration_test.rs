//! Integration tests for badge evaluation and awarding

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_no_activity_earns_nothing() {
    let app = common::TestApp::new().await;
    let user_id = app
        .create_test_user(&format!("badges_none_{}@example.com", uuid::Uuid::new_v4()))
        .await;

    let (status, response) = app.get("/api/v1/badges", Some(user_id)).await;

    assert_eq!(status, StatusCode::OK);
    let report: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(report["newly_awarded"].as_array().unwrap().is_empty());
    assert_eq!(report["badges"].as_array().unwrap().len(), 4);
    for badge in report["badges"].as_array().unwrap() {
        assert_eq!(badge["earned"], false);
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_first_reading_awards_first_step() {
    let app = common::TestApp::new().await;
    let user_id = app
        .create_test_user(&format!("badges_first_{}@example.com", uuid::Uuid::new_v4()))
        .await;

    let body = json!({ "systolic": 120, "diastolic": 80 });
    let (status, _) = app.post("/api/v1/bp", &body.to_string(), Some(user_id)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = app.get("/api/v1/badges", Some(user_id)).await;

    assert_eq!(status, StatusCode::OK);
    let report: serde_json::Value = serde_json::from_str(&response).unwrap();
    let newly: Vec<&str> = report["newly_awarded"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(newly, vec!["FIRST_BP_READING"]);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_second_evaluation_awards_nothing_new() {
    let app = common::TestApp::new().await;
    let user_id = app
        .create_test_user(&format!("badges_idem_{}@example.com", uuid::Uuid::new_v4()))
        .await;

    let body = json!({ "systolic": 120, "diastolic": 80 });
    let (status, _) = app.post("/api/v1/bp", &body.to_string(), Some(user_id)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, first) = app.get("/api/v1/badges", Some(user_id)).await;
    assert_eq!(status, StatusCode::OK);
    let first: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(first["newly_awarded"].as_array().unwrap().len(), 1);

    // Same state again: the award must not repeat
    let (status, second) = app.get("/api/v1/badges", Some(user_id)).await;
    assert_eq!(status, StatusCode::OK);
    let second: serde_json::Value = serde_json::from_str(&second).unwrap();
    assert!(second["newly_awarded"].as_array().unwrap().is_empty());

    let earned: Vec<&serde_json::Value> = second["badges"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|b| b["earned"] == true)
        .collect();
    assert_eq!(earned.len(), 1);
    assert_eq!(earned[0]["code"], "FIRST_BP_READING");
    assert!(earned[0]["earned_at"].is_string());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_badge_list_sorted_earned_first() {
    let app = common::TestApp::new().await;
    let user_id = app
        .create_test_user(&format!("badges_sort_{}@example.com", uuid::Uuid::new_v4()))
        .await;

    let body = json!({ "systolic": 120, "diastolic": 80 });
    let (status, _) = app.post("/api/v1/bp", &body.to_string(), Some(user_id)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = app.get("/api/v1/badges", Some(user_id)).await;
    assert_eq!(status, StatusCode::OK);
    let report: serde_json::Value = serde_json::from_str(&response).unwrap();
    let badges = report["badges"].as_array().unwrap();

    // The single earned badge leads; the rest follow alphabetically by name
    assert_eq!(badges[0]["code"], "FIRST_BP_READING");
    let unearned_names: Vec<&str> = badges[1..]
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    let mut sorted = unearned_names.clone();
    sorted.sort();
    assert_eq!(unearned_names, sorted);
}
