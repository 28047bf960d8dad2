//! End-to-end route planning test against a running server.
//!
//! Run with: cargo test --test route_live_test -- --ignored
//! Requires a running refuel server with an imported station catalog and
//! live provider credentials.

use reqwest::Client;

fn base_url() -> String {
    std::env::var("REFUEL_TEST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

#[tokio::test]
#[ignore]
async fn plan_route_returns_consistent_totals() {
    let client = Client::new();
    let base = base_url();

    let resp = client
        .get(format!("{}/v1/route", base))
        .query(&[("start", "New York, NY"), ("end", "Chicago, IL")])
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success(), "status {}", resp.status());

    let body: serde_json::Value = resp.json().await.unwrap();
    let total_miles = body["total_miles"].as_f64().unwrap();
    assert!(total_miles > 700.0, "NY to Chicago should be >700mi");

    let stops = body["fuel_stops"].as_array().unwrap();
    let cost_sum: f64 = stops.iter().map(|s| s["cost"].as_f64().unwrap()).sum();
    let total_cost = body["total_cost_usd"].as_f64().unwrap();
    assert!((total_cost - cost_sum).abs() <= 0.01);
}

#[tokio::test]
#[ignore]
async fn missing_params_rejected() {
    let client = Client::new();
    let resp = client
        .get(format!("{}/v1/route", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
}
