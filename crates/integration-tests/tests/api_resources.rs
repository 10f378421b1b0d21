mod support;

use axum::http::{Method, StatusCode};
use serde_json::json;

use support::api_app::{build_test_router, request, send_json};

const UNREACHABLE_COMPLETIONS_URL: &str = "http://127.0.0.1:9/chat/completions";

#[tokio::test]
async fn healthz_and_resources_need_no_session() {
    let app = build_test_router(UNREACHABLE_COMPLETIONS_URL);

    let health = send_json(&app, request(Method::GET, "/healthz", None, None)).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["ok"], true);

    let resources = send_json(&app, request(Method::GET, "/v1/resources", None, None)).await;
    assert_eq!(resources.status, StatusCode::OK);
    let organizations = resources.body["organizations"]
        .as_array()
        .expect("organizations");
    assert!(organizations.iter().any(|org| org["key"] == "NIH"));
    let contacts = resources.body["emergency_contacts"]
        .as_array()
        .expect("emergency contacts");
    assert!(
        contacts
            .iter()
            .any(|contact| contact["region"] == "US" && contact["number"] == "911")
    );
    assert_eq!(
        resources.body["emergency_situations"]
            .as_array()
            .map(Vec::len),
        Some(6)
    );
}

#[tokio::test]
async fn bmi_calculator_reports_category() {
    let app = build_test_router(UNREACHABLE_COMPLETIONS_URL);

    let response = send_json(
        &app,
        request(
            Method::POST,
            "/v1/calculators/bmi",
            None,
            Some(json!({"height_ft": 5, "height_in": 10, "weight_lbs": 160.0})),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let bmi = response.body["bmi"].as_f64().expect("bmi value");
    assert!((bmi - 22.96).abs() < 0.01, "bmi was {bmi}");
    assert_eq!(response.body["category"], "normal_weight");
    let current: Vec<_> = response.body["categories"]
        .as_array()
        .expect("category rows")
        .iter()
        .filter(|row| row["current"] == true)
        .collect();
    assert_eq!(current.len(), 1);
}

#[tokio::test]
async fn heart_rate_zones_follow_age() {
    let app = build_test_router(UNREACHABLE_COMPLETIONS_URL);

    let response = send_json(
        &app,
        request(
            Method::POST,
            "/v1/calculators/heart-rate",
            None,
            Some(json!({"age": 40})),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["max_hr"], 180);
    let zones = response.body["zones"].as_array().expect("zones");
    assert_eq!(zones.len(), 5);
    assert_eq!(zones[0]["lower_bpm"], 90);
    assert_eq!(zones[0]["upper_bpm"], 108);
    assert_eq!(zones[4]["upper_bpm"], 171);
}

#[tokio::test]
async fn hydration_and_calorie_calculators_apply_activity_multipliers() {
    let app = build_test_router(UNREACHABLE_COMPLETIONS_URL);

    let hydration = send_json(
        &app,
        request(
            Method::POST,
            "/v1/calculators/hydration",
            None,
            Some(json!({"weight_lbs": 150.0, "activity": "moderately_active"})),
        ),
    )
    .await;
    assert_eq!(hydration.status, StatusCode::OK);
    let ounces = hydration.body["ounces"].as_f64().expect("ounces");
    assert!((ounces - 105.0).abs() < 1e-9);

    let calories = send_json(
        &app,
        request(
            Method::POST,
            "/v1/calculators/calories",
            None,
            Some(json!({
                "sex": "male",
                "age": 30,
                "weight_lbs": 150.0,
                "height_in": 68.0,
                "activity": "sedentary"
            })),
        ),
    )
    .await;
    assert_eq!(calories.status, StatusCode::OK);
    let bmr = calories.body["bmr"].as_f64().expect("bmr");
    let total = calories.body["total"].as_f64().expect("total");
    assert!((bmr - 1614.89).abs() < 0.1, "bmr was {bmr}");
    assert!((total - bmr * 1.2).abs() < 1e-6);
}

#[tokio::test]
async fn calculator_inputs_are_clamped_to_form_bounds() {
    let app = build_test_router(UNREACHABLE_COMPLETIONS_URL);

    let response = send_json(
        &app,
        request(
            Method::POST,
            "/v1/calculators/heart-rate",
            None,
            Some(json!({"age": 5})),
        ),
    )
    .await;
    assert_eq!(response.body["max_hr"], 210);

    let malformed = send_json(
        &app,
        request(
            Method::POST,
            "/v1/calculators/bmi",
            None,
            Some(json!({"height_ft": "tall"})),
        ),
    )
    .await;
    assert!(malformed.status.is_client_error());
}
