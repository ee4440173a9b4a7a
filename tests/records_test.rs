//! Integration tests for seedling, crop status and farm plot records and
//! the statistics computed from them.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use common::{Form, TestApp};

fn seedling(owner: &str, received: Value, planted: Value, hectares: Value) -> Value {
    json!({
        "beneficiaryId": owner,
        "seedlingsReceived": received,
        "dateReceived": "2024-06-01",
        "seedlingsPlanted": planted,
        "hectares": hectares,
        "plantingStart": "2024-06-02",
        "plantingEnd": ""
    })
}

fn survey(owner: &str, alive: &str, dead: &str) -> Form {
    Form::new()
        .text("beneficiaryId", owner)
        .text("surveyDate", "2024-09-15")
        .text("surveyor", "Maria Santos")
        .text("aliveCrops", alive)
        .text("deadCrops", dead)
}

#[tokio::test]
async fn test_seedling_accepts_numeric_strings_and_joins_owner() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.register(&token, "Juan", "Dela Cruz").await;

    let (status, created) = app
        .post_json(
            "/api/seedlings",
            &token,
            seedling("JD001", json!("120"), json!(100), json!("1.25")),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["seedlingsReceived"], 120);
    assert_eq!(created["hectares"], 1.25);
    assert_eq!(created["plantingEnd"], Value::Null);
    assert_eq!(created["beneficiaryName"], "Juan Dela Cruz");

    let uri = format!("/api/seedlings/{}", created["id"]);
    let (status, updated) = app
        .put_json(&uri, &token, seedling("JD001", json!(120), json!(110), json!(1.5)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["seedlingsPlanted"], 110);

    let (status, _) = app.delete(&uri, &token).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.get(&uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_records_require_existing_beneficiary() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .post_json(
            "/api/seedlings",
            &token,
            seedling("ZZ999", json!(1), json!(1), json!(0.1)),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Beneficiary ZZ999 not found");

    let (status, _) = app
        .send(survey("ZZ999", "1", "1").request(Method::POST, "/api/crop-status", &token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters_by_beneficiary() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.register(&token, "Juan", "Dela Cruz").await;
    app.register(&token, "Maria", "Santos").await;

    for owner in ["JD001", "MS002", "MS002"] {
        app.post_json(
            "/api/seedlings",
            &token,
            seedling(owner, json!(10), json!(10), json!(0.1)),
        )
        .await;
    }

    let (_, all) = app.get("/api/seedlings", &token).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, mine) = app.get("/api/seedlings?beneficiaryId=MS002", &token).await;
    assert_eq!(mine.as_array().unwrap().len(), 2);
    assert!(mine
        .as_array()
        .unwrap()
        .iter()
        .all(|r| r["beneficiaryName"] == "Maria Santos"));
}

#[tokio::test]
async fn test_farm_plot_boundary_rules() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.register(&token, "Juan", "Dela Cruz").await;

    let (status, body) = app
        .post_json(
            "/api/farm-plots",
            &token,
            json!({
                "beneficiaryId": "JD001",
                "name": "Sliver",
                "coordinates": [{"lat": 14.1, "lng": 121.2}, {"lat": 14.2, "lng": 121.3}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("at least 3"));

    let (status, plot) = app
        .post_json(
            "/api/farm-plots",
            &token,
            json!({
                "beneficiaryId": "JD001",
                "name": "Riverside",
                "color": "#ff8800",
                "coordinates": [
                    {"lat": "14°10'12\"N", "lng": "121°14'24\"E"},
                    {"lat": "14.17", "lng": 121.25},
                    {"lat": 14.18, "lng": "121 15 0 E"}
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{plot}");
    assert_eq!(plot["color"], "#ff8800");
    let near = |value: &Value, expected: f64| (value.as_f64().unwrap() - expected).abs() < 1e-9;
    assert!(near(&plot["coordinates"][0]["lat"], 14.17));
    assert!(near(&plot["coordinates"][0]["lng"], 121.24));
    assert!(near(&plot["coordinates"][2]["lng"], 121.25));

    let (status, _) = app
        .put_json(
            &format!("/api/farm-plots/{}", plot["id"]),
            &token,
            json!({
                "beneficiaryId": "JD001",
                "name": "Riverside",
                "coordinates": [{"lat": 14.1, "lng": 121.2}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_crop_status_update_keeps_selected_pictures() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.register(&token, "Juan", "Dela Cruz").await;

    let (status, created) = app
        .send(
            survey("JD001", "45", "5")
                .file("pictures", "one.jpg", b"1")
                .file("pictures", "two.jpg", b"2")
                .request(Method::POST, "/api/crop-status", &token),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["survivalRate"], 90.0);
    let keep = created["pictures"][0].as_str().unwrap().to_string();
    let drop = created["pictures"][1].as_str().unwrap().to_string();

    let (status, updated) = app
        .send(
            survey("JD001", "40", "10")
                .text("existingPictures", &json!([keep]).to_string())
                .file("pictures", "three.png", b"3")
                .request(
                    Method::PUT,
                    &format!("/api/crop-status/{}", created["id"]),
                    &token,
                ),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{updated}");
    let pictures = updated["pictures"].as_array().unwrap();
    assert_eq!(pictures.len(), 2);
    assert_eq!(pictures[0], keep.as_str());
    assert_eq!(updated["survivalRate"], 80.0);
    assert!(updated["pictureUrls"][1]
        .as_str()
        .unwrap()
        .starts_with("/uploads/crop_"));
    assert!(app.upload_exists(&keep));
    assert!(!app.upload_exists(&drop));
}

#[tokio::test]
async fn test_statistics_sum_every_record() {
    let app = TestApp::spawn().await;
    let token = app.admin_token().await;
    app.register(&token, "Juan", "Dela Cruz").await;
    app.register(&token, "Maria", "Santos").await;

    app.post_json(
        "/api/seedlings",
        &token,
        seedling("JD001", json!(100), json!(80), json!(0.75)),
    )
    .await;
    app.post_json(
        "/api/seedlings",
        &token,
        seedling("MS002", json!(50), json!(50), json!(0.5)),
    )
    .await;
    for (owner, alive, dead) in [("JD001", "30", "10"), ("MS002", "60", "0")] {
        let (status, _) = app
            .send(survey(owner, alive, dead).request(Method::POST, "/api/crop-status", &token))
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, stats) = app.get("/api/statistics", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalBeneficiaries"], 2);
    assert_eq!(stats["totalSurveys"], 2);
    assert_eq!(stats["totalFarmPlots"], 0);
    assert_eq!(stats["totalSeedlingsReceived"], 150);
    assert_eq!(stats["totalSeedlingsPlanted"], 130);
    assert_eq!(stats["totalHectares"], 1.25);
    assert_eq!(stats["totalAliveCrops"], 90);
    assert_eq!(stats["totalDeadCrops"], 10);
    assert_eq!(stats["survivalRate"], 90.0);
    assert_eq!(stats["genderBreakdown"], json!([{ "gender": "female", "count": 2 }]));
    assert_eq!(
        stats["beneficiariesByMunicipality"],
        json!([{ "municipality": "Los Baños", "count": 2 }])
    );
}
