use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_health_root() {
    let (status, body) = common::get(common::create_test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_live() {
    let (status, body) = common::get(common::create_test_app(), "/health/live").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["process"], true);
}

#[tokio::test]
async fn test_health_live_enforces_configured_memory_limit() {
    if !std::path::Path::new("/proc/self/status").exists() {
        return;
    }
    let config = mentor_backend::config::Config {
        memory_limit_bytes: Some(1024),
        ..common::test_config()
    };
    let app = mentor_backend::create_app(&config);

    let (status, body) = common::get(app, "/health/live").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["memory"], false);
}

#[tokio::test]
async fn test_health_info_reports_seeded_mode() {
    let (status, body) = common::get(common::create_test_app(), "/health/info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "mentor-backend");
    assert_eq!(body["estimatorMode"], "seeded");
    assert!(body["startTime"].is_string());
}

#[tokio::test]
async fn test_custom_healthcheck_endpoint() {
    let config = mentor_backend::config::Config {
        healthcheck_endpoint: "/healthz".to_string(),
        ..common::test_config()
    };
    let app = mentor_backend::create_app(&config);

    let (status, body) = common::get(app.clone(), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _) = common::get(app, "/health/live").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_difficulty_named_body() {
    let (status, body) = common::post_json(
        common::create_test_app(),
        "/api/v1/difficulty",
        json!({
            "loops": 2,
            "conditionals": 3,
            "nestingDepth": 2,
            "functionCount": 1,
            "lineCount": 25,
            "complexityScore": 0.4,
            "problemTextLength": 800,
            "testCaseCount": 4
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["difficultyScore"], 0.813);
    assert_eq!(body["data"]["category"], "Hard");
    assert_eq!(body["data"]["confidence"], "85%");
    assert_eq!(body["data"]["featureBreakdown"]["lengthImpact"], "0.020");
}

#[tokio::test]
async fn test_difficulty_positional_hard_preset() {
    let (status, body) = common::post_json(
        common::create_test_app(),
        "/api/v1/difficulty",
        json!({ "data": [4, 8, 5, 3, 80, 0.8, 1500, 8] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["difficultyScore"], 0.9);
    assert_eq!(body["data"]["category"], "Hard");
    assert_eq!(
        body["data"]["recommendation"],
        "Estimated 90% difficulty - hard level problem"
    );
}

#[tokio::test]
async fn test_difficulty_out_of_range_inputs_are_clamped() {
    let (status, body) = common::post_json(
        common::create_test_app(),
        "/api/v1/difficulty",
        json!({ "data": [-5, -5, -5, -5, -5, -5.0, -5, -5] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["category"], "Easy");
    let score = body["data"]["difficultyScore"].as_f64().unwrap();
    assert!((0.1..=0.9).contains(&score));
}

#[tokio::test]
async fn test_difficulty_batch() {
    let (status, body) = common::post_json(
        common::create_test_app(),
        "/api/v1/difficulty/batch",
        json!({
            "items": [
                { "data": [4, 8, 5, 3, 80, 0.8, 1500, 8] },
                { "data": [0, 0, 0, 0, 1, 0.0, 50, 1] }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let reports = body["data"].as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["category"], "Hard");
    assert_eq!(reports[1]["category"], "Easy");

    let (status, body) = common::post_json(
        common::create_test_app(),
        "/api/v1/difficulty/batch",
        json!({ "data": [1, 2, 1, 1, 15, 0.2, 300, 3] }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "COMPUTATION_FAILED");
}

#[tokio::test]
async fn test_timeline_is_reproducible_under_seed() {
    let body = json!({
        "studentSkill": 0.2,
        "problemDifficulty": 0.7,
        "problemComplexity": 0.6,
        "problemLength": 1200
    });

    let (status, first) =
        common::post_json(common::create_test_app(), "/api/v1/timeline", body.clone()).await;
    let (_, second) = common::post_json(common::create_test_app(), "/api/v1/timeline", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);

    let hours = first["data"]["estimatedHours"].as_f64().unwrap();
    assert!((5.5..=8.3).contains(&hours));
    assert_eq!(first["data"]["factors"]["skillGapImpact"], "4.0 hours");
    assert_eq!(first["data"]["factors"]["complexityMultiplier"], "1.30x");
}

#[tokio::test]
async fn test_timeline_positional_body() {
    let (status, body) = common::post_json(
        common::create_test_app(),
        "/api/v1/timeline",
        json!({ "data": [0.1, 1.0, 1.0, 5000] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["learningPace"], "Extended");
}

#[tokio::test]
async fn test_mistake_edge_case_missed() {
    let (status, body) = common::post_json(
        common::create_test_app(),
        "/api/v1/mistake",
        json!({ "data": [1, 0, 1, 20, 0.3, false, 1, 0.7] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["predictedMistake"], "Edge Case Missed");
    assert_eq!(body["data"]["category"], "edge_case_missed");
    assert_eq!(body["data"]["confidence"], "75.0%");
    assert_eq!(body["data"]["riskLevel"], "Medium");

    let probabilities = body["data"]["probabilities"].as_object().unwrap();
    assert_eq!(probabilities.len(), 6);
    let total: f64 = probabilities.values().filter_map(|v| v.as_f64()).sum();
    assert!((total - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_mistake_clean_code_uses_residual_rules() {
    let (status, body) = common::post_json(
        common::create_test_app(),
        "/api/v1/mistake",
        json!({
            "loops": 2,
            "conditionals": 3,
            "nestingDepth": 3,
            "lineCount": 30,
            "complexityScore": 0.5,
            "hasRecursion": "no",
            "functionCount": 2,
            "problemDifficulty": 0.6
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let category = body["data"]["category"].as_str().unwrap();
    assert!(category == "syntax_error" || category == "no_error");
    assert_eq!(body["data"]["detailedAnalysis"]["complexityConcern"], "Medium");
}

#[tokio::test]
async fn test_non_finite_inputs_are_clamped_not_rejected() {
    let (status, body) = common::post_json(
        common::create_test_app(),
        "/api/v1/difficulty",
        json!({ "data": [1, 2, 1, 1, 15, "1e400", 300, 3] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["featureBreakdown"]["complexityImpact"], "0.300");

    let (status, body) = common::post_json(
        common::create_test_app(),
        "/api/v1/mistake",
        json!({ "data": [1, 2, 1, 20, "inf", false, 1, 0.5] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["category"], "optimization_needed");
}

#[tokio::test]
async fn test_coercion_failure_envelope() {
    let (status, body) = common::post_json(
        common::create_test_app(),
        "/api/v1/timeline",
        json!({ "data": [0.5, "hard", 0.5, 1000] }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "COMPUTATION_FAILED");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Timeline prediction failed:"));
}

#[tokio::test]
async fn test_missing_field_envelope() {
    let (status, body) = common::post_json(
        common::create_test_app(),
        "/api/v1/mistake",
        json!({ "loops": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"],
        "Mistake classification failed: missing value for `conditionals`"
    );
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (status, body) =
        common::post_raw(common::create_test_app(), "/api/v1/difficulty", "{\"loops\": ").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (status, body) = common::get(common::create_test_app(), "/api/v1/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_wrong_method_is_not_found() {
    let (status, body) = common::get(common::create_test_app(), "/api/v1/difficulty").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
