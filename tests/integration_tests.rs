use serde_json::json;
use std::time::Duration;
use traffic_client::config::ClientConfig;
use traffic_client::infra::backend::BackendClient;
use traffic_client::predict::{PredictionClient, PredictionError};
use traffic_client::services::catalog_api::{fallback_junctions, fetch_junctions};
use traffic_client::views::form::{FormStatus, RETRY_MESSAGE};
use traffic_client::views::{CitizenPage, DeliveryPage, SubmitRejected};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::new(server.uri()).with_seed(Some(3))
}

#[tokio::test]
async fn test_delivery_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(json!({
            "source_junction": 1,
            "destination_junction": 2,
            "date": "2025-01-01",
            "time": "09:00",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "source_predicted_vehicles": 10,
            "destination_predicted_vehicles": 5,
            "route_traffic_estimate": "low",
            "source_junction": 1,
            "destination_junction": 2,
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/junctions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "available_junctions": [1, 2, 3, 4],
        })))
        .mount(&server)
        .await;

    let client = PredictionClient::new(BackendClient::from_config(config_for(&server)).unwrap());
    let mut page = DeliveryPage::new();
    page.form.source = "1".to_string();
    page.form.destination = "2".to_string();
    page.form.date_time = "2025-01-01T09:00".to_string();

    page.open(client.backend(), &client).await.unwrap();

    let view = page.form.result().unwrap();
    assert_eq!(view.optimal_route.path, "J1 → J2");
    assert_eq!(view.optimal_route.estimated_time, "15 minutes");
    assert_eq!(view.optimal_route.distance, "8.5 km");
    assert_eq!(view.alternative_routes[0].estimated_time, "20 minutes");
    assert_eq!(page.junctions().len(), 4);
}

#[tokio::test]
async fn test_relative_base_path_through_origin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/junctions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "available_junctions": [{"id": "J007", "name": "Hospital Junction"}],
        })))
        .mount(&server)
        .await;

    let config = ClientConfig::new("/api").with_origin(server.uri());
    let backend = BackendClient::from_config(config).unwrap();

    let junctions = fetch_junctions(&backend).await;

    assert_eq!(junctions.len(), 1);
    assert_eq!(junctions[0].id.get(), 7);
    assert_eq!(junctions[0].name, "Hospital Junction");
}

#[tokio::test]
async fn test_catalog_server_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/junctions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Error retrieving junction data"))
        .mount(&server)
        .await;

    let backend = BackendClient::from_config(config_for(&server)).unwrap();

    assert_eq!(fetch_junctions(&backend).await, fallback_junctions());
}

#[tokio::test]
async fn test_citizen_backend_error_shows_retry_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "detail": "Prediction error: bad input",
        })))
        .mount(&server)
        .await;

    let client = PredictionClient::new(BackendClient::from_config(config_for(&server)).unwrap());
    let mut page = CitizenPage::new();
    page.form.source = "J001".to_string();
    page.form.destination = "J002".to_string();
    page.form.date_time = "2025-09-20T08:30".to_string();

    page.submit(&client).await.unwrap();

    assert_eq!(page.form.status(), &FormStatus::Error(RETRY_MESSAGE.to_string()));
    assert!(!page.form.is_loading());
}

#[tokio::test]
async fn test_empty_field_issues_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = PredictionClient::new(BackendClient::from_config(config_for(&server)).unwrap());
    let mut page = CitizenPage::new();
    page.form.source = "1".to_string();
    page.form.date_time = "2025-09-20T08:30".to_string();

    let err = page.submit(&client).await.unwrap_err();

    assert_eq!(err, SubmitRejected::MissingFields);
    assert_eq!(err.to_string(), "Please fill in all fields");
}

#[tokio::test]
async fn test_partial_payload_uses_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "route_traffic_estimate": 27.4,
        })))
        .mount(&server)
        .await;

    let client = PredictionClient::new(BackendClient::from_config(config_for(&server)).unwrap());

    let prediction = client.predict("1", "4", "2025-09-20T08:30").await.unwrap();

    assert_eq!(prediction.citizen.source_vehicles, 0.0);
    assert_eq!(prediction.citizen.destination_vehicles, 0.0);
    assert_eq!(prediction.delivery.optimal_route.estimated_time, "25 minutes");
    assert!(prediction.citizen.traffic_data.iter().all(|p| p.volume >= 20.0));
}

#[tokio::test]
async fn test_timeout_is_a_backend_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = config_for(&server).with_timeout(Duration::from_millis(200));
    let client = PredictionClient::new(BackendClient::from_config(config).unwrap());

    let err = client.predict("1", "2", "2025-09-20T08:30").await.unwrap_err();

    assert!(matches!(err, PredictionError::Backend(_)));
}

#[tokio::test]
async fn test_cancelled_submit_can_be_resubmitted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"route_traffic_estimate": "high"}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = PredictionClient::new(BackendClient::from_config(config_for(&server)).unwrap());
    let mut page = CitizenPage::new();
    page.form.source = "1".to_string();
    page.form.destination = "2".to_string();
    page.form.date_time = "2025-09-20T08:30".to_string();

    let cancelled = tokio::time::timeout(Duration::from_millis(100), page.submit(&client)).await;

    assert!(cancelled.is_err());
    assert!(!page.form.is_loading());
    assert_eq!(page.form.status(), &FormStatus::Idle);

    let resubmitted = page.submit(&client).await;

    assert_eq!(resubmitted, Ok(()));
    let view = page.form.result().unwrap();
    assert_eq!(view.route_estimate.to_string(), "high");
}

#[tokio::test]
async fn test_health_and_stats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "model_loaded": true,
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/traffic-stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_records": 120,
            "peak_hours": [19, 20, 18],
        })))
        .mount(&server)
        .await;

    let backend = BackendClient::from_config(config_for(&server)).unwrap();

    assert!(backend.health().await.unwrap().is_healthy());
    let stats = backend.traffic_stats().await.unwrap();
    assert_eq!(stats.total_records, 120);
    assert_eq!(stats.peak_hours, vec![19, 20, 18]);
}
