use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use super::types::{Health, TrafficStats};
use crate::config::ClientConfig;
use crate::fetch::{BasicClient, FetchError, HttpClient, get_json, post_json};
use crate::junction::Junction;
use crate::predict::PredictionRequest;
use crate::predict::raw::RawPrediction;
use crate::services::catalog_api::JunctionCatalog;

pub struct BackendClient<C> {
    http: C,
    config: ClientConfig,
}

impl BackendClient<BasicClient> {
    /// Uses a `reqwest` transport bounded by the configured timeout.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let http = BasicClient::with_timeout(config.timeout)?;
        Ok(Self::new(http, config))
    }
}

impl<C: HttpClient> BackendClient<C> {
    pub fn new(http: C, config: ClientConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn http(&self) -> &C {
        &self.http
    }

    #[tracing::instrument(skip(self))]
    pub async fn health(&self) -> Result<Health, FetchError> {
        let value = get_json(&self.http, &self.config.endpoint("/health")).await?;
        Ok(Health::from_json(value))
    }

    #[tracing::instrument(skip(self))]
    pub async fn traffic_stats(&self) -> Result<TrafficStats, FetchError> {
        let value = get_json(&self.http, &self.config.endpoint("/traffic-stats")).await?;
        if !value.is_object() {
            return Err(FetchError::UnexpectedShape("a statistics object"));
        }
        Ok(TrafficStats::from_json(&value))
    }

    /// Sends one prediction request; the body must be a JSON object.
    #[tracing::instrument(skip(self), fields(
        source = request.source_junction,
        destination = request.destination_junction,
    ))]
    pub async fn predict(&self, request: &PredictionRequest) -> Result<RawPrediction, FetchError> {
        let value = post_json(&self.http, &self.config.endpoint("/predict"), request).await?;
        if !value.is_object() {
            return Err(FetchError::UnexpectedShape("a prediction object"));
        }
        debug!(response = %value, "Prediction received");
        Ok(RawPrediction::from_json(&value))
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_junctions(&self) -> Result<Vec<Junction>, FetchError> {
        let value = get_json(&self.http, &self.config.endpoint("/junctions")).await?;
        let entries = value["available_junctions"]
            .as_array()
            .ok_or(FetchError::UnexpectedShape("an 'available_junctions' list"))?;

        let junctions: Vec<Junction> = entries.iter().filter_map(Junction::from_json).collect();
        if junctions.len() < entries.len() {
            debug!(
                skipped = entries.len() - junctions.len(),
                "Ignored unrecognised junction entries"
            );
        }
        Ok(junctions)
    }
}

#[async_trait]
impl<C: HttpClient> JunctionCatalog for BackendClient<C> {
    async fn list_junctions(&self) -> Result<Vec<Junction>> {
        Ok(self.fetch_junctions().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::mock::MockClient;
    use crate::services::catalog_api::{fallback_junctions, fetch_junctions};
    use serde_json::json;

    fn backend(http: MockClient) -> BackendClient<MockClient> {
        BackendClient::new(http, ClientConfig::new("http://localhost:8000"))
    }

    #[tokio::test]
    async fn test_junctions_from_integer_list() {
        let client = backend(MockClient::new().respond_json(json!({
            "available_junctions": [1, 2, 3, 4],
            "total_junctions": 4,
        })));

        let junctions = client.list_junctions().await.unwrap();

        assert_eq!(junctions, fallback_junctions());
        assert_eq!(
            client.http.requests()[0].url,
            "http://localhost:8000/junctions"
        );
    }

    #[tokio::test]
    async fn test_junctions_skip_invalid_entries() {
        let client = backend(MockClient::new().respond_json(json!({
            "available_junctions": [
                {"id": "J005", "name": "University Square"},
                null,
                {"id": 6},
            ],
        })));

        let junctions = client.list_junctions().await.unwrap();

        assert_eq!(junctions.len(), 2);
        assert_eq!(junctions[0].name, "University Square");
        assert_eq!(junctions[1].name, "Junction 6");
    }

    #[tokio::test]
    async fn test_junctions_missing_key_is_error() {
        let client = backend(MockClient::new().respond_json(json!({"junctions": [1]})));
        assert!(client.list_junctions().await.is_err());
    }

    #[tokio::test]
    async fn test_catalog_failure_falls_back() {
        let client = backend(MockClient::new().fail());
        let junctions = fetch_junctions(&client).await;
        assert_eq!(junctions, fallback_junctions());

        let malformed = backend(MockClient::new().respond(200, "not json"));
        assert_eq!(fetch_junctions(&malformed).await, fallback_junctions());
    }

    #[tokio::test]
    async fn test_predict_posts_request() {
        let client = backend(MockClient::new().respond_json(json!({
            "source_predicted_vehicles": 12.5,
            "route_traffic_estimate": "high",
        })));
        let request = PredictionRequest {
            source_junction: 1,
            destination_junction: 4,
            date: "2025-09-20".to_string(),
            time: "08:30".to_string(),
        };

        let raw = client.predict(&request).await.unwrap();

        assert_eq!(raw.source_predicted_vehicles, 12.5);
        let seen = client.http.requests();
        assert_eq!(seen[0].url, "http://localhost:8000/predict");
        assert_eq!(
            seen[0].body,
            Some(json!({
                "source_junction": 1,
                "destination_junction": 4,
                "date": "2025-09-20",
                "time": "08:30",
            }))
        );
    }

    #[tokio::test]
    async fn test_predict_rejects_non_object() {
        let client = backend(MockClient::new().respond_json(json!([1, 2])));
        let request = PredictionRequest {
            source_junction: 1,
            destination_junction: 2,
            date: "2025-01-01".to_string(),
            time: "09:00".to_string(),
        };

        let err = client.predict(&request).await.unwrap_err();
        assert!(matches!(err, FetchError::UnexpectedShape(_)));
    }

    #[tokio::test]
    async fn test_relative_base_path() {
        let http = MockClient::new().respond_json(json!({"status": "healthy"}));
        let config = ClientConfig::new("/api").with_origin("http://proxy.local");
        let client = BackendClient::new(http, config);

        let health = client.health().await.unwrap();

        assert!(health.is_healthy());
        assert_eq!(client.http.requests()[0].url, "http://proxy.local/api/health");
    }
}
