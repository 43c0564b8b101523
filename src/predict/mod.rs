//! Prediction requests: from raw form input to both view models.
//!
//! [`PredictionClient::predict`] normalizes the user's input into a
//! [`PredictionRequest`], sends it through a [`BackendClient`] and hands the
//! payload to [`transform`]. Backend failures are returned as
//! [`PredictionError`]; there is no retry and no synthetic fallback.

pub mod raw;
pub mod transform;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{error, info};

use crate::fetch::{FetchError, HttpClient};
use crate::infra::backend::BackendClient;
use crate::junction::{InvalidJunctionId, JunctionId};

pub use transform::{CitizenView, DeliveryView, Prediction, RouteOption, TrafficPoint};
use transform::{RandomOffsets, transform};

/// Body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionRequest {
    pub source_junction: u32,
    pub destination_junction: u32,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
}

impl PredictionRequest {
    pub fn new(
        source: JunctionId,
        destination: JunctionId,
        date_time: &str,
    ) -> Result<Self, PredictionError> {
        let (date, time) = split_date_time(date_time)?;
        Ok(Self {
            source_junction: source.get(),
            destination_junction: destination.get(),
            date: date.to_string(),
            time: time.to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error(transparent)]
    InvalidJunction(#[from] InvalidJunctionId),
    #[error("date and time '{0}' must look like YYYY-MM-DDTHH:MM")]
    InvalidDateTime(String),
    #[error("prediction backend failed: {0}")]
    Backend(#[from] FetchError),
}

/// Splits a `datetime-local` style value (`2025-09-20T08:30`) into date and
/// time. A single space is accepted in place of the `T`.
pub fn split_date_time(date_time: &str) -> Result<(&str, &str), PredictionError> {
    let trimmed = date_time.trim();
    let (date, time) = trimmed
        .split_once('T')
        .or_else(|| trimmed.split_once(' '))
        .ok_or_else(|| PredictionError::InvalidDateTime(date_time.to_string()))?;

    let (date, time) = (date.trim(), time.trim());
    if date.is_empty() || time.is_empty() {
        return Err(PredictionError::InvalidDateTime(date_time.to_string()));
    }
    Ok((date, time))
}

pub struct PredictionClient<C> {
    backend: BackendClient<C>,
}

impl<C: HttpClient> PredictionClient<C> {
    pub fn new(backend: BackendClient<C>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &BackendClient<C> {
        &self.backend
    }

    /// Requests a prediction between two junctions at `date_time`.
    ///
    /// Inputs are expected non-empty; form validation happens upstream.
    #[tracing::instrument(skip(self))]
    pub async fn predict(
        &self,
        source: &str,
        destination: &str,
        date_time: &str,
    ) -> Result<Prediction, PredictionError> {
        let source: JunctionId = source.parse()?;
        let destination: JunctionId = destination.parse()?;
        let request = PredictionRequest::new(source, destination, date_time)?;

        info!(
            source = request.source_junction,
            destination = request.destination_junction,
            date = %request.date,
            time = %request.time,
            "Sending prediction request"
        );

        let raw = match self.backend.predict(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, ?request, "Prediction request failed");
                return Err(e.into());
            }
        };

        let prediction = match self.backend.config().seed {
            Some(seed) => transform(&raw, &mut RandomOffsets(StdRng::seed_from_u64(seed))),
            None => transform(&raw, &mut RandomOffsets(rand::rng())),
        };
        Ok(prediction)
    }
}
