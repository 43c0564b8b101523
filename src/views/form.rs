//! Submit state machine shared by the prediction pages.

use tracing::{debug, error, info, warn};

use crate::fetch::HttpClient;
use crate::predict::{Prediction, PredictionClient, PredictionError};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields";
pub const RETRY_MESSAGE: &str = "Error getting prediction. Please try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum FormStatus<V> {
    Idle,
    Submitting,
    Success(V),
    /// Message shown to the user; no partial result is kept.
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("a prediction is already in progress")]
    InFlight,
}

/// Field values captured when a submission starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub source: String,
    pub destination: String,
    pub date_time: String,
}

/// Proof of one submission. Results carrying an outdated ticket are dropped.
#[derive(Debug)]
pub struct Ticket {
    generation: u64,
    pub input: FormInput,
}

#[derive(Debug, Clone)]
pub struct PredictionForm<V> {
    pub source: String,
    pub destination: String,
    pub date_time: String,
    status: FormStatus<V>,
    generation: u64,
}

impl<V> Default for PredictionForm<V> {
    fn default() -> Self {
        Self {
            source: String::new(),
            destination: String::new(),
            date_time: String::new(),
            status: FormStatus::Idle,
            generation: 0,
        }
    }
}

impl<V> PredictionForm<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &FormStatus<V> {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, FormStatus::Submitting)
    }

    /// The submit control is disabled while a request is outstanding.
    pub fn submit_enabled(&self) -> bool {
        !self.is_loading()
    }

    pub fn result(&self) -> Option<&V> {
        match &self.status {
            FormStatus::Success(view) => Some(view),
            _ => None,
        }
    }

    fn is_complete(&self) -> bool {
        [&self.source, &self.destination, &self.date_time]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// Moves to `Submitting` and hands out the ticket for this attempt.
    ///
    /// An incomplete form keeps its current status.
    pub fn begin_submit(&mut self) -> Result<Ticket, SubmitRejected> {
        if self.is_loading() {
            return Err(SubmitRejected::InFlight);
        }
        if !self.is_complete() {
            return Err(SubmitRejected::MissingFields);
        }

        self.generation += 1;
        self.status = FormStatus::Submitting;
        Ok(Ticket {
            generation: self.generation,
            input: FormInput {
                source: self.source.trim().to_string(),
                destination: self.destination.trim().to_string(),
                date_time: self.date_time.trim().to_string(),
            },
        })
    }

    /// Records the outcome of `ticket`'s request.
    ///
    /// Returns `false` and leaves the form untouched when the ticket is stale.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<V, PredictionError>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Dropping stale prediction result"
            );
            return false;
        }

        self.status = match outcome {
            Ok(view) => FormStatus::Success(view),
            Err(e) => {
                error!(error = %e, "Prediction failed");
                FormStatus::Error(RETRY_MESSAGE.to_string())
            }
        };
        true
    }

    /// Forgets any outstanding request, as when the page goes away.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.status = FormStatus::Idle;
    }

    /// Runs a full submission against `client`, keeping the part of the
    /// prediction this page shows.
    ///
    /// Dropping the returned future mid-request returns the form to `Idle`
    /// and invalidates the outstanding ticket.
    pub async fn submit<C: HttpClient>(
        &mut self,
        client: &PredictionClient<C>,
        project: fn(Prediction) -> V,
    ) -> Result<(), SubmitRejected> {
        let ticket = self.begin_submit()?;
        let input = ticket.input.clone();
        info!(source = %input.source, destination = %input.destination, "Submitting prediction form");

        let pending = Pending {
            form: self,
            ticket: Some(ticket),
        };
        let outcome = client
            .predict(&input.source, &input.destination, &input.date_time)
            .await
            .map(project);
        pending.complete(outcome);
        Ok(())
    }
}

/// Holds a submission open; clears the loading state if never completed.
struct Pending<'a, V> {
    form: &'a mut PredictionForm<V>,
    ticket: Option<Ticket>,
}

impl<V> Pending<'_, V> {
    fn complete(mut self, outcome: Result<V, PredictionError>) {
        if let Some(ticket) = self.ticket.take() {
            self.form.finish(ticket, outcome);
        }
    }
}

impl<V> Drop for Pending<'_, V> {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };
        if ticket.generation == self.form.generation {
            warn!(generation = ticket.generation, "Prediction abandoned before completion");
            self.form.reset();
        }
    }
}
