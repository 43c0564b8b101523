use chrono::Local;
use tracing::info;

use crate::fetch::HttpClient;
use crate::junction::Junction;
use crate::predict::{DeliveryView, Prediction, PredictionClient};
use crate::services::catalog_api::{JunctionCatalog, fetch_junctions};

use super::form::{PredictionForm, SubmitRejected};

/// Format of the date-time field, e.g. `2025-09-20T08:30`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Progress of the junction list behind the selectors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Junction>),
}

/// Route-recommendation page.
#[derive(Debug, Clone)]
pub struct DeliveryPage {
    pub form: PredictionForm<DeliveryView>,
    catalog: CatalogStatus,
}

impl Default for DeliveryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DeliveryPage {
    /// A fresh page with the date-time prefilled to the current local time.
    pub fn new() -> Self {
        let mut form = PredictionForm::new();
        form.date_time = Local::now().format(DATE_TIME_FORMAT).to_string();
        Self {
            form,
            catalog: CatalogStatus::Idle,
        }
    }

    pub fn catalog(&self) -> &CatalogStatus {
        &self.catalog
    }

    /// Selectors stay disabled until the junction list has arrived.
    pub fn selectors_enabled(&self) -> bool {
        matches!(self.catalog, CatalogStatus::Loaded(_))
    }

    pub fn junctions(&self) -> &[Junction] {
        match &self.catalog {
            CatalogStatus::Loaded(junctions) => junctions,
            _ => &[],
        }
    }

    pub async fn load_junctions<K: JunctionCatalog + ?Sized>(&mut self, catalog: &K) {
        self.catalog = CatalogStatus::Loading;
        let junctions = fetch_junctions(catalog).await;
        info!(count = junctions.len(), "Delivery junctions ready");
        self.catalog = CatalogStatus::Loaded(junctions);
    }

    pub async fn submit<C: HttpClient>(
        &mut self,
        client: &PredictionClient<C>,
    ) -> Result<(), SubmitRejected> {
        self.form.submit(client, Prediction::into_delivery).await
    }

    /// Loads the junction list and submits the form side by side.
    ///
    /// Neither waits on the other; the catalog falls back to the built-in
    /// table on failure while the prediction reports its own outcome.
    pub async fn open<K, C>(
        &mut self,
        catalog: &K,
        client: &PredictionClient<C>,
    ) -> Result<(), SubmitRejected>
    where
        K: JunctionCatalog + ?Sized,
        C: HttpClient,
    {
        self.catalog = CatalogStatus::Loading;
        let (junctions, submitted) = tokio::join!(
            fetch_junctions(catalog),
            self.form.submit(client, Prediction::into_delivery),
        );
        self.catalog = CatalogStatus::Loaded(junctions);
        submitted
    }
}
