use crate::fetch::HttpClient;
use crate::junction::{Junction, JunctionId};
use crate::predict::{CitizenView, Prediction, PredictionClient};
use crate::services::catalog_api::StaticJunctionCatalog;

use super::form::{PredictionForm, SubmitRejected};

/// Named junctions offered by the citizen page selectors.
pub const CITIZEN_JUNCTIONS: [(&str, &str); 8] = [
    ("J001", "Main Street & Oak Avenue"),
    ("J002", "Broadway & Pine Street"),
    ("J003", "Central Plaza"),
    ("J004", "Industrial District"),
    ("J005", "University Square"),
    ("J006", "Shopping Center"),
    ("J007", "Hospital Junction"),
    ("J008", "Airport Road"),
];

/// The built-in named table as a catalog.
pub fn citizen_catalog() -> StaticJunctionCatalog {
    let junctions = CITIZEN_JUNCTIONS
        .iter()
        .filter_map(|(code, name)| {
            let id: JunctionId = code.parse().ok()?;
            Some(Junction::new(id, *name))
        })
        .collect();
    StaticJunctionCatalog::new(junctions)
}

/// Best-time-to-travel page. Its selectors use the built-in junction table.
#[derive(Debug, Clone)]
pub struct CitizenPage {
    pub form: PredictionForm<CitizenView>,
    catalog: StaticJunctionCatalog,
}

impl Default for CitizenPage {
    fn default() -> Self {
        Self::new()
    }
}

impl CitizenPage {
    pub fn new() -> Self {
        Self {
            form: PredictionForm::new(),
            catalog: citizen_catalog(),
        }
    }

    pub fn junctions(&self) -> &[Junction] {
        self.catalog.junctions()
    }

    pub async fn submit<C: HttpClient>(
        &mut self,
        client: &PredictionClient<C>,
    ) -> Result<(), SubmitRejected> {
        self.form.submit(client, Prediction::into_citizen).await
    }
}
