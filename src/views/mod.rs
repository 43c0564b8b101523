//! Page controllers: form state, junction selectors and results.
//!
//! Rendering is left to [`crate::output`].

pub mod citizen;
pub mod delivery;
pub mod form;
pub mod landing;

pub use citizen::{CitizenPage, citizen_catalog};
pub use delivery::{CatalogStatus, DeliveryPage};
pub use form::{FormStatus, PredictionForm, SubmitRejected};
pub use landing::{Destination, LandingPage};
