//! HTTP access to the traffic prediction service.
//!
//! [`BackendClient`] wraps an [`HttpClient`](crate::fetch::HttpClient) and the
//! [`ClientConfig`](crate::config::ClientConfig) that locates the service.

pub mod client;
pub mod types;

pub use client::BackendClient;
pub use types::{Health, TrafficStats};
