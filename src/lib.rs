pub mod config;
pub mod fetch;
pub mod infra;
pub mod junction;
pub mod output;
pub mod predict;
pub mod services;
pub mod views;
