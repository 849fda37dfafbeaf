//! HTTP inbound adapter exposing REST endpoints.

pub mod app;
pub mod error;
pub mod health;
pub mod payload;
pub mod registration;
pub mod root;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
