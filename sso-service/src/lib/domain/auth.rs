//! Credential authentication and token issuance.

pub mod errors;
pub mod models;
pub mod ports;
pub mod service;
