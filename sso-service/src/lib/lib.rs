pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::auth::service::AuthService;
pub use outbound::repositories::SqliteStorage;

// Include the generated proto code
pub mod proto {
    tonic::include_proto!("auth");
}
