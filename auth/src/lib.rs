//! Authentication utilities library
//!
//! Provides the leaf building blocks of the identity provider:
//! - Password hashing (Argon2id, tunable cost)
//! - JWT claims, TTL policy, and HS256 encoding/decoding
//! - Token issuance with a per-application signing secret
//!
//! Storage and transport live in the service crate; nothing here touches a
//! database or the network.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Issuing and Verifying Tokens
//! ```
//! use auth::{Claims, JwtHandler, TokenIssuer, TokenTtl};
//!
//! let issuer = TokenIssuer::new(TokenTtl::new(3600).unwrap());
//! let token = issuer.issue(1, "alice@example.com", 1, b"app-secret").unwrap();
//!
//! let claims: Claims = JwtHandler::new(b"app-secret").decode(&token).unwrap();
//! assert_eq!(claims.uid, 1);
//! assert_eq!(claims.app_id, 1);
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use issuer::TokenIssuer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenTtl;
pub use password::HashingParams;
pub use password::PasswordError;
pub use password::PasswordHasher;
