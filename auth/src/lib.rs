//! Authentication primitives for the chirpy service.
//!
//! - Password hashing (Argon2id)
//! - Access tokens: HS256 JWTs with issuer and expiry checks
//! - Opaque refresh token generation
//! - `Authorization` header credential extraction
//! - Resource ownership checks
//!
//! Persistence of refresh tokens and the session lifecycle live in the
//! service; this crate only holds the stateless pieces.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", "chirpy");
//! let token = handler.issue("user123", Duration::hours(1)).unwrap();
//! assert_eq!(handler.verify(&token).unwrap(), "user123");
//! ```
//!
//! ## Bearer Credentials
//! ```
//! use auth::extract_bearer;
//!
//! assert_eq!(extract_bearer(Some("Bearer abc")).unwrap(), "abc");
//! assert!(extract_bearer(None).is_err());
//! ```

pub mod authenticator;
pub mod clock;
pub mod credentials;
pub mod jwt;
pub mod ownership;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use credentials::extract_api_key;
pub use credentials::extract_bearer;
pub use credentials::CredentialError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use ownership::authorize;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
