//! Authentication utilities library
//!
//! Provides the authentication building blocks of the account service:
//! - Password hashing (Argon2id)
//! - JWT encoding and decoding (HS256)
//! - Session token codec (issue / verify with a fixed lifetime)
//! - Authentication coordination
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Secret1#").unwrap();
//! let is_valid = hasher.verify("Secret1#", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(10));
//! let token = codec.issue("alice").unwrap();
//! assert_eq!(codec.verify(&token).unwrap(), "alice");
//! assert!(codec.is_valid(&token, "alice"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(10));
//!
//! // Register: hash password
//! let hash = auth.hash_password("Secret1#").unwrap();
//!
//! // Login: verify and issue token
//! assert!(auth.verify_password("Secret1#", &hash).unwrap());
//! let token = auth.generate_token("alice").unwrap();
//!
//! // Later requests: validate token
//! let subject = auth.validate_token(&token).unwrap();
//! assert_eq!(subject, "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenCodec;
pub use password::PasswordError;
pub use password::PasswordHasher;
