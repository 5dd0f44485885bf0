//! # story-auth
//!
//! Bearer token acquisition for the stories content API.
//!
//! Provides the [`TokenProvider`] seam, a static-token source for CI and
//! pre-issued tokens, CMS password login, and JWT expiry decoding for
//! diagnostics. Token refresh is left to the caller: every aggregation asks
//! the provider for a fresh token.

pub mod error;
pub mod expiry;
pub mod login;
pub mod provider;

pub use error::AuthError;
pub use login::DirectusLogin;
pub use provider::{Credentials, StaticToken, TokenProvider};
