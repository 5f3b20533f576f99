//! OAuth token lifecycle for the Zoho accounts server.
//!
//! [`TokenManager`] keeps a TTL-cached access token alive through the
//! refresh-token grant; [`oauth`] covers the one-time authorization-code
//! exchange used during initial setup.

mod error;
mod manager;
mod models;
pub mod oauth;

pub use crate::error::AuthError;
pub use crate::manager::TokenManager;
pub use crate::models::{Credentials, TokenPair, TokenState, TOKEN_TTL_SECS};
