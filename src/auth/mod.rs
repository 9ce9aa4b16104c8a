//! Authentication module
//!
//! Supports: Basic, API Key, OAuth2 (client credentials and authorization code)
//!
//! The types describe how a polling connector authenticates against the
//! source API; [`auth_document`] projects them into the `auth` block of a
//! connector instance, emitting each optional key only when it applies.

mod project;
mod types;

pub use project::auth_document;
pub use types::{ApiKeyAuth, AuthorizationCodeGrant, BasicAuth, OAuth2Auth, OAuth2Grant, PollerAuth};
