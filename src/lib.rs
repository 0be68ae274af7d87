//! Request/response conventions for axum services.
//!
//! This crate standardizes three things every endpoint of a service family
//! needs to agree on:
//!
//! - **Outcome codes and error messages**: internal errors are tagged with a
//!   bounded response code and a message key ([`error::ApiError`]), then
//!   classified and localized at the response boundary
//!   ([`error::resolve`]). Unrecognized errors degrade to an opaque internal
//!   failure; nothing unclassified ever reaches a client.
//! - **Language negotiation**: the caller's language is picked from query,
//!   header, cookie, and form channels in that priority order
//!   ([`i18n::LanguageSources`]), against an explicit supported set.
//! - **Session identity**: tokens travel in a named header with a cookie
//!   fallback ([`session::SessionKeys`]).
//!
//! Responses serialize through one JSON envelope ([`response::ApiResponse`])
//! whose numeric `code` field carries the outcome; transport status stays
//! 200 OK.

pub mod config;
pub mod error;
pub mod i18n;
pub mod rescode;
pub mod response;
pub mod session;

pub use config::Config;
pub use error::{classify, is_api_error, resolve, ApiError};
pub use i18n::{Language, LanguageSources};
pub use rescode::ResCode;
pub use response::ApiResponse;
pub use session::SessionKeys;
