//! Tagged errors and the classification/localization pipeline.
//!
//! Application code fails with an [`ApiError`] carrying a response code and a
//! message key, usually wrapped in an [`anyhow::Error`] on its way up the
//! stack. At the response boundary, [`resolve`] turns whatever error arrived
//! into a `(ResCode, message)` pair safe to serialize to the client:
//!
//! 1. [`classify`] decides which category the error belongs to and whether
//!    its detail may be shown at all;
//! 2. [`resolve`] translates the detail for the one translatable category.
//!
//! The split is load-bearing: an error that was not produced through this
//! module's constructors, or whose code is corrupt, classifies as an opaque
//! internal failure with no detail, even when [`resolve`] is bypassed.
//! Classification and localization never fail themselves; they degrade to
//! `(Internal, "")` or to the untranslated key.

use crate::i18n::catalog;
use crate::rescode::ResCode;

/// Canonical key carried by authentication failures.
pub const NEED_LOGIN_KEY: &str = "need.login";
/// Canonical key carried by authorization failures.
pub const NO_PERMISSION_KEY: &str = "no.permission";
/// Canonical key carried by server-side failures.
pub const INTERNAL_ERROR_KEY: &str = "internal.error";

/// Internal error tagged with one response code and one message key.
///
/// Equality is structural: two errors are equal iff code and key both match,
/// regardless of where each instance was constructed. Control flow that asks
/// "is this the need-login error" must rely on this, not on instance
/// identity.
///
/// The code is kept as a raw `u32` rather than a [`ResCode`] so that values
/// outside the enumeration remain representable; [`classify`] routes them to
/// the opaque internal category instead of trusting them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("api error {code}: {key}")]
pub struct ApiError {
    code: u32,
    key: String,
}

impl ApiError {
    /// Tag an error with a response code and a message key.
    ///
    /// For translatable categories the key should be registered in the
    /// message catalog; no validation is performed here.
    pub fn new(code: ResCode, key: impl Into<String>) -> ApiError {
        ApiError::from_raw(code.as_u32(), key)
    }

    /// Tag an error with an arbitrary raw code. Accepts any value; codes
    /// outside the response-code table classify as internal failures.
    pub fn from_raw(code: u32, key: impl Into<String>) -> ApiError {
        ApiError {
            code,
            key: key.into(),
        }
    }

    /// A user-level mistake carrying a catalog key for translation.
    pub fn bad_request(key: impl Into<String>) -> ApiError {
        ApiError::new(ResCode::BadRequest, key)
    }

    /// Authentication missing or expired.
    pub fn need_login() -> ApiError {
        ApiError::new(ResCode::NeedLogin, NEED_LOGIN_KEY)
    }

    /// Authenticated but not allowed.
    pub fn no_permission() -> ApiError {
        ApiError::new(ResCode::NoPermission, NO_PERMISSION_KEY)
    }

    /// Broken protocol usage, with a caller-supplied key.
    pub fn invalid_request(key: impl Into<String>) -> ApiError {
        ApiError::new(ResCode::InvalidRequest, key)
    }

    /// Server-side failure.
    pub fn internal() -> ApiError {
        ApiError::new(ResCode::Internal, INTERNAL_ERROR_KEY)
    }

    /// The raw code this error was tagged with.
    pub fn raw_code(&self) -> u32 {
        self.code
    }

    /// The message key this error was tagged with.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Classify an error into `(code, raw message key)`.
///
/// - `None` (no error) → `(Success, "")`.
/// - An error whose chain does not decode to an [`ApiError`] → `(Internal,
///   "")`. Errors from outside this module's constructors must never leak
///   detail.
/// - A decoded error whose raw code falls outside the response-code table
///   (below the success threshold or otherwise unknown) → `(Internal, "")`.
/// - An opaque category (at or above [`ResCode::Internal`]) → `(code, "")`;
///   the category is surfaced, the detail is not.
/// - Anything else → `(code, key)` unchanged. Translation, where applicable,
///   is [`resolve`]'s job.
pub fn classify(err: Option<&anyhow::Error>) -> (ResCode, String) {
    let Some(err) = err else {
        return (ResCode::Success, String::new());
    };
    let Some(tagged) = err.downcast_ref::<ApiError>() else {
        tracing::debug!(error = %err, "untagged error classified as internal");
        return (ResCode::Internal, String::new());
    };
    let Some(code) = ResCode::from_u32(tagged.code) else {
        tracing::debug!(code = tagged.code, "out-of-range code classified as internal");
        return (ResCode::Internal, String::new());
    };
    if code.is_opaque() {
        return (code, String::new());
    }
    (code, tagged.key.clone())
}

/// Structural comparison between an error chain and a tagged error.
///
/// True iff `err` decodes to an [`ApiError`] whose code and key both equal
/// `target`'s. Two independently constructed [`ApiError::need_login`] values
/// therefore match; a need-login error never matches a bad-request error
/// carrying the same key string.
pub fn is_api_error(err: &anyhow::Error, target: &ApiError) -> bool {
    err.downcast_ref::<ApiError>()
        .is_some_and(|tagged| tagged == target)
}

/// Resolve an error into `(code, user-facing message)` for `lang`.
///
/// Runs [`classify`], then translates the key through the process-wide
/// message catalog for the one translatable category. All other categories
/// pass their key through untouched: it is either empty (opaque) or a fixed
/// canonical identifier the client maps itself. When no catalog was ever
/// loaded, the key passes through unchanged.
///
/// This is the entry point response shaping calls once per failed request.
pub fn resolve(err: Option<&anyhow::Error>, lang: &str) -> (ResCode, String) {
    let (code, key) = classify(err);
    if !code.is_translatable() {
        return (code, key);
    }
    let message = match catalog::global() {
        Some(catalog) => catalog.lookup(lang, &key),
        None => key,
    };
    (code, message)
}
