//! Error handling for the crate.
//!
//! Internally everything is an `anyhow::Error`. At the command boundary, errors are tagged with an
//! `ErrorType` so that a user (or a caller of the library) can tell which part of the program
//! failed without parsing the message.

use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The broad classes of failure that are reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The home directory or `config.json` is missing or invalid.
    Config,
    /// There is no usable session, or the session could not be stored.
    Session,
    /// The backend rejected a request or could not be reached.
    Request,
    /// User input did not pass client-side validation.
    Validation,
    /// The current user's role does not allow the operation.
    Permission,
    /// A workbook could not be read or written.
    Excel,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// An error that has been classified with an `ErrorType`.
pub struct PublicError {
    error_type: ErrorType,
    inner: Error,
}

impl PublicError {
    pub fn error_type(&self) -> ErrorType {
        self.error_type
    }
}

impl Debug for PublicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicError({}, {:?})", self.error_type, self.inner)
    }
}

/// Prints the classification followed by the whole chain of the inner error.
impl Display for PublicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {:#}", self.error_type, self.inner)
    }
}

// `Display` already carries the inner chain, so there is no separate source.
impl std::error::Error for PublicError {}

/// Tags a `Result` with an `ErrorType`.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| {
            let inner: Error = e.into();
            // Do not wrap twice; the innermost classification wins.
            if inner.downcast_ref::<PublicError>().is_some() {
                inner
            } else {
                PublicError { error_type, inner }.into()
            }
        })
    }
}

/// Returns the `ErrorType` of `err` if it was classified with `pub_result`.
pub fn error_type(err: &Error) -> Option<ErrorType> {
    err.downcast_ref::<PublicError>().map(|e| e.error_type())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_pub_result_keeps_message() {
        let r: Result<()> = Err(anyhow!("boom")).pub_result(ErrorType::Request);
        let err = r.unwrap_err();
        assert_eq!(err.to_string(), "request error: boom");
        assert_eq!(error_type(&err), Some(ErrorType::Request));
    }

    #[test]
    fn test_alternate_format_prints_chain_once() {
        let r: Result<()> = Err(anyhow!("db down"))
            .context("POST /api/spending failed")
            .pub_result(ErrorType::Request);
        let err = r.unwrap_err();
        assert_eq!(
            format!("{err:#}"),
            "request error: POST /api/spending failed: db down"
        );
        assert_eq!(err.chain().count(), 1);
    }

    #[test]
    fn test_pub_result_does_not_rewrap() {
        let r: Result<()> = Err(anyhow!("denied")).pub_result(ErrorType::Permission);
        let r = r.pub_result(ErrorType::Request);
        assert_eq!(error_type(&r.unwrap_err()), Some(ErrorType::Permission));
    }

    #[test]
    fn test_unclassified() {
        assert_eq!(error_type(&anyhow!("plain")), None);
    }
}
