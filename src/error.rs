// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors surfaced by the application.
///
/// The API client maps HTTP outcomes onto these variants; everything else
/// (config parsing, identity persistence) uses the generic variants. The
/// application never retries: each error surfaces exactly once as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Transport failure or unexpected HTTP status.
    Http(String),
    /// The response body could not be decoded as the expected JSON shape.
    DataCorrupted(String),
    /// The backend rejected the caller's identity (HTTP 401).
    Unauthorized,
    /// The requested resource does not exist (HTTP 404).
    NotFound,
    Config(String),
    Io(String),
}

impl Error {
    /// Maps this error to a toast id for the given operation context.
    ///
    /// Toast ids follow the `<context>-<kind>` convention, e.g. a decode
    /// failure while loading the survivor list becomes
    /// `load-survivors-data-corrupted`. Ids without a registered toast
    /// definition are silently ignored by the registry.
    pub fn toast_key(&self, context: &str) -> String {
        match self {
            Error::DataCorrupted(_) => format!("{context}-data-corrupted"),
            Error::Unauthorized => format!("{context}-unauthorized"),
            Error::NotFound => format!("{context}-not-found"),
            Error::Http(_) | Error::Config(_) | Error::Io(_) => format!("{context}-error"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(msg) => write!(f, "HTTP error: {msg}"),
            Error::DataCorrupted(msg) => write!(f, "Corrupted response data: {msg}"),
            Error::Unauthorized => write!(f, "Unauthorized"),
            Error::NotFound => write!(f, "Not found"),
            Error::Config(msg) => write!(f, "Configuration error: {msg}"),
            Error::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_key_maps_decode_failures_to_data_corrupted() {
        let err = Error::DataCorrupted("invalid type".to_string());
        assert_eq!(
            err.toast_key("load-survivors"),
            "load-survivors-data-corrupted"
        );
    }

    #[test]
    fn toast_key_maps_status_variants() {
        assert_eq!(
            Error::Unauthorized.toast_key("location-update"),
            "location-update-unauthorized"
        );
        assert_eq!(
            Error::NotFound.toast_key("loadprofile"),
            "loadprofile-not-found"
        );
        assert_eq!(
            Error::Http("status 500".to_string()).toast_key("trade"),
            "trade-error"
        );
    }

    #[test]
    fn io_error_converts_to_io_variant() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
