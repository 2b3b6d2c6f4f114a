use thiserror::Error;

/// Reasons a listing cannot be turned into a part definition.
///
/// These are per-record failures: the caller logs them and moves on to the
/// next listing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedListing {
    #[error("bad package type {}", .0.as_deref().unwrap_or("<missing>"))]
    BadPackage(Option<String>),
    #[error("unsupported SI prefix '{0}'")]
    SiPrefix(char),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("value '{0}' is out of range")]
    OutOfRange(String),
    #[error("missing field '{0}'")]
    MissingField(String),
    #[error("field '{field}' is not {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
    #[error("'{0}' is not a valid file name")]
    InvalidFileName(String),
}
