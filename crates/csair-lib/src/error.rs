use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the CSAir library.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of library failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The data file could not be read or parsed.
    Load,
    /// A city name or code was not part of the loaded network.
    NotFound,
    /// A record violated a network or directory invariant.
    Validation,
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Data file could not be located at the resolved path.
    #[error("dataset not found at {path}")]
    DatasetNotFound { path: PathBuf },

    /// Raised when a required top-level collection is absent from the data file.
    #[error("dataset is missing the required `{key}` section")]
    MissingSection { key: &'static str },

    /// Raised when a city name could not be found in the directory.
    #[error("unknown city name: {name}{}", format_suggestions(.suggestions))]
    UnknownCity {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a city code is not registered in the directory or network.
    #[error("unknown city code: {code}")]
    UnknownCode { code: String },

    /// Raised when two known cities are not joined by a direct route.
    #[error("no direct route between {from} and {to}")]
    NoDirectRoute { from: String, to: String },

    /// Raised when a route connects a city to itself.
    #[error("route from {code} to itself is not allowed")]
    SelfLoop { code: String },

    /// Raised when a route distance is not a finite positive number.
    #[error("invalid distance {distance} for route {from}-{to}")]
    InvalidDistance {
        from: String,
        to: String,
        distance: f64,
    },

    /// Raised when a metro code is not three uppercase ASCII letters.
    #[error("invalid city code {code:?}; expected three uppercase letters")]
    InvalidCode { code: String },

    /// Raised when two metro records share a code.
    #[error("duplicate city code encountered: {code}")]
    DuplicateCode { code: String },

    /// Raised when two metro records share a display name.
    #[error("duplicate city name encountered: {name}")]
    DuplicateName { name: String },

    /// Raised when a metro region is outside the known range.
    #[error("invalid region {region} for {code}; expected 1-4")]
    InvalidRegion { code: String, region: i64 },

    /// Raised when metro coordinates lack a latitude or longitude.
    #[error("invalid coordinates for {code}: {message}")]
    InvalidCoordinates { code: String, message: String },

    /// Raised when a metro timezone offset is not a finite number.
    #[error("invalid timezone offset for {code}")]
    InvalidTimezone { code: String },

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classify the error into the load / not-found / validation taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::DatasetNotFound { .. }
            | Error::MissingSection { .. }
            | Error::Json(_)
            | Error::Io(_) => ErrorKind::Load,
            Error::UnknownCity { .. } | Error::UnknownCode { .. } | Error::NoDirectRoute { .. } => {
                ErrorKind::NotFound
            }
            Error::SelfLoop { .. }
            | Error::InvalidDistance { .. }
            | Error::InvalidCode { .. }
            | Error::DuplicateCode { .. }
            | Error::DuplicateName { .. }
            | Error::InvalidRegion { .. }
            | Error::InvalidCoordinates { .. }
            | Error::InvalidTimezone { .. } => ErrorKind::Validation,
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
