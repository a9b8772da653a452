//! Error types for IDC recommendation.

use thiserror::Error;

use crate::nsga2::InvalidConfig;

/// Result type alias using [`RecommendError`].
pub type Result<T> = std::result::Result<T, RecommendError>;

/// Top-level error of a recommendation run.
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("invalid search configuration: {0}")]
    Config(#[from] InvalidConfig),
}

/// A rejected input document.
///
/// [`InputError::Malformed`] means the stream itself could not be read as
/// JSON; every other variant means the document parsed but is not a valid
/// problem.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("malformed input stream: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("input does not match the expected schema: {0}")]
    Schema(#[source] serde_json::Error),

    #[error("idc_list is empty")]
    EmptyIdcList,

    #[error("idc {0} is listed more than once")]
    DuplicateIdc(String),

    #[error("country_rate is empty")]
    EmptyCountryRate,

    #[error("country {0} has a player share but no ping data")]
    MissingPingInfo(String),

    #[error("idc {0} has no price")]
    MissingPrice(String),

    #[error("picked idc {0} is not a candidate")]
    UnknownPick(String),

    #[error("banned idc {0} is not a candidate")]
    UnknownBan(String),

    #[error("idc {0} is both picked and banned")]
    PickedAndBanned(String),

    #[error("invalid ping {value} from {country} to {idc}")]
    InvalidPing {
        country: String,
        idc: String,
        value: f64,
    },

    #[error("invalid price {value} for idc {idc}")]
    InvalidPrice { idc: String, value: f64 },

    #[error("invalid player share {value} for country {country}")]
    InvalidShare { country: String, value: f64 },

    #[error("cover_rate must be within [0, 1], got {0}")]
    InvalidCoverRate(f64),

    #[error("cover_ping must be finite and non-negative, got {0}")]
    InvalidCoverPing(f64),

    #[error("{table}[{index}]: invalid range [{low}, {high})")]
    InvalidScoreRange {
        table: &'static str,
        index: usize,
        low: f64,
        high: f64,
    },

    #[error("no candidate idc left after removing banned ones")]
    NoCandidates,
}

impl InputError {
    /// Classifies a deserialization failure.
    ///
    /// I/O, syntax and truncation errors are [`Malformed`](Self::Malformed);
    /// missing fields and wrong types are [`Schema`](Self::Schema).
    pub fn from_json(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Io | Category::Syntax | Category::Eof => Self::Malformed(err),
            Category::Data => Self::Schema(err),
        }
    }

    /// Whether the input stream could not be parsed at all.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}
