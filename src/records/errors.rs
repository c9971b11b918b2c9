use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RecordsError {
    #[error("Fetch error: {0}")]
    Http(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Match records are still loading")]
    Loading,

    #[error("Match records unavailable: {0}")]
    Unavailable(String),

    #[error("No match records have been fetched yet")]
    NotLoaded,
}

impl From<reqwest::Error> for RecordsError {
    fn from(err: reqwest::Error) -> Self {
        RecordsError::Http(err.to_string())
    }
}

/// Why a fetched document was kept out of the snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordRejection {
    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("player name is empty")]
    EmptyPlayerName,

    #[error("rounds must be positive")]
    NoRounds,
}
