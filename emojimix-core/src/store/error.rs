use std::fmt;

use emojimix_types::{ColorFormatError, MixId};

pub type StoreResult<T = ()> = Result<T, StoreError>;

/// Why a stored row could not be turned back into a mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorruptReason {
    MissingSymbols,
    MissingColor,
    InvalidColor(ColorFormatError),
}

impl fmt::Display for CorruptReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSymbols => write!(f, "missing symbols"),
            Self::MissingColor => write!(f, "missing color"),
            Self::InvalidColor(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug)]
pub enum StoreError {
    /// The storage engine rejected an open, read or write.
    Persistence(rusqlite::Error),
    /// A stored row failed to decode.
    CorruptRecord { id: MixId, reason: CorruptReason },
    /// A mix that cannot be stored (e.g. no symbols).
    InvalidMix(&'static str),
    NotFound(MixId),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Persistence(e)
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persistence(e) => write!(f, "persistence error: {}", e),
            Self::CorruptRecord { id, reason } => write!(f, "corrupt record {}: {}", id, reason),
            Self::InvalidMix(why) => write!(f, "invalid mix: {}", why),
            Self::NotFound(id) => write!(f, "no mix with id {}", id),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence(e) => Some(e),
            Self::CorruptRecord {
                reason: CorruptReason::InvalidColor(e),
                ..
            } => Some(e),
            _ => None,
        }
    }
}
