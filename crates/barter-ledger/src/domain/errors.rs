//! # Domain Errors
//!
//! Error types for the ledger core.
//!
//! Every [`LedgerError`] classifies into one of six [`ErrorKind`]s, which is
//! what callers of the dispatch layer see in a [`LedgerErrorPayload`].

use super::value_objects::{Attributes, TradeId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures reported by a state store backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// I/O error during read/write.
    #[error("state store I/O error: {message}")]
    Io { message: String },

    /// Backend detected damaged data.
    #[error("state store corruption: {message}")]
    Corruption { message: String },
}

/// Errors surfaced by ledger operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Wrong number of positional arguments for a function.
    #[error("incorrect number of arguments for {function}: expecting {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// A positional argument (1-based) is empty or malformed.
    #[error("argument {position} {reason}")]
    InvalidArgument { position: usize, reason: String },

    /// A record field failed validation.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// The dispatch layer does not know the requested function.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// An invoice with this identity is already stored.
    #[error("invoice already exists: {key}")]
    AlreadyExists { key: String },

    /// No invoice is stored at this key.
    #[error("invoice not found: {key}")]
    InvoiceNotFound { key: String },

    /// The order book has no trade with this identity.
    #[error("open trade not found: {trade_id}")]
    TradeNotFound { trade_id: TradeId },

    /// The closer's invoice does not have the attributes the trade wants.
    #[error("invoice {key} does not meet trade requirements: offers {offered}, trade wants {wanted}")]
    RequirementMismatch {
        key: String,
        offered: Attributes,
        wanted: Attributes,
    },

    /// The requested opener option is not one of the trade's willing options.
    #[error("trade {trade_id} does not offer {option}")]
    OptionNotOffered { trade_id: TradeId, option: Attributes },

    /// The matcher found no invoice for the owner and attribute set.
    #[error("no invoice owned by {owner} matches {want}")]
    NoSuitableAsset { owner: String, want: Attributes },

    /// State store failure.
    #[error(transparent)]
    Storage(#[from] StoreError),

    /// Stored bytes could not be encoded or decoded as the expected record.
    #[error("codec failure for record {key}: {message}")]
    Codec { key: String, message: String },
}

impl LedgerError {
    /// Classify into the error kind reported to callers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ArgumentCount { .. }
            | Self::InvalidArgument { .. }
            | Self::InvalidField { .. }
            | Self::UnknownFunction(_) => ErrorKind::Validation,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::InvoiceNotFound { .. } | Self::TradeNotFound { .. } => ErrorKind::NotFound,
            Self::RequirementMismatch { .. } | Self::OptionNotOffered { .. } => {
                ErrorKind::RequirementMismatch
            }
            Self::NoSuitableAsset { .. } => ErrorKind::NoSuitableAsset,
            Self::Storage(_) | Self::Codec { .. } => ErrorKind::Storage,
        }
    }

    pub(crate) fn invalid_argument(position: usize, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            position,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Error kind enumeration for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    AlreadyExists,
    NotFound,
    RequirementMismatch,
    NoSuitableAsset,
    Storage,
}

/// Serializable error returned by the dispatch layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerErrorPayload {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&LedgerError> for LedgerErrorPayload {
    fn from(err: &LedgerError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}
