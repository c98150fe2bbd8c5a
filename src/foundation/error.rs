use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidNonce,
    InvalidAddress,
    InvalidCoin,
    InvalidVotingPower,
    InvalidArgument,
    DenominatorConflict,
    InsufficientFunds,
    EmptyValidatorSet,
    EmptyPool,
    UnknownDenomination,
    DuplicatePoolId,
    MissingPoolEntry,
    NonceRegression,
    DuplicateBatch,
    ArithmeticOverflow,
    LedgerError,
    StorageError,
    SerializationError,
    EncodingError,
    ConfigError,
    SchemaMismatch,
}

/// Coarse classification used by callers to decide how to react to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed caller input. Rejected synchronously, never retried.
    Validation,
    /// A precondition of a single mutation was not met. Nothing was written.
    Resource,
    /// State is inconsistent with the transition being applied. Processing must halt.
    Invariant,
    /// Storage, encoding or configuration plumbing failed.
    Infrastructure,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub code: ErrorCode,
    pub category: ErrorCategory,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum BridgeError {
    // === Validation ===
    #[error("invalid nonce: {input}")]
    InvalidNonce { input: String },

    #[error("invalid {kind} address: input={input} reason={reason}")]
    InvalidAddress { kind: String, input: String, reason: String },

    #[error("invalid coin: {0}")]
    InvalidCoin(String),

    #[error("invalid voting power report: {0}")]
    InvalidVotingPower(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("token contract {token_contract} already registered as {existing}, refusing {attempted}")]
    DenominatorConflict { token_contract: String, existing: String, attempted: String },

    // === Resource ===
    #[error("insufficient funds for {sender}: required {required} {denom}, available {available}")]
    InsufficientFunds { sender: String, denom: String, required: u64, available: u64 },

    #[error("validator set is empty: no registered validator carries voting power")]
    EmptyValidatorSet,

    #[error("no pending transfers for denom {denom}")]
    EmptyPool { denom: String },

    #[error("unknown bridged denomination: {0}")]
    UnknownDenomination(String),

    // === Invariant ===
    #[error("pool id {0} already in use")]
    DuplicatePoolId(u64),

    #[error("pool entry {0} selected for removal is missing")]
    MissingPoolEntry(u64),

    #[error("{kind} nonce regression: latest={latest} attempted={attempted}")]
    NonceRegression { kind: String, latest: u64, attempted: u64 },

    #[error("batch nonce {nonce} already stored for token {token_contract}")]
    DuplicateBatch { token_contract: String, nonce: u64 },

    #[error("arithmetic overflow during {0}")]
    ArithmeticOverflow(String),

    // === Infrastructure ===
    #[error("ledger error during {operation}: {details}")]
    LedgerError { operation: String, details: String },

    #[error("storage error during {operation}: {details}")]
    StorageError { operation: String, details: String },

    #[error("{format} serialization error: {details}")]
    SerializationError { format: String, details: String },

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("schema mismatch: stored={stored} current={current}")]
    SchemaMismatch { stored: u32, current: u32 },
}

pub type Result<T> = std::result::Result<T, BridgeError>;

impl BridgeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BridgeError::InvalidNonce { .. } => ErrorCode::InvalidNonce,
            BridgeError::InvalidAddress { .. } => ErrorCode::InvalidAddress,
            BridgeError::InvalidCoin(_) => ErrorCode::InvalidCoin,
            BridgeError::InvalidVotingPower(_) => ErrorCode::InvalidVotingPower,
            BridgeError::InvalidArgument(_) => ErrorCode::InvalidArgument,
            BridgeError::DenominatorConflict { .. } => ErrorCode::DenominatorConflict,
            BridgeError::InsufficientFunds { .. } => ErrorCode::InsufficientFunds,
            BridgeError::EmptyValidatorSet => ErrorCode::EmptyValidatorSet,
            BridgeError::EmptyPool { .. } => ErrorCode::EmptyPool,
            BridgeError::UnknownDenomination(_) => ErrorCode::UnknownDenomination,
            BridgeError::DuplicatePoolId(_) => ErrorCode::DuplicatePoolId,
            BridgeError::MissingPoolEntry(_) => ErrorCode::MissingPoolEntry,
            BridgeError::NonceRegression { .. } => ErrorCode::NonceRegression,
            BridgeError::DuplicateBatch { .. } => ErrorCode::DuplicateBatch,
            BridgeError::ArithmeticOverflow(_) => ErrorCode::ArithmeticOverflow,
            BridgeError::LedgerError { .. } => ErrorCode::LedgerError,
            BridgeError::StorageError { .. } => ErrorCode::StorageError,
            BridgeError::SerializationError { .. } => ErrorCode::SerializationError,
            BridgeError::EncodingError(_) => ErrorCode::EncodingError,
            BridgeError::ConfigError(_) => ErrorCode::ConfigError,
            BridgeError::SchemaMismatch { .. } => ErrorCode::SchemaMismatch,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            ErrorCode::InvalidNonce
            | ErrorCode::InvalidAddress
            | ErrorCode::InvalidCoin
            | ErrorCode::InvalidVotingPower
            | ErrorCode::InvalidArgument
            | ErrorCode::DenominatorConflict => ErrorCategory::Validation,
            ErrorCode::InsufficientFunds | ErrorCode::EmptyValidatorSet | ErrorCode::EmptyPool | ErrorCode::UnknownDenomination => {
                ErrorCategory::Resource
            }
            ErrorCode::DuplicatePoolId
            | ErrorCode::MissingPoolEntry
            | ErrorCode::NonceRegression
            | ErrorCode::DuplicateBatch
            | ErrorCode::ArithmeticOverflow => ErrorCategory::Invariant,
            ErrorCode::LedgerError
            | ErrorCode::StorageError
            | ErrorCode::SerializationError
            | ErrorCode::EncodingError
            | ErrorCode::ConfigError
            | ErrorCode::SchemaMismatch => ErrorCategory::Infrastructure,
        }
    }

    /// Invariant violations indicate a programming or replay-ordering bug.
    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Invariant
    }

    pub fn context(&self) -> ErrorContext {
        ErrorContext { code: self.code(), category: self.category(), message: self.to_string() }
    }

    pub fn invalid_nonce(input: impl Into<String>) -> Self {
        BridgeError::InvalidNonce { input: input.into() }
    }

    pub fn invalid_address(kind: impl Into<String>, input: impl Into<String>, reason: impl Into<String>) -> Self {
        BridgeError::InvalidAddress { kind: kind.into(), input: input.into(), reason: reason.into() }
    }

    pub fn overflow(operation: impl Into<String>) -> Self {
        BridgeError::ArithmeticOverflow(operation.into())
    }
}

impl From<hex::FromHexError> for BridgeError {
    fn from(err: hex::FromHexError) -> Self {
        BridgeError::EncodingError(format!("hex decode error: {}", err))
    }
}

impl From<bech32::Error> for BridgeError {
    fn from(err: bech32::Error) -> Self {
        BridgeError::EncodingError(format!("bech32 error: {}", err))
    }
}

impl From<bincode::Error> for BridgeError {
    fn from(err: bincode::Error) -> Self {
        BridgeError::SerializationError { format: "bincode".to_string(), details: err.to_string() }
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::SerializationError { format: "json".to_string(), details: err.to_string() }
    }
}

impl From<io::Error> for BridgeError {
    fn from(err: io::Error) -> Self {
        BridgeError::StorageError { operation: "io".to_string(), details: err.to_string() }
    }
}

#[macro_export]
macro_rules! storage_err {
    ($op:expr, $err:expr) => {
        $crate::foundation::BridgeError::StorageError { operation: $op.into(), details: $err.to_string() }
    };
}

// NOTE: Avoid adding generic "stringly" error conversions here.
// Use structured `BridgeError` variants at the call site to preserve context.
