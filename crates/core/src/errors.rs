use thiserror::Error;

/// Unified error type for the entire saiel-budget-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation ──────────────────────────────────────────────────
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Budget for {category} would bring the total to {total}%, above 100%")]
    PercentageOverflow { category: String, total: f64 },

    // ── Categories ──────────────────────────────────────────────────
    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    #[error("Maximum of {max} categories allowed")]
    CategoryLimit { max: usize },

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    // ── Transactions ────────────────────────────────────────────────
    #[error("Transaction not found: {0}")]
    TransactionNotFound(u64),

    // ── Platform ────────────────────────────────────────────────────
    #[error("Random number generation failed: {0}")]
    Entropy(String),

    // ── Storage ─────────────────────────────────────────────────────
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Backups ─────────────────────────────────────────────────────
    #[error("Invalid backup format: {0}")]
    InvalidBackupFormat(String),

    #[error("Unsupported backup version: {0}")]
    UnsupportedVersion(u16),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed — wrong password or corrupted backup")]
    Decryption,
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<aes_gcm::Error> for CoreError {
    fn from(_: aes_gcm::Error) -> Self {
        CoreError::Decryption
    }
}
