//! Storage error types
//!
//! Error codes:
//! - HBNB_STORAGE_IO_ERROR (ERROR severity)
//! - HBNB_STORAGE_CORRUPTED (FATAL severity)
//! - HBNB_STORAGE_LOCK_POISONED (FATAL severity)

use std::fmt;
use std::io;

/// Severity levels for storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, server continues
    Error,
    /// Stored state can no longer be trusted
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Storage-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorCode {
    /// Disk I/O failure while loading or persisting
    HbnbStorageIoError,
    /// Persisted file does not decode
    HbnbStorageCorrupted,
    /// A thread panicked while holding the object map
    HbnbStorageLockPoisoned,
}

impl StorageErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StorageErrorCode::HbnbStorageIoError => "HBNB_STORAGE_IO_ERROR",
            StorageErrorCode::HbnbStorageCorrupted => "HBNB_STORAGE_CORRUPTED",
            StorageErrorCode::HbnbStorageLockPoisoned => "HBNB_STORAGE_LOCK_POISONED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StorageErrorCode::HbnbStorageIoError => Severity::Error,
            StorageErrorCode::HbnbStorageCorrupted => Severity::Fatal,
            StorageErrorCode::HbnbStorageLockPoisoned => Severity::Fatal,
        }
    }
}

impl fmt::Display for StorageErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Storage error with code, message and optional I/O cause
#[derive(Debug)]
pub struct StorageError {
    code: StorageErrorCode,
    message: String,
    source: Option<io::Error>,
}

impl StorageError {
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StorageErrorCode::HbnbStorageIoError,
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn corrupted(message: impl Into<String>) -> Self {
        Self {
            code: StorageErrorCode::HbnbStorageCorrupted,
            message: message.into(),
            source: None,
        }
    }

    pub fn lock_poisoned() -> Self {
        Self {
            code: StorageErrorCode::HbnbStorageLockPoisoned,
            message: "object map lock poisoned".to_string(),
            source: None,
        }
    }

    pub fn code(&self) -> StorageErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity(), self.code, self.message)?;
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
