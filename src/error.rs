// src/error.rs
//! Public error types for the entire crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cipher error: {0}")]
    Cipher(#[from] CipherError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("{kind} key must not be empty")]
    EmptyKey { kind: &'static str },

    #[error("{kind} '{key}' already exists")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("{kind} '{key}' not found")]
    NotFound { kind: &'static str, key: String },

    #[error("{kind} key cannot be changed by an update ('{from}' -> '{to}')")]
    KeyChanged {
        kind: &'static str,
        from: String,
        to: String,
    },

    #[error("student '{student}' references unknown course '{course_id}'")]
    UnknownCourse { student: String, course_id: String },

    #[error("marks must be between 0 and 100, got {0}")]
    InvalidMarks(f64),
}

/// Failures of the login cipher
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("cipher key must not be empty")]
    EmptyKey,

    #[error("ciphertext is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("decrypted bytes are not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
