//! Unified application error type.
//! Every layer (db, core, cli, utils) returns AppError so that the CLI
//! can report failures in one place.
//!
//! The countdown engine itself never produces fatal errors: persistence
//! and alert-channel failures are logged and swallowed where they happen.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Storage(String),

    // ---------------------------
    // Lookup errors
    // ---------------------------
    #[error("No target matches id '{0}'")]
    UnknownTarget(String),

    #[error("Id prefix '{0}' matches more than one target")]
    AmbiguousTarget(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to save configuration")]
    ConfigSave,
}

pub type AppResult<T> = Result<T, AppError>;
