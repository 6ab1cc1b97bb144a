//! crates/storybook_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like the filesystem or an AI provider.

use async_trait::async_trait;
use chrono::{DateTime, Local};
use crate::domain::{Book, BookStamp};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// The text-generation call failed or returned unusable output.
    #[error("External service error: {0}")]
    ExternalService(String),
    /// A stored record could not be parsed into a book.
    #[error("Corrupt book record {0}")]
    StorageCorruption(String),
    /// The storage location could not be created, read, or written.
    #[error("Storage IO error: {0}")]
    Io(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Sends a prompt to the model and returns the generated text.
    async fn generate_text(&self, prompt: &str) -> PortResult<String>;
}

#[async_trait]
pub trait BookStorage: Send + Sync {
    /// Stored record names, most recent first.
    async fn list_books(&self) -> PortResult<Vec<String>>;

    async fn read_book(&self, name: &str) -> PortResult<Book>;

    /// Persists a book under the name derived from `stamp` and returns that name.
    /// An existing record with the same stamp is overwritten.
    async fn write_book(&self, stamp: &BookStamp, book: &Book) -> PortResult<String>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
