//! crates/storybook_core/src/service.rs
//!
//! The book generator and the "latest book" lookup, written purely against the ports.

use crate::domain::{Book, BookStamp};
use crate::ports::{BookStorage, Clock, PortError, PortResult, TextGenerationService};
use crate::prompt::{build_prompt, build_story_prompt};
use std::sync::Arc;
use tracing::{debug, info};

/// Generates, stores and retrieves books.
#[derive(Clone)]
pub struct BookService {
    llm: Arc<dyn TextGenerationService>,
    storage: Arc<dyn BookStorage>,
    clock: Arc<dyn Clock>,
}

impl BookService {
    pub fn new(
        llm: Arc<dyn TextGenerationService>,
        storage: Arc<dyn BookStorage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { llm, storage, clock }
    }

    /// Generates a new book, persists it, and returns it.
    ///
    /// Nothing is written unless the model call succeeds with non-empty text.
    pub async fn generate(&self, title: Option<&str>) -> PortResult<Book> {
        let prompt = build_prompt(title);
        debug!(titled = title.is_some(), "Requesting book text from model");

        let text = self.llm.generate_text(&prompt).await?;
        let content = text.trim();
        if content.is_empty() {
            return Err(PortError::ExternalService(
                "Model returned an empty book.".to_string(),
            ));
        }

        let stamp = BookStamp::from_datetime(&self.clock.now());
        let book = Book {
            title: title
                .map(str::to_string)
                .unwrap_or_else(|| stamp.default_title()),
            content: content.to_string(),
        };

        let file = self.storage.write_book(&stamp, &book).await?;
        info!(%file, title = %book.title, chars = book.content.chars().count(), "Generated new book");
        Ok(book)
    }

    /// Writes a one-off story about `subject`. The story is returned, never stored.
    pub async fn story(&self, subject: &str) -> PortResult<String> {
        let text = self.llm.generate_text(&build_story_prompt(subject)).await?;
        let story = text.trim();
        if story.is_empty() {
            return Err(PortError::ExternalService(
                "Model returned an empty story.".to_string(),
            ));
        }
        debug!(chars = story.chars().count(), "Generated story");
        Ok(story.to_string())
    }

    /// Returns the most recent stored book, generating one if the store is empty.
    pub async fn latest(&self) -> PortResult<Book> {
        let names = self.storage.list_books().await?;
        match names.first() {
            Some(name) => self.storage.read_book(name).await,
            None => {
                info!("No stored books, generating the first one");
                self.generate(None).await
            }
        }
    }
}
