//! services/api/src/adapters/fs_store.rs
//!
//! This module contains the filesystem adapter, which is the concrete implementation
//! of the `BookStorage` port from the `core` crate. Each book lives in its own
//! `book_<YYYYMMDDHHMMSS>.json` file inside a flat directory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use storybook_core::domain::{Book, BookStamp};
use storybook_core::ports::{BookStorage, PortError, PortResult};
use tracing::debug;

const FILE_PREFIX: &str = "book_";
const FILE_SUFFIX: &str = ".json";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A storage adapter that implements the `BookStorage` port on a local directory.
#[derive(Clone, Debug)]
pub struct FsBookStore {
    dir: PathBuf,
}

impl FsBookStore {
    /// Opens the store, creating the directory if it does not exist yet.
    pub async fn open(dir: impl Into<PathBuf>) -> PortResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| PortError::Io(format!("cannot create {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(stamp: &BookStamp) -> String {
        format!("{FILE_PREFIX}{stamp}{FILE_SUFFIX}")
    }

    fn is_book_file(name: &str) -> bool {
        name.starts_with(FILE_PREFIX) && name.ends_with(FILE_SUFFIX)
    }
}

//=========================================================================================
// "Impure" On-Disk Record Struct
//=========================================================================================

#[derive(Serialize, Deserialize)]
struct BookRecord {
    title: String,
    content: String,
}
impl BookRecord {
    fn from_domain(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            content: book.content.clone(),
        }
    }

    fn to_domain(self) -> Book {
        Book {
            title: self.title,
            content: self.content,
        }
    }
}

//=========================================================================================
// `BookStorage` Trait Implementation
//=========================================================================================

#[async_trait]
impl BookStorage for FsBookStore {
    async fn list_books(&self) -> PortResult<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PortError::Io(e.to_string())),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| PortError::Io(e.to_string()))?
        {
            let is_file = entry
                .file_type()
                .await
                .map_err(|e| PortError::Io(e.to_string()))?
                .is_file();
            if let Some(name) = entry.file_name().to_str() {
                if is_file && Self::is_book_file(name) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }

    async fn read_book(&self, name: &str) -> PortResult<Book> {
        let path = self.dir.join(name);
        let raw = tokio::fs::read(&path)
            .await
            .map_err(|e| PortError::Io(format!("cannot read {}: {}", path.display(), e)))?;
        let record: BookRecord = serde_json::from_slice(&raw)
            .map_err(|e| PortError::StorageCorruption(format!("{}: {}", name, e)))?;
        Ok(record.to_domain())
    }

    async fn write_book(&self, stamp: &BookStamp, book: &Book) -> PortResult<String> {
        let name = Self::file_name(stamp);
        let path = self.dir.join(&name);
        // `to_string_pretty` indents by two spaces and keeps non-ASCII text literal.
        let json = serde_json::to_string_pretty(&BookRecord::from_domain(book))
            .map_err(|e| PortError::Io(e.to_string()))?;

        // Readers only ever see complete records: write aside, then rename into place.
        let tmp = self.dir.join(format!(".{name}.tmp"));
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| PortError::Io(format!("cannot write {}: {}", tmp.display(), e)))?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(PortError::Io(format!("cannot write {}: {}", path.display(), e)));
        }
        debug!(file = %name, "Book written to disk");
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn stamp(y: i32, mo: u32, d: u32) -> BookStamp {
        BookStamp::from_datetime(&Utc.with_ymd_and_hms(y, mo, d, 0, 0, 0).unwrap())
    }

    fn book(title: &str, content: &str) -> Book {
        Book {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn open_creates_missing_directory_idempotently() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("books");

        FsBookStore::open(&dir).await.unwrap();
        let store = FsBookStore::open(&dir).await.unwrap();

        assert!(dir.is_dir());
        assert!(store.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn arabic_text_round_trips_and_is_stored_unescaped() {
        let tmp = TempDir::new().unwrap();
        let store = FsBookStore::open(tmp.path()).await.unwrap();
        let original = book("كتاب أطفال 20240615120000", "الفصل الأول: الأرنب\nكان يا ما كان");

        let name = store.write_book(&stamp(2024, 6, 15), &original).await.unwrap();

        assert_eq!(name, "book_20240615000000.json");
        assert_eq!(store.read_book(&name).await.unwrap(), original);
        let raw = std::fs::read_to_string(tmp.path().join(&name)).unwrap();
        assert!(raw.contains("الفصل الأول"));
        assert!(!raw.contains("\\u"));
        assert!(raw.contains("\n  \"title\""));
    }

    #[tokio::test]
    async fn list_is_most_recent_first_and_ignores_strays() {
        let tmp = TempDir::new().unwrap();
        let store = FsBookStore::open(tmp.path()).await.unwrap();
        store.write_book(&stamp(2024, 1, 1), &book("a", "old")).await.unwrap();
        store.write_book(&stamp(2024, 1, 2), &book("b", "new")).await.unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "stray").unwrap();
        std::fs::create_dir(tmp.path().join("book_dir.json")).unwrap();

        let names = store.list_books().await.unwrap();

        assert_eq!(
            names,
            vec![
                "book_20240102000000.json".to_string(),
                "book_20240101000000.json".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn same_stamp_overwrites_previous_record() {
        let tmp = TempDir::new().unwrap();
        let store = FsBookStore::open(tmp.path()).await.unwrap();
        let s = stamp(2024, 3, 3);

        store.write_book(&s, &book("first", "one")).await.unwrap();
        let name = store.write_book(&s, &book("second", "two")).await.unwrap();

        assert_eq!(store.list_books().await.unwrap().len(), 1);
        assert_eq!(store.read_book(&name).await.unwrap().title, "second");
    }

    #[tokio::test]
    async fn write_leaves_only_the_final_record_behind() {
        let tmp = TempDir::new().unwrap();
        let store = FsBookStore::open(tmp.path()).await.unwrap();

        store.write_book(&stamp(2024, 5, 5), &book("a", "one")).await.unwrap();
        store.write_book(&stamp(2024, 5, 5), &book("b", "two")).await.unwrap();

        let entries: Vec<String> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["book_20240505000000.json".to_string()]);
    }

    #[tokio::test]
    async fn unwritable_location_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("books");
        let store = FsBookStore::open(&dir).await.unwrap();
        std::fs::remove_dir(&dir).unwrap();
        std::fs::write(&dir, "not a directory").unwrap();

        let err = store
            .write_book(&stamp(2024, 1, 1), &book("t", "c"))
            .await
            .unwrap_err();

        assert!(matches!(err, PortError::Io(_)), "{err}");
        assert_eq!(std::fs::read_to_string(&dir).unwrap(), "not a directory");
    }

    #[tokio::test]
    async fn invalid_json_is_reported_as_corruption() {
        let tmp = TempDir::new().unwrap();
        let store = FsBookStore::open(tmp.path()).await.unwrap();
        std::fs::write(tmp.path().join("book_20240101000000.json"), "{not json").unwrap();
        std::fs::write(
            tmp.path().join("book_20240102000000.json"),
            r#"{"title": "no content"}"#,
        )
        .unwrap();

        for name in ["book_20240101000000.json", "book_20240102000000.json"] {
            let err = store.read_book(name).await.unwrap_err();
            assert!(matches!(err, PortError::StorageCorruption(_)), "{name}: {err}");
        }
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let tmp = TempDir::new().unwrap();
        let store = FsBookStore::open(tmp.path()).await.unwrap();

        let err = store.read_book("book_20990101000000.json").await.unwrap_err();

        assert!(matches!(err, PortError::Io(_)));
    }

    #[tokio::test]
    async fn removed_directory_lists_as_empty() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("books");
        let store = FsBookStore::open(&dir).await.unwrap();
        std::fs::remove_dir(&dir).unwrap();

        assert!(store.list_books().await.unwrap().is_empty());
    }
}
