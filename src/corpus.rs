//! Categorized corpus loading
//!
//! A corpus lives on disk as one subdirectory per category, each holding
//! plain `.txt` documents:
//!
//! ```text
//! root/
//!   business/001.txt 002.txt ...
//!   sport/001.txt ...
//! ```
//!
//! Documents are read in file-name order. Each file is decoded as UTF-8,
//! falling back to Latin-1 when that fails, so every byte sequence loads.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::{CographError, Result};

/// Category folders of the BBC News Summary dataset
pub const BBC_NEWS_CATEGORIES: &[&str] = &["sport", "politics", "business", "entertainment", "tech"];

/// Decode document bytes: UTF-8 if valid, otherwise Latin-1.
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback cannot fail.
pub fn decode_text(bytes: Vec<u8>) -> (String, bool) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, false),
        Err(err) => {
            let text = err.into_bytes().into_iter().map(char::from).collect();
            (text, true)
        }
    }
}

fn is_document(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.ends_with(".txt"))
        .unwrap_or(false)
}

/// One category and its raw documents, in file-name order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub label: String,
    pub documents: Vec<String>,
}

impl Category {
    /// All documents joined with a single space
    pub fn merged_text(&self) -> String {
        self.documents.join(" ")
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// A loaded corpus: categories in load order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pub categories: Vec<Category>,
}

impl Corpus {
    /// Look up a category by label
    pub fn get(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    /// Total number of documents across categories
    pub fn document_count(&self) -> usize {
        self.categories.iter().map(Category::len).sum()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Reads a categorized corpus from a directory tree
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    root: PathBuf,
    categories: Option<Vec<String>>,
    follow_links: bool,
}

impl CorpusLoader {
    /// Create a loader for a corpus root.
    ///
    /// Without explicit categories, every immediate subdirectory is one,
    /// sorted by name.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            categories: None,
            follow_links: false,
        }
    }

    /// Load exactly these categories, in this order.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Configure symlink traversal.
    ///
    /// Symlinked documents are read either way. With `true` the walk resolves
    /// every link up front, so a dangling link fails the walk itself instead
    /// of the later read.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every category.
    ///
    /// A requested category without a directory is an error, as is any
    /// unreadable document.
    pub fn load(&self) -> Result<Corpus> {
        let labels = match &self.categories {
            Some(labels) => labels.clone(),
            None => self.discover_categories()?,
        };

        let mut categories = Vec::with_capacity(labels.len());
        for label in labels {
            let documents = self.load_category(&label)?;
            debug!(category = %label, documents = documents.len(), "loaded category");
            categories.push(Category { label, documents });
        }
        Ok(Corpus { categories })
    }

    /// Load the documents of one category, in file-name order
    pub fn load_category(&self, label: &str) -> Result<Vec<String>> {
        let dir = self.root.join(label);
        if !dir.is_dir() {
            return Err(CographError::MissingCategory {
                category: label.to_string(),
                path: dir,
            });
        }

        let walker = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        let mut documents = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() || !is_document(entry.path()) {
                debug!(path = %entry.path().display(), "skipping non-document entry");
                continue;
            }
            // Symlinked documents are read through their target.
            let (text, fell_back) = decode_text(fs::read(entry.path())?);
            if fell_back {
                warn!(path = %entry.path().display(), "not valid UTF-8, decoded as Latin-1");
            }
            documents.push(text);
        }
        Ok(documents)
    }

    fn discover_categories(&self) -> Result<Vec<String>> {
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.follow_links)
            .sort_by_file_name();

        let mut labels = Vec::new();
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() {
                labels.push(entry.file_name().to_string_lossy().into_owned());
            } else {
                debug!(path = %entry.path().display(), "skipping non-directory entry");
            }
        }
        Ok(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, bytes: &[u8]) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), bytes).unwrap();
    }

    #[test]
    fn test_decode_utf8() {
        let (text, fell_back) = decode_text("naïve café".as_bytes().to_vec());
        assert_eq!(text, "naïve café");
        assert!(!fell_back);
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // 0xE9 is 'é' in Latin-1 and an invalid lone byte in UTF-8.
        let (text, fell_back) = decode_text(vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(text, "café");
        assert!(fell_back);
    }

    #[test]
    fn test_load_sorted_txt_only() {
        let temp = tempdir().unwrap();
        let sport = temp.path().join("sport");
        write(&sport, "b.txt", b"second");
        write(&sport, "a.txt", b"first");
        write(&sport, "notes.md", b"ignored");
        write(&sport.join("nested"), "c.txt", b"ignored too");

        let docs = CorpusLoader::new(temp.path()).load_category("sport").unwrap();
        assert_eq!(docs, vec!["first", "second"]);
    }

    #[test]
    fn test_discovers_categories_by_name() {
        let temp = tempdir().unwrap();
        write(&temp.path().join("tech"), "1.txt", b"chips");
        write(&temp.path().join("business"), "1.txt", b"shares");
        write(temp.path(), "README.txt", b"not a category");

        let corpus = CorpusLoader::new(temp.path()).load().unwrap();
        let labels: Vec<&str> = corpus.categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["business", "tech"]);
        assert_eq!(corpus.document_count(), 2);
        assert_eq!(corpus.get("tech").unwrap().documents, vec!["chips"]);
    }

    #[test]
    fn test_explicit_categories_keep_order() {
        let temp = tempdir().unwrap();
        write(&temp.path().join("tech"), "1.txt", b"chips");
        write(&temp.path().join("business"), "1.txt", b"shares");

        let corpus = CorpusLoader::new(temp.path())
            .with_categories(["tech", "business"])
            .load()
            .unwrap();
        assert_eq!(corpus.categories[0].label, "tech");
        assert_eq!(corpus.categories[1].label, "business");
    }

    #[test]
    fn test_missing_category_is_error() {
        let temp = tempdir().unwrap();
        let err = CorpusLoader::new(temp.path())
            .with_categories(["politics"])
            .load()
            .unwrap_err();
        assert!(matches!(err, CographError::MissingCategory { ref category, .. } if category == "politics"));
    }

    #[test]
    fn test_empty_category_loads() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("empty")).unwrap();

        let corpus = CorpusLoader::new(temp.path()).load().unwrap();
        assert!(corpus.get("empty").unwrap().is_empty());
        assert_eq!(corpus.get("empty").unwrap().merged_text(), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_document_is_read() {
        let temp = tempdir().unwrap();
        let sport = temp.path().join("sport");
        write(&sport, "a.txt", b"first");
        write(temp.path(), "shared.txt", b"linked");
        std::os::unix::fs::symlink(temp.path().join("shared.txt"), sport.join("b.txt")).unwrap();

        for follow in [false, true] {
            let docs = CorpusLoader::new(temp.path())
                .with_follow_links(follow)
                .load_category("sport")
                .unwrap();
            assert_eq!(docs, vec!["first", "linked"]);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_document_is_io_error() {
        let temp = tempdir().unwrap();
        let sport = temp.path().join("sport");
        fs::create_dir_all(&sport).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone.txt"), sport.join("x.txt")).unwrap();

        let err = CorpusLoader::new(temp.path())
            .load_category("sport")
            .unwrap_err();
        match err {
            CographError::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_document_fails_walk_when_following_links() {
        let temp = tempdir().unwrap();
        let sport = temp.path().join("sport");
        fs::create_dir_all(&sport).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone.txt"), sport.join("x.txt")).unwrap();

        let err = CorpusLoader::new(temp.path())
            .with_follow_links(true)
            .load()
            .unwrap_err();
        assert!(matches!(err, CographError::Walk(_)), "expected Walk, got {err:?}");
    }

    #[test]
    fn test_merged_text_joins_with_space() {
        let category = Category {
            label: "tech".into(),
            documents: vec!["end.".into(), "Start".into()],
        };
        assert_eq!(category.merged_text(), "end. Start");
    }
}
