//! Immutable denylist snapshots and the file loader that builds them.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Error raised while building a snapshot from the backing file.
#[derive(Debug, thiserror::Error)]
pub enum BlocklistError {
    /// The file could not be opened (missing, permission denied, ...).
    #[error("failed to open blocklist {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was opened but its contents could not be read.
    #[error("failed to read blocklist {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A fully-built, read-only set of blocked client identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: HashSet<String>,
}

impl Snapshot {
    /// An empty snapshot that blocks nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from blocklist file contents.
    ///
    /// Each line is trimmed; blank lines are dropped. Everything else is
    /// taken verbatim as an identifier.
    pub fn parse(contents: &str) -> Self {
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Read the whole file at `path` and parse it.
    ///
    /// Invalid UTF-8 is replaced rather than rejected, so a stray byte only
    /// spoils the line it sits on.
    pub async fn load(path: &Path) -> Result<Self, BlocklistError> {
        let mut file = File::open(path).await.map_err(|source| BlocklistError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut raw = Vec::new();
        file.read_to_end(&mut raw)
            .await
            .map_err(|source| BlocklistError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self::parse(&String::from_utf8_lossy(&raw)))
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains(identifier)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Snapshot {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_trims_and_drops_blank_lines() {
        let snapshot = Snapshot::parse("1.2.3.4\n\n  5.6.7.8 \n");

        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.contains("1.2.3.4"));
        assert!(snapshot.contains("5.6.7.8"));
        assert!(!snapshot.contains("  5.6.7.8 "));
    }

    #[test]
    fn test_parse_handles_crlf_and_duplicates() {
        let snapshot = Snapshot::parse("10.0.0.1\r\n10.0.0.1\r\n\t\r\n10.0.0.2");

        assert_eq!(snapshot, Snapshot::from_iter(["10.0.0.1", "10.0.0.2"]));
    }

    #[test]
    fn test_parse_does_not_validate_syntax() {
        let snapshot = Snapshot::parse("not-an-ip\n2001:db8::1\n");

        assert!(snapshot.contains("not-an-ip"));
        assert!(snapshot.contains("2001:db8::1"));
    }

    #[test]
    fn test_membership_is_exact() {
        let snapshot = Snapshot::from_iter(["192.168.1.1"]);

        assert!(!snapshot.contains("192.168.1.10"));
        assert!(!snapshot.contains("192.168.1"));
        assert!(!snapshot.contains(""));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "1.2.3.4\n\n  5.6.7.8 \n").unwrap();

        let snapshot = Snapshot::load(file.path()).await.unwrap();
        assert_eq!(snapshot, Snapshot::from_iter(["1.2.3.4", "5.6.7.8"]));
    }

    #[tokio::test]
    async fn test_load_empty_file_is_empty_snapshot() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let snapshot = Snapshot::load(file.path()).await.unwrap();
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        let err = Snapshot::load(&path).await.unwrap_err();
        assert!(matches!(err, BlocklistError::Open { .. }));
        assert!(err.to_string().contains("absent.txt"));
    }

    #[tokio::test]
    async fn test_load_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(Snapshot::load(dir.path()).await.is_err());
    }
}
