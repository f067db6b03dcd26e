//! Zip archive assembly for a finished batch.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use tracing::{debug, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::core::TransformResult;
use crate::utils::ArchiveError;

type Result<T> = std::result::Result<T, ArchiveError>;

/// Accumulates transform results into an in-memory zip archive.
///
/// Entries are written in the order they are added, all with the same fixed
/// timestamp, so the same results always serialise to the same bytes.
/// A name that is already taken gets a ` (n)` suffix before its extension.
pub struct ArchiveBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
    names: HashSet<String>,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            names: HashSet::new(),
        }
    }

    /// Adds one result and returns the entry name it was stored under.
    pub fn add(&mut self, result: &TransformResult) -> Result<String> {
        let entry = self.unique_name(&result.name);
        if entry != result.name {
            warn!("Duplicate archive entry '{}', stored as '{}'", result.name, entry);
        }

        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        self.writer.start_file(entry.as_str(), options)?;
        self.writer.write_all(&result.bytes)?;
        self.names.insert(entry.clone());
        Ok(entry)
    }

    /// Writes the central directory and returns the archive bytes.
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let entries = self.names.len();
        let bytes = self.writer.finish()?.into_inner();
        debug!("Archive finished: {} entries, {} bytes", entries, bytes.len());
        Ok(bytes)
    }

    fn unique_name(&self, name: &str) -> String {
        if !self.names.contains(name) {
            return name.to_string();
        }

        let (stem, ext) = match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
            _ => (name, None),
        };

        (1..)
            .map(|n| match ext {
                Some(ext) => format!("{stem} ({n}).{ext}"),
                None => format!("{stem} ({n})"),
            })
            .find(|candidate| !self.names.contains(candidate))
            .unwrap_or_else(|| name.to_string())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a complete archive from `results`, in order.
pub fn build(results: &[TransformResult]) -> Result<Vec<u8>> {
    let mut builder = ArchiveBuilder::new();
    for result in results {
        builder.add(result)?;
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn result(name: &str, bytes: &[u8]) -> TransformResult {
        TransformResult {
            name: name.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    fn entries(bytes: Vec<u8>) -> Vec<(String, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut content = Vec::new();
                file.read_to_end(&mut content).unwrap();
                (file.name().to_string(), content)
            })
            .collect()
    }

    #[test]
    fn entries_keep_input_order() {
        let bytes = build(&[result("b.webp", b"bbb"), result("a.webp", b"aa")]).unwrap();
        assert_eq!(
            entries(bytes),
            vec![
                ("b.webp".to_string(), b"bbb".to_vec()),
                ("a.webp".to_string(), b"aa".to_vec()),
            ]
        );
    }

    #[test]
    fn duplicate_names_are_suffixed() {
        let bytes = build(&[
            result("a.webp", b"1"),
            result("a.webp", b"2"),
            result("a.webp", b"3"),
            result("README", b"4"),
            result("README", b"5"),
        ])
        .unwrap();

        let names: Vec<String> = entries(bytes).into_iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec!["a.webp", "a (1).webp", "a (2).webp", "README", "README (1)"]
        );
    }

    #[test]
    fn output_is_deterministic() {
        let results = [result("x.png", b"same"), result("y.png", b"bytes")];
        assert_eq!(build(&results).unwrap(), build(&results).unwrap());
    }

    #[test]
    fn empty_archive_is_still_valid() {
        let builder = ArchiveBuilder::new();
        assert!(entries(builder.finish().unwrap()).is_empty());
    }
}
