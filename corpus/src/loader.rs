//! Ingestion of raw knowledge-base exports into corpus documents.
//!
//! Source files are JSON (an array of entries, or an object wrapping one)
//! or JSONL (one entry per line). Text extraction walks a fixed priority
//! list of field names and falls back to joining every string-valued
//! field, so exports with divergent schemas still yield usable documents.

use crate::error::Result;
use crate::types::Document;
use log::{debug, warn};
use serde_json::Value;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Field names tried in priority order when extracting searchable text.
pub const TEXT_FIELD_PRIORITY: [&str; 5] = [
    "contentNormalized",
    "searchContent",
    "content",
    "text",
    "title",
];

/// Extract the searchable text of one raw entry.
///
/// String entries are used as-is; object entries are probed with
/// [`TEXT_FIELD_PRIORITY`] and then the join-all-strings fallback.
/// Returns `None` when nothing non-blank can be extracted.
fn extract_text(item: &Value) -> Option<String> {
    match item {
        Value::String(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Object(fields) => {
            for key in TEXT_FIELD_PRIORITY {
                if let Some(Value::String(text)) = fields.get(key) {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        return Some(trimmed.to_string());
                    }
                }
            }
            let parts: Vec<&str> = fields
                .values()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

fn extract_title(item: &Value) -> String {
    item.get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Unwrap the entry array of a parsed source file. An object root
/// contributes its first array-valued field (in sorted key order);
/// anything else yields no entries.
fn entries_of(root: Value) -> Vec<Value> {
    match root {
        Value::Array(entries) => entries,
        Value::Object(fields) => fields
            .into_iter()
            .find_map(|(_, value)| match value {
                Value::Array(entries) => Some(entries),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Turn a parsed source file into documents.
///
/// `original_index` is the entry's index in the source array; entries
/// that yield no text are skipped but still consume their index, so ids
/// stay stable regardless of which entries were extractable.
pub fn documents_from_value(source_file: &str, root: Value) -> Vec<Document> {
    let mut documents = Vec::new();
    for (original_index, entry) in entries_of(root).into_iter().enumerate() {
        let Some(content) = extract_text(&entry) else {
            continue;
        };
        documents.push(Document::new(
            source_file,
            original_index,
            extract_title(&entry),
            content,
        ));
    }
    documents
}

fn jsonl_entries(raw: &str, path: &Path) -> Value {
    let mut entries = Vec::new();
    for (line_no, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(entry) => entries.push(entry),
            Err(err) => {
                warn!(
                    "{}:{}: skipping malformed line: {err}",
                    path.display(),
                    line_no + 1
                );
            }
        }
    }
    Value::Array(entries)
}

fn file_basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Load one source file, falling back to JSONL when the file is not a
/// single JSON document.
pub fn load_source_file(path: &Path) -> Result<Vec<Document>> {
    let raw = std::fs::read_to_string(path)?;
    let root = match serde_json::from_str::<Value>(&raw) {
        Ok(root) => root,
        Err(err) => {
            debug!(
                "{}: not a single JSON document ({err}), trying JSONL",
                path.display()
            );
            jsonl_entries(&raw, path)
        }
    };
    Ok(documents_from_value(&file_basename(path), root))
}

fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let ext = path.extension().and_then(|ext| ext.to_str());
        if matches!(ext, Some("json" | "jsonl")) {
            paths.push(path);
        }
    }
    Ok(paths)
}

/// Scan source directories (non-recursively) for `*.json` / `*.jsonl`
/// files and ingest every entry. Files are processed in sorted path
/// order so repeated runs produce identical corpora; missing directories
/// are skipped.
pub fn scan_dirs(dirs: &[PathBuf]) -> Result<Vec<Document>> {
    let mut paths = Vec::new();
    for dir in dirs {
        if !dir.is_dir() {
            debug!("Skipping missing source directory {}", dir.display());
            continue;
        }
        paths.extend(source_files(dir)?);
    }
    paths.sort();

    let mut documents = Vec::new();
    for path in &paths {
        let docs = load_source_file(path)?;
        debug!("{}: {} documents", path.display(), docs.len());
        documents.extend(docs);
    }
    Ok(documents)
}

/// Read a previously written corpus metadata file.
pub fn read_metadata(path: &Path) -> Result<Vec<Document>> {
    let file = std::fs::File::open(path)?;
    let documents: Vec<Document> = serde_json::from_reader(BufReader::new(file))?;
    Ok(documents)
}

/// Write corpus metadata as pretty-printed JSON.
pub fn write_metadata(path: &Path, documents: &[Document]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), documents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_extraction_respects_field_priority() {
        let docs = documents_from_value(
            "kb.json",
            json!([{
                "title": "T",
                "content": "body",
                "searchContent": "normalized body",
            }]),
        );
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "normalized body");
        assert_eq!(docs[0].title, "T");
    }

    #[test]
    fn test_extraction_joins_string_fields_as_fallback() {
        let docs = documents_from_value(
            "kb.json",
            json!([{"zeta": "tail", "alpha": "head", "count": 3}]),
        );
        // Object fields iterate in sorted key order.
        assert_eq!(docs[0].content, "head tail");
        assert_eq!(docs[0].title, "");
    }

    #[test]
    fn test_skipped_entries_still_consume_indices() {
        let docs = documents_from_value(
            "kb.json",
            json!([
                {"content": "first"},
                42,
                {"note": 1},
                "  plain string entry  ",
            ]),
        );
        let indices: Vec<usize> = docs.iter().map(|d| d.original_index).collect();
        assert_eq!(indices, vec![0, 3]);
        assert_eq!(docs[1].content, "plain string entry");
    }

    #[test]
    fn test_non_string_title_becomes_empty() {
        let docs = documents_from_value("kb.json", json!([{"content": "x", "title": 7}]));
        assert_eq!(docs[0].title, "");
    }

    #[test]
    fn test_object_root_uses_first_array_field() {
        let docs = documents_from_value(
            "kb.json",
            json!({
                "meta": {"version": 2},
                "items": [{"content": "wrapped"}],
            }),
        );
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "wrapped");
    }

    #[test]
    fn test_jsonl_fallback_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.jsonl");
        std::fs::write(
            &path,
            "{\"content\": \"one\"}\nnot json\n\n{\"content\": \"two\"}\n",
        )
        .unwrap();

        let docs = load_source_file(&path).unwrap();
        assert_eq!(docs.len(), 2);
        // Malformed lines are dropped before indexing, so indices are dense.
        assert_eq!(docs[0].original_index, 0);
        assert_eq!(docs[1].original_index, 1);
        assert_eq!(docs[1].content, "two");
    }

    #[test]
    fn test_scan_dirs_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("b.json"),
            "[{\"content\": \"from b\"}]",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            "[{\"content\": \"from a\"}]",
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = scan_dirs(&[dir.path().to_path_buf()]).unwrap();
        let sources: Vec<&str> = docs.iter().map(|d| d.source_file.as_str()).collect();
        assert_eq!(sources, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_scan_dirs_skips_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let docs = scan_dirs(&[missing]).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_metadata_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        let docs = vec![
            Document::new("a.json", 0, "One", "first"),
            Document::new("a.json", 2, "", "third"),
        ];
        write_metadata(&path, &docs).unwrap();
        assert_eq!(read_metadata(&path).unwrap(), docs);
    }
}
