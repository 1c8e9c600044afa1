use anyhow::{Context, Result};
use search_core::{DocId, DocumentStatus, SearchConfig, SearchServer};
use serde::Deserialize;
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One input document, as found in a JSON array/object or a JSONL line.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

fn is_document_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|s| s.to_str()), Some("json" | "jsonl"))
}

/// Document files under `input`, sorted by path. A file given directly is
/// taken whatever its extension; inside directories only `.json` and `.jsonl`
/// count. Entries that cannot be read are logged and skipped.
pub fn collect_input_files(input: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable input entry");
                None
            }
        })
        .filter(|entry| entry.path().is_file() && (entry.depth() == 0 || is_document_file(entry.path())))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reading = || format!("reading {}", file.display());
    let reader = BufReader::new(File::open(file).with_context(reading)?);
    for (n, line) in reader.lines().enumerate() {
        let line = line.with_context(reading)?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line).with_context(|| format!("{}:{}", file.display(), n + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        _ => tracing::warn!(file = %file.display(), "ignoring JSON that is neither an object nor an array"),
    }
    Ok(())
}

/// Read every document under `input`.
pub fn load_documents(input: &Path) -> Result<Vec<InputDoc>> {
    let files = collect_input_files(input);
    if files.is_empty() {
        anyhow::bail!("no .json or .jsonl input found at {}", input.display());
    }
    let mut docs = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs).with_context(|| format!("reading {}", file.display()))?;
        }
    }
    Ok(docs)
}

/// Create a server with `stop_words` and index `docs` into it.
pub fn build_server(config: SearchConfig, stop_words: &str, docs: &[InputDoc]) -> Result<SearchServer> {
    let mut server = SearchServer::with_config(config, [stop_words]).context("invalid stop words")?;
    for doc in docs {
        server
            .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
            .with_context(|| format!("adding document {}", doc.id))?;
    }
    tracing::info!(num_docs = server.document_count(), "ingested documents");
    Ok(server)
}
