//! Document writer
//!
//! Output names are appended to a base path, which is either a directory
//! (with trailing separator) or a file name prefix:
//!
//! - `<base>senzing_graph.json`: resolved graph, always written
//! - `<base>source_graph.json`: source graph, only when it was built
//!
//! Every document is serialized and staged in a temp file next to its
//! destination first; files are moved into place only once all of them
//! are staged. If a move fails, documents already moved by the same call
//! are removed again.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::errors::{ExportError, Result};
use crate::features::graph_builder::ExportGraphs;

pub const RESOLVED_GRAPH_FILE: &str = "senzing_graph.json";
pub const SOURCE_GRAPH_FILE: &str = "source_graph.json";

const INDENT: &[u8] = b"    ";

/// Serialize with 4-space indentation
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    Ok(buf)
}

#[derive(Debug, Clone)]
pub struct DocumentWriter {
    base: PathBuf,
}

impl DocumentWriter {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn resolved_path(&self) -> PathBuf {
        self.output_path(RESOLVED_GRAPH_FILE)
    }

    pub fn source_path(&self) -> PathBuf {
        self.output_path(SOURCE_GRAPH_FILE)
    }

    fn output_path(&self, file_name: &str) -> PathBuf {
        let mut path = OsString::from(self.base.as_os_str());
        path.push(file_name);
        PathBuf::from(path)
    }

    /// Write the documents, returning the paths written
    pub fn write(&self, graphs: &ExportGraphs) -> Result<Vec<PathBuf>> {
        let mut staged = vec![(self.stage(&graphs.resolved, &self.resolved_path())?, self.resolved_path())];
        if let Some(source) = &graphs.source {
            staged.push((self.stage(source, &self.source_path())?, self.source_path()));
        }

        let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
        for (temp, path) in staged {
            if let Err(e) = temp.persist(&path) {
                // the remaining temp files are dropped (and deleted) with `staged`
                for done in &written {
                    if let Err(remove_err) = std::fs::remove_file(done) {
                        warn!("could not remove {}: {}", done.display(), remove_err);
                    }
                }
                return Err(ExportError::Io(e.error));
            }
            written.push(path);
        }
        for path in &written {
            info!("wrote {}", path.display());
        }
        Ok(written)
    }

    fn stage<T: Serialize>(&self, document: &T, destination: &Path) -> Result<NamedTempFile> {
        let bytes = to_pretty_json(document)?;
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = tempfile::Builder::new()
            .prefix(".szgraph-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        temp.write_all(&bytes)?;
        temp.flush()?;
        Ok(temp)
    }
}
