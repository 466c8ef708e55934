use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

/// File name every generated snippet is saved under.
pub const SNIPPET_FILENAME: &str = "test_snippet.properties";

/// Host-provided save capability: receives the rendered snippet.
///
/// Returns a human-readable location of where the snippet ended up.
pub trait SnippetSink {
    fn save(&mut self, contents: &str, filename: &str) -> std::io::Result<String>;
}

/// Writes snippets into a directory, creating it on first save.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    pub dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink { dir: dir.into() }
    }
}

impl SnippetSink for DirectorySink {
    fn save(&mut self, contents: &str, filename: &str) -> std::io::Result<String> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(filename);
        std::fs::write(&path, contents)?;
        Ok(path.display().to_string())
    }
}

/// Prints snippets to stdout, preceded by a `# <filename>` header line.
#[derive(Debug, Clone, Default)]
pub struct StdoutSink;

impl SnippetSink for StdoutSink {
    fn save(&mut self, contents: &str, filename: &str) -> std::io::Result<String> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        writeln!(out, "# {}", filename)?;
        out.write_all(contents.as_bytes())?;
        out.flush()?;
        Ok("<stdout>".to_string())
    }
}

/// Record of one successful save.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SaveReceipt {
    pub filename: String,
    pub location: String,
    pub bytes: usize,
    /// SHA-1 of the saved contents, hex encoded
    pub sha1: String,
}

pub fn artifact_fingerprint(contents: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(contents.as_bytes());
    format!("{:x}", hasher.finalize())
}
