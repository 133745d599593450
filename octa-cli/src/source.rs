//! Source loading: the SOURCE argument is either a file path or inline code.

use anyhow::{Context, Result};
use octa_core::Language;
use std::fs;
use std::path::{Path, PathBuf};

/// Source text plus the file it came from, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub text: String,
    pub path: Option<PathBuf>,
}

impl Source {
    /// Reads `arg` as a file when it names an existing regular file,
    /// otherwise treats it as the source text itself
    pub fn load(arg: &str) -> Result<Self> {
        let path = Path::new(arg);
        if path.is_file() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read source file '{}'", path.display()))?;
            return Ok(Self {
                text,
                path: Some(path.to_path_buf()),
            });
        }

        Ok(Self {
            text: arg.to_string(),
            path: None,
        })
    }

    /// Language implied by the file extension; inline code is tape language
    pub fn language(&self) -> Language {
        self.path
            .as_deref()
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .map(Language::from_extension)
            .unwrap_or_default()
    }
}
