//! Loading template files into memory before scanning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::scanner::Scanner;

/// Options for [`Source::load`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Surround the file body with a `define`/`end` pair named after
    /// the file.
    pub wrap_fragment: bool,
}

impl LoadOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wrap_fragment: false,
        }
    }

    #[must_use]
    pub const fn with_wrap_fragment(mut self, wrap: bool) -> Self {
        self.wrap_fragment = wrap;
        self
    }
}

/// A source file could not be read.
#[derive(Debug, thiserror::Error)]
#[error("{}: {source}", path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// One fully materialized source unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub text: String,
}

impl Source {
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Read `path` into memory, deriving the template name from the
    /// file name.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when the file cannot be read.
    pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let body = fs::read_to_string(path).map_err(|source| LoadError {
            path: path.to_path_buf(),
            source,
        })?;
        let name = template_name(&path.to_string_lossy());
        log::debug!(
            "loaded {} as {name:?} ({} bytes, wrap={})",
            path.display(),
            body.len(),
            options.wrap_fragment
        );
        let text = if options.wrap_fragment {
            wrap_fragment(&name, &body)
        } else {
            body
        };
        Ok(Self { name, text })
    }

    /// Scanner over this source's text.
    #[must_use]
    pub fn scanner(&self) -> Scanner<'_> {
        Scanner::new(&self.text)
    }
}

/// Template name for a file path: the base name without its last
/// extension.
#[must_use]
pub fn template_name(path: &str) -> String {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };
    let stem = stem.strip_prefix("./").unwrap_or(stem);
    let stem = stem.strip_prefix(".\\").unwrap_or(stem);
    stem.to_string()
}

/// Surround `body` with `{{ define "<name>" }}` and `{{ end }}`.
#[must_use]
pub fn wrap_fragment(name: &str, body: &str) -> String {
    format!("{{{{ define \"{name}\" }}}}\n{body}\n{{{{ end }}}}")
}
