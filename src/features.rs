use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{FixtureError, Result};

/// The sorted lines of a feature file. Never empty once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    lines: Vec<String>,
}

impl FeatureSet {
    /// Reads `path`, splits it on `\n` and sorts the lines.
    ///
    /// A trailing blank line is dropped as an editor artifact. Carriage
    /// returns are kept as part of the line.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| FixtureError::io(path, e))?;
        let lines = split_features(&text);
        if lines.is_empty() {
            warn!("{path:?} is empty");
            return Err(FixtureError::EmptyInput {
                path: path.to_path_buf(),
            });
        }
        debug!("{path:?} has {} lines", lines.len());
        Ok(Self::from_sorted(lines))
    }

    fn from_sorted(mut lines: Vec<String>) -> Self {
        lines.sort();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        write_lines(path, &self.lines)
    }
}

fn split_features(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split('\n').map(String::from).collect();
    if lines.last().is_some_and(|last| last.trim().is_empty()) {
        lines.pop();
    }
    lines
}

/// Writes lines joined by `\n`, without a trailing newline.
pub(crate) fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    fs::write(path, lines.join("\n")).map_err(|e| FixtureError::io(path, e))
}

impl TryFrom<Vec<String>> for FeatureSet {
    type Error = Vec<String>;

    /// Builds a set from in-memory lines, handing them back if there are none.
    fn try_from(lines: Vec<String>) -> std::result::Result<Self, Self::Error> {
        if lines.is_empty() {
            Err(lines)
        } else {
            Ok(Self::from_sorted(lines))
        }
    }
}
