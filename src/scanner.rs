use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::error::{FixtureError, Result};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A group of files: a root directory and a glob resolved against it.
#[derive(Debug, Clone)]
pub struct Selection {
    pub root: PathBuf,
    pub pattern: Pattern,
}

impl Selection {
    /// `.` components and repeated separators are dropped from `pattern`
    /// before it is compiled, so `./case_*.txt` selects like `case_*.txt`.
    pub fn new(root: impl AsRef<Path>, pattern: &str) -> Result<Self> {
        Ok(Self {
            root: root.as_ref().to_path_buf(),
            pattern: Pattern::new(&clean_pattern(pattern))?,
        })
    }

    // "**" may cross any number of directories, otherwise each separator is one level.
    fn max_depth(&self) -> usize {
        let pattern = self.pattern.as_str();
        if pattern.contains("**") {
            usize::MAX
        } else {
            pattern.split('/').filter(|part| !part.is_empty()).count()
        }
    }
}

fn clean_pattern(pattern: &str) -> String {
    pattern
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

fn is_selected(rel: &Path, pattern: &Pattern) -> bool {
    let s_rel = rel.to_string_lossy().replace('\\', "/");
    pattern.matches_with(&s_rel, MATCH_OPTIONS)
}

/// Files under the selection root matching its pattern, in sorted order.
///
/// An unreadable or missing root simply matches nothing, which is reported
/// as `NotFound` like any other empty selection.
pub fn select_files(selection: &Selection) -> Result<Vec<PathBuf>> {
    let root = &selection.root;
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(selection.max_depth())
        .follow_links(false)
        .sort_by_file_name();

    let mut files = Vec::new();
    for entry in walker.into_iter().flatten() {
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(rel) = path.strip_prefix(root) {
            if is_selected(rel, &selection.pattern) {
                files.push(path.to_path_buf());
            }
        }
    }

    if files.is_empty() {
        return Err(FixtureError::NotFound {
            path: root.join(selection.pattern.as_str()),
        });
    }
    files.sort();
    Ok(files)
}
