use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{SupplementOptions, TailPolicy};
use crate::error::{FixtureError, Result};
use crate::features::{write_lines, FeatureSet};
use crate::scanner::{select_files, Selection};

/// Returns the lines of sorted `target` that are not in sorted `baseline`.
///
/// Every baseline line must be found in `target`; the first one that is not
/// is returned as the error. `path` only labels that error.
pub fn subtract(
    baseline: &[String],
    target: &[String],
    tail: TailPolicy,
    path: &Path,
) -> Result<Vec<String>> {
    let missing = |line: &String| FixtureError::MissingBaselineFeature {
        line: line.clone(),
        path: path.to_path_buf(),
    };

    let mut supplement = Vec::new();
    let mut remaining = target.iter();
    for base in baseline {
        loop {
            let Some(line) = remaining.next() else {
                return Err(missing(base));
            };
            match base.cmp(line) {
                Ordering::Equal => break,
                Ordering::Greater => supplement.push(line.clone()),
                Ordering::Less => return Err(missing(base)),
            }
        }
    }
    if tail == TailPolicy::Keep {
        supplement.extend(remaining.cloned());
    }
    Ok(supplement)
}

/// Rewrites every file selected by `pattern` under `root` without the lines
/// of `root/baseline`.
///
/// Returns each rewritten file with its new line count. Processing stops at
/// the first file that misses a baseline line; files rewritten before it
/// keep their new content.
///
/// With the default `TailPolicy::Keep`, lines sorted after the last baseline
/// line stay in the rewritten file, so supplement and baseline together give
/// back the original lines. Pass `TailPolicy::Drop` to discard them and keep
/// only the lines met while walking the baseline.
pub fn create_supplements(
    root: &Path,
    pattern: &str,
    baseline: &str,
    opts: &SupplementOptions,
) -> Result<Vec<(PathBuf, usize)>> {
    let selection = Selection::new(root, pattern)?;
    let files = select_files(&selection)?;
    let baseline = FeatureSet::load(&root.join(baseline))?;

    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let target = FeatureSet::load(&file)?;
        let supplement = subtract(baseline.lines(), target.lines(), opts.tail, &file)?;
        write_lines(&file, &supplement)?;
        info!("{file:?} has {} line(s)", supplement.len());
        written.push((file, supplement.len()));
    }
    Ok(written)
}
