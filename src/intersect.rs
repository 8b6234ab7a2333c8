use std::cmp::Ordering;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{FixtureError, Result};
use crate::features::FeatureSet;
use crate::scanner::{select_files, Selection};

/// Shrinks the sorted `common` lines to those also present in sorted `other`.
///
/// Lines of `common` that `other` skips are removed in place. Once `other`
/// runs out, everything not yet confirmed is truncated.
pub fn fold_common(common: &mut Vec<String>, other: &[String]) {
    let (mut i, mut j) = (0, 0);
    while i < common.len() && j < other.len() {
        match common[i].cmp(&other[j]) {
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
            Ordering::Less => {
                common.remove(i);
            }
            Ordering::Greater => j += 1,
        }
    }
    common.truncate(i);
}

/// Writes to `root/common` the lines found in every file selected by `pattern`.
///
/// Fails with `EmptyIntersection` as soon as a file has nothing in common
/// with the files before it; the output file is not written in that case.
pub fn extract_common(root: &Path, pattern: &str, common: &str) -> Result<FeatureSet> {
    let selection = Selection::new(root, pattern)?;
    let files = select_files(&selection)?;

    let (first, rest) = files.split_first().ok_or_else(|| FixtureError::NotFound {
        path: root.join(pattern),
    })?;
    let mut intersection = FeatureSet::load(first)?.into_lines();
    for file in rest {
        let lines = FeatureSet::load(file)?;
        fold_common(&mut intersection, lines.lines());
        if intersection.is_empty() {
            warn!("intersection is empty as {file:?} has nothing in common with other files");
            return Err(FixtureError::EmptyIntersection { path: file.clone() });
        }
    }

    let output = root.join(common);
    let intersection = FeatureSet::try_from(intersection)
        .map_err(|_| FixtureError::EmptyIntersection { path: first.clone() })?;
    intersection.persist(&output)?;
    info!(
        "intersection has {} line(s) written to {output:?}",
        intersection.len()
    );
    Ok(intersection)
}
