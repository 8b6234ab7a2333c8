use std::path::{Path, PathBuf};

/// Where the comparator leaves the candidate's bytes when it diverges.
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub dump_dir: PathBuf,
    pub dump_prefix: String,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            dump_dir: PathBuf::from("."),
            dump_prefix: "got_".into(),
        }
    }
}

impl CompareOptions {
    pub fn with_dump_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dump_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_dump_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.dump_prefix = prefix.into();
        self
    }

    /// Diagnostic file for the candidate identified by `id`, usually the test name.
    pub fn dump_path(&self, id: &str) -> PathBuf {
        self.dump_dir.join(format!("{}{id}", self.dump_prefix))
    }
}

/// What happens to target lines sorted after the last baseline line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TailPolicy {
    /// Appended to the supplement, so supplement and baseline rebuild the target.
    #[default]
    Keep,
    /// Discarded. Only lines met while walking the baseline are kept.
    Drop,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SupplementOptions {
    pub tail: TailPolicy,
}
