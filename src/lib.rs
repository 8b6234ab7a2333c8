//
// lib.rs
// RefDiff-rs
//
// Library entry that re-exports the feature-file set operations (common lines, supplements) and the byte-exact comparator used to check generated output against reference files.
//
// Thales Matheus Mendonça Santos - November 2025
//
// Public crate interface: re-export modules used by tests and harnesses.
pub mod compare;
pub mod config;
pub mod error;
pub mod features;
pub mod intersect;
pub mod scanner;
pub mod source;
pub mod supplement;
pub mod utils;

pub use compare::{compare, compare_buffer, compare_files, compare_stream};
pub use config::{CompareOptions, SupplementOptions, TailPolicy};
pub use error::{FixtureError, Result};
pub use features::FeatureSet;
pub use intersect::{extract_common, fold_common};
pub use scanner::{select_files, Selection};
pub use source::{BufferSource, ByteSource, FileSource, Next, StreamSource};
pub use supplement::{create_supplements, subtract};
pub use utils::{buffer_to_file, output_dir, reader_to_file, resolve_output_dir, string_to_file};
