//! Output file naming

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Path the looped version of `input` is written to
///
/// The suffix goes between the file stem and the extension
/// (`loop.wav` → `loop.L.wav`). With `overwrite` the input path is reused.
pub fn output_path(input: &Path, suffix: &str, overwrite: bool) -> PathBuf {
    if overwrite {
        return input.to_path_buf();
    }

    let mut name = OsString::from(input.file_stem().unwrap_or_default());
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    input.with_file_name(name)
}
