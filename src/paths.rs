//! Path helpers for user-typed file names.

use std::path::{Path, PathBuf};

/// Replace a leading `~` with `$HOME`. Left untouched when HOME is unset.
pub fn expand_home(raw: &str) -> PathBuf {
    expand_home_with(raw, std::env::var("HOME").ok().as_deref())
}

fn expand_home_with(raw: &str, home: Option<&str>) -> PathBuf {
    match (raw.strip_prefix('~'), home) {
        (Some(rest), Some(home)) => PathBuf::from(format!("{}{}", home, rest)),
        _ => PathBuf::from(raw),
    }
}

/// `dir/prog.cpp` → `dir/commented_prog.cpp`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("commented_{}", name))
}

/// File name shown in the header block.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
