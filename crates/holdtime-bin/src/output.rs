use std::path::{Path, PathBuf};

use osr_model::REPLAY_EXTENSION;

/// Chart path for the `index`-th of `total` replays.
///
/// A single replay writes to `base` as given; several replays insert `-<n>`
/// (1-based) before the extension.
pub fn numbered_output(base: &Path, index: usize, total: usize) -> PathBuf {
    if total <= 1 {
        return base.to_path_buf();
    }
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{stem}-{}.{}", index + 1, ext.to_string_lossy()),
        None => format!("{stem}-{}", index + 1),
    };
    base.with_file_name(name)
}

/// Whether `path` carries the osu! replay extension (case-insensitive).
pub fn has_replay_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(REPLAY_EXTENSION))
}
