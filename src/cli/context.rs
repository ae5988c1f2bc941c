use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static KEYBOX_HOME: OnceLock<PathBuf> = OnceLock::new();

const DEFAULT_DIR_NAME: &str = ".keybox";

/// Initialize the global keybox home directory.
/// If `custom` is provided, uses that path; otherwise defaults to
/// `~/.keybox`, or `.keybox` when no home directory is known.
pub fn init(custom: Option<&Path>) {
    let dir = custom
        .map(Path::to_path_buf)
        .unwrap_or_else(default_home);
    let _ = KEYBOX_HOME.set(dir);
}

/// Get the current keybox home directory.
pub fn keybox_home() -> &'static Path {
    KEYBOX_HOME
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(DEFAULT_DIR_NAME))
}

fn default_home() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(DEFAULT_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR_NAME))
}
