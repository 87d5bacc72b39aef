//! Where Lingo stores its own data (config and the default word database).

use std::path::PathBuf;

/// File name of the word database when no path is configured.
pub const DEFAULT_DB_FILENAME: &str = "language_bot.db";

/// Returns the directory where Lingo stores config and the word database.
/// On Linux: `~/.local/share/lingo/`.
/// Creates the directory if it doesn't exist; returns `None` if we can't determine the path.
pub fn app_data_dir() -> Option<PathBuf> {
    let dir = directories::ProjectDirs::from("app", "Lingo", "Lingo")?
        .data_local_dir()
        .to_path_buf();
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Default location of the word database inside the app data directory.
pub fn default_db_path() -> Option<PathBuf> {
    app_data_dir().map(|dir| dir.join(DEFAULT_DB_FILENAME))
}
