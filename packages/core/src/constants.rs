use std::env;
use std::path::PathBuf;

/// Minimum age, in whole years, required to register an account
pub const MIN_USER_AGE: u32 = 15;

/// Maximum length of a project name or issue title
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of a project description
pub const MAX_PROJECT_DESCRIPTION_LENGTH: usize = 1024;

/// Get the path to the Tracker directory (~/.tracker)
pub fn tracker_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(".tracker")
    } else {
        dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".tracker")
    }
}

/// Get the path to the default SQLite database (~/.tracker/tracker.db)
pub fn database_file() -> PathBuf {
    tracker_dir().join("tracker.db")
}
