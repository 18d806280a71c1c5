//! Environment loading

use std::path::{Path, PathBuf};

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Variables already set in the environment
/// 2. Current directory .env
/// 3. ~/.pollcord/.env
///
/// dotenvy never overwrites a variable that is already set, so loading the
/// current directory first gives it precedence over the home file.
///
/// Runs before the tracing subscriber exists (so `RUST_LOG` from a .env file
/// takes effect) and therefore returns the files it read instead of logging.
pub fn load_dotenv() -> Vec<PathBuf> {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(path);
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if load_file(&env_file) {
            loaded_from.push(env_file);
        }
    }

    loaded_from
}

/// Load a single .env file if present. Unreadable files are skipped.
fn load_file(path: &Path) -> bool {
    path.exists() && dotenvy::from_path(path).is_ok()
}

/// The pollcord config directory (~/.pollcord)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pollcord"))
}
