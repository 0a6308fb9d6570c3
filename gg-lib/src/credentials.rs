use crate::error::GgError;
use crate::result::GgResult;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const TOKEN_PATH_ENV: &str = "GG_TOKEN";
pub const DEFAULT_TOKEN_FILE_NAME: &str = "gg.token";

/// Loads the API token from the file named by `GG_TOKEN`, or `$HOME/gg.token`.
pub fn load_token() -> GgResult<String> {
    read_token(&token_path(env::var_os(TOKEN_PATH_ENV), dirs::home_dir()))
}

/// An explicit path wins even when empty.
pub fn token_path(explicit: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    match explicit {
        Some(path) => PathBuf::from(path),
        None => home.unwrap_or_default().join(DEFAULT_TOKEN_FILE_NAME),
    }
}

/// The token is the first line of the file. Nothing else is validated.
pub fn read_token(path: &Path) -> GgResult<String> {
    let contents = fs::read_to_string(path).map_err(|e| GgError::Credential {
        path: path.to_path_buf(),
        source: e,
    })?;

    let token = contents.split('\n').next().unwrap_or_default();
    log::debug!("loaded token from {}", path.display());
    Ok(String::from(token))
}
