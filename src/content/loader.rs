//! Loader for RON content files at startup.

use ron::Options;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::movement::MovementTuning;

/// Error type for content loading failures.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("Failed to load {file}: IO error: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load {file}: Parse error: {message}")]
    Parse { file: String, message: String },
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load a single RON struct from disk.
pub fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        file: file_name.clone(),
        source,
    })?;
    parse_single(&file_name, &contents)
}

fn parse_single<T>(file_name: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError::Parse {
            file: file_name.to_string(),
            message: e.to_string(),
        })
}

/// Parse movement tuning from RON text. Missing fields keep their defaults.
pub fn parse_tuning(contents: &str) -> Result<MovementTuning, ContentLoadError> {
    parse_single("<inline>", contents)
}

/// Load movement tuning from `movement.ron` under `base_path`.
pub fn load_movement_tuning(base_path: &Path) -> Result<MovementTuning, ContentLoadError> {
    load_single_file(&base_path.join("movement.ron"))
}
