//! Client configuration and model path discovery

use std::path::{Path, PathBuf};

use crate::error::{FastTextError, Result};

/// Default number of response characters quoted in decode errors
pub const DEFAULT_DECODE_EXCERPT_LEN: usize = 256;

/// Per-model client configuration
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Memoise embeddings fetched for similarity (default: true).
    ///
    /// The cache is unbounded: it holds one embedding per distinct word
    /// compared and only shrinks on `Model::clear_cache` or `Model::close`.
    /// Disable it, or clear it periodically, when comparing an open-ended
    /// vocabulary.
    pub cache_vectors: bool,
    /// Route `Model::similarity` through the engine's native path (default: false)
    pub prefer_engine_similarity: bool,
    /// Characters of a malformed response kept in the error (default: 256)
    pub decode_excerpt_len: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            cache_vectors: true,
            prefer_engine_similarity: false,
            decode_excerpt_len: DEFAULT_DECODE_EXCERPT_LEN,
        }
    }
}

impl ModelConfig {
    /// Defaults overridden by environment variables:
    /// - `FASTTEXT_CACHE_VECTORS` (`true`/`false`, `1`/`0`)
    /// - `FASTTEXT_ENGINE_SIMILARITY` (`true`/`false`, `1`/`0`)
    /// - `FASTTEXT_DECODE_EXCERPT` (character count)
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(v) = env_flag("FASTTEXT_CACHE_VECTORS") {
            config.cache_vectors = v;
        }
        if let Some(v) = env_flag("FASTTEXT_ENGINE_SIMILARITY") {
            config.prefer_engine_similarity = v;
        }
        if let Ok(raw) = std::env::var("FASTTEXT_DECODE_EXCERPT") {
            match raw.trim().parse() {
                Ok(n) => config.decode_excerpt_len = n,
                Err(_) => log::warn!("Ignoring FASTTEXT_DECODE_EXCERPT={:?}", raw),
            }
        }
        config
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let raw = std::env::var(name).ok()?;
    let flag = parse_flag(&raw);
    if flag.is_none() {
        log::warn!("Ignoring {}={:?}: expected a boolean", name, raw);
    }
    flag
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Find the model file with priority:
/// 1. `explicit` argument
/// 2. `FASTTEXT_MODEL_PATH` environment variable
/// 3. User home directory (`~/.fasttext/models/model.bin`)
pub fn find_model_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            log::info!("Using model path: {}", path.display());
            return Ok(path.to_path_buf());
        }
        log::warn!("Model path given but not found: {}", path.display());
    }

    if let Ok(model_path) = std::env::var("FASTTEXT_MODEL_PATH") {
        let path = PathBuf::from(&model_path);
        if path.is_file() {
            log::info!("Using FASTTEXT_MODEL_PATH: {}", path.display());
            return Ok(path);
        }
        log::warn!("FASTTEXT_MODEL_PATH set but model not found: {}", model_path);
    }

    if let Some(path) = user_model_path() {
        if path.is_file() {
            log::info!("Using user model: {}", path.display());
            return Ok(path);
        }
    }

    Err(FastTextError::ModelNotFound(
        explicit.map(Path::to_path_buf).unwrap_or_else(|| {
            PathBuf::from(
                "none of: explicit path, FASTTEXT_MODEL_PATH, ~/.fasttext/models/model.bin",
            )
        }),
    ))
}

fn user_model_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    Some(
        PathBuf::from(home)
            .join(".fasttext")
            .join("models")
            .join("model.bin"),
    )
}
