//! Model handle
//!
//! A [`Model`] owns exactly one engine resource from `open` until `close`
//! (or drop). Every query goes through it.
//!
//! All calls block for the duration of the engine call. There is no
//! internal threading, batching or cancellation; queries issued one after
//! another on the same model reach the engine in that order.

use std::fmt;
use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::config::ModelConfig;
use crate::engine::{Engine, EngineResource};
use crate::error::{FastTextError, Result};
use crate::math;
use crate::protocol::{describe_args, ResponseDecoder};
use crate::types::{Analog, Neighbor, Prediction, Vectors};

/// A loaded embedding model.
///
/// # Example
///
/// ```ignore
/// use fasttext_query::{Model, engine::native::NativeEngine, ordering::sort_neighbors};
///
/// let mut model = Model::open(&NativeEngine, "wiki.en.bin")?;
/// let mut neighbors = model.neighbor("king", 10)?;
/// sort_neighbors(&mut neighbors);
/// let sim = model.cosine_similarity("Alice", "Queen")?;
/// model.close()?;
/// ```
pub struct Model<E: Engine> {
    path: PathBuf,
    resource: Option<E::Resource>,
    config: ModelConfig,
    decoder: ResponseDecoder,
    /// Unbounded; emptied by `clear_cache` and `close`
    vector_cache: DashMap<String, Vec<f32>>,
}

impl<E: Engine> Model<E> {
    /// Load the model at `path` with [`ModelConfig::default`]
    pub fn open(engine: &E, path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(engine, path, ModelConfig::default())
    }

    /// Load the model at `path`.
    ///
    /// Paths that are not regular files (missing, directories) are rejected
    /// here; everything else about the file is up to the engine.
    pub fn open_with_config(
        engine: &E,
        path: impl AsRef<Path>,
        config: ModelConfig,
    ) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(FastTextError::ModelNotFound(path.to_path_buf()));
        }

        let resource = engine.load(path)?;
        log::info!("Model opened: {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            resource: Some(resource),
            decoder: ResponseDecoder::new(config.decode_excerpt_len),
            config,
            vector_cache: DashMap::new(),
        })
    }

    /// Release the engine resource.
    ///
    /// Closing an already closed model does nothing. Later queries fail with
    /// [`FastTextError::HandleClosed`].
    pub fn close(&mut self) -> Result<()> {
        if let Some(resource) = self.resource.take() {
            self.vector_cache.clear();
            resource.release();
            log::info!("Model closed: {}", self.path.display());
        }
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.resource.is_none()
    }

    /// Path the model was loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    fn resource(&self) -> Result<&E::Resource> {
        self.resource
            .as_ref()
            .ok_or_else(|| FastTextError::HandleClosed(self.path.clone()))
    }

    /// The `k` nearest words to `query`, in engine order.
    ///
    /// `k` is handed to the engine as is. Use
    /// [`sort_neighbors`](crate::ordering::sort_neighbors) for a
    /// probability ranking.
    pub fn neighbor(&self, query: &str, k: i32) -> Result<Vec<Neighbor>> {
        let resource = self.resource()?;
        let args = describe_args(&[query], Some(k));
        log::debug!("neighbor{}", args);

        let text = resource.neighbor(query, k)?;
        self.decoder.neighbors(&args, &text)
    }

    /// Label predictions for `query`, in engine order
    pub fn predict(&self, query: &str) -> Result<Vec<Prediction>> {
        let resource = self.resource()?;
        let args = describe_args(&[query], None);
        log::debug!("predict{}", args);

        let text = resource.predict(query)?;
        self.decoder.predictions(&args, &text)
    }

    /// The `k` best answers to "`a` is to `b` as `c` is to ?".
    ///
    /// Argument order matters: the engine searches around `a - c + b`.
    pub fn analogy(&self, a: &str, b: &str, c: &str, k: i32) -> Result<Vec<Analog>> {
        let resource = self.resource()?;
        let args = describe_args(&[a, b, c], Some(k));
        log::debug!("analogy{}", args);

        let text = resource.analogy(a, b, c, k)?;
        self.decoder.analogs(&args, &text)
    }

    /// Embedding of `query` in dimension order. Always asks the engine.
    pub fn wordvec(&self, query: &str) -> Result<Vectors> {
        let resource = self.resource()?;
        let args = describe_args(&[query], None);
        log::debug!("wordvec{}", args);

        let text = resource.wordvec(query)?;
        self.decoder.vectors(&args, &text)
    }

    /// Cosine similarity of two words, computed from their embeddings.
    ///
    /// Fails with `DegenerateInput` if either word maps to the zero vector.
    pub fn cosine_similarity(&self, a: &str, b: &str) -> Result<f32> {
        self.resource()?;
        let va = self.embedding(a)?;
        let vb = self.embedding(b)?;
        math::cosine_similarity(&va, &vb)
    }

    /// Cosine similarity as computed inside the engine.
    ///
    /// Same meaning as [`cosine_similarity`](Self::cosine_similarity); the
    /// low bits may differ.
    pub fn engine_similarity(&self, a: &str, b: &str) -> Result<f32> {
        let resource = self.resource()?;
        log::debug!("similarity{}", describe_args(&[a, b], None));
        resource.vec_similarity(a, b)
    }

    /// Cosine similarity through the path chosen by
    /// [`ModelConfig::prefer_engine_similarity`]
    pub fn similarity(&self, a: &str, b: &str) -> Result<f32> {
        if self.config.prefer_engine_similarity {
            self.engine_similarity(a, b)
        } else {
            self.cosine_similarity(a, b)
        }
    }

    fn embedding(&self, word: &str) -> Result<Vec<f32>> {
        if self.config.cache_vectors {
            if let Some(cached) = self.vector_cache.get(word) {
                return Ok(cached.clone());
            }
        }

        let values = self.wordvec(word)?.values();
        if self.config.cache_vectors {
            self.vector_cache.insert(word.to_string(), values.clone());
        }
        Ok(values)
    }

    /// Number of cached embeddings
    pub fn cache_size(&self) -> usize {
        self.vector_cache.len()
    }

    pub fn clear_cache(&self) {
        self.vector_cache.clear();
    }
}

impl<E: Engine> Drop for Model<E> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("Failed to close model {}: {}", self.path.display(), e);
        }
    }
}

impl<E: Engine> fmt::Debug for Model<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("path", &self.path)
            .field("closed", &self.is_closed())
            .field("config", &self.config)
            .field("cached_vectors", &self.vector_cache.len())
            .finish()
    }
}
