//! Boundary to the inference engine
//!
//! The engine does all of the embedding work (tokenisation, matrix lookups,
//! ranking). This crate only sees the narrow surface below: load a model,
//! send string queries, get JSON bytes back, release the model.
//!
//! # Thread safety
//!
//! Nothing here assumes the engine is reentrant. [`Model`](crate::Model) is
//! `Sync` only when the engine's resource type is, and the fastText binding
//! in `engine::native` is deliberately not `Sync`. Callers that need parallelism
//! should open one model per worker.

#[cfg(feature = "native")]
mod bindings;
#[cfg(feature = "native")]
pub mod native;

use std::path::Path;

use crate::error::Result;

/// Loads models into an engine
pub trait Engine {
    type Resource: EngineResource;

    /// Load the model file at `path`.
    ///
    /// Content validation is the engine's job; any failure must be reported,
    /// never papered over with a half-initialised resource.
    fn load(&self, path: &Path) -> Result<Self::Resource>;
}

/// One loaded model inside the engine.
///
/// Query methods return the raw response bytes, unvalidated; decoding
/// (UTF-8 included) belongs to [`ResponseDecoder`](crate::ResponseDecoder).
/// Any buffer the engine allocated for them is freed before the method
/// returns, on every path.
/// Dropping the resource releases it in the engine.
pub trait EngineResource {
    /// Up to `k` nearest words to `query`. `k` is passed through unchecked.
    fn neighbor(&self, query: &str, k: i32) -> Result<Vec<u8>>;

    /// Label predictions for `query`
    fn predict(&self, query: &str) -> Result<Vec<u8>>;

    /// Up to `k` completions of "`a` is to `b` as `c` is to ?"
    fn analogy(&self, a: &str, b: &str, c: &str, k: i32) -> Result<Vec<u8>>;

    /// Embedding coordinates of `query`
    fn wordvec(&self, query: &str) -> Result<Vec<u8>>;

    /// Engine-computed cosine similarity between `a` and `b`
    fn vec_similarity(&self, a: &str, b: &str) -> Result<f32>;

    /// Release the model. Consuming `self` makes a second release impossible.
    fn release(self)
    where
        Self: Sized,
    {
        drop(self);
    }
}
