//! fastText Query Client
//!
//! Typed queries against a pre-trained fastText word-embedding model. The
//! embedding work itself happens in the fastText engine behind a narrow C
//! boundary; this crate owns the model lifetime, decodes the engine's JSON
//! answers into typed records, and supplies the vector math and ranking
//! used on top of them.
//!
//! ## Features
//!
//! - **Owned model handle** - one engine resource per [`Model`], released exactly once
//! - **Typed results** - [`Neighbor`], [`Prediction`], [`Analog`], [`Vectors`]
//! - **Strict decoding** - malformed responses are errors, never partial results
//! - **NaN-aware ranking** - stable descending sort with NaN last
//!
//! ## Cargo features
//!
//! - `native`: link `libfasttext_cbits` and enable [`engine::native::NativeEngine`]
//!
//! ## Example
//!
//! ```ignore
//! use fasttext_query::{engine::native::NativeEngine, find_model_path, Model};
//!
//! let path = find_model_path(None)?;
//! let mut model = Model::open(&NativeEngine, &path)?;
//!
//! let neighbors = model.neighbor("king", 3)?;
//! let analogs = model.analogy("berlin", "france", "germany", 5)?;
//! let sim = model.cosine_similarity("king", "queen")?;
//!
//! model.close()?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod math;
pub mod model;
pub mod ordering;
pub mod protocol;
pub mod types;

// Re-exports for convenience
pub use config::{find_model_path, ModelConfig};
pub use engine::{Engine, EngineResource};
pub use error::{ErrorKind, FastTextError, Result};
pub use model::Model;
pub use ordering::{sort_by_score, sort_neighbors, Scored};
pub use protocol::{QueryKind, ResponseDecoder};
pub use types::{Analog, Neighbor, Prediction, Vector, Vectors};
