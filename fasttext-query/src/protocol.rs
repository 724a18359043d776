//! Response decoding for engine queries
//!
//! Every query answers with a JSON array of flat records, handed over as the
//! raw bytes of the engine's buffer. Decoding is all or nothing: a response
//! either yields every record or a [`FastTextError::Decode`] naming the query
//! and quoting the start of the offending text.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::error::{FastTextError, Result};
use crate::types::{Analog, Neighbor, Prediction, Vector, Vectors};

/// Which engine entry point produced a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Neighbor,
    Predict,
    Analogy,
    Wordvec,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neighbor => "neighbor",
            Self::Predict => "predict",
            Self::Analogy => "analogy",
            Self::Wordvec => "wordvec",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decodes engine responses into typed records
#[derive(Debug, Clone, Copy)]
pub struct ResponseDecoder {
    excerpt_len: usize,
}

impl ResponseDecoder {
    /// `excerpt_len` bounds how many characters of a bad response are kept
    /// in the error.
    pub fn new(excerpt_len: usize) -> Self {
        Self { excerpt_len }
    }

    pub fn neighbors(&self, query: &str, text: &[u8]) -> Result<Vec<Neighbor>> {
        self.records(QueryKind::Neighbor, query, text)
    }

    pub fn predictions(&self, query: &str, text: &[u8]) -> Result<Vec<Prediction>> {
        self.records(QueryKind::Predict, query, text)
    }

    pub fn analogs(&self, query: &str, text: &[u8]) -> Result<Vec<Analog>> {
        self.records(QueryKind::Analogy, query, text)
    }

    /// Decode an embedding. Coordinates that carry an `index` must sit at
    /// that position, otherwise dimensions would silently misalign.
    pub fn vectors(&self, query: &str, text: &[u8]) -> Result<Vectors> {
        let coordinates: Vec<Vector> = self.records(QueryKind::Wordvec, query, text)?;

        if let Some((position, index)) = coordinates
            .iter()
            .enumerate()
            .find_map(|(pos, v)| v.index.filter(|&i| i != pos).map(|i| (pos, i)))
        {
            return Err(self.error(
                QueryKind::Wordvec,
                query,
                format!("coordinate at position {} reports index {}", position, index),
                text,
            ));
        }

        Ok(Vectors::new(coordinates))
    }

    /// Decode a JSON array of `T`. The response must be UTF-8.
    pub fn records<T: DeserializeOwned>(
        &self,
        kind: QueryKind,
        query: &str,
        text: &[u8],
    ) -> Result<Vec<T>> {
        let json = std::str::from_utf8(text).map_err(|e| {
            log::warn!("Non UTF-8 {} response for {}: {}", kind, query, e);
            self.error(kind, query, format!("response is not UTF-8: {}", e), text)
        })?;
        serde_json::from_str::<Vec<T>>(json).map_err(|e| {
            log::warn!("Malformed {} response for {}: {}", kind, query, e);
            self.error(kind, query, e.to_string(), text)
        })
    }

    fn error(&self, kind: QueryKind, query: &str, reason: String, text: &[u8]) -> FastTextError {
        FastTextError::Decode {
            kind,
            query: query.to_string(),
            reason,
            excerpt: excerpt(&String::from_utf8_lossy(text), self.excerpt_len),
        }
    }
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_DECODE_EXCERPT_LEN)
    }
}

/// Render query arguments for logs and error messages
pub fn describe_args(words: &[&str], k: Option<i32>) -> String {
    let mut parts: Vec<String> = words.iter().map(|w| format!("{:?}", w)).collect();
    if let Some(k) = k {
        parts.push(format!("k={}", k));
    }
    format!("({})", parts.join(", "))
}

fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
