//! In-memory engine for integration tests.
//!
//! Emits the same JSON shapes as the fastText C shim over a tiny fixed
//! vocabulary, and records releases and calls so lifecycle guarantees can be
//! asserted.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use fasttext_query::{Engine, EngineResource, FastTextError, Result};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

/// Dimensions: royalty, male, female, other
pub const VOCAB: &[(&str, [f32; 4])] = &[
    ("king", [1.0, 1.0, 0.0, 0.1]),
    ("queen", [1.0, 0.0, 1.0, 0.1]),
    ("man", [0.0, 1.0, 0.0, 0.2]),
    ("woman", [0.0, 0.0, 1.0, 0.2]),
    ("prince", [0.8, 0.9, 0.0, 0.3]),
    ("princess", [0.8, 0.0, 0.9, 0.3]),
    ("apple", [0.0, 0.0, 0.0, 1.0]),
];

pub const DIM: usize = 4;

/// How the fake engine shapes its responses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResponseMode {
    /// Well-formed, ranked
    Normal,
    /// Neighbors come back reversed, with the best score replaced by null
    UnrankedWithNan,
    /// Every text response is cut in half
    Truncated,
    /// Records with the wrong field names
    WrongSchema,
    /// Every response starts with a byte that is not valid UTF-8
    NotUtf8,
}

#[derive(Debug, Clone)]
pub struct MemoryEngine {
    pub mode: ResponseMode,
    pub fail_load: bool,
    pub releases: Arc<AtomicUsize>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::with_mode(ResponseMode::Normal)
    }

    pub fn with_mode(mode: ResponseMode) -> Self {
        Self {
            mode,
            fail_load: false,
            releases: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_load() -> Self {
        Self {
            fail_load: true,
            ..Self::new()
        }
    }

    pub fn release_count(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Engine for MemoryEngine {
    type Resource = MemoryModel;

    fn load(&self, path: &Path) -> Result<MemoryModel> {
        if self.fail_load {
            return Err(FastTextError::model_load(path, "not a fastText model"));
        }
        Ok(MemoryModel {
            mode: self.mode,
            releases: Arc::clone(&self.releases),
            calls: Arc::clone(&self.calls),
        })
    }
}

pub struct MemoryModel {
    mode: ResponseMode,
    releases: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MemoryModel {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn render(&self, records: Value) -> Vec<u8> {
        let mut bytes = records.to_string().into_bytes();
        match self.mode {
            ResponseMode::Truncated => bytes.truncate(bytes.len() / 2),
            ResponseMode::NotUtf8 => bytes.insert(0, 0xff),
            _ => {}
        }
        bytes
    }

    /// Rank the vocabulary against `target`, skipping `exclude`
    fn rank(&self, target: &[f32], exclude: &[&str], k: i32) -> Vec<(f32, &'static str)> {
        if k <= 0 {
            return Vec::new();
        }
        let mut scored: Vec<(f32, &'static str)> = VOCAB
            .iter()
            .filter(|(word, _)| !exclude.contains(word))
            .map(|(word, v)| (cosine(target, v), *word))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap());
        scored.truncate(k as usize);
        scored
    }

    fn ranked_records(&self, mut ranked: Vec<(f32, &'static str)>) -> Value {
        if self.mode == ResponseMode::UnrankedWithNan && !ranked.is_empty() {
            ranked[0].0 = f32::NAN;
            ranked.reverse();
        }
        let records: Vec<Value> = ranked
            .iter()
            .enumerate()
            .map(|(i, (p, name))| match self.mode {
                ResponseMode::WrongSchema => json!({"rank": i, "score": p, "word": name}),
                _ => json!({"index": i, "probability": p, "name": name}),
            })
            .collect();
        Value::Array(records)
    }
}

impl EngineResource for MemoryModel {
    fn neighbor(&self, query: &str, k: i32) -> Result<Vec<u8>> {
        self.record(format!("neighbor:{}", query));
        let ranked = self.rank(&lookup(query), &[query], k);
        Ok(self.render(self.ranked_records(ranked)))
    }

    fn predict(&self, query: &str) -> Result<Vec<u8>> {
        self.record(format!("predict:{}", query));
        let records = match self.mode {
            ResponseMode::WrongSchema => json!([{"tag": "__label__en", "p": 0.9}]),
            _ => json!([
                {"index": 0, "probability": 0.93, "label": "__label__en"},
                {"index": 1, "probability": 0.05, "label": "__label__de"},
            ]),
        };
        Ok(self.render(records))
    }

    fn analogy(&self, a: &str, b: &str, c: &str, k: i32) -> Result<Vec<u8>> {
        self.record(format!("analogy:{}:{}:{}", a, b, c));
        let (va, vb, vc) = (lookup(a), lookup(b), lookup(c));
        let target: Vec<f32> = (0..DIM).map(|i| va[i] - vc[i] + vb[i]).collect();
        let ranked = self.rank(&target, &[a, b, c], k);
        Ok(self.render(self.ranked_records(ranked)))
    }

    fn wordvec(&self, query: &str) -> Result<Vec<u8>> {
        self.record(format!("wordvec:{}", query));
        let records: Vec<Value> = lookup(query)
            .iter()
            .map(|x| match self.mode {
                ResponseMode::WrongSchema => json!({"value": x}),
                _ => json!({"probability": x}),
            })
            .collect();
        Ok(self.render(Value::Array(records)))
    }

    fn vec_similarity(&self, a: &str, b: &str) -> Result<f32> {
        self.record(format!("similarity:{}:{}", a, b));
        Ok(cosine(&lookup(a), &lookup(b)))
    }
}

impl Drop for MemoryModel {
    fn drop(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

/// Unknown words map to the zero vector
pub fn lookup(word: &str) -> Vec<f32> {
    VOCAB
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, v)| v.to_vec())
        .unwrap_or_else(|| vec![0.0; DIM])
}

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}

/// An existing file to hand to `Model::open`
pub fn model_file() -> NamedTempFile {
    NamedTempFile::new().expect("create temp model file")
}
