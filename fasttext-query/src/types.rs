//! Result records returned by model queries
//!
//! These are plain values: they carry no link back to the model that
//! produced them and can outlive it.

use serde::{Deserialize, Deserializer, Serialize};

/// Nearest-word result of a `neighbor` query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    /// Position of the word in the engine's ranked answer
    pub index: usize,
    /// The word itself
    pub name: String,
    /// Similarity score; `NaN` when the engine emitted a non-finite value
    #[serde(deserialize_with = "nullable_f32")]
    pub probability: f32,
}

/// Label classification result of a `predict` query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Label as stored in the model, including any `__label__` prefix
    pub label: String,
    /// Confidence, already exponentiated by the engine
    #[serde(deserialize_with = "nullable_f32")]
    pub probability: f32,
}

/// Candidate completion of an analogy query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analog {
    pub index: usize,
    pub name: String,
    #[serde(deserialize_with = "nullable_f32")]
    pub probability: f32,
}

/// One coordinate of an embedding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    /// Dimension this coordinate belongs to, when the engine reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Coordinate value. The fastText shim names this field `probability`.
    #[serde(alias = "probability", deserialize_with = "nullable_f32")]
    pub element: f32,
}

/// A complete embedding in dimension order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vectors(Vec<Vector>);

impl Vectors {
    pub fn new(coordinates: Vec<Vector>) -> Self {
        Self(coordinates)
    }

    /// Build an embedding from bare coordinate values
    pub fn from_values(values: &[f32]) -> Self {
        Self(
            values
                .iter()
                .map(|&element| Vector {
                    index: None,
                    element,
                })
                .collect(),
        )
    }

    /// Coordinate values in dimension order
    pub fn values(&self) -> Vec<f32> {
        self.0.iter().map(|v| v.element).collect()
    }

    /// Number of dimensions
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Vector] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Vector> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Vector> {
        self.0
    }
}

impl From<Vec<Vector>> for Vectors {
    fn from(coordinates: Vec<Vector>) -> Self {
        Self(coordinates)
    }
}

impl IntoIterator for Vectors {
    type Item = Vector;
    type IntoIter = std::vec::IntoIter<Vector>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Vectors {
    type Item = &'a Vector;
    type IntoIter = std::slice::Iter<'a, Vector>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// JSON cannot carry NaN or infinities; the engine writes them as `null`.
///
/// Every `null` reads back as NaN, so the sign and kind of a non-finite value
/// are lost. Serialising a record and decoding it again is exact only for
/// finite values and NaN: `±inf` also serialises to `null` and returns as NaN.
fn nullable_f32<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(f32::NAN))
}
