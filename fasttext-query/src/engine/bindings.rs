//! Raw declarations for the fastText C shim (`cbits.h`).
//!
//! # Safety
//!
//! All functions are unsafe. Use [`NativeEngine`](super::native::NativeEngine)
//! for owned, RAII-managed access.
//!
//! Every `char *` returned by a query is allocated with `strdup` and MUST be
//! released with [`free`]. Query arguments are only read; the `*mut` in the
//! signatures mirrors the C header.
//!
//! # Shim requirements
//!
//! The stock `cbits.h` does not declare [`VecSimilarity`]. The linked
//! `libfasttext_cbits` must export it in addition to the stock entry points:
//!
//! ```c
//! float VecSimilarity(FastTextHandle handle, char *a, char *b);
//! ```
//!
//! It returns the cosine similarity of the two word vectors, computed by
//! fastText. Without it the crate fails to link with an undefined symbol.

#![allow(non_snake_case)]

use std::os::raw::{c_char, c_float, c_void};

/// Opaque `fasttext::FastText *`
pub type FastTextHandle = *mut c_void;

#[link(name = "fasttext_cbits")]
extern "C" {
    /// Allocate a model and load `path` into it.
    ///
    /// MUST be released with `DeleteHandle`. Returns null if allocation fails.
    pub fn NewHandle(path: *const c_char) -> FastTextHandle;

    /// Delete a model. Null is ignored.
    pub fn DeleteHandle(handle: FastTextHandle);

    /// JSON array of `{index, probability, label}`
    pub fn Predict(handle: FastTextHandle, query: *mut c_char) -> *mut c_char;

    /// JSON array of `{index, probability, name}`
    pub fn Analogy(
        handle: FastTextHandle,
        a: *mut c_char,
        b: *mut c_char,
        c: *mut c_char,
        k: i32,
    ) -> *mut c_char;

    /// JSON array of `{probability}`, one per dimension
    pub fn Wordvec(handle: FastTextHandle, query: *mut c_char) -> *mut c_char;

    /// JSON array of `{index, probability, name}`
    pub fn Neighbor(handle: FastTextHandle, query: *mut c_char, k: i32) -> *mut c_char;

    /// Cosine similarity of the two word vectors. Not in the stock header,
    /// see the module docs.
    pub fn VecSimilarity(handle: FastTextHandle, a: *mut c_char, b: *mut c_char) -> c_float;
}

extern "C" {
    /// C runtime `free`, matching the shim's `strdup`.
    pub fn free(ptr: *mut c_void);
}

