//! fastText engine over the `cbits` C shim.
//!
//! Requires the `native` feature and `libfasttext_cbits` at link time
//! (see `build.rs`).
//!
//! # Safety
//!
//! The shim does not catch C++ exceptions. A file that exists but is not a
//! fastText model aborts the process inside `loadModel`; `Model::open` only
//! rules out paths that are not regular files before calling in.

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use std::path::{Path, PathBuf};
use std::ptr::NonNull;

use super::bindings;
use super::{Engine, EngineResource};
use crate::error::{FastTextError, Result};
use crate::protocol::{describe_args, QueryKind};

/// Engine backed by the linked fastText library
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeEngine;

impl Engine for NativeEngine {
    type Resource = NativeModel;

    fn load(&self, path: &Path) -> Result<NativeModel> {
        let path_str = path
            .to_str()
            .ok_or_else(|| FastTextError::invalid_path("Invalid UTF-8 in model path"))?;
        let cpath = CString::new(path_str)
            .map_err(|_| FastTextError::invalid_path("NUL byte in model path"))?;

        // SAFETY: cpath is a valid NUL-terminated string that outlives the call
        let handle = unsafe { bindings::NewHandle(cpath.as_ptr()) };

        NonNull::new(handle)
            .map(|ptr| NativeModel {
                ptr,
                path: path.to_path_buf(),
            })
            .ok_or_else(|| FastTextError::model_load(path, "NewHandle returned null pointer"))
    }
}

/// RAII owner of one `fasttext::FastText` instance.
///
/// Freed with `DeleteHandle` exactly once, on drop.
pub struct NativeModel {
    ptr: NonNull<c_void>,
    path: PathBuf,
}

// SAFETY: the FastText object has no thread affinity, so ownership may move
// between threads. It is NOT Sync: the shim makes no reentrancy promise.
unsafe impl Send for NativeModel {}

impl NativeModel {
    fn raw(&self) -> bindings::FastTextHandle {
        self.ptr.as_ptr()
    }

    /// Take ownership of a response buffer and copy it out.
    fn read_response(raw: *mut c_char, kind: QueryKind, query: &str) -> Result<Vec<u8>> {
        let buffer = ForeignString::new(raw).ok_or_else(|| FastTextError::EmptyResponse {
            kind,
            query: query.to_string(),
        })?;
        // buffer is freed when it goes out of scope
        Ok(buffer.to_bytes())
    }
}

impl EngineResource for NativeModel {
    fn neighbor(&self, query: &str, k: i32) -> Result<Vec<u8>> {
        let cquery = c_string(query)?;
        // SAFETY: handle is live for &self; cquery outlives the call and is only read
        let raw = unsafe { bindings::Neighbor(self.raw(), cquery.as_ptr() as *mut c_char, k) };
        Self::read_response(raw, QueryKind::Neighbor, &describe_args(&[query], Some(k)))
    }

    fn predict(&self, query: &str) -> Result<Vec<u8>> {
        let cquery = c_string(query)?;
        // SAFETY: as above
        let raw = unsafe { bindings::Predict(self.raw(), cquery.as_ptr() as *mut c_char) };
        Self::read_response(raw, QueryKind::Predict, &describe_args(&[query], None))
    }

    fn analogy(&self, a: &str, b: &str, c: &str, k: i32) -> Result<Vec<u8>> {
        let ca = c_string(a)?;
        let cb = c_string(b)?;
        let cc = c_string(c)?;
        // SAFETY: as above
        let raw = unsafe {
            bindings::Analogy(
                self.raw(),
                ca.as_ptr() as *mut c_char,
                cb.as_ptr() as *mut c_char,
                cc.as_ptr() as *mut c_char,
                k,
            )
        };
        Self::read_response(raw, QueryKind::Analogy, &describe_args(&[a, b, c], Some(k)))
    }

    fn wordvec(&self, query: &str) -> Result<Vec<u8>> {
        let cquery = c_string(query)?;
        // SAFETY: as above
        let raw = unsafe { bindings::Wordvec(self.raw(), cquery.as_ptr() as *mut c_char) };
        Self::read_response(raw, QueryKind::Wordvec, &describe_args(&[query], None))
    }

    fn vec_similarity(&self, a: &str, b: &str) -> Result<f32> {
        let ca = c_string(a)?;
        let cb = c_string(b)?;
        // SAFETY: as above; the result is a plain float, nothing to free
        let sim = unsafe {
            bindings::VecSimilarity(
                self.raw(),
                ca.as_ptr() as *mut c_char,
                cb.as_ptr() as *mut c_char,
            )
        };
        Ok(sim)
    }
}

impl Drop for NativeModel {
    fn drop(&mut self) {
        log::debug!("Deleting fastText handle for {}", self.path.display());
        // SAFETY: ptr came from NewHandle and is freed only here (single owner)
        unsafe { bindings::DeleteHandle(self.ptr.as_ptr()) };
    }
}

impl std::fmt::Debug for NativeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeModel")
            .field("ptr", &self.ptr)
            .field("path", &self.path)
            .finish()
    }
}

/// `strdup`ed response buffer, released with `free` on drop.
struct ForeignString(NonNull<c_char>);

impl ForeignString {
    fn new(raw: *mut c_char) -> Option<Self> {
        NonNull::new(raw).map(Self)
    }

    fn to_bytes(&self) -> Vec<u8> {
        // SAFETY: the shim always NUL-terminates; the buffer lives until drop
        unsafe { CStr::from_ptr(self.0.as_ptr()) }.to_bytes().to_vec()
    }
}

impl Drop for ForeignString {
    fn drop(&mut self) {
        // SAFETY: allocated by strdup in the shim and owned solely by self
        unsafe { bindings::free(self.0.as_ptr() as *mut c_void) };
    }
}

fn c_string(query: &str) -> Result<CString> {
    CString::new(query).map_err(|e| {
        FastTextError::invalid_query(
            query,
            format!("interior NUL byte at {}", e.nul_position()),
        )
    })
}
