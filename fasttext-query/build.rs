//! Build script for fasttext-query.
//!
//! Configures linker paths for the fastText C shim when the `native`
//! feature is enabled.
//!
//! # Requirements
//!
//! - `libfasttext_cbits` (cbits.cpp compiled against fastText) installed in
//!   `FASTTEXT_LIB_DIR`, or `/usr/local/lib` when unset. Besides the stock
//!   `cbits.h` entry points it must export
//!   `float VecSimilarity(FastTextHandle, char *, char *)`
//! - a C++ standard library (the shim is C++14)

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=FASTTEXT_LIB_DIR");

    #[cfg(feature = "native")]
    {
        let lib_dir =
            std::env::var("FASTTEXT_LIB_DIR").unwrap_or_else(|_| "/usr/local/lib".to_string());
        println!("cargo:rustc-link-search=native={}", lib_dir);
        println!("cargo:rustc-link-arg=-Wl,-rpath,{}", lib_dir);

        // The #[link(name = "fasttext_cbits")] attribute links the shim itself;
        // its C++ runtime has to be pulled in explicitly.
        let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
        if target_os == "macos" {
            println!("cargo:rustc-link-lib=dylib=c++");
        } else {
            println!("cargo:rustc-link-lib=dylib=stdc++");
        }
    }
}
