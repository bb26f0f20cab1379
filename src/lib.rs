//! # cppfuse
//!
//! Flattens a tree of C/C++ files into a single file by replacing quoted
//! `#include` directives with the contents of the files they name,
//! recursively. Handy for shipping single-file amalgamations of a library.
//!
//! ## Behavior
//!
//! - The including file's directory is searched first, then the search path
//!   in order; the first existing candidate wins
//! - `<...>` includes are always preserved
//! - Each file is inlined at most once per run; later directives naming it
//!   are dropped
//! - Cyclic inclusion aborts the run
//! - Headers are fused with headers and get an inclusion guard; sources
//!   are fused with sources
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use cppfuse::{FuseConfig, fuse};
//! use std::path::{Path, PathBuf};
//!
//! let config = FuseConfig {
//!     search_path: vec![PathBuf::from("include")],
//!     ..FuseConfig::default()
//! };
//!
//! match fuse(Path::new("include/gtest/gtest.h"), Path::new("gtest.h"), &config) {
//!     Ok(summary) => eprintln!("inlined {} files", summary.inlined),
//!     Err(e) => eprintln!("Error: {e}"),
//! }
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Fuse a header, searching ./include
//! cppfuse include/gtest/gtest.h fused/gtest.h include
//!
//! # Fuse a source file to stdout
//! cppfuse src/gtest-all.cc - include .
//!
//! # Show how the directives of a file resolve
//! cppfuse src/gtest-all.cc --list=detailed -I include
//! ```

pub mod assemble;
pub mod classify;
pub mod directive;
pub mod engine;
pub mod error;
pub mod report;
pub mod resolver;

// Re-export main types and functions for convenience
pub use assemble::{FuseConfig, FuseSummary, fuse, fuse_to_string, guard_name};
pub use classify::{FileKind, classify};
pub use engine::{Fusioner, InlinePolicy, ProcessedFile};
pub use error::{FuseError, Result};
pub use report::{DirectiveReport, list_directives};
