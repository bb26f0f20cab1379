use serde::Serialize;
use std::path::Path;

/// Semantic kind of a source file, derived from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Declaration files: `.h`, `.hpp`, `.hxx`, `.hh`
    Interface,
    /// Definition files: `.c`, `.cpp`, `.cxx`, `.cc`
    Implementation,
    Unknown,
}

const INTERFACE_EXTENSIONS: &[&str] = &["h", "hpp", "hxx", "hh"];
const IMPLEMENTATION_EXTENSIONS: &[&str] = &["c", "cpp", "cxx", "cc"];

/// Classifies a path by its extension (case-insensitive)
#[must_use]
pub fn classify(path: &Path) -> FileKind {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FileKind::Unknown;
    };
    let ext = ext.to_ascii_lowercase();

    if INTERFACE_EXTENSIONS.contains(&ext.as_str()) {
        FileKind::Interface
    } else if IMPLEMENTATION_EXTENSIONS.contains(&ext.as_str()) {
        FileKind::Implementation
    } else {
        FileKind::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_interfaces() {
        for name in ["a.h", "a.hpp", "dir/a.hxx", "/abs/a.hh"] {
            assert_eq!(classify(Path::new(name)), FileKind::Interface, "{name}");
        }
    }

    #[test]
    fn test_classify_implementations() {
        for name in ["a.c", "a.cpp", "dir/a.cxx", "/abs/a.cc"] {
            assert_eq!(classify(Path::new(name)), FileKind::Implementation, "{name}");
        }
    }

    #[test]
    fn test_classify_case_insensitive() {
        assert_eq!(classify(Path::new("GTEST.H")), FileKind::Interface);
        assert_eq!(classify(Path::new("main.CPP")), FileKind::Implementation);
        assert_eq!(classify(Path::new("x.Hpp")), FileKind::Interface);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify(Path::new("README.md")), FileKind::Unknown);
        assert_eq!(classify(Path::new("Makefile")), FileKind::Unknown);
        assert_eq!(classify(Path::new("table.inc")), FileKind::Unknown);
        // Only the final extension counts
        assert_eq!(classify(Path::new("a.h.in")), FileKind::Unknown);
        assert_eq!(classify(Path::new(".h")), FileKind::Unknown);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&FileKind::Implementation).unwrap();
        assert_eq!(json, "\"implementation\"");
    }
}
