//! Directive listing for a single file, without inlining anything.

use crate::classify::{FileKind, classify};
use crate::directive::{Delimiter, find_directives};
use crate::error::Result;
use crate::resolver::{Resolver, read_file_contents};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// How one directive of the listed file resolves
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectiveReport {
    pub line: usize,
    pub reference: String,
    pub delimiter: Delimiter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FileKind>,
}

/// Lists the directives of `input` and where the quoted ones resolve
///
/// # Errors
///
/// Returns `FuseError::FileNotFound` or `FuseError::Read` if `input` can't
/// be read.
pub fn list_directives(input: &Path, search_path: &[PathBuf]) -> Result<Vec<DirectiveReport>> {
    let content = read_file_contents(input)?;
    let resolver = Resolver::new(search_path.to_vec());
    let including_dir = input.parent().unwrap_or_else(|| Path::new("."));

    Ok(find_directives(&content)
        .into_iter()
        .map(|found| {
            let directive = found.directive;
            let path = match directive.delimiter {
                Delimiter::Angle => None,
                Delimiter::Quote => resolver.resolve(directive.reference, including_dir),
            };
            DirectiveReport {
                line: found.line_number,
                reference: directive.reference.to_string(),
                delimiter: directive.delimiter,
                kind: path.as_deref().map(classify),
                path,
            }
        })
        .collect())
}

/// One reference per line
#[must_use]
pub fn render_plain(reports: &[DirectiveReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "{}", report.reference);
    }
    out
}

/// Multi-line block per directive
#[must_use]
pub fn render_detailed(reports: &[DirectiveReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let _ = writeln!(out, "Reference: {}", report.reference);
        let _ = writeln!(out, "  Line: {}", report.line);
        match report.delimiter {
            Delimiter::Angle => {
                let _ = writeln!(out, "  System: yes");
            }
            Delimiter::Quote => match (&report.path, report.kind) {
                (Some(path), Some(kind)) => {
                    let _ = writeln!(out, "  Path: {}", path.display());
                    let _ = writeln!(out, "  Kind: {kind:?}");
                }
                _ => {
                    let _ = writeln!(out, "  Path: not found");
                }
            },
        }
        out.push('\n');
    }
    out
}

/// Pretty-printed JSON array
///
/// # Errors
///
/// Returns `FuseError::Json` if serialization fails.
pub fn render_json(reports: &[DirectiveReport]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reports)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> (TempDir, Vec<DirectiveReport>) {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::create_dir_all(base.join("include")).unwrap();
        fs::write(base.join("include/lib.hpp"), "").unwrap();
        fs::write(
            base.join("main.cc"),
            "#include <map>\n\n#include \"lib.hpp\"\n#include \"gone.h\"\nint main() {}",
        )
        .unwrap();

        let reports = list_directives(&base.join("main.cc"), &[base.join("include")]).unwrap();
        (temp_dir, reports)
    }

    #[test]
    fn test_list_directives() {
        let (temp_dir, reports) = sample();
        assert_eq!(reports.len(), 3);

        assert_eq!(reports[0].line, 1);
        assert_eq!(reports[0].delimiter, Delimiter::Angle);
        assert_eq!(reports[0].path, None);

        assert_eq!(reports[1].line, 3);
        assert_eq!(reports[1].path, Some(temp_dir.path().join("include").join("lib.hpp")));
        assert_eq!(reports[1].kind, Some(FileKind::Interface));

        assert_eq!(reports[2].reference, "gone.h");
        assert_eq!(reports[2].path, None);
        assert_eq!(reports[2].kind, None);
    }

    #[test]
    fn test_render_plain_and_detailed() {
        let (_temp_dir, reports) = sample();
        assert_eq!(render_plain(&reports), "map\nlib.hpp\ngone.h\n");

        let detailed = render_detailed(&reports);
        assert!(detailed.contains("Reference: map\n  Line: 1\n  System: yes"));
        assert!(detailed.contains("  Kind: Interface"));
        assert!(detailed.contains("Reference: gone.h\n  Line: 4\n  Path: not found"));
    }

    #[test]
    fn test_render_json() {
        let (_temp_dir, reports) = sample();
        let json = render_json(&reports).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["delimiter"], "angle");
        assert!(value[0].get("path").is_none());
        assert_eq!(value[1]["kind"], "interface");
        assert_eq!(value[2]["reference"], "gone.h");
    }

    #[test]
    fn test_list_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let result = list_directives(&temp_dir.path().join("nope.c"), &[]);
        assert!(result.is_err());
    }
}
