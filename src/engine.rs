//! Recursive resolution and substitution of `#include` directives.
//!
//! A [`Fusioner`] owns all state of one run: the search path, the inlining
//! policy, the stack of files currently being processed (for cycle
//! detection) and the set of files already inlined somewhere in the run.
//! Build a fresh one per run.

use crate::classify::{FileKind, classify};
use crate::directive::{Delimiter, Directive, parse_directive};
use crate::error::{FuseError, Result};
use crate::resolver::{Resolver, read_file_contents};
use std::borrow::Cow;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, debug_span, info, warn};

/// References inlined whenever implementation inlining is on, whatever their kind
pub const DEFAULT_FORCED_SOURCES: &[&str] = &["src/gtest-internal-inl.h", "gtest/gtest-spi.h"];

/// Family of auxiliary headers commented out rather than kept
pub const DEFAULT_COMMENTED_PREFIX: &str = "gtest/";

/// The one header of the commented family that is kept as a directive
pub const DEFAULT_ENTRY_HEADER: &str = "gtest/gtest.h";

/// Prefix of the marker line emitted before inlined content
pub const PROVENANCE_PREFIX: &str = "// Inlined from: ";

/// Decides which resolved directives get inlined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinePolicy {
    /// Inline interface-kind files (headers)
    pub inline_interfaces: bool,
    /// Inline implementation-kind files and the forced sources
    pub inline_implementations: bool,
    /// References inlined under implementation inlining regardless of kind
    pub forced_sources: Vec<String>,
    /// Directives whose reference starts with this prefix are commented out
    /// when not inlined
    pub commented_prefix: Option<String>,
    /// Exempts one reference from `commented_prefix`
    pub entry_header: Option<String>,
}

impl Default for InlinePolicy {
    fn default() -> Self {
        Self {
            inline_interfaces: false,
            inline_implementations: false,
            forced_sources: DEFAULT_FORCED_SOURCES
                .iter()
                .map(ToString::to_string)
                .collect(),
            commented_prefix: Some(DEFAULT_COMMENTED_PREFIX.to_string()),
            entry_header: Some(DEFAULT_ENTRY_HEADER.to_string()),
        }
    }
}

/// Outcome of looking up a single directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Angle-bracket reference, never looked up
    SystemInclude,
    /// Resolved to a file that was already inlined in this run
    AlreadyInlined(PathBuf),
    NotFound,
    /// Resolved to a canonical path of the given kind
    Found { path: PathBuf, kind: FileKind },
}

/// Why a directive line is passed through untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeepReason {
    SystemInclude,
    NotFound,
    NotInlined,
}

/// What to emit for a directive line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Emit the original line
    Keep(KeepReason),
    /// Emit nothing, the file was already inlined
    Elide(PathBuf),
    /// Emit a provenance marker followed by the processed file
    Inline(PathBuf),
    /// Emit the original line behind `//`
    CommentOut,
}

impl InlinePolicy {
    /// Policy used for a top-level file of the given kind: headers inline
    /// headers, sources inline sources.
    #[must_use]
    pub fn for_kind(kind: FileKind) -> Self {
        Self {
            inline_interfaces: kind == FileKind::Interface,
            inline_implementations: kind == FileKind::Implementation,
            ..Self::default()
        }
    }

    /// Applies the decision table to one resolved directive. First matching
    /// rule wins.
    #[must_use]
    pub fn decide(&self, reference: &str, resolution: &Resolution) -> Action {
        match resolution {
            Resolution::SystemInclude => Action::Keep(KeepReason::SystemInclude),
            Resolution::AlreadyInlined(path) => Action::Elide(path.clone()),
            Resolution::NotFound => Action::Keep(KeepReason::NotFound),
            Resolution::Found { path, kind } => {
                if self.should_inline(reference, *kind) {
                    Action::Inline(path.clone())
                } else if self.is_commented(reference) {
                    Action::CommentOut
                } else {
                    Action::Keep(KeepReason::NotInlined)
                }
            }
        }
    }

    fn should_inline(&self, reference: &str, kind: FileKind) -> bool {
        (self.inline_interfaces && kind == FileKind::Interface)
            || (self.inline_implementations
                && (kind == FileKind::Implementation
                    || self.forced_sources.iter().any(|s| s == reference)))
    }

    fn is_commented(&self, reference: &str) -> bool {
        self.commented_prefix
            .as_deref()
            .is_some_and(|prefix| reference.starts_with(prefix))
            && self.entry_header.as_deref() != Some(reference)
    }
}

/// A file with all of its directives processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    /// Canonical absolute path
    pub path: PathBuf,
    pub content: String,
    pub kind: FileKind,
}

/// State of one fusion run
#[derive(Debug)]
pub struct Fusioner {
    resolver: Resolver,
    policy: InlinePolicy,
    processing_stack: HashSet<PathBuf>,
    inlined: HashSet<PathBuf>,
}

impl Fusioner {
    #[must_use]
    pub fn new(search_path: Vec<PathBuf>, policy: InlinePolicy) -> Self {
        Self {
            resolver: Resolver::new(search_path),
            policy,
            processing_stack: HashSet::new(),
            inlined: HashSet::new(),
        }
    }

    /// Canonical paths inlined so far in this run
    #[must_use]
    pub fn inlined(&self) -> &HashSet<PathBuf> {
        &self.inlined
    }

    /// True when no file is being processed
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.processing_stack.is_empty()
    }

    /// Processes `path` and, recursively, every file it inlines.
    ///
    /// # Errors
    ///
    /// - `FuseError::CyclicInclusion` if `path` is already being processed
    ///   further up the current chain.
    /// - `FuseError::FileNotFound` if `path` doesn't exist.
    /// - `FuseError::Read` if `path` or an inlined file can't be read.
    pub fn process(&mut self, path: &Path) -> Result<ProcessedFile> {
        let abs_path = canonicalize(path)?;

        if self.processing_stack.contains(&abs_path) {
            return Err(FuseError::CyclicInclusion { path: abs_path });
        }

        self.processing_stack.insert(abs_path.clone());
        let result = self.process_entered(&abs_path);
        self.processing_stack.remove(&abs_path);
        result
    }

    /// Looks up a directive found in a file living in `including_dir`.
    ///
    /// A candidate that can't be canonicalized (removed or made
    /// inaccessible after lookup) resolves to `NotFound`.
    #[must_use]
    pub fn resolve_directive(&self, directive: &Directive<'_>, including_dir: &Path) -> Resolution {
        if directive.delimiter == Delimiter::Angle {
            return Resolution::SystemInclude;
        }

        let Some(found) = self.resolver.resolve(directive.reference, including_dir) else {
            return Resolution::NotFound;
        };
        let Some(path) = canonical_candidate(&found) else {
            return Resolution::NotFound;
        };
        let kind = classify(&found);

        if self.inlined.contains(&path) {
            Resolution::AlreadyInlined(path)
        } else {
            Resolution::Found { path, kind }
        }
    }

    fn process_entered(&mut self, abs_path: &Path) -> Result<ProcessedFile> {
        let _span = debug_span!("process", path = %abs_path.display()).entered();

        let content = read_file_contents(abs_path)?;
        let kind = classify(abs_path);
        let current_dir = abs_path.parent().unwrap_or_else(|| Path::new("/"));

        let mut lines: Vec<Cow<'_, str>> = Vec::new();
        for line in content.split('\n') {
            let Some(directive) = parse_directive(line) else {
                lines.push(Cow::Borrowed(line));
                continue;
            };
            let reference = directive.reference;
            let resolution = self.resolve_directive(&directive, current_dir);

            match self.policy.decide(reference, &resolution) {
                Action::Inline(path) => {
                    let included = self.process(&path)?;
                    info!(reference, path = %path.display(), "inlining");
                    lines.push(Cow::Owned(format!("{PROVENANCE_PREFIX}{}", path.display())));
                    lines.push(Cow::Owned(included.content));
                    self.inlined.insert(path);
                }
                Action::Elide(path) => {
                    info!(path = %path.display(), from = %abs_path.display(), "already inlined");
                }
                Action::CommentOut => {
                    info!(reference, from = %abs_path.display(), "skipping");
                    lines.push(Cow::Owned(format!("//{line}")));
                }
                Action::Keep(reason) => {
                    match reason {
                        KeepReason::SystemInclude => {
                            debug!(reference, from = %abs_path.display(), "preserving system include");
                        }
                        KeepReason::NotFound => {
                            warn!(reference, from = %abs_path.display(), "could not find include");
                        }
                        KeepReason::NotInlined => {
                            debug!(reference, from = %abs_path.display(), "not inlining");
                        }
                    }
                    lines.push(Cow::Borrowed(line));
                }
            }
        }

        Ok(ProcessedFile {
            path: abs_path.to_path_buf(),
            content: lines.join("\n"),
            kind,
        })
    }
}

fn canonical_candidate(found: &Path) -> Option<PathBuf> {
    match found.canonicalize() {
        Ok(path) => Some(path),
        Err(e) => {
            warn!(path = %found.display(), error = %e, "could not canonicalize include");
            None
        }
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            FuseError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            FuseError::Io(e)
        }
    })
}
