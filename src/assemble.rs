use crate::classify::{FileKind, classify};
use crate::engine::{Fusioner, InlinePolicy, ProcessedFile};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const GUARD_PREFIX: &str = "FUSED_";
const GUARD_SUFFIX: &str = "_H";

/// Configuration for one fusion run
#[derive(Debug, Clone)]
pub struct FuseConfig {
    /// Directories searched after the including file's own directory
    pub search_path: Vec<PathBuf>,
    /// Explicit policy. When `None`, derived from the input's kind.
    pub policy: Option<InlinePolicy>,
}

impl Default for FuseConfig {
    fn default() -> Self {
        Self {
            search_path: vec![PathBuf::from(".")],
            policy: None,
        }
    }
}

impl FuseConfig {
    /// The policy that applies to `input`
    #[must_use]
    pub fn policy_for(&self, input: &Path) -> InlinePolicy {
        self.policy
            .clone()
            .unwrap_or_else(|| InlinePolicy::for_kind(classify(input)))
    }
}

/// What a fusion run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuseSummary {
    pub kind: FileKind,
    /// Number of distinct files inlined
    pub inlined: usize,
    pub output: String,
}

/// Inclusion guard token for a top-level input, e.g. `FUSED_GTEST_H`
#[must_use]
pub fn guard_name(input: &Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_uppercase())
        .unwrap_or_default();
    format!("{GUARD_PREFIX}{stem}{GUARD_SUFFIX}")
}

/// Surrounds `content` with an `#ifndef`/`#define`/`#endif` guard
#[must_use]
pub fn wrap_with_guard(content: &str, guard: &str) -> String {
    format!("#ifndef {guard}\n#define {guard}\n\n{content}\n\n#endif  // {guard}")
}

/// Final output text for a processed top-level file. Only interface-kind
/// inputs are guarded.
#[must_use]
pub fn assemble(processed: &ProcessedFile, input: &Path) -> String {
    if processed.kind == FileKind::Interface {
        wrap_with_guard(&processed.content, &guard_name(input))
    } else {
        processed.content.clone()
    }
}

/// Fuses `input` and returns the output text without writing anything
///
/// # Errors
///
/// Returns any error raised while processing `input` or its includes.
pub fn fuse_to_string(input: &Path, config: &FuseConfig) -> Result<FuseSummary> {
    let mut fusioner = Fusioner::new(config.search_path.clone(), config.policy_for(input));
    let processed = fusioner.process(input)?;

    Ok(FuseSummary {
        kind: processed.kind,
        inlined: fusioner.inlined().len(),
        output: assemble(&processed, input),
    })
}

/// Fuses `input` and writes the result to `output`.
///
/// Nothing is written when processing fails.
///
/// # Errors
///
/// Returns any error raised while processing, or `FuseError::Io` if
/// `output` can't be written.
pub fn fuse(input: &Path, output: &Path, config: &FuseConfig) -> Result<FuseSummary> {
    let summary = fuse_to_string(input, config)?;
    fs::write(output, &summary.output)?;
    info!(
        input = %input.display(),
        output = %output.display(),
        inlined = summary.inlined,
        "wrote fused output"
    );
    Ok(summary)
}
