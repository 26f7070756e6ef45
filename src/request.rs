//! End-to-end comparison requests.
//!
//! A [`DiffRequest`] carries everything one comparison needs (both texts and
//! their labels) so nothing is kept in process-wide state.
//!
//! ```text
//! DiffRequest --diff()--> DiffOutcome { markup_a, markup_b, stats }
//!      |
//!      +--render_report()--> HTML page
//! ```

use std::path::Path;

use compact_str::CompactString;

use crate::algo::StableHasher;
use crate::align::{align_with_config, AlignConfig, AlignStats, Side};
use crate::error::Result;
use crate::render::{render, render_with_config, Markup, RenderConfig};
use crate::report::{compose_with_config, ReportConfig};
use crate::source::load_text;
use crate::token::tokenize_pair;

/// Label used when a request is built from raw text.
pub const DEFAULT_LABEL_A: &str = "Document A";
/// Label used when a request is built from raw text.
pub const DEFAULT_LABEL_B: &str = "Document B";

// =============================================================================
// Core entry point
// =============================================================================

/// Tokenize, align and render two texts with default settings.
///
/// Returns side A's markup (deletions marked) and side B's markup
/// (insertions marked).
pub fn build_dual_highlighted_markup(text_a: &str, text_b: &str) -> (Markup, Markup) {
    let (tokens_a, tokens_b) = tokenize_pair(text_a, text_b);
    let alignment = align_with_config(&tokens_a, &tokens_b, &AlignConfig::DEFAULT);
    (render(&alignment.ops, Side::A), render(&alignment.ops, Side::B))
}

// =============================================================================
// Options
// =============================================================================

/// All knobs of a comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffOptions {
    pub align: AlignConfig,
    pub render: RenderConfig,
    pub report: ReportConfig,
    /// Print token counts and similarity under the report heading.
    pub summary: bool,
}

impl DiffOptions {
    pub fn with_align(mut self, align: AlignConfig) -> Self {
        self.align = align;
        self
    }

    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    pub fn with_report(mut self, report: ReportConfig) -> Self {
        self.report = report;
        self
    }

    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }
}

// =============================================================================
// DiffRequest
// =============================================================================

/// Two documents to compare, with display labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffRequest {
    pub text_a: String,
    pub text_b: String,
    pub label_a: CompactString,
    pub label_b: CompactString,
}

/// Rendered result of a request.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct DiffOutcome {
    /// Side A with deletions marked
    pub markup_a: Markup,
    /// Side B with insertions marked
    pub markup_b: Markup,
    /// Token counts of the alignment
    pub stats: AlignStats,
}

impl DiffRequest {
    /// Create a request from raw text with default labels.
    pub fn new(text_a: impl Into<String>, text_b: impl Into<String>) -> Self {
        Self {
            text_a: text_a.into(),
            text_b: text_b.into(),
            label_a: CompactString::const_new(DEFAULT_LABEL_A),
            label_b: CompactString::const_new(DEFAULT_LABEL_B),
        }
    }

    /// Replace the display labels.
    pub fn with_labels(mut self, label_a: impl Into<CompactString>, label_b: impl Into<CompactString>) -> Self {
        self.label_a = label_a.into();
        self.label_b = label_b.into();
        self
    }

    /// Load both documents; labels are their file names.
    ///
    /// Fails if either file cannot be loaded: there is no partial request.
    pub fn from_files(path_a: impl AsRef<Path>, path_b: impl AsRef<Path>) -> Result<Self> {
        let (path_a, path_b) = (path_a.as_ref(), path_b.as_ref());
        let text_a = load_text(path_a)?;
        let text_b = load_text(path_b)?;
        Ok(Self::new(text_a, text_b).with_labels(file_label(path_a), file_label(path_b)))
    }

    /// Deterministic hex digest of both texts and labels.
    pub fn fingerprint(&self) -> String {
        StableHasher::new()
            .update_str(&self.label_a)
            .update_str(&self.text_a)
            .update_str(&self.label_b)
            .update_str(&self.text_b)
            .finish_hex()
    }

    /// Tokenize, align and render both sides.
    pub fn diff(&self, options: &DiffOptions) -> DiffOutcome {
        let (tokens_a, tokens_b) = tokenize_pair(&self.text_a, &self.text_b);
        let alignment = align_with_config(&tokens_a, &tokens_b, &options.align);

        DiffOutcome {
            markup_a: render_with_config(&alignment.ops, Side::A, &options.render),
            markup_b: render_with_config(&alignment.ops, Side::B, &options.render),
            stats: alignment.stats,
        }
    }

    /// Run the comparison and compose the full report page.
    pub fn render_report(&self, options: &DiffOptions) -> String {
        let outcome = self.diff(options);

        let mut report = options.report.clone();
        if options.summary {
            report.summary = Some(outcome.stats);
        }
        if report.fingerprint.is_none() {
            report.fingerprint = Some(self.fingerprint());
        }

        tracing::debug!(
            label_a = %self.label_a,
            label_b = %self.label_b,
            deleted = outcome.stats.deleted,
            inserted = outcome.stats.inserted,
            "composing report"
        );
        compose_with_config(&self.label_a, &self.label_b, &outcome.markup_a, &outcome.markup_b, &report)
    }
}

fn file_label(path: &Path) -> CompactString {
    match path.file_name() {
        Some(name) => CompactString::from(name.to_string_lossy().as_ref()),
        None => CompactString::from(path.to_string_lossy().as_ref()),
    }
}

// =============================================================================
// Tests
// =============================================================================
