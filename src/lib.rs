//! tola-textdiff - Token-level text comparison with side-by-side HTML reports
//!
//! ## Core Concepts
//!
//! **Lossless tokens**: text is split into words, whitespace runs and single
//! symbols. Concatenating the tokens always reproduces the input, so every
//! rendering is a faithful copy of its document with changes wrapped in spans.
//!
//! **Two-sided rendering**: one alignment drives two views. Side A shows what
//! was deleted, side B shows what was inserted.
//!
//! ## Modules
//! - `token`: tokenizer (`Token`, `TokenKind`, `tokenize`)
//! - `algo`: sequence matchers (Myers, LCS) and stable hashing
//! - `align`: op-stream construction (`Op`, `AlignConfig`, `align`)
//! - `render`: escaped HTML fragments per side (`Markup`, `RenderConfig`)
//! - `report`: self-contained comparison page (`ReportConfig`, `compose`)
//! - `source`: `.txt` / `.docx` loading (`load_text`)
//! - `request`: end-to-end requests (`DiffRequest`, `build_dual_highlighted_markup`)
//!
//! ## Usage
//!
//! ```
//! use tola_textdiff::build_dual_highlighted_markup;
//!
//! let (a, b) = build_dual_highlighted_markup("the cat sat", "the dog sat");
//! assert_eq!(a.as_str(), r#"the <span class="diff diff-del">cat</span> sat"#);
//! assert_eq!(b.as_str(), r#"the <span class="diff diff-ins">dog</span> sat"#);
//! ```
//!
//! ```no_run
//! use tola_textdiff::{DiffOptions, DiffRequest};
//!
//! let request = DiffRequest::from_files("draft.docx", "final.docx")?;
//! let html = request.render_report(&DiffOptions::default().with_summary(true));
//! std::fs::write("diff_report.html", html)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// =============================================================================
// Core modules
// =============================================================================

/// Tokenizer
pub mod token;

/// Algorithms: myers, lcs, stable hashing
pub mod algo;

/// Op-stream alignment
pub mod align;

/// Per-side HTML rendering
pub mod render;

/// Report page composition
pub mod report;

/// Document loading
pub mod source;

/// End-to-end comparison requests
pub mod request;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Tokens
pub use token::{tokenize, Token, TokenKind, TokenSequence};

// Alignment
pub use align::{align, align_with_config, AlignAlgorithm, AlignConfig, AlignStats, Alignment, Op, OpStream, Side};

// Rendering
pub use render::{escape_html, render, render_pair, render_with_config, Markup, RenderConfig};

// Report
pub use report::{compose, compose_with_config, ReportConfig};

// Sources
pub use source::{load_text, SourceKind};

// Requests
pub use request::{build_dual_highlighted_markup, DiffOptions, DiffOutcome, DiffRequest};

// Algorithms
pub use algo::StableHasher;

// Error types
pub use error::{Error, Result};

// =============================================================================
// Tests
// =============================================================================
