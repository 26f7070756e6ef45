//! Prelude module for common imports.
//!
//! ```ignore
//! use tola_textdiff::prelude::*;
//! ```

// Tokens
pub use crate::token::{tokenize, tokenize_pair, Token, TokenKind, TokenSequence};

// Alignment
pub use crate::align::{align, align_with_config, AlignAlgorithm, AlignConfig, AlignStats, Alignment, Op, Side};

// Rendering
pub use crate::render::{render, render_pair, render_with_config, Markup, RenderConfig};

// Report
pub use crate::report::{compose, compose_with_config, ReportConfig};

// Sources
pub use crate::source::{load_text, SourceKind};

// Requests
pub use crate::request::{build_dual_highlighted_markup, DiffOptions, DiffOutcome, DiffRequest};

// Error
pub use crate::error::{Error, Result};
