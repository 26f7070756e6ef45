//! Report composition
//!
//! Wraps the two rendered sides into a single self-contained HTML page:
//! title, a two-column grid (one panel per document, headed by its label),
//! an inline stylesheet and a fixed legend. Nothing is loaded from outside
//! the document, so the report can be viewed offline.

use std::borrow::Cow;
use std::fmt::Write;

use crate::align::AlignStats;
use crate::render::{escape_html, Markup};

// =============================================================================
// ReportConfig
// =============================================================================

/// Configuration for the report page.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// `<title>` and `<h1>` text.
    pub title: Cow<'static, str>,
    /// `lang` attribute of the `<html>` element.
    pub lang: Cow<'static, str>,
    /// Token counts to print under the heading, if any.
    pub summary: Option<AlignStats>,
    /// Input fingerprint to embed as a `<meta>` tag, if any.
    pub fingerprint: Option<String>,
}

impl ReportConfig {
    pub const DEFAULT: Self = Self {
        title: Cow::Borrowed("Document comparison"),
        lang: Cow::Borrowed("en"),
        summary: None,
        fingerprint: None,
    };

    pub fn with_title(mut self, title: impl Into<Cow<'static, str>>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<Cow<'static, str>>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_summary(mut self, stats: AlignStats) -> Self {
        self.summary = Some(stats);
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.fingerprint = Some(fingerprint.into());
        self
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Compose
// =============================================================================

const STYLE: &str = r#"  :root {
    --border: #e5e7eb;
    --bg: #ffffff;
    --text: #111827;
    --muted: #6b7280;
    --red: #b91c1c;
    --pink: #fee2e2;
  }
  body {
    margin: 0; padding: 24px; background: var(--bg); color: var(--text);
    font: 14px/1.6 -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Noto Sans', Ubuntu, Cantarell, 'Helvetica Neue', Arial, sans-serif;
  }
  h1 { font-size: 20px; margin: 0 0 16px; }
  .meta { color: var(--muted); margin-bottom: 16px; }
  .grid { display: grid; grid-template-columns: 1fr 1fr; gap: 16px; }
  .panel {
    border: 1px solid var(--border); border-radius: 8px; overflow: hidden; background: white;
    display: flex; flex-direction: column; min-height: 60vh;
  }
  .panel-header {
    font-weight: 600; padding: 10px 12px; border-bottom: 1px solid var(--border); background: #f9fafb;
  }
  .panel-body { padding: 12px; white-space: pre-wrap; word-break: break-word; overflow: auto; }
  .diff { color: var(--red); background: var(--pink); }
  .diff-del { text-decoration: line-through; }
  .legend { margin-top: 16px; font-size: 13px; color: var(--muted); }
  @media (max-width: 900px) { .grid { grid-template-columns: 1fr; } }
"#;

const LEGEND: &str = r#"Deletions are shown as <span class="diff diff-del">red strikethrough</span>,
    insertions as <span class="diff diff-ins">red on a pink background</span>."#;

/// Compose a report with the default config.
pub fn compose(label_a: &str, label_b: &str, markup_a: &Markup, markup_b: &Markup) -> String {
    compose_with_config(label_a, label_b, markup_a, markup_b, &ReportConfig::DEFAULT)
}

/// Compose a report page from two rendered sides.
///
/// Labels and config strings are escaped here; the markups are embedded as-is
/// since the renderer already escaped them.
pub fn compose_with_config(
    label_a: &str,
    label_b: &str,
    markup_a: &Markup,
    markup_b: &Markup,
    config: &ReportConfig,
) -> String {
    let title = escape_html(&config.title);
    let mut output = String::with_capacity(STYLE.len() + markup_a.as_str().len() + markup_b.as_str().len() + 1024);

    output.push_str("<!DOCTYPE html>\n<html lang=\"");
    output.push_str(&escape_html(&config.lang));
    output.push_str("\">\n<head>\n<meta charset=\"utf-8\" />\n");
    output.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    if let Some(fingerprint) = &config.fingerprint {
        output.push_str("<meta name=\"diff-fingerprint\" content=\"");
        output.push_str(&escape_html(fingerprint));
        output.push_str("\" />\n");
    }
    output.push_str("<title>");
    output.push_str(&title);
    output.push_str("</title>\n<style>\n");
    output.push_str(STYLE);
    output.push_str("</style>\n</head>\n<body>\n  <h1>");
    output.push_str(&title);
    output.push_str("</h1>\n  <div class=\"meta\">Differences are highlighted in red.");
    if let Some(stats) = &config.summary {
        output.push(' ');
        output.push_str(&summary_line(stats));
    }
    output.push_str("</div>\n  <div class=\"grid\">\n");
    push_panel(&mut output, label_a, markup_a);
    push_panel(&mut output, label_b, markup_b);
    output.push_str("  </div>\n  <div class=\"legend\">\n    ");
    output.push_str(LEGEND);
    output.push_str("\n  </div>\n</body>\n</html>\n");

    output
}

fn push_panel(output: &mut String, label: &str, markup: &Markup) {
    output.push_str("    <section class=\"panel\">\n      <div class=\"panel-header\">");
    output.push_str(&escape_html(label));
    output.push_str("</div>\n      <div class=\"panel-body\">");
    output.push_str(markup.as_str());
    output.push_str("</div>\n    </section>\n");
}

/// "3 tokens deleted, 1 inserted, 82.5% similar."
fn summary_line(stats: &AlignStats) -> String {
    let mut line = String::new();
    let _ = write!(
        line,
        "{} {} deleted, {} inserted, {:.1}% similar.",
        stats.deleted,
        if stats.deleted == 1 { "token" } else { "tokens" },
        stats.inserted,
        stats.similarity() * 100.0
    );
    line
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{align, Side};
    use crate::render::render;
    use crate::token::tokenize;

    fn sample() -> (Markup, Markup) {
        let a = tokenize("the cat sat");
        let b = tokenize("the dog sat");
        let ops = align(&a, &b).ops;
        (render(&ops, Side::A), render(&ops, Side::B))
    }

    #[test]
    fn test_document_shape() {
        let (a, b) = sample();
        let html = compose("a.txt", "b.txt", &a, &b);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Document comparison</title>"));
        assert_eq!(html.matches("<section class=\"panel\">").count(), 2);
        assert!(html.contains("<div class=\"panel-header\">a.txt</div>"));
        assert!(html.contains("<div class=\"panel-header\">b.txt</div>"));
        assert!(html.contains(a.as_str()));
        assert!(html.contains(b.as_str()));
        assert!(html.contains("text-decoration: line-through"));
        assert!(html.contains("class=\"legend\""));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_self_contained() {
        let (a, b) = sample();
        let html = compose("a", "b", &a, &b);
        assert!(!html.contains("<link"));
        assert!(!html.contains("<script"));
        assert!(!html.contains("http://") && !html.contains("https://"));
    }

    #[test]
    fn test_labels_are_escaped() {
        let html = compose("<a&b>.txt", "it's \"b\".txt", &Markup::default(), &Markup::default());
        assert!(html.contains("&lt;a&amp;b&gt;.txt"));
        assert!(html.contains("it&#x27;s &quot;b&quot;.txt"));
        assert!(!html.contains("<a&b>"));
    }

    #[test]
    fn test_title_and_fingerprint() {
        let config = ReportConfig::default()
            .with_title("Q3 <draft> review")
            .with_lang("ru")
            .with_fingerprint("abc123");
        let html = compose_with_config("a", "b", &Markup::default(), &Markup::default(), &config);
        assert!(html.contains("<html lang=\"ru\">"));
        assert!(html.contains("<title>Q3 &lt;draft&gt; review</title>"));
        assert!(html.contains("<meta name=\"diff-fingerprint\" content=\"abc123\" />"));
    }

    #[test]
    fn test_summary_line() {
        let stats = AlignStats { equal: 3, deleted: 1, inserted: 1 };
        assert_eq!(summary_line(&stats), "1 token deleted, 1 inserted, 75.0% similar.");

        let config = ReportConfig::default().with_summary(stats);
        let html = compose_with_config("a", "b", &Markup::default(), &Markup::default(), &config);
        assert!(html.contains("75.0% similar."));
    }

    #[test]
    fn test_no_summary_by_default() {
        let html = compose("a", "b", &Markup::default(), &Markup::default());
        assert!(!html.contains("similar."));
        assert!(!html.contains("diff-fingerprint"));
    }
}
