//! HTML Rendering for alignments
//!
//! Renders one side of an operation stream to an HTML fragment.
//!
//! | Op       | Side A                 | Side B                 |
//! |----------|------------------------|------------------------|
//! | `Equal`  | escaped text           | escaped text           |
//! | `Delete` | escaped text in `<span class="diff diff-del">` | omitted |
//! | `Insert` | omitted                | escaped text in `<span class="diff diff-ins">` |
//!
//! Stripping the spans and decoding the entities of a side's markup gives
//! back that side's original text exactly.

use std::borrow::Cow;
use std::fmt;

use crate::align::{Op, Side};

// =============================================================================
// RenderConfig
// =============================================================================

/// Default class attribute for deleted tokens.
pub const DEFAULT_DELETED_CLASS: &str = "diff diff-del";

/// Default class attribute for inserted tokens.
pub const DEFAULT_INSERTED_CLASS: &str = "diff diff-ins";

/// Configuration for markup rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Class attribute of the span wrapping deleted tokens (side A).
    pub deleted_class: Cow<'static, str>,
    /// Class attribute of the span wrapping inserted tokens (side B).
    pub inserted_class: Cow<'static, str>,
    /// Merge adjacent marked tokens into a single span.
    ///
    /// Off by default: every deleted or inserted token gets its own span.
    pub coalesce: bool,
}

impl RenderConfig {
    /// One span per marked token.
    pub const DEFAULT: Self = Self {
        deleted_class: Cow::Borrowed(DEFAULT_DELETED_CLASS),
        inserted_class: Cow::Borrowed(DEFAULT_INSERTED_CLASS),
        coalesce: false,
    };

    /// One span per run of marked tokens (smaller output).
    pub const COALESCED: Self = Self {
        deleted_class: Cow::Borrowed(DEFAULT_DELETED_CLASS),
        inserted_class: Cow::Borrowed(DEFAULT_INSERTED_CLASS),
        coalesce: true,
    };

    /// Set custom class attributes for the two markers.
    pub fn with_classes(mut self, deleted: impl Into<Cow<'static, str>>, inserted: impl Into<Cow<'static, str>>) -> Self {
        self.deleted_class = deleted.into();
        self.inserted_class = inserted.into();
        self
    }

    pub fn with_coalesce(mut self, coalesce: bool) -> Self {
        self.coalesce = coalesce;
        self
    }

    /// Class attribute for the marker used on `side`.
    pub fn class_for(&self, side: Side) -> &str {
        match side {
            Side::A => &self.deleted_class,
            Side::B => &self.inserted_class,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Markup
// =============================================================================

/// Rendered HTML fragment for one side of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recover the text this markup displays.
    ///
    /// Drops every tag and decodes the entities produced by [`escape_html`].
    pub fn to_plain_text(&self) -> String {
        let mut output = String::with_capacity(self.0.len());
        let mut rest = self.0.as_str();

        while let Some(pos) = rest.find(['<', '&']) {
            output.push_str(&rest[..pos]);
            rest = &rest[pos..];

            if rest.starts_with('<') {
                rest = rest.find('>').map_or("", |end| &rest[end + 1..]);
                continue;
            }

            match ENTITIES.iter().find(|(_, entity)| rest.starts_with(entity)) {
                Some((c, entity)) => {
                    output.push(*c);
                    rest = &rest[entity.len()..];
                }
                None => {
                    output.push('&');
                    rest = &rest[1..];
                }
            }
        }

        output.push_str(rest);
        output
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Markup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Markup> for String {
    fn from(markup: Markup) -> Self {
        markup.0
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render one side of an operation stream with the default config.
pub fn render(ops: &[Op<'_>], side: Side) -> Markup {
    render_with_config(ops, side, &RenderConfig::DEFAULT)
}

/// Render both sides with the default config.
pub fn render_pair(ops: &[Op<'_>]) -> (Markup, Markup) {
    (render(ops, Side::A), render(ops, Side::B))
}

/// Render one side of an operation stream.
pub fn render_with_config(ops: &[Op<'_>], side: Side, config: &RenderConfig) -> Markup {
    let class = config.class_for(side);
    let mut output = String::with_capacity(ops.len() * 4);
    let mut span_open = false;

    for op in ops {
        let marked = match (side, op) {
            (_, Op::Equal(_)) => false,
            (Side::A, Op::Delete(_)) | (Side::B, Op::Insert(_)) => true,
            // Token does not exist on this side
            _ => continue,
        };

        if marked {
            if !span_open {
                output.push_str("<span class=\"");
                escape_into(class, &mut output);
                output.push_str("\">");
                span_open = true;
            }
            escape_into(op.token().text(), &mut output);
            if !config.coalesce {
                output.push_str("</span>");
                span_open = false;
            }
        } else {
            if span_open {
                output.push_str("</span>");
                span_open = false;
            }
            escape_into(op.token().text(), &mut output);
        }
    }

    if span_open {
        output.push_str("</span>");
    }

    Markup(output)
}

// =============================================================================
// Escaping
// =============================================================================

/// Reserved characters and their entities.
const ENTITIES: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#x27;"),
];

/// Escape HTML special characters.
///
/// Safe for both text content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    escape_into(s, &mut result);
    result
}

fn escape_into(s: &str, output: &mut String) {
    for c in s.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\'' => output.push_str("&#x27;"),
            _ => output.push(c),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use crate::token::tokenize;

    fn render_texts(a: &str, b: &str, config: &RenderConfig) -> (String, String) {
        let (ta, tb) = (tokenize(a), tokenize(b));
        let ops = align(&ta, &tb).ops;
        (
            render_with_config(&ops, Side::A, config).into_string(),
            render_with_config(&ops, Side::B, config).into_string(),
        )
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""it's""#), "&quot;it&#x27;s&quot;");
        assert_eq!(escape_html("   "), "   ");
    }

    #[test]
    fn test_word_change() {
        let (a, b) = render_texts("the cat sat", "the dog sat", &RenderConfig::DEFAULT);
        assert_eq!(a, r#"the <span class="diff diff-del">cat</span> sat"#);
        assert_eq!(b, r#"the <span class="diff diff-ins">dog</span> sat"#);
    }

    #[test]
    fn test_empty_a() {
        let (a, b) = render_texts("", "hello", &RenderConfig::DEFAULT);
        assert_eq!(a, "");
        assert_eq!(b, r#"<span class="diff diff-ins">hello</span>"#);
    }

    #[test]
    fn test_identical_has_no_markers() {
        let (a, b) = render_texts("identical text", "identical text", &RenderConfig::DEFAULT);
        assert_eq!(a, "identical text");
        assert_eq!(b, "identical text");
    }

    #[test]
    fn test_ampersand_escaped() {
        let (a, b) = render_texts("a & b", "a & c", &RenderConfig::DEFAULT);
        assert_eq!(a, r#"a &amp; <span class="diff diff-del">b</span>"#);
        assert_eq!(b, r#"a &amp; <span class="diff diff-ins">c</span>"#);
    }

    #[test]
    fn test_marked_symbols_are_escaped() {
        let (a, b) = render_texts("x<y", "x>y", &RenderConfig::DEFAULT);
        assert_eq!(a, r#"x<span class="diff diff-del">&lt;</span>y"#);
        assert_eq!(b, r#"x<span class="diff diff-ins">&gt;</span>y"#);
    }

    #[test]
    fn test_coalesce_merges_runs() {
        let (a, b) = render_texts("keep old words here", "keep here", &RenderConfig::COALESCED);
        assert_eq!(a, r#"keep <span class="diff diff-del">old words </span>here"#);
        assert_eq!(b, "keep here");
    }

    #[test]
    fn test_per_token_spans_by_default() {
        let (a, _) = render_texts("keep old here", "keep here", &RenderConfig::DEFAULT);
        assert_eq!(
            a,
            r#"keep <span class="diff diff-del">old</span><span class="diff diff-del"> </span>here"#
        );
    }

    #[test]
    fn test_custom_classes_are_escaped() {
        let config = RenderConfig::default().with_classes("gone\"", "new");
        let (a, b) = render_texts("x", "y", &config);
        assert_eq!(a, r#"<span class="gone&quot;">x</span>"#);
        assert_eq!(b, r#"<span class="new">y</span>"#);
    }

    #[test]
    fn test_to_plain_text_round_trip() {
        let text_a = "if a < b && c > 'd' { \"quoted\" }";
        let text_b = "if a <= b || c > \"d\" { 'quoted' } &amp;";
        for config in [RenderConfig::DEFAULT, RenderConfig::COALESCED] {
            let ta = tokenize(text_a);
            let tb = tokenize(text_b);
            let ops = align(&ta, &tb).ops;
            assert_eq!(render_with_config(&ops, Side::A, &config).to_plain_text(), text_a);
            assert_eq!(render_with_config(&ops, Side::B, &config).to_plain_text(), text_b);
        }
    }
}
