use regex::{Regex, RegexBuilder};

/// A contiguous piece of a highlighted field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub is_match: bool,
}

impl Span {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_match: false,
        }
    }

    fn matched(text: &str) -> Self {
        Self {
            text: text.to_string(),
            is_match: true,
        }
    }
}

/// Case-insensitive literal matcher. Ranking decides membership with the same
/// matcher that produces the highlight spans, so both follow one case rule.
#[derive(Clone, Debug)]
pub struct Matcher {
    re: Option<Regex>,
}

impl Matcher {
    /// An empty query, or one too large to compile, matches nothing.
    pub fn new(query: &str) -> Self {
        if query.is_empty() {
            return Self { re: None };
        }
        let re = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .ok();
        Self { re }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.re.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// Split `text` into matching and non-matching spans. Every
    /// non-overlapping occurrence is marked; spans keep the source casing and
    /// concatenate back to `text` exactly.
    pub fn spans(&self, text: &str) -> Vec<Span> {
        if text.is_empty() {
            return Vec::new();
        }
        let Some(re) = &self.re else {
            return vec![Span::plain(text)];
        };

        let mut spans = Vec::new();
        let mut cursor = 0;
        for m in re.find_iter(text) {
            if m.start() > cursor {
                spans.push(Span::plain(&text[cursor..m.start()]));
            }
            spans.push(Span::matched(m.as_str()));
            cursor = m.end();
        }
        if cursor < text.len() {
            spans.push(Span::plain(&text[cursor..]));
        }
        spans
    }
}

/// Split `text` into matching and non-matching spans for `query`, matched as a
/// case-insensitive literal.
pub fn highlight(text: &str, query: &str) -> Vec<Span> {
    Matcher::new(query).spans(text)
}

/// Wrap matched spans in `open`/`close` markers, e.g. for terminal output.
pub fn render_marked(spans: &[Span], open: &str, close: &str) -> String {
    let mut out = String::new();
    for span in spans {
        if span.is_match {
            out.push_str(open);
            out.push_str(&span.text);
            out.push_str(close);
        } else {
            out.push_str(&span.text);
        }
    }
    out
}
