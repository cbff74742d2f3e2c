//! Match-centred excerpts of content bodies.
//!
//! A [`Snippet`] is returned as plain segments so the caller decides how to
//! emphasise the hit. [`Snippet::to_html`] escapes every segment before
//! wrapping the match in `<mark>`; nothing is ever interpolated raw.

use crate::fold::fold_char;

/// Characters shown when there is nothing to centre on.
pub const PREVIEW_CHARS: usize = 140;
/// Characters kept before the first match.
pub const CONTEXT_BEFORE: usize = 40;
/// Characters kept after the end of the first match.
pub const CONTEXT_AFTER: usize = 80;
pub const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snippet {
    pub leading_ellipsis: bool,
    pub before: String,
    /// `None` when the query was empty or not found.
    pub matched: Option<String>,
    pub after: String,
    pub trailing_ellipsis: bool,
}

impl Snippet {
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.matched.is_none() && self.after.is_empty()
    }

    pub fn to_html(&self) -> String {
        self.compose(escape_html, "<mark class=\"search-highlight\">", "</mark>")
    }

    /// Render with caller-chosen emphasis markers and no escaping, e.g. ANSI codes.
    pub fn to_plain(&self, open: &str, close: &str) -> String {
        self.compose(str::to_string, open, close)
    }

    fn compose(&self, seg: impl Fn(&str) -> String, open: &str, close: &str) -> String {
        let mut out = String::new();
        if self.leading_ellipsis {
            out.push_str(ELLIPSIS);
        }
        out.push_str(&seg(&self.before));
        if let Some(m) = &self.matched {
            out.push_str(open);
            out.push_str(&seg(m));
            out.push_str(close);
        }
        out.push_str(&seg(&self.after));
        if self.trailing_ellipsis {
            out.push_str(ELLIPSIS);
        }
        out
    }
}

/// Excerpt of `text` around the first case-insensitive, literal occurrence of `query`.
///
/// Without a hit the first [`PREVIEW_CHARS`] characters are returned. Lengths
/// count `char`s, never bytes.
pub fn snippet(text: &str, query: &str) -> Snippet {
    let chars: Vec<char> = text.chars().collect();
    let needle: Vec<char> = query.chars().collect();
    let hit = if needle.is_empty() { None } else { find_ignore_case(&chars, &needle) };
    let Some(idx) = hit else {
        return preview(&chars);
    };
    let start = idx.saturating_sub(CONTEXT_BEFORE);
    let match_end = idx + needle.len();
    let end = (match_end + CONTEXT_AFTER).min(chars.len());
    Snippet {
        leading_ellipsis: start > 0,
        before: chars[start..idx].iter().collect(),
        matched: Some(chars[idx..match_end].iter().collect()),
        after: chars[match_end..end].iter().collect(),
        trailing_ellipsis: end < chars.len(),
    }
}

fn preview(chars: &[char]) -> Snippet {
    let end = chars.len().min(PREVIEW_CHARS);
    Snippet {
        before: chars[..end].iter().collect(),
        trailing_ellipsis: end < chars.len(),
        ..Snippet::default()
    }
}

fn find_ignore_case(hay: &[char], needle: &[char]) -> Option<usize> {
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| {
        hay[i..i + needle.len()]
            .iter()
            .zip(needle)
            .all(|(&a, &b)| fold_char(a) == fold_char(b))
    })
}

/// Escape `& < > "` for HTML text and attribute contexts.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
