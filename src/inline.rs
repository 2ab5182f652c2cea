use crate::error::{Error, Result};
use crate::node::Node;
use crate::span::{span_to_node, InlineSpan, SpanKind};
use regex::Regex;
use std::sync::LazyLock;

static RE_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());
static RE_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// Emphasis delimiters, applied in this order.
const DELIMITERS: &[(&str, SpanKind)] = &[
    ("**", SpanKind::Bold),
    ("_", SpanKind::Italic),
    ("`", SpanKind::Code),
];

/// A bracket construct found in plain text: byte range plus label and url.
struct BracketMatch {
    start: usize,
    end: usize,
    label: String,
    url: String,
}

fn image_matches(text: &str) -> Vec<BracketMatch> {
    RE_IMAGE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(BracketMatch {
                start: whole.start(),
                end: whole.end(),
                label: caps[1].to_string(),
                url: caps[2].to_string(),
            })
        })
        .collect()
}

/// Like `image_matches`, minus anything directly after `!`. Labels cannot
/// contain `[`, so a skipped image never hides a link inside it.
fn link_matches(text: &str) -> Vec<BracketMatch> {
    RE_LINK
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if text[..whole.start()].ends_with('!') {
                return None;
            }
            Some(BracketMatch {
                start: whole.start(),
                end: whole.end(),
                label: caps[1].to_string(),
                url: caps[2].to_string(),
            })
        })
        .collect()
}

/// `(alt, url)` pairs for every `![alt](url)` in `text`.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    image_matches(text)
        .into_iter()
        .map(|m| (m.label, m.url))
        .collect()
}

/// `(label, url)` pairs for every `[label](url)` not preceded by `!`.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    link_matches(text)
        .into_iter()
        .map(|m| (m.label, m.url))
        .collect()
}

/// Splits plain spans on `delimiter`; odd-indexed pieces become `kind`.
/// Non-plain spans pass through untouched.
pub fn split_nodes_delimiter(
    spans: Vec<InlineSpan>,
    delimiter: &str,
    kind: SpanKind,
) -> Result<Vec<InlineSpan>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() || !span.text.contains(delimiter) {
            out.push(span);
            continue;
        }
        let parts: Vec<&str> = span.text.split(delimiter).collect();
        if parts.len() % 2 == 0 {
            return Err(Error::UnclosedDelimiter {
                delimiter: delimiter.to_string(),
            });
        }
        for (i, part) in parts.into_iter().enumerate() {
            if part.is_empty() {
                continue;
            }
            if i % 2 == 0 {
                out.push(InlineSpan::plain(part));
            } else {
                out.push(InlineSpan::new(part, kind.clone()));
            }
        }
    }
    Ok(out)
}

fn split_nodes_bracketed(
    spans: Vec<InlineSpan>,
    find: fn(&str) -> Vec<BracketMatch>,
    build: fn(String, String) -> InlineSpan,
) -> Vec<InlineSpan> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if !span.is_plain() || span.text.is_empty() {
            out.push(span);
            continue;
        }
        let matches = find(&span.text);
        if matches.is_empty() {
            out.push(span);
            continue;
        }
        let mut cursor = 0;
        for m in matches {
            if m.start > cursor {
                out.push(InlineSpan::plain(&span.text[cursor..m.start]));
            }
            out.push(build(m.label, m.url));
            cursor = m.end;
        }
        if cursor < span.text.len() {
            out.push(InlineSpan::plain(&span.text[cursor..]));
        }
    }
    out
}

pub fn split_nodes_image(spans: Vec<InlineSpan>) -> Vec<InlineSpan> {
    split_nodes_bracketed(spans, image_matches, |alt, url| InlineSpan::image(alt, url))
}

pub fn split_nodes_link(spans: Vec<InlineSpan>) -> Vec<InlineSpan> {
    split_nodes_bracketed(spans, link_matches, |label, url| InlineSpan::link(label, url))
}

pub fn text_to_spans(text: &str) -> Result<Vec<InlineSpan>> {
    let mut spans = vec![InlineSpan::plain(text)];
    for (delimiter, kind) in DELIMITERS {
        spans = split_nodes_delimiter(spans, delimiter, kind.clone())?;
    }
    let spans = split_nodes_image(spans);
    let spans = split_nodes_link(spans);
    log::trace!("inline: {} span(s) from {} byte(s)", spans.len(), text.len());
    Ok(spans)
}

/// Parses inline markup and converts every span to a leaf node.
pub fn text_to_children(text: &str) -> Result<Vec<Node>> {
    Ok(text_to_spans(text)?.iter().map(span_to_node).collect())
}
