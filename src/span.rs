use crate::node::Node;

/// Semantic role of a span. Links and images carry their target, so a url
/// exists exactly when the role needs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link(String),
    Image(String),
}

/// A run of inline text with its semantic role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub text: String,
    pub kind: SpanKind,
}

impl InlineSpan {
    pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
        InlineSpan {
            text: text.into(),
            kind,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        InlineSpan::new(text, SpanKind::Plain)
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        InlineSpan::new(text, SpanKind::Link(url.into()))
    }

    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        InlineSpan::new(alt, SpanKind::Image(url.into()))
    }

    pub fn url(&self) -> Option<&str> {
        match &self.kind {
            SpanKind::Link(url) | SpanKind::Image(url) => Some(url.as_str()),
            _ => None,
        }
    }

    pub fn is_plain(&self) -> bool {
        self.kind == SpanKind::Plain
    }
}

pub fn span_to_node(span: &InlineSpan) -> Node {
    let text = span.text.as_str();
    match &span.kind {
        SpanKind::Plain => Node::text(text),
        SpanKind::Bold => Node::leaf("b", text),
        SpanKind::Italic => Node::leaf("i", text),
        SpanKind::Code => Node::leaf("code", text),
        SpanKind::Link(url) => Node::leaf("a", text).with_attr("href", url.as_str()),
        SpanKind::Image(url) => Node::leaf("img", "")
            .with_attr("src", url.as_str())
            .with_attr("alt", text),
    }
}
