use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Attribute map; iteration follows insertion order so output is stable.
pub type Attributes = IndexMap<String, String>;

/// A renderable HTML tree.
///
/// Leaves carry literal text, parents own their children outright. Text and
/// attribute values are emitted verbatim: nothing is HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        tag: Option<String>,
        value: Option<String>,
        attributes: Attributes,
    },
    Parent {
        tag: Option<String>,
        children: Vec<Node>,
        attributes: Attributes,
    },
}

impl Node {
    /// Untagged leaf; renders as its raw text.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: None,
            value: Some(value.into()),
            attributes: Attributes::new(),
        }
    }

    pub fn leaf(tag: &str, value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: Some(tag.to_string()),
            value: Some(value.into()),
            attributes: Attributes::new(),
        }
    }

    pub fn parent(tag: &str, children: Vec<Node>) -> Self {
        Node::Parent {
            tag: Some(tag.to_string()),
            children,
            attributes: Attributes::new(),
        }
    }

    /// Appends an attribute, keeping earlier ones first.
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        match &mut self {
            Node::Leaf { attributes, .. } | Node::Parent { attributes, .. } => {
                attributes.insert(key.to_string(), value.into());
            }
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf { tag, .. } | Node::Parent { tag, .. } => tag.as_deref(),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Parent { children, .. } => children,
        }
    }

    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<()> {
        match self {
            Node::Leaf {
                tag,
                value,
                attributes,
            } => match (tag.as_deref(), value.as_deref()) {
                (None, None) => return Err(Error::MissingContent),
                (None, Some(value)) => out.push_str(value),
                (Some(tag), value) => {
                    open_tag(out, tag, attributes);
                    out.push_str(value.unwrap_or(""));
                    close_tag(out, tag);
                }
            },
            Node::Parent {
                tag,
                children,
                attributes,
            } => {
                let tag = match tag.as_deref() {
                    Some(t) if !t.is_empty() => t,
                    _ => {
                        return Err(Error::InvalidStructure(
                            "parent node has no tag".to_string(),
                        ))
                    }
                };
                if children.is_empty() {
                    return Err(Error::InvalidStructure(format!(
                        "<{}> parent node has no children",
                        tag
                    )));
                }
                open_tag(out, tag, attributes);
                for child in children {
                    child.render_into(out)?;
                }
                close_tag(out, tag);
            }
        }
        Ok(())
    }
}

pub fn attributes_to_html(attributes: &Attributes) -> String {
    let mut out = String::new();
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out
}

fn open_tag(out: &mut String, tag: &str, attributes: &Attributes) {
    out.push('<');
    out.push_str(tag);
    out.push_str(&attributes_to_html(attributes));
    out.push('>');
}

fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
