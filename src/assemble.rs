use crate::blocks::{classify, split_blocks, BlockType, RE_CODE_FENCE, RE_OL_ITEM, RE_UL_ITEM};
use crate::error::{Error, Result};
use crate::inline::text_to_children;
use crate::node::Node;
use regex::Regex;
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Converts one classified block into its HTML subtree.
pub fn assemble(block: &str, block_type: BlockType) -> Result<Node> {
    match block_type {
        BlockType::Paragraph => paragraph(block),
        BlockType::Heading => heading(block),
        BlockType::Code => Ok(code(block)),
        BlockType::Quote => quote(block),
        BlockType::UnorderedList => list(block, "ul", &RE_UL_ITEM),
        BlockType::OrderedList => list(block, "ol", &RE_OL_ITEM),
    }
}

fn paragraph(block: &str) -> Result<Node> {
    let text = RE_WHITESPACE.replace_all(block, " ");
    Ok(Node::parent("p", text_to_children(&text)?))
}

fn heading(block: &str) -> Result<Node> {
    let hashes = block.chars().take_while(|c| *c == '#').count();
    let level = if (1..=6).contains(&hashes) { hashes } else { 1 };
    let content = block[hashes..].trim();
    Ok(Node::parent(&format!("h{}", level), text_to_children(content)?))
}

/// Fence contents are kept verbatim; no inline parsing.
fn code(block: &str) -> Node {
    let body = RE_CODE_FENCE
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map_or(block, |m| m.as_str());
    Node::parent("pre", vec![Node::parent("code", vec![Node::text(body)])])
}

fn quote(block: &str) -> Result<Node> {
    let content = block
        .split('\n')
        .map(|line| match line.strip_prefix('>') {
            Some(rest) => rest.trim_start(),
            None => line,
        })
        .collect::<Vec<_>>()
        .join(" ");
    Ok(Node::parent("blockquote", text_to_children(&content)?))
}

fn list(block: &str, tag: &str, marker: &Regex) -> Result<Node> {
    let mut items = Vec::new();
    for line in block.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let content = marker.replace(line, "");
        items.push(Node::parent("li", text_to_children(&content)?));
    }
    Ok(Node::parent(tag, items))
}

/// Parses a whole document into a `<div>` rooted tree, one child per block.
pub fn markdown_to_html_node(markdown: &str) -> Result<Node> {
    let mut children = Vec::new();
    for block in split_blocks(markdown) {
        let block_type = classify(&block);
        log::debug!("block {}: {:?}", children.len(), block_type);
        children.push(assemble(&block, block_type)?);
    }
    Ok(Node::parent("div", children))
}

/// Text of the first `# ` line in the document.
pub fn extract_title(markdown: &str) -> Result<String> {
    split_blocks(markdown)
        .iter()
        .flat_map(|block| block.split('\n'))
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(Error::NoTitle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn html(md: &str) -> String {
        markdown_to_html_node(md).unwrap().render().unwrap()
    }

    #[test]
    fn test_heading_round_trip() {
        let block = "# Title";
        let node = assemble(block, classify(block)).unwrap();
        assert_eq!(node.render().unwrap(), "<h1>Title</h1>");
    }

    #[test]
    fn test_heading_levels() {
        let node = assemble("### Deep _dive_", BlockType::Heading).unwrap();
        assert_eq!(node.render().unwrap(), "<h3>Deep <i>dive</i></h3>");
    }

    #[test]
    fn test_heading_clamps_bad_level() {
        let node = assemble("####### seven", BlockType::Heading).unwrap();
        assert_eq!(node.render().unwrap(), "<h1>seven</h1>");
    }

    #[test]
    fn test_paragraph_collapses_whitespace() {
        let node = assemble("one\ntwo   three", BlockType::Paragraph).unwrap();
        assert_eq!(node.render().unwrap(), "<p>one two three</p>");
    }

    #[test]
    fn test_code_is_not_parsed() {
        let node = assemble("```\nlet _x_ = **y**;\n```", BlockType::Code).unwrap();
        assert_eq!(
            node.render().unwrap(),
            "<pre><code>let _x_ = **y**;\n</code></pre>"
        );
    }

    #[test]
    fn test_code_with_language_tag() {
        let node = assemble("```rust\nfn main() {}\n```", BlockType::Code).unwrap();
        assert_eq!(node.render().unwrap(), "<pre><code>fn main() {}\n</code></pre>");
    }

    #[test]
    fn test_quote_strips_markers() {
        let node = assemble("> This is a\n>blockquote **block**", BlockType::Quote).unwrap();
        assert_eq!(
            node.render().unwrap(),
            "<blockquote>This is a blockquote <b>block</b></blockquote>"
        );
    }

    #[test]
    fn test_unordered_list() {
        let node = assemble("- a\n* _b_\n+ c", BlockType::UnorderedList).unwrap();
        assert_eq!(
            node.render().unwrap(),
            "<ul><li>a</li><li><i>b</i></li><li>c</li></ul>"
        );
    }

    #[test]
    fn test_ordered_list() {
        let node = assemble("1. first\n2. `second`", BlockType::OrderedList).unwrap();
        assert_eq!(
            node.render().unwrap(),
            "<ol><li>first</li><li><code>second</code></li></ol>"
        );
    }

    #[test]
    fn test_inline_error_propagates() {
        assert!(matches!(
            assemble("a **b", BlockType::Paragraph),
            Err(Error::UnclosedDelimiter { .. })
        ));
    }

    #[test]
    fn test_paragraphs() {
        let md = "
    This is **bolded** paragraph
    text in a p
    tag here

    This is another paragraph with _italic_ text and `code` here

    ";
        assert_eq!(
            html(md),
            "<div><p>This is <b>bolded</b> paragraph text in a p tag here</p><p>This is another paragraph with <i>italic</i> text and <code>code</code> here</p></div>"
        );
    }

    #[test]
    fn test_lists() {
        let md = "
- This is a list
- with items
- and _more_ items

1. This is an `ordered` list
2. with items
3. and more items

";
        assert_eq!(
            html(md),
            "<div><ul><li>This is a list</li><li>with items</li><li>and <i>more</i> items</li></ul><ol><li>This is an <code>ordered</code> list</li><li>with items</li><li>and more items</li></ol></div>"
        );
    }

    #[test]
    fn test_headings() {
        let md = "
# this is an h1

this is paragraph text

## this is an h2
";
        assert_eq!(
            html(md),
            "<div><h1>this is an h1</h1><p>this is paragraph text</p><h2>this is an h2</h2></div>"
        );
    }

    #[test]
    fn test_blockquote() {
        let md = "
> This is a
> blockquote block

this is paragraph text

";
        assert_eq!(
            html(md),
            "<div><blockquote>This is a blockquote block</blockquote><p>this is paragraph text</p></div>"
        );
    }

    #[test]
    fn test_codeblock() {
        let md = "
    ```
    This is text that _should_ remain
    the **same** even with inline stuff
    ```
    ";
        assert_eq!(
            html(md),
            "<div><pre><code>This is text that _should_ remain\nthe **same** even with inline stuff\n</code></pre></div>"
        );
    }

    #[test]
    fn test_empty_document_has_no_children() {
        let node = markdown_to_html_node("").unwrap();
        assert!(node.children().is_empty());
        assert!(matches!(node.render(), Err(Error::InvalidStructure(_))));
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("# Hello").unwrap(), "Hello");
    }

    #[test]
    fn test_extract_title_multiline() {
        let md = "\nHello\nHello!!!\n# Helllllllooooo\n";
        assert_eq!(extract_title(md).unwrap(), "Helllllllooooo");
    }

    #[test]
    fn test_extract_title_skips_h2() {
        let md = "## Sub\n\n#  Spaced Title  ";
        assert_eq!(extract_title(md).unwrap(), "Spaced Title");
    }

    #[test]
    fn test_extract_title_requires_space() {
        assert!(matches!(extract_title("#Hello"), Err(Error::NoTitle)));
    }

    #[test]
    fn test_extract_title_missing() {
        assert!(matches!(extract_title("Hello"), Err(Error::NoTitle)));
    }
}
