pub mod assemble;
pub mod blocks;
pub mod config;
pub mod error;
pub mod inline;
pub mod node;
pub mod normalize;
pub mod site;
pub mod span;

pub use error::{Error, Result};

/// Converts a Markdown document to an HTML fragment rooted at `<div>`.
///
/// Fails with the first error met; nothing is partially rendered.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    // Stage 1: blocks -> classified subtrees
    let root = assemble::markdown_to_html_node(markdown)?;

    // Stage 2: serialize
    root.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_bold() {
        let html = markdown_to_html("# h\n\nparagraph with **bold**").unwrap();
        assert_eq!(html, "<div><h1>h</h1><p>paragraph with <b>bold</b></p></div>");
    }

    #[test]
    fn test_unordered_list() {
        let html = markdown_to_html("- a\n- b").unwrap();
        assert_eq!(html, "<div><ul><li>a</li><li>b</li></ul></div>");
    }

    #[test]
    fn test_determinism() {
        let input = "# Title\n\nSome _text_.\n\n- item\n";
        assert_eq!(
            markdown_to_html(input).unwrap(),
            markdown_to_html(input).unwrap()
        );
    }

    #[test]
    fn test_first_error_is_returned() {
        let result = markdown_to_html("fine\n\nnot `fine\n\nalso **not");
        assert!(matches!(
            result,
            Err(Error::UnclosedDelimiter { ref delimiter }) if delimiter == "`"
        ));
    }

    #[test]
    fn test_empty_document_is_rejected() {
        assert!(matches!(
            markdown_to_html(""),
            Err(Error::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_non_breaking_space_does_not_indent_list_items() {
        assert_eq!(
            markdown_to_html("\u{a0}- a\n\u{a0}- b").unwrap(),
            "<div><p>- a - b</p></div>"
        );
    }
}
