use crate::normalize::normalize;
use regex::Regex;
use std::sync::LazyLock;

pub(crate) static RE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6}) ").unwrap());
pub(crate) static RE_CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```[^\n]*\n(.*?)```\s*$").unwrap());
pub(crate) static RE_UL_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*+-]\s+").unwrap());
pub(crate) static RE_OL_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

/// Splits a document into trimmed, non-empty blocks on blank-line
/// boundaries.
pub fn split_blocks(document: &str) -> Vec<String> {
    normalize(document)
        .split("\n\n")
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_quote(block: &str) -> bool {
    block.split('\n').all(|l| l.starts_with('>'))
}

fn is_unordered_list(block: &str) -> bool {
    block.split('\n').all(|l| RE_UL_ITEM.is_match(l))
}

/// Every line must be numbered, starting at 1 with no gaps.
fn is_ordered_list(block: &str) -> bool {
    let mut expected: u64 = 1;
    for line in block.split('\n') {
        let Some(caps) = RE_OL_ITEM.captures(line) else {
            return false;
        };
        match caps[1].parse::<u64>() {
            Ok(n) if n == expected => expected += 1,
            _ => return false,
        }
    }
    true
}

pub fn classify(block: &str) -> BlockType {
    if RE_HEADING.is_match(block) {
        BlockType::Heading
    } else if RE_CODE_FENCE.is_match(block) {
        BlockType::Code
    } else if is_quote(block) {
        BlockType::Quote
    } else if is_unordered_list(block) {
        BlockType::UnorderedList
    } else if is_ordered_list(block) {
        BlockType::OrderedList
    } else {
        BlockType::Paragraph
    }
}
