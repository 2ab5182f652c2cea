/// Normalizes line endings, strips trailing whitespace, and removes the
/// indentation shared by every non-blank line.
pub fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = text.split('\n').map(|l| l.trim_end()).collect();
    let indent = common_indent(&lines);
    lines
        .iter()
        .map(|l| l.strip_prefix(indent).unwrap_or(*l))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only spaces and tabs count as indentation.
fn leading_whitespace(line: &str) -> &str {
    let end = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..end]
}

/// Longest whitespace prefix shared by all non-blank lines.
fn common_indent<'a>(lines: &[&'a str]) -> &'a str {
    let mut common: Option<&'a str> = None;
    for line in lines.iter().filter(|l| !l.is_empty()) {
        let ws = leading_whitespace(*line);
        common = Some(match common {
            None => ws,
            Some(prev) => {
                let shared = prev
                    .char_indices()
                    .zip(ws.chars())
                    .find(|((_, a), b)| a != b)
                    .map_or(prev.len().min(ws.len()), |((i, _), _)| i);
                &prev[..shared]
            }
        });
    }
    common.unwrap_or("")
}
