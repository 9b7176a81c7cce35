//! Markdown whitespace normalisation.
//!
//! Line-oriented and idempotent: `normalize(normalize(x)) == normalize(x)`.
//! Fenced code blocks keep their content; only line endings, trailing
//! whitespace and runs of blank lines change inside them.

use regex::Regex;

/// Compiled patterns for [`MarkdownNormalizer::normalize`].
#[derive(Debug, Clone)]
pub struct MarkdownNormalizer {
    heading: Regex,
    list_item: Regex,
    fence: Regex,
}

impl MarkdownNormalizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            heading: Regex::new(r"^(#{1,6})[ \t]+(\S.*)$")?,
            list_item: Regex::new(r"^([ \t]*)([-*+]|\d+\.)[ \t]+(\S.*)$")?,
            fence: Regex::new(r"^[ \t]*(```|~~~)")?,
        })
    }

    /// Normalise line endings, heading/list/fence spacing, blank-line runs,
    /// trailing whitespace and the final newline.
    pub fn normalize(&self, content: &str) -> String {
        let unified = content.replace("\r\n", "\n").replace('\r', "\n");

        let mut lines: Vec<String> = Vec::new();
        let mut in_fence = false;

        for raw in unified.split('\n') {
            let line = raw.trim_end();

            if self.fence.is_match(line) {
                if !in_fence {
                    push_separator(&mut lines);
                    lines.push(line.to_string());
                } else {
                    lines.push(line.to_string());
                    lines.push(String::new());
                }
                in_fence = !in_fence;
                continue;
            }

            if in_fence {
                lines.push(line.to_string());
                continue;
            }

            if let Some(caps) = self.heading.captures(line) {
                push_separator(&mut lines);
                lines.push(format!("{} {}", &caps[1], caps[2].trim_end()));
                continue;
            }

            if let Some(caps) = self.list_item.captures(line) {
                lines.push(format!("{}{} {}", &caps[1], &caps[2], &caps[3]));
                continue;
            }

            lines.push(line.to_string());
        }

        collapse_blank_runs(lines)
    }
}

/// Ensure the next pushed line is preceded by exactly one blank line,
/// unless it starts the document.
fn push_separator(lines: &mut Vec<String>) {
    if lines.last().is_some_and(|l| !l.is_empty()) {
        lines.push(String::new());
    }
}

fn collapse_blank_runs(lines: Vec<String>) -> String {
    let mut out = String::new();
    let mut blank_run = 0usize;
    let mut started = false;

    for line in lines {
        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        if started && blank_run > 0 {
            out.push('\n');
        }
        out.push_str(&line);
        out.push('\n');
        started = true;
        blank_run = 0;
    }

    if out.is_empty() {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> String {
        MarkdownNormalizer::new().unwrap().normalize(s)
    }

    #[test]
    fn converts_line_endings_and_adds_final_newline() {
        assert_eq!(norm("a\r\nb\rc"), "a\nb\nc\n");
    }

    #[test]
    fn headings_get_single_space_and_leading_blank_line() {
        assert_eq!(norm("intro\n##   Title  \ntext"), "intro\n\n## Title\ntext\n");
    }

    #[test]
    fn list_markers_get_single_space() {
        assert_eq!(norm("-   one\n  *\ttwo\n10.   ten"), "- one\n  * two\n10. ten\n");
    }

    #[test]
    fn code_fences_are_separated_and_preserved() {
        let input = "text\n```rust\n#   not a heading\n-   not a list\n```\nafter";
        let expected = "text\n\n```rust\n#   not a heading\n-   not a list\n```\n\nafter\n";
        assert_eq!(norm(input), expected);
    }

    #[test]
    fn blank_runs_collapse_and_trailing_space_is_removed() {
        assert_eq!(norm("a   \n\n\n\nb\t\n\n"), "a\n\nb\n");
    }

    #[test]
    fn horizontal_rules_are_not_list_items() {
        assert_eq!(norm("---\n***"), "---\n***\n");
    }

    #[test]
    fn normalisation_is_idempotent() {
        let input = "# T\r\n\r\n\r\nsome  \n-  a\n```\ncode\n```\n## Next\n";
        let once = norm(input);
        assert_eq!(norm(&once), once);
    }

    #[test]
    fn empty_input_becomes_single_newline() {
        assert_eq!(norm(""), "\n");
    }
}
