//! Markdown input handling.
//!
//! Markdown documents are parsed with pulldown-cmark and reduced to prose,
//! one paragraph per line, which is the shape [`crate::document`] expects.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip markdown formatting, returning prose with one paragraph per line.
///
/// Removes code blocks, inline code, HTML, YAML frontmatter, headings and
/// tables. Keeps link text, blockquote text, list items and emphasized text
/// (without markers). Each paragraph and list item ends up on its own line.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_paragraphs(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut result = String::with_capacity(text.len());
    let mut skip_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Heading { .. } | Tag::Table(_)) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Heading(_) | TagEnd::Table) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            Event::Text(t) if skip_depth == 0 => result.push_str(&t),
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => result.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Item) if skip_depth == 0 => {
                end_line(&mut result);
            }
            _ => {}
        }
    }

    end_line(&mut result);
    result
}

fn end_line(result: &mut String) {
    let trimmed = result.trim_end_matches([' ', '\t']).len();
    result.truncate(trimmed);
    if !result.is_empty() && !result.ends_with('\n') {
        result.push('\n');
    }
}

/// Strip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };
    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_become_lines() {
        let input = "Der Hund lief.\nEr war schnell.\n\nDie Katze schlief.";
        let result = strip_to_paragraphs(input);
        assert_eq!(result, "Der Hund lief. Er war schnell.\nDie Katze schlief.\n");
    }

    #[test]
    fn removes_code_blocks_and_headings() {
        let input = "# Titel\n\nEtwas Text.\n\n```rust\nlet x = 1;\n```\n\nMehr Text.";
        let result = strip_to_paragraphs(input);
        assert!(!result.contains("let x"));
        assert!(!result.contains("Titel"));
        assert_eq!(result.lines().collect::<Vec<_>>(), vec!["Etwas Text.", "Mehr Text."]);
    }

    #[test]
    fn removes_frontmatter() {
        let input = "---\nautor: Meier\n---\n\nEtwas Text.";
        let result = strip_to_paragraphs(input);
        assert!(!result.contains("autor"));
        assert!(result.contains("Etwas Text."));
    }

    #[test]
    fn keeps_link_text_and_emphasis() {
        let input = "Siehe [diese Seite](https://example.de) und **fett** hier.";
        let result = strip_to_paragraphs(input);
        assert!(result.contains("diese Seite"));
        assert!(result.contains("fett"));
        assert!(!result.contains("https://"));
        assert!(!result.contains("**"));
    }

    #[test]
    fn list_items_are_paragraphs() {
        let input = "- Erstens kam er.\n- Zweitens ging er.\n";
        let result = strip_to_paragraphs(input);
        assert_eq!(result.lines().count(), 2);
    }

    #[test]
    fn tables_are_dropped() {
        let input = "Davor.\n\n| A | B |\n|---|---|\n| 1 | 2 |\n\nDanach.";
        let result = strip_to_paragraphs(input);
        assert_eq!(result.lines().collect::<Vec<_>>(), vec!["Davor.", "Danach."]);
    }

    #[test]
    fn empty_input() {
        assert!(strip_to_paragraphs("").is_empty());
    }
}
