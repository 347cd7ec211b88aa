//! Paragraph wrapping for remarks and chat messages.

use textwrap::{Options, WordSeparator};

/// Wrap `text` to `width` columns, one output entry per display line.
///
/// Listing remarks often arrive with `\r\n` endings and stacks of blank lines;
/// line endings are normalized and consecutive blank lines collapse into one.
/// Words wider than the column (long URLs) are split.
pub(crate) fn wrap_paragraphs(text: &str, width: usize) -> Vec<String> {
    let options = Options::new(width.max(1))
        .word_separator(WordSeparator::AsciiSpace)
        .break_words(true);
    let mut out: Vec<String> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim_end();
        if line.is_empty() {
            if out.last().is_some_and(|l| !l.is_empty()) {
                out.push(String::new());
            }
            continue;
        }
        out.extend(textwrap::wrap(line, &options).into_iter().map(|c| c.into_owned()));
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::wrap_paragraphs;

    #[test]
    fn wraps_on_spaces() {
        assert_eq!(
            wrap_paragraphs("Updated kitchen with quartz", 12),
            ["Updated", "kitchen with", "quartz"]
        );
    }

    #[test]
    fn normalizes_crlf_and_blank_runs() {
        assert_eq!(
            wrap_paragraphs("Pool.\r\n\r\n\r\nNear schools.\r\n\r\n", 40),
            ["Pool.", "", "Near schools."]
        );
    }

    #[test]
    fn leading_blank_lines_are_dropped() {
        assert_eq!(wrap_paragraphs("\n\nHello", 40), ["Hello"]);
    }

    #[test]
    fn splits_words_wider_than_column() {
        let lines = wrap_paragraphs("https://cdn.example/photo", 8);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 8));
    }
}
