/// One non-blank, non-comment source line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SourceLine<'src> {
    /// 1-based line number in the original text.
    pub number: usize,
    /// Count of leading whitespace characters.
    pub indent: usize,
    /// The line without surrounding whitespace.
    pub text: &'src str,
}

/// Split source into meaningful lines, dropping blanks and comments.
pub fn source_lines<'src>(source: &'src str, comment_marker: &str) -> Vec<SourceLine<'src>> {
    source
        .lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let text = raw.trim();
            if text.is_empty() || (!comment_marker.is_empty() && text.starts_with(comment_marker))
            {
                return None;
            }
            let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
            Some(SourceLine {
                number: i + 1,
                indent,
                text,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn skips_blank_and_comment_lines() {
        let lines = source_lines("# header\n\nshow 1\n    # note\n  show 2\r\n", "#");
        assert_eq!(
            lines,
            vec![
                SourceLine {
                    number: 3,
                    indent: 0,
                    text: "show 1"
                },
                SourceLine {
                    number: 5,
                    indent: 2,
                    text: "show 2"
                },
            ]
        );
    }

    #[test]
    fn tabs_count_as_one_column() {
        let lines = source_lines("\tshow x", "#");
        assert_eq!(lines[0].indent, 1);
    }
}
