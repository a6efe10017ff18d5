//! Phrase templates and case-insensitive text helpers.
//!
//! A [`Template`] is compiled from a vocabulary entry such as
//! `"set {name} to {expr}"` and matched against a whole line. Literal text
//! compares case-insensitively, a space in the template matches any run of
//! whitespace, and typographic apostrophes compare equal to `'`.

use std::fmt;

/// What a slot accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotKind {
    /// A single identifier.
    Word,
    /// Any non-empty text.
    Text,
    /// Any text, possibly empty.
    Optional,
}

impl SlotKind {
    fn for_name(name: &str) -> Self {
        match name {
            "name" | "var" | "type" => SlotKind::Word,
            "params" | "_" => SlotKind::Optional,
            _ => SlotKind::Text,
        }
    }

    fn accepts(self, captured: &str) -> bool {
        match self {
            SlotKind::Word => is_identifier(captured),
            SlotKind::Text => !captured.is_empty(),
            SlotKind::Optional => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(Vec<char>),
    Slot { name: String, kind: SlotKind },
}

/// A compiled phrase template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

/// Slot values captured by a successful match, trimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Captures<'t> {
    values: Vec<(String, &'t str)>,
}

impl<'t> Captures<'t> {
    pub fn get(&self, slot: &str) -> Option<&'t str> {
        self.values
            .iter()
            .find(|(name, _)| name == slot)
            .map(|(_, value)| *value)
    }

    /// Captured text, or `""` when the slot is absent.
    pub fn text(&self, slot: &str) -> &'t str {
        self.get(slot).unwrap_or("")
    }
}

impl Template {
    /// Compile a template string. Unterminated `{` is taken literally.
    pub fn new(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = Vec::new();
        let mut rest = source;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|c| open + c) else {
                break;
            };
            literal.extend(rest[..open].chars().map(normalize_char));
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            let name = rest[open + 1..close].trim().to_string();
            let kind = SlotKind::for_name(&name);
            segments.push(Segment::Slot { name, kind });
            rest = &rest[close + 1..];
        }
        literal.extend(rest.chars().map(normalize_char));
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Template {
            source: source.to_string(),
            segments,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Match the whole of `text`.
    pub fn matches<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        let text = text.trim();
        let mut values = Vec::new();
        if self.match_from(0, text, 0, &mut values) {
            Some(Captures { values })
        } else {
            None
        }
    }

    /// Substitute slot values back into the template.
    pub fn fill(&self, values: &[(&str, &str)]) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(chars) => out.extend(chars.iter()),
                Segment::Slot { name, .. } => {
                    if let Some((_, value)) = values.iter().find(|(slot, _)| slot == name) {
                        out.push_str(value);
                    }
                }
            }
        }
        out
    }

    fn match_from<'t>(
        &self,
        seg: usize,
        text: &'t str,
        pos: usize,
        values: &mut Vec<(String, &'t str)>,
    ) -> bool {
        let Some(segment) = self.segments.get(seg) else {
            return pos == text.len();
        };
        match segment {
            Segment::Literal(chars) => match match_literal(chars, text, pos) {
                Some(end) => self.match_from(seg + 1, text, end, values),
                None => false,
            },
            Segment::Slot { name, kind } => match self.segments.get(seg + 1) {
                None => {
                    let captured = text[pos..].trim();
                    if !kind.accepts(captured) {
                        return false;
                    }
                    values.push((name.clone(), captured));
                    true
                }
                Some(Segment::Literal(next)) => {
                    let candidates = text[pos..]
                        .char_indices()
                        .map(|(i, _)| pos + i)
                        .chain(std::iter::once(text.len()));
                    for split in candidates {
                        let captured = text[pos..split].trim();
                        if !kind.accepts(captured) {
                            continue;
                        }
                        let Some(end) = match_literal(next, text, split) else {
                            continue;
                        };
                        values.push((name.clone(), captured));
                        if self.match_from(seg + 2, text, end, values) {
                            return true;
                        }
                        values.pop();
                    }
                    false
                }
                Some(Segment::Slot { .. }) => {
                    let start = skip_whitespace(text, pos);
                    let end = text[start..]
                        .char_indices()
                        .find(|(_, c)| !is_word_char(*c))
                        .map_or(text.len(), |(i, _)| start + i);
                    let captured = &text[start..end];
                    if !kind.accepts(captured) {
                        return false;
                    }
                    values.push((name.clone(), captured));
                    if self.match_from(seg + 1, text, end, values) {
                        return true;
                    }
                    values.pop();
                    false
                }
            },
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// An ordered list of templates; the first match wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateSet {
    templates: Vec<Template>,
}

impl TemplateSet {
    pub fn new<S: AsRef<str>>(sources: &[S]) -> Self {
        TemplateSet {
            templates: sources.iter().map(|s| Template::new(s.as_ref())).collect(),
        }
    }

    pub fn matches<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.templates.iter().find_map(|t| t.matches(text))
    }

    /// The template used when printing.
    pub fn first(&self) -> Option<&Template> {
        self.templates.first()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Try to match `literal` at byte offset `pos`, returning the end offset.
fn match_literal(literal: &[char], text: &str, pos: usize) -> Option<usize> {
    let mut chars = text[pos..].char_indices().peekable();
    let mut end = pos;
    for &expected in literal {
        if expected == ' ' {
            let mut seen = false;
            while let Some(&(i, c)) = chars.peek() {
                if !c.is_whitespace() {
                    break;
                }
                seen = true;
                end = pos + i + c.len_utf8();
                chars.next();
            }
            if !seen {
                return None;
            }
        } else {
            let (i, c) = chars.next()?;
            if !chars_eq(c, expected) {
                return None;
            }
            end = pos + i + c.len_utf8();
        }
    }
    Some(end)
}

fn skip_whitespace(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map_or(text.len(), |(i, _)| pos + i)
}

fn normalize_char(c: char) -> char {
    match c {
        '\u{2019}' | '\u{2018}' | '`' => '\'',
        _ => c,
    }
}

/// Case-insensitive, apostrophe-insensitive character comparison.
pub fn chars_eq(a: char, b: char) -> bool {
    let (a, b) = (normalize_char(a), normalize_char(b));
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Case-insensitive string equality.
pub fn eq_ci(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count() && a.chars().zip(b.chars()).all(|(x, y)| chars_eq(x, y))
}

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A single identifier: word characters, not starting with a digit.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => chars.all(is_word_char),
        _ => false,
    }
}

/// Strip a leading phrase that ends at a word boundary.
pub fn strip_prefix_ci<'t>(text: &'t str, phrase: &str) -> Option<&'t str> {
    let literal: Vec<char> = phrase.chars().map(normalize_char).collect();
    let end = match_literal(&literal, text, 0)?;
    let rest = &text[end..];
    match rest.chars().next() {
        Some(c) if is_word_char(c) => None,
        _ => Some(rest.trim_start()),
    }
}

/// Strip a trailing word or phrase preceded by whitespace.
pub fn strip_suffix_ci<'t>(text: &'t str, phrase: &str) -> Option<&'t str> {
    let text = text.trim_end();
    let wanted = phrase.chars().count();
    if wanted == 0 {
        return None;
    }
    let start = text.char_indices().rev().nth(wanted - 1)?.0;
    if !eq_ci(&text[start..], phrase) {
        return None;
    }
    let head = &text[..start];
    match head.chars().next_back() {
        Some(c) if c.is_whitespace() => Some(head.trim_end()),
        _ => None,
    }
}

/// Split on a separator word, ignoring quoted text and parentheses.
///
/// The separator must be surrounded by whitespace. Empty pieces are dropped.
pub fn split_on_word<'t>(text: &'t str, word: &str) -> Vec<&'t str> {
    let separator: Vec<char> = format!(" {word} ").chars().map(normalize_char).collect();
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut skip_until = 0;
    for (i, c) in text.char_indices() {
        if i < skip_until {
            continue;
        }
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' => quote = Some('"'),
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                _ if depth == 0 && c.is_whitespace() => {
                    if let Some(end) = match_literal(&separator, text, i) {
                        pieces.push(text[start..i].trim());
                        // Leave the trailing whitespace so the next separator can match.
                        let resume = text[..end].trim_end().len();
                        start = resume;
                        skip_until = resume;
                    }
                }
                _ => {}
            },
        }
    }
    pieces.push(text[start..].trim());
    pieces.retain(|p| !p.is_empty());
    pieces
}

/// Split on commas outside quotes and brackets.
pub fn split_commas(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' => quote = Some('"'),
                '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    pieces.push(text[start..i].trim());
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    pieces.push(text[start..].trim());
    pieces.retain(|p| !p.is_empty());
    pieces
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn literal_and_slots() {
        let t = Template::new("set {name} to {expr}");
        let caps = t.matches("Set total to total plus 1").unwrap();
        assert_eq!(caps.get("name"), Some("total"));
        assert_eq!(caps.get("expr"), Some("total plus 1"));
    }

    #[test]
    fn word_slot_rejects_phrases() {
        let t = Template::new("set {name} to {expr}");
        assert!(t.matches("set my total to 3").is_none());
    }

    #[test]
    fn backtracks_to_the_last_separator_when_needed() {
        let t = Template::new("add {expr} to {name}");
        let caps = t.matches("add \"up to here\" to notes").unwrap();
        assert_eq!(caps.text("expr"), "\"up to here\"");
        assert_eq!(caps.text("name"), "notes");
    }

    #[test]
    fn optional_slot_may_be_empty() {
        let t = Template::new("ask the user{_}for a value for {name}");
        let caps = t.matches("Ask the user for a value for age").unwrap();
        assert_eq!(caps.text("_"), "");
        assert_eq!(caps.text("name"), "age");
        let caps = t
            .matches("ask the user politely for a value for age")
            .unwrap();
        assert_eq!(caps.text("_"), "politely");
    }

    #[test]
    fn word_followed_by_optional_takes_identifier_run() {
        let t = Template::new("create a function named {name}{params}");
        let caps = t
            .matches("Create a function named double that takes a number")
            .unwrap();
        assert_eq!(caps.text("name"), "double");
        assert_eq!(caps.text("params"), "that takes a number");
        let caps = t.matches("create a function named hello").unwrap();
        assert_eq!(caps.text("params"), "");
    }

    #[test]
    fn whitespace_runs_and_apostrophes() {
        let t = Template::new("j'ai un {type} appelé {name}");
        let caps = t.matches("J\u{2019}ai  un nombre   appelé x").unwrap();
        assert_eq!(caps.text("type"), "nombre");
        assert_eq!(caps.text("name"), "x");
    }

    #[test]
    fn literal_must_end_on_boundary_of_text() {
        let t = Template::new("break");
        assert!(t.matches("Break").is_some());
        assert!(t.matches("breakfast").is_none());
        let t = Template::new("show {expr}");
        assert!(t.matches("showtime").is_none());
    }

    #[test]
    fn fill_reverses_matching() {
        let t = Template::new("for each {var} in {source}");
        assert_eq!(
            t.fill(&[("var", "x"), ("source", "items")]),
            "for each x in items"
        );
    }

    #[test]
    fn prefix_and_suffix_helpers() {
        assert_eq!(strip_prefix_ci("That takes a and b", "that takes"), Some("a and b"));
        assert_eq!(strip_prefix_ci("thatch", "that"), None);
        assert_eq!(strip_suffix_ci("x plus 1 Line", "line"), Some("x plus 1"));
        assert_eq!(strip_suffix_ci("outline", "line"), None);
        assert_eq!(
            strip_suffix_ci("score à l'écran", "à l'écran"),
            Some("score")
        );
    }

    #[test]
    fn split_on_conjunction_respects_quotes_and_parens() {
        assert_eq!(split_on_word("a and b and c", "and"), vec!["a", "b", "c"]);
        assert_eq!(
            split_on_word("\"salt and pepper\" and max(x, y)", "and"),
            vec!["\"salt and pepper\"", "max(x, y)"]
        );
        assert_eq!(split_on_word("brand and band", "and"), vec!["brand", "band"]);
        assert_eq!(split_on_word("a ET b", "et"), vec!["a", "b"]);
    }

    #[test]
    fn split_commas_is_depth_aware() {
        assert_eq!(
            split_commas("1, max(2, 3), [4, 5], \"a,b\""),
            vec!["1", "max(2, 3)", "[4, 5]", "\"a,b\""]
        );
    }

    #[test]
    fn identifiers_allow_unicode_letters() {
        assert!(is_identifier("résultat"));
        assert!(is_identifier("param_2"));
        assert!(!is_identifier("2x"));
        assert!(!is_identifier("a b"));
        assert!(!is_identifier(""));
    }
}
