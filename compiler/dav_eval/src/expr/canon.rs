//! Operator-phrase canonicalization.
//!
//! Rewrites `x is greater than or equal to 3` into `x >= 3` before lexing.
//! Phrases are tried longest first so a shorter phrase never eats the head
//! of a longer one. A phrase only matches at word boundaries, never inside
//! quoted text, and never when it is directly followed by `(` (that is a
//! call to a function of the same name, such as `power(2, 3)`).

use dav_parse::phrase::{chars_eq, is_word_char};
use dav_vocab::Vocabulary;

pub(crate) struct Canonicalizer {
    /// Phrase characters and their replacement, longest phrase first.
    phrases: Vec<(Vec<char>, String)>,
}

impl Canonicalizer {
    pub(crate) fn new(vocab: &Vocabulary) -> Self {
        let operators = vocab
            .operator_phrases()
            .into_iter()
            .map(|(phrase, canonical)| (phrase.to_string(), canonical.to_string()));
        let booleans = vocab
            .expressions
            .true_words
            .iter()
            .map(|w| (w.clone(), "true".to_string()))
            .chain(
                vocab
                    .expressions
                    .false_words
                    .iter()
                    .map(|w| (w.clone(), "false".to_string())),
            );
        let mut phrases: Vec<(Vec<char>, String)> = operators
            .chain(booleans)
            .filter(|(phrase, _)| !phrase.trim().is_empty())
            .map(|(phrase, canonical)| (phrase.trim().chars().collect(), canonical))
            .collect();
        phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Canonicalizer { phrases }
    }

    pub(crate) fn canonicalize(&self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out = String::with_capacity(text.len());
        let mut quote: Option<char> = None;
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            if let Some(q) = quote {
                out.push(c);
                if c == q {
                    quote = None;
                }
                i += 1;
                continue;
            }

            let at_boundary = i == 0 || !continues_word(chars[i - 1]);
            if c == '"' || (c == '\'' && at_boundary) {
                quote = Some(c);
                out.push(c);
                i += 1;
                continue;
            }
            if at_boundary && is_word_char(c) {
                if let Some((len, canonical)) = self.match_at(&chars, i) {
                    out.push(' ');
                    out.push_str(canonical);
                    out.push(' ');
                    i += len;
                    continue;
                }
            }
            out.push(c);
            i += 1;
        }
        out
    }

    fn match_at(&self, chars: &[char], start: usize) -> Option<(usize, &str)> {
        self.phrases.iter().find_map(|(phrase, canonical)| {
            let len = match_phrase(phrase, chars, start)?;
            match chars.get(start + len) {
                Some(&next) if is_word_char(next) || next == '(' => None,
                _ => Some((len, canonical.as_str())),
            }
        })
    }
}

/// A character that glues the next one into the same word or member path.
fn continues_word(c: char) -> bool {
    is_word_char(c) || c == '.'
}

/// Number of characters of `chars[start..]` covered by `phrase`, where a
/// space in the phrase stands for any run of whitespace.
fn match_phrase(phrase: &[char], chars: &[char], start: usize) -> Option<usize> {
    let mut pos = start;
    for &expected in phrase {
        if expected == ' ' {
            let run = chars[pos..].iter().take_while(|c| c.is_whitespace()).count();
            if run == 0 {
                return None;
            }
            pos += run;
        } else {
            let &actual = chars.get(pos)?;
            if !chars_eq(actual, expected) {
                return None;
            }
            pos += 1;
        }
    }
    Some(pos - start)
}
