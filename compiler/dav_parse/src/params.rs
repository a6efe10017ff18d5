//! Parameter lists of function headers.
//!
//! Accepted shapes, after the introducing phrase (`that takes`):
//! - an arity phrase, `two numbers` or `3 parameters`, giving `param1..paramN`;
//! - names joined by the conjunction or commas, each optionally preceded by
//!   an article and followed by a noun such as `number`;
//! - a parenthesized list directly after the name, `f(a, b)`.
//!
//! With no list at all the function gets the vocabulary's default parameter.

use dav_vocab::Vocabulary;

use crate::phrase::{eq_ci, split_commas, split_on_word, strip_prefix_ci};

pub(crate) fn extract_params(vocab: &Vocabulary, rest: &str) -> Vec<String> {
    let rest = rest.trim();
    let list = if let Some(inner) = rest.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        Some(inner)
    } else {
        vocab
            .constructs
            .param_intro
            .iter()
            .find_map(|intro| strip_prefix_ci(rest, intro))
    };

    let params = match list {
        Some(list) => parse_list(vocab, list),
        None => Vec::new(),
    };
    if params.is_empty() {
        vec![vocab.constructs.default_param.clone()]
    } else {
        params
    }
}

fn parse_list(vocab: &Vocabulary, list: &str) -> Vec<String> {
    let list = list.trim().trim_end_matches(['.', ':']).trim();
    if let Some(count) = arity(vocab, list) {
        return (1..=count).map(|i| format!("param{i}")).collect();
    }

    let mut items = vec![list];
    for conjunction in &vocab.statements.conjunction {
        items = items
            .into_iter()
            .flat_map(|item| split_on_word(item, conjunction))
            .collect();
    }
    items
        .into_iter()
        .flat_map(split_commas)
        .filter_map(|item| param_name(vocab, item))
        .collect()
}

/// Largest count an arity phrase may synthesize parameters for.
const MAX_ARITY: usize = 255;

/// `two numbers` → 2. Word forms start at two so `a number` stays a name.
/// Counts above [`MAX_ARITY`] are not arity phrases.
fn arity(vocab: &Vocabulary, list: &str) -> Option<usize> {
    let words: Vec<&str> = list.split_whitespace().collect();
    let [count, noun] = words.as_slice() else {
        return None;
    };
    if !is_one_of(noun, &vocab.constructs.arity_nouns) {
        return None;
    }
    match count.parse::<usize>() {
        Ok(n) if (1..=MAX_ARITY).contains(&n) => Some(n),
        Ok(_) => None,
        Err(_) => vocab.cardinal(count).filter(|n| *n >= 2),
    }
}

fn param_name(vocab: &Vocabulary, item: &str) -> Option<String> {
    let mut words: Vec<&str> = item.split_whitespace().collect();
    while words.len() > 1 && is_one_of(words[0], &vocab.constructs.fillers) {
        words.remove(0);
    }
    while words.len() > 1 && is_one_of(words[words.len() - 1], &vocab.constructs.arity_nouns) {
        words.pop();
    }
    if words.is_empty() {
        None
    } else {
        Some(words.join("_"))
    }
}

fn is_one_of(word: &str, options: &[String]) -> bool {
    options.iter().any(|o| eq_ci(word, o))
}
