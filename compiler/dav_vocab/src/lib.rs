//! Phrase tables for DAV.
//!
//! A [`Vocabulary`] maps every canonical grammar element of the language
//! (construct headers, statement forms, operator phrases, literal words,
//! builtin and module names) to the surface phrases one locale recognizes.
//! The parser and interpreter are written once against this table; adding a
//! language means adding a table, never forking the engine.
//!
//! Two tables are compiled in ([`Vocabulary::english`], [`Vocabulary::french`]).
//! Custom tables use the same shape and load from JSON.
//!
//! # Templates
//!
//! Statement and header entries are *templates*: literal text interleaved with
//! `{slot}` markers. Literal text matches case-insensitively with any run of
//! whitespace standing for a space. Slot names carry their meaning:
//!
//! | Slot | Captures |
//! |------|----------|
//! | `{name}`, `{var}`, `{type}` | a single identifier |
//! | `{expr}`, `{args}`, `{count}`, `{source}`, `{start}`, `{end}` | any non-empty text |
//! | `{params}`, `{_}` | any text, possibly empty |
//!
//! Matching lives in `dav_parse::phrase`; this crate only holds the data.

mod english;
mod french;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Canonical operator tokens an operator phrase may rewrite to.
pub const CANONICAL_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "//", "%", "**", "==", "!=", "<", "<=", ">", ">=", "and", "or", "not",
];

/// Canonical builtin function identifiers.
pub const BUILTIN_IDS: &[&str] = &[
    "length",
    "max",
    "min",
    "sum",
    "average",
    "random",
    "random_int",
    "sqrt",
    "power",
    "abs",
    "round",
    "uppercase",
    "lowercase",
    "contains",
    "replace",
    "split",
    "join",
    "sort",
    "reverse",
    "range",
];

/// Canonical module identifiers.
pub const MODULE_IDS: &[&str] = &["math", "random"];

/// Built-in locales.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
    #[default]
    English,
    French,
}

impl Locale {
    /// The compiled-in vocabulary for this locale.
    pub fn vocabulary(self) -> Vocabulary {
        match self {
            Locale::English => Vocabulary::english(),
            Locale::French => Vocabulary::french(),
        }
    }

    /// Short code used on the command line.
    pub fn code(self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::French => "fr",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "eng" | "english" | "anglais" => Ok(Locale::English),
            "fr" | "fra" | "french" | "français" | "francais" => Ok(Locale::French),
            _ => Err(VocabError::UnknownLocale(s.to_string())),
        }
    }
}

/// Errors raised while loading or validating a vocabulary.
#[derive(Debug, thiserror::Error)]
pub enum VocabError {
    #[error("unknown locale `{0}` (expected `en` or `fr`)")]
    UnknownLocale(String),
    #[error("invalid vocabulary JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("vocabulary `{vocabulary}`: {problem}")]
    Invalid { vocabulary: String, problem: String },
}

/// Declared variable types, used to pick a default value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Number,
    Text,
    Boolean,
    List,
    Map,
}

/// Surface words for one canonical operator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorPhrase {
    pub canonical: String,
    pub phrases: Vec<String>,
}

/// Surface names for one canonical identifier (builtin or module).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameGroup {
    pub id: String,
    pub names: Vec<String>,
}

/// Type words for one declared type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeWords {
    pub kind: TypeKind,
    pub words: Vec<String>,
}

/// Construct headers recognized by the block parser.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructs {
    /// `create a function named {name}{params}`
    pub function_def: Vec<String>,
    /// Words introducing the parameter list (`that takes`).
    pub param_intro: Vec<String>,
    /// Articles dropped from the front of a parameter name.
    pub fillers: Vec<String>,
    /// Nouns dropped from the end of a parameter name (`number`).
    pub arity_nouns: Vec<String>,
    /// Number words; entry `i` denotes `i + 1`.
    pub cardinals: Vec<String>,
    /// Parameter name used when a header lists none.
    pub default_param: String,
    /// `if {expr}`
    pub if_header: Vec<String>,
    /// Optional trailing word after a condition (`then`).
    pub connectors: Vec<String>,
    pub else_marker: Vec<String>,
    /// `while {expr}`; also closes a do-block.
    pub while_header: Vec<String>,
    /// `for each {var} in {source}`
    pub for_each: Vec<String>,
    /// `range {start} to {end}`, applied to a for-each source.
    pub range: Vec<String>,
    /// `for {count} times`
    pub for_times: Vec<String>,
    /// `repeat {count} times`
    pub repeat: Vec<String>,
    pub do_header: Vec<String>,
}

/// Leaf statement forms recognized by the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statements {
    pub declare: Vec<String>,
    pub assign: Vec<String>,
    pub input: Vec<String>,
    pub import: Vec<String>,
    #[serde(rename = "return")]
    pub return_: Vec<String>,
    #[serde(rename = "break")]
    pub break_: Vec<String>,
    #[serde(rename = "continue")]
    pub continue_: Vec<String>,
    pub list_add: Vec<String>,
    pub list_remove: Vec<String>,
    pub display: Vec<String>,
    pub screen_suffix: Vec<String>,
    pub newline_suffix: Vec<String>,
    pub no_newline_suffix: Vec<String>,
    pub increment: Vec<String>,
    pub decrement: Vec<String>,
    pub call: Vec<String>,
    /// Separator between arguments of an explicit call (`and`).
    pub conjunction: Vec<String>,
    pub line_break: Vec<String>,
}

/// Expression-level words.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expressions {
    pub operators: Vec<OperatorPhrase>,
    pub true_words: Vec<String>,
    pub false_words: Vec<String>,
    /// Text values that count as true in a condition.
    pub truthy_words: Vec<String>,
    pub builtins: Vec<NameGroup>,
    pub modules: Vec<NameGroup>,
    pub types: Vec<TypeWords>,
}

/// User-facing messages. `{name}` is replaced by the subject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    pub input_prompt: String,
    pub import_failed: String,
}

/// A complete locale table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    pub name: String,
    pub comment_marker: String,
    pub constructs: Constructs,
    pub statements: Statements,
    pub expressions: Expressions,
    pub messages: Messages,
}

impl Vocabulary {
    /// The English table.
    pub fn english() -> Self {
        english::table()
    }

    /// The French table.
    pub fn french() -> Self {
        french::table()
    }

    /// Load and validate a table from JSON.
    pub fn from_json(json: &str) -> Result<Self, VocabError> {
        let vocab: Vocabulary = serde_json::from_str(json)?;
        vocab.validate()?;
        Ok(vocab)
    }

    /// Serialize this table as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, VocabError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every canonical id the engine relies on is known.
    pub fn validate(&self) -> Result<(), VocabError> {
        let invalid = |problem: String| VocabError::Invalid {
            vocabulary: self.name.clone(),
            problem,
        };
        for op in &self.expressions.operators {
            if !CANONICAL_OPERATORS.contains(&op.canonical.as_str()) {
                return Err(invalid(format!("unknown operator `{}`", op.canonical)));
            }
        }
        for group in &self.expressions.builtins {
            if !BUILTIN_IDS.contains(&group.id.as_str()) {
                return Err(invalid(format!("unknown builtin `{}`", group.id)));
            }
        }
        for group in &self.expressions.modules {
            if !MODULE_IDS.contains(&group.id.as_str()) {
                return Err(invalid(format!("unknown module `{}`", group.id)));
            }
        }
        if self.comment_marker.is_empty() {
            return Err(invalid("empty comment marker".to_string()));
        }
        if self.constructs.default_param.is_empty() {
            return Err(invalid("empty default parameter name".to_string()));
        }
        Ok(())
    }

    /// Operator phrases paired with their canonical token, longest first.
    ///
    /// Ties keep table order, so a table can rank equal-length phrases.
    pub fn operator_phrases(&self) -> Vec<(&str, &str)> {
        let mut phrases: Vec<(&str, &str)> = self
            .expressions
            .operators
            .iter()
            .flat_map(|op| {
                op.phrases
                    .iter()
                    .map(move |p| (p.as_str(), op.canonical.as_str()))
            })
            .collect();
        phrases.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
        phrases
    }

    /// Canonical builtin id for a surface name.
    pub fn builtin_id(&self, name: &str) -> Option<&str> {
        find_group(&self.expressions.builtins, name)
    }

    /// Preferred surface name of a builtin, used when synthesizing calls.
    pub fn builtin_name(&self, id: &str) -> Option<&str> {
        self.expressions
            .builtins
            .iter()
            .find(|g| g.id == id)
            .and_then(|g| g.names.first())
            .map(String::as_str)
    }

    /// Canonical module id for a surface name.
    pub fn module_id(&self, name: &str) -> Option<&str> {
        find_group(&self.expressions.modules, name)
    }

    /// Declared type for a type word.
    pub fn type_kind(&self, word: &str) -> Option<TypeKind> {
        let word = word.to_lowercase();
        self.expressions
            .types
            .iter()
            .find(|t| t.words.iter().any(|w| w.to_lowercase() == word))
            .map(|t| t.kind)
    }

    /// Boolean value of a literal word, if it is one.
    pub fn boolean_word(&self, word: &str) -> Option<bool> {
        let word = word.to_lowercase();
        if contains_ci(&self.expressions.true_words, &word) {
            Some(true)
        } else if contains_ci(&self.expressions.false_words, &word) {
            Some(false)
        } else {
            None
        }
    }

    /// Whether a text value counts as a truthy word.
    pub fn is_truthy_word(&self, text: &str) -> bool {
        contains_ci(&self.expressions.truthy_words, &text.trim().to_lowercase())
    }

    /// The value of a cardinal word (`two` → 2).
    pub fn cardinal(&self, word: &str) -> Option<usize> {
        let word = word.to_lowercase();
        self.constructs
            .cardinals
            .iter()
            .position(|c| c.to_lowercase() == word)
            .map(|i| i + 1)
    }

    /// Input prompt for a variable.
    pub fn input_prompt(&self, name: &str) -> String {
        self.messages.input_prompt.replace("{name}", name)
    }

    /// Warning text for an unknown module.
    pub fn import_failed(&self, name: &str) -> String {
        self.messages.import_failed.replace("{name}", name)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::english()
    }
}

fn find_group<'a>(groups: &'a [NameGroup], name: &str) -> Option<&'a str> {
    let name = name.to_lowercase();
    groups
        .iter()
        .find(|g| g.names.iter().any(|n| n.to_lowercase() == name))
        .map(|g| g.id.as_str())
}

fn contains_ci(words: &[String], lowered: &str) -> bool {
    words.iter().any(|w| w.to_lowercase() == lowered)
}

/// Owned phrase list from string literals.
pub(crate) fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

pub(crate) fn op(canonical: &str, phrases: &[&str]) -> OperatorPhrase {
    OperatorPhrase {
        canonical: canonical.to_string(),
        phrases: list(phrases),
    }
}

pub(crate) fn group(id: &str, names: &[&str]) -> NameGroup {
    NameGroup {
        id: id.to_string(),
        names: list(names),
    }
}

pub(crate) fn types(kind: TypeKind, words: &[&str]) -> TypeWords {
    TypeWords {
        kind,
        words: list(words),
    }
}
