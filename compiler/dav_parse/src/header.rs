//! Construct header recognition.

use dav_vocab::Vocabulary;

use crate::params::extract_params;
use crate::phrase::{strip_suffix_ci, TemplateSet};

/// A line that opens (or continues) a composite block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Header {
    FunctionDef { name: String, params: Vec<String> },
    If(String),
    Else,
    While(String),
    ForEach { var: String, source: String },
    Count(String),
    Do,
}

/// Compiled header templates for one vocabulary.
pub(crate) struct HeaderMatcher<'v> {
    vocab: &'v Vocabulary,
    pub(crate) function_def: TemplateSet,
    pub(crate) if_header: TemplateSet,
    pub(crate) else_marker: TemplateSet,
    pub(crate) while_header: TemplateSet,
    pub(crate) for_each: TemplateSet,
    pub(crate) range: TemplateSet,
    pub(crate) for_times: TemplateSet,
    pub(crate) repeat: TemplateSet,
    pub(crate) do_header: TemplateSet,
}

impl<'v> HeaderMatcher<'v> {
    pub(crate) fn new(vocab: &'v Vocabulary) -> Self {
        let c = &vocab.constructs;
        HeaderMatcher {
            vocab,
            function_def: TemplateSet::new(&c.function_def),
            if_header: TemplateSet::new(&c.if_header),
            else_marker: TemplateSet::new(&c.else_marker),
            while_header: TemplateSet::new(&c.while_header),
            for_each: TemplateSet::new(&c.for_each),
            range: TemplateSet::new(&c.range),
            for_times: TemplateSet::new(&c.for_times),
            repeat: TemplateSet::new(&c.repeat),
            do_header: TemplateSet::new(&c.do_header),
        }
    }

    pub(crate) fn vocab(&self) -> &'v Vocabulary {
        self.vocab
    }

    /// Classify a line; `None` means a plain statement.
    pub(crate) fn classify(&self, line: &str) -> Option<Header> {
        let head = trim_header(line);

        if let Some(caps) = self.function_def.matches(head) {
            return Some(Header::FunctionDef {
                name: caps.text("name").to_string(),
                params: extract_params(self.vocab, caps.text("params")),
            });
        }
        if let Some(caps) = self.if_header.matches(head) {
            return Some(Header::If(self.condition(caps.text("expr"))));
        }
        if self.else_marker.matches(head).is_some() {
            return Some(Header::Else);
        }
        if let Some(caps) = self.while_header.matches(head) {
            return Some(Header::While(self.condition(caps.text("expr"))));
        }
        if let Some(caps) = self.for_times.matches(head) {
            return Some(Header::Count(caps.text("count").to_string()));
        }
        if let Some(caps) = self.for_each.matches(head) {
            return Some(Header::ForEach {
                var: caps.text("var").to_string(),
                source: self.loop_source(caps.text("source")),
            });
        }
        if let Some(caps) = self.repeat.matches(head) {
            return Some(Header::Count(caps.text("count").to_string()));
        }
        if self.do_header.matches(head).is_some() {
            return Some(Header::Do);
        }
        None
    }

    pub(crate) fn is_else(&self, line: &str) -> bool {
        self.else_marker.matches(trim_header(line)).is_some()
    }

    /// The condition of a while-line closing a do-block.
    pub(crate) fn closing_condition(&self, line: &str) -> Option<String> {
        self.while_header
            .matches(trim_header(line))
            .map(|caps| self.condition(caps.text("expr")))
    }

    /// Drop a trailing connector word (`then`).
    fn condition(&self, raw: &str) -> String {
        let raw = raw.trim();
        self.vocab
            .constructs
            .connectors
            .iter()
            .find_map(|word| strip_suffix_ci(raw, word))
            .unwrap_or(raw)
            .to_string()
    }

    /// `range 1 to 3` becomes a call to the range builtin.
    fn loop_source(&self, raw: &str) -> String {
        let raw = raw.trim();
        let range = self.range.matches(raw).zip(self.vocab.builtin_name("range"));
        match range {
            Some((caps, builtin)) => {
                format!("{builtin}({}, {})", caps.text("start"), caps.text("end"))
            }
            None => raw.to_string(),
        }
    }
}

/// Strip the trailing `:` and terminator from a header line.
pub(crate) fn trim_header(line: &str) -> &str {
    let line = line.trim();
    let line = line.strip_suffix(':').unwrap_or(line).trim_end();
    line.strip_suffix('.').unwrap_or(line).trim_end()
}
