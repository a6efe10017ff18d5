use dav_ir::{Block, Program};
use dav_stack::ensure_sufficient_stack;
use dav_vocab::Vocabulary;

use crate::header::{Header, HeaderMatcher};
use crate::lines::{source_lines, SourceLine};

/// Indentation-sensitive parser for one vocabulary.
pub struct BlockParser<'v> {
    headers: HeaderMatcher<'v>,
}

impl<'v> BlockParser<'v> {
    pub fn new(vocab: &'v Vocabulary) -> Self {
        BlockParser {
            headers: HeaderMatcher::new(vocab),
        }
    }

    /// Parse source text into a program.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse(&self, source: &str) -> Program {
        let lines = source_lines(source, &self.headers.vocab().comment_marker);
        let program = Program::new(self.parse_lines(&lines));
        tracing::debug!(
            lines = lines.len(),
            blocks = program.node_count(),
            "parsed program"
        );
        program
    }

    /// Parse a run of lines into sibling blocks.
    pub fn parse_lines(&self, lines: &[SourceLine<'_>]) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut i = 0;
        while i < lines.len() {
            let (block, next) = self.parse_block(lines, i);
            blocks.push(block);
            i = next;
        }
        blocks
    }

    /// Parse the block starting at `start`; returns it with the resume index.
    fn parse_block(&self, lines: &[SourceLine<'_>], start: usize) -> (Block, usize) {
        let line = lines[start];
        let Some(header) = self.headers.classify(line.text) else {
            return (Block::statement(line.text), start + 1);
        };
        tracing::trace!(line = line.number, ?header, "construct header");

        match header {
            Header::FunctionDef { name, params } => {
                let (body, next) = self.body(lines, start);
                (Block::FunctionDef { name, params, body }, next)
            }
            Header::If(condition) => self.parse_if(lines, start, condition),
            Header::While(condition) => {
                let (body, next) = self.body(lines, start);
                (Block::WhileLoop { condition, body }, next)
            }
            Header::ForEach { var, source } => {
                let (body, next) = self.body(lines, start);
                (Block::ForEach { var, source, body }, next)
            }
            Header::Count(count) => {
                let (body, next) = self.body(lines, start);
                (Block::CountLoop { count, body }, next)
            }
            Header::Do => self.parse_do_while(lines, start),
            // An else-marker with no if before it is left for the interpreter.
            Header::Else => (Block::statement(line.text), start + 1),
        }
    }

    /// Parse the lines indented deeper than the header at `start`.
    fn body(&self, lines: &[SourceLine<'_>], start: usize) -> (Vec<Block>, usize) {
        let end = body_end(lines, start);
        let body = ensure_sufficient_stack(|| self.parse_lines(&lines[start + 1..end]));
        (body, end)
    }

    fn parse_if(&self, lines: &[SourceLine<'_>], start: usize, condition: String) -> (Block, usize) {
        let base = lines[start].indent;
        let mut then_lines = Vec::new();
        let mut else_lines = Vec::new();
        let mut in_else = false;
        let mut i = start + 1;
        while let Some(line) = lines.get(i) {
            if line.indent > base {
                if in_else {
                    else_lines.push(*line);
                } else {
                    then_lines.push(*line);
                }
            } else if line.indent == base && self.headers.is_else(line.text) {
                in_else = true;
            } else {
                break;
            }
            i += 1;
        }
        let (then_body, else_body) = ensure_sufficient_stack(|| {
            (self.parse_lines(&then_lines), self.parse_lines(&else_lines))
        });
        (
            Block::If {
                condition,
                then_body,
                else_body,
            },
            i,
        )
    }

    fn parse_do_while(&self, lines: &[SourceLine<'_>], start: usize) -> (Block, usize) {
        let base = lines[start].indent;
        let (body, mut next) = self.body(lines, start);
        let mut condition = String::new();
        if let Some(line) = lines.get(next) {
            if line.indent == base {
                if let Some(found) = self.headers.closing_condition(line.text) {
                    condition = found;
                    next += 1;
                }
            }
        }
        if condition.is_empty() {
            tracing::debug!(line = lines[start].number, "do-block without closing condition");
        }
        (Block::DoWhileLoop { body, condition }, next)
    }
}

/// Index of the first line after `start` not indented deeper than it.
fn body_end(lines: &[SourceLine<'_>], start: usize) -> usize {
    let base = lines[start].indent;
    lines[start + 1..]
        .iter()
        .position(|line| line.indent <= base)
        .map_or(lines.len(), |offset| start + 1 + offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_en(source: &str) -> Vec<Block> {
        let vocab = Vocabulary::english();
        BlockParser::new(&vocab).parse(source).blocks
    }

    fn stmt(text: &str) -> Block {
        Block::statement(text)
    }

    #[test]
    fn flat_statements() {
        assert_eq!(
            parse_en("I have a number called x.\nSet x to 10.\nShow x."),
            vec![
                stmt("I have a number called x."),
                stmt("Set x to 10."),
                stmt("Show x."),
            ]
        );
    }

    #[test]
    fn function_body_ends_at_dedent() {
        let source = "\
Create a function named double that takes a number.
    I will return number times 2.
Show double(4).";
        assert_eq!(
            parse_en(source),
            vec![
                Block::FunctionDef {
                    name: "double".into(),
                    params: vec!["number".into()],
                    body: vec![stmt("I will return number times 2.")],
                },
                stmt("Show double(4)."),
            ]
        );
    }

    #[test]
    fn blank_lines_do_not_end_a_body() {
        let source = "repeat 2 times:\n    show 1\n\n    show 2\nshow 3";
        assert_eq!(
            parse_en(source),
            vec![
                Block::CountLoop {
                    count: "2".into(),
                    body: vec![stmt("show 1"), stmt("show 2")],
                },
                stmt("show 3"),
            ]
        );
    }

    #[test]
    fn else_at_base_indent_switches_sections() {
        let source = "\
if x is greater than 1:
    show \"big\"
otherwise:
    show \"small\"
show \"done\"";
        assert_eq!(
            parse_en(source),
            vec![
                Block::If {
                    condition: "x is greater than 1".into(),
                    then_body: vec![stmt("show \"big\"")],
                    else_body: vec![stmt("show \"small\"")],
                },
                stmt("show \"done\""),
            ]
        );
    }

    #[test]
    fn nested_if_else_belongs_to_inner_if() {
        let source = "\
if a:
    if b:
        show 1
    otherwise:
        show 2
otherwise:
    show 3";
        assert_eq!(
            parse_en(source),
            vec![Block::If {
                condition: "a".into(),
                then_body: vec![Block::If {
                    condition: "b".into(),
                    then_body: vec![stmt("show 1")],
                    else_body: vec![stmt("show 2")],
                }],
                else_body: vec![stmt("show 3")],
            }]
        );
    }

    #[test]
    fn deeper_else_is_not_a_marker_for_outer_if() {
        let source = "if a:\n    show 1\n  otherwise:\nshow 2";
        let blocks = parse_en(source);
        let Block::If { then_body, .. } = &blocks[0] else {
            panic!("expected if");
        };
        assert_eq!(then_body, &vec![stmt("show 1"), stmt("otherwise:")]);
    }

    #[test]
    fn do_while_consumes_closing_line() {
        let source = "do:\n    increase i by 1\nwhile i is less than 3\nshow i";
        assert_eq!(
            parse_en(source),
            vec![
                Block::DoWhileLoop {
                    body: vec![stmt("increase i by 1")],
                    condition: "i is less than 3".into(),
                },
                stmt("show i"),
            ]
        );
    }

    #[test]
    fn do_without_while_has_empty_condition() {
        let source = "do:\n    show 1\nshow 2";
        assert_eq!(
            parse_en(source),
            vec![
                Block::DoWhileLoop {
                    body: vec![stmt("show 1")],
                    condition: String::new(),
                },
                stmt("show 2"),
            ]
        );
    }

    #[test]
    fn stray_else_becomes_statement() {
        assert_eq!(parse_en("otherwise"), vec![stmt("otherwise")]);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            parse_en("# intro\nshow 1\n    # indented comment\nshow 2"),
            vec![stmt("show 1"), stmt("show 2")]
        );
    }

    #[test]
    fn french_program() {
        let vocab = Vocabulary::french();
        let source = "\
Crée une fonction nommée factorielle qui prend n.
    Si n est inférieur ou égal à 1 alors:
        Retourne 1.
    Sinon:
        Retourne n fois factorielle(n moins 1).
Affiche factorielle(5).";
        assert_eq!(
            BlockParser::new(&vocab).parse(source).blocks,
            vec![
                Block::FunctionDef {
                    name: "factorielle".into(),
                    params: vec!["n".into()],
                    body: vec![Block::If {
                        condition: "n est inférieur ou égal à 1".into(),
                        then_body: vec![stmt("Retourne 1.")],
                        else_body: vec![stmt("Retourne n fois factorielle(n moins 1).")],
                    }],
                },
                stmt("Affiche factorielle(5)."),
            ]
        );
    }
}
