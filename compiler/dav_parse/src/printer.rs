//! Source printer for block trees.

use dav_ir::{Block, Program};
use dav_vocab::Vocabulary;

use crate::header::HeaderMatcher;
use crate::phrase::TemplateSet;

const INDENT: &str = "    ";

/// Print a program using the vocabulary's first phrasing of each construct.
pub fn render(program: &Program, vocab: &Vocabulary) -> String {
    let printer = Printer {
        headers: HeaderMatcher::new(vocab),
        vocab,
    };
    let mut out = String::new();
    printer.blocks(&program.blocks, 0, &mut out);
    out
}

struct Printer<'v> {
    headers: HeaderMatcher<'v>,
    vocab: &'v Vocabulary,
}

impl Printer<'_> {
    fn blocks(&self, blocks: &[Block], depth: usize, out: &mut String) {
        for block in blocks {
            self.block(block, depth, out);
        }
    }

    fn block(&self, block: &Block, depth: usize, out: &mut String) {
        match block {
            Block::Statement(text) => line(out, depth, text),
            Block::FunctionDef { name, params, body } => {
                let params = self.param_list(params);
                let header = fill(&self.headers.function_def, &[("name", name), ("params", &params)]);
                line(out, depth, &format!("{header}:"));
                self.blocks(body, depth + 1, out);
            }
            Block::If {
                condition,
                then_body,
                else_body,
            } => {
                let header = fill(&self.headers.if_header, &[("expr", condition)]);
                line(out, depth, &format!("{header}:"));
                self.blocks(then_body, depth + 1, out);
                if !else_body.is_empty() {
                    let marker = fill(&self.headers.else_marker, &[]);
                    line(out, depth, &format!("{marker}:"));
                    self.blocks(else_body, depth + 1, out);
                }
            }
            Block::CountLoop { count, body } => {
                let header = fill(&self.headers.repeat, &[("count", count)]);
                line(out, depth, &format!("{header}:"));
                self.blocks(body, depth + 1, out);
            }
            Block::WhileLoop { condition, body } => {
                let header = fill(&self.headers.while_header, &[("expr", condition)]);
                line(out, depth, &format!("{header}:"));
                self.blocks(body, depth + 1, out);
            }
            Block::ForEach { var, source, body } => {
                let header = fill(&self.headers.for_each, &[("var", var), ("source", source)]);
                line(out, depth, &format!("{header}:"));
                self.blocks(body, depth + 1, out);
            }
            Block::DoWhileLoop { body, condition } => {
                let header = fill(&self.headers.do_header, &[]);
                line(out, depth, &format!("{header}:"));
                self.blocks(body, depth + 1, out);
                if !condition.is_empty() {
                    let closing = fill(&self.headers.while_header, &[("expr", condition)]);
                    line(out, depth, &closing);
                }
            }
        }
    }

    /// ` that takes a and b`, with the leading space the template expects.
    fn param_list(&self, params: &[String]) -> String {
        let intro = self.vocab.constructs.param_intro.first();
        let conjunction = self.vocab.statements.conjunction.first();
        match (intro, conjunction) {
            (Some(intro), Some(conjunction)) if !params.is_empty() => {
                format!(" {intro} {}", params.join(&format!(" {conjunction} ")))
            }
            (Some(intro), None) if !params.is_empty() => {
                format!(" {intro} {}", params.join(", "))
            }
            _ => String::new(),
        }
    }
}

fn fill(set: &TemplateSet, values: &[(&str, &str)]) -> String {
    set.first().map(|t| t.fill(values)).unwrap_or_default()
}

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push_str(text);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_canonical_english() {
        let vocab = Vocabulary::english();
        let source = "\
Define a function called fact with parameters n.
  If n is less than 2 then
    return 1
  else
    return n times fact(n minus 1)
for i in range 1 to 3
  show fact(i) line";
        let program = parse(source, &vocab);
        assert_eq!(
            render(&program, &vocab),
            "\
create a function named fact that takes n:
    if n is less than 2:
        return 1
    otherwise:
        return n times fact(n minus 1)
for each i in range(1, 3):
    show fact(i) line
"
        );
    }

    #[test]
    fn renders_do_while_with_closing_line() {
        let vocab = Vocabulary::french();
        let program = parse("Fais:\n  augmente i de 1\nTant que i est inférieur à 3", &vocab);
        assert_eq!(
            render(&program, &vocab),
            "fais:\n    augmente i de 1\ntant que i est inférieur à 3\n"
        );
    }

    #[test]
    fn reparse_of_rendered_output_is_stable() {
        let vocab = Vocabulary::english();
        let source = "\
i have a list called items
create a function named pair that takes two numbers
    return param1 plus param2
repeat 3 times:
    add 1 to items
do:
    show 1
show pair(1, 2)";
        let program = parse(source, &vocab);
        assert_eq!(parse(&render(&program, &vocab), &vocab), program);
    }
}
