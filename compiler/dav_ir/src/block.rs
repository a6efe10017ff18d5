/// A parsed program: root-level blocks in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub blocks: Vec<Block>,
}

impl Program {
    pub fn new(blocks: Vec<Block>) -> Self {
        Program { blocks }
    }

    /// Total number of blocks, nested ones included.
    pub fn node_count(&self) -> usize {
        self.blocks.iter().map(Block::node_count).sum()
    }
}

/// One node of the block tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// A leaf line, classified by the interpreter when it runs.
    Statement(String),
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<Block>,
    },
    If {
        condition: String,
        then_body: Vec<Block>,
        else_body: Vec<Block>,
    },
    CountLoop {
        count: String,
        body: Vec<Block>,
    },
    WhileLoop {
        condition: String,
        body: Vec<Block>,
    },
    ForEach {
        var: String,
        source: String,
        body: Vec<Block>,
    },
    /// Body runs before the first condition check. An empty condition is
    /// treated as false.
    DoWhileLoop {
        body: Vec<Block>,
        condition: String,
    },
}

impl Block {
    pub fn statement(text: impl Into<String>) -> Self {
        Block::Statement(text.into())
    }

    /// Nested bodies in source order (if-body before else-body).
    pub fn bodies(&self) -> Vec<&[Block]> {
        match self {
            Block::Statement(_) => Vec::new(),
            Block::If {
                then_body,
                else_body,
                ..
            } => vec![then_body.as_slice(), else_body.as_slice()],
            Block::FunctionDef { body, .. }
            | Block::CountLoop { body, .. }
            | Block::WhileLoop { body, .. }
            | Block::ForEach { body, .. }
            | Block::DoWhileLoop { body, .. } => vec![body.as_slice()],
        }
    }

    /// This block plus every block nested inside it.
    pub fn node_count(&self) -> usize {
        1 + self
            .bodies()
            .into_iter()
            .flatten()
            .map(Block::node_count)
            .sum::<usize>()
    }
}
