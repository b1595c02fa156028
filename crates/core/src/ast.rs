//! AST types for the Maquette frontend.
//!
//! Strict trees: every node owns its children exclusively, so any subtree
//! is complete and independently re-projectable. No type information is
//! attached -- the frontend performs no semantic analysis.

/// An expression. The operator variants carry raw operator text; the
/// frontend never resolves precedence, so unparenthesized chains lean
/// right and explicit grouping survives as its own node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    /// Kept as source text to preserve exact representation
    Float(String),
    /// Plain string literal; escapes verbatim, no interpolation found
    Str(String),
    Bool(bool),
    Ident(String),
    /// String literal with at least one interpolation scope: ordered
    /// literal fragments and embedded expressions in source order
    TemplatedStr(Vec<TemplatePart>),
    ListLiteral(Vec<Expr>),
    ListAccess {
        name: String,
        index: Box<Expr>,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
    Prefix {
        op: String,
        operand: Box<Expr>,
    },
    /// Explicit parentheses, preserved so projection can re-emit grouping
    Grouping(Box<Expr>),
    Operation {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Fragment(String),
    Expr(Expr),
}

/// An ordered sequence of statements. The whole file parses to one block;
/// conditional and loop bodies are nested blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Model {
        name: String,
        members: Vec<Member>,
    },
    /// `let name [: type] = value`
    Variable {
        name: String,
        type_name: Option<String>,
        value: Expr,
    },
    /// `make name = value`
    Mutation {
        target: String,
        value: Expr,
    },
    Conditional {
        condition: Expr,
        body: Block,
        else_body: Option<Block>,
    },
    Loop {
        condition: Expr,
        body: Block,
    },
    /// Standalone braced block
    Block(Block),
    /// Bare expression in statement position (e.g. a function call)
    Expression(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Property {
        modifiers: Modifiers,
        name: String,
        type_name: String,
        default: Option<Expr>,
    },
    Function {
        modifiers: Modifiers,
        name: String,
        params: Vec<Param>,
        return_type: Option<String>,
        body: Block,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub is_private: bool,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub type_name: String,
}
