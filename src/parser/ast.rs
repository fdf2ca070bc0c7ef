// AST (Abstract Syntax Tree) definitions for the toy language
//
// Every node owns its children. The tree is built bottom-up by the parser and
// is read-only afterwards.

/// Primitive type keywords usable as a type name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Int,
    Real,
    String,
    Boolean,
    Long,
}

/// Right-hand side of a declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    Primitive(PrimitiveType),
    /// A user-defined type, referred to by identifier
    Named(String),
}

impl TypeName {
    /// The referenced identifier, if this is not a primitive
    pub fn reference(&self) -> Option<&str> {
        match self {
            TypeName::Named(name) => Some(name),
            TypeName::Primitive(_) => None,
        }
    }
}

/// `id_list ':' type_name ';'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declared names in source order; never empty, may repeat
    pub ids: Vec<String>,
    pub type_name: TypeName,
    /// Line of the first identifier
    pub line: usize,
}

/// `TYPE` section: one or more declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSection {
    pub decls: Vec<Declaration>,
}

/// `VAR` section: one or more declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSection {
    pub decls: Vec<Declaration>,
}

/// Declaration part of a program. A missing section is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decl {
    pub type_section: Option<TypeSection>,
    pub var_section: Option<VarSection>,
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Relational operators, only valid inside a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Gt,
    Lt,
    Ge,
    Le,
    Ne,
}

/// Leaf operand
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    Int(i64),
    Real(f64),
    Id(String),
}

/// Expression tree. `+ -` and `* /` nest to the right.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary {
        op: BinOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Primary(Primary),
}

/// `primary [relop primary]`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub left: Primary,
    /// `None` for a bare truthy test
    pub comparison: Option<(RelOp, Primary)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Assign {
        target: String,
        expr: Expression,
        line: usize,
    },
    While {
        condition: Condition,
        body: Body,
    },
    DoWhile {
        body: Body,
        condition: Condition,
    },
    /// Reserved for `SWITCH`; the parser rejects the keyword before one of
    /// these could be built.
    Switch,
}

/// `'{' stmt+ '}'`
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub statements: Vec<Statement>,
}

/// Root of the tree
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub decl: Decl,
    pub body: Body,
}
