//! Expressions

use crate::identifier::Identifier;
use crate::literal::Literal;
use crate::switch::SwitchExpr;
use crate::types::Type;
use flint_tokens::spanned::{Span, Spanned};
use itertools::Itertools;
use std::fmt::{Display, Formatter};

/// An expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Identifier(Identifier),
    Assignment(ExprAssignment),
    Binary(ExprBinary),
    Unary(ExprUnary),
    Update(ExprUpdate),
    Cast(ExprCast),
    FieldAccess(ExprField),
    GroupedFieldAccess(ExprGroupedField),
    OptionalChain(ExprOptionalChain),
    Unwrap(ExprUnwrap),
    Extraction(ExprExtraction),
    ArrayAccess(ExprArrayAccess),
    ArrayCreation(ExprArrayCreation),
    Initializer(ExprInitializer),
    Call(ExprCall),
    Range(ExprRange),
    Switch(SwitchExpr),
}

impl Expr {
    /// Checks whether this expression is a valid assignment target
    pub fn is_assignable(&self) -> bool {
        matches!(
            self,
            Expr::Identifier(_) | Expr::FieldAccess(_) | Expr::ArrayAccess(_)
        )
    }

    /// Checks whether the right-most component of this expression is a switch, which
    /// already ends with its own layout tokens.
    pub fn ends_with_layout(&self) -> bool {
        match self {
            Expr::Switch(_) => true,
            Expr::Assignment(assign) => assign.right.ends_with_layout(),
            Expr::Binary(binary) => binary.right.ends_with_layout(),
            Expr::Unary(unary) => unary.operand.ends_with_layout(),
            Expr::Update(update) if update.prefix => update.operand.ends_with_layout(),
            Expr::Range(range) => range
                .to
                .as_ref()
                .is_some_and(|to| to.ends_with_layout()),
            _ => false,
        }
    }
}

/// An assignment operator
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `:=`
    Declare,
}

impl AssignOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::Declare => ":=",
        }
    }
}

/// A binary operator
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinOp {
    Or,
    And,
    Eq,
    Neq,
    Gte,
    Lte,
    Gt,
    Lt,
    Add,
    Sub,
    Mult,
    Div,
    Rem,
    Pow,
    /// `??`
    Coalesce,
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Or => "or",
            BinOp::And => "and",
            BinOp::Eq => "==",
            BinOp::Neq => "!=",
            BinOp::Gte => ">=",
            BinOp::Lte => "<=",
            BinOp::Gt => ">",
            BinOp::Lt => "<",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mult => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Pow => "**",
            BinOp::Coalesce => "??",
        }
    }
}

/// A prefix unary operator
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Neg,
    Not,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Neg => "-",
            UnaryOp::Not => "not",
        }
    }
}

/// `++` or `--`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

impl UpdateOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprAssignment {
    pub left: Box<Expr>,
    pub op: AssignOp,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprBinary {
    pub left: Box<Expr>,
    pub op: BinOp,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprUnary {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub span: Span,
}

/// An increment or decrement, either `++x` or `x++`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprUpdate {
    pub op: UpdateOp,
    pub operand: Box<Expr>,
    pub prefix: bool,
    pub span: Span,
}

/// `Type(value)` where `Type` is a known type name
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCast {
    pub ty: Type,
    pub value: Box<Expr>,
    pub span: Span,
}

/// `object.field`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprField {
    pub object: Box<Expr>,
    pub field: Identifier,
    pub span: Span,
}

/// `object.(a, b)`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprGroupedField {
    pub object: Box<Expr>,
    pub fields: Vec<Identifier>,
    pub span: Span,
}

/// `object?.field`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprOptionalChain {
    pub object: Box<Expr>,
    pub field: Identifier,
    pub span: Span,
}

/// `value!` or `value!(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprUnwrap {
    pub value: Box<Expr>,
    pub args: Option<Vec<Expr>>,
    pub span: Span,
}

/// `value?(args)`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprExtraction {
    pub value: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// `array[i, j]`
#[derive(Debug, Clone, PartialEq)]
pub struct ExprArrayAccess {
    pub array: Box<Expr>,
    pub indices: Vec<Expr>,
    pub span: Span,
}

/// `Type[dims](init_values)` where `Type` is a known type name
#[derive(Debug, Clone, PartialEq)]
pub struct ExprArrayCreation {
    pub ty: Type,
    pub dims: Vec<Expr>,
    pub init_values: Vec<Expr>,
    pub span: Span,
}

/// `Type(a, b, ...)` where `Type` is a known type name
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInitializer {
    pub ty: Type,
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprCall {
    pub callee: Box<Expr>,
    pub args: Vec<Expr>,
    pub span: Span,
}

/// `from..to`, where both ends are optional
#[derive(Debug, Clone, PartialEq)]
pub struct ExprRange {
    pub from: Option<Box<Expr>>,
    pub to: Option<Box<Expr>>,
    pub span: Span,
}

macro_rules! spanned_by_field {
    ($($ty:ty),* $(,)?) => {
        $(
        impl Spanned for $ty {
            fn span(&self) -> Span {
                self.span
            }
        }
        )*
    };
}

spanned_by_field!(
    ExprAssignment,
    ExprBinary,
    ExprUnary,
    ExprUpdate,
    ExprCast,
    ExprField,
    ExprGroupedField,
    ExprOptionalChain,
    ExprUnwrap,
    ExprExtraction,
    ExprArrayAccess,
    ExprArrayCreation,
    ExprInitializer,
    ExprCall,
    ExprRange,
);

impl Spanned for Expr {
    fn span(&self) -> Span {
        match self {
            Expr::Literal(e) => e.span(),
            Expr::Identifier(e) => e.span(),
            Expr::Assignment(e) => e.span(),
            Expr::Binary(e) => e.span(),
            Expr::Unary(e) => e.span(),
            Expr::Update(e) => e.span(),
            Expr::Cast(e) => e.span(),
            Expr::FieldAccess(e) => e.span(),
            Expr::GroupedFieldAccess(e) => e.span(),
            Expr::OptionalChain(e) => e.span(),
            Expr::Unwrap(e) => e.span(),
            Expr::Extraction(e) => e.span(),
            Expr::ArrayAccess(e) => e.span(),
            Expr::ArrayCreation(e) => e.span(),
            Expr::Initializer(e) => e.span(),
            Expr::Call(e) => e.span(),
            Expr::Range(e) => e.span(),
            Expr::Switch(e) => e.span(),
        }
    }
}

/// Formats a list of expressions separated by spaces, with a leading space if non-empty
struct Spaced<'a, T>(&'a [T]);

impl<T: Display> Display for Spaced<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for item in self.0 {
            write!(f, " {item}")?;
        }
        Ok(())
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal(lit) => write!(f, "{lit}"),
            Expr::Identifier(id) => write!(f, "{id}"),
            Expr::Assignment(e) => write!(f, "({} {} {})", e.op.symbol(), e.left, e.right),
            Expr::Binary(e) => write!(f, "({} {} {})", e.op.symbol(), e.left, e.right),
            Expr::Unary(e) => write!(f, "({} {})", e.op.symbol(), e.operand),
            Expr::Update(e) if e.prefix => write!(f, "({} {})", e.op.symbol(), e.operand),
            Expr::Update(e) => write!(f, "(post{} {})", e.op.symbol(), e.operand),
            Expr::Cast(e) => write!(f, "(cast {} {})", e.ty, e.value),
            Expr::FieldAccess(e) => write!(f, "(. {} {})", e.object, e.field),
            Expr::GroupedFieldAccess(e) => {
                write!(f, "(.() {}{})", e.object, Spaced(&e.fields))
            }
            Expr::OptionalChain(e) => write!(f, "(?. {} {})", e.object, e.field),
            Expr::Unwrap(e) => match &e.args {
                None => write!(f, "(! {})", e.value),
                Some(args) => write!(f, "(! {} ({}))", e.value, args.iter().join(" ")),
            },
            Expr::Extraction(e) => {
                write!(f, "(? {} ({}))", e.value, e.args.iter().join(" "))
            }
            Expr::ArrayAccess(e) => write!(f, "([] {}{})", e.array, Spaced(&e.indices)),
            Expr::ArrayCreation(e) => write!(
                f,
                "(new {} [{}]{})",
                e.ty,
                e.dims.iter().join(" "),
                Spaced(&e.init_values)
            ),
            Expr::Initializer(e) => write!(f, "(init {}{})", e.ty, Spaced(&e.values)),
            Expr::Call(e) => write!(f, "(call {}{})", e.callee, Spaced(&e.args)),
            Expr::Range(e) => {
                f.write_str("(..")?;
                for end in [&e.from, &e.to] {
                    match end {
                        Some(end) => write!(f, " {end}")?,
                        None => f.write_str(" ()")?,
                    }
                }
                f.write_str(")")
            }
            Expr::Switch(e) => write!(f, "{e}"),
        }
    }
}
