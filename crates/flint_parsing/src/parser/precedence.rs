//! Operator binding powers

use flint_ast::expr::{AssignOp, BinOp, UnaryOp, UpdateOp};
use flint_tokens::token::TokenKind;

/// Operator tiers, from loosest to tightest binding
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Assignment = 1,
    Range,
    Or,
    And,
    Comparison,
    Additive,
    Multiplicative,
    /// `**` and `??`
    Power,
    Prefix,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

impl Precedence {
    /// Gets the left and right binding power of an infix operator in this tier
    pub fn binding_power(self, assoc: Assoc) -> (u8, u8) {
        let power = self as u8 * 2;
        match assoc {
            Assoc::Left => (power, power + 1),
            Assoc::Right => (power, power),
        }
    }
}

/// The binding power operands of prefix operators are parsed with
pub const PREFIX_BINDING_POWER: u8 = Precedence::Prefix as u8 * 2;

/// An operator appearing between two operands
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InfixOp {
    Assign(AssignOp),
    Binary(BinOp),
    Range,
}

impl InfixOp {
    pub fn precedence(&self) -> Precedence {
        match self {
            InfixOp::Assign(_) => Precedence::Assignment,
            InfixOp::Range => Precedence::Range,
            InfixOp::Binary(op) => match op {
                BinOp::Or => Precedence::Or,
                BinOp::And => Precedence::And,
                BinOp::Eq | BinOp::Neq | BinOp::Gte | BinOp::Lte | BinOp::Gt | BinOp::Lt => {
                    Precedence::Comparison
                }
                BinOp::Add | BinOp::Sub => Precedence::Additive,
                BinOp::Mult | BinOp::Div | BinOp::Rem => Precedence::Multiplicative,
                BinOp::Pow | BinOp::Coalesce => Precedence::Power,
            },
        }
    }

    pub fn assoc(&self) -> Assoc {
        match self {
            InfixOp::Assign(_) => Assoc::Right,
            _ => Assoc::Left,
        }
    }

    pub fn binding_power(&self) -> (u8, u8) {
        self.precedence().binding_power(self.assoc())
    }
}

/// Gets the infix operator a token stands for, if any
pub fn infix_op(kind: &TokenKind) -> Option<InfixOp> {
    let op = match kind {
        TokenKind::Assign => InfixOp::Assign(AssignOp::Assign),
        TokenKind::PlusAssign => InfixOp::Assign(AssignOp::AddAssign),
        TokenKind::MinusAssign => InfixOp::Assign(AssignOp::SubAssign),
        TokenKind::StarAssign => InfixOp::Assign(AssignOp::MulAssign),
        TokenKind::SlashAssign => InfixOp::Assign(AssignOp::DivAssign),
        TokenKind::ColonAssign => InfixOp::Assign(AssignOp::Declare),
        TokenKind::DotDot => InfixOp::Range,
        TokenKind::Or => InfixOp::Binary(BinOp::Or),
        TokenKind::And => InfixOp::Binary(BinOp::And),
        TokenKind::Eq => InfixOp::Binary(BinOp::Eq),
        TokenKind::Neq => InfixOp::Binary(BinOp::Neq),
        TokenKind::Gte => InfixOp::Binary(BinOp::Gte),
        TokenKind::Lte => InfixOp::Binary(BinOp::Lte),
        TokenKind::Gt => InfixOp::Binary(BinOp::Gt),
        TokenKind::Lt => InfixOp::Binary(BinOp::Lt),
        TokenKind::Plus => InfixOp::Binary(BinOp::Add),
        TokenKind::Minus => InfixOp::Binary(BinOp::Sub),
        TokenKind::Star => InfixOp::Binary(BinOp::Mult),
        TokenKind::Slash => InfixOp::Binary(BinOp::Div),
        TokenKind::Percent => InfixOp::Binary(BinOp::Rem),
        TokenKind::StarStar => InfixOp::Binary(BinOp::Pow),
        TokenKind::QuestionQuestion => InfixOp::Binary(BinOp::Coalesce),
        _ => return None,
    };
    Some(op)
}

/// An operator appearing before its operand
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PrefixOp {
    Unary(UnaryOp),
    Update(UpdateOp),
}

pub fn prefix_op(kind: &TokenKind) -> Option<PrefixOp> {
    let op = match kind {
        TokenKind::Plus => PrefixOp::Unary(UnaryOp::Plus),
        TokenKind::Minus => PrefixOp::Unary(UnaryOp::Neg),
        TokenKind::Not => PrefixOp::Unary(UnaryOp::Not),
        TokenKind::PlusPlus => PrefixOp::Update(UpdateOp::Increment),
        TokenKind::MinusMinus => PrefixOp::Update(UpdateOp::Decrement),
        _ => return None,
    };
    Some(op)
}
