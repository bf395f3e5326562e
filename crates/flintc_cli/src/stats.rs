//! Node statistics gathered by walking the syntax tree

use flint_ast::block::Block;
use flint_ast::expr::Expr;
use flint_ast::flint_file::FlintFile;
use flint_ast::identifier::Identifier;
use flint_ast::literal::Literal;
use flint_ast::statements::Statement;
use flint_ast::switch::{SwitchArm, SwitchExpr};
use flint_ast::visit::{
    walk_block, walk_expr, walk_literal, walk_statement, walk_switch_arm, walk_switch_expr,
    Visitor,
};
use std::fmt::{Display, Formatter};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NodeStats {
    pub statements: usize,
    pub expressions: usize,
    pub literals: usize,
    pub identifiers: usize,
    pub switches: usize,
    pub switch_arms: usize,
    /// How deeply blocks are nested at most
    pub max_depth: usize,
    depth: usize,
}

impl NodeStats {
    pub fn of(file: &FlintFile) -> Self {
        let mut stats = Self::default();
        stats.visit_flint_file(file);
        stats
    }
}

impl Visitor for NodeStats {
    fn visit_statement(&mut self, statement: &Statement) {
        self.statements += 1;
        walk_statement(self, statement);
    }

    fn visit_block(&mut self, block: &Block) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        walk_block(self, block);
        self.depth -= 1;
    }

    fn visit_expr(&mut self, expr: &Expr) {
        self.expressions += 1;
        walk_expr(self, expr);
    }

    fn visit_literal(&mut self, literal: &Literal) {
        self.literals += 1;
        walk_literal(self, literal);
    }

    fn visit_identifier(&mut self, _identifier: &Identifier) {
        self.identifiers += 1;
    }

    fn visit_switch_expr(&mut self, switch_expr: &SwitchExpr) {
        self.switches += 1;
        walk_switch_expr(self, switch_expr);
    }

    fn visit_switch_arm(&mut self, switch_arm: &SwitchArm) {
        self.switch_arms += 1;
        walk_switch_arm(self, switch_arm);
    }
}

impl Display for NodeStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "statements:  {}", self.statements)?;
        writeln!(f, "expressions: {}", self.expressions)?;
        writeln!(f, "literals:    {}", self.literals)?;
        writeln!(f, "identifiers: {}", self.identifiers)?;
        writeln!(f, "switches:    {} ({} arms)", self.switches, self.switch_arms)?;
        write!(f, "max depth:   {}", self.max_depth)
    }
}
