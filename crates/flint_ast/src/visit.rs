//! Read-only traversal of the syntax tree

use crate::block::Block;
use crate::expr::Expr;
use crate::flint_file::{FlintFile, TopLevelStatement};
use crate::identifier::Identifier;
use crate::literal::{Literal, LiteralKind, StringPart};
use crate::statements::{ExpressionStatement, Statement, ThrowStatement};
use crate::switch::{ArmBody, Pattern, SwitchArm, SwitchExpr};
use crate::types::Type;
use flint_visitor_gen::visit;

visit! {
    pub trait Visitor {
        pub visit(visitor, flint_file: &FlintFile) {
            for stmt in &flint_file.statements {
                visitor.visit_top_level_statement(stmt);
            }
        }
        pub visit(visitor, top_level_statement: &TopLevelStatement) {
            match top_level_statement {
                TopLevelStatement::Statement(stmt) => visitor.visit_statement(stmt),
            }
        }
        pub visit(visitor, statement: &Statement) {
            match statement {
                Statement::Block(block) => visitor.visit_block(block),
                Statement::Expression(stmt) => visitor.visit_expression_statement(stmt),
                Statement::Empty(_) => {}
                Statement::Throw(stmt) => visitor.visit_throw_statement(stmt),
            }
        }
        pub visit(visitor, block: &Block) {
            for stmt in &block.statements {
                visitor.visit_statement(stmt);
            }
        }
        pub visit(visitor, expression_statement: &ExpressionStatement) {
            visitor.visit_expr(&expression_statement.expr);
        }
        pub visit(visitor, throw_statement: &ThrowStatement) {
            visitor.visit_expr(&throw_statement.value);
        }
        pub visit(visitor, expr: &Expr) {
            match expr {
                Expr::Literal(lit) => visitor.visit_literal(lit),
                Expr::Identifier(id) => visitor.visit_identifier(id),
                Expr::Assignment(e) => {
                    visitor.visit_expr(&e.left);
                    visitor.visit_expr(&e.right);
                }
                Expr::Binary(e) => {
                    visitor.visit_expr(&e.left);
                    visitor.visit_expr(&e.right);
                }
                Expr::Unary(e) => visitor.visit_expr(&e.operand),
                Expr::Update(e) => visitor.visit_expr(&e.operand),
                Expr::Cast(e) => {
                    visitor.visit_type(&e.ty);
                    visitor.visit_expr(&e.value);
                }
                Expr::FieldAccess(e) => {
                    visitor.visit_expr(&e.object);
                    visitor.visit_identifier(&e.field);
                }
                Expr::GroupedFieldAccess(e) => {
                    visitor.visit_expr(&e.object);
                    for field in &e.fields {
                        visitor.visit_identifier(field);
                    }
                }
                Expr::OptionalChain(e) => {
                    visitor.visit_expr(&e.object);
                    visitor.visit_identifier(&e.field);
                }
                Expr::Unwrap(e) => {
                    visitor.visit_expr(&e.value);
                    for arg in e.args.iter().flatten() {
                        visitor.visit_expr(arg);
                    }
                }
                Expr::Extraction(e) => {
                    visitor.visit_expr(&e.value);
                    for arg in &e.args {
                        visitor.visit_expr(arg);
                    }
                }
                Expr::ArrayAccess(e) => {
                    visitor.visit_expr(&e.array);
                    for index in &e.indices {
                        visitor.visit_expr(index);
                    }
                }
                Expr::ArrayCreation(e) => {
                    visitor.visit_type(&e.ty);
                    for expr in e.dims.iter().chain(&e.init_values) {
                        visitor.visit_expr(expr);
                    }
                }
                Expr::Initializer(e) => {
                    visitor.visit_type(&e.ty);
                    for value in &e.values {
                        visitor.visit_expr(value);
                    }
                }
                Expr::Call(e) => {
                    visitor.visit_expr(&e.callee);
                    for arg in &e.args {
                        visitor.visit_expr(arg);
                    }
                }
                Expr::Range(e) => {
                    for end in e.from.iter().chain(&e.to) {
                        visitor.visit_expr(end);
                    }
                }
                Expr::Switch(switch) => visitor.visit_switch_expr(switch),
            }
        }
        pub visit(visitor, literal: &Literal) {
            if let LiteralKind::String(s) = &literal.kind {
                for part in &s.parts {
                    if let StringPart::Interpolation(expr) = part {
                        visitor.visit_expr(expr);
                    }
                }
            }
        }
        pub visit(_visitor, _identifier: &Identifier) {}
        pub visit(visitor, ty: &Type) {
            match ty {
                Type::Simple(id) => visitor.visit_identifier(id),
            }
        }
        pub visit(visitor, switch_expr: &SwitchExpr) {
            for subject in &switch_expr.subjects {
                visitor.visit_expr(subject);
            }
            for arm in &switch_expr.arms {
                visitor.visit_switch_arm(arm);
            }
        }
        pub visit(visitor, switch_arm: &SwitchArm) {
            visitor.visit_pattern(&switch_arm.pattern);
            visitor.visit_arm_body(&switch_arm.body);
        }
        pub visit(visitor, pattern: &Pattern) {
            match pattern {
                Pattern::Binding(id) => visitor.visit_identifier(id),
                Pattern::Literal(lit) => visitor.visit_literal(lit),
            }
        }
        pub visit(visitor, arm_body: &ArmBody) {
            match arm_body {
                ArmBody::Expression(stmt) => visitor.visit_expression_statement(stmt),
                ArmBody::Block(block) => visitor.visit_block(block),
                ArmBody::Throw(stmt) => visitor.visit_throw_statement(stmt),
            }
        }
    }
}
