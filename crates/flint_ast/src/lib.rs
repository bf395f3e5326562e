#![doc = include_str!("../README.md")]

pub mod block;
pub mod expr;
pub mod flint_file;
pub mod identifier;
pub mod literal;
pub mod statements;
pub mod switch;
pub mod types;
pub mod visit;
