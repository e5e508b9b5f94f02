//! Parser for template markup

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::{parse, MAX_NESTING_DEPTH};
