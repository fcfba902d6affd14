//! This module contains everything necessary to go from Python source text to the syntax tree of
//! each function body and of the entry point. That tree can then be checked and translated into
//! Java.

pub mod lexing;
pub mod token;
pub mod errors;
pub mod expressions;
pub mod parsing;
pub mod types;
