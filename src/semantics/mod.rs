//! Scopes, type inference and the diagnostics collected while a syntax tree is translated.

pub mod errors;
pub mod symbol_table;
pub mod typechecking;
