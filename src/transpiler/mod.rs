//! Translation of checked syntax trees into Java source.

pub mod transpile_java;
