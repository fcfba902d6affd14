use std::{fmt, error};

use super::token::LiteralKind;


/// Problems found while turning logical lines into a syntax tree.
///
/// None of these stop a conversion: each one is attached to the tree in place of the statement it
/// concerns and is later reported as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    UnsupportedLiteral(LiteralKind),
    MalformedDefinition(String),
    NestedDefinition(String),
    MissingColon(String),
    MissingCondition(String),
    MissingBody(String),
    DanglingBranch(String),
    UnsupportedLoop(String),
    InvalidRangeArguments(usize),
    UnexpectedIndent,
    InconsistentDedent,
    UnterminatedString(String),
    UnsupportedStatement(String)
}


impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnsupportedLiteral(kind) => write!(f, "{} data type is not supported", kind.name()),
            Self::MalformedDefinition(line) => write!(f, "Malformed function definition '{}'", line),
            Self::NestedDefinition(name) => write!(f, "Nested function definition '{}' is not supported", name),
            Self::MissingColon(keyword) => write!(f, "Expected ':' at the end of '{}' statement", keyword),
            Self::MissingCondition(keyword) => write!(f, "Missing condition in '{}' statement", keyword),
            Self::MissingBody(header) => write!(f, "Expected an indented block after '{}'", header),
            Self::DanglingBranch(keyword) => write!(f, "'{}' without a matching 'if'", keyword),
            Self::UnsupportedLoop(line) => write!(f, "Only 'for <name> in range(...)' loops are supported, got '{}'", line),
            Self::InvalidRangeArguments(n) => write!(f, "range() takes 1 to 3 arguments, got {}", n),
            Self::UnexpectedIndent => write!(f, "Unexpected indentation"),
            Self::InconsistentDedent => write!(f, "Indentation does not match any enclosing block"),
            Self::UnterminatedString(expr) => write!(f, "Unterminated string literal in '{}'", expr),
            Self::UnsupportedStatement(line) => write!(f, "Unsupported statement '{}'", line),
        }
    }
}


impl error::Error for ParsingError {}
