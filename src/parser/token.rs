//! Provides a representation of the logical lines of a Python program, including the debugging
//! information which can be used to display useful diagnostics, and the statement shape needed to
//! build the syntax tree.
use std::fmt;


/// The collection literals which have no counterpart in the generated Java and are therefore
/// reported instead of translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    List,
    Dictionary,
    Tuple
}


impl LiteralKind {
    /// The opening and closing delimiters of the literal, in the order the checks are made.
    pub const ALL: [(LiteralKind, char, char); 3] = [
        (LiteralKind::List, '[', ']'),
        (LiteralKind::Dictionary, '{', '}'),
        (LiteralKind::Tuple, '(', ')'),
    ];


    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "List",
            Self::Dictionary => "Dictionary",
            Self::Tuple => "Tuple"
        }
    }
}


/// The shapes of statement that a logical line may take.
///
/// Lines are categorised by their prefix and overall shape alone, so a [`LineKind`] says nothing
/// about whether the line is well-formed. That is checked when the line is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Definition,
    If,
    Elif,
    Else,
    While,
    For,
    Return,
    Print,
    Pass,
    Break,
    Continue,
    Call,
    Assignment,
    AugmentedAssignment,
    UnsupportedLiteral(LiteralKind),
    Unknown
}


impl LineKind {
    /// Whether a line of this kind extends an `if` rather than starting a statement of its own.
    pub fn is_branch_continuation(&self) -> bool {
        matches!(self, Self::Elif | Self::Else)
    }
}


/// A single non-blank line of source together with its leading-space count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// The line with its indentation and trailing whitespace removed
    pub text: String,
    /// The number of leading space characters
    pub indent: usize,
    /// 1-indexed line number in the original source, blank lines included
    pub line_number: usize,
    pub kind: LineKind
}


impl SourceLine {
    /// Creates a new line from the information passed as arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// # use pyjava::parser::token::*;
    /// SourceLine::new("x = 5".to_owned(), 4, 2, LineKind::Assignment);
    /// ```
    pub fn new(text: String, indent: usize, line_number: usize, kind: LineKind) -> Self {
        Self {
            text, indent, line_number, kind
        }
    }
}


impl fmt::Display for SourceLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?} '{}' at line {} (indent {})", self.kind, self.text, self.line_number, self.indent)
    }
}
