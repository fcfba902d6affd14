//! Provides a struct `Scanner` which splits Python source into logical lines.
//!
//! Python blocks are delimited by indentation, so the unit of lexical analysis here is the line
//! rather than the token. Each non-blank line is measured (its count of leading spaces), trimmed,
//! and categorised into a [`LineKind`] by a fixed, ordered set of shape tests where the first match
//! wins. Blank lines and full-line comments are dropped entirely and take no part in indentation
//! comparisons.
//!
//! # Examples
//!
//! ```
//! # use pyjava::parser::lexing::*;
//! # use pyjava::parser::token::*;
//! let scanner = Scanner::new("def f(a):\n    return a\n\nf(1)\n");
//! assert_eq!(scanner.lines.len(), 3);
//! ```
use log::trace;

use super::expressions::{is_identifier, is_identifier_char, mask_strings};
use super::token::*;


/// Contains the logical lines of a Python program in the public `lines` attribute.
#[derive(Debug)]
pub struct Scanner {
    pub lines: Vec<SourceLine>
}


impl Scanner {
    /// Splits `source` into [`SourceLine`]s, categorising each one.
    pub fn new(source: &str) -> Self {
        let mut scanner = Self { lines: Vec::new() };
        for (index, raw) in source.lines().enumerate() {
            scanner.scan_line(raw, index + 1);
        }

        scanner
    }


    fn scan_line(&mut self, raw: &str, line_number: usize) {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            return;
        }

        let indent = raw.chars().take_while(|&c| c == ' ').count();
        let kind = categorize_line(text);
        let line = SourceLine::new(text.to_owned(), indent, line_number, kind);
        trace!("Scanned {}", line);
        self.lines.push(line);
    }
}


/// Takes a trimmed line and returns the shape of statement it holds.
///
/// The tests are made in order: definition, conditional, branch-continuation, loops, return,
/// output call, the single-word statements, generic call, and finally the assignment shapes. An
/// assignment whose value contains a collection literal is reported as
/// [`LineKind::UnsupportedLiteral`] instead of [`LineKind::Assignment`].
///
/// # Examples
///
/// ```
/// # use pyjava::parser::lexing::*;
/// # use pyjava::parser::token::*;
/// assert_eq!(categorize_line("elif x < 0:"), LineKind::Elif);
/// assert_eq!(categorize_line("x = [1, 2]"), LineKind::UnsupportedLiteral(LiteralKind::List));
/// ```
pub fn categorize_line(text: &str) -> LineKind {
    if starts_with_keyword(text, "def") {
        return LineKind::Definition;
    }

    if starts_with_keyword(text, "if") {
        return LineKind::If;
    }

    if starts_with_keyword(text, "elif") {
        return LineKind::Elif;
    }

    if starts_with_keyword(text, "else") {
        return LineKind::Else;
    }

    if starts_with_keyword(text, "while") {
        return LineKind::While;
    }

    if starts_with_keyword(text, "for") {
        return LineKind::For;
    }

    if starts_with_keyword(text, "return") {
        return LineKind::Return;
    }

    if call_arguments(text, "print").is_some() {
        return LineKind::Print;
    }

    match text {
        "pass" => return LineKind::Pass,
        "break" => return LineKind::Break,
        "continue" => return LineKind::Continue,
        _ => ()
    }

    if is_call(text) {
        return LineKind::Call;
    }

    match split_assignment(text) {
        Some(assignment) if is_identifier(&assignment.target) => {
            if let Some(kind) = find_unsupported_literal(&assignment.value) {
                LineKind::UnsupportedLiteral(kind)
            } else if assignment.operator.is_some() {
                LineKind::AugmentedAssignment
            } else {
                LineKind::Assignment
            }
        }
        _ => LineKind::Unknown
    }
}


/// Whether `text` begins with `keyword` as a whole word.
pub fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.strip_prefix(keyword)
        .is_some_and(|rest| !rest.starts_with(is_identifier_char))
}


/// Returns the text between the parentheses of a call to `name` which spans the whole of `text`.
///
/// # Examples
///
/// ```
/// # use pyjava::parser::lexing::*;
/// # use pyjava::parser::token::*;
/// assert_eq!(call_arguments("print(a, b)", "print"), Some("a, b"));
/// assert_eq!(call_arguments("printer(a)", "print"), None);
/// ```
pub fn call_arguments<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    if !starts_with_keyword(text, name) {
        return None;
    }

    text[name.len()..].trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}


/// Whether `text` is a statement consisting of a single call, e.g. `greet(name)`.
fn is_call(text: &str) -> bool {
    match text.find('(') {
        Some(open) => is_identifier(text[..open].trim_end()) && text.ends_with(')'),
        None => false
    }
}


/// The parts of an assignment statement: `target = value` or `target op= value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub target: String,
    /// The arithmetic operator of an augmented assignment, e.g. `+` for `+=`
    pub operator: Option<String>,
    pub value: String
}


/// Splits a line at its first top-level assignment operator.
///
/// Equals signs inside brackets or string literals, and those which form part of a comparison
/// (`==`, `!=`, `<=`, `>=`), are not assignment operators. Returns [`None`] when there is no
/// assignment, or when it uses an augmented operator Java has no equivalent of (`//=`, `**=`).
pub fn split_assignment(text: &str) -> Option<Assignment> {
    let masked: Vec<char> = mask_strings(text).chars().collect();
    let original: Vec<char> = text.chars().collect();
    let mut depth: usize = 0;
    let mut i = 0;

    while i < masked.len() {
        match masked[i] {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '=' if depth == 0 => {
                if masked.get(i + 1) == Some(&'=') {
                    i += 2;
                    continue;
                }

                let previous = if i > 0 { masked.get(i - 1).copied() } else { None };
                let (operator, target_end) = match previous {
                    Some('!' | '<' | '>') => {
                        i += 1;
                        continue;
                    }
                    Some(op @ ('+' | '-' | '*' | '/' | '%')) => {
                        let before = if i > 1 { masked.get(i - 2).copied() } else { None };
                        if before == Some(op) && (op == '*' || op == '/') {
                            return None;
                        }
                        (Some(op.to_string()), i - 1)
                    }
                    _ => (None, i)
                };

                return Some(Assignment {
                    target: original[..target_end].iter().collect::<String>().trim().to_owned(),
                    operator,
                    value: original[i + 1..].iter().collect::<String>().trim().to_owned()
                });
            }
            _ => ()
        }

        i += 1;
    }

    None
}


/// Looks for a list, dictionary or tuple literal in the value of an assignment, i.e. an opening
/// delimiter followed later by its closing one outside of any string literal. Lists are checked
/// first, then dictionaries, then tuples; only the first kind found is returned.
pub fn find_unsupported_literal(value: &str) -> Option<LiteralKind> {
    let masked = mask_strings(value);
    LiteralKind::ALL.iter()
        .find(|(_, open, close)| match masked.find(*open) {
            Some(start) => masked[start..].contains(*close),
            None => false
        })
        .map(|(kind, _, _)| *kind)
}
