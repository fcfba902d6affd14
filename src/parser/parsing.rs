//! Builds the syntax tree of a Python program from its logical lines.
//!
//! Parsing happens in two steps. [`extract_functions()`] first partitions the top-level lines into
//! function definitions and entry-point statements purely by indentation: every line indented
//! further than a `def` line belongs to that function. Each group of lines is then handed to a
//! [`Parser`], which reads nested blocks by indentation and produces a [`Block`] of
//! [`SyntaxTree`]s.
//!
//! The parser never fails. A line which cannot be understood becomes a
//! [`SyntaxNode::Malformed`] node carrying the [`ParsingError`], so that every problem in a
//! program can be reported together once the tree is translated.
use std::collections::VecDeque;

use indexmap::IndexMap;
use log::{debug, warn};

use super::errors::ParsingError;
use super::expressions::{is_identifier, split_arguments};
use super::lexing::{call_arguments, split_assignment};
use super::token::{LineKind, SourceLine};


/// A function found by [`extract_functions()`]. All parameters are integers as Python annotations
/// are not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<SourceLine>,
    pub line_number: usize
}


/// The result of the first pass over a program: its functions in order of first definition, and
/// the remaining top-level lines which make up the entry point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub functions: IndexMap<String, FunctionDef>,
    pub entry_point: Vec<SourceLine>
}


/// The start, end and step of a `range()` call, as untranslated Python expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBounds {
    pub start: String,
    pub end: String,
    pub step: String
}


/// One `if` or `elif` of a conditional chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub condition: String,
    pub body: Block
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    // the if and elif branches in order, optional else body
    If(Vec<Branch>, Option<Block>),
    // condition, body
    While(String, Block),
    // loop variable, range bounds, body
    For(String, RangeBounds, Block),
    Return(Option<String>),
    // arguments of the print call
    Print(Vec<String>),
    // the whole call, passed through verbatim
    Call(String),
    // variable name, value
    Assignment(String, String),
    // variable name, arithmetic operator, value
    AugmentedAssignment(String, String, String),
    Pass,
    Break,
    Continue,
    Malformed(ParsingError)
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    pub node: SyntaxNode,
    pub line_number: usize
}


impl SyntaxTree {
    pub fn new(node: SyntaxNode, line_number: usize) -> Self {
        SyntaxTree {
            node, line_number
        }
    }


    fn malformed(error: ParsingError, line_number: usize) -> Self {
        Self::new(SyntaxNode::Malformed(error), line_number)
    }
}


/// The statements of one indented block, in order.
pub type Block = Vec<SyntaxTree>;


/// Partitions a program's lines into function definitions and entry-point statements.
///
/// A `def` line starts a new function, and every following line indented further than it is
/// appended to that function's body. The first line at or below the `def` line's indentation
/// ends the body and is treated as a top-level line again, so it may start another function.
/// Only whitespace is measured here: the block structure of the body is left to the [`Parser`].
///
/// A function defined twice keeps its original position but takes the later body. A `def` line
/// which cannot be read is left in the entry point so that the parser reports it.
pub fn extract_functions(lines: Vec<SourceLine>) -> Program {
    let mut program = Program::default();
    let mut current: Option<(FunctionDef, usize)> = None;

    for line in lines {
        if let Some((function, indent)) = current.as_mut() {
            if line.indent > *indent {
                function.body.push(line);
                continue;
            }
        }

        if let Some((function, _)) = current.take() {
            add_function(&mut program, function);
        }

        if line.kind == LineKind::Definition {
            if let Ok((name, params)) = parse_definition(&line.text) {
                let indent = line.indent;
                current = Some((FunctionDef { name, params, body: vec![], line_number: line.line_number }, indent));
                continue;
            }
        }

        program.entry_point.push(line);
    }

    if let Some((function, _)) = current.take() {
        add_function(&mut program, function);
    }

    debug!(
        "Extracted {} function(s) and {} entry point line(s)",
        program.functions.len(), program.entry_point.len()
    );
    program
}


fn add_function(program: &mut Program, function: FunctionDef) {
    if program.functions.contains_key(&function.name) {
        warn!("Function '{}' redefined on line {}, the later definition is used", function.name, function.line_number);
    }

    program.functions.insert(function.name.clone(), function);
}


/// Reads the name and parameter names from a line such as `def add(a, b):`.
///
/// # Errors
///
/// Returns [`ParsingError::MalformedDefinition`] if the parentheses or trailing colon are missing,
/// or if the name or any parameter is not a plain identifier (so annotations and default values
/// are rejected).
pub fn parse_definition(text: &str) -> Result<(String, Vec<String>), ParsingError> {
    let malformed = || ParsingError::MalformedDefinition(text.to_owned());

    let rest = text.strip_prefix("def").ok_or_else(malformed)?;
    let open = rest.find('(').ok_or_else(malformed)?;
    let close = rest.rfind(')').filter(|&close| close > open).ok_or_else(malformed)?;
    if rest[close + 1..].trim() != ":" {
        return Err(malformed());
    }

    let name = rest[..open].trim();
    if !is_identifier(name) {
        return Err(malformed());
    }

    let params = split_arguments(&rest[open + 1..close]);
    if !params.iter().all(|p| is_identifier(p)) {
        return Err(malformed());
    }

    Ok((name.to_owned(), params))
}


/// Reads the condition of a block header such as `while x < 10:`.
fn parse_condition(text: &str, keyword: &str) -> Result<String, ParsingError> {
    let condition = text[keyword.len()..].trim()
        .strip_suffix(':')
        .ok_or_else(|| ParsingError::MissingColon(keyword.to_owned()))?
        .trim();

    if condition.is_empty() {
        return Err(ParsingError::MissingCondition(keyword.to_owned()));
    }

    Ok(condition.to_owned())
}


/// Reads the loop variable and bounds of a header such as `for i in range(0, n, 2):`.
///
/// One argument gives the end with a start of 0, two give the start and end, and three give the
/// start, end and step. The step defaults to 1.
pub fn parse_for_header(text: &str) -> Result<(String, RangeBounds), ParsingError> {
    let unsupported = || ParsingError::UnsupportedLoop(text.to_owned());

    let header = text["for".len()..].trim()
        .strip_suffix(':')
        .ok_or_else(|| ParsingError::MissingColon("for".to_owned()))?;
    let (variable, iterable) = header.split_once(" in ").ok_or_else(unsupported)?;
    let variable = variable.trim();
    if !is_identifier(variable) {
        return Err(unsupported());
    }

    let args = call_arguments(iterable.trim(), "range").ok_or_else(unsupported)?;
    let mut args = split_arguments(args);
    let bounds = match args.len() {
        1 => RangeBounds { start: "0".to_owned(), end: args.remove(0), step: "1".to_owned() },
        2 => RangeBounds { start: args.remove(0), end: args.remove(0), step: "1".to_owned() },
        3 => RangeBounds { start: args.remove(0), end: args.remove(0), step: args.remove(0) },
        n => return Err(ParsingError::InvalidRangeArguments(n))
    };

    Ok((variable.to_owned(), bounds))
}


/// Contains the lines of one function body or of the entry point as a FIFO queue which the parser
/// consumes while building the syntax tree.
pub struct Parser {
    lines: VecDeque<SourceLine>
}


impl Parser {
    pub fn new(lines: Vec<SourceLine>) -> Self {
        Parser {
            lines: VecDeque::from(lines)
        }
    }


    /// Parses every line into a block whose indentation is that of the first line.
    ///
    /// Lines dedented below the first line match no enclosing block; each such dedent is reported
    /// once and parsing resumes at the new indentation.
    pub fn parse(&mut self) -> Block {
        let mut statements: Block = vec![];
        let mut first = true;
        while let Some(line) = self.lines.front() {
            let (indent, line_number) = (line.indent, line.line_number);
            if !first {
                statements.push(SyntaxTree::malformed(ParsingError::InconsistentDedent, line_number));
            }

            statements.extend(self.parse_block(indent));
            first = false;
        }

        statements
    }


    /// Parses statements at exactly `indent` until a line with less indentation is reached.
    fn parse_block(&mut self, indent: usize) -> Block {
        let mut statements: Block = vec![];
        // indentation of the body of the previous statement, if it had one
        let mut closed_indent: Option<usize> = None;

        while let Some(line) = self.lines.pop_front() {
            if line.indent < indent {
                self.lines.push_front(line);
                break;
            }

            if line.indent > indent {
                let error = match closed_indent {
                    Some(inner) if line.indent < inner => ParsingError::InconsistentDedent,
                    _ => ParsingError::UnexpectedIndent
                };
                statements.push(SyntaxTree::malformed(error, line.line_number));
                self.skip_children(line.indent);
                closed_indent = None;
                continue;
            }

            closed_indent = self.lines.front()
                .filter(|next| next.indent > line.indent)
                .map(|next| next.indent);
            statements.push(self.parse_statement(line));
        }

        statements
    }


    fn parse_statement(&mut self, line: SourceLine) -> SyntaxTree {
        let line_number = line.line_number;
        let node = match line.kind.clone() {
            LineKind::Definition => {
                self.skip_children(line.indent);
                SyntaxNode::Malformed(match parse_definition(&line.text) {
                    Ok((name, _)) => ParsingError::NestedDefinition(name),
                    Err(e) => e
                })
            }

            LineKind::If => return self.parse_if(line),

            LineKind::Elif | LineKind::Else => {
                self.skip_children(line.indent);
                let keyword = if line.kind == LineKind::Elif { "elif" } else { "else" };
                SyntaxNode::Malformed(ParsingError::DanglingBranch(keyword.to_owned()))
            }

            LineKind::While => match parse_condition(&line.text, "while") {
                Ok(condition) => match self.parse_body(&line) {
                    Ok(body) => SyntaxNode::While(condition, body),
                    Err(e) => SyntaxNode::Malformed(e)
                },
                Err(e) => {
                    self.skip_children(line.indent);
                    SyntaxNode::Malformed(e)
                }
            },

            LineKind::For => match parse_for_header(&line.text) {
                Ok((variable, bounds)) => match self.parse_body(&line) {
                    Ok(body) => SyntaxNode::For(variable, bounds, body),
                    Err(e) => SyntaxNode::Malformed(e)
                },
                Err(e) => {
                    self.skip_children(line.indent);
                    SyntaxNode::Malformed(e)
                }
            },

            LineKind::Return => {
                let value = line.text["return".len()..].trim();
                SyntaxNode::Return((!value.is_empty()).then(|| value.to_owned()))
            }

            LineKind::Print => match call_arguments(&line.text, "print") {
                Some(args) => SyntaxNode::Print(split_arguments(args)),
                None => SyntaxNode::Malformed(ParsingError::UnsupportedStatement(line.text.clone()))
            },

            LineKind::Pass => SyntaxNode::Pass,
            LineKind::Break => SyntaxNode::Break,
            LineKind::Continue => SyntaxNode::Continue,
            LineKind::Call => SyntaxNode::Call(line.text.clone()),

            LineKind::Assignment | LineKind::AugmentedAssignment => match split_assignment(&line.text) {
                Some(assignment) => match assignment.operator {
                    Some(op) => SyntaxNode::AugmentedAssignment(assignment.target, op, assignment.value),
                    None => SyntaxNode::Assignment(assignment.target, assignment.value)
                },
                None => SyntaxNode::Malformed(ParsingError::UnsupportedStatement(line.text.clone()))
            },

            LineKind::UnsupportedLiteral(kind) => SyntaxNode::Malformed(ParsingError::UnsupportedLiteral(kind)),
            LineKind::Unknown => SyntaxNode::Malformed(ParsingError::UnsupportedStatement(line.text.clone()))
        };

        SyntaxTree::new(node, line_number)
    }


    /// Parses an `if` together with the `elif` and `else` lines which directly follow it at the
    /// same indentation, producing a single [`SyntaxNode::If`].
    fn parse_if(&mut self, line: SourceLine) -> SyntaxTree {
        let mut branches: Vec<Branch> = vec![];
        match self.parse_branch(&line, "if") {
            Ok(branch) => branches.push(branch),
            Err(e) => return SyntaxTree::malformed(e, line.line_number)
        }

        let mut else_body: Option<Block> = None;
        while let Some(next) = self.lines.front() {
            if next.indent != line.indent || !next.kind.is_branch_continuation() {
                break;
            }

            let Some(next) = self.lines.pop_front() else { break };
            if next.kind == LineKind::Elif {
                match self.parse_branch(&next, "elif") {
                    Ok(branch) => branches.push(branch),
                    Err(e) => return SyntaxTree::malformed(e, next.line_number)
                }
                continue;
            }

            if next.text["else".len()..].trim() != ":" {
                self.skip_children(next.indent);
                return SyntaxTree::malformed(ParsingError::MissingColon("else".to_owned()), next.line_number);
            }

            match self.parse_body(&next) {
                Ok(body) => else_body = Some(body),
                Err(e) => return SyntaxTree::malformed(e, next.line_number)
            }
            break;
        }

        SyntaxTree::new(SyntaxNode::If(branches, else_body), line.line_number)
    }


    fn parse_branch(&mut self, header: &SourceLine, keyword: &str) -> Result<Branch, ParsingError> {
        let condition = match parse_condition(&header.text, keyword) {
            Ok(condition) => condition,
            Err(e) => {
                self.skip_children(header.indent);
                return Err(e);
            }
        };

        Ok(Branch { condition, body: self.parse_body(header)? })
    }


    /// Parses the block indented under `header`, whose indentation is that of its first line.
    fn parse_body(&mut self, header: &SourceLine) -> Result<Block, ParsingError> {
        match self.lines.front() {
            Some(next) if next.indent > header.indent => {
                let indent = next.indent;
                Ok(self.parse_block(indent))
            }
            _ => Err(ParsingError::MissingBody(header.text.clone()))
        }
    }


    /// Discards every following line indented further than `indent`.
    fn skip_children(&mut self, indent: usize) {
        while self.lines.front().is_some_and(|next| next.indent > indent) {
            self.lines.pop_front();
        }
    }
}
