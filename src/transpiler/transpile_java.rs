//! Translates the syntax trees of a Python program into the source of a Java class.
//!
//! The struct [`Transpiler`] lowers each function body, and then the entry point, into a list of
//! [`JavaStatement`]s. A function's return type depends on every `return` in its body, so the
//! types of the returned expressions are gathered into a [`ReturnTypeSet`] while its body is
//! lowered and only resolved once the whole body is done. The finished [`JavaClass`] is then
//! rendered as text through its `Display` implementation.
//!
//! Lowering never stops at the first problem. Each statement yields a [`Generated`] value and the
//! diagnostics of every failing statement are merged, so the caller receives either the complete
//! class or every diagnostic found in the program.
//!
//! # Examples
//!
//! ```
//! # use pyjava::parser::lexing::Scanner;
//! # use pyjava::parser::parsing::extract_functions;
//! # use pyjava::transpiler::transpile_java::Transpiler;
//! let program = extract_functions(Scanner::new("x = 5\nprint(x)\n").lines);
//! let java = Transpiler::new(program).transpile_java().unwrap();
//! assert!(java.contains("int x = 5;"));
//! ```
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::parser::errors::ParsingError;
use crate::parser::expressions::translate_expression;
use crate::parser::parsing::{Block, FunctionDef, Parser, Program, SyntaxNode, SyntaxTree};
use crate::parser::token::SourceLine;
use crate::parser::types::{resolve_return_type, JavaType, ReturnTypeSet};
use crate::semantics::errors::{collect_generated, combine, report, Generated, SemanticError};
use crate::semantics::symbol_table::{Symbol, SymbolTable};
use crate::semantics::typechecking::get_expr_type;


const INDENT: &str = "    ";

/// Name of the class wrapping the translated program.
pub const CLASS_NAME: &str = "Main";


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaStatement {
    // type, variable name, value
    Declaration(JavaType, String, String),
    // variable name, assignment operator, value
    Assignment(String, String, String),
    // conditions and bodies of the if and else-if branches, optional else body
    If(Vec<(String, Vec<JavaStatement>)>, Option<Vec<JavaStatement>>),
    // condition, body
    While(String, Vec<JavaStatement>),
    // loop variable, start, end, step, body
    For(String, String, String, String, Vec<JavaStatement>),
    Return(Option<String>),
    // argument of System.out.println
    Println(String),
    Call(String),
    Break,
    Continue
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaMethod {
    pub name: String,
    pub return_type: JavaType,
    pub params: Vec<String>,
    pub body: Vec<JavaStatement>
}


/// A translated program: one static method per Python function plus the `main` entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaClass {
    pub methods: Vec<JavaMethod>,
    pub main_body: Vec<JavaStatement>
}


/// The core of the transpiler module, holding the program being translated to Java.
pub struct Transpiler {
    program: Program
}


impl Transpiler {
    pub fn new(program: Program) -> Self {
        Transpiler { program }
    }


    /// Translates the program into the source of a Java class, or gathers the diagnostics of every
    /// statement which could not be translated.
    pub fn transpile_java(&self) -> Generated<String> {
        Ok(self.build_class()?.to_string())
    }


    pub fn build_class(&self) -> Generated<JavaClass> {
        let methods = collect_generated(self.program.functions.values().map(lower_function));
        let main_body = lower_entry_point(&self.program.entry_point);
        let (methods, main_body) = combine(methods, main_body)?;

        Ok(JavaClass { methods, main_body })
    }
}


/// Lowers one function. Every parameter is an `int`, and the return type is resolved from the
/// returns found in the body once it has been lowered completely.
fn lower_function(function: &FunctionDef) -> Generated<JavaMethod> {
    if function.body.is_empty() {
        let header = format!("def {}({}):", function.name, function.params.join(", "));
        return report(function.line_number, &ParsingError::MissingBody(header));
    }

    let scope = SymbolTable::new(None);
    for param in &function.params {
        scope.borrow_mut().insert(Symbol::new(param.clone(), JavaType::Int, function.line_number));
    }

    let block = Parser::new(function.body.clone()).parse();
    let mut return_types = Some(ReturnTypeSet::new());
    let body = lower_block(&block, &scope, &mut return_types)?;

    let return_type = resolve_return_type(&return_types.unwrap_or_default());
    debug!("Resolved return type of '{}' to {}", function.name, return_type);

    Ok(JavaMethod {
        name: function.name.clone(),
        return_type,
        params: function.params.clone(),
        body
    })
}


fn lower_entry_point(lines: &[SourceLine]) -> Generated<Vec<JavaStatement>> {
    let scope = SymbolTable::new(None);
    let block = Parser::new(lines.to_vec()).parse();

    lower_block(&block, &scope, &mut None)
}


/// Lowers the statements of a block in a new scope enclosed by `parent`.
///
/// `return_types` collects the types of the enclosing function's return values, and is `None`
/// in the entry point where `return` is not allowed.
fn lower_block(
    block: &Block,
    parent: &Rc<RefCell<SymbolTable>>,
    return_types: &mut Option<ReturnTypeSet>
) -> Generated<Vec<JavaStatement>> {
    let scope = SymbolTable::add_child(parent);
    let statements = collect_generated(
        block.iter().map(|tree| lower_statement(tree, &scope, return_types))
    )?;

    Ok(statements.into_iter().flatten().collect())
}


fn translate(expr: &str, line_number: usize) -> Generated<String> {
    translate_expression(expr).or_else(|e| report(line_number, &e))
}


fn lower_statement(
    tree: &SyntaxTree,
    scope: &Rc<RefCell<SymbolTable>>,
    return_types: &mut Option<ReturnTypeSet>
) -> Generated<Option<JavaStatement>> {
    let line = tree.line_number;
    let statement = match &tree.node {
        SyntaxNode::If(branches, else_body) => {
            let branches = collect_generated(branches.iter().map(|branch| combine(
                translate(&branch.condition, line),
                lower_block(&branch.body, scope, return_types)
            )));
            let else_body = match else_body {
                Some(body) => lower_block(body, scope, return_types).map(Some),
                None => Ok(None)
            };

            let (branches, else_body) = combine(branches, else_body)?;
            JavaStatement::If(branches, else_body)
        }

        SyntaxNode::While(condition, body) => {
            let (condition, body) = combine(
                translate(condition, line),
                lower_block(body, scope, return_types)
            )?;
            JavaStatement::While(condition, body)
        }

        SyntaxNode::For(variable, bounds, body) => {
            // the loop variable stays visible in the enclosing scope after the loop
            scope.borrow_mut().insert(Symbol::new(variable.clone(), JavaType::Int, line));
            let ((start, end), (step, body)) = combine(
                combine(translate(&bounds.start, line), translate(&bounds.end, line)),
                combine(translate(&bounds.step, line), lower_block(body, scope, return_types))
            )?;
            JavaStatement::For(variable.clone(), start, end, step, body)
        }

        SyntaxNode::Return(value) => {
            let Some(return_types) = return_types.as_mut() else {
                return report(line, &SemanticError::ReturnOutsideFunction);
            };

            match value {
                Some(value) => {
                    let value = translate(value, line)?;
                    return_types.insert(get_expr_type(&value, &scope.borrow()));
                    JavaStatement::Return(Some(value))
                }
                None => JavaStatement::Return(None)
            }
        }

        SyntaxNode::Print(args) => {
            let args = collect_generated(args.iter().map(|arg| translate(arg, line)))?;
            JavaStatement::Println(args.join(" + \" \" + "))
        }

        SyntaxNode::Call(call) => JavaStatement::Call(call.clone()),

        SyntaxNode::Assignment(name, value) => {
            let value = translate(value, line)?;
            if scope.borrow().contains(name) {
                JavaStatement::Assignment(name.clone(), "=".to_owned(), value)
            } else {
                let var_type = get_expr_type(&value, &scope.borrow());
                scope.borrow_mut().insert(Symbol::new(name.clone(), var_type, line));
                JavaStatement::Declaration(var_type, name.clone(), value)
            }
        }

        SyntaxNode::AugmentedAssignment(name, op, value) => {
            if !scope.borrow().contains(name) {
                return report(line, &SemanticError::UndefinedVariable(name.clone()));
            }

            let value = translate(value, line)?;
            JavaStatement::Assignment(name.clone(), format!("{}=", op), value)
        }

        SyntaxNode::Pass => return Ok(None),
        SyntaxNode::Break => JavaStatement::Break,
        SyntaxNode::Continue => JavaStatement::Continue,
        SyntaxNode::Malformed(e) => return report(line, e)
    };

    Ok(Some(statement))
}


impl JavaStatement {
    fn fmt_indented(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        let pad = INDENT.repeat(indent);
        match self {
            Self::Declaration(var_type, name, value) => writeln!(f, "{}{} {} = {};", pad, var_type, name, value),
            Self::Assignment(name, op, value) => writeln!(f, "{}{} {} {};", pad, name, op, value),

            Self::If(branches, else_body) => {
                for (i, (condition, body)) in branches.iter().enumerate() {
                    if i == 0 {
                        writeln!(f, "{}if ({}) {{", pad, condition)?;
                    } else {
                        writeln!(f, "{}}} else if ({}) {{", pad, condition)?;
                    }
                    fmt_block(f, body, indent + 1)?;
                }

                if let Some(body) = else_body {
                    writeln!(f, "{}}} else {{", pad)?;
                    fmt_block(f, body, indent + 1)?;
                }
                writeln!(f, "{}}}", pad)
            }

            Self::While(condition, body) => {
                writeln!(f, "{}while ({}) {{", pad, condition)?;
                fmt_block(f, body, indent + 1)?;
                writeln!(f, "{}}}", pad)
            }

            Self::For(variable, start, end, step, body) => {
                writeln!(
                    f, "{0}for (int {1} = {2}; {1} < {3}; {1} += {4}) {{",
                    pad, variable, start, end, step
                )?;
                fmt_block(f, body, indent + 1)?;
                writeln!(f, "{}}}", pad)
            }

            Self::Return(Some(value)) => writeln!(f, "{}return {};", pad, value),
            Self::Return(None) => writeln!(f, "{}return;", pad),
            Self::Println(args) => writeln!(f, "{}System.out.println({});", pad, args),
            Self::Call(call) => writeln!(f, "{}{};", pad, call),
            Self::Break => writeln!(f, "{}break;", pad),
            Self::Continue => writeln!(f, "{}continue;", pad),
        }
    }
}


fn fmt_block(f: &mut fmt::Formatter, body: &[JavaStatement], indent: usize) -> fmt::Result {
    for statement in body {
        statement.fmt_indented(f, indent)?;
    }

    Ok(())
}


impl fmt::Display for JavaClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "public class {} {{", CLASS_NAME)?;

        for method in &self.methods {
            let params = method.params.iter()
                                      .map(|p| format!("int {}", p))
                                      .collect::<Vec<String>>()
                                      .join(", ");
            writeln!(f, "{}static {} {}({}) {{", INDENT, method.return_type, method.name, params)?;
            fmt_block(f, &method.body, 2)?;
            writeln!(f, "{}}}", INDENT)?;
            writeln!(f)?;
        }

        writeln!(f, "{}public static void main(String[] args) {{", INDENT)?;
        fmt_block(f, &self.main_body, 2)?;
        writeln!(f, "{}}}", INDENT)?;
        writeln!(f, "}}")
    }
}
