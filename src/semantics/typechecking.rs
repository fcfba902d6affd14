//! Infers the Java type of a translated expression.
//!
//! Inference is deliberately shallow. Literals are recognised by their shape and a bare variable
//! name is looked up in the scope chain; anything else, including every compound expression such
//! as `a + b` or `f(x)`, is assumed to be an `int`.
use crate::parser::types::JavaType;

use super::symbol_table::SymbolTable;


/// Classifies an already-translated expression.
///
/// The checks are made in order: integer literal, floating-point literal, string literal (any
/// expression starting with a double quote), boolean literal, then a variable registered in
/// `scope` or any enclosing scope. If none match the expression is an `int`.
///
/// # Examples
///
/// ```
/// # use pyjava::parser::types::JavaType;
/// # use pyjava::semantics::symbol_table::SymbolTable;
/// # use pyjava::semantics::typechecking::get_expr_type;
/// let scope = SymbolTable::new(None);
/// assert_eq!(get_expr_type("-2.5", &scope.borrow()), JavaType::Double);
/// assert_eq!(get_expr_type("a + b", &scope.borrow()), JavaType::Int);
/// ```
pub fn get_expr_type(expr: &str, scope: &SymbolTable) -> JavaType {
    if is_int_literal(expr) {
        return JavaType::Int;
    }

    if is_double_literal(expr) {
        return JavaType::Double;
    }

    if expr.starts_with('"') {
        return JavaType::Str;
    }

    if expr == "true" || expr == "false" {
        return JavaType::Boolean;
    }

    match scope.get(expr) {
        Some(symbol) => symbol.var_type,
        None => JavaType::Int
    }
}


fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}


/// Matches `-?[0-9]+`.
fn is_int_literal(expr: &str) -> bool {
    is_digits(expr.strip_prefix('-').unwrap_or(expr))
}


/// Matches `-?[0-9]+\.[0-9]+`.
fn is_double_literal(expr: &str) -> bool {
    match expr.strip_prefix('-').unwrap_or(expr).split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
        None => false
    }
}


#[cfg(test)]
mod tests {
    use crate::semantics::symbol_table::Symbol;

    use super::*;


    #[test]
    fn test_literal_types() {
        let scope = SymbolTable::new(None);
        let scope = scope.borrow();
        assert_eq!(get_expr_type("5", &scope), JavaType::Int);
        assert_eq!(get_expr_type("-12", &scope), JavaType::Int);
        assert_eq!(get_expr_type("3.14", &scope), JavaType::Double);
        assert_eq!(get_expr_type("-0.5", &scope), JavaType::Double);
        assert_eq!(get_expr_type("\"hi\"", &scope), JavaType::Str);
        assert_eq!(get_expr_type("\"a\" + b", &scope), JavaType::Str);
        assert_eq!(get_expr_type("true", &scope), JavaType::Boolean);
        assert_eq!(get_expr_type("false", &scope), JavaType::Boolean);
    }


    #[test]
    fn test_near_literals_default_to_int() {
        let scope = SymbolTable::new(None);
        let scope = scope.borrow();
        assert_eq!(get_expr_type("1.", &scope), JavaType::Int);
        assert_eq!(get_expr_type(".5", &scope), JavaType::Int);
        assert_eq!(get_expr_type("1e5", &scope), JavaType::Int);
        assert_eq!(get_expr_type("-", &scope), JavaType::Int);
        assert_eq!(get_expr_type("", &scope), JavaType::Int);
    }


    #[test]
    fn test_variables_resolve_through_scopes() {
        let root = SymbolTable::new(None);
        root.borrow_mut().insert(Symbol::new("name".to_owned(), JavaType::Str, 1));
        let child = SymbolTable::add_child(&root);
        child.borrow_mut().insert(Symbol::new("ratio".to_owned(), JavaType::Double, 2));

        let scope = child.borrow();
        assert_eq!(get_expr_type("name", &scope), JavaType::Str);
        assert_eq!(get_expr_type("ratio", &scope), JavaType::Double);
        assert_eq!(get_expr_type("unknown", &scope), JavaType::Int);
    }


    #[test]
    fn test_compound_expressions_default_to_int() {
        let root = SymbolTable::new(None);
        root.borrow_mut().insert(Symbol::new("name".to_owned(), JavaType::Str, 1));
        let scope = root.borrow();
        assert_eq!(get_expr_type("name + name", &scope), JavaType::Int);
        assert_eq!(get_expr_type("f(name)", &scope), JavaType::Int);
        assert_eq!(get_expr_type("a && b", &scope), JavaType::Int);
    }
}
