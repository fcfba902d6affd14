//! # Symbol Table Module
//!
//! This module provides the scopes used while translating a program: one [`SymbolTable`] per
//! function body and per nested block, each linked to the table of its enclosing block.
//!
//! A name is looked up in the innermost table first and then in each enclosing table in turn, so
//! the order of the chain decides which declaration a name refers to. Once a name has been
//! registered in a table its type is fixed for the rest of that table's lifetime: reassigning the
//! variable later never re-infers it.
//!
//! Example:
//!
//! ```rust
//! # use pyjava::parser::types::JavaType;
//! # use pyjava::semantics::symbol_table::*;
//! let root = SymbolTable::new(None);
//! let child = SymbolTable::add_child(&root);
//!
//! root.borrow_mut().insert(Symbol::new("x".to_owned(), JavaType::Int, 1));
//! assert!(child.borrow().get("x").is_some()); // found via the parent
//! ```
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use log::trace;

use crate::parser::types::JavaType;


/// A variable declared in the generated Java, with the type inferred for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub var_type: JavaType,
    /// The line on which the variable was first assigned.
    pub line: usize
}


impl Symbol {
    pub fn new(name: String, var_type: JavaType, line: usize) -> Self {
        Self {
            name,
            var_type,
            line
        }
    }
}


/// A scope of variables with an optional link to the scope which encloses it.
#[derive(Debug)]
pub struct SymbolTable {
    /// The symbols declared directly in this scope, by name.
    table: HashMap<String, Symbol>,
    /// An optional weak reference to the enclosing symbol table.
    pub parent: Option<Weak<RefCell<SymbolTable>>>,
}


impl SymbolTable {
    /// Creates a new `SymbolTable` with an optional parent.
    ///
    /// # Returns
    ///
    /// A reference-counted `Rc<RefCell<SymbolTable>>` pointing to the new symbol table.
    pub fn new(parent: Option<Weak<RefCell<SymbolTable>>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(SymbolTable {
            parent,
            table: HashMap::new(),
        }))
    }


    /// Registers a symbol in this table.
    ///
    /// If the name is already registered here the existing symbol, and so its type, is kept.
    pub fn insert(&mut self, symbol: Symbol) {
        match self.table.get(&symbol.name) {
            Some(existing) => trace!(
                "'{}' on line {} keeps the type {} declared on line {}",
                symbol.name, symbol.line, existing.var_type, existing.line
            ),
            None => {
                self.table.insert(symbol.name.clone(), symbol);
            }
        }
    }


    /// Retrieves a symbol by name from this table or, failing that, from the nearest enclosing
    /// table which has it.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        match self.table.get(name) {
            Some(symbol) => Some(symbol.clone()),
            None => match &self.parent {
                Some(p) => p.upgrade()?.borrow().get(name),
                None => None,
            },
        }
    }


    /// Whether `name` is declared in this table or any enclosing one.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }


    /// Creates a new symbol table enclosed by `parent`.
    ///
    /// The child only holds a weak reference, so the caller must keep `parent` alive for as long
    /// as the child is in use.
    pub fn add_child(parent: &Rc<RefCell<Self>>) -> Rc<RefCell<Self>> {
        SymbolTable::new(Some(Rc::downgrade(parent)))
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    #[test]
    fn test_lookup_walks_to_parent() {
        let root = SymbolTable::new(None);
        let child = SymbolTable::add_child(&root);
        let grandchild = SymbolTable::add_child(&child);

        root.borrow_mut().insert(Symbol::new("x".to_owned(), JavaType::Double, 1));
        assert_eq!(grandchild.borrow().get("x").map(|s| s.var_type), Some(JavaType::Double));
        assert!(grandchild.borrow().contains("x"));
        assert!(!root.borrow().contains("y"));
    }


    #[test]
    fn test_innermost_declaration_wins() {
        let root = SymbolTable::new(None);
        let child = SymbolTable::add_child(&root);

        root.borrow_mut().insert(Symbol::new("x".to_owned(), JavaType::Int, 1));
        child.borrow_mut().insert(Symbol::new("x".to_owned(), JavaType::Str, 2));
        assert_eq!(child.borrow().get("x").map(|s| s.var_type), Some(JavaType::Str));
        assert_eq!(root.borrow().get("x").map(|s| s.var_type), Some(JavaType::Int));
    }


    #[test]
    fn test_registered_type_never_changes() {
        let root = SymbolTable::new(None);
        root.borrow_mut().insert(Symbol::new("x".to_owned(), JavaType::Int, 1));
        root.borrow_mut().insert(Symbol::new("x".to_owned(), JavaType::Str, 5));

        assert_eq!(root.borrow().get("x"), Some(Symbol::new("x".to_owned(), JavaType::Int, 1)));
    }


    #[test]
    fn test_child_scope_does_not_leak_upwards() {
        let root = SymbolTable::new(None);
        {
            let child = SymbolTable::add_child(&root);
            child.borrow_mut().insert(Symbol::new("i".to_owned(), JavaType::Int, 3));
        }
        assert!(!root.borrow().contains("i"));
    }
}
