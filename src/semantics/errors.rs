//! Diagnostics gathered while translating a program.
//!
//! Every translation step produces a [`Generated`] value: either the translated fragment or the
//! [`Diagnostics`] explaining why it could not be translated. Steps are combined with
//! [`combine()`] and [`collect_generated()`], which keep going after a failure and merge the
//! diagnostics of every failing step, so one pass reports every problem in a program. Any
//! diagnostic at all makes the combined result an error, so generated code is never returned
//! alongside a report.
use std::{fmt, error};
use std::slice::Iter;


/// The header line of a diagnostics report.
pub const REPORT_HEADER: &str = "❌ Errors:";


/// Problems found while translating statements which are themselves well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticError {
    ReturnOutsideFunction,
    UndefinedVariable(String)
}


impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ReturnOutsideFunction => write!(f, "'return' outside of a function"),
            Self::UndefinedVariable(name) => write!(f, "Variable '{}' is updated before it is assigned", name),
        }
    }
}


impl error::Error for SemanticError {}


/// A single unsupported construct or malformed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line_number: usize,
    pub message: String
}


impl Diagnostic {
    pub fn new(line_number: usize, error: &dyn fmt::Display) -> Self {
        Self { line_number, message: error.to_string() }
    }
}


impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line {}: {}", self.line_number, self.message)
    }
}


/// An append-only, ordered collection of [`Diagnostic`]s.
///
/// Its `Display` implementation renders the full report: [`REPORT_HEADER`] followed by one
/// diagnostic per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>
}


impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }


    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }


    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }


    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }


    pub fn len(&self) -> usize {
        self.entries.len()
    }


    pub fn iter(&self) -> Iter<'_, Diagnostic> {
        self.entries.iter()
    }
}


impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Self { entries: vec![diagnostic] }
    }
}


impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", REPORT_HEADER)?;
        for diagnostic in &self.entries {
            writeln!(f, "{}", diagnostic)?;
        }

        Ok(())
    }
}


impl error::Error for Diagnostics {}


/// The outcome of translating one part of a program.
pub type Generated<T> = Result<T, Diagnostics>;


/// Turns any error found on `line_number` into a failed [`Generated`] value.
pub fn report<T>(line_number: usize, error: &dyn fmt::Display) -> Generated<T> {
    Err(Diagnostic::new(line_number, error).into())
}


/// Pairs two results, merging the diagnostics of both if both failed.
pub fn combine<A, B>(first: Generated<A>, second: Generated<B>) -> Generated<(A, B)> {
    match (first, second) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(mut a), Err(b)) => {
            a.extend(b);
            Err(a)
        }
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e)
    }
}


/// Gathers the fragments of a sequence of steps, or the diagnostics of all failing steps.
///
/// Every step is evaluated even after one has failed.
pub fn collect_generated<T>(steps: impl IntoIterator<Item = Generated<T>>) -> Generated<Vec<T>> {
    let mut fragments: Vec<T> = vec![];
    let mut diagnostics = Diagnostics::new();
    for step in steps {
        match step {
            Ok(fragment) => fragments.push(fragment),
            Err(e) => diagnostics.extend(e)
        }
    }

    if diagnostics.is_empty() {
        Ok(fragments)
    } else {
        Err(diagnostics)
    }
}


#[cfg(test)]
mod tests {
    use super::*;


    fn failure(line_number: usize, message: &str) -> Generated<u32> {
        report(line_number, &message)
    }


    #[test]
    fn test_report_format() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::new(1, &"List data type is not supported"));
        diagnostics.push(Diagnostic::new(4, &SemanticError::ReturnOutsideFunction));

        assert_eq!(
            diagnostics.to_string(),
            "❌ Errors:\nLine 1: List data type is not supported\nLine 4: 'return' outside of a function\n"
        );
    }


    #[test]
    fn test_combine() {
        assert_eq!(combine(Ok(1), Ok("a")), Ok((1, "a")));
        assert_eq!(combine(failure(1, "x"), Ok(2)).unwrap_err().len(), 1);
        assert_eq!(combine(Ok(2), failure(1, "x")).unwrap_err().len(), 1);

        let both = combine(failure(1, "x"), failure(2, "y")).unwrap_err();
        let lines: Vec<usize> = both.iter().map(|d| d.line_number).collect();
        assert_eq!(lines, vec![1, 2]);
    }


    #[test]
    fn test_collect_keeps_every_diagnostic() {
        assert_eq!(collect_generated(vec![Ok(1), Ok(2)]), Ok(vec![1, 2]));

        let result = collect_generated(vec![failure(1, "a"), Ok(2), failure(3, "b"), failure(4, "c")]);
        let messages: Vec<String> = result.unwrap_err().iter().map(|d| d.to_string()).collect();
        assert_eq!(messages, vec!["Line 1: a", "Line 3: b", "Line 4: c"]);
    }
}
