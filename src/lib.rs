//! Structural transliteration of a small, statically-typeable subset of Python into Java.
//!
//! A conversion runs the source through four stages:
//!
//! 1. [`Scanner`] splits the text into logical lines and classifies each one.
//! 2. [`extract_functions()`] separates function definitions from entry-point statements.
//! 3. [`Transpiler`] parses each body into a syntax tree and lowers it to Java statements,
//!    inferring variable and return types along the way.
//! 4. The resulting class is rendered as text, or, if any line could not be translated, a report
//!    listing every diagnostic is produced instead.
//!
//! Conversions are looked up by their source and target language in a [`ConverterRegistry`].
//! The only pair currently registered is Python to Java.
pub mod parser;
pub mod semantics;
pub mod transpiler;

use std::fmt;

use indexmap::IndexMap;
use log::{debug, warn};

use parser::lexing::Scanner;
use parser::parsing::extract_functions;
use semantics::errors::Diagnostics;
use transpiler::transpile_java::Transpiler;


/// Returned in place of code when no converter is registered for a language pair.
pub const UNSUPPORTED_CONVERSION: &str = "// Unsupported conversion";


/// The outcome of a conversion: generated code, or the report of everything which prevented it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    Code(String),
    Report(Diagnostics)
}


impl Conversion {
    pub fn is_code(&self) -> bool {
        matches!(self, Self::Code(_))
    }
}


impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{}", code),
            Self::Report(diagnostics) => write!(f, "{}", diagnostics),
        }
    }
}


pub type ConvertFn = fn(&str) -> Conversion;


/// Maps (source language, target language) pairs to the function converting between them.
///
/// Language tags are compared case-insensitively.
#[derive(Debug, Clone)]
pub struct ConverterRegistry {
    converters: IndexMap<(String, String), ConvertFn>
}


impl ConverterRegistry {
    /// Creates a registry with no converters at all.
    pub fn empty() -> Self {
        ConverterRegistry { converters: IndexMap::new() }
    }


    /// Registers `convert` for the given pair, replacing any converter already registered for it.
    pub fn register(&mut self, source: &str, target: &str, convert: ConvertFn) {
        self.converters.insert(language_pair(source, target), convert);
    }


    pub fn get(&self, source: &str, target: &str) -> Option<ConvertFn> {
        self.converters.get(&language_pair(source, target)).copied()
    }


    /// Converts `code` from the `source` language to the `target` language.
    ///
    /// An unregistered pair is not an error: the result is the code
    /// [`UNSUPPORTED_CONVERSION`], whatever the input.
    pub fn convert(&self, source: &str, target: &str, code: &str) -> Conversion {
        match self.get(source, target) {
            Some(convert) => convert(code),
            None => {
                warn!("No converter registered for '{}' to '{}'", source, target);
                Conversion::Code(UNSUPPORTED_CONVERSION.to_owned())
            }
        }
    }


    /// The registered pairs in order of registration.
    pub fn pairs(&self) -> impl Iterator<Item = &(String, String)> {
        self.converters.keys()
    }
}


impl Default for ConverterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("python", "java", python_to_java);
        registry
    }
}


fn language_pair(source: &str, target: &str) -> (String, String) {
    (source.trim().to_lowercase(), target.trim().to_lowercase())
}


/// Transliterates a Python program into a Java `Main` class.
pub fn python_to_java(code: &str) -> Conversion {
    let scanner = Scanner::new(code);
    debug!("Scanned {} logical line(s)", scanner.lines.len());

    let program = extract_functions(scanner.lines);
    match Transpiler::new(program).transpile_java() {
        Ok(java) => Conversion::Code(java),
        Err(diagnostics) => {
            debug!("Conversion failed with {} diagnostic(s)", diagnostics.len());
            Conversion::Report(diagnostics)
        }
    }
}


/// Converts `code` from `source` to `target` using the default registry, returning the generated
/// code or the rendered diagnostics report.
///
/// # Examples
///
/// ```
/// let java = pyjava::convert("python", "java", "print(1)");
/// assert!(java.contains("System.out.println(1);"));
///
/// assert_eq!(pyjava::convert("ruby", "go", "puts 1"), "// Unsupported conversion");
/// ```
pub fn convert(source: &str, target: &str, code: &str) -> String {
    ConverterRegistry::default().convert(source, target, code).to_string()
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;


    #[test]
    fn test_convert_function_and_entry_point() {
        let java = convert("python", "java", "def add(a, b):\n    return a + b\n\nx = 5\nprint(add(x, 3))\n");
        assert_eq!(java, "\
public class Main {
    static int add(int a, int b) {
        return a + b;
    }

    public static void main(String[] args) {
        int x = 5;
        System.out.println(add(x, 3));
    }
}
");
    }


    #[test]
    fn test_convert_conditional_chain() {
        let java = convert(
            "python",
            "java",
            "def classify(n):\n    if n > 0:\n        return \"positive\"\n    elif n < 0:\n        return \"negative\"\n    else:\n        return \"zero\"\n\nprint(classify(-4))\n"
        );
        assert_eq!(java, "\
public class Main {
    static String classify(int n) {
        if (n > 0) {
            return \"positive\";
        } else if (n < 0) {
            return \"negative\";
        } else {
            return \"zero\";
        }
    }

    public static void main(String[] args) {
        System.out.println(classify(-4));
    }
}
");
    }


    #[test]
    fn test_convert_loops() {
        let java = convert(
            "python",
            "java",
            "total = 0\nfor i in range(1, 10, 2):\n    if i == 7:\n        break\n    total += i\nwhile total > 0 and not False:\n    total -= 3\nprint(\"total:\", total)\n"
        );
        assert_eq!(java, "\
public class Main {
    public static void main(String[] args) {
        int total = 0;
        for (int i = 1; i < 10; i += 2) {
            if (i == 7) {
                break;
            }
            total += i;
        }
        while (total > 0 && ! false) {
            total -= 3;
        }
        System.out.println(\"total:\" + \" \" + total);
    }
}
");
    }


    #[test]
    fn test_convert_reports_unsupported_literals() {
        let report = convert("python", "java", "def f():\n    return 1\nx = [1, 2, 3]\ny = {\"a\": 1}\n");
        assert_eq!(
            report,
            "❌ Errors:\nLine 3: List data type is not supported\nLine 4: Dictionary data type is not supported\n"
        );
    }


    #[test]
    fn test_first_literal_kind_wins() {
        let report = convert("python", "java", "x = ([1], {2: 3})\n");
        assert_eq!(report, "❌ Errors:\nLine 1: List data type is not supported\n");
    }


    #[test]
    fn test_literal_brackets_inside_strings_are_ignored() {
        let java = convert("python", "java", "s = \"[not a list]\"\n");
        assert!(java.contains("String s = \"[not a list]\";"));
    }


    #[test]
    fn test_report_never_contains_code() {
        let report = convert("python", "java", "x = 1\nprint(x)\nreturn x\n");
        assert_eq!(report, "❌ Errors:\nLine 3: 'return' outside of a function\n");
        assert!(!report.contains("public class"));
    }


    #[test]
    fn test_unsupported_pair() {
        assert_eq!(convert("ruby", "go", "puts 'hello'"), UNSUPPORTED_CONVERSION);
        assert_eq!(convert("java", "python", ""), UNSUPPORTED_CONVERSION);
        assert_eq!(convert("", "", "print(1)"), UNSUPPORTED_CONVERSION);
    }


    #[test]
    fn test_language_tags_ignore_case() {
        let lower = convert("python", "java", "print(1)");
        assert_eq!(convert("Python", "JAVA", "print(1)"), lower);
        assert_eq!(convert(" python ", "Java", "print(1)"), lower);
    }


    #[test]
    fn test_registry() {
        let registry = ConverterRegistry::default();
        let pairs: Vec<&(String, String)> = registry.pairs().collect();
        assert_eq!(pairs, vec![&("python".to_owned(), "java".to_owned())]);
        assert!(registry.get("PYTHON", "java").is_some());

        let mut registry = ConverterRegistry::empty();
        assert_eq!(registry.convert("python", "java", "print(1)"), Conversion::Code(UNSUPPORTED_CONVERSION.to_owned()));

        registry.register("Echo", "Echo", |code| Conversion::Code(code.to_owned()));
        assert_eq!(registry.convert("echo", "echo", "unchanged"), Conversion::Code("unchanged".to_owned()));
    }


    #[test]
    fn test_conversion_outcome() {
        let registry = ConverterRegistry::default();
        assert!(registry.convert("python", "java", "x = 1\n").is_code());

        match registry.convert("python", "java", "x = (1, 2)\n") {
            Conversion::Report(diagnostics) => assert_eq!(diagnostics.len(), 1),
            Conversion::Code(code) => panic!("expected a report, got {}", code)
        }
    }


    #[test]
    fn test_comments_and_blank_lines_are_dropped() {
        let java = convert("python", "java", "# setup\n\nx = 1\n   \n# done\nprint(x)\n");
        assert_eq!(java, convert("python", "java", "x = 1\nprint(x)\n"));
    }
}
