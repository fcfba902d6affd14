//! Rewrites Python expressions into Java expressions.
//!
//! Expressions are not parsed into a tree. Python's arithmetic and comparison operators are already
//! valid Java, so only the logical keywords and boolean literals need substituting, which is done
//! by a single left-to-right scan that leaves the inside of double-quoted string literals alone.
use super::errors::ParsingError;


/// Python keywords and the Java text which replaces them.
const KEYWORD_SUBSTITUTIONS: [(&str, &str); 5] = [
    ("and", "&&"),
    ("or", "||"),
    ("not", "!"),
    ("True", "true"),
    ("False", "false"),
];


pub fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}


/// Whether `text` is a single Python identifier, e.g. a variable or function name.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(is_identifier_char),
        _ => false
    }
}


/// Translates a Python expression to Java.
///
/// The keywords in [`KEYWORD_SUBSTITUTIONS`] are replaced only when they stand alone, i.e. when
/// the characters either side of them are not part of an identifier, so `order` and `nothing`
/// pass through untouched. Everything between a pair of double quotes is copied verbatim.
///
/// # Errors
///
/// Returns [`ParsingError::UnterminatedString`] if a string literal is still open at the end of
/// the expression.
///
/// # Examples
///
/// ```
/// # use pyjava::parser::expressions::*;
/// let java = translate_expression("a and not b or x == True").unwrap();
/// assert_eq!(java, "a && ! b || x == true");
/// ```
pub fn translate_expression(expr: &str) -> Result<String, ParsingError> {
    let chars: Vec<char> = expr.chars().collect();
    let mut translated = String::with_capacity(expr.len());
    let mut in_string = false;
    let mut i = 0;

    'scan: while i < chars.len() {
        let c = chars[i];

        if in_string && c == '\\' {
            translated.push(c);
            if let Some(&escaped) = chars.get(i + 1) {
                translated.push(escaped);
            }
            i += 2;
            continue;
        }

        if c == '"' {
            in_string = !in_string;
            translated.push(c);
            i += 1;
            continue;
        }

        let at_word_start = i == 0 || !is_identifier_char(chars[i - 1]);
        if !in_string && at_word_start {
            for (keyword, replacement) in KEYWORD_SUBSTITUTIONS {
                if keyword_at(&chars, i, keyword) {
                    translated.push_str(replacement);
                    i += keyword.len();
                    continue 'scan;
                }
            }
        }

        translated.push(c);
        i += 1;
    }

    if in_string {
        return Err(ParsingError::UnterminatedString(expr.to_owned()));
    }

    Ok(translated)
}


/// Checks for `keyword` starting at `chars[start]` and ending at an identifier boundary.
fn keyword_at(chars: &[char], start: usize, keyword: &str) -> bool {
    let end = start + keyword.len();
    if end > chars.len() || !keyword.chars().eq(chars[start..end].iter().copied()) {
        return false;
    }

    chars.get(end).map_or(true, |&next| !is_identifier_char(next))
}


/// Replaces the contents of every double-quoted string literal with spaces, leaving the quotes
/// themselves and the length of the text intact. Used to look for delimiters and operators
/// without being fooled by string contents.
pub fn mask_strings(text: &str) -> String {
    let mut masked = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_string && escaped {
            escaped = false;
            masked.push(' ');
        } else if in_string && c == '\\' {
            escaped = true;
            masked.push(' ');
        } else if c == '"' {
            in_string = !in_string;
            masked.push(c);
        } else if in_string {
            masked.push(' ');
        } else {
            masked.push(c);
        }
    }

    masked
}


/// Splits an argument list on the commas which are not nested inside brackets or string literals.
///
/// Each argument is trimmed. An argument list containing only whitespace has no arguments.
///
/// # Examples
///
/// ```
/// # use pyjava::parser::expressions::*;
/// assert_eq!(split_arguments("a, f(b, c), \"d, e\""), vec!["a", "f(b, c)", "\"d, e\""]);
/// ```
pub fn split_arguments(args: &str) -> Vec<String> {
    if args.trim().is_empty() {
        return vec![];
    }

    let masked: Vec<char> = mask_strings(args).chars().collect();
    let original: Vec<char> = args.chars().collect();
    let mut arguments: Vec<String> = vec![];
    let mut depth: usize = 0;
    let mut start = 0;

    for (i, c) in masked.iter().enumerate() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                arguments.push(original[start..i].iter().collect::<String>().trim().to_owned());
                start = i + 1;
            }
            _ => ()
        }
    }

    arguments.push(original[start..].iter().collect::<String>().trim().to_owned());
    arguments
}
