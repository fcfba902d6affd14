use std::fmt;

use indexmap::IndexSet;


/// The Java types which values in a translated program may be given.
///
/// The declaration order is the precedence used when unifying the types of several return
/// statements into one return type: a later variant outranks every earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JavaType {
    Void,
    Int,
    Boolean,
    Double,
    Str
}


impl JavaType {
    pub fn as_java_str(&self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Int => "int",
            Self::Boolean => "boolean",
            Self::Double => "double",
            Self::Str => "String"
        }
    }
}


impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_java_str())
    }
}


/// The distinct types of every return expression found in one function body.
pub type ReturnTypeSet = IndexSet<JavaType>;


/// Picks the declared return type of a function from the types its return statements produce.
///
/// `String` outranks `double`, which outranks `boolean`, which outranks `int`. This is not a
/// search for a common supertype: a function returning a `String` on one path and a `boolean` on
/// another is simply declared as returning `String`. A function without any return value is
/// `void`.
pub fn resolve_return_type(return_types: &ReturnTypeSet) -> JavaType {
    return_types.iter()
        .copied()
        .max()
        .unwrap_or(JavaType::Void)
}
