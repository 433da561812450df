//! Type annotation definitions for the AST.
//!
//! Annotations are a closed set of shapes, so they are modelled as one enum
//! rather than as trait objects like statements and expressions. Passes
//! match on it exhaustively; adding a shape is a compile error everywhere
//! that has to handle it.

use std::fmt::Display;

/// A dotted type reference such as `Module.Sub.Type`.
///
/// Always holds at least one segment; the last segment is the type itself
/// and the preceding ones are the scopes it is nested in.
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    pub fn new(name: impl Into<String>) -> Self {
        QualifiedName {
            segments: vec![name.into()],
        }
    }

    /// Appends a member to the chain, `A` becomes `A.member`.
    pub fn qualify(mut self, member: impl Into<String>) -> Self {
        self.segments.push(member.into());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The outermost scope, i.e. the binding the reference starts from.
    pub fn root(&self) -> &str {
        &self.segments[0]
    }

    /// True for an unqualified reference with the given name.
    pub fn is_simple(&self, name: &str) -> bool {
        self.segments.len() == 1 && self.segments[0] == name
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Built-in keyword types. They parse, but have no runtime counterpart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Keyword {
    String,
    Number,
    Boolean,
    Any,
    Mixed,
    Void,
    Null,
}

impl Keyword {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Keyword::String),
            "number" => Some(Keyword::Number),
            "boolean" => Some(Keyword::Boolean),
            "any" => Some(Keyword::Any),
            "mixed" => Some(Keyword::Mixed),
            "void" => Some(Keyword::Void),
            "null" => Some(Keyword::Null),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Keyword::String => "string",
            Keyword::Number => "number",
            Keyword::Boolean => "boolean",
            Keyword::Any => "any",
            Keyword::Mixed => "mixed",
            Keyword::Void => "void",
            Keyword::Null => "null",
        }
    }
}

/// `[key: K]: V` entry of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct Indexer {
    pub name: Option<String>,
    pub key: TypeAnnotation,
    pub value: TypeAnnotation,
}

/// `name?: T` entry of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub name: String,
    pub optional: bool,
    pub value: TypeAnnotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectAnnotation {
    pub properties: Vec<ObjectProperty>,
    pub indexers: Vec<Indexer>,
    /// `{| ... |}`
    pub exact: bool,
}

/// Parameter of a function type; the name is optional and carries no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionAnnotationParam {
    pub name: Option<String>,
    pub annotation: TypeAnnotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionAnnotation {
    pub parameters: Vec<FunctionAnnotationParam>,
    pub return_type: Box<TypeAnnotation>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    /// `Name`, `A.B`, `Name<Args>`
    Named {
        name: QualifiedName,
        type_arguments: Option<Vec<TypeAnnotation>>,
    },
    /// `T[]`
    Array(Box<TypeAnnotation>),
    /// `?T`
    Nullable(Box<TypeAnnotation>),
    /// `[A, B]`
    Tuple(Vec<TypeAnnotation>),
    /// `A | B`
    Union(Vec<TypeAnnotation>),
    /// `{ [k: K]: V }` and other object types
    Object(ObjectAnnotation),
    /// `A & B`
    Intersection(Vec<TypeAnnotation>),
    /// `(a: A, B) => R`
    Function(FunctionAnnotation),
    Keyword(Keyword),
    StringLiteral(String),
    NumberLiteral(String),
    BooleanLiteral(bool),
}

impl TypeAnnotation {
    pub fn named(name: impl Into<String>) -> Self {
        TypeAnnotation::Named {
            name: QualifiedName::new(name),
            type_arguments: None,
        }
    }

    /// Short name of the annotation shape, used in diagnostics.
    pub fn kind(&self) -> String {
        match self {
            TypeAnnotation::Named { .. } => String::from("named"),
            TypeAnnotation::Array(_) => String::from("array"),
            TypeAnnotation::Nullable(_) => String::from("nullable"),
            TypeAnnotation::Tuple(_) => String::from("tuple"),
            TypeAnnotation::Union(_) => String::from("union"),
            TypeAnnotation::Object(_) => String::from("object"),
            TypeAnnotation::Intersection(_) => String::from("intersection"),
            TypeAnnotation::Function(_) => String::from("function"),
            TypeAnnotation::Keyword(keyword) => keyword.name().to_string(),
            TypeAnnotation::StringLiteral(_) => String::from("string literal"),
            TypeAnnotation::NumberLiteral(_) => String::from("number literal"),
            TypeAnnotation::BooleanLiteral(_) => String::from("boolean literal"),
        }
    }

    /// Calls `f` with the root binding of every named reference inside the
    /// annotation, e.g. `t` for `t.String`.
    pub fn for_each_root_name(&self, f: &mut dyn FnMut(&str)) {
        match self {
            TypeAnnotation::Named {
                name,
                type_arguments,
            } => {
                f(name.root());
                for argument in type_arguments.iter().flatten() {
                    argument.for_each_root_name(f);
                }
            }
            TypeAnnotation::Array(inner) | TypeAnnotation::Nullable(inner) => {
                inner.for_each_root_name(f)
            }
            TypeAnnotation::Tuple(types)
            | TypeAnnotation::Union(types)
            | TypeAnnotation::Intersection(types) => {
                for ty in types {
                    ty.for_each_root_name(f);
                }
            }
            TypeAnnotation::Object(object) => {
                for property in &object.properties {
                    property.value.for_each_root_name(f);
                }
                for indexer in &object.indexers {
                    indexer.key.for_each_root_name(f);
                    indexer.value.for_each_root_name(f);
                }
            }
            TypeAnnotation::Function(function) => {
                for parameter in &function.parameters {
                    parameter.annotation.for_each_root_name(f);
                }
                function.return_type.for_each_root_name(f);
            }
            TypeAnnotation::Keyword(_)
            | TypeAnnotation::StringLiteral(_)
            | TypeAnnotation::NumberLiteral(_)
            | TypeAnnotation::BooleanLiteral(_) => {}
        }
    }
}
