use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("var", TokenKind::Var);
        map.insert("let", TokenKind::Let);
        map.insert("const", TokenKind::Const);
        map.insert("new", TokenKind::New);
        map.insert("import", TokenKind::Import);
        map.insert("export", TokenKind::Export);
        map.insert("default", TokenKind::Default);
        map.insert("function", TokenKind::Function);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("throw", TokenKind::Throw);
        map.insert("typeof", TokenKind::Typeof);
        map.insert("instanceof", TokenKind::Instanceof);
        map.insert("in", TokenKind::In);
        map.insert("this", TokenKind::This);
        map.insert("null", TokenKind::Null);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment,      // =
    Equals,          // ==
    StrictEquals,    // ===
    Not,             // !
    NotEquals,       // !=
    StrictNotEquals, // !==

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    Pipe,
    Ampersand,

    Dot,
    Semicolon,
    Colon,
    Question,
    Comma,
    FatArrow,

    PlusEquals,
    MinusEquals,
    SlashEquals,
    StarEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Var,
    Let,
    Const,
    New,
    Import,
    Export,
    Default,
    Function,
    Return,
    If,
    Else,
    While,
    Throw,
    Typeof,
    Instanceof,
    In,
    This,
    Null,
    True,
    False,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    /// Identifiers and reserved words both qualify as property names.
    pub fn is_identifier_name(&self) -> bool {
        self.kind == TokenKind::Identifier || RESERVED_LOOKUP.contains_key(self.value.as_str())
    }
}
