//! Lexer for alignment scripts using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Command keywords
    #[token("align")]
    Align,
    #[token("canvas")]
    Canvas,
    #[token("distribute")]
    Distribute,

    // Clause keywords
    #[token("to")]
    To,
    #[token("gap")]
    Gap,
    #[token("then")]
    Then,
    #[token("border")]
    Border,

    // Edge and center keywords
    #[token("top")]
    Top,
    #[token("bottom")]
    Bottom,
    #[token("left")]
    Left,
    #[token("right")]
    Right,
    #[token("center")]
    Center,
    #[token("middle")]
    Middle,

    // Axis keywords (`vertical` doubles as an alias of `middle`)
    #[token("horizontal")]
    Horizontal,
    #[token("vertical")]
    Vertical,

    // Border modes
    #[token("include")]
    Include,
    #[token("exclude")]
    Exclude,

    // Delimiters
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,

    // Selectors
    #[regex(r"#[a-zA-Z_][a-zA-Z0-9_-]*", |lex| lex.slice()[1..].to_string())]
    IdSelector(String),

    #[regex(r"\.[a-zA-Z_][a-zA-Z0-9_-]*", |lex| lex.slice()[1..].to_string())]
    ClassSelector(String),

    // Literals - identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    String(String),

    /// Kept as written, unit suffix included (`12`, `-4`, `8px`)
    #[regex(r"-?[0-9]+(\.[0-9]+)?[a-zA-Z%]*", |lex| lex.slice().to_string())]
    Number(String),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    BlockComment,
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}
