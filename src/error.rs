//! Error types for parsing scripts

use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::error::{Rich, RichPattern, RichReason};
use thiserror::Error;

use crate::parser::lexer::Token;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let ParseError::Syntax {
            span,
            message,
            expected,
        } = self;

        let expected_str = if expected.is_empty() {
            String::new()
        } else {
            format!("\nExpected: {}", expected.join(", "))
        };

        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = Report::build(ReportKind::Error, filename, span.start)
            .with_message(message)
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(format!("{}{}", message, expected_str))
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl<'a> From<Rich<'a, Token>> for ParseError {
    fn from(err: Rich<'a, Token>) -> Self {
        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => match found.as_deref() {
                Some(tok) => match keyword_name(tok) {
                    Some(keyword) => format!(
                        "Unexpected keyword '{}' - not usable as a tag or handler name",
                        keyword
                    ),
                    None => format!("Unexpected {}", format_token(tok)),
                },
                None => "Unexpected end of input".to_string(),
            },
            RichReason::Custom(msg) => msg.to_string(),
        };

        let mut expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                RichPattern::Token(tok) => Some(format_token(tok)),
                RichPattern::Label(label) => Some(label.to_string()),
                RichPattern::EndOfInput => Some("end of input".to_string()),
                RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                RichPattern::Any => Some("any token".to_string()),
                RichPattern::SomethingElse => None,
            })
            .collect();
        expected.sort();
        expected.dedup();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

fn keyword_name(tok: &Token) -> Option<&'static str> {
    let name = match tok {
        Token::Align => "align",
        Token::Canvas => "canvas",
        Token::Distribute => "distribute",
        Token::To => "to",
        Token::Gap => "gap",
        Token::Then => "then",
        Token::Border => "border",
        Token::Top => "top",
        Token::Bottom => "bottom",
        Token::Left => "left",
        Token::Right => "right",
        Token::Center => "center",
        Token::Middle => "middle",
        Token::Horizontal => "horizontal",
        Token::Vertical => "vertical",
        Token::Include => "include",
        Token::Exclude => "exclude",
        _ => return None,
    };
    Some(name)
}

/// Format a token for human-readable error messages
fn format_token(tok: &Token) -> String {
    if let Some(keyword) = keyword_name(tok) {
        return format!("keyword '{}'", keyword);
    }
    match tok {
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::String(s) => format!("string \"{}\"", s),
        Token::Number(n) => format!("number {}", n),
        Token::IdSelector(s) => format!("selector '#{}'", s),
        Token::ClassSelector(s) => format!("selector '.{}'", s),
        Token::Comma => "','".to_string(),
        Token::Colon => "':'".to_string(),
        Token::Semicolon => "';'".to_string(),
        _ => format!("{:?}", tok),
    }
}
