//! Abstract Syntax Tree types for alignment scripts

use std::fmt;

use crate::align::{AlignKind, BorderMode};
use crate::geometry::Axis;
use crate::scene::Selector;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Valid identifier (alphanumeric, underscore or dash, starts with letter/_)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root AST node - a complete script
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    pub commands: Vec<Spanned<Command>>,
}

/// One alignment command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `align top .card [then log]`
    Align {
        kind: Spanned<AlignKind>,
        targets: Spanned<SelectorList>,
        then: Option<Spanned<HandlerRef>>,
    },
    /// `canvas center #logo to #page [border: exclude] [then log]`
    Canvas {
        kind: Spanned<AlignKind>,
        targets: Spanned<SelectorList>,
        canvas: Spanned<SelectorList>,
        border: Option<BorderMode>,
        then: Option<Spanned<HandlerRef>>,
    },
    /// `distribute horizontal .item gap 8 [then log]`
    Distribute {
        axis: Spanned<Axis>,
        targets: Spanned<SelectorList>,
        gap: Spanned<String>,
        then: Option<Spanned<HandlerRef>>,
    },
}

impl Command {
    /// Completion handler reference, if any
    pub fn handler(&self) -> Option<&Spanned<HandlerRef>> {
        match self {
            Command::Align { then, .. }
            | Command::Canvas { then, .. }
            | Command::Distribute { then, .. } => then.as_ref(),
        }
    }

    pub fn targets(&self) -> &Spanned<SelectorList> {
        match self {
            Command::Align { targets, .. }
            | Command::Canvas { targets, .. }
            | Command::Distribute { targets, .. } => targets,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Align { kind, targets, .. } => {
                write!(f, "align {} {}", kind.node, targets.node)?;
            }
            Command::Canvas {
                kind,
                targets,
                canvas,
                border,
                ..
            } => {
                write!(f, "canvas {} {} to {}", kind.node, targets.node, canvas.node)?;
                match border {
                    Some(BorderMode::Include) => write!(f, " border: include")?,
                    Some(BorderMode::Exclude) => write!(f, " border: exclude")?,
                    None => {}
                }
            }
            Command::Distribute {
                axis, targets, gap, ..
            } => {
                write!(f, "distribute {} {} gap {}", axis.node, targets.node, gap.node)?;
            }
        }
        if let Some(handler) = self.handler() {
            write!(f, " then {}", handler.node)?;
        }
        Ok(())
    }
}

/// A single selector as written in the script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorExpr {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// bare `tag`
    Tag(String),
}

impl SelectorExpr {
    pub fn to_selector(&self) -> Selector {
        match self {
            SelectorExpr::Id(id) => Selector::Id(id.clone()),
            SelectorExpr::Class(class) => Selector::Class(class.clone()),
            SelectorExpr::Tag(tag) => Selector::Tag(tag.clone()),
        }
    }
}

/// Comma-separated selectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<Spanned<SelectorExpr>>);

impl SelectorList {
    /// Scene selector for the whole list; several entries become a union
    pub fn to_selector(&self) -> Selector {
        match self.0.as_slice() {
            [single] => single.node.to_selector(),
            many => Selector::Any(many.iter().map(|s| s.node.to_selector()).collect()),
        }
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_selector())
    }
}

/// What follows `then`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerRef {
    /// Name looked up in the handler registry
    Named(Identifier),
    /// Quoted string, which cannot be called
    String(String),
    /// Number, which cannot be called
    Number(String),
}

impl HandlerRef {
    /// Human-readable description used in error messages
    pub fn describe(&self) -> String {
        match self {
            HandlerRef::Named(name) => format!("identifier '{}'", name),
            HandlerRef::String(s) => format!("string \"{}\"", s),
            HandlerRef::Number(n) => format!("number {}", n),
        }
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerRef::Named(name) => write!(f, "{}", name),
            HandlerRef::String(s) => write!(f, "\"{}\"", s),
            HandlerRef::Number(n) => write!(f, "{}", n),
        }
    }
}
