//! rect-align - alignment and distribution for axis-aligned rectangles
//!
//! This library provides geometry calculators, an alignment engine that works
//! through a pluggable [`GeometryAccessor`], an in-memory [`Scene`] and a small
//! script language for driving it.
//!
//! # Example
//!
//! ```rust
//! use rect_align::{run, Scene, SceneElement};
//!
//! let mut scene = Scene::new();
//! scene.push(SceneElement::new("a", 10, 0, 20, 20));
//! scene.push(SceneElement::new("b", 40, 50, 20, 20));
//!
//! let reports = run(&mut scene, "align top #a, #b").unwrap();
//! assert_eq!(reports[0].records.len(), 2);
//! assert_eq!(scene.get("b").unwrap().top, 10);
//! ```

pub mod align;
pub mod error;
pub mod geometry;
pub mod parser;
pub mod scene;
pub mod script;

pub use align::{
    AlignConfig, AlignError, AlignKind, Aligner, BorderMode, Completion, GeometryAccessor,
    PositionChange, Reposition, Spacing,
};
pub use error::ParseError;
pub use geometry::{Axis, Edge, Position, Rect, RectSet, Size};
pub use parser::{parse, Script};
pub use scene::{Borders, Bounds, ElementId, Scene, SceneElement, SceneError, Selector};
pub use script::{CommandError, CommandReport, Executor, HandlerRegistry};

use thiserror::Error;

/// Errors that can occur while running a script
#[derive(Debug, Error)]
pub enum RunError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// A command failed; earlier commands stay applied
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl From<Vec<ParseError>> for RunError {
    fn from(errors: Vec<ParseError>) -> Self {
        RunError::Parse(errors)
    }
}

impl RunError {
    /// Render every diagnostic against the script source
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            RunError::Parse(errors) => errors
                .iter()
                .map(|e| e.format(source, filename))
                .collect::<Vec<_>>()
                .join("\n"),
            RunError::Command(err) => err.format(source, filename),
        }
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Overrides applied on top of a scene's `[options]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Attach element ids to records
    pub include_node: Option<bool>,
    /// Default border mode for canvas commands
    pub border: Option<BorderMode>,
}

impl RunConfig {
    /// Create a new configuration that keeps the scene's options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include_node(mut self, include: bool) -> Self {
        self.include_node = Some(include);
        self
    }

    pub fn with_border(mut self, border: BorderMode) -> Self {
        self.border = Some(border);
        self
    }

    /// Merge the overrides into a base configuration
    pub fn apply(&self, base: AlignConfig) -> AlignConfig {
        AlignConfig {
            include_node: self.include_node.unwrap_or(base.include_node),
            border: self.border.unwrap_or(base.border),
        }
    }
}

/// Run a script against a scene with the scene's own options and no handlers
pub fn run(scene: &mut Scene, source: &str) -> Result<Vec<CommandReport>, RunError> {
    let mut registry = HandlerRegistry::new();
    run_with_config(scene, source, RunConfig::default(), &mut registry)
}

/// Run a script with option overrides and a handler registry
///
/// # Example
///
/// ```rust
/// use rect_align::{run_with_config, BorderMode, HandlerRegistry, RunConfig, Scene};
///
/// let mut scene: Scene = r#"
/// [[element]]
/// id = "logo"
/// top = 5
/// left = 5
/// width = 10
/// height = 10
/// border = { left = 2 }
///
/// [[element]]
/// id = "page"
/// top = 0
/// left = 0
/// width = 100
/// height = 100
/// "#.parse().unwrap();
///
/// let config = RunConfig::new().with_border(BorderMode::Exclude);
/// let mut registry = HandlerRegistry::new();
/// run_with_config(&mut scene, "canvas left #logo to #page", config, &mut registry).unwrap();
/// assert_eq!(scene.get("logo").unwrap().left, -2);
/// ```
pub fn run_with_config(
    scene: &mut Scene,
    source: &str,
    config: RunConfig,
    registry: &mut HandlerRegistry,
) -> Result<Vec<CommandReport>, RunError> {
    let script = parse(source)?;
    let align = config.apply(scene.options);
    let reports = Executor::new(registry)
        .with_config(align)
        .run(scene, &script)?;
    Ok(reports)
}
