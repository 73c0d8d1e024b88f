//! In-memory scene of named rectangles
//!
//! A [`Scene`] is the reference [`GeometryAccessor`]: a flat list of elements
//! with ids, tags and classes, loaded from and saved to TOML. An optional
//! bounding frame clamps every move, the way a host layout might.
//!
//! ```toml
//! [options]
//! border = "exclude"
//!
//! [bounds]
//! top = 0
//! left = 0
//! width = 800
//! height = 600
//!
//! [[element]]
//! id = "title"
//! classes = ["card"]
//! top = 10
//! left = 20
//! width = 120
//! height = 40
//! border = { top = 1, left = 2 }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::align::{AlignConfig, AlignError, GeometryAccessor, Reposition};
use crate::geometry::{Edge, Position, Size};

/// Errors that can occur when loading or saving scenes
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to read scene file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse scene TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize scene TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Border widths on each edge of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Borders {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Borders {
    pub fn on(&self, edge: Edge) -> u32 {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// A positioned, sized element of a scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneElement {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    pub top: i64,
    pub left: i64,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Borders::is_zero")]
    pub border: Borders,
}

impl SceneElement {
    pub fn new(id: impl Into<String>, top: i64, left: i64, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            tag: None,
            classes: Vec::new(),
            top,
            left,
            width,
            height,
            border: Borders::default(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_border(mut self, border: Borders) -> Self {
        self.border = border;
        self
    }

    pub fn position(&self) -> Position {
        Position::new(self.top, self.left)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.id == *id,
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
            Selector::Tag(tag) => self.tag.as_deref() == Some(tag.as_str()),
            Selector::Handles(_) | Selector::Any(_) => false,
        }
    }
}

/// Frame that every element is kept inside when set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: i64,
    pub left: i64,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// Keep a box of `size` inside the frame, favouring the top-left edges
    /// when it does not fit
    pub fn clamp(&self, position: Position, size: Size) -> Position {
        let max_top = self
            .top
            .saturating_add(i64::from(self.height))
            .saturating_sub(i64::from(size.height));
        let max_left = self
            .left
            .saturating_add(i64::from(self.width))
            .saturating_sub(i64::from(size.width));
        Position {
            top: position.top.min(max_top).max(self.top),
            left: position.left.min(max_left).max(self.left),
        }
    }
}

/// Handle to an element of a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Ways of naming elements in a scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `#id`: the first element with this id
    Id(String),
    /// `.class`: every element carrying the class
    Class(String),
    /// `tag`: every element with this tag
    Tag(String),
    /// Explicit handles, in the given order; repeats are dropped
    Handles(Vec<ElementId>),
    /// Union of several selectors, in scene order
    Any(Vec<Selector>),
}

impl Selector {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self::Class(class.into())
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag(tag.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{}", id),
            Selector::Class(class) => write!(f, ".{}", class),
            Selector::Tag(tag) => write!(f, "{}", tag),
            Selector::Handles(handles) => {
                let names: Vec<String> = handles.iter().map(|h| h.to_string()).collect();
                write!(f, "{}", names.join(", "))
            }
            Selector::Any(selectors) => {
                let names: Vec<String> = selectors.iter().map(|s| s.to_string()).collect();
                write!(f, "{}", names.join(", "))
            }
        }
    }
}

/// A set of elements plus the options used to align them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub options: AlignConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(default, rename = "element")]
    pub elements: Vec<SceneElement>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    /// Write the scene back as TOML
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, SceneError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_options(mut self, options: AlignConfig) -> Self {
        self.options = options;
        self
    }

    /// Append an element and return its handle
    pub fn push(&mut self, element: SceneElement) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn element(&self, handle: ElementId) -> Option<&SceneElement> {
        self.elements.get(handle.0)
    }

    /// First element with the given id
    pub fn get(&self, id: &str) -> Option<&SceneElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Id of the element behind a handle
    pub fn id_of(&self, handle: ElementId) -> Option<&str> {
        self.element(handle).map(|e| e.id.as_str())
    }

    fn live(&self, handle: ElementId) -> Result<&SceneElement, AlignError> {
        self.elements
            .get(handle.0)
            .ok_or_else(|| AlignError::stale(handle))
    }

    /// Elements matching the selector; unions come back in scene order
    pub fn select(&self, selector: &Selector) -> Result<Vec<ElementId>, AlignError> {
        match selector {
            Selector::Handles(handles) => {
                let mut found = Vec::with_capacity(handles.len());
                for handle in handles {
                    self.live(*handle)?;
                    if !found.contains(handle) {
                        found.push(*handle);
                    }
                }
                Ok(found)
            }
            Selector::Id(_) => Ok(self
                .elements
                .iter()
                .position(|e| e.matches(selector))
                .map(ElementId)
                .into_iter()
                .collect()),
            Selector::Class(_) | Selector::Tag(_) => Ok(self
                .elements
                .iter()
                .enumerate()
                .filter(|(_, e)| e.matches(selector))
                .map(|(i, _)| ElementId(i))
                .collect()),
            Selector::Any(selectors) => {
                let mut selected = vec![false; self.elements.len()];
                for part in selectors {
                    for handle in self.select(part)? {
                        selected[handle.0] = true;
                    }
                }
                Ok(selected
                    .into_iter()
                    .enumerate()
                    .filter(|(_, hit)| *hit)
                    .map(|(i, _)| ElementId(i))
                    .collect())
            }
        }
    }
}

impl FromStr for Scene {
    type Err = SceneError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

impl GeometryAccessor for Scene {
    type Element = ElementId;
    type Selector = Selector;

    fn resolve(
        &self,
        selector: &Selector,
        require_multiple: bool,
    ) -> Result<Vec<ElementId>, AlignError> {
        let found = self.select(selector)?;
        if found.is_empty() {
            return Err(AlignError::not_found(selector.to_string()));
        }
        if require_multiple && found.len() < 2 {
            return Err(AlignError::cardinality(2, found.len()));
        }
        Ok(found)
    }

    fn position(&self, element: &ElementId) -> Result<Position, AlignError> {
        Ok(self.live(*element)?.position())
    }

    fn size(&self, element: &ElementId) -> Result<Size, AlignError> {
        Ok(self.live(*element)?.size())
    }

    fn border_thickness(&self, element: &ElementId, edge: Edge) -> Result<u32, AlignError> {
        Ok(self.live(*element)?.border.on(edge))
    }

    fn reposition(&mut self, element: &ElementId, target: Reposition) -> Result<(), AlignError> {
        let bounds = self.bounds;
        let entry = self
            .elements
            .get_mut(element.0)
            .ok_or_else(|| AlignError::stale(*element))?;
        let mut next = target.apply_to(entry.position());
        if let Some(bounds) = bounds {
            next = bounds.clamp(next, entry.size());
        }
        entry.top = next.top;
        entry.left = next.left;
        Ok(())
    }
}
