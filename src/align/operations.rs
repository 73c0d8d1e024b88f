//! Alignment, canvas alignment and distribution operations
//!
//! Every operation follows the same shape:
//!
//! 1. Resolve the element set and check its cardinality
//! 2. Validate the remaining inputs (canvas, spacing, completion handler)
//! 3. Snapshot the geometry and derive the target coordinates
//! 4. Reposition each element in a fixed order, reading back where it landed
//! 5. Hand the change log to the reporter
//!
//! Nothing is moved until steps 1-3 succeed. Targets that would leave the
//! `i64` range fail with [`AlignError::Overflow`] during step 3. A failure while repositioning
//! stops the call; elements already moved stay where they are.

use tracing::{debug, warn};

use crate::geometry::{
    horizontal_center, max_bottom, max_right, min_left, min_top, sort_ascending, vertical_middle,
    Axis, Edge, Position, Rect, RectSet,
};

use super::accessor::{GeometryAccessor, Reposition};
use super::config::{AlignConfig, BorderMode};
use super::error::AlignError;
use super::report::{report, Completion, PositionChange};

/// Which edge or center line an alignment targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlignKind {
    Top,
    Bottom,
    Left,
    Right,
    /// Horizontal center
    Center,
    /// Vertical middle
    Middle,
}

impl AlignKind {
    /// Axis along which elements move
    pub fn axis(self) -> Axis {
        match self {
            AlignKind::Left | AlignKind::Right | AlignKind::Center => Axis::Horizontal,
            AlignKind::Top | AlignKind::Bottom | AlignKind::Middle => Axis::Vertical,
        }
    }

    /// Border edge read in [`BorderMode::Exclude`]
    pub fn border_edge(self) -> Edge {
        match self {
            AlignKind::Top | AlignKind::Middle => Edge::Top,
            AlignKind::Bottom => Edge::Bottom,
            AlignKind::Left | AlignKind::Center => Edge::Left,
            AlignKind::Right => Edge::Right,
        }
    }
}

impl std::fmt::Display for AlignKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AlignKind::Top => "top",
            AlignKind::Bottom => "bottom",
            AlignKind::Left => "left",
            AlignKind::Right => "right",
            AlignKind::Center => "center",
            AlignKind::Middle => "middle",
        };
        write!(f, "{}", name)
    }
}

/// Spacing supplied to a distribution operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing<'s> {
    Int(i64),
    /// Raw text, parsed as a leading integer (`"12px"` is 12)
    Text(&'s str),
}

impl From<i64> for Spacing<'_> {
    fn from(value: i64) -> Self {
        Spacing::Int(value)
    }
}

impl From<i32> for Spacing<'_> {
    fn from(value: i32) -> Self {
        Spacing::Int(i64::from(value))
    }
}

impl<'s> From<&'s str> for Spacing<'s> {
    fn from(value: &'s str) -> Self {
        Spacing::Text(value)
    }
}

impl Spacing<'_> {
    /// Resolve to an integer or fail with [`AlignError::InvalidSpacing`]
    pub fn resolve(self) -> Result<i64, AlignError> {
        match self {
            Spacing::Int(value) => Ok(value),
            Spacing::Text(text) => {
                parse_integer_prefix(text).ok_or_else(|| AlignError::invalid_spacing(text))
            }
        }
    }
}

/// Leading decimal integer of `text`: optional whitespace, optional sign,
/// at least one digit. Trailing characters are ignored.
fn parse_integer_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

type Records<E> = Vec<PositionChange<E>>;

/// Runs alignment operations against a [`GeometryAccessor`]
pub struct Aligner<'a, A: GeometryAccessor> {
    accessor: &'a mut A,
    config: AlignConfig,
}

impl<'a, A> Aligner<'a, A>
where
    A: GeometryAccessor,
    A::Element: PartialEq,
{
    /// Create an aligner with the default configuration
    pub fn new(accessor: &'a mut A) -> Self {
        Self::with_config(accessor, AlignConfig::default())
    }

    pub fn with_config(accessor: &'a mut A, config: AlignConfig) -> Self {
        Self { accessor, config }
    }

    pub fn config(&self) -> &AlignConfig {
        &self.config
    }

    /// Read access to the underlying accessor
    pub fn accessor(&self) -> &A {
        &*self.accessor
    }

    // ------------------------------------------------------------------
    // Self alignment
    // ------------------------------------------------------------------

    /// Move every element's top edge to the topmost top
    pub fn top(
        &mut self,
        selector: &A::Selector,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.align(AlignKind::Top, selector, completion)
    }

    /// Move every element's bottom edge to the lowest bottom
    pub fn bottom(
        &mut self,
        selector: &A::Selector,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.align(AlignKind::Bottom, selector, completion)
    }

    /// Move every element's left edge to the leftmost left
    pub fn left(
        &mut self,
        selector: &A::Selector,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.align(AlignKind::Left, selector, completion)
    }

    /// Move every element's right edge to the rightmost right
    pub fn right(
        &mut self,
        selector: &A::Selector,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.align(AlignKind::Right, selector, completion)
    }

    /// Center every element on the set's horizontal center line
    pub fn center(
        &mut self,
        selector: &A::Selector,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.align(AlignKind::Center, selector, completion)
    }

    /// Center every element on the set's vertical middle line
    pub fn middle(
        &mut self,
        selector: &A::Selector,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.align(AlignKind::Middle, selector, completion)
    }

    /// Align at least two elements to one another
    pub fn align(
        &mut self,
        kind: AlignKind,
        selector: &A::Selector,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        let members = self.resolve_members(selector, 2)?;
        completion.validate()?;

        let set = snapshot(&members, selector)?;
        let reference = match kind {
            AlignKind::Top => min_top(&set),
            AlignKind::Bottom => max_bottom(&set),
            AlignKind::Left => min_left(&set),
            AlignKind::Right => max_right(&set),
            AlignKind::Center => horizontal_center(&set),
            AlignKind::Middle => vertical_middle(&set),
        };
        debug!(%kind, reference, count = members.len(), "aligning elements");

        let mut plan = Vec::with_capacity(members.len());
        for (element, rect) in members {
            let offset = match kind {
                AlignKind::Top | AlignKind::Left => 0,
                AlignKind::Bottom => i64::from(rect.height),
                AlignKind::Right => i64::from(rect.width),
                AlignKind::Center => i64::from(rect.width / 2),
                AlignKind::Middle => i64::from(rect.height / 2),
            };
            let target = placed(reference.checked_sub(offset), &rect, kind.axis())?;
            plan.push((element, rect, target));
        }

        let mut records = Vec::with_capacity(plan.len());
        for (element, rect, target) in plan {
            records.push(self.move_to(element, &rect, Reposition::along(kind.axis(), target))?);
        }

        report(records, completion)
    }

    // ------------------------------------------------------------------
    // Canvas alignment
    // ------------------------------------------------------------------

    /// Translate the set so its top edge meets the canvas top
    pub fn canvas_top(
        &mut self,
        selector: &A::Selector,
        canvas: &A::Selector,
        border: Option<BorderMode>,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.align_to_canvas(AlignKind::Top, selector, canvas, border, completion)
    }

    /// Translate the set so its bottom edge meets the canvas bottom
    pub fn canvas_bottom(
        &mut self,
        selector: &A::Selector,
        canvas: &A::Selector,
        border: Option<BorderMode>,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.align_to_canvas(AlignKind::Bottom, selector, canvas, border, completion)
    }

    /// Translate the set so its left edge meets the canvas left
    pub fn canvas_left(
        &mut self,
        selector: &A::Selector,
        canvas: &A::Selector,
        border: Option<BorderMode>,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.align_to_canvas(AlignKind::Left, selector, canvas, border, completion)
    }

    /// Translate the set so its right edge meets the canvas right
    pub fn canvas_right(
        &mut self,
        selector: &A::Selector,
        canvas: &A::Selector,
        border: Option<BorderMode>,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.align_to_canvas(AlignKind::Right, selector, canvas, border, completion)
    }

    /// Translate the set so its center line meets the canvas center
    pub fn canvas_center(
        &mut self,
        selector: &A::Selector,
        canvas: &A::Selector,
        border: Option<BorderMode>,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.align_to_canvas(AlignKind::Center, selector, canvas, border, completion)
    }

    /// Translate the set so its middle line meets the canvas middle
    pub fn canvas_middle(
        &mut self,
        selector: &A::Selector,
        canvas: &A::Selector,
        border: Option<BorderMode>,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.align_to_canvas(AlignKind::Middle, selector, canvas, border, completion)
    }

    /// Translate one or more elements by a single distance so that the set's
    /// extreme edge or center line meets the canvas's.
    ///
    /// The canvas element is never moved, even when the selector also matches it.
    pub fn align_to_canvas(
        &mut self,
        kind: AlignKind,
        selector: &A::Selector,
        canvas: &A::Selector,
        border: Option<BorderMode>,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        let (canvas_element, frame) = self.resolve_canvas(canvas)?;
        let mut members = self.resolve_members(selector, 1)?;
        members.retain(|(element, _)| *element != canvas_element);
        if members.is_empty() {
            return Err(AlignError::cardinality(1, 0));
        }
        completion.validate()?;

        let set = snapshot(&members, selector)?;
        let (edge, current) = match kind {
            AlignKind::Top => (frame.top, min_top(&set)),
            AlignKind::Bottom => (frame.bottom(), max_bottom(&set)),
            AlignKind::Left => (frame.left, min_left(&set)),
            AlignKind::Right => (frame.right(), max_right(&set)),
            AlignKind::Center => (
                frame.left + i64::from(frame.width / 2),
                horizontal_center(&set),
            ),
            AlignKind::Middle => (
                frame.top + i64::from(frame.height / 2),
                vertical_middle(&set),
            ),
        };
        let distance = checked(edge.checked_sub(current), "canvas distance")?;
        let border = border.unwrap_or(self.config.border);
        debug!(%kind, distance, ?border, count = members.len(), "aligning to canvas");

        let axis = kind.axis();
        let mut plan = Vec::with_capacity(members.len());
        for (element, rect) in members {
            let correction = match border {
                BorderMode::Include => 0,
                BorderMode::Exclude => {
                    i64::from(self.accessor.border_thickness(&element, kind.border_edge())?)
                }
            };
            let target = rect
                .near(axis)
                .checked_add(distance)
                .and_then(|t| t.checked_sub(correction));
            plan.push((element, rect, placed(target, &rect, axis)?));
        }

        let mut records = Vec::with_capacity(plan.len());
        for (element, rect, target) in plan {
            records.push(self.move_to(element, &rect, Reposition::along(axis, target))?);
        }

        report(records, completion)
    }

    // ------------------------------------------------------------------
    // Distribution
    // ------------------------------------------------------------------

    /// Arrange elements left to right with `spacing` between neighbours
    pub fn distribute_horizontal<'s>(
        &mut self,
        selector: &A::Selector,
        spacing: impl Into<Spacing<'s>>,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.distribute(Axis::Horizontal, selector, spacing.into(), completion)
    }

    /// Arrange elements top to bottom with `spacing` between neighbours
    pub fn distribute_vertical<'s>(
        &mut self,
        selector: &A::Selector,
        spacing: impl Into<Spacing<'s>>,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        self.distribute(Axis::Vertical, selector, spacing.into(), completion)
    }

    /// Sort the set along `axis` and chain each element after its predecessor.
    ///
    /// The first element stays put. Every following element is placed at its
    /// predecessor's effective far edge plus `spacing`, so each step depends on
    /// the one before it. Records come out in sorted order.
    pub fn distribute(
        &mut self,
        axis: Axis,
        selector: &A::Selector,
        spacing: Spacing<'_>,
        completion: Completion<'_, A::Element>,
    ) -> Result<Records<A::Element>, AlignError> {
        let members = self.resolve_members(selector, 2)?;
        let spacing = spacing.resolve()?;
        completion.validate()?;

        let ordered = sort_ascending(members, axis);
        check_chain(&ordered, axis, spacing)?;
        debug!(%axis, spacing, count = ordered.len(), "distributing elements");

        let mut records = Vec::with_capacity(ordered.len());
        let mut previous: Option<Rect> = None;
        for (element, rect) in ordered {
            let record = match previous {
                None => {
                    let current = self.accessor.position(&element)?;
                    self.record(element.clone(), rect.position(), current)
                }
                Some(prev) => {
                    let target = checked(prev.far(axis).checked_add(spacing), "distribution")?;
                    self.move_to(element.clone(), &rect, Reposition::along(axis, target))?
                }
            };
            previous = Some(self.rect_of(&element)?);
            records.push(record);
        }

        report(records, completion)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn resolve_members(
        &self,
        selector: &A::Selector,
        required: usize,
    ) -> Result<Vec<(A::Element, Rect)>, AlignError> {
        let resolved = self.accessor.resolve(selector, required > 1)?;
        let mut elements: Vec<A::Element> = Vec::with_capacity(resolved.len());
        for element in resolved {
            if !elements.contains(&element) {
                elements.push(element);
            }
        }
        if elements.is_empty() {
            return Err(AlignError::not_found(format!("{:?}", selector)));
        }
        if elements.len() < required {
            return Err(AlignError::cardinality(required, elements.len()));
        }
        elements
            .into_iter()
            .map(|element| {
                let rect = self.rect_of(&element)?;
                Ok((element, rect))
            })
            .collect()
    }

    fn resolve_canvas(&self, canvas: &A::Selector) -> Result<(A::Element, Rect), AlignError> {
        let element = self
            .accessor
            .resolve(canvas, false)?
            .into_iter()
            .next()
            .ok_or_else(|| AlignError::not_found(format!("{:?}", canvas)))?;
        let rect = self.rect_of(&element)?;
        Ok((element, rect))
    }

    /// Current geometry of an element whose far edges fit in `i64`
    fn rect_of(&self, element: &A::Element) -> Result<Rect, AlignError> {
        let rect = self.accessor.rect(element)?;
        if !rect.is_representable() {
            return Err(AlignError::overflow(format!("far edge of {:?}", element)));
        }
        Ok(rect)
    }

    fn move_to(
        &mut self,
        element: A::Element,
        before: &Rect,
        update: Reposition,
    ) -> Result<PositionChange<A::Element>, AlignError> {
        self.accessor.reposition(&element, update)?;
        let after = self.accessor.position(&element)?;
        let requested = update.apply_to(before.position());
        if after != requested {
            warn!(?element, ?requested, ?after, "position constrained by environment");
        }
        Ok(self.record(element, before.position(), after))
    }

    fn record(
        &self,
        element: A::Element,
        before: Position,
        after: Position,
    ) -> PositionChange<A::Element> {
        PositionChange {
            node: self.config.include_node.then_some(element),
            prev_x: before.left,
            prev_y: before.top,
            next_x: after.left,
            next_y: after.top,
        }
    }
}

fn checked(value: Option<i64>, context: &str) -> Result<i64, AlignError> {
    value.ok_or_else(|| AlignError::overflow(context))
}

/// Target near edge, provided the element's far edge also fits once moved there
fn placed(target: Option<i64>, rect: &Rect, axis: Axis) -> Result<i64, AlignError> {
    target
        .filter(|t| t.checked_add(rect.extent(axis)).is_some())
        .ok_or_else(|| AlignError::overflow("target position"))
}

/// Walk the distribution chain on the snapshot so an out-of-range step is
/// reported before the first move
fn check_chain<E>(ordered: &[(E, Rect)], axis: Axis, spacing: i64) -> Result<(), AlignError> {
    let Some(((_, first), rest)) = ordered.split_first() else {
        return Ok(());
    };
    let mut edge = first.far(axis);
    for (_, rect) in rest {
        let near = checked(edge.checked_add(spacing), "distribution")?;
        edge = checked(near.checked_add(rect.extent(axis)), "distribution")?;
    }
    Ok(())
}

fn snapshot<E, S: std::fmt::Debug + ?Sized>(
    members: &[(E, Rect)],
    selector: &S,
) -> Result<RectSet, AlignError> {
    RectSet::new(members.iter().map(|(_, rect)| *rect).collect())
        .ok_or_else(|| AlignError::not_found(format!("{:?}", selector)))
}
