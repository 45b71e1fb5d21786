//! Interaction modes and the per-interaction gesture state.

use crate::backend::FeatureKey;
use geoedit_core::{AppError, Geometry, Position, VertexRef};
use std::fmt;

/// Snap and hit tolerance in screen pixels.
pub const PIXEL_TOLERANCE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawType {
    Point,
    LineString,
    Polygon,
}

impl DrawType {
    pub const ALL: [DrawType; 3] = [DrawType::Point, DrawType::LineString, DrawType::Polygon];

    pub fn label(self) -> &'static str {
        match self {
            DrawType::Point => "Point",
            DrawType::LineString => "LineString",
            DrawType::Polygon => "Polygon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    Draw,
    Modify,
    Delete,
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            InteractionMode::Draw => "draw",
            InteractionMode::Modify => "modify",
            InteractionMode::Delete => "delete",
        };
        f.write_str(label)
    }
}

/// Mode selection as submitted by the mode form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeSelection {
    pub mode: InteractionMode,
    /// Only meaningful for [`InteractionMode::Draw`].
    pub draw_type: Option<DrawType>,
}

impl ModeSelection {
    pub fn draw(draw_type: DrawType) -> Self {
        Self {
            mode: InteractionMode::Draw,
            draw_type: Some(draw_type),
        }
    }

    pub fn modify() -> Self {
        Self {
            mode: InteractionMode::Modify,
            draw_type: None,
        }
    }

    pub fn delete() -> Self {
        Self {
            mode: InteractionMode::Delete,
            draw_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Draw,
    Modify,
    Snap,
    Select,
}

/// Completed gesture reported by an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    DrawEnd(FeatureKey),
    ModifyEnd(FeatureKey),
    Select(Option<FeatureKey>),
}

/// In-progress sketch of a new geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawInteraction {
    draw_type: DrawType,
    sketch: Vec<Position>,
}

impl DrawInteraction {
    pub fn new(draw_type: DrawType) -> Self {
        Self {
            draw_type,
            sketch: Vec::new(),
        }
    }

    pub fn sketch(&self) -> &[Position] {
        &self.sketch
    }

    pub fn abort(&mut self) {
        self.sketch.clear();
    }

    /// Handle a click at an already snapped position.
    ///
    /// Points finish immediately. Clicking the last vertex of a line, or the
    /// first vertex of a polygon, within `tolerance` finishes the sketch.
    pub fn click(&mut self, position: Position, tolerance: f64) -> Option<Geometry> {
        match self.draw_type {
            DrawType::Point => return Some(Geometry::Point(position)),
            DrawType::LineString => {
                if self.sketch.len() >= 2
                    && self
                        .sketch
                        .last()
                        .is_some_and(|last| last.distance(position) <= tolerance)
                {
                    return self.finish();
                }
            }
            DrawType::Polygon => {
                if self.sketch.len() >= 3
                    && self
                        .sketch
                        .first()
                        .is_some_and(|first| first.distance(position) <= tolerance)
                {
                    return self.finish();
                }
            }
        }
        self.sketch.push(position);
        None
    }

    /// Finish the sketch if it has enough distinct vertices.
    ///
    /// Consecutive duplicates (the two clicks of a double-click) collapse
    /// first. An unfinishable sketch is kept.
    pub fn finish(&mut self) -> Option<Geometry> {
        self.sketch.dedup();
        let geometry = match self.draw_type {
            DrawType::Point => self.sketch.first().copied().map(Geometry::Point),
            DrawType::LineString if self.sketch.len() >= 2 => {
                Some(Geometry::LineString(self.sketch.clone()))
            }
            DrawType::Polygon if self.sketch.len() >= 3 => {
                Some(Geometry::polygon_from_ring(self.sketch.clone()))
            }
            _ => None,
        };
        if geometry.is_some() {
            self.sketch.clear();
        }
        geometry
    }
}

/// Vertex currently dragged by the modify interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexDrag {
    pub key: FeatureKey,
    pub vertex: VertexRef,
    /// Set once the geometry actually changed.
    pub modified: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifyInteraction {
    drag: Option<VertexDrag>,
}

impl ModifyInteraction {
    pub fn drag(&self) -> Option<VertexDrag> {
        self.drag
    }

    pub fn start_drag(&mut self, key: FeatureKey, vertex: VertexRef, modified: bool) {
        self.drag = Some(VertexDrag {
            key,
            vertex,
            modified,
        });
    }

    pub fn mark_modified(&mut self) {
        if let Some(drag) = self.drag.as_mut() {
            drag.modified = true;
        }
    }

    pub fn end_drag(&mut self) -> Option<VertexDrag> {
        self.drag.take()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapInteraction {
    pub pixel_tolerance: f64,
}

impl Default for SnapInteraction {
    fn default() -> Self {
        Self {
            pixel_tolerance: PIXEL_TOLERANCE,
        }
    }
}

/// Click-based single feature selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectInteraction {
    pub pixel_tolerance: f64,
}

impl Default for SelectInteraction {
    fn default() -> Self {
        Self {
            pixel_tolerance: PIXEL_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Draw(DrawInteraction),
    Modify(ModifyInteraction),
    Snap(SnapInteraction),
    Select(SelectInteraction),
}

impl Interaction {
    pub fn kind(&self) -> InteractionKind {
        match self {
            Interaction::Draw(_) => InteractionKind::Draw,
            Interaction::Modify(_) => InteractionKind::Modify,
            Interaction::Snap(_) => InteractionKind::Snap,
            Interaction::Select(_) => InteractionKind::Select,
        }
    }
}

/// Interactions installed on the map, at most one of each kind.
///
/// Snap is kept last so it sees pointer events after the editing
/// interactions registered before it.
#[derive(Debug, Default)]
pub struct InteractionSet {
    items: Vec<Interaction>,
}

impl InteractionSet {
    /// Install `interaction`; rejected when one of the same kind is present.
    pub fn add(&mut self, interaction: Interaction) -> Result<(), AppError> {
        let kind = interaction.kind();
        if self.contains(kind) {
            return Err(AppError::precondition(format!(
                "{:?} interaction is already installed",
                kind
            )));
        }
        self.items.push(interaction);
        Ok(())
    }

    /// Remove every interaction, returning the kinds that were installed.
    pub fn remove_all(&mut self) -> Vec<InteractionKind> {
        self.items.drain(..).map(|i| i.kind()).collect()
    }

    pub fn kinds(&self) -> Vec<InteractionKind> {
        self.items.iter().map(Interaction::kind).collect()
    }

    pub fn contains(&self, kind: InteractionKind) -> bool {
        self.items.iter().any(|i| i.kind() == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn draw(&self) -> Option<&DrawInteraction> {
        self.items.iter().find_map(|i| match i {
            Interaction::Draw(draw) => Some(draw),
            _ => None,
        })
    }

    pub fn draw_mut(&mut self) -> Option<&mut DrawInteraction> {
        self.items.iter_mut().find_map(|i| match i {
            Interaction::Draw(draw) => Some(draw),
            _ => None,
        })
    }

    pub fn modify(&self) -> Option<&ModifyInteraction> {
        self.items.iter().find_map(|i| match i {
            Interaction::Modify(modify) => Some(modify),
            _ => None,
        })
    }

    pub fn modify_mut(&mut self) -> Option<&mut ModifyInteraction> {
        self.items.iter_mut().find_map(|i| match i {
            Interaction::Modify(modify) => Some(modify),
            _ => None,
        })
    }

    pub fn snap(&self) -> Option<SnapInteraction> {
        self.items.iter().find_map(|i| match i {
            Interaction::Snap(snap) => Some(*snap),
            _ => None,
        })
    }

    pub fn select(&self) -> Option<SelectInteraction> {
        self.items.iter().find_map(|i| match i {
            Interaction::Select(select) => Some(*select),
            _ => None,
        })
    }
}
