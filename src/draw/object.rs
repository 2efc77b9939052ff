use egui::{Color32, Pos2};

/// Half-extent of the eraser's square hit box around each recorded point.
pub const ERASER_HIT_RADIUS: f32 = 8.0;

/// Half-extents of the generous hit box around a text anchor.
pub const TEXT_HIT_HALF_WIDTH: f32 = 50.0;
pub const TEXT_HIT_HALF_HEIGHT: f32 = 20.0;

/// Length of an arrow head flank.
pub const ARROW_HEAD_LENGTH: f32 = 16.0;

/// One committed drawing primitive on a draw layer. Points are
/// canvas-local. Shape variants are committed on pointer-up; a pen object
/// grows point by point during its gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawObject {
    Pen {
        points: Vec<Pos2>,
        color: Color32,
        width: f32,
    },
    Line {
        from: Pos2,
        to: Pos2,
        color: Color32,
        width: f32,
    },
    Rectangle {
        from: Pos2,
        to: Pos2,
        color: Color32,
        width: f32,
    },
    Ellipse {
        from: Pos2,
        to: Pos2,
        color: Color32,
        width: f32,
    },
    Arrow {
        from: Pos2,
        to: Pos2,
        color: Color32,
        width: f32,
    },
    Text {
        anchor: Pos2,
        color: Color32,
        width: f32,
        text: String,
    },
}

impl DrawObject {
    pub fn color(&self) -> Color32 {
        match self {
            Self::Pen { color, .. }
            | Self::Line { color, .. }
            | Self::Rectangle { color, .. }
            | Self::Ellipse { color, .. }
            | Self::Arrow { color, .. }
            | Self::Text { color, .. } => *color,
        }
    }

    pub fn width(&self) -> f32 {
        match self {
            Self::Pen { width, .. }
            | Self::Line { width, .. }
            | Self::Rectangle { width, .. }
            | Self::Ellipse { width, .. }
            | Self::Arrow { width, .. }
            | Self::Text { width, .. } => *width,
        }
    }

    /// The constituent points the eraser tests against.
    pub fn points(&self) -> Vec<Pos2> {
        match self {
            Self::Pen { points, .. } => points.clone(),
            Self::Line { from, to, .. }
            | Self::Rectangle { from, to, .. }
            | Self::Ellipse { from, to, .. }
            | Self::Arrow { from, to, .. } => vec![*from, *to],
            Self::Text { anchor, .. } => vec![*anchor],
        }
    }

    /// Approximate eraser hit test. Text gets a generous axis-aligned box
    /// around its anchor; everything else is hit when any constituent
    /// point lies within the eraser radius on both axes. Bounding test
    /// only, never exact geometric intersection.
    pub fn hit_test(&self, pos: Pos2) -> bool {
        match self {
            Self::Text { anchor, .. } => {
                (pos.x - anchor.x).abs() < TEXT_HIT_HALF_WIDTH
                    && (pos.y - anchor.y).abs() < TEXT_HIT_HALF_HEIGHT
            }
            _ => self.points().iter().any(|p| {
                (pos.x - p.x).abs() < ERASER_HIT_RADIUS && (pos.y - p.y).abs() < ERASER_HIT_RADIUS
            }),
        }
    }
}
