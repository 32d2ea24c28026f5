//! Tetromino catalog
//!
//! The 7 shapes, each as an occupancy pattern inside a square bounding box
//! of side 2 (O), 3 (J, L, T, S, Z) or 4 (I), paired with a display color.

use ratatui::style::Color;

/// The 7 tetromino shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    O, // Yellow - square
    J, // Blue - J-shape
    L, // Orange - L-shape
    T, // Purple - T-shape
    I, // Cyan - long bar
    S, // Green - S-shape
    Z, // Red - Z-shape
}

impl ShapeKind {
    /// Get the display color for this shape
    pub fn color(&self) -> Color {
        match self {
            ShapeKind::O => Color::Yellow,
            ShapeKind::J => Color::Blue,
            ShapeKind::L => Color::Rgb(255, 165, 0), // Orange
            ShapeKind::T => Color::Magenta,
            ShapeKind::I => Color::Cyan,
            ShapeKind::S => Color::Green,
            ShapeKind::Z => Color::Red,
        }
    }

    /// All shapes, for random selection
    pub fn all() -> [ShapeKind; 7] {
        [
            ShapeKind::O,
            ShapeKind::J,
            ShapeKind::L,
            ShapeKind::T,
            ShapeKind::I,
            ShapeKind::S,
            ShapeKind::Z,
        ]
    }

    /// Side length of this shape's square bounding box
    pub fn width(&self) -> usize {
        match self {
            ShapeKind::O => 2,
            ShapeKind::I => 4,
            _ => 3,
        }
    }

    /// Occupied (row, col) cells within the bounding box.
    /// Row 0 is the top of the box, col 0 the left edge.
    pub fn pattern(&self) -> [(usize, usize); 4] {
        match self {
            ShapeKind::O => [(0, 0), (0, 1), (1, 0), (1, 1)],
            ShapeKind::J => [(0, 1), (1, 1), (2, 0), (2, 1)],
            ShapeKind::L => [(0, 1), (1, 1), (2, 1), (2, 2)],
            ShapeKind::T => [(0, 1), (1, 0), (1, 1), (1, 2)],
            ShapeKind::I => [(0, 1), (1, 1), (2, 1), (3, 1)],
            ShapeKind::S => [(0, 1), (0, 2), (1, 0), (1, 1)],
            ShapeKind::Z => [(0, 0), (0, 1), (1, 1), (1, 2)],
        }
    }
}
