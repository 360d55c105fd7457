//! Interactive editing modes
//!
//! Each mode is a per-session state struct fed `InputEvent`s and given a
//! chance to draw its overlay after the scene itself is rendered. All of the
//! interaction state lives here, never in globals, so the geometry engine
//! below stays pure.

mod deform;
mod draw;
mod morph;
mod transform;

pub use deform::DeformMode;
pub use draw::DrawMode;
pub use morph::MorphMode;
pub use transform::TransformMode;

use crate::raster::Rgb;

/// Top-level editing mode, selected with keys 1-4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Draw,
    Deform,
    Transform,
    Morph,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Draw => "DRAW",
            Mode::Deform => "DEFORM",
            Mode::Transform => "TRANSFORM",
            Mode::Morph => "MORPH",
        }
    }

    pub fn instructions(self) -> &'static str {
        match self {
            Mode::Draw => {
                "Draw mode: Left click to introduce points, right click to complete the polygon."
            },
            Mode::Deform => "Deform mode: Left click to select points nearby, drag to move.",
            Mode::Transform => {
                "Transform mode: Left click to select a polygon, then right click to set a local origin.\n\
                 Press: a) translate s) rotate d) scale f) shear g) reflect h) select another polygon.\n\
                 Drag the left mouse button to perform the transformation, press enter to apply."
            },
            Mode::Morph => {
                "Morph mode: Drag vertices into new positions to establish correspondence. Press enter to morph."
            },
        }
    }
}

// Shared overlay palette
pub(crate) const RED: Rgb = (255, 0, 0);
pub(crate) const GREEN: Rgb = (0, 255, 0);
pub(crate) const BLUE: Rgb = (0, 0, 255);

/// Marker radius for vertex handles and origin crosshairs
pub(crate) const MARKER_RADIUS: i32 = 5;
