use super::{BLUE, MARKER_RADIUS, RED};
use crate::display::{InputEvent, MouseButtonKind, PixelBuffer};
use crate::math2d::{self, Vec2};
use crate::raster;
use crate::shapes::{Point, Scene};
use sdl2::keyboard::Keycode;

const PICK_DISTANCE: f32 = 20.0;
/// Fraction of the remaining distance covered per animation frame
const MORPH_STEP: f32 = 0.2;
/// A vertex this close to its target counts as arrived
const SETTLE_DISTANCE: f32 = 0.5;

/// Shape morphing: drag per-vertex target positions to establish the
/// correspondence, then Enter animates the polygon into the target shape.
pub struct MorphMode {
    selected: Option<usize>,
    targets: Vec<Point>,
    drag_index: Option<usize>,
    animating: bool,
    mouse_pos: (i32, i32),
    mouse_down: bool,
}

impl MorphMode {
    pub fn new() -> Self {
        Self {
            selected: None,
            targets: Vec::new(),
            drag_index: None,
            animating: false,
            mouse_pos: (0, 0),
            mouse_down: false,
        }
    }

    fn closest_target_index(&self, scene: &Scene, x: f32, y: f32) -> Option<usize> {
        let poly = scene.polygons.get(self.selected?)?;
        let cursor = Point::new(x, y);
        let mut best: Option<(usize, f32)> = None;
        for (i, v) in poly.vertices().iter().enumerate() {
            let d = cursor.distance_to(v);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.filter(|&(_, d)| d <= PICK_DISTANCE).map(|(i, _)| i)
    }

    pub fn handle_event(&mut self, event: &InputEvent, scene: &Scene) {
        if self.animating {
            return;
        }
        match event {
            InputEvent::MouseMove { x, y } => {
                self.mouse_pos = (*x, *y);
                if self.mouse_down {
                    if let Some(di) = self.drag_index {
                        if let Some(target) = self.targets.get_mut(di) {
                            *target = Point::new(*x as f32, *y as f32);
                        }
                    }
                }
            }
            InputEvent::MouseDown { x, y, button } => {
                self.mouse_pos = (*x, *y);
                if *button != MouseButtonKind::Left {
                    return;
                }
                self.mouse_down = true;
                let (fx, fy) = (*x as f32, *y as f32);
                if self.selected.is_none() {
                    // Pick a polygon to morph and seed its targets in place
                    if let Some(idx) = scene.closest_polygon(fx, fy, PICK_DISTANCE) {
                        let poly = &scene.polygons[idx];
                        if poly.is_closed() && !poly.is_complex() {
                            self.selected = Some(idx);
                            self.targets = poly.vertices().to_vec();
                            self.drag_index = self.closest_target_index(scene, fx, fy);
                        }
                    }
                } else if self.drag_index.is_none() {
                    self.drag_index = self.closest_target_index(scene, fx, fy);
                }
            }
            InputEvent::MouseUp {
                button: MouseButtonKind::Left,
                ..
            } => {
                self.mouse_down = false;
                self.drag_index = None;
            }
            InputEvent::KeyDown(Keycode::Return) => {
                if self.selected.is_some() {
                    self.animating = true;
                }
            }
            _ => {}
        }
    }

    /// Advance the morph animation by one frame
    pub fn update(&mut self, scene: &mut Scene) {
        if !self.animating {
            return;
        }
        let Some(poly) = self.selected.and_then(|i| scene.polygons.get_mut(i)) else {
            self.animating = false;
            return;
        };

        let mut settled = 0;
        for (i, target) in self.targets.iter().enumerate() {
            let current = poly.vertices()[i];
            let next = math2d::lerp(Vec2::from(current), Vec2::from(*target), MORPH_STEP);
            poly.set_vertex(i, Point::from(next));

            let remaining = Vec2::new(target.x - next.x, target.y - next.y);
            if remaining.length() < SETTLE_DISTANCE {
                settled += 1;
            }
        }

        if settled == self.targets.len() {
            self.animating = false;
            self.selected = None;
            self.drag_index = None;
            self.targets.clear();
        }
    }

    pub fn render(&self, buffer: &mut PixelBuffer, scene: &Scene) {
        if let Some(poly) = self.selected.and_then(|i| scene.polygons.get(i)) {
            raster::draw_polygon_vertices(buffer, BLUE, poly, MARKER_RADIUS);
            for (v, target) in poly.vertices().iter().zip(&self.targets) {
                raster::draw_line(
                    buffer,
                    RED,
                    v.x as i32,
                    v.y as i32,
                    target.x as i32,
                    target.y as i32,
                );
                raster::plot_point(
                    buffer,
                    RED,
                    target.x as i32,
                    target.y as i32,
                    MARKER_RADIUS,
                );
            }
        } else {
            for poly in &scene.polygons {
                raster::draw_polygon_vertices(buffer, RED, poly, MARKER_RADIUS);
            }
        }
    }
}

impl Default for MorphMode {
    fn default() -> Self {
        Self::new()
    }
}
