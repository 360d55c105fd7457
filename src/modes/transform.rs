use super::{BLUE, GREEN, MARKER_RADIUS, RED};
use crate::display::{InputEvent, MouseButtonKind, PixelBuffer};
use crate::math2d::{Mat3, Vec2, Vec3};
use crate::raster;
use crate::shapes::{Point, Scene};
use sdl2::keyboard::Keycode;

const SELECT_DISTANCE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubMode {
    Select,
    Translate,
    Rotate,
    Scale,
    Shear,
    Reflect,
}

impl SubMode {
    fn hint(self) -> &'static str {
        match self {
            SubMode::Select => "SELECT: Click a polygon to transform",
            SubMode::Translate => "TRANSLATE: Click where you want to translate",
            SubMode::Rotate => "ROTATE: Click and drag to rotate the point",
            SubMode::Scale => "SCALE: Click along the axes to scale in that direction",
            SubMode::Shear => "SHEAR: Click along the axes to shear in that direction",
            SubMode::Reflect => "REFLECT: Click to reflect across y = x",
        }
    }
}

/// Affine transform editing on one selected polygon.
///
/// Drag gestures build a pending matrix from the motion of the polygon's
/// first vertex (as seen through the accumulated transform); releasing the
/// button left-multiplies it into the session accumulator, and Enter applies
/// the accumulator to every vertex about the chosen origin.
pub struct TransformMode {
    sub: SubMode,
    selected: Option<usize>,
    origin: Point,
    accumulated: Mat3,
    pending: Option<Mat3>,
    mouse_pos: (i32, i32),
    mouse_down: bool,
    known_polygons: usize,
}

impl TransformMode {
    pub fn new() -> Self {
        Self {
            sub: SubMode::Select,
            selected: None,
            origin: Point::new(0.0, 0.0),
            accumulated: Mat3::identity(),
            pending: None,
            mouse_pos: (0, 0),
            mouse_down: false,
            known_polygons: 0,
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    /// Drop the selection when the scene shrank underneath us (reset/load)
    pub fn sync(&mut self, scene: &Scene) {
        if scene.polygons.len() < self.known_polygons {
            self.sub = SubMode::Select;
            self.selected = None;
            self.pending = None;
            self.accumulated = Mat3::identity();
        }
        self.known_polygons = scene.polygons.len();
    }

    /// First vertex of the selected polygon, seen through the accumulated
    /// transform about the current origin
    fn anchor(&self, scene: &Scene) -> Option<Point> {
        let poly = scene.polygons.get(self.selected?)?;
        let first = poly.vertices().first()?;
        let v = self.accumulated
            * Vec3::new(first.x - self.origin.x, first.y - self.origin.y, 1.0);
        Some(Point::new(v.x + self.origin.x, v.y + self.origin.y))
    }

    /// Rebuild the pending matrix from the current drag position
    fn update_pending(&mut self, scene: &Scene, width: u32, height: u32) {
        let Some(anchor) = self.anchor(scene) else {
            return;
        };
        let mx = self.mouse_pos.0 as f32;
        let my = self.mouse_pos.1 as f32;

        match self.sub {
            SubMode::Translate => {
                self.pending = Some(Mat3::translation(mx - anchor.x, my - anchor.y));
            }
            SubMode::Rotate => {
                // Angle between the anchor spoke and the cursor spoke
                let dest = Vec2::new(mx - self.origin.x, my - self.origin.y);
                let vert = Vec2::new(anchor.x - self.origin.x, anchor.y - self.origin.y);
                let theta = vert.cross(&dest).atan2(dest.dot(&vert));
                self.pending = Some(Mat3::rotation(theta));
            }
            SubMode::Scale => {
                let vert = Vec2::new(anchor.x - self.origin.x, anchor.y - self.origin.y);
                if vert.x != 0.0 && vert.y != 0.0 {
                    self.pending = Some(Mat3::scale(
                        (mx - self.origin.x) / vert.x,
                        (my - self.origin.y) / vert.y,
                    ));
                }
            }
            SubMode::Shear => {
                let hx = -(mx - self.origin.x) / width as f32;
                let hy = (my - self.origin.y) / height as f32;
                self.pending = Some(Mat3::shear(hx, hy));
            }
            SubMode::Select | SubMode::Reflect => {}
        }
    }

    fn set_sub_mode(&mut self, sub: SubMode) {
        if self.sub != sub {
            self.sub = sub;
            self.pending = None;
            println!("{}", sub.hint());
        }
    }

    /// Bake the accumulated transform into the polygon's vertices
    fn commit(&mut self, scene: &mut Scene) {
        if let Some(poly) = self.selected.and_then(|i| scene.polygons.get_mut(i)) {
            poly.apply_transform(&self.accumulated, self.origin);
        }
        self.accumulated = Mat3::identity();
        self.pending = None;
    }

    fn hovered_selectable(&self, scene: &Scene) -> Option<usize> {
        let idx = scene.closest_polygon(
            self.mouse_pos.0 as f32,
            self.mouse_pos.1 as f32,
            SELECT_DISTANCE,
        )?;
        let poly = &scene.polygons[idx];
        (poly.is_closed() && !poly.is_complex()).then_some(idx)
    }

    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        scene: &mut Scene,
        width: u32,
        height: u32,
    ) {
        match event {
            InputEvent::KeyDown(key) => {
                if self.selected.is_some() {
                    match *key {
                        Keycode::A => self.set_sub_mode(SubMode::Translate),
                        Keycode::S => self.set_sub_mode(SubMode::Rotate),
                        Keycode::D => self.set_sub_mode(SubMode::Scale),
                        Keycode::F => self.set_sub_mode(SubMode::Shear),
                        Keycode::G => self.set_sub_mode(SubMode::Reflect),
                        Keycode::H => self.set_sub_mode(SubMode::Select),
                        Keycode::Return => self.commit(scene),
                        _ => {}
                    }
                }
            }
            InputEvent::MouseMove { x, y } => {
                self.mouse_pos = (*x, *y);
                if self.mouse_down && self.selected.is_some() {
                    self.update_pending(scene, width, height);
                }
            }
            InputEvent::MouseDown { x, y, button } => {
                self.mouse_pos = (*x, *y);
                match button {
                    MouseButtonKind::Left => {
                        self.mouse_down = true;
                        if self.sub == SubMode::Select {
                            if let Some(idx) = self.hovered_selectable(scene) {
                                self.selected = Some(idx);
                                self.accumulated = Mat3::identity();
                                self.pending = None;
                            }
                        } else {
                            self.update_pending(scene, width, height);
                        }
                    }
                    MouseButtonKind::Right => {
                        // Drop the local origin at the cursor
                        self.origin = Point::new(*x as f32, *y as f32);
                    }
                    MouseButtonKind::Middle => {}
                }
            }
            InputEvent::MouseUp {
                button: MouseButtonKind::Left,
                ..
            } => {
                self.mouse_down = false;
                if self.selected.is_some() {
                    if self.sub == SubMode::Reflect {
                        self.accumulated = Mat3::reflection() * self.accumulated;
                    } else if let Some(pending) = self.pending.take() {
                        self.accumulated = pending * self.accumulated;
                    }
                }
            }
            _ => {}
        }
    }

    pub fn render(&self, buffer: &mut PixelBuffer, scene: &Scene) {
        let w = buffer.width() as i32;
        let h = buffer.height() as i32;

        if self.sub == SubMode::Select {
            if let Some(poly) = self.hovered_selectable(scene).map(|i| &scene.polygons[i]) {
                raster::draw_polygon_vertices(buffer, RED, poly, MARKER_RADIUS);
            }
        }

        let Some(poly) = self.selected.and_then(|i| scene.polygons.get(i)) else {
            return;
        };
        raster::draw_polygon_vertices(buffer, BLUE, poly, MARKER_RADIUS);

        // Origin marker with full-screen axis cross
        let ox = self.origin.x as i32;
        let oy = self.origin.y as i32;
        raster::plot_point(buffer, RED, ox, oy, MARKER_RADIUS);
        raster::draw_line(buffer, RED, ox, oy, ox, 0);
        raster::draw_line(buffer, RED, ox, oy, ox, h);
        raster::draw_line(buffer, RED, ox, oy, 0, oy);
        raster::draw_line(buffer, RED, ox, oy, w, oy);

        // The tracked first vertex through the accumulated transform
        if let Some(anchor) = self.anchor(scene) {
            let ax = anchor.x as i32;
            let ay = anchor.y as i32;
            raster::plot_point(buffer, BLUE, ax, ay, MARKER_RADIUS);
            raster::draw_line(buffer, BLUE, ox, oy, ax, ay);

            // Preview of the drag in progress
            if self.mouse_down {
                match self.sub {
                    SubMode::Translate | SubMode::Scale | SubMode::Shear => {
                        let (mx, my) = self.mouse_pos;
                        raster::plot_point(buffer, GREEN, mx, my, MARKER_RADIUS);
                        let (fx, fy) = if self.sub == SubMode::Translate {
                            (ax, ay)
                        } else {
                            (ox, oy)
                        };
                        raster::draw_line(buffer, GREEN, fx, fy, mx, my);
                    }
                    SubMode::Rotate => {
                        if let Some(pending) = &self.pending {
                            let v = *pending
                                * Vec3::new(anchor.x - self.origin.x, anchor.y - self.origin.y, 1.0);
                            let px = (v.x + self.origin.x) as i32;
                            let py = (v.y + self.origin.y) as i32;
                            raster::plot_point(buffer, GREEN, px, py, MARKER_RADIUS);
                            raster::draw_line(buffer, GREEN, ox, oy, px, py);
                        }
                    }
                    SubMode::Select | SubMode::Reflect => {}
                }
            }
        }
    }
}

impl Default for TransformMode {
    fn default() -> Self {
        Self::new()
    }
}
