use super::RED;
use crate::display::{InputEvent, MouseButtonKind, PixelBuffer};
use crate::geometry;
use crate::raster;
use crate::shapes::{Point, Polygon, Scene};

/// Polygon drawing: left click appends a vertex at the cursor, right click
/// closes the polygon through the cursor and starts a fresh one.
pub struct DrawMode {
    mouse_pos: (i32, i32),
}

impl DrawMode {
    pub fn new() -> Self {
        Self { mouse_pos: (0, 0) }
    }

    /// The scene always ends with an open polygon to append into while this
    /// mode is active. Returns its index.
    fn ensure_open(scene: &mut Scene) -> usize {
        let needs_new = scene
            .polygons
            .last()
            .map_or(true, |poly| poly.is_closed());
        if needs_new {
            scene.add_polygon(Polygon::new());
        }
        scene.polygons.len() - 1
    }

    pub fn handle_event(&mut self, event: &InputEvent, scene: &mut Scene) {
        match event {
            InputEvent::MouseMove { x, y } => {
                self.mouse_pos = (*x, *y);
            }
            InputEvent::MouseDown { x, y, button } => {
                self.mouse_pos = (*x, *y);
                let idx = Self::ensure_open(scene);
                let point = Point::new(*x as f32, *y as f32);
                match button {
                    MouseButtonKind::Left => {
                        scene.polygons[idx].add_point(point);
                    }
                    MouseButtonKind::Right => {
                        // Closing needs at least two existing vertices: the
                        // click itself becomes the final one
                        if scene.polygons[idx].num_points() >= 2 {
                            scene.polygons[idx].close(point);
                            scene.add_polygon(Polygon::new());
                        }
                    }
                    MouseButtonKind::Middle => {}
                }
            }
            _ => {}
        }
    }

    /// True when the rubber-band edge from the last vertex to the cursor
    /// would cross the polygon being drawn
    pub fn preview_intersects(&self, scene: &Scene) -> bool {
        let Some(poly) = scene.polygons.last() else {
            return false;
        };
        if poly.is_closed() {
            return false;
        }
        let Some(last) = poly.vertices().last() else {
            return false;
        };
        let cursor = Point::new(self.mouse_pos.0 as f32, self.mouse_pos.1 as f32);
        geometry::segment_intersects_polygon(cursor, *last, poly)
    }

    /// Rubber-band preview edge from the cursor back to the last vertex
    pub fn render(&self, buffer: &mut PixelBuffer, scene: &Scene) {
        let Some(poly) = scene.polygons.last() else {
            return;
        };
        if poly.is_closed() {
            return;
        }
        if let Some(last) = poly.vertices().last() {
            raster::draw_line(
                buffer,
                RED,
                self.mouse_pos.0,
                self.mouse_pos.1,
                last.x as i32,
                last.y as i32,
            );
        }
    }
}

impl Default for DrawMode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left_click(x: i32, y: i32) -> InputEvent {
        InputEvent::MouseDown {
            x,
            y,
            button: MouseButtonKind::Left,
        }
    }

    fn right_click(x: i32, y: i32) -> InputEvent {
        InputEvent::MouseDown {
            x,
            y,
            button: MouseButtonKind::Right,
        }
    }

    #[test]
    fn test_click_sequence_builds_closed_polygon() {
        let mut mode = DrawMode::new();
        let mut scene = Scene::new("test");

        mode.handle_event(&left_click(10, 10), &mut scene);
        mode.handle_event(&left_click(50, 10), &mut scene);
        mode.handle_event(&left_click(50, 50), &mut scene);
        mode.handle_event(&right_click(10, 50), &mut scene);

        // Closed polygon plus the fresh open one for the next shape
        assert_eq!(scene.polygons.len(), 2);
        let poly = &scene.polygons[0];
        assert!(poly.is_closed());
        assert_eq!(poly.num_points(), 4);
        assert_eq!(poly.num_edges(), 4);
        assert_eq!(poly.vertices()[3], Point::new(10.0, 50.0));
        assert!(!scene.polygons[1].is_closed());
        assert_eq!(scene.polygons[1].num_points(), 0);
    }

    #[test]
    fn test_close_needs_two_vertices() {
        let mut mode = DrawMode::new();
        let mut scene = Scene::new("test");

        mode.handle_event(&left_click(10, 10), &mut scene);
        mode.handle_event(&right_click(50, 50), &mut scene);

        assert_eq!(scene.polygons.len(), 1);
        assert!(!scene.polygons[0].is_closed());
        assert_eq!(scene.polygons[0].num_points(), 1);
    }

    #[test]
    fn test_preview_warns_before_the_edge_exists() {
        let mut mode = DrawMode::new();
        let mut scene = Scene::new("test");

        // U-turn shape: the rubber band back across the first edge crosses it
        mode.handle_event(&left_click(10, 10), &mut scene);
        mode.handle_event(&left_click(50, 10), &mut scene);
        mode.handle_event(&left_click(50, 30), &mut scene);
        mode.handle_event(&InputEvent::MouseMove { x: 30, y: 0 }, &mut scene);
        assert!(mode.preview_intersects(&scene));

        mode.handle_event(&InputEvent::MouseMove { x: 30, y: 30 }, &mut scene);
        assert!(!mode.preview_intersects(&scene));
    }
}
