use super::{MARKER_RADIUS, RED};
use crate::display::{InputEvent, MouseButtonKind, PixelBuffer};
use crate::raster;
use crate::shapes::{Point, Scene};

const PICK_DISTANCE: f32 = 10.0;

/// Vertex dragging: hovering picks the nearest vertex, holding the left
/// button moves it with the cursor.
pub struct DeformMode {
    mouse_pos: (i32, i32),
    mouse_down: bool,
    picked: Option<(usize, usize)>,
}

impl DeformMode {
    pub fn new() -> Self {
        Self {
            mouse_pos: (0, 0),
            mouse_down: false,
            picked: None,
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent, scene: &mut Scene) {
        match event {
            InputEvent::MouseMove { x, y } => {
                self.mouse_pos = (*x, *y);
                if self.mouse_down {
                    if let Some((pi, vi)) = self.picked {
                        if let Some(poly) = scene.polygons.get_mut(pi) {
                            poly.set_vertex(vi, Point::new(*x as f32, *y as f32));
                        }
                    }
                } else {
                    self.picked =
                        scene.closest_vertex(*x as f32, *y as f32, PICK_DISTANCE);
                }
            }
            InputEvent::MouseDown {
                button: MouseButtonKind::Left,
                ..
            } => {
                self.mouse_down = true;
            }
            InputEvent::MouseUp {
                button: MouseButtonKind::Left,
                ..
            } => {
                self.mouse_down = false;
            }
            _ => {}
        }
    }

    /// Highlight the picked vertex
    pub fn render(&self, buffer: &mut PixelBuffer, scene: &Scene) {
        if let Some((pi, vi)) = self.picked {
            if let Some(point) = scene
                .polygons
                .get(pi)
                .and_then(|poly| poly.vertices().get(vi))
            {
                raster::plot_point(buffer, RED, point.x as i32, point.y as i32, MARKER_RADIUS);
            }
        }
    }
}

impl Default for DeformMode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Polygon;

    fn scene_with_square() -> Scene {
        let mut poly = Polygon::new();
        poly.add_point(Point::new(10.0, 10.0));
        poly.add_point(Point::new(50.0, 10.0));
        poly.add_point(Point::new(50.0, 50.0));
        poly.close(Point::new(10.0, 50.0));
        let mut scene = Scene::new("test");
        scene.add_polygon(poly);
        scene
    }

    #[test]
    fn test_hover_pick_and_drag_moves_vertex() {
        let mut mode = DeformMode::new();
        let mut scene = scene_with_square();

        // Hover near vertex 1, press, drag
        mode.handle_event(&InputEvent::MouseMove { x: 52, y: 11 }, &mut scene);
        assert_eq!(mode.picked, Some((0, 1)));
        mode.handle_event(
            &InputEvent::MouseDown {
                x: 52,
                y: 11,
                button: MouseButtonKind::Left,
            },
            &mut scene,
        );
        mode.handle_event(&InputEvent::MouseMove { x: 80, y: 20 }, &mut scene);
        assert_eq!(scene.polygons[0].vertices()[1], Point::new(80.0, 20.0));

        // Release: hovering far away drops the pick
        mode.handle_event(
            &InputEvent::MouseUp {
                x: 80,
                y: 20,
                button: MouseButtonKind::Left,
            },
            &mut scene,
        );
        mode.handle_event(&InputEvent::MouseMove { x: 200, y: 200 }, &mut scene);
        assert_eq!(mode.picked, None);
    }

    #[test]
    fn test_drag_can_make_polygon_complex() {
        let mut mode = DeformMode::new();
        let mut scene = scene_with_square();

        mode.handle_event(&InputEvent::MouseMove { x: 10, y: 10 }, &mut scene);
        mode.handle_event(
            &InputEvent::MouseDown {
                x: 10,
                y: 10,
                button: MouseButtonKind::Left,
            },
            &mut scene,
        );
        // Drag corner 0 across the opposite edge: the square becomes a bowtie
        mode.handle_event(&InputEvent::MouseMove { x: 90, y: 30 }, &mut scene);
        assert!(scene.polygons[0].is_complex());
    }
}
