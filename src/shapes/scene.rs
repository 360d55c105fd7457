use super::{Point, Polygon};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A scene holds every polygon in the editing session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub polygons: Vec<Polygon>,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            polygons: Vec::new(),
        }
    }

    pub fn add_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Discard every polygon (reset)
    pub fn clear(&mut self) {
        self.polygons.clear();
    }

    /// Nearest vertex to (x, y) across all polygons, within `max_dist`.
    /// Returns (polygon index, vertex index).
    pub fn closest_vertex(&self, x: f32, y: f32, max_dist: f32) -> Option<(usize, usize)> {
        let target = Point::new(x, y);
        let mut best: Option<(usize, usize, f32)> = None;
        for (i, poly) in self.polygons.iter().enumerate() {
            for (j, v) in poly.vertices().iter().enumerate() {
                let d = target.distance_to(v);
                if best.map_or(true, |(_, _, bd)| d < bd) {
                    best = Some((i, j, d));
                }
            }
        }
        best.filter(|&(_, _, d)| d <= max_dist).map(|(i, j, _)| (i, j))
    }

    /// Nearest polygon to (x, y), measured to its vertices, within `max_dist`
    pub fn closest_polygon(&self, x: f32, y: f32, max_dist: f32) -> Option<usize> {
        self.closest_vertex(x, y, max_dist).map(|(i, _)| i)
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Load scene from a JSON file. The derived complex flags are recomputed,
    /// never trusted from the file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, String> {
        let json = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut scene: Self = serde_json::from_str(&json).map_err(|e| e.to_string())?;
        for poly in &mut scene.polygons {
            poly.refresh_complex();
        }
        Ok(scene)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("untitled")
    }
}
