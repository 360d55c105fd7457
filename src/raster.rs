//! Software rasterization primitives
//!
//! Stateless drawing operations over a caller-supplied [`PixelBuffer`]:
//! point (disc) plotting, integer Bresenham lines, polygon outlines and
//! vertex markers, and an even-odd scan-line polygon fill that handles
//! horizontal edges and vertices grazing the scan line.
//!
//! Degenerate input is absorbed, never reported: out-of-bounds plots clip
//! or skip, and `scan_fill` silently refuses polygons that are open, too
//! small, or self-intersecting.

use crate::display::PixelBuffer;
use crate::shapes::Polygon;

/// Color triple used by every drawing operation (alpha is always opaque)
pub type Rgb = (u8, u8, u8);

#[inline]
fn sign(x: i32) -> i32 {
    (x > 0) as i32 - (x < 0) as i32
}

/// Fill a square disc of side `2 * radius + 1` centered at (x, y), clipped
/// to the buffer; `radius = 0` plots a single pixel.
///
/// The whole call is skipped when the center itself is out of bounds. The
/// center test accepts `x == w` / `y == h` (one past the last column/row);
/// the per-pixel clip below is strict, so such a call paints only the part
/// of the disc that is really inside.
pub fn plot_point(buffer: &mut PixelBuffer, color: Rgb, x: i32, y: i32, radius: i32) {
    let w = buffer.width() as i32;
    let h = buffer.height() as i32;
    if x < 0 || x > w || y < 0 || y > h {
        return;
    }

    let (r, g, b) = color;
    for i in (x - radius)..=(x + radius) {
        for j in (y - radius)..=(y + radius) {
            buffer.set_pixel(i, j, r, g, b);
        }
    }
}

/// Integer Bresenham line from (x1, y1) toward (x2, y2).
///
/// The loop runs along the major axis until it *reaches* the endpoint, so
/// the final pixel (x2, y2) itself is never plotted. Polygon outlines rely
/// on this: the next edge starts where the previous one stopped.
pub fn draw_line(buffer: &mut PixelBuffer, color: Rgb, x1: i32, y1: i32, x2: i32, y2: i32) {
    let dx = x2 - x1;
    let dy = y2 - y1;

    let x_derr = 2 * dx.abs();
    let y_derr = 2 * dy.abs();

    let x_incr = sign(dx);
    let y_incr = sign(dy);

    if dx.abs() > dy.abs() {
        let mut d = 2 * dy.abs() - dx.abs();
        let mut y = y1;
        let mut x = x1;
        while x != x2 {
            plot_point(buffer, color, x, y, 0);

            if d > 0 {
                y += y_incr;
                d -= x_derr;
            }
            d += y_derr;
            x += x_incr;
        }
    } else {
        let mut d = 2 * dx.abs() - dy.abs();
        let mut x = x1;
        let mut y = y1;
        while y != y2 {
            plot_point(buffer, color, x, y, 0);

            if d > 0 {
                x += x_incr;
                d -= y_derr;
            }
            d += x_derr;
            y += y_incr;
        }
    }
}

/// Draw a line for every defined edge of the polygon
pub fn draw_polygon_outline(buffer: &mut PixelBuffer, color: Rgb, poly: &Polygon) {
    for (p1, p2) in poly.edges() {
        draw_line(
            buffer,
            color,
            p1.x as i32,
            p1.y as i32,
            p2.x as i32,
            p2.y as i32,
        );
    }
}

/// Plot every vertex as a disc of the given radius
pub fn draw_polygon_vertices(buffer: &mut PixelBuffer, color: Rgb, poly: &Polygon, radius: i32) {
    for point in poly.vertices() {
        plot_point(buffer, color, point.x as i32, point.y as i32, radius);
    }
}

/// Scan-line intersection record. `vert_index` back-references the edge
/// whose start vertex sits exactly on the scan line.
struct XEntry {
    x: i32,
    vert_index: Option<usize>,
}

/// Even-odd scan-line fill.
///
/// Silent no-op when the polygon is self-intersecting, has fewer than three
/// vertices, or is not closed. Otherwise each scan line collects its edge
/// intersections, sorts them by x, and walks them left to right keeping a
/// parity counter: plain crossings flip parity, while vertices that are a
/// local extremum or lead into a horizontal run count twice (the line
/// grazes the boundary without entering). A vertex delta flattened by a
/// horizontal edge inherits the direction of the last sloped edge seen on
/// this scan line.
///
/// The +1 column offset on sloped intersections and the half-open scan
/// range are part of the fill's pixel-level contract; tests pin both.
pub fn scan_fill(buffer: &mut PixelBuffer, color: Rgb, poly: &Polygon) {
    if poly.is_complex() {
        return;
    }
    if poly.num_points() < 3 {
        return;
    }
    if !poly.is_closed() {
        return;
    }

    let points = poly.vertices();
    let n = points.len();

    let mut max_y = 0i32;
    let mut min_y = buffer.height() as i32;
    for point in points {
        let py = point.y as i32;
        if py > max_y {
            max_y = py;
        }
        if py < min_y {
            min_y = py;
        }
    }

    let mut intersections: Vec<XEntry> = Vec::with_capacity(poly.num_edges());

    for y in min_y..max_y {
        intersections.clear();
        let yf = y as f32;

        for i in 0..poly.num_edges() {
            let (u1, u2) = poly.edge(i);

            // Horizontal edges contribute only when the scan line sits on them
            if u1.y == u2.y {
                if u1.y == yf {
                    intersections.push(XEntry {
                        x: u1.x as i32,
                        vert_index: Some(i),
                    });
                }
                continue;
            }

            if !((u1.y < yf && u2.y > yf) || (u1.y > yf && u2.y < yf) || u1.y == yf) {
                continue;
            }

            let x = (f64::from((yf - u1.y) * (u2.x - u1.x)) / f64::from(u2.y - u1.y)
                + f64::from(u1.x)) as i32;

            let vert_index = if u1.x == x as f32 && u1.y == yf {
                Some(i)
            } else {
                None
            };
            intersections.push(XEntry {
                x: x + 1,
                vert_index,
            });
        }

        intersections.sort_unstable_by_key(|entry| entry.x);

        // Direction of the most recent non-flat edge on this scan line
        let mut last_diff = 0;
        let mut parity = 0;
        let count = intersections.len();
        for i in 0..count.saturating_sub(1) {
            if let Some(v) = intersections[i].vert_index {
                let u0 = points[(v + n - 1) % n];
                let u1 = points[v];
                let u2 = points[(v + 1) % n];

                let mut diff_1 = sign((u1.y - u0.y) as i32);
                let diff_2 = sign((u1.y - u2.y) as i32);

                if i == 0 {
                    last_diff = diff_1;
                }
                // The vertex tails a flat edge: inherit the last direction
                if diff_1 == 0 {
                    diff_1 = last_diff;
                }

                // Local extremum, or the vertex leads a flat edge: the scan
                // line grazes a turning point rather than crossing
                if diff_1 == diff_2 || diff_2 == 0 {
                    parity += 2;
                } else {
                    parity += 1;
                }

                last_diff = diff_1;
            } else {
                parity += 1;
            }

            if parity % 2 == 1 {
                draw_line(
                    buffer,
                    color,
                    intersections[i].x,
                    y,
                    intersections[i + 1].x,
                    y,
                );
            }
        }
    }
}
