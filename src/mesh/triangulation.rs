//! Ear-clipping triangulation of simple polygons
//!
//! Triangles are returned as index triples into the input loop, wound the
//! same way as the loop itself. No vertices are added.

use crate::path::Point2D;
use crate::path::model::signed_area;

/// Outcome of triangulating one loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Triangulation {
    /// The loop was reduced to exactly `n - 2` triangles
    Complete(Vec<[usize; 3]>),
    /// No ear was found with `remaining` vertices left; the loop is
    /// self-intersecting or degenerate
    Stalled {
        triangles: Vec<[usize; 3]>,
        remaining: usize,
    },
    /// Fewer than three vertices
    TooFewVertices(usize),
}

impl Triangulation {
    /// Triangles emitted, complete or not
    pub fn triangles(&self) -> &[[usize; 3]] {
        match self {
            Triangulation::Complete(t) => t,
            Triangulation::Stalled { triangles, .. } => triangles,
            Triangulation::TooFewVertices(_) => &[],
        }
    }

    pub fn into_triangles(self) -> Vec<[usize; 3]> {
        match self {
            Triangulation::Complete(t) => t,
            Triangulation::Stalled { triangles, .. } => triangles,
            Triangulation::TooFewVertices(_) => Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Triangulation::Complete(_))
    }
}

/// Triangulate a simple polygon given as an implicitly closed loop.
///
/// Works for both clockwise and counter-clockwise input. Each pass clips the
/// first ear found and resumes scanning at the clipped vertex's successor.
pub fn triangulate(points: &[Point2D]) -> Triangulation {
    if points.len() < 3 {
        return Triangulation::TooFewVertices(points.len());
    }

    // Zero-area loops (collinear, or lobes that cancel) have no winding to
    // clip against
    let area = signed_area(points);
    if area.abs() <= f64::EPSILON * area_magnitude(points) {
        return Triangulation::Stalled {
            triangles: Vec::new(),
            remaining: points.len(),
        };
    }

    let orientation = area.signum();
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut triangles = Vec::with_capacity(points.len() - 2);
    let mut start = 0;

    while remaining.len() > 3 {
        let n = remaining.len();
        let ear = (0..n)
            .map(|offset| (start + offset) % n)
            .find(|&i| is_ear(points, &remaining, i, orientation));

        let Some(i) = ear else {
            return Triangulation::Stalled {
                triangles,
                remaining: n,
            };
        };

        let prev = remaining[(i + n - 1) % n];
        let next = remaining[(i + 1) % n];
        triangles.push([prev, remaining[i], next]);
        remaining.remove(i);

        // `next` now sits at position i
        start = i % remaining.len();
    }

    triangles.push([remaining[0], remaining[1], remaining[2]]);
    Triangulation::Complete(triangles)
}

fn is_ear(points: &[Point2D], remaining: &[usize], i: usize, orientation: f64) -> bool {
    let n = remaining.len();
    let prev = (i + n - 1) % n;
    let next = (i + 1) % n;

    let a = points[remaining[prev]];
    let b = points[remaining[i]];
    let c = points[remaining[next]];

    // Convex with respect to the loop's overall winding
    let cross = Point2D::cross(a, b, c);
    if cross * orientation <= 0.0 {
        return false;
    }

    // No other remaining vertex inside or on the boundary; a reflex vertex
    // touching an edge would otherwise let the ear overlap the outline
    !remaining
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != prev && j != i && j != next)
        .map(|(_, &idx)| points[idx])
        .filter(|&p| p != a && p != b && p != c)
        .any(|p| point_in_triangle(p, a, b, c))
}

/// Sum of the absolute shoelace terms; the scale of rounding error in `signed_area`
fn area_magnitude(points: &[Point2D]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            (a.x * b.y).abs() + (b.x * a.y).abs()
        })
        .sum::<f64>()
        / 2.0
}

/// Containment via sign consistency of the three edge cross products.
/// Points on an edge count as inside.
fn point_in_triangle(p: Point2D, a: Point2D, b: Point2D, c: Point2D) -> bool {
    let d1 = Point2D::cross(a, b, p);
    let d2 = Point2D::cross(b, c, p);
    let d3 = Point2D::cross(c, a, p);

    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2D> {
        coords.iter().map(|&(x, y)| Point2D::new(x, y)).collect()
    }

    fn triangles_area(points: &[Point2D], triangles: &[[usize; 3]]) -> f64 {
        triangles
            .iter()
            .map(|t| Point2D::cross(points[t[0]], points[t[1]], points[t[2]]) / 2.0)
            .sum()
    }

    #[test]
    fn test_triangulate_square() {
        let square = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let result = triangulate(&square);
        assert!(result.is_complete());
        assert_eq!(result.triangles().len(), 2);
        assert!((triangles_area(&square, result.triangles()) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_triangulate_clockwise() {
        let square = pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let result = triangulate(&square);
        assert!(result.is_complete());
        // Triangles keep the loop's clockwise winding
        assert!((triangles_area(&square, result.triangles()) + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_convex_area_preserved() {
        let hexagon: Vec<Point2D> = (0..6)
            .map(|i| {
                let a = i as f64 * std::f64::consts::PI / 3.0;
                Point2D::new(3.0 * a.cos() + 1.0, 3.0 * a.sin() - 2.0)
            })
            .collect();
        let result = triangulate(&hexagon);
        assert_eq!(result.triangles().len(), 4);
        assert!((triangles_area(&hexagon, result.triangles()) - signed_area(&hexagon)).abs() < 1e-9);
    }

    #[test]
    fn test_concave_polygon() {
        // L-shape with one reflex vertex at (1,1)
        let shape = pts(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 1.0),
            (1.0, 1.0),
            (1.0, 2.0),
            (0.0, 2.0),
        ]);
        let result = triangulate(&shape);
        assert!(result.is_complete());
        assert_eq!(result.triangles().len(), 4);
        assert!((triangles_area(&shape, result.triangles()) - 3.0).abs() < 1e-9);

        // Every triangle keeps the loop's winding
        for t in result.triangles() {
            assert!(Point2D::cross(shape[t[0]], shape[t[1]], shape[t[2]]) > 0.0);
        }
    }

    #[test]
    fn test_vertices_conserved() {
        let shape = pts(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (2.0, 1.0),
            (0.0, 4.0),
        ]);
        let result = triangulate(&shape);
        assert_eq!(result.triangles().len(), shape.len() - 2);

        let mut used: Vec<usize> = result.triangles().iter().flatten().copied().collect();
        used.sort_unstable();
        used.dedup();
        assert_eq!(used, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_single_triangle() {
        let tri = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
        assert_eq!(triangulate(&tri), Triangulation::Complete(vec![[0, 1, 2]]));
    }

    #[test]
    fn test_too_few_vertices() {
        let segment = pts(&[(0.0, 0.0), (1.0, 0.0)]);
        let result = triangulate(&segment);
        assert_eq!(result, Triangulation::TooFewVertices(2));
        assert!(result.triangles().is_empty());
    }

    #[test]
    fn test_collinear_loop_stalls() {
        let line = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let result = triangulate(&line);
        assert_eq!(
            result,
            Triangulation::Stalled {
                triangles: vec![],
                remaining: 4
            }
        );
    }

    #[test]
    fn test_self_intersecting_terminates() {
        // Bow-tie: the two lobes cancel to zero signed area
        let bowtie = pts(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]);
        let result = triangulate(&bowtie);
        assert!(!result.is_complete());
        assert_eq!(
            result,
            Triangulation::Stalled {
                triangles: vec![],
                remaining: 4
            }
        );
    }

    #[test]
    fn test_offset_bowtie_stalls() {
        // Away from the origin the shoelace terms are large but still cancel
        let bowtie = pts(&[
            (1000.1, 1000.1),
            (1002.1, 1002.1),
            (1002.1, 1000.1),
            (1000.1, 1002.1),
        ]);
        assert!(!triangulate(&bowtie).is_complete());
    }

    #[test]
    fn test_tiny_polygon_still_triangulates() {
        let square = pts(&[(0.0, 0.0), (1e-7, 0.0), (1e-7, 1e-7), (0.0, 1e-7)]);
        let result = triangulate(&square);
        assert!(result.is_complete());
        assert_eq!(result.triangles().len(), 2);
    }
}
