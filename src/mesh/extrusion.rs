use super::facet::{Point3D, Triangle};
use super::triangulation::triangulate;
use crate::path::{Path, Section};

/// Extrude every section of a path into a prism from z=0 to `height`.
///
/// Sections are treated independently; nested outlines are not turned into
/// holes. Triangles come out per section, side walls first, then caps.
pub fn extrude(path: &Path, height: f64) -> Vec<Triangle> {
    path.sections()
        .iter()
        .flat_map(|section| extrude_section(section, height))
        .collect()
}

/// Extrude one closed loop.
///
/// Outward-facing winding assumes a counter-clockwise loop.
pub fn extrude_section(section: &Section, height: f64) -> Vec<Triangle> {
    let mut triangles = Vec::new();
    add_side_walls(&mut triangles, section, height);
    add_caps(&mut triangles, section, height);
    triangles
}

// p2--p4
// |  / |
// | /  |
// p1--p3
fn add_side_walls(triangles: &mut Vec<Triangle>, section: &Section, height: f64) {
    for (a, b) in section.edges() {
        let p1 = Point3D::lift(a, 0.0);
        let p2 = Point3D::lift(a, height);
        let p3 = Point3D::lift(b, 0.0);
        let p4 = Point3D::lift(b, height);

        triangles.push(Triangle::new(p1, p4, p2));
        triangles.push(Triangle::new(p1, p3, p4));
    }
}

fn add_caps(triangles: &mut Vec<Triangle>, section: &Section, height: f64) {
    let points = section.points();

    for [a, b, c] in triangulate(points).into_triangles() {
        let (a, b, c) = (points[a], points[b], points[c]);

        triangles.push(Triangle::new(
            Point3D::lift(a, height),
            Point3D::lift(b, height),
            Point3D::lift(c, height),
        ));

        // Reversed so the bottom faces down
        triangles.push(Triangle::new(
            Point3D::lift(a, 0.0),
            Point3D::lift(c, 0.0),
            Point3D::lift(b, 0.0),
        ));
    }
}
