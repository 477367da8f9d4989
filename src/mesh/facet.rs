use crate::path::Point2D;

/// A point in model space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Lift an outline point to height `z`
    pub fn lift(p: Point2D, z: f64) -> Self {
        Self::new(p.x, p.y, z)
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Three vertices; winding order determines the facing direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Point3D; 3],
}

impl Triangle {
    pub fn new(v0: Point3D, v1: Point3D, v2: Point3D) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }
}

/// A triangle for STL output, with its outward unit normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    /// Normal vector [nx, ny, nz]; all zero for a zero-area triangle
    pub normal: [f64; 3],
    pub vertices: [Point3D; 3],
}

impl Facet {
    /// True when the triangle had no area to derive a normal from
    pub fn is_degenerate(&self) -> bool {
        self.normal == [0.0, 0.0, 0.0]
    }
}

/// Package a triangle with its normal
pub fn facet_for(triangle: &Triangle) -> Facet {
    Facet {
        normal: calculate_normal(&triangle.vertices),
        vertices: triangle.vertices,
    }
}

/// Build facets in the order the triangles were produced
pub fn assemble(triangles: &[Triangle]) -> Vec<Facet> {
    triangles.iter().map(facet_for).collect()
}

/// Calculate the unit normal of a triangle using the cross product
fn calculate_normal(vertices: &[Point3D; 3]) -> [f64; 3] {
    let [v0, v1, v2] = *vertices;

    // Both edges start at v0
    let u = [v1.x - v0.x, v1.y - v0.y, v1.z - v0.z];
    let w = [v2.x - v0.x, v2.y - v0.y, v2.z - v0.z];

    let nx = u[1] * w[2] - u[2] * w[1];
    let ny = u[2] * w[0] - u[0] * w[2];
    let nz = u[0] * w[1] - u[1] * w[0];

    let len = (nx * nx + ny * ny + nz * nz).sqrt();
    // Below rounding noise relative to the edge lengths the triangle is flat
    let threshold = f64::EPSILON * norm(u) * norm(w);
    if len > threshold {
        [nx / len, ny / len, nz / len]
    } else {
        [0.0, 0.0, 0.0]
    }
}

fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
