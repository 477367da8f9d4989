use std::ops::{Add, Sub};

/// A point in the outline plane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Cross product of `(b - a)` and `(c - a)`; twice the signed area of `abc`
    pub fn cross(a: Point2D, b: Point2D, c: Point2D) -> f64 {
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }
}

impl Add for Point2D {
    type Output = Point2D;

    fn add(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2D {
    type Output = Point2D;

    fn sub(self, rhs: Point2D) -> Point2D {
        Point2D::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// One closed loop of points from a single move-to...close sequence.
///
/// The edge from the last point back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    points: Vec<Point2D>,
}

impl Section {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub(crate) fn push(&mut self, point: Point2D) {
        self.points.push(point);
    }

    /// Iterate the edges of the closed loop, including the closing edge.
    ///
    /// A two-point loop yields its single segment once; the closing edge
    /// would retrace it.
    pub fn edges(&self) -> impl Iterator<Item = (Point2D, Point2D)> + '_ {
        let n = self.points.len();
        let count = match n {
            0 | 1 => 0,
            2 => 1,
            _ => n,
        };
        (0..count).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Shoelace area; positive for counter-clockwise loops
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.points)
    }

    /// Average of the loop's vertices
    pub fn centroid(&self) -> Option<Point2D> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(Point2D::ORIGIN, |acc, &p| acc + p);
        let n = self.points.len() as f64;
        Some(Point2D::new(sum.x / n, sum.y / n))
    }

    fn translate(&mut self, offset: Point2D) {
        for point in &mut self.points {
            *point = *point + offset;
        }
    }
}

/// Shoelace signed area of an implicitly closed loop
pub fn signed_area(points: &[Point2D]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let a = points[i];
            let b = points[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

/// Axis-aligned bounding box of a path
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from a set of points
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2D>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;

        let mut bounds = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// All sections parsed from one command string, in drawing order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    sections: Vec<Section>,
}

impl Path {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    /// First point of the first section
    pub fn anchor(&self) -> Option<Point2D> {
        self.sections.first()?.points.first().copied()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(self.sections.iter().flat_map(|s| s.points.iter()))
    }

    /// Width and height of the bounding box, zero for an empty path
    pub fn size(&self) -> (f64, f64) {
        self.bounds()
            .map(|b| (b.width(), b.height()))
            .unwrap_or((0.0, 0.0))
    }

    /// Shift every point of every section by `offset`
    pub fn translate(&mut self, offset: Point2D) {
        for section in &mut self.sections {
            section.translate(offset);
        }
    }
}
