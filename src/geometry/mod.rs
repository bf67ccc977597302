//! A lean geometry facade: vertices, linestrings, polygons and
//! collections, just enough structure for the measurement engine to
//! walk. Planar (Cartesian) measures live here; the ellipsoidal ones
//! are the engine's business.

/// Generic 4D vertex: x, y and optional z (elevation) and m (measure)
/// dimensions. Absent dimensions are carried as `NaN`, which lets
/// interpolation pass them through without case analysis.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Point(pub [f64; 4]);

impl Point {
    /// A 2D vertex; z and m are left absent
    #[must_use]
    pub fn new(x: f64, y: f64) -> Point {
        Point([x, y, f64::NAN, f64::NAN])
    }

    /// A 3D vertex; m is left absent
    #[must_use]
    pub fn xyz(x: f64, y: f64, z: f64) -> Point {
        Point([x, y, z, f64::NAN])
    }

    /// A full 4D vertex
    #[must_use]
    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Point {
        Point([x, y, z, m])
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.0[1]
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.0[2]
    }

    #[must_use]
    pub fn m(&self) -> f64 {
        self.0[3]
    }

    /// Cartesian distance in the xy-plane
    #[must_use]
    pub fn distance(&self, other: &Point) -> f64 {
        (other.x() - self.x()).hypot(other.y() - self.y())
    }

    /// Cartesian projection of a point `distance` away along `azimuth`
    /// (radians, clockwise from the y-axis). z and m are carried over.
    #[must_use]
    pub fn project(&self, distance: f64, azimuth: f64) -> Point {
        Point([
            self.x() + distance * azimuth.sin(),
            self.y() + distance * azimuth.cos(),
            self.z(),
            self.m(),
        ])
    }
}

/// An ordered vertex sequence. Rings reuse this type with the closing
/// segment implied: the last vertex need not repeat the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString(pub Vec<Point>);

impl LineString {
    #[must_use]
    pub fn new(points: Vec<Point>) -> LineString {
        LineString(points)
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the first vertex carries a z dimension
    #[must_use]
    pub fn is_3d(&self) -> bool {
        self.0.first().is_some_and(|p| !p.z().is_nan())
    }

    /// True when the first vertex carries an m dimension
    #[must_use]
    pub fn is_measure(&self) -> bool {
        self.0.first().is_some_and(|p| !p.m().is_nan())
    }

    /// Planar length of the open vertex chain
    #[must_use]
    pub fn length(&self) -> f64 {
        self.0.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }

    /// Planar length of the implicitly closed ring
    #[must_use]
    pub fn ring_length(&self) -> f64 {
        let n = self.0.len();
        if n < 2 {
            return 0.0;
        }
        (0..n).map(|i| self.0[i].distance(&self.0[(i + 1) % n])).sum()
    }
}

/// A surface delimited by one exterior ring, with holes cut out by
/// zero or more interior rings
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub exterior: LineString,
    pub interiors: Vec<LineString>,
}

impl Polygon {
    #[must_use]
    pub fn new(exterior: LineString, interiors: Vec<LineString>) -> Polygon {
        Polygon { exterior, interiors }
    }

    /// Planar area, holes subtracted
    #[must_use]
    pub fn area(&self) -> f64 {
        let outer = planar_ring_area(self.exterior.points());
        let inner: f64 = self.interiors.iter().map(|r| planar_ring_area(r.points())).sum();
        outer - inner
    }

    /// Planar perimeter: all ring lengths, exterior and interior
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        self.exterior.ring_length()
            + self.interiors.iter().map(LineString::ring_length).sum::<f64>()
    }
}

/// The tagged geometry variant the measurement dispatcher matches on
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    Polygon(Polygon),
    MultiLineString(Vec<LineString>),
    Collection(Vec<Geometry>),
}

impl Geometry {
    /// Topological dimension: 0 for points, 1 for lines, 2 for
    /// surfaces. A collection reports the largest dimension among its
    /// parts.
    #[must_use]
    pub fn dimension(&self) -> u8 {
        match self {
            Geometry::Point(_) => 0,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => 1,
            Geometry::Polygon(_) => 2,
            Geometry::Collection(parts) => {
                parts.iter().map(Geometry::dimension).max().unwrap_or(0)
            }
        }
    }

    /// Planar length. Surfaces contribute nothing; use
    /// [`Geometry::perimeter`] for ring lengths.
    #[must_use]
    pub fn length(&self) -> f64 {
        match self {
            Geometry::Point(_) | Geometry::Polygon(_) => 0.0,
            Geometry::LineString(line) => line.length(),
            Geometry::MultiLineString(lines) => lines.iter().map(LineString::length).sum(),
            Geometry::Collection(parts) => parts.iter().map(Geometry::length).sum(),
        }
    }

    /// Planar area, holes subtracted
    #[must_use]
    pub fn area(&self) -> f64 {
        match self {
            Geometry::Point(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => 0.0,
            Geometry::Polygon(polygon) => polygon.area(),
            Geometry::Collection(parts) => parts.iter().map(Geometry::area).sum(),
        }
    }

    /// Planar perimeter of the surface parts
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        match self {
            Geometry::Point(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => 0.0,
            Geometry::Polygon(polygon) => polygon.perimeter(),
            Geometry::Collection(parts) => parts.iter().map(Geometry::perimeter).sum(),
        }
    }
}

/// Shoelace formula with index wrap, so the ring closes on its first
/// vertex. All areas are positive.
#[must_use]
pub fn planar_ring_area(points: &[Point]) -> f64 {
    let size = points.len();
    if size < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..size {
        let j = (i + 1) % size;
        area += points[i].x() * points[j].y() - points[j].x() * points[i].y();
    }
    (area / 2.0).abs()
}

// ----- Tests ---------------------------------------------------------------------
