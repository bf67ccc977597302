//! The measurement dispatcher: walks a geometry, routes vertices
//! through the coordinate transform adapter, and sums kernel results.
//! With an ellipsoid configured, lengths come from Vincenty's inverse
//! problem and areas from the ellipsoidal series; without one, the
//! planar formulas of the geometry facade apply, in source units.

mod antimeridian;
mod densify;

pub use antimeridian::CROSSING_ITERATIONS;
pub use antimeridian::CROSSING_TOLERANCE;

use log::{trace, warn};

use crate::crs::Crs;
use crate::ellipsoid::{AreaCoefficients, Ellipsoid};
use crate::geodesic::GeodesicLine;
use crate::geometry::{Geometry, LineString, Point, Polygon};
use crate::units::{AreaUnit, LengthUnit};
use crate::Error;

/// Ellipsoid id sentinel disabling ellipsoidal measurement
pub const ELLIPSOID_NONE: &str = "NONE";

// Synthetic id prefix for ellipsoids configured from their axes
const PARAMETER_PREFIX: &str = "PARAMETER:";

/// What to measure on a geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureType {
    /// Derive from the geometry's dimension: length for lines, area
    /// for surfaces
    Default,
    Length,
    Area,
}

/// The measurement engine. Configure a source CRS and an ellipsoid,
/// then measure as often as needed; measurement calls never mutate
/// the configuration.
#[derive(Debug, Clone)]
pub struct Measurer {
    source_crs: Crs,
    ellipsoid_id: String,
    ellipsoid: Option<Ellipsoid>,
    area_coefficients: Option<AreaCoefficients>,
}

impl Default for Measurer {
    /// Geographic source coordinates, no ellipsoid: planar
    /// measurement in degrees
    fn default() -> Measurer {
        Measurer {
            source_crs: Crs::Geographic,
            ellipsoid_id: ELLIPSOID_NONE.to_string(),
            ellipsoid: None,
            area_coefficients: None,
        }
    }
}

// ----- C o n f i g u r a t i o n -----------------------------------------------------

impl Measurer {
    #[must_use]
    pub fn new() -> Measurer {
        Measurer::default()
    }

    /// The source CRS incoming geometry vertices are expressed in
    pub fn set_source_crs(&mut self, crs: Crs) {
        self.source_crs = crs;
    }

    #[must_use]
    pub fn source_crs(&self) -> &Crs {
        &self.source_crs
    }

    /// Configure the measurement ellipsoid by identifier: a catalog
    /// name, the sentinel [`ELLIPSOID_NONE`], or a synthetic
    /// `PARAMETER:<a>:<b>` id as produced by
    /// [`Measurer::set_ellipsoid_axes`] (resolved without consulting
    /// the catalog). On failure the configuration is left untouched.
    pub fn set_ellipsoid(&mut self, id: &str) -> Result<(), Error> {
        if id == ELLIPSOID_NONE {
            self.ellipsoid_id = ELLIPSOID_NONE.to_string();
            self.ellipsoid = None;
            self.area_coefficients = None;
            return Ok(());
        }

        if let Some(axes) = id.strip_prefix(PARAMETER_PREFIX) {
            let axes: Vec<&str> = axes.split(':').collect();
            if axes.len() == 2 {
                if let (Ok(a), Ok(b)) = (axes[0].parse::<f64>(), axes[1].parse::<f64>()) {
                    return self.set_ellipsoid_axes(a, b);
                }
            }
            return Err(Error::Syntax(format!("malformed parametric ellipsoid id: {id}")));
        }

        let ellipsoid = Ellipsoid::named(id)?;
        self.ellipsoid_id = id.to_string();
        self.apply_ellipsoid(ellipsoid);
        Ok(())
    }

    /// Configure the measurement ellipsoid from its semiaxes. The
    /// stored identifier is the synthetic `PARAMETER:<a>:<b>`.
    pub fn set_ellipsoid_axes(&mut self, semimajor: f64, semiminor: f64) -> Result<(), Error> {
        let ellipsoid = Ellipsoid::from_axes(semimajor, semiminor)?;
        self.ellipsoid_id = format!("{PARAMETER_PREFIX}{semimajor}:{semiminor}");
        self.apply_ellipsoid(ellipsoid);
        Ok(())
    }

    fn apply_ellipsoid(&mut self, ellipsoid: Ellipsoid) {
        self.area_coefficients = Some(ellipsoid.area_coefficients());
        self.ellipsoid = Some(ellipsoid);
    }

    /// True when an ellipsoid is configured and measurements are
    /// ellipsoidal
    #[must_use]
    pub fn will_use_ellipsoid(&self) -> bool {
        self.ellipsoid.is_some()
    }

    /// The configured ellipsoid identifier, [`ELLIPSOID_NONE`] when
    /// measurement is planar
    #[must_use]
    pub fn ellipsoid_id(&self) -> &str {
        &self.ellipsoid_id
    }

    #[must_use]
    pub fn ellipsoid(&self) -> Option<Ellipsoid> {
        self.ellipsoid
    }
}

// ----- M e a s u r e m e n t ---------------------------------------------------------

impl Measurer {
    /// Measure a geometry. Collections sum their parts; a length
    /// request on a surface (or an area request on a curve) yields 0.
    #[must_use]
    pub fn measure(&self, geometry: &Geometry, measure_type: MeasureType) -> f64 {
        let dimension = geometry.dimension();
        if dimension == 0 {
            return 0.0;
        }

        let resolved = match measure_type {
            MeasureType::Default => {
                if dimension == 1 {
                    MeasureType::Length
                } else {
                    MeasureType::Area
                }
            }
            other => other,
        };

        if !self.will_use_ellipsoid() {
            // no transform required
            return match resolved {
                MeasureType::Length => geometry.length(),
                _ => geometry.area(),
            };
        }

        match geometry {
            Geometry::Point(_) => 0.0,
            Geometry::Collection(parts) => {
                parts.iter().map(|part| self.measure(part, resolved)).sum()
            }
            Geometry::LineString(line) => match resolved {
                MeasureType::Length => self.measure_line(line.points()),
                _ => 0.0,
            },
            Geometry::MultiLineString(lines) => match resolved {
                MeasureType::Length => {
                    lines.iter().map(|line| self.measure_line(line.points())).sum()
                }
                _ => 0.0,
            },
            Geometry::Polygon(polygon) => match resolved {
                MeasureType::Area => {
                    let outer = self.measure_polygon(polygon.exterior.points());
                    let inner: f64 = polygon
                        .interiors
                        .iter()
                        .map(|ring| self.measure_polygon(ring.points()))
                        .sum();
                    outer - inner
                }
                _ => 0.0,
            },
        }
    }

    /// Length of a curve geometry
    #[must_use]
    pub fn measure_length(&self, geometry: &Geometry) -> f64 {
        self.measure(geometry, MeasureType::Length)
    }

    /// Area of a surface geometry, holes subtracted
    #[must_use]
    pub fn measure_area(&self, geometry: &Geometry) -> f64 {
        self.measure(geometry, MeasureType::Area)
    }

    /// Perimeter of a surface geometry: the lengths of all its rings,
    /// exterior and interior
    #[must_use]
    pub fn measure_perimeter(&self, geometry: &Geometry) -> f64 {
        if geometry.dimension() < 2 {
            return 0.0;
        }
        if !self.will_use_ellipsoid() {
            return geometry.perimeter();
        }

        let mut surfaces = Vec::new();
        collect_surfaces(geometry, &mut surfaces);

        let mut length = 0.0;
        for polygon in surfaces {
            length += self.ring_line_length(&polygon.exterior);
            for ring in &polygon.interiors {
                length += self.ring_line_length(ring);
            }
        }
        length
    }

    /// Length of a vertex chain. A failed vertex transform aborts the
    /// whole chain with a zero result and a logged diagnostic.
    #[must_use]
    pub fn measure_line(&self, points: &[Point]) -> f64 {
        if points.len() < 2 {
            return 0.0;
        }

        let Some(ellipsoid) = self.ellipsoid else {
            return points.windows(2).map(|pair| pair[0].distance(&pair[1])).sum();
        };

        let mut total = 0.0;
        let mut previous: Option<(f64, f64)> = None;
        for point in points {
            let geographic = match self.source_crs.to_geographic(point) {
                Ok(geographic) => geographic,
                Err(err) => {
                    warn!("unable to calculate line length: {err}");
                    return 0.0;
                }
            };
            if let Some(previous) = previous {
                total += self.ellipsoidal_distance(&ellipsoid, previous, geographic);
            }
            previous = Some(geographic);
        }
        total
    }

    /// Distance between two source-CRS points
    #[must_use]
    pub fn measure_line_segment(&self, p1: &Point, p2: &Point) -> f64 {
        self.measure_line(&[*p1, *p2])
    }

    /// Area of a single ring of source-CRS vertices, implicitly
    /// closed. A failed vertex transform yields zero with a logged
    /// diagnostic.
    #[must_use]
    pub fn measure_polygon(&self, points: &[Point]) -> f64 {
        match &self.area_coefficients {
            Some(coefficients) => {
                let mut ring = Vec::with_capacity(points.len());
                for point in points {
                    match self.source_crs.to_geographic(point) {
                        Ok(geographic) => ring.push(geographic),
                        Err(err) => {
                            warn!("unable to calculate polygon area: {err}");
                            return 0.0;
                        }
                    }
                }
                coefficients.ring_area(&ring)
            }
            None => crate::geometry::planar_ring_area(points),
        }
    }

    /// Forward azimuth from `p1` to `p2` in radians. Transform
    /// failures propagate; this is a point query, not a summation
    /// with parts to salvage.
    pub fn bearing(&self, p1: &Point, p2: &Point) -> Result<f64, Error> {
        let Some(ellipsoid) = self.ellipsoid else {
            let dx = p2.x() - p1.x();
            let dy = p2.y() - p1.y();
            return Ok(dx.atan2(dy));
        };

        let g1 = self.source_crs.to_geographic(p1)?;
        let g2 = self.source_crs.to_geographic(p2)?;
        match ellipsoid.vincenty_inverse(g1, g2) {
            Some(inverse) => Ok(inverse.course1),
            None => {
                trace!("vincenty did not converge for bearing, using geodesic azimuth");
                Ok(GeodesicLine::between(&ellipsoid, g1, g2).azimuth1().to_radians())
            }
        }
    }

    /// Destination point a distance (metres) and bearing (degrees)
    /// away from `p`. Ellipsoidal when configured, planar otherwise.
    /// Operates on source coordinates directly; geographic sources
    /// expected for the ellipsoidal path.
    #[must_use]
    pub fn destination(&self, p: &Point, distance: f64, bearing_deg: f64) -> Point {
        match self.ellipsoid {
            Some(ellipsoid) => {
                let (lon, lat) = ellipsoid.destination((p.x(), p.y()), distance, bearing_deg);
                Point::new(lon, lat)
            }
            None => p.project(distance, bearing_deg.to_radians()),
        }
    }

    /// Project `p1` by `distance` metres along `azimuth` (radians)
    /// and report the projected point together with the resulting
    /// measurement in source units.
    #[must_use]
    pub fn measure_line_projected(&self, p1: &Point, distance: f64, azimuth: f64) -> (f64, Point) {
        if self.source_crs.is_geographic() {
            if let Some(ellipsoid) = self.ellipsoid {
                let (lon, lat) = ellipsoid.spheroid_project((p1.x(), p1.y()), distance, azimuth);
                let p2 = Point::new(lon, lat);
                return (p1.distance(&p2), p2);
            }
        }

        // Cartesian: convert the metre distance to map units first,
        // then project
        let map_units = self.source_crs.map_units();
        if map_units == LengthUnit::Meters {
            // return the distance as sent, avoiding roundtrip noise
            let p2 = p1.project(distance, azimuth);
            return (distance, p2);
        }
        let map_distance = distance * LengthUnit::Meters.factor_to(map_units);
        let p2 = p1.project(map_distance, azimuth);
        (p1.distance(&p2), p2)
    }

    // Vincenty where it converges, the Karney line where it does not
    fn ellipsoidal_distance(&self, ellipsoid: &Ellipsoid, from: (f64, f64), to: (f64, f64)) -> f64 {
        match ellipsoid.vincenty_inverse(from, to) {
            Some(inverse) => inverse.distance,
            None => {
                trace!("vincenty did not converge between {from:?} and {to:?}, using geodesic line");
                GeodesicLine::between(ellipsoid, from, to).s13()
            }
        }
    }

    // Ring length: the vertex chain with the implicit closing segment
    fn ring_line_length(&self, ring: &LineString) -> f64 {
        if ring.is_empty() {
            return 0.0;
        }
        let points = ring.points();
        let first = points[0];
        let last = points[points.len() - 1];
        let mut length = self.measure_line(points);
        if (first.x(), first.y()) != (last.x(), last.y()) {
            length += self.measure_line(&[last, first]);
        }
        length
    }
}

// ----- U n i t s ---------------------------------------------------------------------

impl Measurer {
    /// The unit of lengths reported by this engine: metres when an
    /// ellipsoid is configured, the source CRS unit otherwise
    #[must_use]
    pub fn length_units(&self) -> LengthUnit {
        if self.will_use_ellipsoid() {
            LengthUnit::Meters
        } else {
            self.source_crs.map_units()
        }
    }

    /// The unit of areas reported by this engine
    #[must_use]
    pub fn area_units(&self) -> AreaUnit {
        if self.will_use_ellipsoid() {
            AreaUnit::SquareMeters
        } else {
            self.source_crs.map_units().area_unit()
        }
    }

    /// Convert a length measured by this engine to another unit
    #[must_use]
    pub fn convert_length_measurement(&self, length: f64, to: LengthUnit) -> f64 {
        length * self.length_units().factor_to(to)
    }

    /// Convert an area measured by this engine to another unit
    #[must_use]
    pub fn convert_area_measurement(&self, area: f64, to: AreaUnit) -> f64 {
        area * self.area_units().factor_to(to)
    }
}

fn collect_surfaces<'a>(geometry: &'a Geometry, surfaces: &mut Vec<&'a Polygon>) {
    match geometry {
        Geometry::Polygon(polygon) => surfaces.push(polygon),
        Geometry::Collection(parts) => {
            for part in parts {
                collect_surfaces(part, surfaces);
            }
        }
        _ => {}
    }
}

// ----- Tests ---------------------------------------------------------------------
