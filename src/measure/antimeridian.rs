//! Antimeridian handling: the latitude at which a geodesic crosses
//! ±180° longitude, and the splitting of line geometry at that
//! meridian.

use log::{trace, warn};

use crate::geodesic::GeodesicLine;
use crate::geometry::{Geometry, LineString, Point};
use crate::measure::Measurer;
use crate::Error;

/// Iteration cap for the crossing-latitude search
pub const CROSSING_ITERATIONS: usize = 100;

/// Convergence: the candidate longitude is within this many degrees
/// of 180 (about a millimetre on the ground)
pub const CROSSING_TOLERANCE: f64 = 1e-8;

// Above this window width (degrees of longitude) the search bisects;
// below it, secant steps close in quickly
const BISECTION_WINDOW: f64 = 5.0;

// Longitude jump between consecutive vertices that flags a crossing
const CROSSING_JUMP: f64 = 120.0;

// Consecutive geographic samples jumping across more than 240 degrees
// of longitude are taken to have crossed the antimeridian
pub(crate) fn crosses_antimeridian(previous_lon: f64, lon: f64) -> bool {
    (previous_lon < -CROSSING_JUMP && lon > CROSSING_JUMP)
        || (previous_lon > CROSSING_JUMP && lon < -CROSSING_JUMP)
}

impl Measurer {
    /// The latitude at which the geodesic from `pp1` to `pp2` (both
    /// geographic, degrees) crosses the antimeridian, and the
    /// fraction of the arc at which the crossing occurs.
    ///
    /// The search is hybrid: bisection narrows wide longitude windows
    /// (guaranteeing convergence), secant steps in longitude space
    /// polish the candidate. It stops at [`CROSSING_TOLERANCE`] or
    /// after [`CROSSING_ITERATIONS`], returning the best candidate so
    /// far. Never fails.
    #[must_use]
    pub fn latitude_geodesic_crosses_antimeridian(&self, pp1: &Point, pp2: &Point) -> (f64, f64) {
        let mut p1 = (pp1.x(), pp1.y());
        let mut p2 = (pp2.x(), pp2.y());

        // Represent the crossing as p1.lon < 180 < p2.lon
        if p1.0 < -120.0 {
            p1.0 += 360.0;
        }
        if p2.0 < -120.0 {
            p2.0 += 360.0;
        }
        let swapped = p1.0 >= 180.0;
        let (mut p1x, mut p1y, mut p2x, mut p2y) = if swapped {
            (p2.0, p2.1, p1.0, p1.1)
        } else {
            (p1.0, p1.1, p2.0, p2.1)
        };

        // lat/lon are the candidate intersection, to be driven as
        // close to longitude 180 as possible; the first candidate is p2
        let mut lat = p2y;
        let mut lon = p2x;

        let Some(ellipsoid) = self.ellipsoid() else {
            // planar: linear interpolation in longitude
            let fraction = (180.0 - p1x) / (p2x - p1x);
            let lat180 = p1y + fraction * (p2y - p1y);
            return (lat180, if swapped { 1.0 - fraction } else { fraction });
        };

        let mut line = GeodesicLine::between(&ellipsoid, (p1x, p1y), (p2x, p2y));
        let total_distance = line.s13();
        let mut intersection_distance = line.s13();

        let mut iterations = 0;
        while (lon - 180.0).abs() > CROSSING_TOLERANCE && iterations < CROSSING_ITERATIONS {
            if iterations > 0 && (p2x - p1x).abs() > BISECTION_WINDOW {
                // too wide a longitude range: bisect the window so the
                // search is guaranteed to converge
                if lon < 180.0 {
                    p1x = lon;
                    p1y = lat;
                } else {
                    p2x = lon;
                    p2y = lat;
                }
                trace!("narrowed window to {p1x}, {p1y} - {p2x}, {p2y}");
                line = GeodesicLine::between(&ellipsoid, (p1x, p1y), (p2x, p2y));
                intersection_distance = line.s13() * 0.5;
            } else {
                // sufficiently narrow window: scale the arc distance by
                // how close the previous candidate came to longitude 180
                intersection_distance *= (180.0 - p1x) / (lon - p1x);
            }

            // the point this far along the geodesic becomes the new
            // candidate for the antimeridian crossing
            let (sample_lon, sample_lat) = line.position(intersection_distance);
            lat = sample_lat;
            lon = sample_lon;
            // don't wrap longitudes > 180 around
            if lon < 0.0 {
                lon += 360.0;
            }

            iterations += 1;
            trace!(
                "after {iterations} iterations lon is {lon}, lat is {lat}, dist from p1: {intersection_distance}"
            );
        }

        let fraction = intersection_distance / total_distance;

        // either converged on longitude 180, or out of iterations
        (lat, if swapped { 1.0 - fraction } else { fraction })
    }

    /// Split line geometry at the antimeridian. Non-line geometry is
    /// returned unchanged; lines come back as a multi-linestring with
    /// a vertex on each side of ±180 at every crossing, in source
    /// coordinates. Z and m values are interpolated at the split.
    ///
    /// Curved inputs must be segmentized to straight chains first.
    /// A vertex that fails to transform logs a diagnostic; the
    /// affected part is emitted unsplit and no further parts are
    /// processed.
    #[must_use]
    pub fn split_geometry_at_antimeridian(&self, geometry: &Geometry) -> Geometry {
        let lines: Vec<&LineString> = match geometry {
            Geometry::LineString(line) => vec![line],
            Geometry::MultiLineString(lines) => lines.iter().collect(),
            // only line geometry gets split
            _ => return geometry.clone(),
        };

        let mut parts: Vec<LineString> = Vec::new();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            if let Err(err) = self.split_part(line, &mut parts) {
                warn!("unable to calculate break point: {err}");
                parts.push(line.clone());
                break;
            }
        }
        Geometry::MultiLineString(parts)
    }

    fn split_part(&self, line: &LineString, parts: &mut Vec<LineString>) -> Result<(), Error> {
        let mut new_points: Vec<Point> = Vec::with_capacity(line.points().len());
        let mut prev_lon = 0.0;
        let mut prev_lat = 0.0;
        let mut prev_z = 0.0;
        let mut prev_m = 0.0;

        for (i, vertex) in line.points().iter().enumerate() {
            let mut p = *vertex;
            if self.source_crs().is_geographic() {
                let mut x = p.x() % 360.0;
                if x > 180.0 {
                    x -= 360.0;
                }
                p = Point([x, p.y(), p.z(), p.m()]);
            }
            let (lon, lat) = self.source_crs().to_geographic(&p)?;

            // did this segment cross the antimeridian?
            if i > 0 && crosses_antimeridian(prev_lon, lon) {
                let (lat180, fraction) = self.latitude_geodesic_crosses_antimeridian(
                    &Point::new(prev_lon, prev_lat),
                    &Point::new(lon, lat),
                );
                // interpolated z/m at the crossing; absent dimensions
                // stay NaN through the lerp
                let z = prev_z + (p.z() - prev_z) * fraction;
                let m = prev_m + (p.m() - prev_m) * fraction;

                // close the current part on the outgoing side of ±180
                let boundary = if prev_lon < -120.0 { -180.0 } else { 180.0 };
                let am = self.source_crs().from_geographic(boundary, lat180)?;
                if am.x().is_finite() && am.y().is_finite() {
                    new_points.push(Point([am.x(), am.y(), z, m]));
                }
                parts.push(LineString::new(std::mem::take(&mut new_points)));
                new_points.reserve(line.points().len() - i + 1);

                // and reopen on the incoming side, reusing the z/m
                // computed above: they are the same on both sides of
                // the split
                let boundary = if lon < -120.0 { -180.0 } else { 180.0 };
                let am = self.source_crs().from_geographic(boundary, lat180)?;
                if am.x().is_finite() && am.y().is_finite() {
                    new_points.push(Point([am.x(), am.y(), z, m]));
                }
            }
            new_points.push(p);

            prev_lon = lon;
            prev_lat = lat;
            prev_z = p.z();
            prev_m = p.m();
        }
        parts.push(LineString::new(new_points));
        Ok(())
    }
}

// ----- Tests ---------------------------------------------------------------------
