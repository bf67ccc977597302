//! Arc-length parameterized positions along a geodesic, backed by the
//! Karney algorithms in `geographiclib-rs`. Unlike the Vincenty
//! iteration, these converge everywhere, including the near-antipodal
//! cases, with millimetre accuracy over any distance.

use geographiclib_rs::{DirectGeodesic, Geodesic, InverseGeodesic};

use crate::ellipsoid::Ellipsoid;

/// A geodesic through two points, ready to be sampled at any arc
/// length from its origin
#[derive(Debug, Clone)]
pub struct GeodesicLine {
    geodesic: Geodesic,
    lat1: f64,
    lon1: f64,
    azi1: f64,
    s13: f64,
}

impl GeodesicLine {
    /// Solve the inverse problem from `p1` to `p2` (both as
    /// (longitude, latitude) in degrees) and keep the resulting line
    pub fn between(ellipsoid: &Ellipsoid, p1: (f64, f64), p2: (f64, f64)) -> GeodesicLine {
        let geodesic = Geodesic::new(ellipsoid.semimajor_axis(), ellipsoid.flattening());
        let (s12, azi1, _azi2, _a12): (f64, f64, f64, f64) =
            geodesic.inverse(p1.1, p1.0, p2.1, p2.0);
        GeodesicLine {
            geodesic,
            lat1: p1.1,
            lon1: p1.0,
            azi1,
            s13: s12,
        }
    }

    /// Arc length from the origin to the second point, metres
    #[must_use]
    pub fn s13(&self) -> f64 {
        self.s13
    }

    /// Forward azimuth at the origin, degrees
    #[must_use]
    pub fn azimuth1(&self) -> f64 {
        self.azi1
    }

    /// The point `distance` metres along the line from its origin,
    /// as (longitude, latitude) in degrees. Longitude is reported in
    /// (-180, 180]; distances beyond `s13` extrapolate past the
    /// second point.
    #[must_use]
    pub fn position(&self, distance: f64) -> (f64, f64) {
        let (lat, lon): (f64, f64) = self
            .geodesic
            .direct(self.lat1, self.lon1, self.azi1, distance);
        (lon, lat)
    }
}

// ----- Tests ---------------------------------------------------------------------
