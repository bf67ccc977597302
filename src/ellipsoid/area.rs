//! Ellipsoidal polygon area via series expansion in the eccentricity,
//! following the GRASS formulation (G_begin_ellipsoid_polygon_area and
//! friends in area_poly1.c, with the Metz 2017 limit branch for edges
//! of near-equal latitude).

use std::f64::consts::{FRAC_PI_2, PI};

use crate::ellipsoid::Ellipsoid;

/// Threshold on the latitude step dy below which the midpoint limit
/// form replaces (Qbar₂ - Qbar₁)/dy. Should sit between 1e-4 and 1e-7;
/// see the discussion at <https://trac.osgeo.org/grass/ticket/3369>
pub const DY_THRESHOLD: f64 = 1e-6;

/// Precomputed series coefficients for ellipsoidal area integration.
/// Derived once per ellipsoid configuration; immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaCoefficients {
    qa: f64,
    qb: f64,
    qc: f64,
    qbar_a: f64,
    qbar_b: f64,
    qbar_c: f64,
    qbar_d: f64,
    /// a²(1 - e²)
    ae: f64,
    /// Q(π/2)
    qp: f64,
    /// Total surface area of the ellipsoid, |4π · Qp · AE|
    total: f64,
}

impl AreaCoefficients {
    #[must_use]
    pub fn new(ellipsoid: &Ellipsoid) -> AreaCoefficients {
        let a2 = ellipsoid.semimajor_axis() * ellipsoid.semimajor_axis();
        let e2 = ellipsoid.eccentricity_squared();
        let e4 = e2 * e2;
        let e6 = e4 * e2;

        let ae = a2 * (1.0 - e2);

        let qa = (2.0 / 3.0) * e2;
        let qb = (3.0 / 5.0) * e4;
        let qc = (4.0 / 7.0) * e6;

        let qbar_a = -1.0 - (2.0 / 3.0) * e2 - (3.0 / 5.0) * e4 - (4.0 / 7.0) * e6;
        let qbar_b = (2.0 / 9.0) * e2 + (2.0 / 5.0) * e4 + (4.0 / 7.0) * e6;
        let qbar_c = -(3.0 / 25.0) * e4 - (12.0 / 35.0) * e6;
        let qbar_d = (4.0 / 49.0) * e6;

        let mut coefficients = AreaCoefficients {
            qa,
            qb,
            qc,
            qbar_a,
            qbar_b,
            qbar_c,
            qbar_d,
            ae,
            qp: 0.0,
            total: 0.0,
        };
        coefficients.qp = coefficients.q(FRAC_PI_2);
        coefficients.total = (4.0 * PI * coefficients.qp * ae).abs();
        coefficients
    }

    fn q(&self, x: f64) -> f64 {
        let sinx = x.sin();
        let sinx2 = sinx * sinx;
        sinx * (1.0 + sinx2 * (self.qa + sinx2 * (self.qb + sinx2 * self.qc)))
    }

    fn qbar(&self, x: f64) -> f64 {
        let cosx = x.cos();
        let cosx2 = cosx * cosx;
        cosx * (self.qbar_a + cosx2 * (self.qbar_b + cosx2 * (self.qbar_c + cosx2 * self.qbar_d)))
    }

    /// Total surface area of the ellipsoid, m²
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.total
    }

    /// Area of a ring of (longitude, latitude) vertices in degrees,
    /// implicitly closed on its first vertex. Always non-negative.
    ///
    /// Each edge steps the shorter way around in longitude: jumps
    /// larger than π are unwrapped by adding 2π to the smaller side,
    /// which keeps polygons spanning the antimeridian coherent.
    #[must_use]
    pub fn ring_area(&self, points: &[(f64, f64)]) -> f64 {
        if points.is_empty() {
            return 0.0;
        }

        let two_pi = PI + PI;
        let n = points.len();
        let mut x2 = points[n - 1].0.to_radians();
        let mut y2 = points[n - 1].1.to_radians();
        let mut qbar2 = self.qbar(y2);

        let mut area = 0.0;
        for point in points {
            let mut x1 = x2;
            let y1 = y2;
            let qbar1 = qbar2;

            x2 = point.0.to_radians();
            y2 = point.1.to_radians();
            qbar2 = self.qbar(y2);

            if x1 > x2 {
                while x1 - x2 > PI {
                    x2 += two_pi;
                }
            } else if x2 > x1 {
                while x2 - x1 > PI {
                    x1 += two_pi;
                }
            }

            let dx = x2 - x1;
            let dy = y2 - y1;
            if dy.abs() > DY_THRESHOLD {
                // account for different latitudes y1, y2
                area += dx * (self.qp - (qbar2 - qbar1) / dy);
            } else {
                // y1 and y2 are (nearly) identical: as y2 -> y1 both
                // Qbar2 - Qbar1 and dy vanish, and their ratio
                // approaches Q((y1 + y2)/2)  (Metz 2017)
                area += dx * (self.qp - self.q((y1 + y2) / 2.0));
            }
        }

        area *= self.ae;
        if area < 0.0 {
            area = -area;
        }

        // If the ring winds around the opposite pole, the integral
        // above yields the complement of the enclosed region. Return
        // the smaller of the two complementary areas.
        if area > self.total {
            area = self.total;
        }
        if area > self.total / 2.0 {
            area = self.total - area;
        }

        area
    }
}

impl Ellipsoid {
    /// Precompute the area series coefficients for this ellipsoid
    #[must_use]
    pub fn area_coefficients(&self) -> AreaCoefficients {
        AreaCoefficients::new(self)
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn polar_cap() -> Result<(), Error> {
        let coefficients = Ellipsoid::named("WGS84")?.area_coefficients();

        // Square ring of latitude 85: every edge takes the dy -> 0
        // limit branch, and the four 90-degree steps integrate the
        // full polar cap
        let ring = [(0., 85.), (90., 85.), (180., 85.), (-90., 85.)];
        let area = coefficients.ring_area(&ring);
        assert!((area - 9.791_551_904_826e11).abs() < 1e3);

        // Within a fraction of a percent of the spherical cap formula
        let spherical = 2.0 * PI * 6_378_137.0_f64.powi(2) * (1.0 - 85_f64.to_radians().sin());
        assert!((area / spherical - 1.0).abs() < 0.01);
        Ok(())
    }

    #[test]
    fn opposite_pole_correction() -> Result<(), Error> {
        let coefficients = Ellipsoid::named("WGS84")?.area_coefficients();

        // The same ring around the south pole integrates, from the
        // formula's point of view, as everything north of it; the
        // correction flips it back to the small cap
        let north = coefficients.ring_area(&[(0., 85.), (90., 85.), (180., 85.), (-90., 85.)]);
        let south = coefficients.ring_area(&[(0., -85.), (90., -85.), (180., -85.), (-90., -85.)]);
        assert!((north - south).abs() < 1.0);

        // The band between the caps covers most of the ellipsoid, so
        // the correction returns its complement: exactly the two caps
        // it excludes. Their sum and the uncorrected band partition
        // the total surface area.
        let band = coefficients.ring_area(&[
            (-180., 85.),
            (-90., 85.),
            (0., 85.),
            (90., 85.),
            (180., 85.),
            (180., -85.),
            (90., -85.),
            (0., -85.),
            (-90., -85.),
            (-180., -85.),
        ]);
        assert!((band - (north + south)).abs() < 5.0);
        Ok(())
    }

    #[test]
    fn degenerate_rings() -> Result<(), Error> {
        let coefficients = Ellipsoid::named("WGS84")?.area_coefficients();
        assert_eq!(coefficients.ring_area(&[]), 0.0);
        assert_eq!(coefficients.ring_area(&[(10., 10.), (10., 10.), (10., 10.)]), 0.0);
        // Collinear points along a parallel enclose nothing
        let collinear = [(0., 30.), (1., 30.), (2., 30.)];
        assert!(coefficients.ring_area(&collinear).abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn positivity_and_antimeridian_span() -> Result<(), Error> {
        let coefficients = Ellipsoid::named("WGS84")?.area_coefficients();
        // A small quad straddling the antimeridian: the unwrapping
        // keeps it small rather than wrapping the long way round
        let quad = [(179., 10.), (-179., 10.), (-179., 11.), (179., 11.)];
        let area = coefficients.ring_area(&quad);
        assert!(area > 0.0);
        // Roughly 2 degrees by 1 degree at latitude 10.5
        let rough = 2.0 * 111_000.0 * 10.5_f64.to_radians().cos() * 111_000.0;
        assert!((area / rough - 1.0).abs() < 0.05);
        Ok(())
    }
}
