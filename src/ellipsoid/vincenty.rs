//! Vincenty's solutions to the geodesic inverse and direct problems
//! ([Vincenty 1975](https://en.wikipedia.org/wiki/Vincenty%27s_formulae)).
//! Simple to implement and fast, but the inverse iteration does not
//! converge for near-antipodal pairs; callers needing convergence
//! everywhere should use [`crate::geodesic::GeodesicLine`], which is
//! exact to machine precision (Karney 2013).

use std::f64::consts::PI;

use crate::ellipsoid::Ellipsoid;
use crate::math::normalize_positive;

/// Iteration cap for the inverse problem. Enough for anything but
/// near-antipodal pairs, which oscillate and never converge.
pub const INVERSE_ITERATIONS: i32 = 20;

/// Convergence threshold on λ for the inverse problem, radians
pub const INVERSE_TOLERANCE: f64 = 1e-12;

/// Convergence threshold on σ for [`Ellipsoid::destination`], radians
pub const DIRECT_TOLERANCE: f64 = 1e-12;

/// Iteration cap for [`Ellipsoid::spheroid_project`]
pub const PROJECT_ITERATIONS: i32 = 999;

/// Relative convergence threshold on σ for [`Ellipsoid::spheroid_project`]
pub const PROJECT_TOLERANCE: f64 = 1e-9;

/// Latitude band outside which [`Ellipsoid::spheroid_project`] refuses
/// to iterate, degrees
pub const PROJECT_MAX_LATITUDE: f64 = 85.05115;

// Two coordinates closer than this (in degrees) are the same point
const COINCIDENT: f64 = 4.0 * f64::EPSILON;

/// Solution of the geodesic inverse problem
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodesicInverse {
    /// Geodesic distance in metres
    pub distance: f64,
    /// Forward azimuth at the first point, radians
    pub course1: f64,
    /// Azimuth *from the second point back to the first*, radians
    /// (the forward azimuth at the second point, plus π)
    pub course2: f64,
}

impl Ellipsoid {
    /// Distance and bearings between two geographic points, given as
    /// (longitude, latitude) in degrees.
    ///
    /// Returns `None` when the λ iteration exhausts
    /// [`INVERSE_ITERATIONS`] without converging, which happens for
    /// near-antipodal pairs.
    #[allow(clippy::many_single_char_names)]
    pub fn vincenty_inverse(&self, p1: (f64, f64), p2: (f64, f64)) -> Option<GeodesicInverse> {
        if (p1.0 - p2.0).abs() <= COINCIDENT && (p1.1 - p2.1).abs() <= COINCIDENT {
            return Some(GeodesicInverse {
                distance: 0.0,
                course1: 0.0,
                course2: PI,
            });
        }

        let a = self.semimajor_axis();
        let b = self.semiminor_axis();
        let f = self.flattening();

        let p1_lat = p1.1.to_radians();
        let p1_lon = p1.0.to_radians();
        let p2_lat = p2.1.to_radians();
        let p2_lon = p2.0.to_radians();

        let l = p2_lon - p1_lon;
        let u1 = self.reduced_latitude(p1_lat, true);
        let u2 = self.reduced_latitude(p2_lat, true);
        let (sin_u1, cos_u1) = u1.sin_cos();
        let (sin_u2, cos_u2) = u2.sin_cos();
        let mut lambda = l;
        let mut lambda_p = 2.0 * PI;

        let mut sin_lambda = 0.0;
        let mut cos_lambda = 0.0;
        let mut sin_sigma = 0.0;
        let mut cos_sigma = 0.0;
        let mut sigma = 0.0;
        let mut cos_sq_alpha = 0.0;
        let mut cos_2sigma_m = 0.0;
        let mut tu1 = 0.0;
        let mut tu2 = 0.0;

        let mut iter_limit = INVERSE_ITERATIONS;
        while (lambda - lambda_p).abs() > INVERSE_TOLERANCE {
            iter_limit -= 1;
            if iter_limit <= 0 {
                // the formula failed to converge
                return None;
            }

            sin_lambda = lambda.sin();
            cos_lambda = lambda.cos();
            tu1 = cos_u2 * sin_lambda;
            tu2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
            sin_sigma = (tu1 * tu1 + tu2 * tu2).sqrt();
            cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
            sigma = sin_sigma.atan2(cos_sigma);
            let alpha = (cos_u1 * cos_u2 * sin_lambda / sin_sigma).asin();
            cos_sq_alpha = alpha.cos() * alpha.cos();
            cos_2sigma_m = cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha;
            let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
            lambda_p = lambda;
            lambda = l
                + (1.0 - c)
                    * f
                    * alpha.sin()
                    * (sigma
                        + c * sin_sigma
                            * (cos_2sigma_m
                                + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
        }

        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        let delta_sigma = big_b
            * sin_sigma
            * (cos_2sigma_m
                + big_b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                        - big_b / 6.0
                            * cos_2sigma_m
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));
        let distance = b * big_a * (sigma - delta_sigma);

        let course1 = tu1.atan2(tu2);
        // π is added to return the azimuth from p2 back to p1
        let course2 =
            (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda) + PI;

        Some(GeodesicInverse {
            distance,
            course1,
            course2,
        })
    }

    /// Destination point a given distance (metres) and bearing
    /// (degrees, clockwise from north) away from `p`, given as
    /// (longitude, latitude) in degrees.
    ///
    /// The σ iteration runs uncapped to [`DIRECT_TOLERANCE`]. The
    /// returned longitude may fall outside (-180, 180]; normalize if
    /// needed.
    #[must_use]
    #[allow(clippy::many_single_char_names)]
    pub fn destination(&self, p: (f64, f64), distance: f64, bearing_deg: f64) -> (f64, f64) {
        let a = self.semimajor_axis();
        let b = self.semiminor_axis();
        let f = self.flattening();

        let (lon1, lat1) = p;
        let alpha1 = bearing_deg.to_radians();
        let (sin_alpha1, cos_alpha1) = alpha1.sin_cos();

        let u1 = self.reduced_latitude(lat1.to_radians(), true);
        let (sin_u1, cos_u1) = u1.sin_cos();
        let sigma1 = u1.tan().atan2(cos_alpha1);
        let sin_alpha = cos_u1 * sin_alpha1;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
        let big_a =
            1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));

        let mut sigma = distance / (b * big_a);
        let mut sigma_p = 2.0 * PI;
        while (sigma - sigma_p).abs() > DIRECT_TOLERANCE {
            let cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
            let sin_sigma = sigma.sin();
            let cos_sigma = sigma.cos();
            let delta_sigma = big_b
                * sin_sigma
                * (cos_2sigma_m
                    + 0.25
                        * big_b
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                            - big_b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                                * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));
            sigma_p = sigma;
            sigma = distance / (b * big_a) + delta_sigma;
        }

        let sin_sigma = sigma.sin();
        let cos_sigma = sigma.cos();
        let cos_2sigma_m = (2.0 * sigma1 + sigma).cos();
        let tmp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
        let lat2 = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
            .atan2((1.0 - f) * (sin_alpha * sin_alpha + tmp * tmp).sqrt());
        let lambda =
            (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let l = lambda
            - (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        (lon1 + l.to_degrees(), lat2.to_degrees())
    }

    /// Destination point computed with the rttopo variant of the
    /// direct problem: azimuth in radians (normalized to [0, 2π)),
    /// relative convergence threshold, hard iteration cap.
    ///
    /// Returns the neutral point (0, 0) for input outside
    /// |lon| ≤ 180, |lat| ≤ [`PROJECT_MAX_LATITUDE`], where the
    /// iteration becomes unstable and can return invalid results.
    #[must_use]
    #[allow(clippy::many_single_char_names)]
    pub fn spheroid_project(&self, p: (f64, f64), distance: f64, azimuth: f64) -> (f64, f64) {
        if p.0 < -180.0
            || p.0 > 180.0
            || p.1 < -PROJECT_MAX_LATITUDE
            || p.1 > PROJECT_MAX_LATITUDE
        {
            return (0.0, 0.0);
        }

        let a = self.semimajor_axis();
        let b = self.semiminor_axis();
        let f = self.flattening();
        let b2 = b * b;
        let omf = 1.0 - f;

        let radians_lat = p.1.to_radians();
        let radians_long = p.0.to_radians();

        let u1 = self.reduced_latitude(radians_lat, true);

        let azimuth = normalize_positive(azimuth);

        let sigma1 = u1.tan().atan2(azimuth.cos());
        let sin_alpha = u1.cos() * azimuth.sin();
        let alpha = sin_alpha.asin();
        let cos_alphasq = 1.0 - sin_alpha * sin_alpha;
        let u2 = alpha.cos().powi(2) * (a * a - b2) / b2;
        let big_a = 1.0 + (u2 / 16384.0) * (4096.0 + u2 * (-768.0 + u2 * (320.0 - 175.0 * u2)));
        let big_b = (u2 / 1024.0) * (256.0 + u2 * (-128.0 + u2 * (74.0 - 47.0 * u2)));

        let mut sigma = distance / (b * big_a);
        let mut two_sigma_m = 2.0 * sigma1 + sigma;
        let mut i = 0;
        while i < PROJECT_ITERATIONS {
            let delta_sigma = big_b
                * sigma.sin()
                * (two_sigma_m.cos()
                    + (big_b / 4.0)
                        * (sigma.cos()
                            * (-1.0 + 2.0 * two_sigma_m.cos().powi(2)
                                - (big_b / 6.0)
                                    * two_sigma_m.cos()
                                    * (-3.0 + 4.0 * sigma.sin().powi(2))
                                    * (-3.0 + 4.0 * two_sigma_m.cos().powi(2)))));
            let last_sigma = sigma;
            sigma = distance / (b * big_a) + delta_sigma;
            i += 1;
            if ((last_sigma - sigma) / sigma).abs() <= PROJECT_TOLERANCE {
                break;
            }
            two_sigma_m = 2.0 * sigma1 + sigma;
        }

        let lat2 = (u1.sin() * sigma.cos() + u1.cos() * sigma.sin() * azimuth.cos()).atan2(
            omf * (sin_alpha.powi(2)
                + (u1.sin() * sigma.sin() - u1.cos() * sigma.cos() * azimuth.cos()).powi(2))
            .sqrt(),
        );
        let lambda = (sigma.sin() * azimuth.sin())
            .atan2(u1.cos() * sigma.cos() - u1.sin() * sigma.sin() * azimuth.cos());
        let c = (f / 16.0) * cos_alphasq * (4.0 + f * (4.0 - 3.0 * cos_alphasq));
        let omega = lambda
            - (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sigma.sin()
                        * (two_sigma_m.cos()
                            + c * sigma.cos() * (-1.0 + 2.0 * two_sigma_m.cos().powi(2))));
        let lambda2 = radians_long + omega;

        (lambda2.to_degrees(), lat2.to_degrees())
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::normalize_positive;
    use crate::Error;

    #[test]
    fn inverse() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;

        // Copenhagen (Denmark)--Paris (France)
        // Expected values from Karney: https://geographiclib.sourceforge.io/cgi-bin/GeodSolve
        // Distance good to 0.1 mm, azimuths to better than a nanodegree
        let copenhagen = (12., 55.);
        let paris = (2., 49.);

        let d = ellps.vincenty_inverse(copenhagen, paris).unwrap();
        assert!((d.distance - 956_066.231_959).abs() < 1e-4);
        assert!((d.course1.to_degrees() - (-130.154_060_420_72)).abs() < 1e-8);
        // course2 is the azimuth from Paris back towards Copenhagen:
        // Karney's forward azimuth at Paris, -138.052..., plus 180
        assert!((d.course2.to_degrees() - 41.947_420_581_26).abs() < 1e-8);
        Ok(())
    }

    #[test]
    fn quarter_meridian() -> Result<(), Error> {
        let ellps = Ellipsoid::named("WGS84")?;
        let d = ellps.vincenty_inverse((0., 0.), (0., 90.)).unwrap();
        assert!((d.distance - 10_001_965.729).abs() < 1e-3);
        assert!(d.course1.abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn symmetry_and_pairing() -> Result<(), Error> {
        let ellps = Ellipsoid::named("WGS84")?;
        let p1 = (12., 55.);
        let p2 = (7., 34.);

        let fwd = ellps.vincenty_inverse(p1, p2).unwrap();
        let rev = ellps.vincenty_inverse(p2, p1).unwrap();
        assert!((fwd.distance - rev.distance).abs() < 1e-6);

        // fwd.course2 and rev.course1 both describe the azimuth from
        // p2 towards p1
        let paired = normalize_positive(fwd.course2);
        let reversed = normalize_positive(rev.course1);
        assert!((paired - reversed).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn near_antipodal_failure() -> Result<(), Error> {
        let ellps = Ellipsoid::named("WGS84")?;
        // Near-antipodal equatorial pair: λ oscillates, no convergence
        assert!(ellps.vincenty_inverse((0., 0.), (179.9, 0.)).is_none());
        Ok(())
    }

    #[test]
    fn coincident_points() -> Result<(), Error> {
        let ellps = Ellipsoid::named("WGS84")?;
        let d = ellps.vincenty_inverse((12., 55.), (12., 55.)).unwrap();
        assert_eq!(d.distance, 0.0);
        Ok(())
    }

    #[test]
    fn direct_inverse_roundtrip() -> Result<(), Error> {
        let ellps = Ellipsoid::named("WGS84")?;
        let p1 = (10., 45.);

        let p2 = ellps.destination(p1, 100_000.0, 90.0);
        let back = ellps.vincenty_inverse(p1, p2).unwrap();
        assert!((back.distance - 100_000.0).abs() < 1e-3);
        assert!((back.course1.to_degrees() - 90.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn spheroid_project_agrees_with_destination() -> Result<(), Error> {
        let ellps = Ellipsoid::named("WGS84")?;
        let p1 = (10., 45.);

        let d1 = ellps.destination(p1, 250_000.0, 30.0);
        let d2 = ellps.spheroid_project(p1, 250_000.0, 30_f64.to_radians());
        assert!((d1.0 - d2.0).abs() < 1e-8);
        assert!((d1.1 - d2.1).abs() < 1e-8);

        // A negative azimuth is normalized into [0, 2π)
        let d3 = ellps.spheroid_project(p1, 250_000.0, (30_f64 - 360.).to_radians());
        assert!((d1.0 - d3.0).abs() < 1e-8);
        Ok(())
    }

    #[test]
    fn spheroid_project_domain_guard() -> Result<(), Error> {
        let ellps = Ellipsoid::named("WGS84")?;
        assert_eq!(ellps.spheroid_project((0., 86.), 1000.0, 0.0), (0.0, 0.0));
        assert_eq!(ellps.spheroid_project((181., 0.), 1000.0, 0.0), (0.0, 0.0));
        Ok(())
    }
}
