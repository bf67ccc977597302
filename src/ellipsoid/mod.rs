mod area;
mod constants;
mod latitudes;
mod vincenty;

pub use area::AreaCoefficients;
pub use area::DY_THRESHOLD;
pub use vincenty::GeodesicInverse;
pub use vincenty::DIRECT_TOLERANCE;
pub use vincenty::INVERSE_ITERATIONS;
pub use vincenty::INVERSE_TOLERANCE;
pub use vincenty::PROJECT_ITERATIONS;
pub use vincenty::PROJECT_MAX_LATITUDE;
pub use vincenty::PROJECT_TOLERANCE;

use crate::Error;

/// An ellipsoid of revolution. In general we assume that the ellipsoid
/// is oblate and biaxial; a sphere is represented by zero flattening,
/// following the EPSG convention of a zero reciprocal flattening.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7)
    }
}

/// Constructors
impl Ellipsoid {
    /// User defined ellipsoid
    #[must_use]
    pub fn new(semimajor_axis: f64, flattening: f64) -> Ellipsoid {
        Ellipsoid {
            a: semimajor_axis,
            f: flattening,
        }
    }

    /// Predefined ellipsoid: one of the built-in names, or a string
    /// formatted (a, rf) tuple, e.g. "6378137, 298.25"
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        // Is it one of the builtins?
        if let Some(&(_, a, rf)) = constants::ELLIPSOID_LIST
            .iter()
            .find(|ellps| ellps.0 == name)
        {
            // EPSG convention: zero reciprocal flattening indicates zero flattening
            let f = if rf != 0.0 { 1.0 / rf } else { rf };
            return Ok(Ellipsoid::new(a, f));
        }

        // Remove optional parenthesis
        let mut name = name;
        if name.starts_with('(') && name.ends_with(')') {
            name = name.strip_prefix('(').unwrap().strip_suffix(')').unwrap();
        }

        // The "semimajor, reciprocal-flattening" form, e.g. "6378137, 298.3"
        let a_and_rf = name.split(',').collect::<Vec<_>>();
        if a_and_rf.len() == 2_usize {
            if let Ok(a) = a_and_rf[0].trim().parse::<f64>() {
                if let Ok(rf) = a_and_rf[1].trim().parse::<f64>() {
                    let f = if rf != 0.0 { 1.0 / rf } else { rf };
                    return Ok(Ellipsoid::new(a, f));
                }
            }
        }

        Err(Error::UnknownEllipsoid(String::from(name)))
    }

    /// Ellipsoid from its two semiaxes. Fails unless `0 < b <= a`.
    /// A sphere (`a == b`) stores zero flattening; the reciprocal
    /// flattening `a/(a - b)` would be infinite and is never formed.
    pub fn from_axes(semimajor_axis: f64, semiminor_axis: f64) -> Result<Ellipsoid, Error> {
        let (a, b) = (semimajor_axis, semiminor_axis);
        if !a.is_finite() || !b.is_finite() || a <= 0.0 || b <= 0.0 || b > a {
            return Err(Error::InvalidAxes { a, b });
        }
        Ok(Ellipsoid::new(a, (a - b) / a))
    }
}

/// Size and shape
impl Ellipsoid {
    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// The semiminor axis, *b*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// The reciprocal flattening, *1/f = a/(a - b)*. Zero for a sphere,
    /// by the EPSG convention.
    #[must_use]
    pub fn inverse_flattening(&self) -> f64 {
        if self.f == 0.0 {
            return 0.0;
        }
        1.0 / self.f
    }

    /// The squared eccentricity *e² = (a² - b²) / a²*
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2_f64 - self.f)
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }
}

// ----- Tests ---------------------------------------------------------------------
