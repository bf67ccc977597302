//! The coordinate transform adapter: a narrow seam between source
//! coordinates and the geographic coordinates the ellipsoidal kernels
//! want. Geographic sources pass through unchanged; projected sources
//! carry a projection that is applied inversely on the way in and
//! forward on the way out. Failures surface as [`Error::Transform`],
//! never as panics.

use crate::ellipsoid::Ellipsoid;
use crate::geometry::Point;
use crate::units::LengthUnit;
use crate::Error;

/// A map projection, pairing the projected plane with the geographic
/// coordinates of its datum
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Ellipsoidal Mercator: x = a·k₀·(λ - λ₀), y = a·k₀·ψ(φ), with ψ
    /// the isometric latitude
    Mercator {
        ellipsoid: Ellipsoid,
        k_0: f64,
        /// Central meridian, degrees
        lon_0: f64,
        x_0: f64,
        y_0: f64,
    },
}

impl Projection {
    /// A plain Mercator on the given ellipsoid: unit scale, Greenwich
    /// central meridian, no false origin
    #[must_use]
    pub fn mercator(ellipsoid: Ellipsoid) -> Projection {
        Projection::Mercator {
            ellipsoid,
            k_0: 1.0,
            lon_0: 0.0,
            x_0: 0.0,
            y_0: 0.0,
        }
    }

    /// Geographic (degrees) to projected coordinates
    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), Error> {
        match *self {
            Projection::Mercator {
                ellipsoid,
                k_0,
                lon_0,
                x_0,
                y_0,
            } => {
                // The isometric latitude blows up towards the poles
                if !lat.is_finite() || !lon.is_finite() || lat.abs() >= 90.0 {
                    return Err(Error::Transform(format!(
                        "mercator is undefined at ({lon}, {lat})"
                    )));
                }
                let a = ellipsoid.semimajor_axis();
                let x = (lon - lon_0).to_radians() * k_0 * a - x_0;
                let y = a * k_0 * ellipsoid.isometric_latitude(lat.to_radians(), true) - y_0;
                Ok((x, y))
            }
        }
    }

    /// Projected coordinates to geographic (degrees)
    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), Error> {
        match *self {
            Projection::Mercator {
                ellipsoid,
                k_0,
                lon_0,
                x_0,
                y_0,
            } => {
                let a = ellipsoid.semimajor_axis();
                let lon = ((x + x_0) / (a * k_0)).to_degrees() + lon_0;
                let psi = (y + y_0) / (a * k_0);
                let lat = ellipsoid.isometric_latitude(psi, false).to_degrees();
                if !lon.is_finite() || !lat.is_finite() {
                    return Err(Error::Transform(format!(
                        "mercator inverse is undefined at ({x}, {y})"
                    )));
                }
                Ok((lon, lat))
            }
        }
    }
}

/// The source coordinate reference system of incoming geometries
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Crs {
    /// Longitude/latitude degrees, taken to be in the measurement
    /// ellipsoid's datum
    #[default]
    Geographic,
    /// A projected plane with its linear unit
    Projected {
        projection: Projection,
        units: LengthUnit,
    },
}

impl Crs {
    /// A projected CRS from a projection and its linear unit
    #[must_use]
    pub fn projected(projection: Projection, units: LengthUnit) -> Crs {
        Crs::Projected { projection, units }
    }

    #[must_use]
    pub fn is_geographic(&self) -> bool {
        matches!(self, Crs::Geographic)
    }

    /// The native linear unit of coordinates in this CRS
    #[must_use]
    pub fn map_units(&self) -> LengthUnit {
        match self {
            Crs::Geographic => LengthUnit::Degrees,
            Crs::Projected { units, .. } => *units,
        }
    }

    /// Project a source-CRS point to geographic (longitude, latitude)
    /// degrees
    pub fn to_geographic(&self, point: &Point) -> Result<(f64, f64), Error> {
        if !point.x().is_finite() || !point.y().is_finite() {
            return Err(Error::Transform(format!(
                "non-finite source coordinate ({}, {})",
                point.x(),
                point.y()
            )));
        }
        match self {
            Crs::Geographic => Ok((point.x(), point.y())),
            Crs::Projected { projection, .. } => projection.inverse(point.x(), point.y()),
        }
    }

    /// Take geographic (longitude, latitude) degrees back to a
    /// source-CRS point. Used when constructed vertices, such as
    /// antimeridian intersections, are inserted into source geometry.
    pub fn from_geographic(&self, lon: f64, lat: f64) -> Result<Point, Error> {
        match self {
            Crs::Geographic => Ok(Point::new(lon, lat)),
            Crs::Projected { projection, .. } => {
                let (x, y) = projection.forward(lon, lat)?;
                Ok(Point::new(x, y))
            }
        }
    }
}

// ----- Tests ---------------------------------------------------------------------
