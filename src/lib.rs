#![doc = include_str!("../README.md")]

pub mod crs;
pub mod ellipsoid;
pub mod geodesic;
pub mod geometry;
pub mod math;
pub mod measure;
pub mod units;

// The bread-and-butter
pub use crate::crs::Crs;
pub use crate::crs::Projection;
pub use crate::ellipsoid::AreaCoefficients;
pub use crate::ellipsoid::Ellipsoid;
pub use crate::geodesic::GeodesicLine;
pub use crate::geometry::Geometry;
pub use crate::geometry::LineString;
pub use crate::geometry::Point;
pub use crate::geometry::Polygon;
pub use crate::measure::MeasureType;
pub use crate::measure::Measurer;
pub use crate::units::AreaUnit;
pub use crate::units::LengthUnit;

/// The bread-and-butter, shrink-wrapped for external use
pub mod preamble {
    pub use crate::Crs;
    pub use crate::Ellipsoid;
    pub use crate::Error;
    pub use crate::Geometry;
    pub use crate::LineString;
    pub use crate::MeasureType;
    pub use crate::Measurer;
    pub use crate::Point;
    pub use crate::Polygon;
    pub use crate::Projection;
    pub use crate::units::AreaUnit;
    pub use crate::units::LengthUnit;
}

use thiserror::Error;
/// The crate-wide error messaging enumeration
#[derive(Error, Debug)]
pub enum Error {
    #[error("error: {0}")]
    General(&'static str),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("unknown ellipsoid: {0}")]
    UnknownEllipsoid(String),

    #[error("invalid ellipsoid axes: a = {a}, b = {b}")]
    InvalidAxes { a: f64, b: f64 },

    #[error("transform failed: {0}")]
    Transform(String),
}
