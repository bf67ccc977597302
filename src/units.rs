//! Linear and areal units of measure, and the conversion factors
//! between them. The measurement engine reports metres and square
//! metres whenever an ellipsoid is configured, and the source CRS
//! units otherwise; callers convert with [`LengthUnit::factor_to`]
//! and [`AreaUnit::factor_to`].

/// Degree-to-metre factor at the equator. Only a rough equivalence:
/// a degree of longitude shrinks towards the poles.
pub const DEGREE_TO_METER: f64 = 111_319.490_793_273_58;

/// Units of linear measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Meters,
    Kilometers,
    Feet,
    NauticalMiles,
    Yards,
    Miles,
    Degrees,
    Centimeters,
    Millimeters,
    Unknown,
}

impl LengthUnit {
    /// The number of metres in one of `self`
    #[must_use]
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            LengthUnit::Meters => 1.0,
            LengthUnit::Kilometers => 1000.0,
            LengthUnit::Feet => 0.3048,
            LengthUnit::NauticalMiles => 1852.0,
            LengthUnit::Yards => 0.9144,
            LengthUnit::Miles => 1609.344,
            LengthUnit::Degrees => DEGREE_TO_METER,
            LengthUnit::Centimeters => 0.01,
            LengthUnit::Millimeters => 0.001,
            LengthUnit::Unknown => 1.0,
        }
    }

    /// Multiplicative factor taking a measurement in `self` to one in `to`.
    /// Conversions involving [`LengthUnit::Unknown`] are identities.
    #[must_use]
    pub fn factor_to(&self, to: LengthUnit) -> f64 {
        if *self == LengthUnit::Unknown || to == LengthUnit::Unknown {
            return 1.0;
        }
        self.meters_per_unit() / to.meters_per_unit()
    }

    /// The areal unit corresponding to this linear unit
    #[must_use]
    pub fn area_unit(&self) -> AreaUnit {
        match self {
            LengthUnit::Meters => AreaUnit::SquareMeters,
            LengthUnit::Kilometers => AreaUnit::SquareKilometers,
            LengthUnit::Feet => AreaUnit::SquareFeet,
            LengthUnit::NauticalMiles => AreaUnit::SquareNauticalMiles,
            LengthUnit::Yards => AreaUnit::SquareYards,
            LengthUnit::Miles => AreaUnit::SquareMiles,
            LengthUnit::Degrees => AreaUnit::SquareDegrees,
            LengthUnit::Centimeters => AreaUnit::SquareCentimeters,
            LengthUnit::Millimeters => AreaUnit::SquareMillimeters,
            LengthUnit::Unknown => AreaUnit::Unknown,
        }
    }
}

/// Units of areal measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaUnit {
    SquareMeters,
    SquareKilometers,
    SquareFeet,
    SquareYards,
    SquareMiles,
    Hectares,
    Acres,
    SquareNauticalMiles,
    SquareDegrees,
    SquareCentimeters,
    SquareMillimeters,
    Unknown,
}

impl AreaUnit {
    /// The number of square metres in one of `self`
    #[must_use]
    pub fn square_meters_per_unit(&self) -> f64 {
        match self {
            AreaUnit::SquareMeters => 1.0,
            AreaUnit::SquareKilometers => 1e6,
            AreaUnit::SquareFeet => 0.092_903_04,
            AreaUnit::SquareYards => 0.836_127_36,
            AreaUnit::SquareMiles => 2_589_988.110_336,
            AreaUnit::Hectares => 10_000.0,
            AreaUnit::Acres => 4_046.856_422_4,
            AreaUnit::SquareNauticalMiles => 3_429_904.0,
            AreaUnit::SquareDegrees => DEGREE_TO_METER * DEGREE_TO_METER,
            AreaUnit::SquareCentimeters => 1e-4,
            AreaUnit::SquareMillimeters => 1e-6,
            AreaUnit::Unknown => 1.0,
        }
    }

    /// Multiplicative factor taking a measurement in `self` to one in `to`.
    /// Conversions involving [`AreaUnit::Unknown`] are identities.
    #[must_use]
    pub fn factor_to(&self, to: AreaUnit) -> f64 {
        if *self == AreaUnit::Unknown || to == AreaUnit::Unknown {
            return 1.0;
        }
        self.square_meters_per_unit() / to.square_meters_per_unit()
    }
}

// ----- Tests ---------------------------------------------------------------------
