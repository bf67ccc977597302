/// The built-in ellipsoid catalog: name, semimajor axis, reciprocal
/// flattening. A zero reciprocal flattening indicates a sphere
/// (EPSG convention).
///
/// A full registry lives in external CRS databases; these are the
/// handful of figures that measurement work keeps reaching for.
#[rustfmt::skip]
pub(super) static ELLIPSOID_LIST: [(&str, f64, f64); 10] = [
    ("GRS80",      6_378_137.0,   298.257_222_100_882_711_243_16),
    ("WGS84",      6_378_137.0,   298.257_223_563),
    ("WGS72",      6_378_135.0,   298.26),
    ("intl",       6_378_388.0,   297.0),
    ("Helmert",    6_378_200.0,   298.3),
    ("clrk66",     6_378_206.4,   294.978_698_2),
    ("clrk80",     6_378_249.145, 293.465),
    ("krass",      6_378_245.0,   298.3),
    ("bessel",     6_377_397.155, 299.152_812_8),
    ("unitsphere", 1.0,           0.0),
];
