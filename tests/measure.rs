//! End-to-end exercises of the measurement engine, driven through the
//! public API the way an application would use it. Reference values
//! from Karney's GeodSolve and PROJ.

use geomeasure::preamble::*;

#[test]
fn quarter_meridian() -> Result<(), Error> {
    let mut measurer = Measurer::new();
    measurer.set_ellipsoid("WGS84")?;

    let equator = Point::new(0., 0.);
    let pole = Point::new(0., 90.);
    let distance = measurer.measure_line(&[equator, pole]);
    assert!((distance - 10_001_965.729).abs() < 1e-3);

    let bearing = measurer.bearing(&equator, &pole)?;
    assert!(bearing.abs() < 1e-12);
    Ok(())
}

#[test]
fn near_antipodal_robustness() -> Result<(), Error> {
    let mut measurer = Measurer::new();
    measurer.set_ellipsoid("WGS84")?;

    // Vincenty's inverse iteration gives up on this pair...
    let ellipsoid = measurer.ellipsoid().unwrap();
    assert!(ellipsoid.vincenty_inverse((0., 0.), (179.9, 0.)).is_none());

    // ...so the engine leans on the geodesic line instead, whose
    // length approaches half the meridian ellipse
    let distance = measurer.measure_line(&[Point::new(0., 0.), Point::new(179.9, 0.)]);
    assert!((distance - 20_003_931.0).abs() < 40_000.0);
    assert!(distance.is_finite());
    Ok(())
}

#[test]
fn antimeridian_split() -> Result<(), Error> {
    let mut measurer = Measurer::new();
    measurer.set_ellipsoid("WGS84")?;

    let line = Geometry::LineString(LineString::new(vec![
        Point::new(170., 0.),
        Point::new(-170., 0.),
    ]));
    let split = measurer.split_geometry_at_antimeridian(&line);

    let Geometry::MultiLineString(parts) = split else {
        panic!("expected a multilinestring");
    };
    assert_eq!(parts.len(), 2);

    let closing = parts[0].points().last().unwrap();
    assert_eq!(closing.x(), 180.0);
    assert!(closing.y().abs() < 1e-6);

    let opening = parts[1].points()[0];
    assert_eq!(opening.x(), -180.0);
    assert!(opening.y().abs() < 1e-6);
    Ok(())
}

#[test]
fn polar_polygon_area() -> Result<(), Error> {
    let mut measurer = Measurer::new();
    measurer.set_ellipsoid("WGS84")?;

    let ring = Geometry::Polygon(Polygon::new(
        LineString::new(vec![
            Point::new(0., 85.),
            Point::new(90., 85.),
            Point::new(180., 85.),
            Point::new(-90., 85.),
        ]),
        Vec::new(),
    ));
    let area = measurer.measure_area(&ring);

    // The ellipsoidal polar cap above latitude 85
    assert!((area - 9.791_551_904_826e11).abs() < 1e3);

    // and its spherical approximation 2πa²(1 - sin 85°) is within a
    // fraction of a percent
    let spherical = 2.0 * std::f64::consts::PI * 6_378_137.0_f64.powi(2)
        * (1.0 - 85_f64.to_radians().sin());
    assert!((area / spherical - 1.0).abs() < 0.01);

    let perimeter = measurer.measure_perimeter(&ring);
    assert!(perimeter > 0.0);
    Ok(())
}

#[test]
fn planar_fallback() {
    let measurer = Measurer::new();
    assert!(!measurer.will_use_ellipsoid());

    let triangle = Geometry::Polygon(Polygon::new(
        LineString::new(vec![
            Point::new(0., 0.),
            Point::new(1., 0.),
            Point::new(0., 1.),
        ]),
        Vec::new(),
    ));
    assert_eq!(
        measurer.measure_line(&[Point::new(0., 0.), Point::new(1., 0.)]),
        1.0
    );
    assert_eq!(measurer.measure_area(&triangle), 0.5);
    assert_eq!(measurer.length_units(), LengthUnit::Degrees);
}

#[test]
fn direct_inverse_roundtrip() -> Result<(), Error> {
    let mut measurer = Measurer::new();
    measurer.set_ellipsoid("WGS84")?;

    let origin = Point::new(10., 45.);
    let destination = measurer.destination(&origin, 100_000.0, 90.0);

    let distance = measurer.measure_line_segment(&origin, &destination);
    assert!((distance - 100_000.0).abs() < 1e-3);

    let azimuth = measurer.bearing(&origin, &destination)?.to_degrees();
    assert!((azimuth - 90.0).abs() < 1e-6);
    Ok(())
}

#[test]
fn unit_roundtrip() -> Result<(), Error> {
    let mut measurer = Measurer::new();
    measurer.set_ellipsoid("WGS84")?;
    assert_eq!(measurer.length_units(), LengthUnit::Meters);
    assert_eq!(measurer.area_units(), AreaUnit::SquareMeters);

    // convert(convert(x, U), V) equals x scaled by the direct U -> V factor
    let x = 12_345.678;
    let in_feet = measurer.convert_length_measurement(x, LengthUnit::Feet);
    let direct = x * LengthUnit::Meters.factor_to(LengthUnit::NauticalMiles);
    let through = in_feet * LengthUnit::Feet.factor_to(LengthUnit::NauticalMiles);
    assert!((through - direct).abs() < 1e-9);

    let hectares = measurer.convert_area_measurement(250_000.0, AreaUnit::Hectares);
    assert_eq!(hectares, 25.0);
    Ok(())
}

#[test]
fn projected_source_crs() -> Result<(), Error> {
    // The same two points measured from geographic coordinates and
    // from Mercator metres must agree
    let mut geographic = Measurer::new();
    geographic.set_ellipsoid("WGS84")?;
    let reference = geographic.measure_line(&[Point::new(12., 55.), Point::new(2., 49.)]);

    let mut projected = Measurer::new();
    projected.set_ellipsoid("WGS84")?;
    let crs = Crs::projected(
        Projection::mercator(geographic.ellipsoid().unwrap()),
        LengthUnit::Meters,
    );
    let p1 = crs.from_geographic(12., 55.)?;
    let p2 = crs.from_geographic(2., 49.)?;
    projected.set_source_crs(crs);

    let measured = projected.measure_line(&[p1, p2]);
    assert!((measured - reference).abs() < 1e-4);

    // Transform failure is recovered as a zero-length diagnostic
    let broken = projected.measure_line(&[Point::new(f64::NAN, 0.), p2]);
    assert_eq!(broken, 0.0);
    Ok(())
}

#[test]
fn densified_geodesic() -> Result<(), Error> {
    let mut measurer = Measurer::new();
    measurer.set_ellipsoid("WGS84")?;

    let parts = measurer.geodesic_line(
        &Point::new(170., 0.),
        &Point::new(-170., 0.),
        100_000.0,
        true,
    );
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0].last().unwrap().x(), 180.0);
    assert_eq!(parts[1][0].x(), -180.0);

    // every vertex sits on the equator
    for part in &parts {
        for vertex in part {
            assert!(vertex.y().abs() < 1e-6);
        }
    }

    // fractions reported by the crossing search stay within the arc
    let (_, fraction) = measurer
        .latitude_geodesic_crosses_antimeridian(&Point::new(170., 10.), &Point::new(-170., -10.));
    assert!((0.0..=1.0).contains(&fraction));
    Ok(())
}

#[test]
fn parameterised_ellipsoid() -> Result<(), Error> {
    // A custom ellipsoid round-trips through its synthetic id
    let mut measurer = Measurer::new();
    measurer.set_ellipsoid_axes(6_378_388.0, 6_356_911.946_128)?;
    let id = measurer.ellipsoid_id().to_string();
    assert!(id.starts_with("PARAMETER:"));

    let mut second = Measurer::new();
    second.set_ellipsoid(&id)?;
    assert!(second.will_use_ellipsoid());

    let d1 = measurer.measure_line(&[Point::new(0., 0.), Point::new(1., 1.)]);
    let d2 = second.measure_line(&[Point::new(0., 0.), Point::new(1., 1.)]);
    assert_eq!(d1, d2);
    Ok(())
}
