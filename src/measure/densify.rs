//! Densified geodesic polylines: the geodesic between two points,
//! emitted as a vertex chain at a fixed arc interval.

use log::warn;

use crate::geodesic::GeodesicLine;
use crate::geometry::Point;
use crate::measure::antimeridian::crosses_antimeridian;
use crate::measure::Measurer;

impl Measurer {
    /// The geodesic from `p1` to `p2` (source coordinates), densified
    /// at `interval` metres of arc. With `break_line`, the result is
    /// split into multiple parts at the antimeridian, with a vertex
    /// on each side of ±180.
    ///
    /// Without an ellipsoid the "geodesic" is the input segment
    /// itself. Endpoint transform failures log a diagnostic and yield
    /// no parts; individual vertices that fail to transform back are
    /// dropped.
    #[must_use]
    pub fn geodesic_line(
        &self,
        p1: &Point,
        p2: &Point,
        interval: f64,
        break_line: bool,
    ) -> Vec<Vec<Point>> {
        let Some(ellipsoid) = self.ellipsoid() else {
            return vec![vec![*p1, *p2]];
        };
        if interval <= 0.0 {
            return vec![vec![*p1, *p2]];
        }

        let pp1 = self.source_crs().to_geographic(p1);
        let pp2 = self.source_crs().to_geographic(p2);
        let (pp1, pp2) = match (pp1, pp2) {
            (Ok(pp1), Ok(pp2)) => (pp1, pp2),
            (Err(err), _) | (_, Err(err)) => {
                warn!("unable to calculate geodesic line: {err}");
                return Vec::new();
            }
        };

        let line = GeodesicLine::between(&ellipsoid, pp1, pp2);
        let total_distance = line.s13();

        let mut parts: Vec<Vec<Point>> = Vec::new();
        let mut current_part = vec![*p1];
        let mut d = interval;
        let mut prev_lon = pp1.0;
        let mut prev_lat = pp1.1;
        let mut last_run = false;

        loop {
            let (lon, lat) = if last_run {
                let mut lon = pp2.0;
                if lon > 180.0 {
                    lon -= 360.0;
                }
                (lon, pp2.1)
            } else {
                line.position(d)
            };

            if break_line && crosses_antimeridian(prev_lon, lon) {
                // add a vertex on each side of the antimeridian, at
                // the latitude the geodesic crosses it
                let (lat180, _) = self.latitude_geodesic_crosses_antimeridian(
                    &Point::new(prev_lon, prev_lat),
                    &Point::new(lon, lat),
                );

                let boundary = if prev_lon < -120.0 { -180.0 } else { 180.0 };
                match self.source_crs().from_geographic(boundary, lat180) {
                    Ok(p) if p.x().is_finite() && p.y().is_finite() => current_part.push(p),
                    Ok(_) => {}
                    Err(err) => warn!("unable to transform antimeridian vertex: {err}"),
                }

                parts.push(std::mem::take(&mut current_part));

                let boundary = if lon < -120.0 { -180.0 } else { 180.0 };
                match self.source_crs().from_geographic(boundary, lat180) {
                    Ok(p) if p.x().is_finite() && p.y().is_finite() => current_part.push(p),
                    Ok(_) => {}
                    Err(err) => warn!("unable to transform antimeridian vertex: {err}"),
                }
            }

            prev_lon = lon;
            prev_lat = lat;

            match self.source_crs().from_geographic(lon, lat) {
                Ok(p) => current_part.push(p),
                Err(err) => warn!("unable to transform geodesic vertex: {err}"),
            }

            if last_run {
                break;
            }
            d += interval;
            if d >= total_distance {
                last_run = true;
            }
        }
        parts.push(current_part);
        parts
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn no_ellipsoid_passthrough() {
        let measurer = Measurer::new();
        let parts = measurer.geodesic_line(&Point::new(0., 0.), &Point::new(10., 10.), 1000.0, true);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].len(), 2);
        assert_eq!(parts[0][1].x(), 10.);
    }

    #[test]
    fn equatorial_densification() -> Result<(), Error> {
        let mut measurer = Measurer::new();
        measurer.set_ellipsoid("WGS84")?;

        // One degree of equator is about 111.3 km: two interior
        // samples at 50 km, then the exact endpoint
        let parts = measurer.geodesic_line(&Point::new(0., 0.), &Point::new(1., 0.), 50_000.0, false);
        assert_eq!(parts.len(), 1);
        let part = &parts[0];
        assert_eq!(part.len(), 4);
        assert_eq!(part[0].x(), 0.0);
        assert!((part[1].x() - 0.449_157).abs() < 1e-3);
        assert_eq!(part[3].x(), 1.0);
        assert_eq!(part[3].y(), 0.0);
        Ok(())
    }

    #[test]
    fn broken_at_antimeridian() -> Result<(), Error> {
        let mut measurer = Measurer::new();
        measurer.set_ellipsoid("WGS84")?;

        let parts =
            measurer.geodesic_line(&Point::new(170., 0.), &Point::new(-170., 0.), 100_000.0, true);
        assert_eq!(parts.len(), 2);

        let closing = parts[0].last().unwrap();
        let opening = parts[1][0];
        assert_eq!(closing.x(), 180.0);
        assert_eq!(opening.x(), -180.0);
        assert!(closing.y().abs() < 1e-6);
        assert!(opening.y().abs() < 1e-6);

        // the last emitted vertex is the second input point
        let last = parts[1].last().unwrap();
        assert_eq!(last.x(), -170.0);
        assert_eq!(last.y(), 0.0);
        Ok(())
    }

    #[test]
    fn unbroken_crosses_in_one_part() -> Result<(), Error> {
        let mut measurer = Measurer::new();
        measurer.set_ellipsoid("WGS84")?;

        let parts =
            measurer.geodesic_line(&Point::new(170., 0.), &Point::new(-170., 0.), 100_000.0, false);
        assert_eq!(parts.len(), 1);
        Ok(())
    }
}
