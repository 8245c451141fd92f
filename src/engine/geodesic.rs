use super::*;

// Geographic coordinates in degrees, from the native coordinates of `crs`
fn to_degrees(crs: &Crs, point: &Coor2D, radians: bool) -> Result<Coor2D, Error> {
    match crs.kind() {
        MethodKind::Geocentric => Err(Error::General("geodesics need a 2D CRS")),
        MethodKind::Geographic if radians => Ok(point.to_degrees()),
        MethodKind::Geographic => Ok(*point),
        MethodKind::Projected => {
            let mut operands = [*point];
            project_inverse(crs, &mut operands, false)?;
            Ok(operands[0])
        }
    }
}

// The inverse of `to_degrees`
fn from_degrees(crs: &Crs, point: &Coor2D, radians: bool) -> Result<Coor2D, Error> {
    match crs.kind() {
        MethodKind::Geocentric => Err(Error::General("geodesics need a 2D CRS")),
        MethodKind::Geographic if radians => Ok(point.to_radians()),
        MethodKind::Geographic => Ok(*point),
        MethodKind::Projected => {
            let mut operands = [*point];
            project_forward(crs, &mut operands, false)?;
            Ok(operands[0])
        }
    }
}

/// Solve the direct geodesic problem on the ellipsoid of `crs`, from
/// `origin`, given in the native coordinates of `crs` (degrees for a
/// geographic CRS, unless `radians`). The azimuth is in degrees. The
/// destination is returned in the native coordinates of `crs`.
pub fn geodesic_direct(
    crs: &Crs,
    origin: &Coor2D,
    azimuth: f64,
    distance: f64,
    radians: bool,
) -> Result<GeodesicDirect, Error> {
    let from = to_degrees(crs, origin, radians)?;
    let mut solution = crs.ellps().geodesic_direct(&from, azimuth, distance)?;
    solution.destination = from_degrees(crs, &solution.destination, radians)?;
    Ok(solution)
}

/// Solve the inverse geodesic problem on the ellipsoid of `crs`, between
/// two points given in the native coordinates of `crs`
pub fn geodesic_inverse(
    crs: &Crs,
    from: &Coor2D,
    to: &Coor2D,
    radians: bool,
) -> Result<GeodesicInverse, Error> {
    let from = to_degrees(crs, from, radians)?;
    let to = to_degrees(crs, to, radians)?;
    crs.ellps().geodesic_inverse(&from, &to)
}

/// The destination part of [geodesic_direct]
pub fn destination(
    crs: &Crs,
    origin: &Coor2D,
    azimuth: f64,
    distance: f64,
    radians: bool,
) -> Result<Coor2D, Error> {
    Ok(geodesic_direct(crs, origin, azimuth, distance, radians)?.destination)
}

/// The distance part of [geodesic_inverse]
pub fn ellipsoid_distance(
    crs: &Crs,
    from: &Coor2D,
    to: &Coor2D,
    radians: bool,
) -> Result<f64, Error> {
    Ok(geodesic_inverse(crs, from, to, radians)?.distance)
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn sphere() -> Result<(), Error> {
        let registry = Registry::new();
        let sphere = registry.crs("latlong R=6371000")?;

        let inverse = geodesic_inverse(&sphere, &Coor2D::origin(), &Coor2D::raw(0., 90.), false)?;
        assert!((inverse.distance - 6_371_000. * FRAC_PI_2).abs() < 1e-6);
        assert_eq!(inverse.azimuth1, 0.);

        // One degree on the WGS84 equator is a bit more on the smaller sphere
        let arc: f64 = 111_319.49 / 6_371_000.;
        let east = destination(&sphere, &Coor2D::origin(), 90., 111_319.49, false)?;
        assert!((east[0] - 1.0).abs() < 2e-3);
        assert!((east[0] - arc.to_degrees()).abs() < 1e-9);
        assert!(east[1].abs() < 1e-12);

        // Radians in, radians out
        let east = destination(&sphere, &Coor2D::origin(), 90., 111_319.49, true)?;
        assert!((east[0] - arc).abs() < 1e-12);
        let d = ellipsoid_distance(&sphere, &Coor2D::origin(), &Coor2D::gis(0., 90.), true)?;
        assert!((d - 6_371_000. * FRAC_PI_2).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn projected() -> Result<(), Error> {
        let registry = Registry::new();
        let geo = registry.crs("latlong")?;
        let utm = registry.crs("utm zone=32")?;

        let p1 = Coor2D::raw(12., 55.);
        let p2 = Coor2D::raw(10., 56.);
        let expected = geodesic_inverse(&geo, &p1, &p2, false)?;

        let projected = project_forward_copy(&utm, &[p1, p2], false)?;
        let inverse = geodesic_inverse(&utm, &projected[0], &projected[1], false)?;
        assert!((inverse.distance - expected.distance).abs() < 1e-6);
        assert!((inverse.azimuth1 - expected.azimuth1).abs() < 1e-9);

        // The destination is returned in projected coordinates
        let direct = geodesic_direct(&utm, &projected[0], expected.azimuth1, expected.distance, false)?;
        assert!(direct.destination.hypot2(&projected[1]) < 1e-6);
        assert!((direct.azimuth - expected.azimuth2).abs() < 1e-9);

        // Not for geocentric CRS
        let cart = registry.crs("geocent")?;
        assert!(matches!(
            ellipsoid_distance(&cart, &p1, &p2, false),
            Err(Error::General(_))
        ));
        Ok(())
    }
}
