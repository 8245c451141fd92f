use super::*;

// ----- F O R W A R D --------------------------------------------------------------

/// Project geographic coordinates (degrees, unless `radians`) into the
/// native coordinates of `crs`. Heights pass through unchanged, except for
/// a geocentric `crs`, where the operands must have 3 columns.
///
/// For a geographic `crs` the operation is the identity: no unit
/// conversion is done.
pub fn project_forward(
    crs: &Crs,
    operands: &mut dyn CoordinateSet,
    radians: bool,
) -> Result<usize, Error> {
    units::check_shape(operands)?;
    if crs.is_geocentric() {
        units::check_shape_3d(operands)?;
    }
    let n = operands.len();
    if crs.is_latlong() {
        return Ok(n);
    }

    if !radians {
        units::degrees_to_radians(operands);
    }
    let successes = crs.method().apply(operands, Direction::Fwd);
    report(crs.method().name, successes, n);
    Ok(successes)
}

/// Copying variant of [project_forward]
pub fn project_forward_copy<T>(crs: &Crs, operands: &T, radians: bool) -> Result<T, Error>
where
    T: CoordinateSet + Clone,
{
    let mut result = operands.clone();
    project_forward(crs, &mut result, radians)?;
    Ok(result)
}

// ----- I N V E R S E --------------------------------------------------------------

/// The inverse of [project_forward]: native coordinates of `crs` to
/// geographic coordinates, in degrees unless `radians`.
pub fn project_inverse(
    crs: &Crs,
    operands: &mut dyn CoordinateSet,
    radians: bool,
) -> Result<usize, Error> {
    units::check_shape(operands)?;
    if crs.is_geocentric() {
        units::check_shape_3d(operands)?;
        check_origin(operands)?;
    }
    let n = operands.len();
    if crs.is_latlong() {
        return Ok(n);
    }

    let successes = crs.method().apply(operands, Direction::Inv);
    if !radians {
        units::radians_to_degrees(operands);
    }
    report(crs.method().name, successes, n);
    Ok(successes)
}

/// Copying variant of [project_inverse]
pub fn project_inverse_copy<T>(crs: &Crs, operands: &T, radians: bool) -> Result<T, Error>
where
    T: CoordinateSet + Clone,
{
    let mut result = operands.clone();
    project_inverse(crs, &mut result, radians)?;
    Ok(result)
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn utm() -> Result<(), Error> {
        let registry = Registry::new();
        let utm = registry.crs("utm zone=32")?;

        let geo = [Coor3D::raw(12., 55., 100.), Coor3D::raw(9., 60., 0.)];
        #[rustfmt::skip]
        let projected = [
            Coor3D::raw(691_875.632_139_661, 6_098_907.825_005_012, 100.),
            Coor3D::raw(500_000., 6_651_411.190_239_688, 0.),
        ];

        let mut operands = geo;
        assert_eq!(project_forward(&utm, &mut operands, false)?, 2);
        for i in 0..2 {
            assert!(operands[i].hypot2(&projected[i]) < 5e-6);
            assert_eq!(operands[i][2], geo[i][2]);
        }

        assert_eq!(project_inverse(&utm, &mut operands, false)?, 2);
        for i in 0..2 {
            assert_float_eq!(operands[i].0, geo[i].0, abs_all <= 1e-9);
        }
        Ok(())
    }

    #[test]
    fn radians_and_copies() -> Result<(), Error> {
        let registry = Registry::new();
        let merc = registry.crs("merc")?;

        let geo = [Coor2D::raw(12., 55.)];
        let projected = project_forward_copy(&merc, &geo, false)?;
        assert_eq!(geo[0], Coor2D::raw(12., 55.));

        let rad = [Coor2D::gis(12., 55.)];
        let projected_from_radians = project_forward_copy(&merc, &rad, true)?;
        assert_float_eq!(projected[0].0, projected_from_radians[0].0, abs_all <= 1e-9);

        let back = project_inverse_copy(&merc, &projected, true)?;
        assert_float_eq!(back[0].0, rad[0].0, abs_all <= 1e-14);
        Ok(())
    }

    #[test]
    fn geographic_and_geocentric() -> Result<(), Error> {
        let registry = Registry::new();

        // Geographic: identity, no unit conversion
        let geo = registry.crs("latlong")?;
        let mut operands = [Coor2D::raw(12., 55.)];
        assert_eq!(project_forward(&geo, &mut operands, false)?, 1);
        assert_eq!(operands[0], Coor2D::raw(12., 55.));
        assert_eq!(project_inverse(&geo, &mut operands, true)?, 1);
        assert_eq!(operands[0], Coor2D::raw(12., 55.));

        // Geocentric: 3 columns required
        let cart = registry.crs("geocent")?;
        assert!(matches!(
            project_forward(&cart, &mut operands, false),
            Err(Error::Shape { found: 2, .. })
        ));
        let mut operands = [Coor3D::raw(12., 55., 100.)];
        project_forward(&cart, &mut operands, false)?;
        assert!((operands[0][0] - 3_586_525.761_057_517).abs() < 1e-6);
        project_inverse(&cart, &mut operands, false)?;
        assert_float_eq!(operands[0].0, [12., 55., 100.], abs_all <= 1e-8);

        // ... and the origin is degenerate
        let mut operands = [Coor3D::raw(1e6, 0., 0.), Coor3D::origin()];
        assert!(matches!(
            project_inverse(&cart, &mut operands, false),
            Err(Error::DegenerateGeometry(_))
        ));
        assert_eq!(operands[0][0], 1e6);
        Ok(())
    }

    #[test]
    fn batches_and_failures() -> Result<(), Error> {
        let registry = Registry::new();
        let merc = registry.crs("merc")?;

        let mut batch = CoordinateBatch::from_rows(&[[12, 55], [12, 90]])?;
        assert_eq!(project_forward(&merc, &mut batch, false)?, 1);
        assert!(batch.row(0)[0] > 1e6);
        assert!(batch.row(1)[0].is_nan());

        let mut wide = [Coor4D::raw(12., 55., 0., 0.)];
        assert!(matches!(
            project_forward(&merc, &mut wide, false),
            Err(Error::Shape { found: 4, .. })
        ));
        assert_eq!(wide[0][0], 12.);
        Ok(())
    }
}
