use super::*;

/// Geographic coordinates (longitude, latitude in degrees unless `radians`,
/// height) on `ellps`, to geocentric cartesian coordinates. The operands
/// must have 3 columns.
pub fn geodetic_to_geocentric(
    ellps: &Ellipsoid,
    operands: &mut dyn CoordinateSet,
    radians: bool,
) -> Result<usize, Error> {
    units::check_shape_3d(operands)?;
    if !radians {
        units::degrees_to_radians(operands);
    }
    let n = operands.len();
    let mut successes = 0;
    for i in 0..n {
        let cartesian = ellps.cartesian(&operands.get_coord(i));
        if !cartesian.has_nan_xyz() {
            successes += 1;
        }
        operands.set_coord(i, &cartesian);
    }
    report("geodetic_to_geocentric", successes, n);
    Ok(successes)
}

/// Copying variant of [geodetic_to_geocentric]
pub fn geodetic_to_geocentric_copy<T>(ellps: &Ellipsoid, operands: &T, radians: bool) -> Result<T, Error>
where
    T: CoordinateSet + Clone,
{
    let mut result = operands.clone();
    geodetic_to_geocentric(ellps, &mut result, radians)?;
    Ok(result)
}

/// Geocentric cartesian coordinates to geographic coordinates on `ellps`,
/// with angles in degrees unless `radians`. The operands must have 3
/// columns, and must not include the geocentric origin, which is reported
/// as [Error::DegenerateGeometry], leaving the operands untouched.
pub fn geocentric_to_geodetic(
    ellps: &Ellipsoid,
    operands: &mut dyn CoordinateSet,
    radians: bool,
) -> Result<usize, Error> {
    units::check_shape_3d(operands)?;
    check_origin(operands)?;
    let n = operands.len();
    let mut successes = 0;
    for i in 0..n {
        let geographic = ellps.geographic(&operands.get_coord(i))?;
        if !geographic.has_nan_xyz() {
            successes += 1;
        }
        operands.set_coord(i, &geographic);
    }
    if !radians {
        units::radians_to_degrees(operands);
    }
    report("geocentric_to_geodetic", successes, n);
    Ok(successes)
}

/// Copying variant of [geocentric_to_geodetic]
pub fn geocentric_to_geodetic_copy<T>(ellps: &Ellipsoid, operands: &T, radians: bool) -> Result<T, Error>
where
    T: CoordinateSet + Clone,
{
    let mut result = operands.clone();
    geocentric_to_geodetic(ellps, &mut result, radians)?;
    Ok(result)
}

// ----- T E S T S ------------------------------------------------------------------
