//! The unit and axis conventions of coordinate batches.
//!
//! Angular coordinates are (longitude, latitude) in the first two columns,
//! in degrees at the user facing boundary, and in radians internally.
//! Heights, and all linear coordinates, are in the unit of the semimajor
//! axis of the ellipsoid, conventionally meters.

use crate::prelude::*;

/// Verify that the coordinates have 2 or 3 columns
pub fn check_shape(operands: &dyn CoordinateSet) -> Result<usize, Error> {
    let dim = operands.dim();
    if dim == 2 || dim == 3 {
        return Ok(dim);
    }
    Err(Error::Shape {
        expected: "2 or 3 columns",
        found: dim,
    })
}

/// Verify that the coordinates have (at least) 3 columns, as needed
/// for geocentric cartesian coordinates
pub fn check_shape_3d(operands: &dyn CoordinateSet) -> Result<usize, Error> {
    let dim = check_shape(operands)?;
    if dim == 3 {
        return Ok(dim);
    }
    Err(Error::Shape {
        expected: "3 columns",
        found: dim,
    })
}

/// Convert the first two columns from degrees to radians
pub fn degrees_to_radians(operands: &mut dyn CoordinateSet) {
    for i in 0..operands.len() {
        let (x, y) = operands.xy(i);
        operands.set_xy(i, x.to_radians(), y.to_radians());
    }
}

/// Convert the first two columns from radians to degrees
pub fn radians_to_degrees(operands: &mut dyn CoordinateSet) {
    for i in 0..operands.len() {
        let (x, y) = operands.xy(i);
        operands.set_xy(i, x.to_degrees(), y.to_degrees());
    }
}

/// Swap the first two columns, i.e. convert between the (longitude, latitude)
/// order used throughout the crate, and the (latitude, longitude) order of
/// many external data sources
pub fn swap_axes(operands: &mut dyn CoordinateSet) {
    for i in 0..operands.len() {
        let (x, y) = operands.xy(i);
        operands.set_xy(i, y, x);
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions() -> Result<(), Error> {
        let mut data = [Coor3D::raw(180., 90., 100.), Coor3D::raw(-90., 45., 0.)];
        degrees_to_radians(&mut data);
        assert_eq!(data[0], Coor3D::raw(std::f64::consts::PI, std::f64::consts::FRAC_PI_2, 100.));
        radians_to_degrees(&mut data);
        assert_eq!(data[0], Coor3D::raw(180., 90., 100.));
        assert!((data[1][1] - 45.).abs() < 1e-14);

        swap_axes(&mut data);
        assert_eq!(data[0], Coor3D::raw(90., 180., 100.));
        Ok(())
    }

    #[test]
    fn shapes() -> Result<(), Error> {
        let data = [Coor2D::raw(1., 2.)];
        assert_eq!(check_shape(&data)?, 2);
        assert!(matches!(
            check_shape_3d(&data),
            Err(Error::Shape { found: 2, .. })
        ));
        let data = vec![Coor3D::origin()];
        assert_eq!(check_shape_3d(&data)?, 3);
        Ok(())
    }
}
