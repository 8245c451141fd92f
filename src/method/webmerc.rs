//! Web Mercator: The spherical Mercator on the semimajor axis of the ellipsoid
use crate::authoring::*;
use std::f64::consts::FRAC_PI_2;
use std::f64::consts::FRAC_PI_4;

// ----- F O R W A R D -----------------------------------------------------------------

fn fwd(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    let a = method.ellps().semimajor_axis();
    let lon_0 = method.params.lon(0);
    let x_0 = method.params.x(0);
    let y_0 = method.params.y(0);

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (lon, lat) = operands.xy(i);
        if lat.abs() >= FRAC_PI_2 {
            operands.set_xy(i, f64::NAN, f64::NAN);
            continue;
        }

        let easting = a * angular::normalize_symmetric(lon - lon_0) + x_0;
        let northing = a * (FRAC_PI_4 + lat / 2.0).tan().ln() + y_0;

        operands.set_xy(i, easting, northing);
        successes += 1;
    }

    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

fn inv(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    let a = method.ellps().semimajor_axis();
    let lon_0 = method.params.lon(0);
    let x_0 = method.params.x(0);
    let y_0 = method.params.y(0);

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (easting, northing) = operands.xy(i);

        // Easting -> Longitude
        let longitude = angular::normalize_symmetric((easting - x_0) / a + lon_0);

        // Northing -> Latitude
        let latitude = FRAC_PI_2 - 2.0 * (-(northing - y_0) / a).exp().atan();

        operands.set_xy(i, longitude, latitude);
        successes += 1;
    }

    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 3] = [
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },
    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },
];

pub fn new(parameters: &RawParameters, ellps: &Ellipsoid) -> Result<Method, Error> {
    Method::plain(
        "webmerc",
        MethodKind::Projected,
        InnerOp(fwd),
        InnerOp(inv),
        parameters,
        ellps,
        &GAMUT,
    )
}

// ----- T E S T S ---------------------------------------------------------------------
