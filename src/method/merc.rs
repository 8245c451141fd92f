//! Mercator
use crate::authoring::*;
use crate::math::ancillary::pj_msfn;
use std::f64::consts::FRAC_PI_2;

const EPS10: f64 = 1e-10;

// ----- F O R W A R D -----------------------------------------------------------------

fn fwd(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    let ellps = method.ellps();
    let a = ellps.semimajor_axis();
    let k_0 = method.params.k(0);
    let x_0 = method.params.x(0);
    let y_0 = method.params.y(0);
    let lon_0 = method.params.lon(0);

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (lon, lat) = operands.xy(i);

        // The poles are infinitely far away
        if (lat.abs() - FRAC_PI_2).abs() < EPS10 || lat.abs() > FRAC_PI_2 {
            operands.set_xy(i, f64::NAN, f64::NAN);
            continue;
        }

        let easting = a * k_0 * angular::normalize_symmetric(lon - lon_0) + x_0;
        let isometric = ellps.isometric_latitude(lat, Direction::Fwd);
        let northing = a * k_0 * isometric + y_0;

        operands.set_xy(i, easting, northing);
        successes += 1;
    }

    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

fn inv(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    let ellps = method.ellps();
    let a = ellps.semimajor_axis();
    let k_0 = method.params.k(0);
    let x_0 = method.params.x(0);
    let y_0 = method.params.y(0);
    let lon_0 = method.params.lon(0);

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (x, y) = operands.xy(i);

        // Easting -> Longitude
        let lon = angular::normalize_symmetric((x - x_0) / (a * k_0) + lon_0);

        // Northing -> Latitude
        let psi = (y - y_0) / (a * k_0);
        let lat = ellps.isometric_latitude(psi, Direction::Inv);
        operands.set_xy(i, lon, lat);
        successes += 1;
    }

    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 5] = [
    OpParameter::Real { key: "lon_0",  default: Some(0_f64) },
    OpParameter::Real { key: "x_0",    default: Some(0_f64) },
    OpParameter::Real { key: "y_0",    default: Some(0_f64) },

    OpParameter::Real { key: "k_0",    default: Some(1_f64) },
    OpParameter::Real { key: "lat_ts", default: Some(0_f64) },
];

pub fn new(parameters: &RawParameters, ellps: &Ellipsoid) -> Result<Method, Error> {
    let mut params = ParsedParameters::new(parameters, ellps, &GAMUT)?;

    let lat_ts = params.real("lat_ts")?;
    if lat_ts.abs() >= 90. {
        error!("Merc: lat_ts={lat_ts}. Must be in the open interval (-90, 90)");
        return Err(Error::BadParam(
            "lat_ts".to_string(),
            "|lat_ts| should be < 90°".to_string(),
        ));
    }

    // lat_ts trumps k_0
    if lat_ts != 0.0 {
        let sc = lat_ts.to_radians().sin_cos();
        params.k[0] = pj_msfn(sc, ellps.eccentricity_squared());
    }

    Ok(Method::new(
        "merc",
        MethodKind::Projected,
        InnerOp(fwd),
        InnerOp(inv),
        params,
    ))
}

// ----- T E S T S ---------------------------------------------------------------------
