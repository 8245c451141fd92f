//! Equidistant cylindrical (Plate Carrée), spherical form on the semimajor axis
use crate::authoring::*;

// ----- F O R W A R D -----------------------------------------------------------------

fn fwd(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    let a = method.ellps().semimajor_axis();
    let lat_0 = method.params.lat(0);
    let lon_0 = method.params.lon(0);
    let x_0 = method.params.x(0);
    let y_0 = method.params.y(0);
    let Ok(rc) = method.params.real("rc") else {
        warn!("eqc: missing precomputed scale");
        return 0;
    };

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (lon, lat) = operands.xy(i);
        let x = a * rc * angular::normalize_symmetric(lon - lon_0) + x_0;
        let y = a * (lat - lat_0) + y_0;
        operands.set_xy(i, x, y);
        successes += 1;
    }
    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

fn inv(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    let a = method.ellps().semimajor_axis();
    let lat_0 = method.params.lat(0);
    let lon_0 = method.params.lon(0);
    let x_0 = method.params.x(0);
    let y_0 = method.params.y(0);
    let Ok(rc) = method.params.real("rc") else {
        warn!("eqc: missing precomputed scale");
        return 0;
    };

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (x, y) = operands.xy(i);
        let lon = angular::normalize_symmetric((x - x_0) / (a * rc) + lon_0);
        let lat = (y - y_0) / a + lat_0;
        operands.set_xy(i, lon, lat);
        successes += 1;
    }
    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 5] = [
    OpParameter::Real { key: "lat_ts", default: Some(0_f64) },
    OpParameter::Real { key: "lat_0",  default: Some(0_f64) },
    OpParameter::Real { key: "lon_0",  default: Some(0_f64) },
    OpParameter::Real { key: "x_0",    default: Some(0_f64) },
    OpParameter::Real { key: "y_0",    default: Some(0_f64) },
];

pub fn new(parameters: &RawParameters, ellps: &Ellipsoid) -> Result<Method, Error> {
    let mut params = ParsedParameters::new(parameters, ellps, &GAMUT)?;

    let rc = params.real("lat_ts")?.to_radians().cos();
    if rc < 1e-10 {
        return Err(Error::BadParam(
            "lat_ts".to_string(),
            "|lat_ts| should be < 90°".to_string(),
        ));
    }
    params.real.insert("rc", rc);

    Ok(Method::new(
        "eqc",
        MethodKind::Projected,
        InnerOp(fwd),
        InnerOp(inv),
        params,
    ))
}

// ----- T E S T S ---------------------------------------------------------------------
