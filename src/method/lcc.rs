//! Lambert Conformal Conic
use crate::authoring::*;
use crate::math::ancillary::{pj_msfn, pj_phi2, ts};
use std::f64::consts::FRAC_PI_2;

const EPS10: f64 = 1e-10;

// ----- F O R W A R D -----------------------------------------------------------------

// Forward Lambert conformal conic, following the PROJ implementation,
// cf.  https://proj.org/operations/projections/lcc.html
fn fwd(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    let a = method.ellps().semimajor_axis();
    let e = method.ellps().eccentricity();
    let lon_0 = method.params.lon(0);
    let k_0 = method.params.k(0);
    let x_0 = method.params.x(0);
    let y_0 = method.params.y(0);
    let Ok(n) = method.params.real("n") else { return 0 };
    let Ok(c) = method.params.real("c") else { return 0 };
    let Ok(rho0) = method.params.real("rho0") else { return 0 };
    let mut successes = 0_usize;

    for i in 0..operands.len() {
        let (lon, phi) = operands.xy(i);
        let lam = angular::normalize_symmetric(lon - lon_0);
        let mut rho = 0.;

        // Close to one of the poles?
        if (phi.abs() - FRAC_PI_2).abs() < EPS10 {
            if phi * n <= 0. {
                operands.set_xy(i, f64::NAN, f64::NAN);
                continue;
            }
        } else {
            rho = c * ts(phi.sin_cos(), e).powf(n);
        }
        let sc = (lam * n).sin_cos();
        let x = a * k_0 * rho * sc.0 + x_0;
        let y = a * k_0 * (rho0 - rho * sc.1) + y_0;
        operands.set_xy(i, x, y);
        successes += 1;
    }
    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

fn inv(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    let a = method.ellps().semimajor_axis();
    let e = method.ellps().eccentricity();
    let lon_0 = method.params.lon(0);
    let k_0 = method.params.k(0);
    let x_0 = method.params.x(0);
    let y_0 = method.params.y(0);
    let Ok(n) = method.params.real("n") else { return 0 };
    let Ok(c) = method.params.real("c") else { return 0 };
    let Ok(rho0) = method.params.real("rho0") else { return 0 };
    let mut successes = 0_usize;

    for i in 0..operands.len() {
        let (x, y) = operands.xy(i);
        let mut x = (x - x_0) / (a * k_0);
        let mut y = rho0 - (y - y_0) / (a * k_0);

        let mut rho = x.hypot(y);

        // On one of the poles
        if rho == 0. {
            operands.set_xy(i, lon_0, FRAC_PI_2.copysign(n));
            successes += 1;
            continue;
        }

        // Standard parallel on the southern hemisphere?
        if n < 0. {
            rho = -rho;
            x = -x;
            y = -y;
        }

        let ts0 = (rho / c).powf(1. / n);
        let phi = pj_phi2(ts0, e);
        if phi.is_infinite() || phi.is_nan() {
            operands.set_xy(i, f64::NAN, f64::NAN);
            continue;
        }
        let lam = angular::normalize_symmetric(x.atan2(y) / n + lon_0);
        operands.set_xy(i, lam, phi);
        successes += 1;
    }
    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 7] = [
    OpParameter::Real { key: "lat_1", default: Some(0_f64) },
    OpParameter::Real { key: "lat_2", default: Some(f64::NAN) },
    OpParameter::Real { key: "lat_0", default: Some(f64::NAN) },
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },

    OpParameter::Real { key: "k_0",   default: Some(1_f64) },
    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },
];

pub fn new(parameters: &RawParameters, ellps: &Ellipsoid) -> Result<Method, Error> {
    let mut params = ParsedParameters::new(parameters, ellps, &GAMUT)?;

    let phi1 = params.lat(1);
    let mut phi2 = params.lat(2);
    if phi2.is_nan() {
        phi2 = phi1;
    }
    params.lat[2] = phi2;

    let mut lat_0 = params.lat(0);
    if lat_0.is_nan() {
        lat_0 = 0.;
        if (phi1 - phi2).abs() < EPS10 {
            lat_0 = phi1;
        }
    }

    let sc = phi1.sin_cos();
    let mut n = sc.0;
    let e = ellps.eccentricity();
    let es = ellps.eccentricity_squared();

    if (phi1 + phi2).abs() < EPS10 {
        return Err(Error::BadParam(
            "lat_1".to_string(),
            "|lat_1 + lat_2| should be > 0".to_string(),
        ));
    }
    if sc.1.abs() < EPS10 || phi1.abs() >= FRAC_PI_2 {
        return Err(Error::BadParam(
            "lat_1".to_string(),
            "|lat_1| should be < 90°".to_string(),
        ));
    }
    if phi2.cos().abs() < EPS10 || phi2.abs() >= FRAC_PI_2 {
        return Err(Error::BadParam(
            "lat_2".to_string(),
            "|lat_2| should be < 90°".to_string(),
        ));
    }

    // Snyder (1982) eq. 12-15
    let m1 = pj_msfn(sc, es);

    // Snyder (1982) eq. 7-10: exp(-𝜓)
    let ml1 = ts(sc, e);

    // Secant case?
    if (phi1 - phi2).abs() >= EPS10 {
        let sc = phi2.sin_cos();
        n = (m1 / pj_msfn(sc, es)).ln();
        if n == 0. {
            return Err(Error::General("Lcc: Invalid value for eccentricity"));
        }
        let ml2 = ts(sc, e);
        let denom = (ml1 / ml2).ln();
        if denom == 0. {
            return Err(Error::General("Lcc: Invalid value for eccentricity"));
        }
        n /= denom;
    }

    let c = m1 * ml1.powf(-n) / n;
    let mut rho0 = 0.;
    if (lat_0.abs() - FRAC_PI_2).abs() > EPS10 {
        rho0 = c * ts(lat_0.sin_cos(), e).powf(n);
    }

    params.real.insert("c", c);
    params.real.insert("n", n);
    params.real.insert("rho0", rho0);
    params.lat[0] = lat_0;

    Ok(Method::new(
        "lcc",
        MethodKind::Projected,
        InnerOp(fwd),
        InnerOp(inv),
        params,
    ))
}

// ----- T E S T S ---------------------------------------------------------------------
