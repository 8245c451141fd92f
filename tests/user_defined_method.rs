// A projection method implemented outside of the crate, using the
// authoring interface: The spherical sinusoidal projection.
use geotrans::authoring::*;
use std::f64::consts::FRAC_PI_2;

fn fwd(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    let a = method.ellps().semimajor_axis();
    let lon_0 = method.params.lon(0);
    let mut successes = 0;
    for i in 0..operands.len() {
        let (lon, lat) = operands.xy(i);
        let x = a * angular::normalize_symmetric(lon - lon_0) * lat.cos();
        operands.set_xy(i, x, a * lat);
        successes += 1;
    }
    successes
}

fn inv(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    let a = method.ellps().semimajor_axis();
    let lon_0 = method.params.lon(0);
    let mut successes = 0;
    for i in 0..operands.len() {
        let (x, y) = operands.xy(i);
        let lat = y / a;
        if lat.abs() >= FRAC_PI_2 {
            operands.set_xy(i, f64::NAN, f64::NAN);
            continue;
        }
        operands.set_xy(i, x / (a * lat.cos()) + lon_0, lat);
        successes += 1;
    }
    successes
}

#[rustfmt::skip]
const GAMUT: [OpParameter; 1] = [
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },
];

fn sinu(parameters: &RawParameters, ellps: &Ellipsoid) -> Result<Method, Error> {
    if ellps.flattening() != 0. {
        return Err(Error::BadParam(
            "ellps".to_string(),
            "sinu needs a sphere".to_string(),
        ));
    }
    Method::plain(
        "sinu",
        MethodKind::Projected,
        InnerOp(fwd),
        InnerOp(inv),
        parameters,
        ellps,
        &GAMUT,
    )
}

#[test]
fn user_defined_method() -> Result<(), Error> {
    let mut registry = Registry::new();
    assert!(matches!(registry.crs("sinu R=6371000"), Err(Error::NotFound(..))));

    registry.register_method("sinu", MethodConstructor(sinu));
    let sinu = registry.crs("sinu R=6371000 lon_0=10")?;
    assert!(sinu.is_projected());
    assert!(matches!(registry.crs("sinu ellps=GRS80"), Err(Error::BadParam(..))));

    // The same sphere: no datum shift needed
    let geo = registry.crs("latlong R=6371000")?;
    let data = [Coor2D::raw(10., 60.), Coor2D::raw(12., 0.)];
    let projected = transform_copy(&geo, &sinu, &data, false)?;
    assert!(projected[0][0].abs() < 1e-9);
    assert!((projected[0][1] - 6_371_000. * 60f64.to_radians()).abs() < 1e-6);
    assert!((projected[1][0] - 6_371_000. * 2f64.to_radians()).abs() < 1e-6);

    let back = transform_copy(&sinu, &geo, &projected, false)?;
    for i in 0..data.len() {
        assert!((back[i][0] - data[i][0]).abs() < 1e-12);
        assert!((back[i][1] - data[i][1]).abs() < 1e-12);
    }

    // Beyond the pole, the inverse fails
    let mut pole = [Coor2D::raw(0., 6_371_000. * 1.6)];
    assert_eq!(project_inverse(&sinu, &mut pole, false)?, 0);
    assert!(pole[0][0].is_nan());
    Ok(())
}
