//! Transverse Mercator, following Engsager & Poder (2007), with extensions
//! to 6th order by [Karney (2011)](crate::Bibliography::Kar11)
use crate::authoring::*;

// Beyond this normalized easting, the series are useless
const ETA_MAX: f64 = 2.623395162778;

// ----- F O R W A R D -----------------------------------------------------------------

fn fwd(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    // Make all precomputed parameters directly accessible
    let ellps = method.ellps();
    let lon_0 = method.params.lon(0);
    let x_0 = method.params.x(0);
    let Some(conformal) = method.params.fourier_coefficients.get("conformal") else {
        warn!("Missing Fourier coefficients for conformal mapping!");
        return 0;
    };
    let Some(tm) = method.params.fourier_coefficients.get("tm") else {
        warn!("Missing Fourier coefficients for TM!");
        return 0;
    };
    let Ok(qs) = method.params.real("scaled_radius") else {
        warn!("Missing a scaled radius!");
        return 0;
    };
    let Ok(zb) = method.params.real("zb") else {
        warn!("Missing a zombie parameter!");
        return 0;
    };

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (lon, lat) = operands.xy(i);

        // --- 1. Geographical -> Conformal latitude, rotated longitude

        // The conformal latitude
        let lat = ellps.latitude_geographic_to_conformal(lat, conformal);
        // The longitude as reckoned from the central meridian
        let lon = lon - lon_0;

        // --- 2. Conformal LAT, LNG -> complex spherical LAT

        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        let cos_lat_lon = cos_lat * cos_lon;
        let mut lat = sin_lat.atan2(cos_lat_lon);

        // --- 3. Complex spherical N, E -> ellipsoidal normalized N, E

        // Some numerical optimizations from PROJ modifications by Even Rouault,
        let inv_denom_tan_lon = 1. / sin_lat.hypot(cos_lat_lon);
        let tan_lon = sin_lon * cos_lat * inv_denom_tan_lon;
        // Inverse Gudermannian, using the precomputed tan(lon)
        let mut lon = tan_lon.asinh();

        // Trigonometric terms for Clenshaw summation
        // Non-optimized version:  `let trig = (2.*lat).sin_cos()`
        let two_inv_denom_tan_lon = 2.0 * inv_denom_tan_lon;
        let two_inv_denom_tan_lon_square = two_inv_denom_tan_lon * inv_denom_tan_lon;
        let tmp_r = cos_lat_lon * two_inv_denom_tan_lon_square;
        let trig = [sin_lat * tmp_r, cos_lat_lon * tmp_r - 1.0];

        // Hyperbolic terms for Clenshaw summation
        // Non-optimized version:  `let hyp = [(2.*lon).sinh(), (2.*lon).cosh()]`
        let hyp = [
            tan_lon * two_inv_denom_tan_lon,
            two_inv_denom_tan_lon_square - 1.0,
        ];

        // Evaluate and apply the differential term
        let dc = fourier::complex_sin_with_trig(trig, hyp, &tm.fwd);
        lat += dc[0];
        lon += dc[1];

        // Don't wanna play if we're too far from the center meridian
        if lon.abs() > ETA_MAX || lon.is_nan() {
            operands.set_xy(i, f64::NAN, f64::NAN);
            continue;
        }

        // --- 4. ellipsoidal normalized N, E -> metric N, E

        let easting = qs * lon + x_0;
        let northing = qs * lat + zb;
        operands.set_xy(i, easting, northing);
        successes += 1;
    }

    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

fn inv(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    // Make all precomputed parameters directly accessible
    let ellps = method.ellps();
    let lon_0 = method.params.lon(0);
    let x_0 = method.params.x(0);
    let Some(conformal) = method.params.fourier_coefficients.get("conformal") else {
        warn!("Missing Fourier coefficients for conformal mapping!");
        return 0;
    };
    let Some(tm) = method.params.fourier_coefficients.get("tm") else {
        warn!("Missing Fourier coefficients for TM!");
        return 0;
    };
    let Ok(qs) = method.params.real("scaled_radius") else {
        warn!("Missing a scaled radius!");
        return 0;
    };
    let Ok(zb) = method.params.real("zb") else {
        warn!("Missing a zombie parameter!");
        return 0;
    };

    let mut successes = 0_usize;
    for i in 0..operands.len() {
        let (x, y) = operands.xy(i);

        // --- 1. Normalize N, E

        let mut lon = (x - x_0) / qs;
        let mut lat = (y - zb) / qs;

        // Don't wanna play if we're too far from the center meridian
        if lon.abs() > ETA_MAX || lon.is_nan() {
            operands.set_xy(i, f64::NAN, f64::NAN);
            continue;
        }

        // --- 2. Normalized N, E -> complex spherical LAT, LNG

        let dc = fourier::complex_sin([2. * lat, 2. * lon], &tm.inv);
        lat += dc[0];
        lon += dc[1];
        lon = gudermannian::fwd(lon);

        // --- 3. Complex spherical LAT -> Gaussian LAT, LNG

        let (sin_lat, cos_lat) = lat.sin_cos();
        let (sin_lon, cos_lon) = lon.sin_cos();
        let cos_lat_lon = cos_lat * cos_lon;
        lon = sin_lon.atan2(cos_lat_lon);
        lat = (sin_lat * cos_lon).atan2(sin_lon.hypot(cos_lat_lon));

        // --- 4. Gaussian LAT, LNG -> ellipsoidal LAT, LNG

        let lon = angular::normalize_symmetric(lon + lon_0);
        let lat = ellps.latitude_conformal_to_geographic(lat, conformal);
        operands.set_xy(i, lon, lat);
        successes += 1;
    }

    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 5] = [
    OpParameter::Real { key: "lat_0", default: Some(0_f64) },
    OpParameter::Real { key: "lon_0", default: Some(0_f64) },
    OpParameter::Real { key: "x_0",   default: Some(0_f64) },
    OpParameter::Real { key: "y_0",   default: Some(0_f64) },

    OpParameter::Real { key: "k_0",   default: Some(1_f64) },
];

#[rustfmt::skip]
pub const UTM_GAMUT: [OpParameter; 2] = [
    OpParameter::Flag { key: "south" },
    OpParameter::Natural { key: "zone", default: None },
];

pub fn new(parameters: &RawParameters, ellps: &Ellipsoid) -> Result<Method, Error> {
    let mut params = ParsedParameters::new(parameters, ellps, &GAMUT)?;
    precompute(&mut params);
    Ok(Method::new(
        "tmerc",
        MethodKind::Projected,
        InnerOp(fwd),
        InnerOp(inv),
        params,
    ))
}

// ----- C O N S T R U C T O R,   U T M ------------------------------------------------

pub fn utm(parameters: &RawParameters, ellps: &Ellipsoid) -> Result<Method, Error> {
    let mut params = ParsedParameters::new(parameters, ellps, &UTM_GAMUT)?;

    // The UTM zone should be an integer between 1 and 60
    let zone = params.natural("zone")?;
    if !(1..61).contains(&zone) {
        error!("UTM: {zone}. Must be an integer in the interval 1..60");
        return Err(Error::BadParam(
            "zone".to_string(),
            "must be an integer in the interval 1..60".to_string(),
        ));
    }

    // The scaling factor is 0.9996 by definition of UTM
    params.k[0] = 0.9996;

    // The center meridian is determined by the zone
    params.lon[0] = (-183. + 6. * zone as f64).to_radians();

    // The base parallel is by definition the equator
    params.lat[0] = 0.;

    // The false easting is 500000 m by definition of UTM
    params.x[0] = 500_000.;

    // The false northing is 0 m by definition of UTM,
    // or 10_000_000 m if using the southern aspect
    params.y[0] = if params.boolean("south") { 10_000_000. } else { 0. };

    precompute(&mut params);
    Ok(Method::new(
        "utm",
        MethodKind::Projected,
        InnerOp(fwd),
        InnerOp(inv),
        params,
    ))
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

#[rustfmt::skip]
const TRANSVERSE_MERCATOR: PolynomialCoefficients = PolynomialCoefficients {
    // Geodetic to TM. [Engsager & Poder, 2007]
    fwd: [
        [1./2.,   -2./3.,   5./16.,   41./180.,   -127./288.0 ,   7891./37800.],
        [0., 13./48.,   -3./5.,   557./1440.,   281./630.,   -1983433./1935360.],
        [0., 0., 61./240.,  -103./140.,   15061./26880.,   167603./181440.],
        [0., 0., 0., 49561./161280.,   -179./168.,   6601661./7257600.],
        [0., 0., 0., 0., 34729./80640.,   -3418889./1995840.],
        [0., 0., 0., 0., 0., 212378941./319334400.]
    ],

    // TM to Geodetic. [Engsager & Poder, 2007]
    inv: [
        [-1./2.,   2./3.,   -37./96.,   1./360.,   81./512.,   -96199./604800.],
        [0., -1./48.,   -1./15.,   437./1440.,   -46./105.,   1118711./3870720.],
        [0., 0., -17./480.,   37./840.,   209./4480.,   -5569./90720.],
        [0., 0., 0., -4397./161280.,   11./504.,   830251./7257600.],
        [0., 0., 0., 0., -4583./161280.,   108847./3991680.],
        [0., 0., 0., 0., 0., -20648693./638668800.]
    ]
};

// Common setup workhorse between utm and the plain tmerc:
// Pre-compute some of the computationally heavy prerequisites,
// to get better amortization over the full method lifetime.
fn precompute(params: &mut ParsedParameters) {
    let ellps = *params.ellps();
    let n = ellps.third_flattening();
    let lat_0 = params.lat(0);
    let y_0 = params.y(0);

    // The scaled spherical Earth radius - Qn in Engsager's implementation
    let qs = params.k(0) * ellps.semimajor_axis() * ellps.normalized_meridian_arc_unit();
    params.real.insert("scaled_radius", qs);

    // The Fourier series for the conformal latitude
    let conformal = ellps.coefficients_for_conformal_latitude_computations();
    params.fourier_coefficients.insert("conformal", conformal);

    // The Fourier series for the transverse mercator coordinates
    let tm = fourier_coefficients(n, &TRANSVERSE_MERCATOR);
    params.fourier_coefficients.insert("tm", tm);

    // Conformal latitude value of the latitude-of-origin - Z in Engsager's notation
    let z = ellps.latitude_geographic_to_conformal(lat_0, &conformal);
    // Origin northing minus true northing at the origin latitude
    // i.e. true northing = N - zb
    let zb = y_0 - qs * (z + fourier::sin(2. * z, &tm.fwd));
    params.real.insert("zb", zb);
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use Direction::*;

    fn method(
        constructor: fn(&RawParameters, &Ellipsoid) -> Result<Method, Error>,
        definition: &str,
    ) -> Result<Method, Error> {
        let raw = RawParameters::new(definition, &BTreeMap::new());
        let ellps = match raw.chase("ellps") {
            Some(name) => Ellipsoid::named(&name)?,
            None => Ellipsoid::default(),
        };
        constructor(&raw, &ellps)
    }

    #[test]
    fn tmerc() -> Result<(), Error> {
        // Validation values from PROJ:
        // echo 12 55 0 0 | cct -d18 +proj=utm +zone=32 | clip
        #[rustfmt::skip]
        let geo = [
            Coor2D::geo( 55.,  12.),
            Coor2D::geo(-55.,  12.),
            Coor2D::geo( 55., -6.),
            Coor2D::geo(-55., -6.),
        ];

        #[rustfmt::skip]
        let projected = [
            Coor2D::raw( 691_875.632_139_661, 6_098_907.825_005_012),
            Coor2D::raw( 691_875.632_139_661,-6_098_907.825_005_012),
            Coor2D::raw(-455_673.814_189_040, 6_198_246.671_090_279),
            Coor2D::raw(-455_673.814_189_040,-6_198_246.671_090_279)
        ];

        let op = method(new, "tmerc k_0=0.9996 lon_0=9 x_0=500000")?;

        let mut operands = geo;
        assert_eq!(op.apply(&mut operands, Fwd), 4);
        for i in 0..operands.len() {
            assert_float_eq!(operands[i].0, projected[i].0, abs_all <= 1e-8);
        }

        op.apply(&mut operands, Inv);
        for i in 0..operands.len() {
            assert!(operands[i].hypot2(&geo[i]) < 5e-6);
        }

        // Test involving scale and all offsets
        let op = method(
            new,
            "tmerc lat_0=49 lon_0=-2 k_0=0.9996012717 x_0=400000 y_0=-100000 ellps=airy",
        )?;

        // Expected value from PROJ:
        // echo 1 52 0 0 | cct -d 15 proj=tmerc lat_0=49 lon_0=-2 k_0=0.9996012717 x_0=400000 y_0=-100000 ellps=airy  --
        let geo = [Coor2D::geo(52., 1.)];
        let projected = [Coor2D::raw(605909.130344302393496, 237803.365171569399536)];

        let mut operands = geo;
        op.apply(&mut operands, Fwd);
        assert_float_eq!(operands[0].0, projected[0].0, abs_all <= 1e-8);
        op.apply(&mut operands, Inv);
        assert_float_eq!(operands[0].0, geo[0].0, abs_all <= 1e-12);

        Ok(())
    }

    #[test]
    fn utm_zone_32() -> Result<(), Error> {
        let op = method(utm, "utm zone=32")?;

        #[rustfmt::skip]
        let geo = [
            Coor2D::geo( 55.,  12.),
            Coor2D::geo(-55.,  12.),
            Coor2D::geo( 55., -6.),
            Coor2D::geo(-55., -6.)
        ];

        #[rustfmt::skip]
        let projected = [
            Coor2D::raw( 691_875.632_139_661, 6_098_907.825_005_012),
            Coor2D::raw( 691_875.632_139_661,-6_098_907.825_005_012),
            Coor2D::raw(-455_673.814_189_040, 6_198_246.671_090_279),
            Coor2D::raw(-455_673.814_189_040,-6_198_246.671_090_279)
        ];

        let mut operands = geo;
        assert_eq!(op.apply(&mut operands, Fwd), 4);
        for i in 0..operands.len() {
            assert_float_eq!(operands[i].0, projected[i].0, abs_all <= 1e-8);
        }

        assert_eq!(op.apply(&mut operands, Inv), 4);
        for i in 0..operands.len() {
            assert_float_eq!(operands[i].0, geo[i].0, abs_all <= 1e-12);
        }

        Ok(())
    }

    #[test]
    fn utm_south() -> Result<(), Error> {
        let op = method(utm, "utm zone=32 south")?;

        #[rustfmt::skip]
        let geo = [
            Coor3D::geo( 55.,  12., 0.),
            Coor3D::geo(-55.,  12., 0.),
            Coor3D::geo( 55., -6., 0.),
            Coor3D::geo(-55., -6., 0.)
        ];

        #[rustfmt::skip]
        let projected = [
            Coor3D::raw( 691_875.632_139_661, 1e7+6_098_907.825_005_012, 0.),
            Coor3D::raw( 691_875.632_139_661, 1e7-6_098_907.825_005_012, 0.),
            Coor3D::raw(-455_673.814_189_040, 1e7+6_198_246.671_090_279, 0.),
            Coor3D::raw(-455_673.814_189_040, 1e7-6_198_246.671_090_279, 0.)
        ];

        let mut operands = geo;
        op.apply(&mut operands, Fwd);
        for i in 0..operands.len() {
            assert!(operands[i].hypot2(&projected[i]) < 5e-3);
        }

        op.apply(&mut operands, Inv);
        for i in 0..operands.len() {
            assert!(operands[i].hypot2(&geo[i]) < 10e-8);
        }

        Ok(())
    }

    #[test]
    fn bad_zones_and_far_points() -> Result<(), Error> {
        assert!(matches!(method(utm, "utm zone=61"), Err(Error::BadParam(..))));
        assert!(matches!(method(utm, "utm zone=0"), Err(Error::BadParam(..))));
        assert!(matches!(method(utm, "utm"), Err(Error::MissingParam(..))));

        // Too far from the central meridian
        let op = method(utm, "utm zone=32")?;
        let mut operands = [Coor2D::geo(0., 100.)];
        assert_eq!(op.apply(&mut operands, Fwd), 0);
        assert!(operands[0][0].is_nan());
        Ok(())
    }
}
