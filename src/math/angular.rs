/// Simplistic transformation from degrees, minutes and seconds-with-decimals
/// to degrees-with-decimals. No sanity check: Sign taken from degree-component,
/// minutes forced to unsigned by i16 type, but passing a negative value for
/// seconds leads to undefined behaviour.
pub fn dms_to_dd(d: i32, m: u16, s: f64) -> f64 {
    d.signum() as f64 * (d.abs() as f64 + (m as f64 + s / 60.) / 60.)
}

/// normalize arbitrary angles to [-π, π):
pub fn normalize_symmetric(angle: f64) -> f64 {
    use std::f64::consts::PI;
    let angle = (angle + PI).rem_euclid(2.0 * PI);
    angle - PI
}

// ----- Angles in degrees, following GeographicLib's Math class ----------------

/// IEEE style remainder of `x` with respect to the (positive) `y`:
/// the result lies in [-y/2, y/2]
pub fn remainder(x: f64, y: f64) -> f64 {
    let r = x % y;
    if r > y / 2. {
        r - y
    } else if r < -y / 2. {
        r + y
    } else {
        r
    }
}

/// Reduce an angle in degrees to [-180, 180]. The sign of ±180 follows
/// the sign of the input
pub fn ang_normalize(x: f64) -> f64 {
    let y = remainder(x, 360.);
    if y.abs() == 180. {
        180_f64.copysign(x)
    } else {
        y
    }
}

/// Reduce an angle in degrees to the half open interval [-180, 180),
/// the canonical form for azimuths and longitudes returned by the crate
pub fn canonical_degrees(x: f64) -> f64 {
    let y = ang_normalize(x);
    if y >= 180. {
        return -180.;
    }
    // Avoid returning -0
    y + 0.
}

/// The exact difference `y - x` of two angles in degrees, reduced to
/// [-180, 180], together with the rounding error of the result
pub fn ang_diff(x: f64, y: f64) -> (f64, f64) {
    let (d, t) = two_sum(remainder(-x, 360.), remainder(y, 360.));
    let (mut d, t) = two_sum(remainder(d, 360.), t);
    if d == 0. || d.abs() == 180. {
        d = d.copysign(if t == 0. { y - x } else { -t });
    }
    (d, t)
}

/// Error free summation: `s + t == u + v` exactly
pub fn two_sum(u: f64, v: f64) -> (f64, f64) {
    let s = u + v;
    let up = s - v;
    let vpp = s - up;
    let t = -((up - u) + (vpp - v));
    (s, t)
}

/// Coarsen tiny angles, so that values very close to zero are
/// treated as zero, and avoid underflow in subsequent computations
pub fn ang_round(x: f64) -> f64 {
    const Z: f64 = 1. / 16.;
    let mut y = x.abs();
    let w = Z - y;
    if w > 0. {
        y = Z - w;
    }
    y.copysign(x)
}

/// Latitudes outside [-90, 90] are invalid, and mapped to NaN
pub fn lat_fix(x: f64) -> f64 {
    if x.abs() > 90. {
        f64::NAN
    } else {
        x
    }
}

/// Sine and cosine of an angle in degrees, with exact results
/// for multiples of 90°
pub fn sincosd(x: f64) -> (f64, f64) {
    let d = x % 360.;
    let q = (d / 90.).round();
    let r = (d - 90. * q).to_radians();
    sincos_quadrant(r.sin_cos(), q as i64, x)
}

/// Sine and cosine of the angle `x + t` in degrees, where `t` is a
/// small correction to `x`
pub fn sincosde(x: f64, t: f64) -> (f64, f64) {
    let d = x % 360.;
    let q = (d / 90.).round();
    let r = ang_round((d - 90. * q) + t).to_radians();
    sincos_quadrant(r.sin_cos(), q as i64, x)
}

fn sincos_quadrant(sc: (f64, f64), q: i64, x: f64) -> (f64, f64) {
    let (s, c) = sc;
    let (sinx, cosx) = match q & 3 {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    };
    let sinx = if sinx == 0. { sinx.copysign(x) } else { sinx };
    (sinx, cosx + 0.)
}

/// Two argument arc tangent, with the result in degrees, and exact
/// results for the cardinal directions
pub fn atan2d(y: f64, x: f64) -> f64 {
    let (mut x, mut y) = (x, y);
    let mut q = 0;
    if y.abs() > x.abs() {
        std::mem::swap(&mut x, &mut y);
        q = 2;
    }
    if x.is_sign_negative() {
        x = -x;
        q += 1;
    }
    let ang = y.atan2(x).to_degrees();
    match q {
        1 => 180_f64.copysign(y) - ang,
        2 => 90. - ang,
        3 => -90. + ang,
        _ => ang,
    }
}

/// Scale `(x, y)` to unit length
pub fn norm(x: f64, y: f64) -> (f64, f64) {
    let r = x.hypot(y);
    (x / r, y / r)
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angular() {
        assert_eq!(dms_to_dd(55, 30, 36.), 55.51);
        assert_eq!(dms_to_dd(-55, 30, 36.), -55.51);

        let pi = std::f64::consts::PI;
        assert!((normalize_symmetric(3. * pi / 2.) + pi / 2.).abs() < 1e-15);
        assert!((normalize_symmetric(pi) + pi).abs() < 1e-15);
        assert!((normalize_symmetric(0.5) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn degrees() {
        assert_eq!(ang_normalize(190.), -170.);
        assert_eq!(ang_normalize(-190.), 170.);
        assert_eq!(ang_normalize(540.), 180.);
        assert_eq!(ang_normalize(-540.), -180.);
        assert_eq!(ang_normalize(720.), 0.);

        assert_eq!(canonical_degrees(180.), -180.);
        assert_eq!(canonical_degrees(-180.), -180.);
        assert_eq!(canonical_degrees(539.), 179.);
        assert_eq!(canonical_degrees(-540.), -180.);
        assert_eq!(canonical_degrees(-0.), 0.);
        assert!(canonical_degrees(-0.).is_sign_positive());

        let (d, e) = ang_diff(170., -170.);
        assert_eq!((d, e), (20., 0.));
        let (d, _) = ang_diff(-170., 170.);
        assert_eq!(d, -20.);
        let (d, _) = ang_diff(0., 180.);
        assert_eq!(d, 180.);
    }

    #[test]
    fn exact_trigs() {
        assert_eq!(sincosd(90.), (1., 0.));
        assert_eq!(sincosd(180.), (0., -1.));
        assert_eq!(sincosd(-90.), (-1., 0.));
        assert_eq!(sincosd(270.), (-1., 0.));
        assert_eq!(sincosd(360.), (0., 1.));
        let (s, c) = sincosd(30.);
        assert!((s - 0.5).abs() < 1e-15);
        assert!((c - 0.75_f64.sqrt()).abs() < 1e-15);

        assert_eq!(atan2d(1., 0.), 90.);
        assert_eq!(atan2d(0., -1.), 180.);
        assert_eq!(atan2d(-0., -1.), -180.);
        assert_eq!(atan2d(-1., 0.), -90.);
        assert!((atan2d(1., 1.) - 45.).abs() < 1e-14);

        assert_eq!(lat_fix(45.), 45.);
        assert!(lat_fix(90.5).is_nan());
        assert_eq!(ang_round(1e-20), 0.);
        assert_eq!(ang_round(-30.), -30.);
    }
}
