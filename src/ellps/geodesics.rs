use crate::math::angular::*;
use crate::math::fourier;
use crate::math::taylor::polyval;
use crate::prelude::*;
use std::f64::consts::PI;

/// Solution of the inverse geodesic problem. Azimuths in degrees,
/// clockwise from north, canonicalized to [-180, 180)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeodesicInverse {
    /// Length of the geodesic, in the unit of the semimajor axis
    pub distance: f64,
    /// Forward azimuth at the first point
    pub azimuth1: f64,
    /// Forward azimuth at the second point
    pub azimuth2: f64,
}

/// Solution of the direct geodesic problem
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeodesicDirect {
    /// Longitude and latitude of the destination, in degrees. The
    /// longitude is canonicalized to [-180, 180)
    pub destination: Coor2D,
    /// Forward azimuth at the destination, in degrees, canonicalized to [-180, 180)
    pub azimuth: f64,
}

// ----- Geodesics -------------------------------------------------------------

/// The direct and inverse geodesic problems, following
/// [Karney (2013)](crate::Bibliography::Kar13).
///
/// Points are given as `Coor2D`s of longitude and latitude in degrees,
/// azimuths in degrees clockwise from north.
pub trait Geodesics: EllipsoidBase {
    /// For a given `origin`, an `azimuth` and a (signed) `distance`, compute
    /// the destination and the forward azimuth at the destination.
    /// The azimuth must be in [-540, 540).
    fn geodesic_direct(
        &self,
        origin: &Coor2D,
        azimuth: f64,
        distance: f64,
    ) -> Result<GeodesicDirect, Error> {
        check_point(origin)?;
        if !(-540. ..540.).contains(&azimuth) {
            return Err(Error::BadParam(
                "azimuth".to_string(),
                format!("{azimuth} not in [-540, 540)"),
            ));
        }
        if !distance.is_finite() {
            return Err(Error::BadParam(
                "distance".to_string(),
                distance.to_string(),
            ));
        }

        if distance == 0. {
            return Ok(GeodesicDirect {
                destination: Coor2D::raw(canonical_degrees(origin[0]), origin[1]),
                azimuth: canonical_degrees(azimuth),
            });
        }

        let karney = Karney::new(self.semimajor_axis(), self.flattening());
        let (lat2, lon2, azi2) = karney.direct(origin[1], origin[0], azimuth, distance);
        Ok(GeodesicDirect {
            destination: Coor2D::raw(canonical_degrees(lon2), lat2),
            azimuth: canonical_degrees(azi2),
        })
    }

    /// Compute the length of the geodesic between `from` and `to`, and the
    /// forward azimuths at both ends.
    ///
    /// Coincident points give a distance of 0 and azimuths of 0.
    fn geodesic_inverse(&self, from: &Coor2D, to: &Coor2D) -> Result<GeodesicInverse, Error> {
        check_point(from)?;
        check_point(to)?;

        let same_pole = from[1].abs() == 90. && from[1] == to[1];
        if same_pole || (from[1] == to[1] && ang_diff(from[0], to[0]).0 == 0.) {
            return Ok(GeodesicInverse::default());
        }

        let karney = Karney::new(self.semimajor_axis(), self.flattening());
        let (distance, azi1, azi2) = karney.inverse(from[1], from[0], to[1], to[0])?;
        Ok(GeodesicInverse {
            distance,
            azimuth1: canonical_degrees(azi1),
            azimuth2: canonical_degrees(azi2),
        })
    }

    /// The distance between `from` and `to`, along the geodesic
    fn distance(&self, from: &Coor2D, to: &Coor2D) -> Result<f64, Error> {
        Ok(self.geodesic_inverse(from, to)?.distance)
    }
}

impl Geodesics for Ellipsoid {}

fn check_point(point: &Coor2D) -> Result<(), Error> {
    if !point[0].is_finite() {
        return Err(Error::BadParam(
            "longitude".to_string(),
            point[0].to_string(),
        ));
    }
    if !(point[1].abs() <= 90.) {
        return Err(Error::BadParam(
            "latitude".to_string(),
            format!("{} not in [-90, 90]", point[1]),
        ));
    }
    Ok(())
}

// ----- The series expansions -------------------------------------------------

// The order of the series expansions
const ORDER: usize = 6;
const NC3: usize = ORDER;
const NC3X: usize = (NC3 * (NC3 - 1)) / 2;

// Newton's method is abandoned for bisection after MAXIT1 iterations,
// and the bisection gives up after MAXIT2
const MAXIT1: usize = 20;
const MAXIT2: usize = MAXIT1 + f64::MANTISSA_DIGITS as usize + 10;

/// Σ cₗ sin(2lσ), l = 1..n, given (sin σ, cos σ)
fn sin_series(sin_sigma: f64, cos_sigma: f64, coefficients: &[f64]) -> f64 {
    let trig = [
        2. * sin_sigma * cos_sigma,
        (cos_sigma - sin_sigma) * (cos_sigma + sin_sigma),
    ];
    fourier::sin_with_trig(trig, coefficients)
}

/// The coefficients of the Fourier series in ε, Karney (2013) eqs. (18), (42), (43):
/// For each order l, a polynomial in ε² of order (ORDER - l) / 2, followed
/// by its divisor
fn eps_series(eps: f64, coefficients: &[f64]) -> [f64; ORDER] {
    let eps2 = eps * eps;
    let mut c = [0.; ORDER];
    let mut d = eps;
    let mut o = 0;
    for l in 1..=ORDER {
        let m = (ORDER - l) / 2;
        c[l - 1] = d * polyval(eps2, &coefficients[o..=o + m]) / coefficients[o + m + 1];
        o += m + 2;
        d *= eps;
    }
    c
}

/// A₁ - 1, Karney (2013) eq. (17)
fn a1m1f(eps: f64) -> f64 {
    const COEFF: [f64; 5] = [1., 4., 64., 0., 256.];
    let t = polyval(eps * eps, &COEFF[..4]) / COEFF[4];
    (t + eps) / (1. - eps)
}

/// C₁ₗ, Karney (2013) eq. (18)
fn c1f(eps: f64) -> [f64; ORDER] {
    #[rustfmt::skip]
    const COEFF: [f64; 18] = [
        -1., 6., -16., 32.,
        -9., 64., -128., 2048.,
        9., -16., 768.,
        3., -5., 512.,
        -7., 1280.,
        -7., 2048.,
    ];
    eps_series(eps, &COEFF)
}

/// C′₁ₗ, the coefficients of the inverse series, Karney (2013) eq. (21)
fn c1pf(eps: f64) -> [f64; ORDER] {
    #[rustfmt::skip]
    const COEFF: [f64; 18] = [
        205., -432., 768., 1536.,
        4005., -4736., 3840., 12288.,
        -225., 116., 384.,
        -7173., 2695., 7680.,
        3467., 7680.,
        38081., 61440.,
    ];
    eps_series(eps, &COEFF)
}

/// A₂ - 1, Karney (2013) eq. (42)
fn a2m1f(eps: f64) -> f64 {
    const COEFF: [f64; 5] = [-11., -28., -192., 0., 256.];
    let t = polyval(eps * eps, &COEFF[..4]) / COEFF[4];
    (t - eps) / (1. + eps)
}

/// C₂ₗ, Karney (2013) eq. (43)
fn c2f(eps: f64) -> [f64; ORDER] {
    #[rustfmt::skip]
    const COEFF: [f64; 18] = [
        1., 2., 16., 32.,
        35., 64., 384., 2048.,
        15., 80., 768.,
        7., 35., 512.,
        63., 1280.,
        77., 2048.,
    ];
    eps_series(eps, &COEFF)
}

/// Solve k⁴ + 2k³ - (x² + y² - 1)k² - 2y²k - y² = 0 for its positive root,
/// Karney (2013) eq. (55)
fn astroid(x: f64, y: f64) -> f64 {
    let p = x * x;
    let q = y * y;
    let r = (p + q - 1.) / 6.;
    if q == 0. && r <= 0. {
        return 0.;
    }

    let s = p * q / 4.;
    let r2 = r * r;
    let r3 = r * r2;
    let disc = s * (s + 2. * r3);
    let mut u = r;
    if disc >= 0. {
        let mut t3 = s + r3;
        // Avoid cancellation when r is negative
        t3 += if t3 < 0. { -disc.sqrt() } else { disc.sqrt() };
        let t = t3.cbrt();
        u += t + if t != 0. { r2 / t } else { 0. };
    } else {
        // The complex conjugate roots
        let ang = (-disc).sqrt().atan2(-(s + r3));
        u += 2. * r * (ang / 3.).cos();
    }
    let v = (u * u + q).sqrt();
    let uv = if u < 0. { q / (v - u) } else { u + v };
    let w = (uv - q) / (2. * v);
    uv / ((uv + w * w).sqrt() + w)
}

// ----- The solver ------------------------------------------------------------

/// The derived constants of a specific ellipsoid, and the solvers for
/// the direct and inverse problems. Angles in degrees
struct Karney {
    a: f64,
    f: f64,
    f1: f64,
    ep2: f64,
    n: f64,
    b: f64,
    etol2: f64,
    a3x: [f64; ORDER],
    c3x: [f64; NC3X],
    tiny: f64,
    tol0: f64,
    tol1: f64,
    tolb: f64,
    xthresh: f64,
}

/// Initial values for the inverse problem iteration
struct InverseStart {
    sig12: f64,
    salp1: f64,
    calp1: f64,
    salp2: f64,
    calp2: f64,
    dnm: f64,
}

/// The longitude difference for a trial azimuth, and its derivative
struct Lambda {
    lam12: f64,
    salp2: f64,
    calp2: f64,
    sig12: f64,
    sig1: (f64, f64),
    sig2: (f64, f64),
    eps: f64,
    dlam12: f64,
}

impl Karney {
    fn new(a: f64, f: f64) -> Karney {
        let tol0 = f64::EPSILON;
        let tol2 = tol0.sqrt();
        let f1 = 1. - f;
        let e2 = f * (2. - f);
        let ep2 = e2 / (f1 * f1);
        let n = f / (2. - f);
        let b = a * f1;
        let etol2 = 0.1 * tol2 / (f.abs().max(0.001) * (1. - f / 2.).min(1.) / 2.).sqrt();

        #[rustfmt::skip]
        const A3_COEFF: [f64; 18] = [
            -3., 128.,
            -2., -3., 64.,
            -1., -3., -1., 16.,
            3., -1., -2., 8.,
            1., -1., 2.,
            1., 1.,
        ];
        let mut a3x = [0.; ORDER];
        let mut o = 0;
        for (k, j) in (0..ORDER).rev().enumerate() {
            let m = (ORDER - j - 1).min(j);
            a3x[k] = polyval(n, &A3_COEFF[o..=o + m]) / A3_COEFF[o + m + 1];
            o += m + 2;
        }

        #[rustfmt::skip]
        const C3_COEFF: [f64; 45] = [
            3., 128.,
            2., 5., 128.,
            -1., 3., 3., 64.,
            -1., 0., 1., 8.,
            -1., 1., 4.,
            5., 256.,
            1., 3., 128.,
            -3., -2., 3., 64.,
            1., -3., 2., 32.,
            7., 512.,
            -10., 9., 384.,
            5., -9., 5., 192.,
            7., 512.,
            -14., 7., 512.,
            21., 2560.,
        ];
        let mut c3x = [0.; NC3X];
        let mut o = 0;
        let mut k = 0;
        for l in 1..NC3 {
            for j in (l..NC3).rev() {
                let m = (NC3 - j - 1).min(j);
                c3x[k] = polyval(n, &C3_COEFF[o..=o + m]) / C3_COEFF[o + m + 1];
                k += 1;
                o += m + 2;
            }
        }

        Karney {
            a,
            f,
            f1,
            ep2,
            n,
            b,
            etol2,
            a3x,
            c3x,
            tiny: f64::MIN_POSITIVE.sqrt(),
            tol0,
            tol1: 200. * tol0,
            tolb: tol0 * tol2,
            xthresh: 1000. * tol2,
        }
    }

    /// A₃, Karney (2013) eq. (24)
    fn a3f(&self, eps: f64) -> f64 {
        polyval(eps, &self.a3x)
    }

    /// C₃ₗ, Karney (2013) eq. (25)
    fn c3f(&self, eps: f64) -> [f64; NC3 - 1] {
        let mut c = [0.; NC3 - 1];
        let mut mult = 1.;
        let mut o = 0;
        for l in 1..NC3 {
            let m = NC3 - l - 1;
            mult *= eps;
            c[l - 1] = mult * polyval(eps, &self.c3x[o..=o + m]);
            o += m + 1;
        }
        c
    }

    /// The reduced distance, s₁₂/b, the reduced length, m₁₂/b, and the
    /// difference of the A coefficients, A₁ - A₂, for an arc of length σ₁₂.
    /// `sig1` and `sig2` are the (sine, cosine) pairs of σ at the end points
    fn lengths(
        &self,
        eps: f64,
        sig12: f64,
        sig1: (f64, f64),
        dn1: f64,
        sig2: (f64, f64),
        dn2: f64,
    ) -> (f64, f64, f64) {
        let (ssig1, csig1) = sig1;
        let (ssig2, csig2) = sig2;
        let a1 = a1m1f(eps);
        let c1 = c1f(eps);
        let a2 = a2m1f(eps);
        let c2 = c2f(eps);
        let m0x = a1 - a2;
        let a1 = 1. + a1;
        let a2 = 1. + a2;

        let b1 = sin_series(ssig2, csig2, &c1) - sin_series(ssig1, csig1, &c1);
        let b2 = sin_series(ssig2, csig2, &c2) - sin_series(ssig1, csig1, &c2);
        let s12b = a1 * (sig12 + b1);
        let j12 = m0x * sig12 + (a1 * b1 - a2 * b2);
        let m12b = dn2 * (csig1 * ssig2) - dn1 * (ssig1 * csig2) - csig1 * csig2 * j12;
        (s12b, m12b, m0x)
    }

    // ----- D I R E C T -----------------------------------------------------------

    /// Returns latitude, longitude and azimuth at the destination
    fn direct(&self, lat1: f64, lon1: f64, azi1: f64, s12: f64) -> (f64, f64, f64) {
        let azi1 = ang_normalize(azi1);
        let (salp1, calp1) = sincosd(ang_round(azi1));

        let (sbet1, cbet1) = sincosd(ang_round(lat_fix(lat1)));
        let (sbet1, cbet1) = norm(self.f1 * sbet1, cbet1);
        let cbet1 = cbet1.max(self.tiny);

        // The azimuth at the equator
        let salp0 = salp1 * cbet1;
        let calp0 = calp1.hypot(salp1 * sbet1);

        let somg1 = salp0 * sbet1;
        let csig1 = if sbet1 != 0. || calp1 != 0. {
            cbet1 * calp1
        } else {
            1.
        };
        let comg1 = csig1;
        let (ssig1, csig1) = norm(sbet1, csig1);

        let k2 = calp0 * calp0 * self.ep2;
        let eps = k2 / (2. * (1. + (1. + k2).sqrt()) + k2);

        let a1m1 = a1m1f(eps);
        let c1a = c1f(eps);
        let b11 = sin_series(ssig1, csig1, &c1a);
        let (s, c) = b11.sin_cos();
        let stau1 = ssig1 * c + csig1 * s;
        let ctau1 = csig1 * c - ssig1 * s;

        let c1pa = c1pf(eps);
        let c3a = self.c3f(eps);
        let a3c = -self.f * salp0 * self.a3f(eps);
        let b31 = sin_series(ssig1, csig1, &c3a);

        // The arc length on the auxiliary sphere
        let tau12 = s12 / (self.b * (1. + a1m1));
        let (s, c) = tau12.sin_cos();
        let b12 = -sin_series(stau1 * c + ctau1 * s, ctau1 * c - stau1 * s, &c1pa);
        let mut sig12 = tau12 - (b12 - b11);
        let (mut ssig12, mut csig12) = sig12.sin_cos();

        // For strongly flattened ellipsoids, a Newton step improves the accuracy
        if self.f.abs() > 0.01 {
            let ssig2 = ssig1 * csig12 + csig1 * ssig12;
            let csig2 = csig1 * csig12 - ssig1 * ssig12;
            let b12 = sin_series(ssig2, csig2, &c1a);
            let serr = (1. + a1m1) * (sig12 + (b12 - b11)) - s12 / self.b;
            sig12 -= serr / (1. + k2 * ssig2 * ssig2).sqrt();
            (ssig12, csig12) = sig12.sin_cos();
        }

        let ssig2 = ssig1 * csig12 + csig1 * ssig12;
        let mut csig2 = csig1 * csig12 - ssig1 * ssig12;
        let sbet2 = calp0 * ssig2;
        let mut cbet2 = salp0.hypot(calp0 * csig2);
        if cbet2 == 0. {
            // The destination is at a pole
            cbet2 = self.tiny;
            csig2 = self.tiny;
        }
        let salp2 = salp0;
        let calp2 = calp0 * csig2;

        let somg2 = salp0 * ssig2;
        let comg2 = csig2;
        let omg12 = (somg2 * comg1 - comg2 * somg1).atan2(comg2 * comg1 + somg2 * somg1);
        let b32 = sin_series(ssig2, csig2, &c3a);
        let lam12 = omg12 + a3c * (sig12 + (b32 - b31));
        let lon12 = lam12.to_degrees();

        let lon2 = ang_normalize(ang_normalize(lon1) + ang_normalize(lon12));
        let lat2 = atan2d(sbet2, self.f1 * cbet2);
        let azi2 = atan2d(salp2, calp2);
        (lat2, lon2, azi2)
    }

    // ----- I N V E R S E ---------------------------------------------------------

    /// Returns distance, and the azimuths at the two points
    fn inverse(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Result<(f64, f64, f64), Error> {
        // Make the longitude difference positive
        let (lon12, lon12s) = ang_diff(lon1, lon2);
        let mut lonsign: f64 = if lon12.is_sign_negative() { -1. } else { 1. };
        let lon12 = lon12 * lonsign;
        let lon12s = lon12s * lonsign;
        let lam12 = lon12.to_radians();
        let (slam12, clam12) = sincosde(lon12, lon12s);
        // The supplementary longitude difference
        let lon12s = (180. - lon12) - lon12s;

        // Swap the points, so that |lat1| >= |lat2|
        let mut lat1 = ang_round(lat_fix(lat1));
        let mut lat2 = ang_round(lat_fix(lat2));
        let swapp: f64 = if lat1.abs() < lat2.abs() { -1. } else { 1. };
        if swapp < 0. {
            lonsign *= -1.;
            std::mem::swap(&mut lat1, &mut lat2);
        }
        // ...and make lat1 <= 0
        let latsign: f64 = if lat1.is_sign_negative() { 1. } else { -1. };
        lat1 *= latsign;
        lat2 *= latsign;

        let (sbet1, cbet1) = sincosd(lat1);
        let (sbet1, cbet1) = norm(self.f1 * sbet1, cbet1);
        let cbet1 = cbet1.max(self.tiny);

        let (sbet2, cbet2) = sincosd(lat2);
        let (mut sbet2, cbet2) = norm(self.f1 * sbet2, cbet2);
        let mut cbet2 = cbet2.max(self.tiny);

        // Ensure the exact symmetry of |bet1| and |bet2|, when appropriate
        if cbet1 < -sbet1 {
            if cbet2 == cbet1 {
                sbet2 = sbet1.copysign(sbet2);
            }
        } else if sbet2.abs() == -sbet1 {
            cbet2 = cbet1;
        }

        let dn1 = (1. + self.ep2 * sbet1 * sbet1).sqrt();
        let dn2 = (1. + self.ep2 * sbet2 * sbet2).sqrt();

        let mut salp1 = 0.;
        let mut calp1 = 0.;
        let mut salp2 = 0.;
        let mut calp2 = 0.;
        let mut s12x = 0.;

        // Meridional geodesics, and geodesics from a pole
        let mut meridian = lat1 == -90. || slam12 == 0.;
        if meridian {
            calp1 = clam12;
            salp1 = slam12;
            calp2 = 1.;
            salp2 = 0.;

            let sig1 = (sbet1, calp1 * cbet1);
            let sig2 = (sbet2, calp2 * cbet2);
            let sig12 = (0_f64.max(sig1.1 * sig2.0 - sig1.0 * sig2.1) + 0.)
                .atan2(sig1.1 * sig2.1 + sig1.0 * sig2.0);
            let (mut s12b, m12b, _) = self.lengths(self.n, sig12, sig1, dn1, sig2, dn2);

            // A negative reduced length indicates a geodesic passing through a
            // conjugate point: Not the shortest path, so go on to the general case
            if sig12 < 1. || m12b >= 0. {
                if sig12 < 3. * self.tiny || (sig12 < self.tol0 && (s12b < 0. || m12b < 0.)) {
                    s12b = 0.;
                }
                s12x = s12b * self.b;
            } else {
                meridian = false;
            }
        }

        let equatorial =
            !meridian && sbet1 == 0. && (self.f <= 0. || lon12s >= self.f * 180.);
        if equatorial {
            // Along the equator
            calp1 = 0.;
            calp2 = 0.;
            salp1 = 1.;
            salp2 = 1.;
            s12x = self.a * lam12;
        } else if !meridian {
            let start = self.inverse_start(sbet1, cbet1, sbet2, cbet2, lam12, slam12, clam12);
            salp1 = start.salp1;
            calp1 = start.calp1;

            if start.sig12 >= 0. {
                // Short lines, solved directly
                salp2 = start.salp2;
                calp2 = start.calp2;
                s12x = start.sig12 * self.b * start.dnm;
            } else {
                // Newton's method, with bisection as fallback
                let mut numit = 0;
                let mut tripn = false;
                let mut tripb = false;
                let (mut salp1a, mut calp1a) = (self.tiny, 1.);
                let (mut salp1b, mut calp1b) = (self.tiny, -1.);

                let lambda = loop {
                    let lambda = self.lambda12(
                        (sbet1, cbet1, dn1),
                        (sbet2, cbet2, dn2),
                        salp1,
                        calp1,
                        slam12,
                        clam12,
                        numit < MAXIT1,
                    );
                    let v = lambda.lam12;
                    let tolerance = if tripn { 8. } else { 1. } * self.tol0;
                    if tripb || !(v.abs() >= tolerance) {
                        break lambda;
                    }
                    if numit == MAXIT2 {
                        return Err(Error::NonConvergence("inverse geodesic"));
                    }

                    // Update the bracket
                    if v > 0. && (numit > MAXIT1 || calp1 / salp1 > calp1b / salp1b) {
                        salp1b = salp1;
                        calp1b = calp1;
                    } else if v < 0. && (numit > MAXIT1 || calp1 / salp1 < calp1a / salp1a) {
                        salp1a = salp1;
                        calp1a = calp1;
                    }

                    let mut newton = false;
                    if numit < MAXIT1 && lambda.dlam12 > 0. {
                        let dalp1 = -v / lambda.dlam12;
                        if dalp1.abs() < PI {
                            let (sdalp1, cdalp1) = dalp1.sin_cos();
                            let nsalp1 = salp1 * cdalp1 + calp1 * sdalp1;
                            if nsalp1 > 0. {
                                calp1 = calp1 * cdalp1 - salp1 * sdalp1;
                                (salp1, calp1) = norm(nsalp1, calp1);
                                tripn = v.abs() <= 16. * self.tol0;
                                newton = true;
                            }
                        }
                    }

                    if !newton {
                        // Bisection
                        (salp1, calp1) = norm((salp1a + salp1b) / 2., (calp1a + calp1b) / 2.);
                        tripn = false;
                        tripb = (salp1a - salp1).abs() + (calp1a - calp1) < self.tolb
                            || (salp1 - salp1b).abs() + (calp1 - calp1b) < self.tolb;
                    }
                    numit += 1;
                };

                salp2 = lambda.salp2;
                calp2 = lambda.calp2;
                let (s12b, _, _) =
                    self.lengths(lambda.eps, lambda.sig12, lambda.sig1, dn1, lambda.sig2, dn2);
                s12x = s12b * self.b;
            }
        }

        let s12 = 0. + s12x;

        // Undo the swapping and the sign normalizations
        if swapp < 0. {
            std::mem::swap(&mut salp1, &mut salp2);
            std::mem::swap(&mut calp1, &mut calp2);
        }
        salp1 *= swapp * lonsign;
        calp1 *= swapp * latsign;
        salp2 *= swapp * lonsign;
        calp2 *= swapp * latsign;

        Ok((s12, atan2d(salp1, calp1), atan2d(salp2, calp2)))
    }

    /// Starting point for the Newton iteration, from the solution on an
    /// auxiliary sphere, or (for nearly antipodal points) from the astroid
    /// approximation of Karney (2013) sect. 5
    #[allow(clippy::too_many_arguments)]
    fn inverse_start(
        &self,
        sbet1: f64,
        cbet1: f64,
        sbet2: f64,
        cbet2: f64,
        lam12: f64,
        slam12: f64,
        clam12: f64,
    ) -> InverseStart {
        let mut sig12 = -1.;
        let mut salp2 = f64::NAN;
        let mut calp2 = f64::NAN;

        let sbet12 = sbet2 * cbet1 - cbet2 * sbet1;
        let cbet12 = cbet2 * cbet1 + sbet2 * sbet1;
        let sbet12a = sbet2 * cbet1 + cbet2 * sbet1;

        let shortline = cbet12 >= 0. && sbet12 < 0.5 && cbet2 * lam12 < 0.5;
        let sbetm2 = (sbet1 + sbet2).powi(2);
        let sbetm2 = sbetm2 / (sbetm2 + (cbet1 + cbet2).powi(2));
        let dnm = (1. + self.ep2 * sbetm2).sqrt();

        let (mut somg12, mut comg12) = if shortline {
            (lam12 / (self.f1 * dnm)).sin_cos()
        } else {
            (slam12, clam12)
        };

        let mut salp1 = cbet2 * somg12;
        let mut calp1 = if comg12 >= 0. {
            sbet12 + cbet2 * sbet1 * somg12 * somg12 / (1. + comg12)
        } else {
            sbet12a - cbet2 * sbet1 * somg12 * somg12 / (1. - comg12)
        };

        let ssig12 = salp1.hypot(calp1);
        let csig12 = sbet1 * sbet2 + cbet1 * cbet2 * comg12;

        if shortline && ssig12 < self.etol2 {
            // Really short lines
            salp2 = cbet1 * somg12;
            let t = if comg12 >= 0. {
                somg12 * somg12 / (1. + comg12)
            } else {
                1. - comg12
            };
            calp2 = sbet12 - cbet1 * sbet2 * t;
            (salp2, calp2) = norm(salp2, calp2);
            sig12 = ssig12.atan2(csig12);
        } else if self.n.abs() > 0.1
            || csig12 >= 0.
            || ssig12 >= 6. * self.n.abs() * PI * cbet1 * cbet1
        {
            // The spherical approximation is good enough as a starting point
        } else {
            // Nearly antipodal points: Scale to the astroid problem
            let lam12x = (-slam12).atan2(-clam12);
            let k2 = sbet1 * sbet1 * self.ep2;
            let eps = k2 / (2. * (1. + (1. + k2).sqrt()) + k2);
            let lamscale = self.f * cbet1 * self.a3f(eps) * PI;
            let betscale = lamscale * cbet1;
            let x = lam12x / lamscale;
            let y = sbet12a / betscale;

            if y > -self.tol1 && x > -1. - self.xthresh {
                salp1 = (-x).min(1.);
                calp1 = -(1. - salp1 * salp1).sqrt();
            } else {
                let k = astroid(x, y);
                let omg12a = lamscale * (-x * k / (1. + k));
                (somg12, comg12) = omg12a.sin_cos();
                comg12 = -comg12;
                salp1 = cbet2 * somg12;
                calp1 = sbet12a - cbet2 * sbet1 * somg12 * somg12 / (1. - comg12);
            }
        }

        if salp1 > 0. {
            (salp1, calp1) = norm(salp1, calp1);
        } else {
            salp1 = 1.;
            calp1 = 0.;
        }

        InverseStart {
            sig12,
            salp1,
            calp1,
            salp2,
            calp2,
            dnm,
        }
    }

    /// The longitude difference, λ₁₂, resulting from the azimuth (salp1, calp1)
    /// at the first point, and (when `diffp`) its derivative wrt. the azimuth.
    /// The points are given as (sin β, cos β, dn)
    #[allow(clippy::too_many_arguments)]
    fn lambda12(
        &self,
        bet1: (f64, f64, f64),
        bet2: (f64, f64, f64),
        salp1: f64,
        calp1: f64,
        slam120: f64,
        clam120: f64,
        diffp: bool,
    ) -> Lambda {
        let (sbet1, cbet1, dn1) = bet1;
        let (sbet2, cbet2, dn2) = bet2;

        // Break the degeneracy of equatorial lines
        let calp1 = if sbet1 == 0. && calp1 == 0. {
            -self.tiny
        } else {
            calp1
        };

        let salp0 = salp1 * cbet1;
        let calp0 = calp1.hypot(salp1 * sbet1);

        let somg1 = salp0 * sbet1;
        let comg1 = calp1 * cbet1;
        let (ssig1, csig1) = norm(sbet1, comg1);

        let salp2 = if cbet2 != cbet1 { salp0 / cbet2 } else { salp1 };
        let calp2 = if cbet2 != cbet1 || sbet2.abs() != -sbet1 {
            let t = if cbet1 < -sbet1 {
                (cbet2 - cbet1) * (cbet1 + cbet2)
            } else {
                (sbet1 - sbet2) * (sbet1 + sbet2)
            };
            ((calp1 * cbet1).powi(2) + t).sqrt() / cbet2
        } else {
            calp1.abs()
        };

        let somg2 = salp0 * sbet2;
        let comg2 = calp2 * cbet2;
        let (ssig2, csig2) = norm(sbet2, comg2);

        let sig12 = (0_f64.max(csig1 * ssig2 - ssig1 * csig2) + 0.)
            .atan2(csig1 * csig2 + ssig1 * ssig2);

        let somg12 = 0_f64.max(comg1 * somg2 - somg1 * comg2) + 0.;
        let comg12 = comg1 * comg2 + somg1 * somg2;
        let eta = (somg12 * clam120 - comg12 * slam120)
            .atan2(comg12 * clam120 + somg12 * slam120);

        let k2 = calp0 * calp0 * self.ep2;
        let eps = k2 / (2. * (1. + (1. + k2).sqrt()) + k2);
        let c3a = self.c3f(eps);
        let b312 = sin_series(ssig2, csig2, &c3a) - sin_series(ssig1, csig1, &c3a);
        let domg12 = -self.f * self.a3f(eps) * salp0 * (sig12 + b312);
        let lam12 = eta + domg12;

        let mut dlam12 = 0.;
        if diffp {
            if calp2 == 0. {
                dlam12 = -2. * self.f1 * dn1 / sbet1;
            } else {
                let (_, m12b, _) =
                    self.lengths(eps, sig12, (ssig1, csig1), dn1, (ssig2, csig2), dn2);
                dlam12 = m12b * self.f1 / (calp2 * cbet2);
            }
        }

        Lambda {
            lam12,
            salp2,
            calp2,
            sig12,
            sig1: (ssig1, csig1),
            sig2: (ssig2, csig2),
            eps,
            dlam12,
        }
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn inverse_and_direct() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;

        // Copenhagen (Denmark)--Paris (France), and Copenhagen--Rabat (Morocco).
        // Reference values from Karney's GeodSolve
        let cph = Coor2D::raw(12., 55.);
        let par = Coor2D::raw(2., 49.);
        let rab = Coor2D::raw(7., 34.);

        let d = ellps.geodesic_inverse(&cph, &par)?;
        assert_float_eq!(d.azimuth1, -130.154_060_420_72, abs <= 1e-9);
        assert_float_eq!(d.azimuth2, -138.052_579_418_74, abs <= 1e-9);
        assert_float_eq!(d.distance, 956_066.231_959, abs <= 1e-4);

        let d = ellps.geodesic_inverse(&cph, &rab)?;
        assert_float_eq!(d.azimuth1, -168.489_144_186_66, abs <= 1e-9);
        assert_float_eq!(d.azimuth2, -172.054_619_649_48, abs <= 1e-9);
        assert_float_eq!(d.distance, 2_365_723.367_715, abs <= 1e-4);

        // And the other way round
        let b = ellps.geodesic_direct(&cph, d.azimuth1, d.distance)?;
        assert_float_eq!(b.destination.0, rab.0, abs_all <= 1e-9);
        assert_float_eq!(b.azimuth, d.azimuth2, abs <= 1e-9);

        // Walking backwards: Negative distance
        let back = ellps.geodesic_direct(&rab, b.azimuth, -d.distance)?;
        assert_float_eq!(back.destination.0, cph.0, abs_all <= 1e-9);
        Ok(())
    }

    #[test]
    fn degenerate_cases() -> Result<(), Error> {
        let ellps = Ellipsoid::named("WGS84")?;

        // Coincident points
        let p = Coor2D::raw(12., 55.);
        assert_eq!(ellps.geodesic_inverse(&p, &p)?, GeodesicInverse::default());
        let q = Coor2D::raw(-348., 55.);
        assert_eq!(ellps.distance(&p, &q)?, 0.);

        // Zero distance returns the origin, and the canonicalized azimuth
        let d = ellps.geodesic_direct(&p, 450., 0.)?;
        assert_eq!(d.destination, p);
        assert_eq!(d.azimuth, 90.);
        let d = ellps.geodesic_direct(&p, -540., 0.)?;
        assert_eq!(d.azimuth, -180.);

        // Equatorial antipodes: The geodesic runs over the pole
        let d = ellps.geodesic_inverse(&Coor2D::raw(0., 0.), &Coor2D::raw(180., 0.))?;
        assert_float_eq!(d.distance, 20_003_931.458_6, abs <= 1e-4);
        assert_float_eq!(d.azimuth1, 0., abs <= 1e-9);
        assert_eq!(d.azimuth2, -180.);

        // From the pole, the azimuth is the limit along the given meridian
        let ellps = Ellipsoid::named("GRS80")?;
        let d = ellps.geodesic_inverse(&Coor2D::raw(30., 90.), &Coor2D::raw(30., 0.))?;
        assert_float_eq!(d.azimuth1, -180., abs <= 1e-9);
        assert_float_eq!(d.azimuth2, -180., abs <= 1e-9);
        assert_float_eq!(d.distance, 10_001_965.729_230_457, abs <= 1e-6);

        // And the direct problem, starting at the pole: Southward along
        // the given meridian, to the latitude 1000 km of meridian arc away
        let pole = Coor2D::raw(30., 90.);
        let d = ellps.geodesic_direct(&pole, 180., 1_000_000.)?;
        assert_float_eq!(d.destination[0], 30., abs <= 1e-9);
        assert_float_eq!(d.destination[1], 81.046_232_816_094_69, abs <= 1e-9);
        assert_float_eq!(d.azimuth.abs(), 180., abs <= 1e-9);
        let i = ellps.geodesic_inverse(&pole, &d.destination)?;
        assert_float_eq!(i.distance, 1_000_000., abs <= 1e-6);

        // Bad input
        assert!(matches!(
            ellps.geodesic_direct(&p, 540., 1000.),
            Err(Error::BadParam(..))
        ));
        assert!(matches!(
            ellps.geodesic_inverse(&p, &Coor2D::raw(0., 91.)),
            Err(Error::BadParam(..))
        ));
        Ok(())
    }

    #[test]
    fn pole_and_antimeridian_crossing() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;

        // Northward from 80°N: Passing the pole, longitude jumps by 180°,
        // and the latitude decreases
        let from = Coor2D::raw(10., 80.);
        let d = ellps.geodesic_direct(&from, 0., 2_500_000.)?;
        assert_float_eq!(d.destination[0], -170., abs <= 1e-9);
        assert!(d.destination[1] < 80.);
        assert_eq!(d.azimuth, -180.);
        let back = ellps.geodesic_inverse(&from, &d.destination)?;
        assert_float_eq!(back.distance, 2_500_000., abs <= 1e-6);

        // Eastward across the antimeridian
        let from = Coor2D::raw(179.5, 0.);
        let d = ellps.geodesic_direct(&from, 90., 111_319.490_793_273_6)?;
        assert_float_eq!(d.destination[0], -179.5, abs <= 1e-9);
        assert_float_eq!(d.destination[1], 0., abs <= 1e-12);
        Ok(())
    }

    #[test]
    fn sphere() -> Result<(), Error> {
        let sphere = Ellipsoid::from_a_e2(6_371_000., 0.)?;
        let d = sphere.geodesic_inverse(&Coor2D::raw(0., 0.), &Coor2D::raw(0., 90.))?;
        assert_float_eq!(d.distance, PI / 2. * 6_371_000., abs <= 1e-6);
        assert_eq!(d.azimuth1, 0.);

        let sphere = Ellipsoid::from_a_e2(6_378_137., 0.)?;
        let d = sphere.geodesic_direct(&Coor2D::raw(0., 0.), 90., 111_319.49)?;
        assert_float_eq!(d.destination[0], 1.0, abs <= 1e-7);
        assert_float_eq!(d.destination[1], 0.0, abs <= 1e-12);
        Ok(())
    }

    #[test]
    fn direct_inverse_consistency() -> Result<(), Error> {
        let ellps = Ellipsoid::named("intl")?;
        let from = Coor2D::raw(-75., -40.);
        for azimuth in [-179., -135., -90., -10., 0., 33., 90., 160.] {
            for distance in [1000., 1_000_000., 10_000_000., 19_000_000.] {
                let d = ellps.geodesic_direct(&from, azimuth, distance)?;
                let i = ellps.geodesic_inverse(&from, &d.destination)?;
                assert_float_eq!(i.distance, distance, abs <= 1e-6);
                assert_float_eq!(i.azimuth1, azimuth, abs <= 1e-8);
                assert_float_eq!(i.azimuth2, d.azimuth, abs <= 1e-8);
            }
        }

        // Nearly antipodal points converge as well
        let i = ellps.geodesic_inverse(&Coor2D::raw(0., 0.5), &Coor2D::raw(179.7, -0.5))?;
        let d = ellps.geodesic_direct(&Coor2D::raw(0., 0.5), i.azimuth1, i.distance)?;
        assert_float_eq!(d.destination[0], 179.7, abs <= 1e-8);
        assert_float_eq!(d.destination[1], -0.5, abs <= 1e-8);
        Ok(())
    }
}
