use crate::prelude::*;
use std::f64::consts::FRAC_PI_2;

// ----- Cartesian <--> Geographic conversion ----------------------------------

/// Conversion between geographic coordinates (longitude and latitude in
/// radians, ellipsoidal height in the unit of the semimajor axis) and
/// geocentric cartesian coordinates. The 4th coordinate passes through.
pub trait Cartesians: EllipsoidBase {
    /// Geographic to cartesian conversion.
    ///
    /// Follows the the derivation given by
    /// Bowring ([1976](crate::Bibliography::Bow76) and
    /// [1985](crate::Bibliography::Bow85))
    #[must_use]
    #[allow(non_snake_case)] // make it possible to mimic math notation from original paper
    fn cartesian(&self, geographic: &Coor4D) -> Coor4D {
        let lam = geographic[0];
        let phi = geographic[1];
        let h = geographic[2];
        let t = geographic[3];

        let N = self.prime_vertical_radius_of_curvature(phi);
        let (sinphi, cosphi) = phi.sin_cos();
        let (sinlam, coslam) = lam.sin_cos();

        let X = (N + h) * cosphi * coslam;
        let Y = (N + h) * cosphi * sinlam;
        let Z = (N * (1.0 - self.eccentricity_squared()) + h) * sinphi;

        Coor4D::raw(X, Y, Z, t)
    }

    /// Cartesian to geographic conversion.
    ///
    /// Follows the closed form, non-iterative, algorithm given by
    /// [Fukushima (1999)](crate::Bibliography::Fuk99), as refined by
    /// [Claessens (2019)](crate::Bibliography::Cla19).
    ///
    /// The geocentric origin has no well defined geographic counterpart,
    /// and is reported as [Error::DegenerateGeometry].
    #[allow(non_snake_case)]
    fn geographic(&self, cartesian: &Coor4D) -> Result<Coor4D, Error> {
        let X = cartesian[0];
        let Y = cartesian[1];
        let Z = cartesian[2];
        let t = cartesian[3];

        if X == 0. && Y == 0. && Z == 0. {
            return Err(Error::DegenerateGeometry("geocentric origin"));
        }

        let a = self.semimajor_axis();
        let b = self.semiminor_axis();

        // eccentricity squared, Fukushima's E, Claessens' c3 = 1-c2`
        let es = self.eccentricity_squared();
        let ra = 1. / a;
        // b/a: Fukushima's ec, Claessens' c4
        let ar = b * ra;
        // 1.5 times the fourth power of the eccentricity
        let ce4 = 1.5 * es * es;

        // The longitude is straightforward
        let lam = Y.atan2(X);

        // The perpendicular distance from the point coordinate to the Z-axis (HM eq. 5-28)
        let p = X.hypot(Y);

        // Close to the Z-axis, the full algorithm breaks down: Force the latitude
        // to the relevant pole and compute the height as |Z| - b
        if p < a * 1e-16 {
            let phi = FRAC_PI_2.copysign(Z);
            let h = Z.abs() - b;
            return Ok(Coor4D::raw(lam, phi, h, t));
        }

        let P = ra * p;
        let S0 = ra * Z;
        let C0 = ar * P;

        let A = S0.hypot(C0);
        let F = P * A * A * A - es * C0 * C0 * C0;
        let B = ce4 * S0 * S0 * C0 * C0 * P * (A - ar);

        let S1 = (ar * S0 * A * A * A + es * S0 * S0 * S0) * F - B * S0;
        let C1 = F * F - B * C0;
        let CC = ar * C1;

        let phi = S1.atan2(CC);
        let h = (p * CC.abs() + Z.abs() * S1.abs() - a * CC.hypot(ar * S1)) / CC.hypot(S1);
        Ok(Coor4D::raw(lam, phi, h, t))
    }
}

impl Cartesians for Ellipsoid {}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_to_cart() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        let geo = [
            Coor4D::geo(85., 0., 100000., 0.),
            Coor4D::geo(55., 10., -100000., 0.),
            Coor4D::geo(25., 20., 0., 0.),
            Coor4D::geo(0., -20., 0., 0.),
            Coor4D::geo(-25., 20., 10., 0.),
        ];
        let cart = [
            Coor4D::raw(566_462.633_537_476_8, 0.0, 6_432_020.333_690_127, 0.0),
            Coor4D::raw(3_554_403.475_871_930_4, 626_737.233_120_170_7, 5_119_468.318_659_256, 0.),
            Coor4D::raw(5_435_195.382_145_216, 1_978_249.336_521_975_5, 2_679_074.462_877_277_8, 0.),
            Coor4D::raw(5_993_488.273_261_571, -2_181_451.330_890_750_5, 0., 0.),
            Coor4D::raw(5_435_203.898_652_612, 1_978_252.436_277_167_4, -2_679_078.689_059_895, 0.),
        ];

        for (g, c) in geo.iter().zip(cart.iter()) {
            let computed = ellps.cartesian(g);
            assert!(computed.hypot3(c) < 20e-9);

            // Roundtrip
            let back = ellps.geographic(&computed)?;
            assert!((back[0] - g[0]).abs() < 1e-14);
            assert!((back[1] - g[1]).abs() < 1e-14);
            assert!((back[2] - g[2]).abs() < 1e-8);
        }
        Ok(())
    }

    #[test]
    fn sphere_and_poles() -> Result<(), Error> {
        let sphere = Ellipsoid::new(6_371_000., 0.);
        let geo = Coor4D::geo(-33., 151., 250., 0.);
        let back = sphere.geographic(&sphere.cartesian(&geo))?;
        assert!((back[0] - geo[0]).abs() < 1e-14);
        assert!((back[1] - geo[1]).abs() < 1e-14);
        assert!((back[2] - geo[2]).abs() < 1e-8);

        // On the Z-axis, the latitude is forced to the pole
        let ellps = Ellipsoid::default();
        let south = ellps.geographic(&Coor4D::raw(0., 0., -6_356_852.314_140_347, 0.))?;
        assert_eq!(south[1], -FRAC_PI_2);
        assert!((south[2] - 100.).abs() < 1e-8);

        // ...but the origin itself is degenerate
        assert!(matches!(
            ellps.geographic(&Coor4D::origin()),
            Err(Error::DegenerateGeometry(_))
        ));
        Ok(())
    }
}
