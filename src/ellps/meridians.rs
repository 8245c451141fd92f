use super::constants::MERIDIAN_ARC_COEFFICIENTS;
use crate::math::taylor::horner;
use crate::prelude::*;
use std::f64::consts::FRAC_PI_2;

// ----- Meridian geometry -----------------------------------------------------
pub trait Meridians: EllipsoidBase {
    /// The Normalized Meridian Arc Unit, *Qn*, is the mean length of one radian
    /// of the meridian. "Normalized", because we measure it in units of the
    /// semimajor axis, *a*.
    ///
    /// König und Weise p.50 (96), p.19 (38b), p.5 (2), here using the extended
    /// version from [Karney 2011](crate::Bibliography::Kar11) eq. (29)
    #[must_use]
    fn normalized_meridian_arc_unit(&self) -> f64 {
        let n = self.third_flattening();
        horner(n * n, &MERIDIAN_ARC_COEFFICIENTS) / (1. + n)
    }

    /// The rectifying radius, *A*, is the radius of a sphere of the same circumference
    /// as the length of a full meridian on the ellipsoid.
    #[must_use]
    fn rectifying_radius(&self) -> f64 {
        let n = self.third_flattening();
        self.semimajor_axis() * horner(n * n, &MERIDIAN_ARC_COEFFICIENTS) / ((1. + n) * (1. + n))
    }

    /// The Meridian Quadrant, *Qm*, is the distance from the equator to one of the poles.
    /// i.e. *π/2 · Qn · a*, where *Qn* is the
    /// [normalized meridian arc unit](Meridians::normalized_meridian_arc_unit)
    #[must_use]
    fn meridian_quadrant(&self) -> f64 {
        self.semimajor_axis() * FRAC_PI_2 * self.normalized_meridian_arc_unit()
    }
}

impl Meridians for Ellipsoid {}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meridian_geometry() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        assert!((ellps.normalized_meridian_arc_unit() - 0.998_324_298_423_041_5).abs() < 1e-13);
        assert!((ellps.rectifying_radius() - 6_356_774.720_017_125).abs() < 1e-9);
        assert!((4.0 * ellps.meridian_quadrant() - 40_007_862.916_921_8).abs() < 1e-7);

        // On the sphere, the meridian quadrant is a quarter of the great circle
        let sphere = Ellipsoid::new(6_371_000., 0.);
        assert_eq!(sphere.normalized_meridian_arc_unit(), 1.);
        assert!((sphere.meridian_quadrant() - 6_371_000. * FRAC_PI_2).abs() < 1e-9);
        Ok(())
    }
}
