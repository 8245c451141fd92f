//! The ellipsoid of revolution, and the geometry built upon it: auxiliary
//! latitudes, meridian geometry, geocentric cartesian coordinates and geodesics.

mod biaxial;
mod cartesians;
pub(crate) mod constants;
mod geodesics;
mod latitudes;
mod meridians;

pub use biaxial::Ellipsoid;
pub use cartesians::Cartesians;
pub use geodesics::GeodesicDirect;
pub use geodesics::GeodesicInverse;
pub use geodesics::Geodesics;
pub use latitudes::Latitudes;
pub use meridians::Meridians;

/// The defining parameters of an ellipsoid of revolution, and the
/// quantities derived from them.
///
/// Only [`semimajor_axis()`](Self::semimajor_axis) and
/// [`flattening()`](Self::flattening) must be provided by the implementer.
pub trait EllipsoidBase {
    fn semimajor_axis(&self) -> f64;
    fn flattening(&self) -> f64;

    /// The semiminor axis, *b*
    #[must_use]
    fn semiminor_axis(&self) -> f64 {
        self.semimajor_axis() * (1.0 - self.flattening())
    }

    // ----- Eccentricities --------------------------------------------------------

    /// The squared eccentricity *e² = (a² - b²) / a²*.
    #[must_use]
    fn eccentricity_squared(&self) -> f64 {
        let f = self.flattening();
        f * (2_f64 - f)
    }

    /// The eccentricity *e*
    #[must_use]
    fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// The squared second eccentricity *e'² = (a² - b²) / b² = e² / (1 - e²)*
    #[must_use]
    fn second_eccentricity_squared(&self) -> f64 {
        let es = self.eccentricity_squared();
        es / (1.0 - es)
    }

    /// The second eccentricity *e'*
    #[must_use]
    fn second_eccentricity(&self) -> f64 {
        self.second_eccentricity_squared().sqrt()
    }

    // ----- Flattenings -----------------------------------------------------------

    /// The third flattening, *n = (a - b) / (a + b) = f / (2 - f)*
    #[must_use]
    fn third_flattening(&self) -> f64 {
        let f = self.flattening();
        f / (2.0 - f)
    }

    /// The aspect ratio, *b / a  =  1 - f  =  sqrt(1 - e²)*
    #[must_use]
    fn aspect_ratio(&self) -> f64 {
        1.0 - self.flattening()
    }

    // ----- Curvatures ------------------------------------------------------------

    /// The radius of curvature in the prime vertical, *N*, at the
    /// latitude given in radians
    #[must_use]
    fn prime_vertical_radius_of_curvature(&self, latitude: f64) -> f64 {
        let a = self.semimajor_axis();
        if self.flattening() == 0.0 {
            return a;
        }
        a / (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).sqrt()
    }

    /// The meridian radius of curvature, *M*, at the latitude given in radians
    #[must_use]
    fn meridian_radius_of_curvature(&self, latitude: f64) -> f64 {
        let a = self.semimajor_axis();
        if self.flattening() == 0.0 {
            return a;
        }
        let es = self.eccentricity_squared();
        let num = a * (1.0 - es);
        let denom = (1.0 - latitude.sin().powi(2) * es).powf(1.5);
        num / denom
    }
}

// ----- Tests ---------------------------------------------------------------------
