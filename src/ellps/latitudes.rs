use super::constants;
use crate::math::ancillary::sinhpsi_to_tanphi;
use crate::math::*;
use crate::prelude::*;

// ----- Latitudes -------------------------------------------------------------

/// Auxiliary latitudes. All angles in radians
pub trait Latitudes: EllipsoidBase {
    // --- Classic latitudes: geographic, geocentric & reduced ---

    /// Geographic latitude, 𝜙 to geocentric latitude, 𝜃.
    #[must_use]
    fn latitude_geographic_to_geocentric(&self, geographic: f64) -> f64 {
        ((1.0 - self.eccentricity_squared()) * geographic.tan()).atan()
    }

    /// Geocentric latitude, 𝜃 to geographic latitude, 𝜙.
    #[must_use]
    fn latitude_geocentric_to_geographic(&self, geocentric: f64) -> f64 {
        (geocentric.tan() / (1.0 - self.eccentricity_squared())).atan()
    }

    /// Geographic latitude to reduced latitude, 𝛽
    #[must_use]
    fn latitude_geographic_to_reduced(&self, latitude: f64) -> f64 {
        latitude.tan().atan2(1. / self.aspect_ratio())
    }

    /// Reduced latitude, 𝛽, to geographic latitude
    #[must_use]
    fn latitude_reduced_to_geographic(&self, latitude: f64) -> f64 {
        latitude.tan().atan2(self.aspect_ratio())
    }

    /// Geographic latitude to Isometric latitude, 𝜓
    /// (or vice versa if `direction` is [Direction::Inv]).
    #[must_use]
    fn isometric_latitude(&self, latitude: f64, direction: Direction) -> f64 {
        let e = self.eccentricity();
        if direction == Direction::Fwd {
            return gudermannian::inv(latitude) - (e * latitude.sin()).atanh() * e;
        }
        sinhpsi_to_tanphi(latitude.sinh(), e).atan()
    }

    // --- Conformal latitude ---

    /// Obtain the coefficients needed for working with conformal latitudes
    fn coefficients_for_conformal_latitude_computations(&self) -> FourierCoefficients {
        fourier_coefficients(self.third_flattening(), &constants::CONFORMAL)
    }

    /// Geographic latitude, 𝜙, to conformal, 𝜒
    fn latitude_geographic_to_conformal(
        &self,
        geographic_latitude: f64,
        coefficients: &FourierCoefficients,
    ) -> f64 {
        geographic_latitude + fourier::sin(2. * geographic_latitude, &coefficients.fwd)
    }

    /// Conformal latitude, 𝜒, to geographic, 𝜙
    fn latitude_conformal_to_geographic(
        &self,
        conformal_latitude: f64,
        coefficients: &FourierCoefficients,
    ) -> f64 {
        conformal_latitude + fourier::sin(2. * conformal_latitude, &coefficients.inv)
    }
}

impl Latitudes for Ellipsoid {}

// ----- Tests ---------------------------------------------------------------------
