/// Generic 4D coordinate tuple, with no fixed interpretation of the elements.
///
/// `Coor4D` is the working representation of the engine: Every element of
/// a [CoordinateSet](crate::prelude::CoordinateSet) is accessed as a
/// `Coor4D`, with missing elements filled in (height as 0, time as NaN).
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Coor4D(pub [f64; 4]);

// ----- C O N S T R U C T O R S ---------------------------------------------

/// Constructors
impl Coor4D {
    /// A `Coor4D` from latitude/longitude/height/time, with the angular input in degrees
    #[must_use]
    pub fn geo(latitude: f64, longitude: f64, height: f64, time: f64) -> Coor4D {
        Coor4D([longitude.to_radians(), latitude.to_radians(), height, time])
    }

    /// A `Coor4D` from longitude/latitude/height/time, with the angular input in degrees
    #[must_use]
    pub fn gis(longitude: f64, latitude: f64, height: f64, time: f64) -> Coor4D {
        Coor4D([longitude.to_radians(), latitude.to_radians(), height, time])
    }

    /// A `Coor4D` from its elements, as given
    #[must_use]
    pub fn raw(first: f64, second: f64, third: f64, fourth: f64) -> Coor4D {
        Coor4D([first, second, third, fourth])
    }

    /// A `Coor4D` consisting of 4 `NaN`s
    #[must_use]
    pub fn nan() -> Coor4D {
        Coor4D([f64::NAN, f64::NAN, f64::NAN, f64::NAN])
    }

    /// A `Coor4D` consisting of 4 `0`s
    #[must_use]
    pub fn origin() -> Coor4D {
        Coor4D([0., 0., 0., 0.])
    }

    /// True if any of the elements is NaN
    #[must_use]
    pub fn has_nan(&self) -> bool {
        self.0.iter().any(|c| c.is_nan())
    }

    /// True if any of the three spatial elements is NaN. The time element
    /// is NaN for coordinates read from 2D and 3D sets
    #[must_use]
    pub fn has_nan_xyz(&self) -> bool {
        self.0[..3].iter().any(|c| c.is_nan())
    }
}

// ----- T E S T S ---------------------------------------------------

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn coor4d() {
        let c = Coor4D::raw(12., 55., 100., 0.).to_radians();
        let d = Coor4D::gis(12., 55., 100., 0.);
        assert_eq!(c, d);
        assert_eq!(d, Coor4D::geo(55., 12., 100., 0.));
        assert!(!d.has_nan());
        assert!(Coor4D::nan().has_nan());
        assert!(Coor4D::raw(1., 2., 3., f64::NAN).has_nan());
        assert!(!Coor4D::raw(1., 2., 3., f64::NAN).has_nan_xyz());
    }
}
