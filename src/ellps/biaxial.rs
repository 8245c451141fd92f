use super::constants::{ELLIPSOID_INDEX, ELLIPSOID_LIST};
use crate::prelude::*;

/// An ellipsoid of revolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7)
    }
}

impl EllipsoidBase for Ellipsoid {
    fn semimajor_axis(&self) -> f64 {
        self.a
    }

    fn flattening(&self) -> f64 {
        self.f
    }
}

/// Constructors for `Ellipsoid`
impl Ellipsoid {
    /// User defined ellipsoid. Unchecked: see [`validated()`](Self::validated)
    #[must_use]
    pub fn new(semimajor_axis: f64, flattening: f64) -> Ellipsoid {
        Ellipsoid {
            a: semimajor_axis,
            f: flattening,
        }
    }

    /// Ellipsoid from the semimajor axis and the squared eccentricity,
    /// validated to satisfy `a > 0` and `0 <= e2 < 1`
    pub fn from_a_e2(semimajor_axis: f64, eccentricity_squared: f64) -> Result<Ellipsoid, Error> {
        if !(0. ..1.).contains(&eccentricity_squared) {
            return Err(Error::MalformedCrs(format!(
                "squared eccentricity must be in [0, 1), got {eccentricity_squared}"
            )));
        }
        let f = 1. - (1. - eccentricity_squared).sqrt();
        Ellipsoid::new(semimajor_axis, f).validated()
    }

    /// Check that the defining parameters describe a real, oblate (or
    /// spherical) ellipsoid
    pub fn validated(self) -> Result<Ellipsoid, Error> {
        if !(self.a.is_finite() && self.a > 0.) {
            return Err(Error::MalformedCrs(format!(
                "semimajor axis must be positive, got {}",
                self.a
            )));
        }
        if !(0. ..1.).contains(&self.f) {
            return Err(Error::MalformedCrs(format!(
                "flattening must be in [0, 1), got {}",
                self.f
            )));
        }
        Ok(self)
    }

    /// Predefined ellipsoid; built-in, or given as a string formatted
    /// (a, rf) tuple, e.g. "6378137, 298.25"
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        // Is it one of the builtins?
        if let Some(&index) = ELLIPSOID_INDEX.get(name) {
            let (_, a, rf, _) = ELLIPSOID_LIST[index];
            return Ok(Ellipsoid::new(a, reciproque(rf)));
        }

        // Remove optional parenthesis
        let name = name.trim();
        let name = name
            .strip_prefix('(')
            .and_then(|n| n.strip_suffix(')'))
            .unwrap_or(name);

        // The "semimajor, reciproque-flattening" form, e.g. "6378137, 298.3"
        let a_and_rf = name.split(',').collect::<Vec<_>>();
        if a_and_rf.len() == 2_usize {
            if let Ok(a) = a_and_rf[0].trim().parse::<f64>() {
                if let Ok(rf) = a_and_rf[1].trim().parse::<f64>() {
                    return Ellipsoid::new(a, reciproque(rf)).validated();
                }
            }
        }

        Err(Error::NotFound(
            String::from(name),
            String::from(": Ellipsoid::named()"),
        ))
    }
}

// EPSG convention: zero reciproque flattening indicates zero flattening
fn reciproque(rf: f64) -> f64 {
    if rf != 0.0 {
        1.0 / rf
    } else {
        rf
    }
}

// ----- Tests ---------------------------------------------------------------------
