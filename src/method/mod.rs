//! The projection method registry: the built-in catalogue of methods, and
//! the plumbing needed for implementing further methods outside of the crate.
//!
//! A method is described by a [Method] value, carrying its parsed parameters
//! and a pair of [InnerOp]s doing the actual forward and inverse work. The
//! `InnerOp`s operate on longitude/latitude in radians, and overwrite their
//! operands in place.

use crate::authoring::*;
use std::collections::BTreeSet;

mod parameter;
mod parsed_parameters;
mod raw_parameters;

pub use parameter::OpParameter;
pub use parsed_parameters::ParsedParameters;
pub use raw_parameters::chase;
pub use raw_parameters::RawParameters;

mod eqc;
mod geocent;
pub(crate) mod latlong;
mod lcc;
mod merc;
mod tmerc;
mod webmerc;

// ----- B U I L T I N   M E T H O D S -------------------------------------------------

// Install new builtin methods by adding them in the `mod` and
// `BUILTIN_METHODS` blocks above and below

#[rustfmt::skip]
const BUILTIN_METHODS: [(&str, MethodConstructor); 12] = [
    ("eqc",          MethodConstructor(eqc::new)),
    ("geocent",      MethodConstructor(geocent::new)),
    ("lcc",          MethodConstructor(lcc::new)),
    ("merc",         MethodConstructor(merc::new)),
    ("tmerc",        MethodConstructor(tmerc::new)),
    ("utm",          MethodConstructor(tmerc::utm)),
    ("webmerc",      MethodConstructor(webmerc::new)),

    // Aliases
    ("cart",         MethodConstructor(geocent::new)),
    ("latlong",      MethodConstructor(latlong::new)),
    ("longlat",      MethodConstructor(latlong::new)),
    ("latlon",       MethodConstructor(latlong::new)),
    ("lonlat",       MethodConstructor(latlong::new)),
];

/// Look up one of the built-in methods by name
pub(crate) fn builtin(name: &str) -> Result<MethodConstructor, Error> {
    for p in BUILTIN_METHODS {
        if p.0 == name {
            return Ok(p.1);
        }
    }
    Err(Error::NotFound(name.to_string(), ": builtin method".to_string()))
}

/// Parameters handled by the definition resolver, rather than by the
/// individual methods
pub(crate) const COMMON_KEYS: [&str; 13] = [
    "ellps", "a", "rf", "f", "es", "R", "datum", "towgs84", "nadgrids", "units", "no_defs",
    "type", "wktext",
];

// ----- M E T H O D   K I N D -------------------------------------------------------

/// The coordinate space produced by the forward operation of a method
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum MethodKind {
    /// Longitude and latitude: the method is the identity
    Geographic,
    /// 3D earth centered cartesian coordinates
    Geocentric,
    /// Plane coordinates
    Projected,
}

// ----- S T R U C T   M E T H O D C O N S T R U C T O R -----------------------------

/// Blueprint for the instantiation of a method.
///
/// MethodConstructor needs to be a newtype, rather than a type alias,
/// since we must implement the Debug-trait for MethodConstructor (to
/// make auto derive of the Debug-trait work for any derived type).
#[derive(Clone, Copy)]
pub struct MethodConstructor(
    pub fn(parameters: &RawParameters, ellps: &Ellipsoid) -> Result<Method, Error>,
);

// Cannot autoderive the Debug trait
impl core::fmt::Debug for MethodConstructor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "MethodConstructor")
    }
}

// ----- S T R U C T   I N N E R O P ---------------------------------------------------

/// Blueprint for the functions doing the actual transformation work.
/// Returns the number of successfully transformed coordinate tuples.
#[derive(Clone, Copy)]
pub struct InnerOp(pub fn(method: &Method, operands: &mut dyn CoordinateSet) -> usize);

// Cannot autoderive the Debug trait
impl core::fmt::Debug for InnerOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "InnerOp")
    }
}

// ----- S T R U C T   M E T H O D ---------------------------------------------------

/// The defining parameters and functions for a projection method
#[derive(Debug, Clone)]
pub struct Method {
    pub name: &'static str,
    pub kind: MethodKind,
    pub fwd: InnerOp,
    pub inv: InnerOp,
    pub params: ParsedParameters,
}

impl Method {
    pub fn new(
        name: &'static str,
        kind: MethodKind,
        fwd: InnerOp,
        inv: InnerOp,
        params: ParsedParameters,
    ) -> Method {
        Method {
            name,
            kind,
            fwd,
            inv,
            params,
        }
    }

    /// Helper for implementation of methods: Instantiate a `Method` for the
    /// simple (and common) case, where the constructor does not need to set
    /// any other parameters than the ones given in the definition
    pub fn plain(
        name: &'static str,
        kind: MethodKind,
        fwd: InnerOp,
        inv: InnerOp,
        parameters: &RawParameters,
        ellps: &Ellipsoid,
        gamut: &[OpParameter],
    ) -> Result<Method, Error> {
        let params = ParsedParameters::new(parameters, ellps, gamut)?;
        Ok(Method::new(name, kind, fwd, inv, params))
    }

    /// Operate in the given direction, returning the number of successes
    pub fn apply(&self, operands: &mut dyn CoordinateSet, direction: Direction) -> usize {
        if direction == Direction::Fwd {
            return self.fwd.0(self, operands);
        }
        self.inv.0(self, operands)
    }

    pub fn ellps(&self) -> &Ellipsoid {
        self.params.ellps()
    }

    /// Same method, with the same parameter values
    pub fn is_equivalent(&self, other: &Method) -> bool {
        self.name == other.name && self.kind == other.kind && self.params.same_as(&other.params)
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

/// Split a (normalized) definition into a map of key-value pairs. The first
/// key-without-value is the name of the method, as is the value of a PROJ
/// style `proj=` element. Flags are given the value `true`.
pub fn split_into_parameters(definition: &str) -> BTreeMap<String, String> {
    let mut params = BTreeMap::new();
    for element in definition.split_whitespace() {
        let element = element.trim_start_matches('+');
        let (key, value) = match element.split_once('=') {
            Some(("proj", value)) => ("name", value),
            Some((key, value)) => (key, value),
            None => {
                // If the first arg is a key-without-value, it is the name of the method
                if params.is_empty() {
                    ("name", element)
                } else {
                    (element, "true")
                }
            }
        };
        params.insert(String::from(key), String::from(value));
    }
    params
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitting() {
        let p = split_into_parameters("utm zone=32 south");
        assert_eq!(p["name"], "utm");
        assert_eq!(p["zone"], "32");
        assert_eq!(p["south"], "true");

        let p = split_into_parameters("+proj=utm +zone=32 +south");
        assert_eq!(p["name"], "utm");
        assert_eq!(p["south"], "true");
    }

    #[test]
    fn builtins() -> Result<(), Error> {
        let globals = BTreeMap::new();
        let ellps = Ellipsoid::default();

        assert!(matches!(builtin("pipeline"), Err(Error::NotFound(_, _))));

        let constructor = builtin("longlat")?;
        let raw = RawParameters::new("longlat", &globals);
        let method = constructor.0(&raw, &ellps)?;
        assert_eq!(method.name, "latlong");
        assert_eq!(method.kind, MethodKind::Geographic);

        let raw = RawParameters::new("utm zone=32", &globals);
        let utm = builtin("utm")?.0(&raw, &ellps)?;
        assert_eq!(utm.kind, MethodKind::Projected);
        assert!(utm.is_equivalent(&utm.clone()));
        assert!(!utm.is_equivalent(&method));

        let raw = RawParameters::new("utm zone=33", &globals);
        let utm33 = builtin("utm")?.0(&raw, &ellps)?;
        assert!(!utm.is_equivalent(&utm33));
        Ok(())
    }
}
