//! The coordinate reference system: an ellipsoid, a datum, and a projection
//! method, resolved from a textual definition by a [Registry].

use crate::authoring::*;
use crate::method::latlong;

mod registry;
pub use registry::Registry;

/// Identification of a [Crs] instance, for logging and bookkeeping.
/// Clones share the identity of their original
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct CrsId(uuid::Uuid);

impl CrsId {
    pub fn new() -> Self {
        CrsId(uuid::Uuid::new_v4())
    }
}

impl Default for CrsId {
    fn default() -> Self {
        CrsId::new()
    }
}

impl core::fmt::Display for CrsId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fully specified, immutable, coordinate reference system
#[derive(Debug, Clone)]
pub struct Crs {
    id: CrsId,
    definition: String,
    ellps: Ellipsoid,
    datum: Datum,
    method: Method,
}

impl Crs {
    /// Assemble a CRS from its resolved parts. The ellipsoid of the method
    /// should be `ellps`
    pub fn new(definition: &str, ellps: Ellipsoid, datum: Datum, method: Method) -> Crs {
        Crs {
            id: CrsId::new(),
            definition: definition.to_string(),
            ellps,
            datum,
            method,
        }
    }

    pub fn id(&self) -> CrsId {
        self.id
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn ellps(&self) -> &Ellipsoid {
        &self.ellps
    }

    pub fn datum(&self) -> &Datum {
        &self.datum
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn kind(&self) -> MethodKind {
        self.method.kind
    }

    // ----- Classification ------------------------------------------------------

    /// Angular coordinates, and no projection
    pub fn is_latlong(&self) -> bool {
        self.method.kind == MethodKind::Geographic
    }

    /// 3D earth centered cartesian coordinates
    pub fn is_geocentric(&self) -> bool {
        self.method.kind == MethodKind::Geocentric
    }

    pub fn is_projected(&self) -> bool {
        self.method.kind == MethodKind::Projected
    }

    /// Datum equality: the ellipsoids agree within 1e-12 (relative) on
    /// the semimajor axis and within 1e-15 (absolute) on the squared
    /// eccentricity, and the datum shift parameters agree
    pub fn is_identical(&self, other: &Crs) -> bool {
        let (a1, es1) = self.spheroid_params();
        let (a2, es2) = other.spheroid_params();
        (a1 - a2).abs() <= 1e-12 * a1.abs().max(a2.abs())
            && (es1 - es2).abs() <= 1e-15
            && self.datum.is_identical(&other.datum)
    }

    /// Semimajor axis and squared eccentricity
    pub fn spheroid_params(&self) -> (f64, f64) {
        (
            self.ellps.semimajor_axis(),
            self.ellps.eccentricity_squared(),
        )
    }

    /// The geographic CRS underlying this one: same ellipsoid and datum,
    /// but no projection
    pub fn derive_latlong(&self) -> Crs {
        if self.is_latlong() {
            return self.clone();
        }
        let mut definition = format!(
            "latlong a={} es={}",
            self.ellps.semimajor_axis(),
            self.ellps.eccentricity_squared()
        );
        match &self.datum {
            Datum::Unknown => {}
            Datum::Grid(grids) => definition += &format!(" nadgrids={grids}"),
            datum => {
                if let Some(p) = datum.parameters() {
                    let p: Vec<String> = p.iter().map(|v| v.to_string()).collect();
                    definition += &format!(" towgs84={}", p.join(","));
                }
            }
        }
        Crs::new(
            &definition,
            self.ellps,
            self.datum.clone(),
            latlong::method(&self.ellps),
        )
    }
}

// ----- T E S T S ------------------------------------------------------------------
