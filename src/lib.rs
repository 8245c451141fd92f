//! Ellipsoidal geodesy and map projection.
//!
//! The crate models a coordinate reference system ([`Crs`](crs::Crs)) as an
//! ellipsoid, a datum and a projection method, and provides
//!
//! - forward and inverse projection of coordinate batches
//!   ([`engine::project_forward`], [`engine::project_inverse`]),
//! - CRS to CRS transformation through an explicit, inspectable
//!   pipeline of steps ([`engine::Pipeline`], [`engine::transform`]),
//! - geocentric/geodetic conversion ([`engine::geodetic_to_geocentric`],
//!   [`engine::geocentric_to_geodetic`]),
//! - the direct and inverse geodesic problems on the ellipsoid
//!   ([`ellps::Geodesics`], [`engine::geodesic_direct`],
//!   [`engine::geodesic_inverse`]).
//!
//! CRS definitions are resolved by a [`Registry`](crs::Registry), which
//! carries the built-in projection methods, any methods registered by the
//! user, and a set of global default parameters:
//!
//! ```
//! use geotrans::prelude::*;
//! let registry = Registry::new();
//! let geo = registry.crs("latlong")?;
//! let utm = registry.crs("utm zone=32")?;
//! let mut data = [Coor2D::raw(12., 55.)];
//! transform(&geo, &utm, &mut data, false)?;
//! assert!((data[0][0] - 691875.632139661).abs() < 1e-6);
//! # Ok::<(), geotrans::Error>(())
//! ```

pub mod coordinate;
pub mod crs;
pub mod datum;
pub mod ellps;
pub mod engine;
pub mod math;
pub mod method;
pub mod units;

use std::io;
use thiserror::Error;

/// The bread-and-butter, shrink-wrapped and ready to use
pub mod prelude {
    pub use crate::coordinate::batch::CoordinateBatch;
    pub use crate::coordinate::coor2d::Coor2D;
    pub use crate::coordinate::coor3d::Coor3D;
    pub use crate::coordinate::coor4d::Coor4D;
    pub use crate::coordinate::set::CoordinateSet;
    pub use crate::coordinate::AngularUnits;
    pub use crate::coordinate::CoordinateTuple;
    pub use crate::crs::Crs;
    pub use crate::crs::Registry;
    pub use crate::datum::Datum;
    pub use crate::ellps::Cartesians;
    pub use crate::ellps::Ellipsoid;
    pub use crate::ellps::EllipsoidBase;
    pub use crate::ellps::GeodesicDirect;
    pub use crate::ellps::GeodesicInverse;
    pub use crate::ellps::Geodesics;
    pub use crate::ellps::Latitudes;
    pub use crate::ellps::Meridians;
    pub use crate::engine::destination;
    pub use crate::engine::ellipsoid_distance;
    pub use crate::engine::geocentric_to_geodetic;
    pub use crate::engine::geocentric_to_geodetic_copy;
    pub use crate::engine::geodesic_direct;
    pub use crate::engine::geodesic_inverse;
    pub use crate::engine::geodetic_to_geocentric;
    pub use crate::engine::geodetic_to_geocentric_copy;
    pub use crate::engine::project_forward;
    pub use crate::engine::project_forward_copy;
    pub use crate::engine::project_inverse;
    pub use crate::engine::project_inverse_copy;
    pub use crate::engine::transform;
    pub use crate::engine::transform_copy;
    pub use crate::engine::Pipeline;
    pub use crate::engine::Stage;
    pub use crate::engine::Step;
    pub use crate::Direction;
    pub use crate::Error;
}

/// Preamble for projection method modules (built-in or user defined)
pub mod authoring {
    pub use crate::prelude::*;

    pub use crate::method::InnerOp;
    pub use crate::method::Method;
    pub use crate::method::MethodConstructor;
    pub use crate::method::MethodKind;
    pub use crate::method::OpParameter;
    pub use crate::method::ParsedParameters;
    pub use crate::method::RawParameters;

    pub use crate::math::*;

    pub use log::debug;
    pub use log::error;
    pub use log::trace;
    pub use log::warn;

    pub use std::collections::BTreeMap;
}

/// The crate wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error")]
    Io(#[from] io::Error),

    #[error("error: {0}")]
    General(&'static str),

    #[error("{0} not found{1}")]
    NotFound(String, String),

    #[error("missing required parameter {0}")]
    MissingParam(String),

    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),

    #[error("malformed CRS: {0}")]
    MalformedCrs(String),

    #[error("unsupported coordinate shape (expected {expected}, found {found})")]
    Shape { expected: &'static str, found: usize },

    #[error("no transformation path from '{0}' to '{1}'")]
    Unconvertible(String, String),

    #[error("no convergence: {0}")]
    NonConvergence(&'static str),

    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),
}

/// `Fwd`: Indicate that a two-way operator, function, or method,
/// should run in the *forward* direction.
/// `Inv`: Indicate that a two-way operator, function, or method,
/// should run in the *inverse* direction.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Direction {
    Fwd,
    Inv,
}

/// Literature, that has been useful in designing and implementing this library.
pub enum Bibliography {
    /// B.R. Bowring (1976): *Transformation from spatial to geographical coordinates*.
    /// Survey Review 23(181), pp. 323–327.
    Bow76,

    /// B.R. Bowring (1985): *The accuracy of geodetic latitude and height equations*.
    /// Survey Review, 28(218), pp.202-206,
    /// [DOI](https://doi.org/10.1179/sre.1985.28.218.202)
    Bow85,

    /// S.J. Claessens (2019): *Efficient transformation from Cartesian to geodetic coordinates*.
    /// Computers and Geosciences, Vol. 133, article 104307
    /// [DOI](https://doi.org/10.1016/j.cageo.2019.104307)
    Cla19,

    /// Toshio Fukushima (1999): *Fast transform from geocentric to geodetic coordinates*.
    /// Journal of Geodesy, 73(11), pp.603–610
    /// [DOI](https://doi.org/10.1007/s001900050271)
    Fuk99,

    /// Charles F.F. Karney (2011): *Transverse Mercator with an accuracy of a few nanometers*.
    /// J. Geodesy. 85(8): 475–485.
    /// [DOI](https://doi.org/10.1007/s00190-011-0445-3).
    Kar11,

    /// Charles F.F. Karney (2013) Algorithms for geodesics. Journal of Geodesy 87, 43–55.
    /// [DOI](https://doi.org/10.1007/s00190-012-0578-z)
    Kar13,

    /// L. Krüger (1912). Konforme Abbildung des Erdellipsoids in der Ebene.
    /// Royal Prussian Geodetic Institute, New Series 52.
    /// [DOI](https://dx.doi.org/10.2312/GFZ.b103-krueger28).
    Kru12,

    /// John P. Snyder (1987): *Map Projections: A Working Manual*.
    /// USGS Professional Paper 1395.
    /// [DOI](https://doi.org/10.3133/pp1395)
    Sny87,
}
