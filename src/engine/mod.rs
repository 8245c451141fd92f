//! The computational core: forward and inverse projection of coordinate
//! sets, CRS to CRS transformation, geocentric conversion, and the
//! geodesic problems, all operating on a resolved [Crs].
//!
//! Every operation comes in an in-place form, overwriting the operands
//! and returning the number of successfully converted points, and a
//! copying `_copy` form, leaving the input untouched. Angular coordinates
//! are in degrees, unless the `radians` flag is set.

use crate::authoring::*;
use crate::units;

mod geocentric;
mod geodesic;
mod pipeline;
mod project;

pub use geocentric::geocentric_to_geodetic;
pub use geocentric::geocentric_to_geodetic_copy;
pub use geocentric::geodetic_to_geocentric;
pub use geocentric::geodetic_to_geocentric_copy;
pub use geodesic::destination;
pub use geodesic::ellipsoid_distance;
pub use geodesic::geodesic_direct;
pub use geodesic::geodesic_inverse;
pub use pipeline::transform;
pub use pipeline::transform_copy;
pub use pipeline::Pipeline;
pub use pipeline::Stage;
pub use pipeline::Step;
pub use project::project_forward;
pub use project::project_forward_copy;
pub use project::project_inverse;
pub use project::project_inverse_copy;

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

/// The geocentric origin has no geographic counterpart. Check for it before
/// touching the operands
fn check_origin(operands: &dyn CoordinateSet) -> Result<(), Error> {
    for i in 0..operands.len() {
        let c = operands.get_coord(i);
        if c[0] == 0. && c[1] == 0. && c[2] == 0. {
            return Err(Error::DegenerateGeometry("geocentric origin"));
        }
    }
    Ok(())
}

fn report(operation: &str, successes: usize, n: usize) {
    if successes < n {
        warn!("{operation}: {} of {n} points could not be converted", n - successes);
    }
}
