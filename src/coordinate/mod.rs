use crate::prelude::*;

pub mod batch;
pub mod coor2d;
pub mod coor3d;
pub mod coor4d;
pub mod set;
mod tuple;

pub use tuple::CoordinateTuple;

/// Methods for changing the coordinate representation of angles.
/// Dimensionality untold, the methods operate on the first two
/// dimensions only.
pub trait AngularUnits {
    /// Transform the first two elements of a coordinate tuple from degrees to radians
    fn to_radians(self) -> Self;

    /// Transform the first two elements of a coordinate tuple from radians to degrees
    fn to_degrees(self) -> Self;
}

macro_rules! angular_units {
    ($type:ty) => {
        impl AngularUnits for $type {
            #[must_use]
            fn to_radians(self) -> Self {
                let mut res = self;
                res.0[0] = self.0[0].to_radians();
                res.0[1] = self.0[1].to_radians();
                res
            }

            #[must_use]
            fn to_degrees(self) -> Self {
                let mut res = self;
                res.0[0] = self.0[0].to_degrees();
                res.0[1] = self.0[1].to_degrees();
                res
            }
        }
    };
}

angular_units!(Coor2D);
angular_units!(Coor3D);
angular_units!(Coor4D);

// ----- Tests ---------------------------------------------------------------------
