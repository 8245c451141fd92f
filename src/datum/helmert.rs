#![allow(non_snake_case)]
//! The 3 and 7 parameter Helmert transformations, operating in the 3D
//! cartesian space, in the small-angle position vector convention used
//! by the `towgs84` parameter.

use crate::prelude::*;

/// A precomputed Helmert transformation from a local geocentric frame
/// to the WGS84 hub, and (by transposed multiplication) back again
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Helmert {
    T: [f64; 3],
    ROT: [[f64; 3]; 3],
    S: f64,
    rotated: bool,
}

impl Helmert {
    /// `translation` in meters, `rotation` in arc seconds, and `scale`
    /// in parts per million
    #[must_use]
    pub fn new(translation: [f64; 3], rotation: [f64; 3], scale: f64) -> Helmert {
        let R = rotation.map(|r| (r / 3600.).to_radians());
        let rotated = R != [0., 0., 0.];
        Helmert {
            T: translation,
            ROT: rotation_matrix(&R),
            S: 1.0 + scale * 1e-6,
            rotated,
        }
    }

    /// Apply the transformation to a single cartesian coordinate tuple.
    /// The 4th coordinate passes through
    #[must_use]
    pub fn apply(&self, c: &Coor4D, direction: Direction) -> Coor4D {
        let (T, ROT, S) = (&self.T, &self.ROT, self.S);
        let mut c = *c;

        // ----- Forward direction -----

        if direction == Direction::Fwd {
            if self.rotated {
                let x = c[0] * ROT[0][0] + c[1] * ROT[0][1] + c[2] * ROT[0][2];
                let y = c[0] * ROT[1][0] + c[1] * ROT[1][1] + c[2] * ROT[1][2];
                let z = c[0] * ROT[2][0] + c[1] * ROT[2][1] + c[2] * ROT[2][2];
                c[0] = x;
                c[1] = y;
                c[2] = z;
            }

            // scale and offset
            c[0] = S * c[0] + T[0];
            c[1] = S * c[1] + T[1];
            c[2] = S * c[2] + T[2];
            return c;
        }

        // ----- Inverse direction -----

        // Deoffset and unscale
        let x = (c[0] - T[0]) / S;
        let y = (c[1] - T[1]) / S;
        let z = (c[2] - T[2]) / S;

        // Inverse rotation by transposed multiplication
        if self.rotated {
            c[0] = x * ROT[0][0] + y * ROT[1][0] + z * ROT[2][0];
            c[1] = x * ROT[0][1] + y * ROT[1][1] + z * ROT[2][1];
            c[2] = x * ROT[0][2] + y * ROT[1][2] + z * ROT[2][2];
        } else {
            c[0] = x;
            c[1] = y;
            c[2] = z;
        }
        c
    }
}

// ----- R O T A T I O N   M A T R I X ---------------------------------------------

// Small-angle approximation, position vector convention:
//
//       |  1  -rz   ry |
// ROT = |  rz   1  -rx |
//       | -ry   rx   1 |
//
fn rotation_matrix(r: &[f64; 3]) -> [[f64; 3]; 3] {
    let (rx, ry, rz) = (r[0], r[1], r[2]);
    [[1., -rz, ry], [rz, 1., -rx], [-ry, rx, 1.]]
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn translation() {
        // ED50/WGS84, 3 parameter
        let helmert = Helmert::new([-87., -96., -120.], [0.; 3], 0.);
        let c = helmert.apply(&Coor4D::origin(), Fwd);
        assert_eq!(c, Coor4D::raw(-87., -96., -120., 0.));
        let c = helmert.apply(&c, Inv);
        assert_eq!(c, Coor4D::origin());
    }

    #[test]
    fn rotation_and_scale() {
        let a = 6_378_137.;
        let p = Coor4D::raw(a, 0., 0., 0.);

        // One arc second around the z axis moves a point on the x axis
        // towards the positive y axis
        let helmert = Helmert::new([0.; 3], [0., 0., 1.], 0.);
        let c = helmert.apply(&p, Fwd);
        assert_eq!(c[0], a);
        assert!((c[1] - a * (1. / 3600_f64).to_radians()).abs() < 1e-9);
        assert_eq!(c[2], 0.);

        let helmert = Helmert::new([0.; 3], [0.; 3], 1.);
        let c = helmert.apply(&p, Fwd);
        assert!((c[0] - a * (1. + 1e-6)).abs() < 1e-9);
    }

    #[test]
    fn roundtrip() {
        // OSGB36 to WGS84
        let helmert = Helmert::new(
            [446.448, -125.157, 542.06],
            [0.15, 0.247, 0.842],
            -20.489,
        );
        let p = Coor4D::raw(3_909_833.018, -147_097.1376, 5_020_322.459, 0.);
        let q = helmert.apply(&p, Fwd);
        assert!(p.hypot3(&q) > 100.);

        // The transposed small-angle rotation is only approximately inverse
        let r = helmert.apply(&q, Inv);
        assert!(p.hypot3(&r) < 1e-3);
    }
}
