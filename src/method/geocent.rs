//! Geographical to geocentric cartesian (and v.v.) conversion: The projection
//! method of a geocentric CRS
use crate::authoring::*;

// ----- F O R W A R D --------------------------------------------------------------

fn fwd(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    let ellps = method.ellps();
    let mut successes = 0;
    for i in 0..operands.len() {
        let coord = ellps.cartesian(&operands.get_coord(i));
        if !coord.has_nan_xyz() {
            successes += 1;
        }
        operands.set_coord(i, &coord);
    }
    successes
}

// ----- I N V E R S E --------------------------------------------------------------

fn inv(method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    let ellps = method.ellps();
    let mut successes = 0;
    for i in 0..operands.len() {
        let coord = match ellps.geographic(&operands.get_coord(i)) {
            Ok(coord) => coord,
            Err(e) => {
                trace!("geocent: {e}");
                Coor4D::nan()
            }
        };
        if !coord.has_nan_xyz() {
            successes += 1;
        }
        operands.set_coord(i, &coord);
    }
    successes
}

// ----- C O N S T R U C T O R ------------------------------------------------------

pub const GAMUT: [OpParameter; 0] = [];

pub fn new(parameters: &RawParameters, ellps: &Ellipsoid) -> Result<Method, Error> {
    Method::plain(
        "geocent",
        MethodKind::Geocentric,
        InnerOp(fwd),
        InnerOp(inv),
        parameters,
        ellps,
        &GAMUT,
    )
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() -> Result<(), Error> {
        let raw = RawParameters::new("geocent", &BTreeMap::new());
        let geocent = new(&raw, &Ellipsoid::named("GRS80")?)?;

        let geo = [Coor3D::gis(12., 55., 100.)];
        let mut operands = geo;
        assert_eq!(geocent.apply(&mut operands, Direction::Fwd), 1);
        assert!((operands[0][0] - 3_586_525.761_057_517).abs() < 1e-6);
        assert_eq!(geocent.apply(&mut operands, Direction::Inv), 1);
        assert!((operands[0][0] - geo[0][0]).abs() < 1e-14);
        assert!((operands[0][1] - geo[0][1]).abs() < 1e-14);
        assert!((operands[0][2] - 100.).abs() < 1e-8);

        // The origin is not convertible
        let mut operands = [Coor3D::origin()];
        assert_eq!(geocent.apply(&mut operands, Direction::Inv), 0);
        assert!(operands[0][0].is_nan());
        Ok(())
    }
}
