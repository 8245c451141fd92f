//! Longitude/latitude: The projection method of a geographic CRS. Does nothing,
//! and is good at it
use crate::authoring::*;

// ----- F O R W A R D   A N D   I N V E R S E ---------------------------------------

fn noop(_method: &Method, operands: &mut dyn CoordinateSet) -> usize {
    operands.len()
}

// ----- C O N S T R U C T O R -------------------------------------------------------

pub const GAMUT: [OpParameter; 0] = [];

pub fn new(parameters: &RawParameters, ellps: &Ellipsoid) -> Result<Method, Error> {
    let params = ParsedParameters::new(parameters, ellps, &GAMUT)?;
    Ok(Method::new(
        "latlong",
        MethodKind::Geographic,
        InnerOp(noop),
        InnerOp(noop),
        params,
    ))
}

/// The geographic method on a given ellipsoid
pub(crate) fn method(ellps: &Ellipsoid) -> Method {
    let params = ParsedParameters::bare("latlong", ellps);
    Method::new(
        "latlong",
        MethodKind::Geographic,
        InnerOp(noop),
        InnerOp(noop),
        params,
    )
}

// ----- T E S T S -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_change() -> Result<(), Error> {
        let ellps = Ellipsoid::named("intl")?;
        let raw = RawParameters::new("latlong", &BTreeMap::new());
        let latlong = new(&raw, &ellps)?;
        assert!(latlong.is_equivalent(&method(&ellps)));

        let mut operands = [Coor3D::raw(12., 55., 100.)];
        assert_eq!(latlong.apply(&mut operands, Direction::Fwd), 1);
        assert_eq!(operands[0], Coor3D::raw(12., 55., 100.));
        assert_eq!(latlong.apply(&mut operands, Direction::Inv), 1);
        assert_eq!(operands[0], Coor3D::raw(12., 55., 100.));
        Ok(())
    }
}
