use super::*;

// ----- S T A G E S   A N D   S T E P S -----------------------------------------------

/// The kind of coordinates at a given point of a [Pipeline]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Stage {
    /// Longitude, latitude (radians) and ellipsoidal height
    Geographic,
    /// Earth centered cartesian coordinates
    Geocentric,
    /// Plane coordinates of a projected CRS
    Projected,
}

impl Stage {
    /// The native stage of `crs`
    pub fn of(crs: &Crs) -> Stage {
        match crs.kind() {
            MethodKind::Geographic => Stage::Geographic,
            MethodKind::Geocentric => Stage::Geocentric,
            MethodKind::Projected => Stage::Projected,
        }
    }
}

/// The transitions between [Stage]s
#[derive(Debug, Clone)]
pub enum Step {
    /// Projected to geographic
    InverseProject(Crs),
    /// Geographic to geocentric
    GeodeticToGeocentric(Ellipsoid),
    /// Geocentric to geocentric, through the WGS84 hub
    DatumShift { from: Datum, to: Datum },
    /// Geocentric to geographic
    GeocentricToGeodetic(Ellipsoid),
    /// Geographic to projected
    ForwardProject(Crs),
}

impl Step {
    /// The stages before and after the step
    pub fn stages(&self) -> (Stage, Stage) {
        match self {
            Step::InverseProject(_) => (Stage::Projected, Stage::Geographic),
            Step::GeodeticToGeocentric(_) => (Stage::Geographic, Stage::Geocentric),
            Step::DatumShift { .. } => (Stage::Geocentric, Stage::Geocentric),
            Step::GeocentricToGeodetic(_) => (Stage::Geocentric, Stage::Geographic),
            Step::ForwardProject(_) => (Stage::Geographic, Stage::Projected),
        }
    }

    /// Run the step. Angles are in radians. Points that cannot be handled
    /// are set to NaN
    fn apply(&self, operands: &mut dyn CoordinateSet) -> Result<(), Error> {
        match self {
            Step::InverseProject(crs) => {
                crs.method().apply(operands, Direction::Inv);
            }
            Step::ForwardProject(crs) => {
                crs.method().apply(operands, Direction::Fwd);
            }
            Step::GeodeticToGeocentric(ellps) => {
                for i in 0..operands.len() {
                    let c = ellps.cartesian(&operands.get_coord(i));
                    operands.set_coord(i, &c);
                }
            }
            Step::GeocentricToGeodetic(ellps) => {
                for i in 0..operands.len() {
                    let c = ellps
                        .geographic(&operands.get_coord(i))
                        .unwrap_or_else(|_| Coor4D::nan());
                    operands.set_coord(i, &c);
                }
            }
            Step::DatumShift { from, to } => {
                for i in 0..operands.len() {
                    let c = from.to_wgs84(&operands.get_coord(i))?;
                    let c = to.from_wgs84(&c)?;
                    operands.set_coord(i, &c);
                }
            }
        }
        Ok(())
    }
}

// ----- T H E   P I P E L I N E -------------------------------------------------------

/// The steps taking coordinates from one CRS to another.
///
/// If the two CRS are datum-identical, the pipeline only consists of the
/// projection steps needed (if any). Otherwise the coordinates take the
/// long way round, through geocentric space:
///
/// ```txt
/// Projected --InverseProject--> Geographic --GeodeticToGeocentric--> Geocentric
///     --DatumShift--> Geocentric
///     --GeocentricToGeodetic--> Geographic --ForwardProject--> Projected
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    source: Crs,
    target: Crs,
    steps: Vec<Step>,
}

impl Pipeline {
    /// Plan the conversion from `src` to `dest`. Fails with
    /// [Error::Unconvertible] if the two CRS are not datum-identical, and
    /// at least one of them lacks a parametric datum shift
    pub fn plan(src: &Crs, dest: &Crs) -> Result<Pipeline, Error> {
        let mut steps = Vec::new();
        let (from, to) = (Stage::of(src), Stage::of(dest));

        if src.is_identical(dest) {
            if from != to || !src.method().is_equivalent(dest.method()) {
                steps.extend(to_geographic(src));
                steps.extend(from_geographic(dest));
            }
        } else {
            if !(src.datum().is_shiftable() && dest.datum().is_shiftable()) {
                warn!(
                    "No datum shift between '{}' and '{}'",
                    src.definition(),
                    dest.definition()
                );
                return Err(Error::Unconvertible(
                    src.definition().to_string(),
                    dest.definition().to_string(),
                ));
            }
            if from != Stage::Geocentric {
                steps.extend(to_geographic(src));
                steps.push(Step::GeodeticToGeocentric(*src.ellps()));
            }
            steps.push(Step::DatumShift {
                from: src.datum().clone(),
                to: dest.datum().clone(),
            });
            if to != Stage::Geocentric {
                steps.push(Step::GeocentricToGeodetic(*dest.ellps()));
                steps.extend(from_geographic(dest));
            }
        }

        debug!(
            "Pipeline '{}' -> '{}': {:?}",
            src.definition(),
            dest.definition(),
            steps.iter().map(|s| s.stages()).collect::<Vec<_>>()
        );
        Ok(Pipeline {
            source: src.clone(),
            target: dest.clone(),
            steps,
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn source(&self) -> &Crs {
        &self.source
    }

    pub fn target(&self) -> &Crs {
        &self.target
    }

    /// Run the pipeline over `operands`, which are given (and returned) in
    /// degrees for geographic CRS, unless `radians`. Returns the number of
    /// points successfully converted. Failed points are set to NaN.
    ///
    /// The operands are left untouched if the pipeline fails as a whole.
    pub fn apply(&self, operands: &mut dyn CoordinateSet, radians: bool) -> Result<usize, Error> {
        units::check_shape(operands)?;
        if self.source.is_geocentric() || self.target.is_geocentric() {
            units::check_shape_3d(operands)?;
        }
        let n = operands.len();
        if self.steps.is_empty() {
            return Ok(n);
        }
        if self.source.is_geocentric() {
            check_origin(operands)?;
        }

        // Work on a 4D scratch copy, so heights are available for the
        // geocentric steps, even for 2D operands
        let mut scratch: Vec<Coor4D> = (0..n).map(|i| operands.get_coord(i)).collect();
        if self.source.is_latlong() && !radians {
            units::degrees_to_radians(&mut scratch);
        }
        for step in &self.steps {
            trace!("Pipeline step {:?}", step.stages());
            step.apply(&mut scratch)?;
        }
        if self.target.is_latlong() && !radians {
            units::radians_to_degrees(&mut scratch);
        }

        for (i, c) in scratch.iter().enumerate() {
            operands.set_coord(i, c);
        }
        let successes = scratch
            .iter()
            .filter(|c| !(c[0].is_nan() || c[1].is_nan()))
            .count();
        report("transform", successes, n);
        Ok(successes)
    }
}

fn to_geographic(crs: &Crs) -> Option<Step> {
    match Stage::of(crs) {
        Stage::Geographic => None,
        Stage::Geocentric => Some(Step::GeocentricToGeodetic(*crs.ellps())),
        Stage::Projected => Some(Step::InverseProject(crs.clone())),
    }
}

fn from_geographic(crs: &Crs) -> Option<Step> {
    match Stage::of(crs) {
        Stage::Geographic => None,
        Stage::Geocentric => Some(Step::GeodeticToGeocentric(*crs.ellps())),
        Stage::Projected => Some(Step::ForwardProject(crs.clone())),
    }
}

// ----- T R A N S F O R M -------------------------------------------------------------

/// Transform `operands` from `src` to `dest`: plan a [Pipeline] and apply it
pub fn transform(
    src: &Crs,
    dest: &Crs,
    operands: &mut dyn CoordinateSet,
    radians: bool,
) -> Result<usize, Error> {
    units::check_shape(operands)?;
    Pipeline::plan(src, dest)?.apply(operands, radians)
}

/// Copying variant of [transform]
pub fn transform_copy<T>(src: &Crs, dest: &Crs, operands: &T, radians: bool) -> Result<T, Error>
where
    T: CoordinateSet + Clone,
{
    let mut result = operands.clone();
    transform(src, dest, &mut result, radians)?;
    Ok(result)
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn stages(pipeline: &Pipeline) -> Vec<(Stage, Stage)> {
        pipeline.steps().iter().map(|s| s.stages()).collect()
    }

    #[test]
    fn planning() -> Result<(), Error> {
        use Stage::*;
        let registry = Registry::new();
        let geo = registry.crs("latlong")?;
        let utm32 = registry.crs("utm zone=32")?;
        let utm33 = registry.crs("utm zone=33")?;
        let cart = registry.crs("geocent")?;
        let ed50 = registry.crs("utm zone=32 datum=ED50")?;
        let wgs84 = registry.crs("latlong datum=WGS84")?;

        assert!(Pipeline::plan(&geo, &geo)?.steps().is_empty());
        assert!(Pipeline::plan(&utm32, &registry.crs("utm zone=32")?)?.steps().is_empty());
        assert_eq!(stages(&Pipeline::plan(&geo, &utm32)?), [(Geographic, Projected)]);
        assert_eq!(
            stages(&Pipeline::plan(&utm32, &utm33)?),
            [(Projected, Geographic), (Geographic, Projected)]
        );
        assert_eq!(
            stages(&Pipeline::plan(&cart, &utm32)?),
            [(Geocentric, Geographic), (Geographic, Projected)]
        );

        let pipeline = Pipeline::plan(&ed50, &wgs84)?;
        assert_eq!(
            stages(&pipeline),
            [
                (Projected, Geographic),
                (Geographic, Geocentric),
                (Geocentric, Geocentric),
                (Geocentric, Geographic)
            ]
        );
        assert!(matches!(pipeline.steps()[2], Step::DatumShift { .. }));
        assert_eq!(pipeline.source().id(), ed50.id());
        assert_eq!(pipeline.target().id(), wgs84.id());

        // No datum information
        let intl = registry.crs("latlong ellps=intl")?;
        assert!(matches!(
            Pipeline::plan(&intl, &wgs84),
            Err(Error::Unconvertible(..))
        ));
        let nad27 = registry.crs("latlong datum=NAD27")?;
        assert!(matches!(
            Pipeline::plan(&nad27, &wgs84),
            Err(Error::Unconvertible(..))
        ));
        Ok(())
    }

    #[test]
    fn identity() -> Result<(), Error> {
        let registry = Registry::new();
        for definition in ["latlong", "utm zone=32", "geocent", "EPSG:23032"] {
            let crs = registry.crs(definition)?;
            let data = [Coor3D::raw(12.123_456_789, 55.987_654_321, 100.)];
            for radians in [false, true] {
                let result = transform_copy(&crs, &crs, &data, radians)?;
                assert_eq!(result, data);
            }
        }
        Ok(())
    }

    #[test]
    fn projections() -> Result<(), Error> {
        let registry = Registry::new();
        let geo = registry.crs("latlong")?;
        let utm32 = registry.crs("utm zone=32")?;
        let utm33 = registry.crs("utm zone=33")?;

        let mut data = vec![Coor2D::raw(12., 55.), Coor2D::raw(15., 60.)];
        let original = data.clone();
        assert_eq!(transform(&geo, &utm32, &mut data, false)?, 2);
        assert!(data[0].hypot2(&Coor2D::raw(691_875.632_139_661, 6_098_907.825_005_012)) < 5e-6);

        // Across zones
        let zone33 = transform_copy(&utm32, &utm33, &data, false)?;
        let back = transform_copy(&utm33, &geo, &zone33, false)?;
        for i in 0..2 {
            assert_float_eq!(back[i].0, original[i].0, abs_all <= 1e-9);
        }
        Ok(())
    }

    #[test]
    fn datum_shift() -> Result<(), Error> {
        let registry = Registry::new();
        let ed50 = registry.crs("utm zone=32 ellps=intl towgs84=-87,-98,-121")?;
        let etrs89 = registry.crs("EPSG:25832")?;

        let data = [Coor3D::raw(691_875., 6_098_907., 100.)];
        let mut shifted = data;
        assert_eq!(transform(&ed50, &etrs89, &mut shifted, false)?, 1);

        // ED50 to ETRS89 in Denmark: some 85 m west and 205 m south
        let dx = shifted[0][0] - data[0][0];
        let dy = shifted[0][1] - data[0][1];
        assert!(dx < -50. && dx > -150.);
        assert!(dy < -150. && dy > -250.);

        let back = transform_copy(&etrs89, &ed50, &shifted, false)?;
        assert!(back[0].hypot3(&data[0]) < 1e-6);
        Ok(())
    }

    #[test]
    fn failures() -> Result<(), Error> {
        let registry = Registry::new();
        let geo = registry.crs("latlong")?;
        let cart = registry.crs("geocent")?;

        let mut flat = [Coor2D::raw(12., 55.)];
        assert!(matches!(
            transform(&geo, &cart, &mut flat, false),
            Err(Error::Shape { found: 2, .. })
        ));
        let mut wide = [Coor4D::raw(12., 55., 0., 0.)];
        assert!(matches!(
            transform(&geo, &geo, &mut wide, false),
            Err(Error::Shape { found: 4, .. })
        ));

        let mut data = [Coor3D::raw(6e6, 0., 0.), Coor3D::origin()];
        assert!(matches!(
            transform(&cart, &geo, &mut data, false),
            Err(Error::DegenerateGeometry(_))
        ));
        assert_eq!(data[0][0], 6e6);
        Ok(())
    }
}
