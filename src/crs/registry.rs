use super::*;
use crate::method::builtin;

/// Named CRS definitions, in the longitude/latitude axis order used
/// throughout the crate
#[rustfmt::skip]
const BUILTIN_DEFINITIONS: [(&str, &str); 8] = [
    ("EPSG:4326",  "latlong datum=WGS84"),
    ("EPSG:4258",  "latlong datum=ETRS89"),
    ("EPSG:4230",  "latlong datum=ED50"),
    ("EPSG:4978",  "geocent datum=WGS84"),
    ("EPSG:3857",  "webmerc datum=WGS84"),
    ("EPSG:25832", "utm zone=32 datum=ETRS89"),
    ("EPSG:23032", "utm zone=32 datum=ED50"),
    ("EPSG:27700", "tmerc lat_0=49 lon_0=-2 k_0=0.9996012717 x_0=400000 y_0=-100000 datum=OSGB36"),
];

// ----- T H E   R E G I S T R Y -------------------------------------------------------

/// Resolves CRS definitions into [Crs] instances, using the built-in
/// projection methods, any user registered methods and definitions, and
/// a set of global default parameters (initially just `ellps=GRS80`).
///
/// A definition is a whitespace separated list of `key=value` elements and
/// flags, headed by the name of the projection method, e.g.
/// `"utm zone=32 ellps=intl towgs84=-87,-98,-121"`. The PROJ style
/// `"+proj=utm +zone=32"` is also accepted.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Constructors for user defined methods
    constructors: BTreeMap<String, MethodConstructor>,
    /// User defined named definitions
    definitions: BTreeMap<String, String>,
    /// Defaults for parameters not given in a definition
    globals: BTreeMap<String, String>,
}

impl Default for Registry {
    fn default() -> Registry {
        Registry::new()
    }
}

impl Registry {
    pub fn new() -> Registry {
        let mut registry = Registry {
            constructors: BTreeMap::new(),
            definitions: BTreeMap::new(),
            globals: BTreeMap::from([("ellps".to_string(), "GRS80".to_string())]),
        };
        for item in BUILTIN_DEFINITIONS {
            registry.register_definition(item.0, item.1);
        }
        registry
    }

    /// Make a user defined method available under `name`. User defined
    /// methods take precedence over built-ins of the same name
    pub fn register_method(&mut self, name: &str, constructor: MethodConstructor) {
        self.constructors.insert(String::from(name), constructor);
    }

    /// Make `definition` available under `name`
    pub fn register_definition(&mut self, name: &str, definition: &str) {
        self.definitions
            .insert(String::from(name), String::from(definition));
    }

    /// Set the default value of a parameter
    pub fn set_global(&mut self, key: &str, value: &str) {
        self.globals.insert(String::from(key), String::from(value));
    }

    pub fn globals(&self) -> &BTreeMap<String, String> {
        &self.globals
    }

    /// The constructor of the method called `name`
    pub fn get_method(&self, name: &str) -> Result<MethodConstructor, Error> {
        if let Some(constructor) = self.constructors.get(name) {
            return Ok(*constructor);
        }
        builtin(name).map_err(|_| {
            Error::NotFound(name.to_string(), ": Registry::get_method()".to_string())
        })
    }

    /// Resolve a definition (or the name of a registered definition)
    pub fn crs(&self, definition: &str) -> Result<Crs, Error> {
        let definition = match self.definitions.get(definition.trim()) {
            Some(expanded) => expanded.as_str(),
            None => definition,
        };

        let raw = RawParameters::new(definition, &self.globals);
        let locals = raw.locals();
        let Some(name) = locals.get("name") else {
            return Err(Error::MalformedCrs(format!(
                "no projection method in '{definition}'"
            )));
        };
        let constructor = self.get_method(name)?;

        if let Some(units) = raw.chase("units") {
            if units != "m" {
                warn!("Registry: unsupported units '{units}' in '{definition}'");
                return Err(Error::BadParam("units".to_string(), units));
            }
        }

        let (ellps, datum) = ellipsoid_and_datum(&raw, &locals)?;
        let method = constructor.0(&raw, &ellps)?;
        let crs = Crs::new(&raw.definition, ellps, datum, method);
        debug!(
            "Registry: '{}' resolved as {} ({:?}, {:?}), id {}",
            crs.definition(),
            crs.method().name,
            crs.ellps(),
            crs.datum(),
            crs.id()
        );
        Ok(crs)
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

fn real(key: &str, value: &str) -> Result<f64, Error> {
    value.parse::<f64>().map_err(|_| {
        warn!("Cannot parse {key}:{value} as a real number");
        Error::BadParam(key.to_string(), value.to_string())
    })
}

// The ellipsoid is taken from (in order of increasing precedence) the
// globals, the datum, and the `ellps` parameter. Then `a`, `rf`, `f`, `es`
// and `R` may modify it.
fn ellipsoid_and_datum(
    raw: &RawParameters,
    locals: &BTreeMap<String, String>,
) -> Result<(Ellipsoid, Datum), Error> {
    let mut datum = Datum::Unknown;
    let mut ellps_name = raw.globals.get("ellps").cloned();

    if let Some(name) = raw.chase("datum") {
        let (named, ellps) = Datum::named(&name)?;
        datum = named;
        ellps_name = Some(ellps.to_string());
    }
    if let Some(name) = locals.get("ellps") {
        ellps_name = Some(name.clone());
    }

    let mut ellps = match ellps_name {
        Some(name) => Ellipsoid::named(&name)?,
        None => Ellipsoid::default(),
    };

    // Modifications of the named ellipsoid
    let a = match locals.get("a") {
        Some(a) => real("a", a)?,
        None => ellps.semimajor_axis(),
    };
    if let Some(rf) = locals.get("rf") {
        let rf = real("rf", rf)?;
        let f = if rf == 0. { 0. } else { 1. / rf };
        ellps = Ellipsoid::new(a, f).validated()?;
    } else if let Some(f) = locals.get("f") {
        ellps = Ellipsoid::new(a, real("f", f)?).validated()?;
    } else if let Some(es) = locals.get("es") {
        ellps = Ellipsoid::from_a_e2(a, real("es", es)?)?;
    } else {
        ellps = Ellipsoid::new(a, ellps.flattening()).validated()?;
    }
    if let Some(r) = locals.get("R") {
        ellps = Ellipsoid::new(real("R", r)?, 0.).validated()?;
    }

    // Explicit datum shift parameters trump the named datum
    if let Some(towgs84) = raw.chase("towgs84") {
        let values = towgs84
            .split(',')
            .map(|v| real("towgs84", v))
            .collect::<Result<Vec<f64>, Error>>()?;
        datum = Datum::from_towgs84(&values)?;
    } else if let Some(grids) = raw.chase("nadgrids") {
        datum = if grids == "@null" {
            Datum::Wgs84
        } else {
            Datum::Grid(grids)
        };
    }

    Ok((ellps, datum))
}

// ----- T E S T S ------------------------------------------------------------------
