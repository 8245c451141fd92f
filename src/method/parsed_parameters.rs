#![allow(clippy::needless_range_loop)]
use super::*;

#[derive(Debug, Clone)]
pub struct ParsedParameters {
    pub name: String,

    // Commonly used options have hard-coded slots. Angles in radians
    pub ellps: Ellipsoid,
    pub lat: [f64; 4],
    pub lon: [f64; 4],
    pub x: [f64; 4],
    pub y: [f64; 4],
    pub k: [f64; 4],

    // Method-specific options are stored in B-Trees
    pub boolean: BTreeSet<&'static str>,
    pub natural: BTreeMap<&'static str, usize>,
    pub real: BTreeMap<&'static str, f64>,
    pub series: BTreeMap<&'static str, Vec<f64>>,
    pub text: BTreeMap<&'static str, String>,
    pub fourier_coefficients: BTreeMap<&'static str, FourierCoefficients>,
    pub ignored: Vec<String>,
    pub given: BTreeMap<String, String>,
}

// Accessors
impl ParsedParameters {
    pub fn boolean(&self, key: &str) -> bool {
        self.boolean.contains(key)
    }
    pub fn natural(&self, key: &str) -> Result<usize, Error> {
        if let Some(value) = self.natural.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn real(&self, key: &str) -> Result<f64, Error> {
        if let Some(value) = self.real.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn series(&self, key: &str) -> Result<&[f64], Error> {
        if let Some(value) = self.series.get(key) {
            return Ok(value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn text(&self, key: &str) -> Result<String, Error> {
        if let Some(value) = self.text.get(key) {
            return Ok(value.to_string());
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn ignored(&self) -> Vec<String> {
        self.ignored.clone()
    }
    pub fn ellps(&self) -> &Ellipsoid {
        &self.ellps
    }
    pub fn x(&self, index: usize) -> f64 {
        self.x[index]
    }
    pub fn y(&self, index: usize) -> f64 {
        self.y[index]
    }
    pub fn lat(&self, index: usize) -> f64 {
        self.lat[index]
    }
    pub fn lon(&self, index: usize) -> f64 {
        self.lon[index]
    }
    pub fn k(&self, index: usize) -> f64 {
        self.k[index]
    }
}

impl ParsedParameters {
    pub fn new(
        parameters: &RawParameters,
        ellps: &Ellipsoid,
        gamut: &[OpParameter],
    ) -> Result<ParsedParameters, Error> {
        let locals = parameters.locals();
        let globals = &parameters.globals;
        let mut boolean = BTreeSet::<&'static str>::new();
        let mut natural = BTreeMap::<&'static str, usize>::new();
        let mut real = BTreeMap::<&'static str, f64>::new();
        let mut series = BTreeMap::<&'static str, Vec<f64>>::new();
        let mut text = BTreeMap::<&'static str, String>::new();

        // Try to locate all accepted parameters, type check, and place them into
        // their proper bins
        for p in gamut {
            match *p {
                OpParameter::Flag { key } => {
                    if let Some(value) = chase(globals, &locals, key) {
                        if value.is_empty() || value.to_lowercase() == "true" {
                            boolean.insert(key);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a boolean constant!");
                        return Err(Error::BadParam(key.to_string(), value));
                    }
                    // Flags are always optional, i.e. implicitly false when not given
                    continue;
                }

                OpParameter::Natural { key, default } => {
                    if let Some(value) = chase(globals, &locals, key) {
                        if let Ok(v) = value.parse::<usize>() {
                            natural.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a natural number!");
                        return Err(Error::BadParam(key.to_string(), value));
                    }

                    // Key not found - default given?
                    if let Some(value) = default {
                        natural.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }

                OpParameter::Real { key, default } => {
                    if let Some(value) = chase(globals, &locals, key) {
                        if let Ok(v) = value.parse::<f64>() {
                            real.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a real number");
                        return Err(Error::BadParam(key.to_string(), value));
                    }

                    if let Some(value) = default {
                        real.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }

                OpParameter::Series { key, default } => {
                    let value = match (chase(globals, &locals, key), default) {
                        (Some(value), _) => value,
                        (None, Some(value)) => value.to_string(),
                        (None, None) => {
                            error!("Missing required parameter '{key}'");
                            return Err(Error::MissingParam(key.to_string()));
                        }
                    };
                    // Defaults to nothing, so we just continue with the next parameter
                    if value.is_empty() {
                        continue;
                    }
                    let Ok(elements) = parse_series(&value) else {
                        warn!("Cannot parse {key}:{value} as a series");
                        return Err(Error::BadParam(key.to_string(), value));
                    };
                    series.insert(key, elements);
                }

                OpParameter::Text { key, default } => {
                    if let Some(value) = chase(globals, &locals, key) {
                        text.insert(key, value);
                        continue;
                    }

                    if let Some(value) = default {
                        text.insert(key, value.to_string());
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }
            };
        }

        let mut params = ParsedParameters::bare(
            locals.get("name").map_or("unknown", |name| name.as_str()),
            ellps,
        );

        // Now handle the commonly used options with the hard-coded slots
        for i in 0..4 {
            let get = |prefix: &str| real.get(&format!("{prefix}_{i}")[..]).copied();
            params.lat[i] = get("lat").unwrap_or(0.).to_radians();
            params.lon[i] = get("lon").unwrap_or(0.).to_radians();
            params.x[i] = get("x").unwrap_or(0.);
            params.y[i] = get("y").unwrap_or(0.);
            params.k[i] = get("k").unwrap_or(0.);
        }

        // Params specified, but not used
        let ignored: Vec<String> = locals
            .keys()
            .filter(|key| {
                key.as_str() != "name"
                    && !COMMON_KEYS.contains(&key.as_str())
                    && !gamut.iter().any(|p| p.key() == key.as_str())
            })
            .cloned()
            .collect();
        for key in &ignored {
            warn!("{}: ignoring unknown parameter '{key}'", params.name);
        }

        params.boolean = boolean;
        params.natural = natural;
        params.real = real;
        params.series = series;
        params.text = text;
        params.ignored = ignored;
        params.given = locals;
        Ok(params)
    }

    /// Parameters with nothing but a name and an ellipsoid
    pub fn bare(name: &str, ellps: &Ellipsoid) -> ParsedParameters {
        ParsedParameters {
            name: name.to_string(),
            ellps: *ellps,
            lat: [0.; 4],
            lon: [0.; 4],
            x: [0.; 4],
            y: [0.; 4],
            k: [0.; 4],
            boolean: BTreeSet::new(),
            natural: BTreeMap::new(),
            real: BTreeMap::new(),
            series: BTreeMap::new(),
            text: BTreeMap::new(),
            fourier_coefficients: BTreeMap::new(),
            ignored: Vec::new(),
            given: BTreeMap::new(),
        }
    }

    /// Equality of the parameter values actually in use: The given, but
    /// ignored, parameters and the derived coefficients do not count
    pub fn same_as(&self, other: &ParsedParameters) -> bool {
        fn same(a: f64, b: f64) -> bool {
            a == b || (a.is_nan() && b.is_nan())
        }
        fn same_slots(a: &[f64; 4], b: &[f64; 4]) -> bool {
            a.iter().zip(b.iter()).all(|(a, b)| same(*a, *b))
        }

        self.ellps == other.ellps
            && same_slots(&self.lat, &other.lat)
            && same_slots(&self.lon, &other.lon)
            && same_slots(&self.x, &other.x)
            && same_slots(&self.y, &other.y)
            && same_slots(&self.k, &other.k)
            && self.boolean == other.boolean
            && self.natural == other.natural
            && self.series == other.series
            && self.text == other.text
            && self.real.len() == other.real.len()
            && self
                .real
                .iter()
                .zip(other.real.iter())
                .all(|(a, b)| a.0 == b.0 && same(*a.1, *b.1))
    }
}

fn parse_series(value: &str) -> Result<Vec<f64>, std::num::ParseFloatError> {
    value.split(',').map(|element| element.parse::<f64>()).collect()
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const GAMUT: [OpParameter; 6] = [
        OpParameter::Flag    { key: "south" },
        OpParameter::Natural { key: "zone",  default: Some(32) },
        OpParameter::Real    { key: "lat_1", default: None },
        OpParameter::Real    { key: "k_0",   default: Some(1.) },
        OpParameter::Series  { key: "abc",   default: Some("1,2,3") },
        OpParameter::Text    { key: "what",  default: Some("ever") },
    ];

    #[test]
    fn parsing() -> Result<(), Error> {
        let globals = BTreeMap::new();
        let ellps = Ellipsoid::default();

        let raw = RawParameters::new("foo south lat_1=45 bar=baz ellps=intl", &globals);
        let p = ParsedParameters::new(&raw, &ellps, &GAMUT)?;
        assert_eq!(p.name, "foo");
        assert!(p.boolean("south"));
        assert_eq!(p.natural("zone")?, 32);
        assert_eq!(p.real("lat_1")?, 45.);
        assert!((p.lat(1) - 45_f64.to_radians()).abs() < 1e-15);
        assert_eq!(p.k(0), 1.);
        assert_eq!(p.series("abc")?, &[1., 2., 3.]);
        assert_eq!(p.text("what")?, "ever");
        // `ellps` is common to all methods, `bar` is unknown
        assert_eq!(p.ignored(), vec!["bar".to_string()]);

        // Missing required parameter
        let raw = RawParameters::new("foo", &globals);
        assert!(matches!(
            ParsedParameters::new(&raw, &ellps, &GAMUT),
            Err(Error::MissingParam(_))
        ));

        // Malformed values
        let raw = RawParameters::new("foo lat_1=north", &globals);
        assert!(matches!(
            ParsedParameters::new(&raw, &ellps, &GAMUT),
            Err(Error::BadParam(_, _))
        ));
        let raw = RawParameters::new("foo lat_1=1 zone=-3", &globals);
        assert!(matches!(
            ParsedParameters::new(&raw, &ellps, &GAMUT),
            Err(Error::BadParam(_, _))
        ));
        let raw = RawParameters::new("foo lat_1=1 abc=1,x", &globals);
        assert!(matches!(
            ParsedParameters::new(&raw, &ellps, &GAMUT),
            Err(Error::BadParam(_, _))
        ));
        Ok(())
    }

    #[test]
    fn sameness() -> Result<(), Error> {
        let globals = BTreeMap::new();
        let ellps = Ellipsoid::default();
        let a = RawParameters::new("foo lat_1=45 k_0=1", &globals);
        let b = RawParameters::new("foo k_0=1.0 lat_1=45 unused=1", &globals);
        let c = RawParameters::new("foo lat_1=45.5", &globals);
        let a = ParsedParameters::new(&a, &ellps, &GAMUT)?;
        let b = ParsedParameters::new(&b, &ellps, &GAMUT)?;
        let c = ParsedParameters::new(&c, &ellps, &GAMUT)?;
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
        Ok(())
    }
}
