//! Datum descriptions, and the datum shift through the WGS84 hub.

use crate::prelude::*;

mod helmert;
pub use helmert::Helmert;

/// The anchoring of a CRS to a physical reference frame, expressed as the
/// shift needed to take its geocentric coordinates to WGS84
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Datum {
    /// No datum information: Only convertible to a CRS on the same ellipsoid
    #[default]
    Unknown,
    /// The WGS84 hub itself
    Wgs84,
    /// Geocentric translation, meters
    Helmert3([f64; 3]),
    /// Translation (m), rotation (arc seconds, position vector convention)
    /// and scale (ppm)
    Helmert7 {
        translation: [f64; 3],
        rotation: [f64; 3],
        scale: f64,
    },
    /// A grid based datum shift, identified by its grid names
    Grid(String),
}

/// The built-in datums: name, ellipsoid name, `towgs84` parameters or
/// grid names, and description
#[rustfmt::skip]
static DATUM_LIST: [(&str, &str, &str, &str); 10] = [
    ("WGS84",         "WGS84",   "0,0,0",                                                     ""),
    ("NAD83",         "GRS80",   "0,0,0",                                                     "North American Datum 1983"),
    ("ETRS89",        "GRS80",   "0,0,0",                                                     "European Terrestrial Reference System 1989"),
    ("GGRS87",        "GRS80",   "-199.87,74.79,246.62",                                      "Greek Geodetic Reference System 1987"),
    ("NAD27",         "clrk66",  "@conus,@alaska,@ntv2_0.gsb,@ntv1_can.dat",                  "North American Datum 1927"),
    ("potsdam",       "bessel",  "598.1,73.7,418.2,0.202,0.045,-2.455,6.7",                   "Potsdam Rauenberg 1950 DHDN"),
    ("hermannskogel", "bessel",  "577.326,90.129,463.919,5.137,1.474,5.297,2.4232",           "Hermannskogel"),
    ("nzgd49",        "intl",    "59.47,-5.04,187.44,0.47,-0.1,1.024,-4.5993",                "New Zealand Geodetic Datum 1949"),
    ("OSGB36",        "airy",    "446.448,-125.157,542.060,0.1502,0.2470,0.8421,-20.4894",    "Airy 1830"),
    ("ED50",          "intl",    "-87,-98,-121",                                              "European Datum 1950"),
];

impl Datum {
    /// A datum from the 3 or 7 parameters of a `towgs84` specification
    pub fn from_towgs84(values: &[f64]) -> Result<Datum, Error> {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::MalformedCrs(format!(
                "non-finite towgs84 parameters: {values:?}"
            )));
        }
        match values.len() {
            3 => Ok(Datum::Helmert3([values[0], values[1], values[2]])),
            7 => Ok(Datum::Helmert7 {
                translation: [values[0], values[1], values[2]],
                rotation: [values[3], values[4], values[5]],
                scale: values[6],
            }),
            n => Err(Error::BadParam(
                "towgs84".to_string(),
                format!("expected 3 or 7 values, found {n}"),
            )),
        }
    }

    /// Look up one of the built-in datums, returning the datum itself, and
    /// the name of its associated ellipsoid
    pub fn named(name: &str) -> Result<(Datum, &'static str), Error> {
        let Some(entry) = DATUM_LIST.iter().find(|d| d.0.eq_ignore_ascii_case(name)) else {
            return Err(Error::NotFound(name.to_string(), ": Datum::named()".to_string()));
        };
        let datum = if entry.0 == "WGS84" {
            Datum::Wgs84
        } else if entry.2.starts_with('@') {
            Datum::Grid(entry.2.to_string())
        } else {
            let values = entry
                .2
                .split(',')
                .map(|v| v.parse::<f64>())
                .collect::<Result<Vec<f64>, _>>()
                .map_err(|_| Error::General("Malformed built-in datum"))?;
            Datum::from_towgs84(&values)?
        };
        Ok((datum, entry.1))
    }

    /// The 7 Helmert parameters taking the datum to WGS84, or `None` if
    /// the datum does not support a parametric shift
    #[must_use]
    pub fn parameters(&self) -> Option<[f64; 7]> {
        match self {
            Datum::Wgs84 => Some([0.; 7]),
            Datum::Helmert3(t) => Some([t[0], t[1], t[2], 0., 0., 0., 0.]),
            Datum::Helmert7 {
                translation: t,
                rotation: r,
                scale,
            } => Some([t[0], t[1], t[2], r[0], r[1], r[2], *scale]),
            Datum::Unknown | Datum::Grid(_) => None,
        }
    }

    /// The datum shift to WGS84, if any
    #[must_use]
    pub fn helmert(&self) -> Option<Helmert> {
        let p = self.parameters()?;
        Some(Helmert::new([p[0], p[1], p[2]], [p[3], p[4], p[5]], p[6]))
    }

    /// True if the datum can take part in a datum shift
    #[must_use]
    pub fn is_shiftable(&self) -> bool {
        self.parameters().is_some()
    }

    /// Datum equality within 1e-12 on all parameters. A zero `towgs84`
    /// is equivalent to WGS84.
    #[must_use]
    pub fn is_identical(&self, other: &Datum) -> bool {
        match (self.parameters(), other.parameters()) {
            (Some(a), Some(b)) => a.iter().zip(b.iter()).all(|(a, b)| (a - b).abs() <= 1e-12),
            (None, None) => match (self, other) {
                (Datum::Unknown, Datum::Unknown) => true,
                (Datum::Grid(a), Datum::Grid(b)) => a == b,
                _ => false,
            },
            _ => false,
        }
    }

    /// Geocentric coordinates in this datum, to WGS84 geocentric
    pub fn to_wgs84(&self, c: &Coor4D) -> Result<Coor4D, Error> {
        self.shift(c, Direction::Fwd)
    }

    /// WGS84 geocentric coordinates, to geocentric in this datum
    pub fn from_wgs84(&self, c: &Coor4D) -> Result<Coor4D, Error> {
        self.shift(c, Direction::Inv)
    }

    fn shift(&self, c: &Coor4D, direction: Direction) -> Result<Coor4D, Error> {
        match self {
            Datum::Wgs84 => Ok(*c),
            Datum::Unknown => Err(Error::General("datum shift from unknown datum")),
            Datum::Grid(_) => Err(Error::General("grid based datum shift not supported")),
            _ => match self.helmert() {
                Some(helmert) => Ok(helmert.apply(c, direction)),
                None => Err(Error::General("datum shift not available")),
            },
        }
    }
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction() -> Result<(), Error> {
        assert_eq!(
            Datum::from_towgs84(&[1., 2., 3.])?,
            Datum::Helmert3([1., 2., 3.])
        );
        let d = Datum::from_towgs84(&[1., 2., 3., 4., 5., 6., 7.])?;
        assert_eq!(d.parameters(), Some([1., 2., 3., 4., 5., 6., 7.]));
        assert!(matches!(
            Datum::from_towgs84(&[1., 2.]),
            Err(Error::BadParam(..))
        ));
        assert!(matches!(
            Datum::from_towgs84(&[1., f64::NAN, 2.]),
            Err(Error::MalformedCrs(..))
        ));

        let (d, ellps) = Datum::named("wgs84")?;
        assert_eq!((d, ellps), (Datum::Wgs84, "WGS84"));
        let (d, ellps) = Datum::named("ED50")?;
        assert_eq!((d, ellps), (Datum::Helmert3([-87., -98., -121.]), "intl"));
        let (d, _) = Datum::named("NAD27")?;
        assert!(matches!(d, Datum::Grid(_)));
        assert!(!d.is_shiftable());
        assert!(Datum::named("atlantis").is_err());
        Ok(())
    }

    #[test]
    fn identity() -> Result<(), Error> {
        let zero = Datum::from_towgs84(&[0., 0., 0.])?;
        assert!(zero.is_identical(&Datum::Wgs84));
        assert!(Datum::Wgs84.is_identical(&zero));
        assert!(Datum::Unknown.is_identical(&Datum::Unknown));
        assert!(!Datum::Unknown.is_identical(&Datum::Wgs84));

        let a = Datum::Helmert3([-87., -98., -121.]);
        let b = Datum::Helmert3([-87., -98., -121. + 1e-13]);
        let c = Datum::Helmert3([-87., -98., -121.001]);
        assert!(a.is_identical(&b));
        assert!(!a.is_identical(&c));

        let g = Datum::Grid("@conus".to_string());
        assert!(g.is_identical(&g.clone()));
        assert!(!g.is_identical(&Datum::Unknown));
        Ok(())
    }

    #[test]
    fn shift() -> Result<(), Error> {
        let ed50 = Datum::Helmert3([-87., -98., -121.]);
        let p = Coor4D::raw(3_500_000., 700_000., 5_200_000., 0.);
        let q = ed50.to_wgs84(&p)?;
        assert_eq!(q, Coor4D::raw(3_499_913., 699_902., 5_199_879., 0.));
        assert_eq!(ed50.from_wgs84(&q)?, p);
        assert_eq!(Datum::Wgs84.to_wgs84(&p)?, p);
        assert!(Datum::Unknown.to_wgs84(&p).is_err());
        Ok(())
    }
}
