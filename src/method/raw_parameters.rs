use super::*;

/// Interface between the definition resolver in the
/// [Registry](crate::crs::Registry), and the constructors of the
/// individual projection methods.
///
/// `RawParameters` ferries the definition and the global defaults into the
/// method constructor, which typically interprets them, and converts them
/// into a more runtime friendly instance of [ParsedParameters].
#[derive(Debug, Default, Clone)]
pub struct RawParameters {
    pub definition: String,
    pub globals: BTreeMap<String, String>,
}

impl RawParameters {
    pub fn new(definition: &str, globals: &BTreeMap<String, String>) -> RawParameters {
        let definition = normalize(definition);
        RawParameters {
            definition,
            globals: globals.clone(),
        }
    }

    /// The definition split into its key=value elements
    pub fn locals(&self) -> BTreeMap<String, String> {
        split_into_parameters(&self.definition)
    }

    /// Look up `key`, giving precedence to the local definition over the globals
    pub fn chase(&self, key: &str) -> Option<String> {
        chase(&self.globals, &self.locals(), key)
    }
}

/// Conflate contiguous whitespace, then remove whitespace around `=` and `,`.
/// Also strips the `+` prefixes of PROJ style definitions
pub(crate) fn normalize(definition: &str) -> String {
    let elements: Vec<_> = definition.split_whitespace().collect();
    let definition = elements
        .join(" ")
        .replace("= ", "=")
        .replace(", ", ",")
        .replace(" =", "=")
        .replace(" ,", ",");
    definition
        .split_whitespace()
        .map(|element| element.trim_start_matches('+'))
        .filter(|element| !element.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find the value of `key`: The local definition trumps the globals
pub fn chase(
    globals: &BTreeMap<String, String>,
    locals: &BTreeMap<String, String>,
    key: &str,
) -> Option<String> {
    locals
        .get(key)
        .or_else(|| globals.get(key))
        .map(|value| value.trim().to_string())
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization() {
        assert_eq!(normalize("  utm   zone = 32  "), "utm zone=32");
        assert_eq!(normalize("+proj=utm +zone=32 +south"), "proj=utm zone=32 south");
        assert_eq!(normalize("towgs84 = 1, 2 ,3"), "towgs84=1,2,3");
    }

    #[test]
    fn chasing() {
        let mut globals = BTreeMap::new();
        globals.insert("ellps".to_string(), "GRS80".to_string());
        let raw = RawParameters::new("merc ellps=intl k_0=2", &globals);
        assert_eq!(raw.chase("ellps"), Some("intl".to_string()));
        assert_eq!(raw.chase("k_0"), Some("2".to_string()));
        assert_eq!(raw.chase("lat_ts"), None);

        let raw = RawParameters::new("merc", &globals);
        assert_eq!(raw.chase("ellps"), Some("GRS80".to_string()));
    }
}
