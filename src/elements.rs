//! This module provides the element reference data used to canonicalize formulas.
//!
//! It defines the `ElementData` struct holding the per-element properties that drive
//! canonical element ordering, and the `ElementTable` struct for managing collections
//! of these properties. The module includes deserialization logic that validates
//! element-symbol keys in TOML tables, so malformed tables are rejected at load time
//! rather than surfacing as silent misorderings later.

use crate::error::IonKeyError;
use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Reference properties for a single element.
///
/// These values do not participate in formula parsing itself; they determine where an
/// element sorts inside a reduced formula. Electronegativity is the primary sort key,
/// which places electropositive species (metals, hydrogen) before electronegative ones
/// and yields the conventional reading order for inorganic formulas ("NaCl", "H2O").
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ElementData {
    /// The atomic number of the element.
    ///
    /// Used as a deterministic tie-breaker when two elements share the same
    /// electronegativity value.
    #[serde(rename = "z")]
    pub atomic_number: u8,
    /// The electronegativity of the element on the Pauling scale.
    ///
    /// Elements in a reduced formula are ordered by ascending electronegativity, the
    /// same convention used by formula reducers in computational-chemistry toolkits.
    #[serde(rename = "chi")]
    pub electronegativity: f64,
}

/// A collection of element reference data indexed by element symbol.
///
/// This struct serves as the knowledge base consulted when rendering reduced formulas.
/// A default table covering elements up to plutonium ships embedded in the crate (see
/// [`crate::default_elements`]); custom tables can be loaded from TOML files or strings
/// when different coverage or ordering data is needed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementTable {
    /// A mapping from element symbol to the corresponding reference data.
    ///
    /// The keys are standard element symbols ("H", "Na", "Cl", ...); symbols are
    /// case-sensitive and validated during deserialization.
    #[serde(deserialize_with = "deserialize_symbol_map")]
    pub elements: HashMap<String, ElementData>,
}

impl ElementTable {
    /// Loads an element table from a TOML file.
    ///
    /// The file should contain an `[elements]` table with entries keyed by element
    /// symbol, for example `Na = { z = 11, chi = 0.93 }`.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the TOML file containing the element data.
    ///
    /// # Returns
    ///
    /// Returns an `ElementTable` instance on success.
    ///
    /// # Errors
    ///
    /// Returns an `IonKeyError::Io` if the file cannot be read, or an
    /// `IonKeyError::Deserialization` if the TOML content is invalid or contains
    /// malformed symbol keys.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ionkey::ElementTable;
    /// use std::path::Path;
    ///
    /// let table = ElementTable::load_from_file(Path::new("elements.toml")).unwrap();
    /// ```
    pub fn load_from_file(path: &Path) -> Result<Self, IonKeyError> {
        let content = std::fs::read_to_string(path).map_err(|io_error| IonKeyError::Io {
            path: path.to_path_buf(),
            source: io_error,
        })?;

        Self::load_from_str(&content)
    }

    /// Parses an element table from a TOML string.
    ///
    /// # Arguments
    ///
    /// * `toml_str` - A string slice containing valid TOML element data.
    ///
    /// # Returns
    ///
    /// Returns an `ElementTable` instance on success.
    ///
    /// # Errors
    ///
    /// Returns an `IonKeyError::Deserialization` if the TOML content is invalid or
    /// contains malformed symbol keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use ionkey::ElementTable;
    ///
    /// let toml_data = r#"
    /// [elements]
    /// H = { z = 1, chi = 2.20 }
    /// O = { z = 8, chi = 3.44 }
    /// "#;
    ///
    /// let table = ElementTable::load_from_str(toml_data).unwrap();
    /// assert_eq!(table.elements.len(), 2);
    /// ```
    pub fn load_from_str(toml_str: &str) -> Result<Self, IonKeyError> {
        toml::from_str(toml_str).map_err(IonKeyError::from)
    }

    /// Creates a new empty `ElementTable` instance.
    ///
    /// With an empty table every symbol is treated as an unknown species and ordering
    /// falls back to alphabetical; this is mainly useful as a starting point for
    /// programmatic population.
    pub fn new() -> Self {
        ElementTable {
            elements: HashMap::new(),
        }
    }

    /// Looks up the reference data for an element symbol.
    ///
    /// Returns `None` for symbols absent from the table; callers treat such symbols
    /// as unknown species rather than as errors.
    pub fn get(&self, symbol: &str) -> Option<&ElementData> {
        self.elements.get(symbol)
    }
}

impl Default for ElementTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns `true` if `symbol` has the shape of an element symbol: one uppercase
/// ASCII letter followed by up to two lowercase ASCII letters.
pub(crate) fn is_symbol_like(symbol: &str) -> bool {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {}
        _ => return false,
    }
    let rest = chars.as_str();
    rest.len() <= 2 && rest.chars().all(|c| c.is_ascii_lowercase())
}

/// Deserializes a map of element data with validated symbol keys.
///
/// Keys must look like element symbols (an uppercase letter followed by up to two
/// lowercase letters); anything else is rejected with a descriptive error so that
/// typos in hand-written tables surface immediately.
fn deserialize_symbol_map<'de, D>(deserializer: D) -> Result<HashMap<String, ElementData>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SymbolMapVisitor;

    impl<'de> Visitor<'de> for SymbolMapVisitor {
        type Value = HashMap<String, ElementData>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map from element symbol to element data")
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut elements = HashMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, ElementData>()? {
                if !is_symbol_like(&key) {
                    return Err(de::Error::custom(format!(
                        "invalid element symbol key: '{}'",
                        key
                    )));
                }
                elements.insert(key, value);
            }
            Ok(elements)
        }
    }

    deserializer.deserialize_map(SymbolMapVisitor)
}
