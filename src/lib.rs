pub mod elements;
pub mod error;
pub mod ion;
pub mod map;
pub mod normalize;

pub use crate::elements::{ElementData, ElementTable};
pub use crate::error::IonKeyError;
pub use crate::ion::Ion;
pub use crate::map::FormulaMap;
pub use crate::normalize::{standardize_formula, standardize_formula_with_table};

use std::sync::OnceLock;

static DEFAULT_ELEMENTS: OnceLock<ElementTable> = OnceLock::new();

/// Returns the embedded default element table, parsing it on first use.
pub fn default_elements() -> &'static ElementTable {
    DEFAULT_ELEMENTS.get_or_init(|| {
        const DEFAULT_ELEMENTS_TOML: &str = include_str!("../resources/elements.toml");
        ElementTable::load_from_str(DEFAULT_ELEMENTS_TOML)
            .expect("Failed to parse embedded default element table. This is a library bug.")
    })
}
