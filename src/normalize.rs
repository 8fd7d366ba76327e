//! This module provides the formula standardization entry point of the crate.
//!
//! Standardization maps every textual variant of a chemical species to one
//! canonical string, making formulas usable as lookup keys. Parsing and
//! reduction are handled by [`crate::ion::Ion`]; this module adds the diatomic
//! gas correction on top of the reduced formula.

use crate::elements::ElementTable;
use crate::error::IonKeyError;
use crate::ion::Ion;

/// Elements whose neutral reduced formula must be rewritten to the diatomic form.
///
/// Formula reduction collapses "H2", "O2", etc. to a bare element symbol, but in
/// aqueous-equilibrium contexts these elements occur as diatomic molecules. The set
/// is deliberately limited to these five elements; it is a targeted correction, not
/// a general diatomic rule.
const DIATOMIC_ELEMENTS: [&str; 5] = ["H", "O", "N", "F", "Cl"];

const AQUEOUS_SUFFIX: &str = "(aq)";

/// Converts a chemical formula into standard form.
///
/// The standardized form is the reduced formula of the parsed species, with two
/// properties that remove notational ambiguity:
///
/// 1. A nonzero charge is always listed explicitly and enclosed in square
///    brackets, so `"Na+"`, `"Na+1"`, and `"Na[+]"` all standardize to
///    `"Na[+1]"`.
/// 2. The five diatomic elemental gases H, O, N, F, and Cl are rendered in their
///    molecular form (`"H"` standardizes to `"H2"`, `"O(aq)"` to `"O2(aq)"`).
///
/// Standardization is idempotent: feeding an output back in returns it unchanged.
///
/// # Arguments
///
/// * `formula` - The chemical formula to standardize.
///
/// # Returns
///
/// Returns the standardized formula string.
///
/// # Errors
///
/// Returns an `IonKeyError::InvalidFormula` if `formula` cannot be parsed.
///
/// # Examples
///
/// ```
/// use ionkey::standardize_formula;
///
/// assert_eq!(standardize_formula("Na+").unwrap(), "Na[+1]");
/// assert_eq!(standardize_formula("Cl-1").unwrap(), "Cl[-1]");
/// assert_eq!(standardize_formula("O2(aq)").unwrap(), "O2(aq)");
/// assert!(standardize_formula("NotAFormula!!").is_err());
/// ```
pub fn standardize_formula(formula: &str) -> Result<String, IonKeyError> {
    apply_diatomic_correction(Ion::from_formula(formula)?)
}

/// Converts a chemical formula into standard form using a caller-supplied element
/// table.
///
/// Behaves exactly like [`standardize_formula`] but orders elements according to
/// `table` instead of the embedded default.
pub fn standardize_formula_with_table(
    formula: &str,
    table: &ElementTable,
) -> Result<String, IonKeyError> {
    apply_diatomic_correction(Ion::from_formula_with_table(formula, table)?)
}

fn apply_diatomic_correction(ion: Ion) -> Result<String, IonKeyError> {
    let rform = ion.reduced_formula();
    let (base, suffix) = match rform.strip_suffix(AQUEOUS_SUFFIX) {
        Some(base) => (base, AQUEOUS_SUFFIX),
        None => (rform.as_str(), ""),
    };
    if DIATOMIC_ELEMENTS.contains(&base) {
        return Ok(format!("{base}2{suffix}"));
    }
    Ok(rform)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standardize(formula: &str) -> String {
        standardize_formula(formula).unwrap()
    }

    #[test]
    fn test_charge_equivalence_classes() {
        assert_eq!(standardize("Na+"), "Na[+1]");
        assert_eq!(standardize("Na+1"), "Na[+1]");
        assert_eq!(standardize("Na[+]"), "Na[+1]");
        assert_eq!(standardize("Cl-"), "Cl[-1]");
        assert_eq!(standardize("Cl-1"), "Cl[-1]");
        assert_eq!(standardize("Mg[2+]"), "Mg[+2]");
    }

    #[test]
    fn test_diatomic_correction() {
        assert_eq!(standardize("H"), "H2");
        assert_eq!(standardize("O"), "O2");
        assert_eq!(standardize("N"), "N2");
        assert_eq!(standardize("F"), "F2");
        assert_eq!(standardize("Cl"), "Cl2");
        assert_eq!(standardize("O(aq)"), "O2(aq)");
        assert_eq!(standardize("H2"), "H2");
        assert_eq!(standardize("O2(aq)"), "O2(aq)");
    }

    #[test]
    fn test_diatomic_correction_leaves_ions_alone() {
        // H[+1] is hydrogen ion, not hydrogen gas.
        assert_eq!(standardize("H+"), "H[+1]");
        assert_eq!(standardize("Cl-"), "Cl[-1]");
        // Compounds containing a diatomic symbol as a substring are untouched.
        assert_eq!(standardize("HCl"), "HCl");
    }

    #[test]
    fn test_idempotence() {
        for formula in [
            "Na+", "Cl-1", "SO4-2", "H", "O(aq)", "H2O", "CO2(aq)", "Na(NO3)2", "Fe+++",
        ] {
            let once = standardize(formula);
            let twice = standardize(&once);
            assert_eq!(once, twice, "not idempotent for {formula:?}");
        }
    }

    #[test]
    fn test_invalid_formula_propagates() {
        assert!(matches!(
            standardize_formula("NotAFormula!!"),
            Err(IonKeyError::InvalidFormula { .. })
        ));
    }

    #[test]
    fn test_with_custom_table() {
        // A table that inverts the usual order of Na and Cl.
        let table = ElementTable::load_from_str(
            r#"
            [elements]
            Na = { z = 11, chi = 3.00 }
            Cl = { z = 17, chi = 1.00 }
            "#,
        )
        .unwrap();
        assert_eq!(standardize_formula_with_table("NaCl", &table).unwrap(), "ClNa");
        assert_eq!(standardize_formula("NaCl").unwrap(), "NaCl");
    }
}
