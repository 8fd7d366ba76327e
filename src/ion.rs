//! This module defines the structured representation of a parsed chemical species.
//!
//! An [`Ion`] is produced by parsing a formula string: its elemental composition,
//! signed charge, and aqueous-phase flag. Construction also performs reduction, so
//! the stored composition is already in lowest terms and canonical element order;
//! [`Ion::reduced_formula`] is then a pure rendering step. Together the two form
//! the parse-and-reduce capability that formula standardization is built on.

use crate::elements::{ElementTable, is_symbol_like};
use crate::error::IonKeyError;
use std::collections::HashMap;

const AQUEOUS_SUFFIX: &str = "(aq)";

/// A parsed chemical species: elemental composition, charge, and phase annotation.
///
/// The composition is stored in canonical order (ascending electronegativity, ties
/// broken by atomic number and then symbol) with counts reduced to lowest terms, so
/// two formulas describing the same species compare equal.
///
/// # Examples
///
/// ```
/// use ionkey::Ion;
///
/// let ion = Ion::from_formula("Na+").unwrap();
/// assert_eq!(ion.charge(), 1);
/// assert_eq!(ion.reduced_formula(), "Na[+1]");
///
/// let alias = Ion::from_formula("Na[+1]").unwrap();
/// assert_eq!(ion, alias);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ion {
    composition: Vec<(String, u32)>,
    charge: i32,
    aqueous: bool,
}

impl Ion {
    /// Parses a formula string using the embedded default element table.
    ///
    /// Accepted notation, from the end of the string inward: an optional `"(aq)"`
    /// phase suffix, an optional charge annotation (`"+"`, `"-2"`, `"++"`, `"[+]"`,
    /// `"[-1]"`, `"[2+]"`, ...), and an elemental composition of symbols with
    /// optional counts and parenthesized groups (`"C2H5OH"`, `"Na(NO3)2"`).
    ///
    /// Symbols not present in the element table are accepted as unknown species,
    /// mirroring the tolerant behavior of established formula parsers; they sort
    /// after all known elements in the reduced formula.
    ///
    /// # Errors
    ///
    /// Returns `IonKeyError::InvalidFormula` when the string is not syntactically
    /// valid: empty input, stray characters, unmatched parentheses or brackets,
    /// malformed charge annotations, or explicit zero counts.
    pub fn from_formula(formula: &str) -> Result<Self, IonKeyError> {
        Self::from_formula_with_table(formula, crate::default_elements())
    }

    /// Parses a formula string, ordering elements according to a caller-supplied
    /// table.
    ///
    /// This is the seam for injecting alternative element data; parsing and
    /// reduction are otherwise identical to [`Ion::from_formula`].
    pub fn from_formula_with_table(
        formula: &str,
        table: &ElementTable,
    ) -> Result<Self, IonKeyError> {
        let trimmed = formula.trim();
        if trimmed.is_empty() {
            return Err(invalid(formula, "formula is empty"));
        }
        if !trimmed.is_ascii() {
            return Err(invalid(formula, "formula contains non-ASCII characters"));
        }

        let (rest, aqueous) = match trimmed.strip_suffix(AQUEOUS_SUFFIX) {
            Some(rest) => (rest, true),
            None => (trimmed, false),
        };
        let (body, charge) = split_charge(formula, rest)?;
        let counts = parse_composition(formula, body)?;
        if counts.is_empty() {
            return Err(invalid(formula, "formula has no elemental composition"));
        }
        let (composition, charge) = reduce(counts, charge, table);

        Ok(Ion {
            composition,
            charge,
            aqueous,
        })
    }

    /// Returns the reduced composition as `(symbol, count)` pairs in canonical
    /// order.
    pub fn composition(&self) -> &[(String, u32)] {
        &self.composition
    }

    /// Returns the charge of the species after reduction, `0` for neutral species.
    pub fn charge(&self) -> i32 {
        self.charge
    }

    /// Returns `true` if the formula carried an `"(aq)"` phase suffix.
    pub fn is_aqueous(&self) -> bool {
        self.aqueous
    }

    /// Renders the canonical formula string for this species.
    ///
    /// Counts of one are omitted, a nonzero charge is rendered as a signed integer
    /// in square brackets (e.g. `"[+1]"`, `"[-2]"`), and the `"(aq)"` suffix is
    /// reattached when present on the input.
    pub fn reduced_formula(&self) -> String {
        let mut out = String::new();
        for (symbol, count) in &self.composition {
            out.push_str(symbol);
            if *count > 1 {
                out.push_str(&count.to_string());
            }
        }
        if self.charge != 0 {
            let sign = if self.charge > 0 { '+' } else { '-' };
            out.push('[');
            out.push(sign);
            out.push_str(&self.charge.unsigned_abs().to_string());
            out.push(']');
        }
        if self.aqueous {
            out.push_str(AQUEOUS_SUFFIX);
        }
        out
    }
}

fn invalid(formula: &str, reason: impl Into<String>) -> IonKeyError {
    IonKeyError::InvalidFormula {
        formula: formula.to_string(),
        reason: reason.into(),
    }
}

/// Splits a trailing charge annotation off `rest`, returning the remaining
/// composition body and the signed charge (`0` when no annotation is present).
///
/// Bracketed annotations accept the sign before or after the magnitude; bare
/// annotations require the sign first ("SO4-2") or repeated identical signs
/// ("Fe+++"). Trailing digits without a sign belong to the composition.
fn split_charge<'a>(formula: &str, rest: &'a str) -> Result<(&'a str, i32), IonKeyError> {
    if let Some(stripped) = rest.strip_suffix(']') {
        let open = stripped
            .rfind('[')
            .ok_or_else(|| invalid(formula, "unmatched ']' in charge annotation"))?;
        let charge = parse_bracketed_charge(formula, &stripped[open + 1..])?;
        return Ok((&stripped[..open], charge));
    }

    let bytes = rest.as_bytes();
    let mut digit_start = bytes.len();
    while digit_start > 0 && bytes[digit_start - 1].is_ascii_digit() {
        digit_start -= 1;
    }
    let mut sign_start = digit_start;
    while sign_start > 0 && matches!(bytes[sign_start - 1], b'+' | b'-') {
        sign_start -= 1;
    }
    if sign_start == digit_start {
        // No sign: any trailing digits are an element count, not a charge.
        return Ok((rest, 0));
    }

    let signs = &bytes[sign_start..digit_start];
    let digits = &rest[digit_start..];
    if signs.iter().any(|&b| b != signs[0]) {
        return Err(invalid(formula, "mixed '+' and '-' in charge suffix"));
    }
    if signs.len() > 1 && !digits.is_empty() {
        return Err(invalid(formula, "malformed charge suffix"));
    }

    let magnitude: i32 = if digits.is_empty() {
        signs.len() as i32
    } else {
        digits
            .parse()
            .map_err(|_| invalid(formula, "charge magnitude out of range"))?
    };
    let sign = if signs[0] == b'+' { 1 } else { -1 };
    Ok((&rest[..sign_start], sign * magnitude))
}

/// Parses the interior of a bracketed charge annotation such as `"+"`, `"-2"`,
/// or `"2+"`.
fn parse_bracketed_charge(formula: &str, inner: &str) -> Result<i32, IonKeyError> {
    let inner = inner.trim();
    let (sign, magnitude_str) = if let Some(rest) = inner.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = inner.strip_prefix('-') {
        (-1, rest)
    } else if let Some(rest) = inner.strip_suffix('+') {
        (1, rest)
    } else if let Some(rest) = inner.strip_suffix('-') {
        (-1, rest)
    } else {
        return Err(invalid(formula, "charge annotation must contain '+' or '-'"));
    };

    if magnitude_str.is_empty() {
        return Ok(sign);
    }
    let magnitude: i32 = magnitude_str
        .parse()
        .map_err(|_| invalid(formula, "malformed charge magnitude"))?;
    Ok(sign * magnitude)
}

/// Parses the elemental composition of `body` into per-symbol counts.
fn parse_composition(formula: &str, body: &str) -> Result<HashMap<String, u32>, IonKeyError> {
    let mut pos = 0;
    let counts = parse_group(formula, body, &mut pos, 0)?;
    // At depth 0 the group parser consumes the whole body or errors.
    debug_assert_eq!(pos, body.len());
    Ok(counts)
}

/// Parses one parenthesization level, stopping at end of input or at a `')'`
/// belonging to the enclosing level.
fn parse_group(
    formula: &str,
    body: &str,
    pos: &mut usize,
    depth: usize,
) -> Result<HashMap<String, u32>, IonKeyError> {
    let bytes = body.as_bytes();
    let mut counts: HashMap<String, u32> = HashMap::new();

    while *pos < bytes.len() {
        match bytes[*pos] {
            b'(' => {
                *pos += 1;
                let inner = parse_group(formula, body, pos, depth + 1)?;
                if *pos >= bytes.len() || bytes[*pos] != b')' {
                    return Err(invalid(formula, "unmatched '(' in formula"));
                }
                *pos += 1;
                let multiplier = parse_count(formula, bytes, pos)?.unwrap_or(1);
                for (symbol, count) in inner {
                    let scaled = count
                        .checked_mul(multiplier)
                        .ok_or_else(|| invalid(formula, "element count out of range"))?;
                    add_count(formula, &mut counts, symbol, scaled)?;
                }
            }
            b')' => {
                if depth == 0 {
                    return Err(invalid(formula, "unmatched ')' in formula"));
                }
                return Ok(counts);
            }
            b'A'..=b'Z' => {
                let start = *pos;
                *pos += 1;
                while *pos < bytes.len()
                    && bytes[*pos].is_ascii_lowercase()
                    && *pos - start < 3
                {
                    *pos += 1;
                }
                let symbol = &body[start..*pos];
                debug_assert!(is_symbol_like(symbol));
                let count = parse_count(formula, bytes, pos)?.unwrap_or(1);
                add_count(formula, &mut counts, symbol.to_string(), count)?;
            }
            other => {
                return Err(invalid(
                    formula,
                    format!("unexpected character '{}'", other as char),
                ));
            }
        }
    }

    Ok(counts)
}

/// Parses an optional run of digits at `pos` into a positive count.
fn parse_count(formula: &str, bytes: &[u8], pos: &mut usize) -> Result<Option<u32>, IonKeyError> {
    let start = *pos;
    while *pos < bytes.len() && bytes[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if *pos == start {
        return Ok(None);
    }
    // The digit run is ASCII by construction.
    let digits = std::str::from_utf8(&bytes[start..*pos])
        .map_err(|_| invalid(formula, "malformed element count"))?;
    let count: u32 = digits
        .parse()
        .map_err(|_| invalid(formula, "element count out of range"))?;
    if count == 0 {
        return Err(invalid(formula, "explicit zero element count"));
    }
    Ok(Some(count))
}

fn add_count(
    formula: &str,
    counts: &mut HashMap<String, u32>,
    symbol: String,
    count: u32,
) -> Result<(), IonKeyError> {
    let entry = counts.entry(symbol).or_insert(0);
    *entry = entry
        .checked_add(count)
        .ok_or_else(|| invalid(formula, "element count out of range"))?;
    Ok(())
}

/// Divides all counts, and a nonzero charge, by their greatest common divisor and
/// sorts the composition into canonical order.
fn reduce(
    counts: HashMap<String, u32>,
    charge: i32,
    table: &ElementTable,
) -> (Vec<(String, u32)>, i32) {
    let mut factor = counts.values().copied().fold(0, gcd);
    if charge != 0 {
        factor = gcd(factor, charge.unsigned_abs());
    }

    let mut composition: Vec<(String, u32)> = counts
        .into_iter()
        .map(|(symbol, count)| (symbol, count / factor))
        .collect();
    composition.sort_by(|(a, _), (b, _)| {
        let (chi_a, z_a) = sort_key(a, table);
        let (chi_b, z_b) = sort_key(b, table);
        chi_a
            .total_cmp(&chi_b)
            .then(z_a.cmp(&z_b))
            .then_with(|| a.cmp(b))
    });

    (composition, charge / factor as i32)
}

/// Canonical sort key for an element symbol: ascending electronegativity with
/// atomic number as tie-breaker. Unknown species sort after all known elements.
fn sort_key(symbol: &str, table: &ElementTable) -> (f64, u8) {
    match table.get(symbol) {
        Some(data) => (data.electronegativity, data.atomic_number),
        None => (f64::INFINITY, u8::MAX),
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}
