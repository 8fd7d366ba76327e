//! This module provides a mapping keyed by chemical species rather than raw strings.
//!
//! Every key-bearing operation routes its key through
//! [`standardize_formula`](crate::standardize_formula) before touching the
//! underlying storage, so all spellings of the same species address the same
//! entry. Entries iterate in insertion order of their standardized keys.

use crate::error::IonKeyError;
use crate::normalize::standardize_formula;
use indexmap::IndexMap;

/// A mapping whose keys are implicitly coerced to standardized formula form.
///
/// `FormulaMap` wraps an insertion-ordered map keyed by canonical formula
/// strings. Getting, setting, and removing all accept any valid spelling of a
/// species; two raw keys that standardize identically address the same entry,
/// so a second insert overwrites the first's value rather than creating a
/// sibling. Overwriting does not move an entry's position.
///
/// The map is a drop-in replacement for an ordinary string-keyed map wherever
/// the keys denote chemical species.
///
/// # Examples
///
/// ```
/// use ionkey::FormulaMap;
///
/// let mut components = FormulaMap::new();
/// components.insert("Na+", 0.5).unwrap();
/// components.insert("Cl-1", 0.5).unwrap();
///
/// assert_eq!(*components.get("Na+1").unwrap(), 0.5);
/// assert_eq!(*components.get("Na[+]").unwrap(), 0.5);
/// assert_eq!(components.len(), 2);
///
/// let keys: Vec<&str> = components.keys().map(String::as_str).collect();
/// assert_eq!(keys, ["Na[+1]", "Cl[-1]"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FormulaMap<V> {
    inner: IndexMap<String, V>,
}

impl<V> FormulaMap<V> {
    /// Creates a new empty `FormulaMap`.
    pub fn new() -> Self {
        FormulaMap {
            inner: IndexMap::new(),
        }
    }

    /// Creates a `FormulaMap` pre-populated from key/value pairs.
    ///
    /// Each key is standardized at insertion time; pairs whose keys standardize
    /// identically collapse into one entry, with the last value winning.
    ///
    /// # Errors
    ///
    /// Returns an `IonKeyError::InvalidFormula` if any key cannot be parsed.
    ///
    /// # Examples
    ///
    /// ```
    /// use ionkey::FormulaMap;
    ///
    /// let map = FormulaMap::from_pairs([("H2O", 55.5), ("Na+", 0.1)]).unwrap();
    /// assert_eq!(*map.get("Na[+1]").unwrap(), 0.1);
    /// ```
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, IonKeyError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        let mut map = Self::new();
        map.update(pairs)?;
        Ok(map)
    }

    /// Returns a reference to the value stored for the species named by `key`.
    ///
    /// # Errors
    ///
    /// Returns `IonKeyError::InvalidFormula` if `key` cannot be parsed, or
    /// `IonKeyError::KeyNotFound` if the standardized key has no entry.
    pub fn get(&self, key: &str) -> Result<&V, IonKeyError> {
        let standardized = standardize_formula(key)?;
        self.inner
            .get(&standardized)
            .ok_or(IonKeyError::KeyNotFound(standardized))
    }

    /// Returns a mutable reference to the value stored for the species named by
    /// `key`.
    ///
    /// # Errors
    ///
    /// Same as [`FormulaMap::get`].
    pub fn get_mut(&mut self, key: &str) -> Result<&mut V, IonKeyError> {
        let standardized = standardize_formula(key)?;
        self.inner
            .get_mut(&standardized)
            .ok_or(IonKeyError::KeyNotFound(standardized))
    }

    /// Inserts a value under the standardized form of `key`.
    ///
    /// Returns the previous value if the standardized key was already present.
    /// An overwritten entry keeps its original position in iteration order.
    ///
    /// # Errors
    ///
    /// Returns an `IonKeyError::InvalidFormula` if `key` cannot be parsed.
    pub fn insert(&mut self, key: &str, value: V) -> Result<Option<V>, IonKeyError> {
        let standardized = standardize_formula(key)?;
        Ok(self.inner.insert(standardized, value))
    }

    /// Removes and returns the value stored for the species named by `key`,
    /// preserving the order of the remaining entries.
    ///
    /// # Errors
    ///
    /// Returns `IonKeyError::InvalidFormula` if `key` cannot be parsed, or
    /// `IonKeyError::KeyNotFound` if the standardized key has no entry.
    pub fn remove(&mut self, key: &str) -> Result<V, IonKeyError> {
        let standardized = standardize_formula(key)?;
        self.inner
            .shift_remove(&standardized)
            .ok_or(IonKeyError::KeyNotFound(standardized))
    }

    /// Inserts every pair from `pairs`, standardizing each key.
    ///
    /// Stops at the first unparseable key; pairs already consumed by then remain
    /// inserted.
    ///
    /// # Errors
    ///
    /// Returns an `IonKeyError::InvalidFormula` for the first key that cannot be
    /// parsed.
    pub fn update<I, K>(&mut self, pairs: I) -> Result<(), IonKeyError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        for (key, value) in pairs {
            self.insert(key.as_ref(), value)?;
        }
        Ok(())
    }

    /// Returns `true` if `standardized_key` is present, compared against the
    /// stored keys exactly.
    ///
    /// Like iteration, membership operates on the already-standardized keys; the
    /// argument is not normalized. Use [`FormulaMap::get`] to test membership
    /// under a raw spelling.
    pub fn contains_key(&self, standardized_key: &str) -> bool {
        self.inner.contains_key(standardized_key)
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Iterates over `(standardized key, value)` pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.inner.iter()
    }

    /// Iterates over the standardized keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, V> {
        self.inner.keys()
    }

    /// Iterates over the values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, V> {
        self.inner.values()
    }

    /// Iterates mutably over the values in insertion order.
    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, String, V> {
        self.inner.values_mut()
    }
}

impl<V> Default for FormulaMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> IntoIterator for FormulaMap<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a FormulaMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
