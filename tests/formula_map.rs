use ionkey::{FormulaMap, IonKeyError};

#[test]
fn aliases_of_one_species_share_one_entry() {
    let mut components = FormulaMap::new();
    components.insert("Na+", 5).unwrap();

    assert_eq!(*components.get("Na+1").unwrap(), 5);
    assert_eq!(*components.get("Na[+]").unwrap(), 5);
    assert_eq!(*components.get("Na[+1]").unwrap(), 5);
    assert_eq!(components.len(), 1);
}

#[test]
fn second_insert_under_an_alias_overwrites() {
    let mut components = FormulaMap::new();
    components.insert("Na+", 1).unwrap();
    components.insert("Na+1", 2).unwrap();

    assert_eq!(components.len(), 1);
    let entries: Vec<(&str, i32)> = components
        .iter()
        .map(|(key, value)| (key.as_str(), *value))
        .collect();
    assert_eq!(entries, [("Na[+1]", 2)]);
}

#[test]
fn removal_under_one_alias_closes_all_aliases() {
    let mut components = FormulaMap::new();
    components.insert("Na+", 1).unwrap();
    components.remove("Na+").unwrap();

    for alias in ["Na+1", "Na[+]"] {
        assert!(
            matches!(components.get(alias), Err(IonKeyError::KeyNotFound(_))),
            "alias {alias:?} should be gone"
        );
    }
}

#[test]
fn iteration_follows_first_insertion_order() {
    let mut components = FormulaMap::new();
    components.insert("Cl-", 1).unwrap();
    components.insert("Na+", 2).unwrap();
    components.insert("H2O", 3).unwrap();
    // Overwriting through an alias must not move the entry.
    components.insert("Na[+1]", 4).unwrap();

    let keys: Vec<&str> = components.keys().map(String::as_str).collect();
    assert_eq!(keys, ["Cl[-1]", "Na[+1]", "H2O"]);
    let values: Vec<i32> = components.values().copied().collect();
    assert_eq!(values, [1, 4, 3]);
}

#[test]
fn prepopulated_construction_standardizes_keys() {
    let components =
        FormulaMap::from_pairs([("Mg++", 0.1), ("SO4-2", 0.1), ("H2O", 55.5)]).unwrap();

    assert_eq!(*components.get("Mg[+2]").unwrap(), 0.1);
    assert_eq!(*components.get("SO4[2-]").unwrap(), 0.1);
    assert_eq!(components.len(), 3);
}

#[test]
fn lookup_of_never_set_species_reports_key_not_found() {
    let components: FormulaMap<i32> = FormulaMap::new();
    match components.get("Xx+99") {
        Err(IonKeyError::KeyNotFound(key)) => assert_eq!(key, "Xx[+99]"),
        other => panic!("expected KeyNotFound, got {other:?}"),
    }
}

#[test]
fn unparseable_keys_report_invalid_formula() {
    let mut components: FormulaMap<i32> = FormulaMap::new();

    assert!(matches!(
        components.get("NotAFormula!!"),
        Err(IonKeyError::InvalidFormula { .. })
    ));
    assert!(matches!(
        components.insert("NotAFormula!!", 1),
        Err(IonKeyError::InvalidFormula { .. })
    ));
    assert!(matches!(
        components.remove("NotAFormula!!"),
        Err(IonKeyError::InvalidFormula { .. })
    ));
    assert!(components.is_empty());
}

#[test]
fn update_merges_pairs_in_order() {
    let mut components = FormulaMap::from_pairs([("Na+", 1)]).unwrap();
    components
        .update([("Cl-", 2), ("Na+1", 10)])
        .unwrap();

    let entries: Vec<(&str, i32)> = components
        .iter()
        .map(|(key, value)| (key.as_str(), *value))
        .collect();
    assert_eq!(entries, [("Na[+1]", 10), ("Cl[-1]", 2)]);
}

#[test]
fn into_iterator_yields_standardized_entries() {
    let components = FormulaMap::from_pairs([("Na+", 1), ("Cl-", 2)]).unwrap();

    let borrowed: Vec<&str> = (&components).into_iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(borrowed, ["Na[+1]", "Cl[-1]"]);

    let owned: Vec<(String, i32)> = components.into_iter().collect();
    assert_eq!(owned[0], ("Na[+1]".to_string(), 1));
    assert_eq!(owned[1], ("Cl[-1]".to_string(), 2));
}
