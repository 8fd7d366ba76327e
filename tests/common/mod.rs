use ionkey::standardize_formula;

pub struct Case<'a> {
    pub name: &'a str,
    pub input: &'a str,
    pub expected: &'a str,
}

pub fn run_group_test(group_name: &str, cases: Vec<Case>) {
    let mut failures = 0;

    println!("\nRunning Group Test: {}", group_name);
    println!("{:-<72}", "");
    println!(
        "{:<24} | {:<14} | {:<14} | {:<10}",
        "Case", "Input", "Expected", "Got"
    );

    for case in &cases {
        let got = standardize_formula(case.input)
            .unwrap_or_else(|err| panic!("'{}' failed to standardize: {err}", case.input));

        let status = if got == case.expected { "ok" } else { "FAIL" };
        if got != case.expected {
            failures += 1;
        }

        println!(
            "{:<24} | {:<14} | {:<14} | {:<10} ({})",
            case.name, case.input, case.expected, got, status
        );

        // Every standardized output must itself be a fixed point.
        let again = standardize_formula(&got)
            .unwrap_or_else(|err| panic!("'{got}' failed to re-standardize: {err}"));
        assert_eq!(
            again, got,
            "standardization of '{}' is not idempotent",
            case.input
        );
    }

    println!("{:-<72}\n", "");

    assert_eq!(
        failures, 0,
        "{failures} of {} cases in group '{group_name}' failed",
        cases.len()
    );
}
