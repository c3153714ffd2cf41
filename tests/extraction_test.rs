use proptest::prelude::*;
use protein_intake::core::vocabulary::{all_forms, FALLBACK_LABEL, UNIT_MARKERS};
use protein_intake::{extract, IntakeMatch};

fn matched(amount: f64, label: &str) -> Option<IntakeMatch> {
    Some(IntakeMatch {
        amount,
        label: label.to_string(),
    })
}

#[test]
fn test_documented_examples() {
    assert_eq!(extract("40g chicken breast"), matched(40.0, "Chicken breast"));
    assert_eq!(
        extract("I drank a Chocolate Milkshake with 26g of protein"),
        matched(26.0, "Chocolate Milkshake")
    );
    assert_eq!(extract("chicken 30"), matched(30.0, "Chicken"));
    assert_eq!(extract("just ate something tasty"), None);
    assert_eq!(extract("30g"), matched(30.0, FALLBACK_LABEL));
}

#[test]
fn test_case_of_unit_does_not_matter() {
    assert_eq!(extract("Salmon 28 GRAMS"), matched(28.0, "Salmon"));
    assert_eq!(extract("Salmon 28G"), matched(28.0, "Salmon"));
}

#[test]
fn test_garbage_input_never_panics() {
    for text in ["", " ", "...", "g", "grams", "1.", ".5", "١٢g", "🍗🍗", "\n\t42\n"] {
        let _ = extract(text);
    }
    assert_eq!(extract("\n\t42\n"), matched(42.0, FALLBACK_LABEL));
}

fn words() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z]{2,8}", 0..4).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn unit_qualified_amount_is_returned_exactly(
        prefix in words(),
        suffix in words(),
        tenths in 0u32..100_000,
        spaced in any::<bool>(),
        unit_index in 0usize..3,
    ) {
        let units: Vec<&str> = all_forms(UNIT_MARKERS).collect();
        let amount = f64::from(tenths) / 10.0;
        let gap = if spaced { " " } else { "" };
        let text = format!("{} {}{}{} {}", prefix, amount, gap, units[unit_index], suffix);

        let parsed = extract(text.as_str()).expect("unit-qualified amount");
        prop_assert_eq!(parsed.amount, amount);
        prop_assert!(!parsed.label.is_empty());
    }

    #[test]
    fn reextracting_label_and_amount_keeps_amount(
        label in words(),
        tenths in 0u32..100_000,
    ) {
        let amount = f64::from(tenths) / 10.0;
        let first = extract(format!("{} {}g", label, amount).as_str()).expect("first pass");
        let rebuilt = format!("{} {}g", first.label, first.amount);
        let second = extract(rebuilt.as_str()).expect("second pass");

        prop_assert_eq!(second.amount, first.amount);
    }

    #[test]
    fn amount_is_finite_and_label_non_empty(text in "\\PC{0,40}") {
        if let Some(parsed) = extract(text.as_str()) {
            prop_assert!(parsed.amount.is_finite());
            prop_assert!(parsed.amount >= 0.0);
            prop_assert!(!parsed.label.is_empty());
        }
    }
}
