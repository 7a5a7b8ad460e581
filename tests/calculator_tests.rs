//! Tests for calculator views and catalog loading.
//!
//! These tests verify:
//! - Event handling recomputes after every mutation
//! - Errors leave the view untouched
//! - Independent calculators over one shared catalog
//! - Catalog loading from JSON readers

use boostcalc::presets::Preset;
use boostcalc::*;
use std::sync::Arc;

fn select(category: &str, option: &str) -> CalculatorEvent {
    CalculatorEvent::SelectOption {
        category: category.into(),
        option: option.into(),
    }
}

fn deselect(category: &str, option: &str) -> CalculatorEvent {
    CalculatorEvent::DeselectOption {
        category: category.into(),
        option: option.into(),
    }
}

// ============================================================================
// Event Handling
// ============================================================================

#[test]
fn test_pet_calculator_recomputes_on_every_event() {
    let mut calc = Calculator::from_preset(Preset::PetStats, Locale::En).unwrap();

    assert_eq!(
        calc.handle(CalculatorEvent::Input("".into())).unwrap(),
        FormatResult::Empty
    );
    assert_eq!(
        calc.handle(CalculatorEvent::Input("12x".into())).unwrap(),
        FormatResult::Invalid
    );

    calc.handle(CalculatorEvent::Input("10".into())).unwrap();
    calc.handle(CalculatorEvent::SetToggle {
        toggle: "shiny".into(),
        enabled: false,
    })
    .unwrap();
    calc.handle(CalculatorEvent::SetToggle {
        toggle: "maxlvl".into(),
        enabled: false,
    })
    .unwrap();
    calc.handle(select("slime", "slime_neowave")).unwrap();
    calc.handle(select("mutation", "mutation_ghost")).unwrap();
    calc.handle(select("evolution", "evolution_huge")).unwrap();
    let result = calc.handle(select("type", "type_void")).unwrap();

    // 10 × 3 × 2 × 2 × 2
    assert_eq!(result, FormatResult::Ok { text: "240".into() });

    // Unchecking the active option keeps it.
    let result = calc.handle(deselect("type", "type_void")).unwrap();
    assert_eq!(result.text(), Some("240"));
    assert_eq!(calc.state().selected(&"type".into()), Some(&"type_void".into()));
}

#[test]
fn test_grind_calculator_tiers() {
    let mut calc = Calculator::from_preset(Preset::Grind, Locale::En).unwrap();
    calc.handle(CalculatorEvent::SetCount {
        modifier: "friend_boost".into(),
        count: 0,
    })
    .unwrap();
    calc.handle(CalculatorEvent::Input("100".into())).unwrap();

    assert_eq!(calc.handle(select("tp", "tp1")).unwrap().text(), Some("130"));
    assert_eq!(calc.handle(select("tp", "tp3")).unwrap().text(), Some("190"));
    assert_eq!(calc.handle(deselect("tp", "tp3")).unwrap().text(), Some("100"));

    calc.handle(CalculatorEvent::SetToggle {
        toggle: "member".into(),
        enabled: true,
    })
    .unwrap();
    let result = calc.handle(CalculatorEvent::StepUp("friend_boost".into())).unwrap();
    // 200 × 1.15 lands just below 230 in binary.
    assert_eq!(result.text(), Some("230.00"));

    let eval = calc.evaluate_detailed().unwrap();
    assert_eq!(eval.base, 100.0);
    assert_eq!(eval.multiplier, 2.0);
    assert_eq!(eval.steps.len(), 1);
}

#[test]
fn test_errors_leave_view_untouched() {
    let mut calc = Calculator::from_preset(Preset::RcuPets, Locale::Ru).unwrap();
    calc.handle(CalculatorEvent::Input("2500.5".into())).unwrap();
    let before = calc.state().clone();

    let err = calc.handle(select("rarity", "mythic")).unwrap_err();
    assert_eq!(
        err,
        ModifierError::InvalidOption {
            category: "rarity".into(),
            option: "mythic".into(),
        }
    );
    assert_eq!(calc.state(), &before);
    assert_eq!(calc.result().text(), Some("2\u{a0}500,50"));
}

#[test]
fn test_rcu_rarity_falls_back_to_normal() {
    let mut calc = Calculator::from_preset(Preset::RcuPets, Locale::En).unwrap();
    calc.handle(CalculatorEvent::Input("10".into())).unwrap();

    assert_eq!(calc.handle(select("rarity", "golden")).unwrap().text(), Some("20"));
    assert_eq!(calc.handle(deselect("rarity", "golden")).unwrap().text(), Some("10"));
    assert_eq!(calc.state().selected(&"rarity".into()), Some(&"normal".into()));
}

#[test]
fn test_arm_calculator_golden_tiers() {
    let mut calc = Calculator::from_preset(Preset::Arm, Locale::En).unwrap();
    calc.handle(CalculatorEvent::Input("100".into())).unwrap();

    // golden5 is on by default.
    assert_eq!(calc.result().text(), Some("210"));
    assert_eq!(calc.handle(select("golden", "golden1")).unwrap().text(), Some("150"));
    assert_eq!(calc.handle(select("golden", "golden3")).unwrap().text(), Some("180"));
    assert_eq!(calc.handle(deselect("golden", "golden3")).unwrap().text(), Some("100"));

    calc.handle(CalculatorEvent::Reset).unwrap();
    assert_eq!(calc.state().selected(&"golden".into()), Some(&"golden5".into()));
}

#[test]
fn test_results_match_browser_rounding() {
    let mut calc = Calculator::from_preset(Preset::RcuPets, Locale::En).unwrap();

    for (input, shown) in [
        ("0.123456785", "0.12345679"),
        ("1.000000005", "1.00000001"),
        ("12.345678905", "12.34567891"),
        ("1152921504606846976", "1,152,921,504,606,847,000"),
    ] {
        let result = calc.handle(CalculatorEvent::Input(input.into())).unwrap();
        assert_eq!(result.text(), Some(shown), "input {}", input);
    }
}

#[test]
fn test_reset_restores_defaults() {
    let mut calc = Calculator::from_preset(Preset::Grind, Locale::En).unwrap();
    calc.handle(select("cookie", "ench_cookie_1")).unwrap();
    calc.handle(CalculatorEvent::StepDown("friend_boost".into())).unwrap();
    calc.handle(CalculatorEvent::Input("5".into())).unwrap();

    calc.handle(CalculatorEvent::Reset).unwrap();
    assert_eq!(calc.state(), &SelectionState::new(calc.catalog()));
    // Reset keeps the input.
    assert_eq!(calc.input(), "5");
}

#[test]
fn test_calculators_share_catalog_but_not_state() {
    let catalog = Arc::new(Preset::RcuPets.load().unwrap());
    let mut first = Calculator::new(Arc::clone(&catalog), Locale::En);
    let mut second = Calculator::new(Arc::clone(&catalog), Locale::En);

    first.handle(CalculatorEvent::Input("3".into())).unwrap();
    second.handle(CalculatorEvent::Input("3".into())).unwrap();
    first.handle(select("rarity", "galaxy")).unwrap();

    assert_eq!(first.result().text(), Some("24"));
    assert_eq!(second.result().text(), Some("3"));
}

// ============================================================================
// Catalog Loading
// ============================================================================

#[test]
fn test_catalog_from_reader() {
    let json = br#"{
        "id": "arm",
        "version": 3,
        "categories": [
            { "id": "glove", "exclusivity": "at_most_one",
              "options": [{ "id": "iron", "multiplier": 1.25, "display": "+25%" }] }
        ],
        "toggles": [{ "id": "double", "multiplier": 2, "display": "3x" }],
        "compounding": [
            { "id": "stack", "per_step": 1.1, "max_count": 5, "default_count": 2 }
        ]
    }"#;

    let catalog = ModifierCatalog::from_reader(&json[..]).unwrap();
    assert_eq!(catalog.version(), 3);
    assert_eq!(catalog.category(&"glove".into()).unwrap().exclusivity, Exclusivity::AtMostOne);
    assert!(!catalog.toggle(&"double".into()).unwrap().default_enabled);
    assert_eq!(catalog.compounding_modifier(&"stack".into()).unwrap().min_count, 0);

    let mismatches = catalog.display_mismatches();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].modifier, "double");

    let state = SelectionState::new(&catalog);
    assert_eq!(evaluate(100.0, &state, &catalog), 100.0 * 1.1 * 1.1);
}

#[test]
fn test_invalid_catalog_fails_fast() {
    let json = r#"{
        "id": "broken",
        "categories": [
            { "id": "tier", "default": "gold",
              "options": [{ "id": "silver", "multiplier": 1.5 }] }
        ]
    }"#;

    match ModifierCatalog::from_json_str(json) {
        Err(ModifierError::InvalidCatalog { catalog, reason }) => {
            assert_eq!(catalog, "broken");
            assert!(reason.contains("gold"));
        }
        other => panic!("expected InvalidCatalog, got {:?}", other),
    }
}
