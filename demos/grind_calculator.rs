//! Grind calculator demo
//!
//! This demo shows:
//! - Independent tier categories (TP, donut, cookie)
//! - Flat boosts folded into one multiplier
//! - Friend boost applied step by step after the flat multipliers
//! - Label mismatches found while loading the catalog

use boostcalc::presets::{self, Preset};
use boostcalc::*;

fn main() -> Result<(), ModifierError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Grind Calculator ===\n");

    let catalog = presets::grind();
    for mismatch in catalog.display_mismatches() {
        println!(
            "Label {:?} on {} implies {}, using coded {}",
            mismatch.display, mismatch.modifier, mismatch.displayed, mismatch.coded
        );
    }
    println!();

    let mut calc = Calculator::from_preset(Preset::Grind, Locale::En)?;
    let friends = ModifierId::from_str("friend_boost");

    calc.handle(CalculatorEvent::Input("1000".into()))?;
    println!(
        "Defaults ({} friends): {}",
        calc.state().compounding_count(&friends).unwrap_or_default(),
        calc.result().text().unwrap_or("-")
    );

    let tiers = [
        ("tp", "tp3"),
        ("donut", "chocolate_donut_2"),
        ("cookie", "ench_cookie_1"),
    ];
    for (category, option) in tiers {
        calc.handle(CalculatorEvent::SelectOption {
            category: category.into(),
            option: option.into(),
        })?;
    }
    for toggle in ["time", "premium", "sandstorm_event"] {
        calc.handle(CalculatorEvent::SetToggle {
            toggle: toggle.into(),
            enabled: true,
        })?;
    }

    println!("\nFriend boost from 0 to max:");
    calc.handle(CalculatorEvent::SetCount {
        modifier: friends.clone(),
        count: 0,
    })?;
    loop {
        let count = calc.state().compounding_count(&friends).unwrap_or_default();
        println!("  {} friends: {}", count, calc.result().text().unwrap_or("-"));
        if !calc.can_step_up(&friends) {
            break;
        }
        calc.handle(CalculatorEvent::StepUp(friends.clone()))?;
    }

    if let Some(eval) = calc.evaluate_detailed() {
        println!("\nBreakdown:");
        for (phase, modifier, amount) in eval.entries() {
            match phase {
                Phase::Flat => println!("  flat        × {:<6} {}", amount, modifier),
                Phase::Compounding => println!("  compounding → {:<18} {}", amount, modifier),
            }
        }
        println!("  final value: {}", format_value(eval.value, Locale::En));
    }

    Ok(())
}
