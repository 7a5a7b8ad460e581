//! Pet stat calculator demo
//!
//! This demo walks one calculator view through a session:
//! - Entering a base value
//! - Switching exclusive options
//! - Toggling boosts
//! - Changing the display language
//!
//! Run with `RUST_LOG=boostcalc=debug` to see every evaluation.

use boostcalc::presets::Preset;
use boostcalc::*;

fn select(category: &str, option: &str) -> CalculatorEvent {
    CalculatorEvent::SelectOption {
        category: category.into(),
        option: option.into(),
    }
}

fn show(label: &str, result: &FormatResult) {
    match result {
        FormatResult::Empty => println!("  {:<28} (no input)", label),
        FormatResult::Invalid => println!("  {:<28} invalid number", label),
        FormatResult::Ok { text } => println!("  {:<28} {}", label, text),
    }
}

fn main() -> Result<(), ModifierError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    println!("=== Pet Stat Calculator ===\n");

    let mut calc = Calculator::from_preset(Preset::PetStats, Locale::En)?;
    for category in calc.catalog().categories() {
        let options: Vec<&str> = category.options.iter().map(|o| o.id.as_str()).collect();
        println!("{}: {}", category.id, options.join(", "));
    }
    println!();

    show("start", &calc.result());
    show("input 12abc", &calc.handle(CalculatorEvent::Input("12abc".into()))?);
    show("input 100", &calc.handle(CalculatorEvent::Input("100".into()))?);

    if let Some(eval) = calc.evaluate_detailed() {
        println!("\nBreakdown for base {}:", eval.base);
        for (_, modifier, multiplier) in eval.entries() {
            println!("  × {:<8} {}", multiplier, modifier);
        }
        println!("  = {} (multiplier {})\n", eval.value, eval.multiplier);
    }

    show("slime_neowave", &calc.handle(select("slime", "slime_neowave"))?);
    show("mutation_ghost", &calc.handle(select("mutation", "mutation_ghost"))?);
    show(
        "shiny off",
        &calc.handle(CalculatorEvent::SetToggle {
            toggle: "shiny".into(),
            enabled: false,
        })?,
    );

    // Unchecking the active option of an exactly-one category is ignored.
    show(
        "uncheck slime_neowave",
        &calc.handle(CalculatorEvent::DeselectOption {
            category: "slime".into(),
            option: "slime_neowave".into(),
        })?,
    );

    match calc.handle(select("type", "type_diamond")) {
        Ok(_) => println!("  unexpected: type_diamond accepted"),
        Err(e) => println!("  {:<28} {}", "type_diamond", e),
    }

    println!("\nSwitching to Ukrainian rebuilds the view:");
    show("language uk", &calc.handle(CalculatorEvent::LanguageChanged(Locale::Uk))?);
    show("input 1234567.5", &calc.handle(CalculatorEvent::Input("1234567.5".into()))?);

    Ok(())
}
