//! List rules command implementation.

use wc_lint_rules::{all_rules, Preset};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<7} {:<48} {:<8} Description", "Code", "Name", "Default");
    println!("{}", "-".repeat(110));

    for rule in all_rules() {
        println!(
            "{:<7} {:<48} {:<8} {}",
            rule.code(),
            rule.name(),
            rule.default_severity(),
            rule.description()
        );
    }

    println!("\nPresets:");
    for preset in [Preset::Recommended, Preset::BestPractice, Preset::All] {
        let names = preset.rule_names();
        let default = if preset == Preset::default() { " (default)" } else { "" };
        println!("  {:<14} {} rule(s){}", preset.name(), names.len(), default);
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  wc-lint check --rules no-typos,no-self-class");
    println!("  wc-lint check --rules WC016,WC017");
}
