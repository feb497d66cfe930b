//! The providers command

use colored::Colorize;
use schema_providers::ProviderCatalog;

use crate::error::Result;

/// Run the providers command
pub fn run_providers(catalog: &ProviderCatalog) -> Result<()> {
    println!("{}", "Providers".bold());
    println!();

    for name in catalog.names() {
        let description = catalog
            .get(name)
            .and_then(|schema| schema.description())
            .unwrap_or_default();
        println!("  {:<18} {}", name.green(), description.dimmed());
    }

    println!();
    println!(
        "{} {} providers registered. Use {} to see a provider's fields.",
        "Total:".dimmed(),
        catalog.len(),
        "gschema schema <name>".cyan()
    );
    Ok(())
}
