//! Basic usage example for addressing-rs
//!
//! This example demonstrates how to:
//! - Look up address formats and country names
//! - Browse subdivisions, including lazily loaded children
//! - Format an address as text and markup
//! - Validate an address

use addressing_core::{
    Address, AddressFormat, AddressValidator, Country, DefaultFormatter, FormatterOptions,
    Result, Subdivision,
};

fn main() -> Result<()> {
    println!("=== addressing-rs Basic Usage Example ===\n");

    // Example 1: Address formats
    println!("--- Example 1: Address format of Brazil ---");
    let format = AddressFormat::get("BR")?;
    println!("Format:\n{}", format.format());
    println!("Required: {:?}", format.required_fields());
    println!("Subdivision depth: {}\n", format.subdivision_depth());

    // Example 2: Country names
    println!("--- Example 2: Country names in several locales ---");
    for locale in ["en", "fr", "de", "es"] {
        println!("{locale}: {}", Country::get("US", locale)?.name());
    }
    println!();

    // Example 3: Subdivisions
    println!("--- Example 3: Brazilian states ---");
    let states = Subdivision::all(&["BR"])?;
    println!("Total states: {}", states.len());
    for (id, state) in states.iter().take(5) {
        println!("{id}: {}", state.name());
    }
    if let Some(sc) = states.get("SC") {
        println!("Santa Catarina has {} municipalities", sc.children().len());
    }
    println!();

    // Example 4: Formatting
    println!("--- Example 4: Formatting ---");
    let address = Address::new()
        .with_country_code("US")
        .with_administrative_area("CA")
        .with_locality("Mountain View")
        .with_postal_code("94043")
        .with_address_line1("1098 Alta Ave");
    let formatter = DefaultFormatter::new(FormatterOptions::new().locale("fr"));
    println!("{}\n", formatter.format(&address)?);
    let text = formatter.format_with(&address, &FormatterOptions::new().html(false))?;
    println!("{text}\n");

    // Example 5: Validation
    println!("--- Example 5: Validation ---");
    let validator = AddressValidator::default();
    let incomplete = address.with_postal_code("84025");
    for violation in validator.validate(&incomplete)? {
        println!("✗ {violation}");
    }

    Ok(())
}
