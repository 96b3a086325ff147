//! Error handling example for addressing-rs
//!
//! This example demonstrates the error types and the lookups that return
//! nothing instead of failing.

use addressing_core::{
    AddressField, AddressFormat, AddressingError, Country, DefaultFormatter, Result, Subdivision,
};
use serde_json::json;

fn main() -> Result<()> {
    println!("=== addressing-rs Error Handling Example ===\n");

    // Example 1: Countries without predefined formats use the generic one
    println!("--- Example 1: Generic address format ---");
    let generic = AddressFormat::get("ZZ")?;
    println!("ZZ uses {:?}\n", generic.format());

    // Example 2: Unknown countries
    println!("--- Example 2: Unknown country codes ---");
    for code in ["XX", "YY"] {
        match Country::get(code, "en") {
            Ok(country) => println!("✓ {}", country.name()),
            Err(AddressingError::UnknownCountry(code)) => println!("✗ {code} is not a country"),
            Err(e) => return Err(e),
        }
    }
    println!();

    // Example 3: Missing subdivisions are None
    println!("--- Example 3: Unknown subdivisions ---");
    match Subdivision::get("FAKE", &["BR"])? {
        Some(s) => println!("✓ Found {}", s.name()),
        None => println!("✗ No subdivision FAKE in BR"),
    }
    println!("Subdivisions of RS: {}\n", Subdivision::all(&["RS"])?.len());

    // Example 4: Invalid enum values
    println!("--- Example 4: Parsing field names ---");
    for name in ["postal_code", "zip"] {
        match name.parse::<AddressField>() {
            Ok(field) => println!("✓ {name} -> {field:?}"),
            Err(e) => println!("✗ {e}"),
        }
    }
    println!();

    // Example 5: Option validation
    println!("--- Example 5: Invalid formatter options ---");
    for options in [json!({"html": "yes"}), json!({"colour": "red"})] {
        match DefaultFormatter::from_json(options) {
            Ok(_) => println!("✓ accepted"),
            Err(e) => println!("✗ {e}"),
        }
    }

    Ok(())
}
