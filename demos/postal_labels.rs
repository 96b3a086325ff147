//! Postal label example for addressing-rs
//!
//! Shipping labels differ from display formatting: the country line is
//! only added for international mail, selected fields are uppercased and
//! some countries get a postal code prefix.

use addressing_core::{Address, PostalLabelFormatter, PostalLabelOptions, Result};

fn main() -> Result<()> {
    println!("=== addressing-rs Postal Label Example ===\n");

    let address = Address::new()
        .with_country_code("US")
        .with_administrative_area("CA")
        .with_locality("Mt View")
        .with_postal_code("94043")
        .with_address_line1("1098 Alta Ave");

    let formatter = PostalLabelFormatter::new(PostalLabelOptions::new().origin_country("US"));

    println!("--- Domestic ---");
    println!("{}\n", formatter.format(&address)?);

    println!("--- Sent from France ---");
    let from_france = PostalLabelOptions::new().origin_country("FR").locale("fr");
    println!("{}\n", formatter.format_with(&address, &from_france)?);

    println!("--- Without uppercasing ---");
    println!(
        "{}\n",
        formatter.format_with(&address, &from_france.clone().upcase(false))?
    );

    println!("--- Croatia adds a postal code prefix abroad ---");
    let zagreb = Address::new()
        .with_country_code("HR")
        .with_locality("Zagreb")
        .with_postal_code("10105");
    println!("{}", formatter.format_with(&zagreb, &from_france)?);

    Ok(())
}
