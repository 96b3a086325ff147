//! addressing: command-line front end for addressing-core
//!
//! Formats and validates postal addresses and browses the bundled address
//! data from the terminal.
//!
//! Usage examples
//! --------------
//!
//! - Format an address as plain text
//!   $ addressing format -c US -f address_line1="1098 Alta Ave" -f locality="Mountain View" \
//!       -f administrative_area=CA -f postal_code=94043
//!
//! - Format a shipping label sent from France, country names in French
//!   $ addressing --locale fr format -c US -f locality="Mt View" --postal-label FR
//!
//! - Validate an address, relaxing the recipient name
//!   $ addressing validate -c US -f postal_code=909 -o given_name=optional -o family_name=optional
//!
//! - Browse subdivisions
//!   $ addressing subdivisions BR
//!   $ addressing subdivisions CN Taiwan
//!
//! Data source
//! -----------
//!
//! By default the compiled-in dataset is used. `--data <dir>` points to a
//! directory laid out the same way (`address_formats.json`, `subdivision/`,
//! `country/`). Set `-v` (repeatable) or `RUST_LOG` to see what gets loaded.
mod args;

use crate::args::{CliArgs, Commands};
use addressing_cli::{build_address, build_overrides, format_address, read_options, FormatRequest};
use addressing_core::formatter::DEFAULT_LOCALE;
use addressing_core::{AddressValidator, Dataset, DirectoryProvider};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let dataset = match &args.data {
        Some(dir) => {
            info!(path = %dir.display(), "using dataset directory");
            Dataset::new(Arc::new(DirectoryProvider::new(dir.clone())))
        }
        None => Dataset::default(),
    };
    let display_locale = args.locale.clone();
    let locale = display_locale.as_deref().unwrap_or(DEFAULT_LOCALE);

    match args.command {
        Commands::Format {
            address,
            html,
            postal_label,
            no_upcase,
            options,
        } => {
            let addr = build_address(
                &address.country,
                &address.fields,
                address.address_locale.as_deref(),
            )?;
            let request = FormatRequest {
                options: options.as_deref().map(read_options).transpose()?,
                locale: args.locale,
                html,
                postal_label,
                no_upcase,
            };
            println!("{}", format_address(dataset, &addr, request)?);
        }

        Commands::Validate { address, overrides } => {
            let addr = build_address(
                &address.country,
                &address.fields,
                address.address_locale.as_deref(),
            )?;
            let validator =
                AddressValidator::new(dataset).with_field_overrides(build_overrides(&overrides)?);
            let violations = validator.validate(&addr)?;
            if violations.is_empty() {
                println!("OK");
            } else {
                for violation in &violations {
                    println!("{violation}");
                }
                std::process::exit(1);
            }
        }

        Commands::Subdivisions { parents } => {
            let list = dataset.subdivisions().list(parents.as_slice(), Some(locale))?;
            if list.is_empty() {
                println!("No subdivisions under {}", parents.join(" > "));
            }
            for (id, name) in list {
                if id == name {
                    println!("{id}");
                } else {
                    println!("{id}\t{name}");
                }
            }
        }

        Commands::Countries => {
            for (code, name) in dataset.countries().list(locale, None)? {
                println!("{code}\t{name}");
            }
        }

        Commands::FormatInfo { country } => {
            let format = dataset.address_formats().get(&country)?;
            let name = dataset.countries().get(&country, locale, None)?;
            let join = |fields: &[addressing_core::AddressField]| {
                fields
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };

            println!("{} ({})", name.name(), format.country_code());
            println!("  Locale: {}", format.locale().unwrap_or("-"));
            println!("  Format:");
            for line in format.format().lines() {
                println!("    {line}");
            }
            if let Some(local_format) = format.local_format() {
                println!("  Local format:");
                for line in local_format.lines() {
                    println!("    {line}");
                }
            }
            println!("  Required: {}", join(format.required_fields()));
            println!("  Uppercase: {}", join(format.uppercase_fields()));
            if let Some(pattern) = format.postal_code_pattern() {
                println!("  Postal code pattern: {pattern}");
            }
            if let Some(prefix) = format.postal_code_prefix() {
                println!("  Postal code prefix: {prefix}");
            }
            println!("  Subdivision depth: {}", format.subdivision_depth());
        }
    }

    Ok(())
}
