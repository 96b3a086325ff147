// crates/addressing-cli/src/args.rs

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for addressing
#[derive(Debug, Parser)]
#[command(
    name = "addressing",
    version,
    about = "Format, validate and inspect international postal addresses"
)]
pub struct CliArgs {
    /// Directory with a dataset in the embedded layout (address_formats.json,
    /// subdivision/, country/). Defaults to the compiled-in data.
    #[arg(short = 'd', long = "data", global = true)]
    pub data: Option<PathBuf>,

    /// Display locale for country and subdivision names [default: en, or
    /// the `locale` of an options file]
    #[arg(short = 'l', long = "locale", global = true)]
    pub locale: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// The address being worked on.
#[derive(Debug, Args)]
pub struct AddressArgs {
    /// ISO2 country code of the address (e.g. US)
    #[arg(short = 'c', long = "country")]
    pub country: String,

    /// Address field as name=value (e.g. locality="Mountain View"); repeatable
    #[arg(short = 'f', long = "field", value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Locale the address is written in (e.g. zh-Hant)
    #[arg(long = "address-locale")]
    pub address_locale: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Format an address as text, markup or a postal label
    Format {
        #[command(flatten)]
        address: AddressArgs,

        /// Render markup instead of plain text (also settable in the options file)
        #[arg(long)]
        html: bool,

        /// Format for a shipping label sent from this country (ISO2)
        #[arg(long = "postal-label", value_name = "ORIGIN")]
        postal_label: Option<String>,

        /// Keep the original case on postal labels
        #[arg(long = "no-upcase", requires = "postal_label")]
        no_upcase: bool,

        /// JSON file with formatter defaults; flags given on the command line win
        #[arg(long = "options", value_name = "FILE")]
        options: Option<PathBuf>,
    },

    /// Validate an address and print every violation
    Validate {
        #[command(flatten)]
        address: AddressArgs,

        /// Field override as name=hidden|optional|required; repeatable
        #[arg(short = 'o', long = "override", value_name = "NAME=OVERRIDE")]
        overrides: Vec<String>,
    },

    /// List subdivisions under a parent chain (e.g. `BR SC`)
    Subdivisions {
        /// Country code followed by parent subdivision ids
        #[arg(required = true)]
        parents: Vec<String>,
    },

    /// List all countries
    Countries,

    /// Show the address format of a country
    FormatInfo {
        /// ISO2 code of the country
        country: String,
    },
}
