// crates/addressing-core/tests/postal_label.rs

use addressing_core::{Address, AddressingError, PostalLabelFormatter, PostalLabelOptions};
use serde_json::json;

fn from(origin: &str) -> PostalLabelOptions {
    PostalLabelOptions::new().origin_country(origin)
}

fn mountain_view() -> Address {
    Address::new()
        .with_country_code("US")
        .with_administrative_area("CA")
        .with_locality("Mt View")
        .with_postal_code("94043")
        .with_address_line1("1098 Alta Ave")
}

#[test]
fn origin_country_is_required() {
    let formatter = PostalLabelFormatter::default();
    let err = formatter.format(&Address::new()).unwrap_err();
    assert!(matches!(err, AddressingError::MissingOption("origin_country")));

    let err = formatter
        .format_with(&Address::new().with_country_code("US"), &from(""))
        .unwrap_err();
    assert!(matches!(err, AddressingError::MissingOption("origin_country")));
}

#[test]
fn empty_domestic_address_renders_nothing() {
    let formatter = PostalLabelFormatter::default();
    let label = formatter
        .format_with(&Address::new().with_country_code("US"), &from("US"))
        .unwrap();
    assert_eq!(label, "");
}

#[test]
fn domestic_mail_is_uppercased_without_country() {
    let formatter = PostalLabelFormatter::default();
    assert_eq!(
        formatter.format_with(&mountain_view(), &from("US")).unwrap(),
        "1098 Alta Ave\nMT VIEW, CA 94043"
    );
}

#[test]
fn international_mail_names_the_country_twice() {
    let formatter = PostalLabelFormatter::default();
    let label = formatter
        .format_with(&mountain_view(), &from("FR").locale("FR"))
        .unwrap();
    assert_eq!(
        label,
        "1098 Alta Ave\nMT VIEW, CA 94043\nÉTATS-UNIS - UNITED STATES"
    );
}

#[test]
fn upcase_can_be_disabled() {
    let formatter = PostalLabelFormatter::default();
    assert_eq!(
        formatter
            .format_with(&mountain_view(), &from("US").upcase(false))
            .unwrap(),
        "1098 Alta Ave\nMt View, CA 94043"
    );
    assert_eq!(
        formatter
            .format_with(&mountain_view(), &from("FR").locale("FR").upcase(false))
            .unwrap(),
        "1098 Alta Ave\nMt View, CA 94043\nÉtats-Unis - United States"
    );
}

#[test]
fn postal_code_prefix_only_for_international_mail() {
    let formatter = PostalLabelFormatter::default();
    let address = Address::new()
        .with_country_code("HR")
        .with_locality("Zagreb")
        .with_postal_code("10105");

    assert_eq!(
        formatter.format_with(&address, &from("HR")).unwrap(),
        "10105 ZAGREB"
    );
    assert_eq!(
        formatter.format_with(&address, &from("FR")).unwrap(),
        "HR-10105 ZAGREB\nCROATIA"
    );
}

#[test]
fn japanese_address_shipped_from_france() {
    let address = Address::new()
        .with_country_code("JP")
        .with_administrative_area("01")
        .with_locality("Some City")
        .with_address_line1("Address Line 1")
        .with_address_line2("Address Line 2")
        .with_postal_code("04")
        .with_locale("ja");

    let formatter = PostalLabelFormatter::new(from("FR"));
    let label = formatter
        .format_with(&address, &PostalLabelOptions::new().locale("fr"))
        .unwrap();
    assert_eq!(
        label,
        [
            "JAPON - JAPAN",
            "〒04",
            "北海道Some City",
            "Address Line 1",
            "Address Line 2",
        ]
        .join("\n")
    );
}

#[test]
fn raw_options_are_validated() {
    let formatter = PostalLabelFormatter::from_json(json!({"origin_country": "FR"})).unwrap();
    let label = formatter
        .format_json(&mountain_view(), json!({"upcase": false, "locale": "es"}))
        .unwrap();
    assert_eq!(
        label,
        "1098 Alta Ave\nMt View, CA 94043\nEstados Unidos - United States"
    );

    let err = formatter
        .format_json(&mountain_view(), json!({"upcase": "yes"}))
        .unwrap_err();
    assert_eq!(err.to_string(), "The option `upcase` must be a boolean.");

    assert!(matches!(
        PostalLabelFormatter::from_json(json!({"colour": "red"})).unwrap_err(),
        AddressingError::UnrecognizedOption(_)
    ));
}

#[test]
fn markup_can_be_requested() {
    let formatter = PostalLabelFormatter::new(from("US").html(true));
    let label = formatter.format(&mountain_view()).unwrap();
    assert_eq!(
        label,
        "<p translate=\"no\">\n<span class=\"address-line1\">1098 Alta Ave</span><br>\n\
         <span class=\"locality\">MT VIEW</span>, <span class=\"administrative-area\">CA</span> \
         <span class=\"postal-code\">94043</span>\n</p>"
    );
}
