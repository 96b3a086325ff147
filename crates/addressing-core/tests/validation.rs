// crates/addressing-core/tests/validation.rs

use addressing_core::{
    Address, AddressField, AddressValidator, FieldOverride, FieldOverrides, Violation,
    ViolationKind,
};

fn violations(address: &Address) -> Vec<Violation> {
    AddressValidator::default().validate(address).unwrap()
}

fn violations_with(
    address: &Address,
    overrides: &[(AddressField, FieldOverride)],
) -> Vec<Violation> {
    AddressValidator::default()
        .with_field_overrides(FieldOverrides::new(overrides.iter().copied()))
        .validate(address)
        .unwrap()
}

fn fields(violations: &[Violation]) -> Vec<AddressField> {
    violations.iter().map(|v| v.field).collect()
}

fn john_smith(country_code: &str) -> Address {
    Address::new()
        .with_country_code(country_code)
        .with_given_name("John")
        .with_family_name("Smith")
}

fn beijing() -> Address {
    john_smith("CN")
        .with_administrative_area("Beijing Shi")
        .with_locality("Xicheng Qu")
        .with_postal_code("123456")
        .with_address_line1("Yitiao Lu")
}

#[test]
fn blank_address_is_valid() {
    assert!(violations(&Address::new()).is_empty());
}

#[test]
fn andorra() {
    let address = Address::new()
        .with_country_code("AD")
        .with_locality("Parròquia d'Andorra la Vella")
        .with_postal_code("AD500")
        .with_address_line1("C. Prat de la Creu, 62-64")
        .with_given_name("Antoni")
        .with_family_name("Martí");
    assert!(violations(&address).is_empty());

    let address = address.with_locality("INVALID");
    assert_eq!(
        violations(&address),
        vec![Violation::new(AddressField::Locality, ViolationKind::Invalid)]
    );
}

#[test]
fn united_states() {
    let address = john_smith("US")
        .with_administrative_area("CA")
        .with_locality("Mountain View")
        .with_postal_code("94043")
        .with_address_line1("1098 Alta Ave");
    assert!(violations(&address).is_empty());

    // Fails the country pattern.
    let address = john_smith("US")
        .with_administrative_area("CA")
        .with_postal_code("909");
    assert_eq!(
        violations(&address),
        vec![
            Violation::new(AddressField::AddressLine1, ViolationKind::Blank),
            Violation::new(AddressField::Locality, ViolationKind::Blank),
            Violation::new(AddressField::PostalCode, ViolationKind::Invalid),
        ]
    );
}

#[test]
fn subdivision_pattern_is_checked_after_country_pattern() {
    // Satisfies the country pattern, fails California's.
    let address = john_smith("US")
        .with_administrative_area("CA")
        .with_locality("Mountain View")
        .with_address_line1("1098 Alta Ave")
        .with_postal_code("84025");
    assert_eq!(
        violations(&address),
        vec![Violation::new(AddressField::PostalCode, ViolationKind::Invalid)]
    );
}

#[test]
fn china() {
    assert!(violations(&beijing()).is_empty());

    let address = beijing().with_address_line1("").with_postal_code("INVALID");
    let found = fields(&violations(&address));
    assert!(found.contains(&AddressField::PostalCode));
    assert!(found.contains(&AddressField::AddressLine1));
}

#[test]
fn full_subdivision_pattern_replaces_the_country_pattern() {
    let taichung = john_smith("CN")
        .with_administrative_area("Taiwan")
        .with_locality("Taichung City")
        .with_postal_code("407")
        .with_address_line1("12345 Yitiao Lu");

    assert_eq!(
        violations(&taichung.with_dependent_locality("INVALID")),
        vec![Violation::new(AddressField::DependentLocality, ViolationKind::Invalid)]
    );
    assert!(violations(&taichung.with_dependent_locality("Xitun District")).is_empty());
}

#[test]
fn japan() {
    let address = Address::new()
        .with_country_code("JP")
        .with_administrative_area("26")
        .with_locality("Shigeru Miyamoto")
        .with_postal_code("601-8501")
        .with_address_line1("11-1 Kamitoba-hokotate-cho")
        .with_given_name("Conan")
        .with_family_name("O'Brien");
    assert!(violations(&address).is_empty());
}

#[test]
fn canada_postal_codes_ignore_case() {
    let address = Address::new()
        .with_country_code("CA")
        .with_administrative_area("QC")
        .with_locality("Montreal")
        .with_postal_code("H2b 2y5")
        .with_address_line1("11 East St'")
        .with_given_name("Joe")
        .with_family_name("Bloggs");
    assert!(violations(&address).is_empty());

    assert_eq!(
        violations(&address.with_sorting_code("INVALID")),
        vec![Violation::new(AddressField::SortingCode, ViolationKind::NotBlank)]
    );
}

#[test]
fn germany_requires_a_city() {
    let address = Address::new()
        .with_country_code("DE")
        .with_locality("Berlin")
        .with_postal_code("10553")
        .with_address_line1("Huttenstr. 50")
        .with_organization("BMW AG Niederkassung Berlin")
        .with_given_name("Dieter")
        .with_family_name("Diefendorf");
    assert!(violations(&address).is_empty());

    assert_eq!(
        violations(&address.with_locality("")),
        vec![Violation::new(AddressField::Locality, ViolationKind::Blank)]
    );
}

#[test]
fn ireland_county_is_optional() {
    let address = Address::new()
        .with_country_code("IE")
        .with_administrative_area("Co. Donegal")
        .with_locality("Dublin")
        .with_address_line1("424 118 Avenue NW")
        .with_given_name("Conan")
        .with_family_name("O'Brien");
    assert!(violations(&address).is_empty());
    assert!(violations(&address.with_administrative_area("")).is_empty());
}

#[test]
fn empty_postal_code_is_not_a_format_error() {
    let chile = Address::new()
        .with_country_code("CL")
        .with_administrative_area("Antofagasta")
        .with_locality("San Pedro de Atacama")
        .with_postal_code("")
        .with_address_line1("GUSTAVO LE PAIGE ST #159")
        .with_given_name("Conan")
        .with_family_name("O'Brien");
    assert!(violations(&chile).is_empty());

    // Required, so blank rather than invalid.
    let address = john_smith("US")
        .with_administrative_area("CA")
        .with_locality("California")
        .with_address_line1("1098 Alta Ave");
    assert_eq!(
        violations(&address),
        vec![Violation::new(AddressField::PostalCode, ViolationKind::Blank)]
    );
}

#[test]
fn optional_overrides_relax_required_fields() {
    let address = beijing().with_given_name("").with_family_name("");
    assert_eq!(
        fields(&violations(&address)),
        vec![AddressField::GivenName, AddressField::FamilyName]
    );

    let relaxed = violations_with(
        &address,
        &[
            (AddressField::GivenName, FieldOverride::Optional),
            (AddressField::FamilyName, FieldOverride::Optional),
        ],
    );
    assert!(relaxed.is_empty());
}

#[test]
fn hidden_fields_must_stay_blank() {
    let address = beijing().with_postal_code("INVALID");
    assert_eq!(
        violations_with(&address, &[(AddressField::PostalCode, FieldOverride::Hidden)]),
        vec![Violation::new(AddressField::PostalCode, ViolationKind::NotBlank)]
    );

    let address = beijing().with_administrative_area("INVALID");
    assert_eq!(
        violations_with(
            &address,
            &[(AddressField::AdministrativeArea, FieldOverride::Hidden)]
        ),
        vec![Violation::new(AddressField::AdministrativeArea, ViolationKind::NotBlank)]
    );
}

#[test]
fn required_overrides_add_fields() {
    let address = beijing();
    assert_eq!(
        violations_with(&address, &[(AddressField::Organization, FieldOverride::Required)]),
        vec![Violation::new(AddressField::Organization, ViolationKind::Blank)]
    );
}
