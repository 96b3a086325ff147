// crates/addressing-core/tests/subdivision.rs

use addressing_core::loader::{
    AddressFormatDefinition, SubdivisionGroupDefinition, SubdivisionRecord,
};
use addressing_core::{Dataset, StaticProvider, Subdivision};
use std::collections::BTreeMap;
use std::sync::Arc;

fn record(name: &str, pattern: &str) -> SubdivisionRecord {
    SubdivisionRecord {
        name: Some(name.to_string()),
        postal_code_pattern: Some(pattern.to_string()),
        has_children: true,
        ..Default::default()
    }
}

fn group(
    parents: Option<&[&str]>,
    subdivisions: &[(&str, SubdivisionRecord)],
) -> SubdivisionGroupDefinition {
    SubdivisionGroupDefinition {
        country_code: "BR".to_string(),
        locale: Some("pt".to_string()),
        parents: parents.map(|p| p.iter().map(|s| s.to_string()).collect()),
        subdivisions: subdivisions
            .iter()
            .map(|(id, record)| (id.to_string(), record.clone()))
            .collect::<BTreeMap<_, _>>(),
    }
}

fn brazil() -> Arc<StaticProvider> {
    let provider = StaticProvider::new()
        .with_format(
            "BR",
            AddressFormatDefinition {
                format: Some("%address_line1\n%locality-%administrative_area".into()),
                subdivision_depth: Some(2),
                ..Default::default()
            },
        )
        .with_group(
            "BR",
            group(
                None,
                &[
                    ("SC", record("Santa Catarina", "8[89]")),
                    ("SP", record("São Paulo", "[01][1-9]")),
                ],
            ),
        )
        .with_group(
            "BR-SC",
            group(Some(&["BR", "SC"]), &[("Abelardo Luz", SubdivisionRecord::default())]),
        )
        .with_group(
            "BR-SP",
            group(Some(&["BR", "SP"]), &[("Anhumas", SubdivisionRecord::default())]),
        );
    Arc::new(provider)
}

#[test]
fn get_fills_in_defaults_and_links_parents() {
    let dataset = Dataset::new(brazil());
    let subdivisions = dataset.subdivisions();

    let sc = subdivisions.get("SC", &["BR"]).unwrap().unwrap();
    assert!(sc.parent().is_none());
    assert_eq!(sc.country_code(), "BR");
    assert_eq!(sc.id(), "SC");
    assert_eq!(sc.locale(), Some("pt"));
    assert_eq!(sc.code(), "SC");
    assert_eq!(sc.name(), "Santa Catarina");
    assert_eq!(sc.postal_code_pattern(), Some("8[89]"));

    let child = subdivisions
        .get("Abelardo Luz", &["BR", "SC"])
        .unwrap()
        .unwrap();
    assert_eq!(child.id(), "Abelardo Luz");
    assert_eq!(child.code(), "Abelardo Luz");
    assert_eq!(child.name(), "Abelardo Luz");
    assert_eq!(sc.children().get("Abelardo Luz").as_deref(), Some(child.as_ref()));

    let parent = child.parent().unwrap();
    assert_eq!(parent.code(), sc.code());
    // Resolved once, then shared.
    assert!(Arc::ptr_eq(&parent, &child.parent().unwrap()));
}

#[test]
fn unknown_subdivisions_are_none() {
    let dataset = Dataset::new(brazil());
    assert!(dataset.subdivisions().get("FAKE", &["BR"]).unwrap().is_none());
}

#[test]
fn all_and_list() {
    let dataset = Dataset::new(brazil());
    let subdivisions = dataset.subdivisions();

    assert!(subdivisions.all(&["RS"]).unwrap().is_empty());

    let all = subdivisions.all(&["BR"]).unwrap();
    assert_eq!(all.keys().collect::<Vec<_>>(), ["SC", "SP"]);
    assert_eq!(all["SP"].code(), "SP");

    let all = subdivisions.all(&["BR", "SC"]).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all["Abelardo Luz"].code(), "Abelardo Luz");

    assert!(subdivisions.list(&["RS"], None).unwrap().is_empty());
    let list = subdivisions.list(&["BR"], None).unwrap();
    assert_eq!(list["SC"], "Santa Catarina");
    assert_eq!(list["SP"], "São Paulo");
    assert_eq!(list.len(), 2);
    assert_eq!(
        subdivisions.list(&["BR", "SC"], None).unwrap().into_iter().collect::<Vec<_>>(),
        vec![("Abelardo Luz".to_string(), "Abelardo Luz".to_string())]
    );
}

#[test]
fn children_load_on_first_access_only() {
    let provider = brazil();
    let dataset = Dataset::new(provider.clone());
    let subdivisions = dataset.subdivisions();

    let sp = subdivisions.get("SP", &["BR"]).unwrap().unwrap();
    assert_eq!(provider.group_loads(), 1);
    assert!(!sp.children().is_loaded());

    assert_eq!(sp.children().keys().collect::<Vec<_>>(), ["Anhumas"]);
    assert_eq!(provider.group_loads(), 2);

    // Leaves never touch the provider.
    let anhumas = sp.children().get("Anhumas").unwrap();
    assert!(anhumas.children().is_empty());
    assert!(!anhumas.has_children());
    assert_eq!(provider.group_loads(), 2);

    // Cached groups are not requested twice.
    subdivisions.all(&["BR", "SP"]).unwrap();
    assert_eq!(provider.group_loads(), 2);
    assert_eq!(subdivisions.loaded_groups(), 2);
}

#[test]
fn zero_depth_countries_have_no_subdivisions() {
    // Group data exists, but the format declares no subdivision levels.
    let mut xa = group(None, &[("NORTH", record("North", "1"))]);
    xa.country_code = "XA".to_string();
    let provider = Arc::new(
        StaticProvider::new()
            .with_format(
                "XA",
                AddressFormatDefinition {
                    format: Some("%address_line1\n%locality".into()),
                    subdivision_depth: Some(0),
                    ..Default::default()
                },
            )
            .with_group("XA", xa),
    );
    let dataset = Dataset::new(provider.clone());
    let subdivisions = dataset.subdivisions();

    assert!(subdivisions.all(&["XA"]).unwrap().is_empty());
    assert!(subdivisions.list(&["XA"], None).unwrap().is_empty());
    assert!(subdivisions.get("NORTH", &["XA"]).unwrap().is_none());
    assert_eq!(provider.group_loads(), 0);
}

#[test]
fn embedded_hashed_groups_resolve() {
    let taichung = Subdivision::get("Xitun District", &["CN", "Taiwan", "Taichung City"])
        .unwrap()
        .unwrap();
    assert_eq!(taichung.local_code(), Some("西屯区"));
    assert_eq!(taichung.parent().unwrap().code(), "Taichung City");

    let taipei = Subdivision::get("Taipei City", &["TW"]).unwrap().unwrap();
    assert_eq!(taipei.locale(), Some("zh-Hant"));
    assert!(taipei.children().get("Da'an District").is_some());
}

#[test]
fn list_prefers_local_names_for_matching_locales() {
    let english = Subdivision::list(&["CA"], Some("en")).unwrap();
    assert_eq!(english["QC"], "Quebec");

    // The Canadian data carries no locale, so local names never apply.
    let french = Subdivision::list(&["CA"], Some("fr")).unwrap();
    assert_eq!(french["QC"], "Quebec");

    let japanese = Subdivision::list(&["JP"], Some("ja")).unwrap();
    assert_eq!(japanese["26"], "京都府");
    let romanized = Subdivision::list(&["JP"], None).unwrap();
    assert_eq!(romanized["26"], "Kyoto");
}

#[test]
fn colombian_departments_come_from_customizations() {
    let departments = Subdivision::all(&["CO"]).unwrap();
    assert_eq!(departments.len(), 33);
    let dc = &departments["DC"];
    assert_eq!(dc.name(), "Distrito Capital de Bogotá");
    assert_eq!(dc.iso_code(), Some("CO-DC"));
}
