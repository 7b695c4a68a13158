use super::*;
use crate::test_utils::CatalogFixture;

fn basic_catalog() -> Catalog {
    let fixture = CatalogFixture::basic();
    Catalog::parse(&fixture.content, &fixture.name).unwrap()
}

#[test]
fn test_parse_basic_catalog() {
    let catalog = basic_catalog();

    assert_eq!(catalog.profile_names(ProfileKind::Domain).len(), 6);
    assert_eq!(catalog.profile_names(ProfileKind::Usage), vec!["UPD", "UPA", "UPH", "UPX"]);
    assert_eq!(catalog.streams.len(), 3);
    assert_eq!(catalog.stash_records.len(), 8);
}

#[test]
fn test_find_profiles_by_name() {
    let catalog = basic_catalog();

    assert_eq!(catalog.find_time_profile("TDAYM").unwrap().tim_name, "TDAYM");
    assert_eq!(catalog.find_domain_profile("DLEV3").unwrap().ilevlst.as_deref(), Some("5,10,15"));
    assert_eq!(catalog.find_usage_profile("UPA").unwrap().file_id.as_deref(), Some("pp5"));
    assert!(catalog.find_time_profile("TDAY").is_none());
    assert!(catalog.find_domain_profile("diag").is_none());
    assert!(catalog.find_usage_profile("").is_none());
}

#[test]
fn test_find_stream_by_file_id() {
    let catalog = basic_catalog();

    assert_eq!(catalog.find_stream("pp9").unwrap().filename_base, "$DATAM/${RUNID}a.pd%C");
    assert!(catalog.find_stream("pp0").is_none());
}

#[test]
fn test_find_stash_record_by_composite_key() {
    let catalog = basic_catalog();
    let key = StashKey {
        section: 3,
        item: 236,
        usage: "UPD",
        time: "TDAYM",
        domain: "DIAG",
    };

    assert!(catalog.find_stash_record(&key).is_some());
    // same variable, different profile combination
    assert!(catalog.find_stash_record(&StashKey { time: "TMONMN", ..key }).is_none());
}

#[test]
fn test_every_section_is_required() {
    for section in CATALOG_SECTIONS {
        let mut document: Value = serde_json::from_str(&CatalogFixture::basic().content).unwrap();
        document.as_object_mut().unwrap().remove(section);

        let err = Catalog::parse(&document.to_string(), "catalog.json").unwrap_err();
        match err {
            MassError::MissingCatalogSection {
                section: missing,
            } => assert_eq!(missing, section),
            other => panic!("unexpected error for {section}: {other}"),
        }
    }
}

#[test]
fn test_missing_stash_records_fixture() {
    let fixture = CatalogFixture::missing_stash_records();
    let err = Catalog::parse(&fixture.content, &fixture.name).unwrap_err();
    assert!(matches!(err, MassError::MissingCatalogSection { section } if section == "stash_records"));
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    let err = Catalog::parse("{ \"streams\": [ } ", "broken.json").unwrap_err();
    assert!(matches!(err, MassError::CatalogParseError { file, .. } if file == "broken.json"));

    let err = Catalog::parse("[]", "array.json").unwrap_err();
    assert!(matches!(err, MassError::CatalogParseError { .. }));
}

#[test]
fn test_malformed_entry_names_its_section() {
    let text = r#"{
        "domain_profiles": [], "usage_profiles": [], "time_profiles": [],
        "streams": [{ "file_id": "pp9" }],
        "stash_records": []
    }"#;

    match Catalog::parse(text, "catalog.json").unwrap_err() {
        MassError::CatalogParseError {
            reason, ..
        } => {
            assert!(reason.starts_with("streams:"), "{reason}");
            assert!(reason.contains("filename_base"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_profile_names_are_rejected() {
    for kind in ProfileKind::ALL {
        let mut document: Value = serde_json::from_str(&CatalogFixture::basic().content).unwrap();
        let entries = document[kind.section()].as_array_mut().unwrap();
        let first = entries[0].clone();
        entries.push(first);

        match Catalog::parse(&document.to_string(), "catalog.json").unwrap_err() {
            MassError::DuplicateProfile {
                kind: duplicated, ..
            } => assert_eq!(duplicated, kind),
            other => panic!("unexpected error for {kind}: {other}"),
        }
    }
}

#[test]
fn test_duplicate_stream_file_ids_are_rejected() {
    let text = r#"{
        "domain_profiles": [], "usage_profiles": [], "time_profiles": [],
        "streams": [
            { "file_id": "pp9", "filename_base": "$DATAM/${RUNID}a.pd%C" },
            { "file_id": "pp9", "filename_base": "$DATAM/${RUNID}a.pe%C" }
        ],
        "stash_records": []
    }"#;

    let err = Catalog::parse(text, "catalog.json").unwrap_err();
    assert!(matches!(err, MassError::DuplicateStream { file_id } if file_id == "pp9"));
}

#[test]
fn test_closest_profile_name() {
    let catalog = basic_catalog();

    assert_eq!(catalog.closest_profile_name(ProfileKind::Time, "TDAYMN").as_deref(), Some("TDAYM"));
    assert_eq!(catalog.closest_profile_name(ProfileKind::Domain, "DLEV4").as_deref(), Some("DLEV3"));
    assert_eq!(catalog.closest_profile_name(ProfileKind::Usage, "ZZZZZZZZ"), None);
}

#[test]
fn test_numeric_codes_in_stash_records() {
    let text = r#"{
        "domain_profiles": [], "usage_profiles": [], "time_profiles": [], "streams": [],
        "stash_records": [
            { "isec": 3, "item": "0236", "use_name": "UPD", "tim_name": "TDAYM", "dom_name": "DIAG" }
        ]
    }"#;

    let catalog = Catalog::parse(text, "catalog.json").unwrap();
    let key = StashKey {
        section: 3,
        item: 236,
        usage: "UPD",
        time: "TDAYM",
        domain: "DIAG",
    };
    assert!(catalog.find_stash_record(&key).is_some());
}

#[test]
fn test_stash_codes_wider_than_the_format_are_rejected() {
    for record in [r#""isec": 3, "item": 1236"#, r#""isec": "123", "item": "4""#] {
        let text = format!(
            r#"{{
        "domain_profiles": [], "usage_profiles": [], "time_profiles": [], "streams": [],
        "stash_records": [
            {{ {record}, "use_name": "UPD", "tim_name": "TDAYM", "dom_name": "DIAG" }}
        ]
    }}"#
        );

        match Catalog::parse(&text, "catalog.json").unwrap_err() {
            MassError::CatalogParseError {
                reason, ..
            } => assert!(reason.starts_with("stash_records:"), "{reason}"),
            other => panic!("unexpected error for {record}: {other}"),
        }
    }
}
