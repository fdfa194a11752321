use pincer_core::entry::RequirementEntry;
use pincer_core::specifier::Comparator;
use pincer_core::version::Version;

#[test]
fn lower_bound_only() {
    let entry = RequirementEntry::parse("numpy >1.20.0").unwrap();
    assert_eq!(entry.name, "numpy");
    assert_eq!(entry.specifiers.len(), 1);
    assert_eq!(entry.specifiers.to_string(), ">1.20.0");
    assert!(!entry.strict);
}

#[test]
fn lower_and_upper_bound() {
    let entry = RequirementEntry::parse("lightning-utilities >=0.8.0, <0.11.0").unwrap();
    assert_eq!(entry.name, "lightning-utilities");
    assert_eq!(entry.specifiers.len(), 2);
    assert_eq!(entry.specifiers.specifiers[0].comparator, Comparator::Ge);
    assert_eq!(
        entry.specifiers.specifiers[0].version,
        Version::parse("0.8.0")
    );
    assert_eq!(entry.specifiers.specifiers[1].comparator, Comparator::Lt);
    assert_eq!(
        entry.specifiers.specifiers[1].version,
        Version::parse("0.11.0")
    );
}

#[test]
fn bare_name_with_marker() {
    let entry = RequirementEntry::parse("typing-extensions; python_version < '3.9'").unwrap();
    assert_eq!(entry.name, "typing-extensions");
    assert!(entry.specifiers.is_empty());
    assert_eq!(
        entry.marker.as_ref().unwrap().to_string(),
        "python_version < '3.9'"
    );
}

#[test]
fn specifiers_and_marker_together() {
    let entry =
        RequirementEntry::parse("gym >=0.20.0, <0.26.3; python_version > '3.7'").unwrap();
    assert_eq!(entry.specifiers.len(), 2);
    assert!(entry.marker.is_some());
}

#[test]
fn strict_annotation_sets_structured_flag() {
    let entry = RequirementEntry::parse("torchvision >=0.9.1, <=0.14.1  # strict").unwrap();
    assert!(entry.strict);
    assert_eq!(entry.comment.as_deref(), Some("strict"));
}

#[test]
fn display_roundtrip_is_equivalent() {
    for line in [
        "numpy >1.20.0",
        "lightning-utilities >=0.8.0, <0.11.0",
        "typing-extensions; python_version < '3.9'",
        "torchvision >=0.9.1, <=0.14.1  # strict",
        "requests[security] >=2.28, !=2.29.0",
    ] {
        let entry = RequirementEntry::parse(line).unwrap();
        let reparsed = RequirementEntry::parse(&entry.to_string()).unwrap();
        assert_eq!(entry, reparsed, "round-trip failed for {line}");
    }
}

#[test]
fn json_shape_matches_constraint_vocabulary() {
    let entry = RequirementEntry::parse("numpy >1.20.0").unwrap();
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["package"], "numpy");
    assert_eq!(value["constraints"][0], ">1.20.0");
    assert_eq!(value["strict"], false);
    assert!(value.get("environment_marker").is_none());

    let entry = RequirementEntry::parse("typing-extensions; python_version < '3.9'").unwrap();
    let value = serde_json::to_value(&entry).unwrap();
    assert_eq!(value["environment_marker"], "python_version < '3.9'");
    assert_eq!(value["constraints"], serde_json::json!([]));
}

#[test]
fn malformed_specifier_is_fatal() {
    assert!(RequirementEntry::parse("numpy >>1.0").is_err());
    assert!(RequirementEntry::parse("numpy 1.0").is_err());
    assert!(RequirementEntry::parse("numpy >=").is_err());
}

#[test]
fn malformed_marker_is_fatal() {
    assert!(RequirementEntry::parse("numpy >1.0; python_version").is_err());
    assert!(RequirementEntry::parse("numpy >1.0; < '3.9'").is_err());
}
