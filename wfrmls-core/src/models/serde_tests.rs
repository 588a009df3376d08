//! Serialization tests across the model types.

use serde_json::json;

use super::*;

#[test]
fn test_open_enum_round_trips_unknown_value() {
    let status: MemberStatus = serde_json::from_value(json!("On Leave")).unwrap();
    assert_eq!(status, MemberStatus::Other("On Leave".to_string()));
    assert_eq!(serde_json::to_value(&status).unwrap(), json!("On Leave"));
}

#[test]
fn test_open_enum_serializes_wire_value() {
    assert_eq!(
        serde_json::to_value(AduStatus::UnderConstruction).unwrap(),
        json!("Under Construction")
    );
    assert_eq!(
        serde_json::to_value(GreenVerificationType::EnergyStar).unwrap(),
        json!("Energy Star")
    );
}

#[test]
fn test_resource_kind_serializes_entity_set() {
    assert_eq!(
        serde_json::to_value(ResourceKind::PropertyUnitTypes).unwrap(),
        json!("PropertyUnitTypes")
    );
    let kind: ResourceKind = serde_json::from_value(json!("OpenHouse")).unwrap();
    assert_eq!(kind, ResourceKind::OpenHouse);
}

#[test]
fn test_envelope_records_read_as_enums() {
    let envelope: ResponseEnvelope = serde_json::from_value(json!({
        "value": [
            {"ListingKey": "1", "StandardStatus": "Active"},
            {"ListingKey": "2", "StandardStatus": "Coming Soon"}
        ]
    }))
    .unwrap();

    let statuses: Vec<PropertyStatus> = envelope
        .string_values("StandardStatus")
        .map(PropertyStatus::from)
        .collect();

    assert_eq!(
        statuses,
        vec![
            PropertyStatus::Active,
            PropertyStatus::Other("Coming Soon".to_string())
        ]
    );
}

#[test]
fn test_deleted_record_serializes_wire_names() {
    let envelope: ResponseEnvelope = serde_json::from_value(json!({
        "value": [{"resource": "Property", "primary_key": "7", "ts": "2024-01-15T10:30:00Z"}]
    }))
    .unwrap();

    let records = DeletedRecord::from_records(&envelope.value).unwrap();
    let json = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(json["resource"], "Property");
    assert_eq!(json["primary_key"], "7");
    assert!(json["ts"].as_str().unwrap().starts_with("2024-01-15T10:30:00"));
}
