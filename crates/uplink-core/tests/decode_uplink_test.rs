//! End-to-end tests for uplink decoding.
//!
//! Covers every topic category plus the degraded paths: unmatched topics,
//! unmapped keys and malformed payloads.

use serde_json::{json, Value};
use uplink_core::{decode_uplink, decode_wire, Category, DecodeError, Metadata, DEFAULT_ROUTER};

fn decode(topic: &str, payload: Value) -> Value {
    let bytes = serde_json::to_vec(&payload).unwrap();
    let record = decode_uplink(&bytes, &Metadata::with_topic(topic)).unwrap();
    serde_json::to_value(&record).unwrap()
}

#[test]
fn test_environment_uplink() {
    let out = decode(
        "data/ABC123/environment",
        json!({"data": {"value": "Temp=21.5,Humid=60"}}),
    );
    assert_eq!(
        out,
        json!({
            "deviceName": "英飞拓智能网关",
            "deviceType": "V2831",
            "attributes": {"sn": "ABC123"},
            "telemetry": {"温度": "21.5", "湿度": "60"}
        })
    );
}

#[test]
fn test_lock_uplink() {
    let out = decode(
        "status/XYZ/lock",
        json!({"locks": [{"value": "lock"}, {"value": "unlock"}]}),
    );
    assert_eq!(out["attributes"]["sn"], "XYZ");
    assert_eq!(out["telemetry"], json!({"门锁1状态": "关", "门锁2状态": "开"}));
}

#[test]
fn test_power_usage_uplink() {
    let out = decode(
        "data/PM-01/power",
        json!({"data": {"powerValue": "week=12.3,month=50.1,year=600"}}),
    );
    assert_eq!(out["attributes"]["sn"], "PM-01");
    assert_eq!(
        out["telemetry"],
        json!({"周用电量": "12.3", "月用电量": "50.1", "年用电量": "600"})
    );
}

#[test]
fn test_power_alarm_uplink() {
    let out = decode("alarm/PM-01/power", json!({"alarmType": "Poweroff"}));
    assert_eq!(out["attributes"]["sn"], "PM-01");
    assert_eq!(out["telemetry"], json!({"报警类型": "断电"}));
}

#[test]
fn test_screen_alarm_uplink() {
    let out = decode("alarm/SCR-9/screen", json!({"data": {"value": "overCurrent"}}));
    assert_eq!(out["attributes"]["sn"], "SCR-9");
    assert_eq!(out["telemetry"], json!({"报警类型": "过电流"}));
}

#[test]
fn test_decoding_is_idempotent() {
    let bytes = br#"{"data":{"value":"PM2.5=35,Noise=40"}}"#;
    let metadata = Metadata::with_topic("data/E1/environment");
    let first = decode_uplink(bytes, &metadata).unwrap();
    let second = decode_uplink(bytes, &metadata).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_first_declared_rule_wins() {
    let route = DEFAULT_ROUTER.route("alarm/data/X/power").unwrap();
    assert_eq!(route.category, Category::PowerUsage);

    let out = decode(
        "alarm/data/X/power",
        json!({"data": {"powerValue": "week=1"}, "alarmType": "Poweroff"}),
    );
    assert_eq!(out["telemetry"], json!({"周用电量": "1"}));
}

#[test]
fn test_unmatched_topic_keeps_descriptor() {
    let out = decode("telemetry/ABC/unknown", json!({"data": {"value": "Temp=1"}}));
    assert_eq!(
        out,
        json!({
            "deviceName": "英飞拓智能网关",
            "deviceType": "V2831",
            "attributes": {}
        })
    );
}

#[test]
fn test_unmapped_key_is_kept_under_undefined() {
    let bytes = br#"{"data":{"value":"Foo=42"}}"#;
    let record = decode_uplink(bytes, &Metadata::with_topic("data/A/environment")).unwrap();
    let telemetry = record.telemetry.unwrap();
    assert_eq!(telemetry.len(), 1);
    assert_eq!(telemetry.text("undefined"), Some("42"));
}

#[test]
fn test_malformed_payload_is_parse_error() {
    let result = decode_uplink(b"{\"data\":", &Metadata::with_topic("data/A/environment"));
    assert!(matches!(result, Err(DecodeError::Parse(_))));
}

#[test]
fn test_missing_slice_aborts() {
    let result = decode_uplink(b"{\"other\":1}", &Metadata::with_topic("data/A/power"));
    assert!(matches!(
        result,
        Err(DecodeError::MissingSlice {
            category: Category::PowerUsage,
            ..
        })
    ));
}

#[test]
fn test_alarm_without_text_code_aborts() {
    let result = decode_uplink(b"{}", &Metadata::with_topic("alarm/P1/power"));
    assert!(matches!(
        result,
        Err(DecodeError::MissingSlice {
            category: Category::PowerAlarm,
            ..
        })
    ));

    let result = decode_uplink(
        b"{\"data\":{\"value\":3}}",
        &Metadata::with_topic("alarm/S1/screen"),
    );
    assert!(matches!(
        result,
        Err(DecodeError::UnexpectedKind {
            category: Category::ScreenAlarm,
            ..
        })
    ));
}

#[test]
fn test_null_lock_entry_aborts() {
    let result = decode_uplink(b"{\"locks\":[null]}", &Metadata::with_topic("status/L/lock"));
    assert!(matches!(
        result,
        Err(DecodeError::UnexpectedKind {
            category: Category::LockStatus,
            ..
        })
    ));
}

#[test]
fn test_wire_contract() {
    let out = decode_wire(
        r#"{"data":{"value":"windspeed=4.2"}}"#,
        r#"{"topicName":"data/W1/environment","deviceName":"ignored"}"#,
    )
    .unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["attributes"]["sn"], "W1");
    assert_eq!(value["telemetry"], json!({"风速": "4.2"}));
}

#[test]
fn test_wire_undefined_lock_state_is_omitted() {
    let out = decode_wire(
        r#"{"locks":[{"value":"lock"},{"value":"broken"}]}"#,
        r#"{"topicName":"status/D/lock"}"#,
    )
    .unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["telemetry"], json!({"门锁1状态": "关"}));
}
