use querykit::logger::parse_level;
use querykit::pretty::{JsonPrinter, Printer, to_pretty_string};
use querykit::types::{OptionalString, Order, SortSpec};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Vehicle {
    #[serde(default)]
    nickname: OptionalString,
    model: OptionalString,
}

#[test]
fn optional_string_accepts_null_and_missing() {
    let v: Vehicle = serde_json::from_str(r#"{"model": null}"#).unwrap();
    assert!(v.nickname.is_zero());
    assert!(v.model.is_zero());
    let v: Vehicle = serde_json::from_str(r#"{"model": "T654", "nickname": "bolt"}"#).unwrap();
    assert_eq!(&*v.model, "T654");
    assert_eq!(v.nickname.to_string(), "bolt");
}

#[test]
fn sort_spec_directions() {
    assert_eq!(SortSpec::asc("a").order.direction(), 1);
    assert_eq!(SortSpec::desc("a").order, Order::Desc);
    assert_eq!(Order::Desc.direction(), -1);
}

#[test]
fn printer_writes_each_value_on_its_own_lines() {
    let mut p = JsonPrinter::new(Vec::new());
    p.print(&bson::doc! {"a": 1}).unwrap();
    p.print("x").unwrap();
    let out = String::from_utf8(p.into_inner()).unwrap();
    assert_eq!(out, "{\n    \"a\": 1\n}\n\"x\"\n");
}

#[test]
fn pretty_string_shows_identifiers_as_extended_json() {
    let oid = bson::oid::ObjectId::parse_str("5c7836b73a8de34c78fec399").unwrap();
    let s = to_pretty_string(&bson::doc! {"_id": oid}).unwrap();
    assert!(s.contains("\"$oid\": \"5c7836b73a8de34c78fec399\""));
}

#[test]
fn log_levels_parse_with_info_default() {
    assert_eq!(parse_level(Some("TRACE")), log::LevelFilter::Trace);
    assert_eq!(parse_level(Some("bogus")), log::LevelFilter::Info);
    assert_eq!(parse_level(None), log::LevelFilter::Info);
}
