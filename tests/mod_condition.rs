use bson::{Bson, doc, oid::ObjectId};
use querykit::condition::{
    Condition, equal_to, in_values, object_id_in, object_id_match, object_id_match_with, pipe,
    string_starts_with, string_starts_with_ci, try_pipe,
};
use querykit::errors::QueryError;
use querykit::ident::IdFallback;

const HEX: &str = "5c7836b73a8de34c78fec399";

#[test]
fn equal_to_builds_eq_fragment() {
    let f = equal_to(Condition::new("status", 1)).unwrap();
    assert_eq!(f.key(), "status");
    assert_eq!(f.to_document(), doc! {"status": {"$eq": 1}});
}

#[test]
fn equal_to_is_deterministic() {
    let a = equal_to(Condition::new("name", "alice")).unwrap();
    let b = equal_to(Condition::new("name", "alice")).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn empty_key_is_rejected_by_every_builder() {
    assert!(matches!(equal_to(Condition::new("", 1)), Err(QueryError::EmptyKey)));
    assert!(matches!(string_starts_with(Condition::new("", "x")), Err(QueryError::EmptyKey)));
    assert!(matches!(object_id_match(Condition::new("", HEX)), Err(QueryError::EmptyKey)));
    let empty = Condition::new("", vec![Bson::Int32(1)]);
    assert!(matches!(in_values(empty), Err(QueryError::EmptyKey)));
}

#[test]
fn starts_with_is_anchored() {
    let f = string_starts_with(Condition::new("model", "T654")).unwrap();
    assert_eq!(f.to_document(), doc! {"model": {"$regex": "^T654"}});
}

#[test]
fn starts_with_escapes_metacharacters() {
    let f = string_starts_with(Condition::new("path", "a.b*(c)")).unwrap();
    let pattern = f.body().get_str("$regex").unwrap().to_owned();
    assert_eq!(pattern, r"^a\.b\*\(c\)");
    let re = regex::Regex::new(&pattern).unwrap();
    assert!(re.is_match("a.b*(c)/rest"));
    assert!(!re.is_match("axbbbc"));
}

#[test]
fn starts_with_ci_adds_options() {
    let f = string_starts_with_ci(Condition::new("name", "Jo")).unwrap();
    assert_eq!(f.to_document(), doc! {"name": {"$regex": "^Jo", "$options": "i"}});
}

#[test]
fn starts_with_needs_a_string() {
    let err = string_starts_with(Condition::new("model", 5)).unwrap_err();
    assert!(matches!(
        err,
        QueryError::IncompatibleValue { ref key, expected: "string" } if key == "model"
    ));
}

#[test]
fn object_id_match_round_trips_hex() {
    let f = object_id_match(Condition::new("_id", HEX)).unwrap();
    let oid = f.body().get_object_id("$eq").unwrap();
    assert_eq!(oid.to_hex(), HEX);
}

#[test]
fn object_id_match_accepts_native_identifier() {
    let oid = ObjectId::parse_str(HEX).unwrap();
    let f = object_id_match(Condition::new("_id", oid)).unwrap();
    assert_eq!(f.to_document(), doc! {"_id": {"$eq": oid}});
}

#[test]
fn object_id_match_rejects_bad_hex() {
    let err = object_id_match(Condition::new("_id", "not-a-valid-hex")).unwrap_err();
    assert!(matches!(err, QueryError::InvalidIdentifier(_)));
}

#[test]
fn object_id_match_fallback_is_opt_in() {
    let f = object_id_match_with(Condition::new("_id", "not-a-valid-hex"), IdFallback::Generate)
        .unwrap();
    assert!(f.body().get_object_id("$eq").is_ok());
    let again = object_id_match_with(Condition::new("_id", "not-a-valid-hex"), IdFallback::Reject);
    assert!(matches!(again, Err(QueryError::InvalidIdentifier(_))));
}

#[test]
fn object_id_match_rejects_non_string_value() {
    let err = object_id_match(Condition::new("_id", 42)).unwrap_err();
    assert!(matches!(err, QueryError::IncompatibleValue { .. }));
}

#[test]
fn in_values_requires_array() {
    let f = in_values(Condition::new("status", vec![Bson::Int32(0), Bson::Int32(1)])).unwrap();
    assert_eq!(f.to_document(), doc! {"status": {"$in": [0, 1]}});
    let err = in_values(Condition::new("status", 1)).unwrap_err();
    assert!(matches!(err, QueryError::IncompatibleValue { expected: "array", .. }));
}

#[test]
fn object_id_in_keeps_order() {
    let ids = [HEX, "000000000000000000000000"];
    let f = object_id_in("_id", ids, IdFallback::Reject).unwrap();
    let arr = f.body().get_array("$in").unwrap();
    let hexes: Vec<String> = arr.iter().map(|b| b.as_object_id().unwrap().to_hex()).collect();
    assert_eq!(hexes, ids);
    assert!(object_id_in("_id", [HEX, "bad"], IdFallback::Reject).is_err());
}

#[test]
fn pipe_disjoint_keys_keeps_both_in_order() {
    let filter = pipe([
        equal_to(Condition::new("status", 1)).unwrap(),
        string_starts_with(Condition::new("model", "T654")).unwrap(),
    ]);
    let d = filter.to_document();
    let keys: Vec<&str> = d.keys().map(String::as_str).collect();
    assert_eq!(keys, ["status", "model"]);
    assert_eq!(filter.len(), 2);
}

#[test]
fn pipe_same_key_is_last_write_wins() {
    let filter = pipe([
        equal_to(Condition::new("status", 1)).unwrap(),
        equal_to(Condition::new("status", 2)).unwrap(),
    ]);
    assert_eq!(filter.to_document(), doc! {"status": {"$eq": 2}});
    assert_eq!(serde_json::to_string(&filter).unwrap(), r#"{"status":{"$eq":2}}"#);
}

#[test]
fn pipe_of_nothing_matches_everything() {
    let filter = pipe(Vec::new());
    assert!(filter.is_empty());
    assert_eq!(filter.to_document(), doc! {});
}

#[test]
fn try_pipe_stops_at_first_error() {
    let res = try_pipe([
        equal_to(Condition::new("status", 1)),
        object_id_match(Condition::new("_id", "nope")),
        equal_to(Condition::new("", 1)),
    ]);
    assert!(matches!(res, Err(QueryError::InvalidIdentifier(_))));
}
