use bson::doc;
use proptest::prelude::*;
use proptest::test_runner::{Config, FileFailurePersistence};
use querykit::errors::QueryError;
use querykit::template::{Template, build, render};

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,12}"
}

proptest! {
    #![proptest_config(Config {
        failure_persistence: Some(Box::new(FileFailurePersistence::WithSource(
            "proptest-regressions"
        ))),
        cases: 64,
        .. Config::default()
    })]

    #[test]
    fn prop_render_is_idempotent(name in name_strategy(), value in "[ -~]{0,24}") {
        let text = format!("{{\"k\": \"{{{{{name}}}}}\", \"again\": \"{{{{ {name} }}}}\"}}");
        let vars = doc! { name.clone(): value.clone() };
        let a = render(&text, &vars).unwrap();
        let b = render(&text, &vars).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert!(value.is_empty() || a.matches(value.as_str()).count() >= 2);
    }

    #[test]
    fn prop_json_safe_strings_decode_back(
        name in name_strategy(),
        value in "[A-Za-z0-9 _.-]{0,32}",
    ) {
        let text = format!("{{ \"{name}\": \"{{{{{name}}}}}\" }}");
        let d: bson::Document = build(&text, &doc! { name.clone(): value.clone() }).unwrap();
        prop_assert_eq!(d.get_str(&name).unwrap(), value.as_str());
    }

    #[test]
    fn prop_integers_substitute_as_numbers(n in any::<i64>()) {
        let d: bson::Document = build("{\"n\": {{n}}}", &doc! {"n": n}).unwrap();
        let got = d.get("n").and_then(|b| b.as_i64().or_else(|| b.as_i32().map(i64::from)));
        prop_assert_eq!(got, Some(n));
    }

    #[test]
    fn prop_unbound_name_is_reported(name in name_strategy()) {
        let tpl = Template::parse(&format!("{{{{{name}}}}}")).unwrap();
        prop_assert_eq!(tpl.placeholders(), vec![name.as_str()]);
        match tpl.render(&doc! {}) {
            Err(QueryError::UndefinedVariable(n)) => prop_assert_eq!(n, name),
            other => prop_assert!(false, "unexpected: {:?}", other),
        }
    }
}
