//! Cycle detection over a schema that covers every shape of recursion.
mod common;
use common::*;
use proptest::prelude::*;
use toikake::prelude::*;

fn detect(schema: &Schema, message: &str, name: &str) -> (bool, Option<Vec<String>>) {
    let mut detector = CycleDetector::new(schema);
    let field = field(schema, message, name);
    let circulated = detector.is_circulated(field);
    let path = detector
        .circulated_path(&field.full_name())
        .map(<[String]>::to_vec);
    (circulated, path)
}

fn names(path: &[&str]) -> Option<Vec<String>> {
    Some(path.iter().map(|s| s.to_string()).collect())
}

#[cfg(test)]
mod detector_tests {
    use super::*;

    #[test]
    fn test_circulated_paths() {
        let schema = schema(CIRCULATED_SCHEMA_JSON);
        let cases: &[(&str, &str, &[&str])] = &[
            ("A", "b", &["example.B", "example.A"]),
            ("B", "a", &["example.A", "example.B"]),
            ("Foo", "self", &["example.Self"]),
            ("Self", "self", &["example.Self"]),
            ("Hoge", "fuga", &["example.Fuga", "example.Piyo", "example.Hoge"]),
            ("Fuga", "piyo", &["example.Piyo", "example.Hoge", "example.Fuga"]),
            ("Piyo", "hoge", &["example.Hoge", "example.Fuga", "example.Piyo"]),
            ("C", "list", &["example.ListC", "example.C"]),
            (
                "E",
                "m1",
                &["example.E.M1Entry", "example.F", "example.E"],
            ),
            ("E", "m2", &["example.E.M", "example.F", "example.E"]),
            (
                "F",
                "e",
                &["example.E", "example.E.M1Entry", "example.E.M", "example.F"],
            ),
            ("FooRequest", "filters", &["example.Filters"]),
            ("Filters", "and", &["example.Filters"]),
            ("Filters", "or", &["example.Filters"]),
        ];

        for (message, name, expected) in cases {
            let (circulated, path) = detect(&schema, message, name);
            assert!(circulated, "{}.{} should be circulated", message, name);
            assert_eq!(path, names(expected), "path of {}.{}", message, name);
        }
    }

    #[test]
    fn test_acyclic_fields() {
        let schema = schema(CIRCULATED_SCHEMA_JSON);
        for (message, name) in [("G", "h"), ("G", "h2"), ("I", "g")] {
            let (circulated, path) = detect(&schema, message, name);
            assert!(!circulated, "{}.{} should not be circulated", message, name);
            assert_eq!(path, None);
        }
    }

    #[test]
    fn test_scalar_fields_are_never_circulated() {
        let schema = schema(CIRCULATED_SCHEMA_JSON);
        let (circulated, _) = detect(&schema, "FooRequest", "page");
        assert!(!circulated);
    }

    #[test]
    fn test_loop_through_map_entry_is_recorded_under_value_field() {
        let schema = schema(CIRCULATED_SCHEMA_JSON);
        let mut detector = CycleDetector::new(&schema);

        // D itself is not part of the loop C -> ListC -> C it leads into.
        assert!(!detector.is_circulated(field(&schema, "D", "m")));
        assert_eq!(detector.circulated_path("example.D.m"), None);
        assert_eq!(
            detector.circulated_path("example.D.MEntry.value"),
            Some(&["example.C".to_string(), "example.ListC".to_string()][..])
        );
    }

    #[test]
    fn test_repeated_queries_give_the_same_answer() {
        let schema = schema(CIRCULATED_SCHEMA_JSON);
        let mut detector = CycleDetector::new(&schema);
        let hoge = field(&schema, "Hoge", "fuga");
        let d = field(&schema, "D", "m");

        let first = (detector.is_circulated(hoge), detector.is_circulated(d));
        let first_path = detector.circulated_path("example.Hoge.fuga").map(<[String]>::to_vec);
        let second = (detector.is_circulated(hoge), detector.is_circulated(d));
        let second_path = detector.circulated_path("example.Hoge.fuga").map(<[String]>::to_vec);

        assert_eq!(first, (true, false));
        assert_eq!(first, second);
        assert_eq!(first_path, second_path);
    }

    #[test]
    fn test_circulated_fields_lists_every_recorded_loop() {
        let schema = schema(CIRCULATED_SCHEMA_JSON);
        let mut detector = CycleDetector::new(&schema);

        detector.is_circulated(field(&schema, "A", "b"));
        detector.is_circulated(field(&schema, "D", "m"));

        let recorded = detector.circulated_fields();
        assert!(recorded.contains_key("example.A.b"));
        assert!(recorded.contains_key("example.D.MEntry.value"));
        assert_eq!(recorded.len(), 2);
    }
}

/// A ring `M0 -> M1 -> ... -> M{n-1} -> M0` plus a scalar on every message.
fn ring_schema(n: usize) -> Schema {
    let messages = (0..n)
        .map(|i| toikake::schema::MessageDefinition {
            name: format!("M{}", i),
            fields: vec![
                toikake::schema::FieldDefinition {
                    name: "label".to_string(),
                    number: 1,
                    type_name: "string".to_string(),
                    ..Default::default()
                },
                toikake::schema::FieldDefinition {
                    name: "next".to_string(),
                    number: 2,
                    type_name: format!("M{}", (i + 1) % n),
                    ..Default::default()
                },
            ],
            ..Default::default()
        })
        .collect();
    SchemaDefinition {
        package: "ring".to_string(),
        messages,
        enums: vec![],
    }
    .into_schema()
    .expect("ring schema should resolve")
}

proptest! {
    #[test]
    fn prop_every_ring_field_is_circulated(n in 1usize..12, start in 0usize..12) {
        let schema = ring_schema(n);
        let start = start % n;
        let mut detector = CycleDetector::new(&schema);
        let next = field(&schema, &format!("M{}", start), "next");

        prop_assert!(detector.is_circulated(next));

        // The loop starts at the target type and walks the whole ring once.
        let path = detector.circulated_path(&next.full_name()).map(<[String]>::to_vec);
        let expected: Vec<String> = (1..=n)
            .map(|k| format!("ring.M{}", (start + k) % n))
            .collect();
        prop_assert_eq!(path, Some(expected));
    }

    #[test]
    fn prop_ring_input_terminates_when_stopped(n in 1usize..8, depth in 0usize..8) {
        let schema = ring_schema(n);
        let mut selections = vec!["descend"; depth];
        selections.push("stop");
        let lines = vec!["x"; depth + 1];
        let mut prompt = ScriptedPrompt::new(&lines, &selections);

        let value = run(&schema, "M0", &mut prompt).unwrap();

        prop_assert!(prompt.is_drained());
        let mut nesting = 0;
        let mut current = &value;
        while let Some(next) = current.get("next").and_then(Value::as_message) {
            nesting += 1;
            current = next;
        }
        prop_assert_eq!(nesting, depth);
    }
}
