//! Behavior of the parser and dispatcher through the public API.

use std::collections::BTreeMap;

use sift_pipe::{
    execute, member, parse_pipe_expression, parse_single_argument, run, split_arguments, Arg,
    Call, ChainError, Chainable, Member, Members, Number, ParseError,
};

// ============================================================================
// Splitting
// ============================================================================

#[test]
fn split_keeps_nested_values_whole() {
    assert_eq!(
        split_arguments("[1,2],{a:1},\"x\""),
        vec!["[1,2]", "{a:1}", "\"x\""]
    );
}

#[test]
fn split_respects_escaped_quotes() {
    assert_eq!(
        split_arguments("\"a\\\",b\",c"),
        vec!["\"a\\\",b\"", "c"]
    );
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn pipe_order_and_arguments() {
    let calls = parse_pipe_expression("foo(1) | bar(\"x\")").unwrap();
    assert_eq!(
        calls,
        vec![
            Call::new("foo", vec![Arg::Number(Number::I64(1))]),
            Call::new("bar", vec![Arg::Str("x".into())]),
        ]
    );
}

#[test]
fn pipe_skips_blank_steps() {
    let calls = parse_pipe_expression("foo() | | bar()").unwrap();
    let names: Vec<&str> = calls.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["foo", "bar"]);
}

#[test]
fn pipe_with_every_value_kind() {
    let calls = parse_pipe_expression(
        "mix(true, -3, 2.5, 'q', 2024-02-29, [1, [2]], {k: v, 'n m': 1}, word)",
    )
    .unwrap();
    let kinds: Vec<&str> = calls[0].args.iter().map(Arg::kind).collect();
    assert_eq!(
        kinds,
        vec!["bool", "number", "number", "string", "timestamp", "list", "map", "bare word"]
    );
}

#[test]
fn structural_errors_name_the_substring() {
    let err = parse_pipe_expression("ok() | has space()").unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidStep {
            segment: "has space()".into()
        }
    );

    let err = parse_pipe_expression("ok({a: 1, b})").unwrap_err();
    assert_eq!(err, ParseError::MissingColon { entry: "b".into() });
    assert!(err.to_string().contains("'b'"));
}

#[test]
fn nested_map_in_list() {
    let arg = parse_single_argument("[{name: 'a', tags: [x]}, {}]").unwrap();
    let mut first = BTreeMap::new();
    first.insert("name".to_string(), Arg::Str("a".into()));
    first.insert("tags".to_string(), Arg::List(vec![Arg::Bare("x".into())]));
    assert_eq!(
        arg,
        Arg::List(vec![Arg::Map(first), Arg::Map(BTreeMap::new())])
    );
}

#[test]
fn calls_serialize_to_json() {
    let calls = parse_pipe_expression("where('age', gte, 18) | tag([1, true])").unwrap();
    let json = serde_json::to_value(&calls).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            { "name": "where", "args": ["age", "gte", 18] },
            { "name": "tag", "args": [[1, true]] },
        ])
    );
}

#[test]
fn call_display_reparses() {
    let calls = parse_pipe_expression("a(1, 'x', [true], {k: 2.5}) | b").unwrap();
    let rendered: Vec<String> = calls.iter().map(Call::to_string).collect();
    let reparsed = parse_pipe_expression(&rendered.join(" | ")).unwrap();
    assert_eq!(reparsed, calls);
}

// ============================================================================
// Dispatch
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Person {
    age: i64,
    gender: &'static str,
}

#[derive(Debug, Default)]
struct People {
    items: Vec<Person>,
    members: Members<People>,
}

impl Chainable for People {
    fn resolve(&self, name: &str) -> Option<Member<Self>> {
        self.members.get(name)
    }
}

fn people() -> People {
    let mut people = People {
        items: vec![
            Person { age: 30, gender: "male" },
            Person { age: 15, gender: "male" },
            Person { age: 40, gender: "female" },
        ],
        ..Default::default()
    };
    people.members.insert(
        "adult",
        member(|p: &mut People, args| {
            let min = args
                .first()
                .and_then(Arg::as_number)
                .ok_or_else(|| anyhow::anyhow!("adult expects a number"))?;
            p.items.retain(|person| person.age as f64 >= min.to_f64());
            Ok(p)
        }),
    );
    people.members.insert(
        "male",
        member(|p: &mut People, _args| {
            p.items.retain(|person| person.gender == "male");
            Ok(p)
        }),
    );
    people.members.insert(
        "elsewhere",
        member(|_p: &mut People, _args| Ok(Box::leak(Box::new(People::default())))),
    );
    people.members.insert(
        "items",
        member(|p: &mut People, _args| Ok(p)),
    );
    people
}

#[test]
fn end_to_end_adult_male() {
    let mut target = people();
    run(&mut target, "adult(18) | male()").unwrap();
    assert_eq!(target.items, vec![Person { age: 30, gender: "male" }]);
}

#[test]
fn execute_returns_the_same_target() {
    let mut target = people();
    let calls = parse_pipe_expression("male").unwrap();
    let before: *const People = &target;
    let after: *const People = execute(&mut target, &calls).unwrap();
    assert!(std::ptr::eq(before, after));
}

#[test]
fn reserved_name_rejected_before_later_steps() {
    let mut target = people();
    let err = run(&mut target, "adult(18) | items() | male()").unwrap_err();
    assert!(matches!(err, ChainError::Reserved(ref n) if n == "items"));
    // adult ran, male did not
    assert_eq!(target.items.len(), 2);
}

#[test]
fn broken_chain_after_successful_steps() {
    let mut target = people();
    let err = run(&mut target, "male() | elsewhere() | adult(18)").unwrap_err();
    assert!(matches!(err, ChainError::BrokenChain(ref n) if n == "elsewhere"));
    assert_eq!(target.items.len(), 2);
}

#[test]
fn unknown_method_halts() {
    let mut target = people();
    let err = run(&mut target, "nobody() | male()").unwrap_err();
    assert!(matches!(err, ChainError::Unknown(ref n) if n == "nobody"));
    assert_eq!(target.items.len(), 3);
}

#[test]
fn member_error_propagates() {
    let mut target = people();
    let err = run(&mut target, "adult('old')").unwrap_err();
    assert!(matches!(err, ChainError::Member { ref name, .. } if name == "adult"));
    assert!(err.to_string().contains("adult expects a number"));
}
