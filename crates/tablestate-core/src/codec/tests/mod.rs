mod property;

use crate::{
    catalog::{FilterOperator, FilterVariant},
    codec::{
        ColumnAllowList, parse_filter_state, parse_sort_state, serialize_filter_state,
        serialize_sort_state, validate,
    },
    state::{FilterEntry, FilterState, FilterValue, SortEntry, SortState},
};

fn titles_only() -> ColumnAllowList {
    ColumnAllowList::new(["title"])
}

#[test]
fn malformed_json_never_panics() {
    assert_eq!(parse_sort_state("not-json", None), None);
    assert_eq!(parse_filter_state("not-json", None), None);
    assert_eq!(parse_sort_state("", None), None);
    assert_eq!(parse_filter_state("{\"id\":\"title\"}", None), None);
}

#[test]
fn sort_slice_round_trips() {
    let state = SortState(vec![
        SortEntry::new("title", false),
        SortEntry::new("createdAt", true),
    ]);

    let wire = serialize_sort_state(&state);
    assert_eq!(
        wire,
        r#"[{"id":"title","desc":false},{"id":"createdAt","desc":true}]"#
    );
    assert_eq!(parse_sort_state(&wire, None), Some(state));
}

#[test]
fn sort_order_is_preserved() {
    let wire = r#"[{"id":"b","desc":true},{"id":"a","desc":false}]"#;
    let state = parse_sort_state(wire, None).expect("valid sort slice");
    assert_eq!(state[0].id, "b");
    assert_eq!(state[1].id, "a");
}

#[test]
fn unknown_sort_column_fails_the_whole_slice() {
    let wire = r#"[{"id":"title","desc":false},{"id":"status","desc":false}]"#;
    assert_eq!(parse_sort_state(wire, Some(&titles_only())), None);

    // The same payload with no allow-list is unconstrained.
    assert!(parse_sort_state(wire, None).is_some());
}

#[test]
fn allow_list_accepts_any_iterable() {
    let from_vec = ColumnAllowList::new(vec!["a".to_string(), "b".to_string()]);
    let from_set: ColumnAllowList = ["b", "a"].into_iter().collect();
    assert_eq!(from_vec, from_set);
}

#[test]
fn sort_entries_with_wrong_types_are_rejected() {
    assert_eq!(parse_sort_state(r#"[{"id":1,"desc":false}]"#, None), None);
    assert_eq!(
        parse_sort_state(r#"[{"id":"title","desc":"no"}]"#, None),
        None
    );
    assert_eq!(parse_sort_state(r#"[{"id":"title"}]"#, None), None);
    assert_eq!(parse_sort_state(r#"["title"]"#, None), None);
}

#[test]
fn filter_slice_round_trips() {
    let state = FilterState(vec![
        FilterEntry {
            id: "status".to_string(),
            value: FilterValue::List(vec!["active".to_string(), "draft".to_string()]),
            variant: FilterVariant::MultiSelect,
            operator: FilterOperator::InArray,
            filter_id: "f1".to_string(),
        },
        FilterEntry {
            id: "title".to_string(),
            value: FilterValue::Text("report".to_string()),
            variant: FilterVariant::Text,
            operator: FilterOperator::ILike,
            filter_id: "f2".to_string(),
        },
    ]);

    let wire = serialize_filter_state(&state);
    let parsed = parse_filter_state(&wire, None).expect("valid filter slice");
    assert_eq!(parsed, state);
}

#[test]
fn documented_wire_format_parses() {
    let wire = r#"[{"id":"status","value":["active","draft"],"variant":"multiSelect","operator":"inArray","filterId":"f1"}]"#;
    let state = parse_filter_state(wire, None).expect("valid filter slice");
    assert_eq!(state.len(), 1);
    assert_eq!(state[0].variant, FilterVariant::MultiSelect);
    assert_eq!(state[0].operator, FilterOperator::InArray);
    assert_eq!(
        state[0].value,
        FilterValue::List(vec!["active".to_string(), "draft".to_string()])
    );
}

#[test]
fn unknown_filter_column_fails_the_whole_slice() {
    let wire = r#"[{"id":"status","value":"x","variant":"text","operator":"iLike","filterId":"f1"}]"#;
    assert_eq!(parse_filter_state(wire, Some(&titles_only())), None);
}

#[test]
fn unknown_variant_or_operator_is_rejected() {
    let wire = r#"[{"id":"title","value":"x","variant":"fancy","operator":"iLike","filterId":"f1"}]"#;
    assert_eq!(parse_filter_state(wire, None), None);

    let wire = r#"[{"id":"title","value":"x","variant":"text","operator":"like","filterId":"f1"}]"#;
    assert_eq!(parse_filter_state(wire, None), None);
}

#[test]
fn mixed_value_arrays_are_rejected() {
    let wire = r#"[{"id":"title","value":["a",1],"variant":"multiSelect","operator":"inArray","filterId":"f1"}]"#;
    assert_eq!(parse_filter_state(wire, None), None);
}

#[test]
fn extra_object_keys_are_tolerated() {
    let wire = r#"[{"id":"title","desc":true,"legacy":"ignored"}]"#;
    let state = parse_sort_state(wire, None).expect("valid sort slice");
    assert_eq!(state, SortState(vec![SortEntry::new("title", true)]));
}

#[test]
fn empty_arrays_parse_to_empty_states() {
    assert_eq!(parse_sort_state("[]", None), Some(SortState::default()));
    assert_eq!(
        parse_filter_state("[]", Some(&titles_only())),
        Some(FilterState::default())
    );
}

#[test]
fn rejections_collect_every_issue() {
    let issues = validate::sort_state_from_str(
        r#"[{"id":1,"desc":"x"},{"id":"status","desc":false}]"#,
        Some(&titles_only()),
    )
    .expect_err("slice must be rejected");

    // Both bad fields of entry 0 and the unknown column of entry 1.
    assert_eq!(issues.len(), 3);
}
