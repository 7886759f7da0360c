use crate::{
    catalog::{FilterOperator, FilterVariant},
    codec::{
        parse_filter_state, parse_sort_state, serialize_filter_state, serialize_sort_state,
    },
    state::{FilterEntry, FilterState, FilterValue, SortEntry, SortState},
};
use proptest::prelude::*;

fn arb_column_id() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,11}"
}

fn arb_sort_state() -> impl Strategy<Value = SortState> {
    prop::collection::vec(
        (arb_column_id(), any::<bool>()).prop_map(|(id, desc)| SortEntry { id, desc }),
        0..4,
    )
    .prop_map(SortState)
}

fn arb_variant() -> impl Strategy<Value = FilterVariant> {
    prop_oneof![
        Just(FilterVariant::Text),
        Just(FilterVariant::Number),
        Just(FilterVariant::Range),
        Just(FilterVariant::Date),
        Just(FilterVariant::DateRange),
        Just(FilterVariant::Boolean),
        Just(FilterVariant::Select),
        Just(FilterVariant::MultiSelect),
    ]
}

fn arb_operator() -> impl Strategy<Value = FilterOperator> {
    prop_oneof![
        Just(FilterOperator::ILike),
        Just(FilterOperator::NotILike),
        Just(FilterOperator::Eq),
        Just(FilterOperator::Ne),
        Just(FilterOperator::Lt),
        Just(FilterOperator::Lte),
        Just(FilterOperator::Gt),
        Just(FilterOperator::Gte),
        Just(FilterOperator::IsBetween),
        Just(FilterOperator::IsRelativeToToday),
        Just(FilterOperator::InArray),
        Just(FilterOperator::NotInArray),
        Just(FilterOperator::IsEmpty),
        Just(FilterOperator::IsNotEmpty),
    ]
}

fn arb_filter_value() -> impl Strategy<Value = FilterValue> {
    prop_oneof![
        "[a-zA-Z0-9 .,-]{0,16}".prop_map(FilterValue::Text),
        prop::collection::vec("[a-zA-Z0-9]{0,8}", 0..4).prop_map(FilterValue::List),
    ]
}

fn arb_filter_state() -> impl Strategy<Value = FilterState> {
    prop::collection::vec(
        (
            arb_column_id(),
            arb_filter_value(),
            arb_variant(),
            arb_operator(),
            "f[0-9]{1,4}",
        )
            .prop_map(|(id, value, variant, operator, filter_id)| FilterEntry {
                id,
                value,
                variant,
                operator,
                filter_id,
            }),
        0..4,
    )
    .prop_map(FilterState)
}

proptest! {
    #[test]
    fn sort_round_trip_law(state in arb_sort_state()) {
        let wire = serialize_sort_state(&state);
        prop_assert_eq!(parse_sort_state(&wire, None), Some(state));
    }

    #[test]
    fn filter_round_trip_law(state in arb_filter_state()) {
        let wire = serialize_filter_state(&state);
        prop_assert_eq!(parse_filter_state(&wire, None), Some(state));
    }

    #[test]
    fn equality_is_reflexive(state in arb_filter_state()) {
        prop_assert_eq!(&state, &state);
    }

    #[test]
    fn equality_is_blind_to_correlation_ids(state in arb_filter_state()) {
        let relabeled = FilterState(
            state
                .iter()
                .cloned()
                .enumerate()
                .map(|(n, mut entry)| {
                    entry.filter_id = format!("relabeled-{n}");
                    entry
                })
                .collect(),
        );
        prop_assert_eq!(relabeled, state);
    }

    #[test]
    fn parsing_arbitrary_text_never_panics(raw in ".{0,64}") {
        let _ = parse_sort_state(&raw, None);
        let _ = parse_filter_state(&raw, None);
    }
}
