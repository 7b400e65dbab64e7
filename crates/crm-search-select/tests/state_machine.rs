//! Behavioral tests for the pure search-select state machine.

use crm_lookup::{Candidate, CandidateId, LookupError};
use crm_search_select::{
    Effect, FieldChange, FieldProps, Message, Resolution, SearchSelect, SearchSelectConfig,
};
use proptest::prelude::*;

fn mount(props: FieldProps) -> (SearchSelect, Vec<Effect>) {
    SearchSelect::new(props, SearchSelectConfig::default())
}

fn searches(effects: &[Effect]) -> Vec<(u64, String)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Search { generation, query } => Some((*generation, query.clone())),
            _ => None,
        })
        .collect()
}

fn notifications(effects: &[Effect]) -> Vec<FieldChange> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Notify(change) => Some(change.clone()),
            _ => None,
        })
        .collect()
}

fn debounce_generation(effects: &[Effect]) -> Option<u64> {
    effects.iter().find_map(|effect| match effect {
        Effect::StartDebounce { generation, .. } => Some(*generation),
        _ => None,
    })
}

#[test]
fn typing_then_debounce_searches_once_with_final_text() {
    let (mut field, _) = mount(FieldProps::default());
    let mut timers = Vec::new();
    let mut changes = Vec::new();

    for text in ["A", "Ac", "Acm"] {
        let effects = field.update(Message::InputChanged(text.to_string()));
        timers.extend(debounce_generation(&effects));
        changes.extend(notifications(&effects));
    }

    // Every timer fires, as if none had been cancelled.
    let mut issued = Vec::new();
    for generation in timers {
        issued.extend(searches(&field.update(Message::DebounceElapsed { generation })));
    }

    assert_eq!(issued, vec![(field.generation(), "Acm".to_string())]);
    assert_eq!(
        changes,
        vec![
            FieldChange::edited("A"),
            FieldChange::edited("Ac"),
            FieldChange::edited("Acm"),
        ]
    );
}

#[test]
fn late_response_for_older_query_is_ignored() {
    let (mut field, _) = mount(FieldProps::default());

    let first = debounce_generation(&field.update(Message::InputChanged("a".into()))).unwrap();
    field.update(Message::DebounceElapsed { generation: first });
    let second = debounce_generation(&field.update(Message::InputChanged("ab".into()))).unwrap();
    field.update(Message::DebounceElapsed { generation: second });

    field.update(Message::SearchCompleted {
        generation: second,
        result: Ok(vec![Candidate::new(2, "Abbott Labs")]),
    });
    field.update(Message::SearchCompleted {
        generation: first,
        result: Ok(vec![
            Candidate::new(1, "Acme Inc"),
            Candidate::new(3, "Atlas"),
        ]),
    });

    let snapshot = field.snapshot();
    assert_eq!(snapshot.visible_suggestions().len(), 1);
    assert_eq!(snapshot.suggestions[0].candidate.name, "Abbott Labs");
}

#[test]
fn picking_commits_label_and_id_in_one_notification() {
    let (mut field, _) = mount(FieldProps::default());
    let generation =
        debounce_generation(&field.update(Message::InputChanged("acme".into()))).unwrap();
    field.update(Message::DebounceElapsed { generation });
    field.update(Message::SearchCompleted {
        generation,
        result: Ok(vec![Candidate::new(42, "Acme Inc")]),
    });

    let effects = field.update(Message::SuggestionPicked(0));

    assert_eq!(
        notifications(&effects),
        vec![FieldChange::picked("Acme Inc", CandidateId::Number(42))]
    );
    let snapshot = field.snapshot();
    assert_eq!(snapshot.text, "Acme Inc");
    assert_eq!(snapshot.selected_id, Some(CandidateId::Number(42)));
    assert!(!snapshot.open);
    assert!(snapshot.suggestions.is_empty());
}

#[test]
fn clearing_resets_selection_and_notifies_empty_pair() {
    let (mut field, _) = mount(FieldProps {
        value: "Acme Inc".to_string(),
        selected_id: Some(CandidateId::Number(42)),
        ..Default::default()
    });

    let effects = field.update(Message::Cleared);

    assert!(effects.contains(&Effect::CancelPending));
    assert_eq!(notifications(&effects), vec![FieldChange::cleared()]);
    assert_eq!(field.text(), "");
    assert_eq!(field.selected_id(), None);
}

#[test]
fn mount_with_id_resolves_label_without_searching() {
    let (mut field, effects) = mount(FieldProps::with_selected_id(7));

    assert!(searches(&effects).is_empty());
    let ticket = match effects.as_slice() {
        [Effect::Resolve { ticket, id }] => {
            assert_eq!(id, &CandidateId::Number(7));
            *ticket
        }
        other => panic!("expected a single resolve, got {other:?}"),
    };

    let effects = field.update(Message::ResolveCompleted {
        ticket,
        result: Ok(Candidate::new(7, "Beta Co")),
    });

    assert!(effects.is_empty());
    assert_eq!(field.text(), "Beta Co");
    assert_eq!(field.resolution(), Resolution::Resolved);
    assert!(!field.is_open());
}

#[test]
fn failed_resolve_leaves_blank_field_usable() {
    let (mut field, effects) = mount(FieldProps::with_selected_id("cust-9"));
    let Some(Effect::Resolve { ticket, .. }) = effects.first().cloned() else {
        panic!("expected a resolve effect");
    };

    field.update(Message::ResolveCompleted {
        ticket,
        result: Err(LookupError::NotFound("cust-9".to_string())),
    });
    assert_eq!(field.text(), "");

    let effects = field.update(Message::InputChanged("Gamma".into()));
    assert_eq!(notifications(&effects), vec![FieldChange::edited("Gamma")]);
    assert!(debounce_generation(&effects).is_some());
}

#[test]
fn touched_error_is_exposed_in_snapshot() {
    let (field, _) = mount(
        FieldProps::default().with_validation(Some("Select a customer".to_string()), true),
    );
    assert_eq!(field.snapshot().error.as_deref(), Some("Select a customer"));
}

#[test]
fn min_query_len_suppresses_short_searches() {
    let config = SearchSelectConfig {
        min_query_len: 3,
        ..Default::default()
    };
    let (mut field, _) = SearchSelect::new(FieldProps::default(), config);

    let effects = field.update(Message::InputChanged("ab".into()));
    assert_eq!(debounce_generation(&effects), None);
    assert_eq!(notifications(&effects), vec![FieldChange::edited("ab")]);

    let effects = field.update(Message::InputChanged("abc".into()));
    assert!(debounce_generation(&effects).is_some());
}

// =============================================================================
// Properties
// =============================================================================

fn arb_query() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['a', 'c', 'm', 'e', ' ', 'Ö']),
        1..8,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn queries_below_threshold_never_search(
        texts in prop::collection::vec(arb_query(), 1..12),
        min in 1usize..6,
    ) {
        let config = SearchSelectConfig { min_query_len: min, ..Default::default() };
        let (mut field, _) = SearchSelect::new(FieldProps::default(), config.clone());

        for text in texts {
            let short = text.trim().chars().count() < min;
            let effects = field.update(Message::InputChanged(text));
            if let Some(generation) = debounce_generation(&effects) {
                prop_assert!(!short);
                let issued = searches(&field.update(Message::DebounceElapsed { generation }));
                prop_assert_eq!(issued.len(), 1);
            } else {
                prop_assert!(short || effects.is_empty());
            }
        }
    }

    #[test]
    fn only_latest_generation_fills_suggestions(
        texts in prop::collection::vec(arb_query(), 1..8),
        reverse in any::<bool>(),
    ) {
        let (mut field, _) = mount(FieldProps::default());
        let mut issued = Vec::new();

        for text in texts {
            let effects = field.update(Message::InputChanged(text));
            if let Some(generation) = debounce_generation(&effects) {
                issued.extend(searches(&field.update(Message::DebounceElapsed { generation })));
            }
        }
        prop_assume!(!issued.is_empty());

        if reverse {
            issued.reverse();
        }
        for (generation, query) in &issued {
            field.update(Message::SearchCompleted {
                generation: *generation,
                result: Ok(vec![Candidate::new(*generation, query.as_str())]),
            });
        }

        let latest = field.generation();
        match field.suggestions() {
            [] => prop_assert!(issued.iter().all(|(generation, _)| *generation != latest)),
            [only] => prop_assert_eq!(&only.id, &CandidateId::Number(latest)),
            more => prop_assert!(false, "unexpected suggestions {:?}", more),
        }
    }

    #[test]
    fn every_effective_edit_notifies_once(texts in prop::collection::vec(arb_query(), 1..12)) {
        let (mut field, _) = mount(FieldProps::default());
        let mut previous = String::new();

        for text in texts {
            let changed = text != previous;
            let effects = field.update(Message::InputChanged(text.clone()));
            let expected = if changed { vec![FieldChange::edited(text.clone())] } else { Vec::new() };
            prop_assert_eq!(notifications(&effects), expected);
            previous = text;
        }
    }
}
