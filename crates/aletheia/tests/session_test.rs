//! Integration tests for LabelingSession.

use serde_json::json;

use aletheia::validation::{CategoryValidation, CustomCheck};
use aletheia::{
    AletheiaError, EventKind, EventLog, ItemPatch, ItemStatus, LabelerConfig, LabelingItem,
    LabelingSession, Pillar,
};

/// Three items with no status set.
fn three_fresh_items() -> Vec<LabelingItem> {
    vec![
        LabelingItem::new("task-a-001", "Ich bin UX/UI Designerin...", json!({"skills": ["Figma"]}))
            .with_pillar(Pillar::Technical)
            .with_category("task_a_profiles"),
        LabelingItem::new("task-b-001", "Profile A + Profile B", "They match because...")
            .with_pillar(Pillar::Psychological)
            .with_category("task_b_matching"),
        LabelingItem::new("task-c-001", "Journal entry", json!({"risk": "low"}))
            .with_pillar(Pillar::Scientific)
            .with_category("task_c_monitoring"),
    ]
}

/// A partly reviewed collection.
fn mixed_items() -> Vec<LabelingItem> {
    vec![
        LabelingItem::new("done-1", "q", "a")
            .with_status(ItemStatus::Completed)
            .with_quality_score(1.0),
        LabelingItem::new("open-1", "q", "a"),
        LabelingItem::new("skip-1", "q", "a").with_status(ItemStatus::Skipped),
        LabelingItem::new("open-2", "q", "a").with_status(ItemStatus::Pending),
        LabelingItem::new("done-2", "q", "a")
            .with_status(ItemStatus::Completed)
            .with_quality_score(0.5),
    ]
}

fn current_id(session: &LabelingSession) -> Option<String> {
    session.current_item().map(|item| item.id.clone())
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_three_item_scenario() {
    let mut session = LabelingSession::new(three_fresh_items(), LabelerConfig::default());

    assert_eq!(current_id(&session).as_deref(), Some("task-a-001"));
    assert_eq!(session.items()[0].status, Some(ItemStatus::InProgress));
    assert_eq!(session.pending_items().len(), 3);
    assert_eq!(session.queue().len(), 3);
    assert!(!session.has_previous());
    assert!(session.has_next());

    session.mark_skipped().unwrap();

    assert_eq!(session.items()[0].status, Some(ItemStatus::Skipped));
    assert_eq!(current_id(&session).as_deref(), Some("task-b-001"));
    assert_eq!(session.items()[1].status, Some(ItemStatus::InProgress));
    assert_eq!(session.progress(), 33);
    assert_eq!(session.pending_items().len(), 2);
}

#[test]
fn test_mixed_collection_starts_at_first_open_item() {
    let session = LabelingSession::new(mixed_items(), LabelerConfig::default());

    assert_eq!(current_id(&session).as_deref(), Some("open-1"));
    let queue: Vec<_> = session.queue().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(queue, vec!["open-1", "open-2"]);

    assert_eq!(session.completed_items().len(), 2);
    assert_eq!(session.skipped_items().len(), 1);
    // The open item still counts as pending until it is decided
    let pending: Vec<_> = session.pending_items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(pending, vec!["open-1", "open-2"]);
    assert_eq!(session.in_progress_items().len(), 1);
}

#[test]
fn test_stats_for_mixed_collection() {
    let session = LabelingSession::new(mixed_items(), LabelerConfig::default());
    let stats = session.stats();

    assert_eq!(stats.total, 5);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.pending, 1);
    assert_eq!(stats.average_quality, Some(0.75));
    assert_eq!(session.progress(), 60);
}

// =============================================================================
// Full walkthrough
// =============================================================================

#[test]
fn test_review_every_item() {
    let mut session = LabelingSession::new(three_fresh_items(), LabelerConfig::default());

    session
        .mark_completed(Some(ItemPatch::new().with_quality_score(0.9)))
        .unwrap();
    session.mark_skipped().unwrap();
    session
        .mark_completed(Some(ItemPatch::new().with_quality_score(0.7)))
        .unwrap();

    assert!(session.is_complete());
    assert_eq!(session.progress(), 100);
    assert!(!session.has_next());

    let stats = session.stats();
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.skipped, 1);
    let average = stats.average_quality.unwrap();
    assert!((average - 0.8).abs() < 1e-9);

    let items = session.into_items();
    let statuses: Vec<_> = items.iter().map(|i| i.status).collect();
    assert_eq!(
        statuses,
        vec![
            Some(ItemStatus::Completed),
            Some(ItemStatus::Skipped),
            Some(ItemStatus::Completed)
        ]
    );
}

#[test]
fn test_completed_item_never_reverts_on_select() {
    let mut session = LabelingSession::new(three_fresh_items(), LabelerConfig::default());
    session.mark_completed(None).unwrap();

    let reopened = session.select_item("task-a-001").unwrap();
    assert_eq!(reopened.status, Some(ItemStatus::Completed));
    assert_eq!(session.current_index(), 0);

    session.load_next();
    session.load_previous();
    assert_eq!(
        session.item("task-a-001").unwrap().status,
        Some(ItemStatus::Completed)
    );
}

#[test]
fn test_skipped_item_keeps_status_on_select() {
    let mut session = LabelingSession::new(mixed_items(), LabelerConfig::default());
    session.select_item("skip-1").unwrap();

    assert_eq!(session.current_item().unwrap().status, Some(ItemStatus::Skipped));
    assert_eq!(session.current_index(), -1);
}

#[test]
fn test_edit_reopened_item_without_redeciding() {
    let mut session = LabelingSession::new(mixed_items(), LabelerConfig::default());
    session.select_item("done-2").unwrap();
    assert!(session.update_output(json!({"fixed": true})));

    let err = session.mark_skipped().unwrap_err();
    assert_eq!(err.to_string(), "Item 'done-2' is already decided");
    assert!(matches!(
        session.mark_completed(None),
        Err(AletheiaError::AlreadyDecided(_))
    ));

    let item = session.item("done-2").unwrap();
    assert_eq!(item.status, Some(ItemStatus::Completed));
    assert_eq!(item.output, json!({"fixed": true}));

    // Detached cursor moves to the head of the queue
    session.load_next();
    assert_eq!(current_id(&session).as_deref(), Some("open-1"));
}

#[test]
fn test_last_decision_cannot_be_overwritten() {
    let mut session = LabelingSession::new(three_fresh_items(), LabelerConfig::default());
    session.mark_completed(None).unwrap();
    session.mark_completed(None).unwrap();
    session.mark_completed(None).unwrap();

    // The last item stays current after load_next hits the end of the queue
    assert_eq!(current_id(&session).as_deref(), Some("task-c-001"));
    assert!(matches!(
        session.mark_skipped(),
        Err(AletheiaError::AlreadyDecided(ref id)) if id == "task-c-001"
    ));

    session.select_item("task-a-001").unwrap();
    assert!(session.mark_skipped().is_err());

    let statuses: Vec<_> = session.items().iter().map(|i| i.status).collect();
    assert_eq!(statuses, vec![Some(ItemStatus::Completed); 3]);
    assert_eq!(session.stats().skipped, 0);
}

#[test]
fn test_select_missing_item_leaves_state() {
    let mut session = LabelingSession::new(three_fresh_items(), LabelerConfig::default());
    session.load_next();
    let before = session.stats();

    let err = session.select_item("task-z-999").unwrap_err();
    assert_eq!(err.to_string(), "Item 'task-z-999' not found");
    assert_eq!(current_id(&session).as_deref(), Some("task-b-001"));
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.stats(), before);
}

// =============================================================================
// Validation through the session
// =============================================================================

#[test]
fn test_citation_gate() {
    let config = LabelerConfig::new()
        .with_validation("scientific", CategoryValidation::new().with_required_citation());
    let mut session = LabelingSession::new(three_fresh_items(), config);
    session.select_item("task-c-001").unwrap();

    let outcome = session.validate();
    assert!(!outcome.is_valid);
    assert_eq!(
        outcome.message.as_deref(),
        Some("Scientific data requires source citation")
    );

    let mut metadata = aletheia::Metadata::new();
    metadata.insert("sourceCitation".to_string(), json!("X"));
    session
        .mark_completed(Some(ItemPatch::new().with_metadata(metadata)))
        .unwrap();
    session.select_item("task-c-001").unwrap();

    assert!(session.validate().is_valid);
}

#[test]
fn test_category_key_used_without_pillar_config() {
    let config = LabelerConfig::new().with_validation(
        "task_b_matching",
        CategoryValidation::new().with_validator(|item| {
            if item.output.as_str().is_some_and(|s| s.len() > 5) {
                CustomCheck::Pass
            } else {
                CustomCheck::FailWith("Explanation too short".to_string())
            }
        }),
    );
    let mut session = LabelingSession::new(three_fresh_items(), config);
    session.load_next();

    assert!(session.validate().is_valid);

    session.update_output("No.");
    let outcome = session.validate();
    assert_eq!(outcome.message.as_deref(), Some("Explanation too short"));
}

#[test]
fn test_short_circuit_order() {
    let config = LabelerConfig::new().with_validation(
        "psychological",
        CategoryValidation::new()
            .with_neutrality_check()
            .with_required_citation()
            .with_min_quality_score(0.8),
    );
    let items = vec![
        LabelingItem::new("p", "entry", "analysis").with_pillar(Pillar::Psychological),
    ];
    let mut session = LabelingSession::new(items, config);

    assert_eq!(
        session.validate().message.as_deref(),
        Some("Psychological data must be marked as neutral")
    );

    let mut metadata = aletheia::Metadata::new();
    metadata.insert("isNeutral".to_string(), json!(true));
    metadata.insert("sourceCitation".to_string(), json!("APA 7"));
    let mut item = session.current_item().unwrap().clone();
    item.metadata = Some(metadata);
    session.replace_items(vec![item]);

    assert_eq!(
        session.validate().message.as_deref(),
        Some("Quality score must be at least 0.8")
    );

    session.update_quality_score(0.85);
    assert!(session.validate().is_valid);
}

#[test]
fn test_builtin_rules_through_session() {
    let items = vec![
        LabelingItem::new("p", "entry", "analysis")
            .with_pillar(Pillar::Psychological)
            .with_meta("neutrality_score", 5)
            .with_meta("ethical_check", true)
            .with_meta("gdpr_compliant", true),
    ];
    let session = LabelingSession::new(items, LabelerConfig::default());

    let (results, summary) = session.validate_rules().unwrap();
    assert_eq!(results.len(), 5);
    assert!(summary.is_valid);
    assert_eq!(summary.warnings, 1);
    assert_eq!(summary.failed, 2);
}

// =============================================================================
// Events
// =============================================================================

#[test]
fn test_validate_event_carries_outcome() {
    let config = LabelerConfig::new()
        .with_validation("technical", CategoryValidation::new().with_min_quality_score(3.0));
    let log = EventLog::new();
    let mut session =
        LabelingSession::new(three_fresh_items(), config).with_events(log.clone());

    session.validate();

    let events = log.events();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].kind,
        EventKind::Validate {
            is_valid: false,
            message: Some("Quality score must be at least 3".to_string()),
        }
    );
    assert_eq!(events[0].item.id, "task-a-001");
}

#[test]
fn test_edit_event_payload() {
    let log = EventLog::new();
    let mut session = LabelingSession::new(three_fresh_items(), LabelerConfig::default())
        .with_events(log.clone());

    session.update_output(json!({"skills": ["Figma", "Webflow"]}));

    let events = log.drain();
    assert_eq!(
        events[0].kind,
        EventKind::Edit {
            output: json!({"skills": ["Figma", "Webflow"]})
        }
    );
}

#[test]
fn test_no_events_for_failed_operations() {
    let log = EventLog::new();
    let mut session =
        LabelingSession::new(Vec::new(), LabelerConfig::default()).with_events(log.clone());

    assert!(matches!(session.mark_skipped(), Err(AletheiaError::NoActiveItem)));
    assert!(matches!(
        session.select_item("x"),
        Err(AletheiaError::ItemNotFound(_))
    ));
    session.validate();
    session.update_output("ignored");

    assert!(log.is_empty());
}

// =============================================================================
// External replacement
// =============================================================================

#[test]
fn test_replacement_keeps_selected_item() {
    let mut session = LabelingSession::new(three_fresh_items(), LabelerConfig::default());
    session.select_item("task-c-001").unwrap();

    let mut updated = session.items().to_vec();
    updated.push(LabelingItem::new("task-d-001", "Service offer", "{}"));
    session.replace_items(updated);

    assert_eq!(current_id(&session).as_deref(), Some("task-c-001"));
    assert_eq!(session.items().len(), 4);
    assert_eq!(session.current_index(), 2);
    assert!(session.has_next());
}
