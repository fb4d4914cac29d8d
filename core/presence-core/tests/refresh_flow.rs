//! Integration tests for a full refresh: request fixture → payload → anchor store.

use presence_core::{
    AnchorStore, Clock, Delivery, PresenceAssembler, PresenceConfig, RefreshRequest,
    RefreshSequencer,
};
use presence_protocol::{parse_payload, PresenceButton};
use std::path::PathBuf;

struct FixedClock(i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

fn fixture(name: &str) -> RefreshRequest {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/requests")
        .join(name);
    let content = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&content).unwrap()
}

fn assembler_at(now: i64) -> PresenceAssembler {
    PresenceAssembler::new().with_clock(FixedClock(now))
}

#[test]
fn test_editing_fixture_with_default_config() {
    let request = fixture("editing.json");
    let payload = assembler_at(1_000).assemble(&PresenceConfig::default(), &request.snapshot, None);

    assert_eq!(payload.details.as_deref(), Some("Editing main.rs"));
    assert_eq!(payload.state.as_deref(), Some("Workspace: presence"));
    assert_eq!(payload.large_image_key, "rust");
    assert_eq!(payload.large_image_text, "Editing a RUST file");
    assert_eq!(payload.small_image_key, "vscode");
    assert_eq!(payload.small_image_text, "Visual Studio Code");
    assert_eq!(payload.start_timestamp, Some(1_000));
    assert_eq!(
        payload.buttons,
        vec![PresenceButton {
            label: "View Repository".to_string(),
            url: "https://github.com/dev/presence".to_string(),
        }]
    );
}

#[test]
fn test_editing_fixture_with_custom_templates() {
    let request = fixture("editing.json");
    let config = PresenceConfig {
        details_editing: "{file_name} ({file_size})".to_string(),
        lower_details_editing: "{git_repo_name}:{git_branch} L{current_line}:{current_column}/{total_lines}"
            .to_string(),
        large_image: "{Lang} in {full_dir_name}".to_string(),
        ..PresenceConfig::default()
    };

    let payload = assembler_at(1_000).assemble(&config, &request.snapshot, None);

    assert_eq!(payload.details.as_deref(), Some("main.rs (6.14kb)"));
    assert_eq!(
        payload.state.as_deref(),
        Some("presence:feature/anchor L42:8/214")
    );
    assert_eq!(payload.large_image_text, "Rust in presence/src/engine");
}

#[test]
fn test_debugging_fixture() {
    let request = fixture("debugging.json");
    let payload = assembler_at(1_000).assemble(&PresenceConfig::default(), &request.snapshot, None);

    assert_eq!(payload.details.as_deref(), Some("Debugging flow.rs"));
    assert_eq!(payload.state.as_deref(), Some("Debugging: presence"));
    assert_eq!(payload.small_image_key, "debug");
    assert!(payload.buttons.is_empty());
}

#[test]
fn test_idle_insiders_fixture() {
    let request = fixture("idle-insiders.json");
    assert!(request.reset);

    let payload = assembler_at(1_000).assemble(&PresenceConfig::default(), &request.snapshot, None);
    assert_eq!(payload.details.as_deref(), Some("Idling"));
    assert_eq!(payload.large_image_key, "vscode-big");
    assert_eq!(payload.small_image_key, "vscode-insiders");
    assert_eq!(payload.small_image_text, "Visual Studio Code - Insiders");
}

#[test]
fn test_payload_json_round_trips_through_validation() {
    let request = fixture("editing.json");
    let payload = assembler_at(1_000).assemble(&PresenceConfig::default(), &request.snapshot, None);

    let value = serde_json::to_value(&payload).unwrap();
    assert_eq!(value["type"], 0);
    assert_eq!(value["largeImageKey"], "rust");
    assert_eq!(value["startTimestamp"], 1_000);

    let parsed = parse_payload(value).unwrap();
    assert_eq!(parsed, payload);
}

#[test]
fn test_anchor_survives_between_one_shot_refreshes() {
    let temp = tempfile::tempdir().unwrap();
    let store = AnchorStore::new(temp.path().join("state.json"));
    let config = PresenceConfig::default();

    let first = assembler_at(1_000).assemble(&config, &fixture("editing.json").snapshot, store.load());
    store.save(first.start_timestamp).unwrap();

    let second =
        assembler_at(5_000).assemble(&config, &fixture("debugging.json").snapshot, store.load());
    assert_eq!(second.start_timestamp, Some(1_000));

    store.clear().unwrap();
    let third = assembler_at(9_000).assemble(&config, &fixture("editing.json").snapshot, store.load());
    assert_eq!(third.start_timestamp, Some(9_000));
}

#[test]
fn test_sequencer_threads_anchor_and_drops_stale_results() {
    let sequencer = RefreshSequencer::new();
    let config = PresenceConfig::default();

    let slow = sequencer.begin();
    let fast = sequencer.begin();

    let fast_payload = assembler_at(2_000).assemble(
        &config,
        &fixture("debugging.json").snapshot,
        sequencer.previous_start(),
    );
    assert!(sequencer.complete(fast, fast_payload).is_delivered());

    let slow_payload =
        assembler_at(1_000).assemble(&config, &fixture("editing.json").snapshot, None);
    assert_eq!(sequencer.complete(slow, slow_payload), Delivery::Stale);

    let next = sequencer.begin();
    let next_payload = assembler_at(3_000).assemble(
        &config,
        &fixture("editing.json").snapshot,
        sequencer.previous_start(),
    );
    assert_eq!(next_payload.start_timestamp, Some(2_000));
    assert!(sequencer.complete(next, next_payload).is_delivered());
}
