//! `refresh`: one presence refresh per invocation.
//!
//! Reads a `RefreshRequest` from stdin, assembles the payload and prints it
//! as JSON. The start timestamp is carried between invocations in the state
//! file; `"reset": true` starts a new session.

use presence_core::{
    load_config, AnchorStore, PresenceAssembler, PresenceConfig, RefreshRequest, StorageConfig,
};
use presence_protocol::PresencePayload;
use std::io::{self, Read};
use std::path::PathBuf;

/// Parses a request; blank input is an idle refresh.
pub fn parse_request(input: &str) -> Result<RefreshRequest, String> {
    if input.trim().is_empty() {
        return Ok(RefreshRequest::default());
    }
    serde_json::from_str(input).map_err(|e| format!("Failed to parse refresh request: {}", e))
}

pub fn read_request() -> Result<RefreshRequest, String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;
    parse_request(&input)
}

pub fn run(config_path: Option<PathBuf>, state_path: Option<PathBuf>) -> Result<(), String> {
    let request = read_request()?;
    let config = load_config(config_path)?;
    let store = AnchorStore::new(state_path.unwrap_or_else(|| StorageConfig::default().state_file()));

    let payload = refresh(&request, &config, &store, &PresenceAssembler::new());

    let json = serde_json::to_string(&payload)
        .map_err(|e| format!("Failed to serialize payload: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn refresh(
    request: &RefreshRequest,
    config: &PresenceConfig,
    store: &AnchorStore,
    assembler: &PresenceAssembler,
) -> PresencePayload {
    let previous_start = if request.reset {
        tracing::debug!("Resetting start timestamp");
        None
    } else {
        store.load()
    };

    let payload = assembler.assemble(config, &request.snapshot, previous_start);

    // The anchor is non-critical; a failed write only restarts the timer next time.
    if let Err(e) = store.save(payload.start_timestamp) {
        tracing::warn!(
            error = %e,
            path = %store.path().display(),
            "Failed to persist start timestamp"
        );
    }

    payload
}
