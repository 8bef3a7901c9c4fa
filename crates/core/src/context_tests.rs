// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn get_returns_none_outside_any_scope() {
    assert_eq!(get("flow_run_id"), None);
}

#[test]
fn scope_installs_and_drop_restores() {
    {
        let _guard = scope([("flow_run_id", "run-1")]);
        assert_eq!(get("flow_run_id"), Some("run-1".to_string()));
    }
    assert_eq!(get("flow_run_id"), None);
}

#[test]
fn nested_scopes_layer_and_unwind() {
    let _outer = scope([("flow_run_id", "outer"), ("flow_name", "etl")]);
    {
        let _inner = scope([("flow_run_id", "inner")]);
        assert_eq!(get("flow_run_id"), Some("inner".to_string()));
        // untouched keys stay visible
        assert_eq!(get("flow_name"), Some("etl".to_string()));
    }
    assert_eq!(get("flow_run_id"), Some("outer".to_string()));
}

#[test]
fn context_is_thread_local() {
    let _guard = scope([("flow_run_id", "main-thread")]);
    let seen = std::thread::spawn(|| get("flow_run_id")).join().unwrap();
    assert_eq!(seen, None);
}
