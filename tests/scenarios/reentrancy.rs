//! Listeners that call back into the emitter while it is emitting.

use std::sync::{Arc, Mutex};

use emittr::{Emitter, Events, Handler};
use serde_json::json;

fn make_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

fn push(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> Handler {
    let log = Arc::clone(log);
    let tag = tag.to_string();
    Handler::new(move |_| log.lock().unwrap().push(tag.clone()))
}

#[test]
fn listener_added_during_emit_is_not_called_in_current_emission() {
    let emitter = Arc::new(Emitter::new());
    let log = make_log();

    let emitter_clone = Arc::clone(&emitter);
    let log_clone = Arc::clone(&log);
    emitter
        .on(
            "e",
            Handler::new(move |_| {
                log_clone.lock().unwrap().push("first".to_string());
                emitter_clone.on("e", push(&log_clone, "second")).unwrap();
            }),
        )
        .unwrap();

    emitter.emit("e", &[]);
    assert_eq!(*log.lock().unwrap(), vec!["first"]);

    log.lock().unwrap().clear();
    emitter.emit("e", &[]);
    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}

#[test]
fn listener_removed_during_emit_is_still_called_in_that_emission() {
    let emitter = Arc::new(Emitter::new());
    let log = make_log();
    let victim = push(&log, "victim");

    let emitter_clone = Arc::clone(&emitter);
    let victim_clone = victim.clone();
    emitter
        .on(
            "e",
            Handler::new(move |_| {
                emitter_clone.off("e", Some(&victim_clone)).unwrap();
            }),
        )
        .unwrap();
    emitter.on("e", victim).unwrap();

    emitter.emit("e", &[]);
    assert_eq!(*log.lock().unwrap(), vec!["victim"]);

    emitter.emit("e", &[]);
    assert_eq!(*log.lock().unwrap(), vec!["victim"]);
}

#[test]
fn wildcard_listener_adding_event_listener_affects_the_event_pass() {
    let emitter = Arc::new(Emitter::new());
    let log = make_log();

    let emitter_clone = Arc::clone(&emitter);
    let log_clone = Arc::clone(&log);
    emitter
        .once_any(Handler::new(move |_| {
            emitter_clone.on("e", push(&log_clone, "late")).unwrap();
        }))
        .unwrap();

    emitter.emit("e", &[]);

    assert_eq!(*log.lock().unwrap(), vec!["late"]);
}

#[test]
fn once_listener_that_re_emits_fires_only_once() {
    let emitter = Arc::new(Emitter::new());
    let calls = Arc::new(Mutex::new(0));

    let emitter_clone = Arc::clone(&emitter);
    let calls_clone = Arc::clone(&calls);
    emitter
        .once(
            "e",
            Handler::new(move |_| {
                *calls_clone.lock().unwrap() += 1;
                emitter_clone.emit("e", &[json!("nested")]);
            }),
        )
        .unwrap();

    emitter.emit("e", &[]);

    assert_eq!(*calls.lock().unwrap(), 1);
    assert!(emitter.listeners_for("e").is_empty());
}

#[test]
fn limited_listener_that_re_emits_respects_its_budget() {
    let emitter = Arc::new(Emitter::new());
    let calls = Arc::new(Mutex::new(0));

    let emitter_clone = Arc::clone(&emitter);
    let calls_clone = Arc::clone(&calls);
    emitter
        .on_many_times(
            "e",
            3,
            Handler::new(move |_| {
                *calls_clone.lock().unwrap() += 1;
                emitter_clone.emit("e", &[]);
            }),
        )
        .unwrap();

    emitter.emit("e", &[]);

    assert_eq!(*calls.lock().unwrap(), 3);
    assert!(emitter.listeners_for("e").is_empty());
}

#[test]
fn listener_may_clear_the_registry_mid_emission() {
    let emitter = Arc::new(Emitter::new());
    let log = make_log();

    let emitter_clone = Arc::clone(&emitter);
    emitter
        .on(
            "e",
            Handler::new(move |_| {
                emitter_clone.off_all().unwrap();
            }),
        )
        .unwrap();
    emitter.on("e", push(&log, "snapshot")).unwrap();

    emitter.emit("e", &[]);
    emitter.emit("e", &[]);

    assert_eq!(*log.lock().unwrap(), vec!["snapshot"]);
    assert_eq!(emitter.listener_count_total(), 0);
}
