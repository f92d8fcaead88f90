//! End-to-end flows through a host type that mixes in `Events`.

use std::sync::{Arc, Mutex};

use emittr::{Emitter, EmitterConfig, Events, Handler};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Helpers
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A host with its own state and behaviour alongside the listener API.
struct Thermostat {
    events: Emitter,
    reading: Mutex<f64>,
}

impl Thermostat {
    fn new() -> Self {
        Self {
            events: Emitter::new(),
            reading: Mutex::new(20.0),
        }
    }

    fn set(&self, value: f64) {
        let previous = std::mem::replace(&mut *self.reading.lock().unwrap(), value);
        self.emit("change", &[json!(previous), json!(value)]);
        if value > 30.0 {
            self.emit("overheat", &[json!(value)]);
        }
    }
}

impl Events for Thermostat {
    fn emitter(&self) -> &Emitter {
        &self.events
    }
}

fn collect(log: &Arc<Mutex<Vec<Value>>>) -> Handler {
    let log = Arc::clone(log);
    Handler::new(move |args| log.lock().unwrap().push(Value::Array(args.to_vec())))
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn host_emits_its_own_events() {
    init_tracing();
    let thermostat = Thermostat::new();
    let changes = Arc::new(Mutex::new(Vec::new()));
    let alarms = Arc::new(Mutex::new(Vec::new()));
    let everything = Arc::new(Mutex::new(Vec::new()));

    thermostat
        .on("change", collect(&changes))
        .unwrap()
        .once("overheat", collect(&alarms))
        .unwrap()
        .on_any(collect(&everything))
        .unwrap();

    thermostat.set(25.0);
    thermostat.set(35.0);
    thermostat.set(40.0);

    assert_eq!(
        *changes.lock().unwrap(),
        vec![json!([20.0, 25.0]), json!([25.0, 35.0]), json!([35.0, 40.0])]
    );
    assert_eq!(*alarms.lock().unwrap(), vec![json!([35.0])]);
    assert_eq!(everything.lock().unwrap().len(), 5);
    assert_eq!(
        everything.lock().unwrap()[2],
        json!(["overheat", 35.0])
    );
}

#[test]
fn each_host_owns_its_registry() {
    let a = Thermostat::new();
    let b = Thermostat::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    a.on("change", collect(&log)).unwrap();
    b.set(10.0);

    assert!(log.lock().unwrap().is_empty());
    assert!(!b.emitter().is_initialized());
    assert_eq!(a.listener_count("change"), 1);
}

#[test]
fn configured_emitter_limits_a_host() {
    init_tracing();
    let config = EmitterConfig::default().with_max_listeners(2);
    let thermostat = Thermostat {
        events: Emitter::with_config(config).unwrap(),
        reading: Mutex::new(0.0),
    };
    let log = Arc::new(Mutex::new(Vec::new()));

    thermostat.on("change", collect(&log)).unwrap();
    thermostat.on_any(collect(&log)).unwrap();

    assert!(thermostat.on("overheat", collect(&log)).is_err());
    assert_eq!(thermostat.max_listeners(), Some(2));
}

#[test]
fn emitter_is_shareable_across_threads() {
    let emitter = Arc::new(Emitter::new());
    let log = Arc::new(Mutex::new(Vec::new()));
    emitter.on("tick", collect(&log)).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let emitter = Arc::clone(&emitter);
            std::thread::spawn(move || {
                emitter.emit("tick", &[json!(i)]);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(log.lock().unwrap().len(), 4);
}
