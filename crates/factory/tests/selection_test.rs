//! Channel-selection state machine tests

use loghub_factory::{ComponentRegistry, Context, Error, Level, LogManager, LoggingConfig};
use loghub_logger::{BoundSink, Channel, MemorySink, Propagation, Record, Result as EngineResult, Sink};
use serde_json::json;
use std::sync::{Arc, Mutex};

fn config(value: serde_json::Value) -> LoggingConfig {
    LoggingConfig::from_json(value).expect("test configuration must parse")
}

/// Registry with a `capture` sink type delivering into a shared buffer
fn capture_registry(capture: &MemorySink) -> ComponentRegistry {
    let mut registry = ComponentRegistry::with_builtins();
    let registered = capture.clone();
    registry.register_sink("capture", move |_params| Ok(Box::new(registered.clone())));
    registry
}

#[test]
fn logging_uses_the_default_channel_when_nothing_is_selected() {
    let app = MemorySink::new();
    let manager = LogManager::with_registry(
        config(json!({
            "app": { "default": true, "handlers": { "capture": {} } }
        })),
        &capture_registry(&app),
    )
    .unwrap();

    assert_eq!(manager.current_channel_name(), manager.default_channel_name());
    manager.info("plain call", Context::new()).unwrap();

    assert_eq!(app.len(), 1);
    assert_eq!(app.entries()[0].channel, "app");
    assert_eq!(app.entries()[0].level, Level::Info);
}

#[test]
fn selection_is_consumed_by_exactly_one_logging_call() {
    let dev = MemorySink::new();
    let app = MemorySink::new();

    let mut registry = ComponentRegistry::with_builtins();
    let dev_handle = dev.clone();
    registry.register_sink("dev_capture", move |_| Ok(Box::new(dev_handle.clone())));
    let app_handle = app.clone();
    registry.register_sink("app_capture", move |_| Ok(Box::new(app_handle.clone())));

    let manager = LogManager::with_registry(
        config(json!({
            "app": { "default": true, "handlers": { "app_capture": {} } },
            "dev": { "handlers": { "dev_capture": {} } }
        })),
        &registry,
    )
    .unwrap();

    manager.select_channel("dev").unwrap();
    assert_eq!(manager.current_channel_name(), "dev");

    manager.warning("goes to dev", Context::new()).unwrap();

    // Exactly one event on dev, none on app, and the selection is reset
    assert_eq!(dev.len(), 1);
    assert_eq!(dev.entries()[0].channel, "dev");
    assert!(app.is_empty());
    assert_eq!(manager.current_channel_name(), "app");

    // The next call goes back to the default channel
    manager.info("back on app", Context::new()).unwrap();
    assert_eq!(dev.len(), 1);
    assert_eq!(app.len(), 1);
}

#[test]
fn failed_selection_leaves_the_current_channel_untouched() {
    let manager = LogManager::new(config(json!({
        "app": { "default": true, "handlers": {} },
        "dev": { "handlers": {} }
    })))
    .unwrap();

    manager.select_channel("dev").unwrap();
    let err = manager.select_channel("missing").unwrap_err();
    assert!(matches!(err, Error::ChannelNotFound(name) if name == "missing"));
    assert_eq!(manager.current_channel_name(), "dev");
}

#[test]
fn select_channel_chains_into_a_logging_call() {
    let audit = MemorySink::new();
    let manager = LogManager::with_registry(
        config(json!({
            "app": { "default": true, "handlers": {} },
            "audit": { "handlers": { "capture": {} } }
        })),
        &capture_registry(&audit),
    )
    .unwrap();

    manager
        .select_channel("audit")
        .unwrap()
        .alert("chained", Context::new())
        .unwrap();

    assert_eq!(audit.len(), 1);
    assert_eq!(audit.entries()[0].level, Level::Alert);
    assert_eq!(manager.current_channel_name(), "app");
}

#[test]
fn spec_scenario_app_dev_missing() {
    let manager = LogManager::new(config(json!({
        "App": { "default": true, "enabled": true, "handlers": {} },
        "Dev": { "enabled": true, "handlers": {} }
    })))
    .unwrap();

    assert_eq!(manager.default_channel_name(), "App");

    manager.select_channel("Dev").unwrap();
    manager.info("x", Context::new()).unwrap();
    assert_eq!(manager.current_channel_name(), "App");

    let err = manager.select_channel("Missing").unwrap_err();
    assert!(matches!(err, Error::ChannelNotFound(_)));
    assert_eq!(manager.current_channel_name(), "App");
}

#[test]
fn add_channel_overwrites_without_error() {
    let manager = LogManager::new(config(json!({
        "app": { "default": true, "handlers": {} }
    })))
    .unwrap();
    assert_eq!(manager.get_channel("app").unwrap().sink_count(), 0);

    let mut replacement = Channel::new("app");
    replacement.push_sink(BoundSink::new(Box::new(MemorySink::new())));
    manager.add_channel(replacement);

    assert_eq!(manager.get_channel("app").unwrap().sink_count(), 1);
}

#[test]
fn added_channels_become_selectable() {
    let capture = MemorySink::new();
    let manager = LogManager::new(config(json!({
        "app": { "default": true, "handlers": {} }
    })))
    .unwrap();

    let mut side = Channel::new("side");
    side.push_sink(BoundSink::new(Box::new(capture.clone())));
    manager.add_channel(side);

    assert!(manager.is_channel("side"));
    manager
        .select_channel("side")
        .unwrap()
        .debug("injected channel", Context::new())
        .unwrap();
    assert_eq!(capture.len(), 1);
}

#[test]
fn every_leveled_method_hits_the_current_channel() {
    let capture = MemorySink::new();
    let manager = LogManager::with_registry(
        config(json!({
            "app": { "default": true, "handlers": { "capture": {} } }
        })),
        &capture_registry(&capture),
    )
    .unwrap();

    manager.emergency("m", Context::new()).unwrap();
    manager.alert("m", Context::new()).unwrap();
    manager.critical("m", Context::new()).unwrap();
    manager.error("m", Context::new()).unwrap();
    manager.warning("m", Context::new()).unwrap();
    manager.notice("m", Context::new()).unwrap();
    manager.info("m", Context::new()).unwrap();
    manager.debug("m", Context::new()).unwrap();

    let levels: Vec<_> = capture.entries().iter().map(|e| e.level).collect();
    assert_eq!(
        levels,
        vec![
            Level::Emergency,
            Level::Alert,
            Level::Critical,
            Level::Error,
            Level::Warning,
            Level::Notice,
            Level::Info,
            Level::Debug,
        ]
    );
}

#[test]
fn generic_log_accepts_levels_and_level_names() {
    let capture = MemorySink::new();
    let manager = LogManager::with_registry(
        config(json!({
            "app": { "default": true, "handlers": { "capture": {} } }
        })),
        &capture_registry(&capture),
    )
    .unwrap();

    manager.log(Level::Critical, "typed", Context::new()).unwrap();
    manager.log("notice", "named", Context::new()).unwrap();

    let levels: Vec<_> = capture.entries().iter().map(|e| e.level).collect();
    assert_eq!(levels, vec![Level::Critical, Level::Notice]);
}

#[test]
fn invalid_level_fails_without_consuming_the_selection() {
    let manager = LogManager::new(config(json!({
        "app": { "default": true, "handlers": {} },
        "dev": { "handlers": {} }
    })))
    .unwrap();

    manager.select_channel("dev").unwrap();
    let err = manager.log("loud", "never dispatched", Context::new()).unwrap_err();
    assert!(matches!(err, Error::InvalidLevel(_)));
    // The call never reached a channel, so the selection still stands
    assert_eq!(manager.current_channel_name(), "dev");
}

/// Sink whose delivery always fails
struct FailingSink;

impl Sink for FailingSink {
    fn deliver(&self, _record: &Record, _rendered: &str) -> EngineResult<Propagation> {
        Err(loghub_logger::Error::Io(std::io::Error::other(
            "destination unreachable",
        )))
    }
}

#[test]
fn delivery_errors_propagate_but_the_reset_still_happens() {
    let manager = LogManager::new(config(json!({
        "app": { "default": true, "handlers": {} },
        "flaky": { "handlers": {} }
    })))
    .unwrap();

    let mut flaky = Channel::new("flaky");
    flaky.push_sink(BoundSink::new(Box::new(FailingSink)));
    manager.add_channel(flaky);

    manager.select_channel("flaky").unwrap();
    let err = manager.error("will not arrive", Context::new()).unwrap_err();
    assert!(matches!(err, Error::Engine(_)));

    // Reset is unconditional: the failure did not stick the selection
    assert_eq!(manager.current_channel_name(), "app");
}

/// Sink that appends its label to a shared order log
struct OrderSink {
    label: &'static str,
    order: Arc<Mutex<Vec<&'static str>>>,
}

impl Sink for OrderSink {
    fn deliver(&self, _record: &Record, _rendered: &str) -> EngineResult<Propagation> {
        self.order.lock().unwrap().push(self.label);
        Ok(Propagation::Continue)
    }
}

#[test]
fn configured_handler_order_is_invocation_order() {
    let order: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    let mut registry = ComponentRegistry::with_builtins();
    for label in ["first", "second", "third"] {
        let order = order.clone();
        registry.register_sink(label, move |_| {
            Ok(Box::new(OrderSink {
                label,
                order: order.clone(),
            }))
        });
    }

    let manager = LogManager::with_registry(
        config(json!({
            "app": {
                "default": true,
                "handlers": { "second": {}, "third": {}, "first": {} }
            }
        })),
        &registry,
    )
    .unwrap();

    manager.info("ordered", Context::new()).unwrap();
    assert_eq!(*order.lock().unwrap(), vec!["second", "third", "first"]);
}
