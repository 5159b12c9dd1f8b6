//! End-to-end session scenarios with structured log capture.
//!
//! Run:
//!   cargo test -p algoviz-runtime --test e2e_session_playback

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use algoviz_core::{AlgorithmKind, StepKind};
use algoviz_runtime::{PlaybackMode, PlaybackSession, RunSummary, SessionConfig, Speed};
use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Log capture
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> Option<&str> {
        self.fields.get("message").map(String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_events<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::TRACE)
        .with(EventCapture {
            events: Arc::clone(&events),
        });
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn every_algorithm_plays_to_sorted() {
    for kind in AlgorithmKind::ALL {
        let mut s = PlaybackSession::default();
        s.load(&[9, 2, 7, 2, 5, 1, 8]);
        s.set_algorithm(kind);
        s.set_speed(Speed::Fast);
        s.play();
        let mut finished = None;
        for _ in 0..10_000 {
            let report = s.tick(Duration::from_millis(100));
            if report.finished.is_some() {
                finished = report.finished;
                break;
            }
        }
        let summary = finished.unwrap_or_else(|| panic!("{kind} never finished"));
        assert_eq!(summary.algorithm, kind);
        assert_eq!(s.values(), vec![1, 2, 2, 5, 7, 8, 9], "{kind}");
        assert_eq!(s.current().map(|step| step.kind), Some(StepKind::Complete));
        assert_eq!(s.playback_mode(), PlaybackMode::Stopped);
    }
}

#[test]
fn replaying_after_finish_starts_a_fresh_pass() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut s = PlaybackSession::default();
    s.set_observer(move |_: &RunSummary| counter.set(counter.get() + 1));
    s.load(&[3, 1, 2]);
    s.set_speed(Speed::Instant);
    s.play();
    s.play();
    assert_eq!(calls.get(), 1);

    s.reset();
    s.play();
    assert_eq!(calls.get(), 2);
}

#[test]
fn speed_change_mid_run_keeps_position() {
    let mut s = PlaybackSession::default();
    s.load(&[5, 3, 4, 1, 2]);
    s.play();
    s.tick(Duration::from_millis(1000));
    assert_eq!(s.current_step(), 2);
    s.set_speed(Speed::Fast);
    assert_eq!(s.current_step(), 2);
    assert_eq!(s.tick(Duration::from_millis(100)).advanced, 1);
}

#[test]
fn custom_speed_table_from_toml() {
    let config = SessionConfig::from_toml_str("[speed]\nnormal_ms = 40").unwrap();
    let mut s = PlaybackSession::new(config).unwrap();
    s.load(&[2, 1]);
    s.play();
    assert_eq!(s.tick(Duration::from_millis(40)).advanced, 1);
}

#[test]
fn run_completion_logged_at_info() {
    let events = with_captured_events(|| {
        let mut s = PlaybackSession::default();
        s.load(&[5, 3, 4, 1, 2]);
        s.set_speed(Speed::Instant);
        s.play();
    });

    let finished: Vec<_> = events
        .iter()
        .filter(|e| e.message() == Some("run finished"))
        .collect();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].level, tracing::Level::INFO);
    assert_eq!(finished[0].fields.get("comparisons").map(String::as_str), Some("10"));
    assert_eq!(finished[0].fields.get("swaps").map(String::as_str), Some("8"));
    assert!(events.iter().all(|e| e.level != tracing::Level::ERROR));
}

#[test]
fn replayed_play_logs_one_timer_per_arm() {
    let events = with_captured_events(|| {
        let mut s = PlaybackSession::default();
        s.load(&[4, 3, 2, 1]);
        s.play();
        s.play();
        s.pause();
    });
    let armed = events
        .iter()
        .filter(|e| e.message() == Some("timer armed"))
        .count();
    let replaced = events
        .iter()
        .filter(|e| e.message() == Some("timer replaced"))
        .count();
    let cancelled = events
        .iter()
        .filter(|e| e.message() == Some("timer cancelled"))
        .count();
    assert_eq!(armed, 2);
    assert_eq!(replaced + cancelled, 2);
}
