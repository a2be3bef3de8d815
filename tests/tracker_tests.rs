use std::sync::Arc;

use callwatch::config::TrackerConfig;
use callwatch::kernel::time::{ManualClock, Timestamp};
use callwatch::{CallStateTracker, Classification, DerivedEvent, RawSignal, SignalKind};

fn tracker_at(start_ms: u64) -> (CallStateTracker, ManualClock) {
    let clock = ManualClock::new(Timestamp::from_millis(start_ms));
    let tracker = CallStateTracker::new(Arc::new(clock.clone()), TrackerConfig::default());
    (tracker, clock)
}

fn feed(tracker: &mut CallStateTracker, signals: Vec<RawSignal>) -> Vec<DerivedEvent> {
    signals
        .into_iter()
        .filter_map(|s| tracker.handle_signal(s))
        .collect()
}

/// Ring, answer, hang up.
fn answered(ringing: RawSignal) -> Vec<RawSignal> {
    vec![ringing, RawSignal::offhook(), RawSignal::idle()]
}

fn ts(ms: u64) -> Timestamp {
    Timestamp::from_millis(ms)
}

#[test]
fn test_one_event_per_session_with_repeated_idles() {
    let (mut tracker, clock) = tracker_at(10_000);

    assert_eq!(tracker.handle_signal(RawSignal::ringing(Some("+15557777"))), None);
    assert_eq!(tracker.handle_signal(RawSignal::offhook()), None);
    clock.advance(30_000);
    let first = tracker.handle_signal(RawSignal::idle());
    assert_eq!(first, Some(DerivedEvent::CallEndedIncoming { number: "+15557777".into() }));

    // Echoes of the same hang-up
    clock.advance(200);
    assert_eq!(tracker.handle_signal(RawSignal::idle()), None);
    clock.advance(200);
    assert_eq!(tracker.handle_signal(RawSignal::idle()), None);
}

#[test]
fn test_unanswered_ring_produces_nothing() {
    let (mut tracker, _) = tracker_at(0);

    let events = feed(&mut tracker, vec![RawSignal::ringing(Some("+15550000")), RawSignal::idle()]);
    assert!(events.is_empty(), "Ring without answer must not end a call");
    assert!(!tracker.state().was_offhook);
}

#[test]
fn test_unanswered_idle_is_classified() {
    let (mut tracker, _) = tracker_at(0);

    assert_eq!(tracker.classify(RawSignal::ringing(None)), Classification::RingingCaptured);
    assert_eq!(tracker.classify(RawSignal::idle()), Classification::UnansweredIdle);
}

#[test]
fn test_repeated_signal_is_noop() {
    let (mut tracker, _) = tracker_at(0);

    tracker.handle_signal(RawSignal::ringing(Some("+15551111")));
    let after_once = tracker.state().clone();

    let second = tracker.classify(RawSignal::ringing(Some("+15551111")));
    assert_eq!(second, Classification::Duplicate(SignalKind::Ringing));
    assert_eq!(tracker.state(), &after_once);
}

#[test]
fn test_dedup_keys_on_kind_only() {
    let (mut tracker, _) = tracker_at(0);

    // A second RINGING with a different number is still a repeat.
    tracker.handle_signal(RawSignal::ringing(Some("+15551111")));
    tracker.handle_signal(RawSignal::ringing(Some("+15552222")));
    assert_eq!(tracker.state().incoming_number.as_deref(), Some("+15551111"));
}

#[test]
fn test_double_idle_inside_window_emits_once() {
    let (mut tracker, _) = tracker_at(0);

    let events = feed(
        &mut tracker,
        vec![
            RawSignal::offhook().at(ts(0)),
            RawSignal::idle().at(ts(1_000)),
            RawSignal::idle().at(ts(1_500)),
        ],
    );
    assert_eq!(events, vec![DerivedEvent::CallEndedOutgoing]);
}

#[test]
fn test_rearmed_call_after_window_emits_again() {
    let (mut tracker, _) = tracker_at(0);

    let events = feed(
        &mut tracker,
        vec![
            RawSignal::offhook().at(ts(0)),
            RawSignal::idle().at(ts(1_000)),
            RawSignal::offhook().at(ts(2_000)),
            RawSignal::idle().at(ts(3_500)),
        ],
    );
    assert_eq!(
        events,
        vec![DerivedEvent::CallEndedOutgoing, DerivedEvent::CallEndedOutgoing],
        "Exactly 2500ms after the last end is outside the window"
    );
}

#[test]
fn test_debounce_uses_injected_clock() {
    let (mut tracker, clock) = tracker_at(50_000);

    tracker.handle_signal(RawSignal::offhook());
    assert!(tracker.handle_signal(RawSignal::idle()).is_some());

    clock.advance(2_499);
    tracker.handle_signal(RawSignal::offhook());
    assert_eq!(
        tracker.classify(RawSignal::idle()),
        Classification::Debounced { since_last_ms: 2_499 }
    );

    // Still armed: the next real hang-up after the window is reported.
    clock.advance(10_000);
    tracker.handle_signal(RawSignal::ringing(None));
    tracker.handle_signal(RawSignal::offhook());
    assert_eq!(
        tracker.handle_signal(RawSignal::idle()),
        Some(DerivedEvent::CallEndedIncoming { number: "Unknown".into() })
    );
}

#[test]
fn test_incoming_call_carries_number() {
    let (mut tracker, _) = tracker_at(0);

    let events = feed(
        &mut tracker,
        vec![RawSignal::ringing(Some("+15551234")), RawSignal::offhook(), RawSignal::idle()],
    );
    assert_eq!(events, vec![DerivedEvent::CallEndedIncoming { number: "+15551234".into() }]);
}

#[test]
fn test_missing_caller_id_defaults_to_unknown() {
    let (mut tracker, _) = tracker_at(0);

    let events = feed(&mut tracker, answered(RawSignal::ringing(None)));
    assert_eq!(events, vec![DerivedEvent::CallEndedIncoming { number: "Unknown".into() }]);
}

#[test]
fn test_custom_unknown_caller_placeholder() {
    let clock = ManualClock::default();
    let config = TrackerConfig {
        unknown_caller: "Private".to_string(),
        ..TrackerConfig::default()
    };
    let mut tracker = CallStateTracker::new(Arc::new(clock), config);
    assert_eq!(tracker.config().unknown_caller, "Private");
    assert_eq!(tracker.config().debounce_ms, 2500);

    let events = feed(&mut tracker, answered(RawSignal::ringing(Some("  "))));
    assert_eq!(events, vec![DerivedEvent::CallEndedIncoming { number: "Private".into() }]);
}

#[test]
fn test_outgoing_call_has_no_number() {
    let (mut tracker, _) = tracker_at(0);

    let events = feed(&mut tracker, vec![RawSignal::offhook(), RawSignal::idle()]);
    assert_eq!(events, vec![DerivedEvent::CallEndedOutgoing]);
    assert_eq!(tracker.state().incoming_number, None);
}

#[test]
fn test_session_resets_after_end() {
    let (mut tracker, _) = tracker_at(0);

    feed(&mut tracker, answered(RawSignal::ringing(Some("+15559999"))));
    let state = tracker.state();
    assert!(!state.was_offhook);
    assert!(!state.is_incoming);
    assert_eq!(state.incoming_number, None);
    assert_eq!(state.last_end_emitted_at, Some(ts(0)));
}

#[test]
fn test_end_to_end_ring_answer_hangup() {
    let (mut tracker, _) = tracker_at(0);
    let t = 1_000_000;

    let outcomes: Vec<Option<DerivedEvent>> = vec![
        RawSignal::ringing(Some("+15550001")).at(ts(t)),
        RawSignal::ringing(Some("+15550001")).at(ts(t)),
        RawSignal::offhook().at(ts(t + 1_000)),
        RawSignal::idle().at(ts(t + 3_000)),
    ]
    .into_iter()
    .map(|s| tracker.handle_signal(s))
    .collect();

    assert_eq!(
        outcomes,
        vec![
            None,
            None,
            None,
            Some(DerivedEvent::CallEndedIncoming { number: "+15550001".into() }),
        ]
    );
}

/// Known limitation: a genuinely new call that ends inside the window of the
/// previous one is indistinguishable from an echo and is dropped.
#[test]
fn test_known_limitation_short_second_call_is_swallowed() {
    let (mut tracker, _) = tracker_at(0);

    let events = feed(
        &mut tracker,
        vec![
            RawSignal::offhook().at(ts(0)),
            RawSignal::idle().at(ts(1_000)),
            RawSignal::offhook().at(ts(1_200)),
            RawSignal::idle().at(ts(2_000)),
        ],
    );
    assert_eq!(events, vec![DerivedEvent::CallEndedOutgoing]);
    assert!(tracker.state().was_offhook, "Suppressed end leaves the session armed");
}

/// Known limitation: an unanswered ring is not cleared by its IDLE, so a
/// following outgoing call is reported as incoming from the missed caller.
#[test]
fn test_known_limitation_missed_ring_leaks_into_next_call() {
    let (mut tracker, _) = tracker_at(0);

    let events = feed(
        &mut tracker,
        vec![
            RawSignal::ringing(Some("+15550002")),
            RawSignal::idle(),
            RawSignal::offhook(),
            RawSignal::idle(),
        ],
    );
    assert_eq!(events, vec![DerivedEvent::CallEndedIncoming { number: "+15550002".into() }]);
}

#[test]
fn test_first_end_never_debounced() {
    let (mut tracker, _) = tracker_at(0);

    let events = feed(
        &mut tracker,
        vec![RawSignal::offhook().at(ts(0)), RawSignal::idle().at(ts(0))],
    );
    assert_eq!(events.len(), 1);
}

#[test]
fn test_clock_closure_is_a_clock() {
    let clock = Arc::new(|| Timestamp::from_millis(42));
    let mut tracker = CallStateTracker::new(clock, TrackerConfig::default());

    tracker.handle_signal(RawSignal::offhook());
    tracker.handle_signal(RawSignal::idle());
    assert_eq!(tracker.state().last_end_emitted_at, Some(ts(42)));
}

#[test]
fn test_clock_going_backwards_counts_as_echo() {
    let (mut tracker, clock) = tracker_at(20_000);

    tracker.handle_signal(RawSignal::offhook());
    assert!(tracker.handle_signal(RawSignal::idle()).is_some());

    clock.set(ts(5_000));
    tracker.handle_signal(RawSignal::offhook());
    assert_eq!(
        tracker.classify(RawSignal::idle()),
        Classification::Debounced { since_last_ms: 0 }
    );

    clock.set(ts(22_500));
    tracker.handle_signal(RawSignal::ringing(None));
    tracker.handle_signal(RawSignal::offhook());
    assert!(tracker.handle_signal(RawSignal::idle()).is_some());
}
