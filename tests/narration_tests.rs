// Host-side tests for the narration state machine.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod narration {
    include!("../src/core/narration.rs");
}

use narration::*;

#[test]
fn starts_idle_with_no_hotspot() {
    let m = NarrationMachine::default();
    assert_eq!(m.status(), NarrationStatus::Idle);
    assert!(m.hotspot_id().is_none());
}

#[test]
fn request_walks_pending_playing_idle() {
    let mut m = NarrationMachine::default();
    let t = m.begin("mask");
    assert_eq!(m.status(), NarrationStatus::Pending);
    assert_eq!(m.hotspot_id(), Some("mask"));

    assert!(m.playback_started(t));
    assert_eq!(m.status(), NarrationStatus::Playing);

    assert!(m.completed(t));
    assert_eq!(m.status(), NarrationStatus::Idle);
    assert!(m.hotspot_id().is_none());
}

#[test]
fn a_new_request_supersedes_the_prior_one() {
    let mut m = NarrationMachine::default();
    let t_a = m.begin("a");
    let t_b = m.begin("b");

    // exactly one request is current, and it is B's
    assert!(!m.is_current(t_a));
    assert!(m.is_current(t_b));
    assert_eq!(m.hotspot_id(), Some("b"));

    // A's late completions must change nothing
    assert!(!m.playback_started(t_a));
    assert_eq!(m.status(), NarrationStatus::Pending);
    assert!(m.playback_started(t_b));
    assert!(!m.completed(t_a));
    assert_eq!(m.status(), NarrationStatus::Playing);
    assert!(m.completed(t_b));
    assert_eq!(m.status(), NarrationStatus::Idle);
}

#[test]
fn cancel_returns_to_idle_and_invalidates_the_ticket() {
    let mut m = NarrationMachine::default();
    let t = m.begin("mask");
    assert!(m.playback_started(t));
    m.cancel();
    assert_eq!(m.status(), NarrationStatus::Idle);
    assert!(!m.is_current(t));
    assert!(!m.completed(t));
    assert_eq!(m.status(), NarrationStatus::Idle);
}

#[test]
fn fallback_failure_parks_in_failed_until_the_next_request() {
    let mut m = NarrationMachine::default();
    let t = m.begin("mask");
    assert!(m.failed(t));
    assert_eq!(m.status(), NarrationStatus::Failed);

    // a fresh request recovers
    let t2 = m.begin("scribe");
    assert_eq!(m.status(), NarrationStatus::Pending);
    assert!(m.playback_started(t2));
    assert!(m.completed(t2));
    assert_eq!(m.status(), NarrationStatus::Idle);
}

#[test]
fn completion_requires_playback_to_have_started() {
    let mut m = NarrationMachine::default();
    let t = m.begin("mask");
    assert!(!m.completed(t));
    assert_eq!(m.status(), NarrationStatus::Pending);
}

#[test]
fn stale_failure_reports_are_ignored() {
    let mut m = NarrationMachine::default();
    let t_a = m.begin("a");
    let t_b = m.begin("b");
    assert!(!m.failed(t_a));
    assert_eq!(m.status(), NarrationStatus::Pending);
    assert!(m.is_current(t_b));
}
