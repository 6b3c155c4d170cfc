// Host-side tests for hotspot configuration parsing and selection state.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod hotspot {
    include!("../src/core/hotspot.rs");
}

use hotspot::*;

#[test]
fn bundled_configuration_is_valid() {
    let hotspots = parse_hotspots(include_str!("../assets/hotspots.json")).expect("bundled config");
    assert!(!hotspots.is_empty());
    for h in &hotspots {
        assert!(!h.id.is_empty());
        assert!(!h.title.is_empty());
        assert!(h.position.is_finite());
    }
}

#[test]
fn parses_a_minimal_record() {
    let json = r#"[{"id":"mask","title":"Mask","description":"Golden.","position":[0.0,5.0,-25.0]}]"#;
    let hotspots = parse_hotspots(json).unwrap();
    assert_eq!(hotspots.len(), 1);
    assert_eq!(hotspots[0].id, "mask");
    assert_eq!(hotspots[0].position.z, -25.0);
    assert!(hotspots[0].icon.is_none());
}

#[test]
fn rejects_duplicate_ids() {
    let json = r#"[
      {"id":"x","title":"A","description":"a","position":[0,0,0]},
      {"id":"x","title":"B","description":"b","position":[1,1,1]}
    ]"#;
    match parse_hotspots(json) {
        Err(ConfigError::DuplicateId { id }) => assert_eq!(id, "x"),
        other => panic!("expected DuplicateId, got {other:?}"),
    }
}

#[test]
fn rejects_non_finite_positions() {
    // 1e39 overflows f32 and deserializes to infinity
    let json = r#"[{"id":"x","title":"A","description":"a","position":[1e39,0,0]}]"#;
    match parse_hotspots(json) {
        Err(ConfigError::NonFinitePosition { id }) => assert_eq!(id, "x"),
        other => panic!("expected NonFinitePosition, got {other:?}"),
    }
}

#[test]
fn rejects_empty_ids() {
    let json = r#"[{"id":"","title":"A","description":"a","position":[0,0,0]}]"#;
    assert!(matches!(parse_hotspots(json), Err(ConfigError::EmptyId)));
}

#[test]
fn rejects_malformed_json() {
    assert!(matches!(
        parse_hotspots("not json"),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn selection_replaces_and_closes() {
    let mut sel = ActiveSelection::default();
    assert!(sel.selected().is_none());
    assert!(!sel.panel_visible());

    sel.select(1);
    assert_eq!(sel.selected(), Some(1));
    assert!(sel.panel_visible());

    // selecting another hotspot replaces, never stacks
    sel.select(2);
    assert_eq!(sel.selected(), Some(2));
    assert!(sel.panel_visible());

    sel.close();
    assert!(sel.selected().is_none());
    assert!(!sel.panel_visible());
}
