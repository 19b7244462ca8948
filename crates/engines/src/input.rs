//! Input events, the key-code to regime map, and event sources.
//!
//! Events are delivered in batches, one batch per frame, and drained by the
//! frame loop before stepping. Key codes are opaque strings; only codes
//! bound in a [`KeyMap`] have any effect.

use quantum_fluid_core::error::EngineError;
use quantum_fluid_core::regime::Regime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One discrete input event. Pointer coordinates are in display space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Quit,
    Key { code: String },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
}

/// Lookup from key code to regime, built once from a regime catalog.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: HashMap<String, Regime>,
}

impl KeyMap {
    /// Binds every regime under its `key`. Later duplicates win.
    pub fn new(regimes: &[Regime]) -> Self {
        let bindings = regimes
            .iter()
            .map(|r| (r.key.clone(), r.clone()))
            .collect();
        Self { bindings }
    }

    pub fn resolve(&self, code: &str) -> Option<&Regime> {
        self.bindings.get(code)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Anything that can hand the frame loop the events pending at a frame.
pub trait InputSource {
    /// Events to process before stepping `frame`.
    fn poll(&mut self, frame: u64) -> Vec<InputEvent>;
}

/// An event scheduled for a given frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub frame: u64,
    pub event: InputEvent,
}

/// Replays a fixed schedule of events, for headless and test runs.
///
/// An event is delivered at the first poll whose frame is at or past its
/// scheduled frame. Events for the same frame keep their input order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: Vec<ScheduledEvent>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(mut events: Vec<ScheduledEvent>) -> Self {
        events.sort_by_key(|e| e.frame);
        Self { events, cursor: 0 }
    }

    /// Parses a JSON array of `{"frame": n, "event": {...}}` objects.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let events: Vec<ScheduledEvent> =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        Ok(Self::new(events))
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Events not yet delivered.
    pub fn remaining(&self) -> usize {
        self.events.len() - self.cursor
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame: u64) -> Vec<InputEvent> {
        let start = self.cursor;
        while self.cursor < self.events.len() && self.events[self.cursor].frame <= frame {
            self.cursor += 1;
        }
        self.events[start..self.cursor]
            .iter()
            .map(|e| e.event.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantum_fluid_core::regime::default_regimes;

    #[test]
    fn keymap_resolves_default_catalog() {
        let map = KeyMap::new(&default_regimes());
        assert_eq!(map.len(), 4);
        assert_eq!(map.resolve("1").unwrap().name, "spirals");
        assert_eq!(map.resolve("4").unwrap().name, "defects");
        assert!(map.resolve("5").is_none());
        assert!(map.resolve("").is_none());
    }

    #[test]
    fn keymap_later_binding_wins() {
        let map = KeyMap::new(&[
            Regime::new("a", "x", 0.0, 0.0, 0.0),
            Regime::new("b", "x", 1.0, 1.0, 1.0),
        ]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.resolve("x").unwrap().name, "b");
    }

    #[test]
    fn events_use_tagged_json() {
        let e: InputEvent = serde_json::from_str(r#"{"type": "pointer_down", "x": 3.0, "y": 4.5}"#).unwrap();
        assert_eq!(e, InputEvent::PointerDown { x: 3.0, y: 4.5 });
        let e: InputEvent = serde_json::from_str(r#"{"type": "key", "code": "2"}"#).unwrap();
        assert_eq!(e, InputEvent::Key { code: "2".into() });
        let e: InputEvent = serde_json::from_str(r#"{"type": "quit"}"#).unwrap();
        assert_eq!(e, InputEvent::Quit);
    }

    #[test]
    fn scripted_input_delivers_in_frame_order() {
        let mut input = ScriptedInput::from_json_str(
            r#"[
                {"frame": 5, "event": {"type": "quit"}},
                {"frame": 2, "event": {"type": "key", "code": "1"}},
                {"frame": 2, "event": {"type": "pointer_up"}}
            ]"#,
        )
        .unwrap();
        assert!(input.poll(0).is_empty());
        assert!(input.poll(1).is_empty());
        assert_eq!(
            input.poll(2),
            vec![InputEvent::Key { code: "1".into() }, InputEvent::PointerUp]
        );
        assert!(input.poll(3).is_empty());
        assert_eq!(input.remaining(), 1);
        assert_eq!(input.poll(9), vec![InputEvent::Quit]);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn malformed_script_is_invalid_config() {
        let err = ScriptedInput::from_json_str(r#"[{"frame": 0, "event": {"type": "jump"}}]"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }
}
