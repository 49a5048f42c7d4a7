//! # dab_trigger
//!
//! Turn a per-frame stream of [`GestureLabel`]s into monophonic note
//! attack/release commands.
//!
//! Each label maps to a **score** 0–6, which indexes a six-entry
//! [`NoteTable`] of pitch names (score 0 is always silence):
//!
//! | Label | Score | Default note |
//! |---|---|---|
//! | `NotDab`       | 0 | — |
//! | `RightUpDab`   | 1 | C4 |
//! | `RightSideDab` | 2 | D4 |
//! | `RightDownDab` | 3 | E4 |
//! | `LeftUpDab`    | 4 | F4 |
//! | `LeftSideDab`  | 5 | G4 |
//! | `LeftDownDab`  | 6 | A4 |
//!
//! [`NoteTrigger`] is the stateful session object: it remembers the key
//! derived from the previous frame and emits [`NoteEvent`]s only on edges,
//! so a held pose sounds one note rather than re-attacking every frame.
//! Silence is debounced — a single-frame classification flicker to `NotDab`
//! does not kill the note, two consecutive silent frames do.
//!
//! At most one note is ever sounding: every `Attack` is preceded by a
//! `Release` in the same transition, and a no-op `Release` is always safe.

use std::time::Duration;

use dab_gesture::{Direction, GestureLabel, Side};

// ════════════════════════════════════════════════════════════════════════════
// Score
// ════════════════════════════════════════════════════════════════════════════

/// Score for a gesture label: left side adds 3, the direction adds 1 (up),
/// 2 (side) or 3 (down).  `NotDab` scores 0; the six real labels cover 1–6.
pub fn score_of(label: GestureLabel) -> u8 {
    let horizontal = match label.side() {
        Some(Side::Left) => 3,
        _ => 0,
    };
    let vertical = match label.direction() {
        Some(Direction::Up)   => 1,
        Some(Direction::Side) => 2,
        Some(Direction::Down) => 3,
        None => 0,
    };
    horizontal + vertical
}

// ════════════════════════════════════════════════════════════════════════════
// NoteTable
// ════════════════════════════════════════════════════════════════════════════

/// Six configurable pitch names indexed 1–6 by score; score 0 is silence
/// and is not configurable.
///
/// Pitch names are opaque strings in scientific pitch notation ("C4",
/// "Eb5"); the synthesizer-facing side resolves them with
/// [`midi_note_number`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteTable {
    names: [String; 6],
}

impl NoteTable {
    /// Table from six pitch names, in score order 1–6.
    pub fn from_names(names: [&str; 6]) -> NoteTable {
        NoteTable {
            names: names.map(str::to_string),
        }
    }

    /// Replace the pitch for one score slot (1–6).
    ///
    /// Panics on a slot outside 1–6: the table's shape is fixed and an
    /// out-of-range slot is a programming error.
    pub fn set(&mut self, score: u8, name: &str) {
        assert!(
            (1..=6).contains(&score),
            "note table slot {} out of range 1-6",
            score
        );
        self.names[score as usize - 1] = name.to_string();
    }

    /// Pitch name for `score`: `None` for 0, the table entry for 1–6.
    ///
    /// Panics on a score above 6 — the closed [`GestureLabel`] enumeration
    /// can never produce one, so it is unreachable rather than recoverable.
    pub fn key_of(&self, score: u8) -> Option<&str> {
        assert!(score <= 6, "score {} out of range 0-6", score);
        if score == 0 {
            None
        } else {
            Some(&self.names[score as usize - 1])
        }
    }
}

impl Default for NoteTable {
    /// A C-major run, C4 through A4.
    fn default() -> Self {
        NoteTable::from_names(["C4", "D4", "E4", "F4", "G4", "A4"])
    }
}

// ════════════════════════════════════════════════════════════════════════════
// NoteEvent
// ════════════════════════════════════════════════════════════════════════════

/// Attacks are scheduled slightly in the future so the audio engine never
/// races the release that precedes them.
pub const ATTACK_DELAY: Duration = Duration::from_millis(50);

/// A note command for the downstream synthesizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NoteEvent {
    /// Start sounding `pitch` after `delay` (always [`ATTACK_DELAY`]).
    Attack { pitch: String, delay: Duration },
    /// Stop whatever is sounding.  Releasing silence is a harmless no-op.
    Release,
}

// ════════════════════════════════════════════════════════════════════════════
// NoteTrigger
// ════════════════════════════════════════════════════════════════════════════

/// Edge-triggered monophonic note trigger; one instance per live
/// classification session, advanced exactly once per processed frame.
#[derive(Debug, Default)]
pub struct NoteTrigger {
    previous_key: Option<String>,
}

impl NoteTrigger {
    /// Fresh session: nothing sounding, no previous key.
    pub fn new() -> NoteTrigger {
        NoteTrigger::default()
    }

    /// The key derived from the previous frame, i.e. the note currently
    /// sounding if any.
    pub fn previous_key(&self) -> Option<&str> {
        self.previous_key.as_deref()
    }

    /// Advance the session by one frame's gesture label.
    ///
    /// * Key changed to a real note → `Release` then `Attack` (the release
    ///   is unconditional; releasing nothing is safe).
    /// * Two consecutive silent frames → an explicit `Release`, so a note
    ///   surviving a single-frame flicker can never get stuck.
    /// * Same key as last frame → no events; the note keeps sounding.
    pub fn process(&mut self, label: GestureLabel, table: &NoteTable) -> Vec<NoteEvent> {
        let key = table.key_of(score_of(label));
        let mut events = Vec::new();

        if key != self.previous_key.as_deref() {
            if let Some(pitch) = key {
                events.push(NoteEvent::Release);
                events.push(NoteEvent::Attack {
                    pitch: pitch.to_string(),
                    delay: ATTACK_DELAY,
                });
            }
        }

        if key.is_none() && self.previous_key.is_none() {
            events.push(NoteEvent::Release);
        }

        self.previous_key = key.map(str::to_string);
        events
    }

    /// End the session: forced `Release` if a note was still sounding.
    ///
    /// The frame source stopping mid-note would otherwise leave it sounding
    /// forever; callers invoke this once when the stream ends.
    pub fn finish(&mut self) -> Option<NoteEvent> {
        self.previous_key.take().map(|_| NoteEvent::Release)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Pitch names → MIDI note numbers
// ════════════════════════════════════════════════════════════════════════════

/// MIDI note number for a scientific-pitch-notation name: letter A–G, an
/// optional `#` or `b`, then an octave (possibly negative).  C4 = 60,
/// C-1 = 0.  `None` for malformed names or notes outside 0–127.
pub fn midi_note_number(name: &str) -> Option<u8> {
    let mut chars = name.chars();
    let letter = chars.next()?;
    let semitone: i32 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let rest: String = chars.collect();
    let (accidental, octave_str) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        _ => (0, rest.as_str()),
    };

    let octave: i32 = octave_str.parse().ok()?;
    let note = (octave + 1) * 12 + semitone + accidental;
    if (0..=127).contains(&note) {
        Some(note as u8)
    } else {
        None
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use dab_gesture::GestureLabel::*;

    fn attack(pitch: &str) -> NoteEvent {
        NoteEvent::Attack {
            pitch: pitch.to_string(),
            delay: ATTACK_DELAY,
        }
    }

    // ── score_of ──────────────────────────────────────────────────────────

    #[test]
    fn scores_cover_zero_to_six() {
        assert_eq!(score_of(NotDab), 0);
        assert_eq!(score_of(RightUpDab), 1);
        assert_eq!(score_of(RightSideDab), 2);
        assert_eq!(score_of(RightDownDab), 3);
        assert_eq!(score_of(LeftUpDab), 4);
        assert_eq!(score_of(LeftSideDab), 5);
        assert_eq!(score_of(LeftDownDab), 6);
    }

    // ── NoteTable ─────────────────────────────────────────────────────────

    #[test]
    fn score_zero_is_silence() {
        assert_eq!(NoteTable::default().key_of(0), None);
    }

    #[test]
    fn table_is_one_indexed_by_score() {
        let table = NoteTable::default();
        assert_eq!(table.key_of(1), Some("C4"));
        assert_eq!(table.key_of(6), Some("A4"));
    }

    #[test]
    fn table_slots_are_settable() {
        let mut table = NoteTable::default();
        table.set(2, "Eb5");
        assert_eq!(table.key_of(2), Some("Eb5"));
        assert_eq!(table.key_of(1), Some("C4"));
    }

    #[test]
    #[should_panic]
    fn score_above_six_is_unreachable() {
        NoteTable::default().key_of(7);
    }

    // ── NoteTrigger ───────────────────────────────────────────────────────

    #[test]
    fn new_key_releases_then_attacks() {
        let table = NoteTable::default();
        let mut trigger = NoteTrigger::new();
        let events = trigger.process(RightSideDab, &table);
        assert_eq!(events, vec![NoteEvent::Release, attack("D4")]);
        assert_eq!(trigger.previous_key(), Some("D4"));
    }

    #[test]
    fn held_pose_emits_nothing() {
        let table = NoteTable::default();
        let mut trigger = NoteTrigger::new();
        trigger.process(RightSideDab, &table);
        assert!(trigger.process(RightSideDab, &table).is_empty());
        assert_eq!(trigger.previous_key(), Some("D4"));
    }

    #[test]
    fn switching_poses_switches_notes() {
        let table = NoteTable::default();
        let mut trigger = NoteTrigger::new();
        trigger.process(RightSideDab, &table);
        let events = trigger.process(LeftDownDab, &table);
        assert_eq!(events, vec![NoteEvent::Release, attack("A4")]);
    }

    #[test]
    fn first_silent_frame_after_note_is_debounced() {
        let table = NoteTable::default();
        let mut trigger = NoteTrigger::new();
        trigger.process(RightSideDab, &table);
        // One flickered NotDab frame: the note survives.
        assert!(trigger.process(NotDab, &table).is_empty());
        // A second silent frame confirms the silence and releases.
        assert_eq!(trigger.process(NotDab, &table), vec![NoteEvent::Release]);
        assert_eq!(trigger.previous_key(), None);
    }

    #[test]
    fn flicker_back_to_same_pose_does_not_reattack() {
        let table = NoteTable::default();
        let mut trigger = NoteTrigger::new();
        trigger.process(RightSideDab, &table);
        trigger.process(NotDab, &table);
        // The key changed None → D4, so the note is re-attacked; the
        // preceding release keeps it monophonic.
        let events = trigger.process(RightSideDab, &table);
        assert_eq!(events, vec![NoteEvent::Release, attack("D4")]);
    }

    #[test]
    fn silence_releases_even_before_any_attack() {
        let table = NoteTable::default();
        let mut trigger = NoteTrigger::new();
        // First-ever frames, never a note: each consecutive silent pair
        // still releases, guarding against externally stuck notes.
        assert_eq!(trigger.process(NotDab, &table), vec![NoteEvent::Release]);
        assert_eq!(trigger.process(NotDab, &table), vec![NoteEvent::Release]);
    }

    #[test]
    fn attacks_never_outnumber_releases() {
        let table = NoteTable::default();
        let mut trigger = NoteTrigger::new();
        let sequence = [
            RightUpDab, RightUpDab, NotDab, RightSideDab, LeftDownDab,
            NotDab, NotDab, LeftUpDab, NotDab, LeftUpDab, LeftSideDab,
            NotDab, NotDab, NotDab, RightDownDab,
        ];
        let mut attacks = 0usize;
        let mut releases = 0usize;
        for label in sequence {
            for event in trigger.process(label, &table) {
                match event {
                    NoteEvent::Attack { .. } => attacks += 1,
                    NoteEvent::Release => releases += 1,
                }
                assert!(attacks <= releases);
            }
        }
    }

    #[test]
    fn finish_releases_a_sounding_note_once() {
        let table = NoteTable::default();
        let mut trigger = NoteTrigger::new();
        trigger.process(LeftSideDab, &table);
        assert_eq!(trigger.finish(), Some(NoteEvent::Release));
        assert_eq!(trigger.previous_key(), None);
        assert_eq!(trigger.finish(), None);
    }

    #[test]
    fn finish_on_silence_is_quiet() {
        let mut trigger = NoteTrigger::new();
        assert_eq!(trigger.finish(), None);
    }

    #[test]
    fn attack_delay_is_fixed() {
        let table = NoteTable::default();
        let mut trigger = NoteTrigger::new();
        for label in [RightUpDab, LeftDownDab] {
            for event in trigger.process(label, &table) {
                if let NoteEvent::Attack { delay, .. } = event {
                    assert_eq!(delay, Duration::from_millis(50));
                }
            }
        }
    }

    // ── midi_note_number ──────────────────────────────────────────────────

    #[test]
    fn note_numbers_for_naturals() {
        assert_eq!(midi_note_number("C4"), Some(60));
        assert_eq!(midi_note_number("A4"), Some(69));
        assert_eq!(midi_note_number("B4"), Some(71));
        assert_eq!(midi_note_number("C-1"), Some(0));
    }

    #[test]
    fn note_numbers_for_accidentals() {
        assert_eq!(midi_note_number("Eb5"), Some(75));
        assert_eq!(midi_note_number("F#3"), Some(54));
    }

    #[test]
    fn note_numbers_reject_garbage() {
        assert_eq!(midi_note_number(""), None);
        assert_eq!(midi_note_number("H4"), None);
        assert_eq!(midi_note_number("C"), None);
        assert_eq!(midi_note_number("A9"), None); // 129 > 127
    }

    #[test]
    fn default_table_notes_all_resolve() {
        let table = NoteTable::default();
        for score in 1..=6 {
            let name = table.key_of(score).unwrap();
            assert!(midi_note_number(name).is_some());
        }
    }
}
