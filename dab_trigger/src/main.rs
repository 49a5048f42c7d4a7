//! Walk a canned gesture sequence through the note trigger and print the
//! resulting event stream.

use dab_gesture::GestureLabel;
use dab_trigger::{midi_note_number, score_of, NoteEvent, NoteTable, NoteTrigger};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Dab Trigger — gesture stream → note event demo        ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let table = NoteTable::default();
    let mut trigger = NoteTrigger::new();

    // A short performance: hold each pose a few frames, with a one-frame
    // classification flicker in the middle to show the debounce.
    let performance = [
        GestureLabel::RightUpDab,
        GestureLabel::RightUpDab,
        GestureLabel::RightUpDab,
        GestureLabel::RightSideDab,
        GestureLabel::RightSideDab,
        GestureLabel::NotDab, // single-frame flicker — note survives
        GestureLabel::RightSideDab,
        GestureLabel::LeftDownDab,
        GestureLabel::LeftDownDab,
        GestureLabel::NotDab,
        GestureLabel::NotDab, // second silent frame — note released
    ];

    println!("  frame  label             score  key   events");
    println!("  ─────  ────────────────  ─────  ────  ──────────────────────");

    for (i, label) in performance.into_iter().enumerate() {
        let score = score_of(label);
        let key = table.key_of(score).unwrap_or("—").to_string();
        let events = trigger.process(label, &table);
        let described: Vec<String> = events.iter().map(describe).collect();
        println!(
            "  {:>5}  {:<16}  {:>5}  {:<4}  {}",
            i,
            label.name(),
            score,
            key,
            if described.is_empty() { "(held)".to_string() } else { described.join(", ") },
        );
    }

    if let Some(event) = trigger.finish() {
        println!("  final  {:<16}  {:>5}  {:<4}  {}", "(end of stream)", "", "", describe(&event));
    }
    println!();
}

fn describe(event: &NoteEvent) -> String {
    match event {
        NoteEvent::Attack { pitch, delay } => format!(
            "attack {} (midi {}) after {:?}",
            pitch,
            midi_note_number(pitch).map(|n| n.to_string()).unwrap_or_else(|| "?".to_string()),
            delay,
        ),
        NoteEvent::Release => "release".to_string(),
    }
}
