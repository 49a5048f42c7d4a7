//! Top-level session loop.
//!
//! `AppState` owns the `NoteTrigger` for one performance session and the
//! handle to the MIDI player; it processes one [`FrameEvent`] at a time,
//! synchronously, in source order.

use dab_gesture::{classify, GestureLabel};
use dab_trigger::{score_of, NoteTable, NoteTrigger};

use crate::player::Player;
use crate::source::{spawn_frame_source, FrameEvent, FrameSource};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for one performance session.
pub struct AppConfig {
    /// The six score-indexed pitches.
    pub note_table: NoteTable,
    /// MIDI program 0–127.
    pub instrument: u8,
    /// MIDI channel 0–15.
    pub channel: u8,
    /// Note velocity 0–127.
    pub velocity: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            note_table: NoteTable::default(),
            instrument: 0, // acoustic grand piano
            channel: 0,
            velocity: 100,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    table: NoteTable,
    trigger: NoteTrigger,
    player: Player,
    last_label: GestureLabel,
    frames: usize,
    pub status: String,
}

impl AppState {
    pub fn new(cfg: AppConfig) -> Self {
        let player = Player::spawn(cfg.instrument, cfg.channel, cfg.velocity);
        AppState {
            table: cfg.note_table,
            trigger: NoteTrigger::new(),
            player,
            last_label: GestureLabel::NotDab,
            frames: 0,
            status: "Ready — waiting for frames".to_string(),
        }
    }

    /// Process one frame event to completion.  Returns `false` once the
    /// source has stopped and no more frames should be handled.
    ///
    /// A lost pose is classified as "not a dab": after the trigger's
    /// two-frame debounce this forces silence, so a note can never be left
    /// sounding while the performer is out of shot.
    pub fn handle_frame(&mut self, event: FrameEvent) -> bool {
        let label = match event {
            FrameEvent::Frame(frame) => classify(&frame),
            FrameEvent::Lost => GestureLabel::NotDab,
            FrameEvent::Stop => return false,
        };
        self.frames += 1;

        for note_event in self.trigger.process(label, &self.table) {
            self.player.send(note_event);
        }

        if label != self.last_label {
            self.last_label = label;
            self.status = match self.trigger.previous_key() {
                Some(key) => format!(
                    "{} — score {} — ♪ {}",
                    label.name(),
                    score_of(label),
                    key
                ),
                None => format!("{} — silence", label.name()),
            };
        }
        true
    }

    /// End the session: force a final release if a note is still sounding,
    /// then shut the player down.  Safe to call twice.
    pub fn shutdown(&mut self) {
        if let Some(event) = self.trigger.finish() {
            self.player.send(event);
        }
        self.player.quit();
    }

    /// The key tracked from the most recent frame, if any.  `None` one
    /// frame before the debounced release actually fires.
    pub fn sounding(&self) -> Option<&str> {
        self.trigger.previous_key()
    }

    /// Frames processed so far (lost frames included, `Stop` excluded).
    pub fn frames(&self) -> usize {
        self.frames
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main session loop
// ════════════════════════════════════════════════════════════════════════════

/// Run a full session: spawn the frame source, process every frame in
/// order, print a status line whenever the gesture changes, and release
/// everything when the source stops.
pub fn run<S: FrameSource>(cfg: AppConfig, source: S) {
    let frame_rx = spawn_frame_source(source);
    let mut app = AppState::new(cfg);
    let mut last_status = String::new();

    for event in frame_rx {
        if !app.handle_frame(event) {
            break;
        }
        if app.status != last_status {
            println!("  {}", app.status);
            last_status = app.status.clone();
        }
    }

    // Reached on Stop or when the source hung up without one.
    app.shutdown();
    println!("  Session over — {} frames processed.", app.frames());
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
