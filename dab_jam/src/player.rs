//! Real-time MIDI playback thread.
//!
//! [`NoteEvent`]s from the trigger are forwarded over a channel to a
//! dedicated thread that owns the MIDI connection.  The thread tracks the
//! one note allowed to sound and turns it off before any new attack, so
//! the output stays monophonic even if a stray event slips through.

use std::sync::mpsc::{self, Sender};
use std::thread;

use dab_trigger::{midi_note_number, NoteEvent};

// ════════════════════════════════════════════════════════════════════════════
// MidiOut — abstraction over midir / null (for testing and portless hosts)
// ════════════════════════════════════════════════════════════════════════════

trait MidiOut: Send {
    fn program_change(&mut self, channel: u8, program: u8);
    fn note_on(&mut self, channel: u8, note: u8, velocity: u8);
    fn note_off(&mut self, channel: u8, note: u8);
}

// ── midir backend ─────────────────────────────────────────────────────────

struct MidirOut {
    conn: midir::MidiOutputConnection,
}

impl MidiOut for MidirOut {
    fn program_change(&mut self, channel: u8, program: u8) {
        let _ = self.conn.send(&[0xC0 | (channel & 0x0F), program]);
    }
    fn note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        let _ = self.conn.send(&[0x90 | (channel & 0x0F), note, velocity]);
    }
    fn note_off(&mut self, channel: u8, note: u8) {
        let _ = self.conn.send(&[0x80 | (channel & 0x0F), note, 0]);
    }
}

// ── null backend (used when no MIDI port is available) ────────────────────

struct NullOut;
impl MidiOut for NullOut {
    fn program_change(&mut self, _ch: u8, _p: u8) {}
    fn note_on(&mut self, _ch: u8, _n: u8, _v: u8) {}
    fn note_off(&mut self, _ch: u8, _n: u8) {}
}

// ════════════════════════════════════════════════════════════════════════════
// open_midi_output — enumerate ports and pick first available
// ════════════════════════════════════════════════════════════════════════════

/// Try to open the first available MIDI output port.
/// Falls back to `NullOut` with a warning if none found.
fn open_midi_output() -> Box<dyn MidiOut> {
    let midi_out = match midir::MidiOutput::new("dab_jam_player") {
        Ok(m) => m,
        Err(e) => {
            eprintln!("[player] MIDI init error: {} — using null output", e);
            return Box::new(NullOut);
        }
    };

    let ports = midi_out.ports();
    if ports.is_empty() {
        eprintln!("[player] No MIDI output ports found — using null output.");
        eprintln!("[player] Install a MIDI synthesiser such as:");
        eprintln!("         • macOS: built-in CoreMIDI (always available)");
        eprintln!("         • Linux: `timidity -iA` or `fluidsynth`");
        eprintln!("         • Windows: built-in GS Wavetable Synth");
        return Box::new(NullOut);
    }

    // Prefer a softsynth if visible
    let port_idx = ports
        .iter()
        .enumerate()
        .find(|(_, p)| {
            midi_out
                .port_name(p)
                .map(|n| {
                    let n = n.to_lowercase();
                    n.contains("fluid")
                        || n.contains("timidity")
                        || n.contains("microsoft")
                        || n.contains("gm")
                        || n.contains("synth")
                })
                .unwrap_or(false)
        })
        .map(|(i, _)| i)
        .unwrap_or(0);

    let port = &ports[port_idx];
    let name = midi_out
        .port_name(port)
        .unwrap_or_else(|_| "Unknown".to_string());
    eprintln!("[player] Opening MIDI port: {}", name);

    match midi_out.connect(port, "dab-play") {
        Ok(conn) => Box::new(MidirOut { conn }),
        Err(e) => {
            eprintln!("[player] Failed to connect: {} — using null output", e);
            Box::new(NullOut)
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Player — the playback thread
// ════════════════════════════════════════════════════════════════════════════

pub enum PlayerCommand {
    /// Forward one note event from the trigger.
    Event(NoteEvent),
    /// Change instrument (MIDI program 0–127).
    SetInstrument(u8),
    /// Terminate the thread, silencing any sounding note.
    Quit,
}

/// Handle to the MIDI playback thread.
pub struct Player {
    cmd_tx: Sender<PlayerCommand>,
}

impl Player {
    /// Spawn the playback thread with the given program, channel and
    /// velocity.  Opens the first available MIDI port, or a silent null
    /// output when none exists.
    pub fn spawn(instrument: u8, channel: u8, velocity: u8) -> Player {
        let (cmd_tx, cmd_rx) = mpsc::channel::<PlayerCommand>();

        thread::spawn(move || {
            let mut midi = open_midi_output();
            let mut sounding: Option<u8> = None;

            midi.program_change(channel, instrument.min(127));

            for cmd in cmd_rx {
                match cmd {
                    PlayerCommand::Event(NoteEvent::Release) => {
                        if let Some(note) = sounding.take() {
                            midi.note_off(channel, note);
                        }
                    }
                    PlayerCommand::Event(NoteEvent::Attack { pitch, delay }) => {
                        let note = match midi_note_number(&pitch) {
                            Some(n) => n,
                            None => {
                                eprintln!("[player] unknown pitch {:?} — skipping", pitch);
                                continue;
                            }
                        };
                        // The trigger schedules attacks slightly late so
                        // they can never race the release before them.
                        thread::sleep(delay);
                        if let Some(old) = sounding.take() {
                            midi.note_off(channel, old);
                        }
                        midi.note_on(channel, note, velocity.min(127));
                        sounding = Some(note);
                    }
                    PlayerCommand::SetInstrument(program) => {
                        midi.program_change(channel, program.min(127));
                    }
                    PlayerCommand::Quit => break,
                }
            }

            // Never leave a note hanging, whether we quit or the sender
            // side disconnected.
            if let Some(note) = sounding {
                midi.note_off(channel, note);
            }
        });

        Player { cmd_tx }
    }

    /// Forward one note event to the playback thread.
    pub fn send(&self, event: NoteEvent) {
        let _ = self.cmd_tx.send(PlayerCommand::Event(event));
    }

    pub fn set_instrument(&self, program: u8) {
        let _ = self.cmd_tx.send(PlayerCommand::SetInstrument(program));
    }

    pub fn quit(&self) {
        let _ = self.cmd_tx.send(PlayerCommand::Quit);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
