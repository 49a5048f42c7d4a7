//! dab_jam — interactive entry point.

use dab_jam::app::{run, AppConfig};
use dab_jam::source::{FeedSource, ScriptSource};
use dab_trigger::{midi_note_number, NoteTable};
use std::io::{self, Write};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Dab Jam — Pose-Driven Monophonic MIDI Trigger         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    let (cfg, source) = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: C4–A4, piano, scripted demo performance\n");
        (AppConfig::default(), pick_demo_source())
    } else {
        configure_interactively()
    };

    println!();
    println!("  Dab to play. Six poses, six notes; hold still for silence.");
    println!();

    run_with(cfg, source);
}

// Monomorphize run() per source without boxing in app code.
enum SourceChoice {
    Script(ScriptSource),
    Feed(FeedSource),
}

fn run_with(cfg: AppConfig, source: SourceChoice) {
    match source {
        SourceChoice::Script(s) => run(cfg, s),
        SourceChoice::Feed(s) => run(cfg, s),
    }
}

fn pick_demo_source() -> SourceChoice {
    SourceChoice::Script(ScriptSource::demo())
}

fn configure_interactively() -> (AppConfig, SourceChoice) {
    let note_table = pick_note_table();
    let instrument = pick_instrument();
    let velocity: u8 = read_line("  Velocity 0–127 (default 100): ")
        .trim().parse().unwrap_or(100).min(127);
    let source = pick_source();

    (
        AppConfig {
            note_table,
            instrument,
            channel: 0,
            velocity,
        },
        source,
    )
}

fn pick_note_table() -> NoteTable {
    println!("  Note table (scores 1–6; defaults C4 D4 E4 F4 G4 A4):");
    let mut table = NoteTable::default();
    for score in 1..=6u8 {
        let default = table.key_of(score).unwrap_or("?").to_string();
        loop {
            let entry = read_line(&format!(
                "    Score {} pitch (default {}): ",
                score, default
            ));
            let entry = entry.trim();
            if entry.is_empty() {
                break;
            }
            if midi_note_number(entry).is_some() {
                table.set(score, entry);
                break;
            }
            println!("    ⚠  Not a pitch name (try C4, Eb5, F#3).");
        }
    }
    table
}

fn pick_instrument() -> u8 {
    println!("  Instrument (GM program 0–127):");
    println!("    0=Grand Piano  11=Vibraphone  40=Violin  42=Cello");
    println!("    56=Trumpet  73=Flute  80=Lead Square  88=Pad New Age");
    read_line("  Program (default 0): ").trim().parse::<u8>().unwrap_or(0).min(127)
}

fn pick_source() -> SourceChoice {
    println!("  Frame source: 1=Scripted demo  2=Landmark feed on stdin");
    match read_line("  Choice (default 1): ").trim() {
        "2" => SourceChoice::Feed(FeedSource),
        _ => SourceChoice::Script(ScriptSource::demo()),
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}
