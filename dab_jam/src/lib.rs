//! # dab_jam
//!
//! The performance application: a per-frame stream of body-joint landmarks
//! drives a dab pose classifier, whose gesture labels drive a monophonic
//! note trigger, whose attack/release commands play over real-time MIDI.
//!
//! ```text
//! frame source ──▶ LandmarkFrame ──▶ classify ──▶ GestureLabel
//!                                                      │
//!                              NoteTable ──▶ NoteTrigger ──▶ NoteEvent
//!                                                      │
//!                                              MIDI player thread
//! ```
//!
//! ## Frame sources
//!
//! * [`source::ScriptSource`] — scripted performance of synthetic poses at a
//!   fixed frame cadence; the default, no camera or pose model needed.
//! * [`source::FeedSource`] — reads flat 33×4 landmark lines from stdin, the
//!   adapter for a real external pose pipeline (one line per camera frame,
//!   or the word `lost` when the pose drops out).
//!
//! Each frame is processed synchronously to completion before the next is
//! accepted; the core never queues frames.  A lost pose is treated as
//! "not a dab", so the trigger's two-frame debounce forces silence instead
//! of leaving a note stuck.

pub mod app;
pub mod player;
pub mod poses;
pub mod source;
