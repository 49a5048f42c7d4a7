//! Frame delivery — scripted synthetic poses or a live landmark feed.
//!
//! The public interface is [`FrameEvent`] delivered over a `mpsc` channel.
//! Consumers don't need to know whether frames came from a real pose
//! pipeline or the built-in script.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use dab_gesture::{Direction, Side};
use pose_frame::{LandmarkFrame, FLAT_STRIDE, MEDIAPIPE_LANDMARKS};

use crate::poses;

// ════════════════════════════════════════════════════════════════════════════
// FrameEvent
// ════════════════════════════════════════════════════════════════════════════

/// One frame's worth of input from the pose pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum FrameEvent {
    /// A complete-enough landmark frame, ready to classify.
    Frame(LandmarkFrame),
    /// The pose dropped out this frame (performer out of shot, occlusion).
    Lost,
    /// The pipeline has stopped; no more frames will arrive.
    Stop,
}

// ════════════════════════════════════════════════════════════════════════════
// FrameSource trait — unified interface for script and live feed
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`FrameEvent`]s over a channel.
pub trait FrameSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<FrameEvent>);
}

/// Spawn a frame source on its own thread and return the receiving end.
pub fn spawn_frame_source<S: FrameSource>(source: S) -> Receiver<FrameEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptSource — scripted synthetic performance (always available)
// ════════════════════════════════════════════════════════════════════════════

/// A pose held for a number of consecutive frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScriptPose {
    Dab(Side, Direction),
    Idle,
    Lost,
}

/// One step of a scripted performance.
#[derive(Clone, Copy, Debug)]
pub struct ScriptStep {
    pub pose: ScriptPose,
    pub frames: u32,
}

impl ScriptStep {
    pub fn new(pose: ScriptPose, frames: u32) -> ScriptStep {
        ScriptStep { pose, frames }
    }
}

/// Frame source that performs a fixed script of synthetic poses at a fixed
/// frame cadence, then stops.  Stands in for camera + pose model.
pub struct ScriptSource {
    pub steps: Vec<ScriptStep>,
    pub frame_period: Duration,
}

impl ScriptSource {
    /// A little demo performance: walk all six dabs with idle gaps, one
    /// single-frame flicker (swallowed by the debounce) and one longer
    /// pose dropout (forces silence).
    pub fn demo() -> ScriptSource {
        use ScriptPose::*;
        let steps = vec![
            ScriptStep::new(Idle, 10),
            ScriptStep::new(Dab(Side::Right, Direction::Up), 20),
            ScriptStep::new(Dab(Side::Right, Direction::Side), 20),
            ScriptStep::new(Lost, 1), // one dropped frame — note survives
            ScriptStep::new(Dab(Side::Right, Direction::Side), 10),
            ScriptStep::new(Dab(Side::Right, Direction::Down), 20),
            ScriptStep::new(Idle, 10),
            ScriptStep::new(Dab(Side::Left, Direction::Up), 20),
            ScriptStep::new(Dab(Side::Left, Direction::Side), 20),
            ScriptStep::new(Dab(Side::Left, Direction::Down), 20),
            ScriptStep::new(Lost, 10), // performer walks off — silence
        ];
        ScriptSource {
            steps,
            frame_period: Duration::from_millis(33), // ~30 fps
        }
    }
}

impl FrameSource for ScriptSource {
    fn run(self: Box<Self>, tx: Sender<FrameEvent>) {
        for step in &self.steps {
            for _ in 0..step.frames {
                let event = match step.pose {
                    ScriptPose::Dab(side, direction) => {
                        FrameEvent::Frame(poses::dab_frame(side, direction))
                    }
                    ScriptPose::Idle => FrameEvent::Frame(poses::idle_frame()),
                    ScriptPose::Lost => FrameEvent::Lost,
                };
                if tx.send(event).is_err() {
                    return;
                }
                thread::sleep(self.frame_period);
            }
        }
        let _ = tx.send(FrameEvent::Stop);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FeedSource — live landmarks on stdin
// ════════════════════════════════════════════════════════════════════════════

/// Frame source reading a real pose pipeline's output from stdin.
///
/// One line per camera frame: 33 × 4 whitespace-separated floats
/// (`x y z visibility` per MediaPipe landmark), or the word `lost` when
/// the model found no pose.  Malformed lines count as lost frames —
/// the trigger then degrades to silence instead of playing garbage.
/// EOF stops the session.
pub struct FeedSource;

impl FrameSource for FeedSource {
    fn run(self: Box<Self>, tx: Sender<FrameEvent>) {
        use std::io::BufRead;

        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(_) => break,
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let event = if line.eq_ignore_ascii_case("lost") {
                FrameEvent::Lost
            } else {
                match parse_flat_line(line) {
                    Ok(frame) => FrameEvent::Frame(frame),
                    Err(e) => {
                        eprintln!("[feed] bad landmark line ({}) — treating as lost", e);
                        FrameEvent::Lost
                    }
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        }
        let _ = tx.send(FrameEvent::Stop);
    }
}

/// Parse one feed line of `MEDIAPIPE_LANDMARKS × FLAT_STRIDE` floats.
fn parse_flat_line(line: &str) -> Result<LandmarkFrame, String> {
    let values: Vec<f64> = line
        .split_whitespace()
        .map(|tok| tok.parse::<f64>().map_err(|_| format!("not a number: {:?}", tok)))
        .collect::<Result<_, _>>()?;
    if values.len() != MEDIAPIPE_LANDMARKS * FLAT_STRIDE {
        return Err(format!(
            "expected {} values, got {}",
            MEDIAPIPE_LANDMARKS * FLAT_STRIDE,
            values.len()
        ));
    }
    LandmarkFrame::from_flat(&values)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
