//! # dab_gesture
//!
//! Geometry-based classification of the **dab** pose from one
//! [`LandmarkFrame`], into six directional sub-variants:
//!
//! | Label | Bent arm | Limb direction |
//! |---|---|---|
//! | `LeftUpDab`    | Left  | Up   |
//! | `LeftSideDab`  | Left  | Side |
//! | `LeftDownDab`  | Left  | Down |
//! | `RightUpDab`   | Right | Up   |
//! | `RightSideDab` | Right | Side |
//! | `RightDownDab` | Right | Down |
//! | `NotDab`       | —     | —    |
//!
//! Classification runs in two stages:
//!
//! 1. **Elbow gate** — one elbow bent sharply (`< 65°`) while the other arm
//!    is nearly straight (`> 165°`) picks the candidate side.  Both
//!    inequalities are strict.
//! 2. **Limb-direction vote** — the four arm segments each vote Up, Side or
//!    Down from their image-plane direction; only a unanimous vote yields a
//!    dab sub-variant, anything else is `NotDab`.
//!
//! The split makes the classifier robust to single-joint jitter: one noisy
//! reading can cancel the fine-grained sub-type but not flip the coarse
//! side detection.
//!
//! [`classify`] is a total pure function.  Pose noise is routine, so every
//! degenerate input — missing joints, zero-length limb vectors — fails
//! closed to [`GestureLabel::NotDab`] instead of raising an error.

use pose_frame::{Joint, Landmark, LandmarkFrame};

// ════════════════════════════════════════════════════════════════════════════
// Thresholds
// ════════════════════════════════════════════════════════════════════════════

/// An elbow angle strictly below this counts as sharply bent.
pub const ELBOW_BENT_MAX_DEG: f64 = 65.0;

/// An elbow angle strictly above this counts as a straight arm.
pub const ELBOW_STRAIGHT_MIN_DEG: f64 = 165.0;

/// A segment whose vertical angle is strictly below this points "side".
pub const SIDE_BELOW_DEG: f64 = 30.0;

/// A segment whose vertical angle is strictly above this points "side"
/// the other way.
pub const SIDE_ABOVE_DEG: f64 = 160.0;

// ════════════════════════════════════════════════════════════════════════════
// Geometry primitives
// ════════════════════════════════════════════════════════════════════════════

/// Round to one decimal place, matching the resolution the thresholds are
/// specified at.  All angle comparisons happen after this rounding.
fn round1(deg: f64) -> f64 {
    (deg * 10.0).round() / 10.0
}

/// Angle in degrees at `b` between the limb vectors `a−b` and `c−b`,
/// measured in the image plane (z is discarded) and rounded to one decimal.
///
/// Returns `None` when either vector has zero magnitude — two coincident
/// joints leave the angle undefined, and the caller must treat the frame
/// as not-a-dab rather than guess.
pub fn angle3(a: &Landmark, b: &Landmark, c: &Landmark) -> Option<f64> {
    let v1 = (a.x - b.x, a.y - b.y);
    let v2 = (c.x - b.x, c.y - b.y);

    let m1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let m2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if m1 == 0.0 || m2 == 0.0 {
        return None;
    }

    let dot = (v1.0 / m1) * (v2.0 / m2) + (v1.1 / m1) * (v2.1 / m2);
    Some(round1(dot.clamp(-1.0, 1.0).acos().to_degrees()))
}

/// Vertical angle of a direction vector against the horizontal axis:
/// `degrees(acos(dx / |v|))`, in `[0, 180]`, rounded to one decimal.
/// `0°` points image-right, `180°` image-left, `90°` straight up or down.
///
/// `None` for the zero vector.
pub fn vertical_angle(dx: f64, dy: f64) -> Option<f64> {
    let mag = (dx * dx + dy * dy).sqrt();
    if mag == 0.0 {
        return None;
    }
    Some(round1((dx / mag).clamp(-1.0, 1.0).acos().to_degrees()))
}

// ════════════════════════════════════════════════════════════════════════════
// Side / Direction / GestureLabel
// ════════════════════════════════════════════════════════════════════════════

/// Which arm is the sharply bent one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Direction of a dab, or of a single limb segment's vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Side,
    Down,
}

/// Discrete gesture classification for one frame.  Exactly one label per
/// classified frame; `NotDab` is both a valid gesture and the fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureLabel {
    NotDab,
    LeftUpDab,
    LeftSideDab,
    LeftDownDab,
    RightUpDab,
    RightSideDab,
    RightDownDab,
}

impl GestureLabel {
    /// The bent-arm side, `None` for `NotDab`.
    pub fn side(self) -> Option<Side> {
        match self {
            GestureLabel::NotDab => None,
            GestureLabel::LeftUpDab
            | GestureLabel::LeftSideDab
            | GestureLabel::LeftDownDab => Some(Side::Left),
            GestureLabel::RightUpDab
            | GestureLabel::RightSideDab
            | GestureLabel::RightDownDab => Some(Side::Right),
        }
    }

    /// The dab direction, `None` for `NotDab`.
    pub fn direction(self) -> Option<Direction> {
        match self {
            GestureLabel::NotDab => None,
            GestureLabel::LeftUpDab | GestureLabel::RightUpDab => Some(Direction::Up),
            GestureLabel::LeftSideDab | GestureLabel::RightSideDab => Some(Direction::Side),
            GestureLabel::LeftDownDab | GestureLabel::RightDownDab => Some(Direction::Down),
        }
    }

    /// Human-readable label name.
    pub fn name(self) -> &'static str {
        match self {
            GestureLabel::NotDab       => "not a dab",
            GestureLabel::LeftUpDab    => "left up dab",
            GestureLabel::LeftSideDab  => "left side dab",
            GestureLabel::LeftDownDab  => "left down dab",
            GestureLabel::RightUpDab   => "right up dab",
            GestureLabel::RightSideDab => "right side dab",
            GestureLabel::RightDownDab => "right down dab",
        }
    }
}

fn label_for(side: Side, direction: Direction) -> GestureLabel {
    match (side, direction) {
        (Side::Left,  Direction::Up)   => GestureLabel::LeftUpDab,
        (Side::Left,  Direction::Side) => GestureLabel::LeftSideDab,
        (Side::Left,  Direction::Down) => GestureLabel::LeftDownDab,
        (Side::Right, Direction::Up)   => GestureLabel::RightUpDab,
        (Side::Right, Direction::Side) => GestureLabel::RightSideDab,
        (Side::Right, Direction::Down) => GestureLabel::RightDownDab,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Elbow gate
// ════════════════════════════════════════════════════════════════════════════

/// Coarse dab gate over the two elbow angles (degrees, already rounded).
///
/// One arm must be bent strictly below [`ELBOW_BENT_MAX_DEG`] while the
/// other is strictly above [`ELBOW_STRAIGHT_MIN_DEG`]; the boundary values
/// themselves do not qualify.  Returns the bent side, or `None` when
/// neither gate fires.
pub fn dab_side(right_elbow_deg: f64, left_elbow_deg: f64) -> Option<Side> {
    if right_elbow_deg < ELBOW_BENT_MAX_DEG && left_elbow_deg > ELBOW_STRAIGHT_MIN_DEG {
        Some(Side::Right)
    } else if left_elbow_deg < ELBOW_BENT_MAX_DEG && right_elbow_deg > ELBOW_STRAIGHT_MIN_DEG {
        Some(Side::Left)
    } else {
        None
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Limb-direction vote
// ════════════════════════════════════════════════════════════════════════════

/// Direction vote of one limb segment running `start → end`.
///
/// The segment votes `Side` when its vertical angle leaves the
/// `[30°, 160°]` band.  Otherwise Up/Down comes from the endpoint y
/// comparison, with the sign flipped between body sides because the two
/// arms are mirror images in the image plane:
///
/// * right-side segments vote Up when `start.y > end.y`,
/// * left-side segments vote Up when `start.y < end.y`.
///
/// `None` for a zero-length segment.
pub fn segment_direction(side: Side, start: &Landmark, end: &Landmark) -> Option<Direction> {
    let angle = vertical_angle(end.x - start.x, end.y - start.y)?;
    if angle < SIDE_BELOW_DEG || angle > SIDE_ABOVE_DEG {
        return Some(Direction::Side);
    }
    let up = match side {
        Side::Right => start.y > end.y,
        Side::Left  => start.y < end.y,
    };
    Some(if up { Direction::Up } else { Direction::Down })
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify one landmark frame into a [`GestureLabel`].
///
/// Total and deterministic; fails closed to `NotDab` on incomplete frames
/// and degenerate geometry.
pub fn classify(frame: &LandmarkFrame) -> GestureLabel {
    let (ls, le, lw, rs, re, rw) = match (
        frame.get(Joint::LeftShoulder),
        frame.get(Joint::LeftElbow),
        frame.get(Joint::LeftWrist),
        frame.get(Joint::RightShoulder),
        frame.get(Joint::RightElbow),
        frame.get(Joint::RightWrist),
    ) {
        (Some(ls), Some(le), Some(lw), Some(rs), Some(re), Some(rw)) => {
            (ls, le, lw, rs, re, rw)
        }
        _ => return GestureLabel::NotDab,
    };

    // ── elbow gate ────────────────────────────────────────────────────────
    let (right_elbow, left_elbow) = match (angle3(rw, re, rs), angle3(ls, le, lw)) {
        (Some(r), Some(l)) => (r, l),
        _ => return GestureLabel::NotDab,
    };
    let side = match dab_side(right_elbow, left_elbow) {
        Some(s) => s,
        None => return GestureLabel::NotDab,
    };

    // ── four-segment vote ─────────────────────────────────────────────────
    let votes = match (
        segment_direction(Side::Left,  le, lw), // left forearm   elbow → wrist
        segment_direction(Side::Left,  ls, le), // left upper-arm shoulder → elbow
        segment_direction(Side::Right, rw, re), // right forearm  wrist → elbow
        segment_direction(Side::Right, re, rs), // right upper-arm elbow → shoulder
    ) {
        (Some(a), Some(b), Some(c), Some(d)) => [a, b, c, d],
        _ => return GestureLabel::NotDab,
    };

    // Only a unanimous vote yields a dab sub-variant.
    if votes[1..].iter().any(|v| *v != votes[0]) {
        return GestureLabel::NotDab;
    }

    label_for(side, votes[0])
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
