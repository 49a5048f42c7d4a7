//! Synthetic landmark frames for every dab variant.
//!
//! Used by the scripted frame source and as whole-pipeline fixtures.  The
//! three canonical poses are laid out for the right/left side they come
//! easiest on; the other side is the mirror image, exactly as the
//! classifier's left/right sign flip expects.

use dab_gesture::{Direction, Side};
use pose_frame::{Joint, Landmark, LandmarkFrame};

/// Landmark at `origin + len · (cos deg, sin deg)` in y-down image
/// coordinates; negative degrees point toward the top of the image.
fn reach(origin: (f64, f64), deg: f64, len: f64) -> Landmark {
    let rad = deg.to_radians();
    Landmark::at(origin.0 + len * rad.cos(), origin.1 + len * rad.sin())
}

fn frame(
    ls: Landmark, le: Landmark, lw: Landmark,
    rs: Landmark, re: Landmark, rw: Landmark,
) -> LandmarkFrame {
    LandmarkFrame::new()
        .with(Joint::LeftShoulder, ls)
        .with(Joint::LeftElbow, le)
        .with(Joint::LeftWrist, lw)
        .with(Joint::RightShoulder, rs)
        .with(Joint::RightElbow, re)
        .with(Joint::RightWrist, rw)
}

/// Right side dab: right elbow bent to 40°, left arm straight at 175°,
/// all four segments pointing side.
fn right_side_dab() -> LandmarkFrame {
    let le = Landmark::at(0.20, 0.50);
    let re = Landmark::at(0.60, 0.50);
    frame(
        reach((le.x, le.y), 0.0, 0.1),
        le,
        reach((le.x, le.y), 175.0, 0.1),
        reach((re.x, re.y), -25.0, 0.1),
        re,
        reach((re.x, re.y), 15.0, 0.1),
    )
}

/// Right up dab: right elbow bent to 60°, left arm straight, all four
/// segments voting up.
fn right_up_dab() -> LandmarkFrame {
    let ls = Landmark::at(0.30, 0.50);
    let le = reach((ls.x, ls.y), 120.0, 0.1);
    let re = Landmark::at(0.60, 0.50);
    frame(
        ls,
        le,
        reach((le.x, le.y), 120.0, 0.1),
        reach((re.x, re.y), -35.0, 0.1),
        re,
        reach((re.x, re.y), 25.0, 0.1),
    )
}

/// Left down dab: left elbow bent to 50°, right arm straight, all four
/// segments voting down.
fn left_down_dab() -> LandmarkFrame {
    let ls = Landmark::at(0.40, 0.60);
    let le = reach((ls.x, ls.y), -30.0, 0.1);
    let rs = Landmark::at(0.70, 0.60);
    let re = reach((rs.x, rs.y), -60.0, 0.1);
    frame(
        ls,
        le,
        reach((le.x, le.y), -160.0, 0.1),
        rs,
        re,
        reach((re.x, re.y), -60.0, 0.1),
    )
}

/// Mirror a frame across the vertical image axis: `x → 1 − x`, with left
/// and right joints swapped.  Turns any right-side dab into the left-side
/// dab of the same direction, and vice versa.
pub fn mirror(frame: &LandmarkFrame) -> LandmarkFrame {
    const PAIRS: [(Joint, Joint); 3] = [
        (Joint::LeftShoulder, Joint::RightShoulder),
        (Joint::LeftElbow, Joint::RightElbow),
        (Joint::LeftWrist, Joint::RightWrist),
    ];

    let mut out = LandmarkFrame::new();
    for (left, right) in PAIRS {
        if let Some(lm) = frame.get(left) {
            out.set(right, Landmark { x: 1.0 - lm.x, ..*lm });
        }
        if let Some(lm) = frame.get(right) {
            out.set(left, Landmark { x: 1.0 - lm.x, ..*lm });
        }
    }
    out
}

/// Canonical synthetic frame for one of the six dab variants.
pub fn dab_frame(side: Side, direction: Direction) -> LandmarkFrame {
    match (side, direction) {
        (Side::Right, Direction::Up)   => right_up_dab(),
        (Side::Right, Direction::Side) => right_side_dab(),
        (Side::Right, Direction::Down) => mirror(&left_down_dab()),
        (Side::Left,  Direction::Up)   => mirror(&right_up_dab()),
        (Side::Left,  Direction::Side) => mirror(&right_side_dab()),
        (Side::Left,  Direction::Down) => left_down_dab(),
    }
}

/// Both arms straight and apart: complete frame, but not a dab.
pub fn idle_frame() -> LandmarkFrame {
    frame(
        Landmark::at(0.30, 0.50),
        Landmark::at(0.20, 0.50),
        Landmark::at(0.10, 0.50),
        Landmark::at(0.70, 0.50),
        Landmark::at(0.80, 0.50),
        Landmark::at(0.90, 0.50),
    )
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
