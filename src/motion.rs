//! Motion command grammar.
//!
//! Motion commands travel as plain strings (the payloads a collaborator drags
//! onto an action tab) and are parsed only when they are applied. Parsing
//! yields a [`MotionCmd`]; anything outside the grammar becomes
//! [`MotionCmd::Noop`], so [`apply`] is total.
//!
//! Patterns are tried in this order and the first match wins:
//!
//! | Command                   | Effect                        |
//! |---------------------------|-------------------------------|
//! | `Move Right <N>`          | `x += N` (N ≥ 0)              |
//! | `Move Forward`            | `y -= 20`                     |
//! | `Move Backward`           | `y += 20`                     |
//! | `Turn Right`              | `rotation += 90`              |
//! | `Turn Left`               | `rotation -= 90`              |
//! | `Turn <N> degrees`        | `rotation += N`               |
//! | `Go to X: <N>, Y: <M>`    | position set to `(N, M)`      |
//!
//! The numeric patterns search anywhere in the string, the four fixed
//! commands must match exactly. Numbers that do not fit in an `i32` turn the
//! command into a no-op.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::components::mapposition::MapPosition;

/// Vertical step of `Move Forward` / `Move Backward`.
pub const STEP: i32 = 20;
/// Angle of `Turn Right` / `Turn Left`.
pub const QUARTER_TURN: i32 = 90;

static MOVE_RIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Move Right (\d+)").expect("valid Move Right pattern"));
static TURN_DEGREES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Turn (-?\d+) degrees").expect("valid Turn pattern"));
static GO_TO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Go to X: (-?\d+), Y: (-?\d+)").expect("valid Go to pattern")
});

/// Position and rotation of a sprite, the state motions act on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transform {
    pub position: MapPosition,
    pub rotation: i32,
}

impl Transform {
    pub fn new(x: i32, y: i32, rotation: i32) -> Self {
        Self {
            position: MapPosition::new(x, y),
            rotation,
        }
    }
}

/// A parsed motion command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionCmd {
    MoveRight(i32),
    MoveForward,
    MoveBackward,
    TurnRight,
    TurnLeft,
    TurnDegrees(i32),
    GoTo { x: i32, y: i32 },
    /// Anything the grammar does not recognize.
    Noop,
}

fn capture_i32(caps: &regex::Captures<'_>, group: usize) -> Option<i32> {
    caps.get(group)?.as_str().parse().ok()
}

impl MotionCmd {
    pub fn parse(command: &str) -> Self {
        if let Some(caps) = MOVE_RIGHT.captures(command) {
            return capture_i32(&caps, 1).map_or(MotionCmd::Noop, MotionCmd::MoveRight);
        }
        match command {
            "Move Forward" => return MotionCmd::MoveForward,
            "Move Backward" => return MotionCmd::MoveBackward,
            "Turn Right" => return MotionCmd::TurnRight,
            "Turn Left" => return MotionCmd::TurnLeft,
            _ => {}
        }
        if let Some(caps) = TURN_DEGREES.captures(command) {
            return capture_i32(&caps, 1).map_or(MotionCmd::Noop, MotionCmd::TurnDegrees);
        }
        if let Some(caps) = GO_TO.captures(command) {
            return match (capture_i32(&caps, 1), capture_i32(&caps, 2)) {
                (Some(x), Some(y)) => MotionCmd::GoTo { x, y },
                _ => MotionCmd::Noop,
            };
        }
        MotionCmd::Noop
    }

    pub fn apply(self, transform: Transform) -> Transform {
        let Transform {
            mut position,
            mut rotation,
        } = transform;
        match self {
            MotionCmd::MoveRight(n) => position.x = position.x.saturating_add(n),
            MotionCmd::MoveForward => position.y = position.y.saturating_sub(STEP),
            MotionCmd::MoveBackward => position.y = position.y.saturating_add(STEP),
            MotionCmd::TurnRight => rotation = rotation.saturating_add(QUARTER_TURN),
            MotionCmd::TurnLeft => rotation = rotation.saturating_sub(QUARTER_TURN),
            MotionCmd::TurnDegrees(n) => rotation = rotation.saturating_add(n),
            MotionCmd::GoTo { x, y } => position = MapPosition::new(x, y),
            MotionCmd::Noop => {}
        }
        Transform { position, rotation }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, MotionCmd::Noop)
    }
}

impl fmt::Display for MotionCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionCmd::MoveRight(n) => write!(f, "Move Right {n}"),
            MotionCmd::MoveForward => f.write_str("Move Forward"),
            MotionCmd::MoveBackward => f.write_str("Move Backward"),
            MotionCmd::TurnRight => f.write_str("Turn Right"),
            MotionCmd::TurnLeft => f.write_str("Turn Left"),
            MotionCmd::TurnDegrees(n) => write!(f, "Turn {n} degrees"),
            MotionCmd::GoTo { x, y } => write!(f, "Go to X: {x}, Y: {y}"),
            MotionCmd::Noop => Ok(()),
        }
    }
}

/// Apply one command string to a transform.
pub fn apply(command: &str, transform: Transform) -> Transform {
    MotionCmd::parse(command).apply(transform)
}
