#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Queen of Shadows engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Title of the experience shown on the HUD.
pub const GAME_NAME: &str = "Queen of Shadows";

/// Version string shown next to the title.
pub const GAME_VERSION: &str = "v0.1.1";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Orders the hero to move in a straight line toward a world position.
    MoveHero {
        /// Ground-plane position the hero should pursue.
        target: Vec3,
        /// Gait the hero should adopt while pursuing the target.
        gait: Gait,
    },
    /// Requests a single camera step rotation around the tracked target.
    RotateCamera {
        /// Direction the orbit should turn.
        direction: RotationDirection,
    },
    /// Requests a single zoom increment toward or away from the target.
    ZoomCamera {
        /// Direction of the zoom adjustment.
        direction: ZoomDirection,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that the hero accepted a new movement target.
    HeroDeparted {
        /// Position the hero is now pursuing.
        target: Vec3,
        /// Gait adopted for the pursuit.
        gait: Gait,
    },
    /// Reports that a running hero entered the soft-stop window and slowed.
    HeroSlowed {
        /// Hero position at the moment of the downgrade.
        position: Vec3,
    },
    /// Reports that the hero reached its target and stopped.
    HeroArrived {
        /// Hero position after stopping.
        position: Vec3,
    },
    /// Confirms that the camera began a step rotation.
    CameraRotationStarted {
        /// Direction of the in-flight rotation.
        direction: RotationDirection,
        /// Facing step the camera is rotating toward.
        facing: Facing,
    },
    /// Confirms that an in-flight camera rotation ran to completion.
    CameraRotationCompleted {
        /// Facing step the camera settled on.
        facing: Facing,
        /// Orbit angle in degrees after any canonical snap.
        angle: f32,
    },
    /// Reports that the camera orbit distance changed.
    CameraZoomed {
        /// Orbit distance after the adjustment.
        dimension: f32,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Reports whether the two cells differ by exactly one step on one axis.
    #[must_use]
    pub fn is_adjacent(self, other: CellCoord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

/// Gait the hero adopts while pursuing a movement target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gait {
    /// Steady pace used for short or final approaches.
    Walking,
    /// Fast pace that downgrades to walking inside the soft-stop window.
    Running,
}

/// Discrete orbit step the camera can settle on around the tracked target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Canonical starting step.
    South,
    /// One counter-clockwise step from south.
    West,
    /// Opposite the canonical step.
    North,
    /// One clockwise step from south.
    East,
}

impl Facing {
    /// Facing reached by one clockwise step. South wraps to east.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        match self {
            Self::South => Self::East,
            Self::West => Self::South,
            Self::North => Self::West,
            Self::East => Self::North,
        }
    }

    /// Facing reached by one counter-clockwise step. East wraps to south.
    #[must_use]
    pub const fn counter_clockwise(self) -> Self {
        match self {
            Self::South => Self::West,
            Self::West => Self::North,
            Self::North => Self::East,
            Self::East => Self::South,
        }
    }

    /// Facing reached by one step in the provided direction.
    #[must_use]
    pub const fn stepped(self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.clockwise(),
            RotationDirection::CounterClockwise => self.counter_clockwise(),
        }
    }

    /// Human-readable label used on the HUD.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::South => "South",
            Self::West => "West",
            Self::North => "North",
            Self::East => "East",
        }
    }
}

/// Direction of a camera step rotation around the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationDirection {
    /// Decrements the facing step, sweeping the angle negatively.
    Clockwise,
    /// Increments the facing step, sweeping the angle positively.
    CounterClockwise,
}

impl RotationDirection {
    /// Sign applied to the per-tick angle increment.
    #[must_use]
    pub const fn angle_sign(self) -> f32 {
        match self {
            Self::Clockwise => -1.0,
            Self::CounterClockwise => 1.0,
        }
    }
}

/// Direction of a camera zoom adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoomDirection {
    /// Shrinks the orbit distance toward the minimum.
    In,
    /// Grows the orbit distance toward the maximum.
    Out,
}
