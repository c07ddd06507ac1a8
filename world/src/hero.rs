//! Hero entity and its constant-speed pursuit state machine.

use glam::Vec3;
use queen_of_shadows_core::{Event, Gait};

/// Distance travelled per tick while walking: 1.5 m/s at 60 ticks/s.
const WALKING_SPEED: f32 = 0.025;

/// Distance travelled per tick while running: 4.5 m/s at 60 ticks/s.
const RUNNING_SPEED: f32 = 0.075;

const STOP_SPEED: f32 = 0.0;

/// Radius at which a running hero downgrades to walking before stopping.
const SOFT_STOP_RADIUS: f32 = 0.3;

/// Radius at which the hero is considered to have reached its target.
pub(crate) const ARRIVAL_RADIUS: f32 = 0.05;

/// Height at which the hero rides above the ground plane.
const HERO_HEIGHT: f32 = 1.0;

/// The controllable hero unit.
///
/// The movement target and speed live on the entity itself; a new move order
/// always overrides the current target.
#[derive(Clone, Debug)]
pub(crate) struct Hero {
    position: Vec3,
    target: Vec3,
    speed: f32,
    moving: bool,
}

impl Hero {
    /// Spawns the hero at the provided ground position.
    pub(crate) fn spawn(at: Vec3) -> Self {
        Self {
            position: Vec3::new(at.x, HERO_HEIGHT, at.z),
            target: Vec3::ZERO,
            speed: STOP_SPEED,
            moving: false,
        }
    }

    /// Orders the hero toward a target at the speed the gait implies.
    pub(crate) fn move_to(&mut self, target: Vec3, gait: Gait) {
        self.target = target;
        self.speed = match gait {
            Gait::Walking => WALKING_SPEED,
            Gait::Running => RUNNING_SPEED,
        };
        self.moving = true;
    }

    /// Advances the hero one tick toward its target.
    ///
    /// The arrival check runs before the direction is computed so a
    /// degenerate near-zero direction is never normalized.
    pub(crate) fn update(&mut self, out_events: &mut Vec<Event>) {
        if !self.moving {
            return;
        }

        if self.on_target(ARRIVAL_RADIUS) {
            self.stop(out_events);
            return;
        }

        let mut direction = self.target - self.position;
        direction.y = 0.0;
        if direction.length_squared() <= f32::EPSILON {
            self.stop(out_events);
            return;
        }

        self.position += direction.normalize() * self.speed;

        if self.speed > WALKING_SPEED && self.on_target(SOFT_STOP_RADIUS) {
            self.speed = WALKING_SPEED;
            out_events.push(Event::HeroSlowed {
                position: self.position,
            });
            return;
        }

        if self.on_target(ARRIVAL_RADIUS) {
            self.stop(out_events);
        }
    }

    #[must_use]
    pub(crate) const fn position(&self) -> Vec3 {
        self.position
    }

    #[must_use]
    pub(crate) const fn target(&self) -> Vec3 {
        self.target
    }

    #[must_use]
    pub(crate) const fn is_moving(&self) -> bool {
        self.moving
    }

    #[must_use]
    pub(crate) const fn speed(&self) -> f32 {
        self.speed
    }

    fn stop(&mut self, out_events: &mut Vec<Event>) {
        self.moving = false;
        self.speed = STOP_SPEED;
        out_events.push(Event::HeroArrived {
            position: self.position,
        });
    }

    fn on_target(&self, radius: f32) -> bool {
        (self.position.x - self.target.x).abs() < radius
            && (self.position.z - self.target.z).abs() < radius
    }
}
