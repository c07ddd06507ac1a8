//! Orbiting step camera rig and its ground-plane picking ray.

use glam::{Vec2, Vec3};
use queen_of_shadows_core::{Facing, RotationDirection, ZoomDirection};

/// Canonical orbit angle for the south facing step, in degrees.
const INITIAL_ANGLE: f32 = 45.0;

/// Starting orbit distance from the tracked target.
const INITIAL_RADIUS: f32 = 30.0;

/// Orbit distance change applied per zoom command.
const ZOOM_STEP: f32 = 0.5;

const MIN_ZOOM: f32 = 20.0;
const MAX_ZOOM: f32 = 50.0;

/// Ticks a step rotation takes to run to completion.
const ROTATION_TICKS: u32 = 45;

/// Degrees swept per tick while a rotation is in flight.
const DEGREES_PER_TICK: f32 = 2.0;

/// Vertical field of view handed to renderers, in degrees.
const FOV_Y_DEGREES: f32 = 45.0;

const WORLD_UP: Vec3 = Vec3::Y;

/// Threshold below which a ray is considered parallel to the ground.
const RAY_EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug)]
struct Rotation {
    direction: RotationDirection,
    elapsed_ticks: u32,
}

/// Discrete four-step orbit camera that tracks a target on the ground plane.
///
/// At most one rotation is in flight at a time; commands issued while
/// rotating are ignored. The orbit angle and the facing step only agree at
/// rotation completion, when the angle snaps back to the canonical value on
/// the south step to stop floating-point drift accumulating.
#[derive(Clone, Debug)]
pub(crate) struct CameraRig {
    position: Vec3,
    target: Vec3,
    facing: Facing,
    angle: f32,
    dimension: f32,
    rotation: Option<Rotation>,
}

impl CameraRig {
    /// Creates a rig orbiting the provided target from the south step.
    pub(crate) fn orbiting(target: Vec3) -> Self {
        let mut rig = Self {
            position: Vec3::ZERO,
            target,
            facing: Facing::South,
            angle: INITIAL_ANGLE,
            dimension: INITIAL_RADIUS,
            rotation: None,
        };
        rig.recompute_position(target);
        rig
    }

    /// Begins a step rotation unless one is already in flight.
    ///
    /// Returns the facing step the camera is rotating toward, or `None` when
    /// the command was debounced.
    pub(crate) fn begin_rotation(&mut self, direction: RotationDirection) -> Option<Facing> {
        if self.rotation.is_some() {
            return None;
        }

        self.facing = self.facing.stepped(direction);
        self.rotation = Some(Rotation {
            direction,
            elapsed_ticks: 0,
        });
        Some(self.facing)
    }

    /// Adjusts the orbit distance one step, clamped to the zoom limits.
    ///
    /// Returns the new distance, or `None` when the rig was already at the
    /// limit and the command was a no-op.
    pub(crate) fn zoom(&mut self, direction: ZoomDirection) -> Option<f32> {
        let adjusted = match direction {
            ZoomDirection::In => self.dimension - ZOOM_STEP,
            ZoomDirection::Out => self.dimension + ZOOM_STEP,
        };
        let clamped = adjusted.clamp(MIN_ZOOM, MAX_ZOOM);
        if (clamped - self.dimension).abs() <= f32::EPSILON {
            return None;
        }

        self.dimension = clamped;
        Some(self.dimension)
    }

    /// Advances the rotation interpolation and re-centers the orbit.
    ///
    /// Returns the settled facing and angle when an in-flight rotation ran to
    /// completion on this tick.
    pub(crate) fn update(&mut self, target: Vec3) -> Option<(Facing, f32)> {
        let completed = self.advance_rotation();
        self.recompute_position(target);
        completed
    }

    fn advance_rotation(&mut self) -> Option<(Facing, f32)> {
        let rotation = self.rotation.as_mut()?;

        if rotation.elapsed_ticks >= ROTATION_TICKS {
            self.rotation = None;
            if self.facing == Facing::South {
                self.angle = INITIAL_ANGLE;
            }
            return Some((self.facing, self.angle));
        }

        self.angle += rotation.direction.angle_sign() * DEGREES_PER_TICK;
        rotation.elapsed_ticks += 1;
        None
    }

    fn recompute_position(&mut self, target: Vec3) {
        let radians = self.angle.to_radians();
        self.target = target;
        self.position = Vec3::new(
            target.x + self.dimension * radians.sin(),
            self.dimension,
            target.z + self.dimension * radians.cos(),
        );
    }

    /// Casts a ray from the camera through a screen point onto the ground.
    ///
    /// Returns `None` when the viewport is degenerate, the ray runs parallel
    /// to the ground plane, or the intersection lies behind the camera.
    #[must_use]
    pub(crate) fn pick_ground(&self, screen: Vec2, viewport: Vec2) -> Option<Vec3> {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return None;
        }

        let forward = (self.target - self.position).normalize_or_zero();
        if forward.length_squared() <= RAY_EPSILON {
            return None;
        }
        let right = forward.cross(WORLD_UP).normalize_or_zero();
        if right.length_squared() <= RAY_EPSILON {
            return None;
        }
        let up = right.cross(forward);

        let ndc_x = 2.0 * screen.x / viewport.x - 1.0;
        let ndc_y = 1.0 - 2.0 * screen.y / viewport.y;
        let tan_half_fov = (FOV_Y_DEGREES.to_radians() * 0.5).tan();
        let aspect = viewport.x / viewport.y;

        let direction = (forward
            + right * (ndc_x * aspect * tan_half_fov)
            + up * (ndc_y * tan_half_fov))
            .normalize();

        if direction.y.abs() < RAY_EPSILON {
            return None;
        }

        let t = -self.position.y / direction.y;
        if t < 0.0 {
            return None;
        }

        // Pin the hit to the plane; the parametric form leaves residue on y.
        let hit = self.position + direction * t;
        Some(Vec3::new(hit.x, 0.0, hit.z))
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
    pub(crate) const fn facing(&self) -> Facing {
        self.facing
    }

    #[must_use]
    pub(crate) const fn angle(&self) -> f32 {
        self.angle
    }

    #[must_use]
    pub(crate) const fn dimension(&self) -> f32 {
        self.dimension
    }

    #[must_use]
    pub(crate) const fn is_rotating(&self) -> bool {
        self.rotation.is_some()
    }

    #[must_use]
    pub(crate) const fn up() -> Vec3 {
        WORLD_UP
    }

    #[must_use]
    pub(crate) const fn fov_y_degrees() -> f32 {
        FOV_Y_DEGREES
    }
}
