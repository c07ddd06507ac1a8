#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Queen of Shadows.
//!
//! The world owns the walkability grid, the hero, and the camera rig.
//! Adapters and systems mutate it exclusively through [`apply`], which
//! executes a single [`Command`] and broadcasts the resulting [`Event`]
//! values. Read access flows through the snapshot views in [`query`].

mod camera;
mod grid;
mod hero;

use glam::Vec3;
use queen_of_shadows_core::{CellCoord, Command, Event};

use camera::CameraRig;
use grid::WalkGrid;
use hero::Hero;

pub use grid::GridConfig;

/// Ground position where the hero enters the world.
const HERO_SPAWN: Vec3 = Vec3::ZERO;

/// Represents the authoritative Queen of Shadows world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: WalkGrid,
    hero: Hero,
    camera: CameraRig,
    tick_index: u64,
}

impl World {
    /// Creates a new world ready for simulation.
    ///
    /// The grid carries the scripted obstacle layout, the hero spawns at the
    /// world origin, and the camera starts orbiting the hero from the south
    /// step.
    #[must_use]
    pub fn new() -> Self {
        let hero = Hero::spawn(HERO_SPAWN);
        let camera = CameraRig::orbiting(hero.position());
        Self {
            grid: WalkGrid::with_scripted_obstacles(),
            hero,
            camera,
            tick_index: 0,
        }
    }

    /// Creates a world whose grid carries a custom obstacle layout.
    ///
    /// The coordinate frame, hero spawn, and camera match [`World::new`];
    /// only the blocked cells differ. Intended for scenario setups that need
    /// a layout the scripted one cannot express.
    #[must_use]
    pub fn with_obstacles(blocked: &[CellCoord]) -> Self {
        let hero = Hero::spawn(HERO_SPAWN);
        let camera = CameraRig::orbiting(hero.position());
        Self {
            grid: WalkGrid::with_obstacles(blocked),
            hero,
            camera,
            tick_index: 0,
        }
    }

    /// Index of the most recently applied tick.
    #[must_use]
    pub const fn tick_index(&self) -> u64 {
        self.tick_index
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });

            world.hero.update(out_events);
            if let Some((facing, angle)) = world.camera.update(world.hero.position()) {
                out_events.push(Event::CameraRotationCompleted { facing, angle });
            }
        }
        Command::MoveHero { target, gait } => {
            world.hero.move_to(target, gait);
            out_events.push(Event::HeroDeparted { target, gait });
        }
        Command::RotateCamera { direction } => {
            // Debounced: a rotation already in flight swallows the command.
            if let Some(facing) = world.camera.begin_rotation(direction) {
                out_events.push(Event::CameraRotationStarted { direction, facing });
            }
        }
        Command::ZoomCamera { direction } => {
            if let Some(dimension) = world.camera.zoom(direction) {
                out_events.push(Event::CameraZoomed { dimension });
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::{Vec2, Vec3};
    use queen_of_shadows_core::{CellCoord, Facing};

    use super::{
        grid::{GridConfig, WalkGrid},
        World,
    };

    /// Captures a read-only view of the walkability grid.
    #[must_use]
    pub fn grid_view(world: &World) -> GridView<'_> {
        GridView { grid: &world.grid }
    }

    /// Captures an immutable snapshot of the hero's motion state.
    #[must_use]
    pub fn hero_snapshot(world: &World) -> HeroSnapshot {
        HeroSnapshot {
            position: world.hero.position(),
            target: world.hero.target(),
            moving: world.hero.is_moving(),
            speed: world.hero.speed(),
        }
    }

    /// Captures an immutable snapshot of the camera rig.
    #[must_use]
    pub fn camera_snapshot(world: &World) -> CameraSnapshot {
        CameraSnapshot {
            position: world.camera.position(),
            target: world.camera.target(),
            up: super::CameraRig::up(),
            fov_y_degrees: super::CameraRig::fov_y_degrees(),
            facing: world.camera.facing(),
            angle_degrees: world.camera.angle(),
            dimension: world.camera.dimension(),
            rotating: world.camera.is_rotating(),
        }
    }

    /// Intersects a screen-space pick ray with the ground plane.
    ///
    /// Returns `None` when nothing on the ground was picked; a hit at the
    /// world origin is a legitimate `Some` result, never a sentinel.
    #[must_use]
    pub fn pick_ground(world: &World, screen: Vec2, viewport: Vec2) -> Option<Vec3> {
        world.camera.pick_ground(screen, viewport)
    }

    /// Read-only view into the dense walkability grid.
    #[derive(Clone, Copy, Debug)]
    pub struct GridView<'a> {
        grid: &'a WalkGrid,
    }

    impl GridView<'_> {
        /// Reports whether the cell permits traversal. Out-of-bounds cells
        /// are never walkable.
        #[must_use]
        pub fn is_walkable(&self, cell: CellCoord) -> bool {
            self.grid.is_walkable(cell)
        }

        /// Canonical coordinate frame shared by every transform.
        #[must_use]
        pub fn config(&self) -> GridConfig {
            self.grid.config()
        }

        /// Maps a continuous ground-plane position to the nearest grid cell.
        #[must_use]
        pub fn world_to_grid(&self, position: Vec3) -> Option<CellCoord> {
            self.grid.config().world_to_grid(position)
        }

        /// Maps a grid cell back to the world-space center of that cell.
        #[must_use]
        pub fn grid_to_world(&self, cell: CellCoord) -> Vec3 {
            self.grid.config().grid_to_world(cell)
        }

        /// Iterates every cell paired with its walkability flag.
        pub fn iter_cells(&self) -> impl Iterator<Item = (CellCoord, bool)> + '_ {
            let size = self.grid.config().size();
            (0..size).flat_map(move |row| {
                (0..size).map(move |column| {
                    let cell = CellCoord::new(column, row);
                    (cell, self.grid.is_walkable(cell))
                })
            })
        }
    }

    /// Immutable representation of the hero's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct HeroSnapshot {
        /// Continuous world position of the hero.
        pub position: Vec3,
        /// Position the hero is currently pursuing.
        pub target: Vec3,
        /// Indicates whether the hero is pursuing a target.
        pub moving: bool,
        /// Distance travelled per tick at the current gait.
        pub speed: f32,
    }

    /// Immutable representation of the camera rig used for queries.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct CameraSnapshot {
        /// Orbit position of the camera.
        pub position: Vec3,
        /// Point the camera looks at.
        pub target: Vec3,
        /// Up vector handed to renderers.
        pub up: Vec3,
        /// Vertical field of view in degrees.
        pub fov_y_degrees: f32,
        /// Discrete facing step the camera is settled on or rotating toward.
        pub facing: Facing,
        /// Continuous orbit angle in degrees.
        pub angle_degrees: f32,
        /// Orbit distance from the tracked target.
        pub dimension: f32,
        /// Indicates whether a step rotation is in flight.
        pub rotating: bool,
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use queen_of_shadows_core::{CellCoord, Facing, Gait, RotationDirection, ZoomDirection};

    const DT: Duration = Duration::from_nanos(16_666_667);

    fn tick(world: &mut World) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::Tick { dt: DT }, &mut events);
        events
    }

    #[test]
    fn tick_advances_the_clock_and_reports_time() {
        let mut world = World::new();
        let events = tick(&mut world);

        assert_eq!(world.tick_index(), 1);
        assert!(matches!(events[0], Event::TimeAdvanced { dt } if dt == DT));
    }

    #[test]
    fn move_command_departs_the_hero() {
        let mut world = World::new();
        let mut events = Vec::new();
        let target = Vec3::new(2.0, 0.0, 1.0);

        apply(
            &mut world,
            Command::MoveHero {
                target,
                gait: Gait::Running,
            },
            &mut events,
        );

        assert!(query::hero_snapshot(&world).moving);
        assert!(matches!(
            events[0],
            Event::HeroDeparted { target: departed, gait: Gait::Running } if departed == target
        ));
    }

    #[test]
    fn hero_converges_within_bounded_ticks() {
        let mut world = World::new();
        let mut events = Vec::new();
        let target = Vec3::new(3.0, 0.0, -2.0);

        apply(
            &mut world,
            Command::MoveHero {
                target,
                gait: Gait::Running,
            },
            &mut events,
        );

        let mut arrived = false;
        for _ in 0..600 {
            if tick(&mut world)
                .iter()
                .any(|event| matches!(event, Event::HeroArrived { .. }))
            {
                arrived = true;
                break;
            }
        }

        assert!(arrived, "hero never arrived");
        let hero = query::hero_snapshot(&world);
        assert!(!hero.moving);
        assert!((hero.position.x - target.x).abs() < 0.05);
        assert!((hero.position.z - target.z).abs() < 0.05);
    }

    #[test]
    fn camera_tracks_the_hero_every_tick() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MoveHero {
                target: Vec3::new(2.0, 0.0, 0.0),
                gait: Gait::Running,
            },
            &mut events,
        );
        let _ = tick(&mut world);

        let hero = query::hero_snapshot(&world);
        let camera = query::camera_snapshot(&world);
        assert_eq!(camera.target, hero.position);
    }

    #[test]
    fn second_rotate_command_is_silently_ignored() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::RotateCamera {
                direction: RotationDirection::Clockwise,
            },
            &mut events,
        );
        assert_eq!(events.len(), 1);
        let before = query::camera_snapshot(&world);

        apply(
            &mut world,
            Command::RotateCamera {
                direction: RotationDirection::CounterClockwise,
            },
            &mut events,
        );

        let after = query::camera_snapshot(&world);
        assert_eq!(events.len(), 1, "debounced command must not emit events");
        assert_eq!(after.facing, before.facing);
        assert_eq!(after.angle_degrees, before.angle_degrees);
    }

    #[test]
    fn rotation_completion_is_reported_through_events() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::RotateCamera {
                direction: RotationDirection::Clockwise,
            },
            &mut events,
        );
        assert!(matches!(
            events[0],
            Event::CameraRotationStarted {
                direction: RotationDirection::Clockwise,
                facing: Facing::East,
            }
        ));

        let mut completed = None;
        for _ in 0..100 {
            if let Some(event) = tick(&mut world).into_iter().find_map(|event| match event {
                Event::CameraRotationCompleted { facing, angle } => Some((facing, angle)),
                _ => None,
            }) {
                completed = Some(event);
                break;
            }
        }

        let (facing, angle) = completed.expect("rotation never completed");
        assert_eq!(facing, Facing::East);
        assert!((angle - (45.0 - 90.0)).abs() < 1e-3);
        assert!(!query::camera_snapshot(&world).rotating);
    }

    #[test]
    fn zoom_events_stop_at_the_limit() {
        let mut world = World::new();
        let mut events = Vec::new();

        for _ in 0..200 {
            apply(
                &mut world,
                Command::ZoomCamera {
                    direction: ZoomDirection::In,
                },
                &mut events,
            );
        }

        let camera = query::camera_snapshot(&world);
        assert_eq!(camera.dimension, 20.0);
        let zoomed = events
            .iter()
            .filter(|event| matches!(event, Event::CameraZoomed { .. }))
            .count();
        assert_eq!(zoomed, 20, "only effective zoom steps may report events");
    }

    #[test]
    fn grid_view_exposes_the_scripted_layout() {
        let world = World::new();
        let view = query::grid_view(&world);

        assert!(!view.is_walkable(CellCoord::new(0, 0)));
        assert!(view.is_walkable(CellCoord::new(5, 5)));
        assert_eq!(view.config().size(), 11);
        assert_eq!(view.config().origin_offset(), 5);
        assert_eq!(view.iter_cells().count(), 121);
    }
}
