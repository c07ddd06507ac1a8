#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a deterministic Queen of Shadows session.
//!
//! The binary replaces a windowed frontend with a scripted one: clicks and
//! key presses are replayed from a fixed timeline, the world advances with a
//! fixed tick, and frames are presented as console output. The per-frame
//! ordering matches what a windowed adapter must do: sample input, turn it
//! into commands, apply them, let systems react, then present.

mod scene;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use log::{debug, info, warn};
use queen_of_shadows_core::{
    Command, Event, RotationDirection, ZoomDirection, GAME_NAME, GAME_VERSION,
};
use queen_of_shadows_rendering::{FrameInput, Renderer, Scene};
use queen_of_shadows_system_navigation::Navigator;
use queen_of_shadows_world::{self as world, query, World};

const TARGET_TICKS_PER_SECOND: u32 = 60;

/// Screen dimensions the scripted clicks are expressed in.
const VIEWPORT: Vec2 = Vec2::new(1920.0, 1080.0);

#[derive(Debug, Parser)]
#[command(name = "queen-of-shadows", version, about = "Headless Queen of Shadows session")]
struct Args {
    /// Number of simulated ticks to run.
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Ticks between console frame presentations.
    #[arg(long, default_value_t = 60)]
    present_interval: u32,
}

/// Fixed input timeline replayed by the session.
fn scripted_input(tick: u32) -> FrameInput {
    let mut input = FrameInput::default();

    match tick {
        // Walk toward the center-screen pick.
        10 => {
            input.cursor_screen = Some(VIEWPORT * 0.5);
            input.move_click = true;
        }
        120 => input.rotate_clockwise = true,
        // Run toward a pick slightly east of center.
        240 => {
            input.cursor_screen = Some(Vec2::new(VIEWPORT.x * 0.54, VIEWPORT.y * 0.52));
            input.move_click = true;
            input.run_modifier = true;
        }
        400 => input.rotate_counter_clockwise = true,
        _ => {}
    }

    if (60..70).contains(&tick) {
        input.zoom_in = true;
    }
    if (440..450).contains(&tick) {
        input.zoom_out = true;
    }

    input
}

/// Translates a frame input snapshot into camera commands.
fn camera_commands(input: &FrameInput, out: &mut Vec<Command>) {
    if input.zoom_in {
        out.push(Command::ZoomCamera {
            direction: ZoomDirection::In,
        });
    }
    if input.zoom_out {
        out.push(Command::ZoomCamera {
            direction: ZoomDirection::Out,
        });
    }
    if input.rotate_clockwise {
        out.push(Command::RotateCamera {
            direction: RotationDirection::Clockwise,
        });
    }
    if input.rotate_counter_clockwise {
        out.push(Command::RotateCamera {
            direction: RotationDirection::CounterClockwise,
        });
    }
}

/// Resolves a move click into an escort request, if anything was picked.
fn handle_move_click(
    world: &World,
    navigator: &mut Navigator,
    input: &FrameInput,
    out: &mut Vec<Command>,
) {
    let Some(cursor) = input.cursor_screen else {
        return;
    };

    let Some(point) = query::pick_ground(world, cursor, VIEWPORT) else {
        debug!("click at {cursor} missed the ground plane");
        return;
    };

    let grid = query::grid_view(world);
    let hero = query::hero_snapshot(world);
    let route = navigator.request_travel(&grid, &hero, point, input.gait(), out);
    if route.is_empty() {
        warn!("no route from {} to picked point {point}", hero.position);
    } else {
        info!(
            "escorting hero along {} node(s) toward {point} ({:?})",
            route.len(),
            input.gait(),
        );
    }
}

fn log_events(events: &[Event]) {
    for event in events {
        match event {
            Event::HeroArrived { position } => debug!("hero arrived at {position}"),
            Event::HeroSlowed { position } => debug!("hero slowed at {position}"),
            Event::CameraRotationStarted { direction, facing } => {
                info!("camera rotating {direction:?} toward {}", facing.label());
            }
            Event::CameraRotationCompleted { facing, angle } => {
                info!("camera settled on {} at {angle:.0} degrees", facing.label());
            }
            Event::CameraZoomed { dimension } => debug!("camera zoomed to {dimension}"),
            Event::TimeAdvanced { .. } | Event::HeroDeparted { .. } => {}
        }
    }
}

/// Presents frames by printing the HUD and a short scene summary.
#[derive(Debug, Default)]
struct ConsoleRenderer;

impl Renderer for ConsoleRenderer {
    fn present(&mut self, scene: &Scene) -> Result<()> {
        println!("{}", scene.hud.title);
        println!("{}", scene.hud.camera);
        println!("{}", scene.hud.hero);
        if !scene.route.is_empty() {
            println!("Route: {} node(s) remaining", scene.route.points.len());
        }
        println!("---");
        Ok(())
    }
}

/// Entry point for the Queen of Shadows command-line session.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let dt = Duration::from_secs(1) / TARGET_TICKS_PER_SECOND;

    info!("{GAME_NAME} {GAME_VERSION} starting for {} tick(s)", args.ticks);

    let mut world = World::new();
    let mut navigator = Navigator::default();
    let mut renderer = ConsoleRenderer;

    for tick in 0..args.ticks {
        // Input is sampled and turned into commands before the update pass.
        let input = scripted_input(tick);

        let mut commands = Vec::new();
        camera_commands(&input, &mut commands);
        if input.move_click {
            handle_move_click(&world, &mut navigator, &input, &mut commands);
        }
        commands.push(Command::Tick { dt });

        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }

        // Systems react to the broadcast events with follow-up commands.
        let mut followups = Vec::new();
        navigator.handle(&events, &mut followups);
        for command in followups {
            world::apply(&mut world, command, &mut events);
        }

        log_events(&events);

        // The draw pass reads final state only after every update ran.
        if tick % args.present_interval.max(1) == 0 {
            renderer.present(&scene::compose(&world, &navigator)?)?;
        }
    }

    let hero = query::hero_snapshot(&world);
    let camera = query::camera_snapshot(&world);
    info!(
        "session finished: hero at {:.2} {:.2}, camera {} ({:.0})",
        hero.position.x,
        hero.position.z,
        camera.facing.label(),
        camera.angle_degrees,
    );

    Ok(())
}
