//! Scene assembly from world queries and the navigator's remaining route.

use anyhow::{Context, Result};
use queen_of_shadows_rendering::{
    CameraPresentation, Color, HeroPresentation, HudReadout, RoutePresentation, Scene,
    TileGridPresentation, TilePresentation,
};
use queen_of_shadows_system_navigation::Navigator;
use queen_of_shadows_world::{query, World};

const GROUND_COLOR: Color = Color::from_rgb_u8(0x2e, 0x2e, 0x2e);
const BLOCKED_COLOR: Color = Color::from_rgb_u8(0x6b, 0x1f, 0x1f);
const HERO_COLOR: Color = Color::from_rgb_u8(0xc8, 0x2a, 0x36);
const ROUTE_COLOR: Color = Color::from_rgb_u8(0xff, 0xc1, 0x07);

/// Builds the declarative scene for the current frame.
pub(crate) fn compose(world: &World, navigator: &Navigator) -> Result<Scene> {
    let grid = query::grid_view(world);
    let hero_snapshot = query::hero_snapshot(world);
    let camera_snapshot = query::camera_snapshot(world);

    let tiles: Vec<TilePresentation> = grid
        .iter_cells()
        .map(|(cell, walkable)| TilePresentation {
            cell,
            walkable,
            center: grid.grid_to_world(cell),
        })
        .collect();

    let tile_grid = TileGridPresentation::new(
        grid.config().size(),
        grid.config().tile_length(),
        GROUND_COLOR,
        BLOCKED_COLOR,
        tiles,
    )
    .context("assembling the ground grid")?;

    let camera = CameraPresentation {
        position: camera_snapshot.position,
        target: camera_snapshot.target,
        up: camera_snapshot.up,
        fov_y_degrees: camera_snapshot.fov_y_degrees,
        facing: camera_snapshot.facing,
        angle_degrees: camera_snapshot.angle_degrees,
    };

    let hero = HeroPresentation {
        position: hero_snapshot.position,
        moving: hero_snapshot.moving,
        color: HERO_COLOR,
    };

    let route = RoutePresentation {
        points: navigator.remaining_points().collect(),
        color: ROUTE_COLOR,
    };

    let hud = HudReadout::compose(&camera, &hero);

    Ok(Scene {
        tile_grid,
        route,
        hero,
        camera,
        hud,
    })
}
