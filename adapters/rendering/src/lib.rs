#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Queen of Shadows adapters.
//!
//! The simulation describes what should appear on screen with the
//! declarative types in this crate; concrete renderers consume a [`Scene`]
//! and draw it with whatever backend they wrap. Nothing here touches a
//! window, a GPU, or an input device.

use anyhow::Result as AnyResult;
use glam::{Vec2, Vec3};
use queen_of_shadows_core::{CellCoord, Facing, Gait, GAME_NAME, GAME_VERSION};
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

/// Input snapshot gathered by adapters before updating the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position in screen space, if the backend reports one.
    pub cursor_screen: Option<Vec2>,
    /// Whether a move click was detected on this frame.
    pub move_click: bool,
    /// Whether the run modifier was held during the click.
    pub run_modifier: bool,
    /// Whether the zoom-in key was held on this frame.
    pub zoom_in: bool,
    /// Whether the zoom-out key was held on this frame.
    pub zoom_out: bool,
    /// Whether a clockwise rotation press was detected on this frame.
    pub rotate_clockwise: bool,
    /// Whether a counter-clockwise rotation press was detected on this frame.
    pub rotate_counter_clockwise: bool,
}

impl FrameInput {
    /// Gait implied by the run modifier for a move click.
    #[must_use]
    pub const fn gait(&self) -> Gait {
        if self.run_modifier {
            Gait::Running
        } else {
            Gait::Walking
        }
    }
}

/// View parameters a renderer needs to set up its 3D camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPresentation {
    /// Orbit position of the camera.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Up vector for the view matrix.
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Discrete facing step for the HUD.
    pub facing: Facing,
    /// Continuous orbit angle in degrees for the HUD.
    pub angle_degrees: f32,
}

/// Single ground tile with its walkability flag and world-space center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePresentation {
    /// Grid cell the tile covers.
    pub cell: CellCoord,
    /// Whether the hero may traverse the tile.
    pub walkable: bool,
    /// World-space center of the tile on the ground plane.
    pub center: Vec3,
}

/// Square ground grid composed of individually drawable tiles.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of tiles along each axis.
    pub size: u32,
    /// Side length of a single tile in world units.
    pub tile_length: f32,
    /// Color used for walkable tiles.
    pub ground_color: Color,
    /// Color used for blocked tiles.
    pub blocked_color: Color,
    /// Tiles in row-major order.
    pub tiles: Vec<TilePresentation>,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor.
    ///
    /// Returns an error when the tile length is not strictly positive or the
    /// tile list does not cover the full grid.
    pub fn new(
        size: u32,
        tile_length: f32,
        ground_color: Color,
        blocked_color: Color,
        tiles: Vec<TilePresentation>,
    ) -> Result<Self, RenderingError> {
        if tile_length <= 0.0 {
            return Err(RenderingError::InvalidTileLength { tile_length });
        }

        let expected = size as usize * size as usize;
        if tiles.len() != expected {
            return Err(RenderingError::IncompleteTileSet {
                expected,
                actual: tiles.len(),
            });
        }

        Ok(Self {
            size,
            tile_length,
            ground_color,
            blocked_color,
            tiles,
        })
    }
}

/// Hero drawn as a tall box riding above the ground plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeroPresentation {
    /// Continuous world position of the hero.
    pub position: Vec3,
    /// Whether the hero is currently pursuing a target.
    pub moving: bool,
    /// Body color.
    pub color: Color,
}

/// Planned route drawn as a polyline of world-space points.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct RoutePresentation {
    /// Remaining route points in travel order.
    pub points: Vec<Vec3>,
    /// Color used for the route markers.
    pub color: Color,
}

impl RoutePresentation {
    /// Reports whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Human-readable debug overlay lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudReadout {
    /// Game name and version.
    pub title: String,
    /// Camera facing label and orbit angle.
    pub camera: String,
    /// Hero ground-plane coordinates.
    pub hero: String,
}

impl HudReadout {
    /// Composes the overlay lines from the current view parameters.
    #[must_use]
    pub fn compose(camera: &CameraPresentation, hero: &HeroPresentation) -> Self {
        Self {
            title: format!("{GAME_NAME} {GAME_VERSION}"),
            camera: format!(
                "Camera: {} ({:.0})",
                camera.facing.label(),
                camera.angle_degrees
            ),
            hero: format!("Hero: {:.2} {:.2}", hero.position.x, hero.position.z),
        }
    }
}

/// Scene description combining the ground grid, route, hero and camera.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Ground grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// Route the hero is currently escorted along, possibly empty.
    pub route: RoutePresentation,
    /// The controllable hero.
    pub hero: HeroPresentation,
    /// View parameters for the 3D camera.
    pub camera: CameraPresentation,
    /// Debug overlay lines.
    pub hud: HudReadout,
}

/// Backend-agnostic presenter consumed by the frame loop.
pub trait Renderer {
    /// Presents a single frame described by the scene.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails to draw the frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Failures produced while assembling presentation data.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The tile length must be strictly positive.
    InvalidTileLength {
        /// Offending tile length.
        tile_length: f32,
    },
    /// The tile list does not cover the full grid.
    IncompleteTileSet {
        /// Number of tiles the grid requires.
        expected: usize,
        /// Number of tiles provided.
        actual: usize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileLength { tile_length } => {
                write!(f, "tile length must be positive, got {tile_length}")
            }
            Self::IncompleteTileSet { expected, actual } => {
                write!(f, "expected {expected} tiles, got {actual}")
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_camera() -> CameraPresentation {
        CameraPresentation {
            position: Vec3::new(21.2, 30.0, 21.2),
            target: Vec3::new(0.0, 1.0, 0.0),
            up: Vec3::Y,
            fov_y_degrees: 45.0,
            facing: Facing::South,
            angle_degrees: 45.0,
        }
    }

    fn sample_hero() -> HeroPresentation {
        HeroPresentation {
            position: Vec3::new(1.234, 1.0, -0.5),
            moving: true,
            color: Color::from_rgb_u8(0xc8, 0x2a, 0x36),
        }
    }

    #[test]
    fn hud_lines_match_the_debug_overlay_format() {
        let hud = HudReadout::compose(&sample_camera(), &sample_hero());

        assert_eq!(hud.title, "Queen of Shadows v0.1.1");
        assert_eq!(hud.camera, "Camera: South (45)");
        assert_eq!(hud.hero, "Hero: 1.23 -0.50");
    }

    #[test]
    fn run_modifier_selects_the_running_gait() {
        let mut input = FrameInput::default();
        assert_eq!(input.gait(), Gait::Walking);
        input.run_modifier = true;
        assert_eq!(input.gait(), Gait::Running);
    }

    #[test]
    fn tile_grid_rejects_non_positive_tile_length() {
        let result = TileGridPresentation::new(
            1,
            0.0,
            Color::default(),
            Color::default(),
            vec![TilePresentation {
                cell: CellCoord::new(0, 0),
                walkable: true,
                center: Vec3::ZERO,
            }],
        );

        assert_eq!(
            result,
            Err(RenderingError::InvalidTileLength { tile_length: 0.0 })
        );
    }

    #[test]
    fn tile_grid_rejects_incomplete_tile_sets() {
        let result =
            TileGridPresentation::new(2, 1.0, Color::default(), Color::default(), Vec::new());

        assert_eq!(
            result,
            Err(RenderingError::IncompleteTileSet {
                expected: 4,
                actual: 0,
            })
        );
    }

    #[test]
    fn rendering_error_display_is_actionable() {
        let error = RenderingError::IncompleteTileSet {
            expected: 121,
            actual: 120,
        };
        assert_eq!(error.to_string(), "expected 121 tiles, got 120");
    }
}
