#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic navigation system that plans routes and escorts the hero.
//!
//! Route planning is a breadth-first search over the walkability grid. The
//! [`Navigator`] feeds a planned route to the hero one node at a time: it
//! issues a move order, waits for the world to report arrival, then issues
//! the next node. Absence of a route is an expected outcome, never an error.

use std::collections::VecDeque;

use glam::Vec3;
use queen_of_shadows_core::{CellCoord, Command, Event, Gait};
use queen_of_shadows_world::query::{GridView, HeroSnapshot};

/// Single stop along a planned route.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteNode {
    /// Grid cell the node occupies.
    pub cell: CellCoord,
    /// World-space center of the cell, on the ground plane.
    pub point: Vec3,
}

/// Ordered sequence of walkable, grid-adjacent stops toward a destination.
///
/// The route starts at the first step away from the start cell and ends at
/// the destination cell. Empty when no traversable route exists, when the
/// destination is unwalkable, or when start and destination discretize to
/// the same cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    nodes: Vec<RouteNode>,
}

impl Route {
    /// Nodes composing the route in travel order.
    #[must_use]
    pub fn nodes(&self) -> &[RouteNode] {
        &self.nodes
    }

    /// Number of steps along the route.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Reports whether no route was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Plans the shortest 4-directional route between two world positions.
///
/// Both endpoints discretize through the grid's canonical transform. The
/// search explores neighbors in a fixed order (up, down, left, right), so
/// ties between equal-length routes resolve deterministically for a given
/// grid.
#[must_use]
pub fn plan_route(grid: &GridView<'_>, start: Vec3, end: Vec3) -> Route {
    let Some(start_cell) = grid.world_to_grid(start) else {
        return Route::default();
    };
    let Some(end_cell) = grid.world_to_grid(end) else {
        return Route::default();
    };

    if !grid.is_walkable(end_cell) || start_cell == end_cell {
        return Route::default();
    }

    let size = usize::try_from(grid.config().size()).unwrap_or(0);
    let cell_count = size.checked_mul(size).unwrap_or(0);
    if cell_count == 0 {
        return Route::default();
    }

    // Arena of visited entries; parents are indices into this arena.
    let mut arena: Vec<SearchEntry> = Vec::with_capacity(cell_count);
    let mut visited = vec![false; cell_count];
    let mut frontier = VecDeque::new();

    visited[cell_index(size, start_cell)] = true;
    arena.push(SearchEntry {
        cell: start_cell,
        parent: None,
    });
    frontier.push_back(0);

    while let Some(entry_index) = frontier.pop_front() {
        let cell = arena[entry_index].cell;

        if cell == end_cell {
            return reconstruct(grid, &arena, entry_index);
        }

        for neighbor in cardinal_neighbors(cell) {
            if !grid.is_walkable(neighbor) {
                continue;
            }

            let index = cell_index(size, neighbor);
            if visited[index] {
                continue;
            }

            visited[index] = true;
            arena.push(SearchEntry {
                cell: neighbor,
                parent: Some(entry_index),
            });
            frontier.push_back(arena.len() - 1);
        }
    }

    Route::default()
}

#[derive(Clone, Copy, Debug)]
struct SearchEntry {
    cell: CellCoord,
    parent: Option<usize>,
}

fn reconstruct(grid: &GridView<'_>, arena: &[SearchEntry], end_index: usize) -> Route {
    let mut cells = Vec::new();
    let mut cursor = Some(end_index);
    while let Some(index) = cursor {
        cells.push(arena[index].cell);
        cursor = arena[index].parent;
    }

    // Walked back from the destination; drop the start cell and reverse.
    let _ = cells.pop();
    cells.reverse();

    Route {
        nodes: cells
            .into_iter()
            .map(|cell| RouteNode {
                cell,
                point: grid.grid_to_world(cell),
            })
            .collect(),
    }
}

fn cell_index(size: usize, cell: CellCoord) -> usize {
    cell.row() as usize * size + cell.column() as usize
}

/// Neighbors in the search's fixed exploration order: up, down, left, right.
///
/// Coordinates below zero are skipped here; the walkability check rejects
/// the far edges.
fn cardinal_neighbors(cell: CellCoord) -> impl Iterator<Item = CellCoord> {
    let mut candidates = [None; 4];
    let mut count = 0;

    if let Some(row) = cell.row().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(cell.column(), row));
        count += 1;
    }

    candidates[count] = Some(CellCoord::new(cell.column(), cell.row() + 1));
    count += 1;

    if let Some(column) = cell.column().checked_sub(1) {
        candidates[count] = Some(CellCoord::new(column, cell.row()));
        count += 1;
    }

    candidates[count] = Some(CellCoord::new(cell.column() + 1, cell.row()));
    count += 1;

    candidates.into_iter().take(count).flatten()
}

/// Pure system that walks the hero along a planned route node by node.
#[derive(Clone, Debug, Default)]
pub struct Navigator {
    pending: VecDeque<RouteNode>,
    gait: Option<Gait>,
}

impl Navigator {
    /// Plans a route to the destination and issues the first move order.
    ///
    /// A successful plan replaces any in-flight escort, never queues behind
    /// it. A failed plan leaves the current escort running, so a stray pick
    /// on blocked ground does not strand the hero mid-route. Returns the
    /// planned route (possibly empty) so adapters can draw it; when it is
    /// empty no command is emitted.
    pub fn request_travel(
        &mut self,
        grid: &GridView<'_>,
        hero: &HeroSnapshot,
        destination: Vec3,
        gait: Gait,
        out: &mut Vec<Command>,
    ) -> Route {
        let route = plan_route(grid, hero.position, destination);
        if route.is_empty() {
            return route;
        }

        self.pending.clear();
        self.pending.extend(route.nodes().iter().copied());
        self.gait = Some(gait);
        self.issue_next(out);
        route
    }

    /// Consumes world events, issuing the next move order on each arrival.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if matches!(event, Event::HeroArrived { .. }) {
                self.issue_next(out);
            }
        }
    }

    /// Reports whether route nodes remain to be issued.
    #[must_use]
    pub fn is_escorting(&self) -> bool {
        !self.pending.is_empty()
    }

    /// World-space points of the not-yet-visited part of the route.
    pub fn remaining_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.pending.iter().map(|node| node.point)
    }

    fn issue_next(&mut self, out: &mut Vec<Command>) {
        let Some(gait) = self.gait else {
            return;
        };

        if let Some(node) = self.pending.pop_front() {
            out.push(Command::MoveHero {
                target: node.point,
                gait,
            });
        } else {
            self.gait = None;
        }
    }
}
