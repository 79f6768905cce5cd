use std::fmt;

use crate::{
    error::{Error, Result},
    lattice::{self, Cell, GlobalReference},
    point::Point,
};

const MIN_RESOLUTION: usize = 2;

const ERR_NO_POINTS: &str = "at least one point is required";
const ERR_RESOLUTION: &str = "resolution must be at least 2";
const ERR_NON_FINITE: &str = "coordinates must be finite";
const ERR_CANDIDATE_VANISHED: &str = "selected candidate missing from its cell";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum NavState {
    NotStarted,
    InProgress,
    Completed,
}

/// Tour construction over a uniform lattice.
///
/// Points are bucketed into cells, then the tour grows one hop at a time
/// from the start coordinate. Each hop scores every remaining point and
/// takes the cheapest; in weighted mode the raw distance is scaled by the
/// squared product of the candidate cell's point importance and the global
/// reference's cell importance, biasing the walk toward tight, central
/// clusters. Every removal refreshes the owning cell's aggregates and
/// rebuilds the global reference, so construction is strictly sequential.
#[derive(Debug)]
pub struct Solver {
    points: Vec<Point>,
    resolution: usize,
    start: Point,
    greedy: bool,
    cells: Vec<Cell>,
    reference: Option<GlobalReference>,
    state: NavState,
    visited: Vec<Point>,
}

impl Solver {
    pub fn new(points: Vec<Point>, resolution: usize, start: Point, greedy: bool) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::invalid_input(ERR_NO_POINTS));
        }
        if resolution < MIN_RESOLUTION {
            return Err(Error::invalid_input(ERR_RESOLUTION));
        }
        if !start.is_finite() || points.iter().any(|point| !point.is_finite()) {
            return Err(Error::invalid_input(ERR_NON_FINITE));
        }

        let points = points
            .into_iter()
            .enumerate()
            .map(|(index, point)| point.with_source(index))
            .collect();

        Ok(Self {
            points,
            resolution,
            start,
            greedy,
            cells: Vec::new(),
            reference: None,
            state: NavState::NotStarted,
            visited: Vec::new(),
        })
    }

    /// Builds a solver from untyped coordinate rows. A collection whose
    /// rows uniformly carry some other dimension is a shape error; a
    /// stray row of the wrong width is an invalid coordinate.
    pub fn from_rows(
        rows: &[Vec<f64>],
        resolution: usize,
        start: Point,
        greedy: bool,
    ) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::invalid_input(ERR_NO_POINTS));
        }
        let dims = rows[0].len();
        if dims != 2 && rows.iter().all(|row| row.len() == dims) {
            return Err(Error::InputShape { dims });
        }
        let points = rows
            .iter()
            .map(|row| Point::from_slice(row))
            .collect::<Result<Vec<_>>>()?;
        Self::new(points, resolution, start, greedy)
    }

    /// Runs tour construction. Calling again after completion is a no-op
    /// that returns the stored result.
    pub fn navigate(&mut self) -> Result<&[Point]> {
        if self.state == NavState::Completed {
            return Ok(&self.visited);
        }
        self.state = NavState::InProgress;

        if self.cells.is_empty() {
            self.assign_points()?;
        }

        let start_cell = self.locate_cell(&self.start)?;
        let mut start = self.start;
        start.assign_cell(start_cell);
        // The start participates in the aggregates but never re-enters
        // the candidate scan.
        self.cells[start_cell].add(start);
        self.reference = Some(GlobalReference::derive(&self.cells)?);

        self.visited.clear();
        self.visited.push(start);
        let mut current = start;

        loop {
            let Some(reference) = self.reference.as_ref() else {
                return Err(Error::EmptyLattice);
            };
            let Some((cell_index, candidate)) =
                Self::best_candidate(&self.cells, reference, &current, &start, self.greedy)
            else {
                break;
            };

            if !self.cells[cell_index].remove(&candidate) {
                return Err(Error::invalid_data(ERR_CANDIDATE_VANISHED));
            }
            self.reference = Some(GlobalReference::derive(&self.cells)?);
            self.visited.push(candidate);
            current = candidate;
        }

        self.state = NavState::Completed;
        log::info!(
            "navigate: visited={} mode={}",
            self.visited.len(),
            self.mode_name()
        );
        Ok(&self.visited)
    }

    /// Lazy accessor: runs navigation on first use, then keeps returning
    /// the same stored sequence.
    pub fn result(&mut self) -> Result<&[Point]> {
        self.navigate()
    }

    /// Read-only view for output collaborators. Unlike `result`, this
    /// never triggers a run.
    pub fn tour(&self) -> Result<&[Point]> {
        if self.state == NavState::Completed {
            Ok(&self.visited)
        } else {
            Err(Error::NoResult)
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn reference(&self) -> Option<&GlobalReference> {
        self.reference.as_ref()
    }

    pub fn points_len(&self) -> usize {
        self.points.len()
    }

    /// Buckets every input point into the first cell, in construction
    /// order, whose bounds contain it, then derives the initial global
    /// reference. Points that escape every cell are a float-precision
    /// defect and are surfaced, never dropped.
    fn assign_points(&mut self) -> Result<()> {
        let (x_max, y_max) = self.bounding_max();
        self.cells = lattice::build_cells(x_max, y_max, self.resolution);
        log::debug!(
            "lattice: cells={} x_max={x_max} y_max={y_max}",
            self.cells.len()
        );

        for index in 0..self.points.len() {
            let point = self.points[index];
            let cell_index = self.locate_cell(&point)?;
            self.points[index].assign_cell(cell_index);
            self.cells[cell_index].add(self.points[index]);
        }
        self.reference = Some(GlobalReference::derive(&self.cells)?);

        log::debug!(
            "assign: points={} occupied={}",
            self.points.len(),
            self.cells.iter().filter(|cell| !cell.is_empty()).count()
        );
        Ok(())
    }

    fn locate_cell(&self, point: &Point) -> Result<usize> {
        self.cells
            .iter()
            .position(|cell| cell.contains(point))
            .ok_or_else(|| Error::unassigned(point))
    }

    /// The bounding box is anchored at the origin; only the maxima come
    /// from the data.
    fn bounding_max(&self) -> (f64, f64) {
        let mut x_max = 0.0f64;
        let mut y_max = 0.0f64;
        for point in &self.points {
            x_max = x_max.max(point.x);
            y_max = y_max.max(point.y);
        }
        (x_max, y_max)
    }

    /// Scans all cell members in order and returns the cheapest candidate
    /// with its owning cell. Ties keep the first candidate encountered.
    /// Members matching the current position or the start coordinate are
    /// not candidates.
    fn best_candidate(
        cells: &[Cell],
        reference: &GlobalReference,
        current: &Point,
        start: &Point,
        greedy: bool,
    ) -> Option<(usize, Point)> {
        let mut best: Option<(usize, Point, f64)> = None;

        for (cell_index, cell) in cells.iter().enumerate() {
            for member in cell.members() {
                if member == current || member == start {
                    continue;
                }
                let distance = current.dist(member);
                let score = if greedy {
                    distance
                } else {
                    let weight =
                        cell.point_importance(current) * reference.cell_importance(cell);
                    distance * weight * weight
                };
                match &best {
                    Some((_, _, lowest)) if score >= *lowest => {}
                    _ => best = Some((cell_index, *member, score)),
                }
            }
        }

        best.map(|(cell_index, point, _)| (cell_index, point))
    }

    fn mode_name(&self) -> &'static str {
        if self.greedy { "greedy" } else { "weighted" }
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "points={} resolution={} start={} mode={}",
            self.points.len(),
            self.resolution,
            self.start,
            self.mode_name()
        )
    }
}
