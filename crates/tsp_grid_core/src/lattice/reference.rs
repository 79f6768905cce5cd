use crate::{
    error::{Error, Result},
    lattice::cell::Cell,
    point::Point,
};

/// Global dispersion reference: the mean of all occupied cell centroids
/// plus the summed distance of those centroids to that mean. Rebuilt from
/// scratch after every membership change; no incremental updates.
#[derive(Clone, Copy, Debug)]
pub struct GlobalReference {
    coord: Point,
    cost: f64,
}

impl GlobalReference {
    /// Derives the reference from the occupied cells of a lattice.
    pub fn derive(cells: &[Cell]) -> Result<Self> {
        let mut sum = Point::ZERO;
        let mut occupied = 0usize;
        for cell in cells.iter().filter(|cell| !cell.is_empty()) {
            sum = sum + cell.centroid();
            occupied += 1;
        }
        if occupied == 0 {
            return Err(Error::EmptyLattice);
        }

        let coord = sum / occupied as f64;
        let cost = cells
            .iter()
            .filter(|cell| !cell.is_empty())
            .map(|cell| cell.centroid().dist(&coord))
            .sum();

        Ok(Self { coord, cost })
    }

    pub fn coord(&self) -> Point {
        self.coord
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Ratio of the cell centroid's distance to the reference over the
    /// aggregate cost. Neutral (1.0) when the aggregate cost is zero,
    /// which happens whenever a single cell holds all remaining points.
    pub fn cell_importance(&self, cell: &Cell) -> f64 {
        if self.cost == 0.0 {
            return 1.0;
        }
        cell.centroid().dist(&self.coord) / self.cost
    }
}

#[cfg(test)]
mod tests {
    use super::GlobalReference;
    use crate::{error::Error, lattice::cell::Cell, point::Point};

    fn cell_at(x0: f64, side: f64) -> Cell {
        Cell::new([
            Point::new(x0, 0.0),
            Point::new(x0, side),
            Point::new(x0 + side, 0.0),
            Point::new(x0 + side, side),
        ])
    }

    #[test]
    fn derive_fails_on_all_empty_lattice() {
        let cells = vec![cell_at(0.0, 10.0), cell_at(10.0, 10.0)];
        let err = GlobalReference::derive(&cells).expect_err("empty lattice");
        assert!(matches!(err, Error::EmptyLattice));
    }

    #[test]
    fn derive_averages_occupied_centroids_only() {
        let mut left = cell_at(0.0, 10.0);
        let mut right = cell_at(10.0, 10.0);
        left.add(Point::new(2.0, 2.0));
        right.add(Point::new(18.0, 2.0));
        let empty = cell_at(20.0, 10.0);

        let reference =
            GlobalReference::derive(&[left, right, empty]).expect("two occupied cells");
        assert_eq!(reference.coord(), Point::new(10.0, 2.0));
        assert!((reference.cost() - 16.0).abs() < 1e-12);
    }

    #[test]
    fn cell_importance_is_distance_over_cost() {
        let mut left = cell_at(0.0, 10.0);
        let mut right = cell_at(10.0, 10.0);
        left.add(Point::new(2.0, 2.0));
        right.add(Point::new(18.0, 2.0));
        let cells = vec![left, right];

        let reference = GlobalReference::derive(&cells).expect("occupied cells");
        assert!((reference.cell_importance(&cells[0]) - 0.5).abs() < 1e-12);
        assert!((reference.cell_importance(&cells[1]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn cell_importance_is_neutral_for_single_occupied_cell() {
        let mut only = cell_at(0.0, 10.0);
        only.add(Point::new(3.0, 3.0));
        only.add(Point::new(7.0, 7.0));
        let cells = vec![only];

        let reference = GlobalReference::derive(&cells).expect("one occupied cell");
        assert!(reference.cost().abs() < 1e-12);
        assert_eq!(reference.cell_importance(&cells[0]), 1.0);
    }

    #[test]
    fn reference_lies_within_centroid_bounds() {
        let mut a = cell_at(0.0, 10.0);
        let mut b = cell_at(10.0, 10.0);
        let mut c = cell_at(20.0, 10.0);
        a.add(Point::new(1.0, 9.0));
        b.add(Point::new(15.0, 5.0));
        c.add(Point::new(29.0, 1.0));
        let cells = vec![a, b, c];

        let reference = GlobalReference::derive(&cells).expect("occupied cells");
        let xs: Vec<f64> = cells.iter().map(|cell| cell.centroid().x).collect();
        let ys: Vec<f64> = cells.iter().map(|cell| cell.centroid().y).collect();
        let coord = reference.coord();
        assert!(coord.x >= xs.iter().cloned().fold(f64::INFINITY, f64::min));
        assert!(coord.x <= xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max));
        assert!(coord.y >= ys.iter().cloned().fold(f64::INFINITY, f64::min));
        assert!(coord.y <= ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max));
    }
}
