use crate::point::Point;

/// Neutral importance when a cell carries no usable dispersion signal.
const NEUTRAL_IMPORTANCE: f64 = 1.0;

/// Axis-aligned lattice cell. Corners are recorded at construction and
/// never change; membership mutates as the tour is built. The centroid
/// and dispersion cost are refreshed on every membership change.
#[derive(Clone, Debug)]
pub struct Cell {
    /// Corner order: bottom-left, top-left, bottom-right, top-right.
    corners: [Point; 4],
    members: Vec<Point>,
    centroid: Point,
    cost: f64,
}

impl Cell {
    pub fn new(corners: [Point; 4]) -> Self {
        let mut cell = Self {
            corners,
            members: Vec::new(),
            centroid: Point::ZERO,
            cost: 0.0,
        };
        cell.refresh();
        cell
    }

    pub fn x_bounds(&self) -> (f64, f64) {
        (self.corners[0].x, self.corners[2].x)
    }

    pub fn y_bounds(&self) -> (f64, f64) {
        (self.corners[0].y, self.corners[1].y)
    }

    /// Inclusive on all four edges. A point on a shared boundary matches
    /// both adjacent cells; callers resolve that by scanning cells in
    /// construction order and taking the first match.
    pub fn contains(&self, point: &Point) -> bool {
        let (x_min, x_max) = self.x_bounds();
        let (y_min, y_max) = self.y_bounds();
        (x_min..=x_max).contains(&point.x) && (y_min..=y_max).contains(&point.y)
    }

    pub fn add(&mut self, point: Point) {
        self.members.push(point);
        self.refresh();
    }

    /// Removes the first member with equal coordinates. Returns whether
    /// a member was removed.
    pub fn remove(&mut self, point: &Point) -> bool {
        let Some(index) = self.members.iter().position(|member| member == point) else {
            return false;
        };
        self.members.remove(index);
        self.refresh();
        true
    }

    /// Mean member coordinate, or the corner mean while the cell is empty
    /// so the cell always offers a defined reference.
    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Sum of member distances to the centroid. Zero for empty and
    /// single-member cells.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Ratio of the point's distance-to-centroid over the cell cost.
    /// Neutral (1.0) when the cell is empty or its dispersion is zero.
    pub fn point_importance(&self, point: &Point) -> f64 {
        if self.members.is_empty() || self.cost == 0.0 {
            return NEUTRAL_IMPORTANCE;
        }
        point.dist(&self.centroid) / self.cost
    }

    pub fn side_len(&self) -> f64 {
        let (x_min, x_max) = self.x_bounds();
        x_max - x_min
    }

    pub fn members(&self) -> &[Point] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    fn refresh(&mut self) {
        self.centroid = if self.members.is_empty() {
            Self::mean(&self.corners)
        } else {
            Self::mean(&self.members)
        };
        self.cost = self
            .members
            .iter()
            .map(|member| member.dist(&self.centroid))
            .sum();
    }

    fn mean(points: &[Point]) -> Point {
        let mut sum = Point::ZERO;
        for point in points {
            sum = sum + *point;
        }
        sum / points.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::Cell;
    use crate::point::Point;

    fn unit_cell(x0: f64, y0: f64, side: f64) -> Cell {
        Cell::new([
            Point::new(x0, y0),
            Point::new(x0, y0 + side),
            Point::new(x0 + side, y0),
            Point::new(x0 + side, y0 + side),
        ])
    }

    #[test]
    fn contains_is_inclusive_on_all_edges() {
        let cell = unit_cell(0.0, 0.0, 10.0);
        assert!(cell.contains(&Point::new(0.0, 0.0)));
        assert!(cell.contains(&Point::new(10.0, 10.0)));
        assert!(cell.contains(&Point::new(0.0, 10.0)));
        assert!(cell.contains(&Point::new(5.0, 0.0)));
        assert!(!cell.contains(&Point::new(10.000001, 5.0)));
        assert!(!cell.contains(&Point::new(5.0, -0.000001)));
    }

    #[test]
    fn empty_cell_centroid_is_corner_mean() {
        let cell = unit_cell(10.0, 20.0, 10.0);
        assert_eq!(cell.centroid(), Point::new(15.0, 25.0));
        assert!(cell.cost().abs() < 1e-12);
    }

    #[test]
    fn centroid_tracks_member_mean() {
        let mut cell = unit_cell(0.0, 0.0, 10.0);
        cell.add(Point::new(2.0, 2.0));
        cell.add(Point::new(8.0, 8.0));
        assert_eq!(cell.centroid(), Point::new(5.0, 5.0));
    }

    #[test]
    fn cost_is_zero_for_single_member() {
        let mut cell = unit_cell(0.0, 0.0, 10.0);
        cell.add(Point::new(7.0, 3.0));
        assert!(cell.cost().abs() < 1e-12);
    }

    #[test]
    fn cost_sums_member_distances_to_centroid() {
        let mut cell = unit_cell(0.0, 0.0, 10.0);
        cell.add(Point::new(2.0, 2.0));
        cell.add(Point::new(8.0, 8.0));
        let expected = 2.0 * Point::new(2.0, 2.0).dist(&Point::new(5.0, 5.0));
        assert!((cell.cost() - expected).abs() < 1e-12);
    }

    #[test]
    fn remove_refreshes_aggregates() {
        let mut cell = unit_cell(0.0, 0.0, 10.0);
        cell.add(Point::new(2.0, 2.0));
        cell.add(Point::new(8.0, 8.0));
        assert!(cell.remove(&Point::new(8.0, 8.0)));
        assert_eq!(cell.len(), 1);
        assert_eq!(cell.centroid(), Point::new(2.0, 2.0));
        assert!(cell.cost().abs() < 1e-12);
    }

    #[test]
    fn remove_reports_missing_points() {
        let mut cell = unit_cell(0.0, 0.0, 10.0);
        cell.add(Point::new(2.0, 2.0));
        assert!(!cell.remove(&Point::new(9.0, 9.0)));
        assert_eq!(cell.len(), 1);
    }

    #[test]
    fn point_importance_is_neutral_without_dispersion() {
        let mut cell = unit_cell(0.0, 0.0, 10.0);
        assert_eq!(cell.point_importance(&Point::new(1.0, 1.0)), 1.0);

        // Single member: zero cost, still neutral.
        cell.add(Point::new(4.0, 4.0));
        assert_eq!(cell.point_importance(&Point::new(1.0, 1.0)), 1.0);
    }

    #[test]
    fn point_importance_is_distance_over_cost() {
        let mut cell = unit_cell(0.0, 0.0, 10.0);
        cell.add(Point::new(2.0, 2.0));
        cell.add(Point::new(8.0, 8.0));
        // Symmetric pair: each member sits at half the total dispersion.
        assert!((cell.point_importance(&Point::new(2.0, 2.0)) - 0.5).abs() < 1e-12);
        assert!(cell.point_importance(&cell.centroid()).abs() < 1e-12);
    }

    #[test]
    fn side_len_derives_from_corners() {
        let cell = unit_cell(5.0, 0.0, 2.5);
        assert!((cell.side_len() - 2.5).abs() < 1e-12);
    }
}
