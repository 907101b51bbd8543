//! Nearest-center matching of connection endpoints

use crate::core::types::{Point, TerritoryId};

/// Territory centers in ascending id order
pub struct CenterIndex {
    centers: Vec<(TerritoryId, Point)>,
    tolerance: f64,
}

impl CenterIndex {
    pub fn new(centers: impl IntoIterator<Item = (TerritoryId, Point)>, tolerance: f64) -> Self {
        let mut centers: Vec<_> = centers.into_iter().collect();
        centers.sort_by_key(|(id, _)| *id);
        Self { centers, tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }

    /// Territory whose center is nearest to `point`, if within tolerance.
    ///
    /// Equidistant centers resolve to the lowest id.
    pub fn nearest(&self, point: Point) -> Option<TerritoryId> {
        let mut best: Option<(TerritoryId, f64)> = None;
        for (id, center) in &self.centers {
            let distance = point.distance(center);
            if !distance.is_finite() {
                continue;
            }
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((*id, distance));
            }
        }
        best.filter(|(_, d)| *d <= self.tolerance).map(|(id, _)| id)
    }
}
