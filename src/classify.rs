//! Near-destination and on-route tagging.
//!
//! "On route" is a coarse heuristic: a candidate counts when it is closer to
//! the (arithmetic-mean) midpoint of the trip than half the trip length. It
//! is a disc around the midpoint, not a buffer around the path, so points well
//! off to the side of the road but near the middle are included as well.

use hashbrown::HashSet;

use crate::error::{CorridorError, Result};
use crate::geo::Coordinate;
use crate::record::PlaceRecord;

pub const DEFAULT_NEAR_RADIUS_KM: f64 = 10.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    NearDestination,
    OnRoute,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClassifierConfig {
    near_radius_km: f64,
}

impl ClassifierConfig {
    pub fn new(near_radius_km: f64) -> Result<Self> {
        if !near_radius_km.is_finite() || near_radius_km < 0.0 {
            return Err(CorridorError::InvalidRadius(near_radius_km));
        }
        Ok(Self { near_radius_km })
    }

    pub fn near_radius_km(&self) -> f64 {
        self.near_radius_km
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            near_radius_km: DEFAULT_NEAR_RADIUS_KM,
        }
    }
}

/// Per-query geometry, computed once rather than for every candidate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Corridor {
    pub start: Coordinate,
    pub end: Coordinate,
    pub midpoint: Coordinate,
    pub total_trip_km: f64,
}

impl Corridor {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self {
            start,
            end,
            midpoint: start.midpoint(&end),
            total_trip_km: start.distance_km(&end),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationResult {
    pub record: PlaceRecord,
    /// Distance from the candidate to the destination.
    pub distance_km: f64,
    pub distance_from_midpoint_km: f64,
    pub tags: HashSet<Tag>,
}

impl ClassificationResult {
    pub fn has(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

pub fn classify_one(
    corridor: &Corridor,
    candidate: &PlaceRecord,
    config: &ClassifierConfig,
) -> ClassificationResult {
    let here = candidate.coordinate();
    let distance_km = corridor.end.distance_km(&here);
    let distance_from_midpoint_km = corridor.midpoint.distance_km(&here);

    let mut tags = HashSet::new();
    if distance_km <= config.near_radius_km {
        tags.insert(Tag::NearDestination);
    }
    // Strict: a zero-length trip has nothing on route.
    if distance_from_midpoint_km < corridor.total_trip_km / 2.0 {
        tags.insert(Tag::OnRoute);
    }

    ClassificationResult {
        record: candidate.clone(),
        distance_km,
        distance_from_midpoint_km,
        tags,
    }
}

/// Classifies every candidate, keeping input order.
pub fn classify(
    start: Coordinate,
    end: Coordinate,
    candidates: &[PlaceRecord],
    config: &ClassifierConfig,
) -> Vec<ClassificationResult> {
    let corridor = Corridor::new(start, end);
    log::debug!(
        "Classifying {} candidates; trip {:.2} km, midpoint ({:.4}, {:.4})",
        candidates.len(),
        corridor.total_trip_km,
        corridor.midpoint.lat,
        corridor.midpoint.lon
    );
    candidates
        .iter()
        .map(|candidate| classify_one(&corridor, candidate, config))
        .collect()
}
