/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance using the haversine formula.
/// Input lat/lon in degrees. Output in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1.0 for near-antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// A validated (latitude, longitude) pair in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(self.lat, self.lon, other.lat, other.lon)
    }

    /// Arithmetic mean of both endpoints. Not the geodesic midpoint: fine for
    /// trips of a couple hundred kilometers, increasingly off beyond that.
    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate::new((self.lat + other.lat) / 2.0, (self.lon + other.lon) / 2.0)
    }
}
