//! Great-circle distance helpers.

use crate::place::Coordinate;

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Meters per statute mile, as the upstream search radius expects meters.
pub const METERS_PER_MILE: f64 = 1609.34;

/// Haversine distance between two coordinates, in miles.
#[must_use]
pub fn haversine_miles(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
    // Clamp guards against h drifting a hair above 1.0 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_MILES * c
}

#[must_use]
pub fn miles_to_meters(miles: f64) -> f64 {
    miles * METERS_PER_MILE
}

#[cfg(test)]
mod tests {
    use super::*;

    const DENVER: Coordinate = Coordinate {
        lat: 39.7392,
        lng: -104.9903,
    };
    const BOULDER: Coordinate = Coordinate {
        lat: 40.01499,
        lng: -105.27055,
    };

    #[test]
    fn identical_points_are_zero_apart() {
        assert!(haversine_miles(DENVER, DENVER).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_miles(DENVER, BOULDER);
        let back = haversine_miles(BOULDER, DENVER);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn denver_to_boulder_is_about_25_miles() {
        let d = haversine_miles(DENVER, BOULDER);
        assert!((20.0..30.0).contains(&d), "unexpected distance {d}");
    }

    #[test]
    fn one_degree_of_latitude_is_about_69_miles() {
        let d = haversine_miles(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((d - 69.09).abs() < 0.1, "unexpected distance {d}");
    }

    #[test]
    fn miles_to_meters_uses_statute_mile() {
        assert!((miles_to_meters(10.0) - 16_093.4).abs() < 1e-6);
    }
}
