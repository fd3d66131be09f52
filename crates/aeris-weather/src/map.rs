//! Link into the OpenStreetMap embeddable viewer, centred on a location.

use url::Url;

use crate::types::{Location, LocationError};

const MAP_VIEWER_BASE: &str = "https://www.openstreetmap.org/export/embed.html";

/// Half-width of the bounding box around the marker, in degrees
const BBOX_MARGIN_DEG: f64 = 0.01;

/// Build the viewer URL for a location.
///
/// `(0.0, 0.0)` is what an unset location looks like, so it is rejected.
pub fn map_viewer_url(location: &Location) -> Result<Url, LocationError> {
    let (lat, lon) = (location.latitude, location.longitude);
    if lat == 0.0 && lon == 0.0 {
        return Err(LocationError::InvalidCoordinates {
            latitude: lat,
            longitude: lon,
        });
    }

    let raw = format!(
        "{}?bbox={},{},{},{}&layer=mapnik&marker={},{}",
        MAP_VIEWER_BASE,
        lon - BBOX_MARGIN_DEG,
        lat - BBOX_MARGIN_DEG,
        lon + BBOX_MARGIN_DEG,
        lat + BBOX_MARGIN_DEG,
        lat,
        lon
    );

    Url::parse(&raw).map_err(|e| LocationError::Other(e.to_string()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;

    fn location(latitude: f64, longitude: f64) -> Location {
        Location {
            latitude,
            longitude,
            accuracy_meters: None,
            city_name: None,
        }
    }

    #[test]
    fn test_map_url_layout() {
        let url = map_viewer_url(&location(40.5, -3.5)).unwrap();
        assert_eq!(url.host_str(), Some("www.openstreetmap.org"));
        assert_eq!(url.path(), "/export/embed.html");

        let query = url.query().unwrap();
        assert!(query.starts_with("bbox="));
        assert!(query.contains("&layer=mapnik"));
        assert!(query.ends_with("&marker=40.5,-3.5"));
    }

    #[test]
    fn test_map_url_bbox_values() {
        let url = map_viewer_url(&location(40.5, -3.5)).unwrap();
        let bbox = url
            .query_pairs()
            .find(|(k, _)| k == "bbox")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        let parts: Vec<f64> = bbox.split(',').map(|p| p.parse().unwrap()).collect();
        assert_eq!(parts.len(), 4);
        assert!((parts[0] - (-3.51)).abs() < 1e-9);
        assert!((parts[1] - 40.49).abs() < 1e-9);
        assert!((parts[2] - (-3.49)).abs() < 1e-9);
        assert!((parts[3] - 40.51).abs() < 1e-9);
    }

    #[test]
    fn test_map_url_rejects_origin() {
        let result = map_viewer_url(&location(0.0, 0.0));
        assert!(matches!(
            result,
            Err(LocationError::InvalidCoordinates { .. })
        ));
    }
}
