use crate::gpx_types::Waypoint;

/// Axis-aligned bounding box over longitude and latitude, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Minimal enclosing box of a waypoint set. None when the set is empty.
    pub fn from_waypoints(waypoints: &[Waypoint]) -> Option<Self> {
        let first = waypoints.first()?;
        let mut bbox = BoundingBox {
            min_lon: first.lon,
            min_lat: first.lat,
            max_lon: first.lon,
            max_lat: first.lat,
        };
        for wpt in &waypoints[1..] {
            bbox.min_lon = bbox.min_lon.min(wpt.lon);
            bbox.min_lat = bbox.min_lat.min(wpt.lat);
            bbox.max_lon = bbox.max_lon.max(wpt.lon);
            bbox.max_lat = bbox.max_lat.max(wpt.lat);
        }
        Some(bbox)
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Inset each edge by `margin` times the axis span; negative margins
    /// widen the box. A zero-span axis passes through untouched, and an
    /// inset past the midpoint collapses the axis there instead of
    /// inverting min/max ordering.
    pub fn expand(&self, margin: f64) -> Self {
        let dx = self.width() * margin;
        let dy = self.height() * margin;
        let mut out = BoundingBox {
            min_lon: self.min_lon + dx,
            min_lat: self.min_lat + dy,
            max_lon: self.max_lon - dx,
            max_lat: self.max_lat - dy,
        };
        if out.min_lon > out.max_lon {
            let mid = (self.min_lon + self.max_lon) / 2.0;
            out.min_lon = mid;
            out.max_lon = mid;
        }
        if out.min_lat > out.max_lat {
            let mid = (self.min_lat + self.max_lat) / 2.0;
            out.min_lat = mid;
            out.max_lat = mid;
        }
        out
    }

    /// Grow either axis to at least `min_span`, centered, so a single
    /// waypoint still yields a drawable extent.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        let mut out = *self;
        if out.width() < min_span {
            let mid = (out.min_lon + out.max_lon) / 2.0;
            out.min_lon = mid - min_span / 2.0;
            out.max_lon = mid + min_span / 2.0;
        }
        if out.height() < min_span {
            let mid = (out.min_lat + out.max_lat) / 2.0;
            out.min_lat = mid - min_span / 2.0;
            out.max_lat = mid + min_span / 2.0;
        }
        out
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURVEY_BOX: BoundingBox = BoundingBox {
        min_lon: 129.99452,
        min_lat: 33.44370,
        max_lon: 130.02643,
        max_lat: 33.44757,
    };

    #[test]
    fn test_from_waypoints() {
        let waypoints = vec![
            Waypoint::new(33.44370, 130.02643),
            Waypoint::new(33.44757, 129.99452),
            Waypoint::new(33.44500, 130.00100),
        ];
        let bbox = BoundingBox::from_waypoints(&waypoints).unwrap();
        assert_eq!(bbox, SURVEY_BOX);
    }

    #[test]
    fn test_from_empty_set() {
        assert!(BoundingBox::from_waypoints(&[]).is_none());
    }

    #[test]
    fn test_expand_zero_is_identity() {
        assert_eq!(SURVEY_BOX.expand(0.0), SURVEY_BOX);
    }

    #[test]
    fn test_negative_margin_widens() {
        let out = SURVEY_BOX.expand(-0.1);
        assert!(out.min_lon < SURVEY_BOX.min_lon);
        assert!(out.min_lat < SURVEY_BOX.min_lat);
        assert!(out.max_lon > SURVEY_BOX.max_lon);
        assert!(out.max_lat > SURVEY_BOX.max_lat);
        assert!(out.contains(SURVEY_BOX.min_lon, SURVEY_BOX.min_lat));
        assert!(out.contains(SURVEY_BOX.max_lon, SURVEY_BOX.max_lat));
    }

    #[test]
    fn test_positive_margin_shrinks_without_inverting() {
        let out = SURVEY_BOX.expand(0.25);
        assert!(out.min_lon > SURVEY_BOX.min_lon);
        assert!(out.max_lon < SURVEY_BOX.max_lon);
        assert!(out.min_lon <= out.max_lon);
        assert!(out.min_lat <= out.max_lat);
    }

    #[test]
    fn test_overshoot_collapses_to_midpoint() {
        let out = SURVEY_BOX.expand(0.75);
        assert_eq!(out.min_lon, out.max_lon);
        assert_eq!(out.min_lat, out.max_lat);
        assert!((out.min_lon - (SURVEY_BOX.min_lon + SURVEY_BOX.max_lon) / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_point_expand_is_noop() {
        let point = BoundingBox {
            min_lon: 130.0,
            min_lat: 33.4,
            max_lon: 130.0,
            max_lat: 33.4,
        };
        assert_eq!(point.expand(-0.5), point);
        assert_eq!(point.expand(0.5), point);
    }

    #[test]
    fn test_with_min_span_on_single_point() {
        let point = BoundingBox {
            min_lon: 130.0,
            min_lat: 33.4,
            max_lon: 130.0,
            max_lat: 33.4,
        };
        let out = point.with_min_span(1e-4);
        assert!((out.width() - 1e-4).abs() < 1e-12);
        assert!((out.height() - 1e-4).abs() < 1e-12);
        assert!(out.contains(130.0, 33.4));
    }

    #[test]
    fn test_with_min_span_keeps_wide_axis() {
        let out = SURVEY_BOX.with_min_span(1e-4);
        assert_eq!(out.min_lon, SURVEY_BOX.min_lon);
        assert_eq!(out.max_lon, SURVEY_BOX.max_lon);
    }
}
