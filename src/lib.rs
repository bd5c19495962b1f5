pub mod bbox;
pub mod classifier;
pub mod error;
pub mod gpx_types;
pub mod options;
pub mod parser;
pub mod render;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::bbox::BoundingBox;
use crate::gpx_types::Group;
use crate::options::RenderOptions;

pub use crate::error::Gpx2MapError;

/// Summary of one render run.
#[derive(Debug)]
pub struct MapSummary {
    pub waypoint_count: usize,
    pub group_counts: Vec<(Group, usize)>,
    /// Minimal bounds of the waypoints, before the frame margin.
    pub bounds: BoundingBox,
}

/// Render a GPX document (as a string) to a map image at `output`.
pub fn render_map(
    gpx: &str,
    output: &Path,
    opts: &RenderOptions,
) -> Result<MapSummary, Gpx2MapError> {
    let mut waypoints = parser::parse_waypoints(gpx)?;
    if waypoints.is_empty() {
        return Err(Gpx2MapError::NoWaypoints);
    }
    debug!("parsed {} waypoints", waypoints.len());

    classifier::assign_groups(&mut waypoints);
    let bounds = BoundingBox::from_waypoints(&waypoints).ok_or(Gpx2MapError::NoWaypoints)?;
    debug!(
        "bounds: lon {:.5}..{:.5}, lat {:.5}..{:.5}",
        bounds.min_lon, bounds.max_lon, bounds.min_lat, bounds.max_lat
    );

    render::render_to_file(&waypoints, &bounds, output, opts)?;

    Ok(MapSummary {
        waypoint_count: waypoints.len(),
        group_counts: classifier::group_counts(&waypoints),
        bounds,
    })
}

/// Read a GPX file and render it to a map image at `output`.
pub fn render_map_file(
    input: &Path,
    output: &Path,
    opts: &RenderOptions,
) -> Result<MapSummary, Gpx2MapError> {
    let gpx = fs::read_to_string(input)?;
    render_map(&gpx, output, opts)
}
