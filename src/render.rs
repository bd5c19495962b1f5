use std::panic;
use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};

use crate::bbox::BoundingBox;
use crate::error::Gpx2MapError;
use crate::gpx_types::{Group, Waypoint};
use crate::options::RenderOptions;

/// Smallest axis extent drawn, in degrees. Keeps a single-waypoint
/// survey from collapsing to a zero-area frame.
const MIN_AXIS_SPAN: f64 = 1e-4;

enum ImageKind {
    Png,
    Svg,
}

fn image_kind(path: &Path) -> ImageKind {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("svg") => ImageKind::Svg,
        _ => ImageKind::Png,
    }
}

fn group_color(group: Group) -> RGBColor {
    match group {
        Group::Transect1 => RGBColor(200, 0, 100),
        Group::Transect2 => RGBColor(30, 144, 255),
        Group::Transect3 => RGBColor(34, 139, 34),
        Group::Unassigned => RGBColor(110, 110, 110),
    }
}

/// Render classified waypoints into a raster (PNG) or SVG map at `path`.
pub fn render_to_file(
    waypoints: &[Waypoint],
    bounds: &BoundingBox,
    path: &Path,
    opts: &RenderOptions,
) -> Result<(), Gpx2MapError> {
    let frame = bounds.expand(opts.margin).with_min_span(MIN_AXIS_SPAN);
    let (width_px, height_px) = opts.pixel_size();

    let render = || -> Result<(), Gpx2MapError> {
        match image_kind(path) {
            ImageKind::Png => {
                let root = BitMapBackend::new(path, (width_px, height_px)).into_drawing_area();
                draw_map(&root, waypoints, &frame, opts)
                    .map_err(|e| Gpx2MapError::Render(e.to_string()))
            }
            ImageKind::Svg => {
                let root = SVGBackend::new(path, (width_px, height_px)).into_drawing_area();
                draw_map(&root, waypoints, &frame, opts)
                    .map_err(|e| Gpx2MapError::Render(e.to_string()))
            }
        }
    };

    panic::catch_unwind(panic::AssertUnwindSafe(render))
        .map_err(|_| Gpx2MapError::Render("plotting backend panicked".to_string()))?
}

fn draw_map<DB>(
    root: &DrawingArea<DB, Shift>,
    waypoints: &[Waypoint],
    frame: &BoundingBox,
    opts: &RenderOptions,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    // Sizes track dpi so a 300 dpi page prints like the 72 dpi preview.
    let dpi = opts.dpi as f64;
    let label_font = FontDesc::new(FontFamily::SansSerif, dpi * 0.09, FontStyle::Normal);
    let caption_font = FontDesc::new(FontFamily::SansSerif, dpi * 0.14, FontStyle::Normal);
    let marker_radius = (dpi / 25.0).round().max(3.0) as i32;

    let mut builder = ChartBuilder::on(root);
    builder.margin((dpi / 10.0) as u32);
    if opts.show_axes {
        builder
            .set_label_area_size(LabelAreaPosition::Left, (dpi * 0.45) as u32)
            .set_label_area_size(LabelAreaPosition::Bottom, (dpi * 0.25) as u32);
    }
    if let Some(title) = opts.title.as_deref() {
        builder.caption(title, caption_font);
    }
    let mut chart = builder.build_cartesian_2d(
        frame.min_lon..frame.max_lon,
        frame.min_lat..frame.max_lat,
    )?;

    if opts.show_axes {
        chart
            .configure_mesh()
            .x_label_formatter(&|v| format!("{v:.3}"))
            .y_label_formatter(&|v| format!("{v:.3}"))
            .x_desc("Longitude")
            .y_desc("Latitude")
            .label_style(label_font.clone())
            .draw()?;
    }

    for group in Group::ALL {
        let members: Vec<&Waypoint> = waypoints.iter().filter(|w| w.group == group).collect();
        if members.is_empty() {
            continue;
        }
        let color = group_color(group);
        let series = chart.draw_series(
            members
                .iter()
                .map(|w| Circle::new((w.lon, w.lat), marker_radius, color.filled())),
        )?;
        if opts.show_legend {
            series
                .label(group.label())
                .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));
        }
    }

    if opts.show_legend {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK.mix(0.4))
            .label_font(label_font.color(&BLACK))
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_kind_from_extension() {
        assert!(matches!(image_kind(Path::new("map.svg")), ImageKind::Svg));
        assert!(matches!(image_kind(Path::new("map.png")), ImageKind::Png));
        assert!(matches!(image_kind(Path::new("map")), ImageKind::Png));
    }

    #[test]
    fn test_group_colors_are_distinct() {
        let colors: Vec<(u8, u8, u8)> = Group::ALL
            .iter()
            .map(|&g| {
                let c = group_color(g);
                (c.0, c.1, c.2)
            })
            .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
