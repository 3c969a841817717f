//! SVG export via Plotters.

use std::path::Path;

use plotters::prelude::*;

use crate::chart::{ChartSpec, fmt_x_month};
use crate::error::AppError;

/// Draw the chart into an SVG file.
pub fn write_svg(path: &Path, spec: &ChartSpec) -> Result<(), AppError> {
    draw(path, spec).map_err(|e| {
        AppError::processing(format!("Failed to render chart '{}': {e}", path.display()))
    })?;
    tracing::info!(path = %path.display(), "chart written");
    Ok(())
}

fn draw(path: &Path, spec: &ChartSpec) -> Result<(), Box<dyn std::error::Error>> {
    let layout = &spec.layout;
    let root = SVGBackend::new(path, (layout.width, layout.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x0, x1) = spec.x_range();
    let (y0, y1) = spec.y_range();

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("{} · {}", layout.title, layout.subtitle),
            ("sans-serif", 22).into_font(),
        )
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .light_line_style(&WHITE)
        .bold_line_style(&RGBColor(0xE5, 0xEC, 0xF6))
        .x_desc(layout.xaxis.title.as_str())
        .y_desc(layout.yaxis.title.as_str())
        .x_labels(8)
        .y_labels(8)
        .x_label_formatter(&|v| fmt_x_month(*v))
        .y_label_formatter(&|v| format!("{v:.1}"))
        .draw()?;

    for trace in &spec.traces {
        let (r, g, b) = trace.indicator.color_rgb();
        let style = RGBColor(r, g, b).stroke_width(trace.line.width);
        for run in trace.finite_runs() {
            chart.draw_series(LineSeries::new(run, style))?;
        }

        // Registered separately so the legend entry exists even with no runs.
        chart
            .draw_series(LineSeries::new(Vec::<(f64, f64)>::new(), style))?
            .label(trace.name.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    if layout.showlegend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::process;
    use crate::domain::RawObservation;

    fn spec() -> ChartSpec {
        let raw: Vec<RawObservation> = (0..24)
            .map(|i| {
                let (y, m) = (2021 + i / 12, i % 12 + 1);
                RawObservation::new(format!("01/{m:02}/{y}"), format!("{}", 0.1 * (i % 5) as f64))
            })
            .collect();
        ChartSpec::from_run(&process(&raw, &raw).unwrap()).with_size(640, 400)
    }

    #[test]
    fn writes_an_svg_with_both_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        write_svg(&path, &spec()).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("IPCA"));
        assert!(svg.contains("IGP-M"));
        assert!(svg.contains("Percentual (%)"));
    }

    #[test]
    fn empty_chart_still_renders_a_frame() {
        let raw = vec![RawObservation::new("01/01/2023", "0.5")];
        let spec = ChartSpec::from_run(&process(&raw, &raw).unwrap());
        assert!(!spec.has_points());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.svg");
        write_svg(&path, &spec).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn extreme_values_render_without_stalling() {
        let mut spec = spec();
        spec.traces[0].y[0] = -1e308;
        spec.traces[1].y[0] = 1e308;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extreme.svg");
        write_svg(&path, &spec).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("IGP-M"));
    }

    #[test]
    fn missing_windows_leave_a_gap() {
        let mut spec = spec();
        let solid = spec.clone();
        spec.traces[0].y[5] = f64::NAN;

        let dir = tempfile::tempdir().unwrap();
        let (a, b) = (dir.path().join("solid.svg"), dir.path().join("gap.svg"));
        write_svg(&a, &solid).unwrap();
        write_svg(&b, &spec).unwrap();

        let count = |p: &Path| std::fs::read_to_string(p).unwrap().matches("<polyline").count();
        assert_eq!(count(&b), count(&a) + 1);
    }

    #[test]
    fn unwritable_path_is_a_processing_error() {
        let err = write_svg(Path::new("/definitely/not/a/dir/chart.svg"), &spec()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Processing);
    }
}
