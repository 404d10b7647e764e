use std::error::Error;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::error::RenderError;
use crate::timeline::Dataset;

// TryHackMe brand-ish palette for the primary series.
const LINE_COLOR: RGBColor = RGBColor(0x2c, 0x7f, 0xb8);
const FILL_COLOR: RGBColor = RGBColor(0x7f, 0xcd, 0xbb);

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub title: String,
}

/// Draw every non-empty timeline into one SVG chart. A single user gets a
/// filled area under the line; multiple users get one line each plus a
/// legend.
pub fn render_chart(dataset: &Dataset, options: &RenderOptions) -> Result<(), RenderError> {
    ensure_svg_output(&options.output)?;
    if !dataset.has_data() {
        return Err(RenderError::EmptyDataset);
    }

    let (start, end) = dataset.date_span().ok_or(RenderError::EmptyDataset)?;
    let (start, end) = padded_span(start, end);
    let y_max = y_axis_ceiling(dataset.max_count());
    let label_format = x_label_format((end - start).num_days());

    let root = SVGBackend::new(&options.output, (options.width, options.height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&options.title, ("sans-serif", 22))
        .margin(12)
        .x_label_area_size(34)
        .y_label_area_size(46)
        .build_cartesian_2d(start..end, 0u32..y_max)
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .x_labels(8)
        .x_desc("Date")
        .y_desc("Daily count")
        .x_label_formatter(&|date: &NaiveDate| date.format(label_format).to_string())
        .light_line_style(BLACK.mix(0.08))
        .draw()
        .map_err(draw_error)?;

    let drawn: Vec<_> = dataset
        .users
        .iter()
        .filter(|user| !user.timeline.is_empty())
        .collect();
    let multi = drawn.len() > 1;

    for (index, user) in drawn.iter().enumerate() {
        let points = user.timeline.iter().map(|(&date, &count)| (date, count));
        if multi {
            let color = series_color(index);
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))
                .map_err(draw_error)?
                .label(user.username.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
        } else {
            chart
                .draw_series(
                    AreaSeries::new(points, 0u32, FILL_COLOR.mix(0.3))
                        .border_style(LINE_COLOR.stroke_width(1)),
                )
                .map_err(draw_error)?;
        }
    }

    if multi {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK.mix(0.4))
            .draw()
            .map_err(draw_error)?;
    }

    root.present().map_err(draw_error)?;
    Ok(())
}

fn ensure_svg_output(path: &Path) -> Result<(), RenderError> {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("svg") => Ok(()),
        _ => Err(RenderError::UnsupportedFormat(path.display().to_string())),
    }
}

// A one-day span collapses the x axis; pad it out a day on each side.
fn padded_span(start: NaiveDate, end: NaiveDate) -> (NaiveDate, NaiveDate) {
    if start == end {
        (start - Duration::days(1), end + Duration::days(1))
    } else {
        (start, end)
    }
}

// Leave ~10% headroom above the tallest point so the line never touches
// the chart frame.
fn y_axis_ceiling(max_count: u32) -> u32 {
    max_count + (max_count / 10).max(1)
}

fn x_label_format(span_days: i64) -> &'static str {
    if span_days <= 120 {
        "%b %-d"
    } else {
        "%b %Y"
    }
}

fn series_color(index: usize) -> RGBAColor {
    if index == 0 {
        LINE_COLOR.to_rgba()
    } else {
        Palette99::pick(index).to_rgba()
    }
}

fn draw_error<E>(err: DrawingAreaErrorKind<E>) -> RenderError
where
    E: Error + Send + Sync,
{
    RenderError::Backend(err.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::fs;

    use crate::timeline::UserActivity;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn user(name: &str, points: &[(NaiveDate, u32)]) -> UserActivity {
        UserActivity {
            username: name.to_string(),
            timeline: points.iter().copied().collect::<BTreeMap<_, _>>(),
        }
    }

    fn tmp_svg(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("hacktivity-{}-{}.svg", tag, std::process::id()))
    }

    fn options(output: PathBuf, title: &str) -> RenderOptions {
        RenderOptions {
            output,
            width: 640,
            height: 320,
            title: title.to_string(),
        }
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let result = render_chart(
            &Dataset::default(),
            &options(tmp_svg("empty"), "nothing"),
        );
        assert!(matches!(result, Err(RenderError::EmptyDataset)));
    }

    #[test]
    fn non_svg_output_is_rejected() {
        let dataset = Dataset {
            users: vec![user("someone", &[(date(2024, 1, 1), 3)])],
        };
        let result = render_chart(
            &dataset,
            &options(PathBuf::from("chart.png"), "wrong format"),
        );
        assert!(matches!(result, Err(RenderError::UnsupportedFormat(_))));
    }

    #[test]
    fn single_user_chart_renders_to_svg() {
        let output = tmp_svg("single");
        let dataset = Dataset {
            users: vec![user(
                "ta1al",
                &[
                    (date(2024, 1, 1), 0),
                    (date(2024, 1, 2), 4),
                    (date(2024, 1, 3), 1),
                ],
            )],
        };

        render_chart(
            &dataset,
            &options(output.clone(), "TryHackMe Activity for ta1al in 2024"),
        )
        .unwrap();

        let body = fs::read_to_string(&output).unwrap();
        assert!(body.contains("<svg"));
        fs::remove_file(&output).ok();
    }

    #[test]
    fn multi_user_chart_carries_a_legend() {
        let output = tmp_svg("multi");
        let dataset = Dataset {
            users: vec![
                user("ta1al", &[(date(2024, 1, 1), 2), (date(2024, 1, 5), 6)]),
                user("Wardet.Wahaj", &[(date(2024, 1, 2), 3)]),
            ],
        };

        render_chart(
            &dataset,
            &options(output.clone(), "TryHackMe Activity in 2024"),
        )
        .unwrap();

        let body = fs::read_to_string(&output).unwrap();
        assert!(body.contains("<svg"));
        assert!(body.contains("ta1al"));
        assert!(body.contains("Wardet.Wahaj"));
        fs::remove_file(&output).ok();
    }

    #[test]
    fn one_day_span_is_padded() {
        let day = date(2024, 6, 15);
        assert_eq!(padded_span(day, day), (date(2024, 6, 14), date(2024, 6, 16)));
        let other = date(2024, 6, 20);
        assert_eq!(padded_span(day, other), (day, other));
    }

    #[test]
    fn y_axis_always_clears_the_data() {
        assert_eq!(y_axis_ceiling(0), 1);
        assert_eq!(y_axis_ceiling(9), 10);
        assert_eq!(y_axis_ceiling(100), 110);
    }

    #[test]
    fn short_spans_label_days_and_long_spans_label_months() {
        assert_eq!(x_label_format(30), "%b %-d");
        assert_eq!(x_label_format(120), "%b %-d");
        assert_eq!(x_label_format(365), "%b %Y");
    }

    #[test]
    fn first_series_uses_the_brand_color() {
        assert_eq!(series_color(0), LINE_COLOR.to_rgba());
        assert_ne!(series_color(1), series_color(2));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(ensure_svg_output(Path::new("out.svg")).is_ok());
        assert!(ensure_svg_output(Path::new("out.SVG")).is_ok());
        assert!(ensure_svg_output(Path::new("out.png")).is_err());
        assert!(ensure_svg_output(Path::new("out")).is_err());
    }
}
