use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use tracing::{info, warn};

use crate::api::{ActivityClient, DailyCount};
use crate::chart::{render_chart, RenderOptions};
use crate::timeline::build_dataset;
use crate::{input, Args};

#[derive(Debug)]
pub struct RunSummary {
    pub usernames: Vec<String>,
    pub years: Vec<i32>,
    pub point_count: usize,
    pub date_span: Option<(NaiveDate, NaiveDate)>,
    pub output: PathBuf,
}

/// Resolve inputs, fetch every user/year combination, and render the chart.
/// A failed or empty fetch drops that single user/year slice; the run only
/// fails when input is unusable or nothing at all could be plotted.
pub fn plot_activity(args: &Args) -> Result<RunSummary> {
    let total_start_time = Instant::now();

    let today = Local::now().date_naive();
    let usernames = input::resolve_usernames(args)?;
    let years = input::resolve_years(args, today.year())?;
    info!(
        action = "resolve",
        component = "activity_plot",
        user_count = usernames.len(),
        years = ?years,
        "Resolved usernames and years"
    );

    let mut client = ActivityClient::new().context("failed to build HTTP client")?;
    let mut per_user = Vec::with_capacity(usernames.len());
    let mut years_with_data: BTreeSet<i32> = BTreeSet::new();

    for username in &usernames {
        let mut by_year: BTreeMap<i32, Vec<DailyCount>> = BTreeMap::new();
        for &year in &years {
            match client.fetch(username, year) {
                Ok(entries) if entries.is_empty() => {
                    info!(
                        action = "skip",
                        component = "yearly_fetch",
                        username = %username,
                        year = year,
                        "No activity recorded for this year"
                    );
                }
                Ok(entries) => {
                    years_with_data.insert(year);
                    by_year.insert(year, entries);
                }
                Err(e) => {
                    warn!(
                        action = "skip",
                        component = "yearly_fetch",
                        username = %username,
                        year = year,
                        error = %e,
                        "Fetch failed; continuing without this slice"
                    );
                }
            }
        }
        per_user.push((username.clone(), by_year));
    }

    let dataset = build_dataset(per_user, today);
    let options = RenderOptions {
        output: args.output.clone(),
        width: args.width,
        height: args.height,
        title: chart_title(&usernames, &years, &years_with_data),
    };
    render_chart(&dataset, &options)?;

    let total_time = total_start_time.elapsed();
    info!(
        action = "complete",
        component = "activity_plot",
        duration_ms = total_time.as_millis(),
        output = ?options.output,
        "Chart written"
    );

    Ok(RunSummary {
        usernames,
        years,
        point_count: dataset.total_points(),
        date_span: dataset.date_span(),
        output: options.output,
    })
}

pub fn print_run_summary(summary: &RunSummary) {
    println!("\n--- TryHackMe Activity ---");
    println!("Users: {}", summary.usernames.join(", "));
    println!(
        "Years: {}",
        summary
            .years
            .iter()
            .map(|year| year.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if let Some((start, end)) = summary.date_span {
        println!(
            "Date range: {} to {}",
            start.format("%B %-d, %Y"),
            end.format("%B %-d, %Y")
        );
    }

    println!(
        "Data points plotted: {}",
        crate::utils::format_number(summary.point_count as u32)
    );
    println!("Chart written to: {}", summary.output.display());
}

// The title names the years that actually had data, so a request for
// 2020-2025 that only found 2024 reads "in 2024". When nothing had data
// the requested years stand in.
fn chart_title(usernames: &[String], requested: &[i32], with_data: &BTreeSet<i32>) -> String {
    let label_years: Vec<i32> = if with_data.is_empty() {
        requested.to_vec()
    } else {
        with_data.iter().copied().collect()
    };
    let label = year_label(&label_years);
    match usernames {
        [single] => format!("TryHackMe Activity for {single} in {label}"),
        _ => format!("TryHackMe Activity in {label}"),
    }
}

fn year_label(years: &[i32]) -> String {
    match (years.first(), years.last()) {
        (Some(first), Some(last)) if first != last => format!("{first}-{last}"),
        (Some(first), _) => first.to_string(),
        _ => String::new(),
    }
}
