use std::io::{self, Write};

use tracing::info;
use url::Url;

use crate::error::InputError;
use crate::Args;

/// Resolve the usernames to plot, prompting once on stdin when no flag or
/// positional value supplied one.
pub fn resolve_usernames(args: &Args) -> Result<Vec<String>, InputError> {
    let raw = match explicit_user_input(args) {
        Some(value) => value,
        None => prompt("username or profile URL")?,
    };
    parse_user_list(&raw)
}

/// Resolve the years to fetch. `--years` and the range flags combine;
/// `--year` applies only when both are absent; everything defaults to the
/// current year. The result is ascending and de-duplicated.
pub fn resolve_years(args: &Args, current_year: i32) -> Result<Vec<i32>, InputError> {
    let mut years: Vec<i32> = Vec::new();

    if let Some(list) = args.years.as_deref() {
        for item in list.split(',') {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            let year: i32 = item
                .parse()
                .map_err(|_| InputError::InvalidYear(item.to_string()))?;
            years.push(year);
        }
    }

    if args.year_start.is_some() || args.year_end.is_some() {
        let start = args.year_start.unwrap_or(current_year);
        let end = args.year_end.unwrap_or(current_year);
        if start > end {
            return Err(InputError::ReversedYearRange { start, end });
        }
        years.extend(start..=end);
    }

    if years.is_empty() {
        years.push(args.year.unwrap_or(current_year));
    }

    years.sort_unstable();
    years.dedup();

    for &year in &years {
        if !(1000..=9999).contains(&year) {
            return Err(InputError::YearOutOfRange(year));
        }
    }

    Ok(years)
}

/// Split a comma-separated list of usernames or profile URLs, normalizing
/// each item. Duplicates collapse to the first occurrence so the legend
/// order stays stable.
pub fn parse_user_list(raw: &str) -> Result<Vec<String>, InputError> {
    let mut usernames = Vec::new();
    for item in raw.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        let username = normalize_user_spec(item)?;
        if !usernames.contains(&username) {
            usernames.push(username);
        }
    }

    if usernames.is_empty() {
        return Err(InputError::MissingUsername);
    }
    Ok(usernames)
}

/// Turn a single username or profile URL into a bare username.
pub fn normalize_user_spec(spec: &str) -> Result<String, InputError> {
    let text = spec.trim();
    if text.is_empty() {
        return Err(InputError::MissingUsername);
    }

    let username = if text.starts_with("http://") || text.starts_with("https://") {
        username_from_profile_url(text)?
    } else {
        text.to_string()
    };

    if username.chars().any(char::is_whitespace) {
        return Err(InputError::InvalidUsername(username));
    }
    Ok(username)
}

fn explicit_user_input(args: &Args) -> Option<String> {
    [
        args.users.as_deref(),
        args.username.as_deref(),
        args.input.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(str::trim)
    .find(|value| !value.is_empty())
    .map(str::to_string)
}

fn username_from_profile_url(text: &str) -> Result<String, InputError> {
    let url = Url::parse(text).map_err(|_| InputError::InvalidProfileUrl(text.to_string()))?;
    let segments: Vec<&str> = url
        .path_segments()
        .map(|segments| segments.filter(|segment| !segment.is_empty()).collect())
        .unwrap_or_default();

    // Profile URLs look like https://tryhackme.com/p/<username>; anything
    // else falls back to the last path segment.
    if let Some(position) = segments.iter().position(|segment| *segment == "p") {
        if let Some(name) = segments.get(position + 1) {
            return Ok((*name).to_string());
        }
    }

    segments
        .last()
        .map(|segment| (*segment).to_string())
        .ok_or_else(|| InputError::InvalidProfileUrl(text.to_string()))
}

fn prompt(label: &str) -> Result<String, InputError> {
    info!(
        action = "prompt",
        component = "input_resolver",
        label = label,
        "No username supplied; prompting"
    );
    print!("Enter {label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
