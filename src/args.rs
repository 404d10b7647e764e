use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "hacktivity",
    about = "Plot TryHackMe yearly activity timelines for one or more users",
    version,
    long_about = None
)]
pub struct Args {
    /// Username or profile URL (e.g. https://tryhackme.com/p/ta1al)
    pub input: Option<String>,

    /// TryHackMe username (overridden by --users)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Comma-separated usernames or profile URLs
    #[arg(long)]
    pub users: Option<String>,

    /// Year to fetch (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Comma-separated list of years (e.g. 2023,2024,2025)
    #[arg(long)]
    pub years: Option<String>,

    /// Start year for an inclusive range
    #[arg(long)]
    pub year_start: Option<i32>,

    /// End year for an inclusive range
    #[arg(long)]
    pub year_end: Option<i32>,

    /// Output image path (SVG)
    #[arg(short, long, default_value = "thm-activity.svg")]
    pub output: PathBuf,

    /// Chart width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = 400)]
    pub height: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
