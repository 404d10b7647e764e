use thiserror::Error;

/// Unresolvable username or year specification. Fatal: reported with a
/// non-zero exit before any network call.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("no username could be determined")]
    MissingUsername,

    #[error("username '{0}' must not contain whitespace")]
    InvalidUsername(String),

    #[error("could not extract a username from profile URL '{0}'")]
    InvalidProfileUrl(String),

    #[error("invalid year '{0}': expected a number")]
    InvalidYear(String),

    #[error("year {0} is out of range (expected a 4-digit year)")]
    YearOutOfRange(i32),

    #[error("year range start {start} is after end {end}")]
    ReversedYearRange { start: i32, end: i32 },

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while talking to the activity API for one (user, year) pair.
/// Recovered locally: logged as a warning and treated as "no data".
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("no user id found for '{username}'")]
    MissingUserId { username: String },
}

/// Plotting failure. Fatal: reported with a non-zero exit.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no activity data to draw for any requested user or year")]
    EmptyDataset,

    #[error("unsupported output path '{0}': expected an .svg extension")]
    UnsupportedFormat(String),

    #[error("chart backend error: {0}")]
    Backend(String),
}
