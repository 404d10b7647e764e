pub mod activity;
pub mod api;
pub mod args;
pub mod chart;
pub mod error;
pub mod input;
pub mod timeline;
pub mod utils;

pub use activity::{plot_activity, print_run_summary, RunSummary};
pub use args::Args;
pub use error::{FetchError, InputError, RenderError};
pub use timeline::{Dataset, Timeline, UserActivity};
