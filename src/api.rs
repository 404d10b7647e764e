use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::info;

use crate::error::FetchError;

const PROFILE_URL: &str = "https://tryhackme.com/api/v2/public-profile";
const YEARLY_ACTIVITY_URL: &str = "https://tryhackme.com/api/v2/public-profile/yearly-activity";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One day of activity for one user, taken verbatim from the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

/// Blocking client for the TryHackMe public-profile API. User ids are
/// looked up once per username and memoized for the rest of the run.
pub struct ActivityClient {
    http: reqwest::blocking::Client,
    user_ids: HashMap<String, String>,
}

impl ActivityClient {
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("hacktivity/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            user_ids: HashMap::new(),
        })
    }

    /// Fetch one user's daily counts for one year. An empty result means
    /// the API has no data for that year.
    pub fn fetch(&mut self, username: &str, year: i32) -> Result<Vec<DailyCount>, FetchError> {
        let user_id = match self.user_ids.get(username) {
            Some(id) => id.clone(),
            None => {
                let id = self.lookup_user_id(username)?;
                info!(
                    action = "resolve",
                    component = "profile_lookup",
                    user = %username,
                    user_id = %id,
                    "Resolved user id"
                );
                self.user_ids.insert(username.to_string(), id.clone());
                id
            }
        };
        self.yearly_activity(&user_id, year)
    }

    fn lookup_user_id(&self, username: &str) -> Result<String, FetchError> {
        let response = self
            .http
            .get(PROFILE_URL)
            .query(&[("username", username)])
            .send()?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                endpoint: "public-profile",
                status: response.status(),
            });
        }

        let payload: ProfileEnvelope = response.json()?;
        user_id_from_payload(payload).ok_or_else(|| FetchError::MissingUserId {
            username: username.to_string(),
        })
    }

    fn yearly_activity(&self, user_id: &str, year: i32) -> Result<Vec<DailyCount>, FetchError> {
        let year_param = year.to_string();
        let response = self
            .http
            .get(YEARLY_ACTIVITY_URL)
            .query(&[("user", user_id), ("year", year_param.as_str())])
            .send()?;

        // The API reports a missing year as 404; that is "no data", not an error.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(FetchError::Status {
                endpoint: "yearly-activity",
                status: response.status(),
            });
        }

        let payload: YearlyActivityEnvelope = response.json()?;
        Ok(daily_counts_from_payload(payload))
    }
}

#[derive(Debug, Deserialize)]
struct ProfileEnvelope {
    data: Option<ProfileData>,
}

#[derive(Debug, Deserialize)]
struct ProfileData {
    #[serde(rename = "_id")]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YearlyActivityEnvelope {
    data: Option<YearlyActivityData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YearlyActivityData {
    #[serde(default)]
    yearly_activity: Vec<RawDailyCount>,
}

#[derive(Debug, Deserialize)]
struct RawDailyCount {
    #[serde(default)]
    date: String,
    count: Option<i64>,
}

fn user_id_from_payload(payload: ProfileEnvelope) -> Option<String> {
    payload
        .data
        .and_then(|data| data.id)
        .filter(|id| !id.is_empty())
}

fn daily_counts_from_payload(payload: YearlyActivityEnvelope) -> Vec<DailyCount> {
    let entries = payload
        .data
        .map(|data| data.yearly_activity)
        .unwrap_or_default();

    entries
        .into_iter()
        .filter_map(|entry| {
            // Entries with unparseable dates are dropped; missing or
            // negative counts clamp to zero.
            let date = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d").ok()?;
            let count = entry.count.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32;
            Some(DailyCount { date, count })
        })
        .collect()
}
