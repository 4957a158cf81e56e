use crate::errors::SyncError;
use crate::models::DifficultyProgress;
use chrono::{DateTime, Local, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;

pub const DEFAULT_SYNC_URL: &str = "https://leetcode.com/graphql";

const PROFILE_QUERY: &str = r#"
query getUserProfile($username: String!) {
  allQuestionsCount {
    difficulty
    count
  }
  matchedUser(username: $username) {
    submitStats {
      acSubmissionNum {
        difficulty
        count
      }
    }
    userCalendar {
      submissionCalendar
    }
  }
}
"#;

/// One fetch from the remote source: cumulative per-day totals plus the
/// solved-vs-total breakdown per difficulty. Nothing here touches the ledger.
#[derive(Debug)]
pub struct SyncSnapshot {
    pub daily_counts: BTreeMap<NaiveDate, u32>,
    pub breakdown: Vec<DifficultyProgress>,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ProfileData>,
}

#[derive(Debug, Deserialize)]
struct ProfileData {
    #[serde(rename = "allQuestionsCount", default)]
    all_questions: Vec<DifficultyCount>,
    #[serde(rename = "matchedUser")]
    matched_user: Option<MatchedUser>,
}

#[derive(Debug, Deserialize)]
struct DifficultyCount {
    difficulty: String,
    count: u32,
}

#[derive(Debug, Deserialize)]
struct MatchedUser {
    #[serde(rename = "submitStats")]
    submit_stats: SubmitStats,
    #[serde(rename = "userCalendar")]
    user_calendar: UserCalendar,
}

#[derive(Debug, Deserialize)]
struct SubmitStats {
    #[serde(rename = "acSubmissionNum")]
    ac_submission_num: Vec<DifficultyCount>,
}

#[derive(Debug, Deserialize)]
struct UserCalendar {
    #[serde(rename = "submissionCalendar")]
    submission_calendar: String,
}

pub async fn fetch_submission_history(
    client: &Client,
    url: &str,
    username: &str,
) -> Result<SyncSnapshot, SyncError> {
    let body = json!({
        "operationName": "getUserProfile",
        "variables": { "username": username },
        "query": PROFILE_QUERY,
    });

    let response = client
        .post(url)
        .header("Referer", format!("https://leetcode.com/{username}/"))
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SyncError::Status(status.as_u16()));
    }

    let payload: GraphqlResponse = response
        .json()
        .await
        .map_err(|err| SyncError::Payload(err.to_string()))?;

    parse_profile(payload, username)
}

fn parse_profile(payload: GraphqlResponse, username: &str) -> Result<SyncSnapshot, SyncError> {
    let data = payload
        .data
        .ok_or_else(|| SyncError::Payload("response carried no data".into()))?;
    let user = data
        .matched_user
        .ok_or_else(|| SyncError::UnknownUser(username.to_string()))?;

    Ok(SyncSnapshot {
        daily_counts: parse_calendar(&user.user_calendar.submission_calendar)?,
        breakdown: build_breakdown(&user.submit_stats.ac_submission_num, &data.all_questions),
    })
}

/// The calendar field is a JSON string embedding its own object: epoch
/// seconds (as string keys) mapped to the cumulative count for that day.
fn parse_calendar(raw: &str) -> Result<BTreeMap<NaiveDate, u32>, SyncError> {
    let entries: BTreeMap<String, u32> = serde_json::from_str(raw)
        .map_err(|err| SyncError::Payload(format!("bad submission calendar: {err}")))?;

    let mut daily = BTreeMap::new();
    for (timestamp, count) in entries {
        let seconds: i64 = timestamp
            .parse()
            .map_err(|_| SyncError::Payload(format!("bad timestamp {timestamp:?}")))?;
        let date = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| SyncError::Payload(format!("timestamp {seconds} out of range")))?
            .with_timezone(&Local)
            .date_naive();
        // two timestamps can land on the same local day; totals are
        // cumulative, so the larger one wins
        let slot = daily.entry(date).or_insert(0);
        *slot = (*slot).max(count);
    }
    Ok(daily)
}

fn build_breakdown(
    solved: &[DifficultyCount],
    all_questions: &[DifficultyCount],
) -> Vec<DifficultyProgress> {
    all_questions
        .iter()
        .map(|entry| DifficultyProgress {
            difficulty: entry.difficulty.clone(),
            total: entry.count,
            solved: solved
                .iter()
                .find(|item| item.difficulty == entry.difficulty)
                .map_or(0, |item| item.count),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_date(seconds: i64) -> NaiveDate {
        DateTime::from_timestamp(seconds, 0)
            .unwrap()
            .with_timezone(&Local)
            .date_naive()
    }

    #[test]
    fn calendar_entries_map_to_local_dates() {
        let day_one = 1_712_000_000i64;
        let day_two = day_one + 86_400;
        let raw = format!("{{\"{day_one}\": 3, \"{day_two}\": 5}}");

        let daily = parse_calendar(&raw).unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[&local_date(day_one)], 3);
        assert_eq!(daily[&local_date(day_two)], 5);
    }

    #[test]
    fn same_day_timestamps_keep_the_larger_total() {
        let morning = 1_712_000_000i64;
        let later = morning + 60;
        let raw = format!("{{\"{morning}\": 2, \"{later}\": 6}}");

        let daily = parse_calendar(&raw).unwrap();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[&local_date(morning)], 6);
    }

    #[test]
    fn calendar_rejects_non_numeric_keys() {
        assert!(parse_calendar("{\"soon\": 2}").is_err());
        assert!(parse_calendar("not json").is_err());
    }

    #[test]
    fn profile_payload_parses_end_to_end() {
        let body = r#"{
            "data": {
                "allQuestionsCount": [
                    {"difficulty": "All", "count": 3200},
                    {"difficulty": "Easy", "count": 800}
                ],
                "matchedUser": {
                    "submitStats": {
                        "acSubmissionNum": [
                            {"difficulty": "All", "count": 120},
                            {"difficulty": "Easy", "count": 80}
                        ]
                    },
                    "userCalendar": {
                        "submissionCalendar": "{\"1712000000\": 4}"
                    }
                }
            }
        }"#;

        let payload: GraphqlResponse = serde_json::from_str(body).unwrap();
        let snapshot = parse_profile(payload, "someone").unwrap();
        assert_eq!(snapshot.daily_counts.len(), 1);
        assert_eq!(snapshot.breakdown.len(), 2);
        assert_eq!(snapshot.breakdown[0].difficulty, "All");
        assert_eq!(snapshot.breakdown[0].solved, 120);
        assert_eq!(snapshot.breakdown[0].total, 3200);
    }

    #[test]
    fn unknown_users_are_reported_as_such() {
        let payload: GraphqlResponse =
            serde_json::from_str(r#"{"data": {"allQuestionsCount": [], "matchedUser": null}}"#)
                .unwrap();
        let err = parse_profile(payload, "ghost").unwrap_err();
        assert!(matches!(err, SyncError::UnknownUser(name) if name == "ghost"));
    }

    #[test]
    fn missing_difficulties_default_to_zero_solved() {
        let all = vec![DifficultyCount {
            difficulty: "Hard".into(),
            count: 600,
        }];
        let breakdown = build_breakdown(&[], &all);
        assert_eq!(breakdown[0].solved, 0);
        assert_eq!(breakdown[0].total, 600);
    }
}
