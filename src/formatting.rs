//! Display text for games, clocks, records and stats.
//!
//! Everything here is pure: functions that depend on "today" take it as an
//! argument so callers decide which calendar day that is.

use crate::models::{Game, GameDetailsResponse, GameState, TeamInfo, TeamStats};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use phf::phf_map;
use serde_json::Value;

/// Eastern Standard Time, used when a game carries no usable offset
const DEFAULT_EASTERN_OFFSET_SECS: i32 = -5 * 3600;

/// Game start time format: "7:00 PM"
const START_TIME_FORMAT: &str = "%-I:%M %p";

/// Game start date format for days past tomorrow: "May 5"
const START_DATE_FORMAT: &str = "%b %-d";

/// Human labels for game story categories
static STAT_CATEGORY_LABELS: phf::Map<&'static str, &'static str> = phf_map! {
    "sog" => "Shots",
    "faceoffWinningPctg" => "Faceoff %",
    "powerPlay" => "Power Play",
    "powerPlayPctg" => "Power Play %",
    "pim" => "Penalty Minutes",
    "hits" => "Hits",
    "blockedShots" => "Blocked Shots",
    "giveaways" => "Giveaways",
    "takeaways" => "Takeaways",
};

/// Format a header with text and underline
///
/// # Arguments
/// * `text` - The header text to display
/// * `double_line` - If true, uses a double line (═), otherwise a single line (─)
pub fn format_header(text: &str, double_line: bool) -> String {
    let separator_char = if double_line { "═" } else { "─" };
    format!("{}\n{}\n", text, separator_char.repeat(text.chars().count()))
}

/// Parse a `±HH:MM` UTC offset
pub fn parse_utc_offset(offset: &str) -> Option<FixedOffset> {
    let (sign, rest) = match offset.as_bytes().first()? {
        b'+' => (1, &offset[1..]),
        b'-' => (-1, &offset[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// US Eastern offset in effect for a game
pub fn eastern_offset(game: &Game) -> FixedOffset {
    parse_utc_offset(&game.eastern_utc_offset).unwrap_or_else(|| {
        FixedOffset::east_opt(DEFAULT_EASTERN_OFFSET_SECS).expect("constant offset is in range")
    })
}

/// Parse an API timestamp, with or without seconds
fn parse_start_time(start_time_utc: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(start_time_utc) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(start_time_utc, "%Y-%m-%dT%H:%MZ")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Game start converted to US Eastern time
pub fn eastern_start(game: &Game) -> Option<DateTime<FixedOffset>> {
    parse_start_time(&game.start_time_utc).map(|utc| utc.with_timezone(&eastern_offset(game)))
}

/// Today's date on the US Eastern calendar, as seen from this game's offset
pub fn eastern_today(game: &Game) -> NaiveDate {
    Utc::now().with_timezone(&eastern_offset(game)).date_naive()
}

/// Text between the first `T` and the next `Z` of a raw timestamp
fn raw_time_fallback(start_time_utc: &str) -> &str {
    let after_t = start_time_utc
        .split_once('T')
        .map(|(_, rest)| rest)
        .unwrap_or(start_time_utc);
    after_t
        .split_once('Z')
        .map(|(time, _)| time)
        .unwrap_or(after_t)
}

fn format_start(game: &Game, today: NaiveDate, separator: &str) -> String {
    let Some(start) = eastern_start(game) else {
        return raw_time_fallback(&game.start_time_utc).to_string();
    };

    let game_date = start.date_naive();
    let time = start.format(START_TIME_FORMAT);
    let day = if game_date == today {
        "Today".to_string()
    } else if game_date == today + Duration::days(1) {
        "Tomorrow".to_string()
    } else {
        start.format(START_DATE_FORMAT).to_string()
    };

    format!("{}{}{}", day, separator, time)
}

/// "Today at 7:00 PM", "Tomorrow at 1:00 PM" or "May 5 at 7:30 PM"
pub fn formatted_date_time(game: &Game, today: NaiveDate) -> String {
    format_start(game, today, " at ")
}

/// Two-line variant of [`formatted_date_time`] for narrow layouts
pub fn formatted_date_time_stacked(game: &Game, today: NaiveDate) -> String {
    format_start(game, today, "\n")
}

/// 1st, 2nd, 3rd, 4th...
pub fn period_ordinal(period: i32) -> String {
    match period {
        1 => "1st".to_string(),
        2 => "2nd".to_string(),
        3 => "3rd".to_string(),
        n => format!("{}th", n),
    }
}

/// Status label used in game lists
pub fn list_status_label(state: &GameState) -> String {
    match state {
        GameState::Future => "Upcoming".to_string(),
        GameState::PreGame => "Pregame".to_string(),
        GameState::Live | GameState::Critical => "LIVE".to_string(),
        GameState::Final => "Final".to_string(),
        GameState::Official => "Official Score".to_string(),
        GameState::Other(code) => code.clone(),
    }
}

/// Status label used on the game detail header
pub fn detail_status_label(state: &GameState) -> String {
    match state {
        GameState::Future => "Upcoming Game".to_string(),
        GameState::PreGame => "Pregame".to_string(),
        GameState::Live => "LIVE".to_string(),
        GameState::Critical => "Critical Game Time".to_string(),
        GameState::Final => "Final".to_string(),
        GameState::Official => "Official Final Score".to_string(),
        GameState::Other(code) => code.clone(),
    }
}

/// Clock line shown next to the status in game lists
pub fn list_clock_text(
    game: &Game,
    details: Option<&GameDetailsResponse>,
    today: NaiveDate,
) -> String {
    if game.game_state.is_scheduled() {
        return formatted_date_time(game, today);
    }
    if game.game_state.is_complete() {
        return " ".to_string();
    }
    match details {
        Some(d) if d.clock.in_intermission => "Intermission".to_string(),
        Some(d) => format!(
            "{} Period - {}",
            period_ordinal(d.display_period),
            d.clock.time_remaining
        ),
        None if game.game_state == GameState::Critical => "In OT".to_string(),
        None => "In Game".to_string(),
    }
}

/// Clock line shown under the status on the game detail header
pub fn detail_clock_text(
    game: &Game,
    details: Option<&GameDetailsResponse>,
    today: NaiveDate,
) -> String {
    if game.game_state.is_scheduled() {
        return formatted_date_time(game, today);
    }
    if game.game_state.is_complete() {
        return "Game Complete".to_string();
    }
    match details {
        Some(d) if d.clock.in_intermission => "Intermission".to_string(),
        Some(d) => format!(
            "{} - {}",
            period_ordinal(d.display_period),
            d.clock.time_remaining
        ),
        None => "In Progress".to_string(),
    }
}

/// "(W-L-OTL)" or a placeholder until team stats arrive
pub fn team_record(stats: Option<&TeamStats>) -> String {
    match stats {
        Some(s) => format!("({}-{}-{})", s.wins, s.losses, s.ot_losses),
        None => "Loading record...".to_string(),
    }
}

pub fn score_text(team: &TeamInfo) -> String {
    team.score
        .map(|score| score.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Label for a game story category, empty for categories we don't show
pub fn stat_category_label(category: &str) -> &'static str {
    STAT_CATEGORY_LABELS.get(category).copied().unwrap_or("")
}

/// Render a game story value; percentage categories are shown as percents
pub fn stat_value_text(category: &str, value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Number(n) if category.ends_with("Pctg") => match n.as_f64() {
            Some(fraction) => format!("{:.1}%", fraction * 100.0),
            None => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GameClock;
    use serde_json::json;

    fn game_at(start: &str) -> Game {
        Game {
            start_time_utc: start.to_string(),
            eastern_utc_offset: "-04:00".to_string(),
            ..Default::default()
        }
    }

    fn april(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
    }

    fn live_details(period: i32, time: &str, intermission: bool) -> GameDetailsResponse {
        GameDetailsResponse {
            display_period: period,
            clock: GameClock {
                time_remaining: time.to_string(),
                in_intermission: intermission,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_format_header_single_line() {
        assert_eq!(format_header("Test Header", false), "Test Header\n───────────\n");
    }

    #[test]
    fn test_format_header_double_line() {
        assert_eq!(format_header("Test Header", true), "Test Header\n═══════════\n");
    }

    #[test]
    fn test_formatted_date_time_today() {
        // 16:00Z is noon Eastern during daylight time
        let game = game_at("2025-04-23T16:00:00Z");
        assert_eq!(formatted_date_time(&game, april(23)), "Today at 12:00 PM");
    }

    #[test]
    fn test_formatted_date_time_tomorrow_without_seconds() {
        let game = game_at("2025-04-24T14:30Z");
        assert_eq!(formatted_date_time(&game, april(23)), "Tomorrow at 10:30 AM");
    }

    #[test]
    fn test_formatted_date_time_other_day() {
        let game = game_at("2025-05-05T18:15:00Z");
        let text = formatted_date_time(&game, april(23));
        assert_eq!(text, "May 5 at 2:15 PM");
    }

    #[test]
    fn test_formatted_date_time_crosses_midnight_eastern() {
        // 01:30Z on the 24th is still the evening of the 23rd in New York
        let game = game_at("2025-04-24T01:30:00Z");
        assert_eq!(formatted_date_time(&game, april(23)), "Today at 9:30 PM");
    }

    #[test]
    fn test_missing_offset_falls_back_to_standard_time() {
        let game = Game {
            start_time_utc: "2025-01-10T17:00:00Z".to_string(),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(formatted_date_time(&game, today), "Today at 12:00 PM");
    }

    #[test]
    fn test_formatted_date_time_stacked() {
        let game = game_at("2025-04-23T23:00:00Z");
        assert_eq!(formatted_date_time_stacked(&game, april(23)), "Today\n7:00 PM");
    }

    #[test]
    fn test_fallback_returns_text_between_t_and_z() {
        let game = game_at("prefixTaMiddleZsuffix");
        assert_eq!(formatted_date_time(&game, april(23)), "aMiddle");
    }

    #[test]
    fn test_stacked_fallback_returns_text_between_t_and_z() {
        let game = game_at("123TABC123Z456");
        assert_eq!(formatted_date_time_stacked(&game, april(23)), "ABC123");
    }

    #[test]
    fn test_fallback_without_delimiters_returns_input() {
        let game = game_at("garbage");
        assert_eq!(formatted_date_time(&game, april(23)), "garbage");
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("-04:00"), FixedOffset::east_opt(-4 * 3600));
        assert_eq!(parse_utc_offset("+05:30"), FixedOffset::east_opt(5 * 3600 + 1800));
        assert_eq!(parse_utc_offset("04:00"), None);
        assert_eq!(parse_utc_offset(""), None);
        assert_eq!(parse_utc_offset("-4"), None);
    }

    #[test]
    fn test_period_ordinal() {
        assert_eq!(period_ordinal(1), "1st");
        assert_eq!(period_ordinal(2), "2nd");
        assert_eq!(period_ordinal(3), "3rd");
        assert_eq!(period_ordinal(4), "4th");
        assert_eq!(period_ordinal(5), "5th");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(list_status_label(&GameState::Critical), "LIVE");
        assert_eq!(list_status_label(&GameState::Official), "Official Score");
        assert_eq!(list_status_label(&GameState::from("PPD")), "PPD");
        assert_eq!(detail_status_label(&GameState::Critical), "Critical Game Time");
        assert_eq!(detail_status_label(&GameState::Future), "Upcoming Game");
    }

    #[test]
    fn test_list_clock_text() {
        let today = april(23);
        let mut game = game_at("2025-04-23T23:00:00Z");

        game.game_state = GameState::Future;
        assert_eq!(list_clock_text(&game, None, today), "Today at 7:00 PM");

        game.game_state = GameState::Final;
        assert_eq!(list_clock_text(&game, None, today), " ");

        game.game_state = GameState::Live;
        let details = live_details(2, "12:34", false);
        assert_eq!(list_clock_text(&game, Some(&details), today), "2nd Period - 12:34");

        let details = live_details(1, "00:00", true);
        assert_eq!(list_clock_text(&game, Some(&details), today), "Intermission");

        assert_eq!(list_clock_text(&game, None, today), "In Game");

        game.game_state = GameState::Critical;
        assert_eq!(list_clock_text(&game, None, today), "In OT");
    }

    #[test]
    fn test_detail_clock_text() {
        let today = april(23);
        let mut game = game_at("2025-04-23T23:00:00Z");

        game.game_state = GameState::Official;
        assert_eq!(detail_clock_text(&game, None, today), "Game Complete");

        game.game_state = GameState::Live;
        let details = live_details(4, "03:10", false);
        assert_eq!(detail_clock_text(&game, Some(&details), today), "4th - 03:10");
        assert_eq!(detail_clock_text(&game, None, today), "In Progress");
    }

    #[test]
    fn test_team_record() {
        let stats = TeamStats {
            wins: 40,
            losses: 30,
            ot_losses: 12,
            ..Default::default()
        };
        assert_eq!(team_record(Some(&stats)), "(40-30-12)");
        assert_eq!(team_record(None), "Loading record...");
    }

    #[test]
    fn test_score_text() {
        let mut team = TeamInfo::default();
        assert_eq!(score_text(&team), "-");
        team.score = Some(4);
        assert_eq!(score_text(&team), "4");
    }

    #[test]
    fn test_stat_category_label() {
        assert_eq!(stat_category_label("sog"), "Shots");
        assert_eq!(stat_category_label("blockedShots"), "Blocked Shots");
        assert_eq!(stat_category_label("somethingNew"), "");
    }

    #[test]
    fn test_stat_value_text() {
        assert_eq!(stat_value_text("sog", &json!(31)), "31");
        assert_eq!(stat_value_text("powerPlay", &json!("1/3")), "1/3");
        assert_eq!(stat_value_text("faceoffWinningPctg", &json!(0.525)), "52.5%");
        assert_eq!(stat_value_text("hits", &Value::Null), "-");
    }
}
