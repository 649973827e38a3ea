//! Star of the week: a featured player's totals over the last complete
//! Sunday-to-Saturday week.

use crate::models::PlayerDetailsResponse;
use chrono::{Datelike, Duration, NaiveDate};

/// Player featured when none is configured
pub const DEFAULT_FEATURED_PLAYER_ID: i64 = 8482116;

const GAME_DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive date range covered by the weekly stats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub sunday: NaiveDate,
    pub saturday: NaiveDate,
}

impl WeekWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.sunday && date <= self.saturday
    }

    /// "Week of 4/13 - 4/19"
    pub fn label(&self) -> String {
        format!(
            "Week of {}/{} - {}/{}",
            self.sunday.month(),
            self.sunday.day(),
            self.saturday.month(),
            self.saturday.day()
        )
    }
}

/// Totals over the games inside a [`WeekWindow`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeeklyStats {
    pub games: usize,
    pub goals: i32,
    pub assists: i32,
    pub points: i32,
}

/// Window for the week shown on a given day.
///
/// Weeks are Monday-based: the Sunday closing the current week is moved back
/// two weeks and the Saturday of the current week back one, which lands on
/// the last complete Sunday-Saturday span.
pub fn star_week_window(today: NaiveDate) -> WeekWindow {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    let week_sunday = monday + Duration::days(6);
    let week_saturday = monday + Duration::days(5);

    WeekWindow {
        sunday: week_sunday - Duration::weeks(2),
        saturday: week_saturday - Duration::weeks(1),
    }
}

/// Sum the player's recent games that fall inside the window.
///
/// Games whose date can't be parsed are skipped.
pub fn weekly_stats(player: &PlayerDetailsResponse, window: WeekWindow) -> WeeklyStats {
    player
        .last5_games
        .iter()
        .filter(|game| {
            NaiveDate::parse_from_str(&game.game_date, GAME_DATE_FORMAT)
                .map(|date| window.contains(date))
                .unwrap_or(false)
        })
        .fold(WeeklyStats::default(), |mut totals, game| {
            totals.games += 1;
            totals.goals += game.goals;
            totals.assists += game.assists;
            totals.points += game.points;
            totals
        })
}

/// "#48 | D"
pub fn sweater_line(player: &PlayerDetailsResponse) -> String {
    format!("#{} | {}", player.sweater_number, player.position)
}
