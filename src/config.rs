use xdg::BaseDirectories;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use ratatui::style::Color;
use phf::phf_map;
use chrono::format::{Item, StrftimeItems};
use crate::player_week::DEFAULT_FEATURED_PLAYER_ID;

/// Refresh time format used when none (or a broken one) is configured
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// File name of the favorites database under the XDG data home
const DATABASE_FILE_NAME: &str = "favorites.db";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: String,
    pub refresh_interval: u32,
    pub time_format: String,
    /// Season id such as 20242025; derived from today's date when unset
    pub season: Option<i64>,
    pub featured_player_id: i64,
    /// Favorites database file; XDG data home when unset
    pub database_path: Option<String>,
    pub dark_theme: bool,
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub selection_fg: Color,
    #[serde(deserialize_with = "deserialize_color_optional")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unfocused_selection_fg: Option<Color>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: "info".to_string(),
            log_file: "/dev/null".to_string(),
            refresh_interval: 30,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            season: None,
            featured_player_id: DEFAULT_FEATURED_PLAYER_ID,
            database_path: None,
            dark_theme: false,
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Season to query team stats for on a given day
    pub fn season_for(&self, today: chrono::NaiveDate) -> i64 {
        self.season
            .unwrap_or_else(|| crate::api::season_id_for(today))
    }

    /// Where the favorites database lives
    pub fn database_path(&self) -> Option<PathBuf> {
        match &self.database_path {
            Some(path) => Some(PathBuf::from(path)),
            None => get_data_path(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig {
            selection_fg: Color::Rgb(255, 165, 0),
            unfocused_selection_fg: None,
        }
    }
}

impl ThemeConfig {
    /// Selection color for views without focus, half as bright unless configured
    pub fn unfocused_selection_fg(&self) -> Color {
        self.unfocused_selection_fg.unwrap_or_else(|| darken_color(self.selection_fg, 0.5))
    }
}

/// Scale each RGB channel by `factor`; named colors have no channels to scale
fn darken_color(color: Color, factor: f32) -> Color {
    let scale = |channel: u8| (channel as f32 * factor) as u8;
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(scale(r), scale(g), scale(b)),
        other => other,
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_color(&raw).ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", raw)))
}

fn deserialize_color_optional<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| {
            parse_color(&raw)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid color: {}", raw)))
        })
        .transpose()
}

static NAMED_COLORS: phf::Map<&'static str, Color> = phf_map! {
    "black" => Color::Black,
    "red" => Color::Red,
    "green" => Color::Green,
    "yellow" => Color::Yellow,
    "blue" => Color::Blue,
    "magenta" => Color::Magenta,
    "cyan" => Color::Cyan,
    "gray" => Color::Gray,
    "grey" => Color::Gray,
    "darkgray" => Color::DarkGray,
    "darkgrey" => Color::DarkGray,
    "lightred" => Color::LightRed,
    "lightgreen" => Color::LightGreen,
    "lightyellow" => Color::LightYellow,
    "lightblue" => Color::LightBlue,
    "lightmagenta" => Color::LightMagenta,
    "lightcyan" => Color::LightCyan,
    "white" => Color::White,
    "orange" => Color::Rgb(255, 165, 0),
    "gold" => Color::Rgb(255, 215, 0),
};

/// Parse a color name, `#rrggbb`/`#rgb` hex, or an `r,g,b` triple
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_lowercase();

    if let Some(color) = NAMED_COLORS.get(s.as_str()) {
        return Some(*color);
    }

    if let Some(hex) = s.strip_prefix('#') {
        // #rgb doubles each digit
        let expanded: String = match hex.len() {
            6 => hex.to_string(),
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            _ => return None,
        };
        let channel = |i: usize| u8::from_str_radix(expanded.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }

    let channels: Vec<u8> = s
        .split(',')
        .map(|part| part.trim().parse::<u8>().ok())
        .collect::<Option<Vec<u8>>>()?;
    match channels.as_slice() {
        [r, g, b] => Some(Color::Rgb(*r, *g, *b)),
        _ => None,
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let config_home = xdg_dirs.get_config_home()?;
    Some(config_home.join("config.toml"))
}

/// Default favorites database location
pub fn get_data_path() -> Option<PathBuf> {
    let pgm = env!("CARGO_PKG_NAME");
    let xdg_dirs = BaseDirectories::with_prefix(pgm);
    let data_home = xdg_dirs.get_data_home()?;
    Some(data_home.join(DATABASE_FILE_NAME))
}

/// Whether chrono understands every specifier in `format`
pub fn is_valid_time_format(format: &str) -> bool {
    StrftimeItems::new(format).all(|item| !matches!(item, Item::Error))
}

/// Parse config text, returning the config and what had to be ignored
pub fn parse(content: &str) -> (Config, Vec<String>) {
    let mut warnings = Vec::new();
    let mut config: Config = match toml::from_str(content) {
        Ok(config) => config,
        Err(e) => {
            warnings.push(format!("Ignoring invalid config: {}", e));
            return (Config::default(), warnings);
        }
    };

    if !is_valid_time_format(&config.time_format) {
        warnings.push(format!(
            "Ignoring invalid time_format {:?}, using {:?}",
            config.time_format, DEFAULT_TIME_FORMAT
        ));
        config.time_format = DEFAULT_TIME_FORMAT.to_string();
    }
    (config, warnings)
}

/// Load the config file. Logging isn't set up yet when this runs, so
/// problems come back as warnings for the caller to report.
pub fn load() -> (Config, Vec<String>) {
    let config_path = match get_config_path() {
        Some(path) => path,
        None => return (Config::default(), Vec::new()),
    };

    if !config_path.exists() {
        return (Config::default(), Vec::new());
    }

    let content = match fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) => {
            let warning = format!("Unable to read {}: {}", config_path.display(), e);
            return (Config::default(), vec![warning]);
        }
    };

    let (config, warnings) = parse(&content);
    let warnings = warnings
        .into_iter()
        .map(|w| format!("{}: {}", config_path.display(), w))
        .collect();
    (config, warnings)
}
