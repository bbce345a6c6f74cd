use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH: &str = "config.toml";
/// Largest accepted `cols` or `rows`
pub const MAX_GRID_SIDE: i32 = 1024;

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub visual: VisualConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct GridConfig {
    #[serde(default = "default_cols")]
    pub cols: i32,
    #[serde(default = "default_rows")]
    pub rows: i32,
    #[serde(default = "default_tile_size")]
    pub tile_size: f32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_background")]
    pub background: Rgb,
    #[serde(default = "default_grid_lines")]
    pub grid_lines: Rgb,
    #[serde(default = "default_show_help")]
    pub show_help: bool,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_enable_action_log")]
    pub enable_action_log: bool,
    #[serde(default = "default_action_log_path")]
    pub action_log_path: String,
}

// Default values
fn default_cols() -> i32 { 24 }
fn default_rows() -> i32 { 24 }
fn default_tile_size() -> f32 { 32.0 }
fn default_window_title() -> String { "A*".to_string() }
fn default_background() -> Rgb { Rgb { r: 0, g: 0, b: 0 } }
fn default_grid_lines() -> Rgb { Rgb { r: 128, g: 128, b: 128 } }
fn default_show_help() -> bool { true }
fn default_enable_action_log() -> bool { true }
fn default_action_log_path() -> String { "action_log.json".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: default_cols(),
            rows: default_rows(),
            tile_size: default_tile_size(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            background: default_background(),
            grid_lines: default_grid_lines(),
            show_help: default_show_help(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_action_log: default_enable_action_log(),
            action_log_path: default_action_log_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            visual: VisualConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from config.toml, or use defaults if it doesn't exist
    pub fn load() -> Self {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded configuration from {}", path.display());
                    Self::checked(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                    log::warn!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                log::info!("No {} found, using default configuration", path.display());
                Config::default()
            }
        }
    }

    /// Replace grid dimensions outside 1..=MAX_GRID_SIDE with the defaults
    fn checked(mut config: Config) -> Config {
        let valid = 1..=MAX_GRID_SIDE;
        if !valid.contains(&config.grid.cols) || !valid.contains(&config.grid.rows) {
            log::warn!(
                "Grid size {}x{} outside 1..={}, using {}x{}",
                config.grid.cols,
                config.grid.rows,
                MAX_GRID_SIDE,
                default_cols(),
                default_rows()
            );
            config.grid.cols = default_cols();
            config.grid.rows = default_rows();
        }
        config
    }

    /// Window size in pixels
    pub fn screen_size(&self) -> (f32, f32) {
        (
            self.grid.cols as f32 * self.grid.tile_size,
            self.grid.rows as f32 * self.grid.tile_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [grid]
            cols = 10

            [visual]
            background = { r = 10, g = 20, b = 30 }
            "#,
        )
        .unwrap();
        assert_eq!(config.grid.cols, 10);
        assert_eq!(config.grid.rows, 24);
        assert_eq!(config.visual.background, Rgb { r: 10, g: 20, b: 30 });
        assert_eq!(config.visual.window_title, "A*");
        assert!(config.logging.enable_action_log);
    }

    #[test]
    fn oversized_grid_falls_back_to_default_size() {
        let path = std::env::temp_dir().join(format!("astar_grid_oversized_{}.toml", std::process::id()));
        fs::write(&path, "[grid]\ncols = 70000\nrows = 70000\ntile_size = 8.0\n").unwrap();
        let config = Config::load_from(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!((config.grid.cols, config.grid.rows), (24, 24));
        assert_eq!(config.grid.tile_size, 8.0);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let config = Config::load_from("does/not/exist.toml");
        assert_eq!(config, Config::default());
        assert_eq!(config.screen_size(), (768.0, 768.0));
    }
}
