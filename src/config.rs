use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Benchmark-side tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Slices shorter than this are sorted inline instead of on a new thread.
    #[serde(default = "BenchConfig::default_spawn_threshold")]
    pub spawn_threshold: usize,
    #[serde(default = "BenchConfig::default_light_size")]
    pub light_size: usize,
    #[serde(default = "BenchConfig::default_medium_size")]
    pub medium_size: usize,
    #[serde(default = "BenchConfig::default_hard_size")]
    pub hard_size: usize,
}

impl BenchConfig {
    fn default_spawn_threshold() -> usize {
        1000
    }
    fn default_light_size() -> usize {
        100_000
    }
    fn default_medium_size() -> usize {
        1_000_000
    }
    fn default_hard_size() -> usize {
        10_000_000
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            spawn_threshold: Self::default_spawn_threshold(),
            light_size: Self::default_light_size(),
            medium_size: Self::default_medium_size(),
            hard_size: Self::default_hard_size(),
        }
    }
}

/// Chart styling passed through to the renderer verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "ChartConfig::default_width")]
    pub width: u32,
    #[serde(default = "ChartConfig::default_height")]
    pub height: u32,
    #[serde(default = "ChartConfig::default_combined_width")]
    pub combined_width: u32,
    #[serde(default = "ChartConfig::default_combined_height")]
    pub combined_height: u32,
    #[serde(default = "ChartConfig::default_font_size")]
    pub font_size: u32,
    #[serde(default = "ChartConfig::default_line_width")]
    pub line_width: u32,
    #[serde(default = "ChartConfig::default_marker_size")]
    pub marker_size: u32,
    /// Color names resolved per series; slot order is time, speedup,
    /// efficiency, Amdahl factor.
    #[serde(default = "ChartConfig::default_palette")]
    pub palette: Vec<String>,
}

impl ChartConfig {
    fn default_width() -> u32 {
        1000
    }
    fn default_height() -> u32 {
        600
    }
    fn default_combined_width() -> u32 {
        1200
    }
    fn default_combined_height() -> u32 {
        800
    }
    fn default_font_size() -> u32 {
        20
    }
    fn default_line_width() -> u32 {
        2
    }
    fn default_marker_size() -> u32 {
        4
    }
    fn default_palette() -> Vec<String> {
        ["blue", "red", "green", "purple"]
            .into_iter()
            .map(String::from)
            .collect()
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: Self::default_width(),
            height: Self::default_height(),
            combined_width: Self::default_combined_width(),
            combined_height: Self::default_combined_height(),
            font_size: Self::default_font_size(),
            line_width: Self::default_line_width(),
            marker_size: Self::default_marker_size(),
            palette: Self::default_palette(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub bench: BenchConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

impl AppConfig {
    /// Reads the config if it exists; otherwise writes a fully commented
    /// default file and returns the defaults. Used by the benchmark binary.
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            return Self::read_existing(path_obj);
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                let commented = comment_out_values(&text);
                if let Err(err) = fs::write(path_obj, commented) {
                    eprintln!("Failed to write default config to {path}: {err}");
                }
            }
            Err(_) => {
                eprintln!("Failed to serialize default config; continuing with defaults");
            }
        }
        default_cfg
    }

    /// Reads the config if it exists, defaults otherwise, and never creates
    /// the file. Used by the plotting scripts, which must not leave
    /// anything on disk besides the images.
    pub fn load_if_present(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            Self::read_existing(path_obj)
        } else {
            Self::default()
        }
    }

    fn read_existing(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    eprintln!(
                        "Failed to parse config {}: {err}. Using defaults.",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(err) => {
                eprintln!(
                    "Failed to read config {}: {err}. Using defaults.",
                    path.display()
                );
                Self::default()
            }
        }
    }
}

/// Comments out every value line so the written defaults document the
/// available keys without pinning them.
fn comment_out_values(text: &str) -> String {
    let mut commented = String::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            commented.push('\n');
        } else if trimmed.starts_with('[') && trimmed.ends_with(']') {
            commented.push_str(line);
            commented.push('\n');
        } else {
            commented.push_str("# ");
            commented.push_str(line);
            commented.push('\n');
        }
    }
    commented
}
