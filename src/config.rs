use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use clap::ValueEnum;
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".transferrc.json";

/// Directory names that stop the upward config file search.
const PROJECT_MARKERS: &[&str] = &[".git", ".svn"];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub target_modules: Vec<String>,
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
    #[serde(default = "default_vcs_dirs")]
    pub vcs_dirs: Vec<String>,
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    #[serde(default = "default_work_dir")]
    pub work_dir: String,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub locales: LocaleConfig,
}

/// Which target references take part in shared-resource detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SharedDetection {
    /// All target references, including those under `targetExcludes`.
    #[default]
    Raw,
    /// Only target references that survive the `targetExcludes` filter.
    Filtered,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    #[serde(default = "default_image_source_patterns")]
    pub source_patterns: Vec<String>,
    #[serde(default = "default_image_extensions")]
    pub extensions: Vec<String>,
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
    #[serde(default = "default_base_path")]
    pub target_base: String,
    #[serde(default)]
    pub target_excludes: Vec<String>,
    #[serde(default = "default_target_dir")]
    pub target_dir: String,
    #[serde(default)]
    pub shared_detection: SharedDetection,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleConfig {
    #[serde(default = "default_locale_source_patterns")]
    pub source_patterns: Vec<String>,
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_locale_suffix")]
    pub suffix: String,
    #[serde(default = "default_original_path")]
    pub original_path: String,
    #[serde(default = "default_original_name")]
    pub original_name: String,
    #[serde(default)]
    pub target_path: String,
    #[serde(default)]
    pub target_name: String,
}

fn default_exclude_dirs() -> Vec<String> {
    ["out", ".svn", ".idea"].map(String::from).to_vec()
}

fn default_vcs_dirs() -> Vec<String> {
    [".svn", ".git"].map(String::from).to_vec()
}

fn default_source_dir() -> String {
    "src".to_string()
}

fn default_work_dir() -> String {
    "./".to_string()
}

fn default_image_source_patterns() -> Vec<String> {
    ["*.java", "*.js", "*.css", "*.cpt", "*.frm", "*.html"]
        .map(String::from)
        .to_vec()
}

fn default_image_extensions() -> Vec<String> {
    ["jpg", "png", "gif"].map(String::from).to_vec()
}

fn default_base_path() -> String {
    "com/fr".to_string()
}

fn default_markers() -> Vec<String> {
    ["images", "web/core"].map(String::from).to_vec()
}

fn default_target_dir() -> String {
    "./".to_string()
}

fn default_locale_source_patterns() -> Vec<String> {
    ["*.java", "*.js"].map(String::from).to_vec()
}

fn default_locales() -> Vec<String> {
    ["en_US", "zh_CN", "zh_TW", "ja_JP"]
        .map(String::from)
        .to_vec()
}

fn default_locale_suffix() -> String {
    ".properties".to_string()
}

fn default_original_path() -> String {
    "base-file/src/com/fr/general/locale".to_string()
}

fn default_original_name() -> String {
    "fr".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_modules: Vec::new(),
            exclude_dirs: default_exclude_dirs(),
            vcs_dirs: default_vcs_dirs(),
            source_dir: default_source_dir(),
            work_dir: default_work_dir(),
            images: ImageConfig::default(),
            locales: LocaleConfig::default(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            source_patterns: default_image_source_patterns(),
            extensions: default_image_extensions(),
            base_path: default_base_path(),
            markers: default_markers(),
            target_base: default_base_path(),
            target_excludes: Vec::new(),
            target_dir: default_target_dir(),
            shared_detection: SharedDetection::default(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            source_patterns: default_locale_source_patterns(),
            locales: default_locales(),
            suffix: default_locale_suffix(),
            original_path: default_original_path(),
            original_name: default_original_name(),
            target_path: String::new(),
            target_name: String::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any source pattern is an invalid glob, or if the
    /// image settings leave the extraction grammar without a base path,
    /// extensions or storage markers.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.images.source_patterns {
            Pattern::new(pattern).with_context(|| {
                format!("Invalid glob pattern in 'images.sourcePatterns': \"{}\"", pattern)
            })?;
        }
        for pattern in &self.locales.source_patterns {
            Pattern::new(pattern).with_context(|| {
                format!("Invalid glob pattern in 'locales.sourcePatterns': \"{}\"", pattern)
            })?;
        }

        if self.images.extensions.is_empty() {
            bail!("'images.extensions' must not be empty");
        }
        if self.images.markers.is_empty() {
            bail!("'images.markers' must not be empty");
        }
        if self.images.base_path.is_empty() {
            bail!("'images.basePath' must not be empty");
        }

        Ok(())
    }
}

impl ImageConfig {
    /// Glob patterns matching image files with the configured extensions.
    pub fn image_patterns(&self) -> Result<Vec<Pattern>> {
        self.extensions
            .iter()
            .map(|ext| {
                Pattern::new(&format!("*.{}", ext))
                    .with_context(|| format!("Invalid image extension: \"{}\"", ext))
            })
            .collect()
    }
}

pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid glob pattern: \"{}\"", p)))
        .collect()
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if PROJECT_MARKERS.iter().any(|m| current.join(m).exists()) {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

/// Resolve `path` against `base` unless it is already absolute.
pub fn resolve_against(base: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(".").unwrap_or(p);
        base.join(rel)
    }
}
