//! Configuration management for Portico.
//!
//! Parses `portico.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Every section is
//! optional; missing sections fall back to the stock tacoscript portal.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Path Resolution
//!
//! `docs.source_dir` is resolved against the config file's directory and
//! defaults to that directory itself. Each `[[sidebar]]` `dir` is resolved
//! against the source directory.
//!
//! ## Environment Variable Expansion
//!
//! Values that point at deployment-specific places may reference environment
//! variables as `${VAR}` (must be set) or `${VAR:-fallback}`:
//!
//! - `site.base`
//! - `theme.logo`, `theme.repo`
//! - `docs.source_dir`
//! - `[[head]]` attribute values
//! - `[[navbar]]` `link`
//! - `[[sidebar]]` `dir`
//!
//! Expansion runs before path resolution, so an expanded `dir` is still
//! resolved against the source directory. Errors name the field, e.g.
//! `sidebar[1].dir` or `head[0].attrs.href`.

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};

use portico_site::ExtensionFilter;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::expand::{ProcessEnv, VarSource, expand_field};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override site base URL.
    pub base: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "portico.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata.
    pub site: SiteSection,
    /// Tags injected into every page's `<head>`.
    pub head: Vec<HeadTagConfig>,
    /// Theme options.
    pub theme: ThemeSection,
    /// Navbar entries.
    pub navbar: Vec<NavLinkConfig>,
    /// Sidebar sections (directories are relative strings from TOML).
    sidebar: Vec<SidebarSectionRaw>,
    /// Content configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved sidebar sections (set after loading).
    #[serde(skip)]
    pub sidebar_resolved: Vec<SidebarSectionConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Base URL the site is deployed under.
    pub base: String,
    /// Site language tag.
    pub lang: String,
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Site-level edit link toggle.
    pub edit_link: bool,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            base: "/".to_owned(),
            lang: "en-EN".to_owned(),
            title: "tacoscript".to_owned(),
            description: "Tacoscript library provides functionality for provisioning of remote \
                          servers and local machines running on any OS."
                .to_owned(),
            edit_link: false,
        }
    }
}

/// A `<head>` tag entry.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct HeadTagConfig {
    /// Element name.
    pub tag: String,
    /// Element attributes in the order they were written.
    #[serde(default, deserialize_with = "ordered_attrs")]
    pub attrs: Vec<(String, String)>,
}

/// Read an attribute table without reordering its keys.
fn ordered_attrs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct AttrsVisitor;

    impl<'de> Visitor<'de> for AttrsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a table of string attributes")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut attrs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(attr) = map.next_entry::<String, String>()? {
                attrs.push(attr);
            }
            Ok(attrs)
        }
    }

    deserializer.deserialize_map(AttrsVisitor)
}

impl HeadTagConfig {
    fn new(tag: &str, attrs: &[(&str, &str)]) -> Self {
        Self {
            tag: tag.to_owned(),
            attrs: attrs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }
}

/// Favicon and browser chrome tags of the stock portal.
fn default_head() -> Vec<HeadTagConfig> {
    vec![
        HeadTagConfig::new(
            "link",
            &[
                ("rel", "icon"),
                ("type", "image/png"),
                ("sizes", "16x16"),
                ("href", "/favicon/favicon-16x16.png"),
            ],
        ),
        HeadTagConfig::new(
            "link",
            &[
                ("rel", "icon"),
                ("type", "image/png"),
                ("sizes", "32x32"),
                ("href", "/favicon/favicon-32x32.png"),
            ],
        ),
        HeadTagConfig::new(
            "link",
            &[("rel", "manifest"), ("href", "/favicon/site.webmanifest")],
        ),
        HeadTagConfig::new("meta", &[("name", "application-name"), ("content", "docs")]),
        HeadTagConfig::new(
            "meta",
            &[("name", "apple-mobile-web-app-title"), ("content", "docs")],
        ),
        HeadTagConfig::new(
            "meta",
            &[
                ("name", "apple-mobile-web-app-status-bar-style"),
                ("content", "black"),
            ],
        ),
        HeadTagConfig::new(
            "link",
            &[
                ("rel", "apple-touch-icon"),
                ("href", "/favicon/apple-touch-icon.png"),
            ],
        ),
        HeadTagConfig::new(
            "meta",
            &[("name", "msapplication-TileColor"), ("content", "#0473e7")],
        ),
        HeadTagConfig::new("meta", &[("name", "theme-color"), ("content", "#0473e7")]),
    ]
}

/// Theme options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThemeSection {
    /// Logo image path.
    pub logo: String,
    /// Repository, `owner/name` or a full URL.
    pub repo: String,
    /// Label for the repository link.
    pub repo_label: String,
    /// Show page contributors.
    pub contributors: bool,
    /// Show "edit this page" links.
    pub edit_link: bool,
    /// Show last-updated timestamps.
    pub last_updated: bool,
}

impl Default for ThemeSection {
    fn default() -> Self {
        Self {
            logo: "logo/tacoscript-img-text.svg".to_owned(),
            repo: "cloudradar-monitoring/tacoscript".to_owned(),
            repo_label: "Github-Repo".to_owned(),
            contributors: false,
            edit_link: false,
            last_updated: false,
        }
    }
}

/// Navbar entry.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct NavLinkConfig {
    /// Label.
    pub text: String,
    /// Target path or URL.
    pub link: String,
}

fn default_navbar() -> Vec<NavLinkConfig> {
    vec![
        NavLinkConfig {
            text: "Documentation".to_owned(),
            link: "/docs/".to_owned(),
        },
        NavLinkConfig {
            text: "Download".to_owned(),
            link: "https://github.com/cloudradar-monitoring/tacoscript/releases".to_owned(),
        },
    ]
}

/// Page ordering within a sidebar group.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Directory listing order.
    #[default]
    Listing,
    /// Lexicographic by file name.
    Name,
}

/// Raw sidebar section as parsed from TOML.
#[derive(Debug, Deserialize)]
struct SidebarSectionRaw {
    route: String,
    title: String,
    dir: String,
    #[serde(default = "default_extensions")]
    extensions: Vec<String>,
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    order: SortOrder,
}

fn default_extensions() -> Vec<String> {
    vec![".md".to_owned()]
}

fn default_sidebar() -> Vec<SidebarSectionRaw> {
    vec![SidebarSectionRaw {
        route: "/docs/".to_owned(),
        title: "Documentation".to_owned(),
        dir: "docs".to_owned(),
        extensions: default_extensions(),
        exclude: Vec::new(),
        order: SortOrder::Listing,
    }]
}

/// Resolved sidebar section with an absolute directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarSectionConfig {
    /// Route prefix (e.g. `/docs/`).
    pub route: String,
    /// Group title.
    pub title: String,
    /// Content directory to scan.
    pub dir: PathBuf,
    /// Recognized page extensions.
    pub extensions: Vec<String>,
    /// File names left out of the group.
    pub exclude: Vec<String>,
    /// Page ordering.
    pub order: SortOrder,
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory sidebar section directories are relative to.
    pub source_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`theme.repo`").
        field: String,
        /// Error message (e.g., "${`REPO`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a route-like field to start and end with `/`.
fn require_slashed(value: &str, field: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') || !value.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start and end with '/' (got {value:?})"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `portico.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a CLI override does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
            self.sidebar_resolved = self.resolve_sidebar(source_dir);
        }
        if let Some(base) = &settings.base {
            self.site.base.clone_from(base);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            site: SiteSection::default(),
            head: default_head(),
            theme: ThemeSection::default(),
            navbar: default_navbar(),
            sidebar: default_sidebar(),
            docs: DocsConfigRaw::default(),
            docs_resolved: DocsConfig {
                source_dir: base.to_path_buf(),
            },
            sidebar_resolved: Vec::new(),
            config_path: None,
        };
        config.sidebar_resolved = config.resolve_sidebar(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars(&ProcessEnv)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_head()?;
        self.validate_navbar()?;
        self.validate_sidebar()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_slashed(&self.site.base, "site.base")?;
        Ok(())
    }

    fn validate_head(&self) -> Result<(), ConfigError> {
        for (i, tag) in self.head.iter().enumerate() {
            require_non_empty(&tag.tag, &format!("head[{i}].tag"))?;
        }
        Ok(())
    }

    fn validate_navbar(&self) -> Result<(), ConfigError> {
        for (i, link) in self.navbar.iter().enumerate() {
            require_non_empty(&link.text, &format!("navbar[{i}].text"))?;
            require_non_empty(&link.link, &format!("navbar[{i}].link"))?;
        }
        Ok(())
    }

    fn validate_sidebar(&self) -> Result<(), ConfigError> {
        for (i, section) in self.sidebar.iter().enumerate() {
            require_slashed(&section.route, &format!("sidebar[{i}].route"))?;
            require_non_empty(&section.title, &format!("sidebar[{i}].title"))?;
            require_non_empty(&section.dir, &format!("sidebar[{i}].dir"))?;

            ExtensionFilter::new(section.extensions.iter().cloned()).map_err(|err| {
                ConfigError::Validation(format!("sidebar[{i}].extensions: {err}"))
            })?;
        }
        Ok(())
    }

    /// Expand `${VAR}` references in deployment-specific fields.
    fn expand_env_vars(&mut self, vars: &impl VarSource) -> Result<(), ConfigError> {
        expand_field(&mut self.site.base, || "site.base".to_owned(), vars)?;
        expand_field(&mut self.theme.logo, || "theme.logo".to_owned(), vars)?;
        expand_field(&mut self.theme.repo, || "theme.repo".to_owned(), vars)?;
        if let Some(source_dir) = &mut self.docs.source_dir {
            expand_field(source_dir, || "docs.source_dir".to_owned(), vars)?;
        }

        for (i, tag) in self.head.iter_mut().enumerate() {
            for (key, value) in &mut tag.attrs {
                expand_field(value, || format!("head[{i}].attrs.{key}"), vars)?;
            }
        }
        for (i, link) in self.navbar.iter_mut().enumerate() {
            expand_field(&mut link.link, || format!("navbar[{i}].link"), vars)?;
        }
        for (i, section) in self.sidebar.iter_mut().enumerate() {
            expand_field(&mut section.dir, || format!("sidebar[{i}].dir"), vars)?;
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let source_dir = match self.docs.source_dir.as_deref() {
            Some(dir) => config_dir.join(dir),
            None => config_dir.to_path_buf(),
        };

        self.sidebar_resolved = self.resolve_sidebar(&source_dir);
        self.docs_resolved = DocsConfig { source_dir };
    }

    /// Resolve sidebar section directories against the source directory.
    fn resolve_sidebar(&self, source_dir: &Path) -> Vec<SidebarSectionConfig> {
        self.sidebar
            .iter()
            .map(|raw| SidebarSectionConfig {
                route: raw.route.clone(),
                title: raw.title.clone(),
                dir: source_dir.join(&raw.dir),
                extensions: raw.extensions.clone(),
                exclude: raw.exclude.clone(),
                order: raw.order,
            })
            .collect()
    }
}
