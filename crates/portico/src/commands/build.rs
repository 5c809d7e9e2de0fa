//! `portico build` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use portico_config::{CliSettings, Config, SortOrder};
use portico_site::{
    ConfigAssembler, ExtensionFilter, FilterError, HeadTag, NavbarLink, SidebarOrder,
    SidebarSection, SiteSettings, ThemeSettings,
};
use portico_storage::FsListing;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover portico.toml).
    #[arg(short, long, env = "PORTICO_CONFIG")]
    config: Option<PathBuf>,

    /// Content source directory sidebar directories resolve against (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Base URL the site is deployed under (overrides config).
    #[arg(long)]
    base: Option<String>,

    /// Write the configuration to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit single-line JSON.
    #[arg(long)]
    compact: bool,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            base: self.base,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));

        let settings = site_settings(&config)?;
        let listing = FsListing::new();
        let site = ConfigAssembler::new(&listing).assemble(&settings)?;

        let json = if self.compact {
            serde_json::to_string(&site)?
        } else {
            serde_json::to_string_pretty(&site)?
        };

        match self.output {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, format!("{json}\n"))?;
                output.success(&format!("Site configuration written to {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{json}")?;
            }
        }

        Ok(())
    }
}

/// Map loaded configuration onto the assembler's literal inputs.
fn site_settings(config: &Config) -> Result<SiteSettings, FilterError> {
    let sidebar = config
        .sidebar_resolved
        .iter()
        .map(|section| {
            let extensions = ExtensionFilter::new(section.extensions.iter().cloned())?;
            let order = match section.order {
                SortOrder::Listing => SidebarOrder::Listing,
                SortOrder::Name => SidebarOrder::Name,
            };
            Ok(
                SidebarSection::new(&section.route, &section.title, &section.dir)
                    .with_extensions(extensions)
                    .with_exclude(section.exclude.iter().cloned())
                    .with_order(order),
            )
        })
        .collect::<Result<Vec<_>, FilterError>>()?;

    Ok(SiteSettings {
        base: config.site.base.clone(),
        lang: config.site.lang.clone(),
        title: config.site.title.clone(),
        description: config.site.description.clone(),
        head: config
            .head
            .iter()
            .map(|tag| HeadTag::new(&tag.tag, tag.attrs.clone()))
            .collect(),
        edit_link: config.site.edit_link,
        theme: ThemeSettings {
            logo: config.theme.logo.clone(),
            navbar: config
                .navbar
                .iter()
                .map(|link| NavbarLink::new(&link.text, &link.link))
                .collect(),
            repo: config.theme.repo.clone(),
            repo_label: config.theme.repo_label.clone(),
            contributors: config.theme.contributors,
            edit_link: config.theme.edit_link,
            last_updated: config.theme.last_updated,
        },
        sidebar,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("portico.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_site_settings_from_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(temp_dir.path(), "");
        let config = Config::load(Some(path.as_path()), None).unwrap();

        let settings = site_settings(&config).unwrap();

        assert_eq!(settings.title, "tacoscript");
        assert_eq!(settings.head.len(), 9);
        assert_eq!(
            settings.head[3],
            HeadTag::meta("application-name", "docs")
        );
        assert_eq!(
            settings.theme.navbar,
            vec![
                NavbarLink::new("Documentation", "/docs/"),
                NavbarLink::new(
                    "Download",
                    "https://github.com/cloudradar-monitoring/tacoscript/releases"
                ),
            ]
        );
        assert_eq!(
            settings.sidebar,
            vec![SidebarSection::new(
                "/docs/",
                "Documentation",
                temp_dir.path().join("docs")
            )]
        );
    }

    #[test]
    fn test_site_settings_maps_section_options() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = write_config(
            temp_dir.path(),
            r#"
[[sidebar]]
route = "/api/"
title = "API"
dir = "api"
extensions = [".rst"]
exclude = ["index.rst"]
order = "name"
"#,
        );
        let config = Config::load(Some(path.as_path()), None).unwrap();

        let settings = site_settings(&config).unwrap();

        assert_eq!(
            settings.sidebar,
            vec![
                SidebarSection::new("/api/", "API", temp_dir.path().join("api"))
                    .with_extensions(ExtensionFilter::new([".rst"]).unwrap())
                    .with_exclude(["index.rst"])
                    .with_order(SidebarOrder::Name)
            ]
        );
    }

    #[test]
    fn test_build_writes_configuration_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = temp_dir.path().join("docs");
        fs::create_dir(&docs).unwrap();
        fs::write(docs.join("readme.md"), "# Readme").unwrap();
        fs::write(docs.join("logo.png"), [0u8; 4]).unwrap();
        fs::create_dir(docs.join("assets")).unwrap();
        let config = write_config(temp_dir.path(), "");
        let out = temp_dir.path().join("dist/site.json");

        let args = BuildArgs {
            config: Some(config),
            source_dir: None,
            base: None,
            output: Some(out.clone()),
            compact: true,
        };
        args.execute().unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(value["title"], "tacoscript");
        assert_eq!(
            value["themeConfig"]["sidebar"]["/docs/"][0]["children"],
            serde_json::json!(["readme.md"])
        );
    }

    #[test]
    fn test_build_fails_without_content_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = write_config(temp_dir.path(), "");
        let out = temp_dir.path().join("site.json");

        let args = BuildArgs {
            config: Some(config),
            source_dir: None,
            base: None,
            output: Some(out.clone()),
            compact: false,
        };
        let err = args.execute().unwrap_err();

        assert!(matches!(err, CliError::DirectoryAccess(_)));
        assert!(!out.exists());
    }
}
