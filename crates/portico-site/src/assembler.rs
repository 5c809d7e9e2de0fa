//! Site configuration assembly.

use std::collections::BTreeMap;

use portico_storage::Listing;

use crate::error::DirectoryAccessError;
use crate::settings::{SiteConfig, SiteSettings, ThemeConfig};
use crate::sidebar::{SidebarBuilder, SidebarGroup};

/// Combines static settings with scanned sidebar groups.
///
/// Each configured sidebar section is scanned exactly once per
/// [`assemble`](Self::assemble) call. Sections sharing a route prefix are
/// attached to the same list in configuration order.
pub struct ConfigAssembler<'a> {
    sidebar: SidebarBuilder<'a>,
}

impl<'a> ConfigAssembler<'a> {
    /// Create an assembler that scans content directories through `listing`.
    #[must_use]
    pub fn new(listing: &'a dyn Listing) -> Self {
        Self {
            sidebar: SidebarBuilder::new(listing),
        }
    }

    /// Assemble the site configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`DirectoryAccessError`] raised while scanning a
    /// sidebar section. No configuration is produced in that case.
    pub fn assemble(&self, settings: &SiteSettings) -> Result<SiteConfig, DirectoryAccessError> {
        let mut sidebar: BTreeMap<String, Vec<SidebarGroup>> = BTreeMap::new();

        for section in &settings.sidebar {
            let group = self.sidebar.build_group(section)?;
            tracing::info!(
                route = %section.route,
                title = %section.title,
                pages = group.children.len(),
                "Built sidebar group"
            );
            sidebar.entry(section.route.clone()).or_default().push(group);
        }

        let theme_config = ThemeConfig::new(settings.theme.clone(), sidebar);
        Ok(SiteConfig::new(settings, theme_config))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use portico_storage::{MockListing, StorageErrorKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::filter::ExtensionFilter;
    use crate::settings::{HeadTag, NavbarLink, ThemeSettings};
    use crate::sidebar::{SidebarOrder, SidebarSection};

    static_assertions::assert_not_impl_any!(SiteConfig: Clone, Default);

    fn settings() -> SiteSettings {
        SiteSettings {
            base: "/".to_owned(),
            lang: "en-EN".to_owned(),
            title: "tacoscript".to_owned(),
            description: "Provisioning docs".to_owned(),
            head: vec![
                HeadTag::link([("rel", "icon"), ("href", "/favicon/favicon-16x16.png")]),
                HeadTag::meta("theme-color", "#0473e7"),
            ],
            edit_link: false,
            theme: ThemeSettings {
                logo: "logo/tacoscript-img-text.svg".to_owned(),
                navbar: vec![NavbarLink::new("Documentation", "/docs/")],
                repo: "cloudradar-monitoring/tacoscript".to_owned(),
                repo_label: "Github-Repo".to_owned(),
                ..ThemeSettings::default()
            },
            sidebar: vec![SidebarSection::new("/docs/", "Documentation", "docs")],
        }
    }

    fn docs() -> MockListing {
        MockListing::new()
            .with_file("docs/readme.md")
            .with_file("docs/intro.md")
            .with_file("docs/diagram.png")
            .with_dir("docs/assets")
    }

    #[test]
    fn test_assemble_full_shape() {
        let listing = docs();

        let config = ConfigAssembler::new(&listing).assemble(&settings()).unwrap();

        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "base": "/",
                "lang": "en-EN",
                "title": "tacoscript",
                "description": "Provisioning docs",
                "head": [
                    ["link", {"href": "/favicon/favicon-16x16.png", "rel": "icon"}],
                    ["meta", {"content": "#0473e7", "name": "theme-color"}],
                ],
                "editLink": false,
                "themeConfig": {
                    "logo": "logo/tacoscript-img-text.svg",
                    "navbar": [{"text": "Documentation", "link": "/docs/"}],
                    "repo": "cloudradar-monitoring/tacoscript",
                    "repoLabel": "Github-Repo",
                    "contributors": false,
                    "editLink": false,
                    "lastUpdated": false,
                    "sidebar": {
                        "/docs/": [{
                            "text": "Documentation",
                            "isGroup": true,
                            "children": ["readme.md", "intro.md"],
                        }]
                    }
                }
            })
        );
    }

    #[test]
    fn test_assemble_accessors() {
        let listing = docs();

        let config = ConfigAssembler::new(&listing).assemble(&settings()).unwrap();

        assert_eq!(config.title(), "tacoscript");
        assert_eq!(config.base(), "/");
        assert_eq!(config.head().len(), 2);
        let groups = config.theme_config().sidebar_for("/docs/").unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].children, vec!["readme.md", "intro.md"]);
    }

    #[test]
    fn test_sections_sharing_route_are_merged_in_order() {
        let listing = docs().with_file("guides/setup.md").with_file("guides/faq.md");
        let mut settings = settings();
        settings.sidebar.push(
            SidebarSection::new("/docs/", "Guides", "guides").with_order(SidebarOrder::Name),
        );

        let config = ConfigAssembler::new(&listing).assemble(&settings).unwrap();

        let groups = config.theme_config().sidebar_for("/docs/").unwrap();
        assert_eq!(
            groups.iter().map(|g| g.text.as_str()).collect::<Vec<_>>(),
            vec!["Documentation", "Guides"]
        );
        assert_eq!(groups[1].children, vec!["faq.md", "setup.md"]);
    }

    #[test]
    fn test_sections_with_distinct_routes() {
        let listing = docs().with_file("api/index.rst").with_file("api/client.rst");
        let mut settings = settings();
        settings.sidebar.push(
            SidebarSection::new("/api/", "API", "api")
                .with_extensions(ExtensionFilter::new([".rst"]).unwrap()),
        );

        let config = ConfigAssembler::new(&listing).assemble(&settings).unwrap();

        let sidebar = config.theme_config().sidebar();
        assert_eq!(
            sidebar.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["/api/", "/docs/"]
        );
        assert_eq!(sidebar["/api/"][0].children, vec!["index.rst", "client.rst"]);
    }

    #[test]
    fn test_no_sections_gives_empty_sidebar() {
        let listing = MockListing::new();
        let mut settings = settings();
        settings.sidebar.clear();

        let config = ConfigAssembler::new(&listing).assemble(&settings).unwrap();

        assert!(config.theme_config().sidebar().is_empty());
        assert_eq!(listing.calls(), 0);
    }

    #[test]
    fn test_missing_directory_aborts_assembly() {
        let listing = MockListing::new();

        let err = ConfigAssembler::new(&listing)
            .assemble(&settings())
            .unwrap_err();

        assert_eq!(err.path, PathBuf::from("docs"));
        assert_eq!(err.source.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_later_section_failure_discards_earlier_groups() {
        let listing = docs();
        let mut settings = settings();
        settings
            .sidebar
            .push(SidebarSection::new("/guide/", "Guide", "guide"));

        let result = ConfigAssembler::new(&listing).assemble(&settings);

        let err = result.unwrap_err();
        assert_eq!(err.path, PathBuf::from("guide"));
    }

    #[test]
    fn test_assemble_rescans_every_call() {
        let listing = docs();
        let assembler = ConfigAssembler::new(&listing);

        let first = assembler.assemble(&settings()).unwrap();
        let second = assembler.assemble(&settings()).unwrap();

        assert_eq!(first, second);
        assert_eq!(listing.calls(), 2);
    }
}
