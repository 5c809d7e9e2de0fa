//! Static site settings and the assembled site configuration.
//!
//! [`SiteSettings`] holds the literal inputs (titles, head tags, theme
//! options, sidebar sections to scan). [`SiteConfig`] is the serialized shape
//! handed to the rendering system. Only [`ConfigAssembler`] can create a
//! `SiteConfig`, and it exposes no mutating API.
//!
//! [`ConfigAssembler`]: crate::ConfigAssembler

use std::collections::BTreeMap;

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

use crate::sidebar::{SidebarGroup, SidebarSection};

/// Tag injected into every page's `<head>`.
///
/// Serializes as a `[tag, {attributes}]` pair with attributes in the order
/// they were given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadTag {
    /// Element name (e.g. `link`, `meta`).
    pub tag: String,
    /// Attribute name/value pairs in authoring order.
    pub attrs: Vec<(String, String)>,
}

impl HeadTag {
    /// Create a tag from its name and attribute pairs.
    pub fn new<I, K, V>(tag: impl Into<String>, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            tag: tag.into(),
            attrs: attrs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// `<link>` tag.
    pub fn link<I, K, V>(attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new("link", attrs)
    }

    /// `<meta name=... content=...>` tag.
    pub fn meta(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new("meta", [("name", name.into()), ("content", content.into())])
    }

    /// Value of the first attribute called `name`.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Attribute pairs written as a map in their stored order.
struct OrderedAttrs<'a>(&'a [(String, String)]);

impl Serialize for OrderedAttrs<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key, value)))
    }
}

impl Serialize for HeadTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.tag)?;
        tuple.serialize_element(&OrderedAttrs(&self.attrs))?;
        tuple.end()
    }
}

/// Top navigation bar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavbarLink {
    /// Label.
    pub text: String,
    /// Target; a site path (`/docs/`) or an absolute URL.
    pub link: String,
}

impl NavbarLink {
    /// Create a navbar entry.
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }
}

/// Theme options copied verbatim into the assembled configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    /// Logo image path, relative to the public assets directory.
    pub logo: String,
    /// Navbar entries in display order.
    pub navbar: Vec<NavbarLink>,
    /// Repository, either `owner/name` or a full URL.
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

/// Literal inputs for assembling a [`SiteConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteSettings {
    /// Base URL the site is deployed under.
    pub base: String,
    /// Site language tag.
    pub lang: String,
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Tags injected into `<head>`, in order.
    pub head: Vec<HeadTag>,
    /// Site-level edit link toggle.
    pub edit_link: bool,
    /// Theme options.
    pub theme: ThemeSettings,
    /// Content directories to scan, in sidebar order.
    pub sidebar: Vec<SidebarSection>,
}

/// Theme section of the assembled configuration.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ThemeConfig {
    #[serde(flatten)]
    settings: ThemeSettings,
    sidebar: BTreeMap<String, Vec<SidebarGroup>>,
}

impl ThemeConfig {
    pub(crate) fn new(
        settings: ThemeSettings,
        sidebar: BTreeMap<String, Vec<SidebarGroup>>,
    ) -> Self {
        Self { settings, sidebar }
    }

    /// Theme options.
    #[must_use]
    pub fn settings(&self) -> &ThemeSettings {
        &self.settings
    }

    /// Sidebar groups keyed by route prefix.
    #[must_use]
    pub fn sidebar(&self) -> &BTreeMap<String, Vec<SidebarGroup>> {
        &self.sidebar
    }

    /// Groups shown under a route prefix.
    #[must_use]
    pub fn sidebar_for(&self, route: &str) -> Option<&[SidebarGroup]> {
        self.sidebar.get(route).map(Vec::as_slice)
    }
}

/// Assembled site configuration consumed by the rendering system.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    base: String,
    lang: String,
    title: String,
    description: String,
    head: Vec<HeadTag>,
    edit_link: bool,
    theme_config: ThemeConfig,
}

impl SiteConfig {
    pub(crate) fn new(settings: &SiteSettings, theme_config: ThemeConfig) -> Self {
        Self {
            base: settings.base.clone(),
            lang: settings.lang.clone(),
            title: settings.title.clone(),
            description: settings.description.clone(),
            head: settings.head.clone(),
            edit_link: settings.edit_link,
            theme_config,
        }
    }

    /// Base URL.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Language tag.
    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Site title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Site description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Head tags.
    #[must_use]
    pub fn head(&self) -> &[HeadTag] {
        &self.head
    }

    /// Site-level edit link toggle.
    #[must_use]
    pub fn edit_link(&self) -> bool {
        self.edit_link
    }

    /// Theme section.
    #[must_use]
    pub fn theme_config(&self) -> &ThemeConfig {
        &self.theme_config
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_head_tag_serializes_as_pair() {
        let tag = HeadTag::link([("rel", "manifest"), ("href", "/favicon/site.webmanifest")]);

        let value = serde_json::to_value(&tag).unwrap();

        assert_eq!(
            value,
            json!(["link", {"href": "/favicon/site.webmanifest", "rel": "manifest"}])
        );
    }

    #[test]
    fn test_meta_tag() {
        let tag = HeadTag::meta("theme-color", "#0473e7");

        assert_eq!(tag.tag, "meta");
        assert_eq!(tag.attr("name"), Some("theme-color"));
        assert_eq!(tag.attr("content"), Some("#0473e7"));
        assert_eq!(tag.attr("charset"), None);
    }

    #[test]
    fn test_head_tag_keeps_attribute_order() {
        let tag = HeadTag::link([
            ("rel", "icon"),
            ("type", "image/png"),
            ("sizes", "16x16"),
            ("href", "/favicon/favicon-16x16.png"),
        ]);

        assert_eq!(
            serde_json::to_string(&tag).unwrap(),
            r#"["link",{"rel":"icon","type":"image/png","sizes":"16x16","href":"/favicon/favicon-16x16.png"}]"#
        );
    }

    #[test]
    fn test_theme_config_flattens_settings() {
        let settings = ThemeSettings {
            logo: "logo.svg".to_owned(),
            navbar: vec![NavbarLink::new("Docs", "/docs/")],
            repo: "owner/name".to_owned(),
            repo_label: "Source".to_owned(),
            ..ThemeSettings::default()
        };
        let sidebar = BTreeMap::from([(
            "/docs/".to_owned(),
            vec![SidebarGroup::new("Docs", vec!["a.md".to_owned()])],
        )]);

        let value = serde_json::to_value(ThemeConfig::new(settings, sidebar)).unwrap();

        assert_eq!(
            value,
            json!({
                "logo": "logo.svg",
                "navbar": [{"text": "Docs", "link": "/docs/"}],
                "repo": "owner/name",
                "repoLabel": "Source",
                "contributors": false,
                "editLink": false,
                "lastUpdated": false,
                "sidebar": {
                    "/docs/": [{"text": "Docs", "isGroup": true, "children": ["a.md"]}]
                }
            })
        );
    }

    #[test]
    fn test_sidebar_for_unknown_route() {
        let theme = ThemeConfig::new(ThemeSettings::default(), BTreeMap::new());

        assert!(theme.sidebar_for("/guide/").is_none());
    }
}
