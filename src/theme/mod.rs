//! Preview themes.
//!
//! Two static catalogs: typography themes style the preview container and
//! its headings, code themes style code blocks and inline code. Lookups
//! never fail; an unknown id resolves to the first entry of its catalog.

mod apply;
mod catalog;

pub use apply::{apply_code, apply_typography};
pub use catalog::{CODE_THEMES, TYPOGRAPHY_THEMES};

use serde::{Serialize, Serializer};

/// `(property, value)` declarations with camelCase property names.
pub type StyleTable = &'static [(&'static str, &'static str)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyTheme {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub sample: &'static str,
    #[serde(serialize_with = "style_map")]
    pub container_style: StyleTable,
    #[serde(serialize_with = "style_map")]
    pub heading_style: StyleTable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeTheme {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub sample: &'static str,
    #[serde(serialize_with = "style_map")]
    pub block_style: StyleTable,
    pub keyword_color: &'static str,
    pub string_color: &'static str,
    pub comment_color: &'static str,
    pub function_color: &'static str,
}

impl CodeTheme {
    /// Value of a `block_style` property, if declared.
    pub fn block_value(&self, property: &str) -> Option<&'static str> {
        self.block_style
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| *v)
    }
}

pub fn default_typography() -> &'static TypographyTheme {
    &TYPOGRAPHY_THEMES[0]
}

pub fn default_code() -> &'static CodeTheme {
    &CODE_THEMES[0]
}

/// Typography theme by id, falling back to the default.
pub fn typography(id: &str) -> &'static TypographyTheme {
    TYPOGRAPHY_THEMES
        .iter()
        .find(|theme| theme.id == id)
        .unwrap_or_else(default_typography)
}

/// Code theme by id, falling back to the default.
pub fn code(id: &str) -> &'static CodeTheme {
    CODE_THEMES
        .iter()
        .find(|theme| theme.id == id)
        .unwrap_or_else(default_code)
}

fn style_map<S: Serializer>(table: &StyleTable, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(table.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_first_entries() {
        assert_eq!(default_typography().id, "classic");
        assert_eq!(default_code().id, "github");
    }

    #[test]
    fn test_unknown_ids_fall_back_to_default() {
        assert_eq!(typography("does-not-exist"), typography("classic"));
        assert_eq!(code(""), default_code());
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(typography("novel").name, "小说阅读");
        assert_eq!(code("vs-code").keyword_color, "#569cd6");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<_> = TYPOGRAPHY_THEMES.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TYPOGRAPHY_THEMES.len());

        let mut ids: Vec<_> = CODE_THEMES.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CODE_THEMES.len());
    }

    #[test]
    fn test_every_code_theme_declares_background() {
        for theme in CODE_THEMES {
            assert!(
                theme.block_value("backgroundColor").is_some(),
                "{} has no background",
                theme.id
            );
        }
    }

    #[test]
    fn test_serializes_styles_as_maps() {
        let json = serde_json::to_value(code("monokai")).unwrap();
        assert_eq!(json["blockStyle"]["backgroundColor"], "#272822");
        assert_eq!(json["keywordColor"], "#f92672");
    }
}
