//! The block configuration value and its defaults.

use serde::{Deserialize, Serialize};

/// Complete configuration of one block.
///
/// Every field falls back to its default when absent from a serialized document,
/// so a config file only needs to spell out what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockConfigData {
    /// Main heading text (untrusted)
    pub title: String,

    /// Secondary heading text (untrusted)
    pub subtitle: String,

    /// Body copy (untrusted)
    pub description: String,

    pub colors: Colors,
    pub typography: Typography,
    pub spacing: Spacing,
    pub effects: Effects,
    pub content: Content,
    pub responsive: Responsive,
}

impl Default for BlockConfigData {
    fn default() -> Self {
        Self {
            title: "Your Title Here".to_string(),
            subtitle: "Subtitle".to_string(),
            description: "Add your description here".to_string(),
            colors: Colors::default(),
            typography: Typography::default(),
            spacing: Spacing::default(),
            effects: Effects::default(),
            content: Content::default(),
            responsive: Responsive::default(),
        }
    }
}

/// Color palette. Values are opaque CSS color strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Colors {
    pub background: String,

    /// Takes over painting of the background when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_gradient: Option<String>,

    pub text_primary: String,
    pub text_secondary: String,
    pub accent_color: String,
    pub border_color: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            background: "#0F111A".to_string(),
            background_gradient: None,
            text_primary: "#FFFFFF".to_string(),
            text_secondary: "#B0BBC3".to_string(),
            accent_color: "#6366F1".to_string(),
            border_color: "#333333".to_string(),
        }
    }
}

/// Font settings. Sizes are pixels, line height is unitless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Typography {
    pub font_family: String,
    pub title_size: f64,
    pub subtitle_size: f64,
    pub body_size: f64,
    pub line_height: f64,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: "Inter".to_string(),
            title_size: 32.0,
            subtitle_size: 20.0,
            body_size: 16.0,
            line_height: 1.5,
        }
    }
}

/// Box spacing in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Spacing {
    pub padding: f64,
    pub margin: f64,
    pub border_radius: f64,
    pub gap: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            padding: 24.0,
            margin: 16.0,
            border_radius: 8.0,
            gap: 12.0,
        }
    }
}

/// Visual effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Effects {
    /// CSS box-shadow value; empty means none
    pub shadow: String,
    pub opacity: f64,
    pub border_width: f64,
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            shadow: "0 4px 6px rgba(0, 0, 0, 0.1)".to_string(),
            opacity: 1.0,
            border_width: 1.0,
        }
    }
}

/// Repeated content and the call-to-action button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Content {
    pub items: Vec<ContentItem>,
    pub button: ButtonConfig,
}

impl Default for Content {
    fn default() -> Self {
        let items = (1..=3)
            .map(|n| ContentItem {
                id: n.to_string(),
                kind: ItemKind::Text,
                content: format!("Feature {n}"),
                icon: Some("check".to_string()),
            })
            .collect();

        Self {
            items,
            button: ButtonConfig::default(),
        }
    }
}

/// One entry of `content.items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique within a config; feeds generated class tokens
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: ItemKind,

    #[serde(default)]
    pub content: String,

    /// Icon name, e.g. "check"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ContentItem {
    /// Create a plain text item.
    pub fn text(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ItemKind::Text,
            content: content.into(),
            icon: None,
        }
    }

    /// Builder-style icon setter.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Icon name to render, if any.
    ///
    /// Icon items always render an icon, text items only when one is named.
    pub fn icon_name(&self) -> Option<&str> {
        match (self.kind, self.icon.as_deref().map(str::trim)) {
            (_, Some(name)) if !name.is_empty() => Some(name),
            (ItemKind::Icon, _) => Some("dot"),
            _ => None,
        }
    }
}

/// Item variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Text,
    Icon,
}

/// Call-to-action button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonConfig {
    pub text: String,
    pub color: String,
    pub background_color: String,
    pub border_color: String,
    pub border_radius: f64,
    pub padding: f64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            text: "Get Started".to_string(),
            color: "#FFFFFF".to_string(),
            background_color: "#6366F1".to_string(),
            border_color: "#6366F1".to_string(),
            border_radius: 8.0,
            padding: 12.0,
        }
    }
}

/// Which breakpoint rule blocks are emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Responsive {
    pub mobile_view: bool,
    pub tablet_view: bool,
    pub desktop_view: bool,
}

impl Default for Responsive {
    fn default() -> Self {
        Self {
            mobile_view: true,
            tablet_view: true,
            desktop_view: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: BlockConfigData =
            serde_json::from_str(r#"{"title":"Pro","spacing":{"padding":8}}"#).unwrap();

        assert_eq!(config.title, "Pro");
        assert_eq!(config.spacing.padding, 8.0);
        assert_eq!(config.spacing.gap, 12.0);
        assert_eq!(config.colors.background, "#0F111A");
        assert_eq!(config.content.items.len(), 3);
    }

    #[test]
    fn uses_camel_case_on_the_wire() {
        let json = serde_json::to_string(&BlockConfigData::default()).unwrap();

        assert!(json.contains("\"textPrimary\""));
        assert!(json.contains("\"backgroundColor\""));
        assert!(json.contains("\"mobileView\""));
        assert!(json.contains("\"type\":\"text\""));
        assert!(!json.contains("backgroundGradient"));
    }

    #[test]
    fn icon_items_always_have_an_icon() {
        let mut item = ContentItem::text("a", "Alpha");
        assert_eq!(item.icon_name(), None);

        item.kind = ItemKind::Icon;
        assert_eq!(item.icon_name(), Some("dot"));

        let item = ContentItem::text("b", "Beta").with_icon(" star ");
        assert_eq!(item.icon_name(), Some("star"));
    }
}
