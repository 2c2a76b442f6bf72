//! Range bounds, clamping and validation.
//!
//! The editing surface already limits most inputs, but the compiler never trusts
//! its caller: out-of-range numbers are clamped, while structural problems
//! (duplicate ids, non-finite numbers) are reported with the offending path.

use std::collections::HashSet;

use crate::config::BlockConfigData;

/// Upper bounds applied when clamping. Every lower bound is zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub font_size: f64,
    pub line_height: f64,
    pub spacing: f64,
    pub border_radius: f64,
    pub border_width: f64,
    pub button_padding: f64,
    pub opacity: f64,
}

impl Bounds {
    pub const DEFAULT: Bounds = Bounds {
        font_size: 200.0,
        line_height: 5.0,
        spacing: 400.0,
        border_radius: 999.0,
        border_width: 50.0,
        button_padding: 200.0,
        opacity: 1.0,
    };
}

impl Default for Bounds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A missing or malformed configuration field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid config at {path}: {reason}")]
pub struct ConfigError {
    /// Dotted path, e.g. `content.items[2].id`
    pub path: String,
    pub reason: String,
}

impl ConfigError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// A required field that is absent or blank.
    pub fn missing(path: impl Into<String>) -> Self {
        Self::new(path, "required field is empty")
    }
}

fn clamp(value: f64, max: f64) -> f64 {
    // -0.0 would print as "-0"
    let v = value.clamp(0.0, max);
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

impl BlockConfigData {
    /// Check structural invariants that clamping cannot repair.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let numbers = [
            ("typography.titleSize", self.typography.title_size),
            ("typography.subtitleSize", self.typography.subtitle_size),
            ("typography.bodySize", self.typography.body_size),
            ("typography.lineHeight", self.typography.line_height),
            ("spacing.padding", self.spacing.padding),
            ("spacing.margin", self.spacing.margin),
            ("spacing.borderRadius", self.spacing.border_radius),
            ("spacing.gap", self.spacing.gap),
            ("effects.opacity", self.effects.opacity),
            ("effects.borderWidth", self.effects.border_width),
            ("content.button.borderRadius", self.content.button.border_radius),
            ("content.button.padding", self.content.button.padding),
        ];

        for (path, value) in numbers {
            if !value.is_finite() {
                return Err(ConfigError::new(path, "number must be finite"));
            }
        }

        let mut seen = HashSet::new();
        for (i, item) in self.content.items.iter().enumerate() {
            if item.id.trim().is_empty() {
                return Err(ConfigError::missing(format!("content.items[{i}].id")));
            }
            if !seen.insert(item.id.as_str()) {
                return Err(ConfigError::new(
                    format!("content.items[{i}].id"),
                    format!("duplicate item id '{}'", item.id),
                ));
            }
        }

        Ok(())
    }

    /// Copy of this config with every number clamped to [`Bounds::DEFAULT`].
    pub fn clamped(&self) -> Self {
        self.clamped_to(&Bounds::DEFAULT)
    }

    /// Copy of this config with every number clamped to `bounds`.
    pub fn clamped_to(&self, bounds: &Bounds) -> Self {
        let mut c = self.clone();

        let t = &mut c.typography;
        t.title_size = clamp(t.title_size, bounds.font_size);
        t.subtitle_size = clamp(t.subtitle_size, bounds.font_size);
        t.body_size = clamp(t.body_size, bounds.font_size);
        t.line_height = clamp(t.line_height, bounds.line_height);

        let s = &mut c.spacing;
        s.padding = clamp(s.padding, bounds.spacing);
        s.margin = clamp(s.margin, bounds.spacing);
        s.gap = clamp(s.gap, bounds.spacing);
        s.border_radius = clamp(s.border_radius, bounds.border_radius);

        let e = &mut c.effects;
        e.opacity = clamp(e.opacity, bounds.opacity);
        e.border_width = clamp(e.border_width, bounds.border_width);

        let b = &mut c.content.button;
        b.padding = clamp(b.padding, bounds.button_padding);
        b.border_radius = clamp(b.border_radius, bounds.border_radius);

        c
    }
}
