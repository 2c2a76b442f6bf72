//! The closed set of block templates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Template a block is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    PricingCard,
    FeatureList,
    HeroSection,
    Testimonial,
    CtaSection,
    TeamMember,
    ServiceCard,
    Custom,
}

impl TemplateType {
    /// Every template, in registry order.
    pub const ALL: [TemplateType; 8] = [
        TemplateType::PricingCard,
        TemplateType::FeatureList,
        TemplateType::HeroSection,
        TemplateType::Testimonial,
        TemplateType::CtaSection,
        TemplateType::TeamMember,
        TemplateType::ServiceCard,
        TemplateType::Custom,
    ];

    /// Wire tag, e.g. `pricing_card`.
    pub fn tag(self) -> &'static str {
        match self {
            TemplateType::PricingCard => "pricing_card",
            TemplateType::FeatureList => "feature_list",
            TemplateType::HeroSection => "hero_section",
            TemplateType::Testimonial => "testimonial",
            TemplateType::CtaSection => "cta_section",
            TemplateType::TeamMember => "team_member",
            TemplateType::ServiceCard => "service_card",
            TemplateType::Custom => "custom",
        }
    }

    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            TemplateType::PricingCard => "Pricing Card",
            TemplateType::FeatureList => "Feature List",
            TemplateType::HeroSection => "Hero Section",
            TemplateType::Testimonial => "Testimonial",
            TemplateType::CtaSection => "CTA Section",
            TemplateType::TeamMember => "Team Member",
            TemplateType::ServiceCard => "Service Card",
            TemplateType::Custom => "Custom",
        }
    }

    /// Position in [`TemplateType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for TemplateType {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

/// A template tag outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown template: {0}")]
pub struct UnknownTemplate(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_tag() {
        for template in TemplateType::ALL {
            assert_eq!(template.tag().parse::<TemplateType>(), Ok(template));
        }
    }

    #[test]
    fn rejects_unknown_tags() {
        assert_eq!(
            "foo_bar".parse::<TemplateType>(),
            Err(UnknownTemplate("foo_bar".to_string()))
        );
        assert!("PricingCard".parse::<TemplateType>().is_err());
    }

    #[test]
    fn index_matches_all_order() {
        for (i, template) in TemplateType::ALL.iter().enumerate() {
            assert_eq!(template.index(), i);
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&TemplateType::CtaSection).unwrap();
        assert_eq!(json, "\"cta_section\"");
    }
}
