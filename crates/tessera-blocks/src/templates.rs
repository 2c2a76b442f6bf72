//! The built-in template definitions.

use tessera_model::TemplateType;

use crate::definition::{
    Align, ItemLayout, Region, RootLayout, Slot, TemplateDefinition, TextField, TextRole,
};

/// Definition for `template`.
pub fn definition(template: TemplateType) -> TemplateDefinition {
    match template {
        TemplateType::PricingCard => pricing_card(),
        TemplateType::FeatureList => feature_list(),
        TemplateType::HeroSection => hero_section(),
        TemplateType::Testimonial => testimonial(),
        TemplateType::CtaSection => cta_section(),
        TemplateType::TeamMember => team_member(),
        TemplateType::ServiceCard => service_card(),
        TemplateType::Custom => custom(),
    }
}

fn pricing_card() -> TemplateDefinition {
    TemplateDefinition::new(TemplateType::PricingCard, "div")
        .align(Align::Center)
        .max_width(360.0)
        .region(Region::new(
            "header",
            "div",
            vec![
                Slot::text("title", "h3", TextField::Title, TextRole::Title).required(),
                Slot::text("price", "p", TextField::Subtitle, TextRole::Price).required(),
            ],
        ))
        .region(Region::new(
            "body",
            "div",
            vec![
                Slot::text("description", "p", TextField::Description, TextRole::Body),
                Slot::items("features", ItemLayout::List),
            ],
        ))
        .region(Region::new(
            "footer",
            "div",
            vec![Slot::button("button").required()],
        ))
}

fn feature_list() -> TemplateDefinition {
    TemplateDefinition::new(TemplateType::FeatureList, "section")
        .max_width(1100.0)
        .region(Region::new(
            "header",
            "div",
            vec![
                Slot::text("title", "h2", TextField::Title, TextRole::Title).required(),
                Slot::text("description", "p", TextField::Description, TextRole::Lead),
            ],
        ))
        .region(Region::new(
            "body",
            "div",
            vec![Slot::items("features", ItemLayout::Grid { columns: 3 }).required()],
        ))
}

fn hero_section() -> TemplateDefinition {
    TemplateDefinition::new(TemplateType::HeroSection, "section")
        .align(Align::Center)
        .max_width(1200.0)
        .region(Region::new(
            "header",
            "div",
            vec![
                Slot::text("eyebrow", "p", TextField::Subtitle, TextRole::Eyebrow),
                Slot::text("title", "h1", TextField::Title, TextRole::Display).required(),
            ],
        ))
        .region(Region::new(
            "body",
            "div",
            vec![Slot::text("description", "p", TextField::Description, TextRole::Lead)],
        ))
        .region(Region::new("footer", "div", vec![Slot::button("button")]))
}

fn testimonial() -> TemplateDefinition {
    TemplateDefinition::new(TemplateType::Testimonial, "figure")
        .align(Align::Center)
        .max_width(640.0)
        .region(Region::new(
            "quote",
            "blockquote",
            vec![Slot::text("text", "p", TextField::Description, TextRole::Quote).required()],
        ))
        .region(Region::new(
            "author",
            "figcaption",
            vec![
                Slot::avatar("avatar", TextField::Title),
                Slot::text("name", "cite", TextField::Title, TextRole::Name).required(),
                Slot::text("role", "span", TextField::Subtitle, TextRole::Caption),
            ],
        ))
}

fn cta_section() -> TemplateDefinition {
    TemplateDefinition::new(TemplateType::CtaSection, "section")
        .layout(RootLayout::Split)
        .max_width(1100.0)
        .region(Region::new(
            "content",
            "div",
            vec![
                Slot::text("title", "h2", TextField::Title, TextRole::Title).required(),
                Slot::text("description", "p", TextField::Description, TextRole::Body),
            ],
        ))
        .region(Region::new(
            "actions",
            "div",
            vec![Slot::button("button").required()],
        ))
}

fn team_member() -> TemplateDefinition {
    TemplateDefinition::new(TemplateType::TeamMember, "article")
        .align(Align::Center)
        .max_width(320.0)
        .region(Region::new(
            "header",
            "div",
            vec![Slot::avatar("avatar", TextField::Title)],
        ))
        .region(Region::new(
            "body",
            "div",
            vec![
                Slot::text("name", "h3", TextField::Title, TextRole::Title).required(),
                Slot::text("role", "p", TextField::Subtitle, TextRole::Caption),
                Slot::text("bio", "p", TextField::Description, TextRole::Body),
            ],
        ))
        .region(Region::new(
            "footer",
            "div",
            vec![Slot::items("links", ItemLayout::Inline)],
        ))
}

fn service_card() -> TemplateDefinition {
    TemplateDefinition::new(TemplateType::ServiceCard, "article")
        .max_width(400.0)
        .region(Region::new(
            "header",
            "div",
            vec![
                Slot::text("title", "h3", TextField::Title, TextRole::Title).required(),
                Slot::text("tagline", "p", TextField::Subtitle, TextRole::Caption),
            ],
        ))
        .region(Region::new(
            "body",
            "div",
            vec![
                Slot::text("description", "p", TextField::Description, TextRole::Body),
                Slot::items("features", ItemLayout::List),
            ],
        ))
        .region(Region::new("footer", "div", vec![Slot::button("button")]))
}

/// Minimal skeleton; the slot list is driven by `content.items`.
fn custom() -> TemplateDefinition {
    TemplateDefinition::new(TemplateType::Custom, "div").region(Region::new(
        "body",
        "div",
        vec![
            Slot::text("title", "h2", TextField::Title, TextRole::Title),
            Slot::flow("blocks").required(),
        ],
    ))
}
