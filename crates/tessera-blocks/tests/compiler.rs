use pretty_assertions::assert_eq;
use regex::Regex;
use tessera_blocks::{generate, generate_tag, CompileError, Compiler};
use tessera_model::{BlockConfigData, ContentItem, TemplateType};

const TABLET_QUERY: &str = "@media (min-width: 768px) and (max-width: 1023px)";
const MOBILE_QUERY: &str = "@media (max-width: 767px)";
const DESKTOP_QUERY: &str = "@media (min-width: 1024px)";

fn hostile_config() -> BlockConfigData {
    let payload = "<script>alert('x')</script>";
    let mut config = BlockConfigData::default();
    config.title = payload.to_string();
    config.subtitle = payload.to_string();
    config.description = payload.to_string();
    config.content.button.text = payload.to_string();
    config.content.items = vec![
        ContentItem::text("\"><script>", payload).with_icon(payload),
        ContentItem::text("b", "Fine"),
    ];
    config
}

#[test]
fn output_is_deterministic() {
    let config = BlockConfigData::default();
    let cached = Compiler::with_cache(8);

    for template in TemplateType::ALL {
        let a = generate(&config, template).unwrap();
        let b = generate(&config.clone(), template).unwrap();
        let c = cached.generate(&config, template).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }
}

#[test]
fn untrusted_text_is_escaped_everywhere() {
    let config = hostile_config();

    for template in TemplateType::ALL {
        let code = generate(&config, template).unwrap();
        assert!(!code.html.contains("<script"), "{template}: {}", code.html);
        assert!(code.html.contains("&lt;script&gt;"), "{template}");
    }
}

#[test]
fn css_values_cannot_break_out_of_the_rule() {
    let mut config = BlockConfigData::default();
    config.colors.background = "red;}</style><script>".to_string();
    config.effects.shadow = "none} body { display: none".to_string();
    config.typography.font_family = "Inter/*".to_string();

    let code = generate(&config, TemplateType::HeroSection).unwrap();
    assert!(!code.css.contains('<'));
    assert!(!code.css.contains("/*"));
    assert!(!code.css.contains("body {"));
    assert!(code.css.contains("background-color: red /style script;"));
}

#[test]
fn disabling_mobile_removes_mobile_rules() {
    let mut config = BlockConfigData::default();
    let with = generate(&config, TemplateType::FeatureList).unwrap();
    assert!(with.css.contains(MOBILE_QUERY));

    config.responsive.mobile_view = false;
    let without = generate(&config, TemplateType::FeatureList).unwrap();
    assert!(!without.css.contains(MOBILE_QUERY));
    assert!(!without.css.contains("767px"));
    assert!(without.css.contains(TABLET_QUERY));
    assert_eq!(with.html, without.html);
}

#[test]
fn disabling_desktop_removes_desktop_rules() {
    let mut config = BlockConfigData::default();
    let with = generate(&config, TemplateType::PricingCard).unwrap();
    assert!(with.css.contains(DESKTOP_QUERY));
    assert!(with.css.contains("max-width: 360px;"));

    config.responsive.desktop_view = false;
    let without = generate(&config, TemplateType::PricingCard).unwrap();
    assert!(!without.css.contains(DESKTOP_QUERY));
    assert!(!without.css.contains("1024px"));
    assert!(!without.css.contains("max-width: 360px;"));
    assert!(without.css.contains(MOBILE_QUERY));
    assert!(without.css.contains(TABLET_QUERY));
    assert_eq!(with.html, without.html);
}

#[test]
fn out_of_range_numbers_are_clamped() {
    let mut config = BlockConfigData::default();
    config.effects.opacity = 1.5;
    config.spacing.padding = -10.0;
    config.spacing.gap = -4.0;
    config.typography.title_size = 10_000.0;

    let negative = Regex::new(r"[\s:(]-\d").unwrap();

    for template in TemplateType::ALL {
        let css = generate(&config, template).unwrap().css;
        assert!(css.contains("opacity: 1;"), "{template}");
        assert!(!css.contains("opacity: 1.5"), "{template}");
        assert!(!negative.is_match(&css), "{template}: {css}");
        assert!(!css.contains("10000px"), "{template}");
    }
}

#[test]
fn scenario_pricing_card() {
    let mut config = BlockConfigData::default();
    config.title = "Pro".to_string();
    config.content.items = vec![ContentItem::text("1", "Feature A").with_icon("check")];
    config.content.button.text = "Buy".to_string();

    let code = generate(&config, TemplateType::PricingCard).unwrap();

    assert_eq!(code.html.matches(">Feature A<").count(), 1);
    assert_eq!(code.html.matches("role=\"button\"").count(), 1);
    assert!(code.html.contains("role=\"button\">Buy</a>"));
    assert!(code.html.contains(">Pro</h3>"));
    assert!(code
        .css
        .contains(&format!("background-color: {};", config.colors.background)));
}

#[test]
fn scenario_unknown_template() {
    let err = generate_tag(&BlockConfigData::default(), "foo_bar").unwrap_err();
    assert_eq!(err, CompileError::UnknownTemplate("foo_bar".to_string()));
}

#[test]
fn scenario_tablet_toggle() {
    let mut config = BlockConfigData::default();
    let with = generate(&config, TemplateType::CtaSection).unwrap();

    config.responsive.tablet_view = false;
    let without = generate(&config, TemplateType::CtaSection).unwrap();

    assert_eq!(with.html, without.html);
    assert!(!without.css.contains(TABLET_QUERY));

    let start = with.css.find(&format!("\n{TABLET_QUERY}")).unwrap();
    let end = start + with.css[start..].find("\n}\n").unwrap() + 3;
    let mut stripped = with.css.clone();
    stripped.replace_range(start..end, "");
    assert_eq!(stripped, without.css);
}

#[test]
fn missing_required_content_fails_without_output() {
    let mut config = BlockConfigData::default();
    config.content.items.clear();

    let err = generate(&config, TemplateType::FeatureList).unwrap_err();
    assert_eq!(err.path(), Some("content.items"));

    // Optional lists are simply omitted
    let code = generate(&config, TemplateType::ServiceCard).unwrap();
    assert!(!code.html.contains("<ul"));
}

#[test]
fn gradient_overrides_background_color() {
    let mut config = BlockConfigData::default();
    config.colors.background_gradient =
        Some("linear-gradient(135deg, #667eea 0%, #764ba2 100%)".to_string());

    let css = generate(&config, TemplateType::HeroSection).unwrap().css;
    let color = css.find("background-color: #0F111A;").unwrap();
    let gradient = css
        .find("background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);")
        .unwrap();
    assert!(color < gradient);
    assert!(!css.contains("background-image"));

    // A plain color in the gradient slot still takes effect
    config.colors.background_gradient = Some("#123456".to_string());
    let css = generate(&config, TemplateType::HeroSection).unwrap().css;
    assert!(css.contains("background: #123456;"));

    config.colors.background_gradient = Some("  ".to_string());
    let css = generate(&config, TemplateType::HeroSection).unwrap().css;
    assert!(!css.contains("background: "));
}

#[test]
fn item_classes_follow_ids() {
    let mut config = BlockConfigData::default();
    config.content.items = vec![
        ContentItem::text("alpha", "A"),
        ContentItem::text("Alpha", "B"),
    ];

    let html = generate(&config, TemplateType::FeatureList).unwrap().html;
    assert!(html.contains("__features-item--alpha\""));
    assert!(html.contains("data-item-id=\"Alpha\""));
    assert!(!html.contains("__features-item--Alpha"));
}
