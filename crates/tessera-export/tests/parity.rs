use pretty_assertions::assert_eq;
use tessera_blocks::{generate, Breakpoint, PreviewRenderer};
use tessera_export::{minify_code, minify_css, minify_html};
use tessera_model::{BlockConfigData, ContentItem, ItemKind, TemplateType};

fn configs() -> Vec<BlockConfigData> {
    let mut varied = BlockConfigData::default();
    varied.title = "Ada Lovelace & Co".to_string();
    varied.subtitle = "Engineer at \"Analytical\"".to_string();
    varied.content.items = vec![
        ContentItem::text("one", "First item").with_icon("star"),
        ContentItem {
            id: "Two Words".to_string(),
            kind: ItemKind::Icon,
            content: "Second".to_string(),
            icon: None,
        },
        ContentItem::text("3", "Third"),
    ];

    let mut sparse = BlockConfigData::default();
    sparse.subtitle = String::new();
    sparse.description = String::new();

    let mut spaced = BlockConfigData::default();
    spaced.subtitle = "$10\u{a0}/\u{a0}mo".to_string();
    spaced.description = "Billed   yearly\u{a0}\u{a0}only".to_string();

    vec![BlockConfigData::default(), varied, sparse, spaced]
}

#[test]
fn preview_outline_matches_minified_html() {
    let renderer = PreviewRenderer::new();

    for config in configs() {
        for template in TemplateType::ALL {
            let Ok(code) = generate(&config, template) else {
                assert!(renderer
                    .render(&config, template, Breakpoint::Desktop)
                    .is_err());
                continue;
            };

            for viewport in Breakpoint::ASCENDING {
                let preview = renderer.render(&config, template, viewport).unwrap();
                assert_eq!(preview.outline(), minify_html(&code.html), "{template}");
            }
        }
    }
}

#[test]
fn minified_output_is_stable() {
    for template in TemplateType::ALL {
        let code = generate(&BlockConfigData::default(), template).unwrap();

        let html = minify_html(&code.html);
        let css = minify_css(&code.css);
        assert_eq!(minify_html(&html), html);
        assert_eq!(minify_css(&css), css);
        assert!(html.len() <= code.html.len());
        assert!(css.len() <= code.css.len());
    }
}

#[test]
fn non_breaking_spaces_survive_minification() {
    let mut config = BlockConfigData::default();
    config.subtitle = "$10\u{a0}/\u{a0}mo".to_string();

    for template in [TemplateType::PricingCard, TemplateType::HeroSection] {
        let code = generate(&config, template).unwrap();
        assert!(code.html.contains("$10\u{a0}/\u{a0}mo"));

        let minified = minify_code(&code);
        assert!(minified.html.contains("$10\u{a0}/\u{a0}mo"), "{template}");

        let preview = PreviewRenderer::new()
            .render(&config, template, Breakpoint::Desktop)
            .unwrap();
        assert!(preview.to_html().contains("$10\u{a0}/\u{a0}mo"));
    }
}
