//! Initialize a block project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command in `root`.
pub async fn run(root: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing tessera...");

    let blocks_dir = root.join("blocks");

    if blocks_dir.exists() {
        if !yes {
            tracing::warn!("blocks/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(&blocks_dir).context("Failed to create blocks directory")?;
    }

    let files = [
        (root.join("tessera.toml"), DEFAULT_CONFIG),
        (blocks_dir.join("pricing-card.yaml"), DEFAULT_PRICING_CARD),
        (blocks_dir.join("hero-section.yaml"), DEFAULT_HERO_SECTION),
    ];

    for (path, contents) in files {
        if !path.exists() || yes {
            fs::write(&path, contents)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Created {}", path.display());
        }
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'tessera dev blocks/pricing-card.yaml' to start editing.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Tessera Configuration

[blocks]
# Directory containing block documents (.yaml, .yml, .json)
dir = "blocks"

# Output directory for exported blocks
output = "dist"

# Gallery page title
title = "My Blocks"

[build]
# Minify exported HTML and CSS
minify = true

# Check generated CSS with lightningcss
validate_css = true

[store]
# Where saved blocks are kept
dir = ".tessera/blocks"

[server]
port = 7777
host = "127.0.0.1"
"#;

const DEFAULT_PRICING_CARD: &str = r##"name: Pro Plan
template: pricing_card
config:
  title: Pro
  subtitle: $29/month
  description: Everything a growing team needs.
  colors:
    background: "#0F111A"
    accentColor: "#6366F1"
  content:
    items:
      - id: seats
        type: text
        content: Unlimited seats
        icon: check
      - id: support
        type: text
        content: Priority support
        icon: check
      - id: sso
        type: text
        content: Single sign-on
        icon: star
    button:
      text: Start free trial
"##;

const DEFAULT_HERO_SECTION: &str = r##"name: Launch Hero
template: hero_section
config:
  title: Ship pages faster
  subtitle: New release
  description: Configure a block once and paste it into any page builder.
  colors:
    backgroundGradient: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"
  spacing:
    padding: 48
  content:
    button:
      text: Get Started
"##;
