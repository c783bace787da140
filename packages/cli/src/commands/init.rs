use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

const EXAMPLE_BLUEPRINT: &str = r#"title: Article
icon: page

columns:
  - width: 2/3
    fields:
      headline:
        type: text
      text:
        type: textarea
        uploads: inline
  - width: 1/3
    sections:
      gallery:
        type: files
        template: image
"#;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Blueprints directory
    #[arg(short, long, default_value = "blueprints")]
    pub blueprints_dir: String,

    /// Locale for labels and titles
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Folio project...".bright_blue().bold());

    let pages_dir = PathBuf::from(cwd).join(&args.blueprints_dir).join("pages");
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir)?;
        println!("  {} Created {}/pages/", "✓".green(), args.blueprints_dir);
    }

    let example_file = pages_dir.join("article.yml");
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_BLUEPRINT)?;
        println!("  {} Created pages/article.yml", "✓".green());
    }

    let config = Config {
        blueprints_dir: args.blueprints_dir.clone(),
        locale: args.locale,
        ..Config::default()
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/pages/article.yml", args.blueprints_dir);
    println!("  2. Run: folio normalize pages/article --pretty");
    println!("  3. Run: folio check {}", args.blueprints_dir);

    Ok(())
}
