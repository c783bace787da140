use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use folio_blueprint::Blueprint;
use folio_common::{Model, StaticModel};
use folio_registry::parse_yaml;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Blueprint name (e.g. pages/article) or path to a .yml file
    pub input: String,

    /// Fallback blueprint name when the named one does not exist
    #[arg(long)]
    pub fallback: Option<String>,

    /// Model id the blueprint is normalized for
    #[arg(short, long)]
    pub model: Option<String>,

    /// Panel URL of the model, used for tab links
    #[arg(long)]
    pub panel_url: Option<String>,

    /// Pretty print the JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

pub fn normalize(args: NormalizeArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let blueprint = load_blueprint(&args, &config, cwd)?;

    let value = blueprint.to_value()?;
    let json = if args.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    println!("{}", json);

    Ok(())
}

pub(crate) fn load_blueprint(args: &NormalizeArgs, config: &Config, cwd: &str) -> Result<Blueprint> {
    let ctx = config.context(cwd);

    let mut model = StaticModel::new(args.model.as_deref().unwrap_or(&config.model_id));
    if let Some(url) = &args.panel_url {
        model = model.with_panel_url(url.as_str());
    }
    let model: Arc<dyn Model> = Arc::new(model);

    let path = Path::new(cwd).join(&args.input);
    if path.is_file() {
        debug!(path = %path.display(), "Normalizing blueprint file");
        let source = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value = parse_yaml(&source, &path)?;
        return Ok(Blueprint::from_value(value, Some(model), ctx)?);
    }

    debug!(name = %args.input, "Normalizing named blueprint");
    Blueprint::factory(&args.input, args.fallback.as_deref(), model, ctx)?
        .ok_or_else(|| anyhow!("Blueprint not found: {}", args.input))
}
