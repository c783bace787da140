use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_blueprint::{Blueprint, Diagnostic, DiagnosticLevel, NormalizeContext};
use folio_common::{Model, StaticModel};
use folio_registry::parse_yaml;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Blueprint file or directory to check
    pub input: PathBuf,

    /// Show all diagnostics including info level
    #[arg(short, long)]
    pub all: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Diagnostics of one blueprint file
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let ctx = config.context(cwd);
    let model: Arc<dyn Model> = Arc::new(StaticModel::new(config.model_id.as_str()));

    let input = Path::new(cwd).join(&args.input);
    let (root, files) = if input.is_file() {
        let root = input.parent().map(Path::to_path_buf).unwrap_or_default();
        (root, vec![input.clone()])
    } else if input.is_dir() {
        (input.clone(), find_blueprint_files(&input))
    } else {
        return Err(anyhow::anyhow!(
            "Input path does not exist: {}",
            args.input.display()
        ));
    };

    let json = args.format == "json";
    if !json {
        println!("🔍 {} Folio blueprint check", "Starting".green().bold());
        println!("   Input: {}", args.input.display());
        println!("   Found {} blueprint files", files.len());
        println!();
    }

    let reports: Vec<FileReport> = files
        .iter()
        .map(|file| check_file(file, &root, &model, &ctx))
        .collect();

    let total_errors: usize = reports.iter().map(|r| r.count(DiagnosticLevel::Error)).sum();
    let total_warnings: usize = reports.iter().map(|r| r.count(DiagnosticLevel::Warning)).sum();
    let total_diagnostics: usize = reports.iter().map(|r| r.diagnostics.len()).sum();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report, args.all);
        }

        println!(
            "✨ {} Check complete!",
            if total_errors > 0 {
                "Done".red().bold()
            } else {
                "Done".green().bold()
            }
        );
        println!("   Files checked: {}", reports.len());
        println!("   Total diagnostics: {}", total_diagnostics);

        if total_errors > 0 {
            println!("   {} {}", "Errors:".red(), total_errors);
        }
        if total_warnings > 0 {
            println!("   {} {}", "Warnings:".yellow(), total_warnings);
        }
        if total_errors == 0 && total_warnings == 0 {
            println!("   {} No issues found!", "✓".green());
        }
    }

    if total_errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Normalize one file and collect everything the engine recovered from
pub fn check_file(
    file_path: &Path,
    root: &Path,
    model: &Arc<dyn Model>,
    ctx: &NormalizeContext,
) -> FileReport {
    let diagnostics = match load_props(file_path, root) {
        Ok(value) => match Blueprint::from_value(value, Some(model.clone()), ctx.clone()) {
            Ok(blueprint) => match blueprint.try_normalized() {
                Ok(_) => blueprint.diagnostics().to_vec(),
                Err(err) => vec![Diagnostic::error("normalize-error", err.to_string(), "")],
            },
            Err(err) => vec![Diagnostic::error("invalid-blueprint", err.to_string(), "")],
        },
        Err(diagnostic) => vec![diagnostic],
    };

    debug!(
        path = %file_path.display(),
        diagnostics = diagnostics.len(),
        "Checked blueprint"
    );

    FileReport {
        path: file_path.to_path_buf(),
        diagnostics,
    }
}

fn load_props(file_path: &Path, root: &Path) -> Result<Value, Diagnostic> {
    let source = fs::read_to_string(file_path)
        .map_err(|err| Diagnostic::error("load-error", err.to_string(), ""))?;
    let mut value = parse_yaml(&source, file_path)
        .map_err(|err| Diagnostic::error("load-error", err.to_string(), ""))?;

    // named after the path below the checked root, like the registry does
    if let Value::Object(map) = &mut value {
        if !map.contains_key("name") {
            map.insert("name".to_string(), Value::String(blueprint_name(file_path, root)));
        }
    }

    Ok(value)
}

fn blueprint_name(file_path: &Path, root: &Path) -> String {
    let relative = file_path.strip_prefix(root).unwrap_or(file_path);
    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn print_report(report: &FileReport, all: bool) {
    let visible: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| all || d.level != DiagnosticLevel::Info)
        .collect();

    if visible.is_empty() {
        if all {
            println!("{} {}", "✓".green(), report.path.display());
        }
        return;
    }

    println!("{}", report.path.display());

    for diagnostic in visible {
        let level_str = match diagnostic.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };

        println!("  {} [{}] {}", level_str, diagnostic.rule, diagnostic.message);

        if !diagnostic.path.is_empty() {
            println!("    {} {}", "at".dimmed(), diagnostic.path.dimmed());
        }

        if let Some(suggestion) = &diagnostic.suggestion {
            println!("    {} {}", "💡".dimmed(), suggestion.dimmed());
        }
    }

    println!();
}

fn find_blueprint_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map(|e| e == "yml" || e == "yaml")
                    .unwrap_or(false)
        })
        .collect();

    files.sort();
    files
}
