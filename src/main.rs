//! viewstyle - apply a style sheet to the demo view tree

use std::process::ExitCode;

use clap::Parser;
use log::{LevelFilter, info};

use viewstyle::view::{ViewKind, default_appliers, demo_rules, demo_tree};
use viewstyle::{RuleSet, apply_styles};

#[derive(Parser)]
#[command(name = "viewstyle")]
#[command(version, about = "Apply style rules to a view tree", long_about = None)]
#[command(after_help = "EXAMPLES:
    viewstyle                          Style the demo tree with the demo rules
    viewstyle --rules sheet.json       Use rules from a JSON file
    viewstyle --class logo=Framed      Tag the view named 'logo' with class Framed
    viewstyle --json                   Print the styled tree as JSON")]
struct Cli {
    /// JSON rule set (defaults to the built-in demo rules)
    #[arg(short, long, value_name = "FILE")]
    rules: Option<String>,

    /// Extra class tag, as VIEW_NAME=CLASS (repeatable)
    #[arg(short, long = "class", value_name = "VIEW=CLASS", value_parser = parse_class_tag)]
    classes: Vec<(String, String)>,

    /// Print the styled tree as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn parse_class_tag(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((view, class)) if !view.is_empty() && !class.is_empty() => {
            Ok((view.to_string(), class.to_string()))
        }
        _ => Err(format!("expected VIEW=CLASS, got '{s}'")),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => LevelFilter::Off,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<(), String> {
    let rules: RuleSet<ViewKind> = match &cli.rules {
        Some(path) => RuleSet::from_json_file(path).map_err(|e| format!("{path}: {e}"))?,
        None => demo_rules(),
    };
    info!("loaded {} rules", rules.len());

    let (mut tree, mut classes) = demo_tree().map_err(|e| e.to_string())?;
    for (view, class) in &cli.classes {
        let id = tree
            .find_by_name(view)
            .ok_or_else(|| format!("no view named '{view}'"))?;
        classes.add_class(id, class.clone());
    }

    let appliers = default_appliers().map_err(|e| e.to_string())?;
    let root = tree.root();
    let stats = apply_styles(&mut tree, &rules, &appliers, &classes, root);
    info!(
        "styled {} views ({} declarations applied, {} without applier)",
        stats.nodes_visited, stats.declarations_applied, stats.declarations_skipped
    );

    let snapshot = tree
        .snapshot(root, &classes)
        .ok_or_else(|| "tree has no root".to_string())?;
    if cli.json {
        let json = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;
        println!("{json}");
    } else {
        print!("{}", snapshot.render());
    }

    Ok(())
}
