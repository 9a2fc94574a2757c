//! rovetree - Entry Point

use clap::Parser;
use rovetree::config::CliOverrides;
use rovetree::model::AppError;
use rovetree::state::SelectionMode;
use rovetree::view::{ColorConfig, TuiSettings};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{info, warn};

/// rovetree - keyboard-navigable tree browser for nested JSON
#[derive(Parser, Debug)]
#[command(name = "rovetree")]
#[command(version)]
#[command(about = "Browse a nested JSON tree with roving keyboard focus")]
pub struct Args {
    /// Path to JSON tree file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Allow selecting more than one item
    #[arg(short, long)]
    pub multi: bool,

    /// Start with every parent collapsed
    #[arg(short, long)]
    pub collapsed: bool,

    /// Log derived-view measurements at debug level
    #[arg(long)]
    pub debug: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Print the identifiers of the selected items on exit
    #[arg(short, long)]
    pub print_selection: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            selection_mode: self.multi.then_some(SelectionMode::Multi),
            collapsed: self.collapsed,
            debug: self.debug,
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = rovetree::config::load_config_with_precedence(args.config.clone())?;
        let merged = rovetree::config::merge_config(config_file);
        let with_env = rovetree::config::apply_env_overrides(merged);
        rovetree::config::apply_cli_overrides(with_env, args.overrides())
    };

    rovetree::logging::init(&config.log_file_path, config.debug_mode)?;
    for rejected in rovetree::config::rejected_env_overrides() {
        warn!("ignoring environment override {rejected}");
    }

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let key_bindings = config.key_bindings()?;

    // Read the whole tree before taking over the terminal
    let input_source = rovetree::source::detect_input_source(args.file.clone())?;
    let nodes = input_source.read_nodes()?;
    info!(source = %input_source.name(), roots = nodes.len(), "input loaded");

    let settings = TuiSettings {
        tree_options: config.tree_options(),
        flatten_options: config.flatten_options(),
        key_bindings,
        colors: ColorConfig::from_env_and_args(args.no_color),
    };

    let selection = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&selection);
    rovetree::view::run_with_source(&nodes, settings, move |event| {
        *sink.borrow_mut() = event
            .identifiers()
            .into_iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>();
    })?;

    if args.print_selection {
        for id in selection.borrow().iter() {
            println!("{id}");
        }
    }

    Ok(())
}
