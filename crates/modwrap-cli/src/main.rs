use anyhow::Context;
use clap::Parser;
use modwrap_core::config::CONFIG_FILE_NAME;
use modwrap_core::{
    normalize_path, par_process_modules, process_modules, BundleConfig, CliOverrides, Module,
    ModuleIdAllocator, SequentialIdAllocator, WrapOptions,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// modwrap - wrap compiled modules for a bundle's module registry
#[derive(Parser, Debug, Clone)]
#[command(name = "modwrap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Module graph (JSON array of modules)
    #[arg(value_name = "GRAPH", required_unless_present = "init")]
    graph: Option<PathBuf>,

    /// Path to modwrap.yaml or modwrap.json
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Inject verbose module names
    #[arg(long)]
    dev: bool,

    /// Root that verbose module names are relative to
    #[arg(long, value_name = "DIR")]
    project_root: Option<PathBuf>,

    /// Write wrapped modules to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    out_file: Option<PathBuf>,

    /// Wrap modules in parallel
    #[arg(long)]
    parallel: bool,

    /// Write a default modwrap.yaml in the current directory
    #[arg(long)]
    init: bool,
}

fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=debug for detailed logs
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    if cli.init {
        BundleConfig::init_file(Path::new(CONFIG_FILE_NAME))
            .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;
        println!("Created {}", CONFIG_FILE_NAME);
        return Ok(());
    }

    let config = load_config(&cli)?;
    let Some(graph_path) = cli.graph.as_deref() else {
        anyhow::bail!("No module graph specified. Use --help for usage information.");
    };

    let modules = read_graph(graph_path)?;
    info!("Wrapping {} module(s) from {}", modules.len(), graph_path.display());

    // Verbose names are computed against an absolute root, so a relative
    // --project-root is taken from the current directory
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let project_root = match config.project_root.as_deref() {
        Some(root) => normalize_path(&cwd.join(root)),
        None => cwd,
    };
    debug!("Project root: {}", project_root.display());
    debug!("Dev mode: {}", config.dev);

    // Number modules in graph order so ids do not depend on wrap order
    let ids = SequentialIdAllocator::new();
    for module in &modules {
        ids.create_module_id(&module.path);
    }

    let options = WrapOptions::new(&ids, &project_root).with_dev(config.dev);
    let result = if config.parallel {
        par_process_modules(&modules, &options, |_| true)
    } else {
        process_modules(&modules, &options, |_| true)
    };
    let wrapped = result.context("Failed to wrap modules")?;

    let mut out = wrapped
        .iter()
        .map(|(_, code)| code.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');

    match &cli.out_file {
        Some(path) => {
            std::fs::write(path, out)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} module(s) to {}", wrapped.len(), path.display());
        }
        None => print!("{}", out),
    }

    Ok(())
}

/// Load the config file (explicit or discovered) and apply CLI flags on top
fn load_config(cli: &Cli) -> anyhow::Result<BundleConfig> {
    let mut config = if let Some(ref path) = cli.config {
        BundleConfig::from_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?
    } else {
        discover_config()?
    };

    config.merge_cli(CliOverrides {
        dev: cli.dev.then_some(true),
        project_root: cli.project_root.clone(),
        parallel: cli.parallel.then_some(true),
    });
    Ok(config)
}

fn discover_config() -> anyhow::Result<BundleConfig> {
    for name in [CONFIG_FILE_NAME, "modwrap.json"] {
        let path = PathBuf::from(name);
        if path.exists() {
            debug!("Using config {}", name);
            return BundleConfig::from_file(&path)
                .with_context(|| format!("Failed to load {}", name));
        }
    }
    debug!("No config file found, using defaults");
    Ok(BundleConfig::default())
}

fn read_graph(path: &Path) -> anyhow::Result<Vec<Module>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read module graph {}", path.display()))?;
    let modules: Vec<Module> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid module graph {}", path.display()))?;
    if modules.is_empty() {
        warn!("Module graph {} is empty", path.display());
    }
    Ok(modules)
}
