use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "flexinfer", version)]
struct Cli {
    /// Log inference decisions (debug level) to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate layout code for every root in a scene.
    Convert(ConvertArgs),
    /// Print the annotated trees as JSON.
    Inspect(InspectArgs),
    /// Print the distinct fill and stroke colors, one per line.
    Colors(SceneArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Inference thresholds JSON; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Code target.
    #[arg(long, value_enum, default_value_t = TargetChoice::Markup)]
    target: TargetChoice,

    /// Emit JSX attributes (markup target).
    #[arg(long)]
    jsx: bool,

    /// Add layer names as classes (markup target).
    #[arg(long)]
    layer_names: bool,

    /// Convert roots on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel` (defaults to the number of CPUs).
    #[arg(long)]
    threads: Option<usize>,

    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TargetChoice {
    Markup,
    Widget,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Colors(args) => cmd_colors(args),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("flexinfer=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(args: &SceneArgs) -> anyhow::Result<(flexinfer::Scene, flexinfer::InferenceConfig)> {
    let scene = flexinfer::Scene::from_path(&args.in_path)
        .with_context(|| format!("load scene '{}'", args.in_path.display()))?;
    let config = match &args.config {
        Some(path) => flexinfer::InferenceConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => flexinfer::InferenceConfig::default(),
    };
    Ok((scene, config))
}

fn write_output(out: Option<&Path>, body: &str) -> anyhow::Result<()> {
    let Some(path) = out else {
        println!("{body}");
        return Ok(());
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, format!("{body}\n"))
        .with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let (scene, config) = load(&args.scene)?;
    let conversions = if args.parallel {
        flexinfer::convert_parallel(&scene, &config, args.threads)?
    } else {
        flexinfer::convert(&scene, &config)?
    };

    let target = match args.target {
        TargetChoice::Markup => flexinfer::Target::Markup,
        TargetChoice::Widget => flexinfer::Target::Widget,
    };
    let builder = flexinfer::create_builder(
        target,
        flexinfer::EmitOptions {
            jsx: args.jsx,
            layer_names: args.layer_names,
        },
    );
    let code = builder.build_all(&conversions)?;
    write_output(args.out.as_deref(), &code)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (scene, config) = load(&args.scene)?;
    let conversions = flexinfer::convert(&scene, &config)?;
    let trees: Vec<_> = conversions.iter().map(|c| c.tree.to_annotated()).collect();
    let json = serde_json::to_string_pretty(&trees).context("serialize annotated trees")?;
    write_output(args.out.as_deref(), &json)
}

fn cmd_colors(args: SceneArgs) -> anyhow::Result<()> {
    let (scene, _) = load(&args)?;
    let mut colors = std::collections::BTreeSet::new();
    for root in &scene.roots {
        let tree = flexinfer::SceneTree::from_node(root)?;
        colors.extend(flexinfer::collect_colors(&tree));
    }
    for c in colors {
        println!("{c}");
    }
    Ok(())
}
