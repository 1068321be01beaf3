//! paramgen CLI entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use paramgen_core::{OutputFormat, ParameterNameMap, Settings, Variant, build_map, generate, render};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "paramgen")]
#[command(about = "Generate quoter parameter names from a syntax tree descriptor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate parameter-names.json (the default command)
    Generate(GenerateArgs),

    /// Print the parameter names of one node
    Lookup {
        /// Generated parameter-names.json
        map: PathBuf,

        /// Node name (e.g. IfElseStatementNode)
        node: String,
    },
}

#[derive(clap::Args, Default)]
struct GenerateArgs {
    /// paramgen.toml; relative paths inside it resolve against its directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory that relative paths resolve against
    #[arg(short = 'C', long)]
    base_dir: Option<PathBuf>,

    /// Default set of output destinations
    #[arg(long, value_enum)]
    variant: Option<VariantArg>,

    /// Syntax tree descriptor
    #[arg(short, long)]
    descriptor: Option<PathBuf>,

    /// Output file (repeatable); replaces the variant's outputs
    #[arg(short, long = "output")]
    outputs: Vec<PathBuf>,

    /// Indent the generated JSON
    #[arg(long)]
    pretty: bool,

    /// Print the map instead of writing files
    #[arg(long)]
    stdout: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum VariantArg {
    Main,
    MainAndTest,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Main => Variant::Main,
            VariantArg::MainAndTest => Variant::MainAndTest,
        }
    }
}

impl GenerateArgs {
    fn settings(self) -> paramgen_core::Result<Settings> {
        let base = match &self.config {
            Some(path) => Settings::from_config_file(path)?,
            None => Settings::default(),
        };
        let flags = Settings {
            base_dir: self.base_dir,
            variant: self.variant.map(Variant::from),
            descriptor: self.descriptor,
            outputs: self.outputs,
            format: self.pretty.then_some(OutputFormat::Pretty),
        };
        Ok(base.merge(flags))
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = args.stdout;
    let config = args.settings()?.resolve()?;

    if stdout {
        let map = build_map(&config.descriptor)?;
        println!("{}", render(&map, config.format)?);
        return Ok(());
    }

    let report = generate(&config)?;
    info!(
        "Generated parameter names for {} nodes into {} file(s)",
        report.nodes,
        report.written.len()
    );
    Ok(())
}

fn run_lookup(map: PathBuf, node: String) -> Result<(), Box<dyn std::error::Error>> {
    let names = ParameterNameMap::from_file(&map)?;
    for name in names.require(&node)? {
        println!("{}", name);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive("paramgen=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Commands::Generate(GenerateArgs::default())) {
        Commands::Generate(args) => run_generate(args)?,
        Commands::Lookup { map, node } => run_lookup(map, node)?,
    }

    Ok(())
}
