use ailang::{
    config::TranspilerConfig, generate_with_config, parse, selfcheck, AilangError, AilangResult,
    Target,
};
use clap::Parser;
use std::{fs, path::PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Model description to transpile. Runs the built-in self checks when omitted.
    input: Option<PathBuf>,

    /// Output language: cpp, python or javascript
    #[arg(short, long)]
    target: Option<Target>,

    /// Directory for the generated file
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Print the generated code instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Print the parsed model as JSON instead of generating code
    #[arg(long)]
    emit_ast: bool,

    /// Path to config file
    #[arg(short, long, default_value = "ailang.json")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> AilangResult<()> {
    let mut config = TranspilerConfig::load_or_default(&cli.config)?;
    if let Some(target) = cli.target {
        config.target = target;
    }
    if let Some(out_dir) = &cli.out_dir {
        config.out_dir = out_dir.clone();
    }
    debug!("config: {:?}", config);

    let Some(input) = &cli.input else {
        for name in selfcheck::run()? {
            println!("{} test passed.", name);
        }
        return Ok(());
    };

    let source = fs::read_to_string(input).map_err(|source| AilangError::Read {
        path: input.clone(),
        source,
    })?;
    let spec = parse(&source)?;
    info!(model = spec.name(), target = %config.target, "parsed model");

    if cli.emit_ast {
        println!("{}", serde_json::to_string_pretty(&spec)?);
        return Ok(());
    }

    let code = generate_with_config(&spec, config.target.profile(), &config.generator_config());
    if cli.stdout {
        print!("{}", code);
        return Ok(());
    }

    let path = config.output_path(spec.name());
    fs::write(&path, code).map_err(|source| AilangError::Write {
        path: path.clone(),
        source,
    })?;
    println!("Model class generated successfully: {}", path.display());

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
