use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use pomxml::{Input, Project};

#[derive(Debug, Parser)]
#[command(
    name = "pomxml",
    version,
    about = "Read and rewrite project descriptor files"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Print the properties block as key=value lines
    #[arg(long, conflicts_with = "plugins")]
    properties: bool,
    /// Print each build plugin with its configuration
    #[arg(long)]
    plugins: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    if let Err(err) = run() {
        error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let input_data = read_input(args.input.as_ref())?;
    let filename = args
        .input
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<stdin>".to_string());
    let project = Project::from_input(
        Input::from_bytes(&input_data).with_filename(&filename),
        pomxml::xml::Config::default(),
    )
    .with_context(|| format!("failed to parse {filename}"))?;
    debug!(
        artifact = %project.artifact_id,
        dependencies = project.dependencies.len(),
        "parsed project"
    );

    let output = if args.properties {
        render_properties(&project)
    } else if args.plugins {
        render_plugins(&project)?
    } else {
        project
            .to_xml_string()
            .context("failed to serialize project")?
    };

    write_output(args.output.as_ref(), output.as_bytes())?;
    if let Some(path) = &args.output {
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn render_properties(project: &Project) -> String {
    let mut out = String::new();
    for (key, value) in project.properties.iter().flat_map(|p| p.iter()) {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

fn render_plugins(project: &Project) -> Result<String> {
    let mut out = String::new();
    for plugin in project.build_plugins() {
        out.push_str(&plugin.coordinates());
        out.push('\n');
        if let Some(configuration) = &plugin.configuration {
            let fragment = configuration
                .to_fragment()
                .with_context(|| format!("failed to render configuration of {}", plugin.coordinates()))?;
            for line in fragment.lines() {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    Ok(out)
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = Vec::new();
            io::stdin()
                .read_to_end(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.iter().all(u8::is_ascii_whitespace) {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<&PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
