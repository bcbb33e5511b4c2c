use clap::{Parser, Subcommand};
use dctopo_rs::TopoError;
use dctopo_rs::topo::{AnyTopology, TopologySpec};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "topo-gen",
    about = "Generate BCube / DCell / FatTree component graphs with their connectivity constraints"
)]
struct Args {
    #[command(subcommand)]
    topology: TopologyCmd,

    /// Write the full component graph as JSON to this file
    #[arg(long, global = true)]
    json: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum TopologyCmd {
    /// BCube_k built from n-port switches
    Bcube {
        #[arg(long)]
        k: u32,
        #[arg(long)]
        n: u64,
    },
    /// DCell_k with n servers per DCell_0
    Dcell {
        #[arg(long)]
        k: u32,
        #[arg(long)]
        n: u64,
    },
    /// Two-layer fat-tree with an even number of pods
    FatTree {
        #[arg(long)]
        num_pods: u64,
    },
    /// Read the topology parameters from a JSON file
    Spec {
        #[arg(long)]
        path: PathBuf,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("serialize graph: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Topo(#[from] TopoError),
}

fn load_spec(cmd: TopologyCmd) -> Result<TopologySpec, CliError> {
    Ok(match cmd {
        TopologyCmd::Bcube { k, n } => TopologySpec::BCube { k, n },
        TopologyCmd::Dcell { k, n } => TopologySpec::DCell { k, n },
        TopologyCmd::FatTree { num_pods } => TopologySpec::FatTree { num_pods },
        TopologyCmd::Spec { path } => {
            let raw = fs::read_to_string(&path).map_err(|source| CliError::Read {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|source| CliError::Parse { path, source })?
        }
    })
}

fn write_graph(topo: &AnyTopology, path: PathBuf) -> Result<(), CliError> {
    let raw = serde_json::to_string_pretty(topo.graph())?;
    fs::write(&path, raw).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "graph written");
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let spec = load_spec(args.topology)?;
    let topo = spec.build()?;

    if let Some(path) = args.json {
        write_graph(&topo, path)?;
    }

    let s = topo.summarize();
    println!(
        "topology={} templates={} ports={} switches={} hosts={} connectors={} links={}",
        s.name, s.templates, s.ports, s.switches, s.hosts, s.connectors, s.links
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
