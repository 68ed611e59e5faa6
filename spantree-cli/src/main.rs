//! Command-line executable that reads a weighted graph file and prints its
//! minimum spanning tree, computed by Kruskal's and/or Prim's algorithm.

use std::fs::{read_to_string, File};
use std::io::{BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use spantree_core::graph::{Graph, VertexId};
use spantree_core::kruskal::{edge_heap_levels, kruskal};
use spantree_core::prim::prim;
use spantree_core::text::parse_graph;
use thiserror::Error;
use tracing::instrument;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::render::Labels;

pub mod render;

fn default_start() -> usize {
    1
}

/// Which spanning tree algorithms to run.
#[derive(Deserialize, ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Kruskal's algorithm only.
    Kruskal,
    /// Prim's algorithm only.
    Prim,
    /// Kruskal's, then Prim's.
    #[default]
    Both,
}

impl Algorithm {
    fn runs_kruskal(self) -> bool {
        matches!(self, Algorithm::Kruskal | Algorithm::Both)
    }

    fn runs_prim(self) -> bool {
        matches!(self, Algorithm::Prim | Algorithm::Both)
    }
}

/// All configuration options of a run
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct SpantreeConfig {
    /// Algorithms to run, default is both.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Root vertex for Prim's algorithm.
    #[serde(default = "default_start")]
    pub start: usize,

    /// How to print vertices.
    #[serde(default)]
    pub labels: Labels,

    /// Whether to print the adjacency lists of the graph first.
    #[serde(default)]
    pub show_graph: bool,

    /// Whether to print the disjoint sets left by Kruskal's algorithm.
    #[serde(default)]
    pub show_sets: bool,

    /// Whether to print the edge heap and the disjoint-set parent links
    /// around Kruskal's algorithm.
    #[serde(default)]
    pub show_trees: bool,

    /// Tracing level, default is "Info".
    #[serde(default)]
    tracing_level: TracingLevel,
}

#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum TracingLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<TracingLevel> for LevelFilter {
    fn from(level: TracingLevel) -> Self {
        match level {
            TracingLevel::Off => LevelFilter::OFF,
            TracingLevel::Error => LevelFilter::ERROR,
            TracingLevel::Warn => LevelFilter::WARN,
            TracingLevel::Info => LevelFilter::INFO,
            TracingLevel::Debug => LevelFilter::DEBUG,
            TracingLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Failure to obtain a [SpantreeConfig].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path:?}: {source}")]
    Read {
        /// The file given on the command line.
        path: PathBuf,
        /// The I/O failure.
        source: std::io::Error,
    },
    /// The configuration is not valid JSON for a [SpantreeConfig].
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SpantreeConfig {
    fn load(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    fn load_file(path: PathBuf) -> Result<Self, ConfigError> {
        match read_to_string(&path) {
            Ok(json) => Self::load(&json),
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }
}

impl Default for SpantreeConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            start: default_start(),
            labels: Labels::default(),
            show_graph: false,
            show_sets: false,
            show_trees: false,
            tracing_level: TracingLevel::default(),
        }
    }
}

#[derive(Parser)]
#[clap(name = "spantree")]
#[clap(version = "0.1")]
#[clap(group = clap::ArgGroup::new("config-group").multiple(false))]
struct Args {
    /// Graph description: a `V E` line followed by `E` lines of `u v weight`.
    graph: PathBuf,
    /// Configuration as inline JSON.
    #[clap(long, short = 'c', group = "config-group")]
    config: Option<String>,
    /// Path to a JSON configuration file.
    #[clap(long, short = 'C', group = "config-group")]
    config_file: Option<PathBuf>,
    /// Overrides the configured algorithm.
    #[clap(long, short = 'a', value_enum)]
    algorithm: Option<Algorithm>,
    /// Overrides the configured start vertex for Prim's algorithm.
    #[clap(long, short = 's')]
    start: Option<usize>,
}

impl Args {
    fn config(&self) -> Result<SpantreeConfig, ConfigError> {
        let mut config = if let Some(x) = &self.config {
            SpantreeConfig::load(x)?
        } else if let Some(x) = &self.config_file {
            SpantreeConfig::load_file(x.clone())?
        } else {
            SpantreeConfig::default()
        };
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(start) = self.start {
            config.start = start;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.config()?;
    setup_tracing(&config)?;

    let file = File::open(&args.graph)
        .with_context(|| format!("failed to open graph file {:?}", args.graph))?;
    let graph = parse_graph(BufReader::new(file))
        .with_context(|| format!("failed to read graph file {:?}", args.graph))?;
    tracing::info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    let stdout = std::io::stdout();
    run(&config, &graph, &mut stdout.lock())
}

fn setup_tracing(config: &SpantreeConfig) -> anyhow::Result<()> {
    let fmt = fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(fmt)
        .with(LevelFilter::from(config.tracing_level))
        .try_init()?;

    Ok(())
}

#[instrument(skip(config, graph, out))]
fn run(config: &SpantreeConfig, graph: &Graph, out: &mut impl Write) -> anyhow::Result<()> {
    if config.show_graph {
        render::write_adjacency(out, graph, config.labels)?;
        writeln!(out)?;
    }

    if config.algorithm.runs_kruskal() {
        writeln!(out, "Kruskal's algorithm")?;
        if config.show_trees {
            render::write_edge_heap(out, &edge_heap_levels(graph)?)?;
        }
        let outcome = kruskal(graph)?;
        render::write_kruskal(out, &outcome, config.labels, config.show_sets)?;
        if config.show_trees {
            render::write_trees(out, outcome.as_inner().partition(), config.labels)?;
        }
    }

    if config.algorithm.runs_kruskal() && config.algorithm.runs_prim() {
        writeln!(out)?;
    }

    if config.algorithm.runs_prim() {
        let outcome = prim(graph, VertexId::new(config.start))?;
        writeln!(out, "Prim's algorithm")?;
        render::write_prim(out, &outcome, config.labels)?;
    }

    Ok(())
}
