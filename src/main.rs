mod config;

use anyhow::{Context, Result};
use clap::Parser;
use sakuragen_core::{position_hash, scoped_rng, BlockPos};
use sakuragen_testkit::JsonlSink;
use sakuragen_world::blocks::{CHERRY_LEAVES, CHERRY_LOG, GRASS, STONE};
use sakuragen_world::{CherryTree, DenseGrid, GridWrite, RecordingGrid, TreeVariant, Voxel};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::GeneratorConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plant cherry trees into a flat voxel world", long_about = None)]
struct Args {
    /// TOML settings file (defaults to sakuragen.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// World seed override
    #[arg(long)]
    seed: Option<u64>,
    /// Number of planting attempts
    #[arg(long)]
    trees: Option<usize>,
    /// Write every voxel write as a JSON line to this file
    #[arg(long)]
    placement_log: Option<PathBuf>,
}

impl Args {
    fn resolve_config(&self) -> GeneratorConfig {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load_from_path(path),
            None => GeneratorConfig::load(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(trees) = self.trees {
            config.trees = trees;
        }
        if let Some(path) = &self.placement_log {
            config.placement_log = Some(path.clone());
        }
        config
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Args::parse().resolve_config();
    config.validate()?;
    info!(seed = config.seed, trees = config.trees, "planting cherry grove");

    let summary = run(&config)?;
    info!(
        large = summary.large,
        small = summary.small,
        blocked = summary.blocked,
        writes = summary.writes,
        logs = summary.logs,
        leaves = summary.leaves,
        updates = summary.updates,
        "grove complete"
    );
    Ok(())
}

/// One line of the placement log.
#[derive(Serialize)]
struct PlacementRecord<'a> {
    attempt: usize,
    #[serde(flatten)]
    write: &'a GridWrite,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct PlantingSummary {
    large: usize,
    small: usize,
    blocked: usize,
    writes: usize,
    logs: usize,
    leaves: usize,
    updates: usize,
}

/// Stone up to the grass layer just below `ground_level`, air above.
fn build_terrain(config: &GeneratorConfig) -> Result<DenseGrid> {
    let mut grid = DenseGrid::new(BlockPos::default(), config.grid_extent)
        .with_context(|| format!("failed to allocate grid {:?}", config.grid_extent))?;
    let [size_x, _, size_z] = config.grid_extent;
    let (far_x, far_z) = (size_x as i32 - 1, size_z as i32 - 1);
    let grass_y = config.ground_level - 1;
    if grass_y > 0 {
        grid.fill(
            BlockPos::new(0, 0, 0),
            BlockPos::new(far_x, grass_y - 1, far_z),
            Voxel::new(STONE, 0),
        );
    }
    grid.fill(
        BlockPos::new(0, grass_y, 0),
        BlockPos::new(far_x, grass_y, far_z),
        Voxel::new(GRASS, 0),
    );
    Ok(grid)
}

/// Planting spots on a square lattice, keeping one spacing clear of the edges.
fn planting_spots(config: &GeneratorConfig) -> Vec<BlockPos> {
    let [size_x, _, size_z] = config.grid_extent;
    let lattice = |size: usize| {
        (config.spacing..size as i32 - config.spacing).step_by(config.spacing as usize)
    };
    let spots: Vec<_> = lattice(size_x)
        .flat_map(|x| lattice(size_z).map(move |z| BlockPos::new(x, config.ground_level, z)))
        .take(config.trees)
        .collect();
    if spots.len() < config.trees {
        warn!(
            requested = config.trees,
            available = spots.len(),
            "grid too small for every requested tree"
        );
    }
    spots
}

fn run(config: &GeneratorConfig) -> Result<PlantingSummary> {
    let mut grid = RecordingGrid::new(build_terrain(config)?);
    let mut sink = config
        .placement_log
        .as_ref()
        .map(JsonlSink::create)
        .transpose()?;
    let mut summary = PlantingSummary::default();

    for (attempt, spot) in planting_spots(config).into_iter().enumerate() {
        let mut rng = scoped_rng(config.seed, position_hash(spot));
        let variant = CherryTree.generate_variant(&mut grid, &mut rng, spot);
        let writes = grid.take_writes();
        match variant {
            Some(TreeVariant::Large) => summary.large += 1,
            Some(TreeVariant::Small) => summary.small += 1,
            None => summary.blocked += 1,
        }
        summary.writes += writes.len();
        info!(attempt, %spot, ?variant, writes = writes.len(), "planting attempt");

        if let Some(sink) = sink.as_mut() {
            for write in &writes {
                sink.write(&PlacementRecord { attempt, write })?;
            }
        }
    }

    if let Some(mut sink) = sink {
        sink.flush()?;
    }

    let mut world = grid.into_inner();
    summary.logs = world.count(CHERRY_LOG);
    summary.leaves = world.count(CHERRY_LEAVES);
    summary.updates = world.drain_updates().len();
    Ok(summary)
}
