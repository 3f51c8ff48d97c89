use anyhow::Result;
use joseki::PruneSummary;
use log::info;
use std::time::Instant;

use super::{JosekiPersistance, PostprocessOptions};

/// Prunes the stored joseki tree and stores the result.
pub fn postprocess(
    input: &JosekiPersistance,
    output: &JosekiPersistance,
    options: &PostprocessOptions,
) -> Result<PruneSummary> {
    let starting_run_time = Instant::now();

    info!("Reading joseki tree from {:?}", input.path());
    let mut tree = input.read()?;
    info!(
        "Read joseki tree with {} nodes, {} leaves, total count: {}",
        tree.num_nodes(),
        tree.count_leaves(),
        tree.total_count()
    );

    let summary = tree.prune(&options.prune_options());
    info!(
        "Pruned {} nodes, kept {}, leaves: {}, min_fraction: {}, min_absolute: {}",
        summary.removed,
        summary.kept,
        tree.count_leaves(),
        options.min_fraction,
        options.min_absolute
    );

    output.write(&tree)?;
    info!(
        "Wrote joseki tree to {:?}, elapsed: {:.1}s",
        output.path(),
        starting_run_time.elapsed().as_secs_f32()
    );

    Ok(summary)
}
