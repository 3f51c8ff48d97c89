use anyhow::{anyhow, Result};
use crossbeam::channel::{bounded, Receiver, Sender};
use joseki::{extract_josekis, Joseki, JosekiTree};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::{read_archive, ArchiveLimits, ExtractOptions, RecordEntry};

const LOG_INTERVAL: usize = 1000;

type Josekis = Option<[Joseki; 4]>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractStats {
    pub archives: usize,
    pub failed_archives: usize,
    pub read_failures: usize,
    pub records: usize,
    pub merged: usize,
    pub skipped: usize,
    pub elapsed: Duration,
}

/// Builds a joseki tree from every game record in the archives.
pub fn extract(archives: &[PathBuf], options: &ExtractOptions) -> Result<(JosekiTree, ExtractStats)> {
    let mut tree = JosekiTree::new();
    let stats = extract_into(&mut tree, archives, options)?;

    Ok((tree, stats))
}

/// Merges the josekis of every game record in the archives into an existing tree.
///
/// Records are read on one thread and turned into josekis on `parallelism` worker threads. The
/// calling thread is the only one touching the tree and merges the records in the order they were
/// read, so the resulting tree does not depend on the number of workers.
pub fn extract_into(
    tree: &mut JosekiTree,
    archives: &[PathBuf],
    options: &ExtractOptions,
) -> Result<ExtractStats> {
    let starting_run_time = Instant::now();
    let (record_tx, record_rx) = bounded::<(usize, RecordEntry)>(options.channel_size);
    let (result_tx, result_rx) = bounded::<(usize, Josekis)>(options.channel_size);

    let mut stats = crossbeam::scope(move |s| {
        let reader = s.spawn(move |_| read_archives(archives, options, record_tx));

        for worker_num in 0..options.parallelism.max(1) {
            let record_rx = record_rx.clone();
            let result_tx = result_tx.clone();

            s.spawn(move |_| {
                debug!("Starting extraction worker: {}", worker_num);

                for (index, entry) in record_rx {
                    let josekis = record_to_josekis(&entry, options.max_len);

                    if result_tx.send((index, josekis)).is_err() {
                        warn!("Failed to send josekis through writer channel.");
                        break;
                    }
                }
            });
        }

        // The workers hold the remaining ends, the writer stops once they are all done.
        drop(record_rx);
        drop(result_tx);

        let mut stats = merge_in_order(tree, result_rx, starting_run_time);
        let read_stats = reader
            .join()
            .map_err(|_| anyhow!("Archive reader thread panicked"))?;

        stats.archives = read_stats.archives;
        stats.failed_archives = read_stats.failed_archives;
        stats.read_failures = read_stats.read_failures;
        stats.records = read_stats.records;

        Ok::<_, anyhow::Error>(stats)
    })
    .map_err(|_| anyhow!("Extraction worker thread panicked"))??;

    stats.elapsed = starting_run_time.elapsed();

    info!(
        "Extracted {} of {} records from {} archives ({} failed), skipped: {}, unreadable members: {}, elapsed: {:.1}s",
        stats.merged,
        stats.records,
        stats.archives,
        stats.failed_archives,
        stats.skipped,
        stats.read_failures,
        stats.elapsed.as_secs_f32()
    );

    Ok(stats)
}

#[derive(Debug, Default)]
struct ReadStats {
    archives: usize,
    failed_archives: usize,
    read_failures: usize,
    records: usize,
}

fn read_archives(
    archives: &[PathBuf],
    options: &ExtractOptions,
    record_tx: Sender<(usize, RecordEntry)>,
) -> ReadStats {
    let mut stats = ReadStats::default();
    let mut index = 0;

    for (archive_num, path) in archives.iter().enumerate() {
        info!(
            "Processing archive {}/{}: {:?}",
            archive_num + 1,
            archives.len(),
            path
        );

        let limits = ArchiveLimits {
            max_members: options.max_records_per_archive,
            max_record_bytes: options.max_record_bytes,
        };

        let res = read_archive(path, &limits, |entry| {
            let sent = record_tx.send((index, entry)).is_ok();
            index += 1;
            sent
        });

        stats.archives += 1;
        match res {
            Ok(summary) => {
                stats.read_failures += summary.failures;
                info!(
                    "Read {} records from {} members of {:?}",
                    summary.records, summary.members, path
                );
            }
            Err(err) => {
                warn!("Error processing {:?}: {:#}", path, err);
                stats.failed_archives += 1;
            }
        }
    }

    stats.records = index;
    stats
}

fn record_to_josekis(entry: &RecordEntry, max_len: usize) -> Josekis {
    let record = match sgf::read_game_record(&entry.bytes) {
        Ok(record) => record,
        Err(err) => {
            debug!("Skipping {}: {:#}", entry.name, err);
            return None;
        }
    };

    let josekis = extract_josekis(&record, max_len);
    if josekis.is_none() {
        debug!("Skipping {}: not an even game on a 19x19 board", entry.name);
    }

    josekis
}

fn merge_in_order(
    tree: &mut JosekiTree,
    results: Receiver<(usize, Josekis)>,
    starting_run_time: Instant,
) -> ExtractStats {
    let mut stats = ExtractStats::default();
    let mut pending = BTreeMap::new();
    let mut next_index = 0;

    let mut merge = |josekis: Josekis, stats: &mut ExtractStats| {
        match josekis {
            Some(josekis) => {
                for joseki in &josekis {
                    tree.merge(joseki);
                }
                stats.merged += 1;
            }
            None => stats.skipped += 1,
        }

        let processed = stats.merged + stats.skipped;
        if processed % LOG_INTERVAL == 0 {
            info!(
                "Processed records: {}, merged: {}, elapsed: {:.1}s",
                processed,
                stats.merged,
                starting_run_time.elapsed().as_secs_f32()
            );
        }
    };

    for (index, josekis) in results {
        pending.insert(index, josekis);

        while let Some(josekis) = pending.remove(&next_index) {
            merge(josekis, &mut stats);
            next_index += 1;
        }
    }

    // Only reachable with gaps when a worker died.
    for (_, josekis) in pending {
        merge(josekis, &mut stats);
    }

    stats
}
