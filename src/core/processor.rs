use crate::api::client::ApiClient;
use crate::api::fetchers;
use crate::api::DexSource;
use crate::config::{self, ScrapeConfig};
use crate::core::data_store::RecordStore;
use crate::core::schema;
use crate::core::stats::{
    self, CategoryStats, RunStats, CAT_ASSEMBLE, CAT_PRIMARY, CAT_SAVE, CAT_SPECIES,
};
use crate::error::{AppError, AppResult};
use crate::io;
use crate::logging::{log, LogLevel};
use crate::model::common::PokemonId;
use crate::model::output::PokemonRecord;
use crate::transform::record;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::pin::pin;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Primary,
    Species,
}

#[derive(Debug)]
pub enum IdOutcome {
    Assembled(PokemonRecord),
    Skipped { stage: FetchStage, error: AppError },
}

/// Primary fetch, then species fetch, then assembly. The first failure ends
/// the id; nothing here aborts the surrounding loop.
pub async fn process_id<S: DexSource>(
    source: &S,
    id: PokemonId,
    cfg: &ScrapeConfig,
) -> IdOutcome {
    let primary = match fetchers::fetch_primary(source, id, cfg.include_stats).await {
        Ok(p) => p,
        Err(error) => {
            return IdOutcome::Skipped {
                stage: FetchStage::Primary,
                error,
            }
        }
    };

    let description =
        match fetchers::fetch_description(source, id, cfg.wrap_width, cfg.language_filter).await {
            Ok(d) => d,
            Err(error) => {
                return IdOutcome::Skipped {
                    stage: FetchStage::Species,
                    error,
                }
            }
        };

    IdOutcome::Assembled(record::assemble(primary, description))
}

/// Walks the configured id range with at most `cfg.concurrency` ids in flight.
/// Results come back in ascending id order whatever the concurrency.
pub async fn collect_records<S: DexSource>(
    source: &S,
    cfg: &ScrapeConfig,
    run_stats: &mut RunStats,
) -> RecordStore {
    let total = cfg.total_ids();
    let mut store = RecordStore::for_range(total);
    let mut processed = 0usize;

    let mut outcomes = pin!(stream::iter(cfg.ids())
        .map(move |id| async move { (id, process_id(source, id, cfg).await) })
        .buffered(cfg.concurrency.max(1)));

    while let Some((id, outcome)) = outcomes.next().await {
        processed += 1;
        match outcome {
            IdOutcome::Assembled(rec) => {
                run_stats.category_mut(CAT_PRIMARY).add_ok();
                let species = run_stats.category_mut(CAT_SPECIES);
                if rec.desc.is_empty() {
                    species.add_skip();
                } else {
                    species.add_ok();
                }
                let assemble = run_stats.category_mut(CAT_ASSEMBLE);
                if store.push(rec) {
                    assemble.add_ok();
                } else {
                    assemble.add_fail();
                }
            }
            IdOutcome::Skipped {
                stage: FetchStage::Primary,
                error,
            } => {
                tracing::debug!("Skipped #{} at primary stage: {:?}", id, error);
                run_stats.category_mut(CAT_PRIMARY).add_fail();
            }
            IdOutcome::Skipped {
                stage: FetchStage::Species,
                error,
            } => {
                tracing::debug!("Skipped #{} at species stage: {:?}", id, error);
                run_stats.category_mut(CAT_PRIMARY).add_ok();
                run_stats.category_mut(CAT_SPECIES).add_fail();
            }
        }

        if processed % config::PROGRESS_LOG_INTERVAL == 0 || processed == total {
            log_progress(processed, total, store.len());
        }
    }

    let primary_ok = run_stats.category(CAT_PRIMARY).ok;
    run_stats.category_mut(CAT_SPECIES).set_total(primary_ok);
    run_stats.category_mut(CAT_ASSEMBLE).set_total(primary_ok);
    store
}

pub async fn run(cfg: ScrapeConfig) -> AppResult<i32> {
    let client = ApiClient::new(&cfg)?;
    run_with_source(&client, &cfg).await
}

/// Fetch, save, optional schema, summary. A failed save ends the run with
/// the I/O error; skipped ids never do.
pub async fn run_with_source<S: DexSource>(source: &S, cfg: &ScrapeConfig) -> AppResult<i32> {
    let overall_start_time = Instant::now();
    let start_ts_str = Utc::now().format("%Y-%m-%d %H:%M:%S %Z").to_string();

    log(
        LogLevel::Step,
        &format!(
            "Starting Pokédex Update for ids {}..={} at {}",
            cfg.id_start, cfg.id_end, start_ts_str
        ),
    );
    log(
        LogLevel::Info,
        &format!(
            "Output File: {} | Wrap: {} | Stats: {} | Languages: {:?} | Concurrency: {}",
            cfg.output_path.display(),
            cfg.wrap_width,
            cfg.include_stats,
            cfg.language_filter,
            cfg.concurrency
        ),
    );

    let mut run_stats = RunStats::new(cfg.total_ids());

    let fetch_start_time = Instant::now();
    log(LogLevel::Step, "--- Phase 1: Fetching Records ---");
    let store = collect_records(source, cfg, &mut run_stats).await;
    log_phase_completion(
        "Primary Fetch",
        &run_stats.category(CAT_PRIMARY),
        fetch_start_time.elapsed(),
    );
    log_phase_completion(
        "Species Fetch",
        &run_stats.category(CAT_SPECIES),
        fetch_start_time.elapsed(),
    );

    let save_start_time = Instant::now();
    log(LogLevel::Step, "--- Phase 2: Saving Output ---");
    let record_count = store.len();
    let ctx = format!("Pokédex ({} records)", record_count);
    if let Err(e) = io::save_json(cfg.output_path.clone(), store.into_records(), ctx).await {
        run_stats.category_mut(CAT_SAVE).add_fail();
        log(
            LogLevel::Error,
            &format!(
                "FATAL: could not write {}; all {} fetched record(s) are lost.",
                cfg.output_path.display(),
                record_count
            ),
        );
        return Err(e);
    }
    run_stats.category_mut(CAT_SAVE).add_ok();
    log(
        LogLevel::Success,
        &format!(
            "Pokédex data saved to {} ({} records)",
            cfg.output_path.display(),
            record_count
        ),
    );
    log_phase_completion(
        "Save File",
        &run_stats.category(CAT_SAVE),
        save_start_time.elapsed(),
    );

    if let Some(schema_path) = &cfg.schema_out {
        log(LogLevel::Step, "--- Phase 3: Writing Output Schema ---");
        if let Err(e) = schema::write_output_schema(schema_path.clone()).await {
            log(
                LogLevel::Error,
                &format!("Failed to write output schema: {:?}", e),
            );
        }
    }

    stats::print_summary(&run_stats, cfg, overall_start_time.elapsed());
    Ok(stats::determine_exit_code(&run_stats))
}

fn log_progress(processed: usize, total: usize, assembled: usize) {
    if total == 0 {
        return;
    }
    let percentage = (processed as f32 / total as f32) * 100.0;
    log(
        LogLevel::Info,
        &format!(
            "Fetch progress: {}/{} ({:.1}%) [Assembled: {}, Skipped: {}]",
            processed,
            total,
            percentage,
            assembled,
            processed - assembled
        ),
    );
}

fn log_phase_completion(phase: &str, stats: &CategoryStats, elapsed: Duration) {
    let level = if stats.fail > 0 {
        LogLevel::Warning
    } else {
        LogLevel::Success
    };
    log(
        level,
        &format!(
            "--- {} Phase complete ({} OK, {} Skip/Empty, {} Fail / {} Total) | Elapsed: {:?} ---",
            phase, stats.ok, stats.skip_or_empty, stats.fail, stats.total_tasks, elapsed
        ),
    );
}
