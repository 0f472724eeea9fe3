// src/pipeline.rs
//! One build/revalidation cycle of the site, and the loop that repeats it.
//!
//! A cycle reads every genre once, enumerates its routes, renders the stale
//! ones, removes routes that are no longer published, and records what it
//! wrote in the revalidation ledger.

use crate::api::ContentRepository;
use crate::constants::MIN_WATCH_INTERVAL_SECS;
use crate::error::AppError;
use crate::output::{
    deliver, ensure_delivered, is_safe_path, route_file_path, route_path_file, DeliveryTarget,
    OutputPlan, RevalidationLedger,
};
use crate::site::{GenreSnapshot, GenreTable, PageRenderer, Route, RouteAssembler};
use crate::types::Markup;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Settings of a build that are not about content.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub output_dir: PathBuf,
    pub revalidate: Duration,
    pub force: bool,
}

/// What one cycle did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub routes_enumerated: usize,
    pub generated: usize,
    pub skipped_fresh: usize,
    pub removed: usize,
    pub bytes_written: usize,
    pub duration_ms: u64,
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} routes: {} generated, {} fresh, {} removed ({} bytes in {}ms)",
            self.routes_enumerated,
            self.generated,
            self.skipped_fresh,
            self.removed,
            self.bytes_written,
            self.duration_ms
        )
    }
}

/// Builds the site from a content repository.
pub struct SiteBuilder<'a, R: ContentRepository + ?Sized> {
    assembler: RouteAssembler<'a, R>,
    pages: &'a PageRenderer,
    options: BuildOptions,
}

impl<'a, R: ContentRepository + ?Sized> SiteBuilder<'a, R> {
    pub fn new(
        repository: &'a R,
        genres: &'a GenreTable,
        pages: &'a PageRenderer,
        options: BuildOptions,
    ) -> Self {
        Self {
            assembler: RouteAssembler::new(repository, genres),
            pages,
            options,
        }
    }

    /// Runs one cycle.
    pub async fn build(&self) -> Result<BuildReport, AppError> {
        let started = Instant::now();
        let out_dir = &self.options.output_dir;
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(self.options.revalidate)
            .unwrap_or(chrono::Duration::MAX);

        let mut ledger = RevalidationLedger::load(out_dir)?;
        let snapshots = self.load_snapshots().await?;

        let mut report = BuildReport::default();
        let mut plan = OutputPlan::new();
        let mut live_paths = Vec::new();
        // output file -> route path, for recording successful writes
        let mut written_routes: HashMap<PathBuf, String> = HashMap::new();

        for snapshot in &snapshots {
            for route in snapshot.routes() {
                report.routes_enumerated += 1;
                let route_path = route.path();
                live_paths.push(route_path.clone());

                if !self.options.force && !ledger.is_stale(&route_path, now, ttl) {
                    log::debug!("Fresh, skipping {}", route_path);
                    report.skipped_fresh += 1;
                    continue;
                }

                let document = self.render_route(snapshot, &route).await?;
                let file = route_file_path(out_dir, &route);
                log::debug!("Rendered {} ({} bytes)", route_path, document.len());
                written_routes.insert(file.clone(), route_path);
                plan.push(DeliveryTarget::WriteFile {
                    path: file,
                    content: document.into_string(),
                });
            }
        }

        for orphan in ledger.prune(live_paths.iter().map(String::as_str)) {
            let file = route_path_file(out_dir, &orphan);
            if is_safe_path(&file, out_dir) {
                log::info!("Route {} is no longer published", orphan);
                plan.push(DeliveryTarget::RemoveFile { path: file });
            } else {
                log::warn!("Ignoring ledger entry outside the output directory: {}", orphan);
            }
        }

        let delivery = deliver(plan);
        for completed in &delivery.completed {
            match &completed.operation {
                DeliveryTarget::WriteFile { path, .. } => {
                    if let Some(route_path) = written_routes.remove(path) {
                        ledger.record(route_path, now);
                        report.generated += 1;
                    }
                }
                DeliveryTarget::RemoveFile { .. } => report.removed += 1,
                DeliveryTarget::CreateDirectory { .. } => {}
            }
        }
        report.bytes_written = delivery.stats.bytes_written;

        ledger.save(out_dir)?;
        ensure_delivered(&delivery)?;

        report.duration_ms = started.elapsed().as_millis() as u64;
        log::info!("Build complete: {}", report);
        Ok(report)
    }

    /// Repeats [`SiteBuilder::build`] every `interval` until ctrl-c. A failed
    /// cycle is logged and the loop keeps going.
    pub async fn watch(&self, interval: Duration) -> Result<(), AppError> {
        let interval = interval.max(Duration::from_secs(MIN_WATCH_INTERVAL_SECS));
        loop {
            match self.build().await {
                Ok(report) => println!("✓ {}", report),
                Err(e) => log::error!("Build cycle failed: {}", e),
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                signal = tokio::signal::ctrl_c() => {
                    signal?;
                    log::info!("Interrupted, stopping watch loop");
                    return Ok(());
                }
            }
        }
    }

    async fn load_snapshots(&self) -> Result<Vec<GenreSnapshot>, AppError> {
        let mut snapshots = Vec::new();
        for genre in self.assembler.genres().keys() {
            snapshots.push(self.assembler.load_genre(genre).await?);
        }
        Ok(snapshots)
    }

    async fn render_route(
        &self,
        snapshot: &GenreSnapshot,
        route: &Route,
    ) -> Result<Markup, AppError> {
        match route {
            Route::List { .. } => self.pages.render_list(&self.assembler.list_props(snapshot)),
            Route::Detail { id, .. } => {
                let props = self.assembler.detail_props(snapshot, id).await?;
                self.pages.render_detail(props.as_ref())
            }
            Route::Category { tag, .. } => self
                .pages
                .render_category(&self.assembler.category_props(snapshot, tag)),
        }
    }
}
