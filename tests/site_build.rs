//! Whole build cycles into a temporary output directory.

mod common;

use common::{genres, record, FakeRepository, AI_DB, TECH_DB};
use notion2blog::{BuildOptions, PageRenderer, RevalidationLedger, SiteBuilder};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::time::Duration;

fn repository() -> FakeRepository {
    FakeRepository::new()
        .with_database(AI_DB, vec![Some(record('1', "Prompting", &["llm"])), None])
        .with_database(TECH_DB, vec![Some(record('2', "Rust", &["lang", "UI/UX"]))])
}

fn options(out: &Path, revalidate_secs: u64, force: bool) -> BuildOptions {
    BuildOptions {
        output_dir: out.to_path_buf(),
        revalidate: Duration::from_secs(revalidate_secs),
        force,
    }
}

#[tokio::test]
async fn first_build_writes_every_route() {
    let out = tempfile::tempdir().unwrap();
    let genres = genres();
    let repo = repository();
    let pages = PageRenderer::new("Techvenience", &genres, None).unwrap();

    let report = SiteBuilder::new(&repo, &genres, &pages, options(out.path(), 60, false))
        .build()
        .await
        .unwrap();

    // ai: list, 1 detail, 1 category; tech: list, 1 detail, 2 categories
    assert_eq!(report.routes_enumerated, 7);
    assert_eq!(report.generated, 7);
    assert_eq!(report.skipped_fresh, 0);
    assert_eq!(report.removed, 0);
    assert!(report.bytes_written > 0);

    let list = fs::read_to_string(out.path().join("blog/ai/list/index.html")).unwrap();
    assert!(list.contains("<title>Techvenience - AI -</title>"));
    assert!(list.contains("Prompting"));
    assert!(out.path().join("blog/tech/categories/UI_UX-2f56cc69/index.html").exists());
    assert!(out
        .path()
        .join("blog/tech/detail/22222222-2222-2222-2222-222222222222/index.html")
        .exists());

    let ledger = RevalidationLedger::load(out.path()).unwrap();
    assert_eq!(ledger.len(), 7);
    // each genre database is listed once per build
    assert_eq!(repo.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn fresh_routes_are_skipped_unless_forced() {
    let out = tempfile::tempdir().unwrap();
    let genres = genres();
    let repo = repository();
    let pages = PageRenderer::new("Techvenience", &genres, None).unwrap();

    SiteBuilder::new(&repo, &genres, &pages, options(out.path(), 3600, false))
        .build()
        .await
        .unwrap();

    let again = SiteBuilder::new(&repo, &genres, &pages, options(out.path(), 3600, false))
        .build()
        .await
        .unwrap();
    assert_eq!(again.generated, 0);
    assert_eq!(again.skipped_fresh, 7);

    let forced = SiteBuilder::new(&repo, &genres, &pages, options(out.path(), 3600, true))
        .build()
        .await
        .unwrap();
    assert_eq!(forced.generated, 7);
    assert_eq!(forced.skipped_fresh, 0);
}

#[tokio::test]
async fn zero_interval_rebuilds_everything() {
    let out = tempfile::tempdir().unwrap();
    let genres = genres();
    let repo = repository();
    let pages = PageRenderer::new("Techvenience", &genres, None).unwrap();
    let builder = SiteBuilder::new(&repo, &genres, &pages, options(out.path(), 0, false));

    builder.build().await.unwrap();
    let report = builder.build().await.unwrap();

    assert_eq!(report.generated, 7);
}

#[tokio::test]
async fn unpublished_routes_are_removed() {
    let out = tempfile::tempdir().unwrap();
    let genres = genres();
    let mut repo = repository();
    let pages = PageRenderer::new("Techvenience", &genres, None).unwrap();

    SiteBuilder::new(&repo, &genres, &pages, options(out.path(), 3600, false))
        .build()
        .await
        .unwrap();
    let dropped_tag = out.path().join("blog/tech/categories/UI_UX-2f56cc69/index.html");
    assert!(dropped_tag.exists());

    repo.set_rows(TECH_DB, vec![Some(record('2', "Rust", &["lang"]))]);
    let report = SiteBuilder::new(&repo, &genres, &pages, options(out.path(), 3600, false))
        .build()
        .await
        .unwrap();

    assert_eq!(report.removed, 1);
    assert_eq!(report.routes_enumerated, 6);
    assert!(!dropped_tag.exists());
    assert!(out.path().join("blog/tech/categories/lang/index.html").exists());
    assert_eq!(RevalidationLedger::load(out.path()).unwrap().len(), 6);
}

#[tokio::test]
async fn corrupted_ledger_fails_the_build() {
    let out = tempfile::tempdir().unwrap();
    fs::write(RevalidationLedger::location(out.path()), "[]]").unwrap();
    let genres = genres();
    let repo = repository();
    let pages = PageRenderer::new("Techvenience", &genres, None).unwrap();

    let result = SiteBuilder::new(&repo, &genres, &pages, options(out.path(), 60, false))
        .build()
        .await;

    assert!(matches!(
        result,
        Err(notion2blog::AppError::LedgerCorrupted { .. })
    ));
}
