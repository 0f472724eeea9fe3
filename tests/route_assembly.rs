//! Route enumeration and props assembly against an in-memory content store.

mod common;

use common::{genres, page_id, record, FakeRepository, AI_DB, TECH_DB};
use notion2blog::{PageRenderer, Route, RouteAssembler};
use pretty_assertions::assert_eq;

fn repository() -> FakeRepository {
    FakeRepository::new()
        .with_database(
            AI_DB,
            vec![
                Some(record('1', "Prompting", &["a", "b"])),
                None,
                Some(record('2', "Agents", &["a", "c"])),
            ],
        )
        .with_database(TECH_DB, vec![Some(record('3', "Rust", &["x", "y"])), Some(record('4', "Go", &["y"]))])
}

#[test]
fn list_routes_cover_every_genre() {
    let genres = genres();
    let repo = FakeRepository::new();
    let assembler = RouteAssembler::new(&repo, &genres);

    assert_eq!(
        assembler.list_routes(),
        vec![Route::list("ai"), Route::list("tech")]
    );
}

#[tokio::test]
async fn detail_routes_skip_missing_rows() {
    let genres = genres();
    let repo = repository();
    let assembler = RouteAssembler::new(&repo, &genres);

    let paths: Vec<String> = assembler
        .detail_routes()
        .await
        .unwrap()
        .iter()
        .map(Route::path)
        .collect();

    assert_eq!(
        paths,
        vec![
            "/blog/ai/detail/11111111-1111-1111-1111-111111111111",
            "/blog/ai/detail/22222222-2222-2222-2222-222222222222",
            "/blog/tech/detail/33333333-3333-3333-3333-333333333333",
            "/blog/tech/detail/44444444-4444-4444-4444-444444444444",
        ]
    );
}

#[tokio::test]
async fn category_routes_use_first_seen_vocabulary() {
    let genres = genres();
    let repo = repository();
    let assembler = RouteAssembler::new(&repo, &genres);

    assert_eq!(
        assembler.category_routes().await.unwrap(),
        vec![
            Route::category("ai", "a"),
            Route::category("ai", "b"),
            Route::category("ai", "c"),
            Route::category("tech", "x"),
            Route::category("tech", "y"),
        ]
    );
}

#[tokio::test]
async fn category_props_hold_only_tagged_records() {
    let genres = genres();
    let repo = repository();
    let assembler = RouteAssembler::new(&repo, &genres);
    let snapshot = assembler.load_genre("tech").await.unwrap();

    let props = assembler.category_props(&snapshot, "x");

    assert_eq!(props.posts.len(), 1);
    assert_eq!(props.posts[0].title, "Rust");
    assert_eq!(props.posts[0].href, Route::detail("tech", page_id('3')).path());
    let sidebar: Vec<&str> = props.tag_list.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(sidebar, vec!["x", "y"]);
}

#[tokio::test]
async fn list_props_carry_cards_in_listing_order() {
    let genres = genres();
    let repo = repository();
    let assembler = RouteAssembler::new(&repo, &genres);
    let snapshot = assembler.load_genre("ai").await.unwrap();

    let props = assembler.list_props(&snapshot);

    assert_eq!(props.genre_title, "AI");
    let titles: Vec<&str> = props.posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Prompting", "Agents"]);
    assert_eq!(props.posts[0].last_edited, "2024年3月01日");
    assert_eq!(props.posts[0].tags[1].href, "/blog/ai/categories/b");
}

#[tokio::test]
async fn detail_props_compose_title_from_every_tag() {
    let genres = genres();
    let repo = repository();
    let assembler = RouteAssembler::new(&repo, &genres);
    let snapshot = assembler.load_genre("ai").await.unwrap();

    let props = assembler
        .detail_props(&snapshot, &page_id('2'))
        .await
        .unwrap()
        .expect("page exists");

    assert_eq!(props.composed_title, "AI a b a c");
    assert_eq!(props.page_title, "Agents");
    assert_eq!(props.body, "<p>Body of Agents</p>");
    let sidebar: Vec<&str> = props.tag_list.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(sidebar, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn missing_page_renders_blank() {
    let genres = genres();
    let repo = repository().without_body(&page_id('1'));
    let assembler = RouteAssembler::new(&repo, &genres);
    let snapshot = assembler.load_genre("ai").await.unwrap();

    let props = assembler.detail_props(&snapshot, &page_id('1')).await.unwrap();
    assert!(props.is_none());

    let pages = PageRenderer::new("Techvenience", &genres, None).unwrap();
    assert_eq!(pages.render_detail(props.as_ref()).unwrap().as_str(), "<div></div>");
}

#[tokio::test]
async fn unknown_genre_reads_default_database() {
    let genres = genres();
    let repo = repository();
    let assembler = RouteAssembler::new(&repo, &genres);

    let snapshot = assembler.load_genre("cooking").await.unwrap();

    assert_eq!(snapshot.title, "cooking");
    assert_eq!(snapshot.database.present_records().count(), 2);
    assert_eq!(
        snapshot.detail_routes()[0].path(),
        "/blog/cooking/detail/11111111-1111-1111-1111-111111111111"
    );
}

#[tokio::test]
async fn rendered_detail_document_has_composed_title() {
    let genres = genres();
    let repo = repository();
    let assembler = RouteAssembler::new(&repo, &genres);
    let pages = PageRenderer::new("Techvenience", &genres, None).unwrap();
    let snapshot = assembler.load_genre("tech").await.unwrap();

    let props = assembler.detail_props(&snapshot, &page_id('3')).await.unwrap();
    let document = pages.render_detail(props.as_ref()).unwrap();

    assert!(document
        .as_str()
        .contains("<title>Rust / Tech x y y - Techvenience -</title>"));
    assert!(document.as_str().contains("<p>Body of Rust</p>"));
}
