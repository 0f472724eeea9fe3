// src/site/assembler.rs
//! Route enumeration and page props assembly.
//!
//! Every operation reads through a [`ContentRepository`]; the assembler
//! itself keeps no state between calls.

use super::genres::GenreTable;
use super::routes::Route;
use crate::api::ContentRepository;
use crate::constants::DISPLAY_UTC_OFFSET_SECS;
use crate::error::AppError;
use crate::formatting::{render_document, render_rich_text, RenderContext};
use crate::model::{GenreDatabase, PageRecord};
use crate::types::PageId;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

/// One genre's records as read during a single build.
#[derive(Debug, Clone)]
pub struct GenreSnapshot {
    pub key: String,
    pub title: String,
    pub database: GenreDatabase,
}

impl GenreSnapshot {
    /// List, detail and category routes of this genre, in that order.
    pub fn routes(&self) -> Vec<Route> {
        let mut routes = vec![Route::list(&self.key)];
        routes.extend(self.detail_routes());
        routes.extend(self.category_routes());
        routes
    }

    /// One route per present record.
    pub fn detail_routes(&self) -> Vec<Route> {
        self.database
            .present_records()
            .map(|record| Route::detail(&self.key, record.id.clone()))
            .collect()
    }

    /// One route per distinct tag name.
    pub fn category_routes(&self) -> Vec<Route> {
        self.database
            .tag_vocabulary()
            .iter()
            .map(|tag| Route::category(&self.key, tag))
            .collect()
    }
}

/// A link to a category page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagLink {
    pub name: String,
    pub href: String,
}

impl TagLink {
    fn new(genre: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            href: Route::category(genre, name).path(),
        }
    }
}

/// A post summary as shown on list and category pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCard {
    pub title: String,
    /// The title's rich text rendered as HTML.
    pub title_html: String,
    pub cover_url: Option<String>,
    pub tags: Vec<TagLink>,
    pub last_edited: String,
    pub href: String,
}

impl PostCard {
    fn new(genre: &str, record: &PageRecord) -> Self {
        Self {
            title: record.title_text(),
            title_html: render_rich_text(&record.title),
            cover_url: record.cover_url.clone(),
            tags: record
                .tags
                .iter()
                .map(|tag| TagLink::new(genre, &tag.name))
                .collect(),
            last_edited: display_date(&record.last_edited_time),
            href: Route::detail(genre, record.id.clone()).path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListProps {
    pub genre: String,
    pub genre_title: String,
    pub posts: Vec<PostCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailProps {
    pub genre: String,
    /// Genre title followed by every tag of every record in the genre.
    pub composed_title: String,
    pub page_title: String,
    pub created: String,
    pub last_edited: String,
    pub tags: Vec<TagLink>,
    /// The rendered page body.
    pub body: String,
    pub tag_list: Vec<TagLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryProps {
    pub genre: String,
    pub genre_title: String,
    pub tag: String,
    pub posts: Vec<PostCard>,
    pub tag_list: Vec<TagLink>,
}

/// Enumerates routes and assembles render-ready props from the content store.
pub struct RouteAssembler<'a, R: ContentRepository + ?Sized> {
    repository: &'a R,
    genres: &'a GenreTable,
}

impl<'a, R: ContentRepository + ?Sized> RouteAssembler<'a, R> {
    pub fn new(repository: &'a R, genres: &'a GenreTable) -> Self {
        Self { repository, genres }
    }

    pub fn genres(&self) -> &GenreTable {
        self.genres
    }

    /// Reads every record of `genre`. An unknown genre reads the default
    /// database under its own key and title.
    pub async fn load_genre(&self, genre: &str) -> Result<GenreSnapshot, AppError> {
        let records = self
            .repository
            .list_records(self.genres.database_for(genre))
            .await?;
        let database = GenreDatabase::new(records);
        log::debug!(
            "Genre '{}': {} records ({} unreadable)",
            genre,
            database.records.len(),
            database.records.iter().filter(|r| r.is_none()).count()
        );

        Ok(GenreSnapshot {
            key: genre.to_string(),
            title: self.genres.title_for(genre),
            database,
        })
    }

    /// One list route per known genre.
    pub fn list_routes(&self) -> Vec<Route> {
        self.genres.keys().map(Route::list).collect()
    }

    /// One detail route per record of every known genre.
    pub async fn detail_routes(&self) -> Result<Vec<Route>, AppError> {
        let mut routes = Vec::new();
        for genre in self.genres.keys() {
            routes.extend(self.load_genre(genre).await?.detail_routes());
        }
        Ok(routes)
    }

    /// One category route per (genre, distinct tag) pair.
    pub async fn category_routes(&self) -> Result<Vec<Route>, AppError> {
        let mut routes = Vec::new();
        for genre in self.genres.keys() {
            routes.extend(self.load_genre(genre).await?.category_routes());
        }
        Ok(routes)
    }

    pub fn list_props(&self, snapshot: &GenreSnapshot) -> ListProps {
        ListProps {
            genre: snapshot.key.clone(),
            genre_title: snapshot.title.clone(),
            posts: snapshot
                .database
                .present_records()
                .map(|record| PostCard::new(&snapshot.key, record))
                .collect(),
        }
    }

    /// Props of a detail page, or `None` when the page or its content no
    /// longer exists. Any other failure is returned.
    pub async fn detail_props(
        &self,
        snapshot: &GenreSnapshot,
        id: &PageId,
    ) -> Result<Option<DetailProps>, AppError> {
        let fetched = async {
            let record = self.repository.get_record(id).await?;
            let blocks = self.repository.get_block_tree(id).await?;
            Ok::<_, AppError>((record, blocks))
        }
        .await;

        let (record, blocks) = match fetched {
            Ok(found) => found,
            Err(e) if e.is_not_found() => {
                log::warn!("Page {} not found, rendering it blank: {}", id, e);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let genre = snapshot.key.as_str();
        let body = render_document(&blocks, &RenderContext::new(genre));

        Ok(Some(DetailProps {
            genre: genre.to_string(),
            composed_title: snapshot.database.compose_title(&snapshot.title),
            page_title: record.title_text(),
            created: display_date(&record.created_time),
            last_edited: display_date(&record.last_edited_time),
            tags: record
                .tags
                .iter()
                .map(|tag| TagLink::new(genre, &tag.name))
                .collect(),
            body: body.into_string(),
            tag_list: tag_links(snapshot),
        }))
    }

    pub fn category_props(&self, snapshot: &GenreSnapshot, tag: &str) -> CategoryProps {
        CategoryProps {
            genre: snapshot.key.clone(),
            genre_title: snapshot.title.clone(),
            tag: tag.to_string(),
            posts: snapshot
                .database
                .records_tagged(tag)
                .into_iter()
                .map(|record| PostCard::new(&snapshot.key, record))
                .collect(),
            tag_list: tag_links(snapshot),
        }
    }
}

fn tag_links(snapshot: &GenreSnapshot) -> Vec<TagLink> {
    snapshot
        .database
        .tag_vocabulary()
        .iter()
        .map(|name| TagLink::new(&snapshot.key, name))
        .collect()
}

/// Formats a timestamp the way readers see dates: `2023年1月05日`, in JST.
pub fn display_date(at: &DateTime<Utc>) -> String {
    match FixedOffset::east_opt(DISPLAY_UTC_OFFSET_SECS) {
        Some(offset) => at.with_timezone(&offset).format("%Y年%-m月%d日").to_string(),
        None => at.format("%Y年%-m月%d日").to_string(),
    }
}
