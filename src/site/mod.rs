// src/site/mod.rs
//! The blog itself: which routes exist, what each page shows, and how it
//! is turned into an HTML document.

mod assembler;
mod genres;
mod pages;
mod routes;

pub use assembler::{
    display_date, CategoryProps, DetailProps, GenreSnapshot, ListProps, PostCard, RouteAssembler,
    TagLink,
};
pub use genres::{Genre, GenreTable, DEFAULT_GENRE, KNOWN_GENRES};
pub use pages::PageRenderer;
pub use routes::Route;
