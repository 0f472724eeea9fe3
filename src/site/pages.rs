// src/site/pages.rs
//! Full HTML documents from page props, through handlebars templates.
//!
//! Each page kind has its own template; its output is then placed into the
//! shared `layout` template together with the document title and the genre
//! navigation.

use super::assembler::{CategoryProps, DetailProps, ListProps};
use super::genres::GenreTable;
use super::routes::Route;
use crate::error::AppError;
use crate::types::Markup;
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;
use std::path::Path;

/// Template names with their built-in sources.
const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("layout", include_str!("../../templates/layout.hbs")),
    ("list", include_str!("../../templates/list.hbs")),
    ("detail", include_str!("../../templates/detail.hbs")),
    ("category", include_str!("../../templates/category.hbs")),
];

/// What a detail page shows when its post cannot be found.
const BLANK_PAGE: &str = "<div></div>";

#[derive(Debug, Clone, Serialize)]
struct NavLink {
    title: String,
    href: String,
}

/// Renders list, detail and category documents.
pub struct PageRenderer {
    registry: Handlebars<'static>,
    site_name: String,
    navigation: Vec<NavLink>,
}

impl PageRenderer {
    /// Uses the built-in templates, or the `.hbs` files of `template_dir`
    /// when one is given.
    pub fn new(
        site_name: &str,
        genres: &GenreTable,
        template_dir: Option<&Path>,
    ) -> Result<Self, AppError> {
        let mut registry = Handlebars::new();

        for (name, builtin) in BUILTIN_TEMPLATES {
            let source = match template_dir {
                Some(dir) => {
                    let path = dir.join(format!("{}.hbs", name));
                    std::fs::read_to_string(&path).map_err(|e| AppError::TemplateNotFound {
                        path: path.display().to_string(),
                        source: e,
                    })?
                }
                None => builtin.to_string(),
            };

            registry
                .register_template_string(name, source)
                .map_err(|e| AppError::TemplateRenderError {
                    name: name.to_string(),
                    message: e.to_string(),
                })?;
        }

        let navigation = genres
            .genres()
            .iter()
            .map(|genre| NavLink {
                title: genre.title.clone(),
                href: Route::list(&genre.key).path(),
            })
            .collect();

        Ok(Self {
            registry,
            site_name: site_name.to_string(),
            navigation,
        })
    }

    pub fn render_list(&self, props: &ListProps) -> Result<Markup, AppError> {
        let title = format!("{} - {} -", self.site_name, props.genre_title);
        self.render_page("list", &title, props)
    }

    /// A missing post renders as an empty `<div>` instead of a document.
    pub fn render_detail(&self, props: Option<&DetailProps>) -> Result<Markup, AppError> {
        match props {
            Some(props) => {
                let title = format!(
                    "{} / {} - {} -",
                    props.page_title, props.composed_title, self.site_name
                );
                self.render_page("detail", &title, props)
            }
            None => Ok(Markup::new(BLANK_PAGE)),
        }
    }

    pub fn render_category(&self, props: &CategoryProps) -> Result<Markup, AppError> {
        let title = format!("{} / {} - {} -", props.tag, props.genre_title, self.site_name);
        self.render_page("category", &title, props)
    }

    fn render_page<T: Serialize>(
        &self,
        template: &str,
        document_title: &str,
        props: &T,
    ) -> Result<Markup, AppError> {
        let content = self.render_template(template, props)?;
        let document = self.render_template(
            "layout",
            &json!({
                "title": document_title,
                "site_name": self.site_name,
                "navigation": self.navigation,
                "content": content,
            }),
        )?;
        Ok(Markup::new(document))
    }

    fn render_template<T: Serialize>(&self, name: &str, data: &T) -> Result<String, AppError> {
        self.registry
            .render(name, data)
            .map_err(|e| AppError::TemplateRenderError {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}
