use axum::http::StatusCode;
use axum::response::Html;
use serde::Serialize;
use tera::{Context, Tera};

const PAGE_TEMPLATE: &str = include_str!("templates/page.html");

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A one-line status shown above the form
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success<S: Into<String>>(text: S) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn warning<S: Into<String>>(text: S) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error<S: Into<String>>(text: S) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

/// Everything the page template needs for one full render
#[derive(Debug, Default, Serialize)]
pub struct PageView {
    pub ready: bool,
    pub notice: Option<Notice>,
    pub answer: Option<String>,
}

pub fn render_page(view: &PageView) -> Result<String, tera::Error> {
    let mut tera = Tera::default();
    // The .html name keeps tera's autoescaping on for the answer text
    tera.add_raw_template("page.html", PAGE_TEMPLATE)?;
    let context = Context::from_serialize(view)?;
    tera.render("page.html", &context)
}

/// Render the page as an HTTP response, used by every handler
pub fn page(
    ready: bool,
    notice: Option<Notice>,
    answer: Option<String>,
) -> Result<Html<String>, StatusCode> {
    let view = PageView {
        ready,
        notice,
        answer,
    };
    render_page(&view)
        .map(Html)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
