//! Askama page templates.

use askama::Template;
use askama_web::WebTemplate;

/// Root page: the canvas, its controls and the build footer.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Build identifier shown once in the page footer.
    pub version: &'static str,
}
