//! Template renderer - per-banner index.html generation
//!
//! The template is compiled into the binary and rendered with minijinja.
//! HTML auto-escaping is always on; values placed inside `<script>` go
//! through `tojson` so creative copy cannot break out of a string literal.

use crate::{BannerConfig, BundleFile, Creative, Result};
use minijinja::{AutoEscape, Environment, context};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Renders the interactive banner document
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.add_template(BundleFile::Index.file_name(), INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render index.html for one banner
    ///
    /// Output depends only on `banner` and `creative`, so re-rendering the
    /// same inputs yields the same document.
    pub fn render(&self, banner: &BannerConfig, creative: &Creative) -> Result<String> {
        let template = self.env.get_template(BundleFile::Index.file_name())?;
        let html = template.render(context! {
            width => banner.width,
            height => banner.height,
            cursor_width => banner.cursor_width,
            cursor_height => banner.cursor_height,
            reveal_width => banner.reveal_width,
            reveal_height => banner.reveal_height,
            reveal_offset_x => banner.reveal_offset_x,
            reveal_offset_y => banner.reveal_offset_y,
            clickthrough_url => &creative.clickthrough_url,
            title => &creative.title,
            cta_label => &creative.cta_label,
            lang => &creative.lang,
            images => context! {
                normal => BundleFile::Normal.file_name(),
                thermal => BundleFile::Thermal.file_name(),
                camera => BundleFile::Camera.file_name(),
            },
        })?;
        Ok(html)
    }
}
