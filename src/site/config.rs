/// Build configuration for the static site.
///
/// Every value is a fixed literal: the directory layout and engine choice
/// are part of the repository contract, not environment-configurable
/// settings.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Directory holding templates and static assets, relative to the
    /// project root.
    pub input_dir: &'static str,
    /// Build output directory.
    pub output_dir: &'static str,
    /// Subdirectory of `input_dir` holding layout partials; its templates
    /// are available for inheritance but never rendered standalone.
    pub includes_dir: &'static str,
    /// File extensions treated as templates.
    pub template_extensions: &'static [&'static str],
    /// Template engine used for HTML output.
    pub html_engine: &'static str,
    /// Dataset exposed to templates as the `opportunities` global,
    /// relative to the project root.
    pub data_file: &'static str,
    /// Asset directories under `input_dir` copied verbatim to the output.
    pub passthrough_dirs: &'static [&'static str],
    /// Site title exposed to templates.
    pub title: &'static str,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            input_dir: "site",
            output_dir: "_site",
            includes_dir: "_includes",
            template_extensions: &["html"],
            html_engine: "tera",
            data_file: "data/opportunities.json",
            passthrough_dirs: &["css"],
            title: "Fellowship & Grant Tracker",
        }
    }
}
