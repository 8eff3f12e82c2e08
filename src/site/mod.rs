pub mod config;
pub mod data;
pub mod filters;

pub use config::SiteConfig;

use std::fs;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::utils::error::Result;

/// Renders the static site: loads the opportunity dataset, renders every
/// template in the input directory through Tera with the tracker's filters
/// registered, and copies passthrough assets verbatim.
pub struct SiteBuilder {
    config: SiteConfig,
    root: PathBuf,
}

#[derive(Debug)]
pub struct BuildReport {
    pub pages: usize,
    pub assets: usize,
    pub opportunities: usize,
    pub output_dir: PathBuf,
}

impl SiteBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            config: SiteConfig::default(),
            root: root.into(),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn build(&self) -> Result<BuildReport> {
        let opportunities = data::load_opportunities(&self.root.join(self.config.data_file))?;
        tracing::info!("Loaded {} opportunities", opportunities.len());

        let input_dir = self.root.join(self.config.input_dir);
        let output_dir = self.root.join(self.config.output_dir);

        let mut tera = Tera::new(&self.template_glob(&input_dir))?;
        filters::register_filters(&mut tera);

        let mut context = Context::new();
        context.insert("site_title", self.config.title);
        context.insert("opportunities", &opportunities);

        // Includes are inherited from, never rendered standalone.
        let includes_prefix = format!("{}/", self.config.includes_dir);
        let page_names: Vec<String> = tera
            .get_template_names()
            .filter(|name| !name.starts_with(&includes_prefix))
            .map(str::to_string)
            .collect();

        let mut pages = 0;
        for name in &page_names {
            let rendered = tera.render(name, &context)?;
            let out_path = output_dir.join(name);
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&out_path, rendered)?;
            tracing::debug!("rendered {}", name);
            pages += 1;
        }

        let mut assets = 0;
        for dir in self.config.passthrough_dirs {
            let src = input_dir.join(dir);
            if src.is_dir() {
                assets += copy_dir_recursive(&src, &output_dir.join(dir))?;
            }
        }

        tracing::info!(
            "Site built: {} pages, {} assets copied",
            pages,
            assets
        );

        Ok(BuildReport {
            pages,
            assets,
            opportunities: opportunities.len(),
            output_dir,
        })
    }

    fn template_glob(&self, input_dir: &Path) -> String {
        let extensions = self.config.template_extensions;
        if extensions.len() == 1 {
            format!("{}/**/*.{}", input_dir.display(), extensions[0])
        } else {
            format!("{}/**/*.{{{}}}", input_dir.display(), extensions.join(","))
        }
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let path = entry.path();
        let target = dst.join(entry.file_name());
        if path.is_dir() {
            copied += copy_dir_recursive(&path, &target)?;
        } else {
            fs::copy(&path, &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}
