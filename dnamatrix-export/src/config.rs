//! Export settings, loaded from an optional YAML file. Every field has a
//! default, so an empty file (or no file) is a valid configuration.

use crate::error::{ExportError, ExportResult};
use dnamatrix_blocks::DEFAULT_PAGE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// `<title>` of the exported site.
    pub title: String,
    /// Page rendered by the site and preview exports.
    pub page: String,
    /// Year for `{year}` in the preview. The current year when unset; the
    /// site export always uses the viewer's clock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub cdn: CdnConfig,
    pub files: FileNames,
}

/// Scripts and styles the exported document loads by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CdnConfig {
    pub react: String,
    pub react_dom: String,
    /// Must expose the `window.Motion` global.
    pub framer_motion: String,
    pub tailwind: String,
    pub google_fonts: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNames {
    pub site: String,
    pub archive: String,
    pub json: String,
    pub preview: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            title: "DNA Production Site".to_string(),
            page: DEFAULT_PAGE.to_string(),
            year: None,
            cdn: CdnConfig::default(),
            files: FileNames::default(),
        }
    }
}

impl Default for CdnConfig {
    fn default() -> Self {
        Self {
            react: "https://unpkg.com/react@18/umd/react.production.min.js".to_string(),
            react_dom: "https://unpkg.com/react-dom@18/umd/react-dom.production.min.js".to_string(),
            framer_motion: "https://unpkg.com/framer-motion@10.16.4/dist/framer-motion.js"
                .to_string(),
            tailwind: "https://cdn.tailwindcss.com".to_string(),
            google_fonts: "https://fonts.googleapis.com/css2".to_string(),
        }
    }
}

impl Default for FileNames {
    fn default() -> Self {
        Self {
            site: "index.html".to_string(),
            archive: "dna-matrix-react-project.zip".to_string(),
            json: "dna-project.json".to_string(),
            preview: "preview.html".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn from_yaml(yaml: &str) -> ExportResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ExportConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> ExportResult<Self> {
        let yaml = fs::read_to_string(path).map_err(|e| {
            ExportError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&yaml)
    }

    fn validate(&self) -> ExportResult<()> {
        if self.page.trim().is_empty() {
            return Err(ExportError::Config("page must not be empty".to_string()));
        }
        let names = [
            &self.files.site,
            &self.files.archive,
            &self.files.json,
            &self.files.preview,
        ];
        for name in names {
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(ExportError::Config(format!(
                    "invalid output file name '{}': expected a bare file name",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Google Fonts stylesheet URL for a font family.
    pub fn font_url(&self, family_query: &str) -> String {
        format!(
            "{}?family={}:wght@300;400;700;900&display=swap",
            self.cdn.google_fonts, family_query
        )
    }
}
