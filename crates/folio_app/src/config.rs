//! Experience configuration
//!
//! Which pages exist, where their models and narration live, in which
//! language, and how a freshly loaded model is placed on its page. Path
//! templates use `{page}` (1-based page number) and `{lang}` placeholders.

use folio_assets::ModelConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use folio_core::ConfigError;

use crate::world::TargetIndex;

pub const PAGE_PLACEHOLDER: &str = "{page}";
pub const LANG_PLACEHOLDER: &str = "{lang}";
pub const DEFAULT_LANGUAGE: &str = "english";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceConfig {
    /// Number of book pages, each with its own image target
    pub page_count: usize,
    pub model_path_template: String,
    pub audio_path_template: String,
    pub language: String,
    /// Compiled image-target set handed to the tracking engine
    pub image_targets: String,
    /// Placement applied to every page model
    pub model: ModelConfig,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            page_count: 11,
            model_path_template: "../assets/models/page{page}/page{page}.glb".to_string(),
            audio_path_template: "../assets/audio/{lang}/page {page}.mp3".to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            image_targets: "../assets/targets/grp14.mind".to_string(),
            model: ModelConfig::default(),
        }
    }
}

/// Everything needed to set up one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    /// 1-based page number
    pub page: usize,
    pub target: TargetIndex,
    pub model_path: String,
    pub audio_path: String,
}

impl ExperienceConfig {
    /// Parses and validates a JSON document. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Document(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_count == 0 {
            return Err(ConfigError::NoPages);
        }
        for template in [&self.model_path_template, &self.audio_path_template] {
            if !template.contains(PAGE_PLACEHOLDER) {
                return Err(ConfigError::MissingPagePlaceholder(template.clone()));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Applies the `lang` parameter of `query`, keeping the current language
    /// when it is absent.
    pub fn with_language_from_query(self, query: &str) -> Result<Self, ConfigError> {
        Ok(match language_from_query(query)? {
            Some(lang) => self.with_language(lang),
            None => self,
        })
    }

    #[must_use]
    pub fn model_path(&self, page: usize) -> String {
        self.expand(&self.model_path_template, page)
    }

    #[must_use]
    pub fn audio_path(&self, page: usize) -> String {
        self.expand(&self.audio_path_template, page)
    }

    /// Pages in order, page `n` tracked by target `n - 1`.
    pub fn pages(&self) -> impl Iterator<Item = PageSpec> + '_ {
        (1..=self.page_count).map(|page| PageSpec {
            page,
            target: TargetIndex(page - 1),
            model_path: self.model_path(page),
            audio_path: self.audio_path(page),
        })
    }

    fn expand(&self, template: &str, page: usize) -> String {
        template
            .replace(PAGE_PLACEHOLDER, &page.to_string())
            .replace(LANG_PLACEHOLDER, &self.language)
    }
}

/// Reads the `lang` parameter from a query string (with or without the
/// leading `?`). An empty value counts as absent.
///
/// The language becomes a path segment, so values containing separators or
/// parent references are rejected.
pub fn language_from_query(query: &str) -> Result<Option<String>, ConfigError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let Some(lang) = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "lang")
        .map(|(_, value)| value.into_owned())
    else {
        return Ok(None);
    };

    if lang.is_empty() {
        return Ok(None);
    }
    if lang.contains(['/', '\\']) || lang.contains("..") {
        return Err(ConfigError::InvalidQuery(format!("unusable language '{lang}'")));
    }
    Ok(Some(lang))
}

/// [`language_from_query`] applied to the query of a full page URL.
pub fn language_from_url(href: &str) -> Result<Option<String>, ConfigError> {
    let url = Url::parse(href).map_err(|e| ConfigError::InvalidQuery(e.to_string()))?;
    language_from_query(url.query().unwrap_or_default())
}
