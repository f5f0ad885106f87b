use std::fs;
use std::path::{Path, PathBuf};

use toml_edit::{value, DocumentMut, Item, Table, TableLike};
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::rewriter::{CaseMode, Language, ReplacementTable};
use crate::suggest::Provider;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "INCLUSIFY_CONFIG";

/// Settings for the optional rewrite-suggestion service.
#[derive(Clone, Debug, PartialEq)]
pub struct SuggestionSettings {
    pub enabled: bool,
    pub provider: Provider,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    /// Name of the environment variable holding the API key. The key itself
    /// is never stored in the config file.
    pub api_key_env: Option<String>,
    pub timeout_secs: u64,
    pub max_length: u32,
    pub min_length: u32,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            provider: Provider::HuggingFace,
            endpoint: None,
            model: None,
            api_key_env: None,
            timeout_secs: 30,
            max_length: 500,
            min_length: 100,
        }
    }
}

impl SuggestionSettings {
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(self.provider.default_endpoint())
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(self.provider.default_model())
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(self.provider.default_api_key_env())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub config_path: PathBuf,
    pub language: Language,
    pub case_mode: CaseMode,
    pub log_path: PathBuf,
    pub suggestions: SuggestionSettings,
    /// Extra `(term, replacement)` pairs layered over the language table.
    pub terms: Vec<(String, String)>,
}

fn home_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
}

impl Default for Config {
    fn default() -> Self {
        let home = home_dir();
        let config_path = std::env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".config/inclusify/config.toml"));
        Self {
            config_path,
            language: Language::default(),
            case_mode: CaseMode::default(),
            log_path: home.join(".local/state/inclusify/inclusify.log"),
            suggestions: SuggestionSettings::default(),
            terms: Vec::new(),
        }
    }
}

impl Config {
    /// Load the config from its default location.
    ///
    /// Never fails: a missing file is created with defaults, and an unreadable
    /// or invalid one is reported and replaced by defaults in memory.
    pub fn load() -> Self {
        let config = Config::default();

        if !config.config_path.exists() {
            if let Err(e) = config.save() {
                warn!("Could not write default config to {}: {}", config.config_path.display(), e);
            }
            return config;
        }

        match Config::load_from(&config.config_path) {
            Ok(loaded) => loaded,
            Err(e) => {
                warn!("⚠️ Ignoring config at {}: {}", config.config_path.display(), e);
                config
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Config {
            config_path: path.to_path_buf(),
            ..Config::default()
        };

        if !path.exists() {
            return Ok(config);
        }

        let contents = fs::read_to_string(path)?;
        let doc = contents.parse::<DocumentMut>()?;
        config.apply(&doc)?;

        info!("📄 Loaded config from {}", path.display());
        Ok(config)
    }

    fn apply(&mut self, doc: &DocumentMut) -> Result<()> {
        if let Some(language) = get_str(doc.as_table(), "language")? {
            self.language = language.parse()?;
        }
        if let Some(mode) = get_str(doc.as_table(), "case_mode")? {
            self.case_mode = CaseMode::parse(mode)
                .ok_or_else(|| AppError::Config(format!("unknown case_mode: {}", mode)))?;
        }
        if let Some(log_path) = get_str(doc.as_table(), "log_path")? {
            self.log_path = PathBuf::from(log_path);
        }

        if let Some(section) = doc.get("suggestions") {
            let section = section
                .as_table_like()
                .ok_or_else(|| AppError::Config("[suggestions] must be a table".to_string()))?;
            self.apply_suggestions(section)?;
        }

        if let Some(terms) = doc.get("terms") {
            let terms = terms
                .as_table_like()
                .ok_or_else(|| AppError::Config("[terms] must be a table".to_string()))?;
            for (term, replacement) in terms.iter() {
                let replacement = replacement.as_str().ok_or_else(|| {
                    AppError::Config(format!("replacement for '{}' must be a string", term))
                })?;
                self.terms.push((term.to_string(), replacement.to_string()));
            }
        }

        Ok(())
    }

    fn apply_suggestions(&mut self, section: &dyn TableLike) -> Result<()> {
        let settings = &mut self.suggestions;

        if let Some(item) = section.get("enabled") {
            settings.enabled = item
                .as_bool()
                .ok_or_else(|| AppError::Config("suggestions.enabled must be a boolean".to_string()))?;
        }
        if let Some(provider) = get_str(section, "provider")? {
            settings.provider = Provider::parse(provider)
                .ok_or_else(|| AppError::Config(format!("unknown provider: {}", provider)))?;
        }
        if let Some(endpoint) = get_str(section, "endpoint")? {
            settings.endpoint = Some(endpoint.to_string());
        }
        if let Some(model) = get_str(section, "model")? {
            settings.model = Some(model.to_string());
        }
        if let Some(var) = get_str(section, "api_key_env")? {
            settings.api_key_env = Some(var.to_string());
        }
        if let Some(secs) = get_unsigned(section, "timeout_secs")? {
            settings.timeout_secs = secs;
        }
        if let Some(len) = get_unsigned(section, "max_length")? {
            settings.max_length = u32::try_from(len)
                .map_err(|_| AppError::Config("suggestions.max_length is too large".to_string()))?;
        }
        if let Some(len) = get_unsigned(section, "min_length")? {
            settings.min_length = u32::try_from(len)
                .map_err(|_| AppError::Config("suggestions.min_length is too large".to_string()))?;
        }
        if settings.min_length > settings.max_length {
            return Err(AppError::Config(
                "suggestions.min_length exceeds suggestions.max_length".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let mut doc = DocumentMut::new();
        doc["language"] = value(self.language.code());
        doc["case_mode"] = value(self.case_mode.as_str());
        doc["log_path"] = value(self.log_path.to_string_lossy().to_string());

        let settings = &self.suggestions;
        let mut suggestions = Table::new();
        suggestions["enabled"] = value(settings.enabled);
        suggestions["provider"] = value(settings.provider.as_str());
        if let Some(endpoint) = &settings.endpoint {
            suggestions["endpoint"] = value(endpoint.as_str());
        }
        if let Some(model) = &settings.model {
            suggestions["model"] = value(model.as_str());
        }
        if let Some(var) = &settings.api_key_env {
            suggestions["api_key_env"] = value(var.as_str());
        }
        suggestions["timeout_secs"] = value(settings.timeout_secs as i64);
        suggestions["max_length"] = value(i64::from(settings.max_length));
        suggestions["min_length"] = value(i64::from(settings.min_length));
        doc["suggestions"] = Item::Table(suggestions);

        if !self.terms.is_empty() {
            let mut terms = Table::new();
            for (term, replacement) in &self.terms {
                terms[term.as_str()] = value(replacement.as_str());
            }
            doc["terms"] = Item::Table(terms);
        }

        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = format!("# inclusify configuration\n# API keys are read from the environment, never from this file.\n{}", doc);
        fs::write(&self.config_path, contents)?;
        Ok(())
    }

    /// User terms from `[terms]` as a table of their own.
    pub fn custom_terms(&self) -> ReplacementTable {
        ReplacementTable::from_pairs(self.terms.iter().map(|(t, r)| (t, r.clone())))
    }
}

fn get_str<'a>(table: &'a dyn TableLike, key: &str) -> Result<Option<&'a str>> {
    match table.get(key) {
        None => Ok(None),
        Some(item) => item
            .as_str()
            .map(Some)
            .ok_or_else(|| AppError::Config(format!("{} must be a string", key))),
    }
}

fn get_unsigned(table: &dyn TableLike, key: &str) -> Result<Option<u64>> {
    match table.get(key) {
        None => Ok(None),
        Some(item) => item
            .as_integer()
            .and_then(|n| u64::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| AppError::Config(format!("{} must be a non-negative integer", key))),
    }
}
