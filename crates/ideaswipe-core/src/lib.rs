pub mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

// --- Types ---

/// One field of an [`Idea`], in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdeaField {
    Name,
    Tagline,
    Pitch,
    Vibe,
    Problem,
    Solution,
    TargetAudience,
    SecretSauce,
    Monetization,
    Hurdle,
    FirstStep,
}

impl IdeaField {
    pub const ALL: [IdeaField; 11] = [
        IdeaField::Name,
        IdeaField::Tagline,
        IdeaField::Pitch,
        IdeaField::Vibe,
        IdeaField::Problem,
        IdeaField::Solution,
        IdeaField::TargetAudience,
        IdeaField::SecretSauce,
        IdeaField::Monetization,
        IdeaField::Hurdle,
        IdeaField::FirstStep,
    ];

    /// Fields shown in the detail ("pitch deck") view.
    pub const NARRATIVE: [IdeaField; 7] = [
        IdeaField::Problem,
        IdeaField::Solution,
        IdeaField::TargetAudience,
        IdeaField::SecretSauce,
        IdeaField::Monetization,
        IdeaField::Hurdle,
        IdeaField::FirstStep,
    ];

    /// JSON key as produced by the model and served to clients.
    pub fn key(self) -> &'static str {
        match self {
            IdeaField::Name => "name",
            IdeaField::Tagline => "tagline",
            IdeaField::Pitch => "pitch",
            IdeaField::Vibe => "vibe",
            IdeaField::Problem => "problem",
            IdeaField::Solution => "solution",
            IdeaField::TargetAudience => "targetAudience",
            IdeaField::SecretSauce => "secretSauce",
            IdeaField::Monetization => "monetization",
            IdeaField::Hurdle => "hurdle",
            IdeaField::FirstStep => "firstStep",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IdeaField::Name => "Name",
            IdeaField::Tagline => "Tagline",
            IdeaField::Pitch => "Pitch",
            IdeaField::Vibe => "Vibe",
            IdeaField::Problem => "Problem",
            IdeaField::Solution => "Solution",
            IdeaField::TargetAudience => "Target Audience",
            IdeaField::SecretSauce => "Secret Sauce",
            IdeaField::Monetization => "Monetization",
            IdeaField::Hurdle => "Biggest Hurdle",
            IdeaField::FirstStep => "First Step",
        }
    }
}

/// A startup idea as returned by the model. Every field may be absent:
/// the model is never guaranteed to fill the whole schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<String>,
    /// Business category label, e.g. "B2B SaaS"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibe: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_sauce: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monetization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hurdle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_step: Option<String>,
}

impl Idea {
    /// Build an idea from an arbitrary JSON value. Only objects convert.
    /// String-valued keys are taken as-is; anything else counts as absent.
    pub fn from_json(value: &Value) -> Option<Idea> {
        let obj = value.as_object()?;
        let mut idea = Idea::default();
        for field in IdeaField::ALL {
            if let Some(text) = string_at(obj, field.key()) {
                *idea.slot_mut(field) = Some(text);
            }
        }
        Some(idea)
    }

    pub fn get(&self, field: IdeaField) -> Option<&str> {
        let slot = match field {
            IdeaField::Name => &self.name,
            IdeaField::Tagline => &self.tagline,
            IdeaField::Pitch => &self.pitch,
            IdeaField::Vibe => &self.vibe,
            IdeaField::Problem => &self.problem,
            IdeaField::Solution => &self.solution,
            IdeaField::TargetAudience => &self.target_audience,
            IdeaField::SecretSauce => &self.secret_sauce,
            IdeaField::Monetization => &self.monetization,
            IdeaField::Hurdle => &self.hurdle,
            IdeaField::FirstStep => &self.first_step,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, field: IdeaField) -> &mut Option<String> {
        match field {
            IdeaField::Name => &mut self.name,
            IdeaField::Tagline => &mut self.tagline,
            IdeaField::Pitch => &mut self.pitch,
            IdeaField::Vibe => &mut self.vibe,
            IdeaField::Problem => &mut self.problem,
            IdeaField::Solution => &mut self.solution,
            IdeaField::TargetAudience => &mut self.target_audience,
            IdeaField::SecretSauce => &mut self.secret_sauce,
            IdeaField::Monetization => &mut self.monetization,
            IdeaField::Hurdle => &mut self.hurdle,
            IdeaField::FirstStep => &mut self.first_step,
        }
    }

    /// Fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<IdeaField> {
        IdeaField::ALL
            .into_iter()
            .filter(|f| self.get(*f).map_or(true, |s| s.trim().is_empty()))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

fn string_at(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Opaque id plus creation time, attached to history and favorite entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub id: String,
    pub timestamp: DateTime<Utc>,
}

impl Stamp {
    pub fn fresh() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// An idea as it was shown to the user, flattened next to its stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub idea: Idea,
    pub timestamp: DateTime<Utc>,
    pub id: String,
}

impl HistoryEntry {
    pub fn new(idea: Idea, stamp: Stamp) -> Self {
        Self {
            idea,
            timestamp: stamp.timestamp,
            id: stamp.id,
        }
    }
}

/// Same shape as a history entry; only created when the user likes an idea.
pub type FavoriteEntry = HistoryEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    #[serde(default)]
    pub total_generated: u64,
    #[serde(default)]
    pub total_liked: u64,
    #[serde(default)]
    pub total_passed: u64,
    #[serde(default)]
    pub total_refined: u64,
}

// --- Paths ---

/// Resolve the global data directory (~/.ideaswipe/).
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ideaswipe")
}

// --- AI Settings ---

pub const DEFAULT_PROVIDER: &str = "anthropic";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSettings {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Deadline for one remote call. Zero disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: String::new(),
            model: default_model(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn settings_path() -> PathBuf {
    data_dir().join("settings.json")
}

/// Read settings from ~/.ideaswipe/settings.json, then apply env overrides.
pub fn read_settings() -> AiSettings {
    let path = settings_path();
    let from_file = if path.exists() {
        fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
    } else {
        None
    };
    let mut settings = from_file.unwrap_or_default();
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings
}

/// Overlay environment values on top of file settings.
pub fn apply_env(settings: &mut AiSettings, var: impl Fn(&str) -> Option<String>) {
    let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());

    if let Some(provider) = var("IDEASWIPE_PROVIDER") {
        settings.provider = provider;
    }
    if let Some(model) = var("IDEASWIPE_MODEL") {
        settings.model = model;
    }
    if let Some(key) = var("IDEASWIPE_API_KEY").or_else(|| var("CLAUDE_API_KEY")) {
        settings.api_key = key;
    }
    if let Some(max) = var("IDEASWIPE_MAX_TOKENS") {
        match max.parse() {
            Ok(n) => settings.max_tokens = n,
            Err(e) => tracing::warn!("Invalid IDEASWIPE_MAX_TOKENS value: {e}"),
        }
    }
    if let Some(secs) = var("IDEASWIPE_TIMEOUT_SECS") {
        match secs.parse() {
            Ok(n) => settings.timeout_secs = n,
            Err(e) => tracing::warn!("Invalid IDEASWIPE_TIMEOUT_SECS value: {e}"),
        }
    }
}

pub fn write_settings(settings: &AiSettings) -> Result<(), String> {
    let dir = data_dir();
    fs::create_dir_all(&dir).map_err(|e| e.to_string())?;
    let json = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;
    fs::write(settings_path(), json).map_err(|e| e.to_string())
}

pub fn ai_configured(settings: &AiSettings) -> bool {
    !settings.provider.is_empty()
        && !settings.model.is_empty()
        && (settings.provider == "ollama" || !settings.api_key.is_empty())
}
