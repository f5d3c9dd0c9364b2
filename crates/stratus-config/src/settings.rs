//! Reconciler settings loaded from `stratus.kdl`

use crate::error::{ConfigError, Result};
use kdl::{KdlDocument, KdlNode, KdlValue};
use std::path::{Path, PathBuf};
use std::time::Duration;
use stratus_core::{PollSettings, ReconcilerSettings, Timeouts};

/// Environment override for [`Features::import_existing`]
pub const IMPORT_EXISTING_ENV: &str = "STRATUS_IMPORT_EXISTING";

/// Feature toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// Refuse to create resources that already exist remotely
    pub import_existing: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            import_existing: true,
        }
    }
}

/// Per-operation timeouts overriding a resource kind's defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeoutOverrides {
    pub create: Option<Duration>,
    pub read: Option<Duration>,
    pub update: Option<Duration>,
    pub delete: Option<Duration>,
}

impl TimeoutOverrides {
    pub fn apply(&self, defaults: Timeouts) -> Timeouts {
        Timeouts {
            create: self.create.unwrap_or(defaults.create),
            read: self.read.unwrap_or(defaults.read),
            update: self.update.unwrap_or(defaults.update),
            delete: self.delete.unwrap_or(defaults.delete),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub features: Features,
    pub timeouts: TimeoutOverrides,
    pub polling: PollSettings,
}

impl Settings {
    /// Discover and load the settings file, then apply environment overrides
    ///
    /// Without a settings file every value keeps its default.
    pub fn load() -> Result<Self> {
        let mut settings = match crate::find_config_file() {
            Ok(path) => Self::load_from(&path)?,
            Err(ConfigError::ConfigFileNotFound) => {
                tracing::debug!("No config file found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let doc: KdlDocument = content.parse().map_err(|source| ConfigError::Kdl {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_document(&doc)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_kdl(content: &str) -> Result<Self> {
        let doc: KdlDocument = content.parse().map_err(|source| ConfigError::Kdl {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        Self::from_document(&doc)
    }

    fn from_document(doc: &KdlDocument) -> Result<Self> {
        let mut settings = Self::default();

        for node in doc.nodes() {
            match node.name().value() {
                "features" => {
                    for child in children(node) {
                        match child.name().value() {
                            "import-existing" => {
                                settings.features.import_existing =
                                    bool_arg(child, "features.import-existing")?;
                            }
                            other => tracing::warn!("Unknown feature: {}", other),
                        }
                    }
                }
                "timeouts" => {
                    for child in children(node) {
                        let name = child.name().value();
                        let key = format!("timeouts.{}", name);
                        let slot = match name {
                            "create" => &mut settings.timeouts.create,
                            "read" => &mut settings.timeouts.read,
                            "update" => &mut settings.timeouts.update,
                            "delete" => &mut settings.timeouts.delete,
                            other => {
                                tracing::warn!("Unknown timeout: {}", other);
                                continue;
                            }
                        };
                        *slot = Some(duration_arg(child, &key)?);
                    }
                }
                "polling" => {
                    for child in children(node) {
                        match child.name().value() {
                            "interval" => {
                                settings.polling.interval = duration_arg(child, "polling.interval")?;
                            }
                            "max-interval" => {
                                settings.polling.max_interval =
                                    duration_arg(child, "polling.max-interval")?;
                            }
                            other => tracing::warn!("Unknown polling setting: {}", other),
                        }
                    }
                }
                other => tracing::warn!("Unknown config node: {}", other),
            }
        }

        if settings.polling.max_interval < settings.polling.interval {
            return Err(ConfigError::invalid(
                "polling.max-interval",
                "must not be shorter than polling.interval",
            ));
        }

        Ok(settings)
    }

    /// Apply environment variable overrides
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var(IMPORT_EXISTING_ENV) {
            self.features.import_existing = parse_bool(&value)
                .ok_or_else(|| ConfigError::invalid(IMPORT_EXISTING_ENV, format!("not a boolean: {}", value)))?;
        }
        Ok(())
    }

    /// Reconciler settings for a resource kind with the given default timeouts
    pub fn reconciler_settings(&self, default_timeouts: Timeouts) -> ReconcilerSettings {
        ReconcilerSettings {
            timeouts: self.timeouts.apply(default_timeouts),
            polling: self.polling,
            import_existing: self.features.import_existing,
        }
    }
}

fn children(node: &KdlNode) -> &[KdlNode] {
    node.children().map(|doc| doc.nodes()).unwrap_or(&[])
}

fn first_value<'a>(node: &'a KdlNode, key: &str) -> Result<&'a KdlValue> {
    node.entries()
        .first()
        .map(|e| e.value())
        .ok_or_else(|| ConfigError::invalid(key, "missing value"))
}

fn bool_arg(node: &KdlNode, key: &str) -> Result<bool> {
    first_value(node, key)?
        .as_bool()
        .ok_or_else(|| ConfigError::invalid(key, "expected #true or #false"))
}

fn duration_arg(node: &KdlNode, key: &str) -> Result<Duration> {
    let value = first_value(node, key)?;
    let duration = if let Some(s) = value.as_string() {
        parse_duration(s).ok_or_else(|| ConfigError::invalid(key, format!("invalid duration: {}", s)))?
    } else if let Some(secs) = value.as_integer() {
        let secs = u64::try_from(secs)
            .map_err(|_| ConfigError::invalid(key, format!("invalid duration: {}", secs)))?;
        Duration::from_secs(secs)
    } else {
        return Err(ConfigError::invalid(key, "expected a duration"));
    };

    if duration.is_zero() {
        return Err(ConfigError::invalid(key, "duration must be positive"));
    }
    Ok(duration)
}

/// Parse `90m`, `30s`, `2h` or a bare number of seconds
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    let (digits, unit) = match input.char_indices().last()? {
        (i, c) if c.is_ascii_alphabetic() => (&input[..i], c),
        _ => (input, 's'),
    };
    let n: u64 = digits.parse().ok()?;
    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        _ => return None,
    };
    n.checked_mul(multiplier).map(Duration::from_secs)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
