//! Per-mode target settings and their persisted store
//!
//! Each shooting mode owns a profile of numeric settings; every setting is
//! declared in [`SettingKey`] together with its `[min, max]` limit, so there
//! is no string reflection anywhere. Writes clamp, then rewrite the store
//! file in full; other profiles' lines survive untouched.
//!
//! The store file is deliberately plain: one profile per line,
//! `<ProfileName> <JSON object>`. Writes are not atomic - a crash mid-write
//! can corrupt the file. Acceptable for a local single-user tool; loads
//! treat a corrupt file as empty rather than failing.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::engine::ModeId;

/// Every tunable setting, with its display name and shared limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SettingKey {
    MaxRadius,
    Grow,
    OutlineMargin,
    TargetsAmount,
    SpawnRate,
    Duration,
}

impl SettingKey {
    /// Stable name used in the persisted JSON blobs
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::MaxRadius => "max_radius",
            SettingKey::Grow => "grow",
            SettingKey::OutlineMargin => "outline_margin",
            SettingKey::TargetsAmount => "targets_amount",
            SettingKey::SpawnRate => "spawn_rate",
            SettingKey::Duration => "duration",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "max_radius" => Some(SettingKey::MaxRadius),
            "grow" => Some(SettingKey::Grow),
            "outline_margin" => Some(SettingKey::OutlineMargin),
            "targets_amount" => Some(SettingKey::TargetsAmount),
            "spawn_rate" => Some(SettingKey::SpawnRate),
            "duration" => Some(SettingKey::Duration),
            _ => None,
        }
    }

    /// Shared `[min, max]` limits table
    pub fn limits(&self) -> (f64, f64) {
        match self {
            SettingKey::MaxRadius => (1.0, 100.0),
            SettingKey::Grow => (0.0, 1.0),
            SettingKey::OutlineMargin => (0.0, 10.0),
            SettingKey::TargetsAmount => (1.0, 25.0),
            SettingKey::SpawnRate => (1.0, 10.0),
            SettingKey::Duration => (1.0, 5.0),
        }
    }

    /// Clamp a candidate value into the declared limits
    pub fn clamp(&self, value: f64) -> f64 {
        let (min, max) = self.limits();
        value.clamp(min, max)
    }
}

/// One shooting mode's settings
#[derive(Debug, Clone, Default)]
pub struct ModeProfile {
    values: BTreeMap<SettingKey, f64>,
}

impl ModeProfile {
    /// Built-in defaults for a mode; modes without timed spawns carry no
    /// spawn_rate/duration, AWP runs a single target so no targets_amount.
    pub fn defaults(mode: ModeId) -> Self {
        let mut values = BTreeMap::new();
        match mode {
            ModeId::Arcade => {
                values.insert(SettingKey::MaxRadius, 50.0);
                values.insert(SettingKey::Grow, 1.0);
                values.insert(SettingKey::OutlineMargin, 4.0);
                values.insert(SettingKey::SpawnRate, 3.0);
                values.insert(SettingKey::Duration, 2.0);
            }
            ModeId::SpeedyFingers => {
                values.insert(SettingKey::MaxRadius, 50.0);
                values.insert(SettingKey::Grow, 0.0);
                values.insert(SettingKey::OutlineMargin, 4.0);
                values.insert(SettingKey::TargetsAmount, 5.0);
            }
            ModeId::Awp => {
                values.insert(SettingKey::MaxRadius, 10.0);
                values.insert(SettingKey::Grow, 0.0);
                values.insert(SettingKey::OutlineMargin, 2.0);
            }
            _ => {}
        }
        Self { values }
    }

    pub fn get(&self, key: SettingKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    /// Keys this profile declares, in stable order
    pub fn keys(&self) -> impl Iterator<Item = SettingKey> + '_ {
        self.values.keys().copied()
    }

    /// Set a declared key, clamped to its limits. Undeclared keys are
    /// rejected: a mode without timed spawns has no spawn rate to tune.
    pub fn set(&mut self, key: SettingKey, value: f64) -> bool {
        match self.values.get_mut(&key) {
            Some(slot) => {
                *slot = SettingKey::clamp(&key, value);
                true
            }
            None => false,
        }
    }

    fn to_json(&self) -> serde_json::Value {
        let map: serde_json::Map<String, serde_json::Value> = self
            .values
            .iter()
            .filter_map(|(k, v)| Some((k.name().to_string(), serde_json::Number::from_f64(*v)?)))
            .map(|(k, n)| (k, serde_json::Value::Number(n)))
            .collect();
        serde_json::Value::Object(map)
    }

    /// Overlay persisted values onto the defaults; unknown names are skipped
    fn merge_json(&mut self, blob: &serde_json::Value) {
        let Some(object) = blob.as_object() else {
            return;
        };
        for (name, value) in object {
            let (Some(key), Some(v)) = (SettingKey::from_name(name), value.as_f64()) else {
                log::warn!("ignoring unknown setting {name:?}");
                continue;
            };
            if self.values.contains_key(&key) {
                self.values.insert(key, SettingKey::clamp(&key, v));
            }
        }
    }
}

/// Persisted key -> JSON-blob mapping of every mode's profile
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    profiles: BTreeMap<ModeId, ModeProfile>,
    /// Lines owned by profiles this build does not know; preserved verbatim
    foreign_lines: Vec<String>,
}

impl SettingsStore {
    /// In-memory defaults that never persist; for headless runs
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            profiles: ModeId::SHOOTING
                .iter()
                .map(|&mode| (mode, ModeProfile::defaults(mode)))
                .collect(),
            foreign_lines: Vec::new(),
        }
    }

    /// Load the store, or fall back to built-in defaults on a cold start.
    /// A missing file, an empty file, or garbage lines never raise.
    pub fn load(path: &Path) -> Self {
        let mut store = Self {
            path: path.to_path_buf(),
            profiles: ModeId::SHOOTING
                .iter()
                .map(|&mode| (mode, ModeProfile::defaults(mode)))
                .collect(),
            foreign_lines: Vec::new(),
        };

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::info!("no settings store at {}: {e}; using defaults", path.display());
                return store;
            }
        };

        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let Some((name, blob)) = line.split_once(' ') else {
                log::warn!("malformed settings line {line:?}");
                continue;
            };
            match ModeId::SHOOTING.iter().find(|m| m.name() == name) {
                Some(&mode) => match serde_json::from_str::<serde_json::Value>(blob) {
                    Ok(value) => {
                        if let Some(profile) = store.profiles.get_mut(&mode) {
                            profile.merge_json(&value);
                        }
                    }
                    Err(e) => log::warn!("unreadable settings for {name}: {e}"),
                },
                None => store.foreign_lines.push(line.to_string()),
            }
        }

        log::info!("loaded settings from {}", path.display());
        store
    }

    pub fn profile(&self, mode: ModeId) -> &ModeProfile {
        &self.profiles[&mode]
    }

    /// Clamp and apply one setting, then write the whole store through.
    /// Returns the value actually stored, or `None` for an undeclared key.
    pub fn change_setting(&mut self, mode: ModeId, key: SettingKey, value: f64) -> Option<f64> {
        let profile = self.profiles.get_mut(&mode)?;
        if !profile.set(key, value) {
            return None;
        }
        let stored = profile.get(key);
        if let Err(e) = self.save() {
            log::error!("failed to persist settings: {e}");
        }
        stored
    }

    /// Rewrite the full store file: every known profile plus any lines that
    /// belonged to profiles we do not know about.
    pub fn save(&self) -> io::Result<()> {
        if self.path.as_os_str().is_empty() {
            return Ok(());
        }
        let mut out = String::new();
        for (mode, profile) in &self.profiles {
            out.push_str(mode.name());
            out.push(' ');
            out.push_str(&profile.to_json().to_string());
            out.push('\n');
        }
        for line in &self.foreign_lines {
            out.push_str(line);
            out.push('\n');
        }
        fs::write(&self.path, out)
    }
}
