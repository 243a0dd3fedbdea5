use log::{info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_PATH: &str = "customfloor.ini";

const SETTINGS_SECTION: &str = "Settings";
const ENV_OVERRIDE_KEY: &str = "EnvironmentOverrideMode";

// --- Minimal INI reader/writer ---
#[derive(Debug, Default)]
pub struct SimpleIni {
    sections: HashMap<String, HashMap<String, String>>,
}

impl SimpleIni {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        self.sections.clear();

        let mut current_section: Option<String> = None;

        for raw_line in content.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            // Section header: [SectionName]
            if line.starts_with('[') && line.ends_with(']') && line.len() >= 2 {
                let name = &line[1..line.len() - 1];
                let section = name.trim().to_string();
                current_section = Some(section.clone());
                self.sections.entry(section).or_default();
                continue;
            }

            // Key/value pair: key=value
            if let Some(eq_idx) = line.find('=') {
                let (key_raw, value_raw) = line.split_at(eq_idx);
                let key = key_raw.trim();
                if key.is_empty() {
                    continue;
                }
                // Skip '=' and trim whitespace from the value.
                let value = value_raw[1..].trim().to_string();
                let section = current_section.clone().unwrap_or_default();
                self.sections
                    .entry(section)
                    .or_default()
                    .insert(key.to_string(), value);
            }
        }

        Ok(())
    }

    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section).and_then(|s| s.get(key)).cloned()
    }

    pub fn get_section(&self, section: &str) -> Option<&HashMap<String, String>> {
        self.sections.get(section)
    }

    pub fn set(&mut self, section: &str, key: &str, value: &str) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Sections and keys are written in alphabetical order so the file is
    /// stable across rewrites.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let mut section_names: Vec<&String> = self.sections.keys().collect();
        section_names.sort();

        let mut content = String::new();
        for name in section_names {
            content.push_str(&format!("[{name}]\n"));
            let section = &self.sections[name];
            let mut keys: Vec<&String> = section.keys().collect();
            keys.sort();
            for key in keys {
                content.push_str(&format!("{key}={}\n", section[key]));
            }
            content.push('\n');
        }

        std::fs::write(path, content)
    }
}

/// Override choice for the selected platform's base model/environment.
///
/// Persisted as its ordinal under `[Settings] EnvironmentOverrideMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvOverrideMode {
    #[default]
    Default,
    Nice,
    BigMirror,
    Triangle,
    Kda,
    Monstercat,
}

impl EnvOverrideMode {
    /// Every mode, in ordinal order. The override list is built from this.
    pub const ALL: [Self; 6] = [
        Self::Default,
        Self::Nice,
        Self::BigMirror,
        Self::Triangle,
        Self::Kda,
        Self::Monstercat,
    ];

    #[inline(always)]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Nice => "Nice",
            Self::BigMirror => "BigMirror",
            Self::Triangle => "Triangle",
            Self::Kda => "KDA",
            Self::Monstercat => "Monstercat",
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline(always)]
    pub const fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Default,
            1 => Self::Nice,
            2 => Self::BigMirror,
            3 => Self::Triangle,
            4 => Self::Kda,
            _ => Self::Monstercat,
        }
    }
}

impl FromStr for EnvOverrideMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = s.trim().to_lowercase();
        match v.as_str() {
            "default" => Ok(Self::Default),
            "nice" => Ok(Self::Nice),
            "bigmirror" => Ok(Self::BigMirror),
            "triangle" => Ok(Self::Triangle),
            "kda" => Ok(Self::Kda),
            "monstercat" => Ok(Self::Monstercat),
            other => Err(format!("'{other}' is not a valid environment override mode")),
        }
    }
}

impl core::fmt::Display for EnvOverrideMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Backing store for persisted settings, keyed by INI-style section/key.
///
/// The panel only ever reads each setting once and writes on change; fakes
/// implementing this trait let tests observe both.
pub trait SettingsStore {
    fn get_int(&self, section: &str, key: &str, default: i32) -> i32;
    fn set_int(&mut self, section: &str, key: &str, value: i32);
}

/// Production store: a `SimpleIni` file rewritten on every change.
pub struct IniSettingsStore {
    ini: SimpleIni,
    path: PathBuf,
}

impl IniSettingsStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut ini = SimpleIni::new();
        if path.exists() {
            if let Err(e) = ini.load(&path) {
                warn!("Failed to read settings file '{}': {e}", path.display());
            }
        } else {
            info!(
                "'{}' not found, starting from default settings.",
                path.display()
            );
        }
        Self { ini, path }
    }
}

impl SettingsStore for IniSettingsStore {
    fn get_int(&self, section: &str, key: &str, default: i32) -> i32 {
        self.ini
            .get(section, key)
            .and_then(|v| v.parse::<i32>().ok())
            .unwrap_or(default)
    }

    fn set_int(&mut self, section: &str, key: &str, value: i32) {
        self.ini.set(section, key, &value.to_string());
        if let Err(e) = self.ini.save(&self.path) {
            warn!("Failed to save settings file '{}': {e}", self.path.display());
        }
    }
}

/// Owned settings state for the platform panel.
///
/// The override mode is read from the store exactly once, at construction,
/// and cached here. Writes keep cache and store equal.
pub struct Settings {
    store: Box<dyn SettingsStore>,
    env_override_mode: EnvOverrideMode,
}

impl Settings {
    pub fn new(store: Box<dyn SettingsStore>) -> Self {
        let raw = store.get_int(SETTINGS_SECTION, ENV_OVERRIDE_KEY, 0);
        let env_override_mode = EnvOverrideMode::from_index(raw.max(0) as usize);
        Self {
            store,
            env_override_mode,
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::new(Box::new(IniSettingsStore::open(path)))
    }

    #[inline(always)]
    pub const fn env_override_mode(&self) -> EnvOverrideMode {
        self.env_override_mode
    }

    pub fn set_env_override_mode(&mut self, mode: EnvOverrideMode) {
        // No change, no need to write to disk.
        if self.env_override_mode == mode {
            return;
        }
        self.store
            .set_int(SETTINGS_SECTION, ENV_OVERRIDE_KEY, mode.index() as i32);
        self.env_override_mode = mode;
    }
}
