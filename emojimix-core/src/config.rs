use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::generator::{MixGenerator, DEFAULT_PALETTE, MAX_SYMBOLS_PER_MIX};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    store: StoreConfig,
    #[serde(default)]
    generator: GeneratorConfig,
}

#[derive(Deserialize, Default)]
struct StoreConfig {
    path: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
struct GeneratorConfig {
    symbols_per_mix: Option<usize>,
    palette: Option<Vec<String>>,
    seed: Option<u64>,
}

pub struct Config {
    store: StoreConfig,
    generator: GeneratorConfig,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    pub fn load() -> Self {
        Self::load_with_override(user_config_path().as_deref())
    }

    /// Embedded defaults merged with the file at `path`. A missing, unreadable or
    /// malformed file leaves the defaults untouched.
    pub fn load_with_override(path: Option<&Path>) -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = path {
            if path.exists() {
                match std::fs::read_to_string(path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => {
                            merge_store(&mut base.store, user.store);
                            merge_generator(&mut base.generator, user.generator);
                        }
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            store: base.store,
            generator: base.generator,
        }
    }

    /// Database file, falling back to `<data dir>/emojimix/mixes.sqlite`.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.store.path {
            return path.clone();
        }
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("emojimix")
            .join("mixes.sqlite")
    }

    /// Symbols drawn per mix (clamped to 1..=3).
    pub fn symbols_per_mix(&self) -> usize {
        self.generator
            .symbols_per_mix
            .unwrap_or(MAX_SYMBOLS_PER_MIX)
            .clamp(1, MAX_SYMBOLS_PER_MIX)
    }

    pub fn palette(&self) -> Vec<String> {
        match &self.generator.palette {
            Some(palette) if !palette.is_empty() => palette.clone(),
            Some(_) => {
                log::warn!(target: "config", "empty generator palette, using the default one");
                default_palette()
            }
            None => default_palette(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.generator.seed
    }

    /// Build a generator from the configured palette, count and seed.
    pub fn generator(&self) -> MixGenerator {
        let generator = match self.seed() {
            Some(seed) => MixGenerator::with_seed(self.palette(), seed),
            None => MixGenerator::new(self.palette()),
        };
        generator.with_symbols_per_mix(self.symbols_per_mix())
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("emojimix").join("config.toml"))
}

fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect()
}

fn merge_store(base: &mut StoreConfig, user: StoreConfig) {
    if user.path.is_some() {
        base.path = user.path;
    }
}

fn merge_generator(base: &mut GeneratorConfig, user: GeneratorConfig) {
    if user.symbols_per_mix.is_some() {
        base.symbols_per_mix = user.symbols_per_mix;
    }
    if user.palette.is_some() {
        base.palette = user.palette;
    }
    if user.seed.is_some() {
        base.seed = user.seed;
    }
}
