use std::fs;

use serde::Deserialize;

#[derive(Debug)]
pub struct Settings {
    pub bind_addr: String,
    pub initial_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8090".into(),
            initial_size: 4,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    initial_size: Option<usize>,
}

/// Defaults, overlaid by `control.toml` if present, overlaid by env vars.
/// A malformed file is ignored rather than fatal; env always wins.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("control.toml") {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            if let Some(v) = file_cfg.bind_addr {
                settings.bind_addr = v;
            }
            if let Some(v) = file_cfg.initial_size {
                settings.initial_size = v;
            }
        }
    }

    if let Ok(v) = std::env::var("CONTROL_BIND") {
        settings.bind_addr = v;
    }
    if let Ok(v) = std::env::var("CONTROL_INITIAL_SIZE") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.initial_size = parsed;
        }
    }

    settings
}
