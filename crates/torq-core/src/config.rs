use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/torq/config.toml`.
///
/// There is no implicit global state; the loaded value is passed into the
/// scheduler, manager, and daemon constructors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TorqConfig {
    /// Maximum number of torrents transferring at once (admission ceiling).
    pub max_active: usize,
    /// Global seed ratio target: 0 = never seed, -1 = seed without limit,
    /// any positive value seeds until uploaded/downloaded reaches it.
    pub seed_ratio: f64,
    /// Directory the engine downloads into.
    pub download_dir: PathBuf,
    /// Optional download rate cap in KB/s (None = uncapped). Passed to the
    /// engine backend; the simulated backend ignores it.
    pub max_download_kbps: Option<u64>,
    /// Optional upload rate cap in KB/s (None = uncapped).
    pub max_upload_kbps: Option<u64>,
    /// Listening port reserved for a client transport layer.
    pub listen_port: u16,
    /// Queue admission poll interval in milliseconds.
    pub queue_poll_ms: u64,
    /// Lifecycle worker tick interval in milliseconds.
    pub progress_tick_ms: u64,
    /// Deadline for the engine's metadata-ready wait, in seconds.
    pub metadata_timeout_secs: u64,
}

impl Default for TorqConfig {
    fn default() -> Self {
        Self {
            max_active: 1,
            seed_ratio: 1.0,
            download_dir: PathBuf::from("./downloads"),
            max_download_kbps: None,
            max_upload_kbps: None,
            listen_port: 6500,
            queue_poll_ms: 500,
            progress_tick_ms: 1000,
            metadata_timeout_secs: 120,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("torq")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TorqConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TorqConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: TorqConfig = toml::from_str(&data)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = TorqConfig::default();
        assert_eq!(cfg.max_active, 1);
        assert!((cfg.seed_ratio - 1.0).abs() < 1e-9);
        assert_eq!(cfg.queue_poll_ms, 500);
        assert_eq!(cfg.progress_tick_ms, 1000);
        assert_eq!(cfg.metadata_timeout_secs, 120);
        assert!(cfg.max_download_kbps.is_none());
        assert!(cfg.max_upload_kbps.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = TorqConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: TorqConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.max_active, cfg.max_active);
        assert_eq!(parsed.download_dir, cfg.download_dir);
        assert_eq!(parsed.listen_port, cfg.listen_port);
        assert_eq!(parsed.queue_poll_ms, cfg.queue_poll_ms);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            max_active = 4
            seed_ratio = -1.0
            download_dir = "/srv/torrents"
            max_download_kbps = 2048
        "#;
        let cfg: TorqConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.max_active, 4);
        assert!((cfg.seed_ratio + 1.0).abs() < 1e-9);
        assert_eq!(cfg.download_dir, PathBuf::from("/srv/torrents"));
        assert_eq!(cfg.max_download_kbps, Some(2048));
        // Missing fields fall back to defaults.
        assert_eq!(cfg.progress_tick_ms, 1000);
        assert_eq!(cfg.listen_port, 6500);
    }
}
