use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: String,
    #[serde(default = "default_export_file")]
    pub export_file: String,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

fn default_data_file() -> String { "data/records.json".into() }
fn default_export_file() -> String { "data/records.csv".into() }
fn default_frontend_dir() -> String { "frontend".into() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            export_file: default_export_file(),
            frontend_dir: default_frontend_dir(),
        }
    }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if readable, otherwise defaults; env vars override both.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Override fields from `SERVER_HOST`, `SERVER_PORT`, `TOKIO_WORKER_THREADS`,
    /// `DATA_FILE`, `EXPORT_FILE`, `FRONTEND_DIR`.
    pub fn apply_env<F: Fn(&str) -> Option<String>>(&mut self, get: F) {
        if let Some(host) = get("SERVER_HOST") { self.server.host = host; }
        if let Some(port) = get("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = get("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(p) = get("DATA_FILE") { self.storage.data_file = p; }
        if let Some(p) = get("EXPORT_FILE") { self.storage.export_file = p; }
        if let Some(p) = get("FRONTEND_DIR") { self.storage.frontend_dir = p; }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(anyhow!("storage.data_file is empty"));
        }
        if self.export_file.trim().is_empty() {
            return Err(anyhow!("storage.export_file is empty"));
        }
        if self.data_file == self.export_file {
            return Err(anyhow!("storage.export_file must differ from storage.data_file"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_file_uses_defaults() {
        let mut cfg = parse("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.storage.data_file, "data/records.json");
        assert_eq!(cfg.storage.export_file, "data/records.csv");
    }

    #[test]
    fn partial_storage_section_keeps_other_defaults() {
        let cfg = parse("[storage]\ndata_file = \"/tmp/people.json\"\n").unwrap();
        assert_eq!(cfg.storage.data_file, "/tmp/people.json");
        assert_eq!(cfg.storage.frontend_dir, "frontend");
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> =
            [("SERVER_PORT", "9000"), ("EXPORT_FILE", "out/people.csv"), ("TOKIO_WORKER_THREADS", "x")].into();
        let mut cfg = AppConfig::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.storage.export_file, "out/people.csv");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut cfg = parse("[server]\nhost = \"\"\nport = 0\n").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.storage.export_file = cfg.storage.data_file.clone();
        assert!(cfg.normalize_and_validate().is_err());
    }

    #[test]
    fn blank_host_and_zero_threads_are_normalized() {
        let mut cfg = parse("[server]\nhost = \" \"\nport = 8081\nworker_threads = 0\n").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.worker_threads, Some(4));
    }
}
