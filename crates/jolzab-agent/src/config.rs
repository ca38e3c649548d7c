use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    /// Path to the YAML target list.
    pub targets_file: String,
    pub zabbix_server: String,
    #[serde(default = "default_zabbix_port")]
    pub zabbix_port: u16,
    /// Reporting host as registered on the Zabbix server; defaults to
    /// this machine's hostname.
    pub host: Option<String>,
    /// Applied to both the Jolokia HTTP calls and the Zabbix TCP
    /// round trip.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_zabbix_port() -> u16 {
    10051
}

fn default_request_timeout() -> u64 {
    10
}

impl AgentConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Host identity attached to every forwarded metric.
    pub fn reporting_host(&self) -> String {
        self.host
            .clone()
            .or_else(sysinfo::System::host_name)
            .unwrap_or_else(|| "unknown".to_string())
    }
}
