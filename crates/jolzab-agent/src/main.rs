use anyhow::{Context, Result};
use jolzab_agent::config::AgentConfig;
use jolzab_agent::forwarder::Forwarder;
use jolzab_agent::poller::Poller;
use jolzab_agent::scheduler::PollScheduler;
use jolzab_config::BridgeConfig;
use jolzab_jolokia::HttpJolokiaClient;
use jolzab_zabbix::ZabbixSender;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("jolzab=info".parse()?))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/agent.toml".to_string());

    let agent = AgentConfig::load(&config_path)
        .with_context(|| format!("loading agent config {config_path}"))?;
    let targets = Arc::new(
        BridgeConfig::load(&agent.targets_file)
            .with_context(|| format!("loading target list {}", agent.targets_file))?,
    );
    let host = agent.reporting_host();

    tracing::info!(
        host = %host,
        targets = targets.keys().len(),
        server = %agent.zabbix_server,
        port = agent.zabbix_port,
        "jolzab-agent starting"
    );

    let client = Arc::new(HttpJolokiaClient::new(agent.request_timeout_secs)?);
    let sink = Arc::new(ZabbixSender::new(
        agent.zabbix_server.clone(),
        agent.zabbix_port,
        agent.request_timeout_secs,
    ));
    let poller = Poller::new(Arc::clone(&targets), client);
    let forwarder = Arc::new(Forwarder::new(Arc::clone(&targets), poller, sink, host));
    let scheduler = PollScheduler::new(&targets, forwarder);

    tokio::select! {
        () = scheduler.run() => {}
        _ = signal::ctrl_c() => {
            tracing::info!("Shutting down gracefully");
        }
    }

    Ok(())
}
