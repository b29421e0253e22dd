//! `appconf show`: look up one entry of a built document.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::cli::output::{output, status_label, CommandOutput};
use crate::domain::models::{ClientConfig, EntryKind, EntryRef};
use crate::infrastructure::config::Settings;
use crate::services::{ConfigBuilder, Initializers};

use super::check::EntryRow;

/// Merged client settings as written, before zero-value resolution
#[derive(Debug, Serialize)]
pub struct ClientSummary {
    pub timeout: String,
    pub idle_conn_timeout: String,
    pub max_idle_conns_per_host: String,
    pub max_conns_per_host: String,
    pub disable_compression: String,
    pub insecure_skip_verify: String,
}

impl From<&ClientConfig> for ClientSummary {
    fn from(cc: &ClientConfig) -> Self {
        Self {
            timeout: cc.timeout.to_string(),
            idle_conn_timeout: cc.idle_conn_timeout.to_string(),
            max_idle_conns_per_host: cc.max_idle_conns_per_host.to_string(),
            max_conns_per_host: cc.max_conns_per_host.to_string(),
            disable_compression: cc.disable_compression.to_string(),
            insecure_skip_verify: cc.insecure_skip_verify.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    #[serde(flatten)]
    pub entry: EntryRow,
    /// Service URL, database server or crawler user agent
    pub target: String,
    pub client: ClientSummary,
}

impl ShowOutput {
    pub fn from_entry(entry: EntryRef<'_>) -> Self {
        let (target, merged) = match entry {
            EntryRef::Database(db) => (db.server.clone(), db.merged_components()),
            EntryRef::Service(svc) => (svc.url.clone(), svc.merged_components()),
            EntryRef::Crawler(crawler) => (crawler.user_agent.clone(), crawler.merged_components()),
        };
        Self {
            entry: EntryRow::from_entry(entry),
            target,
            client: ClientSummary::from(&merged.client),
        }
    }
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("{} {}", self.entry.kind, self.entry.name),
            format!("  status:               {}", status_label(self.entry.status)),
        ];
        if let Some(ref error) = self.entry.error {
            lines.push(format!("  error:                {error}"));
        }
        if !self.target.is_empty() {
            lines.push(format!("  target:               {}", self.target));
        }
        lines.push("  client:".to_string());
        lines.push(format!("    Timeout:             {}", self.client.timeout));
        lines.push(format!("    IdleConnTimeout:     {}", self.client.idle_conn_timeout));
        lines.push(format!("    MaxIdleConnsPerHost: {}", self.client.max_idle_conns_per_host));
        lines.push(format!("    MaxConnsPerHost:     {}", self.client.max_conns_per_host));
        lines.push(format!("    DisableCompression:  {}", self.client.disable_compression));
        lines.push(format!("    InsecureSkipVerify:  {}", self.client.insecure_skip_verify));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(
    path: &Path,
    kind: EntryKind,
    name: &str,
    settings: &Settings,
    json_mode: bool,
) -> Result<()> {
    let builder = ConfigBuilder::new(Initializers::production(&settings.database));
    let outcome = builder.build_from_path(path).await?;

    let entry = outcome.document.lookup(kind, name)?;
    output(&ShowOutput::from_entry(entry), json_mode);
    Ok(())
}
