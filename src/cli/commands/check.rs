//! `appconf check`: build a document and report every entry.

use anyhow::{bail, Result};
use serde::Serialize;
use std::path::Path;

use crate::cli::output::{list_table, output, render_list, status_label, CommandOutput};
use crate::domain::models::{ConfigDocument, EntryKind, EntryRef};
use crate::infrastructure::config::Settings;
use crate::services::{ConfigBuilder, Initializers};

#[derive(Debug, Serialize)]
pub struct EntryRow {
    pub kind: EntryKind,
    pub name: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EntryRow {
    pub fn from_entry(entry: EntryRef<'_>) -> Self {
        let (status, error) = match entry {
            EntryRef::Database(db) => (
                db.pool().label(),
                db.pool().error().map(|e| e.source.to_string()),
            ),
            EntryRef::Service(svc) => (
                svc.client().label(),
                svc.client().error().map(|e| e.source.to_string()),
            ),
            EntryRef::Crawler(crawler) => (
                crawler.collector().label(),
                crawler.collector().error().map(|e| e.source.to_string()),
            ),
        };
        Self {
            kind: entry.kind(),
            name: entry.name().to_string(),
            status,
            error,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub app_name: String,
    pub env: String,
    pub hash: String,
    pub entries: Vec<EntryRow>,
    pub errors: Vec<String>,
}

impl CheckOutput {
    pub fn new(document: &ConfigDocument, errors: Vec<String>) -> Self {
        Self {
            app_name: document.app_name.clone(),
            env: document.env.clone(),
            hash: document.hash.to_string(),
            entries: document.entries().into_iter().map(EntryRow::from_entry).collect(),
            errors,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["kind", "name", "status", "error"]);
        for row in &self.entries {
            table.add_row(vec![
                row.kind.to_string(),
                row.name.clone(),
                status_label(row.status),
                row.error.clone().unwrap_or_default(),
            ]);
        }

        let mut lines = vec![
            format!("app: {} ({})", self.app_name, self.env),
            format!("hash: {}", self.hash),
            render_list("entry", "entries", &table, self.entries.len()),
        ];
        if !self.errors.is_empty() {
            lines.push(format!("{} error(s):", self.errors.len()));
            lines.extend(self.errors.iter().map(|e| format!("  - {e}")));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(path: &Path, settings: &Settings, json_mode: bool) -> Result<()> {
    let builder = ConfigBuilder::new(Initializers::production(&settings.database));
    let outcome = builder.build_from_path(path).await?;

    let errors: Vec<String> = outcome.errors.iter().map(ToString::to_string).collect();
    let result = CheckOutput::new(&outcome.document, errors);
    output(&result, json_mode);

    if !result.is_clean() {
        bail!("config built with {} error(s)", result.errors.len());
    }
    Ok(())
}
