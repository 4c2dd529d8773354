use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use gridscroll_core::replay::{self, Record, Script};
use gridscroll_core::{AppConfig, EventKind};

pub fn run(config: &AppConfig, path: &Path, lifecycle_only: bool) -> Result<()> {
    let script = Script::load(path)
        .with_context(|| format!("failed to load replay script {}", path.display()))?;
    let records = replay::run(&script, config.scroll.clone())?;

    let mut printed = 0;
    for record in select(&records, lifecycle_only) {
        println!("{}", serde_json::to_string(record)?);
        printed += 1;
    }

    info!(steps = script.steps.len(), printed, "replay finished");
    Ok(())
}

fn select(records: &[Record], lifecycle_only: bool) -> impl Iterator<Item = &Record> {
    records.iter().filter(move |r| {
        !lifecycle_only || !matches!(r.event.kind, EventKind::Translate | EventKind::Scroll)
    })
}
