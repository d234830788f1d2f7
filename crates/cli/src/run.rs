use crate::apply::{self, ArchiveSummary, ArchiveView};
use crate::error::RunError;
use crate::report;
use archiver_core::config::AppConfig;
use archiver_core::envelope;
use archiver_core::selector::{self, Selection};
use providers::moonraker::{MoonrakerClient, MoonrakerConfig};
use providers::MetadataSource;
use std::io::Write;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub verbose: bool,
    pub json: bool,
}

#[derive(Debug)]
pub struct RunReport {
    pub selection: Selection,
    pub archived: Vec<ArchiveView>,
    pub dry_run: bool,
}

impl RunReport {
    pub fn summary(&self) -> ArchiveSummary {
        ArchiveSummary::from_views(&self.archived)
    }
}

pub fn build_source(cfg: &AppConfig) -> Result<MoonrakerClient, RunError> {
    cfg.validate()?;
    let timeout = cfg.timeout()?;
    let client = MoonrakerClient::new(MoonrakerConfig {
        host: cfg.server.host.clone(),
        port: cfg.server.port,
        endpoint: cfg.server.endpoint.clone(),
        timeout,
    })?;
    Ok(client)
}

/// Fetch, select and archive. Nothing on disk is touched unless the fetch and
/// unwrap both succeed.
pub async fn run(
    cfg: &AppConfig,
    source: &dyn MetadataSource,
    opts: RunOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<RunReport, RunError> {
    info!(source = %source.describe(), "fetching gcode metadata");
    let payload = source.fetch().await?;
    let records = envelope::records_from_payload(payload)?;
    debug!(files = records.len(), "decoded metadata index");

    let selection = selector::select_keep_and_archive(&records, cfg.retention.keep);
    info!(
        keep = selection.keep.len(),
        archive = selection.archive.len(),
        "selection complete"
    );

    if opts.verbose && !opts.json {
        report::write_selection(out, &selection)?;
    }

    let gcode_dir = cfg.gcode_dir();
    let archive_dir = cfg.archive_dir();
    let dry_run = cfg.safety.dry_run;
    let archived = apply::archive_files(
        &selection.archive,
        &gcode_dir,
        &archive_dir,
        dry_run,
        cfg.safety.conflict,
    );

    if opts.json {
        let value = report::json_report(&selection, &archived, dry_run);
        writeln!(
            out,
            "{}",
            serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?
        )?;
        report::write_failures(err, &archived)?;
    } else {
        report::write_archive(out, err, &archived, dry_run, opts.verbose, &archive_dir)?;
    }

    Ok(RunReport {
        selection,
        archived,
        dry_run,
    })
}
