use clap::ArgMatches;
use clap::parser::ValueSource;
use std::path::Path;
use tracing::{error, info};

use tally_core::config::value::expand_tilde;
use tally_core::config::{
    EnvSource, FsConfigLoader, Invocation, RawValue, SettingName, resolve,
};
use tally_core::delivery::{self, DeliveryError};
use tally_core::dirscan::{self, DIRSCAN_SCHEMA, DirscanReport, DirscanSetting, DirscanSettings};
use tally_core::errors::TallyResult;
use tally_core::{LoggingHandle, events};

pub fn run_command(
    matches: &ArgMatches,
    tokens: Vec<String>,
    logging: &LoggingHandle,
) -> TallyResult<()> {
    events::log_app_startup("dirscan");

    let invocation = Invocation::from_parsed(&DIRSCAN_SCHEMA, tokens, |name| {
        typed_value(matches, name)
    })?;
    let env_file = matches
        .get_one::<String>("env-file")
        .map(|raw| expand_tilde(raw));
    let env = EnvSource::with_env_file(env_file.as_deref());

    let record = resolve(&DIRSCAN_SCHEMA, &invocation, &env, &FsConfigLoader)?;
    let settings = DirscanSettings::try_from(&record)?;
    logging.set_verbose(settings.verbose);

    let report = dirscan::scan_directory(&settings);

    if settings.json {
        println!("{}", delivery::render_json(&report)?);
    }
    let delivered = deliver(&settings, &report);
    if !settings.json {
        print!("{}", report.render_text(settings.human, settings.relative));
    }
    delivered?;

    events::log_app_shutdown("dirscan");
    Ok(())
}

/// Raw value of a setting, only if it was typed on the command line.
fn typed_value(matches: &ArgMatches, name: DirscanSetting) -> Option<RawValue> {
    let id = name.key().replace('_', "-");
    if matches.value_source(&id) != Some(ValueSource::CommandLine) {
        return None;
    }
    if let Ok(Some(text)) = matches.try_get_one::<String>(&id) {
        return Some(RawValue::from(text.as_str()));
    }
    matches
        .try_get_one::<bool>(&id)
        .ok()
        .flatten()
        .map(|flag| RawValue::Bool(*flag))
}

/// Write `--out`, then send `--post`. Stops at the first failure.
fn deliver(settings: &DirscanSettings, report: &DirscanReport) -> Result<(), DeliveryError> {
    if let Some(out) = &settings.out {
        write_out(out, report)?;
    }
    if let Some(url) = &settings.post {
        let status = delivery::post_json(url, report, settings.timeout).inspect_err(|e| {
            error!(event = "cli.dirscan.post_failed", url = url.as_str(), error = %e);
        })?;
        info!(event = "cli.dirscan.post_completed", url = url.as_str(), status = status);
    }
    Ok(())
}

fn write_out(out: &Path, report: &DirscanReport) -> Result<(), DeliveryError> {
    delivery::write_json_file(out, report).inspect_err(|e| {
        error!(
            event = "cli.dirscan.write_failed",
            path = %out.display(),
            error = %e
        );
    })
}
