use clap::ArgMatches;
use clap::parser::ValueSource;
use tracing::{error, info};

use tally_core::config::value::expand_tilde;
use tally_core::config::{
    EnvSource, FsConfigLoader, Invocation, RawValue, SettingName, resolve,
};
use tally_core::delivery::{self, DeliveryError};
use tally_core::errors::TallyResult;
use tally_core::logsum::{self, LOGSUM_SCHEMA, LogsumReport, LogsumSetting, LogsumSettings};
use tally_core::{LoggingHandle, events};

pub fn run_command(
    matches: &ArgMatches,
    tokens: Vec<String>,
    logging: &LoggingHandle,
) -> TallyResult<()> {
    events::log_app_startup("logsum");

    let invocation = Invocation::from_parsed(&LOGSUM_SCHEMA, tokens, |name| {
        typed_value(matches, name)
    })?;
    let env_file = matches
        .get_one::<String>("env-file")
        .map(|raw| expand_tilde(raw));
    let env = EnvSource::with_env_file(env_file.as_deref());

    let record = resolve(&LOGSUM_SCHEMA, &invocation, &env, &FsConfigLoader)?;
    let settings = LogsumSettings::try_from(&record)?;
    logging.set_verbose(settings.verbose);

    let report = logsum::summarize_log(&settings)?;

    if settings.json {
        println!("{}", delivery::render_json(&report)?);
    }
    let delivered = deliver(&settings, &report);
    if !settings.json {
        print!("{}", report.render_text());
    }
    delivered?;

    events::log_app_shutdown("logsum");
    Ok(())
}

fn typed_value(matches: &ArgMatches, name: LogsumSetting) -> Option<RawValue> {
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

fn deliver(settings: &LogsumSettings, report: &LogsumReport) -> Result<(), DeliveryError> {
    if let Some(out) = &settings.out {
        delivery::write_json_file(out, report).inspect_err(|e| {
            error!(
                event = "cli.logsum.write_failed",
                path = %out.display(),
                error = %e
            );
        })?;
    }
    if let Some(url) = &settings.post {
        let status = delivery::post_json(url, report, settings.timeout).inspect_err(|e| {
            error!(event = "cli.logsum.post_failed", url = url.as_str(), error = %e);
        })?;
        info!(event = "cli.logsum.post_completed", url = url.as_str(), status = status);
    }
    Ok(())
}
