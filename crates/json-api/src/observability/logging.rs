//! Logging subscriber initialisation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    match config.logging.log_format {
        LogFormat::Compact => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
            tracer_provider,
        ),
        LogFormat::Json => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true),
            tracer_provider,
        ),
    }
}

/// Crates that log at the configured level.
const AGORA_TARGETS: &[&str] = &["agora_json", "agora_app"];

/// Dependencies kept at `warn` unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: &[&str] = &["sqlx", "h2", "hyper", "tower", "tonic", "opentelemetry"];

fn build_env_filter(config: &ServerConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.logging.log_level)))
}

/// Directives used when `RUST_LOG` is unset.
///
/// Verbose levels only apply to the agora crates. Everything else stays at
/// `info` so a `debug` run is not drowned in dependency output.
fn default_directives(level: &str) -> String {
    let level = level.trim();

    let dependency_level = match level.to_ascii_lowercase().as_str() {
        "trace" | "debug" => "info",
        _ => level,
    };

    let agora = AGORA_TARGETS.iter().map(|target| format!("{target}={level}"));

    let quiet = QUIET_TARGETS.iter().map(|target| format!("{target}=warn"));

    std::iter::once(dependency_level.to_string())
        .chain(agora)
        .chain(quiet)
        .collect::<Vec<_>>()
        .join(",")
}

fn init_with_layer<L>(
    config: &ServerConfig,
    fmt_layer: L,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_env_filter(config));

    if let Some(tracer_provider) = tracer_provider {
        let tracer = tracer_provider.tracer(config.observability.otel_service_name.clone());

        subscriber
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_level_is_scoped_to_agora_crates() {
        assert_eq!(
            default_directives("debug"),
            "info,agora_json=debug,agora_app=debug,sqlx=warn,h2=warn,hyper=warn,tower=warn,\
             tonic=warn,opentelemetry=warn"
        );
    }

    #[test]
    fn quieter_levels_apply_everywhere() {
        let directives = default_directives(" warn ");

        assert!(
            directives.starts_with("warn,agora_json=warn,agora_app=warn,"),
            "unexpected directives: {directives}"
        );
    }

    #[test]
    fn default_directives_parse() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            let directives = default_directives(level);

            assert!(
                EnvFilter::try_new(&directives).is_ok(),
                "{directives} should parse"
            );
        }
    }
}
