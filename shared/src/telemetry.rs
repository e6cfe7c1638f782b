use crate::error::InitializationError;
use crate::{LogFormat, TelemetryConfig};
use opentelemetry::global;
use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::{LogExporterBuilder, MetricExporterBuilder, WithTonicConfig};
use opentelemetry_resource_detectors::ProcessResourceDetector;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::resource::{
    EnvResourceDetector, ResourceDetector, SdkProvidedResourceDetector,
};
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, registry};

/// Handles to the OTLP providers, if any were started. Call [`Telemetry::shutdown`] before exiting
/// so batched spans and logs are flushed.
#[derive(Default)]
pub struct Telemetry {
    providers: Option<OtlpProviders>,
}

struct OtlpProviders {
    tracer: SdkTracerProvider,
    meter: SdkMeterProvider,
    logger: SdkLoggerProvider,
}

impl Telemetry {
    pub fn shutdown(self) {
        let Some(providers) = self.providers else {
            return;
        };
        if let Err(e) = providers.tracer.shutdown() {
            eprintln!("failed to shut down tracer provider: {e:?}");
        }
        if let Err(e) = providers.meter.shutdown() {
            eprintln!("failed to shut down meter provider: {e:?}");
        }
        if let Err(e) = providers.logger.shutdown() {
            eprintln!("failed to shut down logger provider: {e:?}");
        }
    }
}

/// Installs the global subscriber: `RUST_LOG` filtering (default `info`), a compact or JSON console
/// formatter and, when enabled, the OTLP exporters. The exporters read the standard
/// `OTEL_SERVICE_NAME` / `OTEL_EXPORTER_OTLP_*` variables.
pub fn init_tracing(
    name: impl ToString,
    config: &TelemetryConfig,
) -> Result<Telemetry, InitializationError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = config.format == LogFormat::Json;
    let compact_layer = (!json).then(|| {
        Layer::new()
            .compact()
            .with_file(true)
            .with_line_number(true)
    });
    let json_layer = json.then(|| Layer::new().json());

    if !config.otlp {
        registry()
            .with(env_filter)
            .with(compact_layer)
            .with(json_layer)
            .try_init()?;
        return Ok(Telemetry::default());
    }

    let detectors: Vec<Box<dyn ResourceDetector>> = vec![
        Box::new(SdkProvidedResourceDetector),
        Box::new(EnvResourceDetector::new()),
        Box::new(ProcessResourceDetector),
    ];
    let resource = Resource::builder().with_detectors(&detectors).build();

    // tracing_opentelemetry setup for spans
    let span_exporter = opentelemetry_otlp::SpanExporterBuilder::default()
        .with_tonic()
        .with_tls_config(tonic::transport::ClientTlsConfig::new().with_native_roots())
        .build()?;

    let tracer_provider = SdkTracerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(span_exporter)
        .build();
    let tracer = tracer_provider.tracer(name.to_string());
    global::set_tracer_provider(tracer_provider.clone());

    let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    // opentelemetry_appender_tracing setup for logs
    let log_exporter = LogExporterBuilder::default()
        .with_tonic()
        .with_tls_config(tonic::transport::ClientTlsConfig::new().with_native_roots())
        .build()?;

    let logger_provider = SdkLoggerProvider::builder()
        .with_resource(resource.clone())
        .with_batch_exporter(log_exporter)
        .build();

    let otel_log_layer = OpenTelemetryTracingBridge::new(&logger_provider);

    let meter_exporter = MetricExporterBuilder::new()
        .with_tonic()
        .with_tls_config(tonic::transport::ClientTlsConfig::new().with_native_roots())
        .build()?;

    let meter_provider = SdkMeterProvider::builder()
        .with_resource(resource)
        .with_periodic_exporter(meter_exporter)
        .build();
    global::set_meter_provider(meter_provider.clone());

    registry()
        .with(env_filter)
        .with(compact_layer)
        .with(json_layer)
        .with(otel_log_layer)
        .with(telemetry_layer)
        .try_init()?;

    Ok(Telemetry {
        providers: Some(OtlpProviders {
            tracer: tracer_provider,
            meter: meter_provider,
            logger: logger_provider,
        }),
    })
}
