use clap::Parser;
use colored::*;
use std::env;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};
use tracing_subscriber::{
    field::RecordFields,
    fmt::{self, time::ChronoUtc, FormatFields},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use caseworks_server::{create_app, middleware::create_cors_layer, AppState, Args};
use database_layer::{initialize_schema, DatabasePool};
use error_common::{log_error, CaseworksError, Result};
use logger_redacted::{LogFormat, LoggerConfig, RedactingMakeWriter};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real deployments set the environment.
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let use_colors = env::var("NO_COLOR").is_err() && atty::is(atty::Stream::Stdout);
    let logger_config = LoggerConfig::for_environment(&args.environment, use_colors, args.verbose);
    init_tracing(&logger_config)?;

    if let Err(e) = run(args).await {
        log_error("startup", &e);
        return Err(e);
    }
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    info!("🏥 {}", "Starting Caseworks HTTP Server".bright_cyan());
    info!("📋 Version: {}", env!("CARGO_PKG_VERSION").bright_white());
    info!("🌐 Bind address: {}", args.bind_address().bright_yellow());
    info!("🌍 Environment: {}", args.environment.bright_white());

    let identity = args.identity_config();

    let state = if args.in_memory {
        warn!("💾 {}", "Using in-memory stores; data is lost on restart".bright_yellow());
        AppState::in_memory(identity)
    } else {
        info!("🗄️  {}", "Connecting to Postgres...".bright_cyan());
        let db = DatabasePool::new(&args.database_config()).await?;
        initialize_schema(&db).await?;
        info!("✅ {}", "Database ready".bright_green());
        AppState::postgres(db, identity)
    };

    info!(
        signing_secret_configured = state.identity.signing_configured(),
        "🔐 Token signing"
    );

    let cors_origins = args.cors_origins();
    info!(origins = ?cors_origins, "CORS origins");
    let app = create_app(state.clone(), create_cors_layer(&cors_origins));

    let addr = args.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| CaseworksError::NetworkError(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("🚀 {}", format!("Caseworks server running on http://{}", addr).bright_green());
    info!("📋 {}", format!("Health check available at: http://{}/health", addr).bright_blue());

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CaseworksError::ServerError(format!("HTTP server error: {}", e)));

    if let Some(db) = &state.database {
        db.close().await;
    }

    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn init_tracing(config: &LoggerConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_ansi(true)
                        .event_format(ColoredFormatter)
                        .fmt_fields(ColoredFieldFormatter {
                            redact: config.redaction_enabled,
                        }),
                )
                .try_init()
                .map_err(anyhow::Error::from)?;

            print_startup_banner();
        }
        LogFormat::Json => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(false)
                        .json()
                        .with_writer(RedactingMakeWriter::new(
                            std::io::stdout,
                            config.redaction_enabled,
                        )),
                )
                .try_init()
                .map_err(anyhow::Error::from)?;
        }
    }

    Ok(())
}

fn print_startup_banner() {
    println!("{}", "╔══════════════════════════════════════════════════════════════╗".bright_cyan());
    println!("{}", "║                         🏥 CASEWORKS                         ║".bright_cyan());
    println!("{}", "║               Case Management & Member Registry              ║".bright_cyan());
    println!("{}", "╚══════════════════════════════════════════════════════════════╝".bright_cyan());
    println!();
}

// Custom colored formatter for development
struct ColoredFormatter;

impl<S, N> fmt::FormatEvent<S, N> for ColoredFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut writer: fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();

        write!(writer, "{} ", chrono::Utc::now().format("%H:%M:%S%.3f").to_string().bright_black())?;

        let level_str = match *metadata.level() {
            Level::TRACE => "TRACE".bright_purple(),
            Level::DEBUG => "DEBUG".bright_blue(),
            Level::INFO => " INFO".bright_green(),
            Level::WARN => " WARN".bright_yellow(),
            Level::ERROR => "ERROR".bright_red(),
        };
        write!(writer, "[{}] ", level_str)?;

        if let Some(target) = metadata.target().split("::").last() {
            write!(writer, "{:<15} ", target.bright_cyan())?;
        }

        ctx.format_fields(writer.by_ref(), event)?;

        if metadata.level() <= &Level::DEBUG {
            if let (Some(file), Some(line)) = (metadata.file(), metadata.line()) {
                let file_short = file.rsplit('/').next().unwrap_or(file);
                write!(writer, " {}", format!("({}:{})", file_short, line).bright_black())?;
            }
        }

        writeln!(writer)
    }
}

// Field formatter that runs values through the PII redactor
struct ColoredFieldFormatter {
    redact: bool,
}

impl<'a> fmt::FormatFields<'a> for ColoredFieldFormatter {
    fn format_fields<R: RecordFields>(&self, writer: fmt::format::Writer<'a>, fields: R) -> std::fmt::Result {
        let mut visitor = ColoredFieldVisitor {
            writer,
            redact: self.redact,
            is_first: true,
            result: Ok(()),
        };
        fields.record(&mut visitor);
        visitor.result
    }
}

struct ColoredFieldVisitor<'a> {
    writer: fmt::format::Writer<'a>,
    redact: bool,
    is_first: bool,
    result: std::fmt::Result,
}

impl<'a> ColoredFieldVisitor<'a> {
    fn write_field(&mut self, name: &str, value: String) {
        if self.result.is_err() {
            return;
        }
        let value = if self.redact {
            logger_redacted::redact(&value)
        } else {
            value
        };

        self.result = if name == "message" {
            write!(self.writer, "{}", value.white().bold())
        } else {
            write!(
                self.writer,
                "{}{}={}",
                if self.is_first { "" } else { " " },
                name.bright_yellow(),
                value.bright_white()
            )
        };
        self.is_first = false;
    }
}

impl<'a> tracing::field::Visit for ColoredFieldVisitor<'a> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.write_field(field.name(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.write_field(field.name(), value.to_string());
    }
}
