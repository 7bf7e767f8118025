use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use blogmetrics::filter::{parse_filter, translate};
use blogmetrics::{
    load_filters, parser, AggregationRow, Analytics, AnalyticsConfig, AnalyticsError,
    BlogViewsRequest, LogFormat, LoggingConfig, PerformanceRequest, TopRequest,
};

#[derive(Parser)]
#[command(name = "blogmetrics", about = "Blog view analytics")]
struct Cli {
    /// Dataset YAML file
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Configuration YAML file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Evaluate range windows as of this RFC 3339 instant instead of now
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Views grouped by country or user
    BlogViews {
        #[arg(long)]
        object_type: Option<String>,
        #[arg(long)]
        range: Option<String>,
        /// JSON filter tree
        #[arg(long)]
        filters: Option<String>,
    },
    /// Top ten users, countries or blogs by views
    Top {
        #[arg(long)]
        top: Option<String>,
        #[arg(long)]
        range: Option<String>,
        #[arg(long)]
        filters: Option<String>,
    },
    /// Views per period with growth
    Performance {
        #[arg(long)]
        compare: Option<String>,
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        filters: Option<String>,
    },
    /// Check a filter tree without running a query
    Validate {
        #[arg(long)]
        filters: Option<String>,
    },
}

fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let directives = config.directives();
        EnvFilter::try_new(&directives)
            .map_err(|e| anyhow::anyhow!("invalid log filter '{directives}': {e}"))?
    };

    let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);
    match config.format {
        LogFormat::Json => builder.json().with_target(false).init(),
        LogFormat::Plain => builder.init(),
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn validate(filters: Option<&str>) -> Result<(), AnalyticsError> {
    if let Some(tree) = load_filters(filters)? {
        let predicate = parse_filter(&tree).map_err(blogmetrics::FilterError::from)?;
        translate(&predicate).map_err(blogmetrics::FilterError::from)?;
    }
    Ok(())
}

fn run(cli: Cli, config: AnalyticsConfig) -> Result<Result<Vec<AggregationRow>, AnalyticsError>> {
    if let Commands::Validate { filters } = &cli.command {
        return Ok(validate(filters.as_deref()).map(|()| Vec::new()));
    }

    let data = cli.data.context("--data is required for this command")?;
    let dataset = parser::parse_file(&data)
        .with_context(|| format!("loading dataset '{}'", data.display()))?;
    tracing::info!(
        path = %data.display(),
        views = dataset.view_rows().len(),
        blogs = dataset.blogs().len(),
        "dataset loaded"
    );

    let mut analytics = Analytics::new(&dataset, config);
    if let Some(now) = cli.now {
        analytics = analytics.at(now);
    }

    Ok(match cli.command {
        Commands::BlogViews { object_type, range, filters } => analytics.blog_views(&BlogViewsRequest {
            object_type,
            range,
            filters,
        }),
        Commands::Top { top, range, filters } => analytics.top(&TopRequest { top, range, filters }),
        Commands::Performance { compare, user_id, filters } => {
            analytics.performance(&PerformanceRequest {
                compare,
                user_id,
                filters,
            })
        }
        Commands::Validate { .. } => Ok(Vec::new()),
    })
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalyticsConfig::from_file(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => AnalyticsConfig::default(),
    };
    init_tracing(&config.logging)?;

    let is_validate = matches!(cli.command, Commands::Validate { .. });
    match run(cli, config)? {
        Ok(_) if is_validate => {
            print_json(&serde_json::json!({"valid": true}))?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(rows) => {
            print_json(&rows)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            if !err.is_client_error() {
                tracing::error!(error = %err, "request failed");
            }
            print_json(&serde_json::json!({"error": err.public_message()}))?;
            Ok(ExitCode::from(if err.is_client_error() { 2 } else { 1 }))
        }
    }
}
