use std::{path::PathBuf, time::Duration};

use anyhow::Context;
use case_document::PdfRenderer;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use case_forge::{
    openai::OpenAIClient,
    server,
    tracing::init_tracing_subscriber,
    types::VideoRequest,
    yt::{oembed::OEmbedClient, transcript::TimedTextClient},
    CaseStudyPipeline, CaseStudyPipelineBuilder, Config,
};

#[derive(Parser)]
#[command(
    name = "case-forge",
    about = "Turns a YouTube ad into an advertising case study PDF"
)]
struct Cli {
    /// OpenAI API key, requests fail at generation when unset
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_key: Option<String>,

    #[arg(long, env = "OPENAI_MODEL", default_value = Config::DEFAULT_OPENAI_MODEL)]
    openai_model: String,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = Config::DEFAULT_OPENAI_BASE_URL)]
    openai_base_url: String,

    #[arg(long, env = "OEMBED_URL", default_value = Config::DEFAULT_OEMBED_URL)]
    oembed_url: String,

    #[arg(long, env = "TRANSCRIPT_API_URL", default_value = Config::DEFAULT_TRANSCRIPT_API_URL)]
    transcript_api_url: String,

    /// Caption language requested from the transcript endpoint
    #[arg(long, env = "TRANSCRIPT_LANG", default_value = Config::DEFAULT_TRANSCRIPT_LANG)]
    transcript_lang: String,

    /// Timeout for each outbound call, in seconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_SECS", default_value = "60")]
    upstream_timeout_secs: u64,

    /// Deadline for a whole /generate request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "300")]
    request_timeout_secs: u64,

    /// Where the render command writes its PDF
    #[arg(long, env = "OUT_DIR", default_value = Config::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value = "8080")]
    port: u16,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP service (default)
    Serve,
    /// Generate a single case study and write it to OUT_DIR
    Render {
        /// YouTube video URL
        url: String,

        /// Read the transcript from a file instead of fetching it
        #[arg(long)]
        transcript_file: Option<PathBuf>,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            openai_api_key: self
                .openai_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            openai_model: self.openai_model.clone(),
            openai_base_url: self.openai_base_url.clone(),
            oembed_url: self.oembed_url.clone(),
            transcript_api_url: self.transcript_api_url.clone(),
            transcript_lang: self.transcript_lang.clone(),
            upstream_timeout: Duration::from_secs(self.upstream_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            out_dir: self.out_dir.clone(),
        }
    }
}

type LivePipeline = CaseStudyPipeline<OEmbedClient, TimedTextClient, OpenAIClient, PdfRenderer>;

fn build_pipeline(config: &Config) -> anyhow::Result<LivePipeline> {
    let client = config
        .http_client()
        .context("Failed to build HTTP client")?;

    let pipeline = CaseStudyPipelineBuilder::new()
        .metadata_fetcher(OEmbedClient::from_config(config, client.clone()))
        .transcript_source(TimedTextClient::from_config(config, client.clone()))
        .generator(OpenAIClient::from_config(config, client))
        .renderer(PdfRenderer)
        .build();

    Ok(pipeline)
}

async fn serve(config: Config, host: &str, port: u16) -> anyhow::Result<()> {
    let pipeline = build_pipeline(&config)?;
    let app = server::router(pipeline, config.request_timeout);

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))?;
    let addr = listener.local_addr()?;

    tracing::info!(
        %addr,
        model = %config.openai_model,
        api_key_configured = config.openai_api_key.is_some(),
        "Listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn render(config: Config, url: String, transcript_file: Option<PathBuf>) -> anyhow::Result<()> {
    let mut request = VideoRequest::new(url);
    if let Some(path) = transcript_file {
        let transcript = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read transcript from {}", path.display()))?;
        request = request.with_transcript(transcript);
    }

    let pipeline = build_pipeline(&config)?;
    let document = pipeline.run(request).await?;

    tokio::fs::create_dir_all(&config.out_dir)
        .await
        .with_context(|| format!("Failed to create {}", config.out_dir.display()))?;

    let path = config.out_dir.join(&document.filename);
    tokio::fs::write(&path, &document.pdf)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        bytes = document.pdf.len(),
        transcript = %document.transcript_status,
        "Case study written"
    );

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    init_tracing_subscriber()?;

    let cli = Cli::parse();
    let config = cli.config();

    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set, /generate will fail at the generation step");
    }

    match cli.command {
        Some(Command::Render {
            url,
            transcript_file,
        }) => render(config, url, transcript_file).await,
        Some(Command::Serve) | None => serve(config, &cli.host, cli.port).await,
    }
}
