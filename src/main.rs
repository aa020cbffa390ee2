use anyhow::Context;
use argus::{
    AppState, Config,
    llm::Provider,
    mail::{MailConfig, SmtpMailer},
    research::ResearchOrchestrator,
    search::WebSearchClient,
};
use axum::Router;
use clap::Parser;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Deep research orchestration server.
#[derive(Parser, Debug)]
#[command(name = "argus-server", version, about)]
struct Args {
    /// Bind address; overrides the HOST environment variable.
    #[arg(long)]
    host: Option<String>,

    /// Bind port; overrides the PORT environment variable.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);

    let state = build_state(config);
    let app = Router::new()
        .nest("/api", argus::api::routes::create_router())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    tracing::info!(%addr, "argus-server listening");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn build_state(config: Config) -> AppState {
    let llm = Provider::OpenAI {
        api_key: config.llm.openai_api_key.clone(),
        api_base: config.llm.openai_api_base.clone(),
        model: config.llm.model.clone(),
    }
    .create_client();

    let search = Arc::new(
        WebSearchClient::new(llm.clone())
            .with_num_results(config.research.search_results_per_task),
    );

    let mut builder = ResearchOrchestrator::builder(llm, search)
        .planned_searches(config.research.planned_searches)
        .max_concurrent_searches(config.research.max_concurrent_searches);

    if let Some(mail) = &config.mail {
        builder = builder
            .mailer(Arc::new(SmtpMailer::new(MailConfig {
                smtp_host: mail.smtp_host.clone(),
                smtp_port: mail.smtp_port,
                username: mail.username.clone(),
                password: mail.password.clone(),
                from_address: mail.from_address.clone(),
            })))
            .recipient(mail.to_address.clone());
    } else {
        tracing::info!("SMTP not configured; reports will not be emailed");
    }

    if let Some(url) = &config.research.trace_base_url {
        builder = builder.trace_base_url(url.clone());
    }

    AppState {
        config: Arc::new(config),
        orchestrator: Arc::new(builder.build()),
    }
}
