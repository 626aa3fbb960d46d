use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use tracing::info;

use ns_core::config::{ScorerKind, SourceKind, SpeechEngine};
use ns_core::{AppConfig, Query};
use ns_inference::SentimentClassifier;
use ns_pipeline::{Pipeline, PipelineOutcome};
use ns_web::AppState;

mod logging;

use logging::{init_logging, level_for};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    Newsapi,
    Memory,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScorerArg {
    Lexicon,
    Remote,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineArg {
    Google,
    Silent,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "News sentiment analysis with spoken summaries", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_enum)]
    source: Option<SourceArg>,
    #[arg(long, global = true, env = "NEWS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, global = true, value_enum)]
    scorer: Option<ScorerArg>,
    #[arg(long, global = true)]
    scorer_url: Option<String>,
    #[arg(long, global = true, value_enum)]
    speech_engine: Option<EngineArg>,
    /// Language of the spoken summary (e.g. hi, en)
    #[arg(long, global = true)]
    language: Option<String>,
    /// Where synthesized audio is written
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API and browser UI
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// List the articles found for a company
    News { company: String },
    /// Classify the news for a company and print the sentiment report
    Analyze {
        company: String,
        /// Only keep articles whose title contains this keyword
        #[arg(long)]
        query: Option<String>,
        /// Also synthesize the spoken summary
        #[arg(long)]
        speak: bool,
    },
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(source) = self.source {
            config.news.kind = match source {
                SourceArg::Newsapi => SourceKind::NewsApi,
                SourceArg::Memory => SourceKind::Memory,
            };
        }
        if let Some(api_key) = &self.api_key {
            config.news.api_key = Some(api_key.clone());
        }
        if let Some(scorer) = self.scorer {
            config.scorer.kind = match scorer {
                ScorerArg::Lexicon => ScorerKind::Lexicon,
                ScorerArg::Remote => ScorerKind::Remote,
            };
        }
        if let Some(url) = &self.scorer_url {
            config.scorer.url = Some(url.clone());
        }
        if let Some(engine) = self.speech_engine {
            config.speech.engine = match engine {
                EngineArg::Google => SpeechEngine::Google,
                EngineArg::Silent => SpeechEngine::Silent,
            };
        }
        if let Some(language) = &self.language {
            config.speech.language = language.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.speech.output_dir = dir.clone();
        }
        if let Commands::Serve { host, port } = &self.command {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
        }
    }

    fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = AppConfig::load(self.config.as_deref())
            .with_context(|| format!("failed to load configuration from {:?}", self.config))?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }
}

async fn build_pipeline(config: &AppConfig) -> ns_core::Result<Pipeline> {
    let source = ns_sources::create_source(&config.news)?;
    let scorer = ns_inference::create_scorer(&config.scorer).await?;
    let speaker = ns_speech::create_speaker(&config.speech)?;

    Ok(Pipeline::new(
        source,
        SentimentClassifier::new(scorer),
        config.pipeline.clone(),
    )
    .with_speaker(speaker))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(level_for(cli.verbose));

    let config = cli.load_config()?;
    let pipeline = build_pipeline(&config).await?;

    match cli.command {
        Commands::Serve { .. } => {
            let address = config.server.bind_address();
            info!("🌐 Starting server on {}", address);
            ns_web::serve(AppState::new(pipeline), &address).await?;
        }
        Commands::News { company } => {
            let query = Query::new(&company, None)?;
            let articles = pipeline.fetch(&query.company_name).await?;
            if articles.is_empty() {
                println!("No news articles found.");
            }
            for article in articles {
                println!("- {} ({})", article.title, article.link);
            }
        }
        Commands::Analyze { company, query, speak } => {
            let query = Query::new(&company, query.as_deref())?;
            match pipeline.run(&query).await? {
                PipelineOutcome::NoArticles => println!("No news articles found."),
                PipelineOutcome::NoMatches { keyword } => {
                    println!("No articles found related to '{}'.", keyword)
                }
                PipelineOutcome::Analyzed(analysis) => {
                    println!("{}", analysis.report);
                    if speak {
                        let artifact = pipeline.speak(&analysis).await?;
                        println!("🔊 Audio saved to {}", artifact.path.display());
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_top_of_defaults() {
        let cli = Cli::try_parse_from([
            "ns",
            "--source",
            "memory",
            "--scorer",
            "remote",
            "--scorer-url",
            "http://localhost:9000/score",
            "--language",
            "en",
            "serve",
            "--port",
            "9090",
        ])
        .unwrap();

        let mut config = AppConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.news.kind, SourceKind::Memory);
        assert_eq!(config.scorer.kind, ScorerKind::Remote);
        assert_eq!(config.scorer.url.as_deref(), Some("http://localhost:9000/score"));
        assert_eq!(config.speech.language, "en");
        assert_eq!(config.server.port, 9090);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_analyze_arguments() {
        let cli = Cli::try_parse_from(["ns", "analyze", "Acme", "--query", "recall", "--speak", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Analyze { company, query, speak } => {
                assert_eq!(company, "Acme");
                assert_eq!(query.as_deref(), Some("recall"));
                assert!(speak);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_offline_pipeline_from_config() {
        let mut config = AppConfig::default();
        config.news.kind = SourceKind::Memory;
        config.speech.engine = SpeechEngine::Silent;

        let pipeline = build_pipeline(&config).await.unwrap();
        let outcome = pipeline.run(&Query::new("Acme", None).unwrap()).await.unwrap();
        match outcome {
            PipelineOutcome::Analyzed(analysis) => {
                assert_eq!(analysis.total(), 3);
                assert_eq!(analysis.counts.positive, 1);
                assert_eq!(analysis.counts.negative, 1);
                assert_eq!(analysis.counts.neutral, 1);
            }
            other => panic!("expected analysis, got {:?}", other),
        }
    }
}
