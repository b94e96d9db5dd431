mod commands;

use clap::{Parser, Subcommand};
use lexicon_core::config::{self, Config};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lexicon",
    version,
    about = "lexicon: nested locale tables with key-path lookup"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "lexicon.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one key path and print the rendered string.
    Get {
        /// Dotted key path, e.g. `ticket.buttons.cancel`.
        key: String,
        /// Interpolation value as `name=value`. Repeatable.
        #[arg(short, long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
        /// Language to resolve in (overrides config).
        #[arg(short, long)]
        lang: Option<String>,
        /// Fail instead of printing a fallback for missing keys or variables.
        #[arg(long)]
        strict: bool,
    },
    /// List every key path of a language, with its template.
    Keys {
        /// Only keys under this dotted prefix.
        prefix: Option<String>,
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// Validate all bundles and report data-quality issues.
    Check,
    /// Rewrite `{name}` placeholders to `{{name}}` and print the document.
    Normalize {
        /// JSON document to normalize.
        file: String,
    },
    /// List loaded languages.
    Languages,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // The configured level is not known yet, so config loading logs at `info`.
    let cfg = load_config(&cli.config, log_filter("info"), std::io::stderr)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(&cfg.lexicon.log_level))
        .init();

    match cli.command {
        Commands::Get {
            key,
            vars,
            lang,
            strict,
        } => commands::get(&cfg, &key, &vars, lang.as_deref(), strict),
        Commands::Keys { prefix, lang } => commands::keys(&cfg, prefix.as_deref(), lang.as_deref()),
        Commands::Check => commands::check(&cfg),
        Commands::Normalize { file } => commands::normalize(&file),
        Commands::Languages => commands::languages(&cfg),
    }
}

/// `RUST_LOG` if set, otherwise `level`.
fn log_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Load the config under a scoped subscriber so its own messages are not lost.
fn load_config<W>(path: &str, filter: EnvFilter, writer: W) -> anyhow::Result<Config>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let bootstrap = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .finish();
    let cfg = tracing::subscriber::with_default(bootstrap, || config::load(path))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_config_logs_missing_file() {
        let captured = Captured::default();
        let sink = captured.clone();
        let cfg = load_config(
            "/nonexistent/__lexicon_main_test__.toml",
            EnvFilter::new("info"),
            move || sink.clone(),
        )
        .unwrap();
        assert_eq!(cfg.locale.language, "pt");
        let out = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(out.contains("Config file not found"), "got: {out}");
    }
}
