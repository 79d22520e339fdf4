use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use subclean::app::{Session, SessionReport};
use subclean::cli::{Cli, Commands, ConfigAction, RunArgs};
use subclean::config::{Config, TranslateConfig};
use subclean::diagnostics::check_dependencies;
use subclean::engines::{Denoiser, FfmpegDenoiser, JsonDiarizer, JsonRecognizer};
use subclean::output::StderrReporter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let config = load_config(cli.config.as_deref())?;
            run_session(config, args, cli.quiet, cli.verbose).await?;
        }
        Commands::Denoise { input, output_dir } => {
            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("cannot create {}", output_dir.display()))?;
            let cleaned = FfmpegDenoiser::new().denoise(&input, &output_dir)?;
            if !cli.quiet {
                println!("{} {}", "Cleaned:".green(), cleaned.display());
            }
        }
        Commands::Check => {
            let config = load_config(cli.config.as_deref())?;
            check_dependencies(&config, &config_path(cli.config.as_deref()));
        }
        Commands::Config { action } => {
            handle_config_command(action, cli.config.as_deref())?;
        }
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "subclean",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

fn config_path(custom_path: Option<&Path>) -> PathBuf {
    custom_path
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_path)
}

fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        // Load from custom path
        Config::load(path).with_context(|| format!("cannot load {}", path.display()))?
    } else {
        // Try default path, fall back to defaults
        Config::load_or_default(&Config::default_path())?
    };

    // Apply environment variable overrides
    Ok(config.with_env_overrides())
}

/// Apply `run` flags on top of the loaded configuration.
fn apply_run_overrides(config: &mut Config, args: &RunArgs) {
    if let Some(markers) = &args.markers {
        config.filter.markers_path = Some(markers.clone());
    }
    if let Some(dir) = &args.output_dir {
        config.output.directory = dir.clone();
    }
    if args.speaker_labels {
        config.output.speaker_labels = true;
    }
    if let Some(target) = &args.translate {
        config.translate.enabled = true;
        config.translate.target = target.clone();
    }
    if let Some(url) = &args.translate_url {
        config.translate.url = url.clone();
    }
    if let Some(secs) = args.translate_timeout {
        config.translate.timeout_secs = secs;
    }
}

async fn run_session(mut config: Config, args: RunArgs, quiet: bool, verbosity: u8) -> Result<()> {
    apply_run_overrides(&mut config, &args);
    let translate = config.translate.clone();

    let mut session = Session::new(config, Arc::new(JsonRecognizer::new(&args.transcript)))?
        .with_reporter(Arc::new(StderrReporter::new(quiet, verbosity)));
    if let Some(diarization) = &args.diarization {
        session = session.with_diarizer(Arc::new(JsonDiarizer::new(diarization)));
    }
    if args.denoise {
        session = session.with_denoiser(Arc::new(FfmpegDenoiser::new()));
    }
    if translate.enabled {
        session = attach_translator(session, &translate)?;
    }

    if !quiet && !session.markers().is_empty() {
        eprintln!(
            "{}",
            format!("Loaded {} hallucination markers", session.markers().len()).dimmed()
        );
    }

    let media = args.audio.as_deref().unwrap_or(&args.transcript);
    let started = Instant::now();
    let report = session.run(media).await?;

    if !quiet {
        print_summary(&report, started.elapsed().as_secs_f64());
    }
    Ok(())
}

#[cfg(feature = "translate")]
fn attach_translator(session: Session, translate: &TranslateConfig) -> Result<Session> {
    let translator = subclean::engines::LibreTranslator::from_config(translate)?;
    Ok(session.with_translator(Arc::new(translator)))
}

#[cfg(not(feature = "translate"))]
fn attach_translator(_session: Session, _translate: &TranslateConfig) -> Result<Session> {
    anyhow::bail!("translation support not compiled in (enable the `translate` feature)")
}

fn print_summary(report: &SessionReport, elapsed_secs: f64) {
    println!(
        "{} {} cues → {}",
        "Wrote".green(),
        report.cues,
        report.subtitle_path.display()
    );
    println!(
        "  {}  {} dropped, {} repetitive → {}",
        "Filter:".dimmed(),
        report.dropped,
        report.repetitions,
        report.repetition_log_path.display()
    );
    if report.speakers_assigned {
        println!("  {} assigned", "Speakers:".dimmed());
    }
    if let Some(path) = &report.translated_path {
        print!("  {} {}", "Translated:".dimmed(), path.display());
        if report.translation_failures > 0 {
            print!(
                " {}",
                format!("({} cues failed)", report.translation_failures).yellow()
            );
        }
        println!();
    }
    println!("  {}      {:.2}s", "Time:".dimmed(), elapsed_secs);
}

fn handle_config_command(action: ConfigAction, custom_path: Option<&Path>) -> Result<()> {
    let config_path = config_path(custom_path);

    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_or_default(&config_path)?.with_env_overrides();
            match config.get_value_by_path(&key) {
                Ok(value) => println!("{}", value),
                Err(e) => {
                    eprintln!("{}", format!("Error: {}", e).red());
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
        ConfigAction::Dump => {
            let config = Config::load_or_default(&config_path)?.with_env_overrides();
            print!("{}", config.dump()?);
        }
    }

    Ok(())
}
