//! CLI entrypoint for assessgen
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use assessgen_application::{
    AssessmentWizard, ErrorCategory, NoProgress, NoWorkflowLogger, ResolveMappingsUseCase,
    WorkflowError, WorkflowLogger, WorkflowProgressNotifier,
};
use assessgen_domain::{OutputFormat, WorkflowRun};
use assessgen_infrastructure::{
    ApiClient, ConfigLoader, FileConfig, HttpAssessmentStore, HttpQuestionGenerator,
    HttpQuestionStore, HttpTaxonomy, JsonlWorkflowLogger, PlanLoader,
};
use assessgen_presentation::{Cli, ConsoleFormatter, OutputConfig, ProgressReporter};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).map_err(|e| anyhow!("invalid configuration: {e}"))?
    };
    config.validate()?;

    let _guard = init_logging(cli.verbose, config.logging.file.as_deref())?;
    info!("Starting assessgen");

    let output = OutputConfig::resolve(
        cli.output.map(Into::into),
        config.output.format,
        config.output.color,
        cli.quiet,
    );
    output.apply_color();

    let plan_path = cli
        .plan
        .as_deref()
        .context("a plan file is required")?;
    let plan = PlanLoader::load(plan_path)?;

    // === Dependency Injection ===
    let client = ApiClient::from_config(&config.api)?;
    let taxonomy = Arc::new(HttpTaxonomy::new(client.clone(), &config.api.taxonomy_path));
    let generator = Arc::new(HttpQuestionGenerator::new(client.clone(), &config.api.generate_path));
    let questions = Arc::new(HttpQuestionStore::new(client.clone(), &config.api.question_path));
    let assessments = Arc::new(HttpAssessmentStore::new(client, &config.api.assessment_path));

    let mapping_set = match ResolveMappingsUseCase::new(taxonomy).execute(plan.mappings).await {
        Ok(set) => set,
        Err(e) => return Ok(fail(&e)),
    };

    let progress: Arc<dyn WorkflowProgressNotifier> = if output.show_progress {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(NoProgress)
    };

    let mut wizard = AssessmentWizard::new(
        generator,
        questions,
        assessments,
        config.workflow_config(),
        WorkflowRun::new(plan.settings, mapping_set),
        plan.context,
    )
    .with_progress(progress)
    .with_workflow_logger(event_logger(&config));

    if output.format == OutputFormat::Summary {
        println!("{}", ConsoleFormatter::format_mappings(wizard.run().mapping_set()));
    }

    let result = drive(&mut wizard, cli.review_only).await;

    match output.format {
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(wizard.run())),
        OutputFormat::Summary => {
            if wizard.run().drafts().is_empty() {
                warn!("No drafts to summarize");
            } else {
                println!("{}", ConsoleFormatter::format_summary(wizard.run()));
            }
            print!("{}", ConsoleFormatter::format_outcome(wizard.run()));
        }
    }

    Ok(match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    })
}

/// Walk the wizard from ReviewMapping to a terminal state
async fn drive(wizard: &mut AssessmentWizard, review_only: bool) -> Result<(), WorkflowError> {
    wizard.generate().await?;
    wizard.next()?;
    wizard.next()?;

    if review_only {
        info!("Review only; cancelling before anything is stored");
        return wizard.skip();
    }

    let ack = wizard.finish().await?;
    info!("Submission acknowledged: {:?}", ack.assessment_id);
    Ok(())
}

fn event_logger(config: &FileConfig) -> Arc<dyn WorkflowLogger> {
    match config
        .logging
        .event_log
        .as_deref()
        .and_then(JsonlWorkflowLogger::new)
    {
        Some(logger) => {
            info!("Workflow events: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoWorkflowLogger),
    }
}

/// Report a workflow error; the exit code encodes its category
fn fail(error: &WorkflowError) -> ExitCode {
    eprint!("{}", ConsoleFormatter::format_error(error));
    match error.category() {
        ErrorCategory::Validation => ExitCode::from(2),
        ErrorCategory::Network => ExitCode::from(3),
        ErrorCategory::Inconsistency => ExitCode::from(4),
    }
}

/// Install the tracing subscriber; `-v` count picks the level.
///
/// The returned guard must live until exit so the file writer flushes.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let directory = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("log file path has no file name: {}", path.display()))?;
            std::fs::create_dir_all(directory)
                .with_context(|| format!("cannot create log directory {}", directory.display()))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}
