//! Console output formatter for workflow runs

use assessgen_application::{ErrorCategory, WorkflowError};
use assessgen_domain::core::string::truncate;
use assessgen_domain::{
    AssessmentSettings, DraftQuestion, MappingAggregates, MappingEntry, MappingSet,
    SubmissionAck, WorkflowRun, WorkflowRunId, WorkflowStatus, join_ids,
};
use colored::Colorize;
use serde::Serialize;

const TITLE_WIDTH: usize = 72;

/// JSON shape of a finished (or cancelled) run
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub run_id: WorkflowRunId,
    #[serde(flatten)]
    pub status: WorkflowStatus,
    pub settings: &'a AssessmentSettings,
    pub totals: MappingAggregates,
    pub mappings: &'a [MappingEntry],
    pub drafts: &'a [DraftQuestion],
    pub question_ids: Vec<String>,
    pub acknowledgement: Option<&'a SubmissionAck>,
}

impl<'a> RunReport<'a> {
    pub fn from_run(run: &'a WorkflowRun) -> Self {
        let assessment = run.assessment();
        Self {
            run_id: assessment.run_id(),
            status: run.status(),
            settings: assessment.settings(),
            totals: run.mapping_set().aggregates(),
            mappings: run.mapping_set().entries(),
            drafts: run.drafts(),
            question_ids: assessment
                .question_ids()
                .iter()
                .map(|id| id.as_str().to_string())
                .collect(),
            acknowledgement: assessment.acknowledgement(),
        }
    }
}

/// Formats workflow state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Mapping buckets as a table with totals
    pub fn format_mappings(set: &MappingSet) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{:>3}  {:<24} {:<24} {:<12} {:>4} {:>6} {:>6}\n",
            "#", "Type", "Value", "Category", "Qs", "Marks", "Total"
        ));
        output.push_str(&format!("{}\n", "-".repeat(86)));

        for (i, entry) in set.entries().iter().enumerate() {
            let value = if entry.is_selected() {
                truncate(&entry.value_name, 24)
            } else {
                "(unselected)".to_string()
            };
            output.push_str(&format!(
                "{:>3}  {:<24} {:<24} {:<12} {:>4} {:>6} {:>6}\n",
                i + 1,
                truncate(&entry.type_name, 24),
                value,
                entry.domain_category.display_name(),
                entry.question_count,
                entry.marks,
                entry.total_marks()
            ));
            if !entry.reason.is_empty() {
                output.push_str(&format!(
                    "     {}\n",
                    truncate(&entry.reason, 80).dimmed()
                ));
            }
        }

        let totals = set.aggregates();
        output.push_str(&format!(
            "{} {} questions, {} marks\n",
            "Totals:".bold(),
            totals.total_question_count,
            totals.total_marks
        ));
        output
    }

    /// Numbered drafts with their options; the correct option is starred
    pub fn format_drafts(drafts: &[DraftQuestion]) -> String {
        let mut output = String::new();
        for (i, draft) in drafts.iter().enumerate() {
            output.push_str(&format!(
                "{} {}\n",
                format!("Q{}.", i + 1).yellow().bold(),
                truncate(&draft.title, TITLE_WIDTH)
            ));
            for (j, option) in draft.answer_options.iter().enumerate() {
                let marker = if j == draft.correct_answer_index { "*" } else { " " };
                output.push_str(&format!("   {} {}) {}\n", marker, option_letter(j), option));
            }
            if !draft.mapping_type_name.is_empty() {
                output.push_str(&format!(
                    "     {}\n",
                    format!("[{} / {}]", draft.mapping_type_name, draft.mapping_value_name).dimmed()
                ));
            }
        }
        output
    }

    pub fn format_settings(settings: &AssessmentSettings) -> String {
        let mut output = String::new();
        output.push_str(&format!("{} {}\n", "Title:".cyan().bold(), settings.title));
        output.push_str(&format!(
            "{} {}\n",
            "Description:".cyan().bold(),
            settings.description
        ));
        if let Some(minutes) = settings.timing.duration_minutes {
            output.push_str(&format!("{} {} min\n", "Duration:".cyan().bold(), minutes));
        }
        if let (Some(start), Some(end)) = (settings.timing.starts_at, settings.timing.ends_at) {
            output.push_str(&format!(
                "{} {} .. {}\n",
                "Window:".cyan().bold(),
                start.to_rfc3339(),
                end.to_rfc3339()
            ));
        }
        let flags = settings.display_flags;
        output.push_str(&format!(
            "{} shuffle questions: {}, shuffle answers: {}, show results: {}, back navigation: {}\n",
            "Display:".cyan().bold(),
            yes_no(flags.shuffle_questions),
            yes_no(flags.shuffle_answers),
            yes_no(flags.show_results),
            yes_no(flags.allow_back_navigation)
        ));
        output
    }

    /// The Summary step: settings, mappings and drafts
    pub fn format_summary(run: &WorkflowRun) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Assessment Summary"));
        output.push('\n');
        output.push_str(&Self::format_settings(run.assessment().settings()));

        output.push_str(&Self::section_header("Mappings"));
        output.push_str(&Self::format_mappings(run.mapping_set()));

        output.push_str(&Self::section_header(&format!(
            "Draft Questions ({})",
            run.drafts().len()
        )));
        output.push_str(&Self::format_drafts(run.drafts()));

        output.push_str(&Self::footer());
        output
    }

    /// Final line(s) once the run has ended
    pub fn format_outcome(run: &WorkflowRun) -> String {
        let ids = join_ids(run.assessment().question_ids());
        match run.status() {
            WorkflowStatus::Persisted => {
                let ack = run.assessment().acknowledgement();
                let id = ack
                    .and_then(|a| a.assessment_id.as_deref())
                    .unwrap_or("(no id returned)");
                let mut output = format!("{} {}\n", "Assessment submitted:".green().bold(), id);
                if let Some(message) = ack.and_then(|a| a.message.as_deref()) {
                    output.push_str(&format!("  {}\n", message));
                }
                output.push_str(&format!("  {} {}\n", "Questions:".dimmed(), ids));
                output
            }
            WorkflowStatus::Cancelled => {
                let mut output = format!("{}\n", "Workflow cancelled; nothing was submitted.".yellow());
                if !ids.is_empty() {
                    output.push_str(&format!(
                        "  {} {}\n",
                        "Already stored questions (not rolled back):".dimmed(),
                        ids
                    ));
                }
                output
            }
            WorkflowStatus::Active(step) => {
                format!("{} {}\n", "Workflow stopped at".yellow(), step)
            }
        }
    }

    /// Error with a hint matching its category
    pub fn format_error(error: &WorkflowError) -> String {
        let hint = match error.category() {
            ErrorCategory::Network => "Nothing was rolled back; re-run to retry.",
            ErrorCategory::Validation => "Fix the plan and try again.",
            ErrorCategory::Inconsistency => "Generated and stored counts disagree; start a new run.",
        };
        format!("{} {}\n  {}\n", "Error:".red().bold(), error, hint.dimmed())
    }

    /// Format as JSON
    pub fn format_json(run: &WorkflowRun) -> String {
        serde_json::to_string_pretty(&RunReport::from_run(run)).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn option_letter(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}
