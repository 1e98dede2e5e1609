use std::path::Path;

use tracing::info;

use crate::cli::config::{ExpandMode, ResolvedSettings};
use crate::ingest::loader::load_report;
use crate::model::report_model::Status;
use crate::report::console::format_console_report;
use crate::report::html::generate_html_report;
use crate::report::junit::generate_junit_xml;
use crate::view::view_model::{EventOutcome, ReportView, ViewEvent};

// ============================================================================
// render subcommand
// ============================================================================

/// Render a run and return whether no feature failed.
pub fn cmd_render(
    input: &str,
    settings: &ResolvedSettings,
    feature: Option<&str>,
) -> Result<bool, Box<dyn std::error::Error>> {
    let report = load_report(Path::new(input))?;
    let mut view = ReportView::new(&report);

    if let Some(name) = feature {
        select(&mut view, name);
    }
    apply_expand(&mut view, settings.expand);

    let all_passed = view.run_summary().all_passed();
    let output_content = render_output(&view, settings);

    // Write or print
    match settings.output.as_deref() {
        Some(path) => {
            std::fs::write(path, &output_content)?;
            info!(path, format = %settings.format, "Report written");
        }
        None => print!("{}", output_content),
    }

    Ok(all_passed)
}

/// Format the view in the configured output format.
pub fn render_output(view: &ReportView<'_>, settings: &ResolvedSettings) -> String {
    match settings.format.as_str() {
        "html" => generate_html_report(view, &settings.options),
        "junit" => generate_junit_xml(view),
        _ => format_console_report(view, &settings.options),
    }
}

// ============================================================================
// show subcommand
// ============================================================================

pub fn cmd_show(
    input: &str,
    feature: &str,
    settings: &ResolvedSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = load_report(Path::new(input))?;
    let mut view = ReportView::new(&report);

    select(&mut view, feature);
    apply_expand(&mut view, settings.expand);

    print!("{}", format_console_report(&view, &settings.options));
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn select(view: &mut ReportView<'_>, name: &str) {
    if let EventOutcome::SelectionMissed(miss) =
        view.apply(ViewEvent::FeatureSelected(Some(name.to_string())))
    {
        eprintln!("Warning: {}", miss);
    }
}

/// Open the log panels the expand mode asks for. Returns how many opened.
pub fn apply_expand(view: &mut ReportView<'_>, mode: ExpandMode) -> usize {
    let opened = match mode {
        ExpandMode::None => 0,
        ExpandMode::Failed => {
            view.expand_where(|step| step.status == Status::Failed || step.error_text.is_some())
        }
        ExpandMode::All => view.expand_where(|_| true),
    };
    if opened > 0 {
        info!(opened, mode = ?mode, "Expanded step details");
    }
    opened
}
