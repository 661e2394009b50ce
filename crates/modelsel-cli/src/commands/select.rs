use crate::cli::SelectArgs;
use crate::config::PartialSelectConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use modelsel::engine::progress::ProgressReporter;
use modelsel::workflows;
use tracing::{info, warn};

pub fn run(args: SelectArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let thresholds = PartialSelectConfig::from_args(&args)?.merge_with_cli(&args)?;

    let reporter = if args.no_progress {
        ProgressReporter::new()
    } else {
        ProgressReporter::with_callback(CliProgressHandler::new().get_callback())
    };

    let written = workflows::select::run(
        &args.swissmodel,
        thresholds,
        args.output_dir.as_deref(),
        &reporter,
    )?;

    for result in &written {
        let selection = &result.selection;
        if selection.rows.is_empty() {
            warn!(
                "No models passed selection for {} ({} candidates).",
                selection.protein, selection.candidates
            );
        }
        println!(
            "{}: {} of {} model(s) selected, {} skipped -> {}",
            selection.protein,
            selection.rows.len(),
            selection.candidates,
            selection.skipped.len(),
            result.output.display()
        );
    }

    Ok(())
}
