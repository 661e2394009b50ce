use indicatif::{ProgressBar, ProgressStyle};
use modelsel::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0).with_style(Self::bar_style());
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::BatchStart { total_proteins } => {
                    pb_guard.reset();
                    pb_guard.set_length(total_proteins);
                    pb_guard.set_position(0);
                    pb_guard.set_message("Selecting models");
                }
                Progress::ProteinFinished { protein, selected } => {
                    pb_guard.inc(1);
                    pb_guard.set_message(format!("{} ({} selected)", protein, selected));
                }
                Progress::ModelSkipped { protein, model } => {
                    pb_guard.println(format!("  Skipped malformed model {}/{}", protein, model));
                }
                Progress::BatchFinish => {
                    pb_guard.finish_with_message("✓ Done");
                }
            }
        })
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<30} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
