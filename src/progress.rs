use indicatif::{ProgressBar, ProgressStyle};

const PROGRESS_THRESHOLD: u64 = 10;

/// Progress bar on stderr for the check and write phases.
///
/// Hidden for small batches and when disabled.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(total: u64, enabled: bool, phase: &'static str) -> Self {
        if !enabled || total < PROGRESS_THRESHOLD {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("static progress template is valid")
                .progress_chars("=>-"),
        );
        bar.set_prefix(phase);
        Self { bar: Some(bar) }
    }

    pub fn set_message(&self, msg: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(msg.to_string());
        }
    }

    pub fn inc(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_batches_have_no_bar() {
        let progress = ProgressReporter::new(PROGRESS_THRESHOLD - 1, true, "checking");
        assert!(progress.bar.is_none());
    }

    #[test]
    fn test_disabled_has_no_bar() {
        let progress = ProgressReporter::new(1000, false, "checking");
        assert!(progress.bar.is_none());
        progress.inc();
        progress.finish();
    }
}
