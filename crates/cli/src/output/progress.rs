//! Progress spinner for the scan and compare phases
//!
//! Provides indeterminate progress indication while the local tree is
//! walked, fingerprinted, and compared against the store.

use super::OutputConfig;

/// Progress spinner wrapper
///
/// Handles progress display based on output configuration.
/// In quiet mode, progress is suppressed.
#[derive(Debug)]
pub struct ProgressBar {
    bar: Option<indicatif::ProgressBar>,
}

impl ProgressBar {
    /// Create a spinner for indeterminate progress
    pub fn spinner(config: OutputConfig, message: &str) -> Self {
        let bar = if config.quiet || config.no_progress {
            None
        } else {
            let bar = indicatif::ProgressBar::new_spinner();
            bar.set_style(
                indicatif::ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .expect("valid template"),
            );
            bar.set_message(message.to_string());
            bar.enable_steady_tick(std::time::Duration::from_millis(100));
            Some(bar)
        };

        Self { bar }
    }

    /// Set message
    pub fn set_message(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(message.to_string());
        }
    }

    /// Finish and clear the spinner
    ///
    /// Must be called before any report line is printed, or the line would
    /// interleave with the spinner redraw.
    pub fn finish_and_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if the spinner is visible
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_quiet_mode() {
        let config = OutputConfig {
            quiet: true,
            ..Default::default()
        };
        let bar = ProgressBar::spinner(config, "working...");
        assert!(!bar.is_visible());
    }

    #[test]
    fn test_spinner_no_progress() {
        let config = OutputConfig {
            no_progress: true,
            ..Default::default()
        };
        let bar = ProgressBar::spinner(config, "working...");
        assert!(!bar.is_visible());
    }

    #[test]
    fn test_spinner_normal() {
        let config = OutputConfig::default();
        let bar = ProgressBar::spinner(config, "working...");
        assert!(bar.is_visible());
        bar.finish_and_clear();
    }
}
