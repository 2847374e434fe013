use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for sequential test runs.
///
/// Hidden in quiet mode or when stderr is not a TTY, so machine-readable
/// stdout output stays clean.
pub struct RunProgress {
    progress_bar: ProgressBar,
}

impl RunProgress {
    /// Creates a progress bar sized to the number of leaf tests.
    ///
    /// # Panics
    ///
    /// Panics if the progress bar template is invalid. The template is a
    /// compile-time constant, so this should never happen.
    #[must_use]
    pub fn new(total: u64, quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::with_visibility(total, quiet, is_tty)
    }

    fn with_visibility(total: u64, quiet: bool, is_tty: bool) -> Self {
        let progress_bar = if quiet || !is_tty {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} Running [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                    )
                    .expect("valid template")
                    .progress_chars("█▓░"),
            );
            pb
        };

        Self { progress_bar }
    }

    /// Show the name of the test that just started.
    pub fn start_test(&self, name: &str) {
        self.progress_bar.set_message(name.to_string());
    }

    /// Mark one test as settled.
    pub fn finish_test(&self) {
        self.progress_bar.inc(1);
    }

    /// Finishes the progress bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
