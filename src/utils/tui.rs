use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;
use tripcal_core::progress::{PROGRESS_INTERVAL, ProgressMessages};

pub fn create_spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["-", "\\", "|", "/"])
            .template("{msg} {spinner}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Spinner that cycles through the loading messages while a plan is generated.
///
/// The rotation stops and the line is cleared when this is dropped, so an
/// early return on error can't leave it running.
pub struct LoadingSpinner {
    bar: ProgressBar,
    rotation: JoinHandle<()>,
}

impl LoadingSpinner {
    pub fn start() -> Self {
        let mut messages = ProgressMessages::new();
        let bar = create_spinner(messages.current().to_string());

        let handle = bar.clone();
        let rotation = tokio::spawn(async move {
            let mut interval = tokio::time::interval(PROGRESS_INTERVAL);
            // First tick fires immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                handle.set_message(messages.advance());
            }
        });

        LoadingSpinner { bar, rotation }
    }

    pub fn finish(self) {
        drop(self);
    }
}

impl Drop for LoadingSpinner {
    fn drop(&mut self) {
        self.rotation.abort();
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripcal_core::progress::LOADING_MESSAGES;

    #[tokio::test]
    async fn test_starts_with_first_message() {
        let spinner = LoadingSpinner::start();
        assert_eq!(spinner.bar.message(), LOADING_MESSAGES[0]);

        let bar = spinner.bar.clone();
        spinner.finish();
        assert!(bar.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotates_every_interval() {
        let spinner = LoadingSpinner::start();

        tokio::time::sleep(PROGRESS_INTERVAL + std::time::Duration::from_millis(10)).await;
        tokio::task::yield_now().await;

        assert_eq!(spinner.bar.message(), LOADING_MESSAGES[1]);
    }

    async fn failing_plan(bar: &mut Option<ProgressBar>) -> Result<(), String> {
        let spinner = LoadingSpinner::start();
        *bar = Some(spinner.bar.clone());

        let outcome: Result<(), String> = Err("service unavailable".into());
        outcome?;

        spinner.finish();
        Ok(())
    }

    #[tokio::test]
    async fn test_stops_on_early_return() {
        let mut bar = None;
        assert!(failing_plan(&mut bar).await.is_err());
        assert!(bar.unwrap().is_finished());
    }
}
