//! Spinner tracking the session's busy flags

use docchat_application::SessionView;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tokio::sync::watch;

/// Shows a spinner while the session view reports a request in flight.
pub struct BusyIndicator;

impl BusyIndicator {
    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Spinner text for a view, or `None` when nothing is in flight.
    pub fn label(view: &SessionView) -> Option<&'static str> {
        if view.is_analyzing {
            Some("Analyzing document...")
        } else if view.is_sending {
            Some("Waiting for answer...")
        } else {
            None
        }
    }

    /// Drive `operation` to completion, updating a spinner from `views`.
    ///
    /// The spinner is cleared before the operation's output is returned.
    pub async fn track<F: Future>(mut views: watch::Receiver<SessionView>, operation: F) -> F::Output {
        let mut spinner: Option<ProgressBar> = None;
        tokio::pin!(operation);

        loop {
            tokio::select! {
                output = &mut operation => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    return output;
                }
                changed = views.changed() => {
                    if changed.is_err() {
                        // Sender gone; finish without a spinner
                        if let Some(pb) = spinner.take() {
                            pb.finish_and_clear();
                        }
                        return operation.await;
                    }
                    let label = Self::label(&views.borrow_and_update());
                    Self::update(&mut spinner, label);
                }
            }
        }
    }

    fn update(spinner: &mut Option<ProgressBar>, label: Option<&'static str>) {
        match (label, spinner.as_ref()) {
            (Some(label), Some(pb)) => pb.set_message(label),
            (Some(label), None) => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(Self::spinner_style());
                pb.set_message(label);
                pb.enable_steady_tick(Duration::from_millis(100));
                *spinner = Some(pb);
            }
            (None, Some(_)) => {
                if let Some(pb) = spinner.take() {
                    pb.finish_and_clear();
                }
            }
            (None, None) => {}
        }
    }
}
