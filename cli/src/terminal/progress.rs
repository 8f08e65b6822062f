use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;

use ipvet_core::batch::RunSnapshot;

/// Consumes run snapshots and renders them as a determinate progress bar.
///
/// The bar is created lazily on the first snapshot (that is when the total
/// becomes known) and the task ends once the sender side is dropped.
pub fn drive(mut rx: UnboundedReceiver<RunSnapshot>, quiet: u8) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut bar: Option<ProgressBar> = None;

        while let Some(snapshot) = rx.recv().await {
            if quiet > 0 || snapshot.total == 0 {
                continue;
            }

            let pb = bar.get_or_insert_with(|| new_bar(snapshot.total as u64));
            pb.set_position(snapshot.completed as u64);
            pb.set_message(format!(
                "{}/{} ({}%)",
                snapshot.completed,
                snapshot.total,
                snapshot.progress.round()
            ));
        }

        if let Some(pb) = bar {
            pb.finish_and_clear();
        }
    })
}

fn new_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template("{spinner:.blue} [{bar:40.green/white}] {msg}")
        .unwrap()
        .progress_chars("█▓░");

    pb.set_style(style);
    pb
}
