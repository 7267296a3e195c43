use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

const PB_STYLE: &str = "📊 Progress: |{bar:40}| {pos}/{len} ({percent}%)";

const PB_CHARS: &str = "█░";

static PB_TEMPLATE: LazyLock<Option<ProgressStyle>> = LazyLock::new(|| {
    let pb_style = match ProgressStyle::with_template(PB_STYLE) {
        Ok(pb_style) => pb_style.progress_chars(PB_CHARS),
        Err(_) => return None,
    };

    Some(pb_style)
});

/// Row-level progress for the CSV export.
pub struct ProgressTracker {
    pub pb: ProgressBar,
}

impl ProgressTracker {
    pub fn new(len: u64) -> Self {
        let pb = ProgressBar::new(len);
        if let Some(style) = PB_TEMPLATE.as_ref() {
            pb.set_style(style.clone());
        }
        ProgressTracker { pb }
    }

    pub fn hidden() -> Self {
        ProgressTracker {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn inc(&self) {
        self.pb.inc(1);
    }

    pub fn finish(&self) {
        self.pb.finish();
    }
}
