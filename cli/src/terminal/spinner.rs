use std::io::Write;
use std::sync::Mutex;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use cloudscout_core::progress::{Indicator, Ticker};

use crate::terminal::colors;

/// The spinner currently on screen, if any. Log lines are printed above it.
static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

const FRAMES: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub struct SpinnerIndicator;

impl Indicator for SpinnerIndicator {
    fn begin(&self, domain: &str) -> Box<dyn Ticker> {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(FRAMES);
        pb.set_style(style);
        pb.set_message(format!(
            "fetching {} ...",
            domain.color(colors::ACCENT).bold()
        ));

        if let Ok(mut active) = ACTIVE.lock() {
            *active = Some(pb.clone());
        }
        Box::new(DomainSpinner { pb })
    }
}

struct DomainSpinner {
    pb: ProgressBar,
}

impl Ticker for DomainSpinner {
    fn tick(&mut self) {
        self.pb.tick();
    }

    fn clear(&mut self) {
        if let Ok(mut active) = ACTIVE.lock() {
            *active = None;
        }
        self.pb.finish_and_clear();
    }
}

/// Writes to stdout, suspending the active spinner so lines do not tear it.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let active = ACTIVE.lock().ok().and_then(|active| active.clone());
        match active {
            Some(pb) => pb.suspend(|| std::io::stdout().write_all(buf))?,
            None => std::io::stdout().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()
    }
}
