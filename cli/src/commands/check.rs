use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use tracing::{Instrument, info_span};

use cloudscout_common::config::Config;
use cloudscout_common::inventory::Inventory;
use cloudscout_common::record::DomainResult;
use cloudscout_core::audit::Auditor;

use crate::commands::CheckArgs;
use crate::terminal::{colors, print, report, spinner::SpinnerIndicator};

pub async fn check(args: CheckArgs, cfg: Config) -> anyhow::Result<()> {
    let inventory = Inventory::load(&args.file).context("Failed to load config")?;

    let mut auditor = Auditor::new(&cfg)?;
    if !args.no_spinner {
        auditor = auditor.with_indicator(Arc::new(SpinnerIndicator));
    }

    print::header(&format!("checking {} domains", inventory.domains.len()));
    let start_time = Instant::now();
    let results: Vec<DomainResult> = auditor
        .audit_all(&inventory.domains)
        .instrument(info_span!("check", file = %args.file.display()))
        .await;

    let columns: Vec<String> = report::port_columns(&inventory.domains);
    for line in report::render(&report::build(&results, &columns)) {
        print::print(&line);
    }
    print_summary(&results, start_time.elapsed());
    Ok(())
}

fn print_summary(results: &[DomainResult], total_time: Duration) {
    let active = results.iter().filter(|result| result.reachable).count();
    let active: ColoredString = format!("{active}/{} active", results.len()).bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output = format!("Check Complete: {active} in {total_time}").color(colors::TEXT_DEFAULT);
    print::centerln(&output.to_string());
}
