use crate::sync::{ItemReport, SyncReport};
use colored::Colorize;

pub fn print_report(report: &SyncReport) {
    if report.items.is_empty() {
        println!("{} items checked, nothing to update.", report.scanned);
        return;
    }

    for item in &report.items {
        print_item(item, report.dry_run);
    }

    println!();
    let verb = if report.dry_run { "would change" } else { "changed" };
    println!(
        "{} items checked, {} {}{}",
        report.scanned,
        report.changed.to_string().cyan(),
        verb,
        if report.failed > 0 {
            format!(", {} failed", report.failed.to_string().red())
        } else {
            String::new()
        }
    );
    if report.comments_failed > 0 {
        println!(
            "{} comment(s) could not be posted",
            report.comments_failed.to_string().yellow()
        );
    }
}

fn print_item(item: &ItemReport, dry_run: bool) {
    let marker = match (&item.error, dry_run) {
        (Some(_), _) => "failed".red(),
        (None, true) => "plan".yellow(),
        (None, false) => "updated".green(),
    };
    println!("{} {}", marker, item.url.cyan());
    for entry in item.changes.entries() {
        println!("  {}: {}", entry.field, entry.value.bold());
    }
    if let Some(ref error) = item.error {
        println!("  {}", error.dimmed());
    }
    if let Some(ref error) = item.comment_error {
        println!("  {} {}", "comment not posted:".yellow(), error.dimmed());
    }
}
