use crate::matcher::{SizeBucket, estimate_hours};
use anyhow::Result;
use colored::Colorize;

pub fn handle_classify(estimate: String, json: bool) -> Result<()> {
    let hours = estimate_hours(&estimate);
    let bucket = SizeBucket::for_hours(hours);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "estimate": estimate,
                "hours": hours,
                "size": bucket.map(|b| b.to_string()),
                "label": bucket.map(|b| b.label()),
            }))?
        );
        return Ok(());
    }

    match bucket {
        Some(b) => println!("{} ({} hours) -> {}", estimate, hours, b.to_string().green()),
        None => println!("{} -> {}", estimate, "no size".yellow()),
    }
    Ok(())
}
