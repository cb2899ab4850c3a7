//! Console output for a finished search.

use std::path::Path;

use placescout_core::group_failures;
use placescout_export::summarize;

use crate::profiles::truncate;
use crate::search::PipelineOutcome;

const PREVIEW_ROWS: usize = 5;

pub(crate) fn print_report(outcome: &PipelineOutcome, written: &Path, verbose: bool) {
    let request = &outcome.request;
    println!(
        "Searched {} within {} miles of {} ({})",
        request.place_types().join(", "),
        request.radius_miles(),
        request.location(),
        request.origin()
    );
    println!();

    println!("{:<24}FOUND", "TYPE");
    for count in &outcome.type_counts {
        println!("{:<24}{}", count.place_type, count.found);
    }
    println!();

    let stats = summarize(&outcome.places);
    println!("Unique places:  {}", stats.total_places);
    println!("Place types:    {}", stats.unique_types);
    println!("With phone:     {}", stats.with_phone);
    println!("With website:   {}", stats.with_website);
    println!("With email:     {}", stats.with_email);
    if let (Some(min), Some(avg), Some(max)) =
        (stats.min_distance, stats.avg_distance, stats.max_distance)
    {
        println!("Distance (mi):  min {min:.2}  avg {avg:.2}  max {max:.2}");
    }
    if let Some(rating) = stats.avg_rating {
        println!("Avg rating:     {rating:.2}");
    }

    if let Some(enrichment) = &outcome.enrichment {
        println!(
            "Emails:         {} found, {} not found, {} unreachable of {} websites",
            enrichment.found, enrichment.not_found, enrichment.fetch_failed, enrichment.attempted
        );
    }

    let groups = group_failures(&outcome.failures);
    if !groups.is_empty() {
        println!();
        println!("Failures:");
        for group in &groups {
            println!(
                "  {} ({}): {}",
                group.stage,
                group.count,
                group.subjects.join(", ")
            );
        }
    }

    if verbose && !outcome.places.is_empty() {
        println!();
        println!("{:<32}{:<10}{:<18}EMAIL", "NAME", "MILES", "PHONE");
        for place in outcome.places.iter().take(PREVIEW_ROWS) {
            println!(
                "{:<32}{:<10.2}{:<18}{}",
                truncate(&place.name, 30),
                place.distance_miles,
                place.phone.as_deref().unwrap_or("-"),
                place.email.as_deref().unwrap_or("-")
            );
        }
    }

    println!();
    println!(
        "Wrote {} places to {}",
        outcome.places.len(),
        written.display()
    );
}
