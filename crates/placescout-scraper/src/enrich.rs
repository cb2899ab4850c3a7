//! Bounded-concurrency email enrichment for a batch of places.

use futures::stream::{self, StreamExt};
use placescout_core::{Failure, FailureStage, Place};

use crate::extractor::{EmailExtractor, ExtractionStatus};
use crate::fetch::PageFetcher;

/// Totals for one enrichment run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichmentReport {
    /// Places with a website and no email yet.
    pub attempted: usize,
    pub found: usize,
    pub not_found: usize,
    pub fetch_failed: usize,
    /// One `Website` failure per `FetchFailed` place, in input order.
    pub failures: Vec<Failure>,
}

/// Looks up an email for every place that has a website but no email,
/// running at most `concurrency` extractions at once.
///
/// Workers only return results; this function is the single writer of
/// `email` and `email_source`.
pub async fn enrich_places<F: PageFetcher>(
    extractor: &EmailExtractor<F>,
    places: &mut [Place],
    concurrency: usize,
) -> EnrichmentReport {
    let jobs: Vec<(usize, String)> = places
        .iter()
        .enumerate()
        .filter(|(_, p)| p.email.is_none())
        .filter_map(|(i, p)| p.website.clone().map(|w| (i, w)))
        .collect();

    let total = jobs.len();
    let mut report = EnrichmentReport {
        attempted: total,
        ..EnrichmentReport::default()
    };
    if total == 0 {
        return report;
    }

    tracing::info!(websites = total, concurrency, "extracting emails");

    let mut results = stream::iter(jobs)
        .map(move |(index, website)| async move { (index, extractor.extract(&website).await) })
        .buffer_unordered(concurrency.max(1));

    let mut failures: Vec<(usize, Failure)> = Vec::new();
    let mut done = 0usize;
    while let Some((index, result)) = results.next().await {
        done += 1;
        let place = &mut places[index];
        match result.status {
            ExtractionStatus::Found => {
                report.found += 1;
                place.email = result.email;
                place.email_source = result.source;
            }
            ExtractionStatus::NotFound => report.not_found += 1,
            ExtractionStatus::FetchFailed => {
                report.fetch_failed += 1;
                let message = result
                    .last_error
                    .unwrap_or_else(|| "no page could be fetched".to_string());
                failures.push((
                    index,
                    Failure::new(FailureStage::Website, place.place_id.clone(), message),
                ));
            }
        }
        tracing::info!(
            done,
            total,
            place = %place.name,
            status = %result.status,
            pages = result.pages_fetched,
            "email extraction progress"
        );
    }

    failures.sort_by_key(|(index, _)| *index);
    report.failures = failures.into_iter().map(|(_, f)| f).collect();
    report
}
