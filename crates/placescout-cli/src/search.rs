//! The `search` command: resolve inputs, run the pipeline, export, report.
//!
//! Only credential, location, input and output problems stop a run. Failures
//! for a single place type, details lookup or website are collected and
//! summarised at the end.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use placescout_core::{
    load_profiles, parse_place_types, validate_search_inputs, AppConfig, Failure, Place,
    SearchProfile, SearchRequest,
};
use placescout_export::{export_places, ExportFormat};
use placescout_places::{
    aggregate, search_places, GooglePlacesClient, PlacesApi, SearchOptions, TypeCount,
};
use placescout_scraper::{
    enrich_places, EmailExtractor, EnrichmentReport, ExtractorOptions, HttpFetcher, PageFetcher,
};

use crate::report;

const DEFAULT_OUTPUT: &str = "places.xlsx";

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Address, city or landmark to search around
    #[arg(short, long)]
    pub location: Option<String>,

    /// Search radius in miles
    #[arg(short, long)]
    pub distance: Option<f64>,

    /// Comma-separated place types, e.g. "cafe,bakery"
    #[arg(short = 't', long = "types")]
    pub types: Option<String>,

    /// Visit each business website and look for a contact email
    #[arg(long)]
    pub emails: bool,

    /// Skip the per-place details lookup (phone, website, hours)
    #[arg(long)]
    pub no_details: bool,

    /// Output file; the extension is forced to match the format
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write CSV instead of XLSX
    #[arg(long)]
    pub csv: bool,

    /// Start from a saved search; explicit flags override its values
    #[arg(long)]
    pub profile: Option<String>,
}

/// Fully resolved inputs for one run.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchPlan {
    pub location: String,
    pub radius_miles: f64,
    pub place_types: Vec<String>,
    pub extract_emails: bool,
    pub fetch_details: bool,
    pub output: PathBuf,
    pub format: ExportFormat,
}

/// Merges flags, an optional saved search, and configured defaults, in that
/// order of precedence.
pub(crate) fn resolve_plan(
    args: &SearchArgs,
    profile: Option<&SearchProfile>,
    config: &AppConfig,
) -> SearchPlan {
    let location = args
        .location
        .clone()
        .or_else(|| profile.map(|p| p.location.clone()))
        .unwrap_or_else(|| config.default_location.clone());

    let radius_miles = args
        .distance
        .or(profile.map(|p| p.radius_miles))
        .unwrap_or(config.default_distance_miles);

    let place_types = match (&args.types, profile) {
        (Some(raw), _) => parse_place_types(raw),
        (None, Some(p)) => parse_place_types(&p.place_types.join(",")),
        (None, None) => parse_place_types(&config.default_place_type),
    };

    let output = args
        .output
        .clone()
        .or_else(|| profile.and_then(|p| p.output.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let format = if args.csv || has_csv_extension(&output) {
        ExportFormat::Csv
    } else {
        ExportFormat::Xlsx
    };

    SearchPlan {
        location,
        radius_miles,
        place_types,
        extract_emails: args.emails || profile.is_some_and(|p| p.extract_emails),
        fetch_details: !(args.no_details || profile.is_some_and(|p| p.skip_details)),
        output,
        format,
    }
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// Everything the pipeline produced, ready to export and report.
#[derive(Debug)]
pub(crate) struct PipelineOutcome {
    pub request: SearchRequest,
    pub places: Vec<Place>,
    pub type_counts: Vec<TypeCount>,
    pub failures: Vec<Failure>,
    pub enrichment: Option<EnrichmentReport>,
}

/// Validate → geocode → search → de-duplicate → optionally enrich.
///
/// # Errors
///
/// Returns an error for invalid inputs, an unresolvable location, or a
/// rejected API key.
pub(crate) async fn run_pipeline<A, F>(
    api: &A,
    extractor: Option<&EmailExtractor<F>>,
    plan: &SearchPlan,
    config: &AppConfig,
) -> anyhow::Result<PipelineOutcome>
where
    A: PlacesApi + ?Sized,
    F: PageFetcher,
{
    validate_search_inputs(plan.radius_miles, &plan.place_types, config.max_distance_miles)?;

    let origin = api
        .geocode(&plan.location)
        .await
        .with_context(|| format!("could not resolve location '{}'", plan.location))?;

    let request = SearchRequest::new(
        plan.location.clone(),
        origin,
        plan.radius_miles,
        &plan.place_types,
        config.max_distance_miles,
    )?;

    tracing::info!(
        location = %request.location(),
        origin = %request.origin(),
        radius_miles = request.radius_miles(),
        types = %request.place_types().join(","),
        "starting search"
    );

    let options = SearchOptions::from_config(config, plan.fetch_details);
    let outcome = search_places(api, &request, &options).await?;

    let found = outcome.places.len();
    let mut places = aggregate(outcome.places);
    tracing::info!(found, unique = places.len(), "search complete");

    let mut failures = outcome.failures;
    let enrichment = match extractor {
        Some(extractor) => {
            let report = enrich_places(extractor, &mut places, config.email_concurrency).await;
            failures.extend(report.failures.iter().cloned());
            Some(report)
        }
        None => None,
    };

    Ok(PipelineOutcome {
        request,
        places,
        type_counts: outcome.type_counts,
        failures,
        enrichment,
    })
}

/// Entry point for `placescout search`.
///
/// # Errors
///
/// Returns an error if the API key is unset, the profile is unknown, the
/// search cannot run, or the output cannot be written.
pub(crate) async fn run_search(
    config: &AppConfig,
    args: &SearchArgs,
    verbose: bool,
) -> anyhow::Result<()> {
    let api_key = config.require_api_key()?;

    let profile = match &args.profile {
        Some(name) => {
            let profiles = load_profiles(&config.profiles_path)?;
            let found = profiles.find(name).cloned().ok_or_else(|| {
                anyhow::anyhow!(
                    "profile '{name}' not found in {}; run `placescout profiles` to list them",
                    config.profiles_path.display()
                )
            })?;
            Some(found)
        }
        None => None,
    };
    let plan = resolve_plan(args, profile.as_ref(), config);

    let client = GooglePlacesClient::with_base_url(
        api_key,
        config.places_request_timeout_secs,
        &config.user_agent,
        &config.places_base_url,
    )?;

    let extractor = if plan.extract_emails {
        let fetcher = HttpFetcher::new(config.email_request_timeout_secs, &config.user_agent)?;
        Some(EmailExtractor::new(
            fetcher,
            ExtractorOptions::from_config(config),
        ))
    } else {
        None
    };

    let outcome = run_pipeline(&client, extractor.as_ref(), &plan, config).await?;

    let written = export_places(&outcome.places, &plan.output, plan.format)
        .with_context(|| format!("failed to write {}", plan.output.display()))?;

    report::print_report(&outcome, &written, verbose);
    Ok(())
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
