use crate::error::ImportError;
use crate::normalize::canonical::canonicalize;
use crate::normalize::occurrence::build_occurrences;
use crate::normalize::output::{parse_start_date, SemesterDiscovery};
use crate::runtime::types::{ImportContext, ImportReport};
use crate::sources::configs::SourcesConfig;
use crate::sources::{adapter_for, SourceAdapter};
use crate::types::{CourseRecord, ImportConfig, ImportPayload, NormalizeRequest};
use crate::{debug, info, warn};
use std::sync::Arc;

/// Courses a document normalized to, plus how many scraped rows failed
/// validation on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOutcome {
    pub courses: Vec<CourseRecord>,
    pub rejected: usize,
}

/// Parses, validates and canonicalizes one fetched document.
///
/// A document the adapter cannot read, or one that yields no rows at all, is
/// `NoData`. Rows that all fail validation produce an empty outcome; deciding
/// whether that is fatal is left to the caller.
pub fn normalize_document(
    adapter: &dyn SourceAdapter,
    document: &str,
) -> Result<NormalizeOutcome, ImportError> {
    let rows = adapter
        .produce_occurrences(document)
        .map_err(ImportError::NoData)?;
    if rows.is_empty() {
        return Err(ImportError::NoData(
            "document contains no schedule entries".to_string(),
        ));
    }

    let built = build_occurrences(rows);
    let courses = canonicalize(built.occurrences, adapter.merge_strategy());
    Ok(NormalizeOutcome {
        courses,
        rejected: built.rejected,
    })
}

/// Normalizes a document for an institution without fetching or persisting
/// anything. Backs the `/normalize` endpoint and the `normalize` binary.
pub fn normalize_request(
    sources: &SourcesConfig,
    request: &NormalizeRequest,
) -> Result<ImportPayload, ImportError> {
    let institution = sources
        .get(&request.institution)
        .ok_or_else(|| ImportError::UnknownInstitution(request.institution.clone()))?;
    let adapter = adapter_for(institution.source);

    let outcome = normalize_document(adapter, &request.document)?;
    if outcome.courses.is_empty() {
        return Err(ImportError::NoCourses {
            rejected: outcome.rejected,
        });
    }

    let discovery = adapter.discover_from_document(&request.document);
    Ok(institution
        .assembler(request.campus)
        .assemble(outcome.courses, discovery))
}

/// Runs [`normalize_request`] on the blocking pool so large documents do not
/// stall the async workers serving other requests.
pub async fn normalize_request_blocking(
    sources: Arc<SourcesConfig>,
    request: NormalizeRequest,
) -> Result<ImportPayload, ImportError> {
    tokio::task::spawn_blocking(move || normalize_request(&sources, &request))
        .await
        .map_err(|e| ImportError::Interrupted(e.to_string()))?
}

pub async fn run_import(
    ctx: &ImportContext,
    config: &ImportConfig,
    sources: &SourcesConfig,
) -> Result<ImportReport, ImportError> {
    if !config.confirmed {
        info!(ctx, "Import of {} cancelled before start", config.institution);
        return Err(ImportError::Cancelled);
    }

    let institution = sources
        .get(&config.institution)
        .ok_or_else(|| ImportError::UnknownInstitution(config.institution.clone()))?;
    let adapter = adapter_for(institution.source);
    info!(
        ctx,
        "Starting import for {} ({:?})", institution.name, institution.source
    );

    let user_start_date = config
        .semester_start_date
        .as_deref()
        .map(parse_start_date)
        .transpose()
        .map_err(ImportError::InvalidStartDate)?;

    let fetched = match adapter.discover_semester(ctx.fetcher.as_ref(), config).await {
        Ok(discovery) => discovery,
        Err(err) => {
            warn!(ctx, "Semester discovery failed, using presets: {}", err);
            SemesterDiscovery::default()
        }
    };

    let document = ctx
        .fetcher
        .fetch(&config.data_url)
        .await
        .map_err(ImportError::Fetch)?;
    debug!(ctx, "Fetched {} bytes from {}", document.len(), config.data_url);

    let outcome = normalize_document(adapter, &document)?;
    if outcome.rejected > 0 {
        warn!(ctx, "Rejected {} invalid occurrences", outcome.rejected);
    }
    if outcome.courses.is_empty() && !config.allow_empty {
        return Err(ImportError::NoCourses {
            rejected: outcome.rejected,
        });
    }

    let mut discovery = fetched.or(adapter.discover_from_document(&document));
    if user_start_date.is_some() {
        discovery.start_date = user_start_date;
    }
    let payload = institution
        .assembler(config.campus)
        .assemble(outcome.courses, discovery);
    info!(
        ctx,
        "Normalized {} courses, {} time slots, {} weeks",
        payload.courses.len(),
        payload.time_slots.len(),
        payload.config.semester_total_weeks
    );

    ctx.sink
        .save_courses(&payload.courses)
        .await
        .map_err(ImportError::Persist)?;
    ctx.sink
        .save_time_slots(&payload.time_slots)
        .await
        .map_err(|reason| ImportError::Incomplete {
            stage: "time slots",
            reason,
        })?;
    ctx.sink
        .save_config(&payload.config)
        .await
        .map_err(|reason| ImportError::Incomplete {
            stage: "config",
            reason,
        })?;

    info!(ctx, "Import for {} complete", institution.name);
    Ok(ImportReport {
        courses: payload.courses.len(),
        time_slots: payload.time_slots.len(),
        rejected: outcome.rejected,
        total_weeks: payload.config.semester_total_weeks,
    })
}
