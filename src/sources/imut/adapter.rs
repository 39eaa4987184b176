use crate::normalize::canonical::MergeStrategy;
use crate::normalize::occurrence::RawFields;
use crate::normalize::output::SemesterDiscovery;
use crate::runtime::fetcher::Fetcher;
use crate::sources::imut::discover::{parse_period_headers, parse_week_page};
use crate::sources::imut::parser::parse_timetable;
use crate::sources::SourceAdapter;
use crate::types::ImportConfig;
use async_trait::async_trait;

pub struct ImutAdapter;

pub const IMUT_ADAPTER: ImutAdapter = ImutAdapter;

#[async_trait]
impl SourceAdapter for ImutAdapter {
    fn merge_strategy(&self) -> MergeStrategy {
        MergeStrategy::SectionAdjacency
    }

    fn produce_occurrences(&self, document: &str) -> Result<Vec<RawFields>, String> {
        parse_timetable(document)
    }

    async fn discover_semester(
        &self,
        fetcher: &dyn Fetcher,
        config: &ImportConfig,
    ) -> Result<SemesterDiscovery, String> {
        let Some(url) = config.weeks_url.as_deref() else {
            return Ok(SemesterDiscovery::default());
        };
        let document = fetcher.fetch(url).await?;
        parse_week_page(&document)
    }

    fn discover_from_document(&self, document: &str) -> SemesterDiscovery {
        let slots = parse_period_headers(document);
        SemesterDiscovery {
            time_slots: (!slots.is_empty()).then_some(slots),
            ..SemesterDiscovery::default()
        }
    }
}
