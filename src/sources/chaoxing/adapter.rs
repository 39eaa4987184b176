use crate::normalize::canonical::MergeStrategy;
use crate::normalize::occurrence::RawFields;
use crate::normalize::output::SemesterDiscovery;
use crate::runtime::fetcher::Fetcher;
use crate::sources::chaoxing::discover::parse_week_calendar;
use crate::sources::chaoxing::parser::parse_course_data;
use crate::sources::SourceAdapter;
use crate::types::ImportConfig;
use async_trait::async_trait;

pub struct ChaoxingAdapter;

pub const CHAOXING_ADAPTER: ChaoxingAdapter = ChaoxingAdapter;

#[async_trait]
impl SourceAdapter for ChaoxingAdapter {
    fn merge_strategy(&self) -> MergeStrategy {
        MergeStrategy::SectionAdjacency
    }

    fn produce_occurrences(&self, document: &str) -> Result<Vec<RawFields>, String> {
        parse_course_data(document)
    }

    async fn discover_semester(
        &self,
        fetcher: &dyn Fetcher,
        config: &ImportConfig,
    ) -> Result<SemesterDiscovery, String> {
        let Some(url) = config.semester_url.as_deref() else {
            return Ok(SemesterDiscovery::default());
        };
        let document = fetcher.fetch(url).await?;
        parse_week_calendar(&document)
    }
}
