use crate::normalize::canonical::MergeStrategy;
use crate::normalize::occurrence::RawFields;
use crate::normalize::output::SemesterDiscovery;
use crate::runtime::fetcher::Fetcher;
use crate::types::{ImportConfig, SourceKind};
use async_trait::async_trait;

pub mod chaoxing;
pub mod common;
pub mod configs;
pub mod imut;
pub mod mtt;
pub mod zhengfang;

/// Turns one institution system's documents into raw occurrence rows. The
/// adapter never builds requests; URLs come from the job config.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn merge_strategy(&self) -> MergeStrategy;

    /// Parses a fetched timetable document. `Err` means the document carries
    /// no schedule collection at all.
    fn produce_occurrences(&self, document: &str) -> Result<Vec<RawFields>, String>;

    /// Reads time slots, start date or week count the source publishes next to
    /// the timetable. Failure is not fatal to an import.
    async fn discover_semester(
        &self,
        _fetcher: &dyn Fetcher,
        _config: &ImportConfig,
    ) -> Result<SemesterDiscovery, String> {
        Ok(SemesterDiscovery::default())
    }

    /// Semester facts embedded in the timetable document itself.
    fn discover_from_document(&self, _document: &str) -> SemesterDiscovery {
        SemesterDiscovery::default()
    }
}

pub fn adapter_for(source: SourceKind) -> &'static (dyn SourceAdapter + Send + Sync) {
    match source {
        SourceKind::Zhengfang => &zhengfang::adapter::ZHENGFANG_ADAPTER,
        SourceKind::Chaoxing => &chaoxing::adapter::CHAOXING_ADAPTER,
        SourceKind::Mtt => &mtt::adapter::MTT_ADAPTER,
        SourceKind::Imut => &imut::adapter::IMUT_ADAPTER,
    }
}
