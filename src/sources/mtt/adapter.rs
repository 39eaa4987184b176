use crate::normalize::canonical::MergeStrategy;
use crate::normalize::occurrence::RawFields;
use crate::sources::mtt::parser::parse_grid;
use crate::sources::SourceAdapter;
use async_trait::async_trait;

pub struct MttAdapter;

pub const MTT_ADAPTER: MttAdapter = MttAdapter;

#[async_trait]
impl SourceAdapter for MttAdapter {
    fn merge_strategy(&self) -> MergeStrategy {
        MergeStrategy::IdentityUnion
    }

    fn produce_occurrences(&self, document: &str) -> Result<Vec<RawFields>, String> {
        parse_grid(document)
    }
}
