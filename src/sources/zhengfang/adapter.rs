use crate::normalize::canonical::MergeStrategy;
use crate::normalize::occurrence::RawFields;
use crate::sources::zhengfang::parser::parse_kb_list;
use crate::sources::SourceAdapter;
use async_trait::async_trait;

pub struct ZhengfangAdapter;

pub const ZHENGFANG_ADAPTER: ZhengfangAdapter = ZhengfangAdapter;

#[async_trait]
impl SourceAdapter for ZhengfangAdapter {
    fn merge_strategy(&self) -> MergeStrategy {
        MergeStrategy::IdentityUnion
    }

    fn produce_occurrences(&self, document: &str) -> Result<Vec<RawFields>, String> {
        parse_kb_list(document)
    }
}
