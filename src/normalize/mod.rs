pub mod canonical;
pub mod fields;
pub mod occurrence;
pub mod output;
pub mod sections;
pub mod weeks;

pub use canonical::{canonicalize, MergeStrategy};
pub use occurrence::{build_occurrences, BuildOutcome, RawFields, RawOccurrence, WeekInfo};
pub use output::{OutputAssembler, SemesterDiscovery};
pub use sections::{SectionInfo, SectionRange};
pub use weeks::WeekSet;
