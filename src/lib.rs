//! Party and education attainment lookup for members of Congress.
//!
//! Reads Bioguide member records, selects the most recent job position
//! that passes a chamber and year filter, and classifies the member's
//! biography into undergraduate/graduate attainment through an external
//! text classification service.

pub mod classifier;
pub mod config;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod profile;
pub mod report;
pub mod selector;
pub mod types;

pub use classifier::{EducationClassifier, OpenAiClassifier, ReplyParser};
pub use config::{ClassifierConfig, ClassifierConfigBuilder, FileConfig, SecretFiles};
pub use discovery::{discover_records, Discovered, RecordFile};
pub use error::{Error, Result};
pub use profile::{load_person, parse_person};
pub use report::{summarize, ProfileReport, SelectionReport};
pub use selector::{select, Selection};
pub use types::{
    ChamberFilter, EducationLabel, EndYear, Filter, JobPosition, JobTitle, MemberSummary, Person,
};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::classifier::{EducationClassifier, OpenAiClassifier};
    pub use crate::config::{ClassifierConfig, ClassifierConfigBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::selector::{select, Selection};
    pub use crate::types::{ChamberFilter, Filter, MemberSummary, Person};
}
