use crate::classifier::EducationClassifier;
use crate::error::Result;
use crate::selector::{select, Selection};
use crate::types::{Filter, MemberSummary, Person};
use serde::{Deserialize, Serialize};

/// Party reported when the selected position has no caucus affiliation
pub const UNKNOWN_PARTY: &str = "Unknown";

/// Selector output for one record, without classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionReport {
    pub filename: String,
    pub title: String,
    pub end_year: Option<i32>,
    pub party: String,
    pub served_house: bool,
    pub served_senate: bool,
}

impl SelectionReport {
    pub fn new(filename: impl Into<String>, selection: &Selection<'_>) -> Self {
        Self {
            filename: filename.into(),
            title: selection.position.title.to_string(),
            end_year: selection.end_year(),
            party: party_of(selection),
            served_house: selection.served_house,
            served_senate: selection.served_senate,
        }
    }
}

/// Summary of one record tagged with the file it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileReport {
    pub filename: String,
    #[serde(flatten)]
    pub summary: MemberSummary,
}

fn party_of(selection: &Selection<'_>) -> String {
    selection
        .position
        .party
        .clone()
        .unwrap_or_else(|| UNKNOWN_PARTY.to_string())
}

/// Select the member's qualifying position and classify their biography.
///
/// Returns `Ok(None)` without calling the classifier when nothing qualifies.
pub fn summarize<C>(person: &Person, filter: &Filter, classifier: &C) -> Result<Option<MemberSummary>>
where
    C: EducationClassifier + ?Sized,
{
    let Some(selection) = select(person, filter) else {
        return Ok(None);
    };

    let label = classifier.classify(&person.biography)?;

    Ok(Some(MemberSummary {
        party: party_of(&selection),
        has_undergraduate: label.has_undergraduate(),
        has_graduate: label.has_graduate(),
    }))
}
