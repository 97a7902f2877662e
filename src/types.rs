use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A member of Congress as loaded from a Bioguide record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub job_positions: Vec<JobPosition>,
    pub biography: String,
}

/// One congressional tenure
#[derive(Debug, Clone, PartialEq)]
pub struct JobPosition {
    pub title: JobTitle,
    pub end: EndYear,
    /// Party of the first caucus affiliation for this tenure
    pub party: Option<String>,
}

impl JobPosition {
    pub fn new(title: impl Into<JobTitle>, end: EndYear, party: Option<String>) -> Self {
        Self {
            title: title.into(),
            end,
            party,
        }
    }
}

/// Job title of a position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobTitle {
    Representative,
    Senator,
    /// Delegate, Resident Commissioner and anything else the record names
    Other(String),
}

impl JobTitle {
    pub fn as_str(&self) -> &str {
        match self {
            JobTitle::Representative => "Representative",
            JobTitle::Senator => "Senator",
            JobTitle::Other(name) => name,
        }
    }
}

impl From<&str> for JobTitle {
    fn from(s: &str) -> Self {
        match s {
            "Representative" => JobTitle::Representative,
            "Senator" => JobTitle::Senator,
            other => JobTitle::Other(other.to_string()),
        }
    }
}

impl fmt::Display for JobTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last year of the Congress a position belongs to.
///
/// `Unknown` covers missing and malformed dates and orders below every
/// known year, so it never wins a "most recent" comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EndYear {
    Unknown,
    Year(i32),
}

impl EndYear {
    /// Derive the end year from a `yyyy-mm-dd` date string.
    ///
    /// Only the first `-`-separated component is read.
    pub fn from_date(date: Option<&str>) -> Self {
        date.and_then(|d| d.split('-').next())
            .and_then(|year| year.trim().parse::<i32>().ok())
            .map_or(EndYear::Unknown, EndYear::Year)
    }

    pub fn year(self) -> Option<i32> {
        match self {
            EndYear::Year(y) => Some(y),
            EndYear::Unknown => None,
        }
    }

    /// Whether this year clears an optional floor. Unknown years never do.
    pub fn meets(self, min_year: Option<i32>) -> bool {
        match (self, min_year) {
            (EndYear::Unknown, _) => false,
            (EndYear::Year(_), None) => true,
            (EndYear::Year(y), Some(min)) => y >= min,
        }
    }
}

/// Chamber requirement applied during selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChamberFilter {
    #[default]
    Any,
    House,
    Senate,
    /// Person must have served in both chambers
    Both,
}

impl FromStr for ChamberFilter {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" => Ok(ChamberFilter::Any),
            "house" | "1" => Ok(ChamberFilter::House),
            "senate" | "2" => Ok(ChamberFilter::Senate),
            "both" | "3" => Ok(ChamberFilter::Both),
            other => Err(Error::Config(format!(
                "Invalid chamber '{}'. Allowed values are: any, house, senate, both",
                other
            ))),
        }
    }
}

/// Eligibility filter for selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Filter {
    /// `None` means no lower bound
    pub min_year: Option<i32>,
    pub chamber: ChamberFilter,
}

impl Filter {
    pub fn new(min_year: Option<i32>, chamber: ChamberFilter) -> Self {
        Self { min_year, chamber }
    }

    pub fn min_year(mut self, year: i32) -> Self {
        self.min_year = Some(year);
        self
    }

    pub fn chamber(mut self, chamber: ChamberFilter) -> Self {
        self.chamber = chamber;
        self
    }
}

/// Education attainment reported by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EducationLabel {
    None,
    UndergraduateOnly,
    GraduateOnly,
    Both,
}

impl EducationLabel {
    pub fn has_undergraduate(self) -> bool {
        matches!(self, EducationLabel::UndergraduateOnly | EducationLabel::Both)
    }

    pub fn has_graduate(self) -> bool {
        matches!(self, EducationLabel::GraduateOnly | EducationLabel::Both)
    }
}

/// Final per-member output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub party: String,
    pub has_undergraduate: bool,
    pub has_graduate: bool,
}
