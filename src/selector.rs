//! Eligibility filtering and "most recent qualifying position" selection.

use crate::types::{ChamberFilter, Filter, JobPosition, JobTitle, Person};

/// Outcome of a successful selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection<'a> {
    /// Qualifying position with the greatest end year
    pub position: &'a JobPosition,
    /// Whether any position in the record is a House seat
    pub served_house: bool,
    /// Whether any position in the record is a Senate seat
    pub served_senate: bool,
}

impl Selection<'_> {
    pub fn end_year(&self) -> Option<i32> {
        self.position.end.year()
    }
}

fn matches_chamber(position: &JobPosition, chamber: ChamberFilter) -> bool {
    match chamber {
        ChamberFilter::House => position.title == JobTitle::Representative,
        ChamberFilter::Senate => position.title == JobTitle::Senator,
        // Both is decided per person, not per position
        ChamberFilter::Any | ChamberFilter::Both => true,
    }
}

/// Select the most recent position that satisfies `filter`.
///
/// Returns `None` when no position qualifies. Positions with unknown end
/// years are never selected. Ties on end year go to the earliest entry.
/// With [`ChamberFilter::Both`] the person must hold at least one House and
/// one Senate position, and the most recent year-eligible position of any
/// kind is returned.
pub fn select<'a>(person: &'a Person, filter: &Filter) -> Option<Selection<'a>> {
    let mut served_house = false;
    let mut served_senate = false;
    let mut best: Option<&JobPosition> = None;

    for position in &person.job_positions {
        served_house |= position.title == JobTitle::Representative;
        served_senate |= position.title == JobTitle::Senator;

        if !position.end.meets(filter.min_year) || !matches_chamber(position, filter.chamber) {
            continue;
        }

        // Strict comparison keeps the first of equal end years
        if best.map_or(true, |current| position.end > current.end) {
            best = Some(position);
        }
    }

    if filter.chamber == ChamberFilter::Both && !(served_house && served_senate) {
        return None;
    }

    let position = best?;
    if !position.end.meets(filter.min_year) {
        return None;
    }

    Some(Selection {
        position,
        served_house,
        served_senate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EndYear;

    fn pos(title: &str, year: i32) -> JobPosition {
        JobPosition::new(title, EndYear::Year(year), Some(format!("{title} party")))
    }

    fn person(positions: Vec<JobPosition>) -> Person {
        Person {
            job_positions: positions,
            biography: String::new(),
        }
    }

    #[test]
    fn test_any_picks_latest() {
        let p = person(vec![pos("Representative", 2010), pos("Senator", 2015)]);
        let selection = select(&p, &Filter::default().min_year(2012)).unwrap();
        assert_eq!(selection.position.title, JobTitle::Senator);
        assert_eq!(selection.end_year(), Some(2015));
        assert!(selection.served_house);
        assert!(selection.served_senate);
    }

    #[test]
    fn test_floor_above_all_years_is_empty() {
        let p = person(vec![pos("Representative", 2010), pos("Senator", 2015)]);
        assert!(select(&p, &Filter::default().min_year(2020)).is_none());
    }

    #[test]
    fn test_house_filter_skips_later_senate_seat() {
        let p = person(vec![pos("Representative", 2010), pos("Senator", 2015)]);
        let filter = Filter::default().chamber(ChamberFilter::House);
        let selection = select(&p, &filter).unwrap();
        assert_eq!(selection.position.title, JobTitle::Representative);
        assert_eq!(selection.end_year(), Some(2010));
    }

    #[test]
    fn test_house_filter_without_house_service() {
        let p = person(vec![pos("Senator", 2015), pos("Senator", 2021)]);
        let filter = Filter::default().chamber(ChamberFilter::House);
        assert!(select(&p, &filter).is_none());
    }

    #[test]
    fn test_senate_filter_respects_floor() {
        let p = person(vec![pos("Senator", 2005), pos("Representative", 2019)]);
        let filter = Filter::new(Some(2010), ChamberFilter::Senate);
        assert!(select(&p, &filter).is_none());
    }

    #[test]
    fn test_both_requires_both_chambers() {
        let p = person(vec![pos("Senator", 2015), pos("Senator", 2021)]);
        assert!(select(&p, &Filter::default().chamber(ChamberFilter::Both)).is_none());

        let p = person(vec![
            pos("Representative", 2009),
            pos("Senator", 2021),
            pos("Delegate", 2023),
        ]);
        let selection = select(&p, &Filter::default().chamber(ChamberFilter::Both)).unwrap();
        assert!(selection.served_house && selection.served_senate);
        assert_eq!(selection.position.title.as_str(), "Delegate");
    }

    #[test]
    fn test_both_counts_service_below_floor() {
        // House service before the floor still counts toward both-chamber service
        let p = person(vec![pos("Representative", 1995), pos("Senator", 2021)]);
        let filter = Filter::new(Some(2000), ChamberFilter::Both);
        let selection = select(&p, &filter).unwrap();
        assert_eq!(selection.position.title, JobTitle::Senator);
    }

    #[test]
    fn test_ties_go_to_first_occurrence() {
        let p = person(vec![
            JobPosition::new("Representative", EndYear::Year(2013), Some("first".into())),
            JobPosition::new("Representative", EndYear::Year(2013), Some("second".into())),
        ]);
        let selection = select(&p, &Filter::default()).unwrap();
        assert_eq!(selection.position.party.as_deref(), Some("first"));
    }

    #[test]
    fn test_unknown_end_year_never_selected() {
        let p = person(vec![JobPosition::new("Senator", EndYear::Unknown, None)]);
        let selection = select(&p, &Filter::default());
        assert!(selection.is_none());

        let p = person(vec![
            JobPosition::new("Senator", EndYear::Unknown, None),
            pos("Representative", 1901),
        ]);
        let selection = select(&p, &Filter::default()).unwrap();
        assert_eq!(selection.end_year(), Some(1901));
        assert!(selection.served_senate);
    }

    #[test]
    fn test_empty_record() {
        let p = person(vec![]);
        assert!(select(&p, &Filter::default()).is_none());
        assert!(select(&p, &Filter::default().chamber(ChamberFilter::Both)).is_none());
    }
}
