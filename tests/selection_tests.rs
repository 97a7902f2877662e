use party_ed::{load_person, select, ChamberFilter, EndYear, Filter, JobTitle, Person};
use std::path::PathBuf;

fn fixture(name: &str) -> Person {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    load_person(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

#[test]
fn any_chamber_without_floor_selects_latest_position() {
    let person = fixture("two_chambers.json");
    let selection = select(&person, &Filter::default()).expect("should select");

    assert_eq!(selection.position.title, JobTitle::Senator);
    assert_eq!(selection.end_year(), Some(2017));
    assert_eq!(selection.position.party.as_deref(), Some("Independent"));
}

#[test]
fn house_filter_selects_latest_house_term() {
    let person = fixture("two_chambers.json");
    let filter = Filter::default().chamber(ChamberFilter::House);
    let selection = select(&person, &filter).expect("should select");

    assert_eq!(selection.position.title, JobTitle::Representative);
    assert_eq!(selection.end_year(), Some(2011));
    assert_eq!(selection.position.party.as_deref(), Some("Republican"));
}

#[test]
fn senate_filter_without_senate_service_is_empty() {
    let person = fixture("house_only.json");
    let filter = Filter::default().chamber(ChamberFilter::Senate);
    assert!(select(&person, &filter).is_none());
}

#[test]
fn both_filter_reports_both_chambers() {
    let person = fixture("two_chambers.json");
    let filter = Filter::default().chamber(ChamberFilter::Both);
    let selection = select(&person, &filter).expect("should select");

    assert!(selection.served_house);
    assert!(selection.served_senate);
    assert_eq!(selection.end_year(), Some(2017));

    let house_only = fixture("house_only.json");
    assert!(select(&house_only, &filter).is_none());
}

#[test]
fn raising_floor_past_last_term_empties_result() {
    let person = fixture("house_only.json");
    assert!(select(&person, &Filter::default().min_year(2023)).is_some());
    assert!(select(&person, &Filter::default().min_year(2024)).is_none());
}

#[test]
fn malformed_dates_are_never_selected() {
    let person = fixture("malformed_dates.json");

    // The numeric entry is dropped; the undated Senate seat is kept but unknown
    assert_eq!(person.job_positions.len(), 2);
    assert_eq!(person.job_positions[0].end, EndYear::Unknown);

    let selection = select(&person, &Filter::default()).expect("should select");
    assert_eq!(selection.position.title.as_str(), "Delegate");
    assert_eq!(selection.end_year(), Some(1985));
    assert_eq!(selection.position.party, None);
    assert!(selection.served_senate);

    let filter = Filter::default().chamber(ChamberFilter::Senate);
    assert!(select(&person, &filter).is_none());
}

#[test]
fn floor_between_terms_picks_later_term() {
    let person = Person {
        job_positions: vec![
            party_ed::JobPosition::new("Representative", EndYear::Year(2010), None),
            party_ed::JobPosition::new("Senator", EndYear::Year(2015), None),
        ],
        biography: String::new(),
    };

    let selection = select(&person, &Filter::default().min_year(2012)).expect("should select");
    assert_eq!(selection.position.title, JobTitle::Senator);
    assert!(select(&person, &Filter::default().min_year(2020)).is_none());
}

#[test]
fn malformed_party_still_selects_latest_term() {
    let person = fixture("malformed_party.json");
    assert_eq!(person.job_positions.len(), 3);

    let selection = select(&person, &Filter::default()).expect("should select");
    assert_eq!(selection.position.title, JobTitle::Senator);
    assert_eq!(selection.end_year(), Some(2023));
    assert_eq!(selection.position.party, None);
    assert!(selection.served_house);
    assert!(selection.served_senate);
}

#[test]
fn null_positions_select_nothing() {
    let person = fixture("null_positions.json");
    assert!(person.job_positions.is_empty());
    assert!(select(&person, &Filter::default()).is_none());
    assert!(select(&person, &Filter::default().chamber(ChamberFilter::Both)).is_none());
}
