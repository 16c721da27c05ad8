//! Academics vocabulary (classes, terms, sessions) and the in-memory list
//! filtering the portal pages apply after fetching from the API.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::entities::{ReportCard, Student};
use crate::error::SchoolError;

// ---------------------------------------------------------------------------
// Class levels
// ---------------------------------------------------------------------------

/// The six class levels, junior secondary through senior secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ClassLevel {
    Jss1,
    Jss2,
    Jss3,
    Sss1,
    Sss2,
    Sss3,
}

impl ClassLevel {
    pub const ALL: [ClassLevel; 6] = [
        ClassLevel::Jss1,
        ClassLevel::Jss2,
        ClassLevel::Jss3,
        ClassLevel::Sss1,
        ClassLevel::Sss2,
        ClassLevel::Sss3,
    ];

    /// Wire string, e.g. "JSS1".
    pub fn as_str(self) -> &'static str {
        match self {
            ClassLevel::Jss1 => "JSS1",
            ClassLevel::Jss2 => "JSS2",
            ClassLevel::Jss3 => "JSS3",
            ClassLevel::Sss1 => "SSS1",
            ClassLevel::Sss2 => "SSS2",
            ClassLevel::Sss3 => "SSS3",
        }
    }

    /// Display label, e.g. "JSS 1".
    pub fn label(self) -> &'static str {
        match self {
            ClassLevel::Jss1 => "JSS 1",
            ClassLevel::Jss2 => "JSS 2",
            ClassLevel::Jss3 => "JSS 3",
            ClassLevel::Sss1 => "SSS 1",
            ClassLevel::Sss2 => "SSS 2",
            ClassLevel::Sss3 => "SSS 3",
        }
    }
}

impl fmt::Display for ClassLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClassLevel {
    type Err = SchoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "JSS1" => Ok(ClassLevel::Jss1),
            "JSS2" => Ok(ClassLevel::Jss2),
            "JSS3" => Ok(ClassLevel::Jss3),
            "SSS1" => Ok(ClassLevel::Sss1),
            "SSS2" => Ok(ClassLevel::Sss2),
            "SSS3" => Ok(ClassLevel::Sss3),
            other => Err(SchoolError::Validation(format!("unknown class: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Terms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Term {
    First,
    Second,
    Third,
}

impl Term {
    pub const ALL: [Term; 3] = [Term::First, Term::Second, Term::Third];

    /// Wire string, e.g. "First".
    pub fn as_str(self) -> &'static str {
        match self {
            Term::First => "First",
            Term::Second => "Second",
            Term::Third => "Third",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Term::First => "First Term",
            Term::Second => "Second Term",
            Term::Third => "Third Term",
        }
    }

    /// Ordering key for an unparsed wire string; unknown terms sort last.
    fn order_of(s: &str) -> u8 {
        match s.parse::<Term>() {
            Ok(Term::First) => 0,
            Ok(Term::Second) => 1,
            Ok(Term::Third) => 2,
            Err(_) => 3,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Term {
    type Err = SchoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Term::First),
            "second" => Ok(Term::Second),
            "third" => Ok(Term::Third),
            other => Err(SchoolError::Validation(format!("unknown term: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// An academic session such as "2023/2024". The second year must follow the
/// first; anything else is rejected before it reaches a query string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Session(String);

fn session_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})/(\d{4})$").expect("session regex"))
}

impl Session {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The session starting in `year`, e.g. `Session::starting(2023)` is
    /// "2023/2024".
    pub fn starting(year: i32) -> Self {
        Session(format!("{year}/{}", year + 1))
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Session {
    type Err = SchoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let caps = session_re()
            .captures(s)
            .ok_or_else(|| SchoolError::Validation(format!("malformed session: {s}")))?;
        let start: i32 = caps[1].parse().expect("four digits");
        let end: i32 = caps[2].parse().expect("four digits");
        if end != start + 1 {
            return Err(SchoolError::Validation(format!(
                "session years must be consecutive: {s}"
            )));
        }
        Ok(Session(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// List filtering & grouping
// ---------------------------------------------------------------------------

/// Search + dropdown filtering for the admin students page. `query` matches
/// name or admission number case-insensitively; `class` and `active` are
/// exact filters when present.
pub fn filter_students<'a>(
    students: &'a [Student],
    query: &str,
    class: Option<&str>,
    active: Option<bool>,
) -> Vec<&'a Student> {
    let needle = query.trim().to_lowercase();
    students
        .iter()
        .filter(|s| {
            needle.is_empty()
                || s.full_name.to_lowercase().contains(&needle)
                || s.admission_number.to_lowercase().contains(&needle)
        })
        .filter(|s| class.is_none_or(|c| s.current_class == c))
        .filter(|s| active.is_none_or(|a| s.is_active == a))
        .collect()
}

/// Dropdown filtering for the admin report cards page.
pub fn filter_report_cards<'a>(
    cards: &'a [ReportCard],
    class: Option<&str>,
    term: Option<&str>,
    session: Option<&str>,
) -> Vec<&'a ReportCard> {
    cards
        .iter()
        .filter(|c| class.is_none_or(|v| c.class_name == v))
        .filter(|c| term.is_none_or(|v| c.term == v))
        .filter(|c| session.is_none_or(|v| c.session == v))
        .collect()
}

/// Group report cards by session for the student academic-reports page.
/// Latest session first; within a session, term order.
pub fn group_report_cards(cards: &[ReportCard]) -> Vec<(String, Vec<&ReportCard>)> {
    let mut grouped: Vec<(String, Vec<&ReportCard>)> = Vec::new();
    for card in cards {
        match grouped.iter_mut().find(|(s, _)| *s == card.session) {
            Some((_, bucket)) => bucket.push(card),
            None => grouped.push((card.session.clone(), vec![card])),
        }
    }
    grouped.sort_by(|a, b| b.0.cmp(&a.0));
    for (_, bucket) in &mut grouped {
        bucket.sort_by_key(|c| Term::order_of(&c.term));
    }
    grouped
}

/// Sorted distinct values for a filter dropdown.
pub fn unique_values<T, F>(items: &[T], f: F) -> Vec<String>
where
    F: Fn(&T) -> &str,
{
    let mut values: Vec<String> = items.iter().map(|i| f(i).to_string()).collect();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn student(name: &str, admission: &str, class: &str, active: bool) -> Student {
        Student {
            full_name: name.to_string(),
            admission_number: admission.to_string(),
            current_class: class.to_string(),
            gender: "female".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2010, 3, 14).unwrap(),
            guardian_name: "A. Guardian".to_string(),
            guardian_phone: "+2348012345678".to_string(),
            guardian_email: "guardian@example.com".to_string(),
            is_active: active,
            date_admitted: NaiveDate::from_ymd_opt(2022, 9, 12).unwrap(),
            state_of_origin: "lagos".to_string(),
            local_government: "Ikeja".to_string(),
        }
    }

    fn card(id: &str, term: &str, session: &str, class: &str) -> ReportCard {
        ReportCard {
            id: id.to_string(),
            student_id: "MAS-2024-0001".to_string(),
            term: term.to_string(),
            session: session.to_string(),
            class_name: class.to_string(),
            position_in_class: Some(5),
            total_students: Some(30),
            attendance: 112,
            date_generated: NaiveDate::from_ymd_opt(2024, 7, 19).unwrap(),
            teacher_name: None,
            principal_name: None,
            teacher_remark: None,
            principal_remark: None,
            subjects: vec![],
        }
    }

    #[test]
    fn class_filter_only_keeps_matching_records() {
        let students = vec![
            student("Adaeze Obi", "MAS-2024-0001", "JSS1", true),
            student("Bola Ahmed", "MAS-2024-0002", "SSS3", true),
            student("Chidi Eze", "MAS-2023-0117", "JSS1", false),
        ];
        let filtered = filter_students(&students, "", Some("JSS1"), None);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|s| s.current_class == "JSS1"));
    }

    #[test]
    fn search_matches_name_or_admission_number() {
        let students = vec![
            student("Adaeze Obi", "MAS-2024-0001", "JSS1", true),
            student("Bola Ahmed", "MAS-2024-0002", "SSS3", true),
        ];
        assert_eq!(filter_students(&students, "adaeze", None, None).len(), 1);
        assert_eq!(filter_students(&students, "0002", None, None).len(), 1);
        assert_eq!(filter_students(&students, "nobody", None, None).len(), 0);
    }

    #[test]
    fn active_filter_composes_with_class() {
        let students = vec![
            student("Adaeze Obi", "MAS-2024-0001", "JSS1", true),
            student("Chidi Eze", "MAS-2023-0117", "JSS1", false),
        ];
        let filtered = filter_students(&students, "", Some("JSS1"), Some(false));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].admission_number, "MAS-2023-0117");
    }

    #[test]
    fn report_cards_group_latest_session_first_in_term_order() {
        let cards = vec![
            card("rc-3", "Third", "2022/2023", "JSS2"),
            card("rc-4", "First", "2023/2024", "JSS3"),
            card("rc-1", "Second", "2022/2023", "JSS2"),
            card("rc-2", "First", "2022/2023", "JSS2"),
        ];
        let grouped = group_report_cards(&cards);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, "2023/2024");
        let old: Vec<&str> = grouped[1].1.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(old, vec!["rc-2", "rc-1", "rc-3"]);
    }

    #[test]
    fn report_card_filters_are_independent() {
        let cards = vec![
            card("rc-1", "First", "2023/2024", "JSS1"),
            card("rc-2", "Second", "2023/2024", "JSS1"),
            card("rc-3", "First", "2022/2023", "SSS1"),
        ];
        assert_eq!(filter_report_cards(&cards, Some("JSS1"), None, None).len(), 2);
        assert_eq!(filter_report_cards(&cards, None, Some("First"), None).len(), 2);
        assert_eq!(
            filter_report_cards(&cards, Some("JSS1"), Some("First"), Some("2023/2024")).len(),
            1
        );
    }

    #[test]
    fn session_rejects_non_consecutive_years() {
        assert!("2023/2024".parse::<Session>().is_ok());
        assert!("2023/2025".parse::<Session>().is_err());
        assert!("23/24".parse::<Session>().is_err());
        assert!("2023-2024".parse::<Session>().is_err());
        assert_eq!(Session::starting(2024).as_str(), "2024/2025");
    }

    #[test]
    fn class_and_term_round_trip_wire_strings() {
        for class in ClassLevel::ALL {
            assert_eq!(class.as_str().parse::<ClassLevel>().unwrap(), class);
        }
        for term in Term::ALL {
            assert_eq!(term.as_str().parse::<Term>().unwrap(), term);
        }
        assert!("JSS4".parse::<ClassLevel>().is_err());
        assert!("Fourth".parse::<Term>().is_err());
    }

    #[test]
    fn unique_values_sorted_and_deduped() {
        let cards = vec![
            card("rc-1", "First", "2023/2024", "JSS1"),
            card("rc-2", "First", "2022/2023", "JSS1"),
            card("rc-3", "Second", "2023/2024", "SSS1"),
        ];
        assert_eq!(
            unique_values(&cards, |c| c.session.as_str()),
            vec!["2022/2023", "2023/2024"]
        );
        assert_eq!(unique_values(&cards, |c| c.class_name.as_str()), vec!["JSS1", "SSS1"]);
    }
}
