//! Pure projections over an already-fetched collection: filter option sets
//! and the visible subset. Deterministic and total; absent fields count as
//! empty strings.

use crate::model::{Class, Student, TeacherRecord};

pub const ALL: &str = "All";

/// One filter axis: either the "All" sentinel (matches every row) or an
/// exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Value(String),
}

impl Filter {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Filter::All => true,
            Filter::Value(v) => v == value,
        }
    }
}

/// Text the search box runs against, concatenated from the entity's
/// searchable fields.
pub trait Searchable {
    fn searchable_text(&self) -> String;
}

impl Searchable for Student {
    fn searchable_text(&self) -> String {
        self.name.clone()
    }
}

impl Searchable for Class {
    fn searchable_text(&self) -> String {
        format!(
            "{} {} {}",
            self.class_name,
            self.teacher_name.as_deref().unwrap_or_default(),
            self.room_number.as_deref().unwrap_or_default(),
        )
    }
}

impl Searchable for TeacherRecord {
    fn searchable_text(&self) -> String {
        format!("{} {}", self.name, self.subject)
    }
}

/// Case-insensitive substring match; the empty term matches everything.
pub fn search_matches<T: Searchable>(row: &T, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    row.searchable_text()
        .to_lowercase()
        .contains(&term.to_lowercase())
}

/// Distinct option set for one axis, "All" first, first-seen order after.
pub fn distinct_options<S: AsRef<str>>(values: impl Iterator<Item = S>) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for v in values {
        let v = v.as_ref();
        if !options.iter().any(|o| o == v) {
            options.push(v.to_string());
        }
    }
    options
}

/// Filter axes of the Students page: class label and payment status.
#[derive(Debug, Default)]
pub struct StudentFilters {
    pub grade: Filter,
    pub payment: Filter,
}

impl StudentFilters {
    fn row_matches(&self, student: &Student, search: &str) -> bool {
        search_matches(student, search)
            && self.grade.matches(&student.grade)
            && self.payment.matches(student.payment_status.label())
    }

    pub fn visible<'a>(&self, rows: &'a [Student], search: &str) -> Vec<&'a Student> {
        rows.iter()
            .filter(|s| self.row_matches(s, search))
            .collect()
    }

    pub fn grade_options(rows: &[Student]) -> Vec<String> {
        distinct_options(rows.iter().map(|s| s.grade.as_str()))
    }

    pub fn payment_options(rows: &[Student]) -> Vec<String> {
        distinct_options(rows.iter().map(|s| s.payment_status.label()))
    }
}

/// Filter axis of the Classes page: grade level.
#[derive(Debug, Default)]
pub struct ClassFilters {
    pub grade_level: Filter,
}

impl ClassFilters {
    pub fn visible<'a>(&self, rows: &'a [Class], search: &str) -> Vec<&'a Class> {
        rows.iter()
            .filter(|c| {
                search_matches(*c, search) && self.grade_level.matches(&c.grade_level.to_string())
            })
            .collect()
    }

    pub fn grade_options(rows: &[Class]) -> Vec<String> {
        distinct_options(rows.iter().map(|c| c.grade_level.to_string()))
    }
}
