//! Client-only teacher roster. There is no teachers table yet: records
//! live in page-local memory and are lost on reload. Known limitation,
//! kept deliberately until a backing store exists.

use crate::model::{Degree, TeacherRecord, TeacherStatus};
use crate::view::confirm::{ConfirmGate, TEACHER_DELETE_PROMPT};
use crate::view::filter::search_matches;

/// Which slice of the roster the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RosterView {
    /// Everyone not terminated, on-leave included.
    #[default]
    Active,
    Terminated,
}

pub struct TeacherRoster {
    teachers: Vec<TeacherRecord>,
    pub view: RosterView,
    pub search: String,
    pub confirm: ConfirmGate,
}

impl TeacherRoster {
    pub fn new() -> Self {
        Self {
            teachers: Vec::new(),
            view: RosterView::Active,
            search: String::new(),
            confirm: ConfirmGate::new(),
        }
    }

    /// Roster pre-loaded with the demo records the page ships with.
    pub fn with_seed_data() -> Self {
        let mut roster = Self::new();
        roster.teachers = vec![
            TeacherRecord {
                id: 1,
                name: "Sarah Connor".to_string(),
                subject: "Mathematics".to_string(),
                degree: Degree::Master,
                phone: "+1 234 567 8900".to_string(),
                status: TeacherStatus::Active,
                termination_reason: None,
            },
            TeacherRecord {
                id: 2,
                name: "James Cameron".to_string(),
                subject: "Science".to_string(),
                degree: Degree::Phd,
                phone: "+1 987 654 3210".to_string(),
                status: TeacherStatus::OnLeave,
                termination_reason: None,
            },
            TeacherRecord {
                id: 3,
                name: "Arnold Schwarzenegger".to_string(),
                subject: "Physical Education".to_string(),
                degree: Degree::Bachelor,
                phone: "+1 555 123 4567".to_string(),
                status: TeacherStatus::Terminated,
                termination_reason: Some("Contract Expired".to_string()),
            },
        ];
        roster
    }

    pub fn teachers(&self) -> &[TeacherRecord] {
        &self.teachers
    }

    /// Adds a teacher and returns its id, assigned as current max + 1.
    /// Non-durable, and ids may repeat across reloads; within one session
    /// max+1 never reuses an id freed by a deletion.
    pub fn add(
        &mut self,
        name: &str,
        subject: &str,
        degree: Degree,
        phone: &str,
    ) -> Result<i64, String> {
        if name.trim().is_empty() || subject.trim().is_empty() {
            return Err("Name and subject are required".to_string());
        }
        let id = self.teachers.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        self.teachers.push(TeacherRecord {
            id,
            name: name.trim().to_string(),
            subject: subject.trim().to_string(),
            degree,
            phone: phone.trim().to_string(),
            status: TeacherStatus::Active,
            termination_reason: None,
        });
        Ok(id)
    }

    pub fn terminate(&mut self, id: i64, reason: &str) -> bool {
        match self.teachers.iter_mut().find(|t| t.id == id) {
            Some(teacher) => {
                teacher.status = TeacherStatus::Terminated;
                teacher.termination_reason = Some(reason.to_string());
                true
            }
            None => false,
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        self.confirm.request(id, TEACHER_DELETE_PROMPT);
    }

    /// Removes the pending teacher once the user confirms.
    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.confirm.confirm() {
            self.teachers.retain(|t| t.id != id);
        }
    }

    pub fn decline_delete(&mut self) {
        self.confirm.decline();
    }

    pub fn visible(&self) -> Vec<&TeacherRecord> {
        self.teachers
            .iter()
            .filter(|t| {
                let in_view = match self.view {
                    RosterView::Active => t.status != TeacherStatus::Terminated,
                    RosterView::Terminated => t.status == TeacherStatus::Terminated,
                };
                in_view && search_matches(*t, &self.search)
            })
            .collect()
    }
}

impl Default for TeacherRoster {
    fn default() -> Self {
        Self::new()
    }
}
