//! Per-page controllers: the fetch-on-mount, submit-then-refresh,
//! delete-behind-confirmation wiring each resource page repeats.

use std::collections::BTreeMap;

use crate::client::{ApiClient, ApiError, Transport};
use crate::model::{Class, ClassDetail, DashboardStats, Student};
use crate::view::confirm::{ConfirmGate, CLASS_DELETE_PROMPT, STUDENT_DELETE_PROMPT};
use crate::view::filter::{ClassFilters, StudentFilters};
use crate::view::form::{ClassDraft, FormMode, ModalForm, StudentDraft};
use crate::view::state::{ListView, MutationOutcome, RefreshPolicy, Remote};

/// Students page. Student rows carry no server-derived aggregates, so
/// create/delete may patch the collection in place.
pub struct StudentsPage {
    pub list: ListView<Student>,
    pub filters: StudentFilters,
    pub form: ModalForm<StudentDraft>,
    pub confirm: ConfirmGate,
}

impl StudentsPage {
    pub fn new() -> Self {
        Self {
            list: ListView::new(RefreshPolicy::PatchLocal),
            filters: StudentFilters::default(),
            form: ModalForm::new(),
            confirm: ConfirmGate::new(),
        }
    }

    /// Issued on mount and on every manual retry.
    pub fn load<T: Transport>(&mut self, api: &mut ApiClient<T>) {
        let seq = self.list.begin_fetch();
        let outcome = api.students_list();
        self.list.resolve(seq, outcome);
    }

    pub fn open_add(&mut self) {
        self.form.open_create();
    }

    pub fn open_edit(&mut self, student: &Student) {
        self.form.open_edit(student.id, student);
    }

    /// Submits the modal form. Returns true when the entity was saved and
    /// the modal closed; false leaves the modal open with an inline error
    /// and the user's values intact.
    pub fn submit<T: Transport>(&mut self, api: &mut ApiClient<T>) -> bool {
        let Some(payload) = self.form.validated_payload() else {
            return false;
        };
        match self.form.mode() {
            FormMode::Create => match api.students_create(&payload) {
                Ok(created) => {
                    self.form.submit_succeeded();
                    if self.list.apply_create(created) == MutationOutcome::RefetchNeeded {
                        self.load(api);
                    }
                    true
                }
                Err(e) => {
                    self.form.submit_failed(&e.to_string());
                    false
                }
            },
            FormMode::Edit(id) => match api.students_update(id, &payload) {
                Ok(_) => {
                    self.form.submit_succeeded();
                    // Edits touch existing rows; refetch rather than patch.
                    self.load(api);
                    true
                }
                Err(e) => {
                    self.form.submit_failed(&e.to_string());
                    false
                }
            },
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        self.confirm.request(id, STUDENT_DELETE_PROMPT);
    }

    /// Runs the confirmed deletion, if one is pending. A failure is
    /// returned for the page to surface as a blocking alert.
    pub fn confirm_delete<T: Transport>(
        &mut self,
        api: &mut ApiClient<T>,
    ) -> Result<(), ApiError> {
        let Some(id) = self.confirm.confirm() else {
            return Ok(());
        };
        api.students_delete(id)?;
        if self.list.apply_delete(|s| s.id == id) == MutationOutcome::RefetchNeeded {
            self.load(api);
        }
        Ok(())
    }

    pub fn decline_delete(&mut self) {
        self.confirm.decline();
    }

    pub fn visible(&self) -> Vec<&Student> {
        let rows = self.list.rows().unwrap_or_default();
        self.filters.visible(rows, &self.list.search)
    }

    pub fn grade_options(&self) -> Vec<String> {
        StudentFilters::grade_options(self.list.rows().unwrap_or_default())
    }

    pub fn payment_options(&self) -> Vec<String> {
        StudentFilters::payment_options(self.list.rows().unwrap_or_default())
    }
}

impl Default for StudentsPage {
    fn default() -> Self {
        Self::new()
    }
}

/// Classes page. `studentCount` is computed by the server, so every
/// mutation goes back through a full refetch.
pub struct ClassesPage {
    pub list: ListView<Class>,
    pub filters: ClassFilters,
    pub form: ModalForm<ClassDraft>,
    pub confirm: ConfirmGate,
    pub detail: Remote<ClassDetail>,
}

impl ClassesPage {
    pub fn new() -> Self {
        Self {
            list: ListView::new(RefreshPolicy::Refetch),
            filters: ClassFilters::default(),
            form: ModalForm::new(),
            confirm: ConfirmGate::new(),
            detail: Remote::new(),
        }
    }

    pub fn load<T: Transport>(&mut self, api: &mut ApiClient<T>) {
        let seq = self.list.begin_fetch();
        let outcome = api.classes_list();
        self.list.resolve(seq, outcome);
    }

    pub fn open_detail<T: Transport>(&mut self, api: &mut ApiClient<T>, id: i64) {
        let seq = self.detail.begin();
        let outcome = api.classes_get(id);
        self.detail.resolve(seq, outcome);
    }

    pub fn open_add(&mut self) {
        self.form.open_create();
    }

    pub fn open_edit(&mut self, class: &Class) {
        self.form.open_edit(class.id, class);
    }

    pub fn submit<T: Transport>(&mut self, api: &mut ApiClient<T>) -> bool {
        let Some(payload) = self.form.validated_payload() else {
            return false;
        };
        let saved = match self.form.mode() {
            FormMode::Create => api.classes_create(&payload).map(|_| ()),
            FormMode::Edit(id) => api.classes_update(id, &payload).map(|_| ()),
        };
        match saved {
            Ok(()) => {
                self.form.submit_succeeded();
                self.load(api);
                true
            }
            Err(e) => {
                self.form.submit_failed(&e.to_string());
                false
            }
        }
    }

    pub fn request_delete(&mut self, id: i64) {
        self.confirm.request(id, CLASS_DELETE_PROMPT);
    }

    pub fn confirm_delete<T: Transport>(
        &mut self,
        api: &mut ApiClient<T>,
    ) -> Result<(), ApiError> {
        let Some(id) = self.confirm.confirm() else {
            return Ok(());
        };
        api.classes_delete(id)?;
        self.load(api);
        Ok(())
    }

    pub fn decline_delete(&mut self) {
        self.confirm.decline();
    }

    pub fn visible(&self) -> Vec<&Class> {
        let rows = self.list.rows().unwrap_or_default();
        self.filters.visible(rows, &self.list.search)
    }

    /// Visible classes bucketed by grade level, ascending, for the
    /// grade-section layout.
    pub fn grouped(&self) -> BTreeMap<i64, Vec<&Class>> {
        let mut groups: BTreeMap<i64, Vec<&Class>> = BTreeMap::new();
        for class in self.visible() {
            groups.entry(class.grade_level).or_default().push(class);
        }
        groups
    }

    pub fn grade_title(grade_level: i64) -> String {
        if grade_level == 0 {
            "Grade K (Kindergarten)".to_string()
        } else {
            format!("Grade {grade_level}")
        }
    }
}

impl Default for ClassesPage {
    fn default() -> Self {
        Self::new()
    }
}

/// Dashboard page: a read-only consumer of precomputed counts. No local
/// derivation happens here.
pub struct DashboardPage {
    pub stats: Remote<DashboardStats>,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            stats: Remote::new(),
        }
    }

    pub fn load<T: Transport>(&mut self, api: &mut ApiClient<T>) {
        let seq = self.stats.begin();
        let outcome = api.dashboard_stats();
        self.stats.resolve(seq, outcome);
    }
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}
