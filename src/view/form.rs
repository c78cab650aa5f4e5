//! Modal create/edit form lifecycle. Drafts hold field text exactly as the
//! user typed it; validation turns a draft into a request payload or blocks
//! the submit with an inline message.

use crate::model::{Class, ClassPayload, PaymentStatus, Student, StudentPayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Field state of one entity form.
pub trait Draft: Default {
    type Entity;
    type Payload;

    /// Pre-fills from an existing entity; missing optional fields become
    /// empty strings so the form never shows stale text.
    fn prefill(entity: &Self::Entity) -> Self;

    /// Required-field checks and field parsing. `Err` carries the inline
    /// message and must block the network call.
    fn validate(&self) -> Result<Self::Payload, String>;
}

#[derive(Debug)]
pub struct ModalForm<D: Draft> {
    open: bool,
    mode: FormMode,
    pub draft: D,
    pub error: Option<String>,
}

impl<D: Draft> ModalForm<D> {
    pub fn new() -> Self {
        Self {
            open: false,
            mode: FormMode::Create,
            draft: D::default(),
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn open_create(&mut self) {
        self.open = true;
        self.mode = FormMode::Create;
        self.draft = D::default();
        self.error = None;
    }

    pub fn open_edit(&mut self, id: i64, entity: &D::Entity) {
        self.open = true;
        self.mode = FormMode::Edit(id);
        self.draft = D::prefill(entity);
        self.error = None;
    }

    pub fn cancel(&mut self) {
        self.open = false;
        self.mode = FormMode::Create;
        self.draft = D::default();
        self.error = None;
    }

    /// Runs client-side validation. On failure the message lands in
    /// `error` and `None` is returned; nothing may be sent.
    pub fn validated_payload(&mut self) -> Option<D::Payload> {
        match self.draft.validate() {
            Ok(payload) => {
                self.error = None;
                Some(payload)
            }
            Err(msg) => {
                self.error = Some(msg);
                None
            }
        }
    }

    /// Server accepted: close and reset to create-mode defaults.
    pub fn submit_succeeded(&mut self) {
        self.cancel();
    }

    /// Server rejected: stay open, keep the user's values, show the
    /// server's message verbatim behind a generic prefix.
    pub fn submit_failed(&mut self, server_message: &str) {
        self.error = Some(format!("Failed to save: {server_message}"));
    }
}

impl<D: Draft> Default for ModalForm<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentDraft {
    pub name: String,
    pub grade: String,
    pub class_id: String,
    pub age: String,
    pub phone: String,
    pub address: String,
    pub payment_status: PaymentStatus,
}

impl Draft for StudentDraft {
    type Entity = Student;
    type Payload = StudentPayload;

    fn prefill(entity: &Student) -> Self {
        Self {
            name: entity.name.clone(),
            grade: entity.grade.clone(),
            class_id: entity.class_id.map(|id| id.to_string()).unwrap_or_default(),
            age: entity.age.map(|a| a.to_string()).unwrap_or_default(),
            phone: entity.phone.clone().unwrap_or_default(),
            address: entity.address.clone().unwrap_or_default(),
            payment_status: entity.payment_status,
        }
    }

    fn validate(&self) -> Result<StudentPayload, String> {
        if self.name.trim().is_empty() || self.grade.trim().is_empty() {
            return Err("Name and grade are required".to_string());
        }
        let class_id = parse_optional_int(&self.class_id, "Class")?;
        let age = parse_optional_int(&self.age, "Age")?;
        Ok(StudentPayload {
            name: self.name.trim().to_string(),
            grade: self.grade.trim().to_string(),
            class_id,
            age,
            phone: non_blank(&self.phone),
            address: non_blank(&self.address),
            payment_status: self.payment_status,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassDraft {
    pub class_name: String,
    pub grade_level: String,
    pub teacher_name: String,
    pub room_number: String,
}

impl Draft for ClassDraft {
    type Entity = Class;
    type Payload = ClassPayload;

    fn prefill(entity: &Class) -> Self {
        Self {
            class_name: entity.class_name.clone(),
            grade_level: entity.grade_level.to_string(),
            teacher_name: entity.teacher_name.clone().unwrap_or_default(),
            room_number: entity.room_number.clone().unwrap_or_default(),
        }
    }

    fn validate(&self) -> Result<ClassPayload, String> {
        if self.class_name.trim().is_empty() || self.grade_level.trim().is_empty() {
            return Err("Class name and grade level are required".to_string());
        }
        let grade_level: i64 = self
            .grade_level
            .trim()
            .parse()
            .map_err(|_| "Grade level must be a number".to_string())?;
        Ok(ClassPayload {
            class_name: self.class_name.trim().to_string(),
            grade_level: Some(grade_level),
            teacher_name: non_blank(&self.teacher_name),
            room_number: non_blank(&self.room_number),
        })
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_optional_int(s: &str, field: &str) -> Result<Option<i64>, String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| format!("{field} must be a number"))
}
