use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payment state of a student. Stored and transmitted as its display label;
/// anything outside the three labels is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    #[default]
    Unpaid,
    #[serde(rename = "Due to deadline")]
    DueToDeadline,
}

impl PaymentStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Paid" => Some(Self::Paid),
            "Unpaid" => Some(Self::Unpaid),
            "Due to deadline" => Some(Self::DueToDeadline),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Unpaid => "Unpaid",
            Self::DueToDeadline => "Due to deadline",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromSql for PaymentStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        Self::parse(s).ok_or(FromSqlError::InvalidType)
    }
}

impl ToSql for PaymentStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.label()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub grade: String,
    pub class_id: Option<i64>,
    pub age: Option<i64>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub payment_status: PaymentStatus,
    pub created_at: String,
}

/// Create/update body for a student. `id` and `createdAt` are always
/// server-assigned and ignored if present in the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: i64,
    pub class_name: String,
    /// 0 through 12; 0 is Kindergarten.
    pub grade_level: i64,
    pub teacher_name: Option<String>,
    pub room_number: Option<String>,
    pub created_at: String,
    /// Live count of students assigned to this class. Derived by the server
    /// on every read, never stored.
    pub student_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassPayload {
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub grade_level: Option<i64>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
}

/// Class detail view: the class row with its students embedded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDetail {
    #[serde(flatten)]
    pub class: Class,
    pub students: Vec<Student>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: i64,
    pub total_teachers: i64,
    pub profit: i64,
    pub paid_students: i64,
    pub unpaid_students: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Degree {
    Bachelor,
    Master,
    #[serde(rename = "Associate teacher")]
    AssociateTeacher,
    Phd,
}

impl Degree {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Bachelor" => Some(Self::Bachelor),
            "Master" => Some(Self::Master),
            "Associate teacher" => Some(Self::AssociateTeacher),
            "Phd" => Some(Self::Phd),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Bachelor => "Bachelor",
            Self::Master => "Master",
            Self::AssociateTeacher => "Associate teacher",
            Self::Phd => "Phd",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeacherStatus {
    Active,
    #[serde(rename = "On Leave")]
    OnLeave,
    Terminated,
}

impl TeacherStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Active" => Some(Self::Active),
            "On Leave" => Some(Self::OnLeave),
            "Terminated" => Some(Self::Terminated),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::OnLeave => "On Leave",
            Self::Terminated => "Terminated",
        }
    }
}

/// Teacher record. Lives only in page-local memory for now; there is no
/// teachers table, and the roster is lost on restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRecord {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub degree: Degree,
    pub phone: String,
    pub status: TeacherStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_reason: Option<String>,
}
