//! Record types held by the grade book
//!
//! Each type knows its key (for the [`Collection`](crate::store::Collection))
//! and its row layout (for the CSV adapter).

use serde::{Deserialize, Serialize};

use crate::consts::{
    COURSE_HEADER, LOGIN_HEADER, MAX_MARKS, MIN_MARKS, PROFESSOR_HEADER, STUDENT_HEADER,
};
use crate::csv_store::CsvRecord;
use crate::enums::Role;
use crate::grade::letter_grade;
use crate::store::Record;

/// True when `marks` is finite and inside the 0..=100 scale
pub fn valid_marks(marks: f64) -> bool {
    marks.is_finite() && (MIN_MARKS..=MAX_MARKS).contains(&marks)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub course_id: String,
    pub marks: f64,
}

impl Student {
    pub fn new(
        email_address: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        course_id: impl Into<String>,
        marks: f64,
    ) -> Self {
        Self {
            email_address: email_address.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            course_id: course_id.into(),
            marks,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Derived from `marks`, never stored authoritatively
    pub fn grade(&self) -> &'static str {
        letter_grade(self.marks)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub course_id: String,
    pub course_name: String,
    pub description: String,
    pub credits: Option<u32>,
}

impl Course {
    pub fn new(
        course_id: impl Into<String>,
        course_name: impl Into<String>,
        description: impl Into<String>,
        credits: Option<u32>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            course_name: course_name.into(),
            description: description.into(),
            credits,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Professor {
    /// E-mail address doubling as the professor id
    pub professor_id: String,
    pub name: String,
    pub rank: String,
    pub course_id: String,
}

impl Professor {
    pub fn new(
        professor_id: impl Into<String>,
        name: impl Into<String>,
        rank: impl Into<String>,
        course_id: impl Into<String>,
    ) -> Self {
        Self {
            professor_id: professor_id.into(),
            name: name.into(),
            rank: rank.into(),
            course_id: course_id.into(),
        }
    }
}

/// Login record; `password_enc` is the cipher output, never plaintext
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUser {
    pub user_id: String,
    pub password_enc: String,
    pub role: Role,
}

// ──────────────────────────────────────────────────────────────
// Store keys
// ──────────────────────────────────────────────────────────────

impl Record for Student {
    const KIND: &'static str = "student";
    fn key(&self) -> &str {
        &self.email_address
    }
}

impl Record for Course {
    const KIND: &'static str = "course";
    fn key(&self) -> &str {
        &self.course_id
    }
}

impl Record for Professor {
    const KIND: &'static str = "professor";
    fn key(&self) -> &str {
        &self.professor_id
    }
}

impl Record for LoginUser {
    const KIND: &'static str = "login";
    fn key(&self) -> &str {
        &self.user_id
    }
}

// ──────────────────────────────────────────────────────────────
// Row layouts (fields arrive in header order)
// ──────────────────────────────────────────────────────────────

impl CsvRecord for Student {
    const HEADER: &'static [&'static str] = STUDENT_HEADER;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.email_address.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.course_id.clone(),
            self.grade().to_string(),
            self.marks.to_string(),
        ]
    }

    // The grade column is informational; it is re-derived from marks.
    fn from_row(fields: &[&str]) -> Option<Self> {
        let [email, first, last, course, _grade, marks] = fields else {
            return None;
        };
        let marks: f64 = marks.trim().parse().ok()?;
        if !valid_marks(marks) {
            return None;
        }
        Some(Student::new(*email, *first, *last, *course, marks))
    }
}

impl CsvRecord for Course {
    const HEADER: &'static [&'static str] = COURSE_HEADER;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.course_id.clone(),
            self.course_name.clone(),
            self.description.clone(),
            self.credits.map(|c| c.to_string()).unwrap_or_default(),
        ]
    }

    fn from_row(fields: &[&str]) -> Option<Self> {
        let [id, name, description, credits] = fields else {
            return None;
        };
        let credits = match credits.trim() {
            "" => None,
            raw => Some(raw.parse().ok()?),
        };
        Some(Course::new(*id, *name, *description, credits))
    }
}

impl CsvRecord for Professor {
    const HEADER: &'static [&'static str] = PROFESSOR_HEADER;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.professor_id.clone(),
            self.name.clone(),
            self.rank.clone(),
            self.course_id.clone(),
        ]
    }

    fn from_row(fields: &[&str]) -> Option<Self> {
        let [id, name, rank, course] = fields else {
            return None;
        };
        Some(Professor::new(*id, *name, *rank, *course))
    }
}

impl CsvRecord for LoginUser {
    const HEADER: &'static [&'static str] = LOGIN_HEADER;

    fn to_row(&self) -> Vec<String> {
        vec![
            self.user_id.clone(),
            self.password_enc.clone(),
            self.role.to_string(),
        ]
    }

    fn from_row(fields: &[&str]) -> Option<Self> {
        let [user_id, password, role] = fields else {
            return None;
        };
        Some(LoginUser {
            user_id: user_id.to_string(),
            password_enc: password.to_string(),
            role: role.parse().ok()?,
        })
    }
}
