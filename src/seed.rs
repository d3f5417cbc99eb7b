//! Sample data: three courses, their professors (with logins) and five
//! students. Safe to run repeatedly; existing keys are left alone.

use tracing::info;

use crate::aliases::LoginPassword;
use crate::consts::DEFAULT_SEED_PASSWORD;
use crate::enums::Role;
use crate::error::Result;
use crate::gradebook::GradeBook;
use crate::models::{Course, Professor, Student};

pub fn sample_courses() -> Vec<Course> {
    vec![
        Course::new(
            "DATA200",
            "Data Science",
            "Provides insight about DS and Python",
            Some(3),
        ),
        Course::new("CS101", "Intro CS", "Programming fundamentals", Some(4)),
        Course::new(
            "STAT150",
            "Statistics I",
            "Descriptive & inferential stats",
            Some(3),
        ),
    ]
}

pub fn sample_professors() -> Vec<Professor> {
    vec![
        Professor::new("jhulan@mycsu.edu", "Jhulan Goswami", "Senior Professor", "DATA200"),
        Professor::new("kapil@mycsu.edu", "Kapil Dev", "Professor", "CS101"),
        Professor::new("kumble@mycsu.edu", "Anil Kumble", "Associate Prof.", "STAT150"),
    ]
}

pub fn sample_students() -> Vec<Student> {
    vec![
        Student::new("smriti.mandhana@mycsu.edu", "Smriti", "Mandhana", "DATA200", 95.0),
        Student::new("harmanpreet.kaur@mycsu.edu", "Harmanpreet", "Kaur", "CS101", 88.0),
        Student::new("mithali.raj@mycsu.edu", "Mithali", "Raj", "STAT150", 91.0),
        Student::new("virat.kohli@mycsu.edu", "Virat", "Kohli", "DATA200", 97.0),
        Student::new("rohit.sharma@mycsu.edu", "Rohit", "Sharma", "CS101", 84.0),
    ]
}

pub fn seed_sample_data(book: &mut GradeBook, reset: bool) -> Result<()> {
    if reset {
        book.reset()?;
    }

    for course in sample_courses() {
        if book.find_course(&course.course_id).is_none() {
            book.add_course(course)?;
        }
    }

    for professor in sample_professors() {
        if book.find_professor(&professor.professor_id).is_some() {
            continue;
        }
        let user_id = professor.professor_id.clone();
        book.add_professor(professor)?;
        if book.logins().find(&user_id).is_none() {
            let password = LoginPassword::new(DEFAULT_SEED_PASSWORD.to_string());
            book.register_user(&user_id, &password, Role::Professor)?;
        }
    }

    for student in sample_students() {
        if book.find_student(&student.email_address).is_none() {
            book.add_student(student)?;
        }
    }

    info!(
        "seeded: {} course(s), {} professor(s), {} student(s)",
        book.courses().len(),
        book.professors().len(),
        book.students().len()
    );
    Ok(())
}
