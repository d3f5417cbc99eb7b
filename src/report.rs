//! Console renderings of the grade book

use crate::gradebook::{GradeBook, ProfessorReport};
use crate::models::{Course, Professor, Student};

fn section(title: &str, lines: Vec<String>) -> String {
    let mut out = format!("=== {title} ===");
    for line in lines {
        out.push('\n');
        out.push_str(&line);
    }
    out
}

pub fn course_line(course: &Course) -> String {
    let credits = course
        .credits
        .map_or_else(|| "?".to_string(), |c| c.to_string());
    format!("{}: {} ({credits} cr)", course.course_id, course.course_name)
}

pub fn professor_line(professor: &Professor) -> String {
    format!(
        "{} [{}] -> {}",
        professor.name, professor.rank, professor.course_id
    )
}

pub fn student_line(student: &Student) -> String {
    format!(
        "{} <{}> | {} | {} ({})",
        student.full_name(),
        student.email_address,
        student.course_id,
        student.grade(),
        student.marks
    )
}

pub fn render_courses(book: &GradeBook) -> String {
    section("Courses", book.courses().iter().map(course_line).collect())
}

pub fn render_professors(book: &GradeBook) -> String {
    section(
        "Professors (by course)",
        book.professors().iter().map(professor_line).collect(),
    )
}

pub fn render_students(book: &GradeBook) -> String {
    section("Students", book.students().iter().map(student_line).collect())
}

pub fn render_stats(book: &GradeBook) -> String {
    section(
        "Stats",
        book.course_stats()
            .into_iter()
            .map(|(course, stats)| format!("{}: {stats}", course.course_id))
            .collect(),
    )
}

pub fn render_professor_report(report: &ProfessorReport<'_>) -> String {
    let course_name = report
        .course
        .map_or("(unknown course)", |c| c.course_name.as_str());
    let mut lines = vec![format!(
        "Professor: {} | Course: {course_name}",
        report.professor.name
    )];
    lines.extend(report.students.iter().map(|s| {
        format!("  - {}: {} ({})", s.full_name(), s.grade(), s.marks)
    }));
    section(
        &format!(
            "Report: Students taught by {} ({})",
            report.professor.name, report.professor.course_id
        ),
        lines,
    )
}

/// Everything the default run prints about the data set
pub fn render_summary(book: &GradeBook) -> String {
    [
        render_courses(book),
        render_professors(book),
        render_students(book),
        render_stats(book),
    ]
    .join("\n\n")
}
