use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::error::Result;
use crate::gradebook::GradeBook;

pub const EXPORT_FORMAT: &str = "checkmygrade-report-v1";

/// Build the export document for every course in the grade book
pub fn report_to_json(book: &GradeBook) -> Value {
    let courses: Vec<Value> = book
        .course_stats()
        .into_iter()
        .map(|(course, stats)| {
            let professors: Vec<Value> = book
                .professors_for_course(&course.course_id)
                .into_iter()
                .map(|p| {
                    json!({
                        "professor_id": p.professor_id,
                        "name": p.name,
                        "rank": p.rank,
                    })
                })
                .collect();
            let students: Vec<Value> = book
                .report_by_course(&course.course_id)
                .into_iter()
                .map(|s| {
                    json!({
                        "email_address": s.email_address,
                        "name": s.full_name(),
                        "marks": s.marks,
                        "grade": s.grade(),
                    })
                })
                .collect();
            json!({
                "course_id": course.course_id,
                "course_name": course.course_name,
                "credits": course.credits,
                "professors": professors,
                "stats": stats,
                "students": students,
            })
        })
        .collect();

    json!({
        "export_format": EXPORT_FORMAT,
        "exported_at": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "exporter_version": env!("CARGO_PKG_VERSION"),
        "total_students": book.students().len(),
        "courses": courses,
    })
}

/// Write the pretty-printed export to `path`
pub fn export_to_json(book: &GradeBook, path: &Path) -> Result<()> {
    let export = report_to_json(book);
    std::fs::write(path, serde_json::to_string_pretty(&export)?)?;
    info!("exported {} course(s) to {}", book.courses().len(), path.display());
    Ok(())
}
