//! The grade book: collections, cipher and files in one explicit object
//!
//! Every operation goes through a [`GradeBook`] the caller constructed; there
//! is no global state. With autosave on (the default) each successful
//! mutation rewrites the affected CSV file; failed mutations never touch disk,
//! and a mutation whose save fails is undone in memory as well.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::aliases::LoginPassword;
use crate::cipher::SimpleCipher;
use crate::config::Config;
use crate::consts::{COURSES_FILE, LOGIN_FILE, PROFESSORS_FILE, STUDENTS_FILE};
use crate::csv_store::{self, CsvRecord};
use crate::enums::{Role, StudentSortKey};
use crate::error::{CoreError, Result};
use crate::models::{valid_marks, Course, LoginUser, Professor, Student};
use crate::stats::CourseStats;
use crate::store::{Collection, Record};
use crate::timing::{time, Timed};

/// Locations of the four data files
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub students: PathBuf,
    pub courses: PathBuf,
    pub professors: PathBuf,
    pub logins: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            students: dir.join(STUDENTS_FILE),
            courses: dir.join(COURSES_FILE),
            professors: dir.join(PROFESSORS_FILE),
            logins: dir.join(LOGIN_FILE),
        }
    }

    pub fn all(&self) -> [&Path; 4] {
        [
            self.students.as_path(),
            self.courses.as_path(),
            self.professors.as_path(),
            self.logins.as_path(),
        ]
    }
}

/// A professor, the course they teach and that course's students
#[derive(Debug, Clone)]
pub struct ProfessorReport<'a> {
    pub professor: &'a Professor,
    pub course: Option<&'a Course>,
    pub students: Vec<&'a Student>,
}

#[derive(Debug)]
pub struct GradeBook {
    paths: DataPaths,
    cipher: SimpleCipher,
    autosave: bool,
    strict_course_refs: bool,
    students: Collection<Student>,
    courses: Collection<Course>,
    professors: Collection<Professor>,
    logins: Collection<LoginUser>,
}

impl GradeBook {
    /// Open (or create) the data files described by `config`
    pub fn open(config: &Config) -> Result<Self> {
        let cipher = SimpleCipher::new(config.cipher.key.as_bytes())?;
        let paths = DataPaths::in_dir(&config.paths.data_dir);

        let book = Self {
            students: load_collection(&paths.students)?,
            courses: load_collection(&paths.courses)?,
            professors: load_collection(&paths.professors)?,
            logins: load_collection(&paths.logins)?,
            paths,
            cipher,
            autosave: config.features.autosave,
            strict_course_refs: config.features.strict_course_refs,
        };
        book.log_dangling();
        debug!(
            "opened grade book: {} student(s), {} course(s), {} professor(s), {} login(s)",
            book.students.len(),
            book.courses.len(),
            book.professors.len(),
            book.logins.len()
        );
        Ok(book)
    }

    /// Open with default settings in `dir`
    pub fn open_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open(&Config::with_data_dir(dir))
    }

    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    pub fn cipher(&self) -> &SimpleCipher {
        &self.cipher
    }

    pub fn students(&self) -> &Collection<Student> {
        &self.students
    }

    pub fn courses(&self) -> &Collection<Course> {
        &self.courses
    }

    pub fn professors(&self) -> &Collection<Professor> {
        &self.professors
    }

    pub fn logins(&self) -> &Collection<LoginUser> {
        &self.logins
    }

    // ──────────────────────────────────────────────────────────
    // Students
    // ──────────────────────────────────────────────────────────

    pub fn add_student(&mut self, student: Student) -> Result<()> {
        let snapshot = self.snapshot(&self.students);
        self.insert_student(student)?;
        self.autosave_students(snapshot)
    }

    /// Insert many students with a single save at the end.
    ///
    /// Stops at the first rejected student; the ones inserted before it stay
    /// and are persisted before the error is returned. If that save fails,
    /// none of them stay.
    pub fn add_students(&mut self, students: impl IntoIterator<Item = Student>) -> Result<usize> {
        let snapshot = self.snapshot(&self.students);
        let mut added = 0;
        let mut failure = None;
        for student in students {
            if let Err(e) = self.insert_student(student) {
                failure = Some(e);
                break;
            }
            added += 1;
        }
        if added > 0 {
            self.autosave_students(snapshot)?;
        }
        match failure {
            Some(e) => Err(e),
            None => Ok(added),
        }
    }

    fn insert_student(&mut self, student: Student) -> Result<()> {
        if !valid_marks(student.marks) {
            return Err(CoreError::InvalidMarks(student.marks));
        }
        self.check_course_ref(&student)?;
        self.students.add(student)
    }

    /// Unknown course ids warn, or fail in strict mode
    fn check_course_ref(&self, student: &Student) -> Result<()> {
        if self.courses.contains(&student.course_id) {
            return Ok(());
        }
        if self.strict_course_refs {
            return Err(CoreError::UnknownCourse {
                student: student.email_address.clone(),
                course_id: student.course_id.clone(),
            });
        }
        warn!(
            "student '{}' references unknown course '{}'",
            student.email_address, student.course_id
        );
        Ok(())
    }

    pub fn update_student<F>(&mut self, email: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Student),
    {
        let snapshot = self.snapshot(&self.students);
        let Some(previous) = self.students.find(email).cloned() else {
            return Err(CoreError::NotFound {
                kind: Student::KIND,
                key: email.to_string(),
            });
        };
        self.students.update(email, f)?;

        let Some(updated) = self.students.find(email).cloned() else {
            return self.autosave_students(snapshot);
        };
        let rejected = if !valid_marks(updated.marks) {
            Some(CoreError::InvalidMarks(updated.marks))
        } else if updated.course_id != previous.course_id {
            self.check_course_ref(&updated).err()
        } else {
            None
        };
        if let Some(e) = rejected {
            self.students.update(email, |s| *s = previous)?;
            return Err(e);
        }
        self.autosave_students(snapshot)
    }

    pub fn delete_student(&mut self, email: &str) -> Result<Student> {
        let snapshot = self.snapshot(&self.students);
        let removed = self.students.delete(email)?;
        self.autosave_students(snapshot)?;
        Ok(removed)
    }

    pub fn find_student(&self, email: &str) -> Option<&Student> {
        self.students.find(email)
    }

    /// Linear scan with a predicate, timed
    pub fn search_students<P>(&self, predicate: P) -> Timed<Vec<&Student>>
    where
        P: Fn(&Student) -> bool,
    {
        time(|| self.students.iter().filter(|s| predicate(*s)).collect())
    }

    /// Sort students in place by `key` and persist the new order.
    /// Returns the time spent sorting (saving excluded).
    pub fn sort_students(&mut self, key: StudentSortKey, reverse: bool) -> Result<Duration> {
        let snapshot = self.snapshot(&self.students);
        let timed = time(|| {
            self.students.sort_by(|a, b| {
                let ord = match key {
                    StudentSortKey::Email => a.email_address.cmp(&b.email_address),
                    StudentSortKey::FirstName => a.first_name.cmp(&b.first_name),
                    StudentSortKey::LastName => a.last_name.cmp(&b.last_name),
                    StudentSortKey::CourseId => a.course_id.cmp(&b.course_id),
                    StudentSortKey::Marks => a.marks.total_cmp(&b.marks),
                };
                if reverse {
                    ord.reverse()
                } else {
                    ord
                }
            })
        });
        self.autosave_students(snapshot)?;
        Ok(timed.elapsed)
    }

    // ──────────────────────────────────────────────────────────
    // Courses
    // ──────────────────────────────────────────────────────────

    pub fn add_course(&mut self, course: Course) -> Result<()> {
        let snapshot = self.snapshot(&self.courses);
        self.courses.add(course)?;
        self.autosave_courses(snapshot)
    }

    pub fn update_course<F>(&mut self, course_id: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Course),
    {
        let snapshot = self.snapshot(&self.courses);
        self.courses.update(course_id, f)?;
        self.autosave_courses(snapshot)
    }

    /// Students keep their (now dangling) course id
    pub fn delete_course(&mut self, course_id: &str) -> Result<Course> {
        let snapshot = self.snapshot(&self.courses);
        let removed = self.courses.delete(course_id)?;
        self.autosave_courses(snapshot)?;
        let orphans = self.report_by_course(course_id).len();
        if orphans > 0 {
            warn!("deleted course '{course_id}' still has {orphans} student(s)");
        }
        Ok(removed)
    }

    pub fn find_course(&self, course_id: &str) -> Option<&Course> {
        self.courses.find(course_id)
    }

    // ──────────────────────────────────────────────────────────
    // Professors
    // ──────────────────────────────────────────────────────────

    pub fn add_professor(&mut self, professor: Professor) -> Result<()> {
        let snapshot = self.snapshot(&self.professors);
        self.professors.add(professor)?;
        self.autosave_professors(snapshot)
    }

    pub fn update_professor<F>(&mut self, professor_id: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Professor),
    {
        let snapshot = self.snapshot(&self.professors);
        self.professors.update(professor_id, f)?;
        self.autosave_professors(snapshot)
    }

    pub fn delete_professor(&mut self, professor_id: &str) -> Result<Professor> {
        let snapshot = self.snapshot(&self.professors);
        let removed = self.professors.delete(professor_id)?;
        self.autosave_professors(snapshot)?;
        Ok(removed)
    }

    pub fn find_professor(&self, professor_id: &str) -> Option<&Professor> {
        self.professors.find(professor_id)
    }

    // ──────────────────────────────────────────────────────────
    // Logins
    // ──────────────────────────────────────────────────────────

    pub fn register_user(
        &mut self,
        user_id: &str,
        password: &LoginPassword,
        role: Role,
    ) -> Result<()> {
        let user = LoginUser {
            user_id: user_id.to_string(),
            password_enc: self.cipher.encrypt(password.expose_secret()),
            role,
        };
        let snapshot = self.snapshot(&self.logins);
        self.logins.add(user)?;
        self.autosave_logins(snapshot)
    }

    /// True when `user_id` exists and its stored password decrypts to
    /// `password`. Undecodable stored passwords never verify.
    pub fn login(&self, user_id: &str, password: &LoginPassword) -> bool {
        let Some(user) = self.logins.find(user_id) else {
            return false;
        };
        match self.cipher.decrypt(&user.password_enc) {
            Ok(stored) => stored == *password.expose_secret(),
            Err(e) => {
                warn!("stored password for '{user_id}' is unreadable: {e}");
                false
            }
        }
    }

    pub fn change_password(&mut self, user_id: &str, new_password: &LoginPassword) -> Result<()> {
        let encrypted = self.cipher.encrypt(new_password.expose_secret());
        let snapshot = self.snapshot(&self.logins);
        self.logins
            .update(user_id, |u| u.password_enc = encrypted)?;
        self.autosave_logins(snapshot)
    }

    pub fn delete_user(&mut self, user_id: &str) -> Result<LoginUser> {
        let snapshot = self.snapshot(&self.logins);
        let removed = self.logins.delete(user_id)?;
        self.autosave_logins(snapshot)?;
        Ok(removed)
    }

    // ──────────────────────────────────────────────────────────
    // Reports
    // ──────────────────────────────────────────────────────────

    pub fn stats_for_course(&self, course_id: &str) -> CourseStats {
        let marks: Vec<f64> = self
            .students
            .iter()
            .filter(|s| s.course_id == course_id)
            .map(|s| s.marks)
            .collect();
        CourseStats::from_marks(&marks)
    }

    /// Stats for every known course, in course order
    pub fn course_stats(&self) -> Vec<(&Course, CourseStats)> {
        self.courses
            .iter()
            .map(|c| (c, self.stats_for_course(&c.course_id)))
            .collect()
    }

    pub fn report_by_course(&self, course_id: &str) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.course_id == course_id)
            .collect()
    }

    pub fn report_by_professor(&self, professor_id: &str) -> Option<ProfessorReport<'_>> {
        let professor = self.professors.find(professor_id)?;
        Some(ProfessorReport {
            professor,
            course: self.courses.find(&professor.course_id),
            students: self.report_by_course(&professor.course_id),
        })
    }

    pub fn report_by_student(&self, email: &str) -> Option<&Student> {
        self.students.find(email)
    }

    /// Professors teaching `course_id`
    pub fn professors_for_course(&self, course_id: &str) -> Vec<&Professor> {
        self.professors
            .iter()
            .filter(|p| p.course_id == course_id)
            .collect()
    }

    /// Students whose course id matches no known course
    pub fn dangling_students(&self) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| !self.courses.contains(&s.course_id))
            .collect()
    }

    // ──────────────────────────────────────────────────────────
    // Persistence
    // ──────────────────────────────────────────────────────────

    /// Clear every collection and rewrite every file with only its header.
    /// If a rewrite fails the collections are restored.
    pub fn reset(&mut self) -> Result<()> {
        let students = std::mem::take(&mut self.students);
        let courses = std::mem::take(&mut self.courses);
        let professors = std::mem::take(&mut self.professors);
        let logins = std::mem::take(&mut self.logins);
        if let Err(e) = self.save_all() {
            warn!("reset failed, collections restored: {e}");
            self.students = students;
            self.courses = courses;
            self.professors = professors;
            self.logins = logins;
            return Err(e);
        }
        info!("grade book reset");
        Ok(())
    }

    pub fn save_all(&self) -> Result<()> {
        csv_store::save(&self.paths.students, &self.students)?;
        csv_store::save(&self.paths.courses, &self.courses)?;
        csv_store::save(&self.paths.professors, &self.professors)?;
        csv_store::save(&self.paths.logins, &self.logins)?;
        Ok(())
    }

    /// Copy of `collection` to restore if the next autosave fails
    fn snapshot<R: Clone>(&self, collection: &Collection<R>) -> Option<Collection<R>> {
        self.autosave.then(|| collection.clone())
    }

    fn autosave_students(&mut self, snapshot: Option<Collection<Student>>) -> Result<()> {
        persist_or_restore(&self.paths.students, &mut self.students, snapshot)
    }

    fn autosave_courses(&mut self, snapshot: Option<Collection<Course>>) -> Result<()> {
        persist_or_restore(&self.paths.courses, &mut self.courses, snapshot)
    }

    fn autosave_professors(&mut self, snapshot: Option<Collection<Professor>>) -> Result<()> {
        persist_or_restore(&self.paths.professors, &mut self.professors, snapshot)
    }

    fn autosave_logins(&mut self, snapshot: Option<Collection<LoginUser>>) -> Result<()> {
        persist_or_restore(&self.paths.logins, &mut self.logins, snapshot)
    }

    fn log_dangling(&self) {
        let dangling = self.dangling_students().len();
        if dangling > 0 {
            warn!("{dangling} student(s) reference unknown courses");
        }
    }
}

/// Write `current` to `path` when autosave took a snapshot; on failure put the
/// snapshot back so memory matches the file.
fn persist_or_restore<R: Record + CsvRecord>(
    path: &Path,
    current: &mut Collection<R>,
    snapshot: Option<Collection<R>>,
) -> Result<()> {
    let Some(snapshot) = snapshot else {
        return Ok(());
    };
    if let Err(e) = csv_store::save(path, &*current) {
        warn!(
            "{}: save failed, {} change rolled back: {e}",
            path.display(),
            R::KIND
        );
        *current = snapshot;
        return Err(e);
    }
    Ok(())
}

fn load_collection<R: Record + CsvRecord>(path: &Path) -> Result<Collection<R>> {
    let loaded = csv_store::load::<R>(path)?;
    let (collection, dropped) = Collection::from_records(loaded.records);
    if dropped > 0 {
        warn!(
            "{}: dropped {dropped} {} row(s) with empty or duplicate keys",
            path.display(),
            R::KIND
        );
    }
    Ok(collection)
}
