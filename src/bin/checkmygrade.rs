//! checkmygrade: reset, seed and report, or run the self-test

use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use checkmygrade::report::{
    render_courses, render_professor_report, render_professors, render_stats, render_students,
};
use checkmygrade::seed::seed_sample_data;
use checkmygrade::timing::format_elapsed;
use checkmygrade::{export_to_json, load_config, selftest, GradeBook, LoginPassword, StudentSortKey};
use rpassword::read_password;
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: checkmygrade [COMMAND]

Commands:
  demo              reset the data files, seed sample data and print reports (default)
  selftest          run the built-in checks and timings (aliases: test, tests)
  login <user_id>   prompt for a password and verify it
  export <path>     write a JSON report of every course
  help              show this message

Environment:
  CHECKMYGRADE_CONFIG    config file (default: checkmygrade.toml)
  CHECKMYGRADE_DATA_DIR  directory holding the CSV files
  RUST_LOG               log filter (default: warn)";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("demo") => demo(),
        Some("selftest" | "test" | "tests") => run_selftest(),
        Some("login") => match args.get(1) {
            Some(user_id) => login(user_id),
            None => bail!("login needs a user id\n\n{USAGE}"),
        },
        Some("export") => match args.get(1) {
            Some(path) => export(Path::new(path)),
            None => bail!("export needs an output path\n\n{USAGE}"),
        },
        Some("help" | "-h" | "--help") => {
            println!("{USAGE}");
            Ok(())
        }
        Some(other) => bail!("unknown command '{other}'\n\n{USAGE}"),
    }
}

fn open_book() -> Result<GradeBook> {
    let config = load_config();
    GradeBook::open(config).with_context(|| {
        format!(
            "Failed to open data files in {}",
            config.paths.data_dir.display()
        )
    })
}

fn demo() -> Result<()> {
    let mut book = open_book()?;
    seed_sample_data(&mut book, true).context("Failed to seed sample data")?;

    let data_dir = &load_config().paths.data_dir;
    let shown = data_dir
        .canonicalize()
        .unwrap_or_else(|_| data_dir.to_path_buf());
    println!("\nCSV folder: {}", shown.display());
    println!("Files:");
    for path in book.paths().all() {
        println!(" - {}", path.display());
    }

    println!("\n{}", render_courses(&book));
    println!("\n{}", render_professors(&book));
    println!("\n{}", render_students(&book));

    let found = book.search_students(|s| s.course_id == "DATA200");
    println!(
        "\n{}",
        format_elapsed(
            &format!("Found {} DATA200 students", found.value.len()),
            found.elapsed
        )
    );
    let sort_elapsed = book
        .sort_students(StudentSortKey::LastName, false)
        .context("Failed to save sorted students")?;
    println!("{}", format_elapsed("Sorted by last name", sort_elapsed));

    println!("\n{}", render_stats(&book));

    if let Some(report) = book.report_by_professor("kapil@mycsu.edu") {
        println!("\n{}", render_professor_report(&report));
    }
    Ok(())
}

fn run_selftest() -> Result<()> {
    let config = load_config();
    info!(
        "running self-test with {} synthetic student(s)",
        config.selftest.synthetic_students
    );
    let report = selftest::run(&config.selftest, &config.cipher.key)
        .context("Self-test could not set up its workspace")?;
    println!("{report}");
    if !report.passed() {
        std::process::exit(1);
    }
    Ok(())
}

fn login(user_id: &str) -> Result<()> {
    let book = open_book()?;

    print!("Password for {user_id}: ");
    std::io::stdout().flush()?;
    let input = read_password().context("Failed to read password")?;
    let password = LoginPassword::new(input);

    if book.login(user_id, &password) {
        let role = book
            .logins()
            .find(user_id)
            .map(|u| u.role.to_string())
            .unwrap_or_default();
        println!("Login OK ({role})");
        Ok(())
    } else {
        println!("Login failed");
        std::process::exit(1);
    }
}

fn export(path: &Path) -> Result<()> {
    let book = open_book()?;
    export_to_json(&book, path)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    println!(
        "Exported {} course(s), {} student(s) -> {}",
        book.courses().len(),
        book.students().len(),
        path.display()
    );
    Ok(())
}
