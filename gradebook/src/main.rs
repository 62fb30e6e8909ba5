//! Gradebook CLI.
//!
//! Keeps the course record in `<data-dir>/cgpa_data_courses` (JSON) and the
//! last-viewed semester in `<data-dir>/lastSelectedSemester`. Every mutating
//! command writes through before exiting.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gradebook::{exit_codes, logging};

#[derive(Parser)]
#[command(
    name = "gradebook",
    version,
    about = "Per-term coursework record with SGPA/CGPA"
)]
struct Cli {
    /// Directory holding stored state and `config.toml`.
    #[arg(long, global = true, default_value = ".gradebook")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the data directory and seed semesters if missing.
    Init {
        /// Replace any stored record with the empty seed.
        #[arg(short, long)]
        force: bool,
    },
    /// List semesters with course counts.
    Semesters,
    /// List courses of a semester (default: last viewed).
    List {
        #[arg(short, long)]
        semester: Option<String>,
    },
    /// Add a course from "CODE - Name" text.
    Add {
        input: String,
        #[arg(short, long)]
        semester: Option<String>,
        #[arg(short, long)]
        credits: Option<u32>,
        #[arg(short, long)]
        grade: Option<String>,
        /// Category tag (CDC, OpEL, HuEL, DEL).
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },
    /// Change fields of an existing course.
    Update {
        course_id: String,
        #[arg(short, long)]
        semester: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        credits: Option<u32>,
        /// New grade; GD/CLR also sets credits to 0.
        #[arg(short, long)]
        grade: Option<String>,
        #[arg(short = 't', long = "type", conflicts_with = "clear_type")]
        kind: Option<String>,
        /// Remove the category tag.
        #[arg(long)]
        clear_type: bool,
    },
    /// Delete a course.
    Delete {
        course_id: String,
        #[arg(short, long)]
        semester: Option<String>,
    },
    /// Remember a semester as the one being viewed.
    Select { semester_id: String },
    /// SGPA, CGPA and credits for a semester (default: last viewed).
    Stats {
        #[arg(short, long)]
        semester: Option<String>,
    },
    /// CGPA, degree progress and category breakdown.
    Summary {
        #[arg(long)]
        json: bool,
    },
    /// SGPA and running CGPA per semester.
    Table,
    /// SGPA for every semester that has courses.
    Trend,
    /// Write the record as portable JSON (stdout by default).
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the record with an exported JSON file.
    Import { path: PathBuf },
    /// Check invariants and report grades that score as zero.
    Check,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();
    let ctx = commands::Context::open(&cli.data_dir)?;
    match cli.command {
        Command::Init { force } => commands::init(ctx, force),
        Command::Semesters => commands::semesters(ctx),
        Command::List { semester } => commands::list(ctx, semester),
        Command::Add {
            input,
            semester,
            credits,
            grade,
            kind,
        } => commands::add(
            ctx,
            semester,
            &input,
            credits,
            grade.as_deref(),
            kind.as_deref(),
        ),
        Command::Update {
            course_id,
            semester,
            code,
            name,
            credits,
            grade,
            kind,
            clear_type,
        } => {
            let kind = if clear_type { Some(None) } else { kind.map(Some) };
            let patch = gradebook::record::CoursePatch {
                code,
                name,
                credits,
                grade,
                kind,
            };
            commands::update(ctx, semester, &course_id, patch)
        }
        Command::Delete {
            course_id,
            semester,
        } => commands::delete(ctx, semester, &course_id),
        Command::Select { semester_id } => commands::select(ctx, &semester_id),
        Command::Stats { semester } => commands::stats(ctx, semester),
        Command::Summary { json } => commands::summary(ctx, json),
        Command::Table => commands::table(ctx),
        Command::Trend => commands::trend(ctx),
        Command::Export { output } => commands::export(ctx, output.as_deref()),
        Command::Import { path } => commands::import(ctx, &path),
        Command::Check => commands::check(ctx),
    }
}
