//! CLI command implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result, anyhow, bail};
use tracing::{debug, info};

use gradebook::core::aggregate::{
    cumulative_gpa, semester_credits, semester_table, term_gpa, trend as sgpa_trend,
};
use gradebook::core::entry::{new_course, normalize_patch};
use gradebook::core::invariants::{sentinel_diagnostics, validate_invariants};
use gradebook::core::summary::Summary;
use gradebook::exit_codes;
use gradebook::io::config::{CONFIG_FILE, GradebookConfig, load_config, write_config};
use gradebook::io::storage::{FileStorage, PersistWarning};
use gradebook::record::{CoursePatch, Semester, seed_document};
use gradebook::store::{LoadSource, RecordStore};
use gradebook::transfer;

/// Opened data directory: config plus initialized store.
pub struct Context {
    config: GradebookConfig,
    source: LoadSource,
    store: RecordStore<FileStorage>,
}

impl Context {
    pub fn open(data_dir: &Path) -> Result<Self> {
        let config = load_config(&data_dir.join(CONFIG_FILE)).context("load config.toml")?;
        let init = RecordStore::initialize(FileStorage::new(data_dir));
        report(init.warning.as_ref());
        debug!(data_dir = %data_dir.display(), source = ?init.source, "data directory opened");
        Ok(Self {
            config,
            source: init.source,
            store: init.store,
        })
    }

    fn gpa(&self, value: f64) -> String {
        format!("{:.*}", self.config.precision, value)
    }

    fn semester_or_selected(&self, semester: Option<String>) -> Result<&Semester> {
        let id = semester.unwrap_or_else(|| self.store.selected_semester());
        self.store
            .document()
            .semester(&id)
            .ok_or_else(|| anyhow!("semester '{id}' not found"))
    }

    fn target_semester(&self, semester: Option<String>) -> Result<String> {
        Ok(self.semester_or_selected(semester)?.id.clone())
    }
}

fn report(warning: Option<&PersistWarning>) {
    if let Some(warning) = warning {
        eprintln!("warning: {warning}");
    }
}

pub fn init(mut ctx: Context, force: bool) -> Result<i32> {
    let config_path = ctx.store.storage().dir().join(CONFIG_FILE);
    if force || !config_path.exists() {
        write_config(&config_path, &ctx.config).context("write config.toml")?;
    }

    if force && ctx.source == LoadSource::Restored {
        let seed = transfer::export(&seed_document())?;
        let mutation = ctx.store.import(&seed).context("reset to seed")?;
        report(mutation.warning.as_ref());
        info!("record reset to seed");
    }

    println!(
        "init: data_dir={} semesters={} source={:?}",
        ctx.store.storage().dir().display(),
        ctx.store.document().semesters.len(),
        ctx.source
    );
    Ok(exit_codes::OK)
}

pub fn semesters(ctx: Context) -> Result<i32> {
    let selected = ctx.store.selected_semester();
    for semester in &ctx.store.document().semesters {
        let marker = if semester.id == selected { "*" } else { " " };
        println!(
            "{} {}\t{}\tcourses={}",
            marker,
            semester.id,
            semester.name,
            semester.courses.len()
        );
    }
    Ok(exit_codes::OK)
}

pub fn list(ctx: Context, semester: Option<String>) -> Result<i32> {
    let semester = ctx.semester_or_selected(semester)?;
    for course in &semester.courses {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            course.id,
            course.code,
            course.name,
            course.credits,
            course.grade,
            course.kind.as_deref().unwrap_or("-")
        );
    }
    Ok(exit_codes::OK)
}

pub fn add(
    mut ctx: Context,
    semester: Option<String>,
    input: &str,
    credits: Option<u32>,
    grade: Option<&str>,
    kind: Option<&str>,
) -> Result<i32> {
    let semester_id = ctx.target_semester(semester)?;
    let course = new_course(input, credits, grade, kind)
        .ok_or_else(|| anyhow!("course entry needs a code and a name"))?;
    let mutation = ctx.store.add_course(&semester_id, course);
    report(mutation.warning.as_ref());
    let course_id = mutation
        .course_id
        .ok_or_else(|| anyhow!("semester '{semester_id}' not found"))?;
    println!("added: {semester_id}/{course_id}");
    Ok(exit_codes::OK)
}

pub fn update(
    mut ctx: Context,
    semester: Option<String>,
    course_id: &str,
    patch: CoursePatch,
) -> Result<i32> {
    if patch.is_empty() {
        bail!("nothing to update");
    }
    let semester_id = ctx.target_semester(semester)?;
    let patch = normalize_patch(patch);
    let mutation = ctx.store.update_course(&semester_id, course_id, &patch);
    report(mutation.warning.as_ref());
    if !mutation.applied {
        bail!("course '{course_id}' not found in semester '{semester_id}'");
    }
    println!("updated: {semester_id}/{course_id}");
    Ok(exit_codes::OK)
}

pub fn delete(mut ctx: Context, semester: Option<String>, course_id: &str) -> Result<i32> {
    let semester_id = ctx.target_semester(semester)?;
    let mutation = ctx.store.delete_course(&semester_id, course_id);
    report(mutation.warning.as_ref());
    if mutation.applied {
        println!("deleted: {semester_id}/{course_id}");
    } else {
        println!("unchanged: {semester_id}/{course_id} not present");
    }
    Ok(exit_codes::OK)
}

pub fn select(mut ctx: Context, semester_id: &str) -> Result<i32> {
    let warning = ctx.store.select_semester(semester_id)?;
    report(warning.as_ref());
    println!("selected: {semester_id}");
    Ok(exit_codes::OK)
}

pub fn stats(ctx: Context, semester: Option<String>) -> Result<i32> {
    let semester = ctx.semester_or_selected(semester)?;
    println!("semester: {}", semester.name);
    println!("sgpa: {}", ctx.gpa(term_gpa(semester)));
    println!("cgpa: {}", ctx.gpa(cumulative_gpa(ctx.store.document())));
    println!("credits: {}", semester_credits(semester));
    Ok(exit_codes::OK)
}

pub fn summary(ctx: Context, json: bool) -> Result<i32> {
    let summary = Summary::from_document(ctx.store.document(), ctx.config.required_credits);
    if json {
        let mut buf = serde_json::to_string_pretty(&summary).context("serialize summary")?;
        buf.push('\n');
        print!("{buf}");
        return Ok(exit_codes::OK);
    }
    println!("cgpa: {}", ctx.gpa(summary.cgpa));
    println!(
        "progress: {} / {} credits ({}%)",
        summary.progress.earned, summary.progress.required, summary.progress.percent
    );
    for stats in &summary.breakdown {
        println!(
            "{}: courses={} credits={}",
            stats.category.tag(),
            stats.courses,
            stats.credits
        );
    }
    Ok(exit_codes::OK)
}

pub fn table(ctx: Context) -> Result<i32> {
    println!("semester\tsgpa\tcgpa");
    for row in semester_table(ctx.store.document()) {
        println!(
            "{}\t{}\t{}",
            row.name,
            ctx.gpa(row.sgpa),
            ctx.gpa(row.cgpa_to_date)
        );
    }
    Ok(exit_codes::OK)
}

pub fn trend(ctx: Context) -> Result<i32> {
    for point in sgpa_trend(ctx.store.document()) {
        println!("{}\t{}", point.name, ctx.gpa(point.sgpa));
    }
    Ok(exit_codes::OK)
}

pub fn export(ctx: Context, output: Option<&Path>) -> Result<i32> {
    let text = ctx.store.export()?;
    match output {
        Some(path) => {
            fs::write(path, &text).with_context(|| format!("write {}", path.display()))?;
            eprintln!("export: wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(exit_codes::OK)
}

pub fn import(mut ctx: Context, path: &Path) -> Result<i32> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    match ctx.store.import(&text) {
        Ok(mutation) => {
            report(mutation.warning.as_ref());
            println!(
                "import: semesters={} courses={}",
                mutation.document.semesters.len(),
                mutation.document.course_count()
            );
            Ok(exit_codes::OK)
        }
        Err(err) => {
            eprintln!("import rejected: {err}");
            Ok(exit_codes::REJECTED)
        }
    }
}

pub fn check(ctx: Context) -> Result<i32> {
    let document = ctx.store.document();
    for finding in sentinel_diagnostics(document) {
        eprintln!("warning: {finding}");
    }
    let errors = validate_invariants(document);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("error: {error}");
        }
        return Ok(exit_codes::VIOLATIONS);
    }
    println!("check: ok");
    Ok(exit_codes::OK)
}
