use std::fs;
use std::io::Read as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use jobpulse_application::{FileGenerator, Session};
use jobpulse_core::{ApplicationType, ItemKind, PROFILE_EXPORT_FILE, Settings};
use jobpulse_engine::{Engine, RenderedPdf};
use jobpulse_storage::Storage;
use tracing_subscriber::EnvFilter;

/// Career profile, tailored CV and cover letter generator.
#[derive(Parser, Debug)]
#[command(name = "jobpulse", version, about, long_about = None)]
struct Cli {
    /// Database file (defaults to the platform config directory)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show, export, import or reset the master profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },

    /// Render the CV of the stored profile
    Cv {
        /// Job title printed under the name
        #[arg(long)]
        title: String,
    },

    /// Render a cover letter from a body text file
    Letter {
        #[arg(long)]
        company: String,

        #[arg(long)]
        title: String,

        /// File holding the letter body
        #[arg(long)]
        body: PathBuf,
    },

    /// Merge a saved generation response and render both documents
    Apply {
        /// JSON response of the generation service
        #[arg(long)]
        response: PathBuf,

        /// Job description file (read from stdin when omitted)
        #[arg(long)]
        job: Option<PathBuf>,
    },

    /// Print page count and text of a PDF
    Inspect { pdf: PathBuf },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    Show,
    Export { path: Option<PathBuf> },
    Import { path: PathBuf },
    /// Remove one experience, project, education or certification entry
    Remove { kind: ItemKind, id: String },
    Reset,
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    Show,
    Set {
        #[arg(long)]
        output_dir: Option<String>,

        /// alternance or stage
        #[arg(long)]
        application_type: Option<ApplicationType>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let db_path = match cli.db {
        Some(path) => path,
        None => default_db_path()?,
    };
    let storage = Storage::open(&db_path)?;
    let settings = storage.load_settings()?;
    let engine = Engine::new();

    match cli.command {
        Command::Profile { command } => profile(&storage, &settings, command),
        Command::Settings { command } => settings_command(&storage, settings, command),
        Command::Cv { title } => {
            let profile = storage.load_profile()?;
            let pdf = engine.render_cv(&profile, &title)?;
            write_pdf(&engine, &settings, &pdf)
        }
        Command::Letter {
            company,
            title,
            body,
        } => {
            let profile = storage.load_profile()?;
            let content = fs::read_to_string(&body)
                .with_context(|| format!("read letter body {}", body.display()))?;
            let today = chrono::Local::now().date_naive();
            let pdf = engine.render_letter(&profile, &company, &title, &content, today)?;
            write_pdf(&engine, &settings, &pdf)
        }
        Command::Apply { response, job } => apply(&storage, &engine, &settings, &response, job.as_deref()),
        Command::Inspect { pdf } => {
            let summary = engine.inspect(&pdf)?;
            println!("{}: {} page(s)", pdf.display(), summary.page_count());
            for (index, lines) in summary.pages.iter().enumerate() {
                println!("--- page {} ---", index + 1);
                for line in lines {
                    println!("{line}");
                }
            }
            Ok(())
        }
    }
}

fn default_db_path() -> anyhow::Result<PathBuf> {
    let project_dirs =
        ProjectDirs::from("dev", "jobpulse", "jobpulse").context("resolve project dirs")?;
    let config_dir = project_dirs.config_dir();
    fs::create_dir_all(config_dir)
        .with_context(|| format!("create config dir {}", config_dir.display()))?;
    Ok(config_dir.join("jobpulse.db"))
}

fn profile(storage: &Storage, settings: &Settings, command: ProfileCommand) -> anyhow::Result<()> {
    match command {
        ProfileCommand::Show => {
            let profile = storage.load_profile()?;
            println!("{}", jobpulse_storage::profile_to_json(&profile)?);
        }
        ProfileCommand::Export { path } => {
            let path = path.unwrap_or_else(|| Path::new(&settings.output_dir).join(PROFILE_EXPORT_FILE));
            storage.export_profile(&path)?;
            println!("profile exported to {}", path.display());
        }
        ProfileCommand::Import { path } => {
            let profile = storage.import_profile(&path)?;
            println!(
                "imported profile of {} ({} experiences)",
                profile.full_name,
                profile.experiences.len()
            );
        }
        ProfileCommand::Remove { kind, id } => {
            let mut profile = storage.load_profile()?;
            if !profile.remove_item(kind, &id) {
                anyhow::bail!("no {kind:?} entry with id {id}");
            }
            storage.save_profile(&profile)?;
            println!("removed {id}");
        }
        ProfileCommand::Reset => {
            storage.clear_profile()?;
            println!("profile reset");
        }
    }
    Ok(())
}

fn settings_command(storage: &Storage, mut settings: Settings, command: SettingsCommand) -> anyhow::Result<()> {
    if let SettingsCommand::Set {
        output_dir,
        application_type,
    } = command
    {
        if let Some(output_dir) = output_dir {
            settings.output_dir = output_dir;
        }
        if let Some(application_type) = application_type {
            settings.application_type = application_type;
        }
        storage.save_settings(&settings)?;
        settings = storage.load_settings()?;
    }
    println!("output_dir = {}", settings.output_dir);
    println!("application_type = {}", settings.application_type);
    Ok(())
}

fn apply(
    storage: &Storage,
    engine: &Engine,
    settings: &Settings,
    response: &Path,
    job: Option<&Path>,
) -> anyhow::Result<()> {
    let job_text = match job {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("read job description {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("read job description from stdin")?;
            text
        }
    };

    let profile = if storage.has_profile()? {
        Some(storage.load_profile()?)
    } else {
        None
    };
    let mut session = Session::new(profile, settings.application_type).with_job_text(job_text);
    session.generate(&FileGenerator::new(response))?;
    let package = session.package().context("generation produced no package")?;

    println!(
        "{} @ {}: {}% match",
        package.extracted_job_title, package.extracted_company, package.match_score
    );
    if !package.missing_skills.is_empty() {
        println!("missing skills: {}", package.missing_skills.join(", "));
    }
    if !package.analysis.is_empty() {
        println!("{}", package.analysis);
    }

    let cv = engine.render_cv(&package.optimized_profile, &package.extracted_job_title)?;
    write_pdf(engine, settings, &cv)?;
    let today = chrono::Local::now().date_naive();
    let letter = engine.render_letter(
        &package.optimized_profile,
        &package.extracted_company,
        &package.extracted_job_title,
        &package.cover_letter,
        today,
    )?;
    write_pdf(engine, settings, &letter)
}

fn write_pdf(engine: &Engine, settings: &Settings, pdf: &RenderedPdf) -> anyhow::Result<()> {
    let path = engine.write(Path::new(&settings.output_dir), pdf)?;
    println!("{} ({} page(s))", path.display(), pdf.page_count);
    Ok(())
}
