use anyhow::{bail, Context, Result};
use std::env;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fragmerge::{
    describe_candidates, list_candidates, report, write_output, FilenameClassifier, MergeConfig,
    Pipeline, PipelineOutcome, RunSummary, Session,
};

const USAGE: &str = "Usage: fragmerge [--all] [--yes|-y] [--tui] [DIR]";

/// Command-line switches; everything else is asked interactively
#[derive(Debug, Default, PartialEq)]
struct Args {
    dir: Option<PathBuf>,
    all: bool,
    yes: bool,
    tui: bool,
    help: bool,
}

impl Args {
    fn parse_from<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut parsed = Args::default();
        for arg in args {
            match arg.as_str() {
                "--all" => parsed.all = true,
                "--yes" | "-y" => parsed.yes = true,
                "--tui" => parsed.tui = true,
                "--help" | "-h" => parsed.help = true,
                flag if flag.starts_with('-') => bail!("unknown option {flag}\n{USAGE}"),
                dir => {
                    if parsed.dir.is_some() {
                        bail!("more than one directory given\n{USAGE}");
                    }
                    parsed.dir = Some(PathBuf::from(dir));
                }
            }
        }
        Ok(parsed)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse_from(env::args().skip(1))?;
    if args.help {
        println!("{USAGE}");
        return Ok(());
    }

    let root = env::current_dir().context("Failed to resolve working directory")?;
    let mut config = MergeConfig::load_from_dir(&root)?;
    if let Some(dir) = &args.dir {
        config.input_dir = dir.clone();
    }

    // Session lives for the whole run and is dropped on every exit path
    let mut session = Session::terminal(args.yes);
    run(&mut session, &args, &config, root)
}

fn run<R: BufRead, W: Write>(
    session: &mut Session<R, W>,
    args: &Args,
    config: &MergeConfig,
    root: PathBuf,
) -> Result<()> {
    report::print_banner(session.out())?;

    let classifier = FilenameClassifier::with_reserved(config.output_file.clone());
    let default_dir = config.resolved_input_dir(&root);

    let dir = if args.dir.is_some() {
        fragmerge::validate_directory(&default_dir)?;
        default_dir
    } else {
        match session.choose_directory(&default_dir, &classifier)? {
            Some(dir) => dir,
            None => {
                writeln!(session.out(), "No directory chosen.")?;
                return Ok(());
            }
        }
    };

    let paths = list_candidates(&dir, &classifier)?;
    let files = if args.all {
        paths
    } else {
        session.choose_files(&describe_candidates(&paths))?
    };

    writeln!(session.out(), "\n🔄 Processing {} file(s)...", files.len())?;
    let run = match Pipeline::new(config).run(&files, config)? {
        PipelineOutcome::NothingToDo(reason) => {
            writeln!(session.out(), "{}", reason.message())?;
            return Ok(());
        }
        PipelineOutcome::Completed(run) => run,
    };

    for skipped in &run.ingest.skipped {
        writeln!(session.out(), "⚠️  Skipped (not <entity>_<n>.csv): {}", skipped.path.display())?;
    }
    if run.header.is_none() {
        writeln!(session.out(), "⚠️  No header detected; output has no header line.")?;
    }

    report::print_entity_summary(session.out(), &run.store)?;
    report::print_duplicates(
        session.out(),
        &run.dedup.report,
        config.duplicate_preview,
        config.duplicate_width,
    )?;

    let output = session.choose_output(&root, &config.output_file)?;
    write_output(&output, &run.output)?;
    info!(file = %output.display(), lines = run.output.len(), "output written");

    let summary = RunSummary::from_run(&run, Some(&output));
    report::print_final(session.out(), &summary)?;
    if let Some(path) = &config.summary_json {
        summary.write_json(&root.join(path))?;
    }

    if session.confirm("Show the generated file?", false)? {
        report::print_preview(session.out(), &run.output, config.preview_lines)?;
    }

    if args.tui {
        open_viewer(&run)?;
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn open_viewer(run: &fragmerge::MergeRun) -> Result<()> {
    let mut app = fragmerge::ui::App::new(run);
    fragmerge::ui::run_ui(&mut app)
}

#[cfg(not(feature = "tui"))]
fn open_viewer(_run: &fragmerge::MergeRun) -> Result<()> {
    eprintln!("❌ Viewer not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    Ok(())
}
