use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use teletest::config;
use teletest::generator::{MockGenerator, TestCaseGenerator};
use teletest::intake::{ArtifactSlot, IntakeFile};
use teletest::logging;
use teletest::options::{OutputFormat, TestCaseType};
use teletest::presentation::{
    Clipboard, Osc52Clipboard, clipboard_text, render_summary, render_table, today, write_export,
};
use teletest::report::GenerationReport;
use teletest::tui::{self, TuiOptions};
use teletest::workflow::{PageState, run_generation};

/// Teletest - generate test cases from design documents
#[derive(Parser, Debug)]
#[command(
    name = "teletest",
    about = "Generate given/when/then test cases from a PUML design and a PDF API spec",
    after_help = "ENVIRONMENT VARIABLES:\n\
        TELETEST_GENERATION_LATENCY_MS    Simulated generation latency (ms)\n\
        TELETEST_GENERATION_TIMEOUT_SECS  Generation timeout (s)\n\
        TELETEST_COPY_FEEDBACK_MS         Lifetime of the \"copied\" marker (ms)\n\
        TELETEST_EXPORT_DIR               Directory for CSV exports\n\
        TELETEST_LOG                      Log filter (e.g. teletest=debug)\n\
        TELETEST_LOG_FILE                 Log file for the interactive page"
)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate test cases once and print them
    Generate {
        /// PUML low-level design diagram
        #[arg(short, long)]
        diagram: PathBuf,

        /// PDF API specification
        #[arg(short, long)]
        spec: PathBuf,

        /// Test case type to generate (repeatable)
        #[arg(short = 't', long = "type", value_enum, required = true)]
        types: Vec<TestCaseType>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Excel)]
        format: OutputFormat,

        /// Print the detailed table instead of the summary
        #[arg(long)]
        details: bool,

        /// Output results as JSON
        #[arg(long)]
        json: bool,

        /// Write a CSV export (to the given directory or TELETEST_EXPORT_DIR)
        #[arg(short, long, num_args = 0..=1)]
        export: Option<Option<PathBuf>>,

        /// Copy one test case (by id) to the terminal clipboard
        #[arg(long, value_name = "ID")]
        copy: Option<String>,

        /// Simulated generation latency in milliseconds
        #[arg(long, env = "TELETEST_GENERATION_LATENCY_MS")]
        latency_ms: Option<u64>,

        /// Give up after this many seconds
        #[arg(long, env = "TELETEST_GENERATION_TIMEOUT_SECS")]
        timeout_secs: Option<u64>,
    },

    /// Open the interactive generator page
    Tui {
        /// Preselect the PUML diagram
        #[arg(short, long)]
        diagram: Option<PathBuf>,

        /// Preselect the PDF specification
        #[arg(short, long)]
        spec: Option<PathBuf>,

        /// Directory for CSV exports
        #[arg(long, env = "TELETEST_EXPORT_DIR")]
        export_dir: Option<PathBuf>,

        /// Simulated generation latency in milliseconds
        #[arg(long, env = "TELETEST_GENERATION_LATENCY_MS")]
        latency_ms: Option<u64>,
    },

    /// List the available test case types and output formats
    List,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let cfg = config::get();

    match args.command {
        Some(Commands::Generate {
            diagram,
            spec,
            types,
            format,
            details,
            json,
            export,
            copy,
            latency_ms,
            timeout_secs,
        }) => {
            logging::init_stderr(&cfg.logging, args.verbose);

            let mut page = PageState::new();
            for category in types {
                if !page.config().is_selected(category) {
                    page.toggle_category(category);
                }
            }
            page.set_output_format(format);
            page.select_file(ArtifactSlot::Diagram, Some(IntakeFile::from_path(&diagram)?));
            page.select_file(ArtifactSlot::Spec, Some(IntakeFile::from_path(&spec)?));

            let generator = MockGenerator::new(
                latency_ms
                    .map(Duration::from_millis)
                    .unwrap_or_else(config::generation_latency),
            );
            let timeout = timeout_secs
                .map(Duration::from_secs)
                .unwrap_or_else(config::generation_timeout);

            if !json {
                eprintln!("Generating test cases...");
            }
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_generation(&mut page, &generator, timeout))?;

            let mut report = GenerationReport::from_state(&page, generator.name());
            if let Some(failure) = page.last_error() {
                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                return Err(failure.message.clone().into());
            }

            if let Some(dir) = export {
                let dir = dir.unwrap_or_else(config::export_dir);
                let path = write_export(&dir, page.test_cases(), today())?;
                if !json {
                    eprintln!("Exported: {}", path.display());
                }
                report = report.with_export_path(path);
            }

            if let Some(id) = copy {
                let tc = page
                    .test_cases()
                    .iter()
                    .find(|tc| tc.id == id)
                    .ok_or_else(|| format!("No test case with id '{}'", id))?;
                // stdout may be carrying the report
                Osc52Clipboard::stderr().write_text(&clipboard_text(tc))?;
                if !json {
                    eprintln!("Copied {} to the clipboard", tc.id);
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if details {
                let width = crossterm::terminal::size().map(|(w, _)| w as usize).unwrap_or(120);
                for line in render_table(page.test_cases(), width, None) {
                    println!("{}", line);
                }
            } else {
                for line in render_summary(page.test_cases()) {
                    println!("{}", line);
                }
            }
        }

        Some(Commands::Tui {
            diagram,
            spec,
            export_dir,
            latency_ms,
        }) => {
            logging::init_for_tui(&cfg.logging, args.verbose)?;

            let generator: Arc<dyn TestCaseGenerator> = Arc::new(MockGenerator::new(
                latency_ms
                    .map(Duration::from_millis)
                    .unwrap_or_else(config::generation_latency),
            ));
            let options = TuiOptions {
                generator,
                timeout: config::generation_timeout(),
                export_dir: export_dir.unwrap_or_else(config::export_dir),
                copy_feedback: cfg.presentation.copy_feedback,
                diagram: diagram.map(|p| IntakeFile::from_path(p)).transpose()?,
                spec: spec.map(|p| IntakeFile::from_path(p)).transpose()?,
            };

            let runtime = tokio::runtime::Runtime::new()?;
            tui::run(options, runtime.handle().clone())?;
        }

        Some(Commands::List) => {
            println!("Test case types:");
            for category in TestCaseType::ALL {
                println!("  {:<12} {}", format!("{:?}", category).to_lowercase(), category.label());
            }
            println!();
            println!("Output formats:");
            for format in OutputFormat::ALL {
                println!("  {:<12} {}", format!("{:?}", format).to_lowercase(), format.label());
            }
        }

        None => {
            println!("Teletest - generate test cases from design documents");
            println!();
            println!("Usage: teletest <COMMAND>");
            println!();
            println!("Commands:");
            println!("  generate  Generate test cases once and print them");
            println!("  tui       Open the interactive generator page");
            println!("  list      List test case types and output formats");
            println!();
            println!("Run with --help for more information.");
        }
    }

    Ok(())
}
