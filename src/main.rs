use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use spellint::cli::output::{self, OutputFormat};
use spellint::dict::store::{DictKind, WordStore};
use spellint::{checker, fixer, report, scanner, Config};
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spellint")]
#[command(version, about = "A repository-local spelling linter", long_about = None)]
struct Cli {
    /// Root of the tree to check (defaults to the current directory)
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,

    /// Interactively fix errors instead of writing a report
    #[arg(short, long)]
    fix: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if errors are found
    #[arg(long)]
    no_fail: bool,

    /// Console output format in report mode (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Report file path
    #[arg(long)]
    report_file: Option<PathBuf>,

    /// Generic dictionary file
    #[arg(long)]
    generic_dict: Option<PathBuf>,

    /// Project dictionary file
    #[arg(long)]
    project_dict: Option<PathBuf>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add words to a dictionary without scanning
    Add {
        /// Words to add
        #[arg(required = true)]
        words: Vec<String>,

        /// Add to the generic dictionary instead of the project one
        #[arg(long)]
        generic: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellint", &mut io::stdout());
        return Ok(());
    }

    if cli.no_color {
        colored::control::set_override(false);
    }
    let colored = !cli.no_color;

    let config = Config::load(cli.generic_dict, cli.project_dict, cli.report_file)?;

    if let Some(Commands::Add { words, generic }) = cli.command {
        return add_words(&config, &words, generic);
    }

    let quiet_stdout = !cli.fix && cli.format == OutputFormat::Json;

    let mut checker = checker::SpellChecker::new(&config)?;
    if !quiet_stdout {
        println!(
            "Loaded {} generic words, {} project words",
            checker.store().generic_len(),
            checker.store().project_len()
        );
    }

    let records = scanner::scan(&cli.root, &checker, &config);

    if cli.fix {
        if records.is_empty() {
            output::print_report_summary(0, &config.report_file, colored);
            return Ok(());
        }
        let stdin = io::stdin();
        let stats = fixer::InteractiveSession::new(&mut checker, stdin.lock(), io::stdout(), colored)
            .run(&records)?;
        output::print_fix_summary(&stats, records.len(), colored);
        return Ok(());
    }

    report::write_report(&config.report_file, &records)?;
    output::print_errors(&records, colored, cli.format);
    if !quiet_stdout {
        output::print_report_summary(records.len(), &config.report_file, colored);
    }

    if !records.is_empty() && !cli.no_fail {
        std::process::exit(1);
    }
    Ok(())
}

fn add_words(config: &Config, words: &[String], generic: bool) -> Result<()> {
    let kind = if generic {
        DictKind::Generic
    } else {
        DictKind::Project
    };
    let mut store = WordStore::open(&config.generic_dictionary, &config.project_dictionary);

    for word in words {
        store.add(word, kind)?;
        println!("Added '{}' to the {} dictionary.", word, kind);
    }
    Ok(())
}
