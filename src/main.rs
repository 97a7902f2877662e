use chrono::Datelike;
use clap::{Args as ClapArgs, Parser, Subcommand};
use party_ed::prelude::*;
use party_ed::{discover_records, load_person, logging, summarize, FileConfig, ProfileReport, SelectionReport};
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Party and education attainment lookup for members of Congress
#[derive(Parser, Debug)]
#[command(name = "party-ed")]
#[command(about = "Select a member's most recent qualifying position and classify their education")]
#[command(version)]
struct Args {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(ClapArgs, Debug)]
struct FilterArgs {
    /// Member must have served in or after this year
    #[arg(long = "min-year", conflicts_with = "current_year")]
    min_year: Option<i32>,

    /// Member must have served in or after the current year
    #[arg(long = "current-year")]
    current_year: bool,

    /// Chamber filter: any, house (1), senate (2) or both (3)
    #[arg(long, default_value = "any", value_parser = parse_chamber)]
    chamber: ChamberFilter,
}

impl FilterArgs {
    fn to_filter(&self) -> Filter {
        let min_year = if self.current_year {
            Some(chrono::Local::now().year())
        } else {
            self.min_year
        };
        Filter::new(min_year, self.chamber)
    }
}

fn parse_chamber(s: &str) -> std::result::Result<ChamberFilter, String> {
    s.parse::<ChamberFilter>().map_err(|e| e.to_string())
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the position that would be used for a member, without classifying
    Select {
        /// Bioguide JSON file for the member
        path: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Classify education for members that pass the filters (one JSON line each)
    Classify {
        /// Bioguide JSON files, or directories to search for *.json
        #[arg(num_args = 0..)]
        paths: Vec<PathBuf>,

        /// Read file paths from stdin instead of (or in addition to) arguments
        /// Useful for stdio pipelines: find ... | party-ed classify --stdin
        #[arg(long)]
        stdin: bool,

        #[command(flatten)]
        filter: FilterArgs,

        /// TOML config file with classifier settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory holding api.secret, org.secret and proj.secret (or PARTY_ED_SECRETS_DIR env var)
        #[arg(long = "secrets-dir")]
        secrets_dir: Option<PathBuf>,

        /// API key (can also use OPENAI_API_KEY env var)
        #[arg(long = "api-key")]
        api_key: Option<String>,

        /// Organization id (can also use OPENAI_ORG_ID env var)
        #[arg(long)]
        organization: Option<String>,

        /// Project id (can also use OPENAI_PROJECT_ID env var)
        #[arg(long)]
        project: Option<String>,

        /// Model name (default: gpt-4o-mini, or PARTY_ED_MODEL env var)
        #[arg(long)]
        model: Option<String>,

        /// API base URL (default: https://api.openai.com/v1, or OPENAI_BASE_URL env var)
        #[arg(long = "base-url")]
        base_url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

fn print_available_commands() {
    println!("Available commands:");
    println!("  select    Show the position that would be used for a member");
    println!("  classify  Classify education for members that pass the filters");
}

fn run_select_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Select { path, filter } = cmd else {
        unreachable!()
    };

    let filter = filter.to_filter();
    let person = load_person(&path)?;

    match select(&person, &filter) {
        Some(selection) => {
            let report = SelectionReport::new(path.to_string_lossy(), &selection);
            println!("{}", serde_json::to_string(&report)?);
        }
        None => {
            tracing::debug!(file = %path.display(), ?filter, "no qualifying position, skipping");
        }
    }

    Ok(())
}

fn run_classify_command(cmd: Command) -> anyhow::Result<()> {
    let Command::Classify {
        mut paths,
        stdin,
        filter,
        config,
        secrets_dir,
        api_key,
        organization,
        project,
        model,
        base_url,
        timeout,
    } = cmd else {
        unreachable!()
    };

    let filter = filter.to_filter();

    // Sources apply lowest precedence first: file, secrets, env, flags
    let file_config = match &config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let mut builder = ClassifierConfigBuilder::new().file(&file_config);

    let secrets_dir = secrets_dir
        .or_else(|| std::env::var("PARTY_ED_SECRETS_DIR").ok().map(PathBuf::from))
        .or_else(|| file_config.secrets_dir.clone());
    if let Some(dir) = secrets_dir {
        builder = builder.secrets_dir(&dir)?;
    }

    builder = builder.env();

    if let Some(key) = api_key {
        builder = builder.api_key(key);
    }
    if let Some(org) = organization {
        builder = builder.organization(org);
    }
    if let Some(project) = project {
        builder = builder.project(project);
    }
    if let Some(model) = model {
        builder = builder.model(model);
    }
    if let Some(url) = base_url {
        builder = builder.base_url(url);
    }
    if let Some(secs) = timeout {
        builder = builder.timeout_secs(secs);
    }

    let classifier = OpenAiClassifier::new(builder.build()?)?;

    if stdin {
        // Read paths from stdin (one per line)
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                paths.push(PathBuf::from(trimmed));
            }
        }
    }

    if paths.is_empty() {
        anyhow::bail!("No input files. Pass paths or use --stdin");
    }

    let discovered = discover_records(&paths)?;
    let mut failures = discovered.errors.len();
    for e in &discovered.errors {
        tracing::error!(error = %e, "failed to read input directory");
    }

    for record in discovered.records {
        let result = load_person(&record.path)
            .and_then(|person| summarize(&person, &filter, &classifier));

        match result {
            Ok(Some(summary)) => {
                let report = ProfileReport {
                    filename: record.filename,
                    summary,
                };
                println!("{}", serde_json::to_string(&report)?);
            }
            Ok(None) => {
                tracing::debug!(file = %record.filename, "no qualifying position, skipping");
            }
            Err(e) => {
                failures += 1;
                tracing::error!(
                    file = %record.filename,
                    retryable = e.is_retryable(),
                    error = %e,
                    "failed to process record"
                );
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} record(s) failed", failures);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    match args.command {
        Some(cmd @ Command::Select { .. }) => run_select_command(cmd),
        Some(cmd @ Command::Classify { .. }) => run_classify_command(cmd),
        None => {
            print_available_commands();
            Ok(())
        }
    }
}
