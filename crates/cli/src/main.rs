use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use command::{CommandResponse, Outcome, NO_INDEX_MESSAGE};
use repo_brain_protocol::Convention;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

mod command;

const RULE_WIDTH: usize = 60;
const SOURCE_PREVIEW_CHARS: usize = 100;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json(response: &CommandResponse) -> Result<()> {
    print_stdout(&serde_json::to_string_pretty(response)?)
}

#[derive(Parser)]
#[command(name = "repo-brain")]
#[command(about = "Explain code using structural, semantic and remembered evidence", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a repository and build its index
    Index(IndexArgs),

    /// Explain a symbol or concept from the indexed repository
    Explain(ExplainArgs),

    /// Manage remembered project conventions
    Convention(ConventionArgs),

    /// Show what is known about the indexed repository
    Status(StatusArgs),
}

#[derive(Args)]
struct IndexArgs {
    /// Repository root
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExplainArgs {
    /// Symbol or concept; multiple words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    symbol: Vec<String>,

    /// Indexed repository root
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Max pieces of evidence to use (overrides max_context_items)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ConventionArgs {
    #[command(subcommand)]
    action: ConventionCommand,
}

#[derive(Subcommand)]
enum ConventionCommand {
    /// Record a convention for future explanations
    Add(ConventionAddArgs),
}

#[derive(Args)]
struct ConventionAddArgs {
    /// Category, e.g. "naming"
    #[arg(long = "type")]
    kind: String,

    #[arg(long)]
    description: String,

    /// Example snippet (repeatable)
    #[arg(long = "example")]
    examples: Vec<String>,

    /// Indexed repository root
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct StatusArgs {
    /// Indexed repository root
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // stdout is reserved for the JSON document
    let json_output = match &cli.command {
        Commands::Index(args) => args.json,
        Commands::Explain(args) => args.json,
        Commands::Convention(args) => match &args.action {
            ConventionCommand::Add(add) => add.json,
        },
        Commands::Status(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Index(args) => run_index(args).await?,
        Commands::Explain(args) => run_explain(args).await?,
        Commands::Convention(args) => match args.action {
            ConventionCommand::Add(add) => run_convention_add(add).await?,
        },
        Commands::Status(args) => run_status(args).await?,
    }

    Ok(())
}

/// Print the no-index condition and exit 1
fn exit_no_index(json: bool) -> Result<()> {
    if json {
        print_json(&CommandResponse::error(NO_INDEX_MESSAGE))?;
    } else {
        print_stdout(&format!("\n{NO_INDEX_MESSAGE}"))?;
    }
    std::process::exit(1);
}

fn exit_error(json: bool, err: &anyhow::Error) -> Result<()> {
    if json {
        print_json(&CommandResponse::error(format!("{err:#}")))?;
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}

fn print_ok(data: impl Serialize) -> Result<()> {
    print_json(&CommandResponse::ok(data)?)
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

fn preview(content: &str) -> String {
    if content.chars().count() <= SOURCE_PREVIEW_CHARS {
        return content.to_string();
    }
    let cut: String = content.chars().take(SOURCE_PREVIEW_CHARS).collect();
    format!("{cut}...")
}

async fn run_index(args: IndexArgs) -> Result<()> {
    let output = match command::index(&args.path).await {
        Ok(output) => output,
        Err(err) => return exit_error(args.json, &err),
    };

    if args.json {
        return print_ok(&output);
    }

    let stats = &output.stats;
    let mut text = format!(
        "\nRepository indexed successfully!\n  Root: {}\n  Files processed: {}\n  Symbols found: {}\n  Semantic windows: {}\n  Index stored at: {}",
        output.root.display(),
        stats.files,
        stats.symbols,
        stats.windows,
        stats.index_dir.display()
    );
    if !stats.errors.is_empty() {
        text.push_str(&format!("\n  Skipped files: {}", stats.errors.len()));
    }
    text.push_str("\n\nYou can now use 'repo-brain explain <symbol>' to explore your code.");
    print_stdout(&text)
}

async fn run_explain(args: ExplainArgs) -> Result<()> {
    let root = match args.path.canonicalize().context("Invalid project path") {
        Ok(root) => root,
        Err(err) => return exit_error(args.json, &err),
    };
    let query = args.symbol.join(" ");

    let output = match command::explain(&root, &query, args.limit).await {
        Ok(Outcome::Done(output)) => output,
        Ok(Outcome::NoIndex) => return exit_no_index(args.json),
        Err(err) => return exit_error(args.json, &err),
    };

    if args.json {
        return print_ok(&output);
    }

    let mut lines = vec![
        format!("\nExplanation for \"{}\":", output.query),
        rule(),
        output.explanation.clone(),
    ];
    if !output.sources.is_empty() {
        lines.push(format!("\n{}", rule()));
        lines.push("Sources:".to_string());
        for (i, source) in output.sources.iter().enumerate() {
            lines.push(format!(
                "  {}. [{}] {}",
                i + 1,
                source.source,
                preview(&source.content)
            ));
        }
    }
    lines.push(rule());
    print_stdout(&lines.join("\n"))
}

async fn run_convention_add(args: ConventionAddArgs) -> Result<()> {
    let root = match args.path.canonicalize().context("Invalid project path") {
        Ok(root) => root,
        Err(err) => return exit_error(args.json, &err),
    };
    let mut convention = Convention::new(args.kind, args.description);
    for example in args.examples {
        convention = convention.with_example(example);
    }

    let output = match command::add_convention(&root, convention).await {
        Ok(Outcome::Done(output)) => output,
        Ok(Outcome::NoIndex) => return exit_no_index(args.json),
        Err(err) => return exit_error(args.json, &err),
    };

    if args.json {
        return print_ok(&output);
    }
    print_stdout(&format!(
        "Convention recorded: {} - {} ({} total)",
        output.convention.kind, output.convention.description, output.total
    ))
}

async fn run_status(args: StatusArgs) -> Result<()> {
    let root = match args.path.canonicalize().context("Invalid project path") {
        Ok(root) => root,
        Err(err) => return exit_error(args.json, &err),
    };
    let output = match command::status(&root).await {
        Ok(Outcome::Done(output)) => output,
        Ok(Outcome::NoIndex) => return exit_no_index(args.json),
        Err(err) => return exit_error(args.json, &err),
    };

    if args.json {
        return print_ok(&output);
    }

    let facts = &output.facts;
    let mut lines = vec![
        format!("Repository: {}", facts.root_path.display()),
        format!("Language: {}", facts.language),
    ];
    if let Some(at) = facts.last_indexed {
        lines.push(format!("Last indexed: {}", at.to_rfc3339()));
    }
    if let Some(count) = facts.symbol_count {
        lines.push(format!(
            "Symbols: {count} (in {} files)",
            output.indexed_files
        ));
    }
    lines.push(format!("Semantic windows: {}", output.semantic_windows));
    lines.push(format!("Index: {}", output.index_dir.display()));

    if facts.conventions.is_empty() {
        lines.push("Conventions: none".to_string());
    } else {
        lines.push("Conventions:".to_string());
        for (i, convention) in facts.conventions.iter().enumerate() {
            lines.push(format!(
                "  {}. [{}] {}",
                i + 1,
                convention.kind,
                convention.description
            ));
            for example in &convention.examples {
                lines.push(format!("     e.g. {example}"));
            }
        }
    }
    print_stdout(&lines.join("\n"))
}
