// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;
use temporal_kg::utils::logging::{format_info, format_step, format_success, format_warning};
use temporal_kg::{
    ArticleReader, ChatCompletionClient, Config, Document, FixedDelay, GraphStore,
    KnowledgeGraphRefiner, QaGenerator, QaTextWriter, QaTimestampFormatter, TextChunker,
    TimestampResolver, Validator, format_timestamp, read_qa_text,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "temporal_kg")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Temporal Q&A generation and knowledge graph refinement", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate timestamped Q&A records for every article
    Qa {
        #[arg(short, long, value_name = "CSV")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,
    },

    /// Correct knowledge graph entries against one article, batch by batch
    Refine {
        #[arg(short, long, value_name = "CSV")]
        input: PathBuf,

        #[arg(short, long, value_name = "JSON")]
        graph: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = 0)]
        row: usize,
    },

    /// Insert timestamp lines into an existing Q&A file
    Format {
        #[arg(short, long, value_name = "CSV")]
        input: PathBuf,

        #[arg(long, value_name = "TXT")]
        qa: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = 0)]
        row: usize,
    },

    /// Preview chunk windows without calling the generation service
    Chunk {
        #[arg(short, long, value_name = "CSV")]
        input: PathBuf,

        #[arg(long)]
        max_words: Option<usize>,

        #[arg(long)]
        overlap: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    temporal_kg::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Temporal KG pipeline");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::default_config()
    };

    match cli.command {
        Commands::Qa {
            input,
            output,
            limit,
        } => {
            cmd_qa(&config, &input, output, limit).await?;
        }
        Commands::Refine {
            input,
            graph,
            output,
            row,
        } => {
            cmd_refine(&config, &input, &graph, output, row).await?;
        }
        Commands::Format {
            input,
            qa,
            output,
            row,
        } => {
            cmd_format(&config, &input, &qa, output, row).await?;
        }
        Commands::Chunk {
            input,
            max_words,
            overlap,
        } => {
            cmd_chunk(&config, &input, max_words, overlap)?;
        }
    }

    Ok(())
}

fn load_articles(input: &Path) -> Result<Vec<Document>> {
    Validator::validate_file_path(input)?;
    Validator::validate_extension(input, &["csv"])?;

    let documents = ArticleReader::new()
        .read_path(input)
        .with_context(|| format!("Failed to read articles from {}", input.display()))?;

    if documents.is_empty() {
        anyhow::bail!("No articles with text found in {}", input.display());
    }
    Ok(documents)
}

fn select_article(documents: Vec<Document>, row: usize) -> Result<Document> {
    Validator::validate_row_index(row, documents.len())?;
    documents
        .into_iter()
        .nth(row)
        .ok_or_else(|| anyhow::anyhow!("Row {} not found", row))
}

fn build_client(config: &Config) -> Result<(ChatCompletionClient, FixedDelay)> {
    let client = ChatCompletionClient::from_config(&config.generation)
        .context("Failed to create generation client")?;
    info!(
        "Using model {} at {} ({} ms between requests)",
        config.generation.model,
        client.endpoint(),
        config.generation.throttle_ms
    );
    Ok((client, FixedDelay::new(config.generation.throttle())))
}

async fn cmd_qa(
    config: &Config,
    input: &Path,
    output: Option<PathBuf>,
    limit: Option<usize>,
) -> Result<()> {
    let start_time = Instant::now();
    println!("{}", format_step(1, 3, "Loading articles"));

    let mut documents = load_articles(input)?;
    if let Some(limit) = limit {
        documents.truncate(limit);
    }

    let (client, limiter) = build_client(config)?;
    println!("{}", format_step(2, 3, "Generating questions and answers"));

    let generator = QaGenerator::from_config(config, &client, &limiter).with_progress(true);
    let run = generator.generate_all(&documents).await;

    println!("{}", format_step(3, 3, "Writing records"));
    let output = output.unwrap_or_else(|| config.output.qa_path.clone());
    QaTextWriter::new(&output)
        .write_records(&run.records)
        .context("Failed to write Q&A records")?;

    if run.stats.units_failed > 0 || run.stats.units_empty > 0 {
        println!(
            "{}",
            format_warning(&format!(
                "{} chunk(s) failed, {} returned no usable text",
                run.stats.units_failed, run.stats.units_empty
            ))
        );
    }
    println!(
        "{}",
        format_success(&format!(
            "{} record(s) from {} article(s) saved to {} in {:.2}s",
            run.records.len(),
            documents.len(),
            output.display(),
            start_time.elapsed().as_secs_f64()
        ))
    );

    Ok(())
}

async fn cmd_refine(
    config: &Config,
    input: &Path,
    graph: &Path,
    output: Option<PathBuf>,
    row: usize,
) -> Result<()> {
    Validator::validate_file_path(graph)?;
    Validator::validate_extension(graph, &["json"])?;

    let document = select_article(load_articles(input)?, row)?;
    info!("Refining against article: {}", Validator::truncate_text(&document.title, 80));

    let entries = GraphStore::new(graph)
        .load()
        .context("Failed to load knowledge graph")?;

    let (client, limiter) = build_client(config)?;
    let refiner = KnowledgeGraphRefiner::new(&client, &limiter, config.refine.batch_size)?
        .with_progress(true);
    let refinement = refiner.refine(&document.body, &entries).await;

    let output = output.unwrap_or_else(|| config.output.graph_path.clone());
    GraphStore::new(&output)
        .save(&refinement.entries)
        .context("Failed to save refined knowledge graph")?;

    for report in refinement.reports.iter().filter(|r| !r.is_refined()) {
        println!(
            "{}",
            format_warning(&format!(
                "entries {}-{} kept unchanged",
                report.range.start, report.range.end
            ))
        );
    }
    println!(
        "{}",
        format_success(&format!(
            "{} of {} batch(es) refined, {} entries saved to {}",
            refinement.refined_batches(),
            refinement.reports.len(),
            refinement.entries.len(),
            output.display()
        ))
    );

    Ok(())
}

async fn cmd_format(
    config: &Config,
    input: &Path,
    qa: &Path,
    output: Option<PathBuf>,
    row: usize,
) -> Result<()> {
    Validator::validate_file_path(qa)?;

    let document = select_article(load_articles(input)?, row)?;
    let existing = read_qa_text(qa).context("Failed to read Q&A file")?;
    Validator::validate_content_not_empty(&existing)?;

    let article_date = format_timestamp(document.default_timestamp());

    let (client, limiter) = build_client(config)?;
    let formatter = QaTimestampFormatter::new(&client, &limiter);
    let formatted = formatter.format(&document.body, &article_date, &existing).await;

    let output = output.unwrap_or_else(|| config.output.formatted_qa_path.clone());
    QaTextWriter::new(&output)
        .write_text(&formatted)
        .context("Failed to write formatted Q&A")?;

    if formatted == existing {
        println!("{}", format_warning("Q&A text left unchanged"));
    }
    println!(
        "{}",
        format_success(&format!("Formatted Q&A saved to {}", output.display()))
    );

    Ok(())
}

fn cmd_chunk(
    config: &Config,
    input: &Path,
    max_words: Option<usize>,
    overlap: Option<usize>,
) -> Result<()> {
    let max_words = max_words.unwrap_or(config.chunking.max_words);
    if max_words == 0 {
        anyhow::bail!("--max-words must be greater than 0");
    }
    let chunker = TextChunker::new(
        max_words,
        overlap.unwrap_or(config.chunking.overlap_sentences),
    );
    let resolver = TimestampResolver::new();

    let documents = load_articles(input)?;
    for document in &documents {
        let chunks = chunker.chunk(&document.id, &document.body);
        println!(
            "{}",
            format_info(&format!(
                "{} [{}]: {} chunk(s)",
                Validator::truncate_text(&document.title, 60),
                document.id,
                chunks.len()
            ))
        );

        let default_date = document.default_timestamp();
        for chunk in &chunks {
            println!(
                "  #{:<3} sentences {:>4}..{:<4} overlap {:<3} words {:<6} {}",
                chunk.sequence_index,
                chunk.sentences.start,
                chunk.sentences.end,
                chunk.overlap,
                chunk.word_count(),
                resolver.resolve(&chunk.text, default_date)
            );
        }
    }

    Ok(())
}
