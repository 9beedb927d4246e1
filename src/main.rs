// Thu Aug 06 2026 - Alex

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use heapscan::{
    config::Config,
    memory::{Address, MemoryReader, SnapshotMemory},
    output::{render_records, JsonExporter},
    process::{ManifestProcessSource, ProcessSource},
    utils::LoggingUtils,
    HeapEnumerator, TypeCatalog,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "heapscan")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "NT heap chunk enumerator for Windows memory snapshots", long_about = None)]
struct Args {
    #[arg(short, long)]
    snapshot: PathBuf,

    #[arg(long)]
    map: Option<PathBuf>,

    #[arg(long, default_value = "0x0")]
    base: Address,

    #[arg(short, long)]
    processes: PathBuf,

    #[arg(long)]
    profile: Option<PathBuf>,

    #[arg(long)]
    pid: Option<u32>,

    #[arg(long)]
    dump: Option<Address>,

    #[arg(long)]
    dump_all: bool,

    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    #[arg(long)]
    json: Option<PathBuf>,

    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[arg(long)]
    no_color: bool,

    #[arg(long)]
    no_banner: bool,

    #[arg(long)]
    no_progress: bool,
}

fn main() {
    let args = Args::parse();

    if args.no_color || !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    LoggingUtils::init(&args.log_level);

    if !args.no_banner {
        println!("{}", "NT Heap Snapshot Scanner".cyan().bold());
        println!("{}", "=".repeat(50).cyan());
        println!();
    }

    if let Err(e) = run(&args) {
        eprintln!("{} {:#}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let config = build_config(args);
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    println!("{} Loading snapshot: {}", "[*]".blue(), args.snapshot.display());

    let memory: Arc<dyn MemoryReader> = match &args.map {
        Some(map) => {
            let snapshot = SnapshotMemory::load_mapped(&args.snapshot, map)
                .context("failed to load snapshot with region map")?;
            println!("{} Mapped {} regions", "[+]".green(), snapshot.region_count());
            Arc::new(snapshot)
        }
        None => Arc::new(
            SnapshotMemory::load(&args.snapshot, args.base)
                .context("failed to load snapshot")?,
        ),
    };

    let catalog = match &args.profile {
        Some(path) => {
            let catalog = TypeCatalog::from_json_file(path)
                .context("failed to load layout profile")?;
            println!(
                "{} Layout profile: {} ({} structures)",
                "[*]".blue(),
                path.display(),
                catalog.struct_count()
            );
            catalog
        }
        None => TypeCatalog::windows_10_x64().clone(),
    };

    let source = ManifestProcessSource::load(&args.processes)
        .context("failed to load process manifest")?;
    let processes = source.list_matching(config.pid_filter)?;

    println!("{} Selected {} process(es)", "[+]".green(), processes.len());
    println!();

    let progress = if !args.no_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb.set_message("Walking heaps...");
        Some(pb)
    } else {
        None
    };

    let enumerator = HeapEnumerator::new(memory, Arc::new(catalog), config.clone());
    let records = enumerator.run(&processes);

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if records.is_empty() {
        println!("{} No chunks decoded", "[!]".yellow());
    } else {
        println!("{}", render_records(&records, !args.no_color));
    }

    if let Some(json_path) = &args.json {
        JsonExporter::new()
            .write_to_file(&records, json_path)
            .context("failed to write JSON output")?;
        println!("{} Records saved to: {}", "[+]".green(), json_path.display());
    }

    let elapsed = start_time.elapsed();
    println!();
    println!("{}", "=".repeat(50).cyan());
    println!(
        "{} Decoded {} chunk(s) in {:.2}s",
        "[+]".green(),
        records.len(),
        elapsed.as_secs_f64()
    );
    if config.dump_all || config.dump_target.is_some() {
        println!(
            "{} Dumps written to: {}",
            "[+]".green(),
            config.output_dir.display()
        );
    }

    Ok(())
}

fn build_config(args: &Args) -> Config {
    let mut config = Config::new().with_output_dir(&args.output_dir);
    if let Some(pid) = args.pid {
        config = config.with_pid_filter(pid);
    }
    if let Some(target) = args.dump {
        config = config.with_dump_target(target);
    }
    config.with_dump_all(args.dump_all)
}
