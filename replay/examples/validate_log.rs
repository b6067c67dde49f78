use std::fs;
use std::path::PathBuf;

use clap::Parser;
use completion_stats_replay::{classify_log, parse_log_line, partition_log};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Collected event log, one JSON event per line
    log: PathBuf,

    /// Write valid / invalid / malformed line buckets into this directory
    #[arg(long)]
    partition_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.log)?;
    let events = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_log_line(line).ok())
        .collect();

    let verdicts = classify_log(events);
    for verdict in &verdicts {
        match &verdict.violation {
            Some(violation) => println!(
                "{}: INVALID after {} events ({})",
                verdict.session_uid, verdict.event_count, violation
            ),
            None => println!(
                "{}: valid ({} events)",
                verdict.session_uid, verdict.event_count
            ),
        }
    }

    let valid = verdicts.iter().filter(|verdict| verdict.is_valid()).count();
    println!("{valid}/{} sessions valid", verdicts.len());

    if let Some(dir) = args.partition_dir {
        let partition = partition_log(&raw);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("valid.log"), partition.valid.join("\n"))?;
        fs::write(dir.join("invalid.log"), partition.invalid.join("\n"))?;
        fs::write(dir.join("malformed.log"), partition.malformed.join("\n"))?;
        println!(
            "partitioned {} valid / {} invalid / {} malformed lines into {}",
            partition.valid.len(),
            partition.invalid.len(),
            partition.malformed.len(),
            dir.display()
        );
    }

    Ok(())
}
