use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

mod compare;
mod dedupe;
mod prompt;
mod resolve;
mod scan;

#[derive(Parser, Debug)]
#[command(
    name = "dupescan",
    version,
    about = "Find duplicate images and resolve them interactively"
)]
struct Cli {
    /// Directory to scan for images
    #[arg(value_name = "DIR", default_value = ".")]
    path: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let start = Instant::now();
    let images = scan::scan_directory(&cli.path)?;
    println!(
        "Images scanned: {} in {:.4}s.",
        images.len(),
        start.elapsed().as_secs_f64()
    );

    let start = Instant::now();
    let sets = dedupe::find_duplicate_sets(&images);
    println!(
        "\nTime taken to compare images: {:.4}s.",
        start.elapsed().as_secs_f64()
    );

    println!("Duplicates:");
    for (rep, members) in sets.iter() {
        print!("[{}", rep.display());
        for member in members {
            print!(", {}", member.display());
        }
        println!("]");
    }
    println!("Duplicate Count: {}", sets.duplicate_count());

    // Nothing to resolve: skip straight to the exit path.
    let choice = if sets.is_empty() {
        3
    } else {
        println!("\n1. Remove duplicates on a step-by-step review process.");
        println!("2. Remove all duplicates without reviewing based off date created.");
        println!("3. Exit.");
        prompt::prompt_choice("Select an option", 3)?
    };

    match choice {
        1 => resolve::manual_review(&sets)?,
        2 => resolve::auto_by_created(&sets),
        _ => {}
    }

    println!("Exiting.");
    Ok(())
}
