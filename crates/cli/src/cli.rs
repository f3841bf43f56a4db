use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pagecite", about = "PDF question answering with page citations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask a question about a PDF
    Ask {
        /// Path to the PDF file
        #[arg(short, long)]
        file: PathBuf,

        /// The question to answer
        question: String,

        /// Number of chunks to retrieve as context
        #[arg(long, default_value_t = 4)]
        top_k: usize,
    },

    /// Download a list of blog URLs and zip the results
    Scrape {
        /// File with one URL per line (lines starting with '#' are skipped)
        urls_file: PathBuf,

        /// Output directory (defaults to SCRAPER_OUT_DIR or "extracted_blogs")
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print the full per-item report as JSON
        #[arg(long)]
        json: bool,
    },
}
