// src/cli.rs
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{LevelFilter, info};

use crate::config::consts::*;
use crate::config::options::{AppOptions, OutputTarget, ScrapeOptions, SupabaseOptions, YelpOptions};
use crate::core::HttpClient;
use crate::error::Result;
use crate::progress::LogProgress;
use crate::scrape::{self, Summary};
use crate::specs::menu::MenuSelectors;
use crate::store::{CsvStore, SupabaseStore, csv::write_row};
use crate::yelp::YelpClient;

#[derive(Parser, Debug, Clone)]
#[command(name = "nomm", version, about = "Collect restaurants and their Yelp menus into Supabase")]
pub struct Args {
    /// Where to search, as Yelp understands it ("San Ramon, CA")
    #[arg(short, long, default_value = DEFAULT_LOCATION)]
    pub location: String,

    /// How many search results to work through
    #[arg(short = 'n', long, default_value_t = DEFAULT_TOTAL)]
    pub total: usize,

    /// Scraping threads
    #[arg(short, long, default_value_t = WORKERS)]
    pub workers: usize,

    /// Pause per worker after each restaurant, in milliseconds
    #[arg(long, default_value_t = REQUEST_PAUSE_MS)]
    pub pause_ms: u64,

    /// Pause between search batches, in milliseconds
    #[arg(long, default_value_t = BATCH_PAUSE_MS)]
    pub batch_pause_ms: u64,

    #[arg(long, env = "YELP_API_KEY", hide_env_values = true)]
    pub yelp_key: Option<String>,

    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
    pub supabase_key: Option<String>,

    /// Write restaurant/menu/dish CSV files here instead of Supabase
    #[arg(long, value_name = "DIR", num_args = 0..=1, default_missing_value = DEFAULT_CSV_DIR)]
    pub csv_dir: Option<PathBuf>,

    /// Scrape one menu page and print its dishes as CSV; nothing is stored
    #[arg(long, value_name = "URL", conflicts_with = "csv_dir")]
    pub menu_url: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Append logs to a file instead of stderr
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_LOG_FILE)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn to_options(&self) -> AppOptions {
        AppOptions {
            yelp: YelpOptions { api_key: self.yelp_key.clone().unwrap_or_default() },
            supabase: SupabaseOptions {
                url: self.supabase_url.clone().unwrap_or_default(),
                key: self.supabase_key.clone().unwrap_or_default(),
            },
            scrape: ScrapeOptions {
                location: self.location.clone(),
                total: self.total,
                workers: self.workers,
                pause_ms: self.pause_ms,
                batch_pause_ms: self.batch_pause_ms,
            },
            output: match &self.csv_dir {
                Some(dir) => OutputTarget::Csv(dir.clone()),
                None => OutputTarget::Supabase,
            },
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    crate::log::init(level, args.log_file.as_deref())?;

    let http = HttpClient::new()?;

    if let Some(url) = &args.menu_url {
        return print_menu(&http, url);
    }

    let opts = args.to_options();
    opts.validate()?;

    let yelp = YelpClient::new(&opts.yelp.api_key, http.clone());
    let mut progress = LogProgress::new(opts.scrape.progress_interval());

    let summary = match &opts.output {
        OutputTarget::Supabase => {
            let mut store = SupabaseStore::new(&opts.supabase.url, &opts.supabase.key, http)?;
            scrape::collect(&yelp, &mut store, &opts.scrape, Some(&mut progress))?
        }
        OutputTarget::Csv(dir) => {
            let mut store = CsvStore::open(dir)?;
            info!("Writing tables to {}", store.dir().display());
            scrape::collect(&yelp, &mut store, &opts.scrape, Some(&mut progress))?
        }
    };

    print_summary(&summary);
    Ok(())
}

fn print_menu(http: &HttpClient, url: &str) -> Result<()> {
    let html = http.get_html(url)?;
    let dishes = MenuSelectors::new()?.parse(&html);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_row(&mut out, &[s!("name"), s!("description"), s!("price")], ',')?;
    for d in dishes {
        write_row(&mut out, &[d.name, d.description, d.price], ',')?;
    }
    out.flush()?;
    Ok(())
}

fn print_summary(s: &Summary) {
    println!(
        "{} checked | {} processed | {} skipped | {} failed | {} dishes",
        s.checked, s.processed, s.skipped, s.failed, s.dishes
    );
}
