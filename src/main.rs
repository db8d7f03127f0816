//! Casa CLI - property listings in the terminal
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use casa::listing::{format_price, ListingDraft};
use casa::{ui, ApiClient, Config};
use clap::{Parser, Subcommand};
use colored::Colorize;

#[derive(Parser)]
#[command(name = "casa")]
#[command(author, version, about = "TUI for browsing and creating property listings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List listings, optionally filtered by a search query
    List {
        /// Free-text search query
        query: Option<String>,
    },
    /// Show a single listing
    Show {
        /// Listing id
        id: u64,
        /// Also request a generated summary
        #[arg(long)]
        summary: bool,
    },
    /// Create a new listing
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        image_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    let config = Config::load()?;

    match cli.command {
        Some(Commands::List { query }) => {
            let client = ApiClient::new(&config.api)?;
            let listings = client.list(query.as_deref()).await?;

            if listings.is_empty() {
                match query.as_deref() {
                    Some(q) if !q.is_empty() => println!("No listings match \"{}\".", q),
                    _ => println!("No listings yet."),
                }
            } else {
                println!("Listings ({}):\n", listings.len());
                for listing in &listings {
                    println!(
                        "🏠 {} — {} (#{})",
                        listing.title.bold(),
                        format_price(listing.price).green(),
                        listing.id
                    );
                    println!("   📍 {}", listing.location);
                    println!("   {}\n", listing.description.dimmed());
                }
            }
        }
        Some(Commands::Show { id, summary }) => {
            let client = ApiClient::new(&config.api)?;
            let listing = client.get(id).await?;

            println!("=== {} ===\n", listing.title.bold());
            println!("💰 {}", format_price(listing.price).green());
            println!("📍 {}", listing.location);
            if let Some(url) = &listing.image_url {
                println!("🖼  {}", url);
            }
            println!("\n{}", listing.description);

            if summary {
                // A summary is non-essential; its failure is a warning, not an error.
                match client.summarize(id).await {
                    Ok(summary) => {
                        println!("\n📌 Summary:");
                        for bullet in &summary.bullets {
                            println!("  {}", bullet);
                        }
                    }
                    Err(e) => eprintln!("Warning: failed to summarize listing: {}", e),
                }
            }
        }
        Some(Commands::Add {
            title,
            price,
            location,
            description,
            image_url,
        }) => {
            let draft = ListingDraft::from_input(
                &title,
                &price,
                &location,
                &description,
                image_url.as_deref().unwrap_or(""),
            )?;

            let client = ApiClient::new(&config.api)?;
            let created = client.create(&draft).await?;

            println!(
                "✅ Created listing #{}: {}",
                created.id,
                created.title.bold()
            );
        }
        None => {
            // Default: Launch the TUI
            ui::run(&config).await?;
        }
    }

    Ok(())
}
