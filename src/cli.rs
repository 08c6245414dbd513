use clap::{Parser, Subcommand};
use log::info;
use tunegrep::clients::entities::{CatalogEntry, FilterCriteria, MatchRecord};
use tunegrep::clients::errors::Result;
use tunegrep::clients::itunes::Entity;
use tunegrep::lookup::{CatalogLookup, ConfigBuilder};

#[derive(Parser)]
#[command(name = "tunegrep")]
#[command(version, about = "Search the iTunes catalog and filter tracks by keyword", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog by free-text term
    Search {
        /// Term sent to the catalog search endpoint
        term: String,

        /// Page size, clamped to the API maximum of 200
        #[arg(short, long, default_value_t = 50)]
        limit: u32,

        /// Restrict the search to one entity kind
        #[arg(short, long)]
        entity: Option<Entity>,

        /// Keep only entries whose artist or track name contains one of
        /// these keywords (case-insensitive); repeatable
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,

        /// Alternate term searched once if the primary term has no results
        #[arg(long)]
        fallback_term: Option<String>,

        /// Emit an indented JSON array instead of one line per entry
        #[arg(long)]
        json: bool,
    },
    /// Look up a single track by its numeric catalog id
    Lookup {
        /// Numeric catalog identifier
        id: u64,

        /// Emit an indented JSON array instead of one line per entry
        #[arg(long)]
        json: bool,
    },
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            term,
            limit,
            entity,
            keywords,
            fallback_term,
            json,
        } => {
            info!("Building config ...");
            let mut builder = ConfigBuilder::new().limit(limit);
            if let Some(entity) = entity {
                builder = builder.entity(entity);
            }
            if let Some(fallback) = fallback_term {
                builder = builder.fallback_term(fallback);
            }
            let lookup = CatalogLookup::new(builder.build()?);
            // An empty criteria set passes everything through
            let criteria = FilterCriteria::new(keywords);
            let entries = lookup.search(&term, Some(&criteria)).await?;
            print_entries(&entries, json)?;
        }
        Commands::Lookup { id, json } => {
            let lookup = CatalogLookup::new(ConfigBuilder::new().build()?);
            let entries = lookup.lookup_by_id(id).await?;
            print_entries(&entries, json)?;
        }
    }
    Ok(())
}

// Output is buffered until here: nothing prints unless the whole response
// decoded cleanly. Zero entries is a normal, empty, zero-exit run.
fn print_entries(entries: &[CatalogEntry], json: bool) -> Result<()> {
    if json {
        let matches: Vec<MatchRecord> = entries.iter().map(MatchRecord::from).collect();
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for entry in entries {
            println!("{}", render_line(entry));
        }
    }
    Ok(())
}

fn render_line(entry: &CatalogEntry) -> String {
    format!(
        "Track: {} | Artist: {} | URL: {}",
        entry.track.as_deref().unwrap_or(""),
        entry.artist.as_deref().unwrap_or(""),
        entry.preview_url.as_deref().unwrap_or("")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_line_matches_script_format() {
        let entry = CatalogEntry {
            track: Some("Raindance".to_string()),
            artist: Some("Dave".to_string()),
            preview_url: Some("http://x/1".to_string()),
            wrapper_type: Some("track".to_string()),
        };
        assert_eq!(
            render_line(&entry),
            "Track: Raindance | Artist: Dave | URL: http://x/1"
        );
    }

    #[test]
    fn render_line_blanks_missing_fields() {
        let entry = CatalogEntry {
            track: None,
            artist: Some("Dave".to_string()),
            preview_url: None,
            wrapper_type: None,
        };
        assert_eq!(render_line(&entry), "Track:  | Artist: Dave | URL: ");
    }
}
