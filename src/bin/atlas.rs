use anyhow::Result;
use atlas_rs::{Client, Region, filter, models, storage, viz};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "atlas",
    version,
    about = "Explore, filter, export & compare world countries"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the full country list, filter it, and print or export it.
    List(ListArgs),
    /// Look up countries by cca3 codes and print their details.
    Lookup(LookupArgs),
    /// Compare up to 4 countries side by side with text bars.
    Compare(CompareArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive substring match against the country name.
    #[arg(short, long)]
    search: Option<String>,
    /// Region filter: Africa, Americas, Asia, Europe, Oceania, or Antarctic.
    #[arg(short, long)]
    region: Option<String>,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Locale for number formatting (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct LookupArgs {
    /// cca3 codes separated by comma or semicolon (e.g., DEU,BRA).
    #[arg(short, long)]
    codes: String,
    /// Locale for number formatting (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct CompareArgs {
    /// Up to 4 cca3 codes separated by comma or semicolon.
    #[arg(short, long)]
    codes: String,
    /// Locale for number formatting (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_uppercase())
        .filter(|x| !x.is_empty())
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Lookup(args) => cmd_lookup(args),
        Command::Compare(args) => cmd_compare(args),
    }
}

fn cmd_list(args: ListArgs) -> Result<()> {
    let region = match args.region.as_deref() {
        Some(s) => Some(
            Region::parse(s)
                .ok_or_else(|| anyhow::anyhow!("unknown region: {} (expected one of Africa, Americas, Asia, Europe, Oceania, Antarctic)", s))?,
        ),
        None => None,
    };

    let client = Client::default();
    let mut countries = client.fetch_all()?;
    models::sort_by_display_name(&mut countries);

    let filters = filter::Filters {
        search: args.search.unwrap_or_default(),
        region,
        favorites_only: false,
    };
    let visible: Vec<_> = filter::apply(&countries, &filters, |_| false)
        .into_iter()
        .cloned()
        .collect();

    let locale = viz::map_locale(&args.locale);
    for c in &visible {
        println!(
            "{}  {:<32} {:<10} pop={:>15}  area={:>12} km²",
            c.cca3,
            c.display_name(),
            c.region.as_str(),
            viz::fmt_int(c.population, locale),
            viz::fmt_area(c.area, locale),
        );
    }
    eprintln!("{} of {} countries shown", visible.len(), countries.len());

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&visible, path)?,
            "json" => storage::save_json(&visible, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", visible.len(), path.display());
    }

    Ok(())
}

fn cmd_lookup(args: LookupArgs) -> Result<()> {
    let codes = parse_list(&args.codes);
    if codes.is_empty() {
        anyhow::bail!("at least one cca3 code required");
    }
    let client = Client::default();
    let countries = client.fetch_by_codes(&codes)?;
    if countries.is_empty() {
        eprintln!("No countries matched {}", codes.join(", "));
        return Ok(());
    }

    let locale = viz::map_locale(&args.locale);
    for c in &countries {
        println!("{} ({})", c.display_name(), c.name.official);
        println!("  code:       {}", c.cca3);
        match &c.subregion {
            Some(sub) => println!("  region:     {} ({})", c.region, sub),
            None => println!("  region:     {}", c.region),
        }
        println!("  population: {}", viz::fmt_int(c.population, locale));
        println!("  area:       {} km²", viz::fmt_area(c.area, locale));
        println!("  capital:    {}", c.capitals_joined().unwrap_or_else(|| "N/A".into()));
        if let Some(langs) = c.languages_joined() {
            println!("  languages:  {}", langs);
        }
        if let Some(curr) = c.currencies_joined() {
            println!("  currencies: {}", curr);
        }
        if let Some(borders) = &c.borders {
            if !borders.is_empty() {
                println!("  borders:    {}", borders.join(", "));
            }
        }
        println!();
    }
    Ok(())
}

const BAR_WIDTH: usize = 32;

fn text_bar(value: f64, max: f64) -> String {
    if max <= 0.0 || !value.is_finite() {
        return String::new();
    }
    let filled =
        ((value / max) * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize;
    // Non-zero values always get at least one block.
    let min = if value > 0.0 { 1 } else { 0 };
    "█".repeat(filled.max(min))
}

fn cmd_compare(args: CompareArgs) -> Result<()> {
    let codes = parse_list(&args.codes);
    if codes.is_empty() {
        anyhow::bail!("at least one cca3 code required");
    }
    if codes.len() > atlas_rs::MAX_COMPARE {
        anyhow::bail!(
            "at most {} countries can be compared at a time",
            atlas_rs::MAX_COMPARE
        );
    }

    let client = Client::default();
    let mut countries = client.fetch_by_codes(&codes)?;
    models::sort_by_display_name(&mut countries);
    if countries.is_empty() {
        anyhow::bail!("no countries matched {}", codes.join(", "));
    }

    let locale = viz::map_locale(&args.locale);
    let refs: Vec<&atlas_rs::Country> = countries.iter().collect();

    for c in &refs {
        println!(
            "{}  {:<28} capital: {}",
            c.cca3,
            c.display_name(),
            c.first_capital().unwrap_or("N/A")
        );
    }

    let population = viz::population_data(&refs);
    let max_pop = population.iter().map(|d| d.value).fold(0.0_f64, f64::max);
    println!("\nPopulation");
    for d in &population {
        println!(
            "  {}  {:<BAR_WIDTH$}  {}",
            d.label,
            text_bar(d.value, max_pop),
            viz::fmt_int(d.value as u64, locale)
        );
    }

    let area = viz::area_data(&refs);
    let max_area = area.iter().map(|d| d.value).fold(0.0_f64, f64::max);
    println!("\nArea (km²)");
    for d in &area {
        println!(
            "  {}  {:<BAR_WIDTH$}  {}",
            d.label,
            text_bar(d.value, max_area),
            viz::fmt_area(d.value, locale)
        );
    }

    Ok(())
}
