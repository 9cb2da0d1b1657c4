//! # chatlens CLI
//!
//! Command-line interface for the chatlens library.

use std::process;
use std::time::Instant;

use chrono::Weekday;
use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatlens::ChatlensError;
use chatlens::cli::Args;
use chatlens::core::stats::ChatStats;
use chatlens::format::write_to_format;
use chatlens::parser::ChatParser;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {e}");
        process::exit(1);
    }
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chatlens={}", args.log_level())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let total_start = Instant::now();

    let parser_config = args.parser_config()?;
    let filter_config = args.filter_config()?;
    let output_config = args.output_config();
    let output_path = args.output_path();

    println!("🔎 chatlens v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", output_path.display());
    println!("📄 Format:  {}", args.format);
    if !args.participants.is_empty() {
        println!("👤 From:    {}", args.participants.join(", "));
    }
    if let Some(after) = &args.after {
        println!("📅 After:   {after}");
    }
    if let Some(before) = &args.before {
        println!("📅 Before:  {before}");
    }
    if let Some(query) = &args.query {
        println!("🔍 Query:   {query}");
    }
    println!();

    println!("⏳ Parsing...");
    let parse_start = Instant::now();
    let log = ChatParser::with_config(parser_config)
        .parse(&args.input)?
        .ensure_not_empty(Some(args.input.clone()))?;
    let parsed_count = log.len();
    println!(
        "   Found {} records from {} participants ({:.2}s)",
        parsed_count,
        log.participants().len(),
        parse_start.elapsed().as_secs_f64()
    );

    let records = log.filter(&filter_config).into_records();
    if filter_config.is_active() {
        println!("🔍 {} records after filtering", records.len());
    }

    println!("💾 Writing {}...", args.format);
    write_to_format(&records, &output_path, args.format, &output_config)?;

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());
    println!();
    println!("📊 Summary:");
    println!("   Parsed:    {parsed_count} records");
    println!("   Exported:  {} records", records.len());
    println!("   Time:      {:.2}s", total_start.elapsed().as_secs_f64());

    if args.stats {
        print_stats(&ChatStats::from_records(&records));
    }

    Ok(())
}

fn print_stats(stats: &ChatStats) {
    println!();
    println!("📈 Statistics (exported records):");
    println!("   Messages:      {}", stats.total_messages);
    println!("   Participants:  {}", stats.participant_count());
    println!("   Media:         {} ({:.1}%)", stats.media_count, stats.media_ratio());
    println!("   System:        {}", stats.system_count);
    println!("   Days covered:  {}", stats.days_covered);
    if let (Some(first), Some(last)) = (stats.first, stats.last) {
        println!("   Range:         {first} .. {last}");
    }

    let busiest = DAYS
        .iter()
        .flat_map(|&day| (0..24).map(move |hour| (day, hour)))
        .map(|(day, hour)| (day, hour, stats.activity(day, hour)))
        .max_by_key(|&(_, _, count)| count)
        .filter(|&(_, _, count)| count > 0);
    if let Some((day, hour, count)) = busiest {
        println!("   Busiest slot:  {day} {hour:02}:00 ({count} messages)");
    }

    println!();
    println!("👥 Top participants:");
    for (user, count) in stats.top_users().into_iter().take(10) {
        println!("   {count:>6}  {user}");
    }
}

const DAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];
