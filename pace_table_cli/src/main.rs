use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum, ValueHint};
use pace_table::{
    compose_time_text, find_distance, format_time, parse_time_strict, require_distance, Category,
    Column, ColumnPreset, PaceQuery, PaceTable, Sex, SpeedResult, VisibleColumns,
    DEFAULT_DISTANCE_ID, DISTANCES, WORLD_RECORDS,
};
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")");

const PLACEHOLDER: &str = "Enter a distance and time to see pace calculations";

#[derive(Parser, Debug)]
#[command(author, version = VERSION, about = "Equivalent race times from a single performance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a reference performance onto every catalog distance
    Table(TableArgs),
    /// List the distance catalog
    Distances(ListArgs),
    /// List men's and women's world records per distance
    Records(ListArgs),
}

#[derive(Parser, Debug)]
struct TableArgs {
    /// Reference distance id (see `distances`)
    #[arg(short, long, default_value = DEFAULT_DISTANCE_ID)]
    distance: String,

    /// Reference time as S, M:SS or H:MM:SS
    #[arg(short, long, conflicts_with_all = ["hours", "minutes", "seconds"])]
    time: Option<String>,

    /// Hours field, combined with --minutes/--seconds instead of --time
    #[arg(long)]
    hours: Option<String>,

    /// Minutes field
    #[arg(long)]
    minutes: Option<String>,

    /// Seconds field
    #[arg(long)]
    seconds: Option<String>,

    /// Column preset
    #[arg(long, value_enum, default_value_t = PresetOpt::Compact)]
    preset: PresetOpt,

    /// Extra column to show on top of the preset (repeatable)
    #[arg(long = "show", value_parser = Column::from_str)]
    show: Vec<Column>,

    /// Column to hide from the preset (repeatable)
    #[arg(long = "hide", value_parser = Column::from_str)]
    hide: Vec<Column>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatOpt::Text)]
    format: FormatOpt,

    /// Output path (`-` for stdout)
    #[arg(short, long, default_value = "-", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Reject unknown distances and malformed or out-of-range times
    #[arg(long, action = ArgAction::SetTrue)]
    strict: bool,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Only list distances in this category
    #[arg(long, value_parser = Category::from_str)]
    category: Option<Category>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatOpt::Text)]
    format: FormatOpt,

    /// Output path (`-` for stdout)
    #[arg(short, long, default_value = "-", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Verbose logging
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PresetOpt {
    All,
    Minimal,
    Records,
    Compact,
    Slower,
    Faster,
}

impl From<PresetOpt> for ColumnPreset {
    fn from(value: PresetOpt) -> Self {
        match value {
            PresetOpt::All => ColumnPreset::All,
            PresetOpt::Minimal => ColumnPreset::Minimal,
            PresetOpt::Records => ColumnPreset::Records,
            PresetOpt::Compact => ColumnPreset::Compact,
            PresetOpt::Slower => ColumnPreset::Slower,
            PresetOpt::Faster => ColumnPreset::Faster,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatOpt {
    Text,
    Csv,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = match &cli.command {
        Command::Table(args) => args.verbose,
        Command::Distances(args) | Command::Records(args) => args.verbose,
    };
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Command::Table(args) => handle_table(args),
        Command::Distances(args) => handle_distances(args),
        Command::Records(args) => handle_records(args),
    }
}

fn handle_table(args: TableArgs) -> Result<()> {
    let time_text = reference_time_text(&args);
    debug!(distance = %args.distance, time = %time_text, "reference input");

    if args.strict {
        require_distance(&args.distance)?;
        parse_time_strict(&time_text)
            .with_context(|| format!("invalid reference time {time_text:?}"))?;
    }

    let mut columns = ColumnPreset::from(args.preset).columns();
    for &column in &args.show {
        columns.show(column);
    }
    for &column in &args.hide {
        columns.hide(column);
    }
    if columns.is_empty() {
        return Err(anyhow!("every column is hidden; nothing to display"));
    }

    let mut out = open_output(&args.output)?;
    let Some(table) = PaceQuery::new(args.distance.as_str(), time_text).run() else {
        warn!(distance = %args.distance, "no table computed for this input");
        writeln!(out, "{PLACEHOLDER}")?;
        out.flush()?;
        return Ok(());
    };
    info!(
        "Computed {} rows from {} in {:.2}s",
        table.rows.len(),
        table.reference_distance_id,
        table.reference_seconds
    );

    match args.format {
        FormatOpt::Text => write_table_text(&table, &columns, &mut out)?,
        FormatOpt::Csv => write_table_csv(&table, &columns, &mut out)?,
        FormatOpt::Json => write_json(&table, &mut out)?,
    }
    out.flush()?;
    if args.output.as_os_str() != "-" {
        info!("Wrote pace table: {}", args.output.display());
    }
    Ok(())
}

fn reference_time_text(args: &TableArgs) -> String {
    match &args.time {
        Some(text) => text.clone(),
        None => compose_time_text(
            args.hours.as_deref().unwrap_or(""),
            args.minutes.as_deref().unwrap_or(""),
            args.seconds.as_deref().unwrap_or(""),
        ),
    }
}

fn handle_distances(args: ListArgs) -> Result<()> {
    let entries: Vec<_> = DISTANCES
        .iter()
        .filter(|d| args.category.map_or(true, |c| d.category == c))
        .collect();
    let mut out = open_output(&args.output)?;
    match args.format {
        FormatOpt::Json => write_json(&entries, &mut out)?,
        format => {
            let header = ["id", "label", "meters", "category"];
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|d| {
                    vec![
                        d.id.to_string(),
                        d.label.to_string(),
                        format!("{:.3}", d.meters),
                        d.category.to_string(),
                    ]
                })
                .collect();
            write_rows(format, &header, &rows, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct RecordRow {
    distance_id: &'static str,
    category: Category,
    men_seconds: f64,
    women_seconds: f64,
    men: String,
    women: String,
}

fn record_rows(category: Option<Category>) -> Result<Vec<RecordRow>> {
    DISTANCES
        .iter()
        .filter(|d| category.map_or(true, |c| d.category == c))
        .map(|d| {
            let lookup = |sex: Sex| {
                WORLD_RECORDS
                    .seconds(sex, d.id)
                    .ok_or_else(|| anyhow!("no {sex} world record for {}", d.id))
            };
            let men_seconds = lookup(Sex::Men)?;
            let women_seconds = lookup(Sex::Women)?;
            Ok(RecordRow {
                distance_id: d.id,
                category: d.category,
                men_seconds,
                women_seconds,
                men: format_time(men_seconds, d.category),
                women: format_time(women_seconds, d.category),
            })
        })
        .collect()
}

fn handle_records(args: ListArgs) -> Result<()> {
    let records = record_rows(args.category)?;
    let mut out = open_output(&args.output)?;
    match args.format {
        FormatOpt::Json => write_json(&records, &mut out)?,
        format => {
            let header = ["distance", "category", "men", "women"];
            let rows: Vec<Vec<String>> = records
                .iter()
                .map(|r| {
                    vec![
                        r.distance_id.to_string(),
                        r.category.to_string(),
                        r.men.clone(),
                        r.women.clone(),
                    ]
                })
                .collect();
            write_rows(format, &header, &rows, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(io::stdout().lock()));
    }
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}

fn write_json<T: Serialize + ?Sized, W: Write>(value: &T, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_rows<W: Write>(
    format: FormatOpt,
    header: &[&str],
    rows: &[Vec<String>],
    out: &mut W,
) -> Result<()> {
    if format == FormatOpt::Csv {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        return Ok(());
    }
    write_aligned(header, rows, out)
}

/// Space-padded columns; trailing padding is trimmed.
fn write_aligned<W: Write>(header: &[&str], rows: &[Vec<String>], out: &mut W) -> Result<()> {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    writeln!(out, "{}", aligned_line(header.iter().copied(), &widths))?;
    for row in rows {
        writeln!(out, "{}", aligned_line(row.iter().map(String::as_str), &widths))?;
    }
    Ok(())
}

fn aligned_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let line = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    line.trim_end().to_string()
}

fn speed_cell(value: f64) -> String {
    if value > 0.0 {
        format!("{value:.2}")
    } else {
        "-".to_string()
    }
}

fn pace_cell(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn write_speed<W: Write>(speed: &SpeedResult, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "Miles per hour: {}  Kilometers per hour: {}",
        speed_cell(speed.miles_per_hour),
        speed_cell(speed.km_per_hour)
    )?;
    writeln!(
        out,
        "Pace per mile: {}  Pace per km: {}",
        pace_cell(&speed.pace_per_mile),
        pace_cell(&speed.pace_per_km)
    )?;
    Ok(())
}

fn table_cells(
    table: &PaceTable,
    columns: &VisibleColumns,
) -> (Vec<&'static str>, Vec<Vec<String>>) {
    let header: Vec<&'static str> = columns.iter().map(|c| c.header()).collect();
    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| columns.iter().map(|c| row.cell(c).to_string()).collect())
        .collect();
    (header, rows)
}

fn write_table_text<W: Write>(
    table: &PaceTable,
    columns: &VisibleColumns,
    out: &mut W,
) -> Result<()> {
    let reference_time = find_distance(&table.reference_distance_id)
        .map(|d| format_time(table.reference_seconds, d.category))
        .unwrap_or_default();
    writeln!(
        out,
        "Reference: {} in {}",
        table.reference_distance_id, reference_time
    )?;
    write_speed(&table.speed, out)?;
    writeln!(out)?;
    let (header, rows) = table_cells(table, columns);
    write_aligned(&header, &rows, out)
}

fn write_table_csv<W: Write>(
    table: &PaceTable,
    columns: &VisibleColumns,
    out: &mut W,
) -> Result<()> {
    let header: Vec<&str> = columns.iter().map(|c| c.key()).collect();
    let (_, rows) = table_cells(table, columns);
    write_rows(FormatOpt::Csv, &header, &rows, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn table_args(argv: &[&str]) -> TableArgs {
        let mut full = vec!["pace-table", "table"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Table(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn table_defaults() {
        let args = table_args(&["--time", "6:00"]);
        assert_eq!(args.distance, DEFAULT_DISTANCE_ID);
        assert_eq!(ColumnPreset::from(args.preset), ColumnPreset::Compact);
        assert_eq!(args.format, FormatOpt::Text);
        assert_eq!(args.output, PathBuf::from("-"));
    }

    #[test]
    fn time_fields_are_composed() {
        let args = table_args(&["-d", "26.2mi", "--hours", "3", "--minutes", "5"]);
        assert_eq!(reference_time_text(&args), "3:05:00");
        let args = table_args(&["--seconds", "58"]);
        assert_eq!(reference_time_text(&args), "58");
        let conflicting = ["pace-table", "table", "-t", "6:00", "--hours", "1"];
        assert!(Cli::try_parse_from(conflicting).is_err());
    }

    #[test]
    fn columns_parse_from_keys() {
        let args = table_args(&["-t", "6:00", "--show", "faster25", "--hide", "wr-men"]);
        assert_eq!(args.show, vec![Column::Faster25]);
        assert_eq!(args.hide, vec![Column::WorldRecordMen]);
        assert!(Cli::try_parse_from(["pace-table", "table", "--show", "pace"]).is_err());
    }

    #[test]
    fn aligned_output_pads_columns() {
        let rows = vec![
            vec!["5km".to_string(), "18:38".to_string()],
            vec!["100mi".to_string(), "10:00:00".to_string()],
        ];
        let text = render(|out| write_aligned(&["Distance", "Time"], &rows, out));
        assert_eq!(text, "Distance  Time\n5km       18:38\n100mi     10:00:00\n");
    }

    #[test]
    fn text_table_for_six_minute_mile() {
        let table = PaceQuery::new("1mi", "6:00").run().unwrap();
        let columns = ColumnPreset::Minimal.columns();
        let text = render(|out| write_table_text(&table, &columns, out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Reference: 1mi in 6:00");
        assert_eq!(lines[1], "Miles per hour: 10.00  Kilometers per hour: 16.09");
        assert_eq!(lines[2], "Pace per mile: 6:00  Pace per km: 3:43");
        assert_eq!(lines[4], "Type    Event   Time");
        assert!(lines.contains(&"Middle  5km     18:38"));
        assert_eq!(lines.len(), 5 + 20);
    }

    #[test]
    fn text_table_for_unreadable_time_keeps_records() {
        let table = PaceQuery::new("1mi", "5:xx").run().unwrap();
        let columns = ColumnPreset::Records.columns();
        let text = render(|out| write_table_text(&table, &columns, out));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Reference: 1mi in ");
        assert_eq!(lines[1], "Miles per hour: -  Kilometers per hour: -");
        assert_eq!(lines[4], "Type    Event   Time  Men's WR  Women's WR");
        assert!(lines.contains(&"Sprint  100m          9.58      10.49"));
    }

    #[test]
    fn csv_table_uses_column_keys() {
        let table = PaceQuery::new("1mi", "6:00").run().unwrap();
        let mut columns = VisibleColumns::none();
        columns.show(Column::Distance);
        columns.show(Column::Time);
        let text = render(|out| write_table_csv(&table, &columns, out));
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("distance,time"));
        assert!(text.contains("\n5km,18:38\n"));
    }

    #[test]
    fn empty_speed_renders_dashes() {
        let text = render(|out| write_speed(&SpeedResult::default(), out));
        assert_eq!(
            text,
            "Miles per hour: -  Kilometers per hour: -\nPace per mile: -  Pace per km: -\n"
        );
    }

    #[test]
    fn records_cover_catalog_and_filter_by_category() {
        assert_eq!(record_rows(None).unwrap().len(), DISTANCES.len());
        let sprint = record_rows(Some(Category::Sprint)).unwrap();
        assert_eq!(sprint.len(), 4);
        assert_eq!(sprint[1].men, "9.58");
        let long = record_rows(Some(Category::Long)).unwrap();
        let marathon = long.iter().find(|r| r.distance_id == "26.2mi").unwrap();
        assert_eq!(marathon.women, "2:15:00");
    }
}
