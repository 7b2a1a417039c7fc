use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, IsTerminal, Write};
use std::process::ExitCode;
use std::time::Instant;

use clap::{Arg, ArgAction, Command};
use tracing_subscriber::EnvFilter;

use vi_numwords::utils::format_thousand;
use vi_numwords::{Conversion, ConvertError, ConverterConfig, VietnameseConverter};

const FORMAT_LIST: [&str; 2] = ["text", "json"];

/// One input line: its 1-based position and raw text.
struct Entry {
    line: usize,
    raw: String,
}

fn read_entries(input: &mut dyn BufRead) -> Result<Vec<Entry>, io::Error> {
    let mut entries = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let line = line.trim_start_matches('\u{feff}').trim();
        if line.is_empty() {
            continue;
        }
        entries.push(Entry {
            line: index + 1,
            raw: line.to_string(),
        });
    }
    Ok(entries)
}

const SEPARATORS: [char; 4] = [',', '_', '.', ' '];

/// Parses a number, accepting one kind of thousands separator
/// (`1,001`, `1_001`, `1.000.000`, `1 001`).
///
/// A separator must split the digits into a leading group of 1-3 digits
/// followed by groups of exactly 3, so `1.5` or `12.34.5` are rejected.
fn parse_number(raw: &str) -> Result<i64, String> {
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };

    let mut used = SEPARATORS.iter().filter(|sep| digits.contains(**sep));
    let cleaned = match (used.next(), used.next()) {
        (None, _) => raw.to_string(),
        (Some(_), Some(_)) => return Err("not an integer (mixed digit separators)".to_string()),
        (Some(&sep), None) => {
            let mut groups = digits.split(sep);
            let well_formed = groups
                .next()
                .is_some_and(|lead| (1..=3).contains(&lead.len()))
                && groups.all(|group| group.len() == 3);
            if !well_formed {
                return Err(format!("not an integer (misplaced separator '{}')", sep));
            }
            format!("{}{}", sign, digits.replace(sep, ""))
        }
    };

    cleaned
        .parse::<i64>()
        .map_err(|err| format!("not an integer ({})", err))
}

fn init_logging(level: Option<&String>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_conversion(
    output: &mut dyn Write,
    conversion: &Conversion,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "json" => writeln!(output, "{}", serde_json::to_string(conversion)?)?,
        _ => writeln!(output, "{}", conversion.vietnamese)?,
    }
    Ok(())
}

fn report_failure(entry: &Entry, reason: &str) {
    eprintln!("Line {} ({}): {}", entry.line, entry.raw, reason);
}

const BLUE: &str = "\x1B[1;34m";
const RESET: &str = "\x1B[0m";

fn cli() -> Command {
    Command::new("Vietnamese Number Words")
        .arg(
            Arg::new("numbers")
                .value_name("NUMBER")
                .num_args(0..)
                .allow_negative_numbers(true)
                .help("Numbers to convert. Reads <file> or stdin when omitted."),
        )
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("file")
                .conflicts_with("numbers")
                .help("Read numbers from <file>, one per line."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("file")
                .help("Write converted text to <file>."),
        )
        .arg(
            Arg::new("currency")
                .short('c')
                .long("currency")
                .value_name("word")
                .help("Currency suffix (default: from config, \"đồng\")."),
        )
        .arg(
            Arg::new("no_currency")
                .long("no-currency")
                .action(ArgAction::SetTrue)
                .conflicts_with("currency")
                .help("Do not append a currency suffix."),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("file")
                .help("Converter configuration (JSON)."),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("format")
                .default_value("text")
                .help("Output format: [text|json]"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .action(ArgAction::SetTrue)
                .help("Convert all numbers in parallel (json timings become batch averages)."),
        )
        .arg(
            Arg::new("stats")
                .long("stats")
                .action(ArgAction::SetTrue)
                .help("Print conversion metrics to stderr when done."),
        )
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .value_name("filter")
                .help("Log filter, e.g. debug or vi_numwords=trace (overrides RUST_LOG)."),
        )
        .about(format!(
            "{BLUE}Vietnamese Number Words: spell integers in Vietnamese{RESET}"
        ))
}

/// `--stats` needs the counters, so it overrides `"metrics": false`.
fn apply_stats_flag(mut config: ConverterConfig, stats: bool) -> ConverterConfig {
    if stats && !config.metrics {
        tracing::warn!("metrics disabled in config; enabling them for --stats");
        config.metrics = true;
    }
    config
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    init_logging(matches.get_one::<String>("log_level"));

    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    if !FORMAT_LIST.contains(&format) {
        eprintln!("Invalid format: {}", format);
        eprintln!("Valid formats: {:?}", FORMAT_LIST);
        return Ok(ExitCode::FAILURE);
    }

    let config = match matches.get_one::<String>("config") {
        Some(path) => ConverterConfig::from_path(path)?,
        None => ConverterConfig::default(),
    };
    let config = apply_stats_flag(config, matches.get_flag("stats"));
    tracing::debug!(?config, "configuration loaded");

    let converter = VietnameseConverter::with_config(config);
    let currency = if matches.get_flag("no_currency") {
        String::new()
    } else {
        matches
            .get_one::<String>("currency")
            .cloned()
            .unwrap_or_else(|| converter.default_currency().to_string())
    };

    // Determine input source
    let entries: Vec<Entry> = match matches.get_many::<String>("numbers") {
        Some(values) => values
            .enumerate()
            .map(|(index, raw)| Entry {
                line: index + 1,
                raw: raw.clone(),
            })
            .collect(),
        None => {
            let mut input: Box<dyn BufRead> = match matches.get_one::<String>("input") {
                Some(file_name) => Box::new(BufReader::new(File::open(file_name)?)),
                None => {
                    if io::stdin().is_terminal() {
                        println!("{BLUE}Input numbers, one per line, <ctrl-z> or <ctrl-d> to submit:{RESET}");
                    }
                    Box::new(BufReader::new(io::stdin()))
                }
            };
            read_entries(&mut *input)?
        }
    };

    let mut output = BufWriter::new(match matches.get_one::<String>("output") {
        Some(file_name) => Box::new(File::create(file_name)?) as Box<dyn Write>,
        None => Box::new(io::stdout()) as Box<dyn Write>,
    });

    let mut failures = 0usize;
    let mut parsed = Vec::with_capacity(entries.len());
    for entry in &entries {
        match parse_number(&entry.raw) {
            Ok(number) => parsed.push((entry, number)),
            Err(reason) => {
                report_failure(entry, &reason);
                failures += 1;
            }
        }
    }

    if matches.get_flag("parallel") {
        let numbers: Vec<i64> = parsed.iter().map(|(_, number)| *number).collect();
        let started = Instant::now();
        let results = converter.convert_many(&numbers, &currency);
        let average_ms =
            started.elapsed().as_secs_f64() * 1000.0 / numbers.len().max(1) as f64;

        for ((entry, number), result) in parsed.iter().zip(results) {
            match result {
                Ok(vietnamese) => {
                    let conversion = Conversion {
                        number: *number,
                        vietnamese,
                        processing_time_ms: average_ms,
                    };
                    write_conversion(&mut output, &conversion, format)?;
                }
                Err(err) => {
                    report_failure(entry, &err.to_string());
                    failures += 1;
                }
            }
        }
    } else {
        for (entry, number) in &parsed {
            let result: Result<Conversion, ConvertError> =
                converter.convert_record(*number, &currency);
            match result {
                Ok(conversion) => write_conversion(&mut output, &conversion, format)?,
                Err(err) => {
                    report_failure(entry, &err.to_string());
                    failures += 1;
                }
            }
        }
    }
    output.flush()?;

    if matches.get_flag("stats") {
        let snapshot = converter.metrics();
        eprintln!(
            "{BLUE}Converted {} numbers ({} failed): avg {} ns, peak {} ns{RESET}",
            format_thousand(snapshot.calls),
            format_thousand(failures as u64),
            format_thousand(snapshot.average_latency_ns),
            format_thousand(snapshot.peak_latency_ns),
        );
        eprintln!("{}", serde_json::to_string(&snapshot)?);
    }

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
