use anyhow::{Context, Result, bail};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::{env, fs, io, process};
use xss_encode_config::Config;
use xss_encode_engine::{Codec, Document, Span};

const USAGE: &str = "Usage: xss-encode [--list] [--in-place] [--span START..END]... [CODEC] [FILE]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    list: bool,
    in_place: bool,
    spans: Vec<Span>,
    positional: Vec<String>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--list" | "-l" => parsed.list = true,
            "--in-place" | "-i" => parsed.in_place = true,
            "--span" | "-s" => {
                let value = args.next().context("--span needs a START..END value")?;
                parsed.spans.push(parse_span(&value)?);
            }
            flag if flag.starts_with("--") => bail!("Unknown option '{flag}'"),
            _ => parsed.positional.push(arg),
        }
    }

    if parsed.positional.len() > 2 {
        bail!("Too many arguments");
    }
    Ok(parsed)
}

fn parse_span(value: &str) -> Result<Span> {
    let (start, end) = value
        .split_once("..")
        .with_context(|| format!("Span '{value}' is not of the form START..END"))?;
    let start = start
        .trim()
        .parse()
        .with_context(|| format!("Invalid span start in '{value}'"))?;
    let end = end
        .trim()
        .parse()
        .with_context(|| format!("Invalid span end in '{value}'"))?;
    Ok(Span { start, end })
}

/// Splits the positionals into a codec and an optional input file.
///
/// A leading codec name wins; otherwise the configured default codec is
/// used and the single positional is the file.
fn pick_codec(positional: &[String], config: &Config) -> Result<(Codec, Option<PathBuf>)> {
    if let Some(first) = positional.first()
        && let Ok(codec) = first.parse::<Codec>()
    {
        return Ok((codec, positional.get(1).map(PathBuf::from)));
    }

    match (config.default_codec(), positional) {
        (Some(codec), []) => Ok((codec, None)),
        (Some(codec), [file]) => Ok((codec, Some(PathBuf::from(file)))),
        (_, [name, ..]) => bail!("Unknown codec '{name}' (see --list)"),
        (None, []) => bail!("No codec given and no default_codec configured"),
    }
}

fn print_codecs() {
    for codec in Codec::ALL {
        println!("{:<24}{}", codec.name(), codec.label());
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Runs one conversion. Returns false if any span failed to convert.
fn run(args: Args, config: &Config) -> Result<bool> {
    let (codec, file) = pick_codec(&args.positional, config)?;
    if args.in_place && file.is_none() {
        bail!("--in-place needs a FILE");
    }

    let input = read_input(file.as_ref())?;
    let mut document = Document::new(&input);
    let patch = document
        .apply(codec, &args.spans, &config.codec_options())
        .context("Invalid selection")?;

    if !patch.is_clean() {
        for failure in &patch.failures {
            eprintln!(
                "Error: {failure} (bytes {}..{})",
                failure.span.start, failure.span.end
            );
        }
        return Ok(false);
    }
    log::info!("{codec} replaced {} span(s)", patch.changed.len());

    match file {
        Some(path) if args.in_place => fs::write(&path, document.text())
            .with_context(|| format!("Failed to write '{}'", path.display()))?,
        _ => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.text().as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(true)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if args.list {
        print_codecs();
        return Ok(());
    }

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Config path: {}", Config::config_path().display());
            process::exit(1);
        }
    };

    if !run(args, &config)? {
        process::exit(1);
    }
    Ok(())
}
