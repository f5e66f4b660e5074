extern crate clap;
extern crate derham;
extern crate num;
extern crate num_cpus;
extern crate tracing_subscriber;

use clap::{App, Arg, ArgMatches};
use derham::{render_gallery, render_with, ColorTheme, CurveEngine, Preset, Progress, RenderOptions};
use num::Complex;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn parse_four(s: &str) -> Option<[f64; 4]> {
    let values: Vec<f64> = s.split(',').filter_map(|v| f64::from_str(v.trim()).ok()).collect();
    if values.len() == 4 && s.split(',').count() == 4 {
        Some([values[0], values[1], values[2], values[3]])
    } else {
        None
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_parse<T: FromStr>(s: &str) -> Result<(), String>
where
    T::Err: ToString,
{
    T::from_str(s).map(|_| ()).map_err(|e| e.to_string())
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const PRESET: &str = "preset";
const PARAMS: &str = "params";
const HALFWAY: &str = "halfway";
const BATCH: &str = "batch";
const CUTOFF: &str = "cutoff";
const THEME: &str = "theme";
const SEED: &str = "seed";
const MAX_BATCHES: &str = "max-batches";
const PROGRESS: &str = "progress";
const GALLERY: &str = "gallery";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("derham")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("de Rham curve renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; the extension picks the format (a directory with --gallery)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(PRESET)
                .long(PRESET)
                .short("p")
                .takes_value(true)
                .conflicts_with_all(&[PARAMS, GALLERY])
                .validator(|s| validate_parse::<Preset>(&s))
                .help("A named curve, e.g. levy-c, blancmange, koch, peano, gallery-23"),
        )
        .arg(
            Arg::with_name(PARAMS)
                .long(PARAMS)
                .short("P")
                .takes_value(true)
                .allow_hyphen_values(true)
                .conflicts_with(GALLERY)
                .validator(|s| match parse_four(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse delta,epsilon,zeta,eta".to_string()),
                })
                .help("Shape parameters delta,epsilon,zeta,eta, each between -1 and 1"),
        )
        .arg(
            Arg::with_name(HALFWAY)
                .long(HALFWAY)
                .short("a")
                .takes_value(true)
                .allow_hyphen_values(true)
                .requires(PARAMS)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse half-way point"))
                .help("Half-way point alpha,beta used with --params (default 0.5,1)"),
        )
        .arg(
            Arg::with_name(BATCH)
                .long(BATCH)
                .short("b")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        10_000_000,
                        "Could not parse batch size",
                        "Batch size must be between 1 and 10000000",
                    )
                })
                .help("Points drawn between completeness checks"),
        )
        .arg(
            Arg::with_name(CUTOFF)
                .long(CUTOFF)
                .short("c")
                .takes_value(true)
                .default_value("0.99")
                .validator(|s| {
                    validate_range(
                        &s,
                        0.0,
                        1.0,
                        "Could not parse completeness cutoff",
                        "Completeness cutoff must be between 0 and 1",
                    )
                })
                .help("Share of a batch landing on lit pixels at which to stop"),
        )
        .arg(
            Arg::with_name(THEME)
                .long(THEME)
                .short("t")
                .takes_value(true)
                .possible_values(&["dark", "light"])
                .default_value("dark")
                .help("Light curve on dark, or dark curve on light"),
        )
        .arg(
            Arg::with_name(SEED)
                .long(SEED)
                .takes_value(true)
                .validator(|s| validate_parse::<u64>(&s))
                .help("Random seed; omit for a different curve every run"),
        )
        .arg(
            Arg::with_name(MAX_BATCHES)
                .long(MAX_BATCHES)
                .takes_value(true)
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        usize::max_value(),
                        "Could not parse batch limit",
                        "Batch limit must be at least 1",
                    )
                })
                .help("Give up after this many batches"),
        )
        .arg(
            Arg::with_name(PROGRESS)
                .long(PROGRESS)
                .conflicts_with(GALLERY)
                .help("Print progress to standard error"),
        )
        .arg(
            Arg::with_name(GALLERY)
                .long(GALLERY)
                .help("Render every named curve into the output directory"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of curves rendered at once with --gallery"),
        )
        .get_matches()
}

// Every value read here has passed its validator or has a default.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Option<T> {
    matches.value_of(name).and_then(|s| T::from_str(s).ok())
}

fn options(matches: &ArgMatches) -> RenderOptions {
    let defaults = RenderOptions::default();
    RenderOptions {
        batch_size: value(matches, BATCH).unwrap_or(defaults.batch_size),
        completeness_cutoff: value(matches, CUTOFF).unwrap_or(defaults.completeness_cutoff),
        theme: value::<ColorTheme>(matches, THEME).unwrap_or(defaults.theme),
        max_batches: value(matches, MAX_BATCHES),
        cancel: None,
    }
}

fn engine(matches: &ArgMatches, seed: Option<u64>) -> derham::Result<CurveEngine> {
    if let Some(preset) = value::<Preset>(matches, PRESET) {
        return preset.engine(seed);
    }
    let halfway = matches
        .value_of(HALFWAY)
        .and_then(parse_complex)
        .unwrap_or_else(|| Complex::new(0.5, 1.0));
    match matches.value_of(PARAMS).and_then(parse_four) {
        Some(p) => CurveEngine::new(halfway, p[0], p[1], p[2], p[3], seed),
        None => Preset::Blancmange.engine(seed),
    }
}

fn report(progress: Progress) {
    let stderr = std::io::stderr();
    let mut stderr = stderr.lock();
    let _ = match progress {
        Progress::Started => write!(stderr, "..."),
        Progress::Reached(percent) => write!(stderr, "{}%...", percent),
        Progress::Done => writeln!(stderr, "done"),
    };
    let _ = stderr.flush();
}

fn run(matches: &ArgMatches) -> derham::Result<()> {
    let (width, height) = matches
        .value_of(SIZE)
        .and_then(|s| parse_pair::<u16>(s, 'x'))
        .unwrap_or((800, 600));
    let (width, height) = (width as usize, height as usize);
    let output = Path::new(matches.value_of(OUTPUT).unwrap_or("."));
    let seed = value::<u64>(matches, SEED);
    let options = options(matches);
    let threads = value(matches, THREADS).unwrap_or(1);

    if matches.is_present(GALLERY) {
        std::fs::create_dir_all(output).map_err(|e| derham::Error::Io(e.to_string()))?;
        let jobs = Preset::all()
            .into_iter()
            .map(|p| p.engine(seed).map(|engine| (p.name(), engine)))
            .collect::<derham::Result<Vec<_>>>()?;
        let mut failed = None;
        for (name, result) in render_gallery(jobs, width, height, &options, threads)? {
            match result.and_then(|canvas| canvas.save(output.join(format!("{}.png", name)))) {
                Ok(()) => eprintln!("{}: ok", name),
                Err(e) => {
                    eprintln!("{}: {}", name, e);
                    failed = Some(e);
                }
            }
        }
        return match failed {
            Some(e) => Err(e),
            None => Ok(()),
        };
    }

    let mut engine = engine(matches, seed)?;
    let canvas = if matches.is_present(PROGRESS) {
        render_with(&mut engine, width, height, &options, report)?
    } else {
        render_with(&mut engine, width, height, &options, |_| {})?
    };
    canvas.save(output)
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
