use std::fs::File;
use std::io::{self, Write};
use std::process;
use std::time::Instant;
use clap::{App, Arg, ArgMatches};
use log::debug;
use blocklife::*;

fn is_generation(s: String) -> std::result::Result<(), String> {
  s.parse::<usize>()
    .map(|_| ())
    .map_err(|_| format!("please input a non-negative generation number instead of {:?}", s))
}

fn main() {
  let matches = App::new(env!("CARGO_PKG_NAME"))
    .version(env!("CARGO_PKG_VERSION"))
    .about(env!("CARGO_PKG_DESCRIPTION"))
    .arg(Arg::with_name("INPUT")
         .help("RLE file of the starting generation")
         .required(true)
         .index(1))
    .arg(Arg::with_name("OUTPUT")
         .help("Output file, `-` for stdout")
         .short("o")
         .long("output")
         .takes_value(true))
    .arg(Arg::with_name("COMPARE")
         .help("Compare the result to this RLE file")
         .short("c")
         .long("compare-rle")
         .takes_value(true))
    .arg(Arg::with_name("GENERATION")
         .help("Select end generation")
         .short("g")
         .long("generation")
         .takes_value(true)
         .default_value("0")
         .validator(is_generation))
    .arg(Arg::with_name("LIFE")
         .help("Select Life rule")
         .short("l")
         .long("force-life")
         .overrides_with("HIGHLIFE"))
    .arg(Arg::with_name("HIGHLIFE")
         .help("Select HighLife rule")
         .short("L")
         .long("force-highlife")
         .overrides_with("LIFE"))
    .arg(Arg::with_name("ASCII")
         .help("Output grid as ASCII")
         .short("a")
         .long("ascii-output"))
    .arg(Arg::with_name("VERBOSE")
         .help("Print evolution progress")
         .short("v")
         .long("verbose"))
    .arg(Arg::with_name("BRUTE")
         .help("Scan the whole bounding box instead of the allocated blocks")
         .short("b")
         .long("brute-force"))
    .get_matches();

  let verbose = matches.is_present("VERBOSE");
  let level = if verbose { "info" } else { "warn" };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

  match run(&matches, verbose) {
    Ok(true) => {}
    Ok(false) => process::exit(1),
    Err(err) => {
      eprintln!("{}", err);
      process::exit(1);
    }
  }
}

/// Returns whether the final board matches the comparison file, if any.
fn run(matches: &ArgMatches, verbose: bool) -> Result<bool> {
  // both are required or validated by clap
  let input = matches.value_of("INPUT").unwrap_or_default();
  let generations = matches.value_of("GENERATION")
    .and_then(|g| g.parse().ok())
    .unwrap_or(0);

  let mut game = rle::read_file(input)?;
  let expected = match matches.value_of("COMPARE") {
    Some(path) => Some(rle::read_file(path)?),
    None => None,
  };

  let mut output: Option<Box<dyn Write>> = match matches.value_of("OUTPUT") {
    Some("-") => Some(Box::new(io::stdout())),
    Some(path) => Some(Box::new(File::create(path)?)),
    None if matches.is_present("ASCII") => Some(Box::new(io::stdout())),
    None => None,
  };

  if matches.is_present("LIFE") {
    game.board_mut().set_rule(Rule::Life);
  }
  if matches.is_present("HIGHLIFE") {
    game.board_mut().set_rule(Rule::HighLife);
  }
  debug!("rule {}, {} generations", game.board().rule(), generations);

  let start = Instant::now();
  evolve(game.board_mut(), generations, verbose, !matches.is_present("BRUTE"));
  println!("Kernel time {:.4}s", start.elapsed().as_secs_f64());

  if let Some(output) = &mut output {
    let text = if matches.is_present("ASCII") {
      export::write_ascii(&game)
    } else {
      rle::write(&game)
    };
    output.write_all(text.as_bytes())?;
    output.flush()?;
  }

  Ok(expected.map_or(true, |expected| game.board().equal(expected.board())))
}
