use std::error::Error;

use clap::{ArgAction, Parser};
use env_logger::TimestampPrecision;
use log::{info, LevelFilter};

use pocketcube::prelude::*;

const ABOUT: &str = "\
Colors: yellow (Y), green (G), blue (B), red (R), orange (O), white (W)

Look at the cube from the front and enter the colors of each face row by row
(top-left, top-right, bottom-left, bottom-right):

  1) enter the front face
  2) bring the right face to the front, enter it
  3) bring the right face to the front, enter it
  4) bring the right face to the front, enter it
  5) bring the right face to the front, you are looking at the face of 1) again
  6) bring the top face to the front, enter it
  7) bring the bottom face to the front twice, enter it

Only the first letter of each color counts, so 'w', 'W' and 'white' are the same.";

/// 2x2x2 cube solver written in Rust
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = ABOUT)]
struct Args {
	/// The 24 colors of the cube (front, right, back, left, top, bottom).
	/// If omitted, the solved cube is used
	#[arg(num_args = 0..)]
	colors: Vec<String>,

	/// Give up on paths longer than this
	#[arg(short = 'd', long)]
	max_depth: Option<usize>,

	/// Apply a sequence of moves before solving
	#[arg(short, long, default_value_t = String::new())]
	sequence: String,

	/// Scramble the cube with the given number of random moves before solving
	#[arg(short, long)]
	random: Option<usize>,

	/// Print the cube before solving it
	#[arg(short = 'p', long, default_value_t = false)]
	print: bool,

	/// Print the cube as a string rather than colored
	#[arg(short, long, default_value_t = false)]
	char_print: bool,

	/// Output length of the solution
	#[arg(short, long, default_value_t = false)]
	length: bool,

	/// Print the solution as JSON
	#[arg(long, default_value_t = false)]
	json: bool,

	/// Print all moves and quit
	#[arg(long, default_value_t = false)]
	list_moves: bool,

	/// Print the output to a file rather to the stdout
	#[arg(short, long, default_value_t = String::new())]
	output: String,

	/// Increase the log level (-v info, -vv progress of the search, -vvv everything)
	#[arg(short, long, action = ArgAction::Count)]
	verbose: u8,
}

/// Build the cube to solve out of the arguments
fn start_state(args: &Args) -> Result<CubeState, Box<dyn Error>> {
	let mut cube = if args.colors.is_empty() {
		CubeState::new()
	} else {
		CubeState::from_tokens(&args.colors)?
	};

	// Generate a random input cube
	if let Some(n) = args.random {
		let scramble = random_sequence(n);
		info!("Scramble: {}", format_moves(&scramble));
		cube = cube.apply_moves(&scramble);
	}

	let seq = parse_moves(&args.sequence)?;
	Ok(cube.apply_moves(&seq))
}

/// Print the cube either as a string or with colors
fn print_cube(args: &Args, cube: &CubeState, out: &mut dyn std::io::Write) -> std::io::Result<()> {
	if args.char_print {
		writeln!(out, "{}", cube)
	} else {
		cube.write_net(out)
	}
}

fn main() -> Result<(), Box<dyn Error>> {
	let args = Args::parse();

	env_logger::Builder::new()
		.filter_level(match args.verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		})
		.format_timestamp(Some(TimestampPrecision::Millis))
		.init();

	// Whether to redirect it to the stdout or a file
	let mut out: Box<dyn std::io::Write> = if args.output.is_empty() {
		Box::new(std::io::stdout())
	} else {
		Box::new(std::fs::File::create(&args.output)?)
	};

	// List the moves and exit
	if args.list_moves {
		for m in ALL_MOVES {
			writeln!(out, "{}", m)?;
		}
		return Ok(());
	}

	let cube = start_state(&args)?;

	if args.print {
		print_cube(&args, &cube, out.as_mut())?;
	}

	let solver = Solver::new(SearchConfig {
		max_depth: args.max_depth,
		..Default::default()
	});
	let solution = solver.solve(cube)?;

	if args.json {
		writeln!(out, "{}", serde_json::to_string_pretty(&solution)?)?;
		return Ok(());
	}

	write!(out, "Actions: {}", format_moves(&solution.moves))?;
	if args.length {
		writeln!(out, " (len={})", solution.moves.len())?;
	} else {
		writeln!(out)?;
	}
	writeln!(out, "Result: {}", solution.state)?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn args(line: &str) -> Args {
		Args::parse_from(std::iter::once("pocketcube-solver").chain(line.split_whitespace()))
	}

	#[test]
	fn colors_from_arguments() -> Result<(), Box<dyn Error>> {
		let a = args("w b g y  o y r w  o g r g  o b r w  y b r w  o b y g -d 200");
		assert_eq!(a.max_depth, Some(200));
		let cube = start_state(&a)?;
		assert_eq!(cube.to_string(), "WBGYOYRWOGRGOBRWYBRWOBYG");
		Ok(())
	}

	#[test]
	/// Without colors the sequence is applied on the solved cube
	fn sequence_on_solved() -> Result<(), Box<dyn Error>> {
		let cube = start_state(&args("-s twist_to_left"))?;
		assert_eq!(cube, CubeState::new().apply_move(Move::TwistToLeft));
		Ok(())
	}

	#[test]
	/// Both ways of printing end up in the given output
	fn print_to_output() -> Result<(), Box<dyn Error>> {
		let cube = CubeState::new();

		let mut buf: Vec<u8> = Vec::new();
		print_cube(&args("-p -c"), &cube, &mut buf)?;
		assert_eq!(String::from_utf8(buf)?, "BBBBRRRRGGGGOOOOYYYYWWWW\n");

		let mut buf: Vec<u8> = Vec::new();
		print_cube(&args("-p"), &cube, &mut buf)?;
		let net = String::from_utf8(buf)?;
		assert_eq!(net.matches('▄').count(), 16);
		Ok(())
	}

	#[test]
	fn invalid_arguments() {
		// A seventh color
		assert!(start_state(&args("w b g y  o y r w  o g r g  o b r w  y b r w  o b y p")).is_err());
		// Five times white
		assert!(start_state(&args("w b g y  o y r w  o g r g  o b r w  y b r w  o b y w")).is_err());
		assert!(start_state(&args("w b g")).is_err());
		assert!(start_state(&args("-s spin")).is_err());
	}
}
