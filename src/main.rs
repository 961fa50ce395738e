use marcc::compile;
use std::env;
use std::fs;
use std::process;

fn main() {
  let args: Vec<String> = env::args().collect();
  if args.len() != 2 {
    let program = args.first().map(String::as_str).unwrap_or("marcc");
    eprintln!("usage: {program} <source-file>");
    process::exit(1);
  }

  let path = &args[1];
  let source = match fs::read_to_string(path) {
    Ok(source) => source,
    Err(err) => {
      eprintln!("cannot read '{path}': {err}");
      process::exit(1);
    }
  };

  match compile(&source, path) {
    Ok(asm) => print!("{asm}"),
    Err(err) => {
      eprintln!("{err}");
      process::exit(1);
    }
  }
}
