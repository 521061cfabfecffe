use clap::Parser;
use std::fs::File;
use std::io;
use std::io::{BufWriter, Read, Write};
use std::process::ExitCode;

use base32z::{from_base32z, is_base32z, to_base32z};

#[derive(Parser, Debug)]
struct Args {
    #[arg()]
    input: Option<String>,

    #[arg(short, long)]
    decode: bool,

    #[arg(short, long)]
    encode: bool,
}

fn read_input(path: &Option<String>) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    match path {
        Some(path) => File::open(path)?.read_to_end(&mut data)?,
        None => io::stdin().read_to_end(&mut data)?,
    };
    Ok(data)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let data = match read_input(&args.input) {
        Ok(data) => data,
        Err(err) => {
            let name = args.input.as_deref().unwrap_or("stdin");
            eprintln!("base32z: {}: {}", name, err);
            return ExitCode::FAILURE;
        }
    };

    let mut writer = BufWriter::new(io::stdout());

    let result = if args.decode {
        // Whitespace is noise from line-wrapped input, not data.
        let mut symbols = data;
        symbols.retain(|c| !c.is_ascii_whitespace());
        if !is_base32z(&symbols) {
            eprintln!("base32z: input is not valid base32z");
            return ExitCode::FAILURE;
        }
        writer.write_all(&from_base32z(&symbols))
    } else {
        writer
            .write_all(to_base32z(&data).as_bytes())
            .and_then(|_| writer.write_all(b"\n"))
    };

    if let Err(err) = result.and_then(|_| writer.flush()) {
        eprintln!("base32z: write error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
