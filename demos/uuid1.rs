//! Simple command that prints one or '-n count' UUIDv1 strings for a given node tag

use std::{env, io, io::Write, process::ExitCode};

use uuid1::V1Generator;

fn main() -> io::Result<ExitCode> {
    let mut args = env::args();
    let program = args.next();
    let (node, count) = match parse_args(args) {
        Ok((node, count)) => (node.unwrap_or_else(|| "uuid1".to_owned()), count.unwrap_or(1)),
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!(
                "Usage: {} [-t tag] [-n count]",
                program.as_deref().unwrap_or("uuid1")
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    let g = match V1Generator::new(&node) {
        Ok(g) => g,
        Err(err) => {
            eprintln!("Error: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..count {
        writeln!(buf, "{}", g.generate())?;
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(
    mut args: impl Iterator<Item = String>,
) -> Result<(Option<String>, Option<usize>), String> {
    let mut node = None;
    let mut count = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-n" => {
                if count.is_some() {
                    return Err("option 'n' given more than once".to_owned());
                }
                let Some(n_arg) = args.next() else {
                    return Err("argument to option 'n' missing".to_owned());
                };
                let Ok(c) = n_arg.parse() else {
                    return Err(format!("invalid argument to option 'n': '{}'", n_arg));
                };
                count.replace(c);
            }
            "-t" => {
                if node.is_some() {
                    return Err("option 't' given more than once".to_owned());
                }
                let Some(t_arg) = args.next() else {
                    return Err("argument to option 't' missing".to_owned());
                };
                node.replace(t_arg);
            }
            other => return Err(format!("unrecognized argument '{}'", other)),
        }
    }
    Ok((node, count))
}
