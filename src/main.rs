use std::{collections::HashMap, fs, io, process};

use clap::Parser;
use smartscript::{
    interpreter::{evaluator::core::Engine, parser::core::parse_document},
    sink::{MemorySink, Parameters, RequestContext, Scope, Sink},
};
use tracing_subscriber::EnvFilter;

/// smartscript renders templates made of text, `{$= ... $}` echo tags and
/// `{$FOR ... $}` loops.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells smartscript to look at a file instead of a template.
    #[arg(short, long)]
    file: bool,

    /// Prints the parsed template in canonical form instead of rendering it.
    #[arg(short, long)]
    tree: bool,

    /// Writes an HTTP-style header block before the output.
    #[arg(long)]
    headers: bool,

    /// A request parameter, as NAME=VALUE. May be repeated.
    #[arg(short, long = "param", value_name = "NAME=VALUE", value_parser = parse_pair)]
    params: Vec<(String, String)>,

    /// A persistent parameter, as NAME=VALUE. May be repeated.
    #[arg(long = "persistent", value_name = "NAME=VALUE", value_parser = parse_pair)]
    persistent: Vec<(String, String)>,

    /// The MIME type announced in the header. Only used with `--headers`.
    #[arg(long)]
    mime: Option<String>,

    /// The output encoding, UTF-8 or ISO-8859-1. Only used with `--headers`.
    #[arg(long)]
    encoding: Option<String>,

    contents: String,
}

fn parse_pair(pair: &str) -> Result<(String, String), String> {
    pair.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, found '{pair}'"))
}

fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr)
                             .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                                                  EnvFilter::new("warn")
                                              }))
                             .init();

    let args = Args::parse();

    let template = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            process::exit(1);
        })
    } else {
        args.contents.clone()
    };

    if let Err(e) = run(&args, &template) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args, template: &str) -> Result<(), Box<dyn std::error::Error>> {
    let document = parse_document(template)?;
    if args.tree {
        println!("{document}");
        return Ok(());
    }

    let request: HashMap<_, _> = args.params.iter().cloned().collect();
    let persistent: HashMap<_, _> = args.persistent.iter().cloned().collect();
    let parameters = Parameters::new(request, persistent);

    if args.headers {
        let mut context = RequestContext::new(io::stdout().lock(), parameters);
        if let Some(encoding) = &args.encoding {
            context.set_encoding(encoding)?;
        }
        if let Some(mime) = &args.mime {
            context.set_mime_type(mime)?;
        }
        Engine::new(&document, &mut context).execute()?;
        if !context.header_generated() {
            context.write_str("")?;
        }
        log_persistent(context.parameters());
    } else {
        let mut sink = MemorySink::new(parameters);
        Engine::new(&document, &mut sink).execute()?;
        print!("{}", sink.output());
        log_persistent(sink.parameters());
    }
    Ok(())
}

/// Reports the persistent parameters left after a render.
fn log_persistent(parameters: &Parameters) {
    for name in parameters.names(Scope::Persistent) {
        let value = parameters.get(Scope::Persistent, name).unwrap_or_default();
        tracing::debug!(scope = Scope::Persistent.name(), name, value, "parameter after render");
    }
}
