use folio::{ComparisonReport, FolioError, ReportGenerator, SubjectReport, suggested_file_name};
use folio_style::PageSize;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

enum Kind {
    Single,
    Comparison,
}

struct Args {
    kind: Kind,
    input: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    page_size: Option<String>,
    logo: Option<PathBuf>,
}

fn usage(program: &str) -> ! {
    eprintln!("Renders a compatibility report from JSON data to PDF.");
    eprintln!();
    eprintln!(
        "Usage: {} <single|comparison> <path/to/report.json> [path/to/output.pdf] [options]",
        program
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <config.json>   cosmetic settings (page size, margins, fonts, palette)");
    eprintln!("  --page-size <size>       A4, Letter, Legal or WIDTHxHEIGHT, overrides the config");
    eprintln!("  --logo <image>           PNG or JPEG drawn on the cover");
    std::process::exit(1);
}

/// The value following an option, or the usage text when it is missing.
fn value(raw: &mut env::Args, program: &str) -> String {
    raw.next().unwrap_or_else(|| usage(program))
}

fn parse_args() -> Args {
    let mut raw = env::args();
    let program = raw.next().unwrap_or_else(|| "folio".to_string());

    let mut positional = Vec::new();
    let (mut config, mut page_size, mut logo) = (None, None, None);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(value(&mut raw, &program))),
            "--page-size" => page_size = Some(value(&mut raw, &program)),
            "--logo" => logo = Some(PathBuf::from(value(&mut raw, &program))),
            "-h" | "--help" => usage(&program),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let kind = match positional.next().as_deref() {
        Some("single") => Kind::Single,
        Some("comparison") => Kind::Comparison,
        _ => usage(&program),
    };
    let input = positional.next().map(PathBuf::from).unwrap_or_else(|| usage(&program));
    let output = positional.next().map(PathBuf::from);
    if positional.next().is_some() {
        usage(&program);
    }
    Args { kind, input, output, config, page_size, logo }
}

fn main() -> Result<(), FolioError> {
    env_logger::init();
    let args = parse_args();

    let mut builder = ReportGenerator::builder();
    if let Some(path) = &args.config {
        println!("Loading config from {}", path.display());
        builder = builder.with_config_file(path)?;
    }
    if let Some(size) = &args.page_size {
        builder = builder.with_page_size(size.parse::<PageSize>()?);
    }
    if let Some(logo) = &args.logo {
        builder = builder.with_logo_file(logo);
    }
    let generator = builder.build()?;

    println!("Loading data from {}", args.input.display());
    let data = fs::read_to_string(&args.input)?;
    let start = Instant::now();
    let (artifact, names) = match args.kind {
        Kind::Single => {
            let report: SubjectReport = serde_json::from_str(&data)?;
            let names: Vec<String> = report.names().iter().map(|n| n.to_string()).collect();
            (generator.generate_single(&report)?, names)
        }
        Kind::Comparison => {
            let report: ComparisonReport = serde_json::from_str(&data)?;
            let names: Vec<String> = std::iter::once(report.subject.name.clone())
                .chain(report.entries.iter().map(|e| e.partner.name.clone()))
                .collect();
            (generator.generate_comparison(&report)?, names)
        }
    };

    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    let output = args
        .output
        .unwrap_or_else(|| {
            PathBuf::from(suggested_file_name(&names, generator.config().generated_on()))
        });
    let written = generator.write_to(&artifact, &output, &names)?;

    println!(
        "Generated {} ({} pages) in {:.2?}",
        written.display(),
        artifact.page_count,
        start.elapsed()
    );
    Ok(())
}
