use clap::Parser;
use labelsheet::{
    ConfigFile, CsvRowSource, ExportKind, MissingIdentifierPolicy, PipelineBuilder, PipelineError,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Print labels with QR codes for a record collection or inventory export.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Configuration file with the label sheet profiles
    #[arg(short, long)]
    config: PathBuf,

    /// CSV export to read
    #[arg(short, long, required_unless_present = "list_profiles")]
    file: Option<PathBuf>,

    /// PDF file to write
    #[arg(short, long, required_unless_present = "list_profiles")]
    out: Option<PathBuf>,

    /// Name of the profile to use
    #[arg(short, long, required_unless_present = "list_profiles")]
    profile: Option<String>,

    /// The CSV is an inventory export; codes link to the sell item
    #[arg(short, long)]
    inventory: bool,

    /// Leave out records without an identifier instead of printing them without a code
    #[arg(long)]
    skip_missing: bool,

    /// Stroke the outline of every label, for checking alignment
    #[arg(long)]
    cell_outlines: bool,

    /// List the profiles in the configuration file and exit
    #[arg(long)]
    list_profiles: bool,
}

fn list_profiles(config: &ConfigFile) {
    let names = config.profile_names();
    if names.is_empty() {
        println!("No profiles defined");
        return;
    }
    for (name, section) in config.profiles() {
        match section.description.as_deref() {
            Some(description) if !description.is_empty() => println!("{:<20} {}", name, description),
            _ => println!("{}", name),
        }
    }
}

fn run(args: Args) -> Result<(), PipelineError> {
    let config = ConfigFile::from_path(&args.config)?;
    if args.list_profiles {
        list_profiles(&config);
        return Ok(());
    }

    // clap enforces these unless --list-profiles is given
    let (Some(file), Some(out), Some(profile)) = (args.file, args.out, args.profile) else {
        return Err(PipelineError::Config(
            "--file, --out and --profile are required".to_string(),
        ));
    };

    let export_kind = if args.inventory {
        ExportKind::Inventory
    } else {
        ExportKind::Collection
    };
    let policy = if args.skip_missing {
        MissingIdentifierPolicy::Skip
    } else {
        MissingIdentifierPolicy::BlankCode
    };

    let pipeline = PipelineBuilder::new()
        .with_profile_from_config(&profile, &config)?
        .with_export_kind(export_kind)
        .with_missing_identifier(policy)
        .with_cell_outlines(args.cell_outlines)
        .build()?;

    log::info!("Reading {}", file.display());
    let source = CsvRowSource::from_path(&file)?;
    let report = pipeline.generate_to_file(source, &out)?;
    if report.wrote_document() {
        println!(
            "Wrote {} labels on {} pages to {}",
            report.labels_placed,
            report.pages,
            out.display()
        );
    } else {
        println!("No labels to print");
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
