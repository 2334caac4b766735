//! Helix CLI - export scene documents and inspect .hx files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use helix::hx::{IArchive, LinkKind, ObjectRecord, ObjectType, Value};
use helix::prelude::{export_to_path, ExportOptions, LightingMode, SceneDocument};

#[derive(Parser)]
#[command(name = "helix", version, about = "Helix (.hx) scene file toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum Lighting {
    Fixed,
    Dynamic,
}

impl From<Lighting> for LightingMode {
    fn from(l: Lighting) -> Self {
        match l {
            Lighting::Fixed => LightingMode::Fixed,
            Lighting::Dynamic => LightingMode::Dynamic,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Write a JSON scene document as a .hx file
    Export {
        input: PathBuf,
        output: PathBuf,
        /// JSON file with export options; flags below override it
        #[arg(long)]
        options: Option<PathBuf>,
        #[arg(long, value_enum)]
        lighting: Option<Lighting>,
        /// Do not align array payloads
        #[arg(long)]
        no_pad_arrays: bool,
        /// Generator string written into the header
        #[arg(long)]
        generator: Option<String>,
    },
    /// Show header and object counts
    Info { file: PathBuf },
    /// List every object record with its properties
    Dump {
        file: PathBuf,
        /// Print the decoded file as JSON
        #[arg(long, short = 'j')]
        json: bool,
    },
    /// List the link table and check for dangling ids
    Links { file: PathBuf },
}

fn init_logging(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_env("HELIX_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Export { input, output, options, lighting, no_pad_arrays, generator } => {
            let mut opts = match options {
                Some(path) => load_options(&path)?,
                None => ExportOptions::default(),
            };
            if let Some(lighting) = lighting {
                opts.lighting_mode = lighting.into();
            }
            if no_pad_arrays {
                opts.pad_arrays = false;
            }
            if let Some(generator) = generator {
                opts.generator = generator;
            }
            cmd_export(&input, &output, &opts)
        }
        Commands::Info { file } => cmd_info(&file),
        Commands::Dump { file, json } => cmd_dump(&file, json),
        Commands::Links { file } => {
            if !cmd_links(&file)? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn load_options(path: &Path) -> Result<ExportOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading options {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing options {}", path.display()))
}

fn open(path: &Path) -> Result<IArchive> {
    IArchive::open(path).with_context(|| format!("failed to open {}", path.display()))
}

fn cmd_export(input: &Path, output: &Path, opts: &ExportOptions) -> Result<()> {
    let doc = SceneDocument::open(input)
        .with_context(|| format!("failed to load scene document {}", input.display()))?;
    let summary = export_to_path(output, &doc, opts)
        .with_context(|| format!("failed to export {}", output.display()))?;

    println!("Wrote {}", output.display());
    println!("  Objects: {}", summary.objects);
    println!("  Links:   {}", summary.links);
    println!("  Bytes:   {}", summary.bytes);
    if summary.skipped > 0 {
        println!("  Skipped: {} unsupported objects", summary.skipped);
    }
    Ok(())
}

fn cmd_info(path: &Path) -> Result<()> {
    let archive = open(path)?;
    let header = archive.header();

    println!("File: {}", path.display());
    println!("Version:       {}", header.version);
    println!("Generator:     {}", header.generator);
    println!("Pad arrays:    {}", header.pad_arrays);
    println!("Default scene: {}", header.default_scene);
    println!("Lighting mode: {}", header.lighting_mode);
    println!("Size:          {} bytes", archive.size());
    println!();

    println!("Objects:");
    for &ty in ObjectType::ALL {
        let count = archive.objects_of_type(ty).count();
        if count > 0 {
            println!("  {:<18} {}", ty.name(), count);
        }
    }
    println!();
    println!("Total objects: {}", archive.objects().len());
    println!("Total links:   {}", archive.links().len());
    Ok(())
}

fn cmd_dump(path: &Path, json: bool) -> Result<()> {
    let archive = open(path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&archive)?);
        return Ok(());
    }
    for obj in archive.objects() {
        print_object(obj);
    }
    Ok(())
}

fn print_object(obj: &ObjectRecord) {
    println!("[{}] {}", obj.id, obj.object_type);
    for prop in &obj.properties {
        println!("    {:<16} {}", prop.tag.name(), format_value(&prop.value));
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("{:?}", s),
        Value::U8(v) => v.to_string(),
        Value::U32(v) => v.to_string(),
        Value::F32(v) => v.to_string(),
        Value::Vec3(v) => format!("({}, {}, {})", v.x, v.y, v.z),
        Value::Vec4(v) => format!("({}, {}, {}, {})", v.x, v.y, v.z, v.w),
        Value::F32Array(v) => format!("float32[{}]", v.len()),
        Value::U32Array(v) => format!("uint32[{}]", v.len()),
    }
}

/// Returns false when the file has dangling links.
fn cmd_links(path: &Path) -> Result<bool> {
    let archive = open(path)?;
    let describe = |id: u32| match archive.object(id) {
        Some(obj) => format!("{} {}", obj.object_type, obj.name().unwrap_or("-")),
        None => "<missing>".to_string(),
    };

    for link in archive.links() {
        let kind = link
            .link_kind()
            .map(|k| k.name().to_string())
            .unwrap_or_else(|| format!("reserved({})", link.kind));
        println!(
            "{:>5} -> {:<5} {:<12} {} -> {}",
            link.from,
            link.to,
            kind,
            describe(link.from),
            describe(link.to)
        );
    }

    let proxied = archive
        .links()
        .iter()
        .filter(|l| l.link_kind() == Some(LinkKind::Proxied))
        .count();
    println!();
    println!("{} links ({} proxied)", archive.links().len(), proxied);

    let dangling = archive.dangling_links();
    if dangling.is_empty() {
        return Ok(true);
    }
    eprintln!("{} dangling links:", dangling.len());
    for link in dangling {
        eprintln!("  {} -> {} (kind {})", link.from, link.to, link.kind);
    }
    Ok(false)
}
