use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use roomplan::PlanStyle;
use roomplan::plan::{
    RoomAnalysis, SAMPLE_RESPONSE, generate_diagram_with, inspect_diagram,
    parse_analysis_response, parse_room_analysis, sample_analysis,
};
use roomplan::room::{RoomType, generate_room_label};
use std::path::{Path, PathBuf};

/// Floor-plan diagrams from room analyses
#[derive(Parser, Debug)]
#[command(name = "roomplan")]
#[command(version)]
#[command(about = "Render room analyses as scaled 2D floor-plan SVG diagrams", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a room analysis (JSON) to an SVG floor plan
    Render(RenderArgs),
    /// Print the metadata of a generated diagram as JSON
    Inspect {
        /// Diagram SVG file (use "-" for stdin)
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
    /// Print the built-in sample analysis
    Sample {
        /// Print the raw snake_case model response instead of the stored schema
        #[arg(long)]
        raw: bool,
    },
    /// List the built-in styles
    Styles,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(clap::Args, Debug)]
struct RenderArgs {
    /// Analysis JSON file (use "-" for stdin)
    #[arg(value_name = "INPUT", required_unless_present = "sample")]
    input: Option<PathBuf>,

    /// Render the built-in sample analysis instead of reading INPUT
    #[arg(long, conflicts_with = "input")]
    sample: bool,

    /// Output SVG path (stdout if omitted)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Input is a raw snake_case model response rather than a stored analysis
    #[arg(long)]
    raw: bool,

    /// Room label shown in the diagram (defaults to "<Type>#1")
    #[arg(short, long)]
    label: Option<String>,

    /// Room type used for the default label
    #[arg(long, value_enum, default_value_t = RoomType::Other)]
    room_type: RoomType,

    /// Room identifier recorded on the diagram
    #[arg(long, default_value = "room_1")]
    id: String,

    /// Path to a style file (TOML or YAML)
    #[arg(short, long, value_name = "STYLE")]
    style: Option<PathBuf>,

    /// Name of a built-in style
    #[arg(long, conflicts_with = "style")]
    preset: Option<String>,

    /// Also print the review summary (dimensions, area, confidence) to stderr
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<(), String> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => render(args),
        Command::Inspect { input } => {
            let svg = read_input(&input)?;
            let summary = inspect_diagram(&svg).map_err(|e| e.to_string())?;
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| format!("Failed to encode summary: {}", e))?;
            println!("{}", json);
            Ok(())
        }
        Command::Sample { raw } => {
            if raw {
                print!("{}", SAMPLE_RESPONSE);
            } else {
                let mut analysis = sample_analysis().map_err(|e| e.to_string())?;
                analysis.raw_response = None;
                let json = serde_json::to_string_pretty(&analysis)
                    .map_err(|e| format!("Failed to encode analysis: {}", e))?;
                println!("{}", json);
            }
            Ok(())
        }
        Command::Styles => {
            for name in PlanStyle::list_builtins() {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "roomplan", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn render(args: RenderArgs) -> Result<(), String> {
    let style = if let Some(ref style_path) = args.style {
        if style_path.exists() && style_path.is_file() {
            PlanStyle::from_file(style_path).map_err(|e| e.to_string())?
        } else {
            return Err(format!("Style file not found: {}", style_path.display()));
        }
    } else if let Some(ref name) = args.preset {
        PlanStyle::from_builtin(name).map_err(|e| e.to_string())?
    } else {
        PlanStyle::default()
    };

    let analysis = load_analysis(&args)?;
    let label = args
        .label
        .clone()
        .unwrap_or_else(|| generate_room_label(args.room_type, &[]));

    let diagram =
        generate_diagram_with(&analysis, &label, &args.id, &style).map_err(|e| e.to_string())?;

    for skipped in &diagram.skipped {
        eprintln!(
            "Skipped unsupported feature '{}' ({} wall, #{})",
            skipped.kind, skipped.wall, skipped.index
        );
    }

    if args.summary {
        let summary = serde_json::to_string_pretty(&analysis.summary())
            .map_err(|e| format!("Failed to encode summary: {}", e))?;
        eprintln!("{}", summary);
    }

    match args.output {
        Some(ref path) => {
            std::fs::write(path, &diagram.svg)
                .map_err(|e| format!("Failed to write SVG: {}", e))?;
            eprintln!(
                "SVG saved to: {} ({} doors, {} windows, {} closets)",
                path.display(),
                diagram.counts.doors,
                diagram.counts.windows,
                diagram.counts.closets
            );
        }
        None => print!("{}", diagram.svg),
    }

    Ok(())
}

fn load_analysis(args: &RenderArgs) -> Result<RoomAnalysis, String> {
    if args.sample {
        return sample_analysis().map_err(|e| e.to_string());
    }

    let input = args.input.as_deref().ok_or("No input file given")?;
    let json = read_input(input)?;
    let parsed = if args.raw {
        parse_analysis_response(&json)
    } else {
        parse_room_analysis(&json)
    };
    parsed.map_err(|e| e.to_string())
}

fn read_input(path: &Path) -> Result<String, String> {
    if path.to_str() == Some("-") {
        let mut buffer = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path).map_err(|e| format!("Failed to read input file: {}", e))
    }
}

#[cfg(feature = "tracing")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(not(feature = "tracing"))]
fn init_tracing() {}
