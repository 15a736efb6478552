//! nomtex CLI - LaTeX nomenclature and symbol macros from a spreadsheet

#[cfg(feature = "cli")]
use anyhow::{bail, Context};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use nomtex::{
    diagnostics::{check_table, format_diagnostics},
    source::load_table,
    Generator, GeneratorConfig, MacroCommand, StdOutputWriter,
};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "nomtex")]
#[command(version)]
#[command(about = "LaTeX nomenclature tables and symbol macros from a spreadsheet", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Generate the LaTeX files (default outputs: math symbols and nomenclature)
    Generate {
        /// Symbol definition table (.xlsx, .xls, .ods or .csv)
        input: Option<PathBuf>,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory the files are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Worksheet to read (first sheet by default)
        #[arg(long)]
        sheet: Option<String>,

        /// Root document named in the `%!TEX root` line
        #[arg(long)]
        tex_root: Option<String>,

        /// Skip the macro definitions
        #[arg(long)]
        no_commands: bool,

        /// Skip the nomenclature document
        #[arg(long)]
        no_nomenclature: bool,

        /// Also write the additional-nomenclature appendix
        #[arg(long)]
        appendix: bool,

        /// Write `_alt` files instead of overwriting
        #[arg(long)]
        alt: bool,

        /// Command used for macro definitions
        #[arg(long, value_enum)]
        macro_command: Option<MacroKind>,

        /// Define macros with \renewcommand (same as `--macro-command renew`)
        #[arg(long, conflicts_with = "macro_command")]
        renew: bool,

        /// Suffix for the macro file name, e.g. `1_det`
        #[arg(long)]
        suffix: Option<String>,

        /// Section to render as KEY=TITLE (repeatable)
        #[arg(long = "section", value_parser = parse_section)]
        sections: Vec<(String, String)>,

        /// Include the Dual Variables table
        #[arg(long)]
        duals: bool,

        /// Include the Auxiliaries table
        #[arg(long)]
        auxiliaries: bool,

        /// Print the documents instead of writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Check a symbol table for problems without generating anything
    Check {
        /// Symbol definition table
        input: PathBuf,

        /// Worksheet to read
        #[arg(long)]
        sheet: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Show version and supported formats
    Info,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum MacroKind {
    /// \newcommand
    New,
    /// \renewcommand
    Renew,
    /// \providecommand
    Provide,
}

#[cfg(feature = "cli")]
impl From<MacroKind> for MacroCommand {
    fn from(kind: MacroKind) -> Self {
        match kind {
            MacroKind::New => MacroCommand::NewCommand,
            MacroKind::Renew => MacroCommand::RenewCommand,
            MacroKind::Provide => MacroCommand::ProvideCommand,
        }
    }
}

#[cfg(feature = "cli")]
fn parse_section(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, title)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), title.trim().to_string()))
        }
        _ => Err(format!("expected KEY=TITLE, got '{}'", s)),
    }
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_env("NOMTEX_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(format!("nomtex={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Generate {
            input,
            config,
            output_dir,
            sheet,
            tex_root,
            no_commands,
            no_nomenclature,
            appendix,
            alt,
            macro_command,
            renew,
            suffix,
            sections,
            duals,
            auxiliaries,
            dry_run,
        } => {
            let mut cfg = match config {
                Some(ref path) => GeneratorConfig::from_path(path)
                    .with_context(|| format!("loading configuration {}", path.display()))?,
                None => GeneratorConfig::default(),
            };

            // Command-line flags override the configuration file
            if let Some(input) = input {
                cfg.input = Some(input);
            }
            if let Some(dir) = output_dir {
                cfg.output_dir = dir;
            }
            if sheet.is_some() {
                cfg.sheet = sheet;
            }
            if let Some(root) = tex_root {
                cfg.tex_root = root;
            }
            if no_commands {
                cfg.outputs.commands = false;
            }
            if no_nomenclature {
                cfg.outputs.nomenclature = false;
            }
            if appendix {
                cfg.outputs.appendix = true;
            }
            if alt {
                cfg.replace = false;
            }
            if let Some(kind) = macro_command {
                cfg.macros.command = kind.into();
            }
            if renew {
                cfg.macros.command = MacroCommand::RenewCommand;
            }
            if let Some(suffix) = suffix {
                cfg.macros.suffix = suffix;
            }
            if !sections.is_empty() {
                cfg.nomenclature.sections = sections.into_iter().collect();
            }
            cfg.nomenclature.include_duals |= duals;
            cfg.nomenclature.include_auxiliaries |= auxiliaries;
            cfg.validate()?;

            if cfg.input.is_none() {
                bail!("no input table given (pass INPUT or set `input` in the configuration)");
            }

            let generator = Generator::new(&cfg);
            let table = generator.load().context("loading symbol table")?;

            if dry_run {
                for file in generator.plan(&table).context("rendering documents")? {
                    println!("%%%% {} ({})", file.name, file.kind);
                    print!("{}", file.contents);
                }
                return Ok(());
            }

            let mut writer = StdOutputWriter::new(&cfg.output_dir);
            let written = generator
                .generate(&table, &mut writer)
                .context("writing output")?;
            for path in written {
                eprintln!("✓ Output written to: {}", path.display());
            }
        }

        Commands::Check {
            input,
            sheet,
            no_color,
        } => {
            let raw = load_table(&input, sheet.as_deref())
                .with_context(|| format!("reading {}", input.display()))?;
            let result = check_table(&raw);
            println!("{}", format_diagnostics(&result, !no_color));

            if result.has_errors() {
                std::process::exit(1);
            }
        }

        Commands::Info => {
            println!("nomtex - LaTeX nomenclature generator");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Outputs:");
            println!("  ✓ Symbol macro definitions (00_math_symbols.tex)");
            println!("  ✓ Nomenclature: Sets, Parameters, Decision Variables");
            println!("    (optionally Dual Variables and Auxiliaries)");
            println!("  ✓ Additional nomenclature appendix");
            println!();
            println!("Input formats:");
            if cfg!(feature = "spreadsheet") {
                println!("  - xlsx, xlsm, xlsb, xls, ods");
            }
            println!("  - csv");
            println!();
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install nomtex --features cli");
    eprintln!("  nomtex generate [OPTIONS] [INPUT]");
}
