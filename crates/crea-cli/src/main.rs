mod commands;
mod output;

use clap::{Args, Parser, Subcommand};
use crea_core::error::CreaError;
use output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "crea",
    version,
    about = "Bond/notice extraction and inspection reports for CREA-RJ"
)]
struct Cli {
    /// Config file (default: ./crea.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug output (overridden by CREA_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract contracted parties and official notices from PDFs into a table
    Extract {
        /// PDF files, in the order they should appear in the table
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Custom JSON ruleset (default: built-in "Vínculos e S.I")
        #[arg(short, long = "rules", value_name = "FILE")]
        rules: Option<PathBuf>,

        /// Write the .xlsx spreadsheet
        #[arg(long)]
        xlsx: bool,

        /// Write the PDF report
        #[arg(long)]
        pdf: bool,

        /// Directory for the written files
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,

        /// Extraction backend: auto, pdftotext or lopdf
        #[arg(long, value_name = "BACKEND")]
        extractor: Option<String>,
    },
    /// Manage and inspect extraction rulesets
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
    /// Look up an address by CEP
    Cep {
        /// Postal code, with or without punctuation
        cep: String,
    },
    /// Fill in the inspection form and render its PDF report
    Form(FormArgs),
    /// List the municipalities of Rio de Janeiro state
    Municipios,
}

#[derive(Subcommand)]
enum RulesAction {
    /// Show the built-in ruleset in plain language
    List,
    /// Print the built-in ruleset as JSON
    Show,
    /// Validate a custom ruleset file
    Validate {
        /// Path to JSON ruleset
        file: PathBuf,
    },
}

#[derive(Args, Default)]
pub struct FormArgs {
    /// Load field values from a JSON file (flags override)
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,

    /// Prompt for every field
    #[arg(short, long)]
    pub interactive: bool,

    /// Fill street and neighborhood from the CEP before rendering
    #[arg(long)]
    pub buscar_cep: bool,

    /// Logo image for the page header
    #[arg(long, value_name = "FILE")]
    pub logo: Option<PathBuf>,

    /// Output PDF path (default: <output_dir>/relatorio_obra.pdf)
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    #[arg(long)]
    pub latitude: Option<String>,
    #[arg(long)]
    pub longitude: Option<String>,
    /// Avenida, Rua, Rodovia, Estrada, Viela or Alameda
    #[arg(long)]
    pub tipo_logradouro: Option<String>,
    #[arg(long)]
    pub logradouro: Option<String>,
    #[arg(long)]
    pub numero: Option<String>,
    #[arg(long)]
    pub bairro: Option<String>,
    #[arg(long)]
    pub municipio: Option<String>,
    #[arg(long)]
    pub cep: Option<String>,
    #[arg(long)]
    pub contratante: Option<String>,
    #[arg(long)]
    pub cpf_cnpj: Option<String>,
    #[arg(long)]
    pub caracteristica: Option<String>,
    /// Acabamento, Licitação, Execução or Conclusão
    #[arg(long)]
    pub fase: Option<String>,
    #[arg(long)]
    pub pavimentos: Option<u32>,
    #[arg(long)]
    pub quantificacao: Option<String>,
    /// m², m³, un, kg or ton
    #[arg(long)]
    pub unidade: Option<String>,
    /// Pública, Privada or Mista
    #[arg(long)]
    pub natureza: Option<String>,
    /// Residencial, Comercial, Industrial or Infraestrutura
    #[arg(long)]
    pub tipo_construcao: Option<String>,
}

fn init_logging(verbose: bool) {
    if std::env::var_os("CREA_LOG").is_none() {
        std::env::set_var("CREA_LOG", if verbose { "debug" } else { "info" });
    }
    pretty_env_logger::init_custom_env("CREA_LOG");
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CreaError> {
    let config = crea_core::config::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract {
            files,
            rules,
            xlsx,
            pdf,
            out_dir,
            output,
            extractor,
        } => commands::extract::run(
            &config,
            commands::extract::ExtractOptions {
                files,
                rules,
                xlsx,
                pdf,
                out_dir,
                output,
                extractor,
            },
        ),
        Commands::Rules { action } => match action {
            RulesAction::List => commands::rules::list(),
            RulesAction::Show => commands::rules::show(),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
        Commands::Cep { cep } => commands::cep::run(&config, &cep),
        Commands::Form(args) => commands::form::run(&config, args),
        Commands::Municipios => commands::municipios::run(),
    }
}
