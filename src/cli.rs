use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "logsift")]
#[command(author, version, about = "Reformat and search raw web-hosting access logs", long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Log debug details (overrides RUST_LOG)")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Convert every log file in a directory to CSV or JSON")]
    Convert {
        #[command(flatten)]
        input: InputArgs,
    },

    #[command(about = "Find log events matching every field=value predicate")]
    Search {
        #[command(flatten)]
        input: InputArgs,

        #[arg(
            short = 'w',
            long = "where",
            required = true,
            num_args = 1..,
            help = "Predicate as field=value, e.g. method=GET (repeatable, ANDed)"
        )]
        predicates: Vec<String>,

        #[arg(
            short = 'o',
            long,
            help = "File name for the search results, saved in the output directory"
        )]
        output_results: String,

        #[arg(short = 'S', long, help = "Also save each converted log file")]
        save_files: bool,
    },

    #[command(about = "Parse a single log file and print its records")]
    Parse {
        #[arg(help = "Log file path")]
        input: String,

        #[arg(short, long, value_enum, help = "Output format")]
        output: Option<OutputFormat>,
    },
}

#[derive(Args)]
pub struct InputArgs {
    #[arg(short, long, help = "Directory containing the log files")]
    pub input_path: String,

    #[arg(
        short,
        long,
        help = "Extension of the files to process ('txt', 'log', ...)"
    )]
    pub log_files: String,

    #[arg(short, long, default_value = "CSV", help = "Export type: CSV or JSON")]
    pub export_type: String,

    #[arg(
        short = 'D',
        long,
        help = "Directory for converted files and results. Can also be set via LOGSIFT_OUTPUT_DIR env var [default: FormattedLogFiles]"
    )]
    pub dir_out: Option<String>,

    #[arg(long, value_enum, help = "Format of the run summary")]
    pub report: Option<OutputFormat>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}
