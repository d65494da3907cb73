use clap::{ArgAction, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "catalogview",
    version,
    about = "filterable product-catalog viewer",
    long_about = "catalogview joins users, categories and products and renders the products as a filterable table.\n\nExamples:\n  catalogview\n  catalogview --user Anna --search mi\n  catalogview --format html --output catalog.html\n  catalogview --users users.json --categories categories.json --products products.json -I\n\nTip: Use --config to keep data file locations and output settings in one place."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        help_heading = "Output",
        help = "Increase log verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored text output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format: text, json or html (inferred from --output when omitted)."
    )]
    pub format: Option<String>,

    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered view to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        long = "users",
        value_name = "FILE",
        help_heading = "Data",
        help = "Users data file (.json, .yml, .yaml)."
    )]
    pub users: Option<String>,

    #[arg(
        long = "categories",
        value_name = "FILE",
        help_heading = "Data",
        help = "Categories data file (.json, .yml, .yaml)."
    )]
    pub categories: Option<String>,

    #[arg(
        long = "products",
        value_name = "FILE",
        help_heading = "Data",
        help = "Products data file (.json, .yml, .yaml)."
    )]
    pub products: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        value_name = "FILE",
        help_heading = "Data",
        help = "Path to config file."
    )]
    pub config: Option<String>,

    #[arg(
        long = "init-config",
        help_heading = "Data",
        help = "Write a default config to ~/.catalogview/config.yml and exit."
    )]
    pub init_config: bool,

    #[arg(
        short = 'u',
        long = "user",
        value_name = "ID|NAME|all",
        help_heading = "Filters",
        help = "Only show products owned by this user."
    )]
    pub user: Option<String>,

    #[arg(
        short = 's',
        long = "search",
        value_name = "TEXT",
        help_heading = "Filters",
        help = "Only show products whose name contains TEXT (case-insensitive)."
    )]
    pub search: Option<String>,

    #[arg(
        short = 'I',
        long = "interactive",
        help_heading = "Session",
        help = "Read filter commands from stdin and re-render after each one."
    )]
    pub interactive: bool,
}
