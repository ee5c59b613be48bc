use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use talent_core::SearchForm;

#[derive(Parser, Debug)]
#[command(
    name = "talent",
    version,
    about,
    long_about = "Search candidates and manage your shortlist from the terminal"
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Debug, Args, Serialize)]
pub struct ConfigArgs {
    /// Profile name
    #[arg(long, short, env = "TALENT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Base URL of the talent API, overrides the profile
    #[arg(long, env = "TALENT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// API token, overrides the stored one
    #[arg(long, env = "TALENT_TOKEN", global = true, hide_env_values = true)]
    #[serde(skip)]
    pub token: Option<String>,

    /// Print debug logs to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Prints out current configuration
    Config,
    /// Stores an API token for the current profile
    Login,
    /// Removes the stored API token
    Logout,
    /// Structured candidate search
    Search(SearchArgs),
    /// Natural-language candidate search
    Ai(AiArgs),
    /// Saves a candidate, or unsaves it when already saved
    Save(SaveArgs),
    /// Shortlisted candidates
    Shortlist(ShortlistArgs),
    /// Interactive session with paging, saving and filtering
    Shell(ShellArgs),
    /// Profile management
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommand>,
    },
    /// Prints shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Plain,
    Json,
}

#[derive(Debug, Args, PartialEq)]
pub struct SearchArgs {
    /// Search query
    #[arg(num_args = 1.., required = true)]
    pub query: Vec<String>,

    /// Filter by location
    #[arg(long)]
    pub location: Option<String>,

    /// Filter by education
    #[arg(long)]
    pub education: Option<String>,

    /// Minimum years of experience (0-20)
    #[arg(long, value_name = "YEARS")]
    pub experience: Option<u32>,

    /// Search beyond your own network
    #[arg(long, short)]
    pub global: bool,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

impl SearchArgs {
    pub fn form(&self, global_default: bool) -> SearchForm {
        SearchForm {
            query: self.query.join(" "),
            location: self.location.clone(),
            education: self.education.clone(),
            experience: self.experience,
            global: self.global || global_default,
        }
    }
}

#[derive(Debug, Args, PartialEq)]
pub struct AiArgs {
    /// Describe the candidate you are looking for
    #[arg(num_args = 1.., required = true)]
    pub prompt: Vec<String>,

    /// Search beyond your own network
    #[arg(long, short)]
    pub global: bool,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

impl AiArgs {
    pub fn form(&self, global_default: bool) -> SearchForm {
        SearchForm {
            query: self.prompt.join(" "),
            global: self.global || global_default,
            ..Default::default()
        }
    }
}

#[derive(Debug, Args, PartialEq)]
pub struct SaveArgs {
    /// Candidate ID
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Debug, Args, PartialEq)]
pub struct ShortlistArgs {
    #[command(subcommand)]
    pub command: Option<ShortlistCommand>,

    /// Only show candidates whose name contains this text (case-sensitive)
    #[arg(long, short)]
    pub filter: Option<String>,

    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum ShortlistCommand {
    /// Lists shortlisted candidates
    List,
    /// Removes a candidate from the shortlist
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Debug, Args, PartialEq)]
pub struct ShellArgs {
    /// Output format (pretty, plain, or json)
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum ProfileCommand {
    /// Switches to a profile, creating it when missing
    Use { name: String },
    /// Lists profiles
    List,
    /// Shows the current profile
    Current,
}
