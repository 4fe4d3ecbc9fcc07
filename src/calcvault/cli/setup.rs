use clap::{Parser, Subcommand};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "calcvault", bin_name = "calcvault", version = get_version())]
#[command(about = "A login-gated vault of math notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Username (falls back to $CALCVAULT_USERNAME)
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Password (falls back to $CALCVAULT_PASSWORD)
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Store the reference credential for this vault
    Init,

    /// Create a new note
    #[command(alias = "n")]
    Add {
        /// Title of the note
        #[arg(allow_hyphen_values = true)]
        title: String,

        /// Body of the note, usually an expression such as "3*(4-1)"
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// List notes in creation order
    #[command(alias = "ls")]
    List,

    /// Evaluate notes as math expressions
    #[command(alias = "e")]
    Eval {
        /// 1-based note indexes (all notes when omitted)
        indexes: Vec<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_global_credentials() {
        let cli = Cli::try_parse_from([
            "calcvault", "-u", "alice", "-p", "pw", "add", "Sum", "2+2",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Add {
                title: "Sum".into(),
                text: "2+2".into()
            })
        );
        assert_eq!(cli.username.as_deref(), Some("alice"));
        assert_eq!(cli.password.as_deref(), Some("pw"));
    }

    #[test]
    fn add_accepts_leading_minus_in_text() {
        let cli = Cli::try_parse_from([
            "calcvault", "-u", "alice", "-p", "pw", "add", "Neg", "-2+3",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Add {
                title: "Neg".into(),
                text: "-2+3".into()
            })
        );
    }

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["calcvault"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn eval_takes_optional_indexes() {
        let cli = Cli::try_parse_from(["calcvault", "eval", "1", "3"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Eval {
                indexes: vec![1, 3]
            })
        );
        let cli = Cli::try_parse_from(["calcvault", "e"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Eval { indexes: vec![] }));
    }

    #[test]
    fn eval_rejects_non_numeric_index() {
        assert!(Cli::try_parse_from(["calcvault", "eval", "first"]).is_err());
    }
}
