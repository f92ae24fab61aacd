//! CLI argument parsing

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug)]
#[command(name = "minipro-query-db")]
#[command(author, version, about = "Query the minipro device database", long_about = None)]
#[command(group(
    ArgGroup::new("selector")
        .args(["search", "name", "contains", "all", "device"])
        .required(true)
))]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// List part names that begin with NAME (case-insensitive)
    #[arg(short, long, value_name = "NAME")]
    pub search: Option<String>,

    /// Output record with name NAME
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Output records with name containing TERM
    #[arg(short, long, value_name = "TERM")]
    pub contains: Option<String>,

    /// Output all records
    #[arg(short, long)]
    pub all: bool,

    /// Output database records in JSON format (ignored with --search)
    #[arg(short, long)]
    pub json: bool,

    /// Device name, shorthand for --name
    #[arg(value_name = "NAME")]
    pub device: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_name() {
        let cli = Cli::try_parse_from(["minipro-query-db", "AT24C01"]).unwrap();
        assert_eq!(cli.device.as_deref(), Some("AT24C01"));
        assert!(!cli.json);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["minipro-query-db", "-c", "24C", "-j"]).unwrap();
        assert_eq!(cli.contains.as_deref(), Some("24C"));
        assert!(cli.json);

        let cli = Cli::try_parse_from(["minipro-query-db", "-a", "-vv"]).unwrap();
        assert!(cli.all);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_selector_required_and_exclusive() {
        assert!(Cli::try_parse_from(["minipro-query-db"]).is_err());
        assert!(Cli::try_parse_from(["minipro-query-db", "-j"]).is_err());
        assert!(Cli::try_parse_from(["minipro-query-db", "-a", "-n", "AT24C01"]).is_err());
        assert!(Cli::try_parse_from(["minipro-query-db", "-s", "AT", "AT24C01"]).is_err());
    }
}
