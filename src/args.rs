use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Account linking server for Plaid and Dwolla on top of Appwrite.
#[derive(Parser, Debug)]
pub struct Args {
    /// Path to the YAML config file
    #[clap(short, long, default_value = "banklink.yaml")]
    pub config: PathBuf,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Print a new random encryption key for the config file
    GenerateKey,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_with_default_config() {
        let args = Args::try_parse_from(["banklink", "serve"]).unwrap();
        assert_eq!(PathBuf::from("banklink.yaml"), args.config);
        assert!(matches!(args.command, Command::Serve));
    }

    #[test]
    fn custom_config() {
        let args =
            Args::try_parse_from(["banklink", "--config", "/etc/banklink.yaml", "generate-key"])
                .unwrap();
        assert_eq!(PathBuf::from("/etc/banklink.yaml"), args.config);
        assert!(matches!(args.command, Command::GenerateKey));
    }

    #[test]
    fn missing_command() {
        assert!(Args::try_parse_from(["banklink"]).is_err());
    }
}
