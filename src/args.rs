use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct Args {
    /// The address credcheck should listen on. By default
    /// credcheck will listen just on the IPv4 loopback.
    #[arg(short, long)]
    address: Option<String>,

    /// The port credcheck listens on.
    #[arg(short, long, default_value_t = 4400)]
    port: u16,

    /// Where user records are stored.
    #[arg(short, long, default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Read a password from stdin and print a hash suitable for
    /// a user record's `pwhash`.
    HashPassword,
}

impl Args {
    pub fn addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.address
            .as_deref()
            .unwrap_or("127.0.0.1")
            .parse()
            .map(|addr: IpAddr| (addr, self.port).into())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn command(&self) -> Option<&Command> {
        self.command.as_ref()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["credcheck"]);

        assert_eq!(args.addr(), Ok(SocketAddr::from(([127, 0, 0, 1], 4400))));
        assert_eq!(args.data_dir(), Path::new("."));
        assert_eq!(args.command(), None);
    }

    #[test]
    fn overrides() {
        let args = Args::parse_from(["credcheck", "-a", "::", "-p", "8080", "-d", "/var/lib/credcheck"]);

        assert_eq!(args.addr().unwrap().to_string(), "[::]:8080");
        assert_eq!(args.data_dir(), Path::new("/var/lib/credcheck"));
    }

    #[test]
    fn bad_address() {
        let args = Args::parse_from(["credcheck", "--address", "localhost"]);

        assert!(args.addr().is_err());
    }

    #[test]
    fn hash_password_command() {
        let args = Args::parse_from(["credcheck", "hash-password"]);

        assert_eq!(args.command(), Some(&Command::HashPassword));
    }
}
