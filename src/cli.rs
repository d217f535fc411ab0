use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "moviedb-api")]
#[command(about = "Movie database REST API backed by Postgres")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Listen port (overrides PORT)")]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    #[command(about = "Serve the HTTP API (default)")]
    Serve,

    #[command(about = "Apply pending database migrations and exit")]
    Migrate,
}

impl Cli {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
