use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "Joseki Extractor")]
#[clap(about = "Builds statistical joseki trees from archives of Go game records", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Extract(ExtractCommand),
    Postprocess(PostprocessCommand),
    CountLeaves(CountLeavesCommand),
}

#[derive(Args)]
#[clap(about = "Merges the corner sequences of every archived game into a joseki tree", long_about = None)]
pub struct ExtractCommand {
    #[clap(short, long, default_value_t = String::from("joseki.conf"))]
    pub config: String,
}

#[derive(Args)]
#[clap(about = "Removes rarely played continuations from a joseki tree", long_about = None)]
pub struct PostprocessCommand {
    #[clap(short, long, default_value_t = String::from("joseki.conf"))]
    pub config: String,
}

#[derive(Args)]
#[clap(about = "Prints the number of variations in a joseki tree", long_about = None)]
pub struct CountLeavesCommand {
    pub path: String,
}
