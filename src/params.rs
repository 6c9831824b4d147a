use crate::core::constants::PROPERTIES_RESOURCE;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gnip-kinesis", about = "Resolve and print the Gnip to Kinesis producer configuration")]
pub struct Params {
    /// Property resource to load
    #[arg(long, env = "GNIP_KINESIS_CONFIG", default_value = PROPERTIES_RESOURCE)]
    pub config: PathBuf,

    /// Print the resolved settings as single-line JSON
    #[arg(long)]
    pub compact: bool,
}
