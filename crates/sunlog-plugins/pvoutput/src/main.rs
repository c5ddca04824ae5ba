//! PVOutput publisher plugin binary

use pvoutput::PvOutputPlugin;
use sunlog::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_plugin::<PvOutputPlugin>().await
}
