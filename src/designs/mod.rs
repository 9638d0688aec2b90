use std::time::Instant;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::error::PublishError;
use crate::output::types::Meta;
use crate::sendgrid::DesignClient;
use crate::telemetry::{self};
use crate::telemetry::ops::designs::Phase as DesignsPhase;

mod fetch;
pub mod types;

pub use fetch::{fetch_all_designs, find_by_name};

/// design-publish designs ls
#[derive(Args)]
pub struct DesignsCmd {
    #[command(subcommand)]
    pub cmd: DesignsSub,
}

#[derive(Subcommand)]
pub enum DesignsSub {
    /// List every design in the account, in provider order
    Ls {
        /// Only show designs with exactly this name
        #[arg(long)]
        name: Option<String>,
    },
}

pub async fn run(client: &dyn DesignClient, page_size: u32, args: DesignsCmd) -> Result<()> {
    match args.cmd {
        DesignsSub::Ls { name } => ls_designs(client, page_size, name).await,
    }
}

/// Fetch the directory and keep only designs named exactly `name`, if given.
pub async fn list_designs(client: &dyn DesignClient, page_size: u32, name: Option<&str>) -> Result<types::DesignList, PublishError> {
    let mut designs = fetch_all_designs(client, page_size).await?;
    if let Some(n) = name {
        designs.retain(|d| d.name == n);
    }
    Ok(types::DesignList { count: designs.len(), designs })
}

async fn ls_designs(client: &dyn DesignClient, page_size: u32, name: Option<String>) -> Result<()> {
    let log = telemetry::designs();
    let _g = log.root_span_kv([
        ("page_size", page_size.to_string()),
        ("name", format!("{:?}", name)),
    ]).entered();
    let t0 = Instant::now();

    let list = {
        let _s = log.span(&DesignsPhase::List).entered();
        list_designs(client, page_size, name.as_deref()).await?
    };

    log.info(format!("📐 Designs ({}):", list.count));
    for d in &list.designs {
        log.info(format!("[{}] {}", d.id, d.name));
    }

    if telemetry::config::json_mode() {
        log.result(&list, Some(Meta { duration_ms: Some(t0.elapsed().as_millis()) }))?;
    }
    Ok(())
}
