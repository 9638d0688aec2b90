use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use crate::designs::{fetch_all_designs, find_by_name};
use crate::error::PublishError;
use crate::output::types::Meta;
use crate::sendgrid::{DesignClient, DesignSummary};
use crate::telemetry::ctx::LogCtx;
use crate::telemetry::ops::publish::{Phase as PublishPhase, Publish};
use crate::telemetry::{self};
use crate::template::{self, TemplateName};

mod types;
mod upsert;

pub use types::{PublishPlan, PublishResult};
pub use upsert::{upsert, Action};

/// Create or update the design for the template named by the triggering ref
#[derive(Args, Debug)]
pub struct PublishCmd {
    /// Root of the build output tree (contains packages/<name>/dist)
    #[arg(long, env = "GITHUB_WORKSPACE")]
    pub workspace: Option<PathBuf>,
    /// Ref the template name is derived from, e.g. refs/tags/welcome-email@1.2.0
    #[arg(long, env = "GITHUB_REF")]
    pub git_ref: Option<String>,
    /// Stop after matching and report what would be sent
    #[arg(long, default_value_t = false)]
    pub plan: bool,
}

pub struct PublishRequest<'a> {
    pub workspace: &'a Path,
    pub git_ref: &'a str,
    pub page_size: u32,
}

struct Prepared {
    name: TemplateName,
    subject: String,
    html: String,
    target: Option<DesignSummary>,
    designs_fetched: usize,
}

pub async fn run(client: &dyn DesignClient, page_size: u32, args: PublishCmd) -> Result<()> {
    let workspace = args.workspace.ok_or(PublishError::MissingConfig("GITHUB_WORKSPACE or --workspace"))?;
    let git_ref = args.git_ref.ok_or(PublishError::MissingConfig("GITHUB_REF or --git-ref"))?;

    let log = telemetry::publish();
    let _g = log.root_span_kv([
        ("mode", if args.plan { "plan".to_string() } else { "apply".to_string() }),
        ("git_ref", git_ref.clone()),
        ("workspace", workspace.display().to_string()),
        ("page_size", page_size.to_string()),
    ]).entered();
    let t0 = Instant::now();

    let req = PublishRequest { workspace: &workspace, git_ref: &git_ref, page_size };

    if args.plan {
        let plan = plan(client, &req).await?;
        log.info(format!(
            "📝 Publish plan — {} {}{}",
            plan.action.as_str(),
            plan.name,
            plan.design_id.as_deref().map(|id| format!(" (id={id})")).unwrap_or_default()
        ));
        if telemetry::config::json_mode() {
            log.plan(&plan)?;
        }
        return Ok(());
    }

    let result = publish(client, &req).await?;
    if telemetry::config::json_mode() {
        log.result(&result, Some(Meta { duration_ms: Some(t0.elapsed().as_millis()) }))?;
    }
    Ok(())
}

/// Full run: fetch the directory, load the template, then create or update.
pub async fn publish(client: &dyn DesignClient, req: &PublishRequest<'_>) -> Result<PublishResult, PublishError> {
    let log = telemetry::publish();
    let p = prepare(client, &log, req).await?;
    let existing_id = p.target.as_ref().map(|d| d.id.as_str());
    let action = Action::for_target(existing_id);

    log.info(format!("Creating or updating design {}", p.name));
    let design = {
        let _s = log.span(&PublishPhase::Upsert).entered();
        upsert(client, existing_id, p.name.as_str(), &p.subject, &p.html).await?
    };
    let updated_at = design.updated_at.clone();
    log.upserted(p.name.as_str(), updated_at.as_deref().unwrap_or("unknown"));

    Ok(PublishResult {
        name: p.name.to_string(),
        action,
        design_id: design.id.clone(),
        updated_at,
        designs_fetched: p.designs_fetched,
        design,
    })
}

/// Everything `publish` does short of the upsert request.
pub async fn plan(client: &dyn DesignClient, req: &PublishRequest<'_>) -> Result<PublishPlan, PublishError> {
    let log = telemetry::publish();
    let p = prepare(client, &log, req).await?;
    let design_id = p.target.map(|d| d.id);
    Ok(PublishPlan {
        name: p.name.to_string(),
        action: Action::for_target(design_id.as_deref()),
        design_id,
        subject: p.subject,
        html_bytes: p.html.len(),
        designs_fetched: p.designs_fetched,
    })
}

async fn prepare(client: &dyn DesignClient, log: &LogCtx<Publish>, req: &PublishRequest<'_>) -> Result<Prepared, PublishError> {
    log.info("Fetching designs from SendGrid");
    let designs = {
        let _s = log.span(&PublishPhase::FetchDesigns).entered();
        fetch_all_designs(client, req.page_size).await?
    };
    log.fetched(designs.len());

    let name = TemplateName::from_ref(req.git_ref)?;
    let (html, meta) = {
        let _s = log.span(&PublishPhase::LoadTemplate).entered();
        log.debug_kv("reading template", [
            ("html", template::html_path(req.workspace, &name).display().to_string()),
            ("meta", template::meta_path(req.workspace, &name).display().to_string()),
        ]);
        let html = template::load_html(req.workspace, &name)?;
        let meta = template::load_metadata(req.workspace, &name)?;
        (html, meta)
    };

    let target = {
        let _s = log.span(&PublishPhase::Match).entered();
        find_by_name(&designs, name.as_str()).cloned()
    };
    if let Some(d) = &target {
        log.debug_kv("matched existing design", [("id", d.id.clone()), ("name", d.name.clone())]);
    }

    Ok(Prepared {
        name,
        subject: meta.subject,
        html,
        target,
        designs_fetched: designs.len(),
    })
}
