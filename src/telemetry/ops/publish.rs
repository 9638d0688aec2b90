use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Publish;

#[derive(Copy, Clone, Debug)]
pub enum Phase { FetchDesigns, LoadTemplate, Match, Upsert }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::FetchDesigns => "fetch_designs",
        Phase::LoadTemplate => "load_template",
        Phase::Match => "match",
        Phase::Upsert => "upsert",
    }}
    fn span(&self) -> Span { match self {
        Phase::FetchDesigns => info_span!("fetch_designs"),
        Phase::LoadTemplate => info_span!("load_template"),
        Phase::Match => info_span!("match"),
        Phase::Upsert => info_span!("upsert"),
    }}
}

impl OpMarker for Publish {
    const NAME: &'static str = "publish";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("publish") }
}
