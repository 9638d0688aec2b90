pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use ctx::LogCtx;

pub fn publish() -> LogCtx<ops::publish::Publish> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn designs() -> LogCtx<ops::designs::Designs> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
