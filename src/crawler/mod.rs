//! Crawler engine
//!
//! The crawl of one domain is a Seed -> Batch-Fetch -> Expand -> Drain loop
//! owned by the [`Dispatcher`]; the [`orchestrator`] sequences domains,
//! owns the shared visited store, and hands the result to sitemap
//! generation.

mod dispatcher;
mod fetcher;
mod frontier;
mod orchestrator;
mod parser;

pub use dispatcher::Dispatcher;
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use frontier::{Frontier, FrontierEntry};
pub use orchestrator::{run, RunOutcome};
pub use parser::{parse_page, ParsedPage};
