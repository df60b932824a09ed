// Folio: descriptive statistics for public-domain literary texts.
//
// This is the library root. Each module corresponds to one stage of the
// document-to-metrics pipeline, plus the configuration and output plumbing
// the CLI needs around it.

pub mod config;
pub mod extract;
pub mod numeric;
pub mod output;
pub mod report;
pub mod resources;
pub mod sentiment;
pub mod text;
pub mod topics;
