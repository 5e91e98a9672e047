//! Resume-to-job-description matching engine.
//!
//! [`matching::construct_final_resume`] is the library entry point; the
//! `resume-matcher` binary serves the same engine over HTTP.

pub mod config;
pub mod errors;
pub mod matching;
pub mod models;
pub mod routes;
pub mod state;
