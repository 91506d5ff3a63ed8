//! # coleta-atas — RPPS meeting-minutes collector
//!
//! This crate implements a batch pipeline that visits the websites of
//! municipal pension funds (RPPS), discovers pages likely to hold meeting
//! minutes ("atas"), downloads the documents it finds there, extracts their
//! text and classifies each one by meeting type and meeting date. Results
//! are written as JSON Lines plus a human-readable summary, per site and
//! consolidated across the whole run.
//!
//! ## Pipeline
//!
//! - [`discovery`]: rendered-page anchor scan with keyword/blacklist rules
//! - [`downloader`]: document-link enumeration, retrying fetches, content
//!   dedup and disk writes
//! - [`extractor`]: per-format text extraction and meeting classification
//! - [`report`]: JSONL and TXT report writers
//!
//! Sites are processed strictly one at a time; nothing in the pipeline is
//! fatal to the run — every failure degrades to a logged skip.

mod error;

pub mod discovery;
pub mod downloader;
pub mod extractor;
pub mod fetch;
pub mod report;
pub mod rules;
pub mod site;

pub use error::{Error, Result};
