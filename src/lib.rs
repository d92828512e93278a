//! # Sediment Harness
//!
//! Ingests tabular sediment-sample measurements from CSV files, sanitizes
//! every value by column role, stores the samples in SQLite under a unique
//! (`Study_Code`, `Sample_ID`) key, and serves them back by `Sample_ID`.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌──────────────┐   ┌──────────┐
//! │ CSV file │──▶│   parse    │──▶│    writer    │──▶│  SQLite  │
//! │          │   │ + sanitize │   │ skip dupes   │   │ samples  │
//! └──────────┘   └────────────┘   └──────────────┘   └────┬─────┘
//!                                                         │
//!                                      ┌──────────────────┤
//!                                      ▼                  ▼
//!                                 ┌──────────┐       ┌──────────┐
//!                                 │   CLI    │       │   HTTP   │
//!                                 │  (get)   │       │  (axum)  │
//!                                 └──────────┘       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! sediment init                          # create database, table and indexes
//! sediment ingest ./samples.csv --debug  # sanitize and store a file
//! sediment get S19S_0001_BULK-D          # print one sample
//! sediment serve                         # start the HTTP read API
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`sanitize`] | Value and row sanitization rules |
//! | [`models`] | `Sample` and `Record` types |
//! | [`parse`] | CSV reading |
//! | [`store`] | Storage trait and in-memory backend |
//! | [`sqlite_store`] | SQLite backend |
//! | [`writer`] | Skip-on-duplicate insert loop |
//! | [`ingest`] | Ingest command orchestration |
//! | [`get`] | Lookup by `Sample_ID` |
//! | [`server`] | HTTP read API |
//! | [`config`] | TOML configuration with environment overrides |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema creation |

pub mod config;
pub mod db;
pub mod error;
pub mod get;
pub mod ingest;
pub mod logging;
pub mod migrate;
pub mod models;
pub mod parse;
pub mod sanitize;
pub mod server;
pub mod sqlite_store;
pub mod store;
pub mod writer;
