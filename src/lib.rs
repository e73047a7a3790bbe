//! # Review Analyzer
//!
//! An HTTP service that returns customer reviews, optionally filtered by
//! location and date range, each annotated with sentiment scores.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌────────────┐   ┌────────────┐
//! │   HTTP   │──▶│   Query    │──▶│   Filter   │──▶│ Sentiment  │
//! │ handler  │   │ interpreter│   │  pipeline  │   │ annotator  │
//! └──────────┘   └────────────┘   └─────┬──────┘   └────────────┘
//!                                       │
//!                                ┌──────┴──────┐
//!                                │  Reviews    │
//!                                │ (read-only) │
//!                                └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! review-analyzer stats                           # inspect the dataset
//! review-analyzer filter --location NYC           # filter offline
//! review-analyzer serve                           # start HTTP server
//! curl 'localhost:8000/?start_date=2023-05-01&end_date=2023-05-31'
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Review and sentiment types |
//! | [`dataset`] | CSV / JSON dataset loading |
//! | [`sentiment`] | Lexicon-based sentiment scoring |
//! | [`filter`] | Filter predicates and the conjunctive filter pass |
//! | [`query`] | Query parameters → filter spec |
//! | [`pipeline`] | Filter + annotate per request |
//! | [`server`] | HTTP server |
//! | [`stats`] | Dataset summary |

pub mod config;
pub mod dataset;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod query;
pub mod sentiment;
pub mod server;
pub mod stats;
