//! Read-only listings API: map viewport and filter queries over the
//! `listings` relation, plus static geographic overlays.

pub mod config;
pub mod db;
pub mod logger;
pub mod models;
pub mod services;
pub mod web;
