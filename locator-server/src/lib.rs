//! Nearby station locator.
//!
//! A small web service that answers: "which stations are closest to this
//! point or this address?" Stations come from a fixed catalog; addresses
//! are turned into coordinates by a pluggable geocoding backend.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod geocode;
pub mod llm;
pub mod resolver;
pub mod suggest;
pub mod web;
