//! Kalm Voice - voice-call therapy assistant backend
//!
//! Answers telephony webhooks for each step of a call, generates the
//! assistant's replies with a generative model, and keeps every call
//! session and its conversation in a store.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
