//! Web front-end that translates text and synthesizes speech through
//! Google Cloud APIs.

pub mod config;
pub mod error;
pub mod i18n;
pub mod server;
pub mod speech;
pub mod storage;
pub mod translation;
