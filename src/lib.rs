//! # Home Assistant companion building blocks
//!
//! The onboarding, quick settings tile and wearable pieces of a Home Assistant
//! companion app, written against small traits so any platform shell can host them:
//!
//! * [`auth`]: login page in an embedded browser, redirect detection and error dialogs
//! * [`tiles`]: quick settings tiles that show and toggle a single entity
//! * [`wear`]: watch onboarding from instances announced by the paired phone
//!
//! The backends live in [`repository`], talking to Home Assistant through the
//! [websocket api](https://developers.home-assistant.io/docs/api/websocket) and
//! the `/auth` REST endpoints.

pub mod auth;
pub mod client;
mod errors;
pub mod repository;
pub mod tiles;
pub mod types;
pub mod wear;

pub use client::HassClient;
pub use errors::{HassError, HassResult};
