//! Typed Rust client for the Nuntium public HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for wire-format quirks (channel configuration lists, "not found" string
//! responses, `x-nuntium-*` headers), and a small client layer orchestrating
//! requests.
//!
//! ```rust,no_run
//! use nuntium::{Address, AoMessage, Credentials, NuntiumClient, SendAo};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nuntium::NuntiumError> {
//!     let credentials = Credentials::new("account", "application", "password")?;
//!     let client = NuntiumClient::new("https://nuntium.example.com", credentials)?;
//!     let message = AoMessage::new(Address::new("sms://5551234")?)
//!         .from(Address::new("sms://1")?)
//!         .body("hi!");
//!     let sent = client.send_ao(&SendAo::one(message)).await?;
//!     println!("token: {:?}", sent.token);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Credentials, NuntiumClient, NuntiumClientBuilder, NuntiumError};
pub use domain::{
    AccountName, Address, AoBatch, AoMessage, AoRecord, AoToken, ApiResponse, ApplicationName,
    Carrier, CarrierGuid, Channel, ChannelName, Country, CountryIso, CustomAttributes, Password,
    SendAo, SendAoResponse, ValidationError,
};
