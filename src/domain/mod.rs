//! Domain layer: strong types with validation and invariants (no I/O).

mod channel;
mod request;
mod response;
mod validation;
mod value;

pub use channel::Channel;
pub use request::{AoBatch, AoMessage, SendAo};
pub use response::{
    AoRecord, ApiResponse, Carrier, Country, CustomAttributes, SendAoResponse,
};
pub use validation::ValidationError;
pub use value::{
    AccountName, Address, AoToken, ApplicationName, CarrierGuid, ChannelName, CountryIso,
    Password,
};
