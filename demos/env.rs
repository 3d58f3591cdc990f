use std::io;

use nuntium::{Credentials, NuntiumClient};

pub fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

pub fn client() -> Result<NuntiumClient, Box<dyn std::error::Error>> {
    let url = required("NUNTIUM_URL")?;
    let credentials = Credentials::new(
        required("NUNTIUM_ACCOUNT")?,
        required("NUNTIUM_APPLICATION")?,
        required("NUNTIUM_PASSWORD")?,
    )?;
    Ok(NuntiumClient::new(url, credentials)?)
}
