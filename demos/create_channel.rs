mod env;

use nuntium::{Channel, ChannelName};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = env::client()?;
    let name = std::env::var("NUNTIUM_CHANNEL").unwrap_or_else(|_| "demo".to_owned());
    let password = env::required("NUNTIUM_CHANNEL_PASSWORD")?;

    let channel = Channel::new(ChannelName::new(name)?, "qst_server", "sms")
        .with_configuration("password", password);

    match client.create_channel(&channel).await? {
        Some(created) => println!(
            "created {} ({} / {})",
            created.name.as_str(),
            created.kind,
            created.protocol
        ),
        None => println!("server did not return the channel"),
    }

    Ok(())
}
