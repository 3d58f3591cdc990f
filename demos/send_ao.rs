mod env;

use nuntium::{Address, AoMessage, SendAo};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = env::client()?;
    let to = env::required("NUNTIUM_TO")?;
    let body =
        std::env::var("NUNTIUM_BODY").unwrap_or_else(|_| "Hello from the nuntium demo.".to_owned());

    let message = AoMessage::new(Address::new(to)?).body(body);
    let sent = client.send_ao(&SendAo::one(message)).await?;
    println!(
        "id: {:?}, token: {:?}, guid: {:?}",
        sent.id, sent.token, sent.guid
    );

    Ok(())
}
