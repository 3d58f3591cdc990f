mod env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = env::client()?;

    for country in client.list_countries().await? {
        println!(
            "{} {} {}",
            country.iso2.as_deref().unwrap_or("-"),
            country.iso3.as_deref().unwrap_or("-"),
            country.name.as_deref().unwrap_or("-"),
        );
    }

    Ok(())
}
