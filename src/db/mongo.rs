use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};
use std::time::Duration;

/// Builds the shared MongoDB client. A failed ping is only logged: the API
/// still serves requests that do not touch the database.
pub async fn create_mongo_client(uri: &str, database: &str) -> mongodb::error::Result<Client> {
    log::info!("Connecting to MongoDB database {}", database);

    let mut client_options = ClientOptions::parse(uri).await?;
    client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);
    client_options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

    let client = Client::with_options(client_options)?;

    match client.database(database).run_command(doc! { "ping": 1 }).await {
        Ok(_) => log::info!("Connected to MongoDB"),
        Err(e) => log::warn!(
            "Connected to MongoDB but ping failed, database features may be unavailable: {}",
            e
        ),
    }

    Ok(client)
}
