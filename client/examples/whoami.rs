//! Print the app or user the configured keys belong to.
//!
//! ```shell
//! PARA_ENDPOINT=http://localhost:8080 PARA_ACCESS_KEY=app:myapp PARA_SECRET_KEY=... \
//!     cargo run --example whoami
//! ```

use para_client::{Client, Config};
use para_core::{Context, OsEnv};
use para_http_send_reqwest::ReqwestHttpSend;
use para_preference_file::FilePreferenceStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::try_init();

    let prefs = std::env::temp_dir().join("para-client").join("prefs.json");
    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv)
        .with_preference_store(FilePreferenceStore::new(prefs));
    let client = Client::new(ctx.clone(), Config::default().from_env(&ctx));

    println!("server version: {}", client.server_version().await?);
    match client.me(None).await? {
        Some(me) => println!("authenticated as {} ({})", me.id, me.object_type),
        None => println!("not authenticated"),
    }

    Ok(())
}
