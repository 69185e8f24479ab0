use metafield_editor::{
    CatalogPager, Direction, EditSession, PageCursor, SessionState, SyncGateway,
    setup_environment,
};
use shop_client::AdminClient;

const USAGE: &str = "usage:
  metafield-editor products [--after CURSOR | --before CURSOR]
  metafield-editor metafields <product-id>
  metafield-editor set <product-id> <namespace.key> <value>";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // 1. dotenv, config, logging
    let config = setup_environment()?;

    // 2. Admin API client
    let client = AdminClient::new(&config.client_config())?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        [] | ["products"] => list_products(client, config.page_size, PageCursor::first()).await,
        ["products", "--after", cursor] => {
            let cursor = PageCursor {
                cursor: Some(cursor.to_string()),
                direction: Direction::Forward,
            };
            list_products(client, config.page_size, cursor).await
        }
        ["products", "--before", cursor] => {
            let cursor = PageCursor {
                cursor: Some(cursor.to_string()),
                direction: Direction::Backward,
            };
            list_products(client, config.page_size, cursor).await
        }
        ["metafields", product_id] => {
            let gateway = SyncGateway::with_definitions_limit(client, config.definitions_limit);
            let mut session = EditSession::new(gateway);
            if let SessionState::Failed(message) = session.open(product_id).await {
                return Err(message.clone().into());
            }
            let out = serde_json::json!({
                "product": session.product(),
                "entries": session.entries(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
        ["set", product_id, identity, value] => {
            let gateway = SyncGateway::with_definitions_limit(client, config.definitions_limit);
            let mut session = EditSession::new(gateway);
            if let SessionState::Failed(message) = session.open(product_id).await {
                return Err(message.clone().into());
            }

            let (namespace, key) = identity.split_once('.').unwrap_or(("", *identity));
            let existing = session.entries().iter().position(|e| e.identity() == *identity);
            let Some(index) = existing.or_else(|| session.add_entry_as(namespace, key)) else {
                return Err(format!("{identity} resolves to an existing metafield").into());
            };
            session.set_value(index, *value);

            let banner = session.save().await;
            println!("{}", serde_json::to_string_pretty(&banner)?);
            Ok(())
        }
        _ => {
            eprintln!("{USAGE}");
            Err("invalid arguments".into())
        }
    }
}

async fn list_products(
    client: AdminClient,
    page_size: u32,
    cursor: PageCursor,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let pager = CatalogPager::with_page_size(client, page_size);
    let page = pager.page(&cursor).await?;

    tracing::info!(count = page.items.len(), "Catalog page");
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
