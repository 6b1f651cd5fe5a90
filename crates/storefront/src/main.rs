use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;

use vitashop_catalog::{Catalog, CategoryFilter, SortKey};
use vitashop_core::ProductId;
use vitashop_storefront::{
    ApiClient, ContactForm, MemoryStore, SharedStore, SqliteStore, StorageBackend, Storefront,
    StorefrontConfig, SystemClock,
};

const HELP: &str = "\
commands:
  add <id>      buy <id>      inc <id>      dec <id>      rm <id>
  clear         cart          close
  filter <vitamins|protein|omega|herbal|all>
  sort <price-low|price-high|rating|name>
  search <text>
  contact <name>|<email>|<phone>|<message>
  fetch <path>  (requires VITASHOP_API_URL)
  quit";

fn open_store(backend: &StorageBackend) -> anyhow::Result<SharedStore> {
    Ok(match backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Sqlite { path } => Arc::new(
            SqliteStore::new(path.clone())
                .with_context(|| format!("failed to open storage at {path:?}"))?,
        ),
    })
}

struct Network {
    client: ApiClient,
    runtime: tokio::runtime::Runtime,
}

fn main() -> anyhow::Result<()> {
    let config = StorefrontConfig::from_env().context("invalid configuration")?;
    vitashop_observability::init(config.log_format);

    let catalog = Arc::new(Catalog::seeded());
    let clock = SystemClock::new();
    let mut shop = if config.persist_cart {
        Storefront::with_persistence(catalog, clock, open_store(&config.storage)?)
    } else {
        Storefront::new(catalog, clock)
    }
    .with_notification_display(config.notification_display);

    let network = match &config.api_url {
        Some(url) => Some(Network {
            client: ApiClient::new(url).context("failed to build API client")?,
            runtime: tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start network runtime")?,
        }),
        None => None,
    };

    tracing::info!(
        products = shop.engine().catalog().len(),
        persistent = shop.is_persistent(),
        network = network.is_some(),
        "storefront session started"
    );

    let mut out = io::stdout().lock();
    writeln!(out, "{}\n{HELP}", shop.screen())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read stdin")?;
        shop.tick();

        let (cmd, arg) = match line.trim().split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line.trim(), ""),
        };

        let outcome: anyhow::Result<()> = match cmd {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            "add" => product_id(arg).and_then(|id| Ok(shop.add_to_cart(id).map(drop)?)),
            "buy" => product_id(arg).and_then(|id| Ok(shop.buy_now(id).map(drop)?)),
            "inc" => product_id(arg).and_then(|id| Ok(shop.update_quantity(id, 1).map(drop)?)),
            "dec" => product_id(arg).and_then(|id| Ok(shop.update_quantity(id, -1).map(drop)?)),
            "rm" => product_id(arg).and_then(|id| Ok(shop.remove_from_cart(id).map(drop)?)),
            "clear" => shop.clear_cart().map(drop).map_err(Into::into),
            "cart" => {
                shop.open_cart();
                Ok(())
            }
            "close" => {
                shop.close_cart();
                Ok(())
            }
            "filter" => arg
                .parse::<CategoryFilter>()
                .map(|f| shop.filter(f))
                .map_err(Into::into),
            "sort" => arg
                .parse::<SortKey>()
                .map(|k| shop.sort(k))
                .map_err(Into::into),
            "search" => {
                shop.search(arg);
                Ok(())
            }
            "contact" => shop
                .submit_contact(contact_form(arg))
                .map(|inquiry| {
                    tracing::debug!(id = %inquiry.id, "inquiry accepted");
                })
                .map_err(Into::into),
            "fetch" => match &network {
                Some(net) => match net.runtime.block_on(net.client.get::<serde_json::Value>(arg)) {
                    Ok(body) => {
                        writeln!(out, "{body:#}")?;
                        Ok(())
                    }
                    Err(err) => Err(err.into()),
                },
                None => Err(anyhow::anyhow!("VITASHOP_API_URL is not set")),
            },
            other => Err(anyhow::anyhow!("unknown command '{other}' (try 'help')")),
        };

        if let Err(err) = outcome {
            writeln!(out, "error: {err}")?;
        }
        writeln!(out, "{}", shop.screen())?;
    }

    Ok(())
}

fn product_id(arg: &str) -> anyhow::Result<ProductId> {
    Ok(arg.parse::<ProductId>()?)
}

/// `name|email|phone|message`; missing parts are left blank.
fn contact_form(arg: &str) -> ContactForm {
    let mut parts = arg.splitn(4, '|').map(|p| p.trim().to_string());
    ContactForm {
        name: parts.next().unwrap_or_default(),
        email: parts.next().unwrap_or_default(),
        phone: parts.next().unwrap_or_default(),
        message: parts.next().unwrap_or_default(),
    }
}
