use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use recents_common::{DEFAULT_CAPACITY, DEFAULT_DATA_DIR, DEFAULT_SLOT_KEY};
use recents_core::{CAROUSEL_TITLE, NewProductView, ProductView, RecentlyViewed, StoreConfig};
use recents_storage::{FileStorage, SyncPolicy};

#[derive(Parser, Debug)]
#[command(name = "recents", about = "Recents — produtos vistos recentemente")]
struct Args {
    /// Diretório onde os slots são gravados
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,
    #[arg(long, default_value = DEFAULT_SLOT_KEY)]
    slot: String,
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
    #[arg(long, default_value = "always", value_parser = parse_fsync)]
    fsync: SyncPolicy,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Registra a visualização de um produto
    Record {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        image: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        rating: Option<f64>,
        #[arg(long)]
        discount: Option<f64>,
    },
    /// Lista os produtos, mais recente primeiro
    List {
        #[arg(long)]
        limit: Option<NonZeroUsize>,
        /// Imprime o conteúdo como JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove um produto da lista
    Remove { id: String },
    /// Apaga a lista inteira
    Clear,
}

fn parse_fsync(s: &str) -> Result<SyncPolicy, String> {
    match s.to_lowercase().as_str() {
        "always" => Ok(SyncPolicy::Always),
        "no" => Ok(SyncPolicy::No),
        _ => Err(format!("valor inválido: '{s}'. Use: always, no")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recents_cli=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = StoreConfig::default()
        .with_slot_key(args.slot)
        .with_capacity(args.capacity);
    let storage = FileStorage::new(&args.data_dir, args.fsync);
    debug!("store em {:?} com {config:?}", storage.dir());
    let store = RecentlyViewed::with_config(storage, config);

    match args.command {
        Cmd::Record {
            id,
            name,
            image,
            price,
            rating,
            discount,
        } => {
            let product = NewProductView {
                id: id.clone(),
                name,
                image,
                price,
                rating,
                discount,
            };
            store.record(product).await?;
            info!("produto {id} registrado");
        }
        Cmd::List { limit, json } => {
            // Leitura estrita: a CLI mostra o erro em vez de uma lista vazia
            let items = store.load(limit).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                println!("{}", format_carousel(&items));
            }
        }
        Cmd::Remove { id } => {
            store.remove(&id).await?;
            info!("produto {id} removido");
        }
        Cmd::Clear => {
            store.clear().await?;
            info!("lista limpa");
        }
    }

    Ok(())
}

/// Formata um card do carrossel em uma linha.
fn format_card(index: usize, product: &ProductView) -> String {
    let mut line = format!(
        "{}) {} [{}]  {}",
        index + 1,
        product.name,
        product.id,
        product.price_label()
    );
    if let Some(badge) = product.discount_badge() {
        line.push_str("  ");
        line.push_str(&badge);
    }
    if let Some(rating) = product.rating_label() {
        line.push_str("  ");
        line.push_str(&rating);
    }
    line
}

fn format_carousel(items: &[ProductView]) -> String {
    if items.is_empty() {
        return "(nenhum produto visto)".to_string();
    }
    let mut lines = vec![CAROUSEL_TITLE.to_string()];
    for (i, product) in items.iter().enumerate() {
        lines.push(format_card(i, product));
    }
    lines.join("\n")
}
