use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vitrine::model::{ItemDraft, ItemPatch};
use vitrine::store::ShowcaseStore;
use vitrine::{config, ident, images, output, render, storage};

fn version_string() -> &'static str {
    // `git describe` output when built from a checkout, crate version
    // otherwise (e.g. a crates.io build).
    let describe = env!("GIT_DESCRIBE");
    if describe.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        describe
    }
}

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Collection showcase manager")]
#[command(long_about = "\
Collection showcase manager

Administer a personal collection of showcase items — names, images, tags and
detail blocks — and render it as a static gallery page.

The collection persists through one of two backends, selected in
vitrine.toml:

  local    one JSON blob on disk (default: showcase.json), images embedded
           as data URIs — the blob is the whole collection
  remote   a REST API (one HTTP call per mutation), images uploaded to the
           server

Typical session:

  vitrine gen-config > vitrine.toml
  vitrine meta --title \"Ma Collection\" --description \"Kigurumi et costumes\"
  vitrine add \"Pikachu Premium\" --brand SAZAC --tag Pokémon --tag Hiver
  vitrine image add pikachu-premium photos/front.jpg photos/back.jpg
  vitrine detail add pikachu-premium Caractéristiques
  vitrine build

Items are addressed by id or slug. Run 'vitrine list' to see both.")]
#[command(version = version_string())]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = "vitrine.toml", global = true)]
    config: PathBuf,

    /// Output directory for the generated gallery
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all items in the collection
    List,
    /// Show one item in full (images, detail blocks, ids)
    Show {
        /// Item id or slug
        item: String,
    },
    /// Create a new item
    Add {
        /// Display name (slug is derived from it)
        name: String,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// May be repeated; duplicates are dropped
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Update item fields (omitted fields are kept, empty strings clear)
    Edit {
        /// Item id or slug
        item: String,
        /// New name; regenerates the slug
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        subtitle: Option<String>,
        #[arg(long)]
        brand: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an item and everything it contains
    Remove {
        /// Item id or slug
        item: String,
    },
    /// Replace the collection title and description
    Meta {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Manage item tags
    Tag {
        #[command(subcommand)]
        command: TagCommand,
    },
    /// Manage item images
    Image {
        #[command(subcommand)]
        command: ImageCommand,
    },
    /// Manage item detail blocks
    Detail {
        #[command(subcommand)]
        command: DetailCommand,
    },
    /// Export the collection as JSON (stdout or file)
    Export {
        /// Destination file; stdout when omitted
        path: Option<PathBuf>,
    },
    /// Replace the collection from an exported JSON file
    Import { path: PathBuf },
    /// Render the static gallery page
    Build,
    /// Print a stock vitrine.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum TagCommand {
    /// Add a tag (no-op if already present)
    Add { item: String, tag: String },
    /// Remove a tag by exact value
    Rm { item: String, tag: String },
}

#[derive(Subcommand)]
enum ImageCommand {
    /// Upload files (or directories of files) to an item, sequentially
    Add {
        item: String,
        /// Image files and/or directories to walk
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Detach an image (and delete the server file in remote mode)
    Rm { item: String, image: String },
    /// Set an image's alt text (empty clears it)
    Alt {
        item: String,
        image: String,
        alt: String,
    },
    /// Move an image between display positions, as shown by 'show' (1-based)
    Move {
        item: String,
        from: usize,
        to: usize,
    },
}

#[derive(Subcommand)]
enum DetailCommand {
    /// Add an empty titled block
    Add { item: String, title: String },
    /// Rename a block
    Rename {
        item: String,
        block: String,
        title: String,
    },
    /// Remove a block and its entries
    Rm { item: String, block: String },
    /// Append a label/value entry to a block
    Set {
        item: String,
        block: String,
        label: String,
        value: String,
    },
    /// Update an entry's label and/or value
    Edit {
        item: String,
        block: String,
        entry: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        value: Option<String>,
    },
    /// Remove an entry from a block
    Unset {
        item: String,
        block: String,
        entry: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.config)?;
    let (backend, image_store) = storage::open(&config.storage)?;
    let mut store = ShowcaseStore::new(backend);
    store.load()?;

    match cli.command {
        Command::List => {
            output::print_collection(store.data());
        }
        Command::Show { item } => {
            let item = resolve(&store, &item)?;
            output::print_item(item);
        }
        Command::Add {
            name,
            subtitle,
            brand,
            description,
            tags,
        } => {
            let name = valid_name(&name)?;
            let created = store.create_item(ItemDraft {
                name,
                subtitle,
                brand,
                description,
                tags,
                ..Default::default()
            })?;
            println!("Created {} [{}] ({})", created.name, created.slug, created.id);
        }
        Command::Edit {
            item,
            name,
            subtitle,
            brand,
            description,
        } => {
            let id = resolve(&store, &item)?.id.clone();
            let name = name.map(|n| valid_name(&n)).transpose()?;
            let updated = store.update_item(
                &id,
                ItemPatch {
                    name,
                    subtitle,
                    brand,
                    description,
                    ..Default::default()
                },
            )?;
            println!("Updated {} [{}]", updated.name, updated.slug);
        }
        Command::Remove { item } => {
            let id = resolve(&store, &item)?.id.clone();
            store.delete_item(&id)?;
            println!("Removed {id}");
        }
        Command::Meta { title, description } => {
            store.update_metadata(title, description)?;
            println!("Metadata updated ({})", store.backend_description());
        }
        Command::Tag { command } => match command {
            TagCommand::Add { item, tag } => {
                let id = resolve(&store, &item)?.id.clone();
                if store.add_tag(&id, &tag)? {
                    println!("Tagged '{tag}'");
                } else {
                    println!("Tag '{tag}' already present (or blank)");
                }
            }
            TagCommand::Rm { item, tag } => {
                let id = resolve(&store, &item)?.id.clone();
                if store.remove_tag(&id, &tag)? {
                    println!("Untagged '{tag}'");
                } else {
                    println!("No tag '{tag}' on this item");
                }
            }
        },
        Command::Image { command } => match command {
            ImageCommand::Add { item, paths } => {
                let id = resolve(&store, &item)?.id.clone();
                let files = images::collect_image_paths(&paths);
                if files.is_empty() {
                    return Err("no image files found in the given paths".into());
                }
                let base = config.images.position_base;

                // Sequential batch: each file succeeds or fails on its own.
                let mut results: Vec<(String, Result<u32, String>)> = Vec::new();
                for path in files {
                    let filename = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    let outcome = upload_one(
                        &mut store,
                        image_store.as_ref(),
                        &id,
                        &path,
                        &filename,
                        base,
                    );
                    results.push((filename, outcome));
                }
                output::print_upload_report(&results);
            }
            ImageCommand::Rm { item, image } => {
                let id = resolve(&store, &item)?.id.clone();
                let Some(attached) = store.get_image(&id, &image) else {
                    println!("No image '{image}' on this item");
                    return Ok(());
                };
                // Server-side cleanup first: if it fails, the item is
                // left untouched.
                let attached = attached.clone();
                image_store.delete(&attached)?;
                store.remove_image(&id, &image)?;
                println!("Removed image {image}");
            }
            ImageCommand::Alt { item, image, alt } => {
                let id = resolve(&store, &item)?.id.clone();
                store.set_image_alt(&id, &image, &alt)?;
                println!("Alt text updated");
            }
            ImageCommand::Move { item, from, to } => {
                let id = resolve(&store, &item)?.id.clone();
                store.move_image(
                    &id,
                    from.saturating_sub(1),
                    to.saturating_sub(1),
                    config.images.position_base,
                )?;
                println!("Image moved");
            }
        },
        Command::Detail { command } => match command {
            DetailCommand::Add { item, title } => {
                let id = resolve(&store, &item)?.id.clone();
                let block = store.add_detail_block(&id, &title)?;
                println!("Added block '{}' ({})", block.title, block.id);
            }
            DetailCommand::Rename { item, block, title } => {
                let id = resolve(&store, &item)?.id.clone();
                store.rename_detail_block(&id, &block, &title)?;
                println!("Block renamed");
            }
            DetailCommand::Rm { item, block } => {
                let id = resolve(&store, &item)?.id.clone();
                if store.remove_detail_block(&id, &block)? {
                    println!("Removed block {block}");
                } else {
                    println!("No block '{block}' on this item");
                }
            }
            DetailCommand::Set {
                item,
                block,
                label,
                value,
            } => {
                let id = resolve(&store, &item)?.id.clone();
                let entry = store.add_detail_entry(&id, &block, &label, &value)?;
                println!("Added '{}: {}' ({})", entry.label, entry.value, entry.id);
            }
            DetailCommand::Edit {
                item,
                block,
                entry,
                label,
                value,
            } => {
                let id = resolve(&store, &item)?.id.clone();
                store.update_detail_entry(
                    &id,
                    &block,
                    &entry,
                    label.as_deref(),
                    value.as_deref(),
                )?;
                println!("Entry updated");
            }
            DetailCommand::Unset { item, block, entry } => {
                let id = resolve(&store, &item)?.id.clone();
                if store.remove_detail_entry(&id, &block, &entry)? {
                    println!("Removed entry {entry}");
                } else {
                    println!("No entry '{entry}' in that block");
                }
            }
        },
        Command::Export { path } => {
            let json = store.export_data()?;
            match path {
                Some(path) => {
                    fs::write(&path, &json)?;
                    println!("Exported {} items to {}", store.data().items.len(), path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Import { path } => {
            let text = fs::read_to_string(&path)?;
            store.import_data(&text)?;
            println!(
                "Imported {} items ({})",
                store.data().items.len(),
                store.backend_description()
            );
        }
        Command::Build => {
            let page = render::build(store.data(), &config, &cli.output)?;
            println!(
                "Gallery with {} items generated at {}",
                store.data().items.len(),
                page.display()
            );
        }
        // Handled before backend setup; nothing to do here.
        Command::GenConfig => {}
    }

    Ok(())
}

/// Resolve an item argument (id or slug) or fail with a listing hint.
fn resolve<'a>(
    store: &'a ShowcaseStore,
    key: &str,
) -> Result<&'a vitrine::model::ShowcaseItem, String> {
    store
        .resolve(key)
        .ok_or_else(|| format!("no item matching '{key}' — try 'vitrine list'"))
}

/// Names must survive slug generation; the store itself does not guard this.
fn valid_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() || ident::generate_slug(name).is_empty() {
        return Err("item name must contain at least one letter or digit".to_string());
    }
    Ok(name.to_string())
}

/// Read, upload and attach one file; errors come back as display strings
/// for the batch report.
fn upload_one(
    store: &mut ShowcaseStore,
    image_store: &dyn images::ImageStore,
    item_id: &str,
    path: &std::path::Path,
    filename: &str,
    base: u32,
) -> Result<u32, String> {
    let bytes = fs::read(path).map_err(|e| e.to_string())?;
    let existing = store
        .get_item(item_id)
        .map(|item| item.images.clone())
        .ok_or_else(|| format!("item {item_id} disappeared"))?;
    let image = images::process_upload(image_store, &existing, &bytes, filename, base)
        .map_err(|e| e.to_string())?;
    let position = image.position;
    store.add_image(item_id, image).map_err(|e| e.to_string())?;
    Ok(position)
}
