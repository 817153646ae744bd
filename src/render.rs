//! Gallery page generation.
//!
//! The public face of a collection: the `build` command renders the whole
//! showcase as one static `index.html`. Items appear in collection order,
//! each anchored by its slug so the header navigation can deep-link.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating:
//! templates are type-safe Rust code with automatic XSS escaping, so item
//! names and tags coming from the collection can never break the page.
//! The item description supports markdown (via pulldown-cmark); all other
//! fields render as plain text.
//!
//! CSS is embedded at compile time (`static/gallery.css`) with theme colors
//! injected as CSS custom properties from `vitrine.toml`.

use crate::config::{self, ShowcaseConfig};
use crate::model::{DetailBlock, ShowcaseData, ShowcaseItem};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const CSS_STATIC: &str = include_str!("../static/gallery.css");

/// Render the gallery into `output_dir` and return the page path.
pub fn build(
    data: &ShowcaseData,
    config: &ShowcaseConfig,
    output_dir: &Path,
) -> Result<PathBuf, RenderError> {
    let color_css = config::generate_color_css(&config.theme);
    let css = format!("{color_css}\n\n{CSS_STATIC}");

    fs::create_dir_all(output_dir)?;
    let page = render_index(data, &css);
    let path = output_dir.join("index.html");
    fs::write(&path, page.into_string())?;
    Ok(path)
}

/// The full gallery document. Public for rendering tests.
pub fn render_index(data: &ShowcaseData, css: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (data.title) }
                style { (PreEscaped(css)) }
            }
            body {
                header.site-header {
                    h1 { (data.title) }
                    nav.site-nav {
                        @for item in &data.items {
                            a href={ "#" (item.slug) } { (item.name) }
                        }
                    }
                }
                main.container {
                    @if let Some(description) = &data.description {
                        div.hero {
                            (markdown(description))
                            p.item-count {
                                @if data.items.len() == 1 {
                                    "1 item in the collection"
                                } @else {
                                    (data.items.len()) " items in the collection"
                                }
                            }
                        }
                    }
                    @for item in &data.items {
                        (render_item(item))
                    }
                    footer.site-footer {
                        p { "Generated " (data.generated_at.format("%Y-%m-%d")) }
                    }
                }
            }
        }
    }
}

fn render_item(item: &ShowcaseItem) -> Markup {
    html! {
        section.item id=(item.slug) {
            header.item-header {
                @if let Some(brand) = &item.brand {
                    p.item-brand { (brand) }
                }
                h2 { (item.name) }
                @if let Some(subtitle) = &item.subtitle {
                    p.item-subtitle { (subtitle) }
                }
            }
            @if !item.tags.is_empty() {
                div.tags {
                    @for tag in &item.tags {
                        span.tag { (tag) }
                    }
                }
            }
            @if !item.images.is_empty() {
                div.item-images {
                    @for image in item.sorted_images() {
                        img src=(image.src)
                            alt=(image.alt.as_deref().unwrap_or(&item.name))
                            loading="lazy";
                    }
                }
            }
            @if let Some(description) = &item.description {
                div.item-description { (markdown(description)) }
            }
            @if !item.details.is_empty() {
                div.detail-blocks {
                    @for block in &item.details {
                        (render_detail_block(block))
                    }
                }
            }
        }
    }
}

fn render_detail_block(block: &DetailBlock) -> Markup {
    html! {
        div.detail-block {
            h3 { (block.title) }
            dl {
                @for entry in &block.items {
                    dt { (entry.label) }
                    dd { (entry.value) }
                }
            }
        }
    }
}

/// Markdown to trusted HTML. Only collection descriptions go through this;
/// they are the owner's own content, not untrusted input.
fn markdown(text: &str) -> Markup {
    let parser = Parser::new(text);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    PreEscaped(out)
}
