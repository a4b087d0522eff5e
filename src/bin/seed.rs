//! Load the showroom sample catalog into the database.
//!
//! Runs independently of the server: it opens its own connection (which
//! also bootstraps the schema), clears the products table unless told to
//! keep it, and inserts the four sample slabs the storefront demo expects.

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use showroom_api::models::{Product, Review};
use showroom_api::store::PgProductStore;

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Seed the showroom catalog with sample products")]
#[command(version)]
struct Args {
    #[arg(long, help = "Keep existing products instead of clearing the table first")]
    keep: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let pool = PgProductStore::pool()
        .await
        .context("connecting to the database")?;

    if !args.keep {
        info!("Clearing old data...");
        sqlx::query("DELETE FROM products")
            .execute(pool)
            .await
            .context("clearing products table")?;
    }

    let products = sample_products();
    for product in &products {
        insert_product(pool, product)
            .await
            .with_context(|| format!("inserting {}", product.name))?;
    }

    info!("Seeded {} sample products", products.len());
    Ok(())
}

/// Existing ids are left alone, so seeding with `--keep` is idempotent.
async fn insert_product(pool: &PgPool, product: &Product) -> Result<()> {
    sqlx::query(
        "INSERT INTO products \
         (id, name, category, price, stock, description, origin, finish, images, review_tokens, reviews) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
         ON CONFLICT (id) DO NOTHING",
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.category)
    .bind(product.price)
    .bind(&product.stock)
    .bind(&product.description)
    .bind(&product.origin)
    .bind(&product.finish)
    .bind(Json(&product.images))
    .bind(Json(&product.review_tokens))
    .bind(Json(&product.reviews))
    .execute(pool)
    .await?;
    Ok(())
}

/// The demo inventory. Review dates are stamped at insert time, matching
/// how live reviews get their timestamps.
fn sample_products() -> Vec<Product> {
    vec![
        Product {
            id: 1,
            name: "Italian Carrara White".into(),
            category: "marble".into(),
            price: 12.50,
            stock: "In Stock".into(),
            description: "Classic white marble with soft grey veins, sourced directly from the \
                          Carrara mountains. Perfect for luxury flooring and kitchen countertops."
                .into(),
            origin: "Carrara, Italy".into(),
            finish: "High Gloss Polish".into(),
            images: vec![
                "https://images.unsplash.com/photo-1618221639263-381d62aa55d7?q=80&w=800".into(),
                "https://images.unsplash.com/photo-1599695681064-9475c255f283?q=80&w=600".into(),
                "https://images.unsplash.com/photo-1564013799919-ab600027ffc6?q=80&w=600".into(),
            ],
            review_tokens: vec![],
            reviews: vec![Review::new(
                "Sarah J.".into(),
                5,
                "Absolutely beautiful stone.".into(),
                vec![],
            )],
        },
        Product {
            id: 2,
            name: "Black Galaxy Granite".into(),
            category: "granite".into(),
            price: 18.00,
            stock: "In Stock".into(),
            description: "Deep black granite with natural golden specks that resemble a starry \
                          night sky. Extremely durable and scratch-resistant."
                .into(),
            origin: "Andhra Pradesh, India".into(),
            finish: "Mirror Polish".into(),
            images: vec![
                "https://images.unsplash.com/photo-1600585154340-be6161a56a0c?q=80&w=800".into(),
                "https://images.unsplash.com/photo-1628003758836-84d3b64c015b?q=80&w=600".into(),
                "https://images.unsplash.com/photo-1550989460-0adf9ea622e2?q=80&w=600".into(),
            ],
            review_tokens: vec![],
            reviews: vec![],
        },
        Product {
            id: 3,
            name: "Spanish Beige Crema".into(),
            category: "marble".into(),
            price: 10.50,
            stock: "Low Stock (120 sq.ft left)".into(),
            description: "Warm, creamy beige tones that bring a cozy feel to living rooms. Known \
                          for its uniform texture."
                .into(),
            origin: "Alicante, Spain".into(),
            finish: "Satin / Honed".into(),
            images: vec![
                "https://images.unsplash.com/photo-1604147495798-57beb5d6af73?q=80&w=800".into(),
                "https://images.unsplash.com/photo-1616486338812-3dadae4b4f9d?q=80&w=600".into(),
            ],
            review_tokens: vec![],
            reviews: vec![Review::new(
                "Mike Ross".into(),
                4,
                "Good quality, fast delivery.".into(),
                vec![],
            )],
        },
        Product {
            id: 4,
            name: "Matte Grey Bathroom Tiles".into(),
            category: "tiles".into(),
            price: 4.50,
            stock: "In Stock".into(),
            description: "Modern anti-skid ceramic tiles designed specifically for wet areas. \
                          Safety meets style."
                .into(),
            origin: "Local Premium".into(),
            finish: "Matte / Anti-Skid".into(),
            images: vec![
                "https://images.unsplash.com/photo-1595428774223-ef52624120d2?q=80&w=800".into(),
                "https://images.unsplash.com/photo-1584622650111-993a426fbf0a?q=80&w=600".into(),
            ],
            review_tokens: vec![],
            reviews: vec![],
        },
    ]
}
