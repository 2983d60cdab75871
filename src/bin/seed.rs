use card_catalog_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{
        products::{ProductPayload, RatingInput},
        taxonomy::{CategoryPayload, CollectionPayload, RarityPayload, StatusPayload},
    },
    entity::Categories,
    services::{
        category_service, collection_service, product_service, rarity_service, status_service,
    },
    state::AppState,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{EntityTrait, PaginatorTrait};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;
    let state = AppState { orm };

    if Categories::find().count(&state.orm).await? > 0 {
        println!("Catalog already seeded, nothing to do");
        return Ok(());
    }

    let fire = category(&state, "Fire", "Fire type cards").await?;
    let water = category(&state, "Water", "Water type cards").await?;

    let base_set = collection_service::create_collection(
        &state,
        CollectionPayload {
            name: "Base Set".into(),
            release_date: NaiveDate::from_ymd_opt(1999, 1, 9),
            description: Some("The first expansion".into()),
            code: Some("BS".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .map(|c| c.id)
    .unwrap_or_default();

    let rare = rarity(&state, "Rare", "gold").await?;
    let common = rarity(&state, "Common", "gray").await?;
    let available = status(&state, "NEW", "New").await?;
    let used = status(&state, "USED", "Used").await?;

    let cards = [
        ("Charizard", 4, "50.00", "100.00", 3, fire, rare, available),
        ("Charmander", 46, "2.50", "2.50", 20, fire, common, available),
        ("Blastoise", 2, "40.00", "60.00", 2, water, rare, used),
        ("Squirtle", 63, "3.00", "4.00", 15, water, common, used),
    ];

    for (name, card_number, price, original, stock, category_id, rarity_id, status_id) in cards {
        product_service::create_product(
            &state,
            ProductPayload {
                name: Some(name.into()),
                price: Some(price.parse::<Decimal>()?),
                original_price: Some(original.parse::<Decimal>()?),
                stock: Some(stock),
                card_number: Some(card_number),
                category_id: Some(category_id),
                collection_id: Some(base_set),
                rarity_id: Some(rarity_id),
                status_id: Some(status_id),
                ratings: Some(vec![RatingInput {
                    customer_name: "Ash".into(),
                    score: Some(5),
                    comment: Some("Great condition".into()),
                }]),
                ..Default::default()
            },
        )
        .await?;
    }

    println!("Seed completed: {} cards", cards.len());
    Ok(())
}

async fn category(state: &AppState, name: &str, description: &str) -> anyhow::Result<i32> {
    let resp = category_service::create_category(
        state,
        CategoryPayload {
            name: name.into(),
            description: Some(description.into()),
            image_url: None,
        },
    )
    .await?;
    Ok(resp.data.map(|c| c.id).unwrap_or_default())
}

async fn rarity(state: &AppState, name: &str, color: &str) -> anyhow::Result<i32> {
    let resp = rarity_service::create_rarity(
        state,
        RarityPayload {
            name: name.into(),
            color: color.into(),
        },
    )
    .await?;
    Ok(resp.data.map(|r| r.id).unwrap_or_default())
}

async fn status(state: &AppState, code: &str, description: &str) -> anyhow::Result<i32> {
    let resp = status_service::create_status(
        state,
        StatusPayload {
            code: code.into(),
            description: description.into(),
        },
    )
    .await?;
    Ok(resp.data.map(|s| s.id).unwrap_or_default())
}
