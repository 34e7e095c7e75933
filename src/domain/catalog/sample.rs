// src/domain/catalog/sample.rs
//
// Bundled catalog sample data.
//
// Used as the last-resort source when the remote "list all games"
// endpoint is unreachable or returns nothing. Browsing must keep working
// offline, so these entries are compiled in rather than fetched.

use super::entity::CatalogItem;
use crate::domain::ItemId;

/// Built-in catalog used when no remote data is available.
pub fn sample_catalog() -> Vec<CatalogItem> {
    vec![
        CatalogItem::new(ItemId::new("1"), "Hollow Signal", 19.99)
            .with_genre("Metroidvania")
            .with_image("/images/hollow-signal.jpg")
            .with_rating(4.6)
            .with_platforms(vec!["PC".into(), "Switch".into()]),
        CatalogItem::new(ItemId::new("2"), "Starlane Freighter", 29.99)
            .with_genre("Simulation")
            .with_image("/images/starlane-freighter.jpg")
            .with_rating(4.2)
            .with_platforms(vec!["PC".into()]),
        CatalogItem::new(ItemId::new("3"), "Gravemarch Tactics", 39.99)
            .with_genre("Strategy")
            .with_image("/images/gravemarch-tactics.jpg")
            .with_rating(4.8)
            .with_platforms(vec!["PC".into(), "PS5".into(), "Xbox".into()]),
        CatalogItem::new(ItemId::new("4"), "Pocket Alchemist", 9.99)
            .with_genre("Puzzle")
            .with_image("/images/pocket-alchemist.jpg")
            .with_rating(4.0)
            .with_platforms(vec!["PC".into(), "Switch".into(), "Mobile".into()]),
        CatalogItem::new(ItemId::new("5"), "Redline Horizon", 49.99)
            .with_genre("Racing")
            .with_image("/images/redline-horizon.jpg")
            .with_rating(3.9)
            .with_platforms(vec!["PS5".into(), "Xbox".into()]),
        CatalogItem::new(ItemId::new("6"), "Emberfall Chronicle", 59.99)
            .with_genre("RPG")
            .with_image("/images/emberfall-chronicle.jpg")
            .with_rating(4.7)
            .with_platforms(vec!["PC".into(), "PS5".into()]),
    ]
}
