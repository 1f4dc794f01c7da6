//! Between-level shop. Prices come from `[shop]` in config.toml.

use crate::config::ShopConfig;
use crate::domain::entity::ItemKind;
use super::event::GameEvent;
use super::world::{Phase, WorldState};

pub fn price(shop: &ShopConfig, item: ItemKind) -> u32 {
    match item {
        ItemKind::Shield => shop.shield,
        ItemKind::Sword => shop.sword,
        ItemKind::Pistol => shop.pistol,
        ItemKind::Drill => shop.drill,
    }
}

/// Buy one item with score points. Only while the shop is open.
pub fn buy(world: &mut WorldState, item: ItemKind) -> Option<GameEvent> {
    if world.phase != Phase::LevelComplete { return None; }
    let cost = price(&world.config.shop, item);
    if world.score < cost { return None; }

    world.score -= cost;
    world.inventory.add(item);
    tracing::info!(?item, cost, score = world.score, "item bought");
    Some(GameEvent::ItemBought { item, price: cost })
}
