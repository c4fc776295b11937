use crate::shared::*;

/// The three plantable seeds, in hotkey order.
///
/// Sprite indices refer to the plant atlas: seedlings use the first row
/// (0–2), watered plants the second row (6–8).
pub fn default_seed_catalogue() -> SeedCatalogue {
    SeedCatalogue {
        seeds: vec![
            SeedDef {
                kind: SeedKind::Turnip,
                name: "Turnip".into(),
                seedling_sprite: 0,
                watered_sprite: 6,
                color: (0.85, 0.80, 0.95),
            },
            SeedDef {
                kind: SeedKind::Pepper,
                name: "Pepper".into(),
                seedling_sprite: 1,
                watered_sprite: 7,
                color: (0.90, 0.25, 0.15),
            },
            SeedDef {
                kind: SeedKind::Melon,
                name: "Melon".into(),
                seedling_sprite: 2,
                watered_sprite: 8,
                color: (0.35, 0.75, 0.30),
            },
        ],
    }
}
