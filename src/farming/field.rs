//! Farm grid bookkeeping: planting, watering and collecting plants.

use std::fmt;

use crate::shared::*;

/// Why a planting attempt did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlantBlocked {
    NoSeeds(SeedKind),
    NotFarmland,
    Occupied,
    UnknownSeed(SeedKind),
}

impl fmt::Display for PlantBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlantBlocked::NoSeeds(kind) => write!(f, "no {:?} seeds left", kind),
            PlantBlocked::NotFarmland => write!(f, "not standing on farmland"),
            PlantBlocked::Occupied => write!(f, "cell already planted"),
            PlantBlocked::UnknownSeed(kind) => write!(f, "no seed definition for {:?}", kind),
        }
    }
}

impl FarmField {
    /// Fresh field with the layout's plots as farmland and nothing planted.
    pub fn from_layout(layout: &FarmLayout) -> Self {
        let mut field = FarmField::default();
        for &(min_x, min_y, max_x, max_y) in &layout.plots {
            for x in min_x..=max_x {
                for y in min_y..=max_y {
                    field.farmland.insert((x, y));
                }
            }
        }
        field
    }

    pub fn is_farmland(&self, cell: (i32, i32)) -> bool {
        self.farmland.contains(&cell)
    }

    pub fn plant_at(&self, cell: (i32, i32)) -> Option<&PlantedCrop> {
        self.plants.get(&cell)
    }

    pub fn is_plantable(&self, cell: (i32, i32)) -> bool {
        self.is_farmland(cell) && !self.plants.contains_key(&cell)
    }

    /// Place a seedling of `def` at `cell`.
    pub fn plant(&mut self, cell: (i32, i32), def: &SeedDef) -> Result<(), PlantBlocked> {
        if !self.is_farmland(cell) {
            return Err(PlantBlocked::NotFarmland);
        }
        if self.plants.contains_key(&cell) {
            return Err(PlantBlocked::Occupied);
        }
        self.plants.insert(
            cell,
            PlantedCrop {
                kind: def.kind,
                stage: PlantStage::Seedling,
                sprite_index: def.seedling_sprite,
            },
        );
        Ok(())
    }

    /// Turn every seedling that matches a catalogue seed into that seed's
    /// watered plant. Seeds are tried in catalogue order. Returns how many
    /// plants changed.
    pub fn upgrade_seedlings(&mut self, catalogue: &SeedCatalogue) -> usize {
        let mut upgraded = 0;
        for crop in self.plants.values_mut() {
            let Some(def) = catalogue.seeds.iter().find(|def| matches_seed(crop, def)) else {
                continue;
            };
            *crop = PlantedCrop {
                kind: def.kind,
                stage: PlantStage::Watered,
                sprite_index: def.watered_sprite,
            };
            upgraded += 1;
        }
        upgraded
    }

    /// Remove and return the plant at `cell` if it has been watered.
    /// Seedlings stay in the ground.
    pub fn collect_watered(&mut self, cell: (i32, i32)) -> Option<PlantedCrop> {
        match self.plants.get(&cell) {
            Some(crop) if crop.stage == PlantStage::Watered => self.plants.remove(&cell),
            _ => None,
        }
    }
}

/// A planted seedling counts as `def`'s seed if it was planted from it, or
/// if it shows the same seedling sprite (a re-skinned seed).
pub fn matches_seed(crop: &PlantedCrop, def: &SeedDef) -> bool {
    if crop.stage != PlantStage::Seedling {
        return false;
    }
    crop.kind == def.kind || crop.sprite_index == def.seedling_sprite
}

/// Plant the seed in `kind`'s slot at `cell`, spending one seed on success.
pub fn try_plant(
    field: &mut FarmField,
    inventory: &mut SeedInventory,
    catalogue: &SeedCatalogue,
    cell: (i32, i32),
    kind: SeedKind,
) -> Result<(), PlantBlocked> {
    let def = catalogue.get(kind).ok_or(PlantBlocked::UnknownSeed(kind))?;
    if !inventory.has(kind) {
        return Err(PlantBlocked::NoSeeds(kind));
    }
    field.plant(cell, def)?;
    inventory.take(kind);
    Ok(())
}
