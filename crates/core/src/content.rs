use serde::{Deserialize, Serialize};

use crate::types::VisualId;

pub mod keys {
    pub const ITEM_BLOBFISH: &str = "item_blobfish";
    pub const ITEM_AXOLOTL: &str = "item_axolotl";
    pub const ITEM_CAPYBARA: &str = "item_capybara";
    pub const ITEM_RED_PANDA: &str = "item_red_panda";
    pub const ITEM_SHIBA: &str = "item_shiba";
    pub const ITEM_FROG: &str = "item_frog";
    pub const ITEM_PENGUIN: &str = "item_penguin";
    pub const ITEM_OTTER: &str = "item_otter";
    pub const ITEM_HEDGEHOG: &str = "item_hedgehog";
    pub const ITEM_MOTH: &str = "item_moth";
    pub const ITEM_VTUBER: &str = "item_vtuber";

    pub const ITEM_GOLDEN_AXOLOTL: &str = "item_golden_axolotl";
    pub const ITEM_GOLDEN_SHIBA: &str = "item_golden_shiba";

    pub const ITEM_KNOCKOFF_FROG: &str = "item_knockoff_frog";
    pub const ITEM_KNOCKOFF_PENGUIN: &str = "item_knockoff_penguin";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemTier {
    Normal,
    Rare,
    Flawed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tier: ItemTier,
    pub base_score: u32,
    pub base_price: u32,
    /// Drawing this item claims the reserved signature booth visual, once per run.
    pub signature: bool,
}

impl ItemDef {
    pub fn full_description(&self) -> String {
        match self.tier {
            ItemTier::Normal => self.description.clone(),
            ItemTier::Rare => format!("{}\nThis one is golden! A rare find!", self.description),
            ItemTier::Flawed => format!(
                "{}\nThis one is a weird-looking knock-off! Fortunately it's rare!",
                self.description
            ),
        }
    }
}

/// Number of interchangeable options for each randomized part of a booth's look.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoothLookOptions {
    pub body_materials: u32,
    pub top_materials: u32,
    pub side_materials: u32,
    /// Merchant sprite 0 is the signature merchant.
    pub merchants: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPack {
    pub normal_items: Vec<ItemDef>,
    pub rare_items: Vec<ItemDef>,
    pub flawed_items: Vec<ItemDef>,
    pub empty_booth_visuals: Vec<VisualId>,
    pub prize_booth_visuals: Vec<VisualId>,
    pub utility_booth_visuals: Vec<VisualId>,
    pub signature_booth_visual: Option<VisualId>,
    /// Indexed by the 2-bit adjacency variant of a wall segment.
    pub wall_visuals: [VisualId; 4],
    pub booth_look: BoothLookOptions,
}

impl ContentPack {
    pub fn items_of(&self, tier: ItemTier) -> &[ItemDef] {
        match tier {
            ItemTier::Normal => &self.normal_items,
            ItemTier::Rare => &self.rare_items,
            ItemTier::Flawed => &self.flawed_items,
        }
    }
}

impl Default for ContentPack {
    fn default() -> Self {
        let normal = |id: &str, name: &str, description: &str, signature: bool| ItemDef {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            tier: ItemTier::Normal,
            base_score: 100,
            base_price: 20,
            signature,
        };
        let rare = |id: &str, name: &str| ItemDef {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("A shiny {}.", name.to_lowercase()),
            tier: ItemTier::Rare,
            base_score: 500,
            base_price: 60,
            signature: false,
        };
        let flawed = |id: &str, name: &str| ItemDef {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("Something is off about this {}.", name.to_lowercase()),
            tier: ItemTier::Flawed,
            base_score: 300,
            base_price: 10,
            signature: false,
        };

        Self {
            normal_items: vec![
                normal(keys::ITEM_BLOBFISH, "Blobfish", "Squishy and proud of it.", false),
                normal(keys::ITEM_AXOLOTL, "Axolotl", "Smiles no matter what.", false),
                normal(keys::ITEM_CAPYBARA, "Capybara", "Everyone's friend.", false),
                normal(keys::ITEM_RED_PANDA, "Red Panda", "Fluffy tail included.", false),
                normal(keys::ITEM_SHIBA, "Shiba", "Much plush. Very soft.", false),
                normal(keys::ITEM_FROG, "Frog", "Sits on a tiny lily pad.", false),
                normal(keys::ITEM_PENGUIN, "Penguin", "Dressed for the occasion.", false),
                normal(keys::ITEM_OTTER, "Otter", "Holds hands while sleeping.", false),
                normal(keys::ITEM_HEDGEHOG, "Hedgehog", "Not actually spiky.", false),
                normal(keys::ITEM_MOTH, "Moth", "Loves the booth lights.", false),
                normal(keys::ITEM_VTUBER, "Streamer Mascot", "Only sold at one booth.", true),
            ],
            rare_items: vec![
                rare(keys::ITEM_GOLDEN_AXOLOTL, "Golden Axolotl"),
                rare(keys::ITEM_GOLDEN_SHIBA, "Golden Shiba"),
            ],
            flawed_items: vec![
                flawed(keys::ITEM_KNOCKOFF_FROG, "Knock-off Frog"),
                flawed(keys::ITEM_KNOCKOFF_PENGUIN, "Knock-off Penguin"),
            ],
            empty_booth_visuals: vec![VisualId(0), VisualId(1), VisualId(2)],
            prize_booth_visuals: vec![VisualId(10), VisualId(11)],
            utility_booth_visuals: vec![VisualId(20)],
            signature_booth_visual: Some(VisualId(30)),
            wall_visuals: [VisualId(40), VisualId(41), VisualId(42), VisualId(43)],
            booth_look: BoothLookOptions {
                body_materials: 4,
                top_materials: 3,
                side_materials: 3,
                merchants: 6,
            },
        }
    }
}
