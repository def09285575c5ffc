use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Kinds of room a plan can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RoomType {
    Bedroom,
    Bathroom,
    Kitchen,
    LivingRoom,
    DiningRoom,
    FamilyRoom,
    Office,
    UtilityRoom,
    Laundry,
    Garage,
    Hallway,
    Storage,
    Closet,
    Other,
}

impl RoomType {
    pub const ALL: [RoomType; 14] = [
        RoomType::Bedroom,
        RoomType::Bathroom,
        RoomType::Kitchen,
        RoomType::LivingRoom,
        RoomType::DiningRoom,
        RoomType::FamilyRoom,
        RoomType::Office,
        RoomType::UtilityRoom,
        RoomType::Laundry,
        RoomType::Garage,
        RoomType::Hallway,
        RoomType::Storage,
        RoomType::Closet,
        RoomType::Other,
    ];

    pub fn id(self) -> &'static str {
        match self {
            RoomType::Bedroom => "bedroom",
            RoomType::Bathroom => "bathroom",
            RoomType::Kitchen => "kitchen",
            RoomType::LivingRoom => "living-room",
            RoomType::DiningRoom => "dining-room",
            RoomType::FamilyRoom => "family-room",
            RoomType::Office => "office",
            RoomType::UtilityRoom => "utility-room",
            RoomType::Laundry => "laundry",
            RoomType::Garage => "garage",
            RoomType::Hallway => "hallway",
            RoomType::Storage => "storage",
            RoomType::Closet => "closet",
            RoomType::Other => "other",
        }
    }

    /// Display name used in room labels.
    pub fn label(self) -> &'static str {
        match self {
            RoomType::Bedroom => "Bedroom",
            RoomType::Bathroom => "Bathroom",
            RoomType::Kitchen => "Kitchen",
            RoomType::LivingRoom => "Living Room",
            RoomType::DiningRoom => "Dining Room",
            RoomType::FamilyRoom => "Family Room",
            RoomType::Office => "Office",
            RoomType::UtilityRoom => "Utility",
            RoomType::Laundry => "Laundry",
            RoomType::Garage => "Garage",
            RoomType::Hallway => "Hallway",
            RoomType::Storage => "Storage",
            RoomType::Closet => "Closet",
            RoomType::Other => "Other",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Label for a new room, numbered after the rooms of the same type that
/// already exist: the third bedroom is `Bedroom#3`.
pub fn generate_room_label(room_type: RoomType, existing: &[RoomType]) -> String {
    let count = existing.iter().filter(|t| **t == room_type).count() + 1;
    format!("{}#{}", room_type.label(), count)
}
