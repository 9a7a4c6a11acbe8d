//! Faction standing and the rank ladder.
//!
//! Reputation with each faction runs −100..=100 and influence 0..=100.
//! Rank is a pure function of reputation. The ladder partitions the whole
//! reputation range, so every value maps to exactly one rank.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::stats::{clamp_add, SIGNED_MIN, STAT_MAX, STAT_MIN};

/// Every faction inside the walls. Declaration order is the tie-break order
/// for [`PoliticalStanding::primary_faction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Rebels,
    HellsAngels,
    Comancheros,
    Vikes,
    BlackUhlans,
    WhitePower,
    IslamicGroup,
    AboriginalAlliance,
    StaffCorruptionRing,
    InmateCouncil,
    MedicalStaff,
    Chaplains,
    Educators,
}

impl Faction {
    pub const ALL: [Faction; 13] = [
        Faction::Rebels,
        Faction::HellsAngels,
        Faction::Comancheros,
        Faction::Vikes,
        Faction::BlackUhlans,
        Faction::WhitePower,
        Faction::IslamicGroup,
        Faction::AboriginalAlliance,
        Faction::StaffCorruptionRing,
        Faction::InmateCouncil,
        Faction::MedicalStaff,
        Faction::Chaplains,
        Faction::Educators,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Faction::Rebels => "Rebels MC",
            Faction::HellsAngels => "Hells Angels",
            Faction::Comancheros => "Comancheros",
            Faction::Vikes => "Vikes",
            Faction::BlackUhlans => "Black Uhlans",
            Faction::WhitePower => "White Power",
            Faction::IslamicGroup => "Islamic Brotherhood",
            Faction::AboriginalAlliance => "Aboriginal Alliance",
            Faction::StaffCorruptionRing => "Staff Corruption Ring",
            Faction::InmateCouncil => "Inmate Council",
            Faction::MedicalStaff => "Medical Staff",
            Faction::Chaplains => "Chaplains",
            Faction::Educators => "Educators",
        }
    }
}

/// Eight ranks ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactionRank {
    PublicEnemy,
    Enemy,
    Distrusted,
    Neutral,
    Associate,
    Member,
    Trusted,
    Leader,
}

impl FactionRank {
    pub fn for_reputation(reputation: i32) -> Self {
        match reputation {
            80.. => FactionRank::Leader,
            60..=79 => FactionRank::Trusted,
            40..=59 => FactionRank::Member,
            20..=39 => FactionRank::Associate,
            -20..=19 => FactionRank::Neutral,
            -40..=-21 => FactionRank::Distrusted,
            -60..=-41 => FactionRank::Enemy,
            _ => FactionRank::PublicEnemy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FactionRank::PublicEnemy => "Public Enemy",
            FactionRank::Enemy => "Enemy",
            FactionRank::Distrusted => "Distrusted",
            FactionRank::Neutral => "Neutral",
            FactionRank::Associate => "Associate",
            FactionRank::Member => "Member",
            FactionRank::Trusted => "Trusted",
            FactionRank::Leader => "Leader",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactionStanding {
    reputation: i32,
    influence: i32,
    rank: FactionRank,
}

impl Default for FactionStanding {
    fn default() -> Self {
        Self {
            reputation: 0,
            influence: 0,
            rank: FactionRank::Neutral,
        }
    }
}

impl FactionStanding {
    pub fn reputation(&self) -> i32 {
        self.reputation
    }

    pub fn influence(&self) -> i32 {
        self.influence
    }

    pub fn rank(&self) -> FactionRank {
        self.rank
    }

    /// Apply deltas under clamp and re-derive the rank.
    pub fn apply(&mut self, reputation_delta: i32, influence_delta: i32) -> FactionRank {
        self.reputation = clamp_add(self.reputation, reputation_delta, SIGNED_MIN, STAT_MAX);
        self.influence = clamp_add(self.influence, influence_delta, STAT_MIN, STAT_MAX);
        self.rank = FactionRank::for_reputation(self.reputation);
        self.rank
    }

    /// Re-clamp a loaded standing; the rank always follows reputation.
    pub fn normalize(&mut self) {
        self.apply(0, 0);
    }
}

/// Aggregate over every faction the player has standing with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoliticalStanding {
    pub overall_reputation: i32,
    pub overall_influence: i32,
    pub primary_faction: Option<Faction>,
}

impl PoliticalStanding {
    /// Integer-truncating means over `standings`. The primary faction has
    /// the highest reputation; ties go to the faction declared first.
    pub fn from_standings(standings: &BTreeMap<Faction, FactionStanding>) -> Self {
        if standings.is_empty() {
            return Self::default();
        }
        let count = standings.len() as i32;
        let rep_sum: i32 = standings.values().map(|s| s.reputation).sum();
        let infl_sum: i32 = standings.values().map(|s| s.influence).sum();

        let mut primary: Option<(Faction, i32)> = None;
        // BTreeMap iterates in declaration order; strict `>` keeps the first.
        for (&faction, standing) in standings {
            match primary {
                Some((_, best)) if standing.reputation <= best => {}
                _ => primary = Some((faction, standing.reputation)),
            }
        }

        Self {
            overall_reputation: rep_sum / count,
            overall_influence: infl_sum / count,
            primary_faction: primary.map(|(f, _)| f),
        }
    }
}
