//! Data-driven game balance
//!
//! Every number that shapes a run lives here. Defaults reproduce the reference
//! game; a JSON file may override any subset of fields.

use serde::{Deserialize, Serialize};

/// Balance values consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_radius: f32,
    /// Displacement per held key per tick
    pub player_speed: f32,
    pub player_health: f32,
    pub player_coins: u32,

    // === Enemies ===
    pub enemy_radius: f32,
    pub enemy_speed: f32,
    pub enemy_health: f32,
    /// Probability of one spawn per tick
    pub spawn_chance: f32,

    // === Bullets ===
    pub bullet_radius: f32,
    pub bullet_speed: f32,

    // === Walls ===
    pub wall_cost: u32,
    pub wall_width: f32,
    pub wall_height: f32,
    pub wall_health: f32,
    /// Wall top-left is placed this far along +x from the player
    pub wall_offset_x: f32,

    // === Storm ===
    pub storm_shrink_rate: f32,
    pub storm_min_radius: f32,
    /// Damage per tick while outside the storm radius
    pub storm_damage: f32,

    // === Damage ===
    /// Per overlapping enemy per tick
    pub contact_damage: f32,
    /// Applied to both enemy and wall per overlapping pair per tick
    pub wall_contact_damage: f32,
    pub bullet_damage: f32,
    pub bullet_wall_damage: f32,

    // === Score ===
    pub hit_score: u64,
    pub kill_bonus: u64,

    // === Debug ===
    pub debug_coin_grant: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_radius: 20.0,
            player_speed: 5.0,
            player_health: 100.0,
            player_coins: 0,

            enemy_radius: 15.0,
            enemy_speed: 2.0,
            enemy_health: 50.0,
            spawn_chance: 0.02,

            bullet_radius: 5.0,
            bullet_speed: 10.0,

            wall_cost: 10,
            wall_width: 40.0,
            wall_height: 40.0,
            wall_health: 100.0,
            wall_offset_x: 30.0,

            storm_shrink_rate: 0.02,
            storm_min_radius: 50.0,
            storm_damage: 0.1,

            contact_damage: 0.5,
            wall_contact_damage: 10.0,
            bullet_damage: 20.0,
            bullet_wall_damage: 20.0,

            hit_score: 10,
            kill_bonus: 50,

            debug_coin_grant: 100,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults.
    ///
    /// Negative rates or damages and spawn chances outside `[0, 1]` are
    /// rejected like any other malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        Ok(tuning)
    }

    /// Check the values the simulation relies on being non-negative
    pub fn validate(&self) -> Result<(), String> {
        let non_negative = [
            ("player_radius", self.player_radius),
            ("player_speed", self.player_speed),
            ("enemy_radius", self.enemy_radius),
            ("enemy_speed", self.enemy_speed),
            ("bullet_radius", self.bullet_radius),
            ("bullet_speed", self.bullet_speed),
            ("wall_width", self.wall_width),
            ("wall_height", self.wall_height),
            ("storm_shrink_rate", self.storm_shrink_rate),
            ("storm_min_radius", self.storm_min_radius),
            ("storm_damage", self.storm_damage),
            ("contact_damage", self.contact_damage),
            ("wall_contact_damage", self.wall_contact_damage),
            ("bullet_damage", self.bullet_damage),
            ("bullet_wall_damage", self.bullet_wall_damage),
        ];
        for (name, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(format!("{} must be non-negative, got {}", name, value));
            }
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(format!(
                "spawn_chance must be within [0, 1], got {}",
                self.spawn_chance
            ));
        }
        Ok(())
    }

    /// Tuning with spawning disabled (scripted scenarios, demos)
    pub fn without_spawns() -> Self {
        Self {
            spawn_chance: 0.0,
            ..Self::default()
        }
    }
}
