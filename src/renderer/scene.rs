//! Scene assembly: turns a simulation snapshot into one triangle list
//!
//! Draw order back to front: walls, storm ring, bullets, enemies, player,
//! then the game-over shade.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::Rect;
use crate::settings::QualityPreset;
use crate::sim::{GamePhase, Snapshot};

/// Stroke width of the storm boundary (pixels)
pub const STORM_LINE_WIDTH: f32 = 5.0;

/// Build all vertices for one frame, in field coordinates
pub fn build(snapshot: &Snapshot<'_>, quality: QualityPreset) -> Vec<Vertex> {
    let segments = quality.circle_segments();
    let mut vertices = Vec::new();

    for wall in snapshot.walls {
        vertices.extend(shapes::rect(&wall.rect(), colors::WALL));
    }

    // The storm is large; give it more segments so it reads as round
    vertices.extend(shapes::ring(
        snapshot.storm.center,
        snapshot.storm.radius,
        STORM_LINE_WIDTH,
        colors::STORM,
        segments * 4,
    ));

    for bullet in snapshot.bullets {
        vertices.extend(shapes::circle(bullet.pos, bullet.radius, colors::BULLET, segments / 2));
    }
    for enemy in snapshot.enemies {
        vertices.extend(shapes::circle(enemy.pos, enemy.radius, colors::ENEMY, segments));
    }

    let player = snapshot.player;
    vertices.extend(shapes::circle(player.pos, player.radius, colors::PLAYER, segments));

    if snapshot.phase == GamePhase::Over {
        let field = Rect::new(Vec2::ZERO, Vec2::new(snapshot.width, snapshot.height));
        vertices.extend(shapes::rect(&field, colors::GAME_OVER_SHADE));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;
    use crate::tuning::Tuning;

    fn count_color(vertices: &[Vertex], color: [f32; 4]) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_scene_contains_every_entity() {
        let mut state = GameState::new(800.0, 600.0, Tuning::without_spawns(), 3);
        state.add_enemy(Vec2::new(100.0, 100.0));
        state.add_enemy(Vec2::new(200.0, 100.0));
        state.add_bullet(Vec2::new(300.0, 300.0), Vec2::X);
        state.add_wall(Vec2::new(50.0, 50.0));

        let quality = QualityPreset::Medium;
        let segments = quality.circle_segments() as usize;
        let verts = build(&state.snapshot(), quality);

        assert_eq!(count_color(&verts, colors::ENEMY), 2 * segments * 3);
        assert_eq!(count_color(&verts, colors::PLAYER), segments * 3);
        assert_eq!(count_color(&verts, colors::WALL), 6);
        assert_eq!(count_color(&verts, colors::BULLET), segments / 2 * 3);
        assert_eq!(count_color(&verts, colors::GAME_OVER_SHADE), 0);
    }

    #[test]
    fn test_game_over_shade() {
        let mut state = GameState::new(800.0, 600.0, Tuning::without_spawns(), 3);
        state.phase = GamePhase::Over;
        let verts = build(&state.snapshot(), QualityPreset::Low);
        assert_eq!(count_color(&verts, colors::GAME_OVER_SHADE), 6);
    }
}
