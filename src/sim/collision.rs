//! Per-frame collision evaluation
//!
//! Stateless: reads the ship, projectile and invader sets, removes what was
//! destroyed, and reports the outcome. Scoring and life handling happen in
//! the state machine.

use super::entity::{Invader, Projectile, Ship};
use super::rect::Rect;

/// A projectile that struck one or more invaders this frame
#[derive(Debug, Clone)]
pub struct ProjectileHit {
    pub projectile: Projectile,
    /// Every invader this projectile overlapped (at least one)
    pub invaders: Vec<Invader>,
}

/// Everything the collision pass found, in evaluation order
#[derive(Debug, Clone, Default)]
pub struct CollisionReport {
    pub hits: Vec<ProjectileHit>,
    pub ship_hit: bool,
    pub reached_bottom: bool,
}

impl CollisionReport {
    /// Total invaders destroyed this frame
    pub fn invaders_destroyed(&self) -> usize {
        self.hits.iter().map(|h| h.invaders.len()).sum()
    }

    /// The ship was struck or the fleet landed
    pub fn life_lost(&self) -> bool {
        self.ship_hit || self.reached_bottom
    }
}

/// Remove every overlapping projectile/invader pair
///
/// Projectiles are resolved in order. A projectile takes every invader it
/// overlaps; an invader already claimed by an earlier projectile is gone and
/// cannot be hit twice. Unmatched entities are left untouched.
pub fn projectiles_vs_invaders(
    projectiles: &mut Vec<Projectile>,
    invaders: &mut Vec<Invader>,
) -> Vec<ProjectileHit> {
    let mut invader_alive = vec![true; invaders.len()];
    let mut matches: Vec<(usize, Vec<usize>)> = Vec::new();

    for (p_idx, projectile) in projectiles.iter().enumerate() {
        let struck: Vec<usize> = invaders
            .iter()
            .enumerate()
            .filter(|(i, inv)| invader_alive[*i] && projectile.rect.intersects(&inv.rect))
            .map(|(i, _)| i)
            .collect();

        if struck.is_empty() {
            continue;
        }
        for &i in &struck {
            invader_alive[i] = false;
        }
        matches.push((p_idx, struck));
    }

    if matches.is_empty() {
        return Vec::new();
    }

    let hits = matches
        .iter()
        .map(|(p_idx, struck)| ProjectileHit {
            projectile: projectiles[*p_idx].clone(),
            invaders: struck.iter().map(|&i| invaders[i].clone()).collect(),
        })
        .collect();

    let mut projectile_alive = vec![true; projectiles.len()];
    for (p_idx, _) in &matches {
        projectile_alive[*p_idx] = false;
    }

    let mut alive = projectile_alive.into_iter();
    projectiles.retain(|_| alive.next().unwrap_or(true));
    let mut alive = invader_alive.into_iter();
    invaders.retain(|_| alive.next().unwrap_or(true));

    hits
}

/// Any invader touching the ship (stops at the first match)
pub fn invader_hits_ship(invaders: &[Invader], ship: &Rect) -> bool {
    invaders.iter().any(|inv| inv.rect.intersects(ship))
}

/// Any invader reaching the bottom of the screen (stops at the first match)
pub fn invader_reached_bottom(invaders: &[Invader], screen_height: f32) -> bool {
    invaders.iter().any(|inv| inv.rect.bottom() >= screen_height)
}

/// Run all three checks in their fixed order
pub fn evaluate(
    ship: &Ship,
    projectiles: &mut Vec<Projectile>,
    invaders: &mut Vec<Invader>,
    screen_height: f32,
) -> CollisionReport {
    let hits = projectiles_vs_invaders(projectiles, invaders);
    let ship_hit = invader_hits_ship(invaders, &ship.rect);
    let reached_bottom = invader_reached_bottom(invaders, screen_height);

    if !hits.is_empty() {
        log::debug!(
            "{} projectile(s) destroyed {} invader(s)",
            hits.len(),
            hits.iter().map(|h| h.invaders.len()).sum::<usize>()
        );
    }

    CollisionReport {
        hits,
        ship_hit,
        reached_bottom,
    }
}
