//! Heuristic position evaluation.
//!
//! Evaluates a board position from a given power's perspective using
//! handcrafted features: SC count, unit proximity, defensive coverage,
//! threat/defense balance, and solo threat detection.
//!
//! Design: all hot-path evaluation functions operate on fixed-size arrays
//! indexed by `Province as usize` and `Power as usize` -- no heap allocation.
//! The BFS distance matrices are computed once via `LazyLock` and reused.

use std::collections::VecDeque;
use std::sync::LazyLock;

use crate::board::adjacency::ADJACENCIES;
use crate::board::province::{
    Coast, Power, Province, ALL_POWERS, ALL_PROVINCES, PROVINCE_COUNT, SUPPLY_CENTER_COUNT,
};
use crate::board::state::{BoardState, Season};
use crate::board::unit::UnitType;

/// Pre-computed BFS distance matrix between all province pairs.
struct DistMatrix {
    dist: Box<[i16; PROVINCE_COUNT * PROVINCE_COUNT]>,
    sc_indices: [u8; SUPPLY_CENTER_COUNT],
}

static ARMY_DIST: LazyLock<DistMatrix> = LazyLock::new(|| build_dist_matrix(false));
static FLEET_DIST: LazyLock<DistMatrix> = LazyLock::new(|| build_dist_matrix(true));

/// Builds a BFS distance matrix using either army or fleet adjacencies.
fn build_dist_matrix(fleet: bool) -> DistMatrix {
    let mut dist = vec![-1i16; PROVINCE_COUNT * PROVINCE_COUNT];

    for i in 0..PROVINCE_COUNT {
        dist[i * PROVINCE_COUNT + i] = 0;
    }

    let mut queue = VecDeque::with_capacity(PROVINCE_COUNT);

    for src in 0..PROVINCE_COUNT {
        queue.clear();
        queue.push_back((src, 0i16));

        while let Some((cur, d)) = queue.pop_front() {
            let cur_prov = ALL_PROVINCES[cur];
            for adj in ADJACENCIES.iter() {
                if adj.from != cur_prov {
                    continue;
                }
                if fleet && !adj.fleet_ok {
                    continue;
                }
                if !fleet && !adj.army_ok {
                    continue;
                }
                let to_idx = adj.to as usize;
                if dist[src * PROVINCE_COUNT + to_idx] == -1 {
                    dist[src * PROVINCE_COUNT + to_idx] = d + 1;
                    queue.push_back((to_idx, d + 1));
                }
            }
        }
    }

    let mut sc_indices = [0u8; SUPPLY_CENTER_COUNT];
    let mut sc_count = 0;
    for (i, p) in ALL_PROVINCES.iter().enumerate() {
        if p.is_supply_center() {
            sc_indices[sc_count] = i as u8;
            sc_count += 1;
        }
    }
    debug_assert_eq!(sc_count, SUPPLY_CENTER_COUNT);

    let boxed: Box<[i16; PROVINCE_COUNT * PROVINCE_COUNT]> =
        dist.into_boxed_slice().try_into().unwrap();
    DistMatrix {
        dist: boxed,
        sc_indices,
    }
}

impl DistMatrix {
    #[inline]
    #[cfg(test)]
    fn distance(&self, from: Province, to: Province) -> i16 {
        self.dist[from as usize * PROVINCE_COUNT + to as usize]
    }
}

/// Returns the distance from a province to the nearest unowned SC,
/// using the appropriate distance matrix for the unit type.
#[inline]
fn nearest_unowned_sc_dist(
    province: Province,
    power: Power,
    state: &BoardState,
    is_fleet: bool,
) -> i16 {
    let dm = if is_fleet { &*FLEET_DIST } else { &*ARMY_DIST };
    let pi = province as usize;
    let mut best: i16 = -1;

    for &sci in dm.sc_indices.iter() {
        if state.sc_owner[sci as usize] == Some(power) {
            continue;
        }
        let d = dm.dist[pi * PROVINCE_COUNT + sci as usize];
        if d < 0 {
            continue;
        }
        if best < 0 || d < best {
            best = d;
        }
    }
    best
}

/// Returns true if the given unit can reach the target in one move.
#[inline]
fn unit_can_reach(
    unit_prov: Province,
    unit_coast: Coast,
    unit_type: UnitType,
    target: Province,
) -> bool {
    let is_fleet = unit_type == UnitType::Fleet;
    for adj in ADJACENCIES.iter() {
        if adj.from != unit_prov || adj.to != target {
            continue;
        }
        if is_fleet && !adj.fleet_ok {
            continue;
        }
        if !is_fleet && !adj.army_ok {
            continue;
        }
        if unit_coast != Coast::None
            && adj.from_coast != Coast::None
            && adj.from_coast != unit_coast
        {
            continue;
        }
        return true;
    }
    false
}

/// Counts enemy units that can reach the given province in 1 move.
#[inline]
fn province_threat(province: Province, power: Power, state: &BoardState) -> i32 {
    let mut count = 0i32;
    for (i, unit_opt) in state.units.iter().enumerate() {
        if let Some((p, ut)) = unit_opt {
            if *p == power {
                continue;
            }
            let prov = ALL_PROVINCES[i];
            let coast = state.fleet_coast[i].unwrap_or(Coast::None);
            if unit_can_reach(prov, coast, *ut, province) {
                count += 1;
            }
        }
    }
    count
}

/// Counts own units (excluding the one already at the province) that can reach it in 1 move.
#[inline]
fn province_defense(province: Province, power: Power, state: &BoardState) -> i32 {
    let mut count = 0i32;
    for (i, unit_opt) in state.units.iter().enumerate() {
        if let Some((p, ut)) = unit_opt {
            if *p != power {
                continue;
            }
            let prov = ALL_PROVINCES[i];
            if prov == province {
                continue;
            }
            let coast = state.fleet_coast[i].unwrap_or(Coast::None);
            if unit_can_reach(prov, coast, *ut, province) {
                count += 1;
            }
        }
    }
    count
}

/// Counts how many SCs a power owns.
#[inline]
fn count_scs(state: &BoardState, power: Power) -> i32 {
    let mut count = 0i32;
    for owner in state.sc_owner.iter() {
        if *owner == Some(power) {
            count += 1;
        }
    }
    count
}

/// Returns true if a power has any units on the board.
#[inline]
fn power_has_units(state: &BoardState, power: Power) -> bool {
    state
        .units
        .iter()
        .any(|u| matches!(u, Some((p, _)) if *p == power))
}

/// Evaluates a board position for the given power. Returns a score in centipawn-like units.
///
/// Components:
/// - Supply center count with non-linear bonus near victory
/// - Unit count bonus
/// - Pending SC capture bonus (units sitting on unowned SCs)
/// - SC proximity bonus for each unit
/// - Vulnerability penalty for under-defended owned SCs
/// - Enemy strength penalty (total + strongest enemy bonus)
/// - Elimination bonus (fewer alive enemies)
pub fn evaluate(power: Power, state: &BoardState) -> f32 {
    let mut score: f32 = 0.0;

    let own_scs = count_scs(state, power);
    score += 10.0 * own_scs as f32;

    if own_scs > 10 {
        let bonus = (own_scs - 10) as f32;
        score += bonus * bonus * 2.0;
    }

    if own_scs >= 18 {
        score += 500.0;
    }

    let pending_bonus: f32 = if state.season == Season::Fall {
        12.0
    } else {
        8.0
    };

    let mut unit_count: i32 = 0;
    for (i, unit_opt) in state.units.iter().enumerate() {
        if let Some((p, ut)) = unit_opt {
            if *p != power {
                continue;
            }
            unit_count += 1;

            let prov = ALL_PROVINCES[i];

            if prov.is_supply_center() && state.sc_owner[i] != Some(power) {
                score += pending_bonus;
            }

            let is_fleet = *ut == UnitType::Fleet;
            let dist = nearest_unowned_sc_dist(prov, power, state, is_fleet);
            if dist == 0 {
                score += 5.0;
            } else if dist > 0 {
                score += 3.0 / dist as f32;
            }
        }
    }
    score += 2.0 * unit_count as f32;

    for (i, owner_opt) in state.sc_owner.iter().enumerate() {
        if *owner_opt != Some(power) {
            continue;
        }
        let prov = ALL_PROVINCES[i];
        if !prov.is_supply_center() {
            continue;
        }
        let threat = province_threat(prov, power, state);
        let defense = province_defense(prov, power, state);
        if threat > defense {
            let mut penalty = 2.0 * (threat - defense) as f32;
            if own_scs >= 16 {
                penalty *= 0.2;
            } else if own_scs >= 14 {
                penalty *= 0.5;
            }
            score -= penalty;
        }
    }

    let mut total_enemy: i32 = 0;
    let mut max_enemy: i32 = 0;
    let mut alive_enemies: i32 = 0;
    for &p in ALL_POWERS.iter() {
        if p == power {
            continue;
        }
        let sc = count_scs(state, p);
        total_enemy += sc;
        if sc > max_enemy {
            max_enemy = sc;
        }
        if sc > 0 && power_has_units(state, p) {
            alive_enemies += 1;
        }
    }
    score -= total_enemy as f32;
    score -= 0.5 * max_enemy as f32;

    let eliminated_bonus = (6 - alive_enemies) as f32 * 8.0;
    score += eliminated_bonus;

    score
}

/// Evaluates the position for all 7 powers.
pub fn evaluate_all(state: &BoardState) -> [f32; 7] {
    let mut scores = [0.0f32; 7];
    for (i, &p) in ALL_POWERS.iter().enumerate() {
        scores[i] = evaluate(p, state);
    }
    scores
}
