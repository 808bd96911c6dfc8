//! Movement-phase move generation.
//!
//! Enumerates legal hold, move, support, and convoy orders for each
//! unit during a movement phase.

use crate::board::{
    fleet_coasts_to, provinces_adjacent_to, BoardState, Coast, Location, Order, OrderUnit,
    Province, ProvinceType, UnitType, ALL_PROVINCES, PROVINCE_COUNT,
};

/// Returns whether the unit type can occupy the given province type.
fn can_occupy(unit_type: UnitType, prov_type: ProvinceType) -> bool {
    match (unit_type, prov_type) {
        (UnitType::Army, ProvinceType::Sea) => false,
        (UnitType::Fleet, ProvinceType::Land) => false,
        _ => true,
    }
}

/// Returns the coast for a unit at the given province, reading from board state.
fn unit_coast(province: Province, state: &BoardState) -> Coast {
    state.fleet_coast[province as usize].unwrap_or(Coast::None)
}

/// Returns whether a chain of currently fleet-occupied sea provinces connects
/// `src` to `dst` by fleet adjacency, i.e. whether an army at `src` has a
/// *possible* convoy route to `dst` given the fleets on the board right now.
///
/// This is an intent-level check for move generation and validation, not a
/// resolution-time guarantee: it does not require that any of those fleets
/// actually hold a matching `Convoy` order, only that they exist and could be
/// ordered to convoy. Whether the convoy actually succeeds (fleets not cut or
/// dislodged, orders correctly issued) is decided by the resolver.
fn has_possible_convoy_path(src: Province, dst: Province, state: &BoardState) -> bool {
    if src == dst {
        return false;
    }

    let mut visited = [false; PROVINCE_COUNT];
    let mut queue: Vec<Province> = Vec::new();

    for next in provinces_adjacent_to(src, Coast::None, true) {
        if next.province_type() != ProvinceType::Sea {
            continue;
        }
        if !matches!(state.units[next as usize], Some((_, UnitType::Fleet))) {
            continue;
        }
        if !visited[next as usize] {
            visited[next as usize] = true;
            queue.push(next);
        }
    }

    while let Some(cur) = queue.pop() {
        for next in provinces_adjacent_to(cur, Coast::None, true) {
            if next == dst {
                return true;
            }
            if next.province_type() != ProvinceType::Sea {
                continue;
            }
            if visited[next as usize] {
                continue;
            }
            if !matches!(state.units[next as usize], Some((_, UnitType::Fleet))) {
                continue;
            }
            visited[next as usize] = true;
            queue.push(next);
        }
    }

    false
}

/// Destinations `prov` can reach, direct adjacency plus (for an army) any
/// coastal province reachable via a possible convoy path.
fn reachable_destinations(prov: Province, coast: Coast, unit_type: UnitType, state: &BoardState) -> Vec<Province> {
    let is_fleet = unit_type == UnitType::Fleet;
    let mut dests: Vec<Province> = provinces_adjacent_to(prov, coast, is_fleet);

    if unit_type == UnitType::Army {
        for &dest in ALL_PROVINCES.iter() {
            if dest == prov || dests.contains(&dest) {
                continue;
            }
            if dest.province_type() == ProvinceType::Sea {
                continue;
            }
            if has_possible_convoy_path(prov, dest, state) {
                dests.push(dest);
            }
        }
    }

    dests
}

/// Generates all legal movement-phase orders for the unit at the given province.
///
/// Returns an empty vec if no unit exists at that province.
/// The caller is responsible for ensuring this is called during a movement phase.
pub fn legal_orders(province: Province, state: &BoardState) -> Vec<Order> {
    let idx = province as usize;
    let (_power, unit_type) = match state.units[idx] {
        Some(pu) => pu,
        None => return Vec::new(),
    };

    let coast = unit_coast(province, state);
    let is_fleet = unit_type == UnitType::Fleet;
    let unit = OrderUnit {
        unit_type,
        location: Location::with_coast(province, coast),
    };

    let mut orders = Vec::new();

    // Hold is always legal.
    orders.push(Order::Hold { unit });

    // Moves to adjacent provinces, plus (for armies) convoy-reachable ones.
    let move_targets = generate_moves(province, coast, unit_type, is_fleet, state);
    for (dest_prov, dest_coast) in &move_targets {
        orders.push(Order::Move {
            unit,
            dest: Location::with_coast(*dest_prov, *dest_coast),
        });
    }

    // Support hold and support move for every other unit on the board.
    generate_supports(
        province,
        coast,
        unit_type,
        is_fleet,
        unit,
        state,
        &move_targets,
        &mut orders,
    );

    // Convoy orders: fleet in sea province can convoy armies.
    if is_fleet && province.province_type() == ProvinceType::Sea {
        generate_convoys(province, coast, unit, state, &mut orders);
    }

    orders
}

/// Generates (destination_province, destination_coast) pairs for all move targets.
///
/// For an army, this includes both directly adjacent provinces and any
/// coastal province reachable via a possible convoy path through
/// fleet-occupied sea provinces (see `has_possible_convoy_path`).
fn generate_moves(
    province: Province,
    coast: Coast,
    unit_type: UnitType,
    is_fleet: bool,
    state: &BoardState,
) -> Vec<(Province, Coast)> {
    let mut targets = Vec::new();
    let adj = provinces_adjacent_to(province, coast, is_fleet);

    for dest in &adj {
        let dest = *dest;
        let dest_type = dest.province_type();
        if !can_occupy(unit_type, dest_type) {
            continue;
        }

        if is_fleet && dest.has_coasts() {
            let coasts = fleet_coasts_to(province, coast, dest);
            for c in coasts {
                targets.push((dest, c));
            }
        } else {
            targets.push((dest, Coast::None));
        }
    }

    if unit_type == UnitType::Army {
        for &dest in ALL_PROVINCES.iter() {
            if dest == province || adj.contains(&dest) {
                continue;
            }
            if dest.province_type() == ProvinceType::Sea {
                continue;
            }
            if has_possible_convoy_path(province, dest, state) {
                targets.push((dest, Coast::None));
            }
        }
    }

    targets
}

/// Generates support hold and support move orders for the given unit.
fn generate_supports(
    province: Province,
    _coast: Coast,
    _unit_type: UnitType,
    _is_fleet: bool,
    unit: OrderUnit,
    state: &BoardState,
    move_targets: &[(Province, Coast)],
    orders: &mut Vec<Order>,
) {
    // Build set of provinces this unit can move to (for support-move validation).
    let reachable: Vec<Province> = move_targets.iter().map(|(p, _)| *p).collect();

    for i in 0..PROVINCE_COUNT {
        let (_other_power, other_type) = match state.units[i] {
            Some(pu) => pu,
            None => continue,
        };
        let other_prov = ALL_PROVINCES[i];
        if other_prov == province {
            continue;
        }

        let other_coast = unit_coast(other_prov, state);
        let supported = OrderUnit {
            unit_type: other_type,
            location: Location::with_coast(other_prov, other_coast),
        };

        // Support hold: this unit must be able to move to the supported unit's province.
        if reachable.contains(&other_prov) {
            orders.push(Order::SupportHold { unit, supported });
        }

        // Support move: for each province the other unit could move to
        // (direct adjacency, or for an army, a possible convoy path), if
        // this unit can also reach that province directly.
        let other_dests = reachable_destinations(other_prov, other_coast, other_type, state);

        for dest in other_dests {
            if dest == province {
                continue; // cannot support a move into own province
            }
            let dest_type = dest.province_type();
            if !can_occupy(other_type, dest_type) {
                continue;
            }
            if !reachable.contains(&dest) {
                continue; // this unit cannot reach the destination
            }
            orders.push(Order::SupportMove {
                unit,
                supported,
                dest: Location::new(dest),
            });
        }
    }
}

/// Generates convoy orders for a fleet in a sea province.
fn generate_convoys(
    province: Province,
    coast: Coast,
    unit: OrderUnit,
    state: &BoardState,
    orders: &mut Vec<Order>,
) {
    for i in 0..PROVINCE_COUNT {
        let (_, other_type) = match state.units[i] {
            Some(pu) => pu,
            None => continue,
        };
        if other_type != UnitType::Army {
            continue;
        }

        let army_prov = ALL_PROVINCES[i];
        let army_prov_type = army_prov.province_type();
        if army_prov_type == ProvinceType::Sea {
            continue; // armies can't be in sea provinces
        }

        // The army's possible destinations (coastal provinces reachable by army).
        let army_adj = provinces_adjacent_to(army_prov, Coast::None, false);
        for dest in army_adj {
            if dest == army_prov {
                continue;
            }
            let dest_type = dest.province_type();
            if dest_type == ProvinceType::Sea {
                continue; // army can't convoy to sea
            }
            orders.push(Order::Convoy {
                unit,
                convoyed_from: Location::new(army_prov),
                convoyed_to: Location::new(dest),
            });
        }
    }
}
