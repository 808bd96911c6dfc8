//! Order validation.
//!
//! Checks a submitted order against the legal orders for its unit and
//! phase, without mutating board state. Used by callers that accept
//! orders from an external source (a DUI front-end, a test harness) and
//! need to reject or default illegal ones before they reach a resolver.

use thiserror::Error;

use crate::board::{BoardState, Location, Order, OrderUnit, Phase, Power, Province};
use crate::resolve::build::{validate_build, validate_disband};

use super::{movement, retreat};

/// Reasons an order can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no unit belonging to the power at the order's location")]
    NoUnitAtLocation,
    #[error("order is not legal for the unit at this location")]
    NotLegal,
    #[error("order type does not match the current phase")]
    WrongPhaseOrderType,
}

/// Validates a single order for `power` against the current board state.
///
/// Dispatches on `state.phase`:
/// - Movement: the order must appear in `movement::legal_orders` for its unit's province.
/// - Retreat: the order must appear in `retreat::legal_retreats` for its unit's province.
/// - Build: `Build`/`Disband` orders go through the resolver's own validators;
///   `Waive` is always accepted.
pub fn validate_order(order: &Order, power: Power, state: &BoardState) -> Result<(), ValidationError> {
    match state.phase {
        Phase::Movement => {
            let prov = match order_unit_province(order) {
                Some(p) => p,
                None => return Err(ValidationError::WrongPhaseOrderType),
            };
            match state.units[prov as usize] {
                Some((p, _)) if p == power => {}
                _ => return Err(ValidationError::NoUnitAtLocation),
            }
            let legal = movement::legal_orders(prov, state);
            if legal.contains(order) {
                Ok(())
            } else {
                Err(ValidationError::NotLegal)
            }
        }
        Phase::Retreat => {
            let prov = match order_unit_province(order) {
                Some(p) => p,
                None => return Err(ValidationError::WrongPhaseOrderType),
            };
            match state.dislodged[prov as usize] {
                Some(d) if d.power == power => {}
                _ => return Err(ValidationError::NoUnitAtLocation),
            }
            let legal = retreat::legal_retreats(prov, state);
            if legal.contains(order) {
                Ok(())
            } else {
                Err(ValidationError::NotLegal)
            }
        }
        Phase::Build => match order {
            Order::Build { .. } => {
                if validate_build(order, power, state) {
                    Ok(())
                } else {
                    Err(ValidationError::NotLegal)
                }
            }
            Order::Disband { .. } => {
                if validate_disband(order, power, state) {
                    Ok(())
                } else {
                    Err(ValidationError::NotLegal)
                }
            }
            Order::Waive => Ok(()),
            _ => Err(ValidationError::WrongPhaseOrderType),
        },
    }
}

/// Extracts the province of the order's own unit, when the order carries one.
fn order_unit_province(order: &Order) -> Option<crate::board::Province> {
    match order {
        Order::Hold { unit }
        | Order::Move { unit, .. }
        | Order::SupportHold { unit, .. }
        | Order::SupportMove { unit, .. }
        | Order::Convoy { unit, .. }
        | Order::Retreat { unit, .. }
        | Order::Disband { unit }
        | Order::Build { unit } => Some(unit.location.province),
        Order::Waive => None,
    }
}

/// Validates a batch of submitted orders against every unit `power` actually
/// controls in the current phase, replacing any invalid or missing order
/// with a safe default (`Hold` for movement, `Disband` for retreat) so the
/// result is always total over `power`'s units: exactly one order per unit
/// (or dislodged unit, in Retreat). Build-phase completeness (unfilled
/// slots become implicit `Waive`s) is handled by `resolve::build` directly,
/// since it also has to enforce the build/disband count limits.
pub fn validate_and_default(orders: &[(Order, Power)], power: Power, state: &BoardState) -> Vec<Order> {
    use crate::board::ALL_PROVINCES;

    let mut submitted: std::collections::HashMap<Province, Order> = std::collections::HashMap::new();
    for &(order, p) in orders {
        if p != power {
            continue;
        }
        if let Some(prov) = order_unit_province(&order) {
            submitted.insert(prov, order);
        }
    }

    let mut result = Vec::new();
    for &prov in ALL_PROVINCES.iter() {
        match state.phase {
            Phase::Movement => {
                let Some((p, unit_type)) = state.units[prov as usize] else { continue };
                if p != power {
                    continue;
                }
                let order = submitted
                    .get(&prov)
                    .filter(|o| validate_order(o, power, state).is_ok())
                    .copied()
                    .unwrap_or_else(|| Order::Hold {
                        unit: OrderUnit {
                            unit_type,
                            location: Location::with_coast(
                                prov,
                                state.fleet_coast[prov as usize].unwrap_or(crate::board::Coast::None),
                            ),
                        },
                    });
                result.push(order);
            }
            Phase::Retreat => {
                let Some(d) = state.dislodged[prov as usize] else { continue };
                if d.power != power {
                    continue;
                }
                let order = submitted
                    .get(&prov)
                    .filter(|o| validate_order(o, power, state).is_ok())
                    .copied()
                    .unwrap_or(Order::Disband {
                        unit: OrderUnit {
                            unit_type: d.unit_type,
                            location: Location::with_coast(prov, d.coast),
                        },
                    });
                result.push(order);
            }
            Phase::Build => {}
        }
    }
    result
}
