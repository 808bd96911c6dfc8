//! DSON (Diplomacy Standard Order Notation) encoding and decoding.
//!
//! DSON is a compact text notation for Diplomacy orders, used in the
//! `bestorders` response and `info` lines of the DUI protocol.
//! Coast separator is `/` (slash), province IDs are 3-letter lowercase,
//! and unit types are uppercase A/F.

use thiserror::Error;

use crate::board::order::{Location, Order, OrderUnit};
use crate::board::province::{Coast, Province};
use crate::board::unit::UnitType;

/// Errors that can occur when parsing DSON order strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DsonError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown unit type '{0}'")]
    UnknownUnitType(String),

    #[error("unknown province '{0}'")]
    UnknownProvince(String),

    #[error("unknown coast '{0}'")]
    UnknownCoast(String),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(String),

    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken { expected: String, found: String },
}

/// Parses a single DSON order string into an `Order`.
///
/// Accepts canonical DSON forms like `A vie H`, `F nrg - stp/nc`, `W`, etc.
pub fn parse_order(s: &str) -> Result<Order, DsonError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DsonError::EmptyInput);
    }

    let tokens: Vec<&str> = s.split(' ').collect();
    if tokens.is_empty() {
        return Err(DsonError::EmptyInput);
    }

    // Waive is a special case: standalone "W"
    if tokens[0] == "W" {
        return Ok(Order::Waive);
    }

    // All other orders start with a unit: unit_char location
    let unit = parse_unit(&tokens, 0)?;
    let pos = 2; // consumed unit_char and location

    if pos >= tokens.len() {
        return Err(DsonError::UnexpectedEnd(
            "action (H, -, S, C, R, D, B)".to_string(),
        ));
    }

    match tokens[pos] {
        "H" => Ok(Order::Hold { unit }),

        "-" => {
            // Move: unit - location
            let dest = parse_location(&tokens, pos + 1)?;
            Ok(Order::Move { unit, dest })
        }

        "S" => {
            // Support: unit S supported_unit (H | - location)
            let supported = parse_unit(&tokens, pos + 1)?;
            let sup_pos = pos + 3; // past S, unit_char, location

            if sup_pos >= tokens.len() {
                return Err(DsonError::UnexpectedEnd(
                    "H or - after supported unit".to_string(),
                ));
            }

            match tokens[sup_pos] {
                "H" => Ok(Order::SupportHold { unit, supported }),
                "-" => {
                    let dest = parse_location(&tokens, sup_pos + 1)?;
                    Ok(Order::SupportMove {
                        unit,
                        supported,
                        dest,
                    })
                }
                other => Err(DsonError::UnexpectedToken {
                    expected: "H or -".to_string(),
                    found: other.to_string(),
                }),
            }
        }

        "C" => {
            // Convoy: unit C A from_location - to_location
            // Grammar says: convoy = "C" SP "A" SP location SP "-" SP location
            // The convoyed unit is always an Army
            if pos + 1 >= tokens.len() {
                return Err(DsonError::UnexpectedEnd("A (convoyed army)".to_string()));
            }
            if tokens[pos + 1] != "A" {
                return Err(DsonError::UnexpectedToken {
                    expected: "A (convoyed army)".to_string(),
                    found: tokens[pos + 1].to_string(),
                });
            }
            let from = parse_location(&tokens, pos + 2)?;

            let dash_pos = pos + 3;
            if dash_pos >= tokens.len() || tokens[dash_pos] != "-" {
                let found = if dash_pos >= tokens.len() {
                    return Err(DsonError::UnexpectedEnd("- (move arrow)".to_string()));
                } else {
                    tokens[dash_pos]
                };
                return Err(DsonError::UnexpectedToken {
                    expected: "-".to_string(),
                    found: found.to_string(),
                });
            }

            let to = parse_location(&tokens, dash_pos + 1)?;
            Ok(Order::Convoy {
                unit,
                convoyed_from: from,
                convoyed_to: to,
            })
        }

        "R" => {
            // Retreat: unit R location
            let dest = parse_location(&tokens, pos + 1)?;
            Ok(Order::Retreat { unit, dest })
        }

        "D" => Ok(Order::Disband { unit }),

        "B" => Ok(Order::Build { unit }),

        other => Err(DsonError::UnknownAction(other.to_string())),
    }
}

/// Parses a semicolon-separated list of DSON orders.
///
/// Orders are separated by ` ; ` (space-semicolon-space). A single order
/// without separators is valid.
pub fn parse_orders(s: &str) -> Result<Vec<Order>, DsonError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DsonError::EmptyInput);
    }

    s.split(" ; ")
        .map(|part| parse_order(part.trim()))
        .collect()
}

/// Formats a single `Order` as a canonical DSON string.
pub fn format_order(order: &Order) -> String {
    match order {
        Order::Hold { unit } => {
            format!("{} H", format_unit(unit))
        }
        Order::Move { unit, dest } => {
            format!("{} - {}", format_unit(unit), format_location(dest))
        }
        Order::SupportHold { unit, supported } => {
            format!("{} S {} H", format_unit(unit), format_unit(supported))
        }
        Order::SupportMove {
            unit,
            supported,
            dest,
        } => {
            format!(
                "{} S {} - {}",
                format_unit(unit),
                format_unit(supported),
                format_location(dest)
            )
        }
        Order::Convoy {
            unit,
            convoyed_from,
            convoyed_to,
        } => {
            format!(
                "{} C A {} - {}",
                format_unit(unit),
                format_location(convoyed_from),
                format_location(convoyed_to)
            )
        }
        Order::Retreat { unit, dest } => {
            format!("{} R {}", format_unit(unit), format_location(dest))
        }
        Order::Disband { unit } => {
            format!("{} D", format_unit(unit))
        }
        Order::Build { unit } => {
            format!("{} B", format_unit(unit))
        }
        Order::Waive => "W".to_string(),
    }
}

/// Formats a slice of orders as a ` ; `-separated DSON string.
pub fn format_orders(orders: &[Order]) -> String {
    orders
        .iter()
        .map(|o| format_order(o))
        .collect::<Vec<_>>()
        .join(" ; ")
}

/// Parses a unit (unit_char + location) from token slice at given index.
fn parse_unit(tokens: &[&str], idx: usize) -> Result<OrderUnit, DsonError> {
    if idx >= tokens.len() {
        return Err(DsonError::UnexpectedEnd("unit type (A or F)".to_string()));
    }

    let unit_type = match tokens[idx] {
        "A" => UnitType::Army,
        "F" => UnitType::Fleet,
        other => return Err(DsonError::UnknownUnitType(other.to_string())),
    };

    let location = parse_location(tokens, idx + 1)?;

    Ok(OrderUnit {
        unit_type,
        location,
    })
}

/// Parses a location (prov_id or prov_id/coast) from token slice at given index.
fn parse_location(tokens: &[&str], idx: usize) -> Result<Location, DsonError> {
    if idx >= tokens.len() {
        return Err(DsonError::UnexpectedEnd("province location".to_string()));
    }

    let token = tokens[idx];

    // Check for coast separator
    if let Some(slash_pos) = token.find('/') {
        let prov_str = &token[..slash_pos];
        let coast_str = &token[slash_pos + 1..];

        let province = Province::from_abbr(prov_str)
            .ok_or_else(|| DsonError::UnknownProvince(prov_str.to_string()))?;
        let coast = Coast::from_abbr(coast_str)
            .ok_or_else(|| DsonError::UnknownCoast(coast_str.to_string()))?;

        Ok(Location::with_coast(province, coast))
    } else {
        let province = Province::from_abbr(token)
            .ok_or_else(|| DsonError::UnknownProvince(token.to_string()))?;
        Ok(Location::new(province))
    }
}

/// Formats a unit reference as "A prov" or "F prov/coast".
fn format_unit(unit: &OrderUnit) -> String {
    format!(
        "{} {}",
        unit.unit_type.dson_char(),
        format_location(&unit.location)
    )
}

/// Formats a location as "prov" or "prov/coast".
fn format_location(loc: &Location) -> String {
    if loc.coast == Coast::None {
        loc.province.abbr().to_string()
    } else {
        format!("{}/{}", loc.province.abbr(), loc.coast.abbr())
    }
}
