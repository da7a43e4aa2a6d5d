//! Validation of an operation choice and the clicks that carry it out.

use majsoul_rpa_protocols::{tile, Operation, Region, RpaError};

use crate::layout;

/// What the hand looks like at the decision point.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HandView<'a> {
    pub shoupai: &'a [String],
    pub zimopai: Option<&'a str>,
}

impl<'a> HandView<'a> {
    /// Label of the tile at `index`; `shoupai.len()` is the drawn tile.
    fn tile_at(&self, index: usize) -> Option<&'a str> {
        if index < self.shoupai.len() {
            Some(self.shoupai[index].as_str())
        } else if index == self.shoupai.len() {
            self.zimopai
        } else {
            None
        }
    }

    fn len_with_drawn(&self) -> usize {
        self.shoupai.len() + usize::from(self.zimopai.is_some())
    }
}

/// Clicks that execute a validated choice.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Plan {
    /// Pass. `remaining` is the discard still owed after passing on a
    /// self-call such as a riichi or a concealed quad.
    Skip { remaining: Option<Operation> },
    /// Optional button, then the tile.
    Tile { button: Option<Region>, tile: Region },
    /// Button, then the combination if several were offered.
    Button {
        button: Region,
        combination: Option<Region>,
    },
}

fn invalid(message: impl Into<String>) -> RpaError {
    RpaError::InvalidOperation(message.into())
}

/// Check `operation`/`index` against the offered list and the hand.
pub(crate) fn plan(
    hand: HandView<'_>,
    offered: Option<&[Operation]>,
    operation: Option<&Operation>,
    index: Option<usize>,
) -> Result<Plan, RpaError> {
    let offered = offered.ok_or_else(|| invalid("no decision is pending"))?;

    let Some(operation) = operation else {
        return plan_skip(offered, index);
    };

    if !offered.contains(operation) {
        return Err(invalid(format!("{} is not on offer", operation)));
    }

    match operation {
        Operation::Dapai { forbidden_tiles } => {
            let (label, tile) = pick_tile(hand, index, operation)?;
            if forbidden_tiles.iter().any(|f| f == label) {
                return Err(invalid(format!("{} may not be discarded now", label)));
            }
            Ok(Plan::Tile { button: None, tile })
        }
        Operation::Liqi { candidate_tiles } => {
            let (label, tile) = pick_tile(hand, index, operation)?;
            if !candidate_tiles.iter().any(|c| c == label) {
                return Err(invalid(format!("discarding {} does not keep tenpai", label)));
            }
            Ok(Plan::Tile {
                button: Some(button_for(offered, operation)),
                tile,
            })
        }
        op if !op.combinations().is_empty() => {
            let count = op.combinations().len();
            let combination = match (count, index) {
                (1, None) => None,
                (1, Some(_)) => {
                    return Err(invalid(format!("{} has a single combination", op.name())));
                }
                (_, None) => {
                    return Err(invalid(format!(
                        "{} needs a combination index out of {}",
                        op.name(),
                        count
                    )));
                }
                (_, Some(i)) if i >= count => {
                    return Err(invalid(format!(
                        "combination {} out of range for {} ({} offered)",
                        i,
                        op.name(),
                        count
                    )));
                }
                (_, Some(i)) => Some(layout::combination(i, count)),
            };
            Ok(Plan::Button {
                button: button_for(offered, op),
                combination,
            })
        }
        op => {
            if index.is_some() {
                return Err(invalid(format!("{} takes no index", op.name())));
            }
            Ok(Plan::Button {
                button: button_for(offered, op),
                combination: None,
            })
        }
    }
}

fn plan_skip(offered: &[Operation], index: Option<usize>) -> Result<Plan, RpaError> {
    if index.is_some() {
        return Err(invalid("skipping takes no index"));
    }
    let discard = offered
        .iter()
        .find(|op| matches!(op, Operation::Dapai { .. }))
        .cloned();
    if discard.is_some() && offered.iter().all(|op| !op.has_button()) {
        return Err(invalid("a tile must be discarded, skipping is not possible"));
    }
    Ok(Plan::Skip { remaining: discard })
}

fn pick_tile<'a>(
    hand: HandView<'a>,
    index: Option<usize>,
    operation: &Operation,
) -> Result<(&'a str, Region), RpaError> {
    let index = index.ok_or_else(|| invalid(format!("{} needs a tile index", operation.name())))?;
    let label = hand.tile_at(index).ok_or_else(|| {
        invalid(format!(
            "tile index {} out of range (hand holds {})",
            index,
            hand.len_with_drawn()
        ))
    })?;
    if !tile::is_valid(label) {
        return Err(invalid(format!("unknown tile {:?} at index {}", label, index)));
    }
    Ok((label, layout::hand_tile(index, hand.shoupai.len())))
}

/// Buttons appear right to left in offer order after the skip button.
fn button_for(offered: &[Operation], operation: &Operation) -> Region {
    let slot = offered
        .iter()
        .filter(|op| op.has_button())
        .position(|op| op == operation)
        .unwrap_or(0);
    layout::operation_button(slot + 1)
}

#[cfg(test)]
#[path = "selection_tests.rs"]
mod tests;
