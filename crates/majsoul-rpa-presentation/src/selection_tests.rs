use super::*;

fn labels(tiles: &[&str]) -> Vec<String> {
    tiles.iter().map(|t| t.to_string()).collect()
}

fn dapai(forbidden: &[&str]) -> Operation {
    Operation::Dapai {
        forbidden_tiles: labels(forbidden),
    }
}

fn chi(combinations: &[&str]) -> Operation {
    Operation::Chi {
        combinations: labels(combinations),
    }
}

struct Hand {
    shoupai: Vec<String>,
    zimopai: Option<String>,
}

impl Hand {
    fn new(shoupai: &[&str], zimopai: Option<&str>) -> Self {
        Self {
            shoupai: labels(shoupai),
            zimopai: zimopai.map(str::to_string),
        }
    }

    fn view(&self) -> HandView<'_> {
        HandView {
            shoupai: &self.shoupai,
            zimopai: self.zimopai.as_deref(),
        }
    }
}

fn full_hand() -> Hand {
    Hand::new(
        &["1m", "2m", "3m", "4p", "5p", "6p", "7s", "8s", "9s", "1z", "1z", "5z", "6z"],
        Some("7z"),
    )
}

fn assert_invalid(result: Result<Plan, RpaError>) {
    assert!(
        matches!(result, Err(RpaError::InvalidOperation(_))),
        "expected InvalidOperation, got {:?}",
        result
    );
}

#[test]
fn test_nothing_offered() {
    let hand = full_hand();
    assert_invalid(plan(hand.view(), None, None, None));
    assert_invalid(plan(hand.view(), None, Some(&dapai(&[])), Some(0)));
}

#[test]
fn test_dapai_hand_tile() {
    let hand = full_hand();
    let offered = [dapai(&[])];
    let plan = plan(hand.view(), Some(&offered), Some(&offered[0]), Some(3)).unwrap();
    assert_eq!(
        plan,
        Plan::Tile {
            button: None,
            tile: layout::hand_tile(3, 13)
        }
    );
}

#[test]
fn test_dapai_drawn_tile() {
    let hand = full_hand();
    let offered = [dapai(&[])];
    let plan = plan(hand.view(), Some(&offered), Some(&offered[0]), Some(13)).unwrap();
    assert_eq!(
        plan,
        Plan::Tile {
            button: None,
            tile: layout::hand_tile(13, 13)
        }
    );
}

#[test]
fn test_dapai_index_rules() {
    let hand = full_hand();
    let offered = [dapai(&[])];
    assert_invalid(plan(hand.view(), Some(&offered), Some(&offered[0]), None));
    assert_invalid(plan(hand.view(), Some(&offered), Some(&offered[0]), Some(14)));

    // Without a drawn tile the slot past the hand is empty.
    let after_call = Hand::new(&["1m", "2m", "3m", "4p", "5p", "6p", "7s", "8s", "9s", "1z", "1z"], None);
    assert_invalid(plan(after_call.view(), Some(&offered), Some(&offered[0]), Some(11)));
    assert!(plan(after_call.view(), Some(&offered), Some(&offered[0]), Some(10)).is_ok());
}

#[test]
fn test_dapai_forbidden_tile() {
    let hand = full_hand();
    let offered = [dapai(&["4p"])];
    assert_invalid(plan(hand.view(), Some(&offered), Some(&offered[0]), Some(3)));
    assert!(plan(hand.view(), Some(&offered), Some(&offered[0]), Some(4)).is_ok());
}

#[test]
fn test_operation_not_on_offer() {
    let hand = full_hand();
    let offered = [dapai(&[])];
    assert_invalid(plan(hand.view(), Some(&offered), Some(&Operation::Zimohu), None));
    // Same variant, different payload.
    assert_invalid(plan(hand.view(), Some(&offered), Some(&dapai(&["1m"])), Some(0)));
}

#[test]
fn test_unknown_tile_label() {
    let hand = Hand::new(&["1m", "??"], Some("3m"));
    let offered = [dapai(&[])];
    assert_invalid(plan(hand.view(), Some(&offered), Some(&offered[0]), Some(1)));
}

#[test]
fn test_liqi_clicks_button_then_tile() {
    let hand = full_hand();
    let liqi = Operation::Liqi {
        candidate_tiles: labels(&["5z", "7z"]),
    };
    let offered = [dapai(&[]), liqi.clone()];

    let plan = plan(hand.view(), Some(&offered), Some(&liqi), Some(13)).unwrap();
    assert_eq!(
        plan,
        Plan::Tile {
            button: Some(layout::operation_button(1)),
            tile: layout::hand_tile(13, 13)
        }
    );
}

#[test]
fn test_liqi_rejects_non_candidate() {
    let hand = full_hand();
    let liqi = Operation::Liqi {
        candidate_tiles: labels(&["5z"]),
    };
    let offered = [dapai(&[]), liqi.clone()];
    assert_invalid(plan(hand.view(), Some(&offered), Some(&liqi), Some(0)));
    assert_invalid(plan(hand.view(), Some(&offered), Some(&liqi), None));
}

#[test]
fn test_buttons_fill_right_to_left() {
    let hand = full_hand();
    let offered = [dapai(&[]), Operation::Jiuzhongjiu, Operation::Zimohu];

    let first = plan(hand.view(), Some(&offered), Some(&Operation::Jiuzhongjiu), None).unwrap();
    let second = plan(hand.view(), Some(&offered), Some(&Operation::Zimohu), None).unwrap();
    assert_eq!(
        first,
        Plan::Button {
            button: layout::operation_button(1),
            combination: None
        }
    );
    assert_eq!(
        second,
        Plan::Button {
            button: layout::operation_button(2),
            combination: None
        }
    );
}

#[test]
fn test_button_operation_takes_no_index() {
    let hand = full_hand();
    let offered = [Operation::Rong];
    assert_invalid(plan(hand.view(), Some(&offered), Some(&Operation::Rong), Some(0)));
}

#[test]
fn test_single_combination() {
    let hand = full_hand();
    let peng = Operation::Peng {
        combinations: labels(&["1z|1z"]),
    };
    let offered = [peng.clone()];
    let plan_ok = plan(hand.view(), Some(&offered), Some(&peng), None).unwrap();
    assert_eq!(
        plan_ok,
        Plan::Button {
            button: layout::operation_button(1),
            combination: None
        }
    );
    assert_invalid(plan(hand.view(), Some(&offered), Some(&peng), Some(0)));
}

#[test]
fn test_several_combinations() {
    let hand = full_hand();
    let call = chi(&["2m|3m", "3m|5m"]);
    let offered = [Operation::Rong, call.clone()];

    assert_invalid(plan(hand.view(), Some(&offered), Some(&call), None));
    assert_invalid(plan(hand.view(), Some(&offered), Some(&call), Some(2)));

    let chosen = plan(hand.view(), Some(&offered), Some(&call), Some(1)).unwrap();
    assert_eq!(
        chosen,
        Plan::Button {
            button: layout::operation_button(2),
            combination: Some(layout::combination(1, 2))
        }
    );
}

#[test]
fn test_skip_a_call() {
    let hand = full_hand();
    let offered = [chi(&["2m|3m"])];
    assert_eq!(
        plan(hand.view(), Some(&offered), None, None).unwrap(),
        Plan::Skip { remaining: None }
    );
    assert_invalid(plan(hand.view(), Some(&offered), None, Some(0)));
}

#[test]
fn test_skip_with_only_discard_is_invalid() {
    let hand = full_hand();
    let offered = [dapai(&[])];
    assert_invalid(plan(hand.view(), Some(&offered), None, None));
}

#[test]
fn test_skip_self_call_keeps_discard() {
    let hand = full_hand();
    let discard = dapai(&["1m"]);
    let offered = [
        discard.clone(),
        Operation::Angang {
            combinations: labels(&["1z|1z|1z|1z"]),
        },
    ];
    assert_eq!(
        plan(hand.view(), Some(&offered), None, None).unwrap(),
        Plan::Skip {
            remaining: Some(discard)
        }
    );
}
