use super::*;
use crate::layout;
use crate::test_support::{dapai, dealer_round, labels, non_dealer_round, Harness, SHORT};

fn sorted_deal() -> Vec<String> {
    labels(&[
        "1m", "2m", "3m", "4p", "0p", "6p", "7s", "8s", "9s", "1z", "1z", "5z", "6z",
    ])
}

#[tokio::test(start_paused = true)]
async fn test_new_round_state() {
    let h = Harness::new();
    let game = h.enter_match(dealer_round(vec![dapai()])).await;
    assert_eq!((game.chang(), game.ju(), game.ben(), game.liqibang()), (0, 0, 0, 0));
    assert_eq!(game.scores(), &[25000; 4]);
    assert_eq!(game.dora_indicators(), &["3s".to_string()]);
    assert_eq!(game.shoupai(), sorted_deal().as_slice());
    assert_eq!(game.zimopai(), Some("7z"));
}

#[tokio::test(start_paused = true)]
async fn test_tsumogiri() {
    let h = Harness::new();
    let mut game = h.enter_match(dealer_round(vec![dapai()])).await;

    h.send_match(MatchEvent::Discard {
        seat: 0,
        tile: "7z".to_string(),
        moqie: true,
        operations: None,
    });
    game.select_operation(Some(&dapai()), Some(13), SHORT)
        .await
        .unwrap();

    let clicks = h.log.clicks();
    assert_eq!(clicks.len(), 1);
    let drawn = layout::hand_tile(13, 13);
    let (x, y) = clicks[0];
    assert!(x > drawn.left as f64 && x < (drawn.left + drawn.width) as f64);
    assert!(y > drawn.top as f64 && y < (drawn.top + drawn.height) as f64);

    let next = game.take_next().unwrap().into_match().unwrap();
    assert_eq!(next.shoupai(), sorted_deal().as_slice());
    assert_eq!(next.zimopai(), None);
    assert_eq!(next.operation_list(), None);
}

#[tokio::test(start_paused = true)]
async fn test_discard_from_hand_merges_drawn_tile() {
    let h = Harness::new();
    let mut game = h.enter_match(dealer_round(vec![dapai()])).await;

    h.send_match(MatchEvent::Discard {
        seat: 0,
        tile: "1m".to_string(),
        moqie: false,
        operations: None,
    });
    game.select_operation(Some(&dapai()), Some(0), SHORT)
        .await
        .unwrap();

    let next = game.take_next().unwrap().into_match().unwrap();
    assert_eq!(
        next.shoupai(),
        labels(&["2m", "3m", "4p", "0p", "6p", "7s", "8s", "9s", "1z", "1z", "5z", "6z", "7z"])
            .as_slice()
    );
    assert_eq!(next.zimopai(), None);
}

#[tokio::test(start_paused = true)]
async fn test_invalid_selection_sends_nothing() {
    let h = Harness::new();
    let mut game = h.enter_match(dealer_round(vec![dapai()])).await;

    let attempts: [(Option<&Operation>, Option<usize>); 4] = [
        (Some(&Operation::Rong), None),
        (Some(&Operation::Zimohu), None),
        (None, None),
        (None, Some(1)),
    ];
    for (operation, index) in attempts {
        let err = game.select_operation(operation, index, SHORT).await.unwrap_err();
        assert!(matches!(err, RpaError::InvalidOperation(_)), "{operation:?}");
    }
    let err = game
        .select_operation(Some(&dapai()), Some(14), SHORT)
        .await
        .unwrap_err();
    assert!(matches!(err, RpaError::InvalidOperation(_)));

    assert!(h.log.is_empty());
    assert!(game.pending_next().is_none());
    assert_eq!(game.operation_list(), Some([dapai()].as_slice()));
}

#[tokio::test(start_paused = true)]
async fn test_no_decision_pending() {
    let h = Harness::new();
    let mut game = h.enter_match(dealer_round(vec![dapai()])).await;

    h.send_match(MatchEvent::Discard {
        seat: 0,
        tile: "7z".to_string(),
        moqie: true,
        operations: None,
    });
    game.wait(SHORT).await.unwrap();
    let mut idle = game.take_next().unwrap().into_match().unwrap();

    let err = idle
        .select_operation(Some(&dapai()), Some(0), SHORT)
        .await
        .unwrap_err();
    assert!(matches!(err, RpaError::InvalidOperation(_)));
    assert!(h.log.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_skip_self_call_keeps_presentation() {
    let h = Harness::new();
    let liqi = Operation::Liqi {
        candidate_tiles: labels(&["6z", "7z"]),
    };
    let mut game = h.enter_match(dealer_round(vec![dapai(), liqi])).await;

    game.select_operation(None, None, SHORT).await.unwrap();
    assert_eq!(h.log.clicks().len(), 1);
    assert!(game.pending_next().is_none());
    assert_eq!(game.operation_list(), Some([dapai()].as_slice()));

    h.send_match(MatchEvent::Discard {
        seat: 0,
        tile: "7z".to_string(),
        moqie: true,
        operations: None,
    });
    game.select_operation(Some(&dapai()), Some(13), SHORT)
        .await
        .unwrap();
    assert!(game.pending_next().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_skip_call_awaits_next_state() {
    let h = Harness::new();
    let mut game = h.enter_match(dealer_round(vec![dapai()])).await;

    h.send_match(MatchEvent::Discard {
        seat: 0,
        tile: "7z".to_string(),
        moqie: true,
        operations: None,
    });
    h.send_match(MatchEvent::Draw {
        seat: 1,
        tile: None,
        operations: None,
    });
    h.send_match(MatchEvent::Discard {
        seat: 1,
        tile: "1z".to_string(),
        moqie: false,
        operations: Some(vec![Operation::Peng {
            combinations: labels(&["1z|1z"]),
        }]),
    });
    game.select_operation(Some(&dapai()), Some(13), SHORT)
        .await
        .unwrap();

    let mut state = game.take_next().unwrap().into_match().unwrap();
    state.wait(SHORT).await.unwrap();
    let mut state = state.take_next().unwrap().into_match().unwrap();
    state.wait(SHORT).await.unwrap();
    let mut offered = state.take_next().unwrap().into_match().unwrap();
    assert_eq!(offered.operation_list().map(<[Operation]>::len), Some(1));

    h.log.clear();
    h.send_match(MatchEvent::Draw {
        seat: 2,
        tile: None,
        operations: None,
    });
    offered.select_operation(None, None, SHORT).await.unwrap();
    assert_eq!(h.log.clicks().len(), 1);
    let next = offered.take_next().unwrap().into_match().unwrap();
    assert_eq!(next.operation_list(), None);
}

#[tokio::test(start_paused = true)]
async fn test_call_with_several_combinations() {
    let h = Harness::new();
    let mut game = h.enter_match(dealer_round(vec![dapai()])).await;

    h.send_match(MatchEvent::Discard {
        seat: 0,
        tile: "7z".to_string(),
        moqie: true,
        operations: None,
    });
    game.select_operation(Some(&dapai()), Some(13), SHORT)
        .await
        .unwrap();
    let mut state = game.take_next().unwrap().into_match().unwrap();

    let chi = Operation::Chi {
        combinations: labels(&["1m|3m", "3m|4m"]),
    };
    // Offered on the next discard from the left.
    h.send_match(MatchEvent::Discard {
        seat: 3,
        tile: "2m".to_string(),
        moqie: false,
        operations: Some(vec![chi.clone()]),
    });
    state.wait(SHORT).await.unwrap();
    let mut offered = state.take_next().unwrap().into_match().unwrap();

    h.log.clear();
    let err = offered.select_operation(Some(&chi), None, SHORT).await.unwrap_err();
    assert!(matches!(err, RpaError::InvalidOperation(_)));
    assert!(h.log.is_empty());

    h.send_match(MatchEvent::Meld {
        seat: 0,
        consumed: labels(&["1m", "3m"]),
        operations: Some(vec![dapai()]),
    });
    offered.select_operation(Some(&chi), Some(0), SHORT).await.unwrap();
    assert_eq!(h.log.clicks().len(), 2);

    let after = offered.take_next().unwrap().into_match().unwrap();
    assert_eq!(
        after.shoupai(),
        labels(&["2m", "4p", "0p", "6p", "7s", "8s", "9s", "1z", "1z", "5z", "6z"]).as_slice()
    );
    assert_eq!(after.operation_list(), Some([dapai()].as_slice()));
}

#[tokio::test(start_paused = true)]
async fn test_table_updates() {
    let h = Harness::new();
    let mut game = h.enter_match(dealer_round(vec![dapai()])).await;

    h.send_match(MatchEvent::NewDora {
        indicator: "5m".to_string(),
    });
    game.wait(SHORT).await.unwrap();
    let mut game = game.take_next().unwrap().into_match().unwrap();
    assert_eq!(game.dora_indicators(), labels(&["3s", "5m"]).as_slice());
    // Dora reveals carry no decision.
    assert_eq!(game.operation_list(), None);
    assert_eq!(game.zimopai(), Some("7z"));

    h.send_match(MatchEvent::LiqiAccepted {
        seat: 2,
        scores: vec![25000, 25000, 24000, 25000],
        liqibang: 1,
    });
    game.wait(SHORT).await.unwrap();
    let mut game = game.take_next().unwrap().into_match().unwrap();
    assert_eq!(game.liqibang(), 1);
    assert_eq!(game.scores()[2], 24000);

    h.send_match(MatchEvent::HandEnd {
        scores: vec![33000, 25000, 17000, 25000],
    });
    game.wait(SHORT).await.unwrap();
    let mut game = game.take_next().unwrap().into_match().unwrap();
    assert_eq!(game.scores()[0], 33000);
    assert_eq!(game.zimopai(), None);

    let mut next_round = dealer_round(vec![]);
    if let MatchEvent::NewRound { ju, .. } = &mut next_round {
        *ju = 1;
    }
    h.send_match(next_round);
    game.wait(SHORT).await.unwrap();
    let game = game.take_next().unwrap().into_match().unwrap();
    assert_eq!(game.ju(), 1);
    assert_eq!(game.dora_indicators(), labels(&["3s"]).as_slice());
}

#[tokio::test(start_paused = true)]
async fn test_liqi_clicks_button_then_tile() {
    let h = Harness::new();
    let liqi = Operation::Liqi {
        candidate_tiles: labels(&["6z", "7z"]),
    };
    let mut game = h
        .enter_match(dealer_round(vec![dapai(), liqi.clone()]))
        .await;

    h.send_match(MatchEvent::Discard {
        seat: 0,
        tile: "7z".to_string(),
        moqie: true,
        operations: None,
    });
    game.select_operation(Some(&liqi), Some(13), SHORT).await.unwrap();

    let clicks = h.log.clicks();
    assert_eq!(clicks.len(), 2);
    let button = layout::operation_button(1);
    assert!(clicks[0].1 > button.top as f64 && clicks[0].1 < (button.top + button.height) as f64);
}

#[tokio::test(start_paused = true)]
async fn test_selection_timeout() {
    let h = Harness::new();
    let mut game = h.enter_match(dealer_round(vec![dapai()])).await;
    let err = game
        .select_operation(Some(&dapai()), Some(13), SHORT)
        .await
        .unwrap_err();
    assert!(matches!(err, RpaError::TransitionTimeout { .. }));
    assert!(game.pending_next().is_none());
    assert_eq!(game.operation_list(), Some([dapai()].as_slice()));
}

#[tokio::test(start_paused = true)]
async fn test_dealer_seat_without_account() {
    let h = Harness::new();
    let mut game = h.enter_match_as(None, dealer_round(vec![dapai()])).await;
    assert_eq!(game.seat(), Some(0));

    h.send_match(MatchEvent::Discard {
        seat: 0,
        tile: "7z".to_string(),
        moqie: true,
        operations: None,
    });
    game.select_operation(Some(&dapai()), Some(13), SHORT)
        .await
        .unwrap();

    let next = game.take_next().unwrap().into_match().unwrap();
    assert_eq!(next.zimopai(), None);
    assert_eq!(next.shoupai(), sorted_deal().as_slice());
}

#[tokio::test(start_paused = true)]
async fn test_seat_from_first_revealed_draw() {
    let h = Harness::new();
    let mut game = h.enter_match_as(None, non_dealer_round()).await;
    assert_eq!(game.seat(), None);

    h.send_match(MatchEvent::Draw {
        seat: 1,
        tile: None,
        operations: None,
    });
    game.wait(SHORT).await.unwrap();
    let mut game = game.take_next().unwrap().into_match().unwrap();
    assert_eq!(game.seat(), None);

    h.send_match(MatchEvent::Draw {
        seat: 2,
        tile: Some("4s".to_string()),
        operations: Some(vec![dapai()]),
    });
    game.wait(SHORT).await.unwrap();
    let mut game = game.take_next().unwrap().into_match().unwrap();
    assert_eq!(game.seat(), Some(2));
    assert_eq!(game.zimopai(), Some("4s"));

    h.send_match(MatchEvent::Discard {
        seat: 2,
        tile: "4s".to_string(),
        moqie: true,
        operations: None,
    });
    game.select_operation(Some(&dapai()), Some(13), SHORT)
        .await
        .unwrap();
    let mut game = game.take_next().unwrap().into_match().unwrap();
    assert_eq!(game.zimopai(), None);
    assert_eq!(game.shoupai(), sorted_deal().as_slice());

    // Later draws of other seats reveal nothing and leave the hand alone.
    h.send_match(MatchEvent::Draw {
        seat: 3,
        tile: None,
        operations: None,
    });
    game.wait(SHORT).await.unwrap();
    let game = game.take_next().unwrap().into_match().unwrap();
    assert_eq!(game.seat(), Some(2));
    assert_eq!(game.zimopai(), None);
    assert!(game.is_hand_tracked());
}

#[tokio::test(start_paused = true)]
async fn test_meld_then_draw_keeps_hand_in_sync() {
    let h = Harness::new();
    let mut game = h.enter_match(non_dealer_round()).await;

    let peng = Operation::Peng {
        combinations: labels(&["1z|1z"]),
    };
    h.send_match(MatchEvent::Discard {
        seat: 3,
        tile: "1z".to_string(),
        moqie: false,
        operations: Some(vec![peng.clone()]),
    });
    game.wait(SHORT).await.unwrap();
    let mut offered = game.take_next().unwrap().into_match().unwrap();

    h.send_match(MatchEvent::Meld {
        seat: 0,
        consumed: labels(&["1z", "1z"]),
        operations: Some(vec![dapai()]),
    });
    offered.select_operation(Some(&peng), None, SHORT).await.unwrap();
    let mut called = offered.take_next().unwrap().into_match().unwrap();
    assert_eq!(
        called.shoupai(),
        labels(&["1m", "2m", "3m", "4p", "0p", "6p", "7s", "8s", "9s", "5z", "6z"]).as_slice()
    );

    h.send_match(MatchEvent::Discard {
        seat: 0,
        tile: "9s".to_string(),
        moqie: false,
        operations: None,
    });
    called.select_operation(Some(&dapai()), Some(8), SHORT).await.unwrap();
    let mut after = called.take_next().unwrap().into_match().unwrap();
    assert_eq!(after.shoupai().len(), 10);
    assert!(!after.shoupai().contains(&"9s".to_string()));

    h.send_match(MatchEvent::Draw {
        seat: 0,
        tile: Some("2p".to_string()),
        operations: Some(vec![dapai()]),
    });
    after.wait(SHORT).await.unwrap();
    let drawn = after.take_next().unwrap().into_match().unwrap();
    assert_eq!(drawn.shoupai().len(), 10);
    assert_eq!(drawn.zimopai(), Some("2p"));
    assert_eq!(drawn.operation_list(), Some([dapai()].as_slice()));
}

#[tokio::test(start_paused = true)]
async fn test_ambiguous_meld_stops_tile_selection() {
    let h = Harness::new();
    let mut game = h.enter_match_as(None, non_dealer_round()).await;

    let peng = Operation::Peng {
        combinations: labels(&["1z|1z"]),
    };
    h.send_match(MatchEvent::Discard {
        seat: 3,
        tile: "1z".to_string(),
        moqie: false,
        operations: Some(vec![peng.clone()]),
    });
    game.wait(SHORT).await.unwrap();
    let mut offered = game.take_next().unwrap().into_match().unwrap();

    h.send_match(MatchEvent::Meld {
        seat: 1,
        consumed: labels(&["1z", "1z"]),
        operations: Some(vec![dapai()]),
    });
    offered.select_operation(Some(&peng), None, SHORT).await.unwrap();
    let mut called = offered.take_next().unwrap().into_match().unwrap();
    assert!(!called.is_hand_tracked());

    h.log.clear();
    let err = called
        .select_operation(Some(&dapai()), Some(0), SHORT)
        .await
        .unwrap_err();
    assert!(matches!(err, RpaError::InvalidOperation(_)));
    assert!(h.log.is_empty());

    let mut fresh = non_dealer_round();
    if let MatchEvent::NewRound { ju, .. } = &mut fresh {
        *ju = 2;
    }
    h.send_match(fresh);
    called.wait(SHORT).await.unwrap();
    let next_hand = called.take_next().unwrap().into_match().unwrap();
    assert!(next_hand.is_hand_tracked());
}
