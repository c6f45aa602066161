use std::collections::HashMap;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use strum::IntoEnumIterator;

use crate::notation::{self, parse_sequence};
use crate::*;

use Color::{Blue as B, Green as G, Red as R, Yellow as Y};

fn scrambled(moves: &[Move]) -> FaceState {
    let mut state = FaceState::solved();
    state.apply_all(moves.iter().copied());
    state
}

proptest! {
    #[test]
    fn proptest_every_move_has_order_three(setup: Vec<Move>, mv: Move) {
        let start = scrambled(&setup);
        let mut state = start;
        for _ in 0..3 {
            state.apply(mv);
        }
        prop_assert_eq!(start, state);
    }

    #[test]
    fn proptest_inverse_cancels(setup: Vec<Move>, mv: Move) {
        let start = scrambled(&setup);
        prop_assert_eq!(start, start.applied(mv).applied(mv.rev()));
    }

    #[test]
    fn proptest_registry_stays_bijective(moves: Vec<Move>) {
        let mut state = PuzzleState::new();
        for &mv in &moves {
            state.do_move(mv);
            prop_assert!(state.registry().is_bijection());
        }
    }

    #[test]
    fn proptest_tip_move_only_touches_its_tip(setup: Vec<Move>, v: Vertex, inverse: bool) {
        let start = scrambled(&setup);
        let key = MoveKey::Tip(v);
        let end = start.applied(Move::new(key, inverse));
        let tip = table::lookup(key).tip;
        for face in Face::iter() {
            for index in 0..STICKERS_PER_FACE as u8 {
                let pos = StickerPos::new(face, index);
                if !tip.contains(&pos) {
                    prop_assert_eq!(start[pos], end[pos], "{} changed", pos);
                }
            }
        }
    }

    #[test]
    fn proptest_color_counts_preserved(moves: Vec<Move>) {
        let state = scrambled(&moves);
        let mut counts = HashMap::<Color, usize>::new();
        for (_, stickers) in state.iter() {
            for &c in stickers {
                *counts.entry(c).or_default() += 1;
            }
        }
        for c in [R, G, B, Y] {
            prop_assert_eq!(Some(&9), counts.get(&c));
        }
    }

    #[test]
    fn proptest_registry_agrees_with_edge_colors(moves: Vec<Move>) {
        let solved = FaceState::solved();
        let mut state = PuzzleState::new();
        for &mv in &moves {
            state.do_move(mv);
        }
        let edge_colors = |faces: &FaceState, slot: Slot| {
            let mut colors: Vec<Color> = edge_stickers(slot).iter().map(|&pos| faces[pos]).collect();
            colors.sort_by_key(|c| *c as u8);
            colors
        };
        for (slot, piece) in state.registry().iter() {
            if let Some(home) = Slot::iter().nth(piece.0 as usize) {
                if edge_stickers(slot).len() == 2 && edge_stickers(home).len() == 2 {
                    prop_assert_eq!(edge_colors(&solved, home), edge_colors(state.faces(), slot));
                }
            }
        }
    }

    #[test]
    fn proptest_scramble_constraints(seed: u64) {
        let scramble = Scramble::from_seed(seed);
        prop_assert_eq!(MAIN_SCRAMBLE_LENGTH, scramble.main.len());
        prop_assert!(scramble.main.iter().all(|t| t.key.is_layer()));
        prop_assert!(scramble.main.iter().all(|t| t.modifier != Modifier::Double));
        for (a, b) in scramble.main.iter().zip(&scramble.main[1..]) {
            prop_assert_ne!(a.key, b.key);
        }
        prop_assert!(scramble.tips.len() <= 4);
        prop_assert!(scramble.tips.iter().all(|t| !t.key.is_layer()));
        let tip_vertices: Vec<Vertex> = scramble.tips.iter().map(|t| t.key.vertex()).collect();
        prop_assert!(tip_vertices.is_sorted());
        prop_assert!(tip_vertices.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn proptest_token_display_parses_back(token: Token) {
        prop_assert_eq!(Ok(token), token.to_string().parse::<Token>());
    }
}

/// Sticker positions of an edge slot, or an empty array for non-edge slots.
fn edge_stickers(slot: Slot) -> smallvec::SmallVec<[StickerPos; 2]> {
    use Face::{Bottom, Front, Left, Right};
    let pair = |a, i, b, j| smallvec::smallvec![StickerPos::new(a, i), StickerPos::new(b, j)];
    match slot {
        Slot::EdgeFL => pair(Front, 1, Left, 3),
        Slot::EdgeFR => pair(Front, 3, Right, 1),
        Slot::EdgeLR => pair(Left, 1, Right, 3),
        Slot::EdgeFB => pair(Front, 6, Bottom, 6),
        Slot::EdgeLB => pair(Left, 6, Bottom, 3),
        Slot::EdgeRB => pair(Right, 6, Bottom, 1),
        _ => smallvec::SmallVec::new(),
    }
}

#[test]
fn test_solved_check() {
    let mut state = FaceState::solved();
    assert!(state.is_solved());
    state[StickerPos::new(Face::Left, 7)] = R;
    assert!(!state.is_solved());

    // Any uniform coloring counts, not just the default one.
    let recolored = FaceState::from_faces([[B; 9], [B; 9], [Y; 9], [R; 9]]);
    assert!(recolored.is_solved());
}

#[test]
fn test_compact_string() {
    let mut state = FaceState::solved();
    state[StickerPos::new(Face::Bottom, 0)] = Color::Unset;
    assert_eq!(
        "FRONT  RRRRRRRRR\n\
         RIGHT  YYYYYYYYY\n\
         LEFT   GGGGGGGGG\n\
         BOTTOM .BBBBBBBB",
        state.to_compact_string(),
    );
}

#[test]
fn test_layer_u_from_solved() {
    let mut state = PuzzleState::new();
    state.do_move(Move::forward(MoveKey::Layer(Vertex::U)));

    let faces = state.faces();
    assert_eq!([Y, Y, Y, Y, R, R, R, R, R], faces[Face::Front]);
    assert_eq!([G, G, G, G, Y, Y, Y, Y, Y], faces[Face::Right]);
    assert_eq!([R, R, R, R, G, G, G, G, G], faces[Face::Left]);
    assert_eq!([B; 9], faces[Face::Bottom]);

    let registry = state.registry();
    assert_eq!(Piece(Slot::EdgeFL as u8), registry.piece_at(Slot::EdgeLR));
    assert_eq!(Piece(Slot::EdgeLR as u8), registry.piece_at(Slot::EdgeFR));
    assert_eq!(Piece(Slot::EdgeFR as u8), registry.piece_at(Slot::EdgeFL));
    assert_eq!(Piece(Slot::TipU as u8), registry.piece_at(Slot::TipU));
    assert_eq!(Piece(Slot::CenterU as u8), registry.piece_at(Slot::CenterU));
    assert_eq!(Some(Slot::EdgeLR), registry.slot_of(Piece(Slot::EdgeFL as u8)));
}

#[test]
fn test_tip_move_leaves_registry_alone() {
    let mut state = PuzzleState::new();
    for v in Vertex::iter() {
        state.do_move(Move::forward(MoveKey::Tip(v)));
    }
    assert_eq!(&PhysicalRegistry::new(), state.registry());
    assert_eq!(Y, state.faces()[Face::Front][0]);
    assert_eq!(R, state.faces()[Face::Front][1]);
}

#[test]
fn test_gripped_pieces() {
    let registry = PhysicalRegistry::new();
    assert_eq!(1, registry.gripped_pieces(MoveKey::Tip(Vertex::R)).len());
    let gripped = registry.gripped_pieces(MoveKey::Layer(Vertex::R));
    assert_eq!(
        [Slot::TipR, Slot::EdgeFR, Slot::EdgeRB, Slot::EdgeFB, Slot::CenterR]
            .map(|s| Piece(s as u8))
            .as_slice(),
        gripped.as_slice(),
    );
}

#[test]
fn test_unknown_symbol_is_no_op() {
    let mut state = FaceState::solved();
    state.apply(Move::forward(MoveKey::Layer(Vertex::B)));
    let before = state;
    assert!(!state.apply_symbol('x', false));
    assert!(!state.apply_symbol('D', true));
    assert_eq!(before, state);
    assert!(state.apply_symbol('B', true));
    assert!(state.is_solved());
}

#[test]
fn test_snapshot_roundtrip_and_aliases() {
    let mut state = PuzzleState::new();
    state.do_move(Move::forward(MoveKey::Layer(Vertex::L)));
    let snapshot = state.export();
    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: Snapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, parsed);

    let mut other = PuzzleState::new();
    other.import(&parsed).unwrap();
    assert_eq!(state.faces(), other.faces());
    assert_eq!(&PhysicalRegistry::new(), other.registry());

    let french = r#"{
        "FRONT": ["ROUGE","ROUGE","ROUGE","ROUGE","ROUGE","ROUGE","ROUGE","ROUGE","ROUGE"],
        "RIGHT": ["JAUNE","JAUNE","JAUNE","JAUNE","JAUNE","JAUNE","JAUNE","JAUNE","JAUNE"],
        "LEFT": ["VERT","VERT","VERT","VERT","VERT","VERT","VERT","VERT","VERT"],
        "BOTTOM": ["BLEU","BLEU","BLEU","BLEU","BLEU","BLEU","BLEU","BLEU","BLEU"]
    }"#;
    let parsed: Snapshot = serde_json::from_str(french).unwrap();
    assert_eq!(Ok(FaceState::solved()), parsed.to_face_state());
}

#[test]
fn test_snapshot_export_is_a_copy() {
    let state = PuzzleState::new();
    let mut snapshot = state.export();
    if let Some(front) = snapshot.0.get_mut(&Face::Front) {
        front[0] = Color::Blue;
    }
    assert!(state.is_solved());
}

#[test]
fn test_snapshot_rejections() {
    let good = PuzzleState::new().export();
    let mut state = PuzzleState::new();
    state.do_move(Move::forward(MoveKey::Layer(Vertex::U)));
    let before = state.clone();

    let mut missing = good.clone();
    missing.0.remove(&Face::Left);
    assert_eq!(Err(SnapshotError::MissingFace(Face::Left)), state.import(&missing));

    let mut short = good.clone();
    if let Some(stickers) = short.0.get_mut(&Face::Right) {
        stickers.pop();
    }
    assert_eq!(
        Err(SnapshotError::WrongLength {
            face: Face::Right,
            len: 8,
        }),
        state.import(&short),
    );

    let mut unset = good.clone();
    if let Some(stickers) = unset.0.get_mut(&Face::Bottom) {
        stickers[5] = Color::Unset;
    }
    assert_eq!(
        Err(SnapshotError::UnsetColor {
            face: Face::Bottom,
            index: 5,
        }),
        state.import(&unset),
    );

    assert_eq!(before, state);
}

#[test]
fn test_parse_sequence() {
    let tokens: Vec<_> = parse_sequence("U, l'  b2,R'\nu").collect();
    assert_eq!(
        vec![
            Ok(Token::new(MoveKey::Layer(Vertex::U), Modifier::None)),
            Ok(Token::new(MoveKey::Tip(Vertex::L), Modifier::Prime)),
            Ok(Token::new(MoveKey::Tip(Vertex::B), Modifier::Double)),
            Ok(Token::new(MoveKey::Layer(Vertex::R), Modifier::Prime)),
            Ok(Token::new(MoveKey::Tip(Vertex::U), Modifier::None)),
        ],
        tokens,
    );

    assert_eq!(Err(NotationError::UnknownMove('x')), "x'".parse::<Token>());
    assert_eq!(
        Err(NotationError::UnknownModifier {
            token: "U3".to_owned(),
        }),
        "U3".parse::<Token>(),
    );
    assert!(notation::parse_sequence_strict("U F").is_err());
}

#[test]
fn test_double_token_expands_to_two_forward_turns() {
    let token: Token = "r2".parse().unwrap();
    let forward = Move::forward(MoveKey::Tip(Vertex::R));
    assert_eq!([forward, forward].as_slice(), token.moves().as_slice());

    // Same tip position as a single inverse turn.
    let mut doubled = FaceState::solved();
    doubled.apply_all(token.moves());
    assert_eq!(FaceState::solved().applied(forward.rev()), doubled);
}

#[test]
fn test_scramble_is_reproducible() {
    let a = Scramble::from_seed(42);
    let b = Scramble::from_seed(42);
    assert_eq!(a, b);
    assert_eq!(Ok(a.clone()), a.to_string().parse::<Scramble>());
    assert_eq!(
        a.main.len() + a.tips.len(),
        a.to_string().split_whitespace().count(),
    );
}

#[test]
fn test_solve_pace() {
    assert_eq!(SolvePace::Average, SolvePace::from_name_or_default("nonsense"));
    assert_eq!(SolvePace::Pro, SolvePace::from_name_or_default("PRO"));
    assert_eq!(2.0, SolvePace::Robot.estimate_seconds(40));
    assert_eq!(3.0, SolvePace::Average.estimate_seconds(9));
}
