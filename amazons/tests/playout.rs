use amazons::{engine, Cell, Engine, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::str::FromStr;

fn check_consistent(engine: &Engine) {
    let fen = engine.as_fen();
    let parsed = Engine::from_fen(&fen).unwrap();
    assert_eq!(parsed.as_fen(), fen);
    assert_eq!(parsed.board(), engine.board());
    assert_eq!(parsed.moves(), engine.moves());
    assert_eq!(Engine::from_state(&engine.state()).unwrap().as_fen(), fen);

    let board = engine.board();
    for cell in [Cell::White, Cell::Black, Cell::Arrow] {
        let mut listed = board.pieces(cell).to_vec();
        listed.sort();
        let mut scanned: Vec<_> = board.squares().filter(|&sq| board.get(sq) == cell).collect();
        scanned.sort();
        assert_eq!(listed, scanned, "{:?} list diverged from the grid", cell);
    }
    if let Some(sq) = engine.shooting() {
        assert_eq!(board.get(sq), Cell::queen(engine.turn()));
    }
}

fn playout(start: &str, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = Engine::from_fen(start).unwrap();
    let mut fens = vec![engine.as_fen()];

    while let Some(&mv) = engine.moves().choose(&mut rng) {
        assert_eq!(Move::from_str(&mv.to_string()), Ok(mv));

        // Sometimes merge the queen move and the shot into one full move
        let mv = match mv {
            Move::Queen { from, to } if rng.gen_bool(0.5) => {
                let mut probe = engine.clone();
                probe.make_move(mv);
                match probe.moves().choose(&mut rng) {
                    Some(&Move::Shot { at }) => Move::Full { from, to, at },
                    _ => mv,
                }
            }
            _ => mv,
        };

        let before = engine.clone();
        engine.push(mv).unwrap();
        check_consistent(&engine);

        let mut back = engine.clone();
        assert_eq!(back.undo(), Some(mv));
        assert_eq!(back, before);

        fens.push(engine.as_fen());
    }

    assert!(engine.is_game_over());
    assert_eq!(engine.winner(), Some(engine.turn().inv()));
    assert_eq!(engine.shooting(), None);

    fens.pop();
    while let Some(fen) = fens.pop() {
        assert!(engine.undo().is_some());
        assert_eq!(engine.as_fen(), fen);
    }
    assert_eq!(engine.undo(), None);
    assert_eq!(engine.as_fen(), start);
}

#[test]
fn test_playout_default() {
    for seed in 0..4 {
        playout(engine::DEFAULT_10, seed);
    }
}

#[test]
fn test_playout_small() {
    for seed in 0..16 {
        playout(engine::DEFAULT_6, seed);
        playout(engine::DEFAULT_8, seed);
    }
}

#[test]
fn test_playout_rectangular() {
    for seed in 0..8 {
        playout("b4/5/5/4w w - 1", seed);
        playout("1b2b2b/8/8/1w2w2w b - 3", seed);
    }
}

#[test]
fn test_half_undo_playout() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut engine = Engine::initial(8).unwrap();
    for _ in 0..20 {
        let &queen = engine.moves().choose(&mut rng).unwrap();
        engine.make_move(queen);
        let &shot = engine.moves().choose(&mut rng).unwrap();
        let (to, full) = match (queen, shot) {
            (Move::Queen { from, to }, Move::Shot { at }) => (to, Move::Full { from, to, at }),
            _ => unreachable!(),
        };
        engine.half_undo();
        engine.half_undo();

        engine.make_move(full);
        let after_full = engine.as_fen();
        assert_eq!(engine.half_undo(), Some(shot));
        assert_eq!(engine.shooting(), Some(to));
        engine.make_move(shot);
        assert_eq!(engine.as_fen(), after_full);
        if engine.is_game_over() {
            break;
        }
    }
}
