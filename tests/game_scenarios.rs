use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use xtsweep::{
    BestTimes, BoardConfig, ChangeKind, Difficulty, GameSession, Pos, Status, WinPath,
};

fn beginner() -> BoardConfig {
    Difficulty::Beginner.config().unwrap()
}

fn check_invariants(session: &GameSession) {
    let board = session.board();
    for cell in board.cells() {
        assert!(!(cell.flagged && !cell.covered), "flag on uncovered cell");
    }
    let flags = board.cells().iter().filter(|c| c.flagged).count();
    assert_eq!(flags, board.flag_count());
    assert_eq!(
        session.mines_remaining(),
        board.mine_count() as i64 - flags as i64
    );
    if board.is_seeded() {
        let mines = board.cells().iter().filter(|c| c.has_mine).count();
        assert_eq!(mines, board.mine_count());
    }
}

#[test]
fn opening_move_on_beginner_is_never_a_mine() {
    for seed in 0..100 {
        let mut s = GameSession::with_seed(beginner(), seed);
        let outcome = s.reveal(Pos::new(4, 4));
        assert!(!s.board().cell(Pos::new(4, 4)).unwrap().has_mine);
        assert!(matches!(outcome.status, Status::Active | Status::Won));
        assert_eq!(s.board().mine_positions().len(), 10);
        check_invariants(&s);
    }
}

#[test]
fn corner_mine_flood_stops_at_ring_of_ones() {
    let mut s = GameSession::with_layout(beginner(), &[Pos::new(0, 0)]);
    let board = s.board();
    for p in [Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)] {
        assert_eq!(board.cell(p).unwrap().adjacent_mines, Some(1));
    }
    assert_eq!(board.cell(Pos::new(2, 2)).unwrap().adjacent_mines, None);

    let outcome = s.reveal(Pos::new(2, 2));
    let uncovered = outcome
        .changes
        .iter()
        .filter(|c| c.kind == ChangeKind::Uncovered)
        .count();
    // 80 safe cells by the flood, then the lone mine is flagged by the win sweep
    assert_eq!(uncovered, 80);
    assert_eq!(outcome.status, Status::Won);
    assert!(s.board().cell(Pos::new(0, 0)).unwrap().covered);
}

#[test]
fn flagging_all_ten_mines_wins() {
    let mines: Vec<Pos> = (0..9)
        .map(|c| Pos::new(0, c))
        .chain(std::iter::once(Pos::new(8, 8)))
        .collect();
    let mut s = GameSession::with_layout(beginner(), &mines);
    for &p in &mines {
        s.toggle_flag(p);
        check_invariants(&s);
    }
    assert_eq!(s.mines_remaining(), 0);
    assert_eq!(s.status(), Status::Won);
    assert_eq!(s.win_path(), Some(WinPath::AllMinesFlagged));
    assert_eq!(s.board().covered_count(), 10);
}

#[test]
fn lost_session_ignores_everything_but_new_game() {
    let mut s = GameSession::with_layout(beginner(), &[Pos::new(3, 3)]);
    let outcome = s.reveal(Pos::new(3, 3));
    assert_eq!(outcome.status, Status::Lost);

    for r in 0..9 {
        assert!(s.toggle_flag(Pos::new(r, 0)).is_noop());
        assert!(s.reveal(Pos::new(r, 1)).is_noop());
    }
    assert_eq!(s.status(), Status::Lost);

    s.new_game(beginner());
    assert_eq!(s.status(), Status::NotStarted);
    assert!(!s.reveal(Pos::new(4, 4)).is_noop());
}

#[test]
fn random_play_keeps_invariants() {
    for seed in 0..30u64 {
        let config = Difficulty::PRESETS[(seed % 3) as usize].config().unwrap();
        let mut s = GameSession::with_seed(config, seed);
        let mut rng = StdRng::seed_from_u64(seed + 1000);

        for _ in 0..400 {
            if s.status().is_terminal() {
                break;
            }
            let pos = Pos::new(
                rng.gen_range(0..config.rows()),
                rng.gen_range(0..config.columns()),
            );
            let before = s.mines_remaining();
            let outcome = if rng.gen_range(0..4) == 0 {
                s.toggle_flag(pos)
            } else {
                s.reveal(pos)
            };
            check_invariants(&s);

            // the counter moves exactly by the flag changes reported
            let delta: i64 = outcome
                .changes
                .iter()
                .map(|c| match c.kind {
                    ChangeKind::Flagged => -1,
                    ChangeKind::Unflagged => 1,
                    ChangeKind::Uncovered => 0,
                })
                .sum();
            assert_eq!(s.mines_remaining(), before + delta);
        }

        match s.status() {
            Status::Won => {
                let report = s.win_report().unwrap();
                assert_eq!(report.difficulty, config.difficulty());
                let mut best = BestTimes::default();
                assert!(best.submit_report(&report));
            }
            Status::Lost => {
                for p in s.board().mine_positions() {
                    assert!(!s.board().cell(p).unwrap().covered);
                }
            }
            _ => {}
        }
    }
}

#[test]
fn repeated_reveal_is_idempotent() {
    for seed in 0..20 {
        let mut s = GameSession::with_seed(beginner(), seed);
        s.reveal(Pos::new(0, 0));
        if s.status().is_terminal() {
            continue;
        }
        let snapshot = s.board().cells().to_vec();
        assert!(s.reveal(Pos::new(0, 0)).is_noop());
        assert_eq!(s.board().cells(), &snapshot[..]);
    }
}

#[test]
fn double_toggle_restores_state() {
    let mut s = GameSession::with_seed(beginner(), 11);
    s.reveal(Pos::new(4, 4));
    if s.status().is_terminal() {
        return;
    }
    let covered = (0..81)
        .map(|i| Pos::new(i / 9, i % 9))
        .find(|&p| s.board().cell(p).unwrap().covered && !s.board().cell(p).unwrap().has_mine)
        .unwrap();
    let snapshot = s.board().cells().to_vec();
    let remaining = s.mines_remaining();

    s.toggle_flag(covered);
    s.toggle_flag(covered);

    assert_eq!(s.board().cells(), &snapshot[..]);
    assert_eq!(s.mines_remaining(), remaining);
}
