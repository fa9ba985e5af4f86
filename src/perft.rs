//! Perft: exhaustive legal-move counting against published reference
//! numbers. This is the oracle that keeps the generator, the legality
//! filter and the executor honest with each other.

use tracing::debug;

use crate::chess_move::Move;
use crate::movegen::{self, Scope};
use crate::position::Position;

/// Count the leaf nodes of the legal move tree to `depth`.
pub fn perft(position: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in movegen::generate(position, Scope::default()) {
        if !position.is_legal(mv) {
            continue;
        }
        if depth == 1 {
            nodes += 1;
            continue;
        }
        let undo = position.apply(mv);
        nodes += perft(position, depth - 1);
        position.revert(mv, undo);
    }
    nodes
}

/// Perft split by root move, for pinpointing a divergence.
pub fn divide(position: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    let mut counts = Vec::new();
    for mv in movegen::generate(position, Scope::default()) {
        if !position.is_legal(mv) {
            continue;
        }
        let undo = position.apply(mv);
        let nodes = perft(position, depth.saturating_sub(1));
        position.revert(mv, undo);
        debug!(mv = %mv, nodes, "divide");
        counts.push((mv, nodes));
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::{divide, perft};
    use crate::position::Position;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn expect(fen: &str, depth: u32, nodes: u64) {
        let mut position: Position = fen.parse().unwrap();
        assert_eq!(
            perft(&mut position, depth),
            nodes,
            "perft({depth}) mismatch for {fen}"
        );
        // The tree walk must leave the position untouched.
        assert_eq!(position.to_string(), fen.parse::<Position>().unwrap().to_string());
    }

    #[test]
    fn starting_position_shallow() {
        let mut position = Position::new();
        assert_eq!(perft(&mut position, 0), 1);
        assert_eq!(perft(&mut position, 1), 20);
        assert_eq!(perft(&mut position, 2), 400);
        assert_eq!(perft(&mut position, 3), 8_902);
    }

    #[test]
    fn starting_position_depth_4() {
        let mut position = Position::new();
        assert_eq!(perft(&mut position, 4), 197_281);
    }

    #[test]
    #[ignore = "slow; run with --ignored"]
    fn starting_position_depth_5() {
        let mut position = Position::new();
        assert_eq!(perft(&mut position, 5), 4_865_609);
    }

    #[test]
    fn kiwipete_shallow() {
        expect(KIWIPETE, 1, 48);
        expect(KIWIPETE, 2, 2_039);
    }

    #[test]
    fn kiwipete_depth_3() {
        expect(KIWIPETE, 3, 97_862);
    }

    #[test]
    #[ignore = "slow; run with --ignored"]
    fn kiwipete_depth_4() {
        expect(KIWIPETE, 4, 4_085_603);
    }

    #[test]
    fn position_3_exercises_en_passant_pins() {
        expect(POSITION_3, 1, 14);
        expect(POSITION_3, 2, 191);
        expect(POSITION_3, 3, 2_812);
        expect(POSITION_3, 4, 43_238);
    }

    #[test]
    fn position_4_exercises_promotions() {
        expect(POSITION_4, 1, 6);
        expect(POSITION_4, 2, 264);
        expect(POSITION_4, 3, 9_467);
    }

    #[test]
    fn position_5_shallow() {
        expect(POSITION_5, 1, 44);
        expect(POSITION_5, 2, 1_486);
        expect(POSITION_5, 3, 62_379);
    }

    #[test]
    #[ignore = "slow; run with --ignored"]
    fn position_5_depth_4() {
        expect(POSITION_5, 4, 2_103_487);
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut position = Position::new();
        let split = divide(&mut position, 3);
        assert_eq!(split.len(), 20);
        let total: u64 = split.iter().map(|(_, nodes)| nodes).sum();
        assert_eq!(total, 8_902);
    }
}
