//! Unit tests for ctf-behavior.

use std::collections::HashSet;

use ctf_core::{AgentId, Cell, Direction, Team};

use crate::{
    AgentRole, BehaviorMode, DistanceOracle, GameView, ModeMachine, OpponentView,
    SituationSnapshot, Tuning,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Open 20×10 board with Manhattan distances.  Red owns `x < 10`.
///
/// Agents 0 and 2 are red, 1 and 3 blue.  Food and capsules are single
/// lists; their owner is whichever half they lie on.
#[derive(Clone)]
struct FakeBoard {
    walls:     HashSet<Cell>,
    positions: Vec<Cell>,
    headings:  Vec<Direction>,
    carried:   Vec<u32>,
    scared:    Vec<u32>,
    hidden:    HashSet<AgentId>,
    food:      Vec<Cell>,
    capsules:  Vec<Cell>,
}

const WIDTH: i32 = 20;
const HEIGHT: i32 = 10;

impl FakeBoard {
    fn new() -> Self {
        Self {
            walls:     HashSet::new(),
            positions: vec![Cell::new(1, 1), Cell::new(18, 8), Cell::new(1, 8), Cell::new(18, 1)],
            headings:  vec![Direction::Stop; 4],
            carried:   vec![0; 4],
            scared:    vec![0; 4],
            hidden:    HashSet::new(),
            food:      vec![],
            capsules:  vec![],
        }
    }

    fn place(mut self, agent: u32, cell: Cell) -> Self {
        self.positions[agent as usize] = cell;
        self
    }

    fn hide(mut self, agent: u32) -> Self {
        self.hidden.insert(AgentId(agent));
        self
    }

    fn hide_opponents_of(self, agent: u32) -> Self {
        let mut board = self;
        for other in 0..4u32 {
            if other % 2 != agent % 2 {
                board = board.hide(other);
            }
        }
        board
    }

    fn with_food(mut self, cells: &[Cell]) -> Self {
        self.food.extend_from_slice(cells);
        self
    }

    fn with_capsules(mut self, cells: &[Cell]) -> Self {
        self.capsules.extend_from_slice(cells);
        self
    }

    fn carrying(mut self, agent: u32, n: u32) -> Self {
        self.carried[agent as usize] = n;
        self
    }

    fn heading(mut self, agent: u32, dir: Direction) -> Self {
        self.headings[agent as usize] = dir;
        self
    }

    fn in_bounds(&self, c: Cell) -> bool {
        c.x >= 0 && c.x < WIDTH && c.y >= 0 && c.y < HEIGHT
    }
}

impl DistanceOracle for FakeBoard {
    fn distance(&self, a: Cell, b: Cell) -> u32 {
        a.manhattan(b)
    }
}

impl GameView for FakeBoard {
    fn width(&self) -> i32 {
        WIDTH
    }

    fn height(&self) -> i32 {
        HEIGHT
    }

    fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    fn legal_moves(&self, agent: AgentId) -> Vec<Direction> {
        let at = self.positions[agent.index()];
        Direction::ALL
            .into_iter()
            .filter(|&d| {
                let to = at.step(d);
                self.in_bounds(to) && !self.walls.contains(&to)
            })
            .collect()
    }

    fn apply_move(&self, agent: AgentId, dir: Direction) -> Self {
        let mut next = self.clone();
        let i = agent.index();
        let to = next.positions[i].step(dir);
        next.positions[i] = to;
        next.headings[i] = dir;
        if !Team::for_agent(agent).is_home(to, WIDTH) {
            if let Some(k) = next.food.iter().position(|&f| f == to) {
                next.food.remove(k);
                next.carried[i] += 1;
            }
            next.capsules.retain(|&c| c != to);
        }
        next
    }

    fn position(&self, agent: AgentId) -> Cell {
        self.positions[agent.index()]
    }

    fn heading(&self, agent: AgentId) -> Direction {
        self.headings[agent.index()]
    }

    fn carried(&self, agent: AgentId) -> u32 {
        self.carried[agent.index()]
    }

    fn scared_turns(&self, agent: AgentId) -> u32 {
        self.scared[agent.index()]
    }

    fn visible_opponents(&self, agent: AgentId) -> Vec<OpponentView> {
        (0..4u32)
            .map(AgentId)
            .filter(|&o| o.0 % 2 != agent.0 % 2)
            .map(|o| OpponentView {
                id:           o,
                position:     (!self.hidden.contains(&o)).then(|| self.positions[o.index()]),
                scared_turns: self.scared[o.index()],
            })
            .collect()
    }

    fn food(&self, team: Team) -> Vec<Cell> {
        self.food.iter().copied().filter(|&c| team.is_home(c, WIDTH)).collect()
    }

    fn capsules(&self, team: Team) -> Vec<Cell> {
        self.capsules.iter().copied().filter(|&c| team.is_home(c, WIDTH)).collect()
    }
}

/// Enough blue-side food that the end-game override stays off.
fn blue_food() -> Vec<Cell> {
    vec![Cell::new(13, 8), Cell::new(14, 8), Cell::new(16, 8), Cell::new(17, 8)]
}

fn tuning(panic: u32, safe: u32) -> Tuning {
    let mut t = Tuning::default();
    t.offense.panic_distance = panic;
    t.offense.safe_distance = safe;
    t
}

fn offense_mode_at(board: &FakeBoard, tuning: &Tuning) -> BehaviorMode {
    let snap = SituationSnapshot::observe(board, AgentId(0));
    ModeMachine::with_baseline(AgentRole::Offense, snap.enemy_capsules.len())
        .advance(AgentRole::Offense, &snap, board, tuning)
        .mode
}

/// Red attacker at (12, 1); blue ghost exactly `d` steps away on its own half.
fn threat_board(d: i32) -> FakeBoard {
    let dx = d.min(7);
    FakeBoard::new()
        .place(0, Cell::new(12, 1))
        .place(1, Cell::new(12 + dx, 1 + d - dx))
        .hide(3)
        .with_food(&blue_food())
        .with_capsules(&[Cell::new(18, 2)])
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod snapshot_tests {
    use super::*;
    use crate::{NO_INVADER_DISTANCE, UNSEEN_THREAT_DISTANCE};

    #[test]
    fn threat_board_places_ghost_at_requested_distance() {
        for d in 1..=12 {
            let board = threat_board(d);
            let snap = SituationSnapshot::observe(&board, AgentId(0));
            assert_eq!(snap.nearest_threat(&board), Some(d as u32), "d = {d}");
        }
    }

    #[test]
    fn unseen_opponents_use_sentinels() {
        let board = FakeBoard::new().place(0, Cell::new(12, 5)).hide_opponents_of(0);
        let snap = SituationSnapshot::observe(&board, AgentId(0));
        assert_eq!(snap.nearest_threat(&board), None);
        assert_eq!(snap.threat_distance(&board), UNSEEN_THREAT_DISTANCE);
        assert_eq!(snap.invader_distance(&board), NO_INVADER_DISTANCE);
    }

    #[test]
    fn scared_ghost_is_not_a_threat() {
        let mut board = threat_board(2);
        board.scared[1] = 20;
        let snap = SituationSnapshot::observe(&board, AgentId(0));
        assert_eq!(snap.nearest_threat(&board), None);
    }

    #[test]
    fn opponent_on_our_half_is_invader_not_threat() {
        let board = FakeBoard::new()
            .place(2, Cell::new(5, 5))
            .place(1, Cell::new(7, 5))
            .hide(3);
        let snap = SituationSnapshot::observe(&board, AgentId(2));
        assert_eq!(snap.invader_count(), 1);
        assert_eq!(snap.invader_distance(&board), 2);
        assert_eq!(snap.threats().count(), 0);
    }

    #[test]
    fn sides_and_collectibles_split_by_team() {
        let board = FakeBoard::new()
            .place(0, Cell::new(12, 5))
            .with_food(&[Cell::new(2, 2), Cell::new(15, 5)])
            .with_capsules(&[Cell::new(3, 3), Cell::new(18, 2)]);
        let snap = SituationSnapshot::observe(&board, AgentId(0));
        assert!(snap.on_enemy_side());
        assert_eq!(snap.enemy_food, vec![Cell::new(15, 5)]);
        assert_eq!(snap.own_capsules, vec![Cell::new(3, 3)]);
        assert_eq!(snap.enemy_capsules, vec![Cell::new(18, 2)]);
        assert_eq!(snap.home_line_x, 9);
        assert_eq!(snap.nearest_food(&board), Some(3));
    }
}

// ── Mode machine ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod machine_tests {
    use super::*;

    #[test]
    fn carry_overload_always_runs() {
        let t = Tuning::default();
        for d in [1, 3, 5, 8, 12] {
            let board = threat_board(d).carrying(0, t.offense.carry_threshold + 1);
            assert_eq!(offense_mode_at(&board, &t), BehaviorMode::Running, "d = {d}");
        }
        let unseen = threat_board(3).hide(1).carrying(0, 9);
        assert_eq!(offense_mode_at(&unseen, &t), BehaviorMode::Running);
        let at_home = threat_board(3).place(0, Cell::new(4, 4)).carrying(0, 7);
        assert_eq!(offense_mode_at(&at_home, &t), BehaviorMode::Running);
    }

    #[test]
    fn carrying_exactly_threshold_does_not_force_run() {
        let t = Tuning::default();
        let board = threat_board(12).carrying(0, t.offense.carry_threshold);
        assert_eq!(offense_mode_at(&board, &t), BehaviorMode::Safe);
    }

    #[test]
    fn no_visible_opponents_on_enemy_side_is_safe() {
        let t = Tuning::default();
        let board = threat_board(2).hide(1);
        assert_eq!(offense_mode_at(&board, &t), BehaviorMode::Safe);
    }

    #[test]
    fn home_side_is_safe_even_next_to_a_ghost() {
        let t = Tuning::default();
        let board = FakeBoard::new()
            .place(0, Cell::new(9, 5))
            .place(1, Cell::new(10, 5))
            .hide(3)
            .with_food(&blue_food());
        assert_eq!(offense_mode_at(&board, &t), BehaviorMode::Safe);
    }

    #[test]
    fn boundaries_are_closed_on_the_safer_side() {
        let t = tuning(4, 10);
        assert_eq!(offense_mode_at(&threat_board(10), &t), BehaviorMode::Safe);
        assert_eq!(offense_mode_at(&threat_board(9), &t), BehaviorMode::Cautious);
        assert_eq!(offense_mode_at(&threat_board(5), &t), BehaviorMode::Cautious);
        assert_eq!(offense_mode_at(&threat_board(4), &t), BehaviorMode::Evading);
    }

    #[test]
    fn approaching_threat_never_relaxes_the_mode() {
        let t = tuning(4, 10);
        let rank = |m: BehaviorMode| match m {
            BehaviorMode::Safe     => 0,
            BehaviorMode::Cautious => 1,
            BehaviorMode::Evading  => 2,
            other => panic!("unexpected mode {other}"),
        };
        let mut last = 0;
        for d in (1..=12).rev() {
            let r = rank(offense_mode_at(&threat_board(d), &t));
            assert!(r >= last, "mode relaxed at distance {d}");
            last = r;
        }
        assert_eq!(last, 2);
    }

    #[test]
    fn panic_example_evades() {
        let t = tuning(6, 10);
        let board = threat_board(3).carrying(0, 2);
        assert_eq!(offense_mode_at(&board, &t), BehaviorMode::Evading);
    }

    #[test]
    fn panic_without_capsules_runs() {
        let t = tuning(6, 10);
        let mut board = threat_board(3);
        board.capsules.clear();
        assert_eq!(offense_mode_at(&board, &t), BehaviorMode::Running);
    }

    #[test]
    fn advance_is_pure() {
        let t = Tuning::default();
        let board = threat_board(2);
        let snap = SituationSnapshot::observe(&board, AgentId(0));
        let machine = ModeMachine::with_baseline(AgentRole::Offense, 1);
        let a = machine.advance(AgentRole::Offense, &snap, &board, &t);
        let b = machine.advance(AgentRole::Offense, &snap, &board, &t);
        assert_eq!(a, b);
        assert_eq!(machine.mode, BehaviorMode::Safe);
    }

    #[test]
    fn capsule_window_counts_down_then_rushes_home() {
        let t = Tuning::default();
        let mut board = threat_board(12);
        let mut machine = ModeMachine::with_baseline(AgentRole::Offense, 1);
        board.capsules.clear();

        let mut behaved = Vec::new();
        for _turn in 1..=41 {
            let snap = SituationSnapshot::observe(&board, AgentId(0));
            machine = machine.advance(AgentRole::Offense, &snap, &board, &t);
            behaved.push(machine.mode.delegate(snap.enemy_capsules.len(), &t.offense));
        }

        assert_eq!(machine.mode, BehaviorMode::Safe, "window closes on turn 41");
        assert!(behaved[..33].iter().all(|&m| m == BehaviorMode::Safe));
        assert!(behaved[33..40].iter().all(|&m| m == BehaviorMode::Running));
    }

    #[test]
    fn capsule_window_rushes_next_capsule_when_one_remains() {
        let t = Tuning::default();
        let mut board = threat_board(12).with_capsules(&[Cell::new(17, 1)]);
        let mut machine = ModeMachine::with_baseline(AgentRole::Offense, 2);
        board.capsules.retain(|&c| c != Cell::new(18, 2));

        let snap = SituationSnapshot::observe(&board, AgentId(0));
        machine = machine.advance(AgentRole::Offense, &snap, &board, &t);
        assert_eq!(machine.mode, BehaviorMode::SuperSafe { window_left: 40 });

        for _ in 0..33 {
            machine = machine.advance(AgentRole::Offense, &snap, &board, &t);
        }
        assert_eq!(machine.mode, BehaviorMode::SuperSafe { window_left: 7 });
        assert_eq!(machine.mode.delegate(1, &t.offense), BehaviorMode::Evading);
    }

    #[test]
    fn capsule_window_outranks_carry_overload() {
        let t = Tuning::default();
        let board = threat_board(2).carrying(0, 20);
        let snap = SituationSnapshot::observe(&board, AgentId(0));
        let machine = ModeMachine {
            mode:                BehaviorMode::SuperSafe { window_left: 20 },
            last_enemy_capsules: Some(1),
        };
        let next = machine.advance(AgentRole::Offense, &snap, &board, &t);
        assert_eq!(next.mode, BehaviorMode::SuperSafe { window_left: 19 });
    }

    #[test]
    fn second_capsule_restarts_the_window() {
        let t = Tuning::default();
        let board = threat_board(12).with_capsules(&[Cell::new(17, 1)]);
        let snap = SituationSnapshot::observe(&board, AgentId(0));
        let running = ModeMachine {
            mode:                BehaviorMode::SuperSafe { window_left: 12 },
            last_enemy_capsules: Some(3),
        };

        let renewed = running.advance(AgentRole::Offense, &snap, &board, &t);
        assert_eq!(renewed.mode, BehaviorMode::SuperSafe { window_left: 40 });
        assert!(running.window_restarted(&renewed));

        let ticking = renewed.advance(AgentRole::Offense, &snap, &board, &t);
        assert_eq!(ticking.mode, BehaviorMode::SuperSafe { window_left: 39 });
        assert!(!renewed.window_restarted(&ticking));
        assert!(!ModeMachine::new(AgentRole::Offense).window_restarted(&renewed));
    }

    #[test]
    fn first_observation_is_not_a_capsule_event() {
        let t = Tuning::default();
        let board = threat_board(12);
        let snap = SituationSnapshot::observe(&board, AgentId(0));
        let next = ModeMachine::new(AgentRole::Offense).advance(AgentRole::Offense, &snap, &board, &t);
        assert_eq!(next.mode, BehaviorMode::Safe);
        assert_eq!(next.last_enemy_capsules, Some(1));
    }

    #[test]
    fn defense_pursues_only_visible_invaders() {
        let t = Tuning::default();
        let board = FakeBoard::new().place(2, Cell::new(5, 5)).place(1, Cell::new(7, 5)).hide(3);
        let snap = SituationSnapshot::observe(&board, AgentId(2));
        let m = ModeMachine::new(AgentRole::Defense);
        assert_eq!(m.advance(AgentRole::Defense, &snap, &board, &t).mode, BehaviorMode::Pursuing);

        let hidden = board.clone().hide(1);
        let snap = SituationSnapshot::observe(&hidden, AgentId(2));
        assert_eq!(m.advance(AgentRole::Defense, &snap, &hidden, &t).mode, BehaviorMode::Returning);

        let ghost_at_home = board.place(1, Cell::new(15, 5));
        let snap = SituationSnapshot::observe(&ghost_at_home, AgentId(2));
        assert_eq!(
            m.advance(AgentRole::Defense, &snap, &ghost_at_home, &t).mode,
            BehaviorMode::Returning
        );
    }

    #[test]
    fn scared_defender_flees_only_when_enabled() {
        let mut t = Tuning::default();
        let mut board = FakeBoard::new().place(2, Cell::new(5, 5)).place(1, Cell::new(7, 5)).hide(3);
        board.scared[2] = 12;
        let snap = SituationSnapshot::observe(&board, AgentId(2));
        let m = ModeMachine::new(AgentRole::Defense);
        assert_eq!(m.advance(AgentRole::Defense, &snap, &board, &t).mode, BehaviorMode::Pursuing);
        t.defense.flee_when_scared = true;
        assert_eq!(m.advance(AgentRole::Defense, &snap, &board, &t).mode, BehaviorMode::Scared);
    }
}

// ── Features and weights ──────────────────────────────────────────────────────

#[cfg(test)]
mod feature_tests {
    use super::*;
    use crate::{Feature, FeatureExtractor, FeatureVector, WeightTable};

    const ALL_MODES: [BehaviorMode; 8] = [
        BehaviorMode::Safe,
        BehaviorMode::Cautious,
        BehaviorMode::Running,
        BehaviorMode::Evading,
        BehaviorMode::SuperSafe { window_left: 20 },
        BehaviorMode::Pursuing,
        BehaviorMode::Returning,
        BehaviorMode::Scared,
    ];

    fn features(mode: BehaviorMode, board: &FakeBoard, agent: u32, mv: Direction) -> FeatureVector {
        let t = Tuning::default();
        let id = AgentId(agent);
        let before = SituationSnapshot::observe(board, id);
        let after = SituationSnapshot::observe(&board.apply_move(id, mv), id);
        FeatureExtractor::new(board, &t, Cell::new(6, 6)).extract(mode, &before, &after, mv)
    }

    #[test]
    fn safe_collects_and_ignores_enemy() {
        let board = threat_board(3);
        let f = features(BehaviorMode::Safe, &board, 0, Direction::North);
        // (12, 2) → nearest food (13, 8) is 7 away.
        assert_eq!(f.get(Feature::DistanceToFood), Some(7.0));
        assert_eq!(f.get(Feature::SuccessorScore), Some(-4.0));
        assert_eq!(f.get(Feature::DistanceToEnemy), Some(0.0));
        assert!(!f.contains(Feature::ChoicesAvailable));
    }

    #[test]
    fn eating_food_raises_successor_score() {
        let board = threat_board(12).place(0, Cell::new(13, 7));
        let ate = features(BehaviorMode::Safe, &board, 0, Direction::North);
        let missed = features(BehaviorMode::Safe, &board, 0, Direction::South);
        assert_eq!(ate.get(Feature::SuccessorScore), Some(-3.0));
        let w = WeightTable::for_mode(BehaviorMode::Safe);
        assert!(w.dot(&ate) > w.dot(&missed));
    }

    #[test]
    fn cautious_amplifies_threat_distance() {
        let board = threat_board(6);
        let f = features(BehaviorMode::Cautious, &board, 0, Direction::West);
        assert_eq!(f.get(Feature::DistanceToEnemy), Some(14.0));
        assert_eq!(f.get(Feature::ChoicesAvailable), Some(5.0));
    }

    #[test]
    fn running_pulls_toward_retreat_column() {
        // Red home line is x = 9; retreat depth 3 → target column 6.
        let board = threat_board(3);
        let west = features(BehaviorMode::Running, &board, 0, Direction::West);
        let east = features(BehaviorMode::Running, &board, 0, Direction::East);
        assert_eq!(west.get(Feature::SuccessorScore), Some(-5.0));
        assert_eq!(east.get(Feature::SuccessorScore), Some(-7.0));
        let w = WeightTable::for_mode(BehaviorMode::Running);
        assert!(w.dot(&west) > w.dot(&east));
    }

    #[test]
    fn evading_measures_capsule_distance() {
        let board = threat_board(3);
        let f = features(BehaviorMode::Evading, &board, 0, Direction::South);
        // (12, 0) → capsule (18, 2).
        assert_eq!(f.get(Feature::SuccessorScore), Some(-8.0));
        assert_eq!(f.get(Feature::DistanceToEnemy), Some(4.0));
    }

    #[test]
    fn pursuing_flags_reversals() {
        let board = FakeBoard::new()
            .place(2, Cell::new(5, 5))
            .place(1, Cell::new(8, 5))
            .hide(3)
            .heading(2, Direction::East);
        let back = features(BehaviorMode::Pursuing, &board, 2, Direction::West);
        let on = features(BehaviorMode::Pursuing, &board, 2, Direction::East);
        assert_eq!(back.get(Feature::Reverse), Some(1.0));
        assert_eq!(on.get(Feature::Reverse), Some(-1.0));
        assert_eq!(on.get(Feature::NumInvaders), Some(1.0));
        assert_eq!(on.get(Feature::InvaderDistance), Some(2.0));
        let w = WeightTable::for_mode(BehaviorMode::Pursuing);
        assert!(w.dot(&on) > w.dot(&back));
    }

    #[test]
    fn returning_measures_patrol_distance() {
        let board = FakeBoard::new().place(2, Cell::new(2, 2)).hide_opponents_of(2);
        let f = features(BehaviorMode::Returning, &board, 2, Direction::East);
        assert_eq!(f.get(Feature::DistanceToMiddle), Some(7.0));
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn every_populated_feature_is_weighted() {
        let offense_board = threat_board(3);
        let defense_board = FakeBoard::new()
            .place(2, Cell::new(5, 5))
            .place(1, Cell::new(8, 5))
            .with_food(&blue_food());
        for mode in ALL_MODES {
            let (board, agent) = match mode.role() {
                AgentRole::Offense => (&offense_board, 0),
                AgentRole::Defense => (&defense_board, 2),
            };
            let f = features(mode, board, agent, Direction::North);
            assert!(!f.is_empty(), "{mode} produced no features");
            let w = WeightTable::for_mode(mode);
            for (feature, _) in f.iter() {
                assert_ne!(w.weight(feature), 0.0, "{mode} leaves {feature} unweighted");
            }
        }
    }

    #[test]
    fn evading_weights_match_tuned_table() {
        let w = WeightTable::for_mode(BehaviorMode::Evading);
        assert_eq!(w.weight(Feature::SuccessorScore), 50.0);
        assert_eq!(w.weight(Feature::ChoicesAvailable), 70.0);
        assert_eq!(w.weight(Feature::DistanceToEnemy), 70.0);
        assert_eq!(w.weight(Feature::DistanceToFood), 0.0);
    }

    #[test]
    fn absent_keys_contribute_nothing() {
        let w = WeightTable::for_mode(BehaviorMode::Pursuing);
        let f = FeatureVector::new().with(Feature::DistanceToFood, 50.0);
        assert_eq!(w.dot(&f), 0.0);
    }

    #[test]
    fn feature_names_are_the_wire_vocabulary() {
        assert_eq!(Feature::ChoicesAvailable.name(), "choicesAvailable");
        assert_eq!(Feature::from_name("invaderDistance"), Some(Feature::InvaderDistance));
        assert_eq!(Feature::from_name("crossSides"), None);
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod selection_tests {
    use crate::evaluate::{select_best, select_nearest};

    #[test]
    fn ties_keep_enumeration_order() {
        assert_eq!(select_best(&[('a', 1.0), ('b', 3.0), ('c', 3.0)]), Some('b'));
        assert_eq!(select_nearest(&[('a', 4), ('b', 2), ('c', 2)]), Some('b'));
    }

    #[test]
    fn empty_input_selects_nothing() {
        assert_eq!(select_best::<char>(&[]), None);
        assert_eq!(select_nearest::<char>(&[]), None);
    }

    #[test]
    fn negative_scores_are_compared_normally() {
        assert_eq!(select_best(&[('a', -205.0), ('b', -203.0), ('c', -210.0)]), Some('b'));
    }
}

// ── ReflexAgent ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod agent_tests {
    use super::*;
    use crate::evaluate::select_best;
    use crate::{BehaviorError, ReflexAgent, WeightTable};

    fn started(role: AgentRole, id: u32, board: &FakeBoard, tuning: Tuning) -> ReflexAgent {
        let mut agent = ReflexAgent::new(AgentId(id), role, tuning);
        agent.on_game_start(board);
        agent
    }

    #[test]
    fn stop_is_never_a_candidate() {
        let board = threat_board(12);
        let mut agent = started(AgentRole::Offense, 0, &board, Tuning::default());
        let decision = agent.decide(&board).unwrap();
        assert_eq!(decision.candidates.len(), 4);
        assert!(decision.candidates.iter().all(|c| c.direction != Direction::Stop));
        assert_ne!(decision.chosen, Direction::Stop);
    }

    #[test]
    fn evading_example_scores_with_evading_table() {
        let board = threat_board(3).carrying(0, 2);
        let mut agent = started(AgentRole::Offense, 0, &board, tuning(6, 10));
        let decision = agent.decide(&board).unwrap();
        assert_eq!(decision.mode, BehaviorMode::Evading);
        let w = WeightTable::for_mode(BehaviorMode::Evading);
        for c in &decision.candidates {
            assert_eq!(c.score, w.dot(&c.features));
        }
        // North closes on the capsule without closing on the ghost.
        assert_eq!(decision.chosen, Direction::North);
    }

    #[test]
    fn endgame_overrides_best_score() {
        let start_board = FakeBoard::new().place(0, Cell::new(2, 5)).hide_opponents_of(0);
        let mut agent = started(AgentRole::Offense, 0, &start_board, Tuning::default());

        let board = start_board
            .place(0, Cell::new(11, 5))
            .with_food(&[Cell::new(15, 5), Cell::new(16, 5)]);
        let decision = agent.decide(&board).unwrap();

        let scored: Vec<(Direction, f64)> =
            decision.candidates.iter().map(|c| (c.direction, c.score)).collect();
        assert_eq!(select_best(&scored), Some(Direction::East));
        assert!(decision.endgame);
        assert_eq!(decision.chosen, Direction::West);
    }

    #[test]
    fn decisions_are_deterministic() {
        let board = threat_board(6).with_food(&[Cell::new(11, 2)]);
        let template = started(AgentRole::Offense, 0, &board, Tuning::default());
        let first = template.clone().decide(&board).unwrap();
        for _ in 0..5 {
            assert_eq!(template.clone().decide(&board).unwrap(), first);
        }
    }

    #[test]
    fn mode_is_committed_once_per_turn() {
        let t = Tuning::default();
        let mut board = threat_board(12);
        let mut agent = started(AgentRole::Offense, 0, &board, t);
        assert_eq!(agent.machine().last_enemy_capsules, Some(1));

        board.capsules.clear();
        let decision = agent.decide(&board).unwrap();
        assert_eq!(decision.mode, BehaviorMode::SuperSafe { window_left: 40 });
        assert_eq!(agent.mode(), decision.mode);
        assert_eq!(agent.machine().last_enemy_capsules, Some(0));

        agent.decide(&board).unwrap();
        assert_eq!(agent.mode(), BehaviorMode::SuperSafe { window_left: 39 });
    }

    #[test]
    fn boxed_in_agent_reports_no_candidates() {
        let mut board = threat_board(12);
        for d in [Direction::North, Direction::South, Direction::East, Direction::West] {
            board.walls.insert(Cell::new(12, 1).step(d));
        }
        let mut agent = started(AgentRole::Offense, 0, &board, Tuning::default());
        let err = agent.choose_action(&board).unwrap_err();
        assert!(matches!(err, BehaviorError::NoCandidateMoves(AgentId(0))));
        assert_eq!(agent.mode(), BehaviorMode::Safe);
    }

    #[test]
    fn defender_chases_visible_invader() {
        let board = FakeBoard::new()
            .place(2, Cell::new(5, 5))
            .place(1, Cell::new(8, 5))
            .hide(3)
            .with_food(&blue_food());
        let mut agent = started(AgentRole::Defense, 2, &board, Tuning::default());
        assert_eq!(agent.choose_action(&board).unwrap(), Direction::East);
        assert_eq!(agent.mode(), BehaviorMode::Pursuing);
    }

    #[test]
    fn patrol_point_skips_walls() {
        let mut board = FakeBoard::new().place(2, Cell::new(1, 1));
        board.walls.insert(Cell::new(6, 6));
        let agent = started(AgentRole::Defense, 2, &board, Tuning::default());
        assert_eq!(agent.patrol_point(), Cell::new(6, 5));
        assert_eq!(agent.start(), Cell::new(1, 1));
    }

    #[test]
    fn idle_defender_walks_to_patrol_point() {
        let board = FakeBoard::new()
            .place(2, Cell::new(2, 6))
            .hide_opponents_of(2)
            .with_food(&blue_food());
        let mut agent = started(AgentRole::Defense, 2, &board, Tuning::default());
        assert_eq!(agent.choose_action(&board).unwrap(), Direction::East);
        assert_eq!(agent.mode(), BehaviorMode::Returning);
    }
}

// ── Registry and tuning ───────────────────────────────────────────────────────

#[cfg(test)]
mod registry_tests {
    use super::*;
    use crate::{BehaviorError, create_team, registered_tags, spawn};

    #[test]
    fn canonical_and_legacy_tags_resolve() {
        let t = Tuning::default();
        assert_eq!(spawn("offense", AgentId(0), t.clone()).unwrap().role(), AgentRole::Offense);
        assert_eq!(spawn("Defense", AgentId(2), t.clone()).unwrap().role(), AgentRole::Defense);
        assert_eq!(
            spawn("OffensiveReflexAgent", AgentId(1), t.clone()).unwrap().role(),
            AgentRole::Offense
        );
        assert_eq!(
            spawn("DefensiveReflexAgent", AgentId(3), t).unwrap().role(),
            AgentRole::Defense
        );
        assert!(registered_tags().any(|tag| tag == "offense"));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = spawn("KeyboardAgent", AgentId(0), Tuning::default()).unwrap_err();
        assert!(matches!(err, BehaviorError::UnknownRole(ref tag) if tag == "KeyboardAgent"));
    }

    #[test]
    fn create_team_assigns_ids_in_order() {
        let [a, b] =
            create_team(AgentId(1), AgentId(3), "offense", "defense", &Tuning::default()).unwrap();
        assert_eq!((a.id(), a.role()), (AgentId(1), AgentRole::Offense));
        assert_eq!((b.id(), b.role()), (AgentId(3), AgentRole::Defense));
        assert_eq!(a.mode(), BehaviorMode::Safe);
        assert_eq!(b.mode(), BehaviorMode::Returning);
    }

    #[test]
    fn create_team_validates_tuning() {
        let bad = tuning(10, 10);
        let err = create_team(AgentId(0), AgentId(2), "offense", "defense", &bad).unwrap_err();
        assert!(matches!(err, BehaviorError::Config(_)));
    }

    #[test]
    fn default_tuning_is_valid() {
        assert!(Tuning::default().validate().is_ok());
        let mut t = Tuning::default();
        t.offense.capsule_rush = 50;
        assert!(t.validate().is_err());
    }
}
