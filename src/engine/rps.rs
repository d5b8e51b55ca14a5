//! Bacterial competition modeled as a stochastic game of rock-paper-scissors.
//!
//! Each update a cell may reproduce into an empty neighbor or die of old age, and independently either competes
//! with a randomly chosen neighbor (the contender) or diffuses by swapping places with it.  Death becomes more
//! likely as simulated time passes, and competition becomes more likely the more same-species neighbors a cell has.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use log::trace;
use serde_derive::{Deserialize, Serialize};

use crate::cell::CellState;
use crate::conf::Params;
use crate::engine::{Rule, UpdateContext};
use crate::error::ConfError;
use crate::generator::Seeding;
use crate::random::RandomSource;
use crate::universe::{Coord, Universe};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RpsState {
    Rock,
    Paper,
    Scissors,
    Empty,
}

impl RpsState {
    /// Rock beats scissors, scissors beats paper, paper beats rock.  Empty never wins.
    pub fn beats(self, other: RpsState) -> bool {
        matches!(
            (self, other),
            (RpsState::Rock, RpsState::Scissors) | (RpsState::Scissors, RpsState::Paper) | (RpsState::Paper, RpsState::Rock)
        )
    }
}

impl CellState for RpsState {
    const ALPHABET: &'static [RpsState] = &[RpsState::Rock, RpsState::Paper, RpsState::Scissors, RpsState::Empty];
    const EMPTY: RpsState = RpsState::Empty;

    fn glyph(&self) -> char {
        match *self {
            RpsState::Rock => 'R',
            RpsState::Paper => 'P',
            RpsState::Scissors => 'S',
            RpsState::Empty => '.',
        }
    }
}

impl Display for RpsState {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let label = match *self {
            RpsState::Rock => "rock",
            RpsState::Paper => "paper",
            RpsState::Scissors => "scissors",
            RpsState::Empty => "empty",
        };
        write!(formatter, "{}", label)
    }
}

impl FromStr for RpsState {
    type Err = ConfError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label.trim().to_ascii_lowercase().as_str() {
            "r" | "rock" => Ok(RpsState::Rock),
            "p" | "paper" => Ok(RpsState::Paper),
            "s" | "scissors" => Ok(RpsState::Scissors),
            "empty" => Ok(RpsState::Empty),
            _ => Err(ConfError::UnknownState(label.to_owned())),
        }
    }
}

/// Tunable constants of the competition model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RpsParams {
    /// Probability that a cell reproduces into an empty neighbor.
    pub growth_rate: f64,
    /// `K` in `1 - e^(-K * t)`.
    pub decay_rate: f64,
    /// Twice the probability that a cell swaps places with its contender.
    pub diffusivity_rate: f64,
    /// Same-species neighbor count at which competition becomes a coin flip.
    pub sigmoid_midpoint: f64,
    pub sigmoid_steepness: f64,
}

impl RpsParams {
    pub const GROWTH_RATE: &'static str = "growthRate";
    pub const DECAY_RATE: &'static str = "decayRate";
    pub const DIFFUSIVITY_RATE: &'static str = "diffusivityRate";
    pub const SIGMOID_MIDPOINT: &'static str = "sigmoidFunctionRate";
    pub const SIGMOID_STEEPNESS: &'static str = "s-empiricalTest";

    /// Reads every parameter by name.  The sigmoid steepness divides the crowding term, so zero is rejected.
    pub fn from_params(params: &Params) -> Result<Self, ConfError> {
        let sigmoid_steepness = params.get_f64(Self::SIGMOID_STEEPNESS)?;
        if sigmoid_steepness == 0.0 {
            return Err(ConfError::InvalidParameter {
                name: Self::SIGMOID_STEEPNESS.to_owned(),
                reason: "must be non-zero",
            });
        }

        Ok(RpsParams {
            growth_rate: params.get_f64(Self::GROWTH_RATE)?,
            decay_rate: params.get_f64(Self::DECAY_RATE)?,
            diffusivity_rate: params.get_f64(Self::DIFFUSIVITY_RATE)?,
            sigmoid_midpoint: params.get_f64(Self::SIGMOID_MIDPOINT)?,
            sigmoid_steepness,
        })
    }
}

#[derive(Clone, Debug)]
pub struct RockPaperScissors {
    params: RpsParams,
}

impl RockPaperScissors {
    pub fn new(params: RpsParams) -> Self {
        RockPaperScissors { params }
    }

    pub fn from_params(params: &Params) -> Result<Self, ConfError> {
        RpsParams::from_params(params).map(RockPaperScissors::new)
    }

    pub fn params(&self) -> &RpsParams {
        &self.params
    }

    /// Probability that a cell dies, rising from 0 towards 1 as `elapsed_time` grows.
    pub fn decay_probability(&self, elapsed_time: f64) -> f64 {
        1.0 - (-self.params.decay_rate * elapsed_time).exp()
    }

    /// Probability that a cell with `same_species` like neighbors competes with its contender.
    pub fn engagement_probability(&self, same_species: usize) -> f64 {
        let RpsParams { sigmoid_midpoint, sigmoid_steepness, .. } = self.params;
        1.0 / (1.0 + (-(same_species as f64 - sigmoid_midpoint) / sigmoid_steepness).exp())
    }
}

/// Collects the empty neighbors of `coord` and counts the neighbors sharing its (non-empty) state.
fn scan_neighbors(universe: &Universe<RpsState>, coord: Coord, neighbors: &[Coord]) -> (Vec<Coord>, usize) {
    let state = universe.state(coord);
    let mut empty_neighbors = Vec::new();
    let mut same_species = 0;

    for &neighbor in neighbors {
        let neighbor_state = universe.state(neighbor);
        if neighbor_state.is_empty() {
            empty_neighbors.push(neighbor);
        } else if neighbor_state == state {
            same_species += 1;
        }
    }

    (empty_neighbors, same_species)
}

/// Resolves a contest between two occupied cells; the loser is emptied and a tie changes nothing.
fn compete(universe: &mut Universe<RpsState>, a: Coord, b: Coord) {
    let (a_state, b_state) = (universe.state(a), universe.state(b));
    if a_state == b_state {
        return;
    }

    let loser = if a_state.beats(b_state) { b } else { a };
    trace!("{} at {:?} beats {} at {:?}", a_state, a, b_state, b);
    universe.set_state(loser, RpsState::Empty);
}

impl Rule for RockPaperScissors {
    type State = RpsState;

    fn name(&self) -> &'static str {
        "rps"
    }

    fn seeding(&self) -> Seeding {
        Seeding::Local
    }

    fn update_cell<G: RandomSource + ?Sized>(
        &mut self,
        ctx: &mut UpdateContext<'_, RpsState, G>,
        coord: Coord,
        neighbors: &[Coord],
    ) {
        let contender = if neighbors.is_empty() {
            None
        } else {
            Some(neighbors[ctx.rng.index(neighbors.len())])
        };

        *ctx.elapsed_time += 1.0 / ctx.universe.len() as f64;
        let decay = self.decay_probability(*ctx.elapsed_time);
        let (empty_neighbors, same_species) = scan_neighbors(ctx.universe, coord, neighbors);
        let engagement = self.engagement_probability(same_species);

        let state = ctx.universe.state(coord);
        if ctx.rng.probability() <= self.params.growth_rate {
            if !empty_neighbors.is_empty() {
                let target = empty_neighbors[ctx.rng.index(empty_neighbors.len())];
                ctx.universe.set_state(target, state);
            }
        } else if ctx.rng.probability() <= decay {
            trace!("{} at {:?} decayed", state, coord);
            ctx.universe.set_state(coord, RpsState::Empty);
        }

        let contender = match contender {
            Some(contender) => contender,
            None => return,
        };

        let state = ctx.universe.state(coord);
        let contender_state = ctx.universe.state(contender);
        if ctx.rng.probability() <= engagement && !state.is_empty() && !contender_state.is_empty() {
            compete(ctx.universe, coord, contender);
        } else if ctx.rng.probability() <= 0.5 * self.params.diffusivity_rate
            && (contender_state == state || contender_state.is_empty())
        {
            trace!("{} at {:?} diffused to {:?}", state, coord, contender);
            ctx.universe.swap(coord, contender);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Layout;
    use crate::grid::{Grid, Metadata};
    use crate::random::scripted::{Pinned, Scripted};
    use crate::random::{make_rng, RandomSource};
    use crate::universe::UniverseConf;

    fn params(growth_rate: f64, decay_rate: f64, diffusivity_rate: f64) -> RpsParams {
        RpsParams {
            growth_rate,
            decay_rate,
            diffusivity_rate,
            sigmoid_midpoint: 2.0,
            sigmoid_steepness: 1.0,
        }
    }

    fn grid<G: RandomSource>(
        rows: usize,
        columns: usize,
        params: RpsParams,
        placements: Vec<(Coord, RpsState)>,
        rng: G,
    ) -> Grid<RockPaperScissors, G> {
        Grid::new(
            UniverseConf::new(rows, columns),
            RockPaperScissors::new(params),
            Metadata::default(),
            Some(Layout::new(placements)),
            rng,
        )
        .unwrap()
    }

    #[test]
    fn contest_table() {
        use self::RpsState::*;

        assert!(Rock.beats(Scissors));
        assert!(Scissors.beats(Paper));
        assert!(Paper.beats(Rock));
        assert!(!Scissors.beats(Rock));
        assert!(!Rock.beats(Rock));
        assert!(!Rock.beats(Empty));
        assert!(!Empty.beats(Rock));
    }

    #[test]
    fn labels_parse_in_both_forms() {
        assert_eq!("R".parse::<RpsState>().unwrap(), RpsState::Rock);
        assert_eq!("Scissors".parse::<RpsState>().unwrap(), RpsState::Scissors);
        assert_eq!("empty".parse::<RpsState>().unwrap(), RpsState::Empty);
        assert!("lizard".parse::<RpsState>().is_err());

        for &state in RpsState::ALPHABET {
            assert_eq!(state.to_string().parse::<RpsState>().unwrap(), state);
        }
    }

    #[test]
    fn decay_is_monotonic_and_saturates() {
        let rule = RockPaperScissors::new(params(0.0, 0.5, 0.0));
        assert_eq!(rule.decay_probability(0.0), 0.0);

        let mut last = 0.0;
        for step in 1..200 {
            let decay = rule.decay_probability(step as f64 * 0.25);
            assert!(decay >= last);
            last = decay;
        }
        assert!(1.0 - rule.decay_probability(1000.0) < 1e-9);
    }

    #[test]
    fn engagement_rises_with_crowding() {
        let rule = RockPaperScissors::new(params(0.0, 0.0, 0.0));
        assert!((rule.engagement_probability(2) - 0.5).abs() < 1e-12);
        assert!(rule.engagement_probability(0) < rule.engagement_probability(1));
        assert!(rule.engagement_probability(7) < rule.engagement_probability(8));
    }

    #[test]
    fn same_species_count_accumulates_over_all_neighbors() {
        let grid = grid(
            3,
            3,
            params(0.0, 0.0, 0.0),
            vec![
                ((1, 1), RpsState::Rock),
                ((0, 0), RpsState::Rock),
                ((0, 2), RpsState::Rock),
                ((2, 1), RpsState::Rock),
                ((1, 0), RpsState::Paper),
            ],
            make_rng(Some(0)),
        );
        let neighbors = grid.neighbors_of(1, 1).unwrap();
        let (empty, same_species) = scan_neighbors(grid.universe(), (1, 1), &neighbors);
        assert_eq!(same_species, 3);
        assert_eq!(empty, vec![(0, 1), (1, 2), (2, 0), (2, 2)]);

        // an empty cell has no species, so its empty neighbors never count as crowding
        let (_, same_species) = scan_neighbors(grid.universe(), (2, 2), &grid.neighbors_of(2, 2).unwrap());
        assert_eq!(same_species, 0);
    }

    #[test]
    fn growth_spreads_to_exactly_one_neighbor() {
        // every draw is 1.0: only the growth gate (rate 1.0) can pass, and the first empty neighbor is always picked
        let rng = Pinned { probability: 1.0, index: 0 };
        let mut grid = grid(3, 3, params(1.0, 0.0, 0.4), vec![((1, 1), RpsState::Rock)], rng);

        grid.advance_one_step();

        assert_eq!(grid.state_at(1, 1), Ok(RpsState::Rock));
        let rocks: Vec<Coord> = grid
            .universe()
            .iter()
            .filter(|(_, cell)| cell.state == RpsState::Rock)
            .map(|(coord, _)| coord)
            .collect();
        assert_eq!(rocks, vec![(0, 0), (1, 1)]);
        assert!(grid.neighbors_of(1, 1).unwrap().contains(&(0, 0)));
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn rock_beats_scissors_when_competition_is_forced() {
        let rng = Pinned { probability: 0.0, index: 0 };
        let mut grid = grid(
            1,
            2,
            params(0.0, 0.1, 0.0),
            vec![((0, 0), RpsState::Rock), ((0, 1), RpsState::Scissors)],
            rng,
        );

        grid.advance_one_step();

        assert_eq!(grid.state_at(0, 0), Ok(RpsState::Rock));
        assert_eq!(grid.state_at(0, 1), Ok(RpsState::Empty));
    }

    #[test]
    fn tie_leaves_both_cells_unchanged() {
        let rng = Pinned { probability: 0.0, index: 0 };
        let mut grid = grid(
            1,
            2,
            params(0.0, 0.1, 0.0),
            vec![((0, 0), RpsState::Paper), ((0, 1), RpsState::Paper)],
            rng,
        );

        grid.advance_one_step();

        assert_eq!(grid.state_at(0, 0), Ok(RpsState::Paper));
        assert_eq!(grid.state_at(0, 1), Ok(RpsState::Paper));
    }

    #[test]
    fn decay_kills_isolated_cell() {
        // a 1x1 grid has no neighbors and therefore no contender; growth fails (0.5 > 0.0) and decay passes
        let rng = Scripted::new(&[0.5, 0.5], &[], Pinned { probability: 1.0, index: 0 });
        let mut grid = grid(1, 1, params(0.0, 1000.0, 0.0), vec![((0, 0), RpsState::Scissors)], rng);

        grid.advance_one_step();

        assert_eq!(grid.state_at(0, 0), Ok(RpsState::Empty));
        assert_eq!(grid.elapsed_time(), 1.0);
    }

    #[test]
    fn diffusion_moves_cell_into_empty_contender() {
        // first cell: growth, decay and competition all fail, diffusion passes.  The moved cell is then visited
        // again as the second cell of the sweep, where every gate fails.
        let rng = Scripted::new(&[0.9, 0.9, 0.9, 0.0], &[0], Pinned { probability: 0.99, index: 0 });
        let mut grid = grid(1, 2, params(0.0, 0.0, 1.0), vec![((0, 0), RpsState::Rock)], rng);

        grid.advance_one_step();

        assert_eq!(grid.state_at(0, 0), Ok(RpsState::Empty));
        assert_eq!(grid.state_at(0, 1), Ok(RpsState::Rock));
    }

    #[test]
    fn elapsed_time_advances_one_unit_per_sweep() {
        let mut grid = grid(4, 5, params(0.1, 0.01, 0.1), vec![], make_rng(Some(3)));
        grid.skip_ahead(3);
        assert!((grid.elapsed_time() - 3.0).abs() < 1e-9);
        assert_eq!(grid.generation(), 3);
    }

    #[test]
    fn local_seeding_places_one_of_each_species() {
        // indices are drawn row then column for rock, paper and scissors in turn
        let rng = Scripted::new(&[], &[0, 1, 2, 3, 4, 0], Pinned { probability: 1.0, index: 0 });
        let grid = Grid::new(
            UniverseConf::new(5, 5),
            RockPaperScissors::new(params(0.0, 0.0, 0.0)),
            Metadata::default(),
            None,
            rng,
        )
        .unwrap();

        assert_eq!(grid.state_at(0, 1), Ok(RpsState::Rock));
        assert_eq!(grid.state_at(2, 3), Ok(RpsState::Paper));
        assert_eq!(grid.state_at(4, 0), Ok(RpsState::Scissors));
        assert_eq!(grid.stats().count("empty"), Some(22));
    }
}
