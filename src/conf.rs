//! Declarative description of a simulation and the logic that turns one into a running grid.
//!
//! Configurations are JSON documents holding the grid type, dimensions, numeric parameters, a display color per
//! state, some descriptive metadata and optionally an explicit initial layout.  Everything that can be wrong with
//! a configuration is reported as a `ConfError` at build time; a grid that builds successfully never fails later.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;
use rand_pcg::Pcg64;
use serde_derive::Deserialize;

use crate::cell::CellState;
use crate::engine::rps::RockPaperScissors;
use crate::engine::Rule;
use crate::error::ConfError;
use crate::generator::Layout;
use crate::grid::{Grid, Metadata};
use crate::random::make_rng;
use crate::simulation::Simulation;
use crate::universe::{Neighborhood, UniverseConf};

/// A parameter value as written in a configuration file.  Files may use JSON numbers or numeric strings; anything
/// else is only discovered to be invalid once a rule asks for it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawParam {
    Number(f64),
    Text(String),
}

/// Named numeric parameters handed to a rule engine.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, RawParam>);

impl Params {
    pub fn new() -> Self {
        Params::default()
    }

    pub fn insert<K: Into<String>>(&mut self, name: K, value: RawParam) {
        self.0.insert(name.into(), value);
    }

    pub fn with<K: Into<String>>(mut self, name: K, value: f64) -> Self {
        self.insert(name, RawParam::Number(value));
        self
    }

    /// Looks up `name` and interprets it as a finite `f64`.
    pub fn get_f64(&self, name: &str) -> Result<f64, ConfError> {
        let value = match self.0.get(name) {
            Some(RawParam::Number(value)) => *value,
            Some(RawParam::Text(text)) => text.trim().parse::<f64>().map_err(|_| ConfError::NonNumericParameter {
                name: name.to_owned(),
                value: text.clone(),
            })?,
            None => return Err(ConfError::MissingParameter(name.to_owned())),
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfError::NonNumericParameter { name: name.to_owned(), value: value.to_string() })
        }
    }
}

/// The closed set of automaton variants that a configuration can select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum Variant {
    #[serde(rename = "rps", alias = "RPS", alias = "rockPaperScissors")]
    RockPaperScissors,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Placement {
    pub state: String,
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConf {
    pub grid_type: Variant,
    pub rows: usize,
    pub columns: usize,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    /// Seed for the grid's PRNG.  Without one the grid is seeded from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub neighborhood: Neighborhood,
    #[serde(default)]
    pub wrap: bool,
    #[serde(default)]
    pub parameters: Params,
    /// Display color per state label.  Opaque to the engine.
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub layout: Option<Vec<Placement>>,
}

impl SimulationConf {
    pub fn from_json(json: &str) -> Result<Self, ConfError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfError> {
        let path = path.as_ref();
        debug!("Reading simulation configuration from {:?}", path);
        let json = fs::read_to_string(path).map_err(|source| ConfError::Io { path: path.to_owned(), source })?;
        SimulationConf::from_json(&json)
    }

    pub fn universe_conf(&self) -> UniverseConf {
        UniverseConf {
            rows: self.rows,
            columns: self.columns,
            neighborhood: self.neighborhood,
            wrap: self.wrap,
        }
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            title: self.title.clone(),
            author: self.author.clone(),
            description: self.description.clone(),
            colors: self.colors.clone(),
        }
    }

    /// Resolves the layout's state labels against the alphabet of `S`.  Bounds are checked when the layout is
    /// applied to the universe.
    pub fn layout<S: CellState>(&self) -> Result<Option<Layout<S>>, ConfError> {
        let placements = match self.layout {
            Some(ref placements) => placements,
            None => return Ok(None),
        };

        placements
            .iter()
            .map(|placement| {
                let state = placement
                    .state
                    .parse::<S>()
                    .map_err(|_| ConfError::UnknownState(placement.state.clone()))?;
                Ok(((placement.row, placement.col), state))
            })
            .collect::<Result<Vec<_>, ConfError>>()
            .map(|placements| Some(Layout::new(placements)))
    }

    /// Builds a grid around an already constructed rule.
    pub fn build_grid<R: Rule>(&self, rule: R) -> Result<Grid<R, Pcg64>, ConfError> {
        Grid::new(self.universe_conf(), rule, self.metadata(), self.layout()?, make_rng(self.seed))
    }

    /// Builds the grid for whichever variant this configuration selects.
    pub fn build(&self) -> Result<Box<dyn Simulation>, ConfError> {
        match self.grid_type {
            Variant::RockPaperScissors => {
                let rule = RockPaperScissors::from_params(&self.parameters)?;
                Ok(Box::new(self.build_grid(rule)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rps::RpsState;

    const CONF: &str = r##"{
        "gridType": "rps",
        "rows": 4,
        "columns": 5,
        "title": "Bacterial Competition",
        "author": "Jaidha Rosenblatt",
        "seed": 7,
        "parameters": {
            "growthRate": 0.3,
            "decayRate": "0.01",
            "diffusivityRate": 0.2,
            "sigmoidFunctionRate": 3,
            "s-empiricalTest": "1.5"
        },
        "colors": { "rock": "#FF0000", "paper": "#00FF00", "scissors": "#0000FF", "empty": "#FFFFFF" },
        "layout": [
            { "state": "R", "row": 0, "col": 0 },
            { "state": "paper", "row": 3, "col": 4 }
        ]
    }"##;

    #[test]
    fn parses_and_builds() {
        let conf = SimulationConf::from_json(CONF).unwrap();
        assert_eq!(conf.grid_type, Variant::RockPaperScissors);
        assert_eq!(conf.neighborhood, Neighborhood::Moore);
        assert_eq!(conf.parameters.get_f64("decayRate").unwrap(), 0.01);
        assert_eq!(conf.parameters.get_f64("sigmoidFunctionRate").unwrap(), 3.0);

        let sim = conf.build().unwrap();
        assert_eq!((sim.rows(), sim.columns()), (4, 5));
        assert_eq!(sim.title(), "Bacterial Competition");
        assert_eq!(sim.author(), "Jaidha Rosenblatt");
        assert_eq!(sim.label_at(0, 0).as_deref(), Some("rock"));
        assert_eq!(sim.label_at(3, 4).as_deref(), Some("paper"));
        assert_eq!(sim.color_at(0, 0), Some("#FF0000"));
        assert_eq!(sim.stats().count("empty"), Some(18));
    }

    #[test]
    fn layout_resolves_labels() {
        let conf = SimulationConf::from_json(CONF).unwrap();
        let layout = conf.layout::<RpsState>().unwrap().unwrap();
        assert_eq!(layout.placements, vec![((0, 0), RpsState::Rock), ((3, 4), RpsState::Paper)]);
    }

    #[test]
    fn missing_parameter_is_rejected() {
        let mut conf = SimulationConf::from_json(CONF).unwrap();
        conf.parameters.0.remove("growthRate");
        match conf.build() {
            Err(ConfError::MissingParameter(name)) => assert_eq!(name, "growthRate"),
            other => panic!("unexpected result: {:?}", other.map(|sim| sim.title().to_owned())),
        }
    }

    #[test]
    fn non_numeric_parameter_is_rejected() {
        let mut conf = SimulationConf::from_json(CONF).unwrap();
        conf.parameters.insert("decayRate", RawParam::Text("fast".into()));
        assert!(matches!(conf.build(), Err(ConfError::NonNumericParameter { ref name, .. }) if name == "decayRate"));

        conf.parameters.insert("decayRate", RawParam::Text("NaN".into()));
        assert!(matches!(conf.build(), Err(ConfError::NonNumericParameter { .. })));
    }

    #[test]
    fn bad_layouts_are_rejected() {
        let mut conf = SimulationConf::from_json(CONF).unwrap();
        conf.layout = Some(vec![Placement { state: "lizard".into(), row: 0, col: 0 }]);
        assert!(matches!(conf.build(), Err(ConfError::UnknownState(ref label)) if label == "lizard"));

        conf.layout = Some(vec![Placement { state: "rock".into(), row: 4, col: 0 }]);
        assert!(matches!(conf.build(), Err(ConfError::PlacementOutOfBounds { row: 4, col: 0, .. })));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let mut conf = SimulationConf::from_json(CONF).unwrap();
        conf.rows = 0;
        assert!(matches!(conf.build(), Err(ConfError::EmptyGrid { rows: 0, columns: 5 })));
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let mut conf = SimulationConf::from_json(CONF).unwrap();
        conf.rows = usize::MAX / 2;
        conf.columns = 3;
        assert!(matches!(conf.build(), Err(ConfError::GridTooLarge { columns: 3, .. })));

        conf.rows = 1 << 13;
        conf.columns = 1 << 12;
        assert!(matches!(conf.build(), Err(ConfError::GridTooLarge { .. })));
    }

    #[test]
    fn zero_sigmoid_steepness_is_rejected() {
        let mut conf = SimulationConf::from_json(CONF).unwrap();
        conf.parameters.insert("s-empiricalTest", RawParam::Number(0.0));
        assert!(matches!(
            conf.build(),
            Err(ConfError::InvalidParameter { ref name, .. }) if name == "s-empiricalTest"
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(SimulationConf::from_json("{ \"gridType\": \"life\" }"), Err(ConfError::Parse(_))));
        assert!(matches!(
            SimulationConf::from_file("/nonexistent/cellsim/conf.json"),
            Err(ConfError::Io { .. })
        ));
    }
}
