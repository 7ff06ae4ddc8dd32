use anyhow::Result;

use crate::logic::TesterAssets;

pub mod catalog;

#[derive(Debug, Clone, Copy)]
pub struct ScenarioCtx<'a> {
    pub assets: &'a TesterAssets,
    pub seed: u64,
    pub verbose: bool,
}

pub type ScenarioCheck = fn(&ScenarioCtx<'_>) -> Result<()>;

// Logic test scenario
#[derive(Clone)]
pub struct TestScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Whether the outcome depends on the seed; fixed checks run once per seed.
    pub seeded: bool,
    pub check: ScenarioCheck,
}

impl TestScenario {
    pub fn run(&self, ctx: &ScenarioCtx<'_>) -> Result<()> {
        (self.check)(ctx)
    }
}

pub fn get_scenario(key: &str) -> Option<TestScenario> {
    let key = key.to_lowercase();
    catalog::catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.key == key)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog::catalog_scenarios()
        .iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

pub fn all_scenario_keys() -> Vec<String> {
    catalog::catalog_scenarios()
        .iter()
        .map(|scenario| scenario.key.to_string())
        .collect()
}
