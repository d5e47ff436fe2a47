//! Command-line interface definitions.
//!
//! With no subcommand the simulator opens the interactive form; `predict`
//! runs one encode→predict cycle from category codes and prints the result.

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::types::profile::{AgeBracket, IncomeBracket, Profile, RaceCode, SchoolType, StateCode};

#[derive(Debug, Parser)]
#[command(name = "enem-simulator", version, about = "ENEM score simulator")]
pub struct Cli {
    /// Configuration file path.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Model artifact path (overrides the configuration).
    #[arg(long, global = true)]
    pub artifact: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive form (default).
    Tui,
    /// Predict scores for one profile and print the result.
    Predict(PredictArgs),
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// Age bracket code (1-8, 11, 12).
    #[arg(long)]
    pub age: u8,

    /// School type code (1 = private, 2 = public).
    #[arg(long)]
    pub school: u8,

    /// Race/color code (0-5).
    #[arg(long)]
    pub race: u8,

    /// Two-letter exam state code (SP, RJ, MG, ...).
    #[arg(long)]
    pub state: String,

    /// Family income bracket letter (A-H, Q).
    #[arg(long)]
    pub income: String,

    /// Print the result as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    /// Resolve the raw codes into a profile.
    pub fn to_profile(&self) -> Result<Profile> {
        let Some(age) = AgeBracket::from_code(self.age) else {
            bail!("unknown age bracket code '{}' (expected 1-8, 11, 12)", self.age);
        };
        let Some(school) = SchoolType::from_code(self.school) else {
            bail!("unknown school type code '{}' (expected 1 or 2)", self.school);
        };
        let Some(race) = RaceCode::from_code(self.race) else {
            bail!("unknown race/color code '{}' (expected 0-5)", self.race);
        };
        let Some(state) = StateCode::from_code(&self.state) else {
            bail!("unknown state code '{}'", self.state);
        };
        let Some(income) = IncomeBracket::from_code(&self.income) else {
            bail!("unknown income bracket '{}' (expected A-H or Q)", self.income);
        };

        Ok(Profile {
            age,
            school,
            race,
            state,
            income,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_args_resolve_to_profile() {
        let args = PredictArgs {
            age: 3,
            school: 2,
            race: 3,
            state: "sp".to_string(),
            income: "c".to_string(),
            json: false,
        };

        let profile = args.to_profile().unwrap();
        assert_eq!(profile, Profile::default());
    }

    #[test]
    fn test_unknown_codes_are_rejected() {
        let args = PredictArgs {
            age: 9,
            school: 2,
            race: 3,
            state: "SP".to_string(),
            income: "C".to_string(),
            json: false,
        };
        assert!(args.to_profile().is_err());

        let args = PredictArgs {
            age: 3,
            school: 2,
            race: 3,
            state: "ZZ".to_string(),
            income: "C".to_string(),
            json: false,
        };
        assert!(args.to_profile().is_err());
    }
}
