//! Current algorithm configuration and the preset list.
//!
//! Values are stored as given; bounds are left to the service.

use crate::model::{Parameters, Preset};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("unknown parameter '{0}'")]
    UnknownField(String),
    #[error("'{raw}' is not a valid value for {field}")]
    InvalidValue { field: ParamField, raw: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamField {
    MaxGenerations,
    PopulationSize,
    MutationRate,
    TournamentSize,
}

impl ParamField {
    pub const ALL: [ParamField; 4] = [
        ParamField::MaxGenerations,
        ParamField::PopulationSize,
        ParamField::MutationRate,
        ParamField::TournamentSize,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParamField::MaxGenerations => "max_generations",
            ParamField::PopulationSize => "population_size",
            ParamField::MutationRate => "mutation_rate",
            ParamField::TournamentSize => "tournament_size",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ParamField::MaxGenerations => "Generations (G)",
            ParamField::PopulationSize => "Population (N)",
            ParamField::MutationRate => "Mutation rate (p_m)",
            ParamField::TournamentSize => "Tournament size (k)",
        }
    }

    pub fn value_of(self, params: &Parameters) -> String {
        match self {
            ParamField::MaxGenerations => params.max_generations.to_string(),
            ParamField::PopulationSize => params.population_size.to_string(),
            ParamField::MutationRate => params.mutation_rate.to_string(),
            ParamField::TournamentSize => params.tournament_size.to_string(),
        }
    }
}

impl fmt::Display for ParamField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamField {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| ParamError::UnknownField(s.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParamsStore {
    current: Parameters,
    presets: Vec<Preset>,
}

impl ParamsStore {
    pub fn new(current: Parameters) -> Self {
        Self {
            current,
            presets: Vec::new(),
        }
    }

    pub fn current(&self) -> Parameters {
        self.current
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn set_presets(&mut self, presets: Vec<Preset>) {
        self.presets = presets;
    }

    /// Replace exactly one field from user text. On a parse failure nothing changes.
    pub fn set_field(&mut self, field: ParamField, raw: &str) -> Result<(), ParamError> {
        let raw_trimmed = raw.trim();
        let invalid = || ParamError::InvalidValue {
            field,
            raw: raw.to_string(),
        };
        match field {
            ParamField::MaxGenerations => {
                self.current.max_generations = raw_trimmed.parse().map_err(|_| invalid())?
            }
            ParamField::PopulationSize => {
                self.current.population_size = raw_trimmed.parse().map_err(|_| invalid())?
            }
            ParamField::MutationRate => {
                let v: f64 = raw_trimmed.parse().map_err(|_| invalid())?;
                if !v.is_finite() {
                    return Err(invalid());
                }
                self.current.mutation_rate = v;
            }
            ParamField::TournamentSize => {
                self.current.tournament_size = raw_trimmed.parse().map_err(|_| invalid())?
            }
        }
        Ok(())
    }

    /// Replace all four fields from `preset`.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.current = Parameters {
            max_generations: preset.max_generations,
            population_size: preset.population_size,
            mutation_rate: preset.mutation_rate,
            tournament_size: preset.tournament_size,
        };
    }

    /// Apply the preset at `idx`, returning the new parameters if it exists.
    pub fn apply_preset_at(&mut self, idx: usize) -> Option<Parameters> {
        let preset = *self.presets.get(idx)?;
        self.apply_preset(&preset);
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset(g: i64, n: i64, p_m: f64, k: i64) -> Preset {
        Preset {
            max_generations: g,
            population_size: n,
            mutation_rate: p_m,
            tournament_size: k,
        }
    }

    #[test]
    fn set_field_touches_only_that_field() {
        let mut store = ParamsStore::default();
        let before = store.current();
        store.set_field(ParamField::PopulationSize, "150").unwrap();
        let after = store.current();
        assert_eq!(after.population_size, 150);
        assert_eq!(after.max_generations, before.max_generations);
        assert_eq!(after.mutation_rate, before.mutation_rate);
        assert_eq!(after.tournament_size, before.tournament_size);
    }

    #[test]
    fn set_field_accepts_out_of_range_values() {
        let mut store = ParamsStore::default();
        store.set_field(ParamField::MutationRate, "1.5").unwrap();
        store.set_field(ParamField::TournamentSize, "-3").unwrap();
        assert_eq!(store.current().mutation_rate, 1.5);
        assert_eq!(store.current().tournament_size, -3);
        assert_eq!(
            store.current().out_of_range(),
            vec!["mutation_rate", "tournament_size"]
        );
    }

    #[test]
    fn unparseable_input_leaves_store_untouched() {
        let mut store = ParamsStore::default();
        let before = store.current();
        let err = store.set_field(ParamField::MaxGenerations, "lots").unwrap_err();
        assert!(matches!(err, ParamError::InvalidValue { .. }));
        assert_eq!(store.current(), before);
    }

    #[test]
    fn field_names_parse() {
        let mut store = ParamsStore::default();
        let field: ParamField = "max_generations".parse().unwrap();
        store.set_field(field, "42").unwrap();
        assert_eq!(store.current().max_generations, 42);
        assert_eq!(
            "crossover_rate".parse::<ParamField>(),
            Err(ParamError::UnknownField("crossover_rate".into()))
        );
    }

    #[test]
    fn apply_preset_overwrites_all_fields() {
        let mut store = ParamsStore::default();
        store.set_field(ParamField::MaxGenerations, "9999").unwrap();
        store.set_field(ParamField::MutationRate, "0.99").unwrap();
        store.apply_preset(&preset(400, 60, 0.2, 5));
        assert_eq!(
            store.current(),
            Parameters {
                max_generations: 400,
                population_size: 60,
                mutation_rate: 0.2,
                tournament_size: 5,
            }
        );
    }

    #[test]
    fn apply_first_preset_from_list() {
        let mut store = ParamsStore::new(Parameters {
            max_generations: 1,
            population_size: 2,
            mutation_rate: 0.0,
            tournament_size: 2,
        });
        store.set_presets(vec![preset(200, 60, 0.2, 3)]);
        let applied = store.apply_preset_at(0).unwrap();
        assert_eq!(
            applied,
            Parameters {
                max_generations: 200,
                population_size: 60,
                mutation_rate: 0.2,
                tournament_size: 3,
            }
        );
        assert!(store.apply_preset_at(1).is_none());
    }
}
