use std::env;

use crate::engine::PlacementConfig;

/// Complete engine configuration, loaded from environment variables or
/// default values.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    placement: PlacementConfig,
}

impl EngineConfig {
    const SUPPORT_RATIO_VAR: &'static str = "BOX_PLANNER_SUPPORT_RATIO";
    const HEIGHT_EPSILON_VAR: &'static str = "BOX_PLANNER_HEIGHT_EPSILON";
    const GENERAL_EPSILON_VAR: &'static str = "BOX_PLANNER_GENERAL_EPSILON";
    const ALLOW_ROTATIONS_VAR: &'static str = "BOX_PLANNER_ALLOW_ROTATIONS";

    /// Creates a configuration from the currently available environment
    /// variables.
    pub fn from_env() -> Self {
        let support_ratio = load_f64_with_warning(
            Self::SUPPORT_RATIO_VAR,
            PlacementConfig::DEFAULT_SUPPORT_RATIO,
            |value| value > 0.0 && value <= 1.0,
            "must be greater than 0 and at most 1",
            "Warning: Lowered minimum support may lead to unstable stacks",
        );

        let height_epsilon = load_f64_with_warning(
            Self::HEIGHT_EPSILON_VAR,
            PlacementConfig::DEFAULT_HEIGHT_EPSILON,
            |value| value > 0.0,
            "must be greater than 0",
            "Warning: Adjusted height tolerance may cause unexpected placements",
        );

        let general_epsilon = load_f64_with_warning(
            Self::GENERAL_EPSILON_VAR,
            PlacementConfig::DEFAULT_GENERAL_EPSILON,
            |value| value > 0.0,
            "must be greater than 0",
            "Warning: Adjusted tolerances may cause numerical instabilities",
        );

        let allow_rotations = env_string(Self::ALLOW_ROTATIONS_VAR)
            .and_then(|raw| parse_bool(&raw, Self::ALLOW_ROTATIONS_VAR))
            .unwrap_or(PlacementConfig::DEFAULT_ALLOW_ROTATIONS);

        let placement = PlacementConfig::builder()
            .support_ratio(support_ratio)
            .height_epsilon(height_epsilon)
            .general_epsilon(general_epsilon)
            .allow_rotations(allow_rotations)
            .build();

        Self { placement }
    }

    /// Returns the configured PlacementConfig.
    pub fn placement_config(&self) -> PlacementConfig {
        self.placement
    }
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            eprintln!(
                "⚠️ Access to {} failed: {}. Using default value.",
                name, err
            );
            None
        }
    }
}

fn parse_bool(raw: &str, var_name: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        other => {
            eprintln!(
                "⚠️ Could not interpret {} ('{}') as boolean value. Using default value.",
                var_name, other
            );
            None
        }
    }
}

fn load_f64_with_warning(
    var_name: &str,
    default: f64,
    validator: impl Fn(f64) -> bool,
    invalid_hint: &str,
    warning: &str,
) -> f64 {
    match env_string(var_name) {
        Some(raw) => {
            parse_f64_or_default(&raw, var_name, default, validator, invalid_hint, warning)
        }
        None => default,
    }
}

fn parse_f64_or_default(
    raw: &str,
    var_name: &str,
    default: f64,
    validator: impl Fn(f64) -> bool,
    invalid_hint: &str,
    warning: &str,
) -> f64 {
    match raw.parse::<f64>() {
        Ok(value) => {
            if !validator(value) {
                eprintln!(
                    "⚠️ {} contains invalid value '{}': {}. Using {}.",
                    var_name, raw, invalid_hint, default
                );
                default
            } else {
                let tolerance = (default.abs().max(1.0)) * 1e-9;
                if (value - default).abs() > tolerance {
                    eprintln!("⚠️ {} ({} = {}).", warning, var_name, value);
                }
                value
            }
        }
        Err(err) => {
            eprintln!(
                "⚠️ Could not parse {} ('{}') as number: {}. Using {}.",
                var_name, raw, err, default
            );
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_support_ratio(raw: &str) -> f64 {
        parse_f64_or_default(
            raw,
            EngineConfig::SUPPORT_RATIO_VAR,
            PlacementConfig::DEFAULT_SUPPORT_RATIO,
            |value| value > 0.0 && value <= 1.0,
            "must be greater than 0 and at most 1",
            "Warning: Lowered minimum support may lead to unstable stacks",
        )
    }

    #[test]
    fn test_parse_bool_accepts_the_usual_spellings() {
        for raw in ["1", "true", "yes", "y", "on", "TRUE", "Yes", " on "] {
            assert_eq!(parse_bool(raw, "BOX_PLANNER_ALLOW_ROTATIONS"), Some(true));
        }
        for raw in ["0", "false", "no", "n", "off", "FALSE", "No", " off "] {
            assert_eq!(parse_bool(raw, "BOX_PLANNER_ALLOW_ROTATIONS"), Some(false));
        }
    }

    #[test]
    fn test_parse_bool_rejects_everything_else() {
        for raw in ["invalid", "2", "maybe", "", "  "] {
            assert_eq!(parse_bool(raw, "BOX_PLANNER_ALLOW_ROTATIONS"), None);
        }
    }

    #[test]
    fn test_support_ratio_in_range_is_kept() {
        assert!((load_support_ratio("0.75") - 0.75).abs() < 1e-12);
        assert!((load_support_ratio("1.0") - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_support_ratio_out_of_range_falls_back() {
        let default = PlacementConfig::DEFAULT_SUPPORT_RATIO;
        assert!((load_support_ratio("1.5") - default).abs() < 1e-12);
        assert!((load_support_ratio("0.0") - default).abs() < 1e-12);
        assert!((load_support_ratio("-0.25") - default).abs() < 1e-12);
    }

    #[test]
    fn test_unparsable_number_falls_back() {
        let default = PlacementConfig::DEFAULT_HEIGHT_EPSILON;
        let value = parse_f64_or_default(
            "soon",
            EngineConfig::HEIGHT_EPSILON_VAR,
            default,
            |value| value > 0.0,
            "must be greater than 0",
            "Warning: Adjusted height tolerance may cause unexpected placements",
        );
        assert!((value - default).abs() < 1e-15);
    }
}
