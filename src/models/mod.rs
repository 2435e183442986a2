use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::validation::not_blank;

// Single or hyphenated roster positions: G, PG, F-C, G-F, ...
static POSITION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{1,2}(-[A-Z]{1,2})?$").expect("valid position regex"));

/// Player row from the `players` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub jersey_number: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    pub fn to_dto(&self) -> PlayerDto {
        PlayerDto {
            id: self.id,
            name: self.name.clone(),
            team: self.team.clone(),
            position: self.position.clone(),
            jersey_number: self.jersey_number,
        }
    }
}

/// Player as returned to API clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDto {
    pub id: Uuid,
    pub name: String,
    pub team: Option<String>,
    pub position: Option<String>,
    pub jersey_number: Option<i32>,
}

/// Request body for creating or replacing a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlayerInput {
    // Missing or null names bind as empty so they surface as a field error
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "size must be between 1 and 100")
    )]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "size must be between 0 and 100"))]
    pub team: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_position"))]
    pub position: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, max = 99, message = "must be between 0 and 99"))]
    pub jersey_number: Option<i32>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn validate_position(position: &str) -> Result<(), ValidationError> {
    if POSITION_REGEX.is_match(position) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_position");
        error.message = Some("must be a roster position such as G, PG or F-C".into());
        Err(error)
    }
}

/// Response wrapper for the player listing
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayersResponse {
    pub players: Vec<PlayerDto>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::field_error_set;
    use serde_json::json;

    fn valid_input() -> PlayerInput {
        PlayerInput {
            name: "Nikola Jokic".to_string(),
            team: Some("Denver Nuggets".to_string()),
            position: Some("C".to_string()),
            jersey_number: Some(15),
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn missing_name_binds_as_blank() {
        let input: PlayerInput = serde_json::from_value(json!({ "team": "Lakers" })).unwrap();
        assert_eq!(input.name, "");

        let set = field_error_set(&input.validate().unwrap_err());
        assert_eq!(set.len(), 1);
        assert_eq!(set["name"], "must not be blank");
    }

    #[test]
    fn null_name_binds_as_blank() {
        let input: PlayerInput = serde_json::from_value(json!({ "name": null })).unwrap();
        assert_eq!(input.name, "");

        let set = field_error_set(&input.validate().unwrap_err());
        assert_eq!(set["name"], "must not be blank");
    }

    #[test]
    fn name_of_wrong_type_still_fails_to_bind() {
        let result = serde_json::from_value::<PlayerInput>(json!({ "name": 23 }));
        assert!(result.is_err());
    }

    #[test]
    fn position_must_match_roster_format() {
        for ok in ["G", "PG", "F-C", "G-F"] {
            let input = PlayerInput {
                position: Some(ok.to_string()),
                ..valid_input()
            };
            assert!(input.validate().is_ok(), "{ok} should be accepted");
        }

        for bad in ["guard", "g", "C-", "ABC"] {
            let input = PlayerInput {
                position: Some(bad.to_string()),
                ..valid_input()
            };
            let err = input.validate().unwrap_err();
            assert!(err.field_errors().contains_key("position"), "{bad} should be rejected");
        }
    }

    #[test]
    fn jersey_number_out_of_range() {
        let input = PlayerInput {
            jersey_number: Some(100),
            ..valid_input()
        };
        let set = field_error_set(&input.validate().unwrap_err());
        assert_eq!(set["jersey_number"], "must be between 0 and 99");
    }

    #[test]
    fn dto_serializes_field_names() {
        let dto = PlayerDto {
            id: Uuid::nil(),
            name: "A".to_string(),
            team: None,
            position: None,
            jersey_number: Some(1),
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["jersey_number"], 1);
    }
}
