use users_shared::models::{FilterCondition, UserField};

use crate::error::{AppError, Result};

/// Translates one query parameter into a filter condition.
///
/// Returns `None` for an empty value list or a field outside the allow-list.
/// Only the first value is used; repeated values for the same field are dropped.
pub fn prepare_filter(field: &str, values: &[String]) -> Option<FilterCondition> {
    let value = values.first()?;
    let field = field.parse::<UserField>().ok()?;
    Some(FilterCondition::new(field, value.clone()))
}

/// Groups raw query pairs by key, keeping keys in order of first appearance
pub fn group_query_params(pairs: Vec<(String, String)>) -> Vec<(String, Vec<String>)> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (key, value) in pairs {
        match grouped.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, values)) => values.push(value),
            None => grouped.push((key, vec![value])),
        }
    }
    grouped
}

/// Builds the full condition list, failing on the first unusable parameter
pub fn parse_conditions(params: &[(String, Vec<String>)]) -> Result<Vec<FilterCondition>> {
    params
        .iter()
        .map(|(field, values)| {
            prepare_filter(field, values).ok_or_else(|| {
                AppError::BadRequest(format!("malformed filter query {}: {:?}", field, values))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_every_allowed_field_is_accepted() {
        for field in ["country", "nickname", "surname", "forename", "email", "password"] {
            let condition = prepare_filter(field, &values(&["x"])).unwrap();
            assert_eq!(condition.field.attribute_name(), field);
            assert_eq!(condition.value, "x");
        }
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert_eq!(prepare_filter("rank", &values(&["1"])), None);
        assert_eq!(prepare_filter("userId", &values(&["abc"])), None);
        assert_eq!(prepare_filter("Country", &values(&["FRA"])), None);
    }

    #[test]
    fn test_empty_value_list_is_rejected() {
        assert_eq!(prepare_filter("country", &[]), None);
    }

    #[test]
    fn test_only_first_value_is_used() {
        let condition = prepare_filter("country", &values(&["FRA", "DEN"])).unwrap();
        assert_eq!(condition, FilterCondition::new(UserField::Country, "FRA"));
    }

    #[test]
    fn test_empty_string_value_is_a_valid_condition() {
        let condition = prepare_filter("nickname", &values(&[""])).unwrap();
        assert_eq!(condition.value, "");
    }

    #[test]
    fn test_grouping_keeps_first_appearance_order() {
        let grouped = group_query_params(vec![
            ("surname".into(), "Papillion".into()),
            ("country".into(), "FRA".into()),
            ("surname".into(), "Vey".into()),
        ]);

        assert_eq!(
            grouped,
            vec![
                ("surname".to_string(), values(&["Papillion", "Vey"])),
                ("country".to_string(), values(&["FRA"])),
            ]
        );
    }

    #[test]
    fn test_parse_conditions_names_offending_field() {
        let params = vec![
            ("country".to_string(), values(&["FRA"])),
            ("rank".to_string(), values(&["1"])),
        ];

        match parse_conditions(&params) {
            Err(AppError::BadRequest(msg)) => assert!(msg.contains("rank"), "{}", msg),
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_conditions_keeps_every_valid_field() {
        let params = vec![
            ("country".to_string(), values(&["FRA"])),
            ("nickname".to_string(), values(&["shox"])),
        ];

        let conditions = parse_conditions(&params).unwrap();
        assert_eq!(
            conditions,
            vec![
                FilterCondition::new(UserField::Country, "FRA"),
                FilterCondition::new(UserField::Nickname, "shox"),
            ]
        );
    }
}
