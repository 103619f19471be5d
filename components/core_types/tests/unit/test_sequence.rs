//! Unit tests for ordered-sequence ingestion

use core_types::{to_ordered_sequence, ErrorKind, Value};

#[cfg(test)]
mod iterable_tests {
    use super::*;

    #[test]
    fn test_list_passes_through_in_order() {
        let input = Value::List(vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
        let items = to_ordered_sequence(&input).unwrap();
        assert_eq!(items, vec![Value::Int(3), Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_empty_list_yields_empty_sequence() {
        assert!(to_ordered_sequence(&Value::List(vec![])).unwrap().is_empty());
    }

    #[test]
    fn test_string_yields_one_item_per_character() {
        let items = to_ordered_sequence(&Value::Str("abc".to_string())).unwrap();
        assert_eq!(
            items,
            vec![
                Value::Str("a".to_string()),
                Value::Str("b".to_string()),
                Value::Str("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_string_yields_empty_sequence() {
        assert!(to_ordered_sequence(&Value::Str(String::new()))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_multibyte_characters_stay_whole() {
        let items = to_ordered_sequence(&Value::Str("héllo".to_string())).unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[1], Value::Str("é".to_string()));
    }
}

#[cfg(test)]
mod non_iterable_tests {
    use super::*;

    #[test]
    fn test_scalars_are_not_iterable() {
        for input in [
            Value::Undefined,
            Value::Null,
            Value::Boolean(true),
            Value::Int(5),
            Value::Float(1.5),
        ] {
            let error = to_ordered_sequence(&input).unwrap_err();
            assert_eq!(error.kind, ErrorKind::TypeError);
        }
    }

    #[test]
    fn test_error_message_names_the_variant() {
        let error = to_ordered_sequence(&Value::Boolean(false)).unwrap_err();
        assert_eq!(error.message, "boolean is not iterable");
    }
}
