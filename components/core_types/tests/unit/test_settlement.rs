//! Unit tests for Settlement records

use core_types::{Settlement, Value};

#[cfg(test)]
mod settlement_tests {
    use super::*;

    #[test]
    fn test_fulfilled_record() {
        let record = Settlement::Fulfilled {
            value: Value::Str("ok".to_string()),
        };
        assert!(record.is_fulfilled());
        assert!(!record.is_rejected());
        assert_eq!(record.status(), "fulfilled");
        assert_eq!(record.value(), Some(&Value::Str("ok".to_string())));
        assert_eq!(record.reason(), None);
    }

    #[test]
    fn test_rejected_record() {
        let record = Settlement::Rejected {
            reason: Value::Int(-1),
        };
        assert!(record.is_rejected());
        assert_eq!(record.status(), "rejected");
        assert_eq!(record.value(), None);
        assert_eq!(record.reason(), Some(&Value::Int(-1)));
    }

    #[test]
    fn test_display_formats() {
        let fulfilled = Settlement::Fulfilled {
            value: Value::Int(1),
        };
        let rejected = Settlement::Rejected {
            reason: Value::Str("e".to_string()),
        };
        assert_eq!(fulfilled.to_string(), "{fulfilled: 1}");
        assert_eq!(rejected.to_string(), "{rejected: e}");
    }

    #[test]
    fn test_records_travel_in_lists() {
        let records = Value::List(vec![
            Value::Settlement(Box::new(Settlement::Fulfilled {
                value: Value::Int(1),
            })),
            Value::Settlement(Box::new(Settlement::Rejected {
                reason: Value::Int(2),
            })),
        ]);
        match records {
            Value::List(items) => {
                assert_eq!(items.len(), 2);
                assert!(matches!(&items[0], Value::Settlement(s) if s.is_fulfilled()));
                assert!(matches!(&items[1], Value::Settlement(s) if s.is_rejected()));
            }
            other => panic!("expected a list, got {:?}", other),
        }
    }
}
