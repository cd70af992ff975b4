// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use saiel_budget_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn missing_field() {
        let err = CoreError::MissingField("amount".into());
        assert_eq!(err.to_string(), "Missing required field: amount");
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Invalid date '2024-13-01'".into());
        assert_eq!(err.to_string(), "Validation failed: Invalid date '2024-13-01'");
    }

    #[test]
    fn out_of_range() {
        let err = CoreError::OutOfRange {
            field: "budget".into(),
            value: 12_000.0,
            min: 0.0,
            max: 10_000.0,
        };
        assert_eq!(err.to_string(), "budget must be between 0 and 10000, got 12000");
    }

    #[test]
    fn out_of_range_fractional() {
        let err = CoreError::OutOfRange {
            field: "amount".into(),
            value: 0.004,
            min: 0.01,
            max: f64::MAX,
        };
        assert!(err.to_string().starts_with("amount must be between 0.01 and "));
        assert!(err.to_string().ends_with("got 0.004"));
    }

    #[test]
    fn percentage_overflow() {
        let err = CoreError::PercentageOverflow {
            category: "Housing".into(),
            total: 110.0,
        };
        assert_eq!(
            err.to_string(),
            "Budget for Housing would bring the total to 110%, above 100%"
        );
    }

    #[test]
    fn duplicate_category() {
        let err = CoreError::DuplicateCategory("Boat".into());
        assert_eq!(err.to_string(), "Category already exists: Boat");
    }

    #[test]
    fn category_limit() {
        let err = CoreError::CategoryLimit { max: 16 };
        assert_eq!(err.to_string(), "Maximum of 16 categories allowed");
    }

    #[test]
    fn category_not_found() {
        let err = CoreError::CategoryNotFound("Boat".into());
        assert_eq!(err.to_string(), "Category not found: Boat");
    }

    #[test]
    fn transaction_not_found() {
        let err = CoreError::TransactionNotFound(1_705_312_800_000);
        assert_eq!(err.to_string(), "Transaction not found: 1705312800000");
    }

    #[test]
    fn entropy() {
        let err = CoreError::Entropy("no source available".into());
        assert_eq!(err.to_string(), "Random number generation failed: no source available");
    }

    #[test]
    fn storage() {
        let err = CoreError::Storage("Invalid storage key: 'a/b'".into());
        assert_eq!(err.to_string(), "Storage error: Invalid storage key: 'a/b'");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("key must be a string".into());
        assert_eq!(err.to_string(), "Serialization error: key must be a string");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn invalid_backup_format() {
        let err = CoreError::InvalidBackupFormat("bad header".into());
        assert_eq!(err.to_string(), "Invalid backup format: bad header");
    }

    #[test]
    fn unsupported_version() {
        let err = CoreError::UnsupportedVersion(99);
        assert_eq!(err.to_string(), "Unsupported backup version: 99");
    }

    #[test]
    fn encryption() {
        let err = CoreError::Encryption("AES key size invalid".into());
        assert_eq!(err.to_string(), "Encryption failed: AES key size invalid");
    }

    #[test]
    fn decryption() {
        assert_eq!(
            CoreError::Decryption.to_string(),
            "Decryption failed — wrong password or corrupted backup"
        );
    }
}

// ── Debug ───────────────────────────────────────────────────────────

mod debug_trait {
    use super::*;

    #[test]
    fn all_variants_are_debug() {
        let errors = vec![
            CoreError::MissingField("a".into()),
            CoreError::ValidationError("a".into()),
            CoreError::OutOfRange {
                field: "a".into(),
                value: 1.0,
                min: 0.0,
                max: 0.5,
            },
            CoreError::PercentageOverflow {
                category: "a".into(),
                total: 101.0,
            },
            CoreError::DuplicateCategory("a".into()),
            CoreError::CategoryLimit { max: 16 },
            CoreError::CategoryNotFound("a".into()),
            CoreError::TransactionNotFound(1),
            CoreError::Entropy("a".into()),
            CoreError::Storage("a".into()),
            CoreError::FileIO("a".into()),
            CoreError::Serialization("a".into()),
            CoreError::Deserialization("a".into()),
            CoreError::InvalidBackupFormat("a".into()),
            CoreError::UnsupportedVersion(2),
            CoreError::Encryption("a".into()),
            CoreError::Decryption,
        ];
        for err in &errors {
            assert!(!format!("{err:?}").is_empty());
        }
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod from_impls {
    use super::*;
    use std::io;

    #[test]
    fn from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        match CoreError::from(io_err) {
            CoreError::FileIO(msg) => assert!(msg.contains("access denied")),
            other => panic!("Expected FileIO, got {other:?}"),
        }
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<Vec<u64>>("[1, 2").unwrap_err();
        match CoreError::from(json_err) {
            CoreError::Deserialization(msg) => assert!(msg.contains("EOF")),
            other => panic!("Expected Deserialization, got {other:?}"),
        }
    }

    #[test]
    fn from_aes_gcm_error() {
        use aes_gcm::aead::{Aead, KeyInit};
        use aes_gcm::{Aes256Gcm, Nonce};

        let cipher = Aes256Gcm::new_from_slice(&[7u8; 32]).unwrap();
        let result = cipher.decrypt(Nonce::from_slice(&[0u8; 12]), &[0u8; 20][..]);
        let err: CoreError = result.unwrap_err().into();
        assert!(matches!(err, CoreError::Decryption));
    }

    #[test]
    fn question_mark_converts() {
        fn read_missing() -> Result<String, CoreError> {
            Ok(std::fs::read_to_string("/definitely/not/here.json")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::FileIO(_))));
    }
}

// ── std::error::Error ───────────────────────────────────────────────

mod std_error {
    use super::*;

    #[test]
    fn core_error_implements_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::CategoryNotFound("Boat".into()));
        assert!(err.to_string().contains("Boat"));
    }

    #[test]
    fn core_error_implements_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CoreError>();
    }
}
