use lattice_enclave::config::{
    ConfigError, EnclaveConfig, MAX_SIGNATURE_LEN, RekeyPolicy, SchemeParams, SignatureEncoding,
};
use lattice_enclave::engine::{FnDsaEngine, SigningEngine};

#[test]
fn defaults() {
    let config = EnclaveConfig::default();

    assert_eq!(config.scheme.logn, 9);
    assert_eq!(config.scheme.degree(), 512);
    assert_eq!(config.scheme.encoding, SignatureEncoding::Static);
    assert_eq!(config.max_signature_len, MAX_SIGNATURE_LEN);
    assert_eq!(config.rekey, RekeyPolicy::Reject);
    assert!(!config.trace_payloads);

    config.validate().unwrap();
}

#[test]
fn rejects_unsupported_degree() {
    for logn in [0, 1, 8, 11, 32] {
        let config = EnclaveConfig {
            scheme: SchemeParams {
                logn,
                ..SchemeParams::default()
            },
            ..EnclaveConfig::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::UnsupportedDegree(logn)));
    }
}

#[test]
fn rejects_signature_buffer_out_of_range() {
    let too_large = EnclaveConfig {
        max_signature_len: MAX_SIGNATURE_LEN + 1,
        ..EnclaveConfig::default()
    };
    assert_eq!(
        too_large.validate(),
        Err(ConfigError::SignatureBufferTooLarge(MAX_SIGNATURE_LEN + 1))
    );

    let empty = EnclaveConfig {
        max_signature_len: 0,
        ..EnclaveConfig::default()
    };
    assert!(matches!(
        empty.validate(),
        Err(ConfigError::SignatureBufferTooSmall { configured: 0, .. })
    ));
}

#[test]
fn partial_json_keeps_defaults() {
    let config: EnclaveConfig =
        serde_json::from_str(r#"{ "rekey": "replace", "scheme": { "logn": 10 } }"#).unwrap();

    assert_eq!(config.rekey, RekeyPolicy::Replace);
    assert_eq!(config.scheme.logn, 10);
    assert_eq!(config.scheme.encoding, SignatureEncoding::Static);
    assert_eq!(config.max_signature_len, MAX_SIGNATURE_LEN);
    assert!(!config.trace_payloads);
    config.validate().unwrap();
}

#[test]
fn json_roundtrip_uses_snake_case() {
    let config = EnclaveConfig {
        scheme: SchemeParams {
            logn: 9,
            encoding: SignatureEncoding::Compressed,
        },
        trace_payloads: true,
        ..EnclaveConfig::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains(r#""encoding":"compressed""#));
    assert!(json.contains(r#""rekey":"reject""#));

    let back: EnclaveConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn unknown_policy_is_a_parse_error() {
    let parsed = serde_json::from_str::<EnclaveConfig>(r#"{ "rekey": "sometimes" }"#);
    assert!(parsed.is_err());
}

#[test]
fn fn_dsa_accepts_both_degrees_with_default_buffer() {
    for logn in [9, 10] {
        let params = SchemeParams {
            logn,
            encoding: SignatureEncoding::Static,
        };
        FnDsaEngine.check_params(&params, MAX_SIGNATURE_LEN).unwrap();
    }
}

#[test]
fn fn_dsa_rejects_compressed_encoding() {
    let params = SchemeParams {
        logn: 9,
        encoding: SignatureEncoding::Compressed,
    };

    assert_eq!(
        FnDsaEngine.check_params(&params, MAX_SIGNATURE_LEN),
        Err(ConfigError::UnsupportedEncoding(SignatureEncoding::Compressed))
    );
}

#[test]
fn fn_dsa_rejects_buffer_smaller_than_signature() {
    let params = SchemeParams::default();

    assert_eq!(
        FnDsaEngine.check_params(&params, 665),
        Err(ConfigError::SignatureBufferTooSmall {
            configured: 665,
            required: 666,
        })
    );
    FnDsaEngine.check_params(&params, 666).unwrap();
}
