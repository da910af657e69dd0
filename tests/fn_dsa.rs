use lattice_enclave::config::{EnclaveConfig, MAX_SIGNATURE_LEN, SchemeParams, SignatureEncoding};
use lattice_enclave::diagnostics::NullSink;
use lattice_enclave::enclave::{Enclave, EnclaveError, TrustState};
use lattice_enclave::engine::{FnDsaEngine, SigningEngine};
use lattice_enclave::entropy::EntropyChain;
use lattice_enclave::rng::StreamGenerator;

fn seeded(seed: &[u8], config: EnclaveConfig) -> Enclave<FnDsaEngine, NullSink> {
    let rng = StreamGenerator::from_seed(seed, None);
    Enclave::with_generator(config, FnDsaEngine, NullSink, rng).unwrap()
}

#[test]
fn keygen_produces_falcon512_public_key() {
    let mut enclave = seeded(b"falcon-512 keygen", EnclaveConfig::default());

    enclave.generate_keypair().unwrap();

    assert_eq!(enclave.state(), TrustState::KeyReady);
    assert_eq!(enclave.public_key().unwrap().len(), 897);
    // header byte: 0x00 | logn
    assert_eq!(enclave.public_key().unwrap()[0], 0x09);
}

#[test]
fn signatures_verify_and_differ() {
    let mut enclave = seeded(b"falcon-512 sign", EnclaveConfig::default());
    enclave.generate_keypair().unwrap();

    let message = [0x5Cu8; 32];
    let mut a = vec![0u8; MAX_SIGNATURE_LEN];
    let mut b = vec![0u8; MAX_SIGNATURE_LEN];

    let len_a = enclave.sign(&message, &mut a).unwrap();
    let len_b = enclave.sign(&message, &mut b).unwrap();

    assert_eq!(len_a, 666);
    assert_eq!(len_b, 666);
    assert_ne!(a[..len_a], b[..len_b]);

    let public = enclave.public_key().unwrap();
    assert!(enclave.engine().verify(public, &message, &a[..len_a]));
    assert!(enclave.engine().verify(public, &message, &b[..len_b]));
}

#[test]
fn tampered_message_fails_verification() {
    let mut enclave = seeded(b"falcon-512 tamper", EnclaveConfig::default());
    enclave.generate_keypair().unwrap();

    let mut sig = vec![0u8; MAX_SIGNATURE_LEN];
    let len = enclave.sign(b"pay 10 to alice", &mut sig).unwrap();

    let public = enclave.public_key().unwrap();
    assert!(FnDsaEngine.verify(public, b"pay 10 to alice", &sig[..len]));
    assert!(!FnDsaEngine.verify(public, b"pay 99 to alice", &sig[..len]));
}

#[test]
fn same_seed_reproduces_keys_and_signatures() {
    let mut first = seeded(b"reproducible", EnclaveConfig::default());
    let mut second = seeded(b"reproducible", EnclaveConfig::default());

    first.generate_keypair().unwrap();
    second.generate_keypair().unwrap();
    assert_eq!(first.public_key(), second.public_key());

    let mut a = vec![0u8; MAX_SIGNATURE_LEN];
    let mut b = vec![0u8; MAX_SIGNATURE_LEN];
    let len_a = first.sign(b"deterministic", &mut a).unwrap();
    let len_b = second.sign(b"deterministic", &mut b).unwrap();

    assert_eq!(a[..len_a], b[..len_b]);
}

#[test]
fn falcon1024_round_trip() {
    let config = EnclaveConfig {
        scheme: SchemeParams {
            logn: 10,
            encoding: SignatureEncoding::Static,
        },
        ..EnclaveConfig::default()
    };
    let mut enclave = seeded(b"falcon-1024", config);
    enclave.generate_keypair().unwrap();

    let public = enclave.public_key().unwrap().to_vec();
    assert_eq!(public.len(), 1793);

    let mut sig = vec![0u8; MAX_SIGNATURE_LEN];
    let len = enclave.sign(b"bigger lattice", &mut sig).unwrap();

    assert_eq!(len, 1280);
    assert!(FnDsaEngine.verify(&public, b"bigger lattice", &sig[..len]));
}

#[test]
fn buffer_smaller_than_signature_is_a_config_error() {
    let config = EnclaveConfig {
        max_signature_len: 600,
        ..EnclaveConfig::default()
    };
    let rng = StreamGenerator::from_seed(b"small", None);

    let result = Enclave::with_generator(config, FnDsaEngine, NullSink, rng);
    assert!(matches!(result, Err(EnclaveError::Config(_))));
}

#[test]
fn signer_rejects_garbage_private_key() {
    use lattice_enclave::engine::SignerContext;

    let mut signer = FnDsaEngine.signer_context(&SchemeParams::default()).unwrap();
    assert!(signer.set_private_key(&[0xFF; 16]).is_err());
}

#[test]
fn platform_seeded_enclave_signs() {
    let mut enclave = Enclave::new(
        EnclaveConfig::default(),
        FnDsaEngine,
        NullSink,
        &mut EntropyChain::platform_default(),
    )
    .unwrap();
    enclave.generate_keypair().unwrap();

    let mut sig = vec![0u8; MAX_SIGNATURE_LEN];
    let len = enclave.sign(b"hello from the enclave", &mut sig).unwrap();

    let public = enclave.public_key().unwrap();
    assert!(FnDsaEngine.verify(public, b"hello from the enclave", &sig[..len]));
}
