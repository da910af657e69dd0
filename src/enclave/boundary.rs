//! The enclave context and its two boundary operations.
//!
//! Every check that depends only on the call's arguments and the trust
//! state runs before the engine is touched, so a rejected call has no side
//! effects. Engine contexts are plain values: they are dropped, and thereby
//! released, on every return path.

use zeroize::Zeroizing;

use super::error::{EnclaveError, ParamError};
use super::keystore::{KeyPair, KeyStore, TrustState};
use crate::config::{EnclaveConfig, NONCE_LEN, RekeyPolicy};
use crate::diagnostics::DiagnosticSink;
use crate::engine::{EngineError, KeyGenContext, SignerContext, SigningEngine};
use crate::entropy::EntropyChain;
use crate::rng::StreamGenerator;

/// Trusted context: configuration, engine, generator and key store.
///
/// One instance is created when the enclave starts and lives as long as the
/// process. All boundary calls take it by `&mut`, which serializes them;
/// use [`SharedEnclave`](super::SharedEnclave) to expose it to several
/// threads.
pub struct Enclave<E: SigningEngine, D: DiagnosticSink> {
    config: EnclaveConfig,
    engine: E,
    sink: D,
    rng: StreamGenerator,
    keys: KeyStore,
}

impl<E: SigningEngine, D: DiagnosticSink> Enclave<E, D> {
    /// Validates `config` and seeds the generator from `entropy`.
    pub fn new(
        config: EnclaveConfig,
        engine: E,
        sink: D,
        entropy: &mut EntropyChain,
    ) -> Result<Self, EnclaveError> {
        check_config(&config, &engine)?;

        let rng = StreamGenerator::from_entropy(entropy)?;
        Ok(Self::assemble(config, engine, sink, rng))
    }

    /// Validates `config` and uses an already seeded generator.
    ///
    /// This is how reproducible enclaves are built for testing.
    pub fn with_generator(
        config: EnclaveConfig,
        engine: E,
        sink: D,
        rng: StreamGenerator,
    ) -> Result<Self, EnclaveError> {
        check_config(&config, &engine)?;

        Ok(Self::assemble(config, engine, sink, rng))
    }

    fn assemble(config: EnclaveConfig, engine: E, sink: D, rng: StreamGenerator) -> Self {
        log::info!(
            "enclave ready: logn {}, {:?} signatures, rekey {:?}",
            config.scheme.logn,
            config.scheme.encoding,
            config.rekey
        );

        Self {
            config,
            engine,
            sink,
            rng,
            keys: KeyStore::new(),
        }
    }

    /// Current trust state.
    pub fn state(&self) -> TrustState {
        self.keys.state()
    }

    /// Encoded public key, once generated.
    pub fn public_key(&self) -> Option<&[u8]> {
        self.keys.public_key()
    }

    /// Active configuration.
    pub fn config(&self) -> &EnclaveConfig {
        &self.config
    }

    /// The signing engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The diagnostic sink.
    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Generates the enclave key pair.
    ///
    /// Under [`RekeyPolicy::Reject`] a second call fails with
    /// [`EnclaveError::InvalidState`]. Under [`RekeyPolicy::Replace`] the
    /// old pair is wiped and replaced, but only after the new pair has been
    /// generated; a failed regeneration leaves the old pair in place.
    pub fn generate_keypair(&mut self) -> Result<(), EnclaveError> {
        if self.keys.state() == TrustState::KeyReady && self.config.rekey == RekeyPolicy::Reject {
            self.trace_text("Failed: key pair already generated.\n");
            return Err(self.reject(EnclaveError::InvalidState(TrustState::KeyReady)));
        }

        let mut keygen = match self.engine.keygen_context(&self.config.scheme) {
            Ok(keygen) => keygen,
            Err(EngineError::OutOfMemory) => {
                self.trace_text("Failed to allocate keygen context.\n");
                return Err(self.reject(EnclaveError::ResourceExhausted("key generation")));
            }
            Err(err) => return Err(self.reject(EnclaveError::KeyGenFailed(err))),
        };

        let mut pair = KeyPair::new();
        let generated = keygen.generate(
            &mut self.rng,
            pair.private.buffer_mut(),
            pair.public.buffer_mut(),
        );
        drop(keygen);

        let lengths = match generated {
            Ok(lengths) => lengths,
            Err(err) => {
                self.trace_text("Failed to generate keys.\n");
                return Err(self.reject(EnclaveError::KeyGenFailed(err)));
            }
        };

        let stored = lengths.private > 0
            && lengths.public > 0
            && pair.private.set_len(lengths.private)
            && pair.public.set_len(lengths.public);
        if !stored || !self.keys.install(pair) {
            self.trace_text("Failed to generate keys.\n");
            return Err(self.reject(EnclaveError::KeyGenFailed(EngineError::Failed(format!(
                "engine reported key lengths {}/{}",
                lengths.private, lengths.public
            )))));
        }

        log::info!(
            "key pair generated: {} byte public key, {} byte private key",
            lengths.public,
            lengths.private
        );
        Ok(())
    }

    /// Signs `message` into `signature` and returns the signature length.
    ///
    /// `signature` must hold at least `max_signature_len` bytes. A fresh
    /// nonce is drawn from the generator for every call.
    pub fn sign(&mut self, message: &[u8], signature: &mut [u8]) -> Result<usize, EnclaveError> {
        let max_len = self.config.max_signature_len;

        if message.is_empty() {
            return Err(self.reject_parameter(ParamError::EmptyMessage));
        }
        if signature.len() < max_len {
            return Err(self.reject_parameter(ParamError::SignatureBufferTooSmall {
                provided: signature.len(),
                required: max_len,
            }));
        }

        let Some(private_key) = self.keys.private_key() else {
            self.trace_text("Failed: invalid state.\n");
            return Err(self.reject(EnclaveError::InvalidState(self.keys.state())));
        };

        if self.config.trace_payloads {
            self.trace_text("Copied plaintext:\n");
            self.trace_bytes(message);
        }

        let mut signer = match self.engine.signer_context(&self.config.scheme) {
            Ok(signer) => signer,
            Err(EngineError::OutOfMemory) => {
                self.trace_text("Failed to allocate signing context.\n");
                return Err(self.reject(EnclaveError::ResourceExhausted("signing")));
            }
            Err(err) => return Err(self.reject(EnclaveError::SignFailed(err))),
        };

        if let Err(err) = signer.set_private_key(private_key) {
            return Err(self.reject(EnclaveError::SignFailed(err)));
        }

        let mut nonce = Zeroizing::new([0u8; NONCE_LEN]);
        self.rng.fill_bytes(&mut nonce[..]);

        signer.start(&nonce);
        signer.update(message);
        let generated = signer.generate(&mut signature[..max_len]);
        drop(signer);

        let len = match generated {
            Ok(len) if len > 0 && len <= max_len => len,
            Ok(len) => {
                return Err(self.reject(EnclaveError::SignFailed(EngineError::Failed(format!(
                    "engine reported signature length {len}"
                )))));
            }
            Err(err) => return Err(self.reject(EnclaveError::SignFailed(err))),
        };

        if self.config.trace_payloads {
            if let Some(public_key) = self.keys.public_key() {
                self.trace_text("Public key:\n");
                self.trace_bytes(public_key);
            }
        }

        log::debug!("signed {} byte message, {} byte signature", message.len(), len);
        Ok(len)
    }

    /// Reports an argument violation detected outside [`Enclave::sign`],
    /// such as a null pointer at the raw entry points.
    pub(crate) fn reject_parameter(&self, err: ParamError) -> EnclaveError {
        self.trace_text("Failed: invalid parameter.\n");
        self.reject(EnclaveError::InvalidParameter(err))
    }

    fn reject(&self, err: EnclaveError) -> EnclaveError {
        log::debug!("boundary call rejected: {}", err);
        err
    }

    fn trace_text(&self, text: &str) {
        if let Err(err) = self.sink.print_text(text) {
            log::warn!("{}", err);
        }
    }

    fn trace_bytes(&self, bytes: &[u8]) {
        if let Err(err) = self.sink.print_bytes(bytes) {
            log::warn!("{}", err);
        }
    }
}

fn check_config<E: SigningEngine>(config: &EnclaveConfig, engine: &E) -> Result<(), EnclaveError> {
    config.validate()?;
    engine.check_params(&config.scheme, config.max_signature_len)?;
    Ok(())
}
