//! FN-DSA (Falcon) engine backed by the `fn-dsa` crate.
//!
//! Key generation draws its randomness straight from the enclave's
//! [`StreamGenerator`]. Signing is randomized only by the 40-byte nonce the
//! boundary hands to [`SignerContext::start`]: the engine is given a
//! [`NonceRng`] that returns the nonce bytes first and then a SHAKE-256
//! stream keyed by the nonce. A signature is therefore a deterministic
//! function of key, nonce and message, and a fresh nonce always yields a
//! fresh signature.
//!
//! `fn-dsa` only produces the padded fixed-length signature format, so
//! only [`SignatureEncoding::Static`] is accepted.

use fn_dsa::{
    CryptoRng, DOMAIN_NONE, HASH_ID_RAW, KeyPairGenerator, KeyPairGeneratorStandard, RngCore,
    RngError, SigningKey, SigningKeyStandard, VerifyingKey, VerifyingKeyStandard,
    sign_key_size, signature_size, vrfy_key_size,
};
use sha3::Shake256;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use zeroize::{Zeroize, Zeroizing};

use super::{EngineError, KeyGenContext, KeyLengths, SignerContext, SigningEngine};
use crate::config::{
    ConfigError, NONCE_LEN, PRIVATE_KEY_CAPACITY, PUBLIC_KEY_CAPACITY, SUPPORTED_LOGN,
    SchemeParams, SignatureEncoding,
};
use crate::rng::StreamGenerator;

/// Domain label for the per-signature sampler stream.
const SIGN_STREAM_LABEL: &[u8] = b"lattice-enclave/sign-stream/v1";

/// FN-DSA signing engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct FnDsaEngine;

impl FnDsaEngine {
    /// Checks a signature against an encoded public key.
    pub fn verify(&self, public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        match VerifyingKeyStandard::decode(public_key) {
            Some(vk) => vk.verify(signature, &DOMAIN_NONE, &HASH_ID_RAW, message),
            None => false,
        }
    }

    fn check_logn(logn: u32) -> Result<(), EngineError> {
        if SUPPORTED_LOGN.contains(&logn) {
            Ok(())
        } else {
            Err(EngineError::UnsupportedParams { logn })
        }
    }
}

impl SigningEngine for FnDsaEngine {
    type KeyGen = FnDsaKeyGen;
    type Signer = FnDsaSigner;

    fn check_params(
        &self,
        params: &SchemeParams,
        max_signature_len: usize,
    ) -> Result<(), ConfigError> {
        if !SUPPORTED_LOGN.contains(&params.logn) {
            return Err(ConfigError::UnsupportedDegree(params.logn));
        }

        if params.encoding != SignatureEncoding::Static {
            return Err(ConfigError::UnsupportedEncoding(params.encoding));
        }

        let required = signature_size(params.logn);
        if max_signature_len < required {
            return Err(ConfigError::SignatureBufferTooSmall {
                configured: max_signature_len,
                required,
            });
        }

        debug_assert!(sign_key_size(params.logn) <= PRIVATE_KEY_CAPACITY);
        debug_assert!(vrfy_key_size(params.logn) <= PUBLIC_KEY_CAPACITY);

        Ok(())
    }

    fn keygen_context(&self, params: &SchemeParams) -> Result<FnDsaKeyGen, EngineError> {
        Self::check_logn(params.logn)?;

        Ok(FnDsaKeyGen {
            kg: KeyPairGeneratorStandard::default(),
            logn: params.logn,
        })
    }

    fn signer_context(&self, params: &SchemeParams) -> Result<FnDsaSigner, EngineError> {
        Self::check_logn(params.logn)?;

        Ok(FnDsaSigner {
            logn: params.logn,
            key: None,
            nonce: None,
            message: Vec::new(),
        })
    }
}

/// Key generation context.
pub struct FnDsaKeyGen {
    kg: KeyPairGeneratorStandard,
    logn: u32,
}

impl KeyGenContext for FnDsaKeyGen {
    fn generate(
        &mut self,
        rng: &mut StreamGenerator,
        private_key: &mut [u8],
        public_key: &mut [u8],
    ) -> Result<KeyLengths, EngineError> {
        let private_len = sign_key_size(self.logn);
        let public_len = vrfy_key_size(self.logn);

        if private_key.len() < private_len {
            return Err(EngineError::BufferTooSmall {
                required: private_len,
                available: private_key.len(),
            });
        }
        if public_key.len() < public_len {
            return Err(EngineError::BufferTooSmall {
                required: public_len,
                available: public_key.len(),
            });
        }

        self.kg.keygen(
            self.logn,
            rng,
            &mut private_key[..private_len],
            &mut public_key[..public_len],
        );

        Ok(KeyLengths {
            private: private_len,
            public: public_len,
        })
    }
}

/// Signing context.
pub struct FnDsaSigner {
    logn: u32,
    key: Option<SigningKeyStandard>,
    nonce: Option<Zeroizing<[u8; NONCE_LEN]>>,
    message: Vec<u8>,
}

impl SignerContext for FnDsaSigner {
    fn set_private_key(&mut self, private_key: &[u8]) -> Result<(), EngineError> {
        let key = SigningKeyStandard::decode(private_key).ok_or(EngineError::InvalidKey)?;
        if key.get_logn() != self.logn {
            return Err(EngineError::InvalidKey);
        }

        self.key = Some(key);
        Ok(())
    }

    fn start(&mut self, nonce: &[u8; NONCE_LEN]) {
        self.nonce = Some(Zeroizing::new(*nonce));
        self.message.clear();
    }

    fn update(&mut self, data: &[u8]) {
        self.message.extend_from_slice(data);
    }

    fn generate(&mut self, signature: &mut [u8]) -> Result<usize, EngineError> {
        let nonce = self.nonce.take().ok_or(EngineError::NotStarted)?;
        let key = self.key.as_mut().ok_or(EngineError::MissingKey)?;

        let len = signature_size(self.logn);
        if signature.len() < len {
            return Err(EngineError::BufferTooSmall {
                required: len,
                available: signature.len(),
            });
        }

        let mut rng = NonceRng::new(&nonce);
        key.sign(
            &mut rng,
            &DOMAIN_NONE,
            &HASH_ID_RAW,
            &self.message,
            &mut signature[..len],
        );

        Ok(len)
    }
}

impl Drop for FnDsaSigner {
    fn drop(&mut self) {
        self.message.zeroize();
    }
}

/// Randomness handed to the signer: the nonce itself, then SHAKE-256 over
/// a label and the nonce.
struct NonceRng {
    nonce: [u8; NONCE_LEN],
    served: usize,
    stream: <Shake256 as ExtendableOutput>::Reader,
}

impl NonceRng {
    fn new(nonce: &[u8; NONCE_LEN]) -> Self {
        let mut sponge = Shake256::default();
        sponge.update(SIGN_STREAM_LABEL);
        sponge.update(nonce);

        Self {
            nonce: *nonce,
            served: 0,
            stream: sponge.finalize_xof(),
        }
    }
}

impl Drop for NonceRng {
    fn drop(&mut self) {
        self.nonce.zeroize();
    }
}

impl RngCore for NonceRng {
    fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.fill_bytes(&mut bytes);
        u32::from_le_bytes(bytes)
    }

    fn next_u64(&mut self) -> u64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        u64::from_le_bytes(bytes)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let from_nonce = (NONCE_LEN - self.served).min(dest.len());
        dest[..from_nonce].copy_from_slice(&self.nonce[self.served..self.served + from_nonce]);
        self.served += from_nonce;

        self.stream.read(&mut dest[from_nonce..]);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RngError> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for NonceRng {}
