use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenType;
use super::errors::JwtError;

/// JWT token handler for encoding and verifying tokens under one secret.
///
/// Uses HS256 (HMAC with SHA-256). Access and refresh tokens are meant to be
/// signed by two handlers built from two different secrets.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Encode claims into a signed JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a JWT and return its claims.
    ///
    /// Checks signature, expiry and that the `typ` claim equals `expected`.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    /// * `expected` - Token purpose the caller requires
    ///
    /// # Errors
    /// * `InvalidSignature` - Signed with another key or tampered with
    /// * `TokenExpired` - `exp` is in the past
    /// * `WrongTokenType` - Well-formed token minted for the other purpose
    /// * `Malformed` - Anything else that fails to decode
    pub fn decode(&self, token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                    _ => JwtError::Malformed(e.to_string()),
                }
            })?;

        let claims = token_data.claims;
        if claims.typ != expected {
            return Err(JwtError::WrongTokenType {
                expected,
                actual: claims.typ,
            });
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use chrono::Utc;

    use super::*;

    fn claims(typ: TokenType, ttl: Duration) -> Claims {
        let now = Utc::now();
        Claims::new("user123", "session456", typ, now, now + ttl)
    }

    #[test]
    fn test_encode_and_decode() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let claims = claims(TokenType::Access, Duration::minutes(15));

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());

        let decoded = handler
            .decode(&token, TokenType::Access)
            .expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_malformed_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");

        let result = handler.decode("invalid.token.here", TokenType::Access);
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!");
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!");

        let token = handler1
            .encode(&claims(TokenType::Refresh, Duration::days(7)))
            .expect("Failed to encode token");

        let result = handler2.decode(&token, TokenType::Refresh);
        assert_eq!(result, Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_decode_rejects_wrong_type() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let token = handler
            .encode(&claims(TokenType::Access, Duration::minutes(15)))
            .expect("Failed to encode token");

        let result = handler.decode(&token, TokenType::Refresh);
        assert_eq!(
            result,
            Err(JwtError::WrongTokenType {
                expected: TokenType::Refresh,
                actual: TokenType::Access,
            })
        );
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let now = Utc::now();
        let expired = Claims::new(
            "user123",
            "session456",
            TokenType::Access,
            now - Duration::minutes(20),
            now - Duration::minutes(5),
        );
        let token = handler.encode(&expired).expect("Failed to encode token");

        let result = handler.decode(&token, TokenType::Access);
        assert_eq!(result, Err(JwtError::TokenExpired));
    }

    #[test]
    fn test_decode_rejects_payload_without_type() {
        let handler = JwtHandler::new(b"my_secret_key_at_least_32_bytes_long!");
        let exp = (Utc::now() + Duration::minutes(5)).timestamp();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &serde_json::json!({ "sub": "user123", "sid": "session456", "exp": exp }),
            &EncodingKey::from_secret(b"my_secret_key_at_least_32_bytes_long!"),
        )
        .expect("Failed to encode token");

        let result = handler.decode(&token, TokenType::Access);
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }
}
