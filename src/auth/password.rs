use anyhow::Context;
use lazy_static::lazy_static;
use tracing::{error, warn};

/// bcrypt work factor. Matches the hashes already stored by earlier deployments.
pub const HASH_COST: u32 = 10;

lazy_static! {
    /// Cost-10 hash checked when the email is unknown, so both login failures cost one verify.
    static ref DUMMY_HASH: String = hash_password("routekeeper-no-such-user").unwrap_or_default();
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    bcrypt::hash(plain, HASH_COST).map_err(|e| {
        error!(error = %e, "bcrypt hash_password error");
        anyhow::anyhow!(e.to_string())
    })
}

/// Constant-time check delegated to bcrypt. A malformed hash is a mismatch.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    match bcrypt::verify(plain, hash) {
        Ok(ok) => ok,
        Err(e) => {
            warn!(error = %e, "bcrypt verify on unusable hash");
            false
        }
    }
}

/// Runs [`hash_password`] on the blocking pool.
pub async fn hash_password_async(plain: String) -> anyhow::Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .context("hash task panicked")?
}

/// Runs [`verify_password`] on the blocking pool.
pub async fn verify_password_async(plain: String, hash: String) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
        .await
        .context("verify task panicked")
}

/// Burns one bcrypt verify against a fixed hash. The outcome is meaningless.
pub async fn verify_dummy_async(plain: String) -> anyhow::Result<()> {
    tokio::task::spawn_blocking(move || {
        verify_password(&plain, &DUMMY_HASH);
    })
    .await
    .context("verify task panicked")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &hash));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn verify_is_false_on_malformed_hash() {
        assert!(!verify_password("anything", "not-a-valid-hash"));
    }

    #[test]
    fn hash_is_salted_and_uses_cost_10() {
        let a = hash_password("pw1").unwrap();
        let b = hash_password("pw1").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$2b$10$"));
        assert!(!a.contains("pw1"));
    }

    #[tokio::test]
    async fn async_wrappers_agree_with_sync() {
        let hash = hash_password_async("pw1".into()).await.unwrap();
        assert!(verify_password_async("pw1".into(), hash.clone()).await.unwrap());
        assert!(!verify_password_async("pw2".into(), hash).await.unwrap());
    }

    #[test]
    fn dummy_hash_is_a_real_cost_10_hash() {
        assert!(DUMMY_HASH.starts_with("$2b$10$"));
        assert!(bcrypt::verify("routekeeper-no-such-user", &DUMMY_HASH).unwrap());
        assert!(!verify_password("pw1", &DUMMY_HASH));
    }
}
