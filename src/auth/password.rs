use tracing::error;

/// Fixed bcrypt work factor: 2^10 rounds. Deliberately expensive so that
/// brute-forcing stolen hashes stays slow.
const BCRYPT_COST: u32 = 10;

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let hashed = bcrypt::hash(plain, BCRYPT_COST).map_err(|e| {
        error!(error = %e, "bcrypt hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(hashed)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let ok = bcrypt::verify(plain, hash).map_err(|e| {
        error!(error = %e, "bcrypt verify error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(ok)
}
